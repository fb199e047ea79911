//! Strongly-typed ID newtypes for workflow entities.
//!
//! The backend identifies users, documents, steps and document types by
//! integer keys. Wrapping them keeps a step id from being passed where a user
//! id is expected.
//!
//! # Example
//!
//! ```ignore
//! use aintar_models::ids::{StepId, UserId};
//!
//! fn assign(user: UserId, step: StepId) { /* ... */ }
//!
//! assign(UserId(12), StepId(3));   // OK
//! // assign(StepId(3), UserId(12)); // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Macro to define a strongly-typed integer ID newtype.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ident)
    ) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
        )]
        #[serde(transparent)]
        #[schema(value_type = $inner)]
        pub struct $name(pub $inner);

        impl $name {
            /// Get the inner value.
            #[inline]
            pub const fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            #[inline]
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            #[inline]
            fn from(id: $name) -> $inner {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<$inner>().map(Self)
            }
        }
    };
}

define_id!(
    /// Staff member (backend user key).
    UserId(i64)
);

define_id!(
    /// Request / document record.
    DocumentId(i64)
);

define_id!(
    /// Workflow step.
    StepId(i32)
);

define_id!(
    /// Document type.
    DocTypeId(i32)
);
