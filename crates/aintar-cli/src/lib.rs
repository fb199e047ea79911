//! # AINTAR CLI
//!
//! Offline inspection of the permission and workflow rules against a
//! metadata snapshot file.
//!
//! This library crate holds the commands; the binary only parses arguments
//! and prints. Every command returns a report that renders as text or JSON.
//!
//! ## Usage
//!
//! ```ignore
//! use aintar_cli::commands;
//!
//! let metadata = commands::load_metadata(Some(path))?;
//! let report = commands::resolve(&metadata.dependency_graph()?, &[201]);
//! println!("{report}");
//! ```

pub mod commands;
