//! Cache key generation.
//!
//! Keys are `aintar:`-prefixed, colon-separated paths so related entries can
//! be dropped together with [`CacheManager::invalidate_prefix`](crate::CacheManager::invalidate_prefix).

use aintar_models::{DocTypeId, StepId, UserId};

const CACHE_PREFIX: &str = "aintar";

fn build_key(parts: &[&str]) -> String {
    format!("{}:{}", CACHE_PREFIX, parts.join(":"))
}

/// Keys for resolved per-user permission sets.
///
/// The snapshot generation and the hash of the granted ids are part of the
/// key, so neither a reload nor a fresh token with different grants reads a
/// stale resolution.
pub mod permissions {
    use super::*;

    pub fn user(generation: u64, user_id: UserId, grants_hash: &str) -> String {
        build_key(&[
            "user",
            &user_id.to_string(),
            "permissions",
            &generation.to_string(),
            grants_hash,
        ])
    }

    pub fn user_prefix(user_id: UserId) -> String {
        format!("{}:user:{}:permissions:", CACHE_PREFIX, user_id)
    }

    /// Prefix covering every user's permission set.
    pub fn invalidation_prefix() -> String {
        format!("{}:user:", CACHE_PREFIX)
    }
}

/// Keys for workflow metadata snapshots.
pub mod metadata {
    use super::*;

    pub fn snapshot() -> String {
        build_key(&["metadata", "snapshot"])
    }

    /// Available moves from one step for one document type, per snapshot
    /// generation.
    pub fn transitions(generation: u64, doctype: DocTypeId, from: StepId) -> String {
        build_key(&[
            "metadata",
            "transitions",
            &generation.to_string(),
            &doctype.to_string(),
            &from.to_string(),
        ])
    }

    pub fn invalidation_prefix() -> String {
        format!("{}:metadata:", CACHE_PREFIX)
    }
}

/// Keys for document lists shown per user.
pub mod documents {
    use super::*;

    pub fn list(user_id: UserId, filters_hash: &str) -> String {
        build_key(&["documents", &user_id.to_string(), "list", filters_hash])
    }

    pub fn user_prefix(user_id: UserId) -> String {
        format!("{}:documents:{}:", CACHE_PREFIX, user_id)
    }

    pub fn invalidation_prefix() -> String {
        format!("{}:documents:", CACHE_PREFIX)
    }
}

/// Short stable hash of filter parameters, for list keys.
pub fn hash_filters<T: std::hash::Hash>(filters: &T) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::Hasher;

    let mut hasher = DefaultHasher::new();
    filters.hash(&mut hasher);
    format!("{:x}", hasher.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_keys_share_prefix() {
        let key = permissions::user(3, UserId(42), "ab12");
        assert_eq!(key, "aintar:user:42:permissions:3:ab12");
        assert_ne!(key, permissions::user(4, UserId(42), "ab12"));
        assert!(key.starts_with(&permissions::user_prefix(UserId(42))));
        assert!(!key.starts_with(&permissions::user_prefix(UserId(4))));
        assert!(key.starts_with(&permissions::invalidation_prefix()));
    }

    #[test]
    fn test_metadata_keys() {
        assert_eq!(metadata::snapshot(), "aintar:metadata:snapshot");
        let key = metadata::transitions(0, DocTypeId(3), StepId(1));
        assert_eq!(key, "aintar:metadata:transitions:0:3:1");
        assert_ne!(key, metadata::transitions(1, DocTypeId(3), StepId(1)));
        assert!(key.starts_with(&metadata::invalidation_prefix()));
    }

    #[test]
    fn test_document_list_keys_are_per_user() {
        let hash = hash_filters(&("pending", 2));
        let key = documents::list(UserId(7), &hash);
        assert!(key.starts_with(&documents::user_prefix(UserId(7))));
        assert!(!key.starts_with(&documents::user_prefix(UserId(70))));
    }

    #[test]
    fn test_hash_filters_consistency() {
        let filters = ("test", 123, true);
        assert_eq!(hash_filters(&filters), hash_filters(&filters));
    }
}
