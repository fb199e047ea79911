//! # AINTAR Cache
//!
//! In-process coordination primitives for the rules service.
//!
//! This crate provides:
//! - [`CacheManager`]: TTL cache for permission sets, snapshots and lists
//! - [`OperationLockManager`]: keyed locks that expire, with an RAII guard
//! - [`RequestQueue`]: bounded-concurrency runner with retry and backoff
//! - Cache configuration from environment variables
//! - Cache key generation utilities
//!
//! All of them are plain owned values; share them through `Arc` in the
//! application state.
//!
//! # Example
//!
//! ```ignore
//! use aintar_cache::{CacheConfig, CacheManager, hash_filters, keys};
//!
//! let config = CacheConfig::from_env();
//! let cache = CacheManager::new(config.default_ttl());
//!
//! let key = keys::permissions::user(generation, user_id, &hash_filters(&granted));
//! cache.insert(&key, &resolved)?;
//! let cached: Option<PermissionSet> = cache.get(&key);
//! ```

pub mod config;
pub mod keys;
pub mod lock;
pub mod queue;
pub mod store;

pub use config::CacheConfig;
pub use keys::hash_filters;
pub use lock::{LockError, OperationGuard, OperationLockManager};
pub use queue::{QueueError, RequestQueue, RetryPolicy};
pub use store::{CacheError, CacheManager};
