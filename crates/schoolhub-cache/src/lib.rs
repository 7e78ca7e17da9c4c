//! # SchoolHub Cache
//!
//! In-memory query cache shared by every screen of the client.
//!
//! This crate provides:
//! - [`QueryKey`]: hierarchical cache keys with per-resource builders in [`keys`]
//! - [`QueryCache`]: fetch-through cache with in-flight de-duplication and
//!   prefix invalidation
//! - [`CacheConfig`]: stale time loaded from the environment
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_cache::{CacheConfig, QueryCache, keys};
//!
//! let cache = QueryCache::new(CacheConfig::from_env().stale_time());
//! let key = keys::list("students", &query);
//! let students = cache.fetch(&key, || api.list(&query)).await?;
//!
//! // After a mutation
//! cache.invalidate(&keys::all("students")).await;
//! ```

pub mod config;
pub mod keys;
pub mod query_cache;

pub use config::CacheConfig;
pub use keys::{QueryKey, hash_filters};
pub use query_cache::{FetchPolicy, QueryCache};
