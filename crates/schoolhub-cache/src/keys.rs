//! Cache key generation.
//!
//! Keys are ordered lists of parts whose first part is the resource's cache
//! key (`students`, `hostel-buildings`, ...). Invalidating a prefix such as
//! `["students"]` therefore drops every list and detail entry of that
//! resource at once.

use std::fmt;

use schoolhub_core::ListQuery;
use serde::Serialize;
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    /// Returns a key extended by one more part.
    pub fn child(&self, part: impl Into<String>) -> Self {
        let mut parts = self.0.clone();
        parts.push(part.into());
        Self(parts)
    }

    /// Whether `prefix` matches the leading parts of this key.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(":"))
    }
}

impl From<&str> for QueryKey {
    fn from(resource: &str) -> Self {
        Self(vec![resource.to_string()])
    }
}

/// Every entry of a resource.
pub fn all(resource: &str) -> QueryKey {
    QueryKey::from(resource)
}

/// A list page for the given query.
pub fn list(resource: &str, query: &ListQuery) -> QueryKey {
    all(resource).child("list").child(hash_filters(&query.to_params()))
}

/// A single entity.
pub fn detail(resource: &str, id: &str) -> QueryKey {
    all(resource).child("detail").child(id)
}

/// A named non-CRUD view of a resource, e.g. `["attendance", "summary", ...]`.
pub fn view(resource: &str, name: &str, params: &impl Serialize) -> QueryKey {
    all(resource).child(name).child(hash_filters(params))
}

/// Short, stable hash of filter parameters.
///
/// Parameters are serialized to JSON and hashed with SHA-256, so equal
/// parameters produce the same key across runs.
pub fn hash_filters<T: Serialize + ?Sized>(filters: &T) -> String {
    let bytes = serde_json::to_vec(filters).unwrap_or_default();
    let digest = Sha256::digest(&bytes);
    hex::encode(&digest[..8])
}
