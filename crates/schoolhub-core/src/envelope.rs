//! Response envelopes used by the backend.

use serde::{Deserialize, Serialize};

use crate::pagination::PaginationMeta;

/// Message shown when the server gives no usable `error` field.
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// A list response: `{ "data": [...], "pagination": {...} }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationMeta>,
}

impl<T> ListResponse<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}

impl<T> Default for ListResponse<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            pagination: None,
        }
    }
}

/// A single-entity response, either wrapped as `{ "data": {...} }` or bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(value) => value,
        }
    }
}

/// Error body returned with non-2xx responses: `{ "error": "..." }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Parses an error body, tolerating non-JSON payloads.
    pub fn parse(bytes: &[u8]) -> Self {
        serde_json::from_slice(bytes).unwrap_or_default()
    }

    /// The server's own message: `error` first, then `message`, skipping blanks.
    pub fn server_message(self) -> Option<String> {
        let present = |m: &String| !m.trim().is_empty();
        self.error.filter(present).or(self.message.filter(present))
    }

    /// The user-visible message, falling back to a generic one.
    pub fn into_message(self) -> String {
        self.server_message()
            .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string())
    }
}
