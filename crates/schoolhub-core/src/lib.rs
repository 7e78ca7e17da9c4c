//! # SchoolHub Core
//!
//! Core types and utilities shared by every SchoolHub client crate.
//!
//! - [`envelope`]: Response envelopes and the backend error body
//! - [`pagination`]: Pagination metadata returned with list responses
//! - [`query`]: Loosely-typed list options converted to query parameters
//! - [`serde`]: Custom serde deserialization helpers
//! - [`validation`]: Form validation shared by every create/edit form
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_core::query::ListQuery;
//! use schoolhub_core::validation::validate_form;
//!
//! let query = ListQuery::new().search("John").filter("classId", "c-1");
//! let params = query.to_params();
//!
//! if let Err(errors) = validate_form(&form) {
//!     println!("{}", errors);
//! }
//! ```

pub mod envelope;
pub mod pagination;
pub mod query;
pub mod serde;
pub mod validation;

// Re-export commonly used types at crate root
pub use envelope::{Envelope, ErrorBody, FALLBACK_ERROR_MESSAGE, ListResponse};
pub use pagination::PaginationMeta;
pub use query::ListQuery;
pub use validation::{FormErrors, validate_form};
