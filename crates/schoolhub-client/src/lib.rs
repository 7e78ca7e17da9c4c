//! # SchoolHub Client
//!
//! HTTP access to the SchoolHub backend.
//!
//! - [`client`]: [`ApiClient`], the one configured HTTP client (bearer token,
//!   request IDs, error mapping, 401 sign-out)
//! - [`resource`]: the [`Resource`] trait and generic CRUD via [`ResourceApi`]
//! - [`api`]: module-specific calls (login, bulk attendance, fee collection, ...)
//! - [`error`]: [`ApiError`]
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_client::{ApiClient, api::AuthApi, resources::Students};
//! use schoolhub_core::ListQuery;
//!
//! let session = AuthApi::login(&client, &LoginRequest::new(email, password)).await?;
//! let page = client
//!     .resource::<Students>()
//!     .list(&ListQuery::new().search("John"))
//!     .await?;
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod resource;

pub use client::{ApiClient, REQUEST_ID_HEADER};
pub use error::ApiError;
pub use resource::{Resource, ResourceApi, resources};
