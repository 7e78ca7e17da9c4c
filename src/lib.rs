//! # SchoolHub
//!
//! Client SDK for the SchoolHub school-management backend.
//!
//! The SDK talks to the REST API under `/api`, keeps the signed-in session
//! on disk, caches reads, and exposes toolkit-independent screen state so
//! any front end (the bundled `schoolhub` CLI included) can drive it.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── schoolhub-core/    # Envelopes, pagination, list queries, form validation
//! ├── schoolhub-config/  # Environment-driven configuration
//! ├── schoolhub-models/  # Entities and forms for every module
//! ├── schoolhub-auth/    # Session persistence and token inspection
//! ├── schoolhub-cache/   # Query cache with de-duplication and invalidation
//! ├── schoolhub-client/  # HTTP client, generic CRUD, module services
//! ├── schoolhub-store/   # View state, effects, forms, navigation
//! └── schoolhub-cli/     # `schoolhub` command-line front end
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! SCHOOLHUB_API_URL=http://localhost:5000/api
//! SCHOOLHUB_SESSION_FILE=storage/session.json
//! CACHE_STALE_SECONDS=0
//! LOG_LEVEL=warn
//! ```
//!
//! ```ignore
//! use schoolhub::prelude::*;
//!
//! let sessions = SessionManager::from_config(&SessionConfig::from_env());
//! sessions.restore();
//! let cache = QueryCache::new(CacheConfig::from_env().stale_time());
//! let client = ApiClient::new(ApiConfig::from_env(), sessions, cache)?;
//!
//! AuthApi::login(&client, &LoginRequest::new("head@school.edu", "secret")).await?;
//! let students = client
//!     .resource::<resources::Students>()
//!     .list(&ListQuery::new().search("John"))
//!     .await?;
//! ```
//!
//! ## Error Messages
//!
//! Failed requests surface the server's `error` or `message` field
//! verbatim. A 401 clears the session and the cache once, however many
//! requests observe it.

pub use schoolhub_auth as auth;
pub use schoolhub_cache as cache;
pub use schoolhub_client as client;
pub use schoolhub_config as config;
pub use schoolhub_core as core;
pub use schoolhub_models as models;
pub use schoolhub_store as store;

/// The types most front ends need.
pub mod prelude {
    pub use schoolhub_auth::{Session, SessionManager};
    pub use schoolhub_cache::{CacheConfig, FetchPolicy, QueryCache, QueryKey};
    pub use schoolhub_client::api::{
        AttendanceApi, AuthApi, FeesApi, HostelApi, HrApi, InventoryApi, LibraryApi,
        MessagesApi, ReportsApi, TransportApi,
    };
    pub use schoolhub_client::{ApiClient, ApiError, Resource, ResourceApi, resources};
    pub use schoolhub_config::{ApiConfig, LogConfig, SessionConfig};
    pub use schoolhub_core::{FormErrors, ListQuery, ListResponse, validate_form};
    pub use schoolhub_models::{ChangePasswordRequest, LoginRequest, User};
    pub use schoolhub_store::{
        Effect, EffectReceiver, EffectSender, EmptyState, FormSubmitter, Intent, Navigator,
        QueryStore, Route, RouteTable, SubmitError, Toast, ViewState, effect_channel,
    };
}
