//! # SchoolHub Store
//!
//! Presentation-facing state for SchoolHub screens, independent of any
//! UI toolkit.
//!
//! - [`QueryStore`]: load/refresh/retry/set-params state machine publishing
//!   a [`ViewState`]
//! - [`FormSubmitter`]: validate, submit, invalidate, toast, navigate
//! - [`Effect`]: one-shot toasts and navigation requests
//! - [`Route`], [`RouteTable`], [`Navigator`]: screens and the back stack
//! - [`EmptyState`]: empty-list placeholders
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_store::{Intent, QueryStore, effect_channel};
//!
//! let (effects, mut rx) = effect_channel();
//! let api = client.clone();
//! let store = QueryStore::new(ListQuery::new(), effects, move |query, policy| {
//!     let api = api.clone();
//!     async move { api.resource::<Students>().list_with(&query, policy).await }
//! });
//!
//! store.dispatch(Intent::Load).await;
//! store.dispatch(Intent::SetParams(ListQuery::new().search("John"))).await;
//! ```

pub mod effects;
pub mod empty;
pub mod form;
pub mod navigation;
pub mod query_store;
pub mod state;

pub use effects::{Effect, EffectReceiver, EffectSender, Toast, ToastKind, effect_channel};
pub use empty::EmptyState;
pub use form::{AfterSubmit, FormSubmitter, SubmitError};
pub use navigation::{Navigator, Route, RouteTable};
pub use query_store::{Fetcher, Intent, QueryStore};
pub use state::ViewState;
