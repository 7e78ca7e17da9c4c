//! Module-specific calls beyond plain CRUD.
//!
//! Each service is a unit struct whose associated functions take the shared
//! [`ApiClient`](crate::ApiClient). Calls that change server state invalidate
//! the cache prefixes of every resource they touch.

pub mod attendance;
pub mod auth;
pub mod fees;
pub mod hostel;
pub mod hr;
pub mod inventory;
pub mod library;
pub mod messages;
pub mod reports;
pub mod transport;

pub use attendance::AttendanceApi;
pub use auth::AuthApi;
pub use fees::FeesApi;
pub use hostel::HostelApi;
pub use hr::HrApi;
pub use inventory::InventoryApi;
pub use library::LibraryApi;
pub use messages::MessagesApi;
pub use reports::ReportsApi;
pub use transport::TransportApi;

use schoolhub_cache::keys;

use crate::ApiClient;

/// Invalidates the cache entries of each named resource key.
pub(crate) async fn invalidate_all(client: &ApiClient, resource_keys: &[&str]) {
    for key in resource_keys {
        client.cache().invalidate(&keys::all(key)).await;
    }
}
