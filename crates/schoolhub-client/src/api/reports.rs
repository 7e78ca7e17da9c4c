use schoolhub_cache::{FetchPolicy, keys};
use schoolhub_core::Envelope;
use schoolhub_models::DashboardStats;
use tracing::instrument;

use crate::{ApiClient, ApiError};

pub const REPORTS_KEY: &str = "reports";

pub struct ReportsApi;

impl ReportsApi {
    /// `GET /reports/dashboard`.
    #[instrument(skip(client))]
    pub async fn dashboard(
        client: &ApiClient,
        policy: FetchPolicy,
    ) -> Result<DashboardStats, ApiError> {
        client
            .cache()
            .fetch_with(policy, &keys::all(REPORTS_KEY).child("dashboard"), || async {
                let stats: Envelope<DashboardStats> = client.get("/reports/dashboard", &[]).await?;
                Ok::<_, ApiError>(stats.into_inner())
            })
            .await
    }
}
