use schoolhub_cache::{FetchPolicy, keys};
use schoolhub_core::{Envelope, ListQuery, ListResponse};
use schoolhub_models::ids::LeaveRequestId;
use schoolhub_models::{LeaveRequest, LeaveStatusUpdate, Salary};
use tracing::instrument;

use super::invalidate_all;
use crate::resource::Resource;
use crate::resource::resources::LeaveRequests;
use crate::{ApiClient, ApiError};

pub const SALARIES_KEY: &str = "salaries";

pub struct HrApi;

impl HrApi {
    /// `PUT /hr/leaves/{id}/status`: approve, reject, or cancel a request.
    #[instrument(skip(client), fields(status = ?update.status))]
    pub async fn set_leave_status(
        client: &ApiClient,
        leave_id: &LeaveRequestId,
        update: &LeaveStatusUpdate,
    ) -> Result<LeaveRequest, ApiError> {
        let path = format!("{}/status", LeaveRequests::item_path(leave_id));
        let leave: Envelope<LeaveRequest> = client.put(&path, update).await?;
        invalidate_all(client, &[LeaveRequests::KEY]).await;
        Ok(leave.into_inner())
    }

    /// `GET /hr/salaries`, filtered by `staffId`, `month`, `year`.
    #[instrument(skip(client))]
    pub async fn salaries(
        client: &ApiClient,
        query: &ListQuery,
        policy: FetchPolicy,
    ) -> Result<ListResponse<Salary>, ApiError> {
        let params = query.to_params();
        client
            .cache()
            .fetch_with(policy, &keys::list(SALARIES_KEY, query), || {
                client.get("/hr/salaries", &params)
            })
            .await
    }
}
