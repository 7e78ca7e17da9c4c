use schoolhub_cache::{FetchPolicy, keys};
use schoolhub_core::{Envelope, ListQuery, ListResponse};
use schoolhub_models::{AttendanceRecord, AttendanceSummary, BulkAttendanceForm};
use tracing::instrument;

use super::invalidate_all;
use crate::{ApiClient, ApiError};

pub const ATTENDANCE_KEY: &str = "attendance";

pub struct AttendanceApi;

impl AttendanceApi {
    /// `GET /attendance`, filtered by `classId`, `sectionId`, `date`, ...
    #[instrument(skip(client))]
    pub async fn list(
        client: &ApiClient,
        query: &ListQuery,
        policy: FetchPolicy,
    ) -> Result<ListResponse<AttendanceRecord>, ApiError> {
        let params = query.to_params();
        client
            .cache()
            .fetch_with(policy, &keys::list(ATTENDANCE_KEY, query), || {
                client.get("/attendance", &params)
            })
            .await
    }

    /// `POST /attendance/bulk`: one register for a class on one day.
    #[instrument(skip(client, form), fields(class_id = %form.class_id, date = %form.date))]
    pub async fn mark_bulk(
        client: &ApiClient,
        form: &BulkAttendanceForm,
    ) -> Result<ListResponse<AttendanceRecord>, ApiError> {
        let saved = client.post("/attendance/bulk", form).await?;
        invalidate_all(client, &[ATTENDANCE_KEY]).await;
        Ok(saved)
    }

    /// `GET /attendance/summary` for a student or class over a period.
    #[instrument(skip(client))]
    pub async fn summary(
        client: &ApiClient,
        query: &ListQuery,
    ) -> Result<AttendanceSummary, ApiError> {
        let params = query.to_params();
        client
            .cache()
            .fetch(&keys::view(ATTENDANCE_KEY, "summary", &params), || async {
                let summary: Envelope<AttendanceSummary> =
                    client.get("/attendance/summary", &params).await?;
                Ok::<_, ApiError>(summary.into_inner())
            })
            .await
    }
}
