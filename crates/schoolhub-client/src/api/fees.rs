use schoolhub_cache::keys;
use schoolhub_core::Envelope;
use schoolhub_models::ids::StudentId;
use schoolhub_models::{FeePayment, FeePaymentForm, StudentFeeStatus};
use tracing::instrument;

use super::invalidate_all;
use crate::resource::{Resource, path_segment, resources::FeePayments};
use crate::{ApiClient, ApiError};

pub const FEE_STATUS_KEY: &str = "fee-status";

pub struct FeesApi;

impl FeesApi {
    /// `POST /fees/payments`.
    #[instrument(skip(client, form), fields(student_id = %form.student_id, amount = form.amount))]
    pub async fn collect_payment(
        client: &ApiClient,
        form: &FeePaymentForm,
    ) -> Result<FeePayment, ApiError> {
        let payment: Envelope<FeePayment> = client.post(FeePayments::PATH, form).await?;
        invalidate_all(client, &[FeePayments::KEY, FEE_STATUS_KEY]).await;
        Ok(payment.into_inner())
    }

    /// `GET /fees/students/{id}`.
    #[instrument(skip(client))]
    pub async fn student_status(
        client: &ApiClient,
        student_id: &StudentId,
    ) -> Result<StudentFeeStatus, ApiError> {
        let path = format!("/fees/students/{}", path_segment(student_id));
        client
            .cache()
            .fetch(&keys::detail(FEE_STATUS_KEY, student_id), || async {
                let status: Envelope<StudentFeeStatus> = client.get(&path, &[]).await?;
                Ok::<_, ApiError>(status.into_inner())
            })
            .await
    }
}
