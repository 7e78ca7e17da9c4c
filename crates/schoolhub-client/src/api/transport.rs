use schoolhub_core::Envelope;
use schoolhub_models::{TransportAllocation, TransportAllocationForm};
use tracing::instrument;

use super::invalidate_all;
use crate::resource::Resource;
use crate::resource::resources::{TransportAllocations, TransportRoutes, Vehicles};
use crate::{ApiClient, ApiError};

pub struct TransportApi;

impl TransportApi {
    /// `POST /transport/allocations`.
    #[instrument(skip(client, form), fields(student_id = %form.student_id, route_id = %form.route_id))]
    pub async fn allocate(
        client: &ApiClient,
        form: &TransportAllocationForm,
    ) -> Result<TransportAllocation, ApiError> {
        let allocation: Envelope<TransportAllocation> =
            client.post(TransportAllocations::PATH, form).await?;
        invalidate_all(
            client,
            &[TransportAllocations::KEY, TransportRoutes::KEY, Vehicles::KEY],
        )
        .await;
        Ok(allocation.into_inner())
    }
}
