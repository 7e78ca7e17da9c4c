use schoolhub_core::Envelope;
use schoolhub_models::ids::HostelAllocationId;
use schoolhub_models::{HostelAllocation, HostelAllocationForm, VacateRequest};
use tracing::instrument;

use super::invalidate_all;
use crate::resource::Resource;
use crate::resource::resources::{HostelAllocations, HostelBuildings, HostelRooms};
use crate::{ApiClient, ApiError};

/// Keys whose occupancy figures change when a bed is taken or freed.
const OCCUPANCY_KEYS: [&str; 3] = [HostelAllocations::KEY, HostelRooms::KEY, HostelBuildings::KEY];

pub struct HostelApi;

impl HostelApi {
    /// `POST /hostel/allocations`.
    #[instrument(skip(client, form), fields(student_id = %form.student_id, room_id = %form.room_id))]
    pub async fn allocate(
        client: &ApiClient,
        form: &HostelAllocationForm,
    ) -> Result<HostelAllocation, ApiError> {
        let allocation: Envelope<HostelAllocation> =
            client.post(HostelAllocations::PATH, form).await?;
        invalidate_all(client, &OCCUPANCY_KEYS).await;
        Ok(allocation.into_inner())
    }

    /// `PUT /hostel/allocations/{id}/vacate`.
    #[instrument(skip(client, request))]
    pub async fn vacate(
        client: &ApiClient,
        allocation_id: &HostelAllocationId,
        request: &VacateRequest,
    ) -> Result<HostelAllocation, ApiError> {
        let path = format!("{}/vacate", HostelAllocations::item_path(allocation_id));
        let allocation: Envelope<HostelAllocation> = client.put(&path, request).await?;
        invalidate_all(client, &OCCUPANCY_KEYS).await;
        Ok(allocation.into_inner())
    }
}
