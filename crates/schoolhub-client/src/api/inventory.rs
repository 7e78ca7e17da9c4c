use schoolhub_core::Envelope;
use schoolhub_models::ids::PurchaseOrderId;
use schoolhub_models::{OrderStatusUpdate, PurchaseOrder, PurchaseOrderStatus};
use tracing::instrument;

use super::invalidate_all;
use crate::resource::Resource;
use crate::resource::resources::{InventoryItems, PurchaseOrders};
use crate::{ApiClient, ApiError};

pub struct InventoryApi;

impl InventoryApi {
    /// `PUT /inventory/purchase-orders/{id}/status`.
    ///
    /// Receiving an order changes stock levels, so item lists are refreshed
    /// as well.
    #[instrument(skip(client))]
    pub async fn set_order_status(
        client: &ApiClient,
        order_id: &PurchaseOrderId,
        status: PurchaseOrderStatus,
    ) -> Result<PurchaseOrder, ApiError> {
        let path = format!("{}/status", PurchaseOrders::item_path(order_id));
        let order: Envelope<PurchaseOrder> =
            client.put(&path, &OrderStatusUpdate { status }).await?;

        if status == PurchaseOrderStatus::Received {
            invalidate_all(client, &[PurchaseOrders::KEY, InventoryItems::KEY]).await;
        } else {
            invalidate_all(client, &[PurchaseOrders::KEY]).await;
        }
        Ok(order.into_inner())
    }
}
