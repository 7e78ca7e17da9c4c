//! Inventory items, suppliers, and purchase orders.

use chrono::{DateTime, NaiveDate, Utc};
use schoolhub_core::validation::{error, not_blank, valid_phone};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::ids::{InventoryItemId, PurchaseOrderId, SupplierId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sku: Option<String>,
    pub quantity: u32,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub reorder_level: u32,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub supplier_id: Option<SupplierId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl InventoryItem {
    /// At or below the reorder level.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }

    pub fn stock_value(&self) -> f64 {
        self.unit_price.unwrap_or(0.0) * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItemForm {
    #[validate(custom(function = "not_blank"), length(max = 150))]
    pub name: String,
    pub category: Option<String>,
    #[validate(length(max = 50))]
    pub sku: Option<String>,
    pub quantity: u32,
    pub unit: Option<String>,
    pub reorder_level: u32,
    #[validate(range(min = 0.0))]
    pub unit_price: Option<f64>,
    pub location: Option<String>,
    pub supplier_id: Option<SupplierId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SupplierForm {
    #[validate(custom(function = "not_blank"), length(max = 150))]
    pub name: String,
    pub contact_person: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom(function = "valid_phone"))]
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PurchaseOrderStatus {
    #[default]
    Draft,
    Pending,
    Approved,
    Ordered,
    Received,
    Cancelled,
}

impl PurchaseOrderStatus {
    /// Statuses an order may move to from this one.
    pub fn next(self) -> &'static [PurchaseOrderStatus] {
        use PurchaseOrderStatus::*;
        match self {
            Draft => &[Pending, Cancelled],
            Pending => &[Approved, Cancelled],
            Approved => &[Ordered, Cancelled],
            Ordered => &[Received, Cancelled],
            Received | Cancelled => &[],
        }
    }

    pub fn can_become(self, target: PurchaseOrderStatus) -> bool {
        self.next().contains(&target)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderItem {
    #[validate(custom(function = "not_blank"))]
    pub item_id: InventoryItemId,
    #[serde(default)]
    pub item_name: Option<String>,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
    #[validate(range(min = 0.0))]
    pub unit_price: f64,
}

impl PurchaseOrderItem {
    pub fn line_total(&self) -> f64 {
        self.unit_price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    pub order_number: String,
    pub supplier_id: SupplierId,
    pub order_date: NaiveDate,
    #[serde(default)]
    pub expected_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: PurchaseOrderStatus,
    #[serde(default)]
    pub items: Vec<PurchaseOrderItem>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl PurchaseOrder {
    pub fn total(&self) -> f64 {
        let total: f64 = self.items.iter().map(PurchaseOrderItem::line_total).sum();
        (total * 100.0).round() / 100.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_order"))]
pub struct PurchaseOrderForm {
    #[validate(custom(function = "not_blank"))]
    pub supplier_id: SupplierId,
    pub order_date: NaiveDate,
    pub expected_date: Option<NaiveDate>,
    #[validate(nested)]
    #[serde(default)]
    pub items: Vec<PurchaseOrderItem>,
    pub notes: Option<String>,
}

fn validate_order(form: &PurchaseOrderForm) -> Result<(), ValidationError> {
    if form.items.is_empty() {
        return Err(error("items", "Add at least one item"));
    }
    if form
        .expected_date
        .is_some_and(|expected| expected < form.order_date)
    {
        return Err(error(
            "expected_date",
            "Expected date cannot be before the order date",
        ));
    }
    Ok(())
}

/// Body of `PUT /inventory/purchase-orders/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdate {
    pub status: PurchaseOrderStatus,
}
