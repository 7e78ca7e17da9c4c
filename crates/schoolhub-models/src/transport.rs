//! Transport: vehicles, routes with stops, and student allocations.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use schoolhub_core::validation::{error, not_blank, valid_phone};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::ids::{RouteId, RouteStopId, StudentId, TransportAllocationId, VehicleId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    #[default]
    Active,
    Maintenance,
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: VehicleId,
    pub registration_number: String,
    #[serde(default)]
    pub model: Option<String>,
    pub capacity: u32,
    #[serde(default)]
    pub driver_name: Option<String>,
    #[serde(default)]
    pub driver_phone: Option<String>,
    #[serde(default)]
    pub route_id: Option<RouteId>,
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde(default)]
    pub insurance_expiry: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Vehicle {
    pub fn insurance_lapsed(&self, today: NaiveDate) -> bool {
        self.insurance_expiry.is_some_and(|expiry| expiry < today)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleForm {
    #[validate(custom(function = "not_blank"), length(max = 20))]
    pub registration_number: String,
    pub model: Option<String>,
    #[validate(range(min = 1, max = 120))]
    pub capacity: u32,
    pub driver_name: Option<String>,
    #[validate(custom(function = "valid_phone"))]
    pub driver_phone: Option<String>,
    pub route_id: Option<RouteId>,
    #[serde(default)]
    pub status: VehicleStatus,
    pub insurance_expiry: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStop {
    #[serde(default)]
    pub id: Option<RouteStopId>,
    pub name: String,
    #[serde(default)]
    pub pickup_time: Option<NaiveTime>,
    #[serde(default)]
    pub drop_time: Option<NaiveTime>,
    #[serde(default)]
    pub sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportRoute {
    pub id: RouteId,
    pub name: String,
    #[serde(default)]
    pub start_point: Option<String>,
    #[serde(default)]
    pub end_point: Option<String>,
    #[serde(default)]
    pub fare: Option<f64>,
    #[serde(default)]
    pub stops: Vec<RouteStop>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl TransportRoute {
    /// Stops in travel order.
    pub fn ordered_stops(&self) -> Vec<&RouteStop> {
        let mut stops: Vec<&RouteStop> = self.stops.iter().collect();
        stops.sort_by_key(|stop| stop.sequence);
        stops
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RouteStopForm {
    #[validate(custom(function = "not_blank"))]
    pub name: String,
    pub pickup_time: Option<NaiveTime>,
    pub drop_time: Option<NaiveTime>,
    pub sequence: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_stop_order"))]
pub struct TransportRouteForm {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: String,
    pub start_point: Option<String>,
    pub end_point: Option<String>,
    #[validate(range(min = 0.0))]
    pub fare: Option<f64>,
    #[validate(nested)]
    #[serde(default)]
    pub stops: Vec<RouteStopForm>,
}

fn validate_stop_order(form: &TransportRouteForm) -> Result<(), ValidationError> {
    let mut sequences: Vec<u32> = form.stops.iter().map(|stop| stop.sequence).collect();
    sequences.sort_unstable();
    if sequences.windows(2).any(|pair| pair[0] == pair[1]) {
        return Err(error("stops", "Two stops share the same position"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportAllocation {
    pub id: TransportAllocationId,
    pub student_id: StudentId,
    pub route_id: RouteId,
    #[serde(default)]
    pub vehicle_id: Option<VehicleId>,
    #[serde(default)]
    pub stop_name: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TransportAllocationForm {
    #[validate(custom(function = "not_blank"))]
    pub student_id: StudentId,
    #[validate(custom(function = "not_blank"))]
    pub route_id: RouteId,
    pub vehicle_id: Option<VehicleId>,
    pub stop_name: Option<String>,
    pub start_date: NaiveDate,
}
