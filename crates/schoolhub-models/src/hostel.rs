//! Hostel buildings, rooms, and bed allocations.

use chrono::{DateTime, NaiveDate, Utc};
use schoolhub_core::validation::{error, not_blank};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::ids::{BuildingId, HostelAllocationId, RoomId, StaffId, StudentId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildingGender {
    Male,
    Female,
    #[default]
    Mixed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostelBuilding {
    pub id: BuildingId,
    pub name: String,
    #[serde(default)]
    pub gender: BuildingGender,
    #[serde(default)]
    pub floors: Option<u32>,
    #[serde(default)]
    pub warden_id: Option<StaffId>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub total_rooms: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HostelBuildingForm {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: String,
    #[serde(default)]
    pub gender: BuildingGender,
    #[validate(range(min = 1, max = 50))]
    pub floors: Option<u32>,
    pub warden_id: Option<StaffId>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    Single,
    Double,
    #[default]
    Dormitory,
}

/// A room inside a hostel building.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostelRoom {
    pub id: RoomId,
    pub building_id: BuildingId,
    pub room_number: String,
    #[serde(default)]
    pub floor: Option<u32>,
    #[serde(default)]
    pub room_type: RoomType,
    pub capacity: u32,
    #[serde(default)]
    pub occupied: u32,
    #[serde(default)]
    pub monthly_fee: Option<f64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl HostelRoom {
    pub fn vacancy(&self) -> u32 {
        self.capacity.saturating_sub(self.occupied)
    }

    pub fn is_full(&self) -> bool {
        self.vacancy() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HostelRoomForm {
    #[validate(custom(function = "not_blank"))]
    pub building_id: BuildingId,
    #[validate(custom(function = "not_blank"), length(max = 20))]
    pub room_number: String,
    pub floor: Option<u32>,
    #[serde(default)]
    pub room_type: RoomType,
    #[validate(range(min = 1, max = 40))]
    pub capacity: u32,
    #[validate(range(min = 0.0))]
    pub monthly_fee: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationStatus {
    #[default]
    Active,
    Vacated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostelAllocation {
    pub id: HostelAllocationId,
    pub student_id: StudentId,
    pub room_id: RoomId,
    #[serde(default)]
    pub bed_number: Option<String>,
    pub allocated_date: NaiveDate,
    #[serde(default)]
    pub vacated_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: AllocationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl HostelAllocation {
    pub fn is_active(&self) -> bool {
        self.status == AllocationStatus::Active && self.vacated_date.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HostelAllocationForm {
    #[validate(custom(function = "not_blank"))]
    pub student_id: StudentId,
    #[validate(custom(function = "not_blank"))]
    pub room_id: RoomId,
    pub bed_number: Option<String>,
    pub allocated_date: NaiveDate,
}

/// Body of `PUT /hostel/allocations/{id}/vacate`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_vacate"))]
pub struct VacateRequest {
    #[serde(skip_serializing)]
    pub allocated_date: Option<NaiveDate>,
    pub vacated_date: NaiveDate,
    pub reason: Option<String>,
}

fn validate_vacate(request: &VacateRequest) -> Result<(), ValidationError> {
    if request
        .allocated_date
        .is_some_and(|allocated| request.vacated_date < allocated)
    {
        return Err(error(
            "vacated_date",
            "Vacate date cannot be before the allocation date",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_core::validate_form;

    #[test]
    fn test_room_vacancy() {
        let room: HostelRoom = serde_json::from_str(
            r#"{"id":"r1","buildingId":"b1","roomNumber":"101","capacity":4,"occupied":3}"#,
        )
        .unwrap();
        assert_eq!(room.vacancy(), 1);
        assert!(!room.is_full());
    }

    #[test]
    fn test_overfull_room_has_no_vacancy() {
        let room: HostelRoom = serde_json::from_str(
            r#"{"id":"r1","buildingId":"b1","roomNumber":"101","capacity":2,"occupied":3}"#,
        )
        .unwrap();
        assert_eq!(room.vacancy(), 0);
        assert!(room.is_full());
    }

    #[test]
    fn test_building_form_requires_name() {
        let errors = validate_form(&HostelBuildingForm::default()).unwrap_err();
        assert_eq!(errors.first("name"), Some("This field is required"));
    }

    #[test]
    fn test_building_form_wire_shape() {
        let form = HostelBuildingForm {
            name: "Block A".into(),
            gender: BuildingGender::Female,
            floors: Some(3),
            ..Default::default()
        };
        let json = serde_json::to_value(&form).unwrap();
        assert_eq!(json["name"], "Block A");
        assert_eq!(json["gender"], "FEMALE");
        assert!(json.get("wardenId").is_some());
    }

    #[test]
    fn test_vacate_before_allocation() {
        let request = VacateRequest {
            allocated_date: NaiveDate::from_ymd_opt(2024, 9, 1),
            vacated_date: NaiveDate::from_ymd_opt(2024, 8, 1).unwrap(),
            reason: None,
        };
        let errors = validate_form(&request).unwrap_err();
        assert!(errors.has("vacated_date"));
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("allocatedDate").is_none());
    }

    #[test]
    fn test_allocation_active() {
        let allocation: HostelAllocation = serde_json::from_str(
            r#"{"id":"a1","studentId":"s1","roomId":"r1","allocatedDate":"2024-09-01"}"#,
        )
        .unwrap();
        assert!(allocation.is_active());
    }
}
