//! Teachers, departments, subjects, classes, and sections.

use chrono::{DateTime, NaiveDate, Utc};
use schoolhub_core::validation::{not_blank, valid_phone};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::{ClassId, DepartmentId, SectionId, SubjectId, TeacherId};
use crate::users::Gender;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TeacherStatus {
    #[default]
    Active,
    OnLeave,
    Inactive,
    Resigned,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: TeacherId,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub subject_ids: Vec<SubjectId>,
    #[serde(default)]
    pub qualification: Option<String>,
    #[serde(default)]
    pub joining_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: TeacherStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Teacher {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TeacherForm {
    #[validate(custom(function = "not_blank"), length(max = 30))]
    pub employee_id: String,
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(custom(function = "valid_phone"))]
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub subject_ids: Vec<SubjectId>,
    pub qualification: Option<String>,
    pub joining_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: TeacherStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub head_teacher_id: Option<TeacherId>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentForm {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: String,
    #[validate(length(max = 10))]
    pub code: Option<String>,
    pub head_teacher_id: Option<TeacherId>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: SubjectId,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub credit_hours: Option<u32>,
    #[serde(default)]
    pub is_elective: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubjectForm {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: String,
    #[validate(custom(function = "not_blank"), length(max = 20))]
    pub code: String,
    pub department_id: Option<DepartmentId>,
    #[validate(range(min = 1, max = 40))]
    pub credit_hours: Option<u32>,
    #[serde(default)]
    pub is_elective: bool,
}

/// A class (grade) such as "Grade 5"; sections split it into streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: ClassId,
    pub name: String,
    #[serde(default)]
    pub grade_level: Option<u32>,
    #[serde(default)]
    pub class_teacher_id: Option<TeacherId>,
    #[serde(default)]
    pub academic_year: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub student_count: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Class {
    /// Seats left, when both capacity and enrolment are known.
    pub fn seats_available(&self) -> Option<u32> {
        Some(self.capacity?.saturating_sub(self.student_count?))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ClassForm {
    #[validate(custom(function = "not_blank"), length(max = 50))]
    pub name: String,
    #[validate(range(min = 0, max = 13))]
    pub grade_level: Option<u32>,
    pub class_teacher_id: Option<TeacherId>,
    pub academic_year: Option<String>,
    #[validate(range(min = 1, max = 500))]
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    pub class_id: ClassId,
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SectionForm {
    #[validate(custom(function = "not_blank"), length(max = 20))]
    pub name: String,
    #[validate(custom(function = "not_blank"))]
    pub class_id: ClassId,
    pub teacher_id: Option<TeacherId>,
    pub room_number: Option<String>,
    #[validate(range(min = 1, max = 200))]
    pub capacity: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_core::validate_form;

    #[test]
    fn test_teacher_form_requires_valid_email() {
        let form = TeacherForm {
            employee_id: "EMP-7".into(),
            first_name: "Alan".into(),
            last_name: "Turing".into(),
            email: "alan-at-school".into(),
            ..Default::default()
        };
        let errors = validate_form(&form).unwrap_err();
        assert!(errors.has("email"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_subject_credit_hours_range() {
        let form = SubjectForm {
            name: "Physics".into(),
            code: "PHY101".into(),
            credit_hours: Some(0),
            ..Default::default()
        };
        assert!(validate_form(&form).unwrap_err().has("credit_hours"));
    }

    #[test]
    fn test_section_form_requires_class() {
        let form = SectionForm {
            name: "A".into(),
            ..Default::default()
        };
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(errors.first("class_id"), Some("This field is required"));
    }

    #[test]
    fn test_class_seats_available() {
        let json = r#"{"id":"c1","name":"Grade 5","capacity":40,"studentCount":42}"#;
        let class: Class = serde_json::from_str(json).unwrap();
        assert_eq!(class.seats_available(), Some(0));

        let unknown = Class {
            student_count: None,
            ..class
        };
        assert_eq!(unknown.seats_available(), None);
    }

    #[test]
    fn test_teacher_status_wire_name() {
        let json = serde_json::to_string(&TeacherStatus::OnLeave).unwrap();
        assert_eq!(json, r#""ON_LEAVE""#);
    }
}
