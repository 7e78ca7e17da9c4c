//! Student models and form.

use chrono::{DateTime, NaiveDate, Utc};
use schoolhub_core::serde::deserialize_blank_as_none;
use schoolhub_core::validation::{error, not_blank, valid_phone};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::ids::{ClassId, ParentId, SectionId, StudentId};
use crate::users::Gender;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
    Graduated,
    Transferred,
    Suspended,
}

/// A student enrolled in a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub admission_number: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    pub class_id: ClassId,
    #[serde(default, deserialize_with = "deserialize_blank_as_none")]
    pub section_id: Option<String>,
    #[serde(default)]
    pub parent_id: Option<ParentId>,
    #[serde(default)]
    pub roll_number: Option<String>,
    #[serde(default)]
    pub admission_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: StudentStatus,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub blood_group: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn section(&self) -> Option<SectionId> {
        self.section_id.as_deref().map(SectionId::from)
    }
}

/// Add/edit student form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_student_dates"))]
pub struct StudentForm {
    #[validate(custom(function = "not_blank"), length(max = 30))]
    pub admission_number: String,
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom(function = "valid_phone"))]
    pub phone: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    #[validate(custom(function = "not_blank"))]
    pub class_id: ClassId,
    pub section_id: Option<SectionId>,
    pub parent_id: Option<ParentId>,
    pub roll_number: Option<String>,
    pub admission_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: StudentStatus,
    pub address: Option<String>,
    #[validate(length(max = 5))]
    pub blood_group: Option<String>,
}

impl From<&Student> for StudentForm {
    fn from(student: &Student) -> Self {
        Self {
            admission_number: student.admission_number.clone(),
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            email: student.email.clone(),
            phone: student.phone.clone(),
            gender: student.gender,
            date_of_birth: student.date_of_birth,
            class_id: student.class_id.clone(),
            section_id: student.section(),
            parent_id: student.parent_id.clone(),
            roll_number: student.roll_number.clone(),
            admission_date: student.admission_date,
            status: student.status,
            address: student.address.clone(),
            blood_group: student.blood_group.clone(),
        }
    }
}

fn validate_student_dates(form: &StudentForm) -> Result<(), ValidationError> {
    if let (Some(born), Some(admitted)) = (form.date_of_birth, form.admission_date) {
        if admitted < born {
            return Err(error(
                "admission_date",
                "Admission date cannot be before date of birth",
            ));
        }
    }
    Ok(())
}
