//! User and parent models.

use chrono::{DateTime, NaiveDate, Utc};
use schoolhub_core::validation::{not_blank, valid_phone};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::{ParentId, StudentId, UserId};
use crate::value_types::{Email, PhoneNumber};

/// Role of an authenticated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    SuperAdmin,
    Admin,
    Teacher,
    Student,
    Parent,
    Accountant,
    Librarian,
    Staff,
}

impl UserRole {
    /// Roles that manage the school rather than consume it.
    pub fn is_staff(self) -> bool {
        !matches!(self, Self::Student | Self::Parent)
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Self::SuperAdmin | Self::Admin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// The signed-in account, persisted alongside the token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: UserRole,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A parent or guardian linked to one or more students.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parent {
    pub id: ParentId,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub phone: PhoneNumber,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub student_ids: Vec<StudentId>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Parent {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Add/edit parent form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ParentForm {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom(function = "valid_phone"))]
    pub phone: String,
    pub occupation: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub student_ids: Vec<StudentId>,
}

/// Age in whole years on `today`, used by profile screens.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> u32 {
    today.years_since(date_of_birth).unwrap_or(0)
}
