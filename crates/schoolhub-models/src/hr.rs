//! Human resources: staff records, payroll, and leave.

use chrono::{DateTime, NaiveDate, Utc};
use schoolhub_core::validation::{error, not_blank, valid_phone};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::ids::{DepartmentId, LeaveRequestId, SalaryId, StaffId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StaffStatus {
    #[default]
    Active,
    OnLeave,
    Resigned,
    Terminated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    pub id: StaffId,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub designation: String,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    #[serde(default)]
    pub joining_date: Option<NaiveDate>,
    #[serde(default)]
    pub basic_salary: Option<f64>,
    #[serde(default)]
    pub status: StaffStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Staff {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StaffForm {
    #[validate(custom(function = "not_blank"), length(max = 30))]
    pub employee_id: String,
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(custom(function = "valid_phone"))]
    pub phone: Option<String>,
    #[validate(custom(function = "not_blank"))]
    pub designation: String,
    pub department_id: Option<DepartmentId>,
    pub joining_date: Option<NaiveDate>,
    #[validate(range(min = 0.0))]
    pub basic_salary: Option<f64>,
    #[serde(default)]
    pub status: StaffStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SalaryStatus {
    #[default]
    Pending,
    Processed,
    Paid,
}

/// One month's payslip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Salary {
    pub id: SalaryId,
    pub staff_id: StaffId,
    pub month: u32,
    pub year: i32,
    pub basic_salary: f64,
    #[serde(default)]
    pub allowances: f64,
    #[serde(default)]
    pub deductions: f64,
    #[serde(default)]
    pub status: SalaryStatus,
    #[serde(default)]
    pub paid_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Salary {
    pub fn net_salary(&self) -> f64 {
        ((self.basic_salary + self.allowances - self.deductions) * 100.0).round() / 100.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    #[default]
    Casual,
    Sick,
    Annual,
    Maternity,
    Paternity,
    Unpaid,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Cancelled,
}

impl LeaveStatus {
    /// Whether the request still awaits a decision.
    pub fn is_open(self) -> bool {
        self == Self::Pending
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    pub id: LeaveRequestId,
    pub staff_id: StaffId,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub status: LeaveStatus,
    #[serde(default)]
    pub reviewed_by: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl LeaveRequest {
    /// Calendar days covered, both ends inclusive.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days().max(0) + 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_leave_dates"))]
pub struct LeaveRequestForm {
    #[validate(custom(function = "not_blank"))]
    pub staff_id: StaffId,
    #[serde(default)]
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(custom(function = "not_blank"), length(max = 500))]
    pub reason: String,
}

fn validate_leave_dates(form: &LeaveRequestForm) -> Result<(), ValidationError> {
    if form.end_date < form.start_date {
        return Err(error("end_date", "End date must be on or after the start date"));
    }
    Ok(())
}

/// Body of `PUT /hr/leaves/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_leave_decision"))]
pub struct LeaveStatusUpdate {
    pub status: LeaveStatus,
    #[validate(length(max = 500))]
    pub remarks: Option<String>,
}

impl LeaveStatusUpdate {
    pub fn approve() -> Self {
        Self {
            status: LeaveStatus::Approved,
            remarks: None,
        }
    }

    pub fn reject(remarks: impl Into<String>) -> Self {
        Self {
            status: LeaveStatus::Rejected,
            remarks: Some(remarks.into()),
        }
    }
}

fn validate_leave_decision(update: &LeaveStatusUpdate) -> Result<(), ValidationError> {
    if update.status.is_open() {
        return Err(error("status", "Choose approve, reject, or cancel"));
    }
    Ok(())
}
