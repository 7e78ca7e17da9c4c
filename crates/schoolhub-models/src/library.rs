//! Library catalogue and circulation.

use chrono::{DateTime, NaiveDate, Utc};
use schoolhub_core::validation::{error, not_blank};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::ids::{BookId, BookIssueId, StudentId, UserId};

/// Fine charged per overdue day when the backend does not send one.
pub const DEFAULT_FINE_PER_DAY: f64 = 1.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub published_year: Option<i32>,
    pub total_copies: u32,
    #[serde(default)]
    pub available_copies: u32,
    #[serde(default)]
    pub shelf_location: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }

    pub fn issued_copies(&self) -> u32 {
        self.total_copies.saturating_sub(self.available_copies)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookForm {
    #[validate(custom(function = "not_blank"), length(max = 200))]
    pub title: String,
    #[validate(custom(function = "not_blank"), length(max = 150))]
    pub author: String,
    #[validate(length(min = 10, max = 17, message = "ISBN must be 10 to 17 characters"))]
    pub isbn: Option<String>,
    pub publisher: Option<String>,
    pub category: Option<String>,
    #[validate(range(min = 1000, max = 2100))]
    pub published_year: Option<i32>,
    #[validate(range(min = 1, message = "At least one copy is required"))]
    pub total_copies: u32,
    pub shelf_location: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookIssueStatus {
    #[default]
    Issued,
    Returned,
    Overdue,
    Lost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookIssue {
    pub id: BookIssueId,
    pub book_id: BookId,
    #[serde(default)]
    pub student_id: Option<StudentId>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: BookIssueStatus,
    #[serde(default)]
    pub fine_amount: Option<f64>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl BookIssue {
    /// Days past the due date, counted to the return date or `today`.
    pub fn overdue_days(&self, today: NaiveDate) -> i64 {
        let end = self.return_date.unwrap_or(today);
        (end - self.due_date).num_days().max(0)
    }

    /// The fine owed: the server's figure when present, otherwise computed.
    pub fn fine(&self, per_day: f64, today: NaiveDate) -> f64 {
        self.fine_amount
            .unwrap_or_else(|| self.overdue_days(today) as f64 * per_day)
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.return_date.is_none() && self.overdue_days(today) > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_issue"))]
pub struct IssueBookForm {
    #[validate(custom(function = "not_blank"))]
    pub book_id: BookId,
    #[validate(custom(function = "not_blank"))]
    pub student_id: StudentId,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub remarks: Option<String>,
}

fn validate_issue(form: &IssueBookForm) -> Result<(), ValidationError> {
    if form.due_date <= form.issue_date {
        return Err(error("due_date", "Due date must be after the issue date"));
    }
    Ok(())
}

/// Body of `PUT /library/issues/{id}/return`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnBookRequest {
    pub return_date: Option<NaiveDate>,
    pub remarks: Option<String>,
}
