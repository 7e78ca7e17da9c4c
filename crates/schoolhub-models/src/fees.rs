//! Fee structures, payments, and balance arithmetic.

use chrono::{DateTime, NaiveDate, Utc};
use schoolhub_core::validation::not_blank;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::ids::{ClassId, FeePaymentId, FeeStructureId, StudentId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeeFrequency {
    OneTime,
    Monthly,
    Quarterly,
    #[default]
    Termly,
    Annually,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    #[default]
    Cash,
    Card,
    BankTransfer,
    Cheque,
    MobileMoney,
    Online,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Partial,
    Overdue,
    Refunded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeStructure {
    pub id: FeeStructureId,
    pub name: String,
    #[serde(default)]
    pub class_id: Option<ClassId>,
    pub amount: f64,
    #[serde(default)]
    pub frequency: FeeFrequency,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub late_fee: Option<f64>,
    #[serde(default)]
    pub academic_year: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl FeeStructure {
    /// Amount still owed after `paid`, including the late fee once overdue.
    pub fn balance_due(&self, paid: f64, today: NaiveDate) -> f64 {
        let mut total = self.amount;
        if today > self.due_date {
            total += self.late_fee.unwrap_or(0.0);
        }
        round_cents((total - paid).max(0.0))
    }

    pub fn is_overdue(&self, paid: f64, today: NaiveDate) -> bool {
        today > self.due_date && self.balance_due(paid, today) > 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeeStructureForm {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: String,
    pub class_id: Option<ClassId>,
    #[validate(range(min = 0.01, message = "Amount must be greater than zero"))]
    pub amount: f64,
    #[serde(default)]
    pub frequency: FeeFrequency,
    pub due_date: NaiveDate,
    #[validate(range(min = 0.0))]
    pub late_fee: Option<f64>,
    pub academic_year: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeePayment {
    pub id: FeePaymentId,
    pub student_id: StudentId,
    pub fee_structure_id: FeeStructureId,
    pub amount: f64,
    pub payment_date: NaiveDate,
    pub payment_mode: PaymentMode,
    #[serde(default)]
    pub status: PaymentStatus,
    #[serde(default)]
    pub receipt_number: Option<String>,
    #[serde(default)]
    pub transaction_ref: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Collect-payment form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FeePaymentForm {
    #[validate(custom(function = "not_blank"))]
    pub student_id: StudentId,
    #[validate(custom(function = "not_blank"))]
    pub fee_structure_id: FeeStructureId,
    #[validate(range(min = 0.01, message = "Amount must be greater than zero"))]
    pub amount: f64,
    pub payment_date: NaiveDate,
    #[serde(default)]
    pub payment_mode: PaymentMode,
    #[validate(length(max = 100))]
    pub transaction_ref: Option<String>,
    #[validate(length(max = 200))]
    pub remarks: Option<String>,
}

/// A student's fee position across all applicable structures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentFeeStatus {
    pub student_id: StudentId,
    pub total_fees: f64,
    pub total_paid: f64,
    #[serde(default)]
    pub payments: Vec<FeePayment>,
}

impl StudentFeeStatus {
    pub fn outstanding(&self) -> f64 {
        round_cents((self.total_fees - self.total_paid).max(0.0))
    }

    pub fn status(&self) -> PaymentStatus {
        if self.outstanding() == 0.0 {
            PaymentStatus::Paid
        } else if self.total_paid > 0.0 {
            PaymentStatus::Partial
        } else {
            PaymentStatus::Pending
        }
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolhub_core::validate_form;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn tuition() -> FeeStructure {
        FeeStructure {
            id: FeeStructureId::new("fs1"),
            name: "Tuition".into(),
            class_id: None,
            amount: 1500.0,
            frequency: FeeFrequency::Termly,
            due_date: date(2024, 9, 30),
            late_fee: Some(50.0),
            academic_year: None,
            description: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_balance_before_due_date() {
        assert_eq!(tuition().balance_due(1000.0, date(2024, 9, 30)), 500.0);
        assert!(!tuition().is_overdue(1000.0, date(2024, 9, 30)));
    }

    #[test]
    fn test_balance_after_due_date_adds_late_fee() {
        assert_eq!(tuition().balance_due(1000.0, date(2024, 10, 1)), 550.0);
        assert!(tuition().is_overdue(1000.0, date(2024, 10, 1)));
    }

    #[test]
    fn test_overpayment_is_zero_balance() {
        assert_eq!(tuition().balance_due(2000.0, date(2024, 11, 1)), 0.0);
        assert!(!tuition().is_overdue(2000.0, date(2024, 11, 1)));
    }

    #[test]
    fn test_student_fee_status() {
        let status = StudentFeeStatus {
            student_id: StudentId::new("s1"),
            total_fees: 300.0,
            total_paid: 120.55,
            payments: vec![],
        };
        assert_eq!(status.outstanding(), 179.45);
        assert_eq!(status.status(), PaymentStatus::Partial);
    }

    #[test]
    fn test_payment_form_rejects_zero_amount() {
        let form = FeePaymentForm {
            student_id: StudentId::new("s1"),
            fee_structure_id: FeeStructureId::new("fs1"),
            amount: 0.0,
            payment_date: date(2024, 9, 1),
            ..Default::default()
        };
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(errors.first("amount"), Some("Amount must be greater than zero"));
    }

    #[test]
    fn test_payment_mode_wire_name() {
        assert_eq!(
            serde_json::to_string(&PaymentMode::BankTransfer).unwrap(),
            r#""BANK_TRANSFER""#
        );
    }
}
