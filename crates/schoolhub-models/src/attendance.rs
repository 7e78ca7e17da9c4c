//! Attendance records, bulk marking, and summary arithmetic.

use chrono::{DateTime, NaiveDate, Utc};
use schoolhub_core::validation::{error, not_blank};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::ids::{AttendanceId, ClassId, SectionId, StudentId};

/// Percentage at or above which attendance is considered good.
pub const GOOD_ATTENDANCE_PERCENT: f64 = 75.0;

/// Percentage at or above which attendance is at risk rather than critical.
pub const AT_RISK_ATTENDANCE_PERCENT: f64 = 60.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStatus {
    #[default]
    Present,
    Absent,
    Late,
    Excused,
    HalfDay,
}

impl AttendanceStatus {
    /// Whether the day counts towards attendance.
    pub fn counts_as_present(self) -> bool {
        matches!(self, Self::Present | Self::Late | Self::HalfDay)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub student_id: StudentId,
    pub class_id: ClassId,
    #[serde(default)]
    pub section_id: Option<SectionId>,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One student's mark in a bulk submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEntry {
    #[validate(custom(function = "not_blank"))]
    pub student_id: StudentId,
    pub status: AttendanceStatus,
    #[validate(length(max = 200))]
    pub remarks: Option<String>,
}

/// Register for a whole class on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_register"))]
pub struct BulkAttendanceForm {
    #[validate(custom(function = "not_blank"))]
    pub class_id: ClassId,
    pub section_id: Option<SectionId>,
    pub date: NaiveDate,
    #[validate(nested)]
    pub entries: Vec<AttendanceEntry>,
}

fn validate_register(form: &BulkAttendanceForm) -> Result<(), ValidationError> {
    if form.entries.is_empty() {
        return Err(error("entries", "Mark at least one student"));
    }
    let mut seen = std::collections::HashSet::new();
    if !form.entries.iter().all(|e| seen.insert(&e.student_id)) {
        return Err(error("entries", "A student is marked more than once"));
    }
    Ok(())
}

/// How a percentage compares with the attendance thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttendanceStanding {
    Good,
    AtRisk,
    Critical,
}

impl AttendanceStanding {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= GOOD_ATTENDANCE_PERCENT {
            Self::Good
        } else if percentage >= AT_RISK_ATTENDANCE_PERCENT {
            Self::AtRisk
        } else {
            Self::Critical
        }
    }
}

/// Attendance counts for a student or class over a period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    #[serde(default)]
    pub student_id: Option<StudentId>,
    #[serde(default)]
    pub class_id: Option<ClassId>,
    pub total_days: u32,
    pub present: u32,
    pub absent: u32,
    #[serde(default)]
    pub late: u32,
    #[serde(default)]
    pub excused: u32,
}

impl AttendanceSummary {
    /// Builds a summary by counting a set of records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a AttendanceRecord>) -> Self {
        let mut summary = Self::default();
        for record in records {
            summary.total_days += 1;
            match record.status {
                AttendanceStatus::Present | AttendanceStatus::HalfDay => summary.present += 1,
                AttendanceStatus::Late => summary.late += 1,
                AttendanceStatus::Absent => summary.absent += 1,
                AttendanceStatus::Excused => summary.excused += 1,
            }
        }
        summary
    }

    /// Attended days (present or late) as a percentage of counted days.
    ///
    /// Excused days are left out of the denominator. Returns 0 when no
    /// days have been counted.
    pub fn percentage(&self) -> f64 {
        let counted = self.total_days.saturating_sub(self.excused);
        if counted == 0 {
            return 0.0;
        }
        let attended = self.present.saturating_add(self.late).min(counted);
        (f64::from(attended) / f64::from(counted) * 1000.0).round() / 10.0
    }

    pub fn standing(&self) -> AttendanceStanding {
        AttendanceStanding::from_percentage(self.percentage())
    }
}
