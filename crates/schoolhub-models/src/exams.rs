//! Exams and exam results.

use chrono::{DateTime, NaiveDate, Utc};
use schoolhub_core::validation::{error, not_blank};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::ids::{ClassId, ExamId, ExamResultId, StudentId, SubjectId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExamType {
    UnitTest,
    #[default]
    MidTerm,
    Final,
    Quiz,
    Practical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    pub id: ExamId,
    pub name: String,
    #[serde(rename = "type")]
    pub exam_type: ExamType,
    pub class_id: ClassId,
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_marks: f64,
    pub passing_marks: f64,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Exam {
    /// Whether the exam is running on `today`.
    pub fn is_ongoing(&self, today: NaiveDate) -> bool {
        self.start_date <= today && today <= self.end_date
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_exam"))]
pub struct ExamForm {
    #[validate(custom(function = "not_blank"), length(max = 100))]
    pub name: String,
    #[serde(rename = "type")]
    pub exam_type: ExamType,
    #[validate(custom(function = "not_blank"))]
    pub class_id: ClassId,
    pub subject_id: Option<SubjectId>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(range(min = 1.0, max = 1000.0))]
    pub max_marks: f64,
    #[validate(range(min = 0.0))]
    pub passing_marks: f64,
}

fn validate_exam(form: &ExamForm) -> Result<(), ValidationError> {
    if form.end_date < form.start_date {
        return Err(error("end_date", "End date must be on or after the start date"));
    }
    if form.passing_marks > form.max_marks {
        return Err(error(
            "passing_marks",
            "Passing marks cannot exceed maximum marks",
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamResult {
    pub id: ExamResultId,
    pub exam_id: ExamId,
    pub student_id: StudentId,
    #[serde(default)]
    pub subject_id: Option<SubjectId>,
    pub marks_obtained: f64,
    pub max_marks: f64,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ExamResult {
    pub fn percentage(&self) -> f64 {
        if self.max_marks <= 0.0 {
            return 0.0;
        }
        (self.marks_obtained / self.max_marks * 1000.0).round() / 10.0
    }

    /// The server-assigned grade, or one derived from the percentage.
    pub fn grade(&self) -> String {
        self.grade
            .clone()
            .unwrap_or_else(|| letter_grade(self.percentage()).to_string())
    }
}

/// Letter grade on the usual 10-point bands.
pub fn letter_grade(percentage: f64) -> &'static str {
    match percentage {
        p if p >= 90.0 => "A+",
        p if p >= 80.0 => "A",
        p if p >= 70.0 => "B",
        p if p >= 60.0 => "C",
        p if p >= 50.0 => "D",
        p if p >= 40.0 => "E",
        _ => "F",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_result"))]
pub struct ExamResultForm {
    #[validate(custom(function = "not_blank"))]
    pub exam_id: ExamId,
    #[validate(custom(function = "not_blank"))]
    pub student_id: StudentId,
    pub subject_id: Option<SubjectId>,
    #[validate(range(min = 0.0))]
    pub marks_obtained: f64,
    #[validate(range(min = 1.0))]
    pub max_marks: f64,
    #[validate(length(max = 200))]
    pub remarks: Option<String>,
}

fn validate_result(form: &ExamResultForm) -> Result<(), ValidationError> {
    if form.marks_obtained > form.max_marks {
        return Err(error(
            "marks_obtained",
            "Marks obtained cannot exceed maximum marks",
        ));
    }
    Ok(())
}
