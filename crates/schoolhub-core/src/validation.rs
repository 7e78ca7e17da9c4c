//! Form validation shared by every create/edit form.
//!
//! Forms derive [`validator::Validate`] and use the checks in this module
//! for the rules the derive does not cover (non-blank required strings,
//! phone shape). [`validate_form`] runs the derived rules and converts the
//! result into [`FormErrors`], a field-to-messages map the presentation tier
//! renders inline next to each input.
//!
//! Struct-level checks (`#[validate(schema(...))]`) report under the field
//! named by their error code, so a cross-field rule like "confirmation must
//! match" lands on the input the user has to fix.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

/// Key under which `validator` reports struct-level errors.
const SCHEMA_KEY: &str = "__all__";

/// Field-level validation errors, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields with at least one error.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// The first message for a field, which is what an inline error shows.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.fields
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    pub fn messages(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields
            .iter()
            .map(|(field, messages)| (field.as_str(), messages.as_slice()))
    }

    fn collect(&mut self, prefix: &str, errors: &ValidationErrors) {
        for (field, kind) in errors.errors() {
            let field: &str = field;
            match kind {
                ValidationErrorsKind::Field(list) => {
                    for error in list {
                        let target = if field == SCHEMA_KEY {
                            error.code.to_string()
                        } else {
                            field.to_string()
                        };
                        let message = message_for(&target, error);
                        self.add(format!("{prefix}{target}"), message);
                    }
                }
                ValidationErrorsKind::Struct(nested) => {
                    self.collect(&format!("{prefix}{field}."), nested);
                }
                ValidationErrorsKind::List(items) => {
                    for (index, nested) in items {
                        self.collect(&format!("{prefix}{field}[{index}]."), nested);
                    }
                }
            }
        }
    }
}

impl From<&ValidationErrors> for FormErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut form = FormErrors::new();
        form.collect("", errors);
        form
    }
}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        Self::from(&errors)
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .fields
            .iter()
            .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{field}: {m}")))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&rendered)
    }
}

impl std::error::Error for FormErrors {}

/// Runs a form's validation rules.
pub fn validate_form<T: Validate>(form: &T) -> Result<(), FormErrors> {
    form.validate().map_err(FormErrors::from)
}

/// Builds a validation error with a code and user-visible message.
pub fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

/// Required text field: rejects empty and whitespace-only input.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("required", "This field is required"));
    }
    Ok(())
}

/// Phone number: optional leading `+`, then 7 to 15 digits; spaces,
/// dashes, and parentheses are ignored.
pub fn valid_phone(value: &str) -> Result<(), ValidationError> {
    if is_phone_number(value) {
        Ok(())
    } else {
        Err(error("phone", "Enter a valid phone number"))
    }
}

pub fn is_phone_number(value: &str) -> bool {
    let trimmed = value.trim();
    let body = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let mut digits = 0;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '(' | ')' => {}
            _ => return false,
        }
    }
    (7..=15).contains(&digits)
}

fn message_for(field: &str, error: &ValidationError) -> String {
    if let Some(message) = &error.message {
        return message.to_string();
    }

    let param = |name: &str| error.params.get(name).map(|v| v.to_string());

    match &*error.code {
        "required" => "This field is required".to_string(),
        "email" => "Enter a valid email address".to_string(),
        "phone" => "Enter a valid phone number".to_string(),
        "must_match" => "Values do not match".to_string(),
        "length" => match (param("min"), param("max")) {
            (Some(min), None) => format!("Must be at least {min} characters"),
            (None, Some(max)) => format!("Must be at most {max} characters"),
            (Some(min), Some(max)) => format!("Must be between {min} and {max} characters"),
            (None, None) => format!("{field} has an invalid length"),
        },
        "range" => match (param("min"), param("max")) {
            (Some(min), None) => format!("Must be at least {min}"),
            (None, Some(max)) => format!("Must be at most {max}"),
            (Some(min), Some(max)) => format!("Must be between {min} and {max}"),
            (None, None) => format!("{field} is out of range"),
        },
        _ => format!("{field} is invalid"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Validate)]
    #[validate(schema(function = "validate_window"))]
    struct Signup {
        #[validate(custom(function = "not_blank"))]
        name: String,
        #[validate(email)]
        email: String,
        #[validate(length(min = 8))]
        password: String,
        #[validate(range(min = 1, max = 10))]
        seats: u32,
        #[validate(custom(function = "valid_phone"))]
        phone: Option<String>,
        opens: u32,
        closes: u32,
    }

    fn validate_window(form: &Signup) -> Result<(), ValidationError> {
        if form.closes < form.opens {
            return Err(error("closes", "Closing must be after opening"));
        }
        Ok(())
    }

    fn valid() -> Signup {
        Signup {
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password: "password123".into(),
            seats: 2,
            phone: None,
            opens: 8,
            closes: 17,
        }
    }

    #[test]
    fn test_valid_form_passes() {
        assert!(validate_form(&valid()).is_ok());
    }

    #[test]
    fn test_blank_required_field() {
        let form = Signup {
            name: "   ".into(),
            ..valid()
        };
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(errors.first("name"), Some("This field is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_default_messages() {
        let form = Signup {
            email: "nope".into(),
            password: "short".into(),
            seats: 0,
            ..valid()
        };
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(errors.first("email"), Some("Enter a valid email address"));
        assert_eq!(errors.first("password"), Some("Must be at least 8 characters"));
        assert!(errors.first("seats").unwrap().starts_with("Must be between"));
    }

    #[test]
    fn test_optional_phone_checked_when_present() {
        let form = Signup {
            phone: Some("call me".into()),
            ..valid()
        };
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(errors.first("phone"), Some("Enter a valid phone number"));
    }

    #[test]
    fn test_schema_error_lands_on_named_field() {
        let form = Signup {
            opens: 18,
            closes: 9,
            ..valid()
        };
        let errors = validate_form(&form).unwrap_err();
        assert_eq!(errors.first("closes"), Some("Closing must be after opening"));
        assert!(!errors.has("__all__"));
    }

    #[test]
    fn test_phone_shapes() {
        assert!(is_phone_number("+1 (555) 123-4567"));
        assert!(is_phone_number("08012345678"));
        assert!(!is_phone_number("12345"));
        assert!(!is_phone_number("+1 555 CALL NOW"));
        assert!(!is_phone_number("1234567890123456"));
    }

    #[test]
    fn test_display_lists_every_message() {
        let mut errors = FormErrors::new();
        errors.add("title", "This field is required");
        errors.add("capacity", "Must be at least 1");
        assert_eq!(
            errors.to_string(),
            "capacity: Must be at least 1, title: This field is required"
        );
    }

    #[test]
    fn test_messages_for_unknown_field_is_empty() {
        let errors = FormErrors::new();
        assert!(errors.messages("anything").is_empty());
        assert!(errors.is_empty());
    }
}
