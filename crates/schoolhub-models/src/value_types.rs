//! Validated value types for domain primitives.
//!
//! Unlike form fields, which stay plain strings so errors can be shown
//! inline, these types are used on records received from the backend and on
//! the persisted session, where an invalid value means corrupt data.
//!
//! # Example
//!
//! ```ignore
//! use schoolhub_models::value_types::{Email, PhoneNumber};
//!
//! let email: Email = "bursar@school.edu".parse().unwrap();
//! let phone: PhoneNumber = "+234 801 234 5678".parse().unwrap();
//! assert_eq!(phone.digits(), "+2348012345678");
//! ```

use std::fmt;
use std::str::FromStr;

use schoolhub_core::validation::is_phone_number;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::ValidateEmail;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueTypeError {
    #[error("Invalid email: {0}")]
    InvalidEmail(String),
    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),
}

/// Trait impls shared by string newtypes that validate in `new`.
macro_rules! validated_string {
    ($name:ident) => {
        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValueTypeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                Self::new(String::deserialize(deserializer)?).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// A validated, trimmed email address.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> Result<Self, ValueTypeError> {
        let email = email.into().trim().to_string();
        if email.is_empty() {
            return Err(ValueTypeError::InvalidEmail("email cannot be empty".into()));
        }
        if !email.validate_email() {
            return Err(ValueTypeError::InvalidEmail(format!(
                "'{email}' is not a valid email address"
            )));
        }
        Ok(Self(email))
    }

    /// The part after `@`.
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

validated_string!(Email);

/// A validated phone number, kept as entered.
#[derive(Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn new(phone: impl Into<String>) -> Result<Self, ValueTypeError> {
        let phone = phone.into().trim().to_string();
        if !is_phone_number(&phone) {
            return Err(ValueTypeError::InvalidPhoneNumber(format!(
                "'{phone}' must contain 7 to 15 digits"
            )));
        }
        Ok(Self(phone))
    }

    /// The dialable form: digits and a leading `+` only.
    pub fn digits(&self) -> String {
        self.0
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect()
    }
}

validated_string!(PhoneNumber);
