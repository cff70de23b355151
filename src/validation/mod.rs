//! Field-level validation for the profile API.
//!
//! One pure function per field. Each validator takes the raw value and
//! returns its normalized form, or a [`ValidationError`] describing the
//! rejection. Validators read the candidate value and nothing else — no
//! I/O, no clock access except through the explicit `_on` entry points.

mod account;
mod avatar;
mod birth_date;
mod gender;
mod info;
mod name;

pub use account::{validate_email, validate_password};
pub use avatar::{MAX_AVATAR_BYTES, decode_avatar_data_uri, validate_avatar};
pub use birth_date::{MIN_AGE, MIN_BIRTH_YEAR, validate_birth_date, validate_birth_date_on};
pub use gender::validate_gender;
pub use info::validate_info;
pub use name::validate_name;

use std::fmt;

/// Why a field value was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Wrong shape: bad characters, unknown enum value, undecodable image.
    Format(String),
    /// Value outside its accepted bounds (length, year, age).
    Range(String),
    /// Payload larger than the field allows.
    Size(String),
    /// Required value missing or blank.
    Empty(String),
}

impl ValidationError {
    /// Stable kind tag for error payloads and assertions.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::Format(_) => "format",
            ValidationError::Range(_) => "range",
            ValidationError::Size(_) => "size",
            ValidationError::Empty(_) => "empty",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ValidationError::Format(msg)
            | ValidationError::Range(msg)
            | ValidationError::Size(msg)
            | ValidationError::Empty(msg) => msg,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}
