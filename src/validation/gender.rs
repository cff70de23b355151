use super::ValidationError;
use crate::models::profile::Gender;

/// Validate a submitted gender against the canonical enum values.
pub fn validate_gender(gender: &str) -> Result<Gender, ValidationError> {
    Gender::parse(gender).ok_or_else(|| {
        let accepted = Gender::ALL
            .iter()
            .map(|g| g.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        ValidationError::Format(format!("Gender must be one of: {accepted}"))
    })
}
