use super::ValidationError;

/// Validate a profile name: ASCII letters only, stored lower-cased.
/// An empty name is accepted; name is not a required field here.
pub fn validate_name(name: &str) -> Result<String, ValidationError> {
    if !name.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::Format(format!(
            "{name} contains non-english letters"
        )));
    }
    Ok(name.to_ascii_lowercase())
}
