use super::ValidationError;

/// Validate the free-text info field. The accepted value is returned as
/// given; only the emptiness check looks at the trimmed form.
pub fn validate_info(info: Option<&str>) -> Result<String, ValidationError> {
    if let Some(info) = info {
        if !info.trim().is_empty() {
            return Ok(info.to_string());
        }
    }
    Err(ValidationError::Empty(
        "Info field cannot be empty or contain only spaces.".to_string(),
    ))
}
