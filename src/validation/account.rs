use super::ValidationError;

/// Validate an email address. Returns the trimmed, lower-cased form.
pub fn validate_email(email: &str) -> Result<String, ValidationError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty("Email is required".to_string()));
    }
    if trimmed.len() > 254 {
        return Err(ValidationError::Range(
            "Email must be at most 254 characters".to_string(),
        ));
    }
    if !trimmed.contains('@') || !trimmed.contains('.') {
        return Err(ValidationError::Format(
            "Email must be a valid address (contain '@' and '.')".to_string(),
        ));
    }
    Ok(trimmed.to_lowercase())
}

/// Validate a password on account creation: min 8 chars.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Empty("Password is required".to_string()));
    }
    if password.len() < 8 {
        return Err(ValidationError::Range(
            "Password must be at least 8 characters".to_string(),
        ));
    }
    Ok(())
}
