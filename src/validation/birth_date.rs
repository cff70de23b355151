use chrono::{Datelike, Local, NaiveDate};

use super::ValidationError;

pub const MIN_BIRTH_YEAR: i32 = 1900;
pub const MIN_AGE: i64 = 18;

/// Validate a birth date against today's local date.
pub fn validate_birth_date(birth_date: NaiveDate) -> Result<NaiveDate, ValidationError> {
    validate_birth_date_on(birth_date, Local::now().date_naive())
}

/// Deterministic core: validate against an explicit reference date.
///
/// Age is whole days divided by 365, matching the stored-profile
/// semantics rather than calendar years. A future birth date yields a
/// non-positive age and fails the age check.
pub fn validate_birth_date_on(
    birth_date: NaiveDate,
    today: NaiveDate,
) -> Result<NaiveDate, ValidationError> {
    if birth_date.year() < MIN_BIRTH_YEAR {
        return Err(ValidationError::Range(
            "Invalid birth date - year must be greater than 1900.".to_string(),
        ));
    }

    let age = (today - birth_date).num_days() / 365;
    if age < MIN_AGE {
        return Err(ValidationError::Range(
            "You must be at least 18 years old to register.".to_string(),
        ));
    }

    Ok(birth_date)
}
