use actix_session::Session;

use crate::errors::AppError;

/// Read the logged-in user id from the session, if any.
pub fn current_user_id(session: &Session) -> Option<i64> {
    session.get::<i64>("user_id").unwrap_or(None)
}

/// Require a logged-in user; maps to 401 otherwise.
pub fn require_user(session: &Session) -> Result<i64, AppError> {
    current_user_id(session).ok_or(AppError::Unauthorized)
}
