use actix_session::Session;
use actix_web::{HttpResponse, web};
use serde::Deserialize;

use crate::auth::password;
use crate::db::DbPool;
use crate::errors::{ApiErrorResponse, AppError};
use crate::models::user::{self, UserResponse};
use crate::validation;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/v1/auth/register
pub async fn register(
    pool: web::Data<DbPool>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let email = validation::validate_email(&body.email);
    let password_check = validation::validate_password(&body.password);

    let email = match (email, password_check) {
        (Ok(email), Ok(())) => email,
        (email, password_check) => {
            let errors: Vec<String> = [
                email.err().map(|e| e.to_string()),
                password_check.err().map(|e| e.to_string()),
            ]
            .into_iter()
            .flatten()
            .collect();
            return Ok(HttpResponse::BadRequest().json(ApiErrorResponse {
                error: "Validation failed".to_string(),
                details: Some(errors.join("; ")),
            }));
        }
    };

    let hashed = password::hash_password(&body.password).map_err(AppError::Hash)?;

    let conn = pool.get()?;
    match user::create(&conn, &email, &hashed) {
        Ok(user_id) => {
            log::info!("Registered user {user_id} ({email})");
            let created = user::find_by_id(&conn, user_id)?.ok_or(AppError::NotFound)?;
            Ok(HttpResponse::Created().json(UserResponse::from(created)))
        }
        Err(e) if e.to_string().contains("UNIQUE") => {
            Ok(HttpResponse::Conflict().json(ApiErrorResponse::new("Email already registered")))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /api/v1/auth/login
pub async fn login(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let conn = pool.get()?;
    let email = body.email.trim().to_lowercase();
    let found = user::find_by_email(&conn, &email)?;

    match found {
        Some(u) => match password::verify_password(&body.password, &u.password) {
            Ok(true) => {
                session.renew();
                let _ = session.insert("user_id", u.id);
                log::info!("User {} logged in", u.id);
                Ok(HttpResponse::Ok().json(UserResponse::from(u)))
            }
            _ => Ok(HttpResponse::Unauthorized()
                .json(ApiErrorResponse::new("Invalid email or password"))),
        },
        None => Ok(HttpResponse::Unauthorized()
            .json(ApiErrorResponse::new("Invalid email or password"))),
    }
}

/// POST /api/v1/auth/logout
pub async fn logout(session: Session) -> Result<HttpResponse, AppError> {
    session.purge();
    Ok(HttpResponse::NoContent().finish())
}
