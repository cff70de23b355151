use actix_session::Session;
use actix_web::{HttpResponse, web};

use crate::auth::session::require_user;
use crate::db::DbPool;
use crate::errors::{ApiErrorResponse, AppError};
use crate::models::profile::{
    self, AvatarUploadRequest, NewProfile, ProfileResponse, ProfileUpdateRequest,
};
use crate::validation;

/// GET /api/v1/profile
pub async fn read(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    let user_id = require_user(&session)?;

    let conn = pool.get()?;
    let found = profile::find_by_user_id(&conn, user_id)?.ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().json(ProfileResponse::from(found)))
}

/// PUT /api/v1/profile — full upsert of the profile fields.
///
/// Every field runs through its validator; failures are collected and
/// returned together so the client sees all of them at once.
pub async fn update(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<ProfileUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = require_user(&session)?;

    let name = validation::validate_name(&body.name);
    let gender = validation::validate_gender(&body.gender);
    let birth_date = validation::validate_birth_date(body.birth_date);
    let info = validation::validate_info(body.info.as_deref());

    let (name, gender, birth_date, info) = match (name, gender, birth_date, info) {
        (Ok(name), Ok(gender), Ok(birth_date), Ok(info)) => (name, gender, birth_date, info),
        (name, gender, birth_date, info) => {
            let errors: Vec<String> = [
                name.err().map(|e| e.to_string()),
                gender.err().map(|e| e.to_string()),
                birth_date.err().map(|e| e.to_string()),
                info.err().map(|e| e.to_string()),
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

    let new = NewProfile {
        name,
        gender,
        birth_date,
        info,
    };

    let conn = pool.get()?;
    profile::upsert(&conn, user_id, &new)?;

    let saved = profile::find_by_user_id(&conn, user_id)?.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(ProfileResponse::from(saved)))
}

/// GET /api/v1/profile/avatar — raw image bytes with the stored content type.
pub async fn avatar(pool: web::Data<DbPool>, session: Session) -> Result<HttpResponse, AppError> {
    let user_id = require_user(&session)?;

    let conn = pool.get()?;
    let (bytes, content_type) =
        profile::find_avatar(&conn, user_id)?.ok_or(AppError::NotFound)?;

    Ok(HttpResponse::Ok().content_type(content_type).body(bytes))
}

/// PUT /api/v1/profile/avatar — body carries a base64 data URI.
pub async fn upload_avatar(
    pool: web::Data<DbPool>,
    session: Session,
    body: web::Json<AvatarUploadRequest>,
) -> Result<HttpResponse, AppError> {
    let user_id = require_user(&session)?;

    let bytes = validation::decode_avatar_data_uri(&body.avatar_data_uri)?;
    let format = validation::validate_avatar(&bytes)?;
    let content_type = format.to_mime_type();

    let conn = pool.get()?;
    if !profile::set_avatar(&conn, user_id, &bytes, content_type)? {
        // Avatar is part of the profile row; the profile must exist first.
        return Err(AppError::NotFound);
    }

    log::info!(
        "User {user_id} uploaded a {content_type} avatar ({} bytes)",
        bytes.len()
    );
    Ok(HttpResponse::Ok().json(serde_json::json!({ "avatar_format": content_type })))
}

/// DELETE /api/v1/profile/avatar
pub async fn delete_avatar(
    pool: web::Data<DbPool>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    let user_id = require_user(&session)?;

    let conn = pool.get()?;
    if !profile::clear_avatar(&conn, user_id)? {
        return Err(AppError::NotFound);
    }

    Ok(HttpResponse::NoContent().finish())
}
