use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

use crate::validation::ValidationError;

/// JSON body for every API error response.
#[derive(Serialize, Debug)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        ApiErrorResponse {
            error: error.into(),
            details: None,
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Db(rusqlite::Error),
    Pool(r2d2::Error),
    Hash(String),
    Validation(ValidationError),
    Unauthorized,
    NotFound,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Db(e) => write!(f, "Database error: {e}"),
            AppError::Pool(e) => write!(f, "Pool error: {e}"),
            AppError::Hash(e) => write!(f, "Hash error: {e}"),
            AppError::Validation(e) => write!(f, "{e}"),
            AppError::Unauthorized => write!(f, "Not logged in"),
            AppError::NotFound => write!(f, "Not found"),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(e) => {
                HttpResponse::BadRequest().json(ApiErrorResponse::new(e.to_string()))
            }
            AppError::Unauthorized => {
                HttpResponse::Unauthorized().json(ApiErrorResponse::new("Not logged in"))
            }
            AppError::NotFound => {
                HttpResponse::NotFound().json(ApiErrorResponse::new("Not found"))
            }
            _ => {
                log::error!("{self}");
                HttpResponse::InternalServerError()
                    .json(ApiErrorResponse::new("Internal Server Error"))
            }
        }
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(e: rusqlite::Error) -> Self {
        AppError::Db(e)
    }
}

impl From<r2d2::Error> for AppError {
    fn from(e: r2d2::Error) -> Self {
        AppError::Pool(e)
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}
