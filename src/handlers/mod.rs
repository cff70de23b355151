pub mod auth_handlers;
pub mod profile_handlers;

use actix_web::{
    Error, HttpResponse, web,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::Method,
    middleware::Next,
};

use crate::errors::ApiErrorResponse;

/// CSRF guard for the mutation endpoints.
///
/// A cross-origin form POST cannot carry Content-Type: application/json,
/// so requiring it on every POST/PUT/DELETE blocks cookie-riding form
/// submissions without a token scheme. Reads stay exempt.
async fn require_json_content_type(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let method = req.method();
    let is_mutation = method == Method::POST || method == Method::PUT || method == Method::DELETE;

    if is_mutation {
        let is_json = req
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));

        if !is_json {
            let response = HttpResponse::BadRequest().json(ApiErrorResponse::new(
                "Content-Type must be application/json for mutation requests",
            ));
            return Ok(req.into_response(response).map_into_right_body());
        }
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}

/// Configure the /api/v1 routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("/register", web::post().to(auth_handlers::register))
            .route("/login", web::post().to(auth_handlers::login))
            .route("/logout", web::post().to(auth_handlers::logout)),
    );
    cfg.service(
        web::scope("/profile")
            .wrap(actix_web::middleware::from_fn(require_json_content_type))
            .route("", web::get().to(profile_handlers::read))
            .route("", web::put().to(profile_handlers::update))
            .route("/avatar", web::get().to(profile_handlers::avatar))
            .route("/avatar", web::put().to(profile_handlers::upload_avatar))
            .route("/avatar", web::delete().to(profile_handlers::delete_avatar)),
    );
}
