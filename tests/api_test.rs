//! HTTP-level tests — exercise the handlers through the real actix app:
//! routing, JSON guard middleware, session cookies, and error bodies.

mod common;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, cookie::Key, test, web};
use base64::{Engine as _, engine::general_purpose};

use common::setup_test_db;
use profiles::handlers;

const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00];

macro_rules! init_app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                        .cookie_secure(false)
                        .build(),
                )
                .app_data(web::Data::new($pool.clone()))
                .service(web::scope("/api/v1").configure(handlers::configure)),
        )
        .await
    };
}

#[actix_rt::test]
async fn test_register_validation_and_conflict() {
    let (_dir, pool) = setup_test_db();
    let app = init_app!(pool);

    // Both fields invalid: errors are collected into one response
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(serde_json::json!({ "email": "not-an-email", "password": "short" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Validation failed");
    let details = body["details"].as_str().expect("details");
    assert!(details.contains("Email"));
    assert!(details.contains("Password"));

    // Valid registration, email normalized
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(serde_json::json!({ "email": "Neo@Example.com", "password": "password123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "neo@example.com");

    // Same address again → conflict
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(serde_json::json!({ "email": "neo@example.com", "password": "password123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
}

#[actix_rt::test]
async fn test_mutations_require_json_content_type() {
    let (_dir, pool) = setup_test_db();
    let app = init_app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header(("content-type", "text/plain"))
        .set_payload("email=x")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(
        body["error"]
            .as_str()
            .expect("error")
            .contains("application/json")
    );
}

#[actix_rt::test]
async fn test_profile_requires_login() {
    let (_dir, pool) = setup_test_db();
    let app = init_app!(pool);

    let req = test::TestRequest::get().uri("/api/v1/profile").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), 401);
}

#[actix_rt::test]
async fn test_login_and_profile_flow() {
    let (_dir, pool) = setup_test_db();
    let app = init_app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(serde_json::json!({ "email": "trinity@example.com", "password": "password123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    // Wrong password first
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "email": "trinity@example.com", "password": "wrong-pass" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    // Login mixes case in the email; the handler normalizes it
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "email": "Trinity@Example.com", "password": "password123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let session_cookie = resp
        .response()
        .cookies()
        .next()
        .expect("session cookie")
        .into_owned();

    // No profile yet
    let req = test::TestRequest::get()
        .uri("/api/v1/profile")
        .cookie(session_cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    // Invalid field values are reported together
    let req = test::TestRequest::put()
        .uri("/api/v1/profile")
        .cookie(session_cookie.clone())
        .set_json(serde_json::json!({
            "name": "Trinity",
            "gender": "robot",
            "birth_date": "2020-01-01",
            "info": "  "
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = test::read_body_json(resp).await;
    let details = body["details"].as_str().expect("details");
    assert!(details.contains("Gender must be one of"));
    assert!(details.contains("18 years old"));
    assert!(details.contains("Info field"));

    // Valid upsert; the name comes back lower-cased
    let req = test::TestRequest::put()
        .uri("/api/v1/profile")
        .cookie(session_cookie.clone())
        .set_json(serde_json::json!({
            "name": "Trinity",
            "gender": "woman",
            "birth_date": "1990-03-11",
            "info": "The One"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "trinity");
    assert_eq!(body["gender"], "woman");
    assert_eq!(body["birth_date"], "1990-03-11");
    assert_eq!(body["info"], "The One");

    // Logout kills the session
    let req = test::TestRequest::post()
        .uri("/api/v1/auth/logout")
        .cookie(session_cookie.clone())
        .set_json(serde_json::json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 204);
}

#[actix_rt::test]
async fn test_avatar_upload_flow() {
    let (_dir, pool) = setup_test_db();
    let app = init_app!(pool);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .set_json(serde_json::json!({ "email": "smith@example.com", "password": "password123" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(serde_json::json!({ "email": "smith@example.com", "password": "password123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let session_cookie = resp
        .response()
        .cookies()
        .next()
        .expect("session cookie")
        .into_owned();

    // Avatar before the profile exists → 404
    let data_uri = format!(
        "data:image/png;base64,{}",
        general_purpose::STANDARD.encode(PNG_BYTES)
    );
    let req = test::TestRequest::put()
        .uri("/api/v1/profile/avatar")
        .cookie(session_cookie.clone())
        .set_json(serde_json::json!({ "avatar_data_uri": data_uri }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);

    // Create the profile, then upload
    let req = test::TestRequest::put()
        .uri("/api/v1/profile")
        .cookie(session_cookie.clone())
        .set_json(serde_json::json!({
            "name": "smith",
            "gender": "man",
            "birth_date": "1980-06-01",
            "info": "Agent"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::put()
        .uri("/api/v1/profile/avatar")
        .cookie(session_cookie.clone())
        .set_json(serde_json::json!({ "avatar_data_uri": data_uri }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["avatar_format"], "image/png");

    // Unsupported format is rejected by the byte-level validator
    let gif_uri = format!(
        "data:image/gif;base64,{}",
        general_purpose::STANDARD.encode(b"GIF89a\x00\x00")
    );
    let req = test::TestRequest::put()
        .uri("/api/v1/profile/avatar")
        .cookie(session_cookie.clone())
        .set_json(serde_json::json!({ "avatar_data_uri": gif_uri }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    // Fetch the raw bytes back
    let req = test::TestRequest::get()
        .uri("/api/v1/profile/avatar")
        .cookie(session_cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("image/png")
    );
    let bytes = test::read_body(resp).await;
    assert_eq!(&bytes[..], PNG_BYTES);

    // Delete, then the avatar is gone
    let req = test::TestRequest::delete()
        .uri("/api/v1/profile/avatar")
        .cookie(session_cookie.clone())
        .set_json(serde_json::json!({}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    let req = test::TestRequest::get()
        .uri("/api/v1/profile/avatar")
        .cookie(session_cookie.clone())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}
