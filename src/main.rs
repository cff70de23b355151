use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, cookie::Key, middleware, web};

use profiles::errors::ApiErrorResponse;
use profiles::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let database_path =
        std::env::var("DATABASE_PATH").unwrap_or_else(|_| "data/profiles.db".to_string());
    if let Some(dir) = std::path::Path::new(&database_path).parent() {
        std::fs::create_dir_all(dir).expect("Failed to create data directory");
    }

    let pool = db::init_pool(&database_path);
    db::run_migrations(&pool);

    // Cookie sessions need 64+ key bytes; anything less falls back to a
    // per-process random key and sessions die with the process.
    let secret_key = match std::env::var("SESSION_KEY") {
        Ok(val) if val.len() >= 64 => {
            log::info!("Using SESSION_KEY from environment");
            Key::from(val.as_bytes())
        }
        Ok(val) => {
            log::warn!(
                "SESSION_KEY is only {} bytes (need 64+), generating a random key",
                val.len()
            );
            Key::generate()
        }
        Err(_) => {
            log::warn!("No SESSION_KEY set, sessions will not survive restarts");
            Key::generate()
        }
    };

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
    log::info!("Starting server at http://{bind_addr}");

    HttpServer::new(move || {
        let session_mw =
            SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                .cookie_secure(false)
                .cookie_http_only(true)
                .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            // 4 MiB so a 1 MiB avatar survives base64 + JSON framing
            .app_data(web::JsonConfig::default().limit(4 * 1024 * 1024))
            .service(web::scope("/api/v1").configure(handlers::configure))
            .default_service(web::to(|| async {
                actix_web::HttpResponse::NotFound().json(ApiErrorResponse::new("Not found"))
            }))
    })
    .bind(bind_addr)?
    .run()
    .await
}
