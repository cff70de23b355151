//! Shared test infrastructure.
//!
//! `setup_test_db()` builds a temporary SQLite database with the real
//! schema and returns it behind the same pool type the handlers use.
//! The TempDir must be kept alive for the pool to remain valid.

use tempfile::TempDir;

use profiles::auth::password;
use profiles::db::{self, DbPool};
use profiles::models::user;

pub const TEST_EMAIL: &str = "test@example.com";
pub const TEST_PASSWORD: &str = "password123";

pub fn setup_test_db() -> (TempDir, DbPool) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = dir.path().join("test.db");

    let pool = db::init_pool(db_path.to_str().expect("utf-8 temp path"));
    db::run_migrations(&pool);

    (dir, pool)
}

/// Create a user directly at the model layer, returning its id.
#[allow(dead_code)]
pub fn create_test_user(pool: &DbPool, email: &str, plaintext: &str) -> i64 {
    let hash = password::hash_password(plaintext).expect("Failed to hash password");
    let conn = pool.get().expect("Failed to get connection");
    user::create(&conn, email, &hash).expect("Failed to create user")
}
