use rusqlite::{Connection, params};
use serde::Serialize;

/// Internal user struct for authentication — includes password hash.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Safe version for API responses — no password hash.
#[derive(Serialize, Debug, Clone)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            id: u.id,
            email: u.email,
            created_at: u.created_at,
        }
    }
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        email: row.get("email")?,
        password: row.get("password")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Create a new user, returning its id. The email must already be
/// normalized and the password hashed.
pub fn create(conn: &Connection, email: &str, password_hash: &str) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO users (email, password) VALUES (?1, ?2)",
        params![email, password_hash],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Find a user by normalized email, for authentication.
pub fn find_by_email(conn: &Connection, email: &str) -> rusqlite::Result<Option<User>> {
    let mut stmt = conn.prepare(
        "SELECT id, email, password, created_at, updated_at FROM users WHERE email = ?1",
    )?;
    let mut rows = stmt.query_map(params![email], row_to_user)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

pub fn find_by_id(conn: &Connection, id: i64) -> rusqlite::Result<Option<User>> {
    let mut stmt = conn.prepare(
        "SELECT id, email, password, created_at, updated_at FROM users WHERE id = ?1",
    )?;
    let mut rows = stmt.query_map(params![id], row_to_user)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Count registered users.
pub fn count(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
}
