use chrono::NaiveDate;
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};

/// Gender as stored in the profiles.gender column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Man,
    Woman,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Man, Gender::Woman];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Man => "man",
            Gender::Woman => "woman",
        }
    }

    /// Parse a stored or submitted value. Exact match only.
    pub fn parse(value: &str) -> Option<Gender> {
        match value {
            "man" => Some(Gender::Man),
            "woman" => Some(Gender::Woman),
            _ => None,
        }
    }
}

/// A user's profile row, without the avatar bytes.
#[derive(Debug, Clone)]
pub struct Profile {
    pub user_id: i64,
    pub name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub info: String,
    pub avatar_format: Option<String>,
    pub updated_at: String,
}

/// Field values for a profile upsert. All fields are the validators'
/// normalized output.
pub struct NewProfile {
    pub name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub info: String,
}

/// Profile response for the API. Avatar bytes are served separately;
/// only the stored content type appears here.
#[derive(Serialize, Debug, Clone)]
pub struct ProfileResponse {
    pub user_id: i64,
    pub name: String,
    pub gender: Gender,
    pub birth_date: NaiveDate,
    pub info: String,
    pub avatar_format: Option<String>,
    pub updated_at: String,
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        ProfileResponse {
            user_id: p.user_id,
            name: p.name,
            gender: p.gender,
            birth_date: p.birth_date,
            info: p.info,
            avatar_format: p.avatar_format,
            updated_at: p.updated_at,
        }
    }
}

/// PUT /api/v1/profile request body. Raw values; validation happens in
/// the handler before anything is stored.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    pub name: String,
    pub gender: String,
    pub birth_date: NaiveDate,
    pub info: Option<String>,
}

/// PUT /api/v1/profile/avatar request body.
#[derive(Debug, Deserialize)]
pub struct AvatarUploadRequest {
    pub avatar_data_uri: String,
}

fn row_to_profile(row: &rusqlite::Row) -> rusqlite::Result<Profile> {
    let gender_raw: String = row.get("gender")?;
    let gender = Gender::parse(&gender_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            format!("unknown gender value '{gender_raw}'").into(),
        )
    })?;
    Ok(Profile {
        user_id: row.get("user_id")?,
        name: row.get("name")?,
        gender,
        birth_date: row.get("birth_date")?,
        info: row.get("info")?,
        avatar_format: row.get("avatar_format")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Fetch a user's profile, if one has been created.
pub fn find_by_user_id(conn: &Connection, user_id: i64) -> rusqlite::Result<Option<Profile>> {
    let mut stmt = conn.prepare(
        "SELECT user_id, name, gender, birth_date, info, avatar_format, updated_at \
         FROM profiles WHERE user_id = ?1",
    )?;
    let mut rows = stmt.query_map(params![user_id], row_to_profile)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Insert or update the profile fields. A stored avatar is left alone.
pub fn upsert(conn: &Connection, user_id: i64, new: &NewProfile) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO profiles (user_id, name, gender, birth_date, info) \
         VALUES (?1, ?2, ?3, ?4, ?5) \
         ON CONFLICT(user_id) DO UPDATE SET \
             name = excluded.name, \
             gender = excluded.gender, \
             birth_date = excluded.birth_date, \
             info = excluded.info, \
             updated_at = strftime('%Y-%m-%dT%H:%M:%S','now')",
        params![user_id, new.name, new.gender.as_str(), new.birth_date, new.info],
    )?;
    Ok(())
}

/// Store avatar bytes and their content type. Returns false when the
/// user has no profile row yet.
pub fn set_avatar(
    conn: &Connection,
    user_id: i64,
    bytes: &[u8],
    content_type: &str,
) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE profiles SET avatar = ?2, avatar_format = ?3, \
         updated_at = strftime('%Y-%m-%dT%H:%M:%S','now') WHERE user_id = ?1",
        params![user_id, bytes, content_type],
    )?;
    Ok(changed > 0)
}

/// Fetch the stored avatar bytes and content type.
pub fn find_avatar(conn: &Connection, user_id: i64) -> rusqlite::Result<Option<(Vec<u8>, String)>> {
    let mut stmt = conn.prepare(
        "SELECT avatar, avatar_format FROM profiles \
         WHERE user_id = ?1 AND avatar IS NOT NULL",
    )?;
    let mut rows = stmt.query_map(params![user_id], |row| {
        Ok((row.get::<_, Vec<u8>>("avatar")?, row.get::<_, String>("avatar_format")?))
    })?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Clear any stored avatar. Returns false when the user has no profile.
pub fn clear_avatar(conn: &Connection, user_id: i64) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE profiles SET avatar = NULL, avatar_format = NULL, \
         updated_at = strftime('%Y-%m-%dT%H:%M:%S','now') WHERE user_id = ?1",
        params![user_id],
    )?;
    Ok(changed > 0)
}
