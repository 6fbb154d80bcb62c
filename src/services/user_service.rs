use hex::encode as hex_encode;
use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use thiserror::Error;

use crate::config::{get_default_admin_password, get_default_admin_username, DEFAULT_PBKDF2_ITERATIONS};
use crate::db::Database;
use crate::models::{CurrentUser, Role, UserRecord};

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Username and password are required")]
    MissingCredentials,

    #[error("User '{0}' already exists")]
    AlreadyExists(String),

    #[error("User '{0}' not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub fn generate_password_hash(password: &str) -> String {
    let mut salt_bytes = [0u8; 12];
    rand::rngs::OsRng.fill_bytes(&mut salt_bytes);
    let salt = hex_encode(salt_bytes);
    let mut dk = [0u8; 32];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), DEFAULT_PBKDF2_ITERATIONS, &mut dk);
    format!("pbkdf2:sha256:{}${}${}", DEFAULT_PBKDF2_ITERATIONS, salt, hex_encode(dk))
}

pub fn verify_password(stored: &str, candidate: &str) -> bool {
    let Some(rest) = stored.strip_prefix("pbkdf2:sha256:") else {
        return false;
    };
    let Some((iter_s, salt_hash)) = rest.split_once('$') else {
        return false;
    };
    let Some((salt, expected_hash)) = salt_hash.split_once('$') else {
        return false;
    };
    let Ok(iter) = iter_s.parse::<u32>() else {
        return false;
    };
    let mut dk = [0u8; 32];
    pbkdf2_hmac::<Sha256>(candidate.as_bytes(), salt.as_bytes(), iter, &mut dk);
    hex_encode(dk) == expected_hash
}

pub fn random_session_id() -> String {
    let mut b = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut b);
    hex_encode(b)
}

pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// `Ok(None)` on any mismatch; callers must not reveal which field was wrong.
pub async fn authenticate(db: &Database, username: &str, password: &str) -> Result<Option<CurrentUser>, sqlx::Error> {
    let uname = normalize_username(username);
    if uname.is_empty() || password.is_empty() {
        return Ok(None);
    }
    let Some(record) = db.get_user_by_username(&uname).await? else {
        return Ok(None);
    };
    if !verify_password(&record.password_hash, password) {
        return Ok(None);
    }
    Ok(Some(CurrentUser {
        id: record.id,
        username: record.username.clone(),
        role: record.role(),
    }))
}

pub async fn register_user(db: &Database, username: &str, password: &str, role: Role) -> Result<UserRecord, UserError> {
    let uname = normalize_username(username);
    if uname.is_empty() || password.is_empty() {
        return Err(UserError::MissingCredentials);
    }
    if db.get_user_by_username(&uname).await?.is_some() {
        return Err(UserError::AlreadyExists(uname));
    }
    let hash = generate_password_hash(password);
    Ok(db.create_user(&uname, &hash, role).await?)
}

pub async fn reset_password(db: &Database, username: &str, password: &str) -> Result<(), UserError> {
    let uname = normalize_username(username);
    if password.is_empty() {
        return Err(UserError::MissingCredentials);
    }
    if db.update_user_password(&uname, &generate_password_hash(password)).await? {
        Ok(())
    } else {
        Err(UserError::NotFound(uname))
    }
}

pub async fn set_role(db: &Database, username: &str, role: Role) -> Result<(), UserError> {
    let uname = normalize_username(username);
    if db.update_user_role(&uname, role).await? {
        Ok(())
    } else {
        Err(UserError::NotFound(uname))
    }
}

/// Creates the configured default admin when the users table is empty.
/// Returns the username when a user was created.
pub async fn seed_default_admin(db: &Database) -> Result<Option<String>, UserError> {
    if db.count_users().await? > 0 {
        return Ok(None);
    }
    let username = get_default_admin_username();
    register_user(db, &username, &get_default_admin_password(), Role::Admin).await?;
    tracing::warn!(%username, "Seeded default admin account; change its password");
    Ok(Some(username))
}
