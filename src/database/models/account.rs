use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: i64,
    pub username: String,
    /// Argon2 PHC string; never leaves the service
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub display_name: String,
    pub full_name: String,
    pub gender: i16,
    pub is_host: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAccountRequest {
    pub username: String,
    pub password: String,
    pub display_name: String,
    pub full_name: String,
    pub gender: i16,
    pub is_host: bool,
}

/// Account row ready for insertion; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub display_name: String,
    pub full_name: String,
    pub gender: i16,
    pub is_host: bool,
    pub created_at: DateTime<Utc>,
}

impl NewAccount {
    pub fn from_request(req: CreateAccountRequest, password_hash: String) -> Self {
        Self {
            username: req.username,
            password_hash,
            display_name: req.display_name,
            full_name: req.full_name,
            gender: req.gender,
            is_host: req.is_host,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}
