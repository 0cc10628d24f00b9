// handlers/public/auth.rs - POST /login

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::app::AppState;
use crate::auth::password::verify_password;
use crate::database::models::{Account, LoginRequest};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

/// Body returned whenever a token is issued.
#[derive(Debug, Serialize)]
pub struct TokenGrant {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub account: Account,
}

impl TokenGrant {
    /// Issue a token for `account` using the configured lifetime.
    pub fn issue(state: &AppState, account: Account) -> Result<Self, ApiError> {
        let issued = state.tokens().issue(account.id, state.token_ttl())?;
        Ok(Self {
            token: issued.token,
            expires_at: issued.expires_at,
            account,
        })
    }
}

/// POST /login - exchange username and password for an access token.
///
/// Unknown user and wrong password produce the same 401.
pub async fn login_post(State(state): State<AppState>, Json(payload): Json<LoginRequest>) -> ApiResult<TokenGrant> {
    let account = state.store.get_account_by_username(&payload.username).await?;

    let account = match account {
        Some(account) if verify_password(&account.password_hash, &payload.password) => account,
        Some(_) => {
            tracing::warn!(username = %payload.username, "Login failed: wrong password");
            return Err(ApiError::unauthorized());
        }
        None => {
            tracing::warn!(username = %payload.username, "Login failed: unknown username");
            return Err(ApiError::unauthorized());
        }
    };

    tracing::info!(account_id = account.id, "Login succeeded");
    Ok(ApiResponse::success(TokenGrant::issue(&state, account)?))
}
