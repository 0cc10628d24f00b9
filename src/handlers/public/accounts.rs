// handlers/public/accounts.rs - GET|POST /accounts

use std::collections::HashMap;

use axum::{
    extract::{RawQuery, State},
    Json,
};

use super::auth::TokenGrant;
use crate::app::AppState;
use crate::auth::password::hash_password;
use crate::database::models::{Account, CreateAccountRequest, NewAccount};
use crate::error::ApiError;
use crate::filter::EntityKind;
use crate::handlers::list_query;
use crate::middleware::{ApiResponse, ApiResult};

/// GET /accounts - list accounts, filtered and sorted by the query string
pub async fn accounts_get(State(state): State<AppState>, raw: RawQuery) -> ApiResult<Vec<Account>> {
    let query = list_query(&state, EntityKind::Account, raw)?;
    let accounts = state.store.list_accounts(&query).await?;
    Ok(ApiResponse::success(accounts))
}

/// POST /accounts - register an account and issue its first token
pub async fn accounts_post(
    State(state): State<AppState>,
    Json(payload): Json<CreateAccountRequest>,
) -> ApiResult<TokenGrant> {
    validate_new_account(&payload)?;

    let password_hash = hash_password(&payload.password).map_err(|e| {
        tracing::error!("{}", e);
        ApiError::internal_server_error("Failed to create account")
    })?;

    let account = state
        .store
        .create_account(NewAccount::from_request(payload, password_hash))
        .await?;

    tracing::info!(account_id = account.id, "Account created");
    Ok(ApiResponse::created(TokenGrant::issue(&state, account)?))
}

fn validate_new_account(payload: &CreateAccountRequest) -> Result<(), ApiError> {
    let mut field_errors = HashMap::new();
    for (field, value) in [
        ("username", &payload.username),
        ("password", &payload.password),
        ("display_name", &payload.display_name),
        ("full_name", &payload.full_name),
    ] {
        if value.trim().is_empty() {
            field_errors.insert(field.to_string(), "This field is required".to_string());
        }
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error("Missing required fields", Some(field_errors)))
    }
}
