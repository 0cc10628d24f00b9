// handlers/protected/accounts.rs - account-scoped routes

use axum::extract::{Extension, RawQuery, State};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::models::{Account, Ticket};
use crate::filter::EntityKind;
use crate::handlers::list_query;
use crate::middleware::{ApiResponse, ApiResult, AuthAccount};

/// GET /accounts/:id
pub async fn account_get(State(state): State<AppState>, Extension(auth): Extension<AuthAccount>) -> ApiResult<Account> {
    let account = state.store.get_account_by_id(auth.account_id).await?;
    Ok(ApiResponse::success(account))
}

/// DELETE /accounts/:id
pub async fn account_delete(State(state): State<AppState>, Extension(auth): Extension<AuthAccount>) -> ApiResult<Value> {
    state.store.delete_account_by_id(auth.account_id).await?;
    tracing::info!(account_id = auth.account_id, "Account deleted");
    Ok(ApiResponse::success(json!({ "id": auth.account_id, "deleted": true })))
}

/// GET /accounts/:id/tickets - the caller's tickets, filtered and sorted
pub async fn account_tickets_get(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthAccount>,
    raw: RawQuery,
) -> ApiResult<Vec<Ticket>> {
    let query = list_query(&state, EntityKind::Ticket, raw)?;
    let tickets = state
        .store
        .list_tickets_by_account_id(auth.account_id, &query)
        .await?;
    Ok(ApiResponse::success(tickets))
}
