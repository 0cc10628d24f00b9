// handlers/public/events.rs - GET|POST /events, GET /events/:id

use axum::{
    extract::{Path, RawQuery, State},
    Json,
};

use crate::app::AppState;
use crate::database::models::{CreateEventRequest, Event};
use crate::error::ApiError;
use crate::filter::EntityKind;
use crate::handlers::{list_query, parse_id};
use crate::middleware::{ApiResponse, ApiResult};

/// GET /events - list events, filtered and sorted by the query string
pub async fn events_get(State(state): State<AppState>, raw: RawQuery) -> ApiResult<Vec<Event>> {
    let query = list_query(&state, EntityKind::Event, raw)?;
    let events = state.store.list_events(&query).await?;
    Ok(ApiResponse::success(events))
}

/// POST /events
pub async fn events_post(State(state): State<AppState>, Json(payload): Json<CreateEventRequest>) -> ApiResult<Event> {
    if payload.end_at < payload.start_at {
        return Err(ApiError::validation_error("Event must end after it starts", None));
    }

    let event = state.store.create_event(payload).await?;
    tracing::info!(event_id = event.id, host_id = event.host_id, "Event created");
    Ok(ApiResponse::created(event))
}

/// GET /events/:id
pub async fn event_get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Event> {
    let id = parse_id(&id)?;
    let event = state.store.get_event_by_id(id).await?;
    Ok(ApiResponse::success(event))
}
