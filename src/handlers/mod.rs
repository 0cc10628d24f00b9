// handlers/mod.rs - Two-tier handler layout
//
// Public handlers need no token. Protected handlers sit behind
// `require_account_owner` and act only on the verified account id.
pub mod protected;
pub mod public;

use axum::extract::RawQuery;

use crate::app::AppState;
use crate::error::ApiError;
use crate::filter::{EntityKind, ListQuery};

/// Compile the request's raw query string for a list route.
pub(crate) fn list_query(state: &AppState, entity: EntityKind, raw: RawQuery) -> Result<ListQuery, ApiError> {
    let RawQuery(raw) = raw;
    let query = ListQuery::parse(entity, raw.as_deref().unwrap_or(""))?;

    if state.config.filter.debug_logging {
        tracing::debug!(
            entity = entity.as_str(),
            conditions = query.filter.conditions().len(),
            sort_keys = query.order.keys().len(),
            "compiled list query"
        );
    }

    Ok(query)
}

/// Message for a path id that is not an integer. The raw value is only logged.
pub const INVALID_ID_MESSAGE: &str = "Invalid id";

/// Parse a numeric path id.
pub(crate) fn parse_id(id: &str) -> Result<i64, ApiError> {
    id.parse().map_err(|_| {
        tracing::debug!(id, "Rejected non-numeric path id");
        ApiError::bad_request(INVALID_ID_MESSAGE)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    #[test]
    fn parse_id_does_not_echo_input() {
        let body = parse_id("<script>").unwrap_err().to_json();
        assert_eq!(body["message"], INVALID_ID_MESSAGE);
        assert!(!body.to_string().contains("script"));
    }
}
