use axum::{
    extract::{Path, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::{AuthError, Authorized};
use crate::error::ApiError;
use crate::handlers::parse_id;

/// Verified caller of an account-scoped route, injected by `require_account_owner`.
#[derive(Clone, Debug)]
pub struct AuthAccount {
    pub account_id: i64,
}

impl From<Authorized> for AuthAccount {
    fn from(authorized: Authorized) -> Self {
        Self {
            account_id: authorized.subject_id,
        }
    }
}

/// Route layer for `/accounts/:id/...`: the token subject must equal `:id`.
///
/// Runs before the handler; on any rejection the handler, and so storage,
/// is never reached.
pub async fn require_account_owner(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let resource_id = parse_id(&id)?;

    let token = extract_token(&headers)?;

    let authorized = state.guard.authorize(token, resource_id).map_err(|err| {
        tracing::warn!(
            kind = err.kind(),
            resource_id,
            "Authorization denied: {}",
            err
        );
        ApiError::unauthorized()
    })?;

    tracing::debug!(account_id = authorized.subject_id, "Authorization granted");
    request.extensions_mut().insert(AuthAccount::from(authorized));

    Ok(next.run(request).await)
}

/// Token from the Authorization header, with or without a `Bearer ` prefix.
/// A missing header yields an empty token.
fn extract_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let Some(value) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok("");
    };

    let raw = value.to_str().map_err(|_| {
        let err = AuthError::MalformedToken("authorization header is not visible ASCII".to_string());
        tracing::warn!(kind = err.kind(), "Authorization denied: {}", err);
        ApiError::unauthorized()
    })?;

    let raw = raw.trim();
    match raw.strip_prefix("Bearer") {
        Some(rest) if rest.is_empty() || rest.starts_with(' ') => Ok(rest.trim()),
        _ => Ok(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(axum::http::header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn strips_bearer_prefix() {
        assert_eq!(extract_token(&headers("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn accepts_bare_token() {
        assert_eq!(extract_token(&headers("abc.def.ghi")).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn missing_header_is_empty_token() {
        assert_eq!(extract_token(&HeaderMap::new()).unwrap(), "");
        assert_eq!(extract_token(&headers("Bearer ")).unwrap(), "");
    }
}
