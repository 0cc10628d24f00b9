use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::error::AuthError;
use super::token::TokenCodec;

/// Outcome of a successful authorization: the verified caller.
///
/// Handlers read the account id from here, never from the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authorized {
    pub subject_id: i64,
    pub expires_at: DateTime<Utc>,
}

/// Strict ownership check: a caller may only act on the account whose id
/// equals the subject of their token. No roles, no delegation.
#[derive(Clone)]
pub struct AuthorizationGuard {
    codec: Arc<TokenCodec>,
}

impl AuthorizationGuard {
    pub fn new(codec: Arc<TokenCodec>) -> Self {
        Self { codec }
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn authorize(&self, raw_token: &str, requested_resource_id: i64) -> Result<Authorized, AuthError> {
        self.authorize_at(raw_token, requested_resource_id, Utc::now())
    }

    pub fn authorize_at(
        &self,
        raw_token: &str,
        requested_resource_id: i64,
        now: DateTime<Utc>,
    ) -> Result<Authorized, AuthError> {
        if raw_token.is_empty() {
            return Err(AuthError::MissingCredential);
        }

        let verified = self.codec.verify_at(raw_token, now)?;

        // Subject 0 carries no identity
        if verified.subject_id == 0 || verified.subject_id != requested_resource_id {
            return Err(AuthError::Forbidden {
                subject_id: verified.subject_id,
                resource_id: requested_resource_id,
            });
        }

        Ok(Authorized {
            subject_id: verified.subject_id,
            expires_at: verified.expires_at,
        })
    }
}
