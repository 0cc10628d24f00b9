use thiserror::Error;

/// Failures on the token and authorization path.
///
/// Every variant except `SigningError` is a per-request rejection and is
/// rendered identically to the client; the variant is only logged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("authorization token is missing")]
    MissingCredential,

    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    TokenExpired,

    #[error("subject {subject_id} may not access resource {resource_id}")]
    Forbidden { subject_id: i64, resource_id: i64 },

    #[error("token signing failed: {0}")]
    SigningError(String),
}

impl AuthError {
    /// Stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::MissingCredential => "missing_credential",
            AuthError::MalformedToken(_) => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::Forbidden { .. } => "forbidden",
            AuthError::SigningError(_) => "signing_error",
        }
    }
}
