use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::error::AuthError;

/// Token payload. Only `sub` is an authorization input; `iat` is informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id of the token holder, as a decimal string
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly signed token and the instant it stops being accepted.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Claims that survived signature and expiry checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedToken {
    pub subject_id: i64,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies HS256 identity tokens with a process-wide secret.
///
/// Holds no mutable state; share one instance behind an `Arc`.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::SigningError("signing secret is empty".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked against an explicit clock in `verify_at`.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    pub fn issue(&self, subject_id: i64, ttl: Duration) -> Result<IssuedToken, AuthError> {
        self.issue_at(subject_id, ttl, Utc::now())
    }

    /// Sign a token for `subject_id` valid from `now` for `ttl`.
    pub fn issue_at(
        &self,
        subject_id: i64,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        if subject_id <= 0 {
            return Err(AuthError::SigningError(format!(
                "subject id must be positive, got {}",
                subject_id
            )));
        }
        if ttl <= Duration::zero() {
            return Err(AuthError::SigningError("token ttl must be positive".to_string()));
        }

        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::SigningError("token expiry is out of range".to_string()))?;

        let iat = now.timestamp();
        let exp = expires_at.timestamp();
        let claims = Claims {
            sub: subject_id.to_string(),
            iat,
            exp,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::SigningError(e.to_string()))?;

        Ok(IssuedToken {
            token,
            expires_at: timestamp_to_utc(exp)?,
        })
    }

    pub fn verify(&self, token: &str) -> Result<VerifiedToken, AuthError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify `token` as of `now`.
    ///
    /// Expiry is decided before the signature so that any token past its
    /// `exp` reports `TokenExpired`, whoever signed it. Nothing from the
    /// payload is returned until the signature has been checked; the HMAC
    /// comparison inside `jsonwebtoken` runs in constant time.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<VerifiedToken, AuthError> {
        let mut structural = self.validation.clone();
        structural.insecure_disable_signature_validation();
        let unverified = decode::<Claims>(token, &self.decoding_key, &structural)
            .map_err(classify)?
            .claims;

        if now.timestamp() >= unverified.exp {
            return Err(AuthError::TokenExpired);
        }

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(classify)?
            .claims;

        let subject_id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| AuthError::MalformedToken(format!("subject '{}' is not an account id", claims.sub)))?;

        Ok(VerifiedToken {
            subject_id,
            expires_at: timestamp_to_utc(claims.exp)?,
        })
    }
}

fn classify(err: JwtError) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => AuthError::InvalidSignature,
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::MalformedToken(err.to_string()),
    }
}

fn timestamp_to_utc(secs: i64) -> Result<DateTime<Utc>, AuthError> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| AuthError::MalformedToken(format!("expiry {} is out of range", secs)))
}
