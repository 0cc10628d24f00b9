//! Identity tokens and owner-scoped authorization.
//!
//! `TokenCodec` signs and verifies HS256 tokens carrying an account id,
//! `AuthorizationGuard` decides whether a verified caller may touch a given
//! account-scoped resource, and `password` hashes credentials at rest.

pub mod error;
pub mod guard;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use guard::{AuthorizationGuard, Authorized};
pub use token::{Claims, IssuedToken, TokenCodec, VerifiedToken};
