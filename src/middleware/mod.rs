pub mod auth;
pub mod response;

pub use auth::{require_account_owner, AuthAccount};
pub use response::{ApiResponse, ApiResult};
