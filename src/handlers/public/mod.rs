// handlers/public/mod.rs - Public handlers (no token required)
//
// Token acquisition (login, registration) and the open listings.

pub mod accounts;
pub mod auth;
pub mod events;

pub use accounts::{accounts_get, accounts_post};
pub use auth::login_post;
pub use events::{event_get, events_get, events_post};
