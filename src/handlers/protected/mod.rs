// handlers/protected/mod.rs - Account-scoped handlers
//
// Every route here is layered with `require_account_owner`; handlers take the
// account id from the injected `AuthAccount`, never from the path.

pub mod accounts;

pub use accounts::{account_delete, account_get, account_tickets_get};
