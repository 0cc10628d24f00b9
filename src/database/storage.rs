use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{Account, CreateEventRequest, Event, NewAccount, Ticket};
use crate::filter::ListQuery;

/// Persistence contract used by the HTTP handlers.
///
/// List operations receive an already-compiled `ListQuery`; implementations
/// append its fragments to their own fixed base query and bind its values.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn health_check(&self) -> Result<(), DatabaseError>;

    async fn create_account(&self, account: NewAccount) -> Result<Account, DatabaseError>;
    async fn list_accounts(&self, query: &ListQuery) -> Result<Vec<Account>, DatabaseError>;
    async fn get_account_by_id(&self, id: i64) -> Result<Account, DatabaseError>;
    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>, DatabaseError>;
    async fn delete_account_by_id(&self, id: i64) -> Result<(), DatabaseError>;

    async fn create_event(&self, event: CreateEventRequest) -> Result<Event, DatabaseError>;
    async fn list_events(&self, query: &ListQuery) -> Result<Vec<Event>, DatabaseError>;
    async fn get_event_by_id(&self, id: i64) -> Result<Event, DatabaseError>;

    async fn list_tickets_by_account_id(&self, id: i64, query: &ListQuery) -> Result<Vec<Ticket>, DatabaseError>;
}
