use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A purchased ticket joined with its ticket type and event.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ticket {
    pub id: i64,
    pub ticket_type_id: i64,
    pub owner_id: i64,
    pub purchased_at: DateTime<Utc>,
    pub ticket_type_name: String,
    pub ticket_type_price: f64,
    pub event_id: i64,
    pub event_name: String,
    pub event_start_at: DateTime<Utc>,
    pub event_end_at: DateTime<Utc>,
}
