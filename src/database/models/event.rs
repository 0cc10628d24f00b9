use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub host_id: i64,
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub location_name: String,
    pub location_address: String,
    pub location_city: String,
    pub location_state: String,
    pub location_country: String,
    pub location_zip: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateEventRequest {
    pub host_id: i64,
    pub name: String,
    pub description: String,
    pub capacity: i32,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub location_name: String,
    pub location_address: String,
    pub location_city: String,
    pub location_state: String,
    pub location_country: String,
    pub location_zip: String,
}
