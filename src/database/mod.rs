pub mod manager;
pub mod models;
pub mod postgres;
pub mod query_builder;
pub mod storage;

pub use manager::{connect_pool, DatabaseError};
pub use postgres::PgStore;
pub use storage::Storage;
