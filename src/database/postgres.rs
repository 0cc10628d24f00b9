use async_trait::async_trait;
use sqlx::{Executor, PgPool};
use tracing::{debug, info};

use super::manager::DatabaseError;
use super::models::{Account, CreateEventRequest, Event, NewAccount, Ticket};
use super::query_builder::bind_params_as;
use super::storage::Storage;
use crate::filter::{EntityKind, ListQuery, SqlParam};

const SCHEMA_SQL: &str = include_str!("../../db/schema.sql");

const ACCOUNT_COLUMNS: &str =
    "id, username, password_hash, display_name, full_name, gender, is_host, created_at";

const EVENT_COLUMNS: &str = "id, host_id, name, description, capacity, start_at, end_at, \
     location_name, location_address, location_city, location_state, location_country, \
     location_zip, created_at";

const ACCOUNT_SELECT: &str = "SELECT id, username, password_hash, display_name, full_name, \
     gender, is_host, created_at FROM account";

const EVENT_SELECT: &str = "SELECT id, host_id, name, description, capacity, start_at, end_at, \
     location_name, location_address, location_city, location_state, location_country, \
     location_zip, created_at FROM event";

const TICKET_SELECT: &str = "SELECT ticket.id, ticket.ticket_type_id, ticket.owner_id, \
     ticket.purchased_at, ticket_type.name AS ticket_type_name, \
     ticket_type.price AS ticket_type_price, event.id AS event_id, event.name AS event_name, \
     event.start_at AS event_start_at, event.end_at AS event_end_at \
     FROM ticket \
     JOIN ticket_type ON ticket.ticket_type_id = ticket_type.id \
     JOIN event ON ticket_type.event_id = event.id";

/// `Storage` over a Postgres connection pool.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the bundled DDL. Idempotent.
    pub async fn init(&self) -> Result<(), DatabaseError> {
        self.pool.execute(SCHEMA_SQL).await?;
        info!("Database schema is up to date");
        Ok(())
    }
}

fn expect_entity(query: &ListQuery, expected: EntityKind) -> Result<(), DatabaseError> {
    if query.entity() != expected {
        return Err(DatabaseError::QueryError(format!(
            "{} query used for {} listing",
            query.entity().as_str(),
            expected.as_str()
        )));
    }
    Ok(())
}

#[async_trait]
impl Storage for PgStore {
    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_account(&self, account: NewAccount) -> Result<Account, DatabaseError> {
        let sql = format!(
            "INSERT INTO account (username, password_hash, display_name, full_name, gender, is_host, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING {}",
            ACCOUNT_COLUMNS
        );

        let created = sqlx::query_as::<_, Account>(&sql)
            .bind(&account.username)
            .bind(&account.password_hash)
            .bind(&account.display_name)
            .bind(&account.full_name)
            .bind(account.gender)
            .bind(account.is_host)
            .bind(account.created_at)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn list_accounts(&self, query: &ListQuery) -> Result<Vec<Account>, DatabaseError> {
        expect_entity(query, EntityKind::Account)?;
        let sql = query.to_sql(ACCOUNT_SELECT, None, vec![]);
        debug!(query = %sql.query, params = sql.params.len(), "listing accounts");

        let rows = bind_params_as(sqlx::query_as::<_, Account>(&sql.query), &sql.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_account_by_id(&self, id: i64) -> Result<Account, DatabaseError> {
        let sql = format!("{} WHERE id = $1", ACCOUNT_SELECT);
        sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("account {} not found", id)))
    }

    async fn get_account_by_username(&self, username: &str) -> Result<Option<Account>, DatabaseError> {
        let sql = format!("{} WHERE username = $1", ACCOUNT_SELECT);
        let account = sqlx::query_as::<_, Account>(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(account)
    }

    async fn delete_account_by_id(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM account WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("account {} not found", id)));
        }
        Ok(())
    }

    async fn create_event(&self, event: CreateEventRequest) -> Result<Event, DatabaseError> {
        let sql = format!(
            "INSERT INTO event (host_id, name, description, capacity, start_at, end_at, \
             location_name, location_address, location_city, location_state, location_country, \
             location_zip) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING {}",
            EVENT_COLUMNS
        );

        let created = sqlx::query_as::<_, Event>(&sql)
            .bind(event.host_id)
            .bind(&event.name)
            .bind(&event.description)
            .bind(event.capacity)
            .bind(event.start_at)
            .bind(event.end_at)
            .bind(&event.location_name)
            .bind(&event.location_address)
            .bind(&event.location_city)
            .bind(&event.location_state)
            .bind(&event.location_country)
            .bind(&event.location_zip)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn list_events(&self, query: &ListQuery) -> Result<Vec<Event>, DatabaseError> {
        expect_entity(query, EntityKind::Event)?;
        let sql = query.to_sql(EVENT_SELECT, None, vec![]);
        debug!(query = %sql.query, params = sql.params.len(), "listing events");

        let rows = bind_params_as(sqlx::query_as::<_, Event>(&sql.query), &sql.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_event_by_id(&self, id: i64) -> Result<Event, DatabaseError> {
        let sql = format!("{} WHERE id = $1", EVENT_SELECT);
        sqlx::query_as::<_, Event>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("event {} not found", id)))
    }

    async fn list_tickets_by_account_id(&self, id: i64, query: &ListQuery) -> Result<Vec<Ticket>, DatabaseError> {
        expect_entity(query, EntityKind::Ticket)?;
        let sql = query.to_sql(
            TICKET_SELECT,
            Some(r#""ticket"."owner_id" = $1"#),
            vec![SqlParam::Integer(id)],
        );
        debug!(query = %sql.query, params = sql.params.len(), "listing tickets");

        let rows = bind_params_as(sqlx::query_as::<_, Ticket>(&sql.query), &sql.params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_must_target_the_listed_entity() {
        assert!(expect_entity(&ListQuery::all(EntityKind::Ticket), EntityKind::Ticket).is_ok());
        assert!(matches!(
            expect_entity(&ListQuery::all(EntityKind::Account), EntityKind::Event),
            Err(DatabaseError::QueryError(_))
        ));
    }
}
