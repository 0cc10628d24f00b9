use chrono::{DateTime, Utc};

use super::error::FilterError;
use super::types::SqlParam;

/// Entities that can be listed with client-supplied filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Account,
    Event,
    Ticket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Float,
    Boolean,
    Timestamp,
}

/// An allow-listed field: the name clients use and the SQL it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub field: &'static str,
    pub sql: &'static str,
    pub kind: ColumnType,
}

const fn col(field: &'static str, sql: &'static str, kind: ColumnType) -> Column {
    Column { field, sql, kind }
}

// The password hash is deliberately absent.
const ACCOUNT_COLUMNS: &[Column] = &[
    col("id", r#""account"."id""#, ColumnType::Integer),
    col("username", r#""account"."username""#, ColumnType::Text),
    col("display_name", r#""account"."display_name""#, ColumnType::Text),
    col("full_name", r#""account"."full_name""#, ColumnType::Text),
    col("gender", r#""account"."gender""#, ColumnType::Integer),
    col("is_host", r#""account"."is_host""#, ColumnType::Boolean),
    col("created_at", r#""account"."created_at""#, ColumnType::Timestamp),
];

const EVENT_COLUMNS: &[Column] = &[
    col("id", r#""event"."id""#, ColumnType::Integer),
    col("host_id", r#""event"."host_id""#, ColumnType::Integer),
    col("name", r#""event"."name""#, ColumnType::Text),
    col("description", r#""event"."description""#, ColumnType::Text),
    col("capacity", r#""event"."capacity""#, ColumnType::Integer),
    col("start_at", r#""event"."start_at""#, ColumnType::Timestamp),
    col("end_at", r#""event"."end_at""#, ColumnType::Timestamp),
    col("location_name", r#""event"."location_name""#, ColumnType::Text),
    col("location_address", r#""event"."location_address""#, ColumnType::Text),
    col("location_city", r#""event"."location_city""#, ColumnType::Text),
    col("location_state", r#""event"."location_state""#, ColumnType::Text),
    col("location_country", r#""event"."location_country""#, ColumnType::Text),
    col("location_zip", r#""event"."location_zip""#, ColumnType::Text),
    col("created_at", r#""event"."created_at""#, ColumnType::Timestamp),
];

// Ticket rows are a join of ticket, ticket_type and event.
const TICKET_COLUMNS: &[Column] = &[
    col("id", r#""ticket"."id""#, ColumnType::Integer),
    col("ticket_type_id", r#""ticket"."ticket_type_id""#, ColumnType::Integer),
    col("owner_id", r#""ticket"."owner_id""#, ColumnType::Integer),
    col("purchased_at", r#""ticket"."purchased_at""#, ColumnType::Timestamp),
    col("ticket_type_name", r#""ticket_type"."name""#, ColumnType::Text),
    col("ticket_type_price", r#""ticket_type"."price""#, ColumnType::Float),
    col("event_id", r#""event"."id""#, ColumnType::Integer),
    col("event_name", r#""event"."name""#, ColumnType::Text),
    col("event_start_at", r#""event"."start_at""#, ColumnType::Timestamp),
    col("event_end_at", r#""event"."end_at""#, ColumnType::Timestamp),
];

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Account => "account",
            EntityKind::Event => "event",
            EntityKind::Ticket => "ticket",
        }
    }

    pub fn columns(&self) -> &'static [Column] {
        match self {
            EntityKind::Account => ACCOUNT_COLUMNS,
            EntityKind::Event => EVENT_COLUMNS,
            EntityKind::Ticket => TICKET_COLUMNS,
        }
    }

    /// Look up an allow-listed field by its client-facing name.
    pub fn column(&self, field: &str) -> Result<&'static Column, FilterError> {
        self.columns()
            .iter()
            .find(|c| c.field == field)
            .ok_or_else(|| FilterError::UnknownField(field.to_string()))
    }
}

impl Column {
    /// Convert a decoded query value into a typed parameter for this column.
    pub fn parse_value(&self, raw: &str) -> Result<SqlParam, FilterError> {
        let invalid = || FilterError::InvalidValue {
            field: self.field.to_string(),
            value: raw.to_string(),
        };

        match self.kind {
            ColumnType::Text => Ok(SqlParam::Text(raw.to_string())),
            ColumnType::Integer => raw.trim().parse::<i64>().map(SqlParam::Integer).map_err(|_| invalid()),
            ColumnType::Float => match raw.trim().parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(SqlParam::Float(f)),
                _ => Err(invalid()),
            },
            ColumnType::Boolean => match raw.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "1" => Ok(SqlParam::Boolean(true)),
                "false" | "f" | "0" => Ok(SqlParam::Boolean(false)),
                _ => Err(invalid()),
            },
            ColumnType::Timestamp => DateTime::parse_from_rfc3339(raw.trim())
                .map(|t| SqlParam::Timestamp(t.with_timezone(&Utc)))
                .map_err(|_| invalid()),
        }
    }
}
