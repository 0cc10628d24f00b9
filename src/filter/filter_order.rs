use super::error::FilterError;
use super::fields::EntityKind;
use super::types::{FilterOrderInfo, SortDirection};

/// Validated ORDER BY keys; the first key is the primary sort.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterOrder {
    keys: Vec<FilterOrderInfo>,
}

impl FilterOrder {
    pub fn empty() -> Self {
        Self { keys: vec![] }
    }

    /// Parse `field[:direction]` tokens separated by commas.
    ///
    /// Direction defaults to ascending. Blank tokens are skipped and a field
    /// already listed keeps its first position.
    pub fn parse(entity: EntityKind, raw: &str) -> Result<Self, FilterError> {
        let mut keys: Vec<FilterOrderInfo> = Vec::new();

        for part in raw.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }

            let (field, direction) = match trimmed.split_once(':') {
                Some((field, direction)) => (field.trim(), Some(direction.trim())),
                None => (trimmed, None),
            };

            let column = entity.column(field)?;
            let sort = match direction {
                None => SortDirection::Asc,
                Some(d) => SortDirection::parse(d).ok_or_else(|| FilterError::InvalidDirection(d.to_string()))?,
            };

            if keys.iter().any(|k| k.field == column.field) {
                continue;
            }
            keys.push(FilterOrderInfo {
                field: column.field,
                column: column.sql,
                sort,
            });
        }

        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[FilterOrderInfo] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Render the keys without the `ORDER BY` keyword.
    pub fn generate(&self) -> String {
        self.keys
            .iter()
            .map(|k| format!("{} {}", k.column, k.sort.to_sql()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
