use std::collections::HashSet;

use super::error::FilterError;
use super::fields::{ColumnType, EntityKind};
use super::types::{FilterOp, FilterWhereInfo, SqlParam, SqlResult};

/// Validated WHERE conditions for one entity, joined with `AND`.
///
/// Column text comes only from the entity allow-list; client values only ever
/// reach SQL as positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterWhere {
    entity: EntityKind,
    conditions: Vec<FilterWhereInfo>,
}

impl FilterWhere {
    pub fn empty(entity: EntityKind) -> Self {
        Self {
            entity,
            conditions: vec![],
        }
    }

    /// Build conditions from decoded `(key, value)` pairs in order.
    ///
    /// Only the first occurrence of a key is used. Any unknown field,
    /// unsupported operator or unparsable value rejects the whole input.
    pub fn from_pairs<'a, I>(entity: EntityKind, pairs: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut conditions = Vec::new();

        for (key, value) in pairs {
            if !seen.insert(key) {
                continue;
            }

            let (field, operator) = FilterOp::split_key(key);
            let column = entity.column(field)?;

            if operator.is_pattern() && column.kind != ColumnType::Text {
                return Err(FilterError::UnsupportedOperator {
                    field: column.field.to_string(),
                    operator: operator.suffix().to_string(),
                });
            }

            let data = match (operator, column.parse_value(value)?) {
                (FilterOp::Contains, SqlParam::Text(s)) => SqlParam::Text(format!("%{}%", escape_like(&s))),
                (_, parsed) => parsed,
            };

            conditions.push(FilterWhereInfo {
                field: column.field,
                column: column.sql,
                operator,
                data,
            });
        }

        Ok(Self { entity, conditions })
    }

    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    pub fn conditions(&self) -> &[FilterWhereInfo] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Render the conditions without the `WHERE` keyword.
    ///
    /// Placeholders continue after `starting_param_index`, so `0` yields
    /// `$1, $2, ...`. No conditions yields an empty query and no params.
    pub fn generate(&self, starting_param_index: usize) -> SqlResult {
        let mut params = Vec::with_capacity(self.conditions.len());
        let mut parts = Vec::with_capacity(self.conditions.len());

        for condition in &self.conditions {
            params.push(condition.data.clone());
            parts.push(format!(
                "{} {} ${}",
                condition.column,
                condition.operator.to_sql(),
                starting_param_index + params.len()
            ));
        }

        SqlResult {
            query: parts.join(" AND "),
            params,
        }
    }
}

/// Escape LIKE metacharacters so a `__contains` value matches literally.
fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
