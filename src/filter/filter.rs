use super::error::FilterError;
use super::fields::EntityKind;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::query_string::parse_query_string;
use super::types::{SqlParam, SqlResult};

/// Query-string key reserved for the sort specification on list routes.
pub const SORT_KEY: &str = "sort";

/// Compile a raw query string into a WHERE fragment (without the keyword)
/// and its bound values, numbered from `$1`.
pub fn compile_filter(entity: EntityKind, raw_query: &str) -> Result<SqlResult, FilterError> {
    let pairs = parse_query_string(raw_query)?;
    let filter = FilterWhere::from_pairs(entity, pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
    Ok(filter.generate(0))
}

/// Compile a `field[:direction],...` sort string into an ORDER BY fragment
/// (without the keyword).
pub fn compile_sort(entity: EntityKind, raw_sort: &str) -> Result<String, FilterError> {
    Ok(FilterOrder::parse(entity, raw_sort)?.generate())
}

/// Filter and sort for one list request, compiled from the URL query string.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filter: FilterWhere,
    pub order: FilterOrder,
}

impl ListQuery {
    /// No conditions, storage order.
    pub fn all(entity: EntityKind) -> Self {
        Self {
            filter: FilterWhere::empty(entity),
            order: FilterOrder::empty(),
        }
    }

    /// Split the reserved `sort` key from the filter pairs and compile both.
    pub fn parse(entity: EntityKind, raw_query: &str) -> Result<Self, FilterError> {
        let pairs = parse_query_string(raw_query)?;

        let sort = pairs
            .iter()
            .find(|(k, _)| k == SORT_KEY)
            .map(|(_, v)| v.as_str())
            .unwrap_or("");
        let order = FilterOrder::parse(entity, sort)?;

        let filter = FilterWhere::from_pairs(
            entity,
            pairs
                .iter()
                .filter(|(k, _)| k != SORT_KEY)
                .map(|(k, v)| (k.as_str(), v.as_str())),
        )?;

        Ok(Self { filter, order })
    }

    pub fn entity(&self) -> EntityKind {
        self.filter.entity()
    }

    /// Append the compiled clauses to a fixed base `SELECT`.
    ///
    /// `base_where` is a trusted condition owned by the caller whose
    /// placeholders are `$1..=base_params.len()`; compiled placeholders
    /// continue after them.
    pub fn to_sql(&self, base_select: &str, base_where: Option<&str>, base_params: Vec<SqlParam>) -> SqlResult {
        let compiled = self.filter.generate(base_params.len());

        let conditions: Vec<&str> = base_where
            .into_iter()
            .chain(Some(compiled.query.as_str()).filter(|q| !q.is_empty()))
            .collect();

        let mut query = base_select.to_string();
        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        if !self.order.is_empty() {
            query.push_str(" ORDER BY ");
            query.push_str(&self.order.generate());
        }

        let mut params = base_params;
        params.extend(compiled.params);
        SqlResult { query, params }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_is_list_all() {
        let sql = compile_filter(EntityKind::Account, "").unwrap();
        assert_eq!(sql.query, "");
        assert!(sql.params.is_empty());
    }

    #[test]
    fn single_equality_binds_one_value() {
        let sql = compile_filter(EntityKind::Account, "username=alice").unwrap();
        assert_eq!(sql.query, r#""account"."username" = $1"#);
        assert_eq!(sql.params, vec![SqlParam::Text("alice".into())]);
    }

    #[test]
    fn unlisted_field_is_rejected() {
        assert_eq!(
            compile_filter(EntityKind::Account, "nickname=alice"),
            Err(FilterError::UnknownField("nickname".into()))
        );
    }

    #[test]
    fn injection_attempt_is_bound_verbatim() {
        let benign = compile_filter(EntityKind::Account, "username=alice").unwrap();
        let hostile = compile_filter(EntityKind::Account, "username=alice%27%20OR%201=1").unwrap();

        assert_eq!(hostile.query, benign.query);
        assert_eq!(hostile.params, vec![SqlParam::Text("alice' OR 1=1".into())]);
    }

    #[test]
    fn sort_compiles_in_given_order() {
        assert_eq!(
            compile_sort(EntityKind::Event, "start_at:desc,name").unwrap(),
            r#""event"."start_at" DESC, "event"."name" ASC"#
        );
    }

    #[test]
    fn list_query_separates_sort_from_filters() {
        let query = ListQuery::parse(EntityKind::Event, "location_city=Berlin&sort=start_at:desc").unwrap();
        let sql = query.to_sql("SELECT * FROM event", None, vec![]);

        assert_eq!(
            sql.query,
            r#"SELECT * FROM event WHERE "event"."location_city" = $1 ORDER BY "event"."start_at" DESC"#
        );
        assert_eq!(sql.params, vec![SqlParam::Text("Berlin".into())]);
    }

    #[test]
    fn list_query_rejects_bad_sort() {
        assert_eq!(
            ListQuery::parse(EntityKind::Event, "sort=name:up"),
            Err(FilterError::InvalidDirection("up".into()))
        );
    }

    #[test]
    fn base_condition_params_come_first() {
        let query = ListQuery::parse(EntityKind::Ticket, "event_name=Rave&sort=purchased_at").unwrap();
        let sql = query.to_sql(
            "SELECT * FROM ticket",
            Some(r#""ticket"."owner_id" = $1"#),
            vec![SqlParam::Integer(5)],
        );

        assert_eq!(
            sql.query,
            r#"SELECT * FROM ticket WHERE "ticket"."owner_id" = $1 AND "event"."name" = $2 ORDER BY "ticket"."purchased_at" ASC"#
        );
        assert_eq!(sql.params, vec![SqlParam::Integer(5), SqlParam::Text("Rave".into())]);
    }

    #[test]
    fn list_all_leaves_base_untouched() {
        let sql = ListQuery::all(EntityKind::Account).to_sql("SELECT * FROM account", None, vec![]);
        assert_eq!(sql.query, "SELECT * FROM account");
        assert!(sql.params.is_empty());
    }
}
