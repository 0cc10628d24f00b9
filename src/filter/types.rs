use chrono::{DateTime, Utc};

/// Comparison selected by a key suffix such as `capacity__gte`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    Contains,
}

impl FilterOp {
    const SUFFIXES: [(&'static str, FilterOp); 7] = [
        ("__ne", FilterOp::Ne),
        ("__gt", FilterOp::Gt),
        ("__gte", FilterOp::Gte),
        ("__lt", FilterOp::Lt),
        ("__lte", FilterOp::Lte),
        ("__like", FilterOp::Like),
        ("__contains", FilterOp::Contains),
    ];

    /// Split a query key into field name and operator.
    ///
    /// A key without a recognised suffix is returned whole with `Eq`, so an
    /// unknown suffix ends up failing the field allow-list.
    pub fn split_key(key: &str) -> (&str, FilterOp) {
        for (suffix, op) in Self::SUFFIXES {
            if let Some(field) = key.strip_suffix(suffix) {
                if !field.is_empty() {
                    return (field, op);
                }
            }
        }
        (key, FilterOp::Eq)
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            FilterOp::Eq => "",
            FilterOp::Ne => "__ne",
            FilterOp::Gt => "__gt",
            FilterOp::Gte => "__gte",
            FilterOp::Lt => "__lt",
            FilterOp::Lte => "__lte",
            FilterOp::Like => "__like",
            FilterOp::Contains => "__contains",
        }
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Ne => "<>",
            FilterOp::Gt => ">",
            FilterOp::Gte => ">=",
            FilterOp::Lt => "<",
            FilterOp::Lte => "<=",
            FilterOp::Like => "LIKE",
            FilterOp::Contains => "ILIKE",
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, FilterOp::Like | FilterOp::Contains)
    }
}

/// A value bound as a positional parameter, typed from the column it targets.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Timestamp(DateTime<Utc>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("asc") {
            Some(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Some(SortDirection::Desc)
        } else {
            None
        }
    }

    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// One accepted `(field, operator, value)` triple.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterWhereInfo {
    pub field: &'static str,
    pub column: &'static str,
    pub operator: FilterOp,
    pub data: SqlParam,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOrderInfo {
    pub field: &'static str,
    pub column: &'static str,
    pub sort: SortDirection,
}

/// SQL text plus the values for its placeholders, in placeholder order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<SqlParam>,
}
