use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};

use crate::filter::SqlParam;

/// Bind compiled parameters in placeholder order.
pub fn bind_params_as<'q, O>(
    mut q: QueryAs<'q, Postgres, O, PgArguments>,
    params: &'q [SqlParam],
) -> QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    for p in params {
        q = match p {
            SqlParam::Text(s) => q.bind(s.as_str()),
            SqlParam::Integer(i) => q.bind(*i),
            SqlParam::Float(f) => q.bind(*f),
            SqlParam::Boolean(b) => q.bind(*b),
            SqlParam::Timestamp(t) => q.bind(*t),
        };
    }
    q
}
