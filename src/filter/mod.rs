pub mod error;
pub mod fields;
pub mod filter;
pub mod filter_order;
pub mod filter_where;
pub mod query_string;
pub mod types;

pub use error::FilterError;
pub use fields::{Column, ColumnType, EntityKind};
pub use filter::{compile_filter, compile_sort, ListQuery};
pub use filter_order::FilterOrder;
pub use filter_where::FilterWhere;
pub use types::*;
