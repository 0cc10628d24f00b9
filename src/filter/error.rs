use thiserror::Error;

/// Rejections raised while compiling client query input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid sort direction: {0}")]
    InvalidDirection(String),

    #[error("Malformed query string: {0}")]
    MalformedQueryString(String),

    #[error("Operator {operator} is not supported on field {field}")]
    UnsupportedOperator { field: String, operator: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

impl FilterError {
    /// Stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FilterError::UnknownField(_) => "unknown_field",
            FilterError::InvalidDirection(_) => "invalid_direction",
            FilterError::MalformedQueryString(_) => "malformed_query_string",
            FilterError::UnsupportedOperator { .. } => "unsupported_operator",
            FilterError::InvalidValue { .. } => "invalid_value",
        }
    }
}
