//! Error types for sqlgen

use thiserror::Error;

/// Result type alias for sqlgen operations
pub type SqlGenResult<T> = Result<T, SqlGenError>;

/// Errors raised while building, translating or executing a query.
///
/// Builder errors are raised at the point the offending clause is added;
/// rendering itself never fails.
#[derive(Debug, Error)]
pub enum SqlGenError {
    /// A required filter value was absent (`Value::Null`)
    #[error("Value for required parameter '{column}' is missing.")]
    MissingValue { column: String },

    /// WHERE input was neither a plain clause nor a name/value mapping
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A `:name` placeholder has no bound value
    #[error("Unbound parameter: ':{0}' has no value in the parameter mapping")]
    UnboundParameter(String),

    /// Configuration or query definition could not be parsed
    #[error("Config error: {0}")]
    Config(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),
}

impl SqlGenError {
    /// Create a missing-value error for a specific column
    pub fn missing_value(column: impl Into<String>) -> Self {
        Self::MissingValue {
            column: column.into(),
        }
    }

    /// Create an invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Check if this is a missing-value error
    pub fn is_missing_value(&self) -> bool {
        matches!(self, Self::MissingValue { .. })
    }

    /// Check if this is an invalid-argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// The column named by a [`SqlGenError::MissingValue`] error.
    pub fn missing_column(&self) -> Option<&str> {
        match self {
            Self::MissingValue { column } => Some(column),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for SqlGenError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
