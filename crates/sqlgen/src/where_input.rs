//! WHERE clause input: a raw boolean expression or a column/value mapping.

use crate::error::{SqlGenError, SqlGenResult};
use crate::value::Value;
use std::collections::BTreeMap;

/// Argument accepted by [`QueryBuilder::add_where`](crate::QueryBuilder::add_where).
///
/// - `Clause` is appended verbatim (no binding, the text is trusted).
/// - `Params` becomes one `<column> = :<column>` condition per entry, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum WhereInput {
    Clause(String),
    Params(Vec<(String, Value)>),
}

impl WhereInput {
    /// Empty clause text or an empty mapping.
    pub fn is_empty(&self) -> bool {
        match self {
            WhereInput::Clause(s) => s.is_empty(),
            WhereInput::Params(p) => p.is_empty(),
        }
    }
}

impl From<&str> for WhereInput {
    fn from(clause: &str) -> Self {
        WhereInput::Clause(clause.to_string())
    }
}

impl From<String> for WhereInput {
    fn from(clause: String) -> Self {
        WhereInput::Clause(clause)
    }
}

impl<K: Into<String>, V: Into<Value>> From<Vec<(K, V)>> for WhereInput {
    fn from(entries: Vec<(K, V)>) -> Self {
        WhereInput::Params(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for WhereInput {
    fn from(entries: [(K, V); N]) -> Self {
        WhereInput::Params(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for WhereInput {
    fn from(entries: BTreeMap<K, V>) -> Self {
        WhereInput::Params(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Dynamic input, e.g. from a query definition file.
///
/// Strings are clauses, objects are mappings (in document order),
/// `null` is treated as empty. Anything else is rejected.
impl TryFrom<serde_json::Value> for WhereInput {
    type Error = SqlGenError;

    fn try_from(value: serde_json::Value) -> SqlGenResult<Self> {
        match value {
            serde_json::Value::Null => Ok(WhereInput::Params(Vec::new())),
            serde_json::Value::String(s) => Ok(WhereInput::Clause(s)),
            serde_json::Value::Object(map) => Ok(WhereInput::Params(
                map.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
            )),
            other => Err(SqlGenError::invalid_argument(format!(
                "WHERE input must be a string (plain clause) or an object (parameterised clause), got {}",
                json_kind(&other)
            ))),
        }
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
