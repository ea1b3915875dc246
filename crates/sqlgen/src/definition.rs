//! Declarative query definitions.
//!
//! A [`QueryDefinition`] describes a query as data (TOML or JSON) and replays it
//! through the public [`QueryBuilder`] operations, so validation behaves exactly
//! as with hand-written builder calls.
//!
//! ```toml
//! select = ["id", "name"]
//! from = ["users"]
//! where = [{ active = true }, "deleted_at is null"]
//! order_by = ["name"]
//!
//! [[joins]]
//! table = "orders"
//! join_type = "LEFT JOIN"
//! on = "orders.user_id = users.id"
//!
//! [[filters]]
//! column = "id"
//! op = "in"
//! value = [1, 2, 3]
//! ```

use crate::builder::QueryBuilder;
use crate::config::BuilderConfig;
use crate::error::{SqlGenError, SqlGenResult};
use crate::value::Value;
use crate::where_input::WhereInput;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JoinDefinition {
    pub table: String,
    pub join_type: String,
    pub on: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterDefinition {
    pub column: String,
    #[serde(default = "default_op")]
    pub op: String,
    /// Absent means [`Value::Null`].
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(default)]
    pub optional: bool,
}

fn default_op() -> String {
    "=".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryDefinition {
    pub select: Vec<String>,
    pub from: Vec<String>,
    pub joins: Vec<JoinDefinition>,
    /// Plain clauses (strings) or required mappings (tables).
    #[serde(rename = "where")]
    pub wheres: Vec<serde_json::Value>,
    /// Like `where`, but absent values are skipped.
    pub optional_where: Vec<serde_json::Value>,
    pub filters: Vec<FilterDefinition>,
    pub not_null: Vec<String>,
    pub group_by: Vec<String>,
    pub order_by: Vec<String>,
    pub extra: Vec<String>,
}

impl QueryDefinition {
    pub fn from_toml_str(raw: &str) -> SqlGenResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_json_str(raw: &str) -> SqlGenResult<Self> {
        serde_json::from_str(raw).map_err(|e| SqlGenError::Config(e.to_string()))
    }

    /// Read a definition file; `.json` files are parsed as JSON, anything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> SqlGenResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SqlGenError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&raw),
            _ => Self::from_toml_str(&raw),
        }
    }

    /// Replay the definition into a fresh builder.
    ///
    /// Order: select, from, joins, where, optional_where, filters, not_null,
    /// group_by, order_by, extra.
    pub fn build(&self, config: BuilderConfig) -> SqlGenResult<QueryBuilder> {
        let mut qb = QueryBuilder::with_config(config);

        qb.add_select(self.select.clone());
        for table in &self.from {
            qb.add_from(table.as_str());
        }
        for join in &self.joins {
            qb.add_join(&join.table, &join.join_type, &join.on);
        }
        for input in &self.wheres {
            qb.add_where(WhereInput::try_from(input.clone())?)?;
        }
        for input in &self.optional_where {
            qb.add_optional_where(WhereInput::try_from(input.clone())?);
        }
        for filter in &self.filters {
            let value = Value::from(filter.value.clone());
            if filter.optional {
                qb.add_optional_where_with_operator(&filter.column, value, &filter.op);
            } else {
                qb.add_where_with_operator(&filter.column, value, &filter.op)?;
            }
        }
        qb.add_where_not_null(self.not_null.clone())
            .add_group(self.group_by.clone())
            .add_sort(self.order_by.clone())
            .add_extra(self.extra.clone());

        tracing::debug!(
            target: "sqlgen::definition",
            wheres = qb.wheres().len(),
            params = qb.get_parameters().len(),
            "built query from definition"
        );
        Ok(qb)
    }
}
