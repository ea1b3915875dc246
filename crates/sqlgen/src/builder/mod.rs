//! Incremental SELECT builder with named bind parameters.
//!
//! [`QueryBuilder`] collects clause fragments into ordered lists and renders
//! them in a fixed order: `SELECT`, `FROM`, `WHERE`, `GROUP BY`, `ORDER BY`,
//! then the trailing extra segment. Values are never interpolated; every value
//! added through a filter operation is bound under a `:name` placeholder derived
//! from its column name.
//!
//! # Trust boundary
//!
//! Raw fragment text (select expressions, tables, join conditions, plain WHERE
//! clauses, group/sort/extra segments) is emitted verbatim. It is **not** safe
//! to build any of it from untrusted input.
//!
//! # Example
//!
//! ```
//! use sqlgen::QueryBuilder;
//!
//! let mut qb = QueryBuilder::new();
//! qb.add_select(["id", "name"]).add_from("users").add_sort("name");
//! qb.add_where([("active", true)])?;
//!
//! let query = qb.get_query();
//! assert_eq!(query.sql, "SELECT id, name FROM users WHERE active = :active ORDER BY name");
//! # Ok::<(), sqlgen::SqlGenError>(())
//! ```

use crate::config::{BuilderConfig, EmptyInList};
use crate::error::{SqlGenError, SqlGenResult};
use crate::fragment::IntoFragments;
use crate::query::BoundQuery;
use crate::value::Value;
use crate::where_input::WhereInput;
use std::collections::BTreeMap;

#[cfg(test)]
mod tests;

/// Bind parameter name to value.
pub type Parameters = BTreeMap<String, Value>;

/// Builds a single parameterized SELECT statement.
///
/// The builder only grows: there is no way to remove a clause or a parameter.
/// Rendering ([`generate_sql`](Self::generate_sql), [`get_query`](Self::get_query))
/// is side-effect free and may be repeated.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    selects: Vec<String>,
    froms: Vec<String>,
    wheres: Vec<String>,
    groups: Vec<String>,
    sorts: Vec<String>,
    extra: Vec<String>,
    parameters: Parameters,
    config: BuilderConfig,
}

impl QueryBuilder {
    /// Create an empty builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with a custom configuration.
    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Create a builder seeded with select expressions and plain FROM items.
    pub fn with_select_from(selects: impl IntoFragments, froms: impl IntoFragments) -> Self {
        let mut qb = Self::new();
        qb.add_select(selects);
        for table in froms.into_fragments() {
            qb.add_from(table);
        }
        qb
    }

    // ==================== Raw fragments ====================

    /// Append one select expression or a list of them.
    pub fn add_select(&mut self, exprs: impl IntoFragments) -> &mut Self {
        self.selects.extend(exprs.into_fragments());
        self
    }

    /// Append a plain FROM item (table name or subquery). No-op if empty.
    pub fn add_from(&mut self, table: impl Into<String>) -> &mut Self {
        let table = table.into();
        if !table.is_empty() {
            self.froms.push(table);
        }
        self
    }

    /// Append `"{join_type} {table} ON {on_clause}"` to the FROM list.
    ///
    /// Falls back to a plain FROM item when either `join_type` or `on_clause`
    /// is empty. No-op if `table` is empty.
    pub fn add_join(&mut self, table: &str, join_type: &str, on_clause: &str) -> &mut Self {
        if table.is_empty() {
            return self;
        }
        if join_type.is_empty() || on_clause.is_empty() {
            return self.add_from(table);
        }
        self.froms.push(format!("{join_type} {table} ON {on_clause}"));
        self
    }

    /// Append one GROUP BY expression or a list of them.
    pub fn add_group(&mut self, exprs: impl IntoFragments) -> &mut Self {
        self.groups.extend(exprs.into_fragments());
        self
    }

    /// Append one ORDER BY expression or a list of them.
    pub fn add_sort(&mut self, exprs: impl IntoFragments) -> &mut Self {
        self.sorts.extend(exprs.into_fragments());
        self
    }

    /// Append trailing clauses (e.g. `LIMIT 10`).
    ///
    /// Extra fragments are joined with `", "` when rendered, so more than one
    /// fragment usually produces invalid SQL. Add a single combined fragment
    /// such as `"LIMIT 10 OFFSET 20"` instead.
    pub fn add_extra(&mut self, exprs: impl IntoFragments) -> &mut Self {
        self.extra.extend(exprs.into_fragments());
        self
    }

    // ==================== WHERE ====================

    /// Add a WHERE condition where every mapped value is required.
    ///
    /// - A plain clause is appended verbatim.
    /// - A mapping appends `<key> = :<key>` for each entry and binds its value.
    ///   A [`Value::Null`] entry fails with [`SqlGenError::MissingValue`];
    ///   entries before it stay applied.
    pub fn add_where(&mut self, input: impl Into<WhereInput>) -> SqlGenResult<&mut Self> {
        match input.into() {
            WhereInput::Clause(clause) => self.push_clause(clause),
            WhereInput::Params(entries) => {
                for (key, value) in entries {
                    if value.is_null() {
                        return Err(SqlGenError::missing_value(key));
                    }
                    self.push_equals(key, value);
                }
            }
        }
        Ok(self)
    }

    /// Same as [`add_where`](Self::add_where), except that [`Value::Null`]
    /// entries are skipped without adding a clause or a parameter.
    pub fn add_optional_where(&mut self, input: impl Into<WhereInput>) -> &mut Self {
        match input.into() {
            WhereInput::Clause(clause) => self.push_clause(clause),
            WhereInput::Params(entries) => {
                for (key, value) in entries {
                    if !value.is_null() {
                        self.push_equals(key, value);
                    }
                }
            }
        }
        self
    }

    fn push_clause(&mut self, clause: String) {
        if !clause.is_empty() {
            self.wheres.push(clause);
        }
    }

    fn push_equals(&mut self, key: String, value: Value) {
        self.wheres.push(format!("{key} = :{key}"));
        self.bind(key, value);
    }

    /// Add `<column> <operator> :<column>` with a required value.
    ///
    /// When `operator` is `in` (any case) and `value` is a [`Value::List`],
    /// one placeholder per element is generated instead:
    /// `<column> IN (:<column>_0, :<column>_1, ...)`.
    ///
    /// Fails with [`SqlGenError::MissingValue`] if `value` is [`Value::Null`].
    pub fn add_where_with_operator(
        &mut self,
        column: &str,
        value: impl Into<Value>,
        operator: &str,
    ) -> SqlGenResult<&mut Self> {
        let value = value.into();
        if value.is_null() {
            return Err(SqlGenError::missing_value(column));
        }
        self.push_operator(column, value, operator);
        Ok(self)
    }

    /// Same as [`add_where_with_operator`](Self::add_where_with_operator), but a
    /// [`Value::Null`] value is accepted.
    ///
    /// The clause is still emitted and NULL is bound under the given operator,
    /// so `col = :col` never matches. Use
    /// [`add_optional_where`](Self::add_optional_where) to skip absent values.
    pub fn add_optional_where_with_operator(
        &mut self,
        column: &str,
        value: impl Into<Value>,
        operator: &str,
    ) -> &mut Self {
        self.push_operator(column, value.into(), operator);
        self
    }

    fn push_operator(&mut self, column: &str, value: Value, operator: &str) {
        let clause = match value {
            Value::List(items) if operator.eq_ignore_ascii_case("in") => {
                self.in_clause(column, items)
            }
            value => {
                self.bind(column.to_string(), value);
                format!("{column} {operator} :{column}")
            }
        };
        self.wheres.push(clause);
    }

    /// Add `<column> IN (:<column>_0, ...)` binding every element.
    pub fn add_where_in<I, V>(&mut self, column: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let clause = self.in_clause(column, values.into_iter().map(Into::into).collect());
        self.wheres.push(clause);
        self
    }

    fn in_clause(&mut self, column: &str, items: Vec<Value>) -> String {
        if items.is_empty() && self.config.empty_in == EmptyInList::AlwaysFalse {
            return "1=0".to_string();
        }

        let mut placeholders = Vec::with_capacity(items.len());
        for (i, item) in items.into_iter().enumerate() {
            let name = format!("{column}_{i}");
            placeholders.push(format!(":{name}"));
            self.bind(name, item);
        }
        format!("{column} IN ({})", placeholders.join(", "))
    }

    /// Append `<column> is not null` for one column or a list of them.
    pub fn add_where_not_null(&mut self, columns: impl IntoFragments) -> &mut Self {
        for column in columns.into_fragments() {
            self.wheres.push(format!("{column} is not null"));
        }
        self
    }

    fn bind(&mut self, name: String, value: Value) {
        let warn = self.config.warn_on_collision;
        if let Some(previous) = self.parameters.insert(name.clone(), value) {
            if warn {
                tracing::warn!(
                    target: "sqlgen::builder",
                    parameter = %name,
                    previous = ?previous,
                    "bind parameter overwritten; earlier clauses now reference the new value"
                );
            }
        }
    }

    // ==================== Rendering ====================

    /// Render the SQL text.
    pub fn generate_sql(&self) -> String {
        let mut query = String::new();
        push_segment(&mut query, "SELECT ", &self.selects, ", ");
        push_segment(&mut query, "FROM ", &self.froms, ", ");
        push_segment(&mut query, "WHERE ", &self.wheres, " AND ");
        push_segment(&mut query, "GROUP BY ", &self.groups, ", ");
        push_segment(&mut query, "ORDER BY ", &self.sorts, ", ");
        // Extra has no keyword, only an additional leading space.
        push_segment(&mut query, " ", &self.extra, ", ");

        let sql = query.trim().to_string();
        tracing::trace!(
            target: "sqlgen::builder",
            sql = %sql,
            params = self.parameters.len(),
            "rendered query"
        );
        sql
    }

    /// The name → value mapping accumulated so far.
    pub fn get_parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// SQL text and parameters together, ready for a driver.
    pub fn get_query(&self) -> BoundQuery {
        BoundQuery::new(self.generate_sql(), self.parameters.clone())
    }

    // ==================== Accessors ====================

    pub fn selects(&self) -> &[String] {
        &self.selects
    }

    pub fn froms(&self) -> &[String] {
        &self.froms
    }

    pub fn wheres(&self) -> &[String] {
        &self.wheres
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn sorts(&self) -> &[String] {
        &self.sorts
    }

    pub fn extra(&self) -> &[String] {
        &self.extra
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// True when nothing has been added yet.
    pub fn is_empty(&self) -> bool {
        self.selects.is_empty()
            && self.froms.is_empty()
            && self.wheres.is_empty()
            && self.groups.is_empty()
            && self.sorts.is_empty()
            && self.extra.is_empty()
            && self.parameters.is_empty()
    }
}

fn push_segment(out: &mut String, keyword: &str, items: &[String], sep: &str) {
    if items.is_empty() {
        return;
    }
    out.push_str(keyword);
    out.push_str(&items.join(sep));
    out.push(' ');
}
