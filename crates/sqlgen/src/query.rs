//! Rendered query handed to a driver.

use crate::builder::Parameters;
use crate::client::GenericClient;
use crate::error::SqlGenResult;
use crate::positional::{PositionalQuery, named_to_positional};
use tokio_postgres::Row;

/// SQL text with `:name` placeholders plus the values bound to them.
///
/// Produced by [`QueryBuilder::get_query`](crate::QueryBuilder::get_query).
#[derive(Debug, Clone, PartialEq)]
pub struct BoundQuery {
    pub sql: String,
    pub params: Parameters,
}

impl BoundQuery {
    pub fn new(sql: impl Into<String>, params: Parameters) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Translate into `$n` placeholders for positional drivers.
    pub fn to_positional(&self) -> SqlGenResult<PositionalQuery> {
        named_to_positional(&self.sql, &self.params)
    }

    /// Execute and return all rows.
    pub async fn fetch_all(&self, conn: &impl GenericClient) -> SqlGenResult<Vec<Row>> {
        let q = self.to_positional()?;
        conn.query(&q.sql, &q.params_ref()).await
    }

    /// Execute and return the first row, failing with `NotFound` on zero rows.
    pub async fn fetch_one(&self, conn: &impl GenericClient) -> SqlGenResult<Row> {
        let q = self.to_positional()?;
        conn.query_one(&q.sql, &q.params_ref()).await
    }

    /// Execute and return the first row, if any.
    pub async fn fetch_opt(&self, conn: &impl GenericClient) -> SqlGenResult<Option<Row>> {
        let q = self.to_positional()?;
        conn.query_opt(&q.sql, &q.params_ref()).await
    }

    /// Execute and return the affected row count.
    pub async fn execute(&self, conn: &impl GenericClient) -> SqlGenResult<u64> {
        let q = self.to_positional()?;
        conn.execute(&q.sql, &q.params_ref()).await
    }
}

impl From<BoundQuery> for (String, Parameters) {
    fn from(q: BoundQuery) -> Self {
        (q.sql, q.params)
    }
}
