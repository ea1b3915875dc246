//! Generic client trait for executing rendered queries.

use crate::error::{SqlGenError, SqlGenResult};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A trait that unifies database clients and transactions.
///
/// Connection lifecycle (connect, commit, rollback, close) stays with the
/// caller; this trait only runs statements.
pub trait GenericClient: Send + Sync {
    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SqlGenResult<Vec<Row>>> + Send;

    /// Execute a statement and return the affected row count.
    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SqlGenResult<u64>> + Send;

    /// Execute a query and return the **first** row.
    ///
    /// Returns [`SqlGenError::NotFound`] if no rows are returned; extra rows are ignored.
    fn query_one(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SqlGenResult<Row>> + Send {
        async move {
            let rows = self.query(sql, params).await?;
            rows.into_iter()
                .next()
                .ok_or_else(|| SqlGenError::not_found("Expected one row, got none"))
        }
    }

    /// Execute a query and return the first row, if any.
    fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = SqlGenResult<Option<Row>>> + Send {
        async move {
            let rows = self.query(sql, params).await?;
            Ok(rows.into_iter().next())
        }
    }
}

impl GenericClient for tokio_postgres::Client {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlGenResult<Vec<Row>> {
        tracing::debug!(target: "sqlgen::client", sql, params = params.len(), "query");
        Ok(tokio_postgres::Client::query(self, sql, params).await?)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlGenResult<u64> {
        tracing::debug!(target: "sqlgen::client", sql, params = params.len(), "execute");
        Ok(tokio_postgres::Client::execute(self, sql, params).await?)
    }
}

impl GenericClient for tokio_postgres::Transaction<'_> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlGenResult<Vec<Row>> {
        tracing::debug!(target: "sqlgen::client", sql, params = params.len(), "query (tx)");
        Ok(tokio_postgres::Transaction::query(self, sql, params).await?)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> SqlGenResult<u64> {
        tracing::debug!(target: "sqlgen::client", sql, params = params.len(), "execute (tx)");
        Ok(tokio_postgres::Transaction::execute(self, sql, params).await?)
    }
}
