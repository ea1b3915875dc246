//! # sqlgen
//!
//! Incremental SELECT builder with named bind parameters.
//!
//! ## Features
//!
//! - **Fragment lists**: SELECT/FROM/WHERE/GROUP BY/ORDER BY/extra clauses are
//!   collected in insertion order and rendered in a fixed order
//! - **Named parameters**: values are bound as `:name` and returned in a separate mapping
//! - **Required vs optional filters**: absent required values fail when the clause is added
//! - **IN expansion**: one placeholder per list element (`:col_0, :col_1, ...`)
//! - **Driver handoff**: `:name` → `$n` translation and execution over `tokio-postgres`
//! - **Declarative definitions**: build queries from TOML/JSON
//!
//! ```
//! use sqlgen::QueryBuilder;
//!
//! let mut qb = QueryBuilder::new();
//! qb.add_select(["id", "name"]).add_from("users");
//! qb.add_where_with_operator("id", vec![1, 2, 3], "in")?;
//!
//! let (sql, params): (String, sqlgen::Parameters) = qb.get_query().into();
//! assert_eq!(sql, "SELECT id, name FROM users WHERE id IN (:id_0, :id_1, :id_2)");
//! assert_eq!(params.len(), 3);
//! # Ok::<(), sqlgen::SqlGenError>(())
//! ```
//!
//! Raw fragment text is trusted and emitted verbatim. Only values passed to the
//! filter operations are bound.

pub mod builder;
pub mod client;
pub mod config;
pub mod definition;
pub mod error;
pub mod fragment;
pub mod positional;
pub mod query;
pub mod value;
pub mod where_input;

pub use builder::{Parameters, QueryBuilder};
pub use client::GenericClient;
pub use config::{BuilderConfig, EmptyInList};
pub use definition::{FilterDefinition, JoinDefinition, QueryDefinition};
pub use error::{SqlGenError, SqlGenResult};
pub use fragment::{IntoFragments, concat_sql};
pub use positional::{PositionalQuery, named_to_positional};
pub use query::BoundQuery;
pub use value::Value;
pub use where_input::WhereInput;
