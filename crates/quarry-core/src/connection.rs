//! Database connection trait.
//!
//! The builder and mapper are connection-agnostic: drivers implement
//! [`Connection`] and everything above executes through it. All
//! operations are async and take a `Cx` context for cancellation
//! support; implementations must be `Send + Sync` for use across async
//! boundaries.

use crate::dialect::Dialect;
use crate::error::Error;
use crate::row::Row;
use crate::value::Value;
use asupersync::{Cx, Outcome};
use std::future::Future;

/// A database connection capable of executing queries.
///
/// # Example
///
/// ```rust,ignore
/// let rows = conn.query(&cx, "SELECT * FROM film WHERE film_id = $1", &[Value::Int(1)]).await;
/// ```
pub trait Connection: Send + Sync {
    /// The dialect this connection speaks, used to finalize statements.
    fn dialect(&self) -> Dialect;

    /// Execute a query and return all rows.
    fn query(
        &self,
        cx: &Cx,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = Outcome<Vec<Row>, Error>> + Send;

    /// Execute a query and return the first row, if any.
    fn query_one(
        &self,
        cx: &Cx,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = Outcome<Option<Row>, Error>> + Send;

    /// Execute a statement (INSERT, UPDATE, DELETE) and return rows affected.
    fn execute(
        &self,
        cx: &Cx,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = Outcome<u64, Error>> + Send;
}
