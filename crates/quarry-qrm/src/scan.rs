//! Scanner entry points.
//!
//! Executes a finalized statement against a connection and feeds the
//! result rows to the mapper. Two surfaces: the buffered `fetch_*`
//! functions decode the whole result set, and [`Rows`] yields one row
//! at a time for streaming consumption.

use crate::mapper::map_rows;
use crate::plan::{build_plan, GroupPlan};
use crate::shape::Record;
use quarry_core::{Connection, Cx, Error, FromValue, Outcome, Result, Row, Value};
use std::any::TypeId;
use std::collections::HashMap;

fn column_names(rows: &[Row]) -> Vec<String> {
    rows.first()
        .map(|row| row.column_info().names().to_vec())
        .unwrap_or_default()
}

fn decode_groups<R: Record>(rows: &[Row]) -> Result<Vec<R>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }
    let plan = build_plan(&R::shape(), &column_names(rows));
    let nodes = map_rows(&plan, rows)?;
    tracing::trace!(rows = rows.len(), groups = nodes.len(), "mapped result rows");
    nodes.iter().map(R::from_node).collect()
}

// Propagate non-Ok outcomes without losing the cancellation reason.
macro_rules! try_outcome {
    ($outcome:expr) => {
        match $outcome {
            Outcome::Ok(value) => value,
            Outcome::Err(error) => return Outcome::Err(error),
            Outcome::Cancelled(reason) => return Outcome::Cancelled(reason),
            Outcome::Panicked(payload) => return Outcome::Panicked(payload),
        }
    };
}

/// Execute a query and decode every top-level group.
///
/// Zero rows yield an empty vector. Rows must arrive ordered by the
/// outer group keys first, then inner keys; the mapper does not sort.
#[tracing::instrument(level = "debug", skip(cx, conn, params))]
pub async fn fetch_all<R, C>(
    cx: &Cx,
    conn: &C,
    sql: &str,
    params: &[Value],
) -> Outcome<Vec<R>, Error>
where
    R: Record,
    C: Connection,
{
    if let Some(reason) = cx.cancel_reason() {
        return Outcome::Cancelled(reason);
    }
    let rows = try_outcome!(conn.query(cx, sql, params).await);
    if let Some(reason) = cx.cancel_reason() {
        return Outcome::Cancelled(reason);
    }
    match decode_groups::<R>(&rows) {
        Ok(records) => Outcome::Ok(records),
        Err(error) => Outcome::Err(error),
    }
}

/// Execute a query and decode the first top-level group.
///
/// Additional rows keep hydrating that group's children; rows for
/// other top-level keys are ignored. Zero rows are the distinguished
/// no-rows error.
#[tracing::instrument(level = "debug", skip(cx, conn, params))]
pub async fn fetch_one<R, C>(
    cx: &Cx,
    conn: &C,
    sql: &str,
    params: &[Value],
) -> Outcome<R, Error>
where
    R: Record,
    C: Connection,
{
    if let Some(reason) = cx.cancel_reason() {
        return Outcome::Cancelled(reason);
    }
    let rows = try_outcome!(conn.query(cx, sql, params).await);
    if rows.is_empty() {
        return Outcome::Err(Error::NoRows);
    }
    let plan = build_plan(&R::shape(), &column_names(&rows));
    let nodes = match map_rows(&plan, &rows) {
        Ok(nodes) => nodes,
        Err(error) => return Outcome::Err(error),
    };
    // rows arrived but every group column was NULL: the destination
    // stays at its default, mirroring an absent optional group
    let Some(first) = nodes.first() else {
        return Outcome::Ok(R::default());
    };
    match R::from_node(first) {
        Ok(record) => Outcome::Ok(record),
        Err(error) => Outcome::Err(error),
    }
}

/// Execute a query and decode the first column of every row.
#[tracing::instrument(level = "debug", skip(cx, conn, params))]
pub async fn fetch_scalars<T, C>(
    cx: &Cx,
    conn: &C,
    sql: &str,
    params: &[Value],
) -> Outcome<Vec<T>, Error>
where
    T: FromValue,
    C: Connection,
{
    if let Some(reason) = cx.cancel_reason() {
        return Outcome::Cancelled(reason);
    }
    let rows = try_outcome!(conn.query(cx, sql, params).await);
    let mut values = Vec::with_capacity(rows.len());
    for row in &rows {
        match row.get_as::<T>(0) {
            Ok(value) => values.push(value),
            Err(error) => return Outcome::Err(error),
        }
    }
    Outcome::Ok(values)
}

/// A streaming view over a query's result rows.
///
/// `next` yields rows one at a time, re-checking cancellation on every
/// call; `scan` decodes a single row into a record (child groups are
/// grouped within that row only). Scan plans are derived once per
/// destination type and cached for the lifetime of the handle.
/// Dropping the handle releases the row buffer; so does cancellation.
pub struct Rows {
    rows: std::vec::IntoIter<Row>,
    columns: Vec<String>,
    plans: HashMap<TypeId, GroupPlan>,
}

impl Rows {
    /// Execute a query and stream its rows.
    pub async fn query<C: Connection>(
        cx: &Cx,
        conn: &C,
        sql: &str,
        params: &[Value],
    ) -> Outcome<Rows, Error> {
        if let Some(reason) = cx.cancel_reason() {
            return Outcome::Cancelled(reason);
        }
        let rows = try_outcome!(conn.query(cx, sql, params).await);
        let columns = column_names(&rows);
        Outcome::Ok(Rows {
            rows: rows.into_iter(),
            columns,
            plans: HashMap::new(),
        })
    }

    /// The result-set column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Yield the next row, if any.
    ///
    /// Cancellation is checked on every call; a cancelled context
    /// releases the remaining rows and propagates the reason.
    pub fn next(&mut self, cx: &Cx) -> Outcome<Option<Row>, Error> {
        if let Some(reason) = cx.cancel_reason() {
            self.rows = Vec::new().into_iter();
            return Outcome::Cancelled(reason);
        }
        Outcome::Ok(self.rows.next())
    }

    /// Decode one row into a record.
    pub fn scan<R: Record + 'static>(&mut self, row: &Row) -> Result<R> {
        let plan = self
            .plans
            .entry(TypeId::of::<R>())
            .or_insert_with(|| build_plan(&R::shape(), &self.columns));
        let nodes = map_rows(plan, std::slice::from_ref(row))?;
        match nodes.first() {
            Some(node) => R::from_node(node),
            None => Ok(R::default()),
        }
    }

    /// Release the remaining rows.
    pub fn close(self) {}
}
