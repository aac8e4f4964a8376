//! Quarry - a type-safe SQL builder and query-result mapper.
//!
//! Statements are built from a composable expression algebra over
//! generated table handles, serialized per dialect with bound
//! parameters, and executed through a [`Connection`]; result rows are
//! decoded into arbitrarily nested record trees, deduplicating parents
//! by primary key and grouping child collections.
//!
//! # Quick Start
//!
//! ```ignore
//! use quarry::prelude::*;
//!
//! async fn example(cx: &Cx, conn: &impl Connection) {
//!     // `FilmTable` and `Film` come from the schema generator
//!     let film = FilmTable::new();
//!     let stmt = film
//!         .table
//!         .select(film.table.all_columns())
//!         .filter(film.film_id.clone().eq(IntExpr::param(1)))
//!         .order_by(film.film_id.clone().asc());
//!
//!     let films: Vec<Film> = match stmt.fetch_all(cx, conn).await {
//!         Outcome::Ok(films) => films,
//!         other => panic!("query failed: {other:?}"),
//!     };
//! }
//! ```
//!
//! Rows feeding a nested destination must be ordered by the outer
//! group keys first, then inner keys; the mapper does not sort.

use std::future::Future;

pub use quarry_core::{
    BuildError, CoerceError, ColumnInfo, Connection, Cx, Dialect, Error, ExecError, FromValue,
    Outcome, PlaceholderStyle, Result, Row, SerializeError, ShapeError, Value,
};

pub use quarry_query::{
    funcs, BinaryOp, CaseBuilder, CastKind, Column, ColumnRef, Cte, DeleteStatement, Expr,
    Expression, InsertStatement, JoinType, LockMode, LockStatement, NullsOrder, NumericExpression,
    OnConflict, OrderDirection, OrderedExpression, OrderTerm, Rendered, RowLock, SelectItem,
    SelectStatement, SetOpKind, SetStatement, SqlWriter, Statement, Table, UnaryOp,
    UpdateStatement, WindowDef,
};

pub use quarry_query::{
    boolean, bytes, date, float, int, interval, null, param, text, time, timestamp,
    timestamp_tz, AnyExpr, BoolExpr, BytesExpr, DateExpr, FloatExpr, IntExpr, IntervalExpr,
    NumericExpr, RangeExpr, RowExpr, TextExpr, TimeExpr, TimestampExpr, TimestampTzExpr,
};

pub use quarry_qrm::{
    fetch_all, fetch_one, fetch_scalars, FieldNode, FieldShape, GroupNode, Record, RecordShape,
    Rows, Slot, Strategy,
};

/// Fetch helpers wiring statement finalization to the result mapper.
///
/// The statement is finalized for the connection's dialect, executed,
/// and the rows decoded into the requested destination.
pub trait FetchStatement: Statement + Sync {
    /// Execute and decode every top-level group.
    fn fetch_all<'a, R, C>(
        &'a self,
        cx: &'a Cx,
        conn: &'a C,
    ) -> impl Future<Output = Outcome<Vec<R>, Error>> + Send + 'a
    where
        R: Record + Send,
        C: Connection,
    {
        async move {
            let rendered = match self.finalize(conn.dialect()) {
                Ok(rendered) => rendered,
                Err(error) => return Outcome::Err(error),
            };
            quarry_qrm::fetch_all::<R, C>(cx, conn, &rendered.sql, &rendered.args).await
        }
    }

    /// Execute and decode the first top-level group; zero rows are the
    /// distinguished no-rows error.
    fn fetch_one<'a, R, C>(
        &'a self,
        cx: &'a Cx,
        conn: &'a C,
    ) -> impl Future<Output = Outcome<R, Error>> + Send + 'a
    where
        R: Record + Send,
        C: Connection,
    {
        async move {
            let rendered = match self.finalize(conn.dialect()) {
                Ok(rendered) => rendered,
                Err(error) => return Outcome::Err(error),
            };
            quarry_qrm::fetch_one::<R, C>(cx, conn, &rendered.sql, &rendered.args).await
        }
    }

    /// Execute and decode the first column of every row.
    fn fetch_scalars<'a, T, C>(
        &'a self,
        cx: &'a Cx,
        conn: &'a C,
    ) -> impl Future<Output = Outcome<Vec<T>, Error>> + Send + 'a
    where
        T: FromValue + Send,
        C: Connection,
    {
        async move {
            let rendered = match self.finalize(conn.dialect()) {
                Ok(rendered) => rendered,
                Err(error) => return Outcome::Err(error),
            };
            quarry_qrm::fetch_scalars::<T, C>(cx, conn, &rendered.sql, &rendered.args).await
        }
    }

    /// Execute and stream the result rows.
    fn fetch_rows<'a, C>(
        &'a self,
        cx: &'a Cx,
        conn: &'a C,
    ) -> impl Future<Output = Outcome<Rows, Error>> + Send + 'a
    where
        C: Connection,
    {
        async move {
            let rendered = match self.finalize(conn.dialect()) {
                Ok(rendered) => rendered,
                Err(error) => return Outcome::Err(error),
            };
            Rows::query(cx, conn, &rendered.sql, &rendered.args).await
        }
    }
}

impl<S: Statement + Sync> FetchStatement for S {}

/// Common imports for building and executing queries.
pub mod prelude {
    pub use crate::funcs;
    pub use crate::FetchStatement;
    pub use quarry_core::{
        Connection, Cx, Dialect, Error, FromValue, Outcome, Result, Row, Value,
    };
    pub use quarry_query::{
        boolean, bytes, date, float, int, interval, null, param, text, time, timestamp,
        timestamp_tz, AnyExpr, BoolExpr, BytesExpr, Column, ColumnRef, Cte, DateExpr, Expr,
        Expression, FloatExpr, IntExpr, IntervalExpr, NumericExpr, NumericExpression,
        OrderedExpression, OrderTerm, RangeExpr, RowExpr, SelectItem, SelectStatement,
        Statement, Table, TextExpr, TimeExpr, TimestampExpr, TimestampTzExpr, WindowDef,
    };
    pub use quarry_qrm::{fetch_all, fetch_one, fetch_scalars, Record, RecordShape, Rows};
}
