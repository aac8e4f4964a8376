//! SQL builder for Quarry.
//!
//! This crate provides the expression algebra, the dialect-aware
//! serializer, and the statement builders:
//!
//! - `expr` - the expression AST and operator tables
//! - `kinds` - kind-gated operation surfaces (`BoolExpr`, `IntExpr`, ...)
//! - `funcs` - SQL function constructors with per-dialect remapping
//! - `table` - table handles and typed column references
//! - statement builders for SELECT/INSERT/UPDATE/DELETE/LOCK and set
//!   operations, each finalizing to a `(sql, args)` pair

pub mod clause;
pub mod delete;
pub mod expr;
pub mod funcs;
pub mod insert;
pub mod kinds;
pub mod lock;
pub mod select;
pub mod set_ops;
pub mod statement;
pub mod table;
pub mod update;
pub mod writer;

pub use clause::{Cte, JoinType, NullsOrder, OrderDirection, OrderTerm, SelectItem, WindowDef};
pub use delete::DeleteStatement;
pub use expr::{BinaryOp, CaseBuilder, Expr, UnaryOp};
pub use insert::{InsertStatement, OnConflict};
pub use kinds::{
    boolean, bytes, date, float, int, interval, null, param, text, time, timestamp,
    timestamp_tz, AnyExpr, BoolExpr, BytesExpr, DateExpr, Expression, FloatExpr, IntExpr,
    IntervalExpr, NumericExpr, NumericExpression, OrderedExpression, RangeExpr, RowExpr,
    TextExpr, TimeExpr, TimestampExpr, TimestampTzExpr,
};
pub use lock::{LockMode, LockStatement};
pub use select::{RowLock, SelectStatement};
pub use set_ops::{SetOpKind, SetStatement};
pub use statement::{Rendered, Statement};
pub use table::{Column, ColumnRef, Table};
pub use update::UpdateStatement;
pub use writer::SqlWriter;

// Re-export the dialect profile alongside the builders that consume it.
pub use quarry_core::dialect::{CastKind, CastSyntax, Dialect, PlaceholderStyle};
