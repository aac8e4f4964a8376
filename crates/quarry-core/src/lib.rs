//! Core types and traits for Quarry.
//!
//! This crate provides the foundational abstractions shared by the SQL
//! builder and the query-result mapper:
//!
//! - `Value` - dynamically-typed SQL values for parameters and results
//! - `Row` / `ColumnInfo` - result rows with shared column metadata
//! - `FromValue` - scalar decoding with lossless coercion rules
//! - `Dialect` - per-dialect serialization profile
//! - `Connection` - database connection trait
//! - `Error` - the error taxonomy
//!
//! All async operations integrate with asupersync's structured
//! concurrency via the `Cx` context for cancellation handling.

// Re-export asupersync primitives for structured concurrency
pub use asupersync::{Cx, Outcome};

pub mod connection;
pub mod dialect;
pub mod error;
pub mod row;
pub mod value;

pub use connection::Connection;
pub use dialect::{CastKind, CastSyntax, Dialect, PlaceholderStyle};
pub use error::{
    BuildError, CoerceError, Error, ExecError, Result, SerializeError, ShapeError,
};
pub use row::{ColumnInfo, FromValue, Row};
pub use value::Value;
