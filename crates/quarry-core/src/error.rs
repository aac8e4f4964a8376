//! Error types for Quarry operations.
//!
//! Every error renders with a textual kind prefix so callers can grep
//! logs by subsystem: `build:`, `serialize:`, `exec:`, `qrm:`,
//! `config:`. Mapper errors carry the destination field path where one
//! is known.

use crate::dialect::Dialect;
use std::fmt;

/// The primary error type for all Quarry operations.
#[derive(Debug)]
pub enum Error {
    /// Configuration errors (unknown dialect name, etc.)
    Config(String),
    /// Illegal clause combinations and other statement construction errors
    Build(BuildError),
    /// The dialect cannot render a requested construct
    Serialize(SerializeError),
    /// The database returned an error or the connection failed
    Exec(ExecError),
    /// Invalid destination topology for the result mapper
    Shape(ShapeError),
    /// Incompatible scalar conversion while decoding a row
    Coerce(CoerceError),
    /// Zero rows arrived for a single-record destination
    NoRows,
    /// Operation was cancelled
    Cancelled,
    /// Custom error with message
    Custom(String),
}

/// Statement construction error, raised at finalization.
#[derive(Debug)]
pub struct BuildError {
    /// The statement kind being built ("SELECT", "INSERT", ...)
    pub statement: &'static str,
    pub message: String,
}

/// A construct the target dialect cannot express.
#[derive(Debug)]
pub struct SerializeError {
    pub dialect: Dialect,
    /// The construct that failed to render ("ILIKE", "LOCK TABLE", ...)
    pub construct: &'static str,
}

/// Database-side execution failure, propagated verbatim.
#[derive(Debug)]
pub struct ExecError {
    pub message: String,
    pub sql: Option<String>,
}

/// Destination shape the mapper cannot work with.
#[derive(Debug)]
pub struct ShapeError {
    /// Path of the offending field within the destination, if known
    pub path: String,
    pub message: String,
}

/// Scalar conversion failure while writing a row value into a field.
#[derive(Debug)]
pub struct CoerceError {
    /// SQL type name of the source value
    pub source_type: &'static str,
    /// Rust type name of the target field
    pub target: &'static str,
    /// Path of the destination field, filled in by the mapper
    pub path: String,
}

impl Error {
    /// Build-error constructor.
    pub fn build(statement: &'static str, message: impl Into<String>) -> Self {
        Error::Build(BuildError {
            statement,
            message: message.into(),
        })
    }

    /// Serialization-error constructor.
    pub fn unsupported(dialect: Dialect, construct: &'static str) -> Self {
        Error::Serialize(SerializeError { dialect, construct })
    }

    /// Execution-error constructor.
    pub fn exec(message: impl Into<String>) -> Self {
        Error::Exec(ExecError {
            message: message.into(),
            sql: None,
        })
    }

    /// Shape-error constructor.
    pub fn shape(path: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Shape(ShapeError {
            path: path.into(),
            message: message.into(),
        })
    }

    /// Coercion-error constructor. The path is filled in by the mapper
    /// as the error propagates out of nested decoding.
    pub fn coerce(source_type: &'static str, target: &'static str) -> Self {
        Error::Coerce(CoerceError {
            source_type,
            target,
            path: String::new(),
        })
    }

    /// Check whether this is the distinguished no-rows error.
    pub const fn is_no_rows(&self) -> bool {
        matches!(self, Error::NoRows)
    }

    /// Prepend a field-path segment to mapper errors.
    ///
    /// Used while unwinding out of nested record decoding so the final
    /// message names the full path from the destination root.
    pub fn prepend_path(mut self, segment: &str) -> Self {
        match &mut self {
            Error::Coerce(e) => {
                e.path = join_path(segment, &e.path);
            }
            Error::Shape(e) => {
                e.path = join_path(segment, &e.path);
            }
            _ => {}
        }
        self
    }
}

fn join_path(segment: &str, rest: &str) -> String {
    if rest.is_empty() {
        segment.to_string()
    } else {
        format!("{segment}.{rest}")
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "config: {msg}"),
            Error::Build(e) => write!(f, "build: {}: {}", e.statement, e.message),
            Error::Serialize(e) => write!(
                f,
                "serialize: {} is not supported on {}",
                e.construct,
                e.dialect.name()
            ),
            Error::Exec(e) => match &e.sql {
                Some(sql) => write!(f, "exec: {} (sql: {sql})", e.message),
                None => write!(f, "exec: {}", e.message),
            },
            Error::Shape(e) => {
                if e.path.is_empty() {
                    write!(f, "qrm: {}", e.message)
                } else {
                    write!(f, "qrm: {} at '{}'", e.message, e.path)
                }
            }
            Error::Coerce(e) => {
                if e.path.is_empty() {
                    write!(f, "qrm: cannot convert {} to {}", e.source_type, e.target)
                } else {
                    write!(
                        f,
                        "qrm: cannot convert {} to {} at '{}'",
                        e.source_type, e.target, e.path
                    )
                }
            }
            Error::NoRows => write!(f, "qrm: no rows in result set"),
            Error::Cancelled => write!(f, "exec: operation cancelled"),
            Error::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Result type for Quarry operations.
pub type Result<T> = std::result::Result<T, Error>;
