//! Statement finalization.

use crate::writer::SqlWriter;
use quarry_core::{Dialect, Result, Value};

/// A finalized statement: SQL text plus its ordered argument vector.
///
/// Every rendered placeholder appears in `args` in left-to-right
/// textual order.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub sql: String,
    pub args: Vec<Value>,
}

/// Common surface of all statement builders.
///
/// Finalization validates the statement, serializes it for the given
/// dialect, and produces a fresh [`Rendered`] pair. Statements are
/// immutable under finalization and may be re-finalized with a
/// different dialect.
pub trait Statement {
    /// Write this statement into the serializer buffer.
    fn serialize(&self, w: &mut SqlWriter) -> Result<()>;

    /// Validate clause combinations before serialization.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Produce the executable `(sql, args)` pair for a dialect.
    fn finalize(&self, dialect: Dialect) -> Result<Rendered> {
        self.validate()?;
        let mut w = SqlWriter::new(dialect);
        self.serialize(&mut w)?;
        let rendered = w.finish();
        tracing::trace!(sql = %rendered.sql, args = rendered.args.len(), "finalized statement");
        Ok(rendered)
    }

    /// Render the debug form with parameters inlined as SQL literals.
    ///
    /// For logging only; never submit this output for execution.
    fn debug_sql(&self, dialect: Dialect) -> Result<String> {
        self.validate()?;
        let mut w = SqlWriter::debug(dialect);
        self.serialize(&mut w)?;
        Ok(w.into_sql())
    }
}
