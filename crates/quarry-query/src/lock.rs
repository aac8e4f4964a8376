//! LOCK TABLE statement builder.

use crate::statement::Statement;
use crate::table::Table;
use crate::writer::SqlWriter;
use quarry_core::{Dialect, Error, Result};

/// Table-lock strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Concurrent readers allowed (SHARE / READ)
    Share,
    /// Exclusive access (ACCESS EXCLUSIVE / WRITE)
    Exclusive,
}

/// A standalone table-lock statement.
///
/// Renders `LOCK TABLE ... IN ... MODE` on PostgreSQL and
/// `LOCK TABLES ... READ/WRITE` on MySQL; SQLite has no table-lock
/// statement and reports a serialization error.
#[derive(Debug, Clone)]
pub struct LockStatement {
    schema: Option<String>,
    table: String,
    mode: LockMode,
}

impl LockStatement {
    /// Lock the given table.
    pub fn new(table: &Table, mode: LockMode) -> Self {
        Self {
            schema: table.schema().map(str::to_string),
            table: table.name().to_string(),
            mode,
        }
    }
}

impl Statement for LockStatement {
    fn serialize(&self, w: &mut SqlWriter) -> Result<()> {
        if !w.dialect().supports_lock_table() {
            return Err(Error::unsupported(w.dialect(), "LOCK TABLE"));
        }

        match w.dialect() {
            Dialect::Postgres => {
                w.keyword("LOCK TABLE");
                if let Some(schema) = &self.schema {
                    w.identifier(schema);
                    w.glue(".");
                }
                w.identifier(&self.table);
                w.keyword(match self.mode {
                    LockMode::Share => "IN SHARE MODE",
                    LockMode::Exclusive => "IN ACCESS EXCLUSIVE MODE",
                });
            }
            Dialect::Mysql => {
                w.keyword("LOCK TABLES");
                w.identifier(&self.table);
                w.keyword(match self.mode {
                    LockMode::Share => "READ",
                    LockMode::Exclusive => "WRITE",
                });
            }
            Dialect::Sqlite => unreachable!("guarded by supports_lock_table"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn film() -> Table {
        Table::new("film", vec![Column::primary_key("film_id")])
    }

    #[test]
    fn test_lock_postgres() {
        let stmt = LockStatement::new(&film(), LockMode::Exclusive);
        let r = stmt.finalize(Dialect::Postgres).unwrap();
        assert_eq!(r.sql, "LOCK TABLE film IN ACCESS EXCLUSIVE MODE");
    }

    #[test]
    fn test_lock_mysql() {
        let stmt = LockStatement::new(&film(), LockMode::Share);
        let r = stmt.finalize(Dialect::Mysql).unwrap();
        assert_eq!(r.sql, "LOCK TABLES film READ");
    }

    #[test]
    fn test_lock_sqlite_is_refused() {
        let stmt = LockStatement::new(&film(), LockMode::Share);
        let err = stmt.finalize(Dialect::Sqlite).unwrap_err();
        assert_eq!(
            err.to_string(),
            "serialize: LOCK TABLE is not supported on sqlite"
        );
    }
}
