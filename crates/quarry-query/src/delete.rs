//! DELETE statement builder.

use crate::clause::SelectItem;
use crate::expr::Expr;
use crate::kinds::{BoolExpr, Expression};
use crate::statement::Statement;
use crate::table::Table;
use crate::writer::SqlWriter;
use quarry_core::{Error, Result};

/// A DELETE statement under construction.
///
/// Missing a WHERE clause is accepted but observable through
/// [`DeleteStatement::is_unsafe`]; finalization logs a warning.
#[derive(Debug, Clone)]
pub struct DeleteStatement {
    schema: Option<String>,
    table: String,
    where_clause: Option<Expr>,
    returning: Vec<SelectItem>,
}

impl DeleteStatement {
    /// Create a DELETE from the given table.
    pub fn new(table: &Table) -> Self {
        Self {
            schema: table.schema().map(str::to_string),
            table: table.name().to_string(),
            where_clause: None,
            returning: Vec::new(),
        }
    }

    /// Add a WHERE condition, ANDed with any existing one.
    pub fn filter(mut self, condition: BoolExpr) -> Self {
        self.where_clause = Some(match self.where_clause {
            Some(existing) => BoolExpr::wrap(existing).and(condition).into_expr(),
            None => condition.into_expr(),
        });
        self
    }

    /// Add a RETURNING projection.
    pub fn returning(mut self, items: Vec<SelectItem>) -> Self {
        self.returning.extend(items);
        self
    }

    /// True when this statement has no WHERE clause and would delete
    /// every row of the table.
    pub fn is_unsafe(&self) -> bool {
        self.where_clause.is_none()
    }
}

impl Statement for DeleteStatement {
    fn serialize(&self, w: &mut SqlWriter) -> Result<()> {
        if self.is_unsafe() {
            tracing::warn!(table = %self.table, "DELETE without WHERE affects every row");
        }

        w.keyword("DELETE FROM");
        if let Some(schema) = &self.schema {
            w.identifier(schema);
            w.glue(".");
        }
        w.identifier(&self.table);

        if let Some(where_clause) = &self.where_clause {
            w.keyword("WHERE");
            where_clause.serialize(w)?;
        }

        if !self.returning.is_empty() {
            if !w.dialect().supports_returning() {
                return Err(Error::unsupported(w.dialect(), "RETURNING"));
            }
            w.keyword("RETURNING");
            w.comma_separated(&self.returning, |w, item| item.serialize(w))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::IntExpr;
    use crate::table::Column;
    use quarry_core::{Dialect, Value};

    fn heroes() -> Table {
        Table::new(
            "heroes",
            vec![Column::primary_key("id"), Column::new("name")],
        )
    }

    #[test]
    fn test_delete() {
        let heroes = heroes();
        let stmt = heroes
            .delete()
            .filter(IntExpr::from_column(heroes.column("id")).eq(IntExpr::param(3)));

        let r = stmt.finalize(Dialect::Sqlite).unwrap();
        assert_eq!(r.sql, "DELETE FROM heroes WHERE heroes.id = ?1");
        assert_eq!(r.args, vec![Value::Int(3)]);
    }

    #[test]
    fn test_delete_without_where_is_flagged() {
        let stmt = heroes().delete();
        assert!(stmt.is_unsafe());
        assert_eq!(
            stmt.finalize(Dialect::Postgres).unwrap().sql,
            "DELETE FROM heroes"
        );
    }
}
