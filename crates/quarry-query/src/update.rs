//! UPDATE statement builder.

use crate::clause::SelectItem;
use crate::expr::Expr;
use crate::kinds::{BoolExpr, Expression};
use crate::statement::Statement;
use crate::table::Table;
use crate::writer::SqlWriter;
use quarry_core::{Error, Result};

/// An UPDATE statement under construction.
///
/// Missing a WHERE clause is accepted but observable through
/// [`UpdateStatement::is_unsafe`]; finalization logs a warning.
#[derive(Debug, Clone)]
pub struct UpdateStatement {
    schema: Option<String>,
    table: String,
    set: Vec<(String, Expr)>,
    where_clause: Option<Expr>,
    returning: Vec<SelectItem>,
}

impl UpdateStatement {
    /// Create an UPDATE of the given table.
    pub fn new(table: &Table) -> Self {
        Self {
            schema: table.schema().map(str::to_string),
            table: table.name().to_string(),
            set: Vec::new(),
            where_clause: None,
            returning: Vec::new(),
        }
    }

    /// Add one SET assignment.
    pub fn set(mut self, column: &str, value: impl Into<Expr>) -> Self {
        self.set.push((column.to_string(), value.into()));
        self
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

    /// True when this statement has no WHERE clause and would touch
    /// every row of the table.
    pub fn is_unsafe(&self) -> bool {
        self.where_clause.is_none()
    }
}

impl Statement for UpdateStatement {
    fn validate(&self) -> Result<()> {
        if self.set.is_empty() {
            return Err(Error::build("UPDATE", "no SET assignments"));
        }
        Ok(())
    }

    fn serialize(&self, w: &mut SqlWriter) -> Result<()> {
        if self.is_unsafe() {
            tracing::warn!(table = %self.table, "UPDATE without WHERE affects every row");
        }

        w.keyword("UPDATE");
        if let Some(schema) = &self.schema {
            w.identifier(schema);
            w.glue(".");
        }
        w.identifier(&self.table);
        w.keyword("SET");
        w.comma_separated(&self.set, |w, (column, expr)| {
            w.identifier(column);
            w.keyword("=");
            expr.serialize(w)
        })?;

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
    fn test_update() {
        let heroes = heroes();
        let stmt = heroes
            .update()
            .set("name", Expr::param("Ada"))
            .filter(IntExpr::from_column(heroes.column("id")).eq(IntExpr::param(7)));

        assert!(!stmt.is_unsafe());
        let r = stmt.finalize(Dialect::Postgres).unwrap();
        assert_eq!(r.sql, "UPDATE heroes SET name = $1 WHERE heroes.id = $2");
        assert_eq!(r.args, vec![Value::Text("Ada".into()), Value::Int(7)]);
    }

    #[test]
    fn test_update_without_where_is_flagged_not_refused() {
        let stmt = heroes().update().set("name", Expr::param("x"));
        assert!(stmt.is_unsafe());
        assert!(stmt.finalize(Dialect::Postgres).is_ok());
    }

    #[test]
    fn test_update_without_set_is_refused() {
        let stmt = heroes().update();
        let err = stmt.finalize(Dialect::Postgres).unwrap_err();
        assert_eq!(err.to_string(), "build: UPDATE: no SET assignments");
    }
}
