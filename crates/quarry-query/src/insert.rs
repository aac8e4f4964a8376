//! INSERT statement builder.

use crate::clause::SelectItem;
use crate::expr::Expr;
use crate::select::SelectStatement;
use crate::statement::Statement;
use crate::table::Table;
use crate::writer::SqlWriter;
use quarry_core::{Error, Result};

/// Conflict resolution strategy for INSERT operations.
#[derive(Debug, Clone)]
pub enum OnConflict {
    /// Do nothing on conflict (INSERT ... ON CONFLICT DO NOTHING)
    DoNothing,
    /// Update columns on conflict (INSERT ... ON CONFLICT DO UPDATE SET ...)
    DoUpdate {
        /// The conflict target (column names)
        target: Vec<String>,
        /// Column assignments applied on conflict
        set: Vec<(String, Expr)>,
    },
}

/// An INSERT statement under construction.
///
/// VALUES rows and an INSERT ... SELECT source are mutually exclusive;
/// with neither, the statement renders DEFAULT VALUES.
#[derive(Debug, Clone)]
pub struct InsertStatement {
    schema: Option<String>,
    table: String,
    columns: Vec<String>,
    rows: Vec<Vec<Expr>>,
    query: Option<Box<SelectStatement>>,
    on_conflict: Option<OnConflict>,
    returning: Vec<SelectItem>,
}

impl InsertStatement {
    /// Create an INSERT into the given table.
    pub fn new(table: &Table) -> Self {
        Self {
            schema: table.schema().map(str::to_string),
            table: table.name().to_string(),
            columns: Vec::new(),
            rows: Vec::new(),
            query: None,
            on_conflict: None,
            returning: Vec::new(),
        }
    }

    /// Set the column list.
    pub fn columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Append one VALUES row.
    pub fn values(mut self, row: Vec<Expr>) -> Self {
        self.rows.push(row);
        self
    }

    /// Use a SELECT as the row source (INSERT ... SELECT).
    pub fn query(mut self, query: SelectStatement) -> Self {
        self.query = Some(Box::new(query));
        self
    }

    /// Handle conflicts by doing nothing.
    pub fn on_conflict_do_nothing(mut self) -> Self {
        self.on_conflict = Some(OnConflict::DoNothing);
        self
    }

    /// Handle conflicts by updating columns (UPSERT).
    pub fn on_conflict_do_update(
        mut self,
        target: &[&str],
        set: Vec<(&str, Expr)>,
    ) -> Self {
        self.on_conflict = Some(OnConflict::DoUpdate {
            target: target.iter().map(|c| c.to_string()).collect(),
            set: set
                .into_iter()
                .map(|(column, expr)| (column.to_string(), expr))
                .collect(),
        });
        self
    }

    /// Add a RETURNING projection.
    pub fn returning(mut self, items: Vec<SelectItem>) -> Self {
        self.returning.extend(items);
        self
    }
}

impl Statement for InsertStatement {
    fn validate(&self) -> Result<()> {
        if self.query.is_some() && !self.rows.is_empty() {
            return Err(Error::build(
                "INSERT",
                "VALUES rows and a SELECT source are mutually exclusive",
            ));
        }
        if self.query.is_some() && self.columns.is_empty() {
            return Err(Error::build(
                "INSERT",
                "INSERT ... SELECT requires an explicit column list",
            ));
        }
        for row in &self.rows {
            if row.len() != self.columns.len() {
                return Err(Error::build(
                    "INSERT",
                    format!(
                        "VALUES row has {} expressions for {} columns",
                        row.len(),
                        self.columns.len()
                    ),
                ));
            }
        }
        Ok(())
    }

    fn serialize(&self, w: &mut SqlWriter) -> Result<()> {
        w.keyword("INSERT INTO");
        if let Some(schema) = &self.schema {
            w.identifier(schema);
            w.glue(".");
        }
        w.identifier(&self.table);

        if !self.columns.is_empty() {
            w.parens(|w| {
                w.comma_separated(&self.columns, |w, column| {
                    w.identifier(column);
                    Ok(())
                })
            })?;
        }

        if let Some(query) = &self.query {
            query.serialize(w)?;
        } else if self.rows.is_empty() {
            w.keyword("DEFAULT VALUES");
        } else {
            w.keyword("VALUES");
            w.comma_separated(&self.rows, |w, row| {
                w.parens(|w| w.comma_separated(row, |w, expr| expr.serialize(w)))
            })?;
        }

        if let Some(on_conflict) = &self.on_conflict {
            if !w.dialect().supports_on_conflict() {
                return Err(Error::unsupported(w.dialect(), "ON CONFLICT"));
            }
            w.keyword("ON CONFLICT");
            match on_conflict {
                OnConflict::DoNothing => w.keyword("DO NOTHING"),
                OnConflict::DoUpdate { target, set } => {
                    if !target.is_empty() {
                        w.parens(|w| {
                            w.comma_separated(target, |w, column| {
                                w.identifier(column);
                                Ok(())
                            })
                        })?;
                    }
                    w.keyword("DO UPDATE SET");
                    w.comma_separated(set, |w, (column, expr)| {
                        w.identifier(column);
                        w.keyword("=");
                        expr.serialize(w)
                    })?;
                }
            }
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
