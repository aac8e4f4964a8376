//! Clause building blocks shared by the statement builders.

use crate::expr::Expr;
use crate::select::SelectStatement;
use crate::statement::Statement;
use crate::table::ColumnRef;
use crate::writer::SqlWriter;
use quarry_core::{Error, Result};

/// One item of a SELECT projection list.
///
/// Plain columns are auto-aliased to their `table.column` label so the
/// result mapper can match them back to destination fields by
/// schema-qualified hint.
#[derive(Debug, Clone)]
pub enum SelectItem {
    /// A table column, emitted as `t.c AS "t.c"`
    Column(ColumnRef),
    /// An arbitrary expression with an optional alias
    Expr { expr: Expr, alias: Option<String> },
    /// SELECT *
    Star,
}

impl SelectItem {
    /// An aliased expression item.
    pub fn aliased(expr: impl Into<Expr>, alias: impl Into<String>) -> Self {
        SelectItem::Expr {
            expr: expr.into(),
            alias: Some(alias.into()),
        }
    }

    pub(crate) fn serialize(&self, w: &mut SqlWriter) -> Result<()> {
        match self {
            SelectItem::Column(column) => {
                column.serialize(w);
                w.keyword("AS");
                w.identifier(&column.result_label());
                Ok(())
            }
            SelectItem::Expr { expr, alias } => {
                expr.serialize(w)?;
                if let Some(alias) = alias {
                    w.keyword("AS");
                    w.identifier(alias);
                }
                Ok(())
            }
            SelectItem::Star => {
                w.raw("*");
                Ok(())
            }
        }
    }

    pub(crate) fn visit_columns<'a>(&'a self, f: &mut dyn FnMut(&'a ColumnRef)) {
        match self {
            SelectItem::Column(column) => f(column),
            SelectItem::Expr { expr, .. } => expr.visit_columns(f),
            SelectItem::Star => {}
        }
    }
}

impl From<ColumnRef> for SelectItem {
    fn from(column: ColumnRef) -> Self {
        SelectItem::Column(column)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderDirection {
    #[default]
    Asc,
    Desc,
}

/// NULLS FIRST/LAST ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullsOrder {
    First,
    Last,
}

/// One ORDER BY term.
#[derive(Debug, Clone)]
pub struct OrderTerm {
    pub(crate) expr: Expr,
    pub(crate) direction: OrderDirection,
    pub(crate) nulls: Option<NullsOrder>,
}

impl OrderTerm {
    /// Create an ascending order term.
    pub fn asc(expr: impl Into<Expr>) -> Self {
        Self {
            expr: expr.into(),
            direction: OrderDirection::Asc,
            nulls: None,
        }
    }

    /// Create a descending order term.
    pub fn desc(expr: impl Into<Expr>) -> Self {
        Self {
            expr: expr.into(),
            direction: OrderDirection::Desc,
            nulls: None,
        }
    }

    /// Set NULLS FIRST.
    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(NullsOrder::First);
        self
    }

    /// Set NULLS LAST.
    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(NullsOrder::Last);
        self
    }

    pub(crate) fn serialize(&self, w: &mut SqlWriter) -> Result<()> {
        self.expr.serialize(w)?;
        w.keyword(match self.direction {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        });
        if let Some(nulls) = self.nulls {
            if !w.dialect().supports_nulls_ordering() {
                return Err(Error::unsupported(w.dialect(), "NULLS ordering"));
            }
            w.keyword(match nulls {
                NullsOrder::First => "NULLS FIRST",
                NullsOrder::Last => "NULLS LAST",
            });
        }
        Ok(())
    }
}

/// Types of SQL joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinType {
    /// Get the SQL keyword for this join type.
    pub const fn as_str(&self) -> &'static str {
        match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::Full => "FULL JOIN",
            JoinType::Cross => "CROSS JOIN",
        }
    }
}

/// A common table expression for a WITH clause.
#[derive(Debug, Clone)]
pub struct Cte {
    pub(crate) name: String,
    pub(crate) query: Box<SelectStatement>,
}

impl Cte {
    /// Define a CTE with the given name.
    pub fn new(name: impl Into<String>, query: SelectStatement) -> Self {
        Self {
            name: name.into(),
            query: Box::new(query),
        }
    }

    pub(crate) fn serialize(&self, w: &mut SqlWriter) -> Result<()> {
        w.identifier(&self.name);
        w.keyword("AS");
        w.subquery(|w| self.query.serialize(w))
    }
}

/// A named window definition for a WINDOW clause.
#[derive(Debug, Clone, Default)]
pub struct WindowDef {
    pub(crate) partition_by: Vec<Expr>,
    pub(crate) order_by: Vec<OrderTerm>,
}

impl WindowDef {
    /// Create an empty window definition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a PARTITION BY expression.
    pub fn partition_by(mut self, expr: impl Into<Expr>) -> Self {
        self.partition_by.push(expr.into());
        self
    }

    /// Add an ORDER BY term.
    pub fn order_by(mut self, term: OrderTerm) -> Self {
        self.order_by.push(term);
        self
    }

    pub(crate) fn serialize(&self, w: &mut SqlWriter) -> Result<()> {
        if !self.partition_by.is_empty() {
            w.keyword("PARTITION BY");
            w.comma_separated(&self.partition_by, |w, e| e.serialize(w))?;
        }
        if !self.order_by.is_empty() {
            w.keyword("ORDER BY");
            w.comma_separated(&self.order_by, |w, t| t.serialize(w))?;
        }
        Ok(())
    }

    pub(crate) fn visit_columns<'a>(&'a self, f: &mut dyn FnMut(&'a ColumnRef)) {
        for expr in &self.partition_by {
            expr.visit_columns(f);
        }
        for term in &self.order_by {
            term.expr.visit_columns(f);
        }
    }
}
