//! Set operations for combining SELECT results.
//!
//! Provides UNION, UNION ALL, INTERSECT, INTERSECT ALL, EXCEPT, and
//! EXCEPT ALL over two or more SELECTs. Operands are kept as statement
//! trees so the whole operation can be re-finalized under a different
//! dialect; operand arity is checked at finalization.

use crate::clause::OrderTerm;
use crate::select::SelectStatement;
use crate::statement::Statement;
use crate::writer::SqlWriter;
use quarry_core::{Error, Result};

/// Type of set operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOpKind {
    /// UNION - combines results, removes duplicates
    Union,
    /// UNION ALL - combines results, keeps duplicates
    UnionAll,
    /// INTERSECT - returns common rows, removes duplicates
    Intersect,
    /// INTERSECT ALL - returns common rows, keeps duplicates
    IntersectAll,
    /// EXCEPT - returns rows in first query not in second, removes duplicates
    Except,
    /// EXCEPT ALL - returns rows in first query not in second, keeps duplicates
    ExceptAll,
}

impl SetOpKind {
    /// Get the SQL keyword for this set operation.
    pub const fn as_sql(&self) -> &'static str {
        match self {
            SetOpKind::Union => "UNION",
            SetOpKind::UnionAll => "UNION ALL",
            SetOpKind::Intersect => "INTERSECT",
            SetOpKind::IntersectAll => "INTERSECT ALL",
            SetOpKind::Except => "EXCEPT",
            SetOpKind::ExceptAll => "EXCEPT ALL",
        }
    }
}

/// A set operation over two or more SELECTs.
#[derive(Debug, Clone)]
pub struct SetStatement {
    first: SelectStatement,
    rest: Vec<(SetOpKind, SelectStatement)>,
    order_by: Vec<OrderTerm>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl SetStatement {
    /// Start from a single SELECT; combine with the chaining methods.
    pub fn new(first: SelectStatement) -> Self {
        Self {
            first,
            rest: Vec::new(),
            order_by: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Append another operand with the given operation.
    pub fn chain(mut self, op: SetOpKind, query: SelectStatement) -> Self {
        self.rest.push((op, query));
        self
    }

    /// Add a UNION operand.
    pub fn union(self, query: SelectStatement) -> Self {
        self.chain(SetOpKind::Union, query)
    }

    /// Add a UNION ALL operand.
    pub fn union_all(self, query: SelectStatement) -> Self {
        self.chain(SetOpKind::UnionAll, query)
    }

    /// Add an INTERSECT operand.
    pub fn intersect(self, query: SelectStatement) -> Self {
        self.chain(SetOpKind::Intersect, query)
    }

    /// Add an INTERSECT ALL operand.
    pub fn intersect_all(self, query: SelectStatement) -> Self {
        self.chain(SetOpKind::IntersectAll, query)
    }

    /// Add an EXCEPT operand.
    pub fn except(self, query: SelectStatement) -> Self {
        self.chain(SetOpKind::Except, query)
    }

    /// Add an EXCEPT ALL operand.
    pub fn except_all(self, query: SelectStatement) -> Self {
        self.chain(SetOpKind::ExceptAll, query)
    }

    /// Add ORDER BY on the combined result.
    pub fn order_by(mut self, term: OrderTerm) -> Self {
        self.order_by.push(term);
        self
    }

    /// Set LIMIT on the combined result.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET on the combined result.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }
}

impl Statement for SetStatement {
    fn validate(&self) -> Result<()> {
        if self.rest.is_empty() {
            return Err(Error::build(
                "SET OPERATION",
                "needs at least two SELECT operands",
            ));
        }

        self.first.validate()?;
        for (_, query) in &self.rest {
            query.validate()?;
        }

        // operand projections must agree in arity where statically known
        let expected = self.first.arity();
        for (op, query) in &self.rest {
            if let (Some(expected), Some(actual)) = (expected, query.arity()) {
                if expected != actual {
                    return Err(Error::build(
                        "SET OPERATION",
                        format!(
                            "{} operand selects {actual} columns, expected {expected}",
                            op.as_sql()
                        ),
                    ));
                }
            }
        }
        Ok(())
    }

    fn serialize(&self, w: &mut SqlWriter) -> Result<()> {
        w.parens(|w| self.first.serialize(w))?;
        for (op, query) in &self.rest {
            w.keyword(op.as_sql());
            w.parens(|w| query.serialize(w))?;
        }

        if !self.order_by.is_empty() {
            w.keyword("ORDER BY");
            w.comma_separated(&self.order_by, |w, term| term.serialize(w))?;
        }
        if let Some(limit) = self.limit {
            w.keyword("LIMIT");
            w.raw(&limit.to_string());
        }
        if let Some(offset) = self.offset {
            w.keyword("OFFSET");
            w.raw(&offset.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;
    use crate::kinds::{AnyExpr, Expression};
    use crate::table::{Column, Table};
    use quarry_core::Dialect;

    fn names(table: &str) -> SelectStatement {
        let t = Table::new(table, vec![Column::new("name")]);
        t.select(vec![AnyExpr::from_column(t.column("name")).projected()])
    }

    #[test]
    fn test_union() {
        let stmt = names("admins").union(names("managers"));
        let r = stmt.finalize(Dialect::Postgres).unwrap();
        assert_eq!(
            r.sql,
            "(SELECT admins.name AS \"admins.name\" FROM admins) UNION \
             (SELECT managers.name AS \"managers.name\" FROM managers)"
        );
    }

    #[test]
    fn test_chained_ops_keep_order() {
        let stmt = names("t1").union(names("t2")).union_all(names("t3"));
        let r = stmt.finalize(Dialect::Postgres).unwrap();
        let union = r.sql.find(" UNION (").unwrap();
        let union_all = r.sql.find(" UNION ALL (").unwrap();
        assert!(union < union_all);
    }

    #[test]
    fn test_order_limit_offset_on_result() {
        let stmt = names("t1")
            .union(names("t2"))
            .order_by(crate::clause::OrderTerm::asc(Expr::col("name")))
            .limit(10)
            .offset(5);
        let r = stmt.finalize(Dialect::Postgres).unwrap();
        assert!(r.sql.ends_with("ORDER BY name ASC LIMIT 10 OFFSET 5"));
    }

    #[test]
    fn test_arity_mismatch_is_refused() {
        let t = Table::new("t2", vec![Column::new("a"), Column::new("b")]);
        let two = t.select(vec![
            AnyExpr::from_column(t.column("a")).projected(),
            AnyExpr::from_column(t.column("b")).projected(),
        ]);

        let err = names("t1").union(two).finalize(Dialect::Postgres).unwrap_err();
        assert_eq!(
            err.to_string(),
            "build: SET OPERATION: UNION operand selects 2 columns, expected 1"
        );
    }

    #[test]
    fn test_except_intersect() {
        let r = names("a").except(names("b")).finalize(Dialect::Postgres).unwrap();
        assert!(r.sql.contains(" EXCEPT ("));

        let r = names("a")
            .intersect_all(names("b"))
            .finalize(Dialect::Postgres)
            .unwrap();
        assert!(r.sql.contains(" INTERSECT ALL ("));
    }
}
