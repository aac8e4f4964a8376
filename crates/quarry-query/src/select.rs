//! SELECT statement builder.

use crate::clause::{Cte, JoinType, OrderTerm, SelectItem, WindowDef};
use crate::expr::Expr;
use crate::kinds::{AnyExpr, BoolExpr, Expression};
use crate::set_ops::{SetOpKind, SetStatement};
use crate::statement::Statement;
use crate::table::{ColumnRef, Table};
use crate::writer::SqlWriter;
use quarry_core::{Error, Result};
use std::collections::HashSet;

/// One FROM-clause operand.
#[derive(Debug, Clone)]
pub(crate) enum FromItem {
    Table {
        schema: Option<String>,
        name: String,
        alias: Option<String>,
    },
    Subquery {
        query: Box<SelectStatement>,
        alias: String,
    },
}

impl FromItem {
    fn from_table(table: &Table) -> Self {
        FromItem::Table {
            schema: table.schema().map(str::to_string),
            name: table.name().to_string(),
            alias: table.alias_name().map(str::to_string),
        }
    }

    /// The name this item is reachable by in column qualifiers.
    fn source_name(&self) -> &str {
        match self {
            FromItem::Table { alias, name, .. } => alias.as_deref().unwrap_or(name),
            FromItem::Subquery { alias, .. } => alias,
        }
    }

    fn serialize(&self, w: &mut SqlWriter) -> Result<()> {
        match self {
            FromItem::Table {
                schema,
                name,
                alias,
            } => {
                if let Some(schema) = schema {
                    w.identifier(schema);
                    w.glue(".");
                }
                w.identifier(name);
                if let Some(alias) = alias {
                    w.keyword("AS");
                    w.identifier(alias);
                }
                Ok(())
            }
            FromItem::Subquery { query, alias } => {
                w.subquery(|w| query.serialize(w))?;
                w.keyword("AS");
                w.identifier(alias);
                Ok(())
            }
        }
    }
}

/// One JOIN clause.
#[derive(Debug, Clone)]
pub(crate) struct Join {
    join_type: JoinType,
    item: FromItem,
    on: Option<Expr>,
    lateral: bool,
}

/// Row-lock strength for SELECT ... FOR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LockStrength {
    Update,
    Share,
}

/// A FOR UPDATE / FOR SHARE row-locking clause.
#[derive(Debug, Clone, Copy)]
pub struct RowLock {
    strength: LockStrength,
    nowait: bool,
    skip_locked: bool,
}

/// A SELECT statement under construction.
///
/// Clauses are emitted in grammar order regardless of the order the
/// builder methods were called in.
#[derive(Debug, Clone, Default)]
pub struct SelectStatement {
    ctes: Vec<Cte>,
    distinct: bool,
    projection: Vec<SelectItem>,
    from: Option<FromItem>,
    joins: Vec<Join>,
    where_clause: Option<Expr>,
    group_by: Vec<Expr>,
    having: Option<Expr>,
    windows: Vec<(String, WindowDef)>,
    order_by: Vec<OrderTerm>,
    limit: Option<u64>,
    offset: Option<u64>,
    lock: Option<RowLock>,
}

impl SelectStatement {
    /// Create an empty SELECT.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append items to the projection list.
    pub fn select(mut self, items: Vec<SelectItem>) -> Self {
        self.projection.extend(items);
        self
    }

    /// Append a single projection item.
    pub fn select_item(mut self, item: impl Into<SelectItem>) -> Self {
        self.projection.push(item.into());
        self
    }

    /// Make this a DISTINCT query.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Set the FROM table.
    pub fn from(mut self, table: &Table) -> Self {
        self.from = Some(FromItem::from_table(table));
        self
    }

    /// Use an aliased subquery as the FROM operand.
    pub fn from_select(mut self, query: SelectStatement, alias: impl Into<String>) -> Self {
        self.from = Some(FromItem::Subquery {
            query: Box::new(query),
            alias: alias.into(),
        });
        self
    }

    fn join(mut self, join_type: JoinType, table: &Table, on: Option<BoolExpr>) -> Self {
        self.joins.push(Join {
            join_type,
            item: FromItem::from_table(table),
            on: on.map(Expression::into_expr),
            lateral: false,
        });
        self
    }

    /// INNER JOIN with an ON condition.
    pub fn inner_join(self, table: &Table, on: BoolExpr) -> Self {
        self.join(JoinType::Inner, table, Some(on))
    }

    /// LEFT JOIN with an ON condition.
    pub fn left_join(self, table: &Table, on: BoolExpr) -> Self {
        self.join(JoinType::Left, table, Some(on))
    }

    /// RIGHT JOIN with an ON condition.
    pub fn right_join(self, table: &Table, on: BoolExpr) -> Self {
        self.join(JoinType::Right, table, Some(on))
    }

    /// FULL OUTER JOIN with an ON condition.
    pub fn full_join(self, table: &Table, on: BoolExpr) -> Self {
        self.join(JoinType::Full, table, Some(on))
    }

    /// CROSS JOIN (no ON condition).
    pub fn cross_join(self, table: &Table) -> Self {
        self.join(JoinType::Cross, table, None)
    }

    /// LATERAL join against an aliased subquery.
    ///
    /// The subquery may reference columns of preceding FROM items.
    pub fn join_lateral(
        mut self,
        join_type: JoinType,
        query: SelectStatement,
        alias: impl Into<String>,
        on: BoolExpr,
    ) -> Self {
        self.joins.push(Join {
            join_type,
            item: FromItem::Subquery {
                query: Box::new(query),
                alias: alias.into(),
            },
            on: Some(on.into_expr()),
            lateral: true,
        });
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

    /// Add a WHERE condition, ORed with any existing one.
    pub fn or_filter(mut self, condition: BoolExpr) -> Self {
        self.where_clause = Some(match self.where_clause {
            Some(existing) => BoolExpr::wrap(existing).or(condition).into_expr(),
            None => condition.into_expr(),
        });
        self
    }

    /// Add a GROUP BY expression.
    pub fn group_by(mut self, expr: impl Expression) -> Self {
        self.group_by.push(expr.into_expr());
        self
    }

    /// Add a HAVING condition, ANDed with any existing one.
    pub fn having(mut self, condition: BoolExpr) -> Self {
        self.having = Some(match self.having {
            Some(existing) => BoolExpr::wrap(existing).and(condition).into_expr(),
            None => condition.into_expr(),
        });
        self
    }

    /// Define a named window for use with OVER.
    pub fn window(mut self, name: impl Into<String>, def: WindowDef) -> Self {
        self.windows.push((name.into(), def));
        self
    }

    /// Add an ORDER BY term.
    pub fn order_by(mut self, term: OrderTerm) -> Self {
        self.order_by.push(term);
        self
    }

    /// Set LIMIT.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Lock selected rows FOR UPDATE.
    pub fn for_update(mut self) -> Self {
        self.lock = Some(RowLock {
            strength: LockStrength::Update,
            nowait: false,
            skip_locked: false,
        });
        self
    }

    /// Lock selected rows FOR SHARE.
    pub fn for_share(mut self) -> Self {
        self.lock = Some(RowLock {
            strength: LockStrength::Share,
            nowait: false,
            skip_locked: false,
        });
        self
    }

    /// NOWAIT on the row lock.
    pub fn nowait(mut self) -> Self {
        if let Some(lock) = &mut self.lock {
            lock.nowait = true;
        }
        self
    }

    /// SKIP LOCKED on the row lock.
    pub fn skip_locked(mut self) -> Self {
        if let Some(lock) = &mut self.lock {
            lock.skip_locked = true;
        }
        self
    }

    /// Prepend a common table expression.
    pub fn with(mut self, cte: Cte) -> Self {
        self.ctes.push(cte);
        self
    }

    /// Use this SELECT as a scalar subquery expression.
    pub fn as_expr(self) -> AnyExpr {
        AnyExpr::wrap(Expr::Subquery(Box::new(self)))
    }

    // ==================== Set operations ====================

    /// UNION with another SELECT.
    pub fn union(self, rhs: SelectStatement) -> SetStatement {
        SetStatement::new(self).chain(SetOpKind::Union, rhs)
    }

    /// UNION ALL with another SELECT.
    pub fn union_all(self, rhs: SelectStatement) -> SetStatement {
        SetStatement::new(self).chain(SetOpKind::UnionAll, rhs)
    }

    /// INTERSECT with another SELECT.
    pub fn intersect(self, rhs: SelectStatement) -> SetStatement {
        SetStatement::new(self).chain(SetOpKind::Intersect, rhs)
    }

    /// INTERSECT ALL with another SELECT.
    pub fn intersect_all(self, rhs: SelectStatement) -> SetStatement {
        SetStatement::new(self).chain(SetOpKind::IntersectAll, rhs)
    }

    /// EXCEPT with another SELECT.
    pub fn except(self, rhs: SelectStatement) -> SetStatement {
        SetStatement::new(self).chain(SetOpKind::Except, rhs)
    }

    /// EXCEPT ALL with another SELECT.
    pub fn except_all(self, rhs: SelectStatement) -> SetStatement {
        SetStatement::new(self).chain(SetOpKind::ExceptAll, rhs)
    }

    // ==================== Introspection ====================

    /// Projection arity, when statically known (no star items).
    pub(crate) fn arity(&self) -> Option<usize> {
        if self
            .projection
            .iter()
            .any(|item| matches!(item, SelectItem::Star))
        {
            return None;
        }
        Some(self.projection.len())
    }

    /// Collect the names this statement's columns may be qualified by:
    /// FROM and JOIN sources, CTE names, and the sources of nested
    /// subqueries (for correlated references).
    pub(crate) fn collect_sources(&self, names: &mut Vec<String>) {
        for cte in &self.ctes {
            names.push(cte.name.clone());
            cte.query.collect_sources(names);
        }
        if let Some(from) = &self.from {
            names.push(from.source_name().to_string());
            if let FromItem::Subquery { query, .. } = from {
                query.collect_sources(names);
            }
        }
        for join in &self.joins {
            names.push(join.item.source_name().to_string());
            if let FromItem::Subquery { query, .. } = &join.item {
                query.collect_sources(names);
            }
            if let Some(on) = &join.on {
                on.visit_subquery_sources(names);
            }
        }
        // subqueries inside expressions bring their own FROM sources
        for item in &self.projection {
            if let SelectItem::Expr { expr, .. } = item {
                expr.visit_subquery_sources(names);
            }
        }
        if let Some(where_clause) = &self.where_clause {
            where_clause.visit_subquery_sources(names);
        }
        if let Some(having) = &self.having {
            having.visit_subquery_sources(names);
        }
        for expr in &self.group_by {
            expr.visit_subquery_sources(names);
        }
        for term in &self.order_by {
            term.expr.visit_subquery_sources(names);
        }
    }

    /// Visit every column reference in this statement, including
    /// nested subqueries.
    pub(crate) fn visit_columns<'a>(&'a self, f: &mut dyn FnMut(&'a ColumnRef)) {
        for cte in &self.ctes {
            cte.query.visit_columns(f);
        }
        for item in &self.projection {
            item.visit_columns(f);
        }
        if let Some(FromItem::Subquery { query, .. }) = &self.from {
            query.visit_columns(f);
        }
        for join in &self.joins {
            if let FromItem::Subquery { query, .. } = &join.item {
                query.visit_columns(f);
            }
            if let Some(on) = &join.on {
                on.visit_columns(f);
            }
        }
        if let Some(where_clause) = &self.where_clause {
            where_clause.visit_columns(f);
        }
        for expr in &self.group_by {
            expr.visit_columns(f);
        }
        if let Some(having) = &self.having {
            having.visit_columns(f);
        }
        for (_, def) in &self.windows {
            def.visit_columns(f);
        }
        for term in &self.order_by {
            term.expr.visit_columns(f);
        }
    }
}

impl Statement for SelectStatement {
    fn validate(&self) -> Result<()> {
        if self.projection.is_empty() {
            return Err(Error::build("SELECT", "projection list is empty"));
        }

        // Column qualifiers must name a reachable FROM source. Raw
        // expressions and bare columns are not statically checkable.
        let mut sources = Vec::new();
        self.collect_sources(&mut sources);
        let sources: HashSet<String> =
            sources.into_iter().map(|s| s.to_ascii_lowercase()).collect();

        let mut unreachable: Option<String> = None;
        self.visit_columns(&mut |column| {
            if unreachable.is_some() {
                return;
            }
            if let Some(qualifier) = column.qualifier() {
                if !sources.contains(&qualifier.to_ascii_lowercase()) {
                    unreachable = Some(format!(
                        "column '{}' references '{qualifier}' which is not reachable from FROM",
                        column.result_label()
                    ));
                }
            }
        });
        match unreachable {
            Some(message) => Err(Error::build("SELECT", message)),
            None => Ok(()),
        }
    }

    fn serialize(&self, w: &mut SqlWriter) -> Result<()> {
        if self.projection.is_empty() {
            return Err(Error::build("SELECT", "projection list is empty"));
        }

        if !self.ctes.is_empty() {
            w.keyword("WITH");
            w.comma_separated(&self.ctes, |w, cte| cte.serialize(w))?;
        }

        w.keyword("SELECT");
        if self.distinct {
            w.keyword("DISTINCT");
        }
        w.comma_separated(&self.projection, |w, item| item.serialize(w))?;

        if let Some(from) = &self.from {
            w.keyword("FROM");
            from.serialize(w)?;
        }

        for join in &self.joins {
            w.keyword(join.join_type.as_str());
            if join.lateral {
                if !w.dialect().supports_lateral() {
                    return Err(Error::unsupported(w.dialect(), "LATERAL join"));
                }
                w.keyword("LATERAL");
            }
            join.item.serialize(w)?;
            if let Some(on) = &join.on {
                w.keyword("ON");
                on.serialize(w)?;
            }
        }

        if let Some(where_clause) = &self.where_clause {
            w.keyword("WHERE");
            where_clause.serialize(w)?;
        }

        if !self.group_by.is_empty() {
            w.keyword("GROUP BY");
            w.comma_separated(&self.group_by, |w, e| e.serialize(w))?;
        }

        if let Some(having) = &self.having {
            w.keyword("HAVING");
            having.serialize(w)?;
        }

        if !self.windows.is_empty() {
            w.keyword("WINDOW");
            w.comma_separated(&self.windows, |w, (name, def)| {
                w.identifier(name);
                w.keyword("AS");
                w.parens(|w| def.serialize(w))
            })?;
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

        if let Some(lock) = &self.lock {
            if !w.dialect().supports_row_locks() {
                return Err(Error::unsupported(w.dialect(), "row locking"));
            }
            w.keyword(match lock.strength {
                LockStrength::Update => "FOR UPDATE",
                LockStrength::Share => "FOR SHARE",
            });
            if lock.nowait {
                w.keyword("NOWAIT");
            }
            if lock.skip_locked {
                w.keyword("SKIP LOCKED");
            }
        }

        Ok(())
    }
}
