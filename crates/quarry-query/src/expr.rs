//! The expression AST.
//!
//! Every SQL expression is a tree of [`Expr`] nodes. Operations are
//! exposed through the kind wrappers in [`crate::kinds`]; this module
//! owns the node shapes, the operator tables with their precedence,
//! and serialization with precedence-aware parenthesization.
//!
//! Parenthesization rule: a binary node parenthesizes an operand iff
//! the operand's precedence is lower than or equal to the node's own;
//! unary operators parenthesize their operand iff it is a binary node
//! or a lower-precedence unary. Atoms never get extra parentheses.

use crate::clause::WindowDef;
use crate::select::SelectStatement;
use crate::statement::Statement;
use crate::table::ColumnRef;
use crate::writer::SqlWriter;
use quarry_core::{CastKind, CastSyntax, Dialect, Error, Result, Value};

/// A SQL expression node.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Literal value; safe constants inline, the rest parameterize
    Literal(Value),

    /// Bound parameter; always emits a placeholder
    Param(Value),

    /// Column reference
    Column(ColumnRef),

    /// Unary operation, prefix or postfix
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Binary operation
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// BETWEEN / NOT BETWEEN
    Between {
        operand: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },

    /// IN / NOT IN over a value list or a subquery
    In {
        operand: Box<Expr>,
        source: InSource,
        negated: bool,
    },

    /// IS [NOT] DISTINCT FROM, lowered per dialect
    Distinct {
        left: Box<Expr>,
        right: Box<Expr>,
        negated: bool,
    },

    /// Function call; the name is logical and remapped per dialect
    Func { name: String, args: Vec<Expr> },

    /// Explicit type cast
    Cast {
        operand: Box<Expr>,
        target: CastKind,
    },

    /// CASE [operand] WHEN ... THEN ... [ELSE ...] END
    Case {
        operand: Option<Box<Expr>>,
        branches: Vec<(Expr, Expr)>,
        otherwise: Option<Box<Expr>>,
    },

    /// EXISTS (subquery)
    Exists(Box<SelectStatement>),

    /// Scalar subquery
    Subquery(Box<SelectStatement>),

    /// Row constructor: (a, b, ...)
    Row(Vec<Expr>),

    /// Window application: func OVER ...
    Over {
        func: Box<Expr>,
        window: WindowRef,
    },

    /// Explicitly parenthesized expression
    Grouped(Box<Expr>),

    /// Raw SQL fragment (escape hatch)
    Raw(String),
}

/// The right-hand side of an IN expression.
#[derive(Debug, Clone)]
pub enum InSource {
    List(Vec<Expr>),
    Query(Box<SelectStatement>),
}

/// OVER target: a named window or an inline definition.
#[derive(Debug, Clone)]
pub enum WindowRef {
    Named(String),
    Inline(WindowDef),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Bitwise
    BitAnd,
    BitOr,
    BitXor,

    // String
    Concat,
    Like,
    NotLike,
    ILike,
    NotILike,
    Regexp,

    // Range
    RangeContains,
    RangeOverlap,
}

impl BinaryOp {
    /// Get the precedence of this operator (higher = binds tighter).
    pub const fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Eq
            | BinaryOp::NotEq
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq
            | BinaryOp::Like
            | BinaryOp::NotLike
            | BinaryOp::ILike
            | BinaryOp::NotILike
            | BinaryOp::Regexp
            | BinaryOp::RangeContains
            | BinaryOp::RangeOverlap => 4,
            BinaryOp::BitOr => 5,
            BinaryOp::BitXor => 6,
            BinaryOp::BitAnd => 7,
            BinaryOp::Add | BinaryOp::Sub | BinaryOp::Concat => 8,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 9,
        }
    }

    /// The SQL spelling of this operator for a dialect.
    const fn symbol(self, dialect: Dialect) -> &'static str {
        match self {
            BinaryOp::Eq => "=",
            BinaryOp::NotEq => "<>",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::Concat => "||",
            BinaryOp::Like => "LIKE",
            BinaryOp::NotLike => "NOT LIKE",
            BinaryOp::ILike => "ILIKE",
            BinaryOp::NotILike => "NOT ILIKE",
            BinaryOp::Regexp => match dialect {
                Dialect::Postgres => "~",
                _ => "REGEXP",
            },
            BinaryOp::RangeContains => "@>",
            BinaryOp::RangeOverlap => "&&",
        }
    }
}

/// Unary operators, prefix and postfix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    BitNot,
    IsNull,
    IsNotNull,
    IsTrue,
    IsNotTrue,
    IsFalse,
    IsNotFalse,
    IsUnknown,
    IsNotUnknown,
}

impl UnaryOp {
    /// Get the SQL representation of this operator.
    pub const fn as_str(self) -> &'static str {
        match self {
            UnaryOp::Not => "NOT",
            UnaryOp::Neg => "-",
            UnaryOp::BitNot => "~",
            UnaryOp::IsNull => "IS NULL",
            UnaryOp::IsNotNull => "IS NOT NULL",
            UnaryOp::IsTrue => "IS TRUE",
            UnaryOp::IsNotTrue => "IS NOT TRUE",
            UnaryOp::IsFalse => "IS FALSE",
            UnaryOp::IsNotFalse => "IS NOT FALSE",
            UnaryOp::IsUnknown => "IS UNKNOWN",
            UnaryOp::IsNotUnknown => "IS NOT UNKNOWN",
        }
    }

    /// Whether this operator prints before its operand.
    pub const fn is_prefix(self) -> bool {
        matches!(self, UnaryOp::Not | UnaryOp::Neg | UnaryOp::BitNot)
    }

    /// Get the precedence of this operator (higher = binds tighter).
    pub const fn precedence(self) -> u8 {
        match self {
            UnaryOp::Not => 3,
            UnaryOp::Neg | UnaryOp::BitNot => 10,
            _ => 4,
        }
    }
}

impl Expr {
    // ==================== Constructors ====================

    /// Create a bare column reference (no table qualifier).
    pub fn col(name: impl Into<String>) -> Self {
        Expr::Column(ColumnRef::bare(name))
    }

    /// Create a column reference from full column metadata.
    pub fn column(column: ColumnRef) -> Self {
        Expr::Column(column)
    }

    /// Create a literal value expression.
    pub fn lit(value: impl Into<Value>) -> Self {
        Expr::Literal(value.into())
    }

    /// Create a NULL literal.
    pub fn null() -> Self {
        Expr::Literal(Value::Null)
    }

    /// Create a bound parameter expression.
    pub fn param(value: impl Into<Value>) -> Self {
        Expr::Param(value.into())
    }

    /// Create a raw SQL expression (escape hatch).
    pub fn raw(sql: impl Into<String>) -> Self {
        Expr::Raw(sql.into())
    }

    /// Start building a CASE expression.
    pub fn case() -> CaseBuilder {
        CaseBuilder {
            operand: None,
            branches: Vec::new(),
        }
    }

    /// Start building a CASE expression with an operand.
    pub fn case_of(operand: impl Into<Expr>) -> CaseBuilder {
        CaseBuilder {
            operand: Some(Box::new(operand.into())),
            branches: Vec::new(),
        }
    }

    // ==================== Serialization ====================

    /// Precedence of this node; atoms never parenthesize.
    fn precedence(&self) -> u8 {
        match self {
            Expr::Binary { op, .. } => op.precedence(),
            Expr::Unary { op, .. } => op.precedence(),
            Expr::Between { .. } | Expr::In { .. } | Expr::Distinct { .. } => 4,
            _ => u8::MAX,
        }
    }

    /// Serialize as an operand of an operator with the given precedence.
    fn serialize_operand(&self, w: &mut SqlWriter, parent: u8) -> Result<()> {
        if self.precedence() <= parent {
            w.parens(|w| self.serialize(w))
        } else {
            self.serialize(w)
        }
    }

    // Parenthesization for unary operands: binary nodes and
    // lower-precedence unaries.
    fn serialize_unary_operand(&self, w: &mut SqlWriter, op: UnaryOp) -> Result<()> {
        let parens = match self {
            Expr::Binary { .. } | Expr::Between { .. } | Expr::In { .. }
            | Expr::Distinct { .. } => true,
            Expr::Unary { op: inner, .. } => inner.precedence() < op.precedence(),
            _ => false,
        };
        if parens {
            w.parens(|w| self.serialize(w))
        } else {
            self.serialize(w)
        }
    }

    /// Write this expression into the serializer buffer.
    pub fn serialize(&self, w: &mut SqlWriter) -> Result<()> {
        match self {
            Expr::Literal(value) => match value {
                Value::Null
                | Value::Bool(_)
                | Value::TinyInt(_)
                | Value::SmallInt(_)
                | Value::Int(_)
                | Value::BigInt(_)
                | Value::Float(_)
                | Value::Double(_)
                | Value::Default => {
                    w.literal(value);
                    Ok(())
                }
                other => {
                    w.placeholder(other.clone());
                    Ok(())
                }
            },

            Expr::Param(value) => {
                w.placeholder(value.clone());
                Ok(())
            }

            Expr::Column(column) => {
                column.serialize(w);
                Ok(())
            }

            Expr::Binary { left, op, right } => self.serialize_binary(w, left, *op, right),

            Expr::Unary { op, operand } => {
                if op.is_prefix() {
                    w.keyword(op.as_str());
                    // - and ~ attach directly to their operand
                    if matches!(op, UnaryOp::Neg | UnaryOp::BitNot) {
                        w.no_space();
                    }
                    operand.serialize_unary_operand(w, *op)
                } else {
                    operand.serialize_unary_operand(w, *op)?;
                    w.keyword(op.as_str());
                    Ok(())
                }
            }

            Expr::Between {
                operand,
                low,
                high,
                negated,
            } => {
                operand.serialize_operand(w, 4)?;
                if *negated {
                    w.keyword("NOT");
                }
                w.keyword("BETWEEN");
                low.serialize_operand(w, 4)?;
                w.keyword("AND");
                high.serialize_operand(w, 4)
            }

            Expr::In {
                operand,
                source,
                negated,
            } => {
                operand.serialize_operand(w, 4)?;
                if *negated {
                    w.keyword("NOT");
                }
                w.keyword("IN");
                match source {
                    InSource::List(items) => {
                        w.parens(|w| w.comma_separated(items, |w, e| e.serialize(w)))
                    }
                    InSource::Query(query) => w.subquery(|w| query.serialize(w)),
                }
            }

            Expr::Distinct {
                left,
                right,
                negated,
            } => self.serialize_distinct(w, left, right, *negated),

            Expr::Func { name, args } => {
                let mapped = w.dialect().function_name(name).to_string();
                if args.is_empty() && mapped.starts_with("CURRENT_") {
                    // niladic keyword form, no parentheses
                    w.raw(&mapped);
                    return Ok(());
                }
                w.raw(&mapped);
                w.glue("(");
                w.comma_separated(args, |w, e| e.serialize(w))?;
                w.glue(")");
                Ok(())
            }

            Expr::Cast { operand, target } => {
                let Some(type_name) = w.dialect().cast_type_name(*target) else {
                    return Err(Error::unsupported(w.dialect(), "CAST"));
                };
                match w.dialect().cast_syntax() {
                    CastSyntax::Postfix => {
                        operand.serialize_operand(w, u8::MAX - 1)?;
                        w.glue("::");
                        w.glue(type_name);
                        Ok(())
                    }
                    CastSyntax::Function => {
                        w.keyword("CAST");
                        w.glue("(");
                        operand.serialize(w)?;
                        w.keyword("AS");
                        w.raw(type_name);
                        w.glue(")");
                        Ok(())
                    }
                }
            }

            Expr::Case {
                operand,
                branches,
                otherwise,
            } => {
                w.keyword("CASE");
                if let Some(operand) = operand {
                    operand.serialize(w)?;
                }
                for (condition, result) in branches {
                    w.keyword("WHEN");
                    condition.serialize(w)?;
                    w.keyword("THEN");
                    result.serialize(w)?;
                }
                if let Some(otherwise) = otherwise {
                    w.keyword("ELSE");
                    otherwise.serialize(w)?;
                }
                w.keyword("END");
                Ok(())
            }

            Expr::Exists(query) => {
                w.keyword("EXISTS");
                w.subquery(|w| query.serialize(w))
            }

            Expr::Subquery(query) => w.subquery(|w| query.serialize(w)),

            Expr::Row(items) => w.parens(|w| w.comma_separated(items, |w, e| e.serialize(w))),

            Expr::Over { func, window } => {
                if !w.dialect().supports_window() {
                    return Err(Error::unsupported(w.dialect(), "window function"));
                }
                func.serialize(w)?;
                w.keyword("OVER");
                match window {
                    WindowRef::Named(name) => {
                        w.identifier(name);
                        Ok(())
                    }
                    WindowRef::Inline(def) => w.parens(|w| def.serialize(w)),
                }
            }

            Expr::Grouped(inner) => w.parens(|w| inner.serialize(w)),

            Expr::Raw(sql) => {
                w.raw(sql);
                Ok(())
            }
        }
    }

    fn serialize_binary(
        &self,
        w: &mut SqlWriter,
        left: &Expr,
        op: BinaryOp,
        right: &Expr,
    ) -> Result<()> {
        let dialect = w.dialect();

        // MySQL spells || as CONCAT()
        if op == BinaryOp::Concat && dialect == Dialect::Mysql {
            w.raw("CONCAT");
            w.glue("(");
            left.serialize(w)?;
            w.glue(",");
            right.serialize(w)?;
            w.glue(")");
            return Ok(());
        }

        // ILIKE folds to LOWER() LIKE LOWER() off Postgres
        if matches!(op, BinaryOp::ILike | BinaryOp::NotILike) && !dialect.supports_ilike() {
            w.raw("LOWER");
            w.glue("(");
            left.serialize(w)?;
            w.glue(")");
            w.keyword(if op == BinaryOp::NotILike {
                "NOT LIKE"
            } else {
                "LIKE"
            });
            w.raw("LOWER");
            w.glue("(");
            right.serialize(w)?;
            w.glue(")");
            return Ok(());
        }

        if op == BinaryOp::Regexp && !dialect.supports_regexp() {
            return Err(Error::unsupported(dialect, "REGEXP_LIKE"));
        }
        if matches!(op, BinaryOp::RangeContains | BinaryOp::RangeOverlap)
            && !dialect.supports_range_ops()
        {
            return Err(Error::unsupported(dialect, "range operator"));
        }

        let precedence = op.precedence();
        left.serialize_operand(w, precedence)?;
        w.keyword(op.symbol(dialect));
        right.serialize_operand(w, precedence)
    }

    // IS [NOT] DISTINCT FROM: native on Postgres, IS / IS NOT on
    // SQLite, CASE lowering on MySQL.
    fn serialize_distinct(
        &self,
        w: &mut SqlWriter,
        left: &Expr,
        right: &Expr,
        negated: bool,
    ) -> Result<()> {
        match w.dialect() {
            Dialect::Postgres => {
                left.serialize_operand(w, 4)?;
                w.keyword(if negated {
                    "IS NOT DISTINCT FROM"
                } else {
                    "IS DISTINCT FROM"
                });
                right.serialize_operand(w, 4)
            }
            Dialect::Sqlite => {
                left.serialize_operand(w, 4)?;
                w.keyword(if negated { "IS" } else { "IS NOT" });
                right.serialize_operand(w, 4)
            }
            Dialect::Mysql => {
                let (both_null, one_null, cmp) = if negated {
                    ("TRUE", "FALSE", BinaryOp::Eq)
                } else {
                    ("FALSE", "TRUE", BinaryOp::NotEq)
                };
                w.keyword("CASE");
                w.keyword("WHEN");
                left.serialize_operand(w, 4)?;
                w.keyword("IS NULL");
                w.keyword("AND");
                right.serialize_operand(w, 4)?;
                w.keyword("IS NULL");
                w.keyword("THEN");
                w.keyword(both_null);
                w.keyword("WHEN");
                left.serialize_operand(w, 4)?;
                w.keyword("IS NULL");
                w.keyword("OR");
                right.serialize_operand(w, 4)?;
                w.keyword("IS NULL");
                w.keyword("THEN");
                w.keyword(one_null);
                w.keyword("ELSE");
                left.serialize_operand(w, 4)?;
                w.keyword(cmp.symbol(Dialect::Mysql));
                right.serialize_operand(w, 4)?;
                w.keyword("END");
                Ok(())
            }
        }
    }

    // ==================== Traversal ====================

    /// Visit every column reference in this expression, including those
    /// inside nested subqueries.
    pub(crate) fn visit_columns<'a>(&'a self, f: &mut dyn FnMut(&'a ColumnRef)) {
        match self {
            Expr::Column(column) => f(column),
            Expr::Unary { operand, .. } => operand.visit_columns(f),
            Expr::Binary { left, right, .. } | Expr::Distinct { left, right, .. } => {
                left.visit_columns(f);
                right.visit_columns(f);
            }
            Expr::Between {
                operand, low, high, ..
            } => {
                operand.visit_columns(f);
                low.visit_columns(f);
                high.visit_columns(f);
            }
            Expr::In {
                operand, source, ..
            } => {
                operand.visit_columns(f);
                match source {
                    InSource::List(items) => {
                        for item in items {
                            item.visit_columns(f);
                        }
                    }
                    InSource::Query(query) => query.visit_columns(f),
                }
            }
            Expr::Func { args, .. } => {
                for arg in args {
                    arg.visit_columns(f);
                }
            }
            Expr::Cast { operand, .. } => operand.visit_columns(f),
            Expr::Case {
                operand,
                branches,
                otherwise,
            } => {
                if let Some(operand) = operand {
                    operand.visit_columns(f);
                }
                for (condition, result) in branches {
                    condition.visit_columns(f);
                    result.visit_columns(f);
                }
                if let Some(otherwise) = otherwise {
                    otherwise.visit_columns(f);
                }
            }
            Expr::Exists(query) | Expr::Subquery(query) => query.visit_columns(f),
            Expr::Row(items) => {
                for item in items {
                    item.visit_columns(f);
                }
            }
            Expr::Over { func, window } => {
                func.visit_columns(f);
                if let WindowRef::Inline(def) = window {
                    def.visit_columns(f);
                }
            }
            Expr::Grouped(inner) => inner.visit_columns(f),
            Expr::Literal(_) | Expr::Param(_) | Expr::Raw(_) => {}
        }
    }

    /// Tables referenced by nested subqueries, for reachability checks.
    pub(crate) fn visit_subquery_sources(&self, names: &mut Vec<String>) {
        match self {
            Expr::Exists(query) | Expr::Subquery(query) => query.collect_sources(names),
            Expr::In {
                operand, source, ..
            } => {
                operand.visit_subquery_sources(names);
                if let InSource::Query(query) = source {
                    query.collect_sources(names);
                }
            }
            Expr::Unary { operand, .. } | Expr::Cast { operand, .. } => {
                operand.visit_subquery_sources(names)
            }
            Expr::Binary { left, right, .. } | Expr::Distinct { left, right, .. } => {
                left.visit_subquery_sources(names);
                right.visit_subquery_sources(names);
            }
            Expr::Between {
                operand, low, high, ..
            } => {
                operand.visit_subquery_sources(names);
                low.visit_subquery_sources(names);
                high.visit_subquery_sources(names);
            }
            Expr::Func { args, .. } | Expr::Row(args) => {
                for arg in args {
                    arg.visit_subquery_sources(names);
                }
            }
            Expr::Case {
                operand,
                branches,
                otherwise,
            } => {
                if let Some(operand) = operand {
                    operand.visit_subquery_sources(names);
                }
                for (condition, result) in branches {
                    condition.visit_subquery_sources(names);
                    result.visit_subquery_sources(names);
                }
                if let Some(otherwise) = otherwise {
                    otherwise.visit_subquery_sources(names);
                }
            }
            Expr::Over { func, .. } => func.visit_subquery_sources(names),
            Expr::Grouped(inner) => inner.visit_subquery_sources(names),
            _ => {}
        }
    }
}

// ==================== CASE Builder ====================

/// Builder for CASE WHEN expressions.
#[derive(Debug, Clone)]
pub struct CaseBuilder {
    operand: Option<Box<Expr>>,
    branches: Vec<(Expr, Expr)>,
}

impl CaseBuilder {
    /// Add a WHEN condition with its THEN result.
    pub fn when(mut self, condition: impl Into<Expr>, result: impl Into<Expr>) -> Self {
        self.branches.push((condition.into(), result.into()));
        self
    }

    /// Finalize with an ELSE clause.
    pub fn otherwise(self, else_result: impl Into<Expr>) -> Expr {
        Expr::Case {
            operand: self.operand,
            branches: self.branches,
            otherwise: Some(Box::new(else_result.into())),
        }
    }

    /// Finalize without an ELSE clause.
    pub fn end(self) -> Expr {
        Expr::Case {
            operand: self.operand,
            branches: self.branches,
            otherwise: None,
        }
    }
}

// Conversions from plain values
impl From<Value> for Expr {
    fn from(v: Value) -> Self {
        Expr::Literal(v)
    }
}

impl From<&str> for Expr {
    fn from(s: &str) -> Self {
        Expr::Literal(Value::Text(s.to_string()))
    }
}

impl From<String> for Expr {
    fn from(s: String) -> Self {
        Expr::Literal(Value::Text(s))
    }
}

impl From<i32> for Expr {
    fn from(n: i32) -> Self {
        Expr::Literal(Value::Int(n))
    }
}

impl From<i64> for Expr {
    fn from(n: i64) -> Self {
        Expr::Literal(Value::BigInt(n))
    }
}

impl From<bool> for Expr {
    fn from(b: bool) -> Self {
        Expr::Literal(Value::Bool(b))
    }
}

impl From<f64> for Expr {
    fn from(n: f64) -> Self {
        Expr::Literal(Value::Double(n))
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn render(expr: &Expr, dialect: Dialect) -> (String, usize) {
        let mut w = SqlWriter::new(dialect);
        expr.serialize(&mut w).unwrap();
        let r = w.finish();
        (r.sql, r.args.len())
    }

    fn pg(expr: &Expr) -> String {
        render(expr, Dialect::Postgres).0
    }

    fn binary(left: Expr, op: BinaryOp, right: Expr) -> Expr {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    #[test]
    fn test_column_and_literal() {
        assert_eq!(pg(&Expr::col("age")), "age");
        assert_eq!(pg(&Expr::lit(42)), "42");
        assert_eq!(pg(&Expr::null()), "NULL");
    }

    #[test]
    fn test_string_literal_parameterizes() {
        let (sql, args) = render(&Expr::lit("hello"), Dialect::Postgres);
        assert_eq!(sql, "$1");
        assert_eq!(args, 1);
    }

    #[test]
    fn test_equal_precedence_parenthesizes_left() {
        // (a + b) + c: equal precedence operands are parenthesized
        let e = binary(
            binary(Expr::col("a"), BinaryOp::Add, Expr::col("b")),
            BinaryOp::Add,
            Expr::col("c"),
        );
        assert_eq!(pg(&e), "(a + b) + c");
    }

    #[test]
    fn test_higher_precedence_operand_is_bare() {
        // a * b + c: Mul binds tighter than Add, no parens
        let e = binary(
            binary(Expr::col("a"), BinaryOp::Mul, Expr::col("b")),
            BinaryOp::Add,
            Expr::col("c"),
        );
        assert_eq!(pg(&e), "a * b + c");
    }

    #[test]
    fn test_lower_precedence_operand_is_parenthesized() {
        // (a OR b) AND c
        let e = binary(
            binary(Expr::col("a"), BinaryOp::Or, Expr::col("b")),
            BinaryOp::And,
            Expr::col("c"),
        );
        assert_eq!(pg(&e), "(a OR b) AND c");
    }

    #[test]
    fn test_unary_parenthesizes_binary_operand() {
        let e = Expr::Unary {
            op: UnaryOp::Not,
            operand: Box::new(binary(Expr::col("a"), BinaryOp::And, Expr::col("b"))),
        };
        assert_eq!(pg(&e), "NOT (a AND b)");

        let bare = Expr::Unary {
            op: UnaryOp::IsTrue,
            operand: Box::new(Expr::col("active")),
        };
        assert_eq!(pg(&bare), "active IS TRUE");
    }

    #[test]
    fn test_between() {
        let e = Expr::Between {
            operand: Box::new(Expr::col("age")),
            low: Box::new(Expr::lit(18)),
            high: Box::new(Expr::lit(65)),
            negated: false,
        };
        assert_eq!(pg(&e), "age BETWEEN 18 AND 65");
    }

    #[test]
    fn test_in_list() {
        let e = Expr::In {
            operand: Box::new(Expr::col("status")),
            source: InSource::List(vec![Expr::lit(1), Expr::lit(2), Expr::lit(3)]),
            negated: true,
        };
        assert_eq!(pg(&e), "status NOT IN (1, 2, 3)");
    }

    #[test]
    fn test_concat_mysql_function_form() {
        let e = binary(Expr::col("first"), BinaryOp::Concat, Expr::col("last"));
        assert_eq!(pg(&e), "first || last");
        assert_eq!(render(&e, Dialect::Mysql).0, "CONCAT(first, last)");
    }

    #[test]
    fn test_ilike_fallback() {
        let e = binary(Expr::col("name"), BinaryOp::ILike, Expr::lit("%a%"));
        assert_eq!(pg(&e), "name ILIKE $1");
        assert_eq!(
            render(&e, Dialect::Sqlite).0,
            "LOWER(name) LIKE LOWER(?1)"
        );
    }

    #[test]
    fn test_regexp_dialects() {
        let e = binary(Expr::col("name"), BinaryOp::Regexp, Expr::lit("^a"));
        assert_eq!(pg(&e), "name ~ $1");
        assert_eq!(render(&e, Dialect::Mysql).0, "name REGEXP ?");

        let mut w = SqlWriter::new(Dialect::Sqlite);
        let err = e.serialize(&mut w).unwrap_err();
        assert_eq!(
            err.to_string(),
            "serialize: REGEXP_LIKE is not supported on sqlite"
        );
    }

    #[test]
    fn test_is_distinct_from_lowering() {
        let e = Expr::Distinct {
            left: Box::new(Expr::col("a")),
            right: Box::new(Expr::col("b")),
            negated: false,
        };
        assert_eq!(pg(&e), "a IS DISTINCT FROM b");
        assert_eq!(render(&e, Dialect::Sqlite).0, "a IS NOT b");
        assert_eq!(
            render(&e, Dialect::Mysql).0,
            "CASE WHEN a IS NULL AND b IS NULL THEN FALSE \
             WHEN a IS NULL OR b IS NULL THEN TRUE ELSE a <> b END"
        );
    }

    #[test]
    fn test_cast_syntax() {
        let e = Expr::Cast {
            operand: Box::new(binary(Expr::col("a"), BinaryOp::Add, Expr::col("b"))),
            target: CastKind::Text,
        };
        assert_eq!(pg(&e), "(a + b)::TEXT");
        assert_eq!(render(&e, Dialect::Mysql).0, "CAST(a + b AS CHAR)");
    }

    #[test]
    fn test_case_expression() {
        let e = Expr::case()
            .when(
                binary(Expr::col("status"), BinaryOp::Eq, Expr::lit(1)),
                Expr::lit(10),
            )
            .otherwise(Expr::lit(0));
        assert_eq!(pg(&e), "CASE WHEN status = 1 THEN 10 ELSE 0 END");
    }

    #[test]
    fn test_row_constructor() {
        let e = Expr::Row(vec![Expr::col("a"), Expr::col("b")]);
        assert_eq!(pg(&e), "(a, b)");
    }

    #[test]
    fn test_function_niladic_keyword() {
        let e = Expr::Func {
            name: "NOW".to_string(),
            args: Vec::new(),
        };
        assert_eq!(pg(&e), "NOW()");
        assert_eq!(render(&e, Dialect::Sqlite).0, "CURRENT_TIMESTAMP");
    }

    #[test]
    fn test_placeholder_ordering_matches_args() {
        let e = binary(
            binary(Expr::col("a"), BinaryOp::Eq, Expr::lit("x")),
            BinaryOp::And,
            binary(Expr::col("b"), BinaryOp::Eq, Expr::lit("y")),
        );
        let mut w = SqlWriter::new(Dialect::Postgres);
        e.serialize(&mut w).unwrap();
        let r = w.finish();
        assert_eq!(r.sql, "a = $1 AND b = $2");
        assert_eq!(
            r.args,
            vec![Value::Text("x".into()), Value::Text("y".into())]
        );
    }
}
