//! Kind-gated operation surfaces over the expression AST.
//!
//! Each SQL type family gets a wrapper struct over [`Expr`] exposing
//! exactly the operations valid for that kind. The `wrap` constructor
//! coerces an arbitrary expression into a kind's surface without
//! emitting a SQL cast, for composition when the caller knows the
//! runtime kind.

use crate::clause::{OrderTerm, SelectItem, WindowDef};
use crate::expr::{BinaryOp, Expr, InSource, UnaryOp, WindowRef};
use crate::select::SelectStatement;
use crate::table::ColumnRef;
use quarry_core::{CastKind, Value};
use std::marker::PhantomData;

fn binary(left: impl Into<Expr>, op: BinaryOp, right: impl Into<Expr>) -> Expr {
    Expr::Binary {
        left: Box::new(left.into()),
        op,
        right: Box::new(right.into()),
    }
}

fn unary(op: UnaryOp, operand: impl Into<Expr>) -> Expr {
    Expr::Unary {
        op,
        operand: Box::new(operand.into()),
    }
}

/// Operations available on every expression kind.
pub trait Expression: Sized + Clone + Into<Expr> + From<Expr> {
    /// Borrow the underlying AST node.
    fn expr(&self) -> &Expr;

    /// Consume into the underlying AST node.
    fn into_expr(self) -> Expr {
        self.into()
    }

    /// Coerce an arbitrary expression into this kind's surface.
    ///
    /// No SQL cast is emitted; this only changes the compile-time
    /// operation surface.
    fn wrap(expr: impl Into<Expr>) -> Self {
        Self::from(expr.into())
    }

    /// Wrap a column reference.
    fn from_column(column: ColumnRef) -> Self {
        Self::from(Expr::Column(column))
    }

    /// A bound parameter of this kind; always emits a placeholder.
    fn param(value: impl Into<Value>) -> Self {
        Self::from(Expr::Param(value.into()))
    }

    /// Equal (=)
    fn eq(self, rhs: impl Into<Self>) -> BoolExpr {
        let rhs: Self = rhs.into();
        BoolExpr(binary(self, BinaryOp::Eq, rhs))
    }

    /// Not equal (<>)
    fn not_eq(self, rhs: impl Into<Self>) -> BoolExpr {
        let rhs: Self = rhs.into();
        BoolExpr(binary(self, BinaryOp::NotEq, rhs))
    }

    /// IS DISTINCT FROM (NULL-safe inequality)
    fn is_distinct_from(self, rhs: impl Into<Self>) -> BoolExpr {
        let rhs: Self = rhs.into();
        BoolExpr(Expr::Distinct {
            left: Box::new(self.into()),
            right: Box::new(rhs.into()),
            negated: false,
        })
    }

    /// IS NOT DISTINCT FROM (NULL-safe equality)
    fn is_not_distinct_from(self, rhs: impl Into<Self>) -> BoolExpr {
        let rhs: Self = rhs.into();
        BoolExpr(Expr::Distinct {
            left: Box::new(self.into()),
            right: Box::new(rhs.into()),
            negated: true,
        })
    }

    /// IS NULL
    fn is_null(self) -> BoolExpr {
        BoolExpr(unary(UnaryOp::IsNull, self))
    }

    /// IS NOT NULL
    fn is_not_null(self) -> BoolExpr {
        BoolExpr(unary(UnaryOp::IsNotNull, self))
    }

    /// IN a list of values
    fn in_list<T, I>(self, items: I) -> BoolExpr
    where
        T: Into<Self>,
        I: IntoIterator<Item = T>,
    {
        BoolExpr(Expr::In {
            operand: Box::new(self.into()),
            source: InSource::List(
                items
                    .into_iter()
                    .map(|item| {
                        let item: Self = item.into();
                        item.into()
                    })
                    .collect(),
            ),
            negated: false,
        })
    }

    /// NOT IN a list of values
    fn not_in_list<T, I>(self, items: I) -> BoolExpr
    where
        T: Into<Self>,
        I: IntoIterator<Item = T>,
    {
        BoolExpr(Expr::In {
            operand: Box::new(self.into()),
            source: InSource::List(
                items
                    .into_iter()
                    .map(|item| {
                        let item: Self = item.into();
                        item.into()
                    })
                    .collect(),
            ),
            negated: true,
        })
    }

    /// IN (subquery)
    fn in_query(self, query: SelectStatement) -> BoolExpr {
        BoolExpr(Expr::In {
            operand: Box::new(self.into()),
            source: InSource::Query(Box::new(query)),
            negated: false,
        })
    }

    /// NOT IN (subquery)
    fn not_in_query(self, query: SelectStatement) -> BoolExpr {
        BoolExpr(Expr::In {
            operand: Box::new(self.into()),
            source: InSource::Query(Box::new(query)),
            negated: true,
        })
    }

    /// Project this expression under an alias.
    fn alias(self, name: impl Into<String>) -> SelectItem {
        SelectItem::aliased(self.into_expr(), name)
    }

    /// Project this expression without an alias. Plain columns become
    /// auto-aliased column items so the mapper can match them.
    fn projected(self) -> SelectItem {
        match self.into_expr() {
            Expr::Column(column) => SelectItem::Column(column),
            other => SelectItem::Expr {
                expr: other,
                alias: None,
            },
        }
    }

    /// Ascending order term.
    fn asc(self) -> OrderTerm {
        OrderTerm::asc(self.into_expr())
    }

    /// Descending order term.
    fn desc(self) -> OrderTerm {
        OrderTerm::desc(self.into_expr())
    }

    /// Explicit SQL cast to a logical type kind.
    fn cast_to(self, target: CastKind) -> AnyExpr {
        AnyExpr(Expr::Cast {
            operand: Box::new(self.into()),
            target,
        })
    }

    /// Apply OVER with an inline window definition.
    fn over(self, window: WindowDef) -> Self {
        Self::from(Expr::Over {
            func: Box::new(self.into()),
            window: WindowRef::Inline(window),
        })
    }

    /// Apply OVER naming a WINDOW-clause definition.
    fn over_named(self, name: impl Into<String>) -> Self {
        Self::from(Expr::Over {
            func: Box::new(self.into()),
            window: WindowRef::Named(name.into()),
        })
    }
}

/// Comparison operations for kinds with a total order.
pub trait OrderedExpression: Expression {
    /// Less than (<)
    fn lt(self, rhs: impl Into<Self>) -> BoolExpr {
        let rhs: Self = rhs.into();
        BoolExpr(binary(self, BinaryOp::Lt, rhs))
    }

    /// Less than or equal (<=)
    fn lt_eq(self, rhs: impl Into<Self>) -> BoolExpr {
        let rhs: Self = rhs.into();
        BoolExpr(binary(self, BinaryOp::LtEq, rhs))
    }

    /// Greater than (>)
    fn gt(self, rhs: impl Into<Self>) -> BoolExpr {
        let rhs: Self = rhs.into();
        BoolExpr(binary(self, BinaryOp::Gt, rhs))
    }

    /// Greater than or equal (>=)
    fn gt_eq(self, rhs: impl Into<Self>) -> BoolExpr {
        let rhs: Self = rhs.into();
        BoolExpr(binary(self, BinaryOp::GtEq, rhs))
    }

    /// BETWEEN low AND high
    fn between(self, low: impl Into<Self>, high: impl Into<Self>) -> BoolExpr {
        let low: Self = low.into();
        let high: Self = high.into();
        BoolExpr(Expr::Between {
            operand: Box::new(self.into()),
            low: Box::new(low.into()),
            high: Box::new(high.into()),
            negated: false,
        })
    }

    /// NOT BETWEEN low AND high
    fn not_between(self, low: impl Into<Self>, high: impl Into<Self>) -> BoolExpr {
        let low: Self = low.into();
        let high: Self = high.into();
        BoolExpr(Expr::Between {
            operand: Box::new(self.into()),
            low: Box::new(low.into()),
            high: Box::new(high.into()),
            negated: true,
        })
    }
}

/// Arithmetic operations for numeric kinds.
pub trait NumericExpression: Expression {
    /// Addition (+)
    fn add(self, rhs: impl Into<Self>) -> Self {
        let rhs: Self = rhs.into();
        Self::from(binary(self, BinaryOp::Add, rhs))
    }

    /// Subtraction (-)
    fn sub(self, rhs: impl Into<Self>) -> Self {
        let rhs: Self = rhs.into();
        Self::from(binary(self, BinaryOp::Sub, rhs))
    }

    /// Multiplication (*)
    fn mul(self, rhs: impl Into<Self>) -> Self {
        let rhs: Self = rhs.into();
        Self::from(binary(self, BinaryOp::Mul, rhs))
    }

    /// Division (/)
    fn div(self, rhs: impl Into<Self>) -> Self {
        let rhs: Self = rhs.into();
        Self::from(binary(self, BinaryOp::Div, rhs))
    }

    /// Modulo (%)
    fn modulo(self, rhs: impl Into<Self>) -> Self {
        let rhs: Self = rhs.into();
        Self::from(binary(self, BinaryOp::Mod, rhs))
    }

    /// Negation (unary -)
    fn neg(self) -> Self {
        Self::from(unary(UnaryOp::Neg, self))
    }

    /// Bitwise AND (&)
    fn bit_and(self, rhs: impl Into<Self>) -> Self {
        let rhs: Self = rhs.into();
        Self::from(binary(self, BinaryOp::BitAnd, rhs))
    }

    /// Bitwise OR (|)
    fn bit_or(self, rhs: impl Into<Self>) -> Self {
        let rhs: Self = rhs.into();
        Self::from(binary(self, BinaryOp::BitOr, rhs))
    }

    /// Bitwise XOR (^)
    fn bit_xor(self, rhs: impl Into<Self>) -> Self {
        let rhs: Self = rhs.into();
        Self::from(binary(self, BinaryOp::BitXor, rhs))
    }

    /// Bitwise NOT (~)
    fn bit_not(self) -> Self {
        Self::from(unary(UnaryOp::BitNot, self))
    }
}

macro_rules! expression_kind {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name(pub(crate) Expr);

        impl From<Expr> for $name {
            fn from(expr: Expr) -> Self {
                Self(expr)
            }
        }

        impl From<$name> for Expr {
            fn from(wrapper: $name) -> Expr {
                wrapper.0
            }
        }

        impl Expression for $name {
            fn expr(&self) -> &Expr {
                &self.0
            }
        }
    };
}

expression_kind!(
    /// Boolean expressions.
    BoolExpr
);
expression_kind!(
    /// Integer expressions.
    IntExpr
);
expression_kind!(
    /// Floating-point expressions.
    FloatExpr
);
expression_kind!(
    /// Exact-numeric (decimal) expressions.
    NumericExpr
);
expression_kind!(
    /// Text expressions.
    TextExpr
);
expression_kind!(
    /// Binary-string expressions.
    BytesExpr
);
expression_kind!(
    /// Date expressions.
    DateExpr
);
expression_kind!(
    /// Time-of-day expressions.
    TimeExpr
);
expression_kind!(
    /// Timestamp (without zone) expressions.
    TimestampExpr
);
expression_kind!(
    /// Timestamp-with-timezone expressions.
    TimestampTzExpr
);
expression_kind!(
    /// Interval expressions.
    IntervalExpr
);
expression_kind!(
    /// Row (tuple) expressions.
    RowExpr
);
expression_kind!(
    /// An expression of unknown or irrelevant kind.
    AnyExpr
);

impl OrderedExpression for IntExpr {}
impl OrderedExpression for FloatExpr {}
impl OrderedExpression for NumericExpr {}
impl OrderedExpression for TextExpr {}
impl OrderedExpression for DateExpr {}
impl OrderedExpression for TimeExpr {}
impl OrderedExpression for TimestampExpr {}
impl OrderedExpression for TimestampTzExpr {}
impl OrderedExpression for IntervalExpr {}

impl NumericExpression for IntExpr {}
impl NumericExpression for FloatExpr {}
impl NumericExpression for NumericExpr {}

impl BoolExpr {
    /// Logical AND
    pub fn and(self, rhs: impl Into<BoolExpr>) -> BoolExpr {
        let rhs: BoolExpr = rhs.into();
        BoolExpr(binary(self, BinaryOp::And, rhs))
    }

    /// Logical OR
    pub fn or(self, rhs: impl Into<BoolExpr>) -> BoolExpr {
        let rhs: BoolExpr = rhs.into();
        BoolExpr(binary(self, BinaryOp::Or, rhs))
    }

    /// Logical NOT
    pub fn not(self) -> BoolExpr {
        BoolExpr(unary(UnaryOp::Not, self))
    }

    /// IS TRUE
    pub fn is_true(self) -> BoolExpr {
        BoolExpr(unary(UnaryOp::IsTrue, self))
    }

    /// IS NOT TRUE
    pub fn is_not_true(self) -> BoolExpr {
        BoolExpr(unary(UnaryOp::IsNotTrue, self))
    }

    /// IS FALSE
    pub fn is_false(self) -> BoolExpr {
        BoolExpr(unary(UnaryOp::IsFalse, self))
    }

    /// IS NOT FALSE
    pub fn is_not_false(self) -> BoolExpr {
        BoolExpr(unary(UnaryOp::IsNotFalse, self))
    }

    /// IS UNKNOWN
    pub fn is_unknown(self) -> BoolExpr {
        BoolExpr(unary(UnaryOp::IsUnknown, self))
    }

    /// IS NOT UNKNOWN
    pub fn is_not_unknown(self) -> BoolExpr {
        BoolExpr(unary(UnaryOp::IsNotUnknown, self))
    }
}

impl TextExpr {
    /// String concatenation (||, CONCAT on MySQL)
    pub fn concat(self, rhs: impl Into<TextExpr>) -> TextExpr {
        let rhs: TextExpr = rhs.into();
        TextExpr(binary(self, BinaryOp::Concat, rhs))
    }

    /// LIKE pattern match
    pub fn like(self, pattern: impl Into<TextExpr>) -> BoolExpr {
        let pattern: TextExpr = pattern.into();
        BoolExpr(binary(self, BinaryOp::Like, pattern))
    }

    /// NOT LIKE pattern match
    pub fn not_like(self, pattern: impl Into<TextExpr>) -> BoolExpr {
        let pattern: TextExpr = pattern.into();
        BoolExpr(binary(self, BinaryOp::NotLike, pattern))
    }

    /// Case-insensitive LIKE (native on Postgres, LOWER() elsewhere)
    pub fn ilike(self, pattern: impl Into<TextExpr>) -> BoolExpr {
        let pattern: TextExpr = pattern.into();
        BoolExpr(binary(self, BinaryOp::ILike, pattern))
    }

    /// Negated case-insensitive LIKE
    pub fn not_ilike(self, pattern: impl Into<TextExpr>) -> BoolExpr {
        let pattern: TextExpr = pattern.into();
        BoolExpr(binary(self, BinaryOp::NotILike, pattern))
    }

    /// Regular-expression match; a serialize error on dialects
    /// without regexp support.
    pub fn regexp_like(self, pattern: impl Into<TextExpr>) -> BoolExpr {
        let pattern: TextExpr = pattern.into();
        BoolExpr(binary(self, BinaryOp::Regexp, pattern))
    }
}

impl RowExpr {
    /// Build a row (tuple) expression: `(a, b, ...)`.
    pub fn new(items: impl IntoIterator<Item = Expr>) -> Self {
        RowExpr(Expr::Row(items.into_iter().collect()))
    }
}

/// Range expressions, parameterized by their element kind.
#[derive(Debug, Clone)]
pub struct RangeExpr<E: Expression> {
    node: Expr,
    _elem: PhantomData<E>,
}

impl<E: Expression> From<Expr> for RangeExpr<E> {
    fn from(expr: Expr) -> Self {
        Self {
            node: expr,
            _elem: PhantomData,
        }
    }
}

impl<E: Expression> From<RangeExpr<E>> for Expr {
    fn from(wrapper: RangeExpr<E>) -> Expr {
        wrapper.node
    }
}

impl<E: Expression> Expression for RangeExpr<E> {
    fn expr(&self) -> &Expr {
        &self.node
    }
}

impl<E: Expression> OrderedExpression for RangeExpr<E> {}

impl<E: Expression> RangeExpr<E> {
    /// Range containment of an element: `range @> elem`.
    pub fn contains(self, elem: impl Into<E>) -> BoolExpr {
        let elem: E = elem.into();
        BoolExpr(binary(self, BinaryOp::RangeContains, elem))
    }

    /// Range containment of a whole range: `range @> range`.
    pub fn contains_range(self, rhs: Self) -> BoolExpr {
        BoolExpr(binary(self, BinaryOp::RangeContains, rhs))
    }

    /// Range overlap: `range && range`.
    pub fn overlap(self, rhs: Self) -> BoolExpr {
        BoolExpr(binary(self, BinaryOp::RangeOverlap, rhs))
    }

    /// Range union, encoded arithmetically as `(lhs + rhs)`.
    pub fn union(self, rhs: Self) -> Self {
        Self::wrap(Expr::Grouped(Box::new(binary(self, BinaryOp::Add, rhs))))
    }

    /// Range intersection, encoded arithmetically as `(lhs * rhs)`.
    pub fn intersection(self, rhs: Self) -> Self {
        Self::wrap(Expr::Grouped(Box::new(binary(self, BinaryOp::Mul, rhs))))
    }

    /// Range difference, encoded arithmetically as `(lhs - rhs)`.
    pub fn difference(self, rhs: Self) -> Self {
        Self::wrap(Expr::Grouped(Box::new(binary(self, BinaryOp::Sub, rhs))))
    }
}

// ==================== Literal constructors ====================

/// Integer literal.
pub fn int(value: i64) -> IntExpr {
    IntExpr(Expr::Literal(Value::BigInt(value)))
}

/// Floating-point literal.
pub fn float(value: f64) -> FloatExpr {
    FloatExpr(Expr::Literal(Value::Double(value)))
}

/// Text literal (parameterized at render time).
pub fn text(value: impl Into<String>) -> TextExpr {
    TextExpr(Expr::Literal(Value::Text(value.into())))
}

/// Boolean literal.
pub fn boolean(value: bool) -> BoolExpr {
    BoolExpr(Expr::Literal(Value::Bool(value)))
}

/// Bytes literal (parameterized at render time).
pub fn bytes(value: Vec<u8>) -> BytesExpr {
    BytesExpr(Expr::Literal(Value::Bytes(value)))
}

/// Date literal from days since epoch.
pub fn date(days: i32) -> DateExpr {
    DateExpr(Expr::Literal(Value::Date(days)))
}

/// Time literal from microseconds since midnight.
pub fn time(micros: i64) -> TimeExpr {
    TimeExpr(Expr::Literal(Value::Time(micros)))
}

/// Timestamp literal from microseconds since epoch.
pub fn timestamp(micros: i64) -> TimestampExpr {
    TimestampExpr(Expr::Literal(Value::Timestamp(micros)))
}

/// Timestamp-with-timezone literal from microseconds since epoch, UTC.
pub fn timestamp_tz(micros: i64) -> TimestampTzExpr {
    TimestampTzExpr(Expr::Literal(Value::TimestampTz(micros)))
}

/// Interval literal from microseconds.
pub fn interval(micros: i64) -> IntervalExpr {
    IntervalExpr(Expr::Literal(Value::Interval(micros)))
}

/// NULL literal of no particular kind.
pub fn null() -> AnyExpr {
    AnyExpr(Expr::Literal(Value::Null))
}

/// An explicitly bound parameter.
pub fn param(value: impl Into<Value>) -> AnyExpr {
    AnyExpr(Expr::Param(value.into()))
}

// Literal conversions into wrapper kinds
impl From<i32> for IntExpr {
    fn from(v: i32) -> Self {
        IntExpr(Expr::Literal(Value::Int(v)))
    }
}

impl From<i64> for IntExpr {
    fn from(v: i64) -> Self {
        IntExpr(Expr::Literal(Value::BigInt(v)))
    }
}

impl From<f32> for FloatExpr {
    fn from(v: f32) -> Self {
        FloatExpr(Expr::Literal(Value::Float(v)))
    }
}

impl From<f64> for FloatExpr {
    fn from(v: f64) -> Self {
        FloatExpr(Expr::Literal(Value::Double(v)))
    }
}

impl From<f64> for NumericExpr {
    fn from(v: f64) -> Self {
        NumericExpr(Expr::Literal(Value::Double(v)))
    }
}

impl From<&str> for TextExpr {
    fn from(v: &str) -> Self {
        TextExpr(Expr::Literal(Value::Text(v.to_string())))
    }
}

impl From<String> for TextExpr {
    fn from(v: String) -> Self {
        TextExpr(Expr::Literal(Value::Text(v)))
    }
}

impl From<bool> for BoolExpr {
    fn from(v: bool) -> Self {
        BoolExpr(Expr::Literal(Value::Bool(v)))
    }
}

impl From<i32> for DateExpr {
    fn from(v: i32) -> Self {
        DateExpr(Expr::Literal(Value::Date(v)))
    }
}

impl From<i64> for TimeExpr {
    fn from(v: i64) -> Self {
        TimeExpr(Expr::Literal(Value::Time(v)))
    }
}

impl From<i64> for TimestampExpr {
    fn from(v: i64) -> Self {
        TimestampExpr(Expr::Literal(Value::Timestamp(v)))
    }
}

impl From<i64> for TimestampTzExpr {
    fn from(v: i64) -> Self {
        TimestampTzExpr(Expr::Literal(Value::TimestampTz(v)))
    }
}

impl From<i64> for IntervalExpr {
    fn from(v: i64) -> Self {
        IntervalExpr(Expr::Literal(Value::Interval(v)))
    }
}

impl From<Vec<u8>> for BytesExpr {
    fn from(v: Vec<u8>) -> Self {
        BytesExpr(Expr::Literal(Value::Bytes(v)))
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::SqlWriter;
    use quarry_core::Dialect;

    fn pg(expr: impl Into<Expr>) -> String {
        let mut w = SqlWriter::new(Dialect::Postgres);
        expr.into().serialize(&mut w).unwrap();
        w.finish().sql
    }

    fn col(name: &str) -> Expr {
        Expr::col(name)
    }

    #[test]
    fn test_comparison_chain() {
        let e = IntExpr::wrap(col("age")).gt_eq(18).and(
            IntExpr::wrap(col("age")).lt(65),
        );
        assert_eq!(pg(e), "age >= 18 AND age < 65");
    }

    #[test]
    fn test_wrap_does_not_cast() {
        let wrapped = IntExpr::wrap(col("anything"));
        assert_eq!(pg(wrapped), "anything");
    }

    #[test]
    fn test_bool_surface() {
        let e = BoolExpr::wrap(col("a")).and(BoolExpr::wrap(col("b"))).is_not_true();
        assert_eq!(pg(e), "(a AND b) IS NOT TRUE");
    }

    #[test]
    fn test_numeric_surface() {
        let e = IntExpr::wrap(col("a")).add(IntExpr::wrap(col("b"))).mul(2);
        assert_eq!(pg(e), "(a + b) * 2");

        let n = IntExpr::wrap(col("balance")).neg();
        assert_eq!(pg(n), "-balance");
    }

    #[test]
    fn test_text_surface() {
        let e = TextExpr::wrap(col("name")).like("%jet%");
        assert_eq!(pg(e), "name LIKE $1");

        let c = TextExpr::wrap(col("first")).concat(TextExpr::wrap(col("last")));
        assert_eq!(pg(c), "first || last");
    }

    #[test]
    fn test_between_and_in() {
        let e = IntExpr::wrap(col("age")).between(18, 65);
        assert_eq!(pg(e), "age BETWEEN 18 AND 65");

        let e = IntExpr::wrap(col("status")).in_list([1, 2, 3]);
        assert_eq!(pg(e), "status IN (1, 2, 3)");
    }

    #[test]
    fn test_is_distinct_from() {
        let e = IntExpr::wrap(col("a")).is_distinct_from(IntExpr::wrap(col("b")));
        assert_eq!(pg(e), "a IS DISTINCT FROM b");
    }

    #[test]
    fn test_range_algebra_renders_arithmetically() {
        let a: RangeExpr<IntExpr> = RangeExpr::wrap(col("a"));
        let b: RangeExpr<IntExpr> = RangeExpr::wrap(col("b"));
        assert_eq!(pg(a.clone().union(b.clone())), "(a + b)");
        assert_eq!(pg(a.clone().intersection(b.clone())), "(a * b)");
        assert_eq!(pg(a.clone().difference(b.clone())), "(a - b)");
        assert_eq!(pg(a.clone().contains(int(5))), "a @> 5");
        assert_eq!(pg(a.clone().overlap(b.clone())), "a && b");
        // comparison surface is shared
        assert_eq!(pg(a.lt_eq(b)), "a <= b");
    }

    #[test]
    fn test_row_comparison() {
        let lhs = RowExpr::new([col("a"), col("b")]);
        let rhs = RowExpr::new([col("c"), col("d")]);
        assert_eq!(pg(lhs.eq(rhs)), "(a, b) = (c, d)");
    }

    #[test]
    fn test_null_literal() {
        assert_eq!(pg(null()), "NULL");
    }
}
