//! SQL function constructors.
//!
//! Functions carry logical names; dialect-divergent spellings (RANDOM
//! vs RAND, STRING_AGG vs GROUP_CONCAT, ...) are resolved by the
//! serializer through the dialect registry.

use crate::expr::Expr;
use crate::kinds::{
    AnyExpr, BoolExpr, Expression, FloatExpr, IntExpr, NumericExpr, TextExpr, TimestampTzExpr,
};
use crate::select::SelectStatement;

fn func(name: &str, args: Vec<Expr>) -> Expr {
    Expr::Func {
        name: name.to_string(),
        args,
    }
}

/// COUNT(expr)
pub fn count(e: impl Expression) -> IntExpr {
    IntExpr::wrap(func("COUNT", vec![e.into_expr()]))
}

/// COUNT(*)
pub fn count_star() -> IntExpr {
    IntExpr::wrap(func("COUNT", vec![Expr::raw("*")]))
}

/// SUM(expr)
pub fn sum(e: impl Expression) -> NumericExpr {
    NumericExpr::wrap(func("SUM", vec![e.into_expr()]))
}

/// AVG(expr)
pub fn avg(e: impl Expression) -> FloatExpr {
    FloatExpr::wrap(func("AVG", vec![e.into_expr()]))
}

/// MIN(expr); the result keeps the operand's kind.
pub fn min<E: Expression>(e: E) -> E {
    E::wrap(func("MIN", vec![e.into_expr()]))
}

/// MAX(expr); the result keeps the operand's kind.
pub fn max<E: Expression>(e: E) -> E {
    E::wrap(func("MAX", vec![e.into_expr()]))
}

/// COALESCE(a, b, ...); the result keeps the operands' kind.
pub fn coalesce<E: Expression>(args: Vec<E>) -> E {
    E::wrap(func(
        "COALESCE",
        args.into_iter().map(Expression::into_expr).collect(),
    ))
}

/// LOWER(text)
pub fn lower(e: impl Into<TextExpr>) -> TextExpr {
    let e: TextExpr = e.into();
    TextExpr::wrap(func("LOWER", vec![e.into_expr()]))
}

/// UPPER(text)
pub fn upper(e: impl Into<TextExpr>) -> TextExpr {
    let e: TextExpr = e.into();
    TextExpr::wrap(func("UPPER", vec![e.into_expr()]))
}

/// ABS(expr); the result keeps the operand's kind.
pub fn abs<E: Expression>(e: E) -> E {
    E::wrap(func("ABS", vec![e.into_expr()]))
}

/// ROUND(expr)
pub fn round(e: impl Into<FloatExpr>) -> FloatExpr {
    let e: FloatExpr = e.into();
    FloatExpr::wrap(func("ROUND", vec![e.into_expr()]))
}

/// Character length; LENGTH on SQLite, CHAR_LENGTH elsewhere.
pub fn char_length(e: impl Into<TextExpr>) -> IntExpr {
    let e: TextExpr = e.into();
    IntExpr::wrap(func("CHAR_LENGTH", vec![e.into_expr()]))
}

/// Current timestamp; NOW() or CURRENT_TIMESTAMP per dialect.
pub fn now() -> TimestampTzExpr {
    TimestampTzExpr::wrap(func("NOW", Vec::new()))
}

/// Random value; RANDOM() or RAND() per dialect.
pub fn random() -> FloatExpr {
    FloatExpr::wrap(func("RANDOM", Vec::new()))
}

/// String aggregation; STRING_AGG or GROUP_CONCAT per dialect.
pub fn string_agg(e: impl Into<TextExpr>, separator: impl Into<TextExpr>) -> TextExpr {
    let e: TextExpr = e.into();
    let separator: TextExpr = separator.into();
    TextExpr::wrap(func("STRING_AGG", vec![e.into_expr(), separator.into_expr()]))
}

/// ROW_NUMBER() window function; combine with `over`.
pub fn row_number() -> IntExpr {
    IntExpr::wrap(func("ROW_NUMBER", Vec::new()))
}

/// RANK() window function; combine with `over`.
pub fn rank() -> IntExpr {
    IntExpr::wrap(func("RANK", Vec::new()))
}

/// EXISTS (subquery)
pub fn exists(query: SelectStatement) -> BoolExpr {
    BoolExpr::wrap(Expr::Exists(Box::new(query)))
}

/// An arbitrary function call by name.
pub fn call(name: impl Into<String>, args: Vec<Expr>) -> AnyExpr {
    AnyExpr::wrap(Expr::Func {
        name: name.into(),
        args,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinds::OrderedExpression;
    use crate::writer::SqlWriter;
    use quarry_core::Dialect;

    fn render(e: impl Into<Expr>, dialect: Dialect) -> String {
        let mut w = SqlWriter::new(dialect);
        e.into().serialize(&mut w).unwrap();
        w.finish().sql
    }

    #[test]
    fn test_count_star() {
        assert_eq!(render(count_star(), Dialect::Postgres), "COUNT(*)");
    }

    #[test]
    fn test_dialect_remaps() {
        assert_eq!(render(random(), Dialect::Postgres), "RANDOM()");
        assert_eq!(render(random(), Dialect::Mysql), "RAND()");
        assert_eq!(render(now(), Dialect::Sqlite), "CURRENT_TIMESTAMP");

        let agg = string_agg(TextExpr::wrap(Expr::col("name")), ", ");
        let pg = render(agg.clone(), Dialect::Postgres);
        let my = render(agg, Dialect::Mysql);
        assert!(pg.starts_with("STRING_AGG("));
        assert!(my.starts_with("GROUP_CONCAT("));
    }

    #[test]
    fn test_kind_preserving_aggregates() {
        let e = max(IntExpr::wrap(Expr::col("age"))).gt(30);
        assert_eq!(render(e, Dialect::Postgres), "MAX(age) > 30");
    }
}
