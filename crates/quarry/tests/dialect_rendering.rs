//! Cross-dialect rendering and serializer invariants.

mod fixtures;

use fixtures::*;
use quarry::prelude::*;
use quarry::{CastKind, SelectStatement};

fn film_by_id(id_param: i32) -> (FilmTable, SelectStatement) {
    let film = FilmTable::new();
    let stmt = film
        .table
        .select(film.table.all_columns())
        .filter(film.film_id.clone().eq(IntExpr::param(id_param)));
    (film, stmt)
}

#[test]
fn same_statement_diverges_only_in_placeholders() {
    let (_, stmt) = film_by_id(42);

    let pg = stmt.finalize(Dialect::Postgres).unwrap();
    let my = stmt.finalize(Dialect::Mysql).unwrap();
    let lite = stmt.finalize(Dialect::Sqlite).unwrap();

    assert!(pg.sql.ends_with("WHERE film.film_id = $1"), "{}", pg.sql);
    assert!(my.sql.ends_with("WHERE film.film_id = ?"), "{}", my.sql);
    assert!(lite.sql.ends_with("WHERE film.film_id = ?1"), "{}", lite.sql);

    // identical argument vectors under every dialect
    assert_eq!(pg.args, vec![Value::Int(42)]);
    assert_eq!(pg.args, my.args);
    assert_eq!(pg.args, lite.args);
}

#[test]
fn placeholder_count_matches_argument_vector() {
    let film = FilmTable::new();
    let stmt = film
        .table
        .select(film.table.all_columns())
        .filter(
            film.title
                .clone()
                .like(TextExpr::param("%DINOSAUR%"))
                .and(film.film_id.clone().in_list([IntExpr::param(1), IntExpr::param(2)]))
                .or(film.language_id.clone().eq(IntExpr::param(6))),
        );

    let r = stmt.finalize(Dialect::Postgres).unwrap();
    let placeholders = r.sql.matches('$').count();
    assert_eq!(placeholders, r.args.len());
    assert_eq!(r.args.len(), 4);

    // placeholders appear in left-to-right argument order
    for (i, _) in r.args.iter().enumerate() {
        assert!(r.sql.contains(&format!("${}", i + 1)));
    }
}

#[test]
fn finalization_is_deterministic() {
    let (_, stmt) = film_by_id(7);
    let a = stmt.finalize(Dialect::Postgres).unwrap();
    let b = stmt.finalize(Dialect::Postgres).unwrap();
    assert_eq!(a.sql, b.sql);
    assert_eq!(a.args, b.args);
}

#[test]
fn range_union_renders_as_parenthesized_arithmetic() {
    let booked: RangeExpr<IntExpr> = RangeExpr::wrap(Expr::col("booked"));
    let requested: RangeExpr<IntExpr> = RangeExpr::wrap(Expr::col("requested"));

    let union = booked.clone().union(requested.clone());
    let stmt = SelectStatement::new().select(vec![union.clone().alias("span")]);
    let r = stmt.finalize(Dialect::Postgres).unwrap();
    assert_eq!(r.sql, "SELECT (booked + requested) AS span");

    // the union composes with range predicates per precedence
    let stmt = SelectStatement::new()
        .select(vec![union.contains(int(5)).alias("hit")]);
    let r = stmt.finalize(Dialect::Postgres).unwrap();
    assert_eq!(r.sql, "SELECT (booked + requested) @> 5 AS hit");

    // range operators are a Postgres capability
    let stmt = SelectStatement::new()
        .select(vec![booked.overlap(requested).alias("hit")]);
    let err = stmt.finalize(Dialect::Sqlite).unwrap_err();
    assert_eq!(
        err.to_string(),
        "serialize: range operator is not supported on sqlite"
    );
}

#[test]
fn table_aliasing_is_pure() {
    let film = FilmTable::new();
    let f1 = film.alias("x");
    let f2 = f1.alias("y");

    assert_eq!(film.table.alias_name(), None);
    assert_eq!(f1.table.alias_name(), Some("x"));
    assert_eq!(f2.table.alias_name(), Some("y"));

    // aliased handles resolve their columns through the alias
    let stmt = f2
        .table
        .select(vec![f2.film_id.clone().projected()])
        .filter(f2.film_id.clone().eq(IntExpr::param(1)));
    let r = stmt.finalize(Dialect::Postgres).unwrap();
    assert_eq!(
        r.sql,
        "SELECT y.film_id AS \"y.film_id\" FROM film AS y WHERE y.film_id = $1"
    );
}

#[test]
fn debug_sql_inlines_parameters_for_logging() {
    let film = FilmTable::new();
    let stmt = film
        .table
        .select(vec![film.film_id.clone().projected()])
        .filter(film.title.clone().eq(TextExpr::param("O'Brien's Movie")));

    let executable = stmt.finalize(Dialect::Postgres).unwrap();
    assert!(executable.sql.ends_with("= $1"));

    let debug = stmt.debug_sql(Dialect::Postgres).unwrap();
    assert!(debug.ends_with("= 'O''Brien''s Movie'"), "{debug}");
}

#[test]
fn unknown_dialect_is_a_fatal_configuration_error() {
    let err = Dialect::from_name("oracle").unwrap_err();
    assert_eq!(err.to_string(), "config: unknown dialect 'oracle'");
    assert_eq!(Dialect::from_name("PostgreSQL").unwrap(), Dialect::Postgres);
}

#[test]
fn null_safe_comparison_lowers_per_dialect() {
    let film = FilmTable::new();
    let stmt = film
        .table
        .select(vec![film.film_id.clone().projected()])
        .filter(
            film.language_id
                .clone()
                .is_distinct_from(IntExpr::param(3)),
        );

    let pg = stmt.finalize(Dialect::Postgres).unwrap();
    assert!(
        pg.sql.contains("film.language_id IS DISTINCT FROM $1"),
        "{}",
        pg.sql
    );

    let lite = stmt.finalize(Dialect::Sqlite).unwrap();
    assert!(
        lite.sql.contains("film.language_id IS NOT ?1"),
        "{}",
        lite.sql
    );

    let my = stmt.finalize(Dialect::Mysql).unwrap();
    assert!(my.sql.contains("CASE WHEN"), "{}", my.sql);
    // the lowering repeats the operand, so the parameter appears twice
    assert_eq!(my.args, vec![Value::Int(3), Value::Int(3), Value::Int(3)]);
}

#[test]
fn cast_and_boolean_literals_follow_the_profile() {
    let film = FilmTable::new();
    let stmt = film.table.select(vec![
        film.film_id.clone().cast_to(CastKind::Text).alias("id_text"),
        boolean(true).alias("flag"),
    ]);

    let pg = stmt.finalize(Dialect::Postgres).unwrap();
    assert!(
        pg.sql.contains("film.film_id::TEXT AS id_text"),
        "{}",
        pg.sql
    );
    assert!(pg.sql.contains("TRUE AS flag"));

    let my = stmt.finalize(Dialect::Mysql).unwrap();
    assert!(
        my.sql.contains("CAST(film.film_id AS CHAR) AS id_text"),
        "{}",
        my.sql
    );

    let lite = stmt.finalize(Dialect::Sqlite).unwrap();
    assert!(lite.sql.contains("1 AS flag"), "{}", lite.sql);
}

#[test]
fn reserved_identifiers_are_quoted_on_demand() {
    let order = quarry::Table::new(
        "order",
        vec![quarry::Column::primary_key("id"), quarry::Column::new("user")],
    );
    let stmt = order.select(order.all_columns());

    let pg = stmt.finalize(Dialect::Postgres).unwrap();
    assert!(
        pg.sql.contains("\"order\".id AS \"order.id\""),
        "{}",
        pg.sql
    );
    assert!(pg.sql.contains("\"order\".\"user\""), "{}", pg.sql);
    assert!(pg.sql.ends_with("FROM \"order\""), "{}", pg.sql);

    let my = stmt.finalize(Dialect::Mysql).unwrap();
    assert!(my.sql.contains("`order`.`user`"), "{}", my.sql);
}

#[test]
fn set_operation_round_trips_both_dialects() {
    let film = FilmTable::new();
    let recent = film
        .table
        .select(vec![film.film_id.clone().projected()])
        .filter(film.film_id.clone().gt(IntExpr::param(900)));
    let classics = film
        .table
        .select(vec![film.film_id.clone().projected()])
        .filter(film.film_id.clone().lt(IntExpr::param(100)));

    let stmt = recent.union(classics).order_by(OrderTerm::asc(Expr::col("film_id")));

    let pg = stmt.finalize(Dialect::Postgres).unwrap();
    assert!(pg.sql.contains(") UNION ("), "{}", pg.sql);
    assert_eq!(pg.args, vec![Value::Int(900), Value::Int(100)]);

    let my = stmt.finalize(Dialect::Mysql).unwrap();
    assert_eq!(my.args, pg.args);
}
