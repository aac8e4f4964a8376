//! Shared test fixtures: hand-written equivalents of the artifacts the
//! schema generator emits (table handles, record types, an enum), plus
//! an in-memory connection over canned rows.
#![allow(dead_code)]

use quarry::{
    Column, ColumnInfo, Connection, Cx, Dialect, Error, Expression, GroupNode, IntExpr, Outcome,
    Record, RecordShape, Result, Row, Table, TextExpr, Value,
};
use std::future::Future;
use std::sync::{Arc, Mutex};

// ==================== Table handles ====================

pub struct FilmTable {
    pub table: Table,
    pub film_id: IntExpr,
    pub title: TextExpr,
    pub language_id: IntExpr,
}

impl FilmTable {
    pub fn new() -> Self {
        Self::from_table(Table::new(
            "film",
            vec![
                Column::primary_key("film_id"),
                Column::new("title"),
                Column::new("language_id"),
            ],
        ))
    }

    fn from_table(table: Table) -> Self {
        Self {
            film_id: IntExpr::from_column(table.column("film_id")),
            title: TextExpr::from_column(table.column("title")),
            language_id: IntExpr::from_column(table.column("language_id")),
            table,
        }
    }

    pub fn alias(&self, alias: &str) -> Self {
        Self::from_table(self.table.alias(alias))
    }
}

pub struct InventoryTable {
    pub table: Table,
    pub inventory_id: IntExpr,
    pub film_id: IntExpr,
    pub store_id: IntExpr,
}

impl InventoryTable {
    pub fn new() -> Self {
        Self::from_table(Table::new(
            "inventory",
            vec![
                Column::primary_key("inventory_id"),
                Column::new("film_id"),
                Column::new("store_id"),
            ],
        ))
    }

    fn from_table(table: Table) -> Self {
        Self {
            inventory_id: IntExpr::from_column(table.column("inventory_id")),
            film_id: IntExpr::from_column(table.column("film_id")),
            store_id: IntExpr::from_column(table.column("store_id")),
            table,
        }
    }

    pub fn alias(&self, alias: &str) -> Self {
        Self::from_table(self.table.alias(alias))
    }
}

pub struct UsersTable {
    pub table: Table,
    pub id: IntExpr,
    pub name: TextExpr,
}

impl UsersTable {
    pub fn new() -> Self {
        let table = Table::new(
            "users",
            vec![Column::primary_key("id"), Column::new("name")],
        );
        Self {
            id: IntExpr::from_column(table.column("id")),
            name: TextExpr::from_column(table.column("name")),
            table,
        }
    }
}

// ==================== Record types ====================

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Film {
    pub film_id: i32,
    pub title: String,
    pub language_id: i32,
}

impl Record for Film {
    fn shape() -> RecordShape {
        RecordShape::new("film")
            .key("film_id")
            .col("title")
            .col("language_id")
    }

    fn from_node(node: &GroupNode) -> Result<Self> {
        Ok(Self {
            film_id: node.scalar(0, "film_id")?,
            title: node.scalar(1, "title")?,
            language_id: node.scalar(2, "language_id")?,
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Inventory {
    pub inventory_id: i32,
    pub film_id: i32,
    pub store_id: i32,
}

impl Record for Inventory {
    fn shape() -> RecordShape {
        RecordShape::new("inventory")
            .key("inventory_id")
            .col("film_id")
            .col("store_id")
    }

    fn from_node(node: &GroupNode) -> Result<Self> {
        Ok(Self {
            inventory_id: node.scalar(0, "inventory_id")?,
            film_id: node.scalar(1, "film_id")?,
            store_id: node.scalar(2, "store_id")?,
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Store {
    pub store_id: i32,
}

impl Record for Store {
    fn shape() -> RecordShape {
        RecordShape::new("store").key("store_id")
    }

    fn from_node(node: &GroupNode) -> Result<Self> {
        Ok(Self {
            store_id: node.scalar(0, "store_id")?,
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Actor {
    pub actor_id: i32,
    pub first_name: String,
    pub last_name: String,
}

impl Record for Actor {
    fn shape() -> RecordShape {
        RecordShape::new("actor")
            .key("actor_id")
            .col("first_name")
            .col("last_name")
    }

    fn from_node(node: &GroupNode) -> Result<Self> {
        Ok(Self {
            actor_id: node.scalar(0, "actor_id")?,
            first_name: node.scalar(1, "first_name")?,
            last_name: node.scalar(2, "last_name")?,
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Language {
    pub language_id: i32,
    pub name: String,
}

impl Record for Language {
    fn shape() -> RecordShape {
        RecordShape::new("language").key("language_id").col("name")
    }

    fn from_node(node: &GroupNode) -> Result<Self> {
        Ok(Self {
            language_id: node.scalar(0, "language_id")?,
            name: node.scalar(1, "name")?,
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Customer {
    pub customer_id: i32,
    pub first_name: String,
}

impl Record for Customer {
    fn shape() -> RecordShape {
        RecordShape::new("customer")
            .key("customer_id")
            .col("first_name")
    }

    fn from_node(node: &GroupNode) -> Result<Self> {
        Ok(Self {
            customer_id: node.scalar(0, "customer_id")?,
            first_name: node.scalar(1, "first_name")?,
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Country {
    pub country_id: i32,
    pub country: String,
}

impl Record for Country {
    fn shape() -> RecordShape {
        RecordShape::new("country").key("country_id").col("country")
    }

    fn from_node(node: &GroupNode) -> Result<Self> {
        Ok(Self {
            country_id: node.scalar(0, "country_id")?,
            country: node.scalar(1, "country")?,
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct City {
    pub city_id: i32,
    pub city: String,
}

impl Record for City {
    fn shape() -> RecordShape {
        RecordShape::new("city").key("city_id").col("city")
    }

    fn from_node(node: &GroupNode) -> Result<Self> {
        Ok(Self {
            city_id: node.scalar(0, "city_id")?,
            city: node.scalar(1, "city")?,
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Address {
    pub address_id: i32,
    pub address: String,
}

impl Record for Address {
    fn shape() -> RecordShape {
        RecordShape::new("address").key("address_id").col("address")
    }

    fn from_node(node: &GroupNode) -> Result<Self> {
        Ok(Self {
            address_id: node.scalar(0, "address_id")?,
            address: node.scalar(1, "address")?,
        })
    }
}

/// A generated string-backed enum with its SQL decoder.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum MpaaRating {
    #[default]
    G,
    Pg,
    Pg13,
    R,
    Nc17,
}

impl quarry::FromValue for MpaaRating {
    fn from_value(value: &Value) -> Result<Self> {
        match value.as_str() {
            Some("G") => Ok(MpaaRating::G),
            Some("PG") => Ok(MpaaRating::Pg),
            Some("PG-13") => Ok(MpaaRating::Pg13),
            Some("R") => Ok(MpaaRating::R),
            Some("NC-17") => Ok(MpaaRating::Nc17),
            _ => Err(Error::coerce(value.type_name(), "MpaaRating")),
        }
    }
}

// ==================== Row helpers ====================

/// Build rows sharing one ColumnInfo.
pub fn make_rows(columns: &[&str], data: Vec<Vec<Value>>) -> Vec<Row> {
    let info = Arc::new(ColumnInfo::new(
        columns.iter().map(|c| c.to_string()).collect(),
    ));
    data.into_iter()
        .map(|values| Row::with_columns(Arc::clone(&info), values))
        .collect()
}

// ==================== Fake connection ====================

/// An in-memory connection returning canned rows; captures every
/// executed statement for assertions.
pub struct FakeConnection {
    dialect: Dialect,
    rows: Vec<Row>,
    pub captured: Mutex<Vec<(String, Vec<Value>)>>,
}

impl FakeConnection {
    pub fn new(dialect: Dialect, rows: Vec<Row>) -> Self {
        Self {
            dialect,
            rows,
            captured: Mutex::new(Vec::new()),
        }
    }

    pub fn empty(dialect: Dialect) -> Self {
        Self::new(dialect, Vec::new())
    }

    pub fn last_statement(&self) -> Option<(String, Vec<Value>)> {
        self.captured.lock().unwrap().last().cloned()
    }
}

impl Connection for FakeConnection {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn query(
        &self,
        _cx: &Cx,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = Outcome<Vec<Row>, Error>> + Send {
        self.captured
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        let rows = self.rows.clone();
        async move { Outcome::Ok(rows) }
    }

    fn query_one(
        &self,
        _cx: &Cx,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = Outcome<Option<Row>, Error>> + Send {
        self.captured
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        let row = self.rows.first().cloned();
        async move { Outcome::Ok(row) }
    }

    fn execute(
        &self,
        _cx: &Cx,
        sql: &str,
        params: &[Value],
    ) -> impl Future<Output = Outcome<u64, Error>> + Send {
        self.captured
            .lock()
            .unwrap()
            .push((sql.to_string(), params.to_vec()));
        async move { Outcome::Ok(0) }
    }
}

/// A connection whose every operation fails, for error-propagation
/// tests.
pub struct FailingConnection {
    dialect: Dialect,
}

impl FailingConnection {
    pub fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }
}

impl Connection for FailingConnection {
    fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn query(
        &self,
        _cx: &Cx,
        _sql: &str,
        _params: &[Value],
    ) -> impl Future<Output = Outcome<Vec<Row>, Error>> + Send {
        async { Outcome::Err(Error::exec("connection reset by peer")) }
    }

    fn query_one(
        &self,
        _cx: &Cx,
        _sql: &str,
        _params: &[Value],
    ) -> impl Future<Output = Outcome<Option<Row>, Error>> + Send {
        async { Outcome::Err(Error::exec("connection reset by peer")) }
    }

    fn execute(
        &self,
        _cx: &Cx,
        _sql: &str,
        _params: &[Value],
    ) -> impl Future<Output = Outcome<u64, Error>> + Send {
        async { Outcome::Err(Error::exec("connection reset by peer")) }
    }
}

/// Unwrap an Outcome in tests.
pub fn unwrap_outcome<T>(outcome: Outcome<T, Error>) -> T {
    match outcome {
        Outcome::Ok(value) => value,
        Outcome::Err(error) => panic!("unexpected error: {error}"),
        Outcome::Cancelled(reason) => panic!("cancelled: {reason:?}"),
        Outcome::Panicked(payload) => panic!("panicked: {payload:?}"),
    }
}
