//! Table handles and column references.
//!
//! A [`Table`] is the immutable value a generated table handle is built
//! around: (schema, name, alias) plus the ordered column list. Aliasing
//! produces a new handle; the source is never mutated.

use crate::clause::SelectItem;
use crate::delete::DeleteStatement;
use crate::insert::InsertStatement;
use crate::select::SelectStatement;
use crate::update::UpdateStatement;
use crate::writer::SqlWriter;

/// A fully-resolved column reference inside an expression tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    pub schema: Option<String>,
    /// Owning table name; empty for bare references
    pub table: String,
    /// Alias of the owning table, when the table is aliased
    pub table_alias: Option<String>,
    pub name: String,
    pub primary_key: bool,
}

impl ColumnRef {
    /// A bare column reference with no table qualifier.
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            table: String::new(),
            table_alias: None,
            name: name.into(),
            primary_key: false,
        }
    }

    /// The qualifier this column renders with: alias first, then table.
    pub fn qualifier(&self) -> Option<&str> {
        match (&self.table_alias, self.table.is_empty()) {
            (Some(alias), _) => Some(alias),
            (None, false) => Some(&self.table),
            (None, true) => None,
        }
    }

    /// The result-column label the mapper matches on: `qualifier.name`,
    /// or the bare name for unqualified references.
    pub fn result_label(&self) -> String {
        match self.qualifier() {
            Some(qualifier) => format!("{qualifier}.{}", self.name),
            None => self.name.clone(),
        }
    }

    pub(crate) fn serialize(&self, w: &mut SqlWriter) {
        match (&self.table_alias, &self.schema) {
            (Some(alias), _) => {
                w.identifier(alias);
                w.glue(".");
            }
            (None, Some(schema)) if !self.table.is_empty() => {
                w.identifier(schema);
                w.glue(".");
                w.identifier(&self.table);
                w.glue(".");
            }
            (None, _) if !self.table.is_empty() => {
                w.identifier(&self.table);
                w.glue(".");
            }
            _ => {}
        }
        w.identifier(&self.name);
    }
}

/// A column definition inside a table handle.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: &'static str,
    pub primary_key: bool,
}

impl Column {
    /// A plain column.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            primary_key: false,
        }
    }

    /// A primary-key column.
    pub const fn primary_key(name: &'static str) -> Self {
        Self {
            name,
            primary_key: true,
        }
    }
}

/// An immutable table handle.
#[derive(Debug, Clone)]
pub struct Table {
    schema: Option<String>,
    name: String,
    alias: Option<String>,
    columns: Vec<Column>,
}

impl Table {
    /// Create a table handle with its column list.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            alias: None,
            columns,
        }
    }

    /// Create a schema-qualified table handle.
    pub fn with_schema(
        schema: impl Into<String>,
        name: impl Into<String>,
        columns: Vec<Column>,
    ) -> Self {
        Self {
            schema: Some(schema.into()),
            name: name.into(),
            alias: None,
            columns,
        }
    }

    /// Reference a table (or CTE) by name only, with no column list.
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Schema name, if qualified.
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// Current alias, if aliased.
    pub fn alias_name(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Return an independently-aliased copy. The source handle is
    /// unchanged; columns of the copy resolve through the alias.
    pub fn alias(&self, alias: impl Into<String>) -> Table {
        Table {
            schema: self.schema.clone(),
            name: self.name.clone(),
            alias: Some(alias.into()),
            columns: self.columns.clone(),
        }
    }

    /// The name this table is reachable by inside a statement.
    pub(crate) fn source_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Build a reference to one of this table's columns.
    ///
    /// The primary-key flag is taken from the column list; names not in
    /// the list resolve as plain non-key columns.
    pub fn column(&self, name: &str) -> ColumnRef {
        let primary_key = self
            .columns
            .iter()
            .any(|c| c.name == name && c.primary_key);
        ColumnRef {
            schema: self.schema.clone(),
            table: self.name.clone(),
            table_alias: self.alias.clone(),
            name: name.to_string(),
            primary_key,
        }
    }

    /// Projection of every column, in declaration order.
    pub fn all_columns(&self) -> Vec<SelectItem> {
        self.columns
            .iter()
            .map(|c| SelectItem::Column(self.column(c.name)))
            .collect()
    }

    /// The non-primary-key columns, for UPDATE SET lists.
    pub fn mutable_columns(&self) -> Vec<ColumnRef> {
        self.columns
            .iter()
            .filter(|c| !c.primary_key)
            .map(|c| self.column(c.name))
            .collect()
    }

    /// Start a SELECT over this table.
    pub fn select(&self, items: Vec<SelectItem>) -> SelectStatement {
        SelectStatement::new().select(items).from(self)
    }

    /// Start an INSERT into this table.
    pub fn insert(&self) -> InsertStatement {
        InsertStatement::new(self)
    }

    /// Start an UPDATE of this table.
    pub fn update(&self) -> UpdateStatement {
        UpdateStatement::new(self)
    }

    /// Start a DELETE from this table.
    pub fn delete(&self) -> DeleteStatement {
        DeleteStatement::new(self)
    }

    pub(crate) fn serialize_source(&self, w: &mut SqlWriter) {
        if let Some(schema) = &self.schema {
            w.identifier(schema);
            w.glue(".");
        }
        w.identifier(&self.name);
        if let Some(alias) = &self.alias {
            w.keyword("AS");
            w.identifier(alias);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn film_table() -> Table {
        Table::new(
            "film",
            vec![
                Column::primary_key("film_id"),
                Column::new("title"),
                Column::new("language_id"),
            ],
        )
    }

    #[test]
    fn test_alias_is_pure() {
        let film = film_table();
        let f1 = film.alias("f1");
        let f2 = f1.alias("f2");

        assert_eq!(film.alias_name(), None);
        assert_eq!(f1.alias_name(), Some("f1"));
        assert_eq!(f2.alias_name(), Some("f2"));
        // column identity is shared, resolution goes through the alias
        assert_eq!(f2.column("film_id").table, "film");
        assert_eq!(f2.column("film_id").table_alias.as_deref(), Some("f2"));
    }

    #[test]
    fn test_primary_key_flag() {
        let film = film_table();
        assert!(film.column("film_id").primary_key);
        assert!(!film.column("title").primary_key);
    }

    #[test]
    fn test_result_label() {
        let film = film_table();
        assert_eq!(film.column("title").result_label(), "film.title");
        assert_eq!(
            film.alias("f").column("title").result_label(),
            "f.title"
        );
        assert_eq!(ColumnRef::bare("title").result_label(), "title");
    }

    #[test]
    fn test_mutable_columns_excludes_keys() {
        let film = film_table();
        let mutable: Vec<_> = film
            .mutable_columns()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(mutable, vec!["title", "language_id"]);
    }
}
