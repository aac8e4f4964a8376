//! Serializer buffer.
//!
//! `SqlWriter` grows a SQL string and an ordered argument vector.
//! Statements and expressions write themselves through its primitives;
//! spacing between tokens is handled here so the emitters stay free of
//! whitespace bookkeeping.

use crate::statement::Rendered;
use quarry_core::{Dialect, PlaceholderStyle, Result, Value};

/// A growing SQL buffer with its argument vector.
///
/// In debug mode parameters are inlined as escaped SQL literals rather
/// than appended as placeholders; that output is for logging only.
#[derive(Debug)]
pub struct SqlWriter {
    dialect: Dialect,
    sql: String,
    args: Vec<Value>,
    debug: bool,
    /// Current subquery nesting depth.
    depth: usize,
    /// Suppress the separating space before the next token.
    no_space: bool,
}

impl SqlWriter {
    /// Create a writer for executable SQL.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            sql: String::new(),
            args: Vec::new(),
            debug: false,
            depth: 0,
            no_space: false,
        }
    }

    /// Create a writer that inlines parameters for logging.
    pub fn debug(dialect: Dialect) -> Self {
        Self {
            debug: true,
            ..Self::new(dialect)
        }
    }

    /// The dialect this writer emits.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Current subquery nesting depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    // Insert a separating space unless the buffer ends at a position
    // where none is wanted (start, after '(', '.', ':' or a space).
    fn pad(&mut self) {
        if self.no_space {
            self.no_space = false;
            return;
        }
        match self.sql.chars().last() {
            None | Some(' ') | Some('(') | Some('.') | Some(':') => {}
            _ => self.sql.push(' '),
        }
    }

    /// Suppress the separating space before the next token (for tight
    /// prefixes such as unary minus).
    pub fn no_space(&mut self) {
        self.no_space = true;
    }

    /// Write a SQL keyword or operator token.
    pub fn keyword(&mut self, kw: &str) {
        self.pad();
        self.sql.push_str(kw);
    }

    /// Write raw text with normal spacing.
    pub fn raw(&mut self, text: &str) {
        self.pad();
        self.sql.push_str(text);
    }

    /// Write text glued to the previous token (no separating space).
    pub fn glue(&mut self, text: &str) {
        self.sql.push_str(text);
    }

    /// Write an identifier, quoting it when the dialect requires.
    pub fn identifier(&mut self, name: &str) {
        self.pad();
        if self.dialect.needs_quoting(name) {
            let q = self.dialect.quote_char();
            self.sql.push(q);
            for c in name.chars() {
                if c == q {
                    self.sql.push(q);
                }
                self.sql.push(c);
            }
            self.sql.push(q);
        } else {
            self.sql.push_str(name);
        }
    }

    /// Write a placeholder and append the value to the argument vector.
    ///
    /// In debug mode the value is inlined as a literal instead.
    pub fn placeholder(&mut self, value: Value) {
        if self.debug {
            self.literal(&value);
            return;
        }
        self.pad();
        match self.dialect.placeholder_style() {
            PlaceholderStyle::Indexed(prefix) => {
                self.sql.push(prefix);
                let index = self.args.len() + 1;
                self.sql.push_str(&index.to_string());
            }
            PlaceholderStyle::Positional => self.sql.push('?'),
        }
        self.args.push(value);
    }

    /// Inline a value as a SQL literal, escaped per dialect.
    pub fn literal(&mut self, value: &Value) {
        self.pad();
        match value {
            Value::Null => self.sql.push_str("NULL"),
            Value::Bool(b) => self.sql.push_str(self.dialect.bool_literal(*b)),
            Value::TinyInt(v) => self.sql.push_str(&v.to_string()),
            Value::SmallInt(v) => self.sql.push_str(&v.to_string()),
            Value::Int(v) => self.sql.push_str(&v.to_string()),
            Value::BigInt(v) => self.sql.push_str(&v.to_string()),
            Value::Float(v) => self.sql.push_str(&v.to_string()),
            Value::Double(v) => self.sql.push_str(&v.to_string()),
            Value::Decimal(s) => self.sql.push_str(s),
            Value::Text(s) => {
                self.sql.push('\'');
                self.sql.push_str(&self.dialect.escape_string(s));
                self.sql.push('\'');
            }
            Value::Bytes(b) => {
                let rendered = self.dialect.bytes_literal(b);
                self.sql.push_str(&rendered);
            }
            // temporal values carry their epoch encoding
            Value::Date(v) => self.sql.push_str(&v.to_string()),
            Value::Time(v) | Value::Timestamp(v) | Value::TimestampTz(v)
            | Value::Interval(v) => self.sql.push_str(&v.to_string()),
            Value::Uuid(bytes) => {
                let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
                self.sql.push('\'');
                self.sql.push_str(&format!(
                    "{}-{}-{}-{}-{}",
                    &hex[0..8],
                    &hex[8..12],
                    &hex[12..16],
                    &hex[16..20],
                    &hex[20..32]
                ));
                self.sql.push('\'');
            }
            Value::Json(j) => {
                let text = j.to_string();
                self.sql.push('\'');
                self.sql.push_str(&self.dialect.escape_string(&text));
                self.sql.push('\'');
            }
            Value::Default => self.sql.push_str("DEFAULT"),
        }
    }

    /// Run `f` inside parentheses.
    pub fn parens<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.pad();
        self.sql.push('(');
        f(self)?;
        self.sql.push(')');
        Ok(())
    }

    /// Run `f` inside parentheses at one deeper subquery level.
    pub fn subquery<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        self.depth += 1;
        let result = self.parens(f);
        self.depth -= 1;
        result
    }

    /// Write `items` separated by commas.
    pub fn comma_separated<T, F>(&mut self, items: &[T], mut f: F) -> Result<()>
    where
        F: FnMut(&mut Self, &T) -> Result<()>,
    {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.glue(",");
            }
            f(self, item)?;
        }
        Ok(())
    }

    /// Consume the writer, producing the rendered statement.
    pub fn finish(self) -> Rendered {
        Rendered {
            sql: self.sql,
            args: self.args,
        }
    }

    /// Consume the writer, keeping only the SQL text (debug rendering).
    pub fn into_sql(self) -> String {
        self.sql
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_indexed_and_positional() {
        let mut w = SqlWriter::new(Dialect::Postgres);
        w.placeholder(Value::Int(1));
        w.placeholder(Value::Int(2));
        let r = w.finish();
        assert_eq!(r.sql, "$1 $2");
        assert_eq!(r.args, vec![Value::Int(1), Value::Int(2)]);

        let mut w = SqlWriter::new(Dialect::Mysql);
        w.placeholder(Value::Int(1));
        w.placeholder(Value::Int(2));
        assert_eq!(w.finish().sql, "? ?");

        let mut w = SqlWriter::new(Dialect::Sqlite);
        w.placeholder(Value::Int(1));
        w.placeholder(Value::Int(2));
        assert_eq!(w.finish().sql, "?1 ?2");
    }

    #[test]
    fn test_debug_mode_inlines() {
        let mut w = SqlWriter::debug(Dialect::Postgres);
        w.keyword("SELECT");
        w.placeholder(Value::Text("O'Brien".to_string()));
        let sql = w.into_sql();
        assert_eq!(sql, "SELECT 'O''Brien'");
    }

    #[test]
    fn test_identifier_quoting() {
        let mut w = SqlWriter::new(Dialect::Postgres);
        w.identifier("film_id");
        w.identifier("user");
        assert_eq!(w.finish().sql, "film_id \"user\"");

        let mut w = SqlWriter::new(Dialect::Mysql);
        w.identifier("order");
        assert_eq!(w.finish().sql, "`order`");
    }

    #[test]
    fn test_qualified_spacing() {
        let mut w = SqlWriter::new(Dialect::Postgres);
        w.identifier("film");
        w.glue(".");
        w.identifier("film_id");
        assert_eq!(w.finish().sql, "film.film_id");
    }

    #[test]
    fn test_comma_separated_and_parens() {
        let mut w = SqlWriter::new(Dialect::Postgres);
        w.keyword("IN");
        w.parens(|w| {
            w.comma_separated(&[1, 2, 3], |w, v| {
                w.literal(&Value::Int(*v));
                Ok(())
            })
        })
        .unwrap();
        assert_eq!(w.finish().sql, "IN (1, 2, 3)");
    }

    #[test]
    fn test_bool_literal_rendering() {
        let mut w = SqlWriter::debug(Dialect::Sqlite);
        w.placeholder(Value::Bool(true));
        assert_eq!(w.into_sql(), "1");

        let mut w = SqlWriter::debug(Dialect::Postgres);
        w.placeholder(Value::Bool(true));
        assert_eq!(w.into_sql(), "TRUE");
    }
}
