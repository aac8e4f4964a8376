//! SQL dialect profiles.
//!
//! A `Dialect` value bundles everything the serializer needs to emit
//! portable SQL: identifier quoting, placeholder scheme, literal
//! rendering, cast syntax and type names, function remapping, the
//! reserved-word set, and capability flags for constructs that not
//! every database can express.

use crate::error::{Error, Result};

/// SQL dialect for generating dialect-specific SQL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dialect {
    /// PostgreSQL dialect (uses $1, $2 placeholders)
    #[default]
    Postgres,
    /// MySQL dialect (uses ? placeholders)
    Mysql,
    /// SQLite dialect (uses ?1, ?2 placeholders)
    Sqlite,
}

/// How a dialect renders bound-parameter placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// 1-based indexed placeholders with the given prefix ($1, ?1, ...)
    Indexed(char),
    /// Bare positional placeholders (?)
    Positional,
}

/// How a dialect spells an explicit type cast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastSyntax {
    /// expr::TYPE
    Postfix,
    /// CAST(expr AS TYPE)
    Function,
}

/// Logical type kinds usable as cast targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastKind {
    Bool,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Numeric,
    Text,
    Bytes,
    Date,
    Time,
    Timestamp,
    TimestampTz,
    Interval,
}

// Words that force identifier quoting on every dialect.
const COMMON_RESERVED: &[&str] = &[
    "all", "and", "any", "as", "asc", "between", "by", "case", "cast", "check", "collate",
    "column", "constraint", "create", "cross", "current_date", "current_time",
    "current_timestamp", "default", "delete", "desc", "distinct", "drop", "else", "end",
    "except", "exists", "false", "for", "foreign", "from", "full", "group", "having", "in",
    "inner", "insert", "intersect", "into", "is", "join", "left", "like", "limit", "not",
    "null", "offset", "on", "or", "order", "outer", "primary", "references", "right",
    "select", "set", "table", "then", "to", "true", "union", "unique", "update", "user",
    "using", "values", "when", "where", "window", "with",
];

const POSTGRES_RESERVED: &[&str] = &[
    "analyse", "analyze", "array", "asymmetric", "authorization", "binary", "both",
    "concurrently", "current_user", "deferrable", "do", "fetch", "freeze", "grant", "ilike",
    "initially", "lateral", "leading", "localtime", "localtimestamp", "only", "overlaps",
    "placing", "returning", "session_user", "similar", "some", "symmetric", "trailing",
    "variadic", "verbose",
];

const MYSQL_RESERVED: &[&str] = &[
    "accessible", "add", "bigint", "blob", "change", "char", "condition", "continue",
    "convert", "database", "databases", "decimal", "declare", "div", "double", "explain",
    "float", "index", "int", "interval", "key", "keys", "kill", "lock", "long", "match",
    "rank", "read", "regexp", "rename", "replace", "require", "schema", "show", "smallint",
    "trigger", "unlock", "unsigned", "varchar", "write",
];

const SQLITE_RESERVED: &[&str] = &[
    "abort", "action", "add", "after", "attach", "autoincrement", "before", "begin",
    "commit", "conflict", "database", "deferred", "detach", "escape", "except", "exclusive",
    "explain", "fail", "glob", "if", "ignore", "immediate", "index", "indexed", "instead",
    "isnull", "key", "match", "notnull", "plan", "pragma", "query", "raise", "regexp",
    "reindex", "release", "rename", "replace", "restrict", "rollback", "row", "savepoint",
    "temp", "temporary", "transaction", "trigger", "vacuum", "view", "virtual", "without",
];

impl Dialect {
    /// Select a dialect by name.
    ///
    /// An unknown name is a fatal configuration error.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::Mysql),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            other => Err(Error::Config(format!("unknown dialect '{other}'"))),
        }
    }

    /// Canonical lowercase name of this dialect.
    pub const fn name(self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::Mysql => "mysql",
            Dialect::Sqlite => "sqlite",
        }
    }

    /// The identifier quote character.
    pub const fn quote_char(self) -> char {
        match self {
            Dialect::Postgres | Dialect::Sqlite => '"',
            Dialect::Mysql => '`',
        }
    }

    /// The placeholder scheme for bound parameters.
    pub const fn placeholder_style(self) -> PlaceholderStyle {
        match self {
            Dialect::Postgres => PlaceholderStyle::Indexed('$'),
            Dialect::Sqlite => PlaceholderStyle::Indexed('?'),
            Dialect::Mysql => PlaceholderStyle::Positional,
        }
    }

    /// Render a boolean literal.
    pub const fn bool_literal(self, value: bool) -> &'static str {
        match self {
            Dialect::Postgres | Dialect::Mysql => {
                if value {
                    "TRUE"
                } else {
                    "FALSE"
                }
            }
            Dialect::Sqlite => {
                if value {
                    "1"
                } else {
                    "0"
                }
            }
        }
    }

    /// Escape the inner text of a string literal (quote doubling).
    pub fn escape_string(self, s: &str) -> String {
        s.replace('\'', "''")
    }

    /// Render a bytes literal for debug SQL.
    pub fn bytes_literal(self, bytes: &[u8]) -> String {
        let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
        match self {
            Dialect::Postgres => format!("'\\x{hex}'"),
            Dialect::Mysql | Dialect::Sqlite => format!("X'{hex}'"),
        }
    }

    /// The cast spelling this dialect uses.
    pub const fn cast_syntax(self) -> CastSyntax {
        match self {
            Dialect::Postgres => CastSyntax::Postfix,
            Dialect::Mysql | Dialect::Sqlite => CastSyntax::Function,
        }
    }

    /// Map a logical cast kind to this dialect's type name.
    ///
    /// Returns `None` where the dialect has no usable spelling, which
    /// the serializer reports as a serialization error.
    pub const fn cast_type_name(self, kind: CastKind) -> Option<&'static str> {
        match self {
            Dialect::Postgres => Some(match kind {
                CastKind::Bool => "BOOLEAN",
                CastKind::SmallInt => "SMALLINT",
                CastKind::Int => "INTEGER",
                CastKind::BigInt => "BIGINT",
                CastKind::Float => "REAL",
                CastKind::Double => "DOUBLE PRECISION",
                CastKind::Numeric => "NUMERIC",
                CastKind::Text => "TEXT",
                CastKind::Bytes => "BYTEA",
                CastKind::Date => "DATE",
                CastKind::Time => "TIME",
                CastKind::Timestamp => "TIMESTAMP",
                CastKind::TimestampTz => "TIMESTAMPTZ",
                CastKind::Interval => "INTERVAL",
            }),
            Dialect::Mysql => match kind {
                CastKind::Bool | CastKind::SmallInt | CastKind::Int | CastKind::BigInt => {
                    Some("SIGNED")
                }
                CastKind::Float | CastKind::Double => Some("DOUBLE"),
                CastKind::Numeric => Some("DECIMAL"),
                CastKind::Text => Some("CHAR"),
                CastKind::Bytes => Some("BINARY"),
                CastKind::Date => Some("DATE"),
                CastKind::Time => Some("TIME"),
                CastKind::Timestamp | CastKind::TimestampTz => Some("DATETIME"),
                CastKind::Interval => None,
            },
            Dialect::Sqlite => match kind {
                CastKind::Bool | CastKind::SmallInt | CastKind::Int | CastKind::BigInt => {
                    Some("INTEGER")
                }
                CastKind::Float | CastKind::Double => Some("REAL"),
                CastKind::Numeric => Some("NUMERIC"),
                CastKind::Text | CastKind::Date | CastKind::Time | CastKind::Timestamp
                | CastKind::TimestampTz => Some("TEXT"),
                CastKind::Bytes => Some("BLOB"),
                CastKind::Interval => None,
            },
        }
    }

    /// Map a logical function name to this dialect's spelling.
    ///
    /// Unknown names pass through unchanged.
    pub fn function_name<'a>(self, logical: &'a str) -> &'a str {
        match (self, logical) {
            (Dialect::Mysql, "RANDOM") => "RAND",
            (Dialect::Sqlite, "NOW") => "CURRENT_TIMESTAMP",
            (Dialect::Mysql | Dialect::Sqlite, "STRING_AGG") => "GROUP_CONCAT",
            (Dialect::Sqlite, "CHAR_LENGTH") => "LENGTH",
            _ => logical,
        }
    }

    /// Check whether a word is reserved in this dialect.
    pub fn is_reserved(self, word: &str) -> bool {
        let lower = word.to_ascii_lowercase();
        if COMMON_RESERVED.contains(&lower.as_str()) {
            return true;
        }
        let extra = match self {
            Dialect::Postgres => POSTGRES_RESERVED,
            Dialect::Mysql => MYSQL_RESERVED,
            Dialect::Sqlite => SQLITE_RESERVED,
        };
        extra.contains(&lower.as_str())
    }

    /// Check whether an identifier must be quoted: reserved words and
    /// anything that is not a plain lowercase identifier.
    pub fn needs_quoting(self, ident: &str) -> bool {
        let mut chars = ident.chars();
        let plain = match chars.next() {
            Some(c) if c.is_ascii_lowercase() || c == '_' => {
                chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
            }
            _ => false,
        };
        !plain || self.is_reserved(ident)
    }

    // Capability flags

    /// IS DISTINCT FROM as native syntax (lowered elsewhere).
    pub const fn supports_is_distinct_from(self) -> bool {
        matches!(self, Dialect::Postgres)
    }

    /// Check if this dialect supports ILIKE.
    pub const fn supports_ilike(self) -> bool {
        matches!(self, Dialect::Postgres)
    }

    /// Regular-expression matching (~ or REGEXP).
    pub const fn supports_regexp(self) -> bool {
        matches!(self, Dialect::Postgres | Dialect::Mysql)
    }

    /// Range containment/overlap operators (@>, &&).
    pub const fn supports_range_ops(self) -> bool {
        matches!(self, Dialect::Postgres)
    }

    /// Window functions and WINDOW clauses.
    pub const fn supports_window(self) -> bool {
        true
    }

    /// RETURNING clauses on INSERT/UPDATE/DELETE.
    pub const fn supports_returning(self) -> bool {
        matches!(self, Dialect::Postgres | Dialect::Sqlite)
    }

    /// INSERT ... ON CONFLICT.
    pub const fn supports_on_conflict(self) -> bool {
        matches!(self, Dialect::Postgres | Dialect::Sqlite)
    }

    /// Standalone LOCK TABLE statements.
    pub const fn supports_lock_table(self) -> bool {
        matches!(self, Dialect::Postgres | Dialect::Mysql)
    }

    /// NULLS FIRST / NULLS LAST in ORDER BY.
    pub const fn supports_nulls_ordering(self) -> bool {
        matches!(self, Dialect::Postgres | Dialect::Sqlite)
    }

    /// LATERAL join operands.
    pub const fn supports_lateral(self) -> bool {
        matches!(self, Dialect::Postgres | Dialect::Mysql)
    }

    /// SELECT ... FOR UPDATE / FOR SHARE row locks.
    pub const fn supports_row_locks(self) -> bool {
        matches!(self, Dialect::Postgres | Dialect::Mysql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Dialect::from_name("postgres").unwrap(), Dialect::Postgres);
        assert_eq!(Dialect::from_name("PostgreSQL").unwrap(), Dialect::Postgres);
        assert_eq!(Dialect::from_name("mysql").unwrap(), Dialect::Mysql);
        assert_eq!(Dialect::from_name("sqlite3").unwrap(), Dialect::Sqlite);

        let err = Dialect::from_name("oracle").unwrap_err();
        assert_eq!(err.to_string(), "config: unknown dialect 'oracle'");
    }

    #[test]
    fn test_placeholder_styles() {
        assert_eq!(
            Dialect::Postgres.placeholder_style(),
            PlaceholderStyle::Indexed('$')
        );
        assert_eq!(
            Dialect::Sqlite.placeholder_style(),
            PlaceholderStyle::Indexed('?')
        );
        assert_eq!(Dialect::Mysql.placeholder_style(), PlaceholderStyle::Positional);
    }

    #[test]
    fn test_needs_quoting() {
        // plain lowercase identifiers pass through
        assert!(!Dialect::Postgres.needs_quoting("film_id"));
        assert!(!Dialect::Postgres.needs_quoting("_private"));
        // reserved words and odd characters force quoting
        assert!(Dialect::Postgres.needs_quoting("user"));
        assert!(Dialect::Postgres.needs_quoting("order"));
        assert!(Dialect::Postgres.needs_quoting("inventory.inventory_id"));
        assert!(Dialect::Postgres.needs_quoting("FilmId"));
        assert!(Dialect::Mysql.needs_quoting("key"));
    }

    #[test]
    fn test_function_remap() {
        assert_eq!(Dialect::Postgres.function_name("RANDOM"), "RANDOM");
        assert_eq!(Dialect::Mysql.function_name("RANDOM"), "RAND");
        assert_eq!(Dialect::Sqlite.function_name("NOW"), "CURRENT_TIMESTAMP");
        assert_eq!(Dialect::Mysql.function_name("STRING_AGG"), "GROUP_CONCAT");
        assert_eq!(Dialect::Postgres.function_name("LOWER"), "LOWER");
    }

    #[test]
    fn test_bool_literals() {
        assert_eq!(Dialect::Postgres.bool_literal(true), "TRUE");
        assert_eq!(Dialect::Sqlite.bool_literal(true), "1");
        assert_eq!(Dialect::Sqlite.bool_literal(false), "0");
    }

    #[test]
    fn test_bytes_literal() {
        assert_eq!(Dialect::Postgres.bytes_literal(&[0xde, 0xad]), "'\\xdead'");
        assert_eq!(Dialect::Mysql.bytes_literal(&[0xde, 0xad]), "X'dead'");
    }
}
