//! Database row representation and scalar decoding.

use crate::error::{Error, Result};
use crate::value::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Column metadata shared across all rows in a result set.
///
/// This struct is wrapped in `Arc` so all rows from the same query share
/// the same column information, saving memory for large result sets.
#[derive(Debug, Clone)]
pub struct ColumnInfo {
    /// Column names in order
    names: Vec<String>,
    /// Name -> index mapping for O(1) lookup
    name_to_index: HashMap<String, usize>,
}

impl ColumnInfo {
    /// Create new column info from a list of column names.
    pub fn new(names: Vec<String>) -> Self {
        let name_to_index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();
        Self {
            names,
            name_to_index,
        }
    }

    /// Get the number of columns.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Get the index of a column by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    /// Get the name of a column by index.
    pub fn name_at(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Get all column names.
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

/// A single row returned from a database query.
///
/// Rows provide both index-based and name-based access to column values.
/// Column metadata is shared via `Arc` for memory efficiency.
#[derive(Debug, Clone)]
pub struct Row {
    /// Column values in order
    values: Vec<Value>,
    /// Shared column metadata
    columns: Arc<ColumnInfo>,
}

impl Row {
    /// Create a new row with the given columns and values.
    ///
    /// For multiple rows from the same result set, prefer `with_columns`
    /// to share the column metadata.
    pub fn new(column_names: Vec<String>, values: Vec<Value>) -> Self {
        let columns = Arc::new(ColumnInfo::new(column_names));
        Self { values, columns }
    }

    /// Create a new row with shared column metadata.
    ///
    /// This is more efficient for creating multiple rows from the same query.
    pub fn with_columns(columns: Arc<ColumnInfo>, values: Vec<Value>) -> Self {
        Self { values, columns }
    }

    /// Get the shared column metadata.
    pub fn column_info(&self) -> Arc<ColumnInfo> {
        Arc::clone(&self.columns)
    }

    /// Get the number of columns in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if this row is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a value by column index. O(1) operation.
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Get a value by column name. O(1) operation via HashMap lookup.
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.columns.index_of(name).and_then(|i| self.values.get(i))
    }

    /// Get a typed value by column index.
    pub fn get_as<T: FromValue>(&self, index: usize) -> Result<T> {
        let value = self.get(index).ok_or_else(|| {
            Error::shape(
                String::new(),
                format!(
                    "column index {} out of bounds (row has {} columns)",
                    index,
                    self.len()
                ),
            )
        })?;
        T::from_value(value)
    }

    /// Get all column names.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.names().iter().map(String::as_str)
    }

    /// Iterate over all values.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    /// Iterate over (column_name, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .names()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }
}

/// Trait for decoding a `Value` into a typed scalar.
///
/// Conversions are lossless only: integers widen within the same
/// signedness, temporal values decode into their epoch representation,
/// and NULL decodes only into `Option`. Anything else fails with a
/// coercion error; notably, integers do not decode into `bool`.
///
/// Types implementing this trait are scalars to the result mapper,
/// never groups. Generated enum types decode from their SQL string
/// representation through this trait.
pub trait FromValue: Sized {
    /// Convert from a Value, returning an error if the conversion fails.
    fn from_value(value: &Value) -> Result<Self>;
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(*v),
            other => Err(Error::coerce(other.type_name(), "bool")),
        }
    }
}

impl FromValue for i8 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::TinyInt(v) => Ok(*v),
            other => Err(Error::coerce(other.type_name(), "i8")),
        }
    }
}

impl FromValue for i16 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::TinyInt(v) => Ok(i16::from(*v)),
            Value::SmallInt(v) => Ok(*v),
            other => Err(Error::coerce(other.type_name(), "i16")),
        }
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::TinyInt(v) => Ok(i32::from(*v)),
            Value::SmallInt(v) => Ok(i32::from(*v)),
            Value::Int(v) => Ok(*v),
            // days-since-epoch dates share the i32 representation
            Value::Date(v) => Ok(*v),
            other => Err(Error::coerce(other.type_name(), "i32")),
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::TinyInt(v) => Ok(i64::from(*v)),
            Value::SmallInt(v) => Ok(i64::from(*v)),
            Value::Int(v) => Ok(i64::from(*v)),
            Value::BigInt(v) => Ok(*v),
            // temporal values decode into their microsecond encoding
            Value::Time(v) | Value::Timestamp(v) | Value::TimestampTz(v)
            | Value::Interval(v) => Ok(*v),
            other => Err(Error::coerce(other.type_name(), "i64")),
        }
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Float(v) => Ok(*v),
            other => Err(Error::coerce(other.type_name(), "f32")),
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Float(v) => Ok(f64::from(*v)),
            Value::Double(v) => Ok(*v),
            other => Err(Error::coerce(other.type_name(), "f64")),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Text(s) => Ok(s.clone()),
            Value::Decimal(s) => Ok(s.clone()),
            other => Err(Error::coerce(other.type_name(), "String")),
        }
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Bytes(b) => Ok(b.clone()),
            other => Err(Error::coerce(other.type_name(), "Vec<u8>")),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> Row {
        Row::new(
            vec!["id".to_string(), "name".to_string(), "age".to_string()],
            vec![Value::Int(7), Value::Text("Ada".to_string()), Value::Null],
        )
    }

    #[test]
    fn test_get_by_name() {
        let row = sample_row();
        assert_eq!(row.get_by_name("id"), Some(&Value::Int(7)));
        assert_eq!(row.get_by_name("missing"), None);
    }

    #[test]
    fn test_shared_columns() {
        let row = sample_row();
        let row2 = Row::with_columns(row.column_info(), vec![Value::Int(8), Value::Null, Value::Null]);
        assert_eq!(row2.get_by_name("id"), Some(&Value::Int(8)));
    }

    #[test]
    fn test_integer_widening() {
        assert_eq!(i64::from_value(&Value::SmallInt(3)).unwrap(), 3);
        assert_eq!(i32::from_value(&Value::TinyInt(3)).unwrap(), 3);
        // narrowing is refused
        assert!(i16::from_value(&Value::Int(3)).is_err());
    }

    #[test]
    fn test_int_to_bool_is_fatal() {
        let err = bool::from_value(&Value::SmallInt(1)).unwrap_err();
        assert_eq!(err.to_string(), "qrm: cannot convert SMALLINT to bool");
    }

    #[test]
    fn test_null_into_option() {
        assert_eq!(Option::<i32>::from_value(&Value::Null).unwrap(), None);
        assert_eq!(Option::<i32>::from_value(&Value::Int(4)).unwrap(), Some(4));
        assert!(i32::from_value(&Value::Null).is_err());
    }

    #[test]
    fn test_temporal_equivalence() {
        assert_eq!(i64::from_value(&Value::Timestamp(1_000)).unwrap(), 1_000);
        assert_eq!(i32::from_value(&Value::Date(19_000)).unwrap(), 19_000);
    }
}
