//! Destination shape metadata.
//!
//! A destination record type describes itself through [`Record`]: a
//! declaration-ordered [`RecordShape`] naming its fields, and a
//! decoder from the dynamic [`GroupNode`] tree the mapper builds.
//! These implementations are mechanical and are what the schema code
//! generator emits, one per table record and one per user-defined
//! projection type.

use quarry_core::{Error, FromValue, Result, Value};

/// How a nested record field attaches to its enclosing group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Merged into the enclosing group: shares its presence and key,
    /// while columns are inferred from the embedded record's own table
    Embedded,
    /// A required singular child group
    One,
    /// An `Option<T>` child group, unset when all its columns are NULL
    Optional,
    /// A `Vec<T>` child group collecting one instance per key
    List,
}

/// The kind of one destination field.
#[derive(Debug, Clone)]
pub enum FieldNode {
    /// A scalar column
    Scalar,
    /// A `Vec<scalar>` collecting one value per row of the group
    ScalarList,
    /// A nested record
    Record {
        strategy: Strategy,
        shape: fn() -> RecordShape,
    },
}

/// One field of a destination record.
#[derive(Debug, Clone)]
pub struct FieldShape {
    /// Field identifier, matched against column names
    pub name: &'static str,
    /// Overrides column-name inference. With a dot, an exact column
    /// match; without, it renames the field or (on record fields) the
    /// group's effective table (`"language"` and `"Language.*"` both
    /// rename the group to `language`).
    pub alias: Option<&'static str>,
    /// Contributes to the enclosing group's identity
    pub primary_key: bool,
    pub node: FieldNode,
}

/// Declaration-ordered shape of a destination record.
#[derive(Debug, Clone)]
pub struct RecordShape {
    /// Conventional table name for column inference
    pub table: &'static str,
    pub fields: Vec<FieldShape>,
}

impl RecordShape {
    /// Start a shape for the given conventional table name.
    pub fn new(table: &'static str) -> Self {
        Self {
            table,
            fields: Vec::new(),
        }
    }

    fn push(mut self, field: FieldShape) -> Self {
        self.fields.push(field);
        self
    }

    /// A primary-key scalar column.
    pub fn key(self, name: &'static str) -> Self {
        self.push(FieldShape {
            name,
            alias: None,
            primary_key: true,
            node: FieldNode::Scalar,
        })
    }

    /// A plain scalar column.
    pub fn col(self, name: &'static str) -> Self {
        self.push(FieldShape {
            name,
            alias: None,
            primary_key: false,
            node: FieldNode::Scalar,
        })
    }

    /// A `Vec<scalar>` field collecting one value per row.
    pub fn scalar_list(self, name: &'static str) -> Self {
        self.push(FieldShape {
            name,
            alias: None,
            primary_key: false,
            node: FieldNode::ScalarList,
        })
    }

    /// An embedded record, merged into this group.
    pub fn embed<R: Record>(self, name: &'static str) -> Self {
        self.push(FieldShape {
            name,
            alias: None,
            primary_key: false,
            node: FieldNode::Record {
                strategy: Strategy::Embedded,
                shape: R::shape,
            },
        })
    }

    /// A required singular child record.
    pub fn one<R: Record>(self, name: &'static str) -> Self {
        self.push(FieldShape {
            name,
            alias: None,
            primary_key: false,
            node: FieldNode::Record {
                strategy: Strategy::One,
                shape: R::shape,
            },
        })
    }

    /// An `Option<record>` child.
    pub fn optional<R: Record>(self, name: &'static str) -> Self {
        self.push(FieldShape {
            name,
            alias: None,
            primary_key: false,
            node: FieldNode::Record {
                strategy: Strategy::Optional,
                shape: R::shape,
            },
        })
    }

    /// A `Vec<record>` child.
    pub fn list<R: Record>(self, name: &'static str) -> Self {
        self.push(FieldShape {
            name,
            alias: None,
            primary_key: false,
            node: FieldNode::Record {
                strategy: Strategy::List,
                shape: R::shape,
            },
        })
    }

    /// Set the alias of the most recently declared field.
    pub fn aliased(mut self, alias: &'static str) -> Self {
        if let Some(last) = self.fields.last_mut() {
            last.alias = Some(alias);
        }
        self
    }
}

/// A destination record type.
///
/// `Default` supplies the value of required nested records whose
/// columns were not selected at all.
pub trait Record: Sized + Default {
    /// The declaration-ordered shape of this record.
    fn shape() -> RecordShape;

    /// Decode one mapped group instance.
    fn from_node(node: &GroupNode) -> Result<Self>;
}

/// One slot of a mapped group instance, aligned with the field order
/// of the record's shape.
#[derive(Debug, Clone)]
pub enum Slot {
    Scalar(Option<Value>),
    ScalarList(Vec<Value>),
    Child(Option<Box<GroupNode>>),
    ChildList(Vec<GroupNode>),
}

/// A group instance produced by the mapper.
#[derive(Debug, Clone)]
pub struct GroupNode {
    /// The group key this instance was deduplicated by
    pub(crate) key: Vec<Value>,
    pub(crate) slots: Vec<Slot>,
}

impl GroupNode {
    pub(crate) fn new(slots: Vec<Slot>) -> Self {
        Self {
            key: Vec::new(),
            slots,
        }
    }

    fn slot(&self, index: usize, field: &str) -> Result<&Slot> {
        self.slots
            .get(index)
            .ok_or_else(|| Error::shape(field, format!("no mapped slot at index {index}")))
    }

    /// Decode a scalar field. Unselected columns decode as NULL, so
    /// non-optional targets fail with a coercion error.
    pub fn scalar<T: FromValue>(&self, index: usize, field: &str) -> Result<T> {
        match self.slot(index, field)? {
            Slot::Scalar(value) => T::from_value(value.as_ref().unwrap_or(&Value::Null))
                .map_err(|e| e.prepend_path(field)),
            _ => Err(Error::shape(field, "expected a scalar slot")),
        }
    }

    /// Decode a `Vec<scalar>` field.
    pub fn scalar_list<T: FromValue>(&self, index: usize, field: &str) -> Result<Vec<T>> {
        match self.slot(index, field)? {
            Slot::ScalarList(values) => values
                .iter()
                .map(|v| T::from_value(v).map_err(|e| e.prepend_path(field)))
                .collect(),
            _ => Err(Error::shape(field, "expected a scalar-list slot")),
        }
    }

    /// Decode a required nested record; absent groups decode to their
    /// default value.
    pub fn child<R: Record>(&self, index: usize, field: &str) -> Result<R> {
        match self.slot(index, field)? {
            Slot::Child(Some(node)) => R::from_node(node).map_err(|e| e.prepend_path(field)),
            Slot::Child(None) => Ok(R::default()),
            _ => Err(Error::shape(field, "expected a singular child slot")),
        }
    }

    /// Decode an `Option<record>` field; absent groups stay `None`.
    pub fn child_opt<R: Record>(&self, index: usize, field: &str) -> Result<Option<R>> {
        match self.slot(index, field)? {
            Slot::Child(Some(node)) => R::from_node(node)
                .map(Some)
                .map_err(|e| e.prepend_path(field)),
            Slot::Child(None) => Ok(None),
            _ => Err(Error::shape(field, "expected a singular child slot")),
        }
    }

    /// Decode a `Vec<record>` field.
    pub fn child_list<R: Record>(&self, index: usize, field: &str) -> Result<Vec<R>> {
        match self.slot(index, field)? {
            Slot::ChildList(nodes) => nodes
                .iter()
                .map(|n| R::from_node(n).map_err(|e| e.prepend_path(field)))
                .collect(),
            _ => Err(Error::shape(field, "expected a child-list slot")),
        }
    }
}
