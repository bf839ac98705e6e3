//! Record schema definitions
//!
//! A schema is an ordered, statically declared list of fields. Supported
//! field types:
//! - integer: 64-bit signed integer
//! - float: 64-bit floating point, stored with two decimals
//! - text: UTF-8 string
//!
//! Each field holds either a single scalar or a flat list of scalars.
//! Nested records are not supported.

use std::fmt;

/// Atomic value types understood by the codec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Integer,
    Float,
    Text,
}

impl ScalarKind {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarKind::Integer => "integer",
            ScalarKind::Float => "float",
            ScalarKind::Text => "text",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Whether a field holds one scalar or an ordered sequence of scalars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    Single,
    List,
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Multiplicity::Single => f.write_str("single"),
            Multiplicity::List => f.write_str("list"),
        }
    }
}

/// One field of a record schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Field name as written before the ':' separator
    pub name: &'static str,
    pub kind: ScalarKind,
    pub multiplicity: Multiplicity,
}

impl FieldSpec {
    /// Create a single-valued field
    pub const fn single(name: &'static str, kind: ScalarKind) -> Self {
        Self {
            name,
            kind,
            multiplicity: Multiplicity::Single,
        }
    }

    /// Create a list-valued field
    pub const fn list(name: &'static str, kind: ScalarKind) -> Self {
        Self {
            name,
            kind,
            multiplicity: Multiplicity::List,
        }
    }
}

/// Ordered field layout of a record type.
///
/// Declared once per record type as a `const` and never changed at runtime.
/// Field order is the on-disk line order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
    /// Record type name, used in diagnostics only
    pub record_name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl RecordSchema {
    pub const fn new(record_name: &'static str, fields: &'static [FieldSpec]) -> Self {
        Self {
            record_name,
            fields,
        }
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
