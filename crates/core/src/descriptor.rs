//! Compiled schema shapes
//!
//! This module defines the tagged-variant descriptor model:
//! - PrimitiveType: leaf type keywords
//! - FieldKind: primitive / object / array / enum / union
//! - FieldDescriptor: one named, typed, required-or-optional field
//! - RecordDescriptor: an ordered set of fields with unique names
//!
//! Descriptors are fixed data interpreted generically by the validator;
//! no types are generated at runtime. Fields are kept sorted by name so
//! two schemas that differ only in property ordering compile to equal
//! descriptors with equal structural hashes.
//!
//! ## Invariants
//!
//! - `Array` wraps exactly one nested field descriptor
//! - `Union` carries at least two variants
//! - `Enum` carries at least one literal, all of the same primitive type
//!
//! The schema compiler enforces these at construction; the validator may
//! assume them.

use crate::value::Value;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// Leaf type for primitive fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// UTF-8 string
    String,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point (also satisfied by an integer payload)
    Float,
    /// Boolean
    Bool,
    /// Generic object with no declared shape
    Map,
    /// Only the null value
    Null,
}

impl PrimitiveType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Int => "integer",
            PrimitiveType::Float => "number",
            PrimitiveType::Bool => "boolean",
            PrimitiveType::Map => "object",
            PrimitiveType::Null => "null",
        }
    }

    /// Check whether a value satisfies this primitive type.
    ///
    /// The single sanctioned widening: `Int` payloads satisfy `Float`
    /// fields, because JSON renders whole numbers without a decimal
    /// point.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            PrimitiveType::String => matches!(value, Value::String(_)),
            PrimitiveType::Int => matches!(value, Value::Int(_)),
            PrimitiveType::Float => matches!(value, Value::Float(_) | Value::Int(_)),
            PrimitiveType::Bool => matches!(value, Value::Bool(_)),
            PrimitiveType::Map => matches!(value, Value::Object(_)),
            PrimitiveType::Null => matches!(value, Value::Null),
        }
    }
}

/// The shape of one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// A primitive leaf
    Primitive(PrimitiveType),
    /// A nested object with its own descriptor
    Object(RecordDescriptor),
    /// A homogeneous array; the nested descriptor describes each element
    Array(Box<FieldDescriptor>),
    /// A closed set of literal values, all of one primitive type
    Enum(Vec<Value>),
    /// Any-of union; a value is valid when some variant accepts it
    Union(Vec<FieldDescriptor>),
}

impl FieldKind {
    /// Returns the kind name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            FieldKind::Primitive(p) => p.type_name(),
            FieldKind::Object(_) => "object",
            FieldKind::Array(_) => "array",
            FieldKind::Enum(_) => "enum",
            FieldKind::Union(_) => "union",
        }
    }

    fn hash_structure<H: Hasher>(&self, state: &mut H) {
        match self {
            FieldKind::Primitive(p) => {
                0u8.hash(state);
                p.hash(state);
            }
            FieldKind::Object(desc) => {
                1u8.hash(state);
                desc.hash_structure(state);
            }
            FieldKind::Array(elem) => {
                2u8.hash(state);
                elem.hash_structure(state);
            }
            FieldKind::Enum(literals) => {
                3u8.hash(state);
                literals.len().hash(state);
                for literal in literals {
                    literal.hash_structure(state);
                }
            }
            FieldKind::Union(variants) => {
                4u8.hash(state);
                variants.len().hash(state);
                for variant in variants {
                    variant.hash_structure(state);
                }
            }
        }
    }
}

/// One named, typed field of a record shape
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name, unique within its record
    pub name: String,
    /// Field shape
    pub kind: FieldKind,
    /// Whether the field must be present in a full payload
    pub required: bool,
}

impl FieldDescriptor {
    /// Create a field descriptor
    pub fn new(name: impl Into<String>, kind: FieldKind, required: bool) -> Self {
        Self {
            name: name.into(),
            kind,
            required,
        }
    }

    fn hash_structure<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.required.hash(state);
        self.kind.hash_structure(state);
    }
}

/// Compiled, structural description of a schema's shape
///
/// Built once per distinct schema shape and namespace, then cached for
/// the process lifetime. Identity is structural equality of the
/// descriptor, not of the raw schema text.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDescriptor {
    /// Record type name (schema `title`, default `"Model"`)
    pub name: String,
    /// Fields, sorted by name; names are unique
    fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    /// Create a descriptor, sorting fields by name.
    ///
    /// Field names must already be unique; the compiler guarantees this
    /// because they originate from JSON object keys.
    pub fn new(name: impl Into<String>, mut fields: Vec<FieldDescriptor>) -> Self {
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            name: name.into(),
            fields,
        }
    }

    /// The fields of this record, in name order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields
            .binary_search_by(|f| f.name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.fields[idx])
    }

    /// Structural hash of the descriptor shape.
    ///
    /// Equal descriptors hash equally regardless of the property order
    /// in the schema they were compiled from. Used as the compiler's
    /// cache key component.
    pub fn structural_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash_structure(&mut hasher);
        hasher.finish()
    }

    fn hash_structure<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.fields.len().hash(state);
        for field in &self.fields {
            field.hash_structure(state);
        }
    }
}
