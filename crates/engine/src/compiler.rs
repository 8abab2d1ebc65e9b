//! Schema compiler
//!
//! Deterministically maps a JSON-Schema-like definition to a
//! `RecordDescriptor`. Supported constructs: `enum`, nested `object`
//! with `properties`, `array` with `items`, `anyOf`/`oneOf` unions, and
//! the primitive type keywords. Anything else is not a validator
//! concern here; unknown or absent type keywords default to `string`.
//!
//! ## Caching
//!
//! Compiled descriptors are cached per `(namespace, structural hash of
//! the schema, partial flag)` and reused for the process lifetime.
//! The hash is computed over the schema with object keys sorted, so two
//! requests whose schemas differ only in property ordering share one
//! cache slot. Cache inserts go through DashMap's entry API: concurrent
//! duplicate compiles are tolerated, the first insert wins, and every
//! caller receives the stored descriptor.

use dashmap::DashMap;
use rustc_hash::FxHasher;
use std::hash::Hasher;
use std::sync::Arc;
use tracing::trace;

use supple_core::descriptor::{FieldDescriptor, FieldKind, PrimitiveType, RecordDescriptor};
use supple_core::error::{Error, Result};
use supple_core::types::Namespace;
use supple_core::value::Value;

/// Record type name used when a schema carries no `title`
const DEFAULT_MODEL_NAME: &str = "Model";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    namespace: Namespace,
    shape: u64,
    partial: bool,
}

/// Compiles schema definitions into cached record descriptors
pub struct SchemaCompiler {
    cache: DashMap<CacheKey, Arc<RecordDescriptor>>,
}

impl SchemaCompiler {
    /// Create a compiler with an empty cache
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
        }
    }

    /// Compile a schema for a namespace, or return the cached descriptor.
    ///
    /// With `partial` set, every field compiles as optional; this is the
    /// shape used for merge payloads and filters. Otherwise the schema's
    /// `required` list decides, and when the list is absent every
    /// declared property is mandatory.
    pub fn compile(
        &self,
        namespace: &Namespace,
        schema: &serde_json::Value,
        partial: bool,
    ) -> Result<Arc<RecordDescriptor>> {
        let key = CacheKey {
            namespace: namespace.clone(),
            shape: shape_hash(schema),
            partial,
        };
        if let Some(hit) = self.cache.get(&key) {
            trace!(namespace = %namespace, partial, "descriptor cache hit");
            return Ok(hit.clone());
        }

        let descriptor = Arc::new(compile_object(schema, partial, DEFAULT_MODEL_NAME, "$")?);
        trace!(
            namespace = %namespace,
            record = %descriptor.name,
            partial,
            "compiled descriptor"
        );
        // Idempotent insert: under a concurrent duplicate compile the
        // first writer wins and both callers get the stored value
        Ok(self.cache.entry(key).or_insert(descriptor).clone())
    }

    /// Number of distinct cached shapes
    pub fn cached_shapes(&self) -> usize {
        self.cache.len()
    }
}

impl Default for SchemaCompiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Hash a schema's structure with object keys sorted
fn shape_hash(schema: &serde_json::Value) -> u64 {
    let mut hasher = FxHasher::default();
    Value::from(schema.clone()).hash_structure(&mut hasher);
    hasher.finish()
}

/// Compile an object schema into a record descriptor.
///
/// Used for the schema root and for nested `object` sub-schemas; `path`
/// locates the sub-schema in error messages.
fn compile_object(
    schema: &serde_json::Value,
    partial: bool,
    default_name: &str,
    path: &str,
) -> Result<RecordDescriptor> {
    let obj = schema.as_object().ok_or_else(|| {
        Error::schema(format!("schema at {} must be an object", path))
    })?;

    if let Some(type_keyword) = obj.get("type") {
        if type_keyword.as_str() != Some("object") {
            return Err(Error::schema(format!(
                "schema at {} must have type 'object', got {}",
                path, type_keyword
            )));
        }
    }

    let name = obj
        .get("title")
        .and_then(|t| t.as_str())
        .unwrap_or(default_name);

    let properties = match obj.get("properties") {
        Some(props) => props.as_object().ok_or_else(|| {
            Error::schema(format!("'properties' at {} must be an object", path))
        })?,
        None => return Ok(RecordDescriptor::new(name, Vec::new())),
    };

    // When `required` is absent every declared property is mandatory;
    // an explicit empty list makes everything optional
    let required_names: Option<Vec<&str>> = match obj.get("required") {
        Some(list) => Some(
            list.as_array()
                .ok_or_else(|| {
                    Error::schema(format!("'required' at {} must be an array", path))
                })?
                .iter()
                .filter_map(|v| v.as_str())
                .collect(),
        ),
        None => None,
    };

    let mut fields = Vec::with_capacity(properties.len());
    for (field_name, sub_schema) in properties {
        let required = if partial {
            false
        } else {
            match &required_names {
                Some(names) => names.contains(&field_name.as_str()),
                None => true,
            }
        };
        let field_path = format!("{}.{}", path, field_name);
        fields.push(compile_field(
            field_name, sub_schema, required, partial, &field_path,
        )?);
    }

    Ok(RecordDescriptor::new(name, fields))
}

/// Compile one field's sub-schema, depth-first
fn compile_field(
    name: &str,
    schema: &serde_json::Value,
    required: bool,
    partial: bool,
    path: &str,
) -> Result<FieldDescriptor> {
    let obj = schema.as_object().ok_or_else(|| {
        Error::schema(format!("sub-schema at {} must be an object", path))
    })?;

    // enum: closed literal set, all of one primitive type
    if let Some(enum_values) = obj.get("enum") {
        let literals = compile_enum(enum_values, path)?;
        return Ok(FieldDescriptor::new(name, FieldKind::Enum(literals), required));
    }

    let type_keyword = obj.get("type").and_then(|t| t.as_str());

    // object with declared properties: nested record shape
    if type_keyword == Some("object")
        && obj
            .get("properties")
            .and_then(|p| p.as_object())
            .map(|p| !p.is_empty())
            .unwrap_or(false)
    {
        let nested = compile_object(schema, partial, DEFAULT_MODEL_NAME, path)?;
        return Ok(FieldDescriptor::new(name, FieldKind::Object(nested), required));
    }

    // array: homogeneous element shape from `items`
    if type_keyword == Some("array") {
        let empty_items = serde_json::json!({});
        let items = obj.get("items").unwrap_or(&empty_items);
        if !items.is_object() {
            return Err(Error::schema(format!(
                "array at {} has an unresolvable item schema",
                path
            )));
        }
        let element = compile_field("items", items, true, partial, &format!("{}[]", path))?;
        return Ok(FieldDescriptor::new(
            name,
            FieldKind::Array(Box::new(element)),
            required,
        ));
    }

    // anyOf / oneOf: both compile to the same union construct
    for union_keyword in ["anyOf", "oneOf"] {
        if let Some(branches) = obj.get(union_keyword) {
            let variants = compile_union(name, branches, partial, path)?;
            return Ok(FieldDescriptor::new(name, FieldKind::Union(variants), required));
        }
    }

    // primitive keyword mapping; unknown or absent defaults to string
    let primitive = match type_keyword {
        Some("integer") => PrimitiveType::Int,
        Some("number") => PrimitiveType::Float,
        Some("boolean") => PrimitiveType::Bool,
        Some("object") => PrimitiveType::Map,
        Some("null") => PrimitiveType::Null,
        _ => PrimitiveType::String,
    };
    Ok(FieldDescriptor::new(
        name,
        FieldKind::Primitive(primitive),
        required,
    ))
}

fn compile_enum(enum_values: &serde_json::Value, path: &str) -> Result<Vec<Value>> {
    let values = enum_values.as_array().ok_or_else(|| {
        Error::schema(format!("'enum' at {} must be an array", path))
    })?;
    if values.is_empty() {
        return Err(Error::schema(format!(
            "enum at {} must list at least one literal",
            path
        )));
    }
    let literals: Vec<Value> = values.iter().cloned().map(Value::from).collect();
    let first_type = literals[0].type_name();
    if literals.iter().any(|l| l.type_name() != first_type) {
        return Err(Error::schema(format!(
            "enum at {} has mixed literal types",
            path
        )));
    }
    if matches!(literals[0], Value::Array(_) | Value::Object(_)) {
        return Err(Error::schema(format!(
            "enum at {} literals must be primitive values",
            path
        )));
    }
    Ok(literals)
}

fn compile_union(
    name: &str,
    branches: &serde_json::Value,
    partial: bool,
    path: &str,
) -> Result<Vec<FieldDescriptor>> {
    let branches = branches.as_array().ok_or_else(|| {
        Error::schema(format!("union at {} must be an array of schemas", path))
    })?;
    if branches.len() < 2 {
        return Err(Error::schema(format!(
            "union at {} needs at least two variants",
            path
        )));
    }
    branches
        .iter()
        .enumerate()
        .map(|(idx, branch)| {
            compile_field(name, branch, true, partial, &format!("{}|{}", path, idx))
        })
        .collect()
}
