//! Generic payload validation
//!
//! One routine interprets a `RecordDescriptor` against payload values;
//! no per-schema code is generated. Violations are caller mistakes and
//! surface as `InvalidRequest` before any storage access.
//!
//! Rules:
//! - unknown fields are rejected
//! - required fields must be present and non-null (unless the field's
//!   own type is `null`)
//! - an explicit null on an optional field counts as absent
//! - unions accept a value when any variant accepts it

use std::collections::HashMap;

use supple_core::descriptor::{FieldDescriptor, FieldKind, RecordDescriptor};
use supple_core::error::{Error, Result};
use supple_core::value::Value;

/// Validate payload values against a compiled record shape
pub fn validate_record(
    descriptor: &RecordDescriptor,
    values: &HashMap<String, Value>,
) -> Result<()> {
    for name in values.keys() {
        if descriptor.field(name).is_none() {
            return Err(Error::invalid_request(format!(
                "unknown field '{}' for record type '{}'",
                name, descriptor.name
            )));
        }
    }

    for field in descriptor.fields() {
        match values.get(&field.name) {
            None => {
                if field.required {
                    return Err(Error::invalid_request(format!(
                        "missing required field '{}' for record type '{}'",
                        field.name, descriptor.name
                    )));
                }
            }
            Some(Value::Null)
                if !field.required && !matches!(field.kind, FieldKind::Primitive(p) if p.matches(&Value::Null)) =>
            {
                // explicit null on an optional field counts as absent
            }
            Some(value) => validate_value(field, value, &field.name)?,
        }
    }
    Ok(())
}

/// Validate one value against one field descriptor
fn validate_value(field: &FieldDescriptor, value: &Value, path: &str) -> Result<()> {
    match &field.kind {
        FieldKind::Primitive(primitive) => {
            if !primitive.matches(value) {
                return Err(Error::invalid_request(format!(
                    "field '{}' expects {}, got {}",
                    path,
                    primitive.type_name(),
                    value.type_name()
                )));
            }
            Ok(())
        }
        FieldKind::Object(nested) => match value {
            Value::Object(map) => validate_record(nested, map),
            other => Err(Error::invalid_request(format!(
                "field '{}' expects an object, got {}",
                path,
                other.type_name()
            ))),
        },
        FieldKind::Array(element) => match value {
            Value::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    validate_value(element, item, &format!("{}[{}]", path, idx))?;
                }
                Ok(())
            }
            other => Err(Error::invalid_request(format!(
                "field '{}' expects an array, got {}",
                path,
                other.type_name()
            ))),
        },
        FieldKind::Enum(literals) => {
            if literals.contains(value) {
                Ok(())
            } else {
                Err(Error::invalid_request(format!(
                    "field '{}' value is not a permitted literal",
                    path
                )))
            }
        }
        FieldKind::Union(variants) => {
            if variants
                .iter()
                .any(|variant| validate_value(variant, value, path).is_ok())
            {
                Ok(())
            } else {
                Err(Error::invalid_request(format!(
                    "field '{}' matches no union variant",
                    path
                )))
            }
        }
    }
}
