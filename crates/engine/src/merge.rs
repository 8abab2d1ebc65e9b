//! Deep-merge semantics for records
//!
//! Used by both `merge` and the upsert path of `put`:
//! - object-valued fields merge recursively, field by field
//! - scalar and array fields are replaced wholesale
//! - null overlay values are absent fields and never overwrite

use std::collections::HashMap;

use supple_core::value::Value;

/// Deep-merge `overlay` into `base`
pub fn deep_merge(base: &mut HashMap<String, Value>, overlay: HashMap<String, Value>) {
    for (key, value) in overlay {
        match value {
            Value::Null => {}
            Value::Object(inner) => match base.get_mut(&key) {
                Some(Value::Object(existing)) => deep_merge(existing, inner),
                _ => {
                    base.insert(key, Value::Object(inner));
                }
            },
            other => {
                base.insert(key, other);
            }
        }
    }
}
