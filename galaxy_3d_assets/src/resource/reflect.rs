//! Field-descriptor reflection.
//!
//! A type opts in by implementing [`Exposed`], returning a static table of
//! `(name, getter, setter)` descriptors. Generic code can then inspect,
//! modify and serialize any exposed field by name without knowing the type:
//!
//! ```ignore
//! set_field(&mut material, "depth_write", FieldValue::Bool(false))?;
//! let json = to_json(&material);
//! ```

use glam::{Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};
use crate::error::{Error, Result};

// ===== VALUES =====

/// Dynamically typed field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Bool(bool),
    Int(i64),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Text(String),
}

impl FieldValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "Bool",
            FieldValue::Int(_) => "Int",
            FieldValue::Float(_) => "Float",
            FieldValue::Vec2(_) => "Vec2",
            FieldValue::Vec3(_) => "Vec3",
            FieldValue::Vec4(_) => "Vec4",
            FieldValue::Text(_) => "Text",
        }
    }

    /// Approximate heap + inline size in bytes
    pub fn byte_size(&self) -> usize {
        match self {
            FieldValue::Text(text) => std::mem::size_of::<Self>() + text.len(),
            _ => std::mem::size_of::<Self>(),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            FieldValue::Bool(v) => Ok(*v),
            other => Err(mismatch("Bool", other)),
        }
    }

    pub fn as_int(&self) -> Result<i64> {
        match self {
            FieldValue::Int(v) => Ok(*v),
            other => Err(mismatch("Int", other)),
        }
    }

    /// Float value; integers are widened
    pub fn as_float(&self) -> Result<f32> {
        match self {
            FieldValue::Float(v) => Ok(*v),
            FieldValue::Int(v) => Ok(*v as f32),
            other => Err(mismatch("Float", other)),
        }
    }

    pub fn into_text(self) -> Result<String> {
        match self {
            FieldValue::Text(v) => Ok(v),
            other => Err(mismatch("Text", &other)),
        }
    }
}

fn mismatch(expected: &str, got: &FieldValue) -> Error {
    Error::InvalidResource(format!("expected {} value, got {}", expected, got.type_name()))
}

// ===== DESCRIPTORS =====

/// Accessor pair for one named field of `T`
pub struct FieldDescriptor<T> {
    pub name: &'static str,
    pub get: fn(&T) -> FieldValue,
    pub set: fn(&mut T, FieldValue) -> Result<()>,
}

/// Types whose fields are reachable by name
pub trait Exposed: Sized + 'static {
    /// Static descriptor table, in serialization order
    fn fields() -> &'static [FieldDescriptor<Self>];
}

/// Look up a descriptor by name
pub fn field<T: Exposed>(name: &str) -> Option<&'static FieldDescriptor<T>> {
    T::fields().iter().find(|descriptor| descriptor.name == name)
}

/// Names of every exposed field
pub fn field_names<T: Exposed>() -> Vec<&'static str> {
    T::fields().iter().map(|descriptor| descriptor.name).collect()
}

/// Read a field by name
pub fn get_field<T: Exposed>(target: &T, name: &str) -> Option<FieldValue> {
    field::<T>(name).map(|descriptor| (descriptor.get)(target))
}

/// Write a field by name
pub fn set_field<T: Exposed>(target: &mut T, name: &str, value: FieldValue) -> Result<()> {
    let descriptor = field::<T>(name)
        .ok_or_else(|| Error::InvalidResource(format!("no exposed field named '{}'", name)))?;
    (descriptor.set)(target, value)
        .map_err(|err| Error::InvalidResource(format!("field '{}': {}", name, err)))
}

/// Serialize every exposed field into a JSON object
pub fn to_json<T: Exposed>(target: &T) -> serde_json::Value {
    let mut object = serde_json::Map::new();
    for descriptor in T::fields() {
        let value = (descriptor.get)(target);
        if let Ok(json) = serde_json::to_value(&value) {
            object.insert(descriptor.name.to_string(), json);
        }
    }
    serde_json::Value::Object(object)
}

/// Apply a JSON object produced by [`to_json`]
///
/// Missing fields keep their current value; unknown fields are an error.
pub fn apply_json<T: Exposed>(target: &mut T, json: &serde_json::Value) -> Result<()> {
    let object = json
        .as_object()
        .ok_or_else(|| Error::InvalidResource("exposed fields must be a JSON object".to_string()))?;
    for (name, raw) in object {
        let value: FieldValue = serde_json::from_value(raw.clone())
            .map_err(|err| Error::InvalidResource(format!("field '{}': {}", name, err)))?;
        set_field(target, name, value)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "reflect_tests.rs"]
mod tests;
