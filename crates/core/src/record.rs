//! Record capability: conversion to and from a plain JSON mapping.

use serde_json::{Map, Value};

use crate::error::DomainResult;

/// A record that can be rendered to, and populated from, a key/value mapping.
///
/// `deserialize` validates every field it reads and mutates `self` only when
/// the whole mapping is valid. It never touches the identifier.
pub trait Record: Sized {
    fn serialize(&self) -> Map<String, Value>;

    fn deserialize(&mut self, data: &Value) -> DomainResult<&mut Self>;
}

/// Human-readable JSON type name for validation messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
