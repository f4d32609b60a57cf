//! Schema inference from sample payloads.
//!
//! Samples are decoded into `serde_json::Value`, whose six variants (null, bool, number,
//! string, array, object) are matched exhaustively below.

pub mod query;
pub mod route;

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::ir::{Field, NamedType, Record, Type, WIRE_TAG};
use crate::naming::{public_name, singularize, unique_name};

pub use query::{QuerySet, infer_query};
pub use route::{path_arguments, path_record, url_format};

/// Infer a record from a JSON document whose top level is an object.
pub fn from_json_str(input: &str) -> Result<Record, DecodeError> {
    let value: Value = serde_json::from_str(input)?;
    infer_document(&value)
}

/// Infer a record from a YAML document whose top level is a mapping.
pub fn from_yaml_str(input: &str) -> Result<Record, DecodeError> {
    let value: Value = serde_yaml_ng::from_str(input)?;
    infer_document(&value)
}

/// Infer a record from an already decoded document.
pub fn infer_document(value: &Value) -> Result<Record, DecodeError> {
    match value {
        Value::Object(object) => Ok(infer_object(object)),
        other => Err(DecodeError::NotAnObject(kind_name(other))),
    }
}

/// Infer a record from an object, with fields sorted by public name.
pub fn infer_object(object: &Map<String, Value>) -> Record {
    let mut used_names = HashSet::new();

    let fields = object
        .iter()
        .map(|(key, value)| {
            let name = unique_name(&public_name(key), &mut used_names);
            Field::new(name.clone(), key.clone(), field_type(&name, value))
                .with_tag(WIRE_TAG, &[key.as_str(), "omitempty"])
        })
        .collect();

    Record::sorted(fields)
}

/// Infer the type of a standalone value.
///
/// Objects become anonymous records here; only object fields introduce named types.
pub fn infer_value(value: &Value) -> Type {
    match value {
        Value::Null => Type::Any,
        Value::Bool(_) => Type::Bool,
        Value::Number(_) => Type::Number,
        Value::String(_) => Type::String,
        Value::Array(items) => Type::list(infer_element(items)),
        Value::Object(object) => Type::Record(infer_object(object)),
    }
}

/// The type of a field holding `value`, named after the field where a declaration is needed.
fn field_type(name: &str, value: &Value) -> Type {
    match value {
        Value::Object(object) => {
            Type::named(NamedType::new(name, Type::Record(infer_object(object))).nullable())
        }
        Value::Array(items) => match infer_element(items) {
            Type::Record(record) => Type::list(Type::named(
                NamedType::new(singularize(name), Type::Record(record)).nullable(),
            )),
            elem => Type::list(elem),
        },
        scalar => infer_value(scalar),
    }
}

/// Element type of a sample list, taken from its first element.
fn infer_element(items: &[Value]) -> Type {
    items.first().map_or(Type::Any, infer_value)
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order() {
        let record = from_json_str(r#"{"b": 1, "a": 2}"#).unwrap();
        assert_eq!(record.field_names(), vec!["A", "B"]);
    }

    #[test]
    fn test_wire_tag() {
        let record = from_json_str(r#"{"user_id": "u1"}"#).unwrap();
        let field = &record.fields[0];
        assert_eq!(field.name, "UserId");
        assert_eq!(field.wire_key, "user_id");
        assert_eq!(
            field.metadata[WIRE_TAG],
            vec!["user_id".to_string(), "omitempty".to_string()]
        );
    }

    #[test]
    fn test_colliding_public_names() {
        let record = from_json_str(r#"{"user_id": 1, "userId": 2}"#).unwrap();
        assert_eq!(record.fields.len(), 2);
        assert!(record.field("UserId").is_some());
        assert!(record.field("UserId2").is_some());
    }

    #[test]
    fn test_not_an_object() {
        let err = from_json_str("[1, 2]").unwrap_err();
        assert!(matches!(err, DecodeError::NotAnObject("array")));
    }

    #[test]
    fn test_malformed_json() {
        let err = from_json_str(r#"{"a": "#).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn test_nested_list() {
        let record = from_json_str(r#"{"matrix": [[1, 2]]}"#).unwrap();
        match &record.fields[0].field_type {
            Type::List(outer) => match outer.as_ref() {
                Type::List(inner) => assert!(matches!(inner.as_ref(), Type::Number)),
                other => panic!("expected inner list, got {other:?}"),
            },
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_scalar_list_is_not_named() {
        let record = from_json_str(r#"{"tags": ["a", "b"]}"#).unwrap();
        match &record.fields[0].field_type {
            Type::List(elem) => assert!(matches!(elem.as_ref(), Type::String)),
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_yaml_sample() {
        let record = from_yaml_str("name: rex\nage: 3\nvaccinated: true\n").unwrap();
        assert_eq!(record.field_names(), vec!["Age", "Name", "Vaccinated"]);
        assert!(matches!(record.fields[2].field_type, Type::Bool));
    }
}
