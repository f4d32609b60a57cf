use std::sync::Arc;

use apigen_core::ir::{HttpMethod, Method, NamedType, Request, Type};
use apigen_core::{QuerySet, from_json_str, infer_query, path_record};

/// Compact one-line description of a type, for assertions.
fn describe(ty: &Type) -> String {
    match ty {
        Type::Any => "Any".to_string(),
        Type::Bool => "Bool".to_string(),
        Type::String => "String".to_string(),
        Type::Number => "Number".to_string(),
        Type::List(elem) => format!("List({})", describe(elem)),
        Type::Named(named) => {
            let ptr = if named.nullable { "*" } else { "" };
            format!("{ptr}{}{}", named.name, describe(&named.underlying))
        }
        Type::Record(record) => {
            let fields: Vec<String> = record
                .fields
                .iter()
                .map(|f| format!("{}: {}", f.name, describe(&f.field_type)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
    }
}

fn field_type<'a>(record: &'a apigen_core::ir::Record, name: &str) -> &'a Type {
    &record.field(name).expect("field should exist").field_type
}

fn named(ty: &Type) -> &Arc<NamedType> {
    match ty {
        Type::Named(n) => n,
        other => panic!("expected named type, got {}", describe(other)),
    }
}

#[test]
fn null_is_any() {
    let record = from_json_str(r#"{"x": null}"#).unwrap();
    assert!(matches!(field_type(&record, "X"), Type::Any));
}

#[test]
fn nested_object_becomes_named() {
    let record = from_json_str(r#"{"user": {"id": 1}}"#).unwrap();
    let user = named(field_type(&record, "User"));
    assert_eq!(user.name, "User");
    assert!(user.nullable);
    assert!(user.module.is_none());
    insta::assert_snapshot!(describe(field_type(&record, "User")), @"*User{Id: Number}");
}

#[test]
fn list_of_records_is_singularized() {
    let record = from_json_str(r#"{"pets": [{"name": "x"}]}"#).unwrap();
    insta::assert_snapshot!(describe(field_type(&record, "Pets")), @"List(*Pet{Name: String})");
}

#[test]
fn empty_list_is_list_of_any() {
    let record = from_json_str(r#"{"tags": []}"#).unwrap();
    insta::assert_snapshot!(describe(field_type(&record, "Tags")), @"List(Any)");
}

#[test]
fn list_uses_first_element_only() {
    let record = from_json_str(r#"{"values": [1, "two", null]}"#).unwrap();
    insta::assert_snapshot!(describe(field_type(&record, "Values")), @"List(Number)");
}

#[test]
fn deep_document() {
    let record = from_json_str(
        r#"{
            "meta": {"total": 2, "next": null},
            "items": [{"id": "a", "owner": {"login": "k"}, "labels": ["x"]}],
            "ok": true
        }"#,
    )
    .unwrap();

    insta::assert_snapshot!(
        describe(&Type::Record(record)),
        @"{Items: List(*Item{Id: String, Labels: List(String), Owner: *Owner{Login: String}}), Meta: *Meta{Next: Any, Total: Number}, Ok: Bool}"
    );
}

#[test]
fn inference_is_deterministic() {
    let a = from_json_str(r#"{"b": {"y": 1, "x": 2}, "a": [1]}"#).unwrap();
    let b = from_json_str(r#"{"a": [3], "b": {"x": 5, "y": 6}}"#).unwrap();
    assert_eq!(describe(&Type::Record(a)), describe(&Type::Record(b)));
}

#[test]
fn each_nested_object_is_its_own_declaration() {
    let record = from_json_str(r#"{"a": {"v": 1}, "b": {"v": 1}}"#).unwrap();
    let a = named(field_type(&record, "A"));
    let b = named(field_type(&record, "B"));
    assert!(!Arc::ptr_eq(a, b));
}

#[test]
fn query_cardinality() {
    let one = infer_query(&QuerySet::parse("id=1"));
    assert!(matches!(field_type(&one, "Id"), Type::String));

    let many = infer_query(&QuerySet::parse("id=1&id=2&id=3"));
    insta::assert_snapshot!(describe(field_type(&many, "Id")), @"List(String)");
}

#[test]
fn request_composed_from_samples() {
    let request = Request {
        path: path_record("/users/{id}"),
        query: Some(infer_query(&QuerySet::parse("limit=10"))),
        body: Some(from_json_str(r#"{"name": "k"}"#).unwrap()),
    };
    let method = Method::new(
        "UpdateUser",
        HttpMethod::Put,
        "/users/{id}",
        request,
        Type::Any,
    )
    .unwrap();

    assert_eq!(
        method.request.to_flat_record().field_names(),
        vec!["Id", "Limit", "Name"]
    );
}

#[test]
fn colliding_sections_are_rejected() {
    let request = Request {
        path: path_record("/users/{name}"),
        query: None,
        body: Some(from_json_str(r#"{"name": "k"}"#).unwrap()),
    };
    let result = Method::new("RenameUser", HttpMethod::Put, "/users/{name}", request, Type::Any);
    assert!(result.is_err());
}
