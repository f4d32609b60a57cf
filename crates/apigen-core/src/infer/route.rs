use std::collections::HashSet;

use indexmap::IndexMap;

use crate::ir::{Field, PATH_TAG, Record, Type, WIRE_TAG};
use crate::naming::{public_name, unique_name};

/// A piece of a URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Param(&'a str),
}

/// Split a template like `/users/{id}/posts` into literal and `{param}` segments.
///
/// An unclosed `{` is kept as literal text.
fn segments(template: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        if open > 0 {
            out.push(Segment::Literal(&rest[..open]));
        }
        out.push(Segment::Param(&rest[open + 1..open + close]));
        rest = &rest[open + close + 1..];
    }
    if !rest.is_empty() {
        out.push(Segment::Literal(rest));
    }

    out
}

/// Distinct placeholders of a template, first appearance first, with their field names.
fn placeholder_names(template: &str) -> IndexMap<&str, String> {
    let mut used_names = HashSet::new();
    let mut names = IndexMap::new();
    for segment in segments(template) {
        if let Segment::Param(param) = segment {
            names
                .entry(param)
                .or_insert_with(|| unique_name(&public_name(param), &mut used_names));
        }
    }
    names
}

/// Path parameters of a URL template as `string` fields, one per distinct placeholder, in
/// order of first appearance. Path fields are never part of the JSON body.
///
/// Returns `None` when the template has no placeholders.
pub fn path_record(template: &str) -> Option<Record> {
    let fields: Vec<Field> = placeholder_names(template)
        .into_iter()
        .map(|(param, name)| {
            Field::new(name, param, Type::String)
                .with_tag(PATH_TAG, &[param])
                .with_tag(WIRE_TAG, &["-"])
        })
        .collect();

    if fields.is_empty() {
        None
    } else {
        Some(Record::ordered(fields))
    }
}

/// The path field filling each placeholder occurrence, in template order.
///
/// A repeated placeholder repeats its field, matching the verbs of [`url_format`].
pub fn path_arguments(template: &str) -> Vec<String> {
    let names = placeholder_names(template);
    segments(template)
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Param(param) => names.get(param).cloned(),
            Segment::Literal(_) => None,
        })
        .collect()
}

/// The template as a Go format string: each placeholder becomes `%v`, literal `%` is escaped.
pub fn url_format(template: &str) -> String {
    segments(template)
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(text) => text.replace('%', "%%"),
            Segment::Param(_) => "%v".to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_record_order() {
        let record = path_record("/orgs/{org_id}/users/{user}").unwrap();
        assert_eq!(record.field_names(), vec!["OrgId", "User"]);
        assert_eq!(record.fields[0].metadata[PATH_TAG], vec!["org_id".to_string()]);
    }

    #[test]
    fn test_repeated_placeholder() {
        let template = "/a/{id}/b/{id}";
        let record = path_record(template).unwrap();
        assert_eq!(record.field_names(), vec!["Id"]);
        assert_eq!(url_format(template), "/a/%v/b/%v");
        assert_eq!(path_arguments(template), vec!["Id", "Id"]);
    }

    #[test]
    fn test_placeholders_sharing_a_public_name() {
        let template = "/{user_id}/{userId}/{user_id}";
        assert_eq!(path_record(template).unwrap().field_names(), vec!["UserId", "UserId2"]);
        assert_eq!(path_arguments(template), vec!["UserId", "UserId2", "UserId"]);
    }

    #[test]
    fn test_excluded_from_body() {
        let record = path_record("/users/{id}").unwrap();
        assert_eq!(record.fields[0].metadata[WIRE_TAG], vec!["-".to_string()]);
    }

    #[test]
    fn test_no_placeholders() {
        assert!(path_record("https://api.example.com/users").is_none());
        assert!(path_arguments("https://api.example.com/users").is_empty());
    }

    #[test]
    fn test_url_format() {
        assert_eq!(
            url_format("https://api.example.com/users/{id}/posts/{post}"),
            "https://api.example.com/users/%v/posts/%v"
        );
        assert_eq!(url_format("/search/{q}?fmt=100%"), "/search/%v?fmt=100%%");
    }

    #[test]
    fn test_unclosed_brace_is_literal() {
        assert_eq!(url_format("/a/{b"), "/a/{b");
        assert!(path_record("/a/{b").is_none());
    }
}
