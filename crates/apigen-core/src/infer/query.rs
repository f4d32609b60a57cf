use std::collections::HashSet;

use indexmap::IndexMap;

use crate::ir::{Field, QUERY_TAG, Record, Type, WIRE_TAG};
use crate::naming::{public_name, unique_name};

/// A sample set of query parameters: each key with one or more values.
///
/// Keys keep insertion order, and that order becomes the field order of the inferred record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySet {
    params: IndexMap<String, Vec<String>>,
}

impl QuerySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a URL-encoded query string such as `limit=10&tag=a&tag=b`.
    ///
    /// A leading `?` is ignored. Repeated keys collect their values in order.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.entry(key.into()).or_default().push(value.into());
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.params.get(key).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QuerySet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = QuerySet::new();
        for (k, v) in iter {
            set.append(k, v);
        }
        set
    }
}

/// Infer a record from a query set.
///
/// A key seen once becomes a `string` field, a repeated key a list of strings. Fields are
/// not sorted: they follow the order of the set. Query fields are never part of the JSON body.
pub fn infer_query(query: &QuerySet) -> Record {
    let mut used_names = HashSet::new();

    let fields = query
        .iter()
        .map(|(key, values)| {
            let field_type = if values.len() == 1 {
                Type::String
            } else {
                Type::list(Type::String)
            };
            Field::new(unique_name(&public_name(key), &mut used_names), key, field_type)
                .with_tag(QUERY_TAG, &[key])
                .with_tag(WIRE_TAG, &["-"])
        })
        .collect();

    Record::ordered(fields)
}
