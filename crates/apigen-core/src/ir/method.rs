use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::types::{Field, Record, Type};
use crate::error::ModelError;
use crate::naming::{NormalizedName, normalize_name};

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
    Trace,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            "OPTIONS" => Ok(HttpMethod::Options),
            "HEAD" => Ok(HttpMethod::Head),
            "TRACE" => Ok(HttpMethod::Trace),
            other => Err(format!("unknown HTTP method: {other}")),
        }
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The inputs of one API method, grouped by where they are sent.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub path: Option<Record>,
    pub query: Option<Record>,
    pub body: Option<Record>,
}

impl Request {
    /// All request fields as one record: path fields, then query fields, then body fields.
    ///
    /// Each group keeps its own order; the result is not re-sorted.
    pub fn to_flat_record(&self) -> Record {
        let fields = [&self.path, &self.query, &self.body]
            .into_iter()
            .flatten()
            .flat_map(|record| record.fields.iter().cloned())
            .collect();
        Record::ordered(fields)
    }

    /// The first field name that appears twice, within one group or across groups.
    pub fn field_collision(&self) -> Option<String> {
        let mut seen = HashSet::new();
        for record in [&self.path, &self.query, &self.body].into_iter().flatten() {
            for field in &record.fields {
                if !seen.insert(field.name.as_str()) {
                    return Some(field.name.clone());
                }
            }
        }
        None
    }

    pub fn query_fields(&self) -> &[Field] {
        self.query.as_ref().map(|r| r.fields.as_slice()).unwrap_or_default()
    }

    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }
}

/// A single API method of a service.
#[derive(Debug, Clone)]
pub struct Method {
    pub name: NormalizedName,
    pub verb: HttpMethod,
    /// Request URL. `{name}` placeholders are filled from the path fields, in field order.
    pub url_template: String,
    pub request: Request,
    pub response: Type,
}

impl Method {
    /// Build a method, rejecting requests whose groups share a field name.
    pub fn new(
        name: &str,
        verb: HttpMethod,
        url_template: impl Into<String>,
        request: Request,
        response: Type,
    ) -> Result<Self, ModelError> {
        if let Some(field) = request.field_collision() {
            return Err(ModelError::FieldCollision {
                method: name.to_string(),
                field,
            });
        }

        Ok(Self {
            name: normalize_name(name),
            verb,
            url_template: url_template.into(),
            request,
            response,
        })
    }

    pub fn request_type_name(&self) -> String {
        format!("{}Request", self.name.pascal_case)
    }

    pub fn response_type_name(&self) -> String {
        format!("{}Response", self.name.pascal_case)
    }
}

/// A named group of methods, emitted as one interface.
#[derive(Debug, Clone)]
pub struct Service {
    pub name: NormalizedName,
    pub methods: Vec<Method>,
}
