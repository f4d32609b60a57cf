use std::collections::BTreeMap;
use std::sync::Arc;

/// Struct tag metadata: tag key to its comma-separated values.
pub type Metadata = BTreeMap<String, Vec<String>>;

/// Tag key carrying the wire name of a body or response field.
pub const WIRE_TAG: &str = "json";
/// Tag key carrying the wire name of a query parameter.
pub const QUERY_TAG: &str = "name";
/// Tag key carrying the placeholder name of a path parameter.
pub const PATH_TAG: &str = "path";

/// An inferred type.
#[derive(Debug, Clone)]
pub enum Type {
    /// Unknown or absent type, inferred from `null` or an empty list.
    Any,
    Bool,
    String,
    Number,
    List(Box<Type>),
    Named(Arc<NamedType>),
    Record(Record),
}

impl Type {
    /// Named types this type references directly, without descending into them.
    pub fn dependencies(&self) -> Vec<Arc<NamedType>> {
        let mut out = Vec::new();
        self.collect_dependencies(&mut out);
        out
    }

    fn collect_dependencies(&self, out: &mut Vec<Arc<NamedType>>) {
        match self {
            Type::Any | Type::Bool | Type::String | Type::Number => {}
            Type::List(elem) => elem.collect_dependencies(out),
            Type::Named(named) => out.push(Arc::clone(named)),
            Type::Record(record) => {
                for field in &record.fields {
                    field.field_type.collect_dependencies(out);
                }
            }
        }
    }

    pub fn named(named: NamedType) -> Self {
        Type::Named(Arc::new(named))
    }

    pub fn list(elem: Type) -> Self {
        Type::List(Box::new(elem))
    }
}

/// A declared type, referenced by name wherever it is used.
///
/// Two `NamedType`s are the same declaration only if they are the same allocation;
/// structurally equal records may be distinct declarations.
#[derive(Debug, Clone)]
pub struct NamedType {
    pub name: String,
    /// Import path of the module that declares this type. Such types are never emitted.
    pub module: Option<String>,
    /// Referenced through a pointer.
    pub nullable: bool,
    pub underlying: Type,
}

impl NamedType {
    pub fn new(name: impl Into<String>, underlying: Type) -> Self {
        Self {
            name: name.into(),
            module: None,
            nullable: false,
            underlying,
        }
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// A type declared by another module, e.g. the client runtime.
    pub fn external(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: Some(module.into()),
            nullable: false,
            underlying: Type::Any,
        }
    }

    pub fn is_external(&self) -> bool {
        self.module.is_some()
    }
}

/// An ordered set of typed fields.
#[derive(Debug, Clone, Default)]
pub struct Record {
    pub fields: Vec<Field>,
}

impl Record {
    /// Build a record with fields sorted ascending by name.
    pub fn sorted(mut fields: Vec<Field>) -> Self {
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        Self { fields }
    }

    /// Build a record that keeps the given field order.
    pub fn ordered(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

/// A field of a record.
#[derive(Debug, Clone)]
pub struct Field {
    /// Public (exported) name.
    pub name: String,
    /// Key as it appeared in the sample.
    pub wire_key: String,
    pub metadata: Metadata,
    pub field_type: Type,
}

impl Field {
    pub fn new(name: impl Into<String>, wire_key: impl Into<String>, field_type: Type) -> Self {
        Self {
            name: name.into(),
            wire_key: wire_key.into(),
            metadata: Metadata::new(),
            field_type,
        }
    }

    pub fn with_tag(mut self, key: &str, values: &[&str]) -> Self {
        self.metadata
            .insert(key.to_string(), values.iter().map(|v| v.to_string()).collect());
        self
    }

    /// Whether this field's type is a list, as opposed to a single value.
    pub fn is_list(&self) -> bool {
        matches!(self.field_type, Type::List(_))
    }
}
