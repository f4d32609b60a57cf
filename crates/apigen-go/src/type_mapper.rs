use std::fmt::Write;

use apigen_core::ir::{Metadata, NamedType, Record, Type};

/// Map a `Type` to its Go type expression.
pub fn type_to_go(ty: &Type) -> String {
    match ty {
        Type::Any => "interface{}".to_string(),
        Type::Bool => "bool".to_string(),
        Type::String => "string".to_string(),
        Type::Number => "float64".to_string(),
        Type::List(elem) => format!("[]{}", type_to_go(elem)),
        Type::Named(named) => named_to_go(named),
        Type::Record(record) => record_to_go(record),
    }
}

/// A reference to a named type: `*Pet`, `Pet`, or `*client.Client` for module-owned types.
pub fn named_to_go(named: &NamedType) -> String {
    let ptr = if named.nullable { "*" } else { "" };
    match &named.module {
        Some(module) => format!("{ptr}{}.{}", package_name(module), named.name),
        None => format!("{ptr}{}", named.name),
    }
}

/// Package identifier of an import path, taken as its last segment.
pub fn package_name(module: &str) -> &str {
    module.rsplit('/').next().unwrap_or(module)
}

fn record_to_go(record: &Record) -> String {
    if record.is_empty() {
        return "struct{}".to_string();
    }

    let mut out = String::from("struct {\n");
    for field in &record.fields {
        let _ = write!(out, "\t{} {}", field.name, type_to_go(&field.field_type));
        if let Some(tag) = struct_tag(&field.metadata) {
            let _ = write!(out, " {tag}");
        }
        out.push('\n');
    }
    out.push('}');
    out
}

/// Render metadata as a Go struct tag literal, e.g. `` `json:"id,omitempty"` ``.
///
/// Keys are emitted in ascending order. Returns `None` for empty metadata.
pub fn struct_tag(metadata: &Metadata) -> Option<String> {
    if metadata.is_empty() {
        return None;
    }

    let tag = metadata
        .iter()
        .map(|(key, values)| format!("{key}:{}", go_quote(&values.join(","))))
        .collect::<Vec<_>>()
        .join(" ");

    if tag.contains('`') {
        Some(go_quote(&tag))
    } else {
        Some(format!("`{tag}`"))
    }
}

/// Quote `s` as an interpreted Go string literal.
pub fn go_quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() && (c as u32) < 0x80 => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
