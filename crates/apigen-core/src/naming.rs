use std::collections::HashSet;

use heck::{ToLowerCamelCase, ToPascalCase};

/// A name with the casing variants the Go emitter needs pre-computed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NormalizedName {
    pub original: String,
    /// Exported form, used for types, interfaces and methods.
    pub pascal_case: String,
    /// Unexported form, used for the per-service implementation struct.
    pub camel_case: String,
}

impl std::fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.original)
    }
}

/// Create a `NormalizedName` from an arbitrary string, computing all casing variants.
pub fn normalize_name(name: &str) -> NormalizedName {
    let sanitized = sanitize_identifier(name);

    NormalizedName {
        original: name.to_string(),
        pascal_case: sanitized.to_pascal_case(),
        camel_case: sanitized.to_lower_camel_case(),
    }
}

/// The exported Go identifier for an arbitrary wire key.
///
/// - `user_id` → `UserId`
/// - `created-at` → `CreatedAt`
/// - `3d` → `X3d`
pub fn public_name(key: &str) -> String {
    normalize_name(key).pascal_case
}

/// Singular form of a PascalCase name, used to name list element types.
///
/// Only the trailing word is inflected, so `UserAddresses` becomes `UserAddress`.
pub fn singularize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();

    for (plural, singular) in IRREGULAR {
        if lower.ends_with(plural) {
            let stem = &word[..word.len() - plural.len()];
            return format!("{stem}{}", match_case(&word[stem.len()..], singular));
        }
    }

    if lower.ends_with("ies") && word.len() > 3 {
        format!("{}y", &word[..word.len() - 3])
    } else if lower.ends_with("sses")
        || lower.ends_with("xes")
        || lower.ends_with("zzes")
        || lower.ends_with("ches")
        || lower.ends_with("shes")
    {
        word[..word.len() - 2].to_string()
    } else if lower.ends_with("ouses") {
        word[..word.len() - 1].to_string()
    } else if lower.ends_with("uses") {
        word[..word.len() - 2].to_string()
    } else if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        word.to_string()
    } else if lower.ends_with('s') && word.len() > 1 {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

/// `base`, or `base` with the first free numeric suffix (`UserId2`, `UserId3`, ...).
///
/// Distinct keys can share a public name (`user_id`, `userId`); the later ones get the suffix.
pub fn unique_name(base: &str, used_names: &mut HashSet<String>) -> String {
    if used_names.insert(base.to_string()) {
        return base.to_string();
    }
    let mut i = 2;
    loop {
        let candidate = format!("{base}{i}");
        if used_names.insert(candidate.clone()) {
            log::warn!("field name {base} is already taken, using {candidate}");
            return candidate;
        }
        i += 1;
    }
}

const IRREGULAR: &[(&str, &str)] = &[
    ("people", "person"),
    ("children", "child"),
    ("women", "woman"),
    ("men", "man"),
    ("mice", "mouse"),
    ("feet", "foot"),
    ("teeth", "tooth"),
];

/// Reuse the capitalization of the first letter of `original` for `replacement`.
fn match_case(original: &str, replacement: &str) -> String {
    match original.chars().next() {
        Some(c) if c.is_uppercase() => replacement.to_pascal_case(),
        _ => replacement.to_string(),
    }
}

/// Sanitize a string to be a valid Go identifier.
fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_separator = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if result.is_empty() && ch.is_ascii_digit() {
                result.push('X');
            }
            if prev_was_separator && !result.is_empty() {
                result.push('_');
            }
            result.push(ch);
            prev_was_separator = false;
        } else {
            prev_was_separator = true;
        }
    }

    if result.is_empty() {
        return "unnamed".to_string();
    }

    result
}
