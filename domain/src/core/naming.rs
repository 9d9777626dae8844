//! Identifier derivation rules.
//!
//! Every discovery algorithm turns some external string (a mount path, a
//! document title, a property key) into a CML identifier. The rules live
//! here so that all algorithms agree on them.

/// Derive an aggregate name from a route path.
///
/// Strips a single leading `/`, replaces `/` and `-` with `_` and drops path
/// template braces.
///
/// ```
/// use discovery_domain::core::naming::path_to_identifier;
///
/// assert_eq!(path_to_identifier("/customers/{id}/address-book"), "customers_id_address_book");
/// ```
pub fn path_to_identifier(path: &str) -> String {
    let path = path.strip_prefix('/').unwrap_or(path);
    path.chars()
        .filter(|c| !matches!(c, '{' | '}'))
        .map(|c| match c {
            '/' | '-' => '_',
            other => other,
        })
        .collect()
}

/// Upper-case the first character, leave the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Name for a domain object synthesized from an anonymous schema.
///
/// Empty input yields `UnknownType`.
pub fn format_type_name(raw: &str) -> String {
    if raw.is_empty() {
        "UnknownType".to_string()
    } else {
        capitalize(raw)
    }
}

/// Reduce free text (e.g. a document title) to an identifier by dropping every
/// character that is neither alphanumeric nor `_`.
pub fn sanitize_identifier(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Simple name of a dotted or `$`-nested qualified type name.
pub fn simple_type_name(qualified: &str) -> &str {
    let tail = qualified.rsplit('.').next().unwrap_or(qualified);
    tail.rsplit('$').next().unwrap_or(tail)
}

/// Split on `separator`, capitalize every non-empty part and join.
///
/// `customer-self-service` with `-` becomes `CustomerSelfService`.
pub fn separator_to_camel_case(name: &str, separator: &str) -> String {
    if separator.is_empty() {
        return name.to_string();
    }
    name.split(separator)
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect()
}
