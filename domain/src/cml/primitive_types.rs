//! Mapping of foreign type spellings onto CML primitive types

/// Primitive types the CML language knows.
pub const CML_PRIMITIVE_TYPES: &[&str] = &[
    "String",
    "int",
    "Integer",
    "Long",
    "Boolean",
    "Date",
    "DateTime",
    "Timestamp",
    "BigDecimal",
    "BigInteger",
    "Double",
    "Float",
    "Key",
    "PagingParameter",
    "PagedResult",
    "Blob",
    "Clob",
    "Object[]",
];

/// Map `raw` to the CML spelling of a primitive type (case-insensitive).
///
/// Unrecognised spellings pass through unchanged.
///
/// ```
/// use discovery_domain::cml::map_primitive_type;
///
/// assert_eq!(map_primitive_type("string"), "String");
/// assert_eq!(map_primitive_type("uuid"), "uuid");
/// ```
pub fn map_primitive_type(raw: &str) -> String {
    CML_PRIMITIVE_TYPES
        .iter()
        .find(|known| known.eq_ignore_ascii_case(raw))
        .map(|known| known.to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn is_cml_primitive(name: &str) -> bool {
    CML_PRIMITIVE_TYPES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_mapping() {
        assert_eq!(map_primitive_type("integer"), "Integer");
        assert_eq!(map_primitive_type("BOOLEAN"), "Boolean");
        assert_eq!(map_primitive_type("datetime"), "DateTime");
        assert_eq!(map_primitive_type("object[]"), "Object[]");
    }

    #[test]
    fn test_int_and_integer_are_distinct() {
        assert_eq!(map_primitive_type("INT"), "int");
        assert_eq!(map_primitive_type("Integer"), "Integer");
    }

    #[test]
    fn test_unknown_passes_through() {
        assert_eq!(map_primitive_type("number"), "number");
        assert_eq!(map_primitive_type(""), "");
    }

    #[test]
    fn test_is_cml_primitive() {
        assert!(is_cml_primitive("Long"));
        assert!(!is_cml_primitive("long"));
    }
}
