//! Bounded Context name mappings.
//!
//! Relationship sources (deployment descriptors, ...) name services
//! differently than the discovered contexts. A mapping translates a foreign
//! name into a candidate context name; the orchestrator tries each mapping
//! in order.

use discovery_domain::core::naming::separator_to_camel_case;

/// Translates a foreign name into a Bounded Context name
pub trait BoundedContextNameMapping: Send + Sync {
    fn map_name(&self, name: &str) -> String;
}

/// Uses the name as is. Always tried first.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNameMapping;

impl BoundedContextNameMapping for IdentityNameMapping {
    fn map_name(&self, name: &str) -> String {
        name.to_string()
    }
}

/// `customer-core` → `CustomerCore` for separator `-`.
///
/// Optionally strips a suffix after conversion (`customer-backend` →
/// `Customer` with suffix `Backend`).
#[derive(Debug, Clone)]
pub struct SeparatorToCamelCase {
    separator: String,
    strip_suffix: Option<String>,
}

impl SeparatorToCamelCase {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            strip_suffix: None,
        }
    }

    pub fn with_stripped_suffix(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.strip_suffix = if suffix.is_empty() { None } else { Some(suffix) };
        self
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }
}

impl BoundedContextNameMapping for SeparatorToCamelCase {
    fn map_name(&self, name: &str) -> String {
        let mapped = separator_to_camel_case(name, &self.separator);
        match &self.strip_suffix {
            Some(suffix) => match mapped.strip_suffix(suffix.as_str()) {
                Some(stripped) if !stripped.is_empty() => stripped.to_string(),
                _ => mapped,
            },
            None => mapped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        assert_eq!(IdentityNameMapping.map_name("customer-core"), "customer-core");
    }

    #[test]
    fn test_separator_to_camel_case() {
        let mapping = SeparatorToCamelCase::new("-");
        assert_eq!(mapping.map_name("customer-self-service"), "CustomerSelfService");
        assert_eq!(mapping.map_name("policy"), "Policy");
    }

    #[test]
    fn test_suffix_stripping() {
        let mapping = SeparatorToCamelCase::new("-").with_stripped_suffix("Backend");
        assert_eq!(mapping.map_name("customer-self-service-backend"), "CustomerSelfService");
        assert_eq!(mapping.map_name("risk-management-server"), "RiskManagementServer");
        // never strip down to nothing
        assert_eq!(mapping.map_name("backend"), "Backend");
    }

    #[test]
    fn test_empty_suffix_is_ignored() {
        let mapping = SeparatorToCamelCase::new("_").with_stripped_suffix("");
        assert_eq!(mapping.map_name("policy_management"), "PolicyManagement");
    }
}
