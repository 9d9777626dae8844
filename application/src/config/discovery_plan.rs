//! Discovery plan: which sources to scan and how to relate names.
//!
//! The plan is assembled by the configuration layer (file + CLI flags) and
//! turned into strategies by the composition root.

use crate::strategies::names::SeparatorToCamelCase;
use crate::strategies::resource_based::ResourceConventions;
use std::path::PathBuf;

/// Routable-resource types read from a type catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSource {
    pub catalog: PathBuf,
    pub scope: String,
    pub conventions: ResourceConventions,
}

/// Types carrying a context tag, read from a type catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedTypeSource {
    pub catalog: PathBuf,
    pub scope: String,
    pub tag: String,
    pub technology: String,
}

/// Separator-to-camel-case rule applied when relating foreign names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMappingRule {
    pub separator: String,
    pub strip_suffix: Option<String>,
}

impl NameMappingRule {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
            strip_suffix: None,
        }
    }

    pub fn with_strip_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.strip_suffix = Some(suffix.into());
        self
    }

    pub fn to_mapping(&self) -> SeparatorToCamelCase {
        let mapping = SeparatorToCamelCase::new(&self.separator);
        match &self.strip_suffix {
            Some(suffix) => mapping.with_stripped_suffix(suffix),
            None => mapping,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryPlan {
    pub resources: Vec<ResourceSource>,
    pub tagged_types: Vec<TaggedTypeSource>,
    /// OpenAPI document locations
    pub contract_locations: Vec<String>,
    /// Directories searched for docker-compose files
    pub topology_directories: Vec<PathBuf>,
    pub name_mappings: Vec<NameMappingRule>,
}

impl DiscoveryPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when at least one Bounded Context source is configured
    pub fn has_bounded_context_sources(&self) -> bool {
        !self.resources.is_empty() || !self.tagged_types.is_empty() || !self.contract_locations.is_empty()
    }

    pub fn bounded_context_source_count(&self) -> usize {
        self.resources.len() + self.tagged_types.len() + usize::from(!self.contract_locations.is_empty())
    }

    pub fn mappings(&self) -> Vec<SeparatorToCamelCase> {
        self.name_mappings.iter().map(NameMappingRule::to_mapping).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategies::names::BoundedContextNameMapping;

    #[test]
    fn test_empty_plan_has_no_sources() {
        let plan = DiscoveryPlan::new();
        assert!(!plan.has_bounded_context_sources());
        assert_eq!(plan.bounded_context_source_count(), 0);
    }

    #[test]
    fn test_contracts_count_as_one_source() {
        let plan = DiscoveryPlan {
            contract_locations: vec!["a.yml".into(), "b.yml".into()],
            topology_directories: vec![PathBuf::from(".")],
            ..Default::default()
        };
        assert!(plan.has_bounded_context_sources());
        assert_eq!(plan.bounded_context_source_count(), 1);
    }

    #[test]
    fn test_mapping_rules() {
        let plan = DiscoveryPlan {
            name_mappings: vec![NameMappingRule::new("-").with_strip_suffix("Service"), NameMappingRule::new("_")],
            ..Default::default()
        };
        let mappings = plan.mappings();
        assert_eq!(mappings[0].map_name("customer-core-service"), "CustomerCore");
        assert_eq!(mappings[1].map_name("policy_management"), "PolicyManagement");
    }
}
