//! In-memory fakes for strategy tests

use crate::ports::contract_reader::{ApiContract, ContractParseOutcome, ContractReadError, ContractReader};
use crate::ports::topology_reader::{ServiceDependency, TopologyReadError, TopologyReader};
use crate::ports::type_scanner::{TypeDescriptor, TypeMetadataScanner};
use std::path::{Path, PathBuf};

/// Scanner over a fixed list of types, preserving insertion order
pub struct InMemoryScanner {
    types: Vec<TypeDescriptor>,
}

impl InMemoryScanner {
    pub fn new(types: Vec<TypeDescriptor>) -> Self {
        Self { types }
    }

    pub fn push(&mut self, ty: TypeDescriptor) {
        self.types.push(ty);
    }
}

impl TypeMetadataScanner for InMemoryScanner {
    fn find_tagged_types(&self, scope: &str, tag: &str) -> Vec<TypeDescriptor> {
        self.types
            .iter()
            .filter(|t| t.is_within(scope) && t.has_tag(tag))
            .cloned()
            .collect()
    }

    fn resolve_type(&self, qualified_name: &str) -> Option<TypeDescriptor> {
        self.types
            .iter()
            .find(|t| t.qualified_name == qualified_name)
            .cloned()
    }
}

/// Reader returning prepared contracts by location
pub struct FixedContracts(pub Vec<(String, ApiContract)>);

impl ContractReader for FixedContracts {
    fn read(&self, location: &str) -> Result<ContractParseOutcome, ContractReadError> {
        self.0
            .iter()
            .find(|(l, _)| l == location)
            .map(|(_, contract)| ContractParseOutcome {
                contract: contract.clone(),
                warnings: vec!["no servers declared".to_string()],
            })
            .ok_or_else(|| ContractReadError::Parse {
                location: location.to_string(),
                message: "not found".to_string(),
            })
    }
}

/// Topology reader returning fixed pairs, or failing for unknown directories
pub struct FixedTopology {
    pub directory: PathBuf,
    pub dependencies: Vec<ServiceDependency>,
}

impl TopologyReader for FixedTopology {
    fn read_dependencies(&self, directory: &Path) -> Result<Vec<ServiceDependency>, TopologyReadError> {
        if directory != self.directory {
            return Err(TopologyReadError::MissingDirectory(directory.to_path_buf()));
        }
        Ok(self.dependencies.clone())
    }
}
