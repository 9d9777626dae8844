//! Export Context Map use case
//!
//! Discovers a Context Map, converts it to CML and hands it to the writer.

use super::discover_context_map::{ContextMapDiscoverer, DiscoverContextMapError, DiscoveryReport};
use crate::ports::context_map_writer::{ContextMapWriter, WriteError};
use crate::ports::progress::{DiscoveryProgressNotifier, NoProgress};
use discovery_domain::{CmlModel, ContextMapToCmlConverter};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ExportContextMapError {
    #[error(transparent)]
    Discovery(#[from] DiscoverContextMapError),

    #[error(transparent)]
    Write(#[from] WriteError),
}

/// Input for the export use case
#[derive(Debug, Clone)]
pub struct ExportContextMapInput {
    pub destination: PathBuf,
}

impl ExportContextMapInput {
    pub fn new(destination: impl Into<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
        }
    }
}

/// Result of a successful export
#[derive(Debug, Clone)]
pub struct ExportContextMapOutput {
    pub report: DiscoveryReport,
    pub model: CmlModel,
    pub written_to: PathBuf,
}

pub struct ExportContextMapUseCase {
    discoverer: ContextMapDiscoverer,
    writer: Arc<dyn ContextMapWriter>,
}

impl ExportContextMapUseCase {
    pub fn new(discoverer: ContextMapDiscoverer, writer: Arc<dyn ContextMapWriter>) -> Self {
        Self { discoverer, writer }
    }

    pub fn execute(&self, input: ExportContextMapInput) -> Result<ExportContextMapOutput, ExportContextMapError> {
        self.execute_with_progress(input, &NoProgress)
    }

    pub fn execute_with_progress(
        &self,
        input: ExportContextMapInput,
        progress: &dyn DiscoveryProgressNotifier,
    ) -> Result<ExportContextMapOutput, ExportContextMapError> {
        let report = self.discoverer.discover_with_progress(progress)?;
        let model = ContextMapToCmlConverter::new().convert(&report.context_map);
        let written_to = self.writer.write(&model, &input.destination)?;
        info!(path = %written_to.display(), "Context Map written");

        Ok(ExportContextMapOutput {
            report,
            model,
            written_to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::context_map_writer::check_preconditions;
    use crate::strategies::{BoundedContextDiscoveryStrategy, DiscoveryError, DiscoveryRun};
    use crate::ports::type_scanner::{FieldDescriptor, OperationDescriptor, TypeDescriptor, TypeShape, TypeTag};
    use crate::strategies::resource_based::ResourceBasedDiscoveryStrategy;
    use crate::strategies::test_support::InMemoryScanner;
    use discovery_domain::cml::{CmlComplexType, CmlTypeTarget};
    use discovery_domain::{Aggregate, BoundedContext};
    use std::path::Path;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryWriter {
        written: Mutex<Vec<(PathBuf, CmlModel)>>,
    }

    impl ContextMapWriter for MemoryWriter {
        fn write(&self, model: &CmlModel, destination: &Path) -> Result<PathBuf, WriteError> {
            check_preconditions(model, destination)?;
            self.written
                .lock()
                .unwrap()
                .push((destination.to_path_buf(), model.clone()));
            Ok(destination.to_path_buf())
        }
    }

    struct SingleContext(Option<&'static str>);

    impl BoundedContextDiscoveryStrategy for SingleContext {
        fn id(&self) -> &str {
            "single"
        }

        fn discover_bounded_contexts(
            &self,
            _run: &mut DiscoveryRun,
        ) -> Result<Vec<BoundedContext>, DiscoveryError> {
            let Some(name) = self.0 else {
                return Ok(vec![]);
            };
            let mut context = BoundedContext::new(name)?;
            context.add_aggregate(Aggregate::new(name, "Customers")?);
            Ok(vec![context])
        }
    }

    #[test]
    fn test_export_writes_converted_model() {
        let writer = Arc::new(MemoryWriter::default());
        let discoverer = ContextMapDiscoverer::new().with_bounded_context_strategy(SingleContext(Some("CustomerCore")));
        let use_case = ExportContextMapUseCase::new(discoverer, writer.clone());

        let output = use_case.execute(ExportContextMapInput::new("src-gen/map.cml")).unwrap();
        assert_eq!(output.written_to, PathBuf::from("src-gen/map.cml"));
        assert_eq!(output.model.context_map.contains, vec!["CustomerCore"]);

        let written = writer.written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].1.bounded_contexts[0].aggregates[0].name, "Customers");
    }

    #[test]
    fn test_export_empty_map_fails() {
        let writer = Arc::new(MemoryWriter::default());
        let discoverer = ContextMapDiscoverer::new().with_bounded_context_strategy(SingleContext(None));
        let use_case = ExportContextMapUseCase::new(discoverer, writer.clone());

        let err = use_case.execute(ExportContextMapInput::new("map.cml")).unwrap_err();
        assert!(matches!(err, ExportContextMapError::Write(WriteError::EmptyModel)));
        assert!(writer.written.lock().unwrap().is_empty());
    }

    const SCOPE: &str = "com.acme.customer";

    fn resource(name: &str, path: &str, operation: &str, returns: TypeShape) -> TypeDescriptor {
        TypeDescriptor {
            tags: vec![TypeTag::new("RequestMapping").with_value(path)],
            operations: vec![OperationDescriptor {
                name: operation.to_string(),
                tags: vec![TypeTag::new("GetMapping")],
                return_shape: Some(returns),
                parameters: Vec::new(),
            }],
            ..TypeDescriptor::new(format!("{SCOPE}.web.{name}"))
        }
    }

    fn model(name: &str, fields: &[(&str, TypeShape)]) -> TypeDescriptor {
        TypeDescriptor {
            fields: fields
                .iter()
                .map(|(field, shape)| FieldDescriptor {
                    name: field.to_string(),
                    shape: shape.clone(),
                    synthetic: false,
                })
                .collect(),
            ..TypeDescriptor::new(format!("{SCOPE}.domain.{name}"))
        }
    }

    fn domain_type(name: &str) -> TypeShape {
        TypeShape::named(format!("{SCOPE}.domain.{name}"))
    }

    #[test]
    fn test_discovered_resources_convert_to_one_shared_value_object() {
        let scanner = InMemoryScanner::new(vec![
            TypeDescriptor {
                tags: vec![TypeTag::new("SpringBootApplication")],
                ..TypeDescriptor::new(format!("{SCOPE}.CustomerApplication"))
            },
            resource(
                "CustomerResource",
                "/customers",
                "getCustomers",
                TypeShape::collection_of("List", "java.util.List", domain_type("Customer")),
            ),
            resource("AddressResource", "/addresses", "getAddress", domain_type("Address")),
            resource("ContractResource", "/contracts", "getContract", domain_type("Contract")),
            model(
                "Customer",
                &[
                    ("firstname", TypeShape::named("java.lang.String")),
                    ("address", domain_type("Address")),
                ],
            ),
            model("Contract", &[("billingAddress", domain_type("Address"))]),
            model("Address", &[("street", TypeShape::named("java.lang.String"))]),
        ]);
        let discoverer = ContextMapDiscoverer::new()
            .with_bounded_context_strategy(ResourceBasedDiscoveryStrategy::spring_boot(SCOPE, Arc::new(scanner)));
        let use_case = ExportContextMapUseCase::new(discoverer, Arc::new(MemoryWriter::default()));

        let output = use_case.execute(ExportContextMapInput::new("customer.cml")).unwrap();
        let context = output.model.bounded_context("Customer").unwrap();

        let addresses: Vec<_> = context
            .aggregates
            .iter()
            .flat_map(|a| a.domain_objects.iter())
            .filter(|o| o.name.contains("Address"))
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(addresses, vec!["Address"]);
        assert!(context.aggregate("addresses").unwrap().domain_object("Address").is_some());

        let customer = context.aggregate("customers").unwrap().domain_object("Customer").unwrap();
        let contract = context.aggregate("contracts").unwrap().domain_object("Contract").unwrap();
        assert_eq!(customer.references.len(), 1);
        assert_eq!(customer.references[0].name, "address");
        assert_eq!(customer.references[0].target, "Address");
        assert_eq!(contract.references.len(), 1);
        assert_eq!(contract.references[0].name, "billingAddress");
        assert_eq!(contract.references[0].target, "Address");

        let root = context
            .aggregate("customers")
            .unwrap()
            .domain_object("customers_RootEntity")
            .unwrap();
        assert!(root.aggregate_root);
        assert_eq!(root.operations[0].name, "getCustomers");
        assert_eq!(
            root.operations[0].return_type,
            Some(CmlComplexType {
                target: CmlTypeTarget::DomainObject("Customer".to_string()),
                collection: Some("List".to_string()),
            })
        );
    }
}
