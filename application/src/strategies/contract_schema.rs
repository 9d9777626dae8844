//! Bounded Context discovery from API contracts.
//!
//! One Bounded Context per contract, one Aggregate per path, one Service per
//! path with operations. Object schemas used by parameters, request bodies and
//! responses become entities of the path's aggregate.

use super::{BoundedContextDiscoveryStrategy, DiscoveryError, DiscoveryRun};
use crate::ports::contract_reader::{ApiContract, ContractOperation, ContractReader, PathItem, SchemaObject};
use discovery_domain::core::naming::{format_type_name, path_to_identifier, sanitize_identifier};
use discovery_domain::{
    Aggregate, BoundedContext, DomainError, DomainObjectKind, DomainObjectRef, Method, NameRegistry,
    Parameter, Service, Type, map_primitive_type,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Name of the parameter carrying the request body
pub const REQUEST_BODY_PARAMETER: &str = "input";

/// Contract-schema discovery over one or more contract documents
pub struct ContractDiscoveryStrategy {
    locations: Vec<String>,
    reader: Arc<dyn ContractReader>,
}

impl ContractDiscoveryStrategy {
    pub fn new(locations: Vec<String>, reader: Arc<dyn ContractReader>) -> Self {
        Self { locations, reader }
    }

    fn discover_context(&self, contract: &ApiContract) -> Result<BoundedContext, DiscoveryError> {
        let mut context = BoundedContext::new(sanitize_identifier(&contract.title))?;
        if let Some(version) = &contract.format_version {
            context = context.with_technology(format!("OpenAPI {version}"));
        }

        let mut aggregate_names = NameRegistry::new();
        for path in &contract.paths {
            let wanted = path_to_identifier(&path.path);
            if wanted.is_empty() {
                info!(path = %path.path, "Skipping path with empty identifier");
                continue;
            }
            let name = aggregate_names.allocate(&wanted, context.name());
            let aggregate = discover_aggregate(contract, context.name(), name, path)?;
            context.add_aggregate(aggregate);
        }

        debug!(
            context = %context.name(),
            aggregates = context.aggregates().len(),
            "Discovered bounded context from contract"
        );
        Ok(context)
    }
}

fn discover_aggregate(
    contract: &ApiContract,
    context: &str,
    name: String,
    path: &PathItem,
) -> Result<Aggregate, DiscoveryError> {
    let mut aggregate = Aggregate::new(context, name)?;
    aggregate.set_comment(path.summary.clone().or_else(|| path.description.clone()));

    if !path.has_operations() {
        return Ok(aggregate);
    }

    let mut service = Service::new(format!("{}Service", aggregate.name()))?.with_comment(format!(
        "This service contains all operations of the following endpoint: {}",
        path.path
    ));
    let mut resolver = SchemaResolver::new(contract, &mut aggregate);
    for (verb, operation) in &path.operations {
        match operation.operation_id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => service.add_method(resolver.discover_operation(id, operation)?),
            None => info!(path = %path.path, verb = %verb, "Skipping operation without operationId"),
        }
    }
    aggregate.add_service(service);
    Ok(aggregate)
}

/// Resolves schemas into types, creating entities in one aggregate
struct SchemaResolver<'a> {
    contract: &'a ApiContract,
    aggregate: &'a mut Aggregate,
    entities: HashMap<String, DomainObjectRef>,
    references: Vec<String>,
}

impl<'a> SchemaResolver<'a> {
    fn new(contract: &'a ApiContract, aggregate: &'a mut Aggregate) -> Self {
        Self {
            contract,
            aggregate,
            entities: HashMap::new(),
            references: Vec::new(),
        }
    }

    fn discover_operation(&mut self, id: &str, operation: &ContractOperation) -> Result<Method, DomainError> {
        let mut method = Method::new(id)?;

        for parameter in &operation.parameters {
            let suggested = format_type_name(&format!("{}Type", parameter.name));
            let ty = match &parameter.schema {
                Some(schema) => self.resolve(schema, &suggested)?,
                None => Type::primitive("Object")?,
            };
            method.add_parameter(Parameter::new(parameter.name.clone(), ty)?);
        }

        if let Some(body) = &operation.request_body {
            let ty = self.resolve(body, &format_type_name(&format!("{id}Input")))?;
            method.add_parameter(Parameter::new(REQUEST_BODY_PARAMETER, ty)?);
        }

        match operation.responses.as_slice() {
            [single] => {
                if let Some(schema) = &single.schema {
                    let ty = self.resolve(schema, &format_type_name(&format!("{id}Output")))?;
                    method.set_return_type(Some(ty));
                }
            }
            [] => {}
            many => info!(operation = %id, responses = many.len(), "Operation declares several responses; no return type"),
        }

        Ok(method)
    }

    fn resolve(&mut self, schema: &SchemaObject, suggested: &str) -> Result<Type, DomainError> {
        match schema {
            SchemaObject::Reference(key) => self.resolve_reference(key),
            SchemaObject::Object { properties } => {
                Ok(Type::domain_object(self.entity(suggested, properties)?))
            }
            SchemaObject::Array { items } => Ok(self.resolve(items, suggested)?.with_collection("List")),
            SchemaObject::Primitive { type_name } => {
                let name = type_name.as_deref().filter(|t| !t.is_empty()).unwrap_or("Object");
                Type::primitive(map_primitive_type(name))
            }
        }
    }

    fn resolve_reference(&mut self, key: &str) -> Result<Type, DomainError> {
        let Some(target) = self.contract.schemas.get(key) else {
            warn!(schema = %key, "Dangling schema reference; using its name as primitive type");
            return Type::primitive(key);
        };
        if self.references.iter().any(|r| r == key) && !matches!(target, SchemaObject::Object { .. }) {
            warn!(schema = %key, "Cyclic schema reference; using its name as primitive type");
            return Type::primitive(key);
        }
        self.references.push(key.to_string());
        let resolved = self.resolve(target, key);
        self.references.pop();
        resolved
    }

    /// Entity for an object schema, memoized by name within the aggregate.
    ///
    /// The entity is registered before its properties are resolved so that
    /// self-referencing schemas terminate.
    fn entity(&mut self, name: &str, properties: &[(String, SchemaObject)]) -> Result<DomainObjectRef, DomainError> {
        if let Some(handle) = self.entities.get(name) {
            return Ok(handle.clone());
        }
        let handle = self
            .aggregate
            .create_domain_object(DomainObjectKind::Entity, name)?
            .handle()
            .clone();
        self.entities.insert(name.to_string(), handle.clone());

        for (key, property) in properties {
            let ty = self.resolve(property, &format_type_name(&format!("{key}Type")))?;
            if let Some(object) = self.aggregate.domain_object_mut(&handle.name) {
                object.add_attribute(key.clone(), ty)?;
            }
        }
        Ok(handle)
    }
}

impl BoundedContextDiscoveryStrategy for ContractDiscoveryStrategy {
    fn id(&self) -> &str {
        "openapi"
    }

    fn discover_bounded_contexts(
        &self,
        _run: &mut DiscoveryRun,
    ) -> Result<Vec<BoundedContext>, DiscoveryError> {
        let mut contexts = Vec::new();
        for location in &self.locations {
            let outcome = self.reader.read(location)?;
            for warning in &outcome.warnings {
                warn!(location = %location, "{}", warning);
            }
            contexts.push(self.discover_context(&outcome.contract)?);
        }
        Ok(contexts)
    }
}
