//! Bounded Context discovery from routable-resource type metadata.
//!
//! Every application-root type becomes a Bounded Context, every routable
//! resource inside it an Aggregate with a synthetic root entity. Types
//! exchanged by the resource operations become value objects; their fields
//! become attributes or references in a second pass once every value object
//! of the strategy is known.

use super::{BoundedContextDiscoveryStrategy, DiscoveryError, DiscoveryRun};
use crate::ports::type_scanner::{TypeDescriptor, TypeMetadataScanner, TypeShape};
use discovery_domain::core::naming::{path_to_identifier, simple_type_name};
use discovery_domain::{
    Aggregate, BoundedContext, DomainError, DomainObject, DomainObjectKind, DomainObjectRef, Method, Parameter,
    Type, root_entity_name,
};
use std::sync::Arc;
use tracing::{debug, info};

/// Tags and labels identifying applications, resources and operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceConventions {
    /// Tag of the application-root type
    pub application_tag: String,
    /// Tag of routable resources; its values are the mount paths
    pub resource_tag: String,
    /// Tags marking routable operations
    pub operation_tags: Vec<String>,
    /// Implementation technology label of discovered contexts
    pub technology: String,
    /// Suffix stripped from application type names
    pub application_suffix: String,
}

impl ResourceConventions {
    /// Spring Boot applications with Spring Web controllers
    pub fn spring_boot() -> Self {
        Self {
            application_tag: "SpringBootApplication".to_string(),
            resource_tag: "RequestMapping".to_string(),
            operation_tags: [
                "GetMapping",
                "PostMapping",
                "PutMapping",
                "DeleteMapping",
                "PatchMapping",
                "RequestMapping",
            ]
            .iter()
            .map(|t| t.to_string())
            .collect(),
            technology: "Spring Boot".to_string(),
            application_suffix: "Application".to_string(),
        }
    }

    /// Look up a preset by name (`spring-boot`)
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "spring-boot" | "spring_boot" | "springboot" => Some(Self::spring_boot()),
            _ => None,
        }
    }

    fn context_name(&self, application: &str) -> String {
        match application.strip_suffix(self.application_suffix.as_str()) {
            Some(stripped) if !stripped.is_empty() && !self.application_suffix.is_empty() => {
                stripped.to_string()
            }
            _ => application.to_string(),
        }
    }
}

/// Value objects created for one aggregate, keyed by qualified type name
#[derive(Debug)]
struct AggregateMemo {
    /// Position of the owning context in the strategy's result; names may repeat
    context_index: usize,
    aggregate: String,
    objects: Vec<(String, DomainObjectRef)>,
}

impl AggregateMemo {
    fn get(&self, qualified_name: &str) -> Option<&DomainObjectRef> {
        self.objects
            .iter()
            .find(|(qualified, _)| qualified == qualified_name)
            .map(|(_, handle)| handle)
    }
}

enum Member {
    Attribute(String, Type),
    Reference(String, Type),
}

/// Type-metadata discovery of RESTful resources
pub struct ResourceBasedDiscoveryStrategy {
    scope: String,
    scanner: Arc<dyn TypeMetadataScanner>,
    conventions: ResourceConventions,
}

impl ResourceBasedDiscoveryStrategy {
    pub fn new(
        scope: impl Into<String>,
        scanner: Arc<dyn TypeMetadataScanner>,
        conventions: ResourceConventions,
    ) -> Self {
        Self {
            scope: scope.into(),
            scanner,
            conventions,
        }
    }

    pub fn spring_boot(scope: impl Into<String>, scanner: Arc<dyn TypeMetadataScanner>) -> Self {
        Self::new(scope, scanner, ResourceConventions::spring_boot())
    }

    fn discover_aggregate(
        &self,
        run: &mut DiscoveryRun,
        context: &BoundedContext,
        context_index: usize,
        application_scope: &str,
        resource: &TypeDescriptor,
        memos: &mut Vec<AggregateMemo>,
    ) -> Result<Option<Aggregate>, DiscoveryError> {
        let paths = resource
            .tag(&self.conventions.resource_tag)
            .map(|tag| tag.values.as_slice())
            .unwrap_or_default();
        let [path] = paths else {
            info!(
                resource = %resource.qualified_name,
                paths = paths.len(),
                "Skipping resource without a single mount path"
            );
            return Ok(None);
        };
        let wanted = path_to_identifier(path);
        if wanted.is_empty() {
            info!(resource = %resource.qualified_name, path = %path, "Skipping resource with empty path identifier");
            return Ok(None);
        }

        let name = run.aggregate_names.allocate(&wanted, context.name());
        let mut aggregate = Aggregate::new(context.name(), name.clone())?.with_comment(format!(
            "This Aggregate has been created on the basis of the RESTful HTTP controller {}.",
            resource.qualified_name
        ));
        let root_name = root_entity_name(&name);
        aggregate.create_domain_object(DomainObjectKind::Entity, root_name.clone())?;

        let mut memo = AggregateMemo {
            context_index,
            aggregate: name,
            objects: Vec::new(),
        };

        let operations = self
            .scanner
            .find_tagged_operations(resource, &self.conventions.operation_tags);
        for operation in operations {
            let mut method = Method::new(operation.name.clone())?;
            if let Some(shape) = &operation.return_shape {
                let ty = self.value_object_type(run, &mut aggregate, &mut memo, shape, application_scope)?;
                method.set_return_type(ty);
            }
            for parameter in &operation.parameters {
                if let Some(ty) =
                    self.value_object_type(run, &mut aggregate, &mut memo, &parameter.shape, application_scope)?
                {
                    method.add_parameter(Parameter::new(parameter.name.clone(), ty)?);
                }
            }
            if let Some(root) = aggregate.domain_object_mut(&root_name) {
                root.add_method(method);
            }
        }

        debug!(
            aggregate = %aggregate.name(),
            value_objects = memo.objects.len(),
            "Discovered aggregate"
        );
        memos.push(memo);
        Ok(Some(aggregate))
    }

    /// Type of an operation's return value or parameter.
    ///
    /// `None` when the element type is unknown or outside `scope`.
    fn value_object_type(
        &self,
        run: &mut DiscoveryRun,
        aggregate: &mut Aggregate,
        memo: &mut AggregateMemo,
        shape: &TypeShape,
        scope: &str,
    ) -> Result<Option<Type>, DiscoveryError> {
        let (element, collection) = shape.element();
        let Some(descriptor) = self.scanner.resolve_type(element) else {
            return Ok(None);
        };
        if !descriptor.is_within(scope) {
            return Ok(None);
        }

        let handle = match memo.get(element) {
            Some(handle) => handle.clone(),
            None => {
                let name = run
                    .domain_object_names
                    .allocate(descriptor.simple_name(), aggregate.name());
                let object = DomainObject::new(
                    DomainObjectKind::ValueObject,
                    aggregate.context(),
                    aggregate.name(),
                    name,
                )?
                .with_origin_type(descriptor.qualified_name.clone())
                .with_comment(format!(
                    "This value object has been derived from the class {}.",
                    descriptor.qualified_name
                ));
                let handle = object.handle().clone();
                aggregate.add_domain_object(object)?;
                memo.objects.push((element.to_string(), handle.clone()));
                handle
            }
        };

        Ok(Some(with_label(Type::domain_object(handle), collection)))
    }

    /// Attributes and references of every memoized value object.
    fn members(
        &self,
        memos: &[AggregateMemo],
        memo: &AggregateMemo,
        qualified_name: &str,
    ) -> Result<Vec<Member>, DiscoveryError> {
        let Some(descriptor) = self.scanner.resolve_type(qualified_name) else {
            return Ok(Vec::new());
        };
        let mut members = Vec::new();
        for field in self.scanner.data_members(&descriptor) {
            let (element, collection) = field.shape.member_element();
            let target = memo
                .get(element)
                .or_else(|| memos.iter().find_map(|other| other.get(element)));
            let member = match target {
                Some(handle) => {
                    let ty = Type::domain_object(handle.clone());
                    Member::Reference(field.name, with_label(ty, collection))
                }
                None => {
                    let ty = Type::primitive(simple_type_name(element))?;
                    Member::Attribute(field.name, with_label(ty, collection))
                }
            };
            members.push(member);
        }
        Ok(members)
    }

    fn fill_value_objects(
        &self,
        contexts: &mut [BoundedContext],
        memos: &[AggregateMemo],
    ) -> Result<(), DiscoveryError> {
        for memo in memos {
            for (qualified_name, handle) in &memo.objects {
                let members = self.members(memos, memo, qualified_name)?;
                let object = contexts
                    .get_mut(memo.context_index)
                    .and_then(|c| c.aggregate_mut(&memo.aggregate))
                    .and_then(|a| a.domain_object_mut(&handle.name))
                    .ok_or_else(|| DomainError::UnknownDomainObject(handle.to_string()))?;
                for member in members {
                    match member {
                        Member::Attribute(name, ty) => object.add_attribute(name, ty)?,
                        Member::Reference(name, ty) => object.add_reference(name, ty)?,
                    }
                }
            }
        }
        Ok(())
    }
}

fn with_label(ty: Type, collection: Option<&str>) -> Type {
    match collection {
        Some(label) => ty.with_collection(label),
        None => ty,
    }
}

impl BoundedContextDiscoveryStrategy for ResourceBasedDiscoveryStrategy {
    fn id(&self) -> &str {
        "resources"
    }

    fn discover_bounded_contexts(
        &self,
        run: &mut DiscoveryRun,
    ) -> Result<Vec<BoundedContext>, DiscoveryError> {
        let mut contexts = Vec::new();
        let mut memos = Vec::new();

        for application in self
            .scanner
            .find_tagged_types(&self.scope, &self.conventions.application_tag)
        {
            let name = self.conventions.context_name(application.simple_name());
            let mut context =
                BoundedContext::new(name)?.with_technology(self.conventions.technology.clone());
            let application_scope = application.scope().to_string();

            for resource in self
                .scanner
                .find_tagged_types(&application_scope, &self.conventions.resource_tag)
            {
                if let Some(aggregate) = self.discover_aggregate(
                    run,
                    &context,
                    contexts.len(),
                    &application_scope,
                    &resource,
                    &mut memos,
                )? {
                    context.add_aggregate(aggregate);
                }
            }

            debug!(
                context = %context.name(),
                aggregates = context.aggregates().len(),
                "Discovered bounded context from application type"
            );
            contexts.push(context);
        }

        self.fill_value_objects(&mut contexts, &memos)?;
        Ok(contexts)
    }
}
