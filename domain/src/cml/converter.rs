//! Conversion of a discovered [`ContextMap`] into the CML document model.

use super::model::*;
use crate::strategic::{BoundedContext, ContextMap, Relationship};
use crate::tactical::{Aggregate, DomainObject, DomainObjectKind, Method, ROOT_ENTITY_SUFFIX, Type, TypeKind};
use tracing::{debug, warn};

/// Converts a [`ContextMap`] to a [`CmlModel`].
///
/// Domain objects are created first for the whole map; attributes,
/// references and operations are filled in afterwards so that every
/// domain-object type can be resolved regardless of declaration order.
#[derive(Debug, Default)]
pub struct ContextMapToCmlConverter;

impl ContextMapToCmlConverter {
    pub fn new() -> Self {
        Self
    }

    pub fn convert(&self, map: &ContextMap) -> CmlModel {
        let mut model = CmlModel::default();

        for context in map.bounded_contexts() {
            model.context_map.contains.push(context.name().to_string());
            model.bounded_contexts.push(convert_skeleton(context));
        }

        for (cml_context, context) in model.bounded_contexts.iter_mut().zip(map.bounded_contexts()) {
            for (cml_aggregate, aggregate) in cml_context.aggregates.iter_mut().zip(context.aggregates()) {
                fill_aggregate(map, cml_aggregate, aggregate);
            }
        }

        for relationship in map.relationships() {
            let converted = convert_relationship(&model, relationship);
            model.context_map.relationships.push(converted);
        }

        debug!(
            bounded_contexts = model.bounded_contexts.len(),
            relationships = model.context_map.relationships.len(),
            "Converted context map to CML"
        );
        model
    }
}

fn block_comment(comment: Option<&str>) -> Option<String> {
    comment
        .filter(|c| !c.is_empty())
        .map(|c| format!("/* {c} */"))
}

fn convert_skeleton(context: &BoundedContext) -> CmlBoundedContext {
    CmlBoundedContext {
        name: context.name().to_string(),
        implementation_technology: context.technology().map(str::to_string),
        aggregates: context.aggregates().iter().map(aggregate_skeleton).collect(),
    }
}

fn aggregate_skeleton(aggregate: &Aggregate) -> CmlAggregate {
    let mut domain_objects: Vec<CmlDomainObject> = aggregate
        .domain_objects()
        .iter()
        .map(|object| {
            let kind = match object.kind() {
                DomainObjectKind::Entity => CmlDomainObjectKind::Entity,
                DomainObjectKind::ValueObject => CmlDomainObjectKind::ValueObject,
            };
            let mut cml = CmlDomainObject::new(object.name(), kind);
            cml.comment = block_comment(object.comment());
            cml
        })
        .collect();

    if let Some(root) = domain_objects
        .iter_mut()
        .find(|o| o.kind == CmlDomainObjectKind::Entity && o.name.ends_with(ROOT_ENTITY_SUFFIX))
    {
        root.aggregate_root = true;
    }

    CmlAggregate {
        name: aggregate.name().to_string(),
        comment: block_comment(aggregate.comment()),
        domain_objects,
        services: Vec::new(),
    }
}

fn fill_aggregate(map: &ContextMap, cml_aggregate: &mut CmlAggregate, aggregate: &Aggregate) {
    for (cml_object, object) in cml_aggregate.domain_objects.iter_mut().zip(aggregate.domain_objects()) {
        fill_domain_object(map, cml_object, object);
    }
    cml_aggregate.services = aggregate
        .services()
        .iter()
        .map(|service| CmlService {
            name: service.name().to_string(),
            comment: block_comment(service.comment()),
            operations: service.methods().iter().map(|m| convert_method(map, m)).collect(),
        })
        .collect();
}

fn fill_domain_object(map: &ContextMap, cml: &mut CmlDomainObject, object: &DomainObject) {
    for attribute in object.attributes() {
        match complex_type(map, &attribute.ty) {
            CmlComplexType {
                target: CmlTypeTarget::DomainObject(target),
                collection,
            } => cml.references.push(CmlReference {
                name: attribute.name.clone(),
                target,
                collection,
            }),
            CmlComplexType {
                target: CmlTypeTarget::Primitive(ty),
                collection,
            } => cml.attributes.push(CmlAttribute {
                name: attribute.name.clone(),
                ty,
                collection,
            }),
        }
    }

    for reference in object.references() {
        match complex_type(map, reference.ty()) {
            CmlComplexType {
                target: CmlTypeTarget::DomainObject(target),
                collection,
            } => cml.references.push(CmlReference {
                name: reference.name().to_string(),
                target,
                collection,
            }),
            // Dangling reference, keep the field as a plain attribute.
            CmlComplexType {
                target: CmlTypeTarget::Primitive(ty),
                collection,
            } => cml.attributes.push(CmlAttribute {
                name: reference.name().to_string(),
                ty,
                collection,
            }),
        }
    }

    cml.operations = object.methods().iter().map(|m| convert_method(map, m)).collect();
}

fn convert_method(map: &ContextMap, method: &Method) -> CmlOperation {
    CmlOperation {
        name: method.name().to_string(),
        return_type: method.return_type().map(|ty| complex_type(map, ty)),
        parameters: method
            .parameters()
            .iter()
            .map(|p| CmlParameter {
                name: p.name.clone(),
                ty: complex_type(map, &p.ty),
            })
            .collect(),
    }
}

fn complex_type(map: &ContextMap, ty: &Type) -> CmlComplexType {
    let target = match ty.kind() {
        TypeKind::Primitive(name) => CmlTypeTarget::Primitive(name.clone()),
        TypeKind::DomainObject(handle) => match map.resolve(handle) {
            Some(object) => CmlTypeTarget::DomainObject(object.name().to_string()),
            None => {
                warn!(target_object = %handle, "Domain object type no longer resolves; using its name as primitive type");
                CmlTypeTarget::Primitive(handle.name.clone())
            }
        },
    };
    CmlComplexType {
        target,
        collection: ty.collection().map(str::to_string),
    }
}

fn convert_relationship(model: &CmlModel, relationship: &Relationship) -> CmlRelationship {
    let upstream = model.bounded_context(relationship.upstream());
    let exposed_aggregates = relationship
        .exposed_aggregates()
        .iter()
        .filter(|name| upstream.and_then(|bc| bc.aggregate(name)).is_some())
        .cloned()
        .collect();
    CmlRelationship {
        upstream: relationship.upstream().to_string(),
        downstream: relationship.downstream().to_string(),
        exposed_aggregates,
        exposed_aggregates_comment: relationship
            .comment()
            .filter(|c| !c.is_empty())
            .map(|c| format!("// {c}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tactical::{DomainObjectRef, Parameter, Service, root_entity_name};

    fn customer_context() -> BoundedContext {
        let mut aggregate = Aggregate::new("Customer", "customers")
            .unwrap()
            .with_comment("Created from a controller.");
        let root = aggregate
            .create_domain_object(DomainObjectKind::Entity, root_entity_name("customers"))
            .unwrap();
        let customer = DomainObjectRef::new("Customer", "customers", "Customer");
        let mut method = Method::new("getCustomers").unwrap()
            .with_return_type(Type::domain_object(customer.clone()).with_collection("List"));
        method.add_parameter(Parameter::new("filter", Type::primitive("String").unwrap()).unwrap());
        root.add_method(method);
        root.add_method(Method::new("deleteAll").unwrap());

        let address = DomainObjectRef::new("Customer", "customers", "Address");
        let mut object =
            DomainObject::new(DomainObjectKind::ValueObject, "Customer", "customers", "Customer")
                .unwrap()
                .with_comment("Derived.");
        object.add_attribute("firstname", Type::primitive("String").unwrap()).unwrap();
        object.add_attribute("home", Type::domain_object(address.clone())).unwrap();
        object
            .add_reference("addresses", Type::domain_object(address).with_collection("List"))
            .unwrap();
        aggregate.add_domain_object(object).unwrap();
        aggregate.create_domain_object(DomainObjectKind::ValueObject, "Address").unwrap();

        let mut context = BoundedContext::new("Customer").unwrap().with_technology("Spring Boot");
        context.add_aggregate(aggregate);
        context
    }

    fn convert(map: &ContextMap) -> CmlModel {
        ContextMapToCmlConverter::new().convert(map)
    }

    #[test]
    fn test_bounded_context_and_aggregate() {
        let mut map = ContextMap::new();
        map.add_bounded_context(customer_context());
        let model = convert(&map);

        assert_eq!(model.context_map.contains, vec!["Customer"]);
        let bc = model.bounded_context("Customer").unwrap();
        assert_eq!(bc.implementation_technology.as_deref(), Some("Spring Boot"));
        let aggregate = bc.aggregate("customers").unwrap();
        assert_eq!(aggregate.comment.as_deref(), Some("/* Created from a controller. */"));
        assert_eq!(aggregate.domain_objects.len(), 3);
    }

    #[test]
    fn test_root_entity_flag_and_operations() {
        let mut map = ContextMap::new();
        map.add_bounded_context(customer_context());
        let model = convert(&map);
        let aggregate = model.bounded_contexts[0].aggregate("customers").unwrap();

        let root = aggregate.domain_object("customers_RootEntity").unwrap();
        assert!(root.aggregate_root);
        assert_eq!(root.kind, CmlDomainObjectKind::Entity);
        let get = &root.operations[0];
        assert_eq!(
            get.return_type,
            Some(CmlComplexType {
                target: CmlTypeTarget::DomainObject("Customer".to_string()),
                collection: Some("List".to_string()),
            })
        );
        assert_eq!(get.parameters[0].name, "filter");
        assert!(root.operations[1].return_type.is_none());

        assert!(!aggregate.domain_object("Customer").unwrap().aggregate_root);
    }

    #[test]
    fn test_domain_object_typed_attribute_becomes_reference() {
        let mut map = ContextMap::new();
        map.add_bounded_context(customer_context());
        let model = convert(&map);
        let customer = model.bounded_contexts[0]
            .aggregate("customers")
            .unwrap()
            .domain_object("Customer")
            .unwrap();

        assert_eq!(customer.kind, CmlDomainObjectKind::ValueObject);
        assert_eq!(customer.comment.as_deref(), Some("/* Derived. */"));
        assert_eq!(customer.attributes.len(), 1);
        assert_eq!(customer.attributes[0].ty, "String");
        let names: Vec<_> = customer.references.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["home", "addresses"]);
        assert_eq!(customer.references[1].collection.as_deref(), Some("List"));
        assert_eq!(customer.references[1].target, "Address");
    }

    #[test]
    fn test_dangling_type_degrades_to_primitive() {
        let mut aggregate = Aggregate::new("Orders", "orders").unwrap();
        let object = aggregate
            .create_domain_object(DomainObjectKind::Entity, "Order")
            .unwrap();
        object
            .add_attribute("customer", Type::domain_object(DomainObjectRef::new("Gone", "x", "Customer")))
            .unwrap();
        let mut context = BoundedContext::new("Orders").unwrap();
        context.add_aggregate(aggregate);
        let mut map = ContextMap::new();
        map.add_bounded_context(context);

        let model = convert(&map);
        let order = &model.bounded_contexts[0].aggregates[0].domain_objects[0];
        assert!(order.references.is_empty());
        assert_eq!(order.attributes[0].ty, "Customer");
    }

    #[test]
    fn test_services_are_converted() {
        let mut aggregate = Aggregate::new("Api", "papers").unwrap();
        let mut service = Service::new("papersService").unwrap().with_comment("endpoint /papers");
        service.add_method(Method::new("getPapers").unwrap());
        aggregate.add_service(service);
        let mut context = BoundedContext::new("Api").unwrap();
        context.add_aggregate(aggregate);
        let mut map = ContextMap::new();
        map.add_bounded_context(context);

        let model = convert(&map);
        let services = &model.bounded_contexts[0].aggregates[0].services;
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].comment.as_deref(), Some("/* endpoint /papers */"));
        assert_eq!(services[0].operations[0].name, "getPapers");
    }

    #[test]
    fn test_relationship_conversion() {
        let customer = customer_context();
        let policy = BoundedContext::new("Policy").unwrap();
        let mut map = ContextMap::new();
        map.add_bounded_contexts([customer.clone(), policy.clone()]);
        let mut relationship = Relationship::new(&customer, &policy);
        relationship.expose_all_aggregates();
        relationship.set_comment("All aggregates exposed.");
        map.add_relationship(relationship).unwrap();

        let model = convert(&map);
        let converted = &model.context_map.relationships[0];
        assert_eq!(converted.upstream, "Customer");
        assert_eq!(converted.downstream, "Policy");
        assert_eq!(converted.exposed_aggregates, vec!["customers"]);
        assert_eq!(
            converted.exposed_aggregates_comment.as_deref(),
            Some("// All aggregates exposed.")
        );
    }
}
