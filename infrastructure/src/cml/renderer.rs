//! Text rendering of the CML document model.

use discovery_domain::cml::{
    CmlAggregate, CmlAttribute, CmlBoundedContext, CmlComplexType, CmlContextMap, CmlDomainObject,
    CmlModel, CmlOperation, CmlReference, CmlRelationship, CmlService, CmlTypeTarget,
};

const INDENT: &str = "\t";

/// Renders a [`CmlModel`] as CML source text
#[derive(Debug, Clone, Copy, Default)]
pub struct CmlRenderer;

impl CmlRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, model: &CmlModel) -> String {
        let mut out = Output::default();
        render_context_map(&mut out, &model.context_map);
        for context in &model.bounded_contexts {
            out.blank();
            render_bounded_context(&mut out, context);
        }
        out.finish()
    }
}

#[derive(Default)]
struct Output {
    text: String,
    depth: usize,
}

impl Output {
    fn line(&mut self, content: &str) {
        for _ in 0..self.depth {
            self.text.push_str(INDENT);
        }
        self.text.push_str(content);
        self.text.push('\n');
    }

    fn blank(&mut self) {
        self.text.push('\n');
    }

    fn open(&mut self, header: &str) {
        self.line(&format!("{header} {{"));
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }

    fn comment(&mut self, comment: Option<&str>) {
        if let Some(comment) = comment {
            self.line(comment);
        }
    }

    fn finish(self) -> String {
        self.text
    }
}

fn render_context_map(out: &mut Output, map: &CmlContextMap) {
    out.open("ContextMap");
    if !map.contains.is_empty() {
        out.line(&format!("contains {}", map.contains.join(", ")));
    }
    for relationship in &map.relationships {
        out.blank();
        render_relationship(out, relationship);
    }
    out.close();
}

fn render_relationship(out: &mut Output, relationship: &CmlRelationship) {
    let header = format!("{} [U]->[D] {}", relationship.upstream, relationship.downstream);
    if relationship.exposed_aggregates.is_empty() {
        out.line(&header);
        return;
    }
    out.open(&header);
    out.comment(relationship.exposed_aggregates_comment.as_deref());
    out.line(&format!("exposedAggregates = {}", relationship.exposed_aggregates.join(", ")));
    out.close();
}

fn render_bounded_context(out: &mut Output, context: &CmlBoundedContext) {
    out.open(&format!("BoundedContext {}", context.name));
    if let Some(technology) = &context.implementation_technology {
        out.line(&format!("implementationTechnology = {}", quote(technology)));
    }
    for aggregate in &context.aggregates {
        out.blank();
        render_aggregate(out, aggregate);
    }
    out.close();
}

fn render_aggregate(out: &mut Output, aggregate: &CmlAggregate) {
    out.comment(aggregate.comment.as_deref());
    out.open(&format!("Aggregate {}", aggregate.name));
    let mut first = true;
    for object in &aggregate.domain_objects {
        if !std::mem::take(&mut first) {
            out.blank();
        }
        render_domain_object(out, object);
    }
    for service in &aggregate.services {
        if !std::mem::take(&mut first) {
            out.blank();
        }
        render_service(out, service);
    }
    out.close();
}

fn render_domain_object(out: &mut Output, object: &CmlDomainObject) {
    out.comment(object.comment.as_deref());
    out.open(&format!("{} {}", object.kind.keyword(), object.name));
    if object.aggregate_root {
        out.line("aggregateRoot");
    }
    for attribute in &object.attributes {
        out.line(&attribute_line(attribute));
    }
    for reference in &object.references {
        out.line(&reference_line(reference));
    }
    for operation in &object.operations {
        out.line(&format!("def {}", operation_signature(operation)));
    }
    out.close();
}

fn render_service(out: &mut Output, service: &CmlService) {
    out.comment(service.comment.as_deref());
    out.open(&format!("Service {}", service.name));
    for operation in &service.operations {
        out.line(&operation_signature(operation));
    }
    out.close();
}

fn attribute_line(attribute: &CmlAttribute) -> String {
    format!("{} {}", collection_wrapped(&attribute.ty, attribute.collection.as_deref()), attribute.name)
}

fn reference_line(reference: &CmlReference) -> String {
    format!(
        "- {} {}",
        collection_wrapped(&reference.target, reference.collection.as_deref()),
        reference.name
    )
}

fn operation_signature(operation: &CmlOperation) -> String {
    let return_type = operation
        .return_type
        .as_ref()
        .map(complex_type)
        .unwrap_or_else(|| "void".to_string());
    let parameters: Vec<String> = operation
        .parameters
        .iter()
        .map(|p| format!("{} {}", complex_type(&p.ty), p.name))
        .collect();
    format!("{return_type} {}({});", operation.name, parameters.join(", "))
}

fn complex_type(ty: &CmlComplexType) -> String {
    let name = match &ty.target {
        CmlTypeTarget::Primitive(name) => name.clone(),
        CmlTypeTarget::DomainObject(name) => format!("@{name}"),
    };
    collection_wrapped(&name, ty.collection.as_deref())
}

fn collection_wrapped(name: &str, collection: Option<&str>) -> String {
    match collection {
        Some(collection) => format!("{collection}<{name}>"),
        None => name.to_string(),
    }
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
