//! CML document model and the conversion of discovered context maps into it

pub mod converter;
pub mod model;
pub mod primitive_types;

pub use converter::ContextMapToCmlConverter;
pub use model::{
    CmlAggregate, CmlAttribute, CmlBoundedContext, CmlComplexType, CmlContextMap, CmlDomainObject,
    CmlDomainObjectKind, CmlModel, CmlOperation, CmlParameter, CmlReference, CmlRelationship,
    CmlService, CmlTypeTarget,
};
pub use primitive_types::{CML_PRIMITIVE_TYPES, is_cml_primitive, map_primitive_type};
