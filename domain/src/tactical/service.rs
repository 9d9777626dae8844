//! Services attached to an aggregate

use super::method::Method;
use crate::core::error::{DomainError, require_name};
use crate::util::upsert;
use serde::{Deserialize, Serialize};

/// A named group of operations, e.g. everything behind one API endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    name: String,
    comment: Option<String>,
    methods: Vec<Method>,
}

impl Service {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self {
            name: require_name(name.into(), "Service")?,
            comment: None,
            methods: Vec::new(),
        })
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn add_method(&mut self, method: Method) {
        upsert(&mut self.methods, method);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }
}

impl PartialEq for Service {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Service {}
