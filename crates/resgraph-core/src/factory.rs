//! Scope-bound resolution of services keyed by runtime type values.

use crate::{error::DispatchError, scope::ServiceScope};
use resgraph_schema::{graph::ResourceGraph, types::TypeKey};
use std::sync::Arc;

///
/// GenericServiceFactory
///
/// Bridges service capabilities to runtime resource-type values: callers
/// hand it a capability marker and the resource key (or untrusted public
/// name) and get back the instance registered for that pair, resolved from
/// the current scope rather than any process-wide root.
///

#[derive(Clone)]
pub struct GenericServiceFactory {
    graph: Arc<ResourceGraph>,
}

impl GenericServiceFactory {
    #[must_use]
    pub fn new(graph: Arc<ResourceGraph>) -> Self {
        Self { graph }
    }

    #[must_use]
    pub fn graph(&self) -> &ResourceGraph {
        &self.graph
    }

    /// Resolve the service registered for a (capability, resource) pair.
    /// `None` means no registration exists; the caller decides whether that
    /// is fatal.
    #[must_use]
    pub fn get<T: 'static>(
        &self,
        scope: &ServiceScope,
        service: TypeKey,
        resource: TypeKey,
    ) -> Option<T> {
        scope.resolve(service, resource)
    }

    /// Resolve by a client-supplied public name, mapped through the graph
    /// first.
    pub fn get_for_name<T: 'static>(
        &self,
        scope: &ServiceScope,
        service: TypeKey,
        public_name: &str,
    ) -> Result<Option<T>, DispatchError> {
        let resource_type = self
            .graph
            .try_get(public_name)
            .ok_or_else(|| DispatchError::UnsupportedResourceType(public_name.to_string()))?;

        Ok(scope.resolve(service, resource_type.resource))
    }
}
