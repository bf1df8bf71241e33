//! Per-request resolution scope.

use crate::registry::ServiceRegistry;
use resgraph_schema::types::TypeKey;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
    sync::Arc,
};

///
/// ServiceScope
///
/// One scope per request or operation batch. Scopes share only the
/// immutable registry; scope-local collaborators (ambient request context,
/// an active transaction handle) live in the context map, so concurrent
/// requests are isolated from each other.
///

pub struct ServiceScope {
    registry: Arc<ServiceRegistry>,
    context: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ServiceScope {
    #[must_use]
    pub fn new(registry: Arc<ServiceRegistry>) -> Self {
        Self {
            registry,
            context: HashMap::new(),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Attach a scope-local collaborator, replacing any previous value of
    /// the same type.
    pub fn insert_context<T: Send + Sync + 'static>(&mut self, value: T) {
        self.context.insert(TypeId::of::<T>(), Box::new(value));
    }

    #[must_use]
    pub fn context<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.context
            .get(&TypeId::of::<T>())
            .and_then(|boxed| boxed.downcast_ref())
    }

    /// Resolve a service for a runtime (capability, resource) pair.
    ///
    /// `None` on a missing registration; the caller decides whether that is
    /// fatal. A downcast mismatch means a factory was registered under the
    /// wrong type and is logged, not propagated.
    #[must_use]
    pub fn resolve<T: 'static>(&self, service: TypeKey, resource: TypeKey) -> Option<T> {
        let factory = self.registry.factory(service, resource)?;

        match factory(self).downcast::<T>() {
            Ok(boxed) => Some(*boxed),
            Err(_) => {
                log::warn!(
                    "service '{service}' for resource '{resource}' resolved to an unexpected type"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Eq, PartialEq)]
    struct RequestId(u64);

    #[test]
    fn scope_context_is_isolated_per_scope() {
        let registry = Arc::new(ServiceRegistry::new());

        let mut first = ServiceScope::new(Arc::clone(&registry));
        let mut second = ServiceScope::new(registry);
        first.insert_context(RequestId(1));
        second.insert_context(RequestId(2));

        assert_eq!(first.context::<RequestId>(), Some(&RequestId(1)));
        assert_eq!(second.context::<RequestId>(), Some(&RequestId(2)));
    }

    #[test]
    fn missing_context_is_none() {
        let scope = ServiceScope::new(Arc::new(ServiceRegistry::new()));
        assert!(scope.context::<RequestId>().is_none());
    }
}
