//! Startup-populated service registry: the manually maintained mapping from
//! (open capability marker, resource type) to a factory closure.

use crate::{error::DispatchError, scope::ServiceScope};
use resgraph_schema::types::TypeKey;
use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

///
/// ServiceKey
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
struct ServiceKey {
    service: TypeId,
    resource: TypeId,
}

/// Factory producing one boxed service instance per resolution, against the
/// resolving scope.
pub type ServiceFactory =
    Box<dyn Fn(&ServiceScope) -> Box<dyn Any + Send + Sync> + Send + Sync>;

///
/// ServiceRegistry
///
/// Immutable after startup registration; shared across request scopes via
/// `Arc`. Successful graph construction implies a registration should exist
/// for every resource type, so a resolution miss is a configuration error
/// for the caller to judge.
///

#[derive(Default)]
pub struct ServiceRegistry {
    factories: HashMap<ServiceKey, ServiceFactory>,
}

impl ServiceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory for the (service, resource) pair. Double
    /// registration is rejected.
    pub fn register(
        &mut self,
        service: TypeKey,
        resource: TypeKey,
        factory: ServiceFactory,
    ) -> Result<(), DispatchError> {
        let key = ServiceKey {
            service: service.id(),
            resource: resource.id(),
        };

        if self.factories.contains_key(&key) {
            return Err(DispatchError::AlreadyRegistered {
                service: service.name(),
                resource: resource.name(),
            });
        }

        self.factories.insert(key, factory);
        Ok(())
    }

    pub(crate) fn factory(
        &self,
        service: TypeKey,
        resource: TypeKey,
    ) -> Option<&ServiceFactory> {
        self.factories.get(&ServiceKey {
            service: service.id(),
            resource: resource.id(),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}
