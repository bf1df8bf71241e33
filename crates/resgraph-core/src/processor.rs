//! Typed operation processors and their erased adapters.
//!
//! Handlers are compiled against a specific (resource, identity) pair; the
//! adapters erase that pair so a runtime operation can reach them through
//! the service registry.

use crate::{
    error::DispatchError,
    operation::{Operation, OperationKind},
    registry::ServiceRegistry,
    scope::ServiceScope,
};
use resgraph_schema::types::{Identifiable, TypeKey};
use std::{any::type_name, marker::PhantomData, sync::Arc};

///
/// Typed processor contracts, one per operation kind.
///

pub trait CreateProcessor<R: Identifiable>: Send + Sync {
    fn create(&self, resource: &R, scope: &ServiceScope) -> Result<(), DispatchError>;
}

pub trait UpdateProcessor<R: Identifiable>: Send + Sync {
    fn update(&self, resource: &R, scope: &ServiceScope) -> Result<(), DispatchError>;
}

pub trait DeleteProcessor<R: Identifiable>: Send + Sync {
    fn delete(&self, id: &R::Id, scope: &ServiceScope) -> Result<(), DispatchError>;
}

pub trait SetRelationshipProcessor<R: Identifiable>: Send + Sync {
    fn set_relationship(
        &self,
        resource: &R,
        relationship: &str,
        scope: &ServiceScope,
    ) -> Result<(), DispatchError>;
}

pub trait AddToRelationshipProcessor<R: Identifiable>: Send + Sync {
    fn add_to_relationship(
        &self,
        id: &R::Id,
        relationship: &str,
        scope: &ServiceScope,
    ) -> Result<(), DispatchError>;
}

pub trait RemoveFromRelationshipProcessor<R: Identifiable>: Send + Sync {
    fn remove_from_relationship(
        &self,
        id: &R::Id,
        relationship: &str,
        scope: &ServiceScope,
    ) -> Result<(), DispatchError>;
}

///
/// OperationProcessor
///
/// Erased handler surface the resolver hands back to the pipeline.
///

pub trait OperationProcessor: Send + Sync {
    fn kind(&self) -> OperationKind;

    fn process(&self, operation: &Operation, scope: &ServiceScope) -> Result<(), DispatchError>;
}

// Per-kind open capability markers for registry keys.
enum CreateService {}
enum UpdateService {}
enum DeleteService {}
enum SetRelationshipService {}
enum AddToRelationshipService {}
enum RemoveFromRelationshipService {}

/// Registry key for the processor capability of one operation kind.
#[must_use]
pub fn processor_service(kind: OperationKind) -> TypeKey {
    match kind {
        OperationKind::AddToRelationship => TypeKey::of::<AddToRelationshipService>(),
        OperationKind::Create => TypeKey::of::<CreateService>(),
        OperationKind::Delete => TypeKey::of::<DeleteService>(),
        OperationKind::RemoveFromRelationship => TypeKey::of::<RemoveFromRelationshipService>(),
        OperationKind::SetRelationship => TypeKey::of::<SetRelationshipService>(),
        OperationKind::Update => TypeKey::of::<UpdateService>(),
    }
}

// The operation's instance, downcast to the processor's resource type.
fn instance_of<R: Identifiable>(operation: &Operation) -> Result<&R, DispatchError> {
    operation
        .instance()
        .and_then(|any| any.downcast_ref::<R>())
        .ok_or(DispatchError::TargetMismatch {
            expected: type_name::<R>(),
        })
}

fn relationship_of(operation: &Operation) -> Result<&str, DispatchError> {
    operation
        .relationship
        .as_deref()
        .ok_or(DispatchError::MissingRelationship(operation.kind))
}

struct CreateAdapter<R, P> {
    inner: P,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Identifiable, P: CreateProcessor<R>> OperationProcessor for CreateAdapter<R, P> {
    fn kind(&self) -> OperationKind {
        OperationKind::Create
    }

    fn process(&self, operation: &Operation, scope: &ServiceScope) -> Result<(), DispatchError> {
        self.inner.create(instance_of::<R>(operation)?, scope)
    }
}

struct UpdateAdapter<R, P> {
    inner: P,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Identifiable, P: UpdateProcessor<R>> OperationProcessor for UpdateAdapter<R, P> {
    fn kind(&self) -> OperationKind {
        OperationKind::Update
    }

    fn process(&self, operation: &Operation, scope: &ServiceScope) -> Result<(), DispatchError> {
        self.inner.update(instance_of::<R>(operation)?, scope)
    }
}

struct DeleteAdapter<R, P> {
    inner: P,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Identifiable, P: DeleteProcessor<R>> OperationProcessor for DeleteAdapter<R, P> {
    fn kind(&self) -> OperationKind {
        OperationKind::Delete
    }

    fn process(&self, operation: &Operation, scope: &ServiceScope) -> Result<(), DispatchError> {
        let resource = instance_of::<R>(operation)?;
        self.inner.delete(&resource.id(), scope)
    }
}

struct SetRelationshipAdapter<R, P> {
    inner: P,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Identifiable, P: SetRelationshipProcessor<R>> OperationProcessor
    for SetRelationshipAdapter<R, P>
{
    fn kind(&self) -> OperationKind {
        OperationKind::SetRelationship
    }

    fn process(&self, operation: &Operation, scope: &ServiceScope) -> Result<(), DispatchError> {
        let resource = instance_of::<R>(operation)?;
        self.inner
            .set_relationship(resource, relationship_of(operation)?, scope)
    }
}

struct AddToRelationshipAdapter<R, P> {
    inner: P,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Identifiable, P: AddToRelationshipProcessor<R>> OperationProcessor
    for AddToRelationshipAdapter<R, P>
{
    fn kind(&self) -> OperationKind {
        OperationKind::AddToRelationship
    }

    fn process(&self, operation: &Operation, scope: &ServiceScope) -> Result<(), DispatchError> {
        let resource = instance_of::<R>(operation)?;
        self.inner
            .add_to_relationship(&resource.id(), relationship_of(operation)?, scope)
    }
}

struct RemoveFromRelationshipAdapter<R, P> {
    inner: P,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Identifiable, P: RemoveFromRelationshipProcessor<R>> OperationProcessor
    for RemoveFromRelationshipAdapter<R, P>
{
    fn kind(&self) -> OperationKind {
        OperationKind::RemoveFromRelationship
    }

    fn process(&self, operation: &Operation, scope: &ServiceScope) -> Result<(), DispatchError> {
        let resource = instance_of::<R>(operation)?;
        self.inner
            .remove_from_relationship(&resource.id(), relationship_of(operation)?, scope)
    }
}

// Registration helpers: wrap a typed factory in the matching adapter and
// file it under the per-kind capability marker.
macro_rules! register_processor {
    ($fn_name:ident, $kind:ident, $bound:ident, $adapter:ident) => {
        impl ServiceRegistry {
            pub fn $fn_name<R, P, F>(&mut self, factory: F) -> Result<(), DispatchError>
            where
                R: Identifiable,
                P: $bound<R> + 'static,
                F: Fn(&ServiceScope) -> P + Send + Sync + 'static,
            {
                self.register(
                    processor_service(OperationKind::$kind),
                    TypeKey::of::<R>(),
                    Box::new(move |scope| {
                        let processor: Arc<dyn OperationProcessor> = Arc::new($adapter {
                            inner: factory(scope),
                            _resource: PhantomData::<fn() -> R>,
                        });
                        Box::new(processor)
                    }),
                )
            }
        }
    };
}

register_processor!(register_create_processor, Create, CreateProcessor, CreateAdapter);
register_processor!(register_update_processor, Update, UpdateProcessor, UpdateAdapter);
register_processor!(register_delete_processor, Delete, DeleteProcessor, DeleteAdapter);
register_processor!(
    register_set_relationship_processor,
    SetRelationship,
    SetRelationshipProcessor,
    SetRelationshipAdapter
);
register_processor!(
    register_add_to_relationship_processor,
    AddToRelationship,
    AddToRelationshipProcessor,
    AddToRelationshipAdapter
);
register_processor!(
    register_remove_from_relationship_processor,
    RemoveFromRelationship,
    RemoveFromRelationshipProcessor,
    RemoveFromRelationshipAdapter
);
