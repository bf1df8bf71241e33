pub mod error;
pub mod factory;
pub mod operation;
pub mod processor;
pub mod registry;
pub mod resolver;
pub mod scope;

pub use error::DispatchError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        error::DispatchError,
        factory::GenericServiceFactory,
        operation::{Operation, OperationKind, OperationTarget},
        processor::{
            AddToRelationshipProcessor, CreateProcessor, DeleteProcessor, OperationProcessor,
            RemoveFromRelationshipProcessor, SetRelationshipProcessor, UpdateProcessor,
        },
        registry::ServiceRegistry,
        resolver::OperationProcessorResolver,
        scope::ServiceScope,
    };
}
