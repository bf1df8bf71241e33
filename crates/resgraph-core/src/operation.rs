//! Runtime mutation-operation descriptors.

use derive_more::Display;
use std::{
    any::{Any, type_name},
    fmt,
    sync::Arc,
};

///
/// OperationKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum OperationKind {
    AddToRelationship,
    Create,
    Delete,
    RemoveFromRelationship,
    SetRelationship,
    Update,
}

///
/// OperationTarget
///
/// What the operation acts on: a concrete resource instance, or a
/// client-supplied resource-type name for call sites that carry no
/// instance.
///

#[derive(Clone)]
pub enum OperationTarget {
    Instance {
        value: Arc<dyn Any + Send + Sync>,
        type_name: &'static str,
    },
    TypeName(String),
}

impl fmt::Debug for OperationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Instance { type_name, .. } => {
                f.debug_struct("Instance").field("type_name", type_name).finish()
            }
            Self::TypeName(name) => f.debug_tuple("TypeName").field(name).finish(),
        }
    }
}

///
/// Operation
///
/// One mutation operation from a request batch: a discriminant kind, a
/// target, and the relationship name for relationship operations.
///

#[derive(Clone, Debug)]
pub struct Operation {
    pub kind: OperationKind,
    pub target: OperationTarget,
    pub relationship: Option<String>,
}

impl Operation {
    fn for_instance<R: Any + Send + Sync>(kind: OperationKind, resource: R) -> Self {
        Self {
            kind,
            target: OperationTarget::Instance {
                value: Arc::new(resource),
                type_name: type_name::<R>(),
            },
            relationship: None,
        }
    }

    #[must_use]
    pub fn create<R: Any + Send + Sync>(resource: R) -> Self {
        Self::for_instance(OperationKind::Create, resource)
    }

    #[must_use]
    pub fn update<R: Any + Send + Sync>(resource: R) -> Self {
        Self::for_instance(OperationKind::Update, resource)
    }

    #[must_use]
    pub fn delete<R: Any + Send + Sync>(resource: R) -> Self {
        Self::for_instance(OperationKind::Delete, resource)
    }

    #[must_use]
    pub fn set_relationship<R: Any + Send + Sync>(resource: R, relationship: &str) -> Self {
        let mut op = Self::for_instance(OperationKind::SetRelationship, resource);
        op.relationship = Some(relationship.to_string());
        op
    }

    #[must_use]
    pub fn add_to_relationship<R: Any + Send + Sync>(resource: R, relationship: &str) -> Self {
        let mut op = Self::for_instance(OperationKind::AddToRelationship, resource);
        op.relationship = Some(relationship.to_string());
        op
    }

    #[must_use]
    pub fn remove_from_relationship<R: Any + Send + Sync>(resource: R, relationship: &str) -> Self {
        let mut op = Self::for_instance(OperationKind::RemoveFromRelationship, resource);
        op.relationship = Some(relationship.to_string());
        op
    }

    /// An operation referencing a resource only by its public type name.
    #[must_use]
    pub fn for_type_name(kind: OperationKind, public_name: impl Into<String>) -> Self {
        Self {
            kind,
            target: OperationTarget::TypeName(public_name.into()),
            relationship: None,
        }
    }

    /// The concrete instance, when the target carries one.
    #[must_use]
    pub fn instance(&self) -> Option<&(dyn Any + Send + Sync)> {
        match &self.target {
            OperationTarget::Instance { value, .. } => Some(value.as_ref()),
            OperationTarget::TypeName(_) => None,
        }
    }
}
