use crate::operation::OperationKind;
use thiserror::Error as ThisError;

///
/// DispatchError
///
/// Request-time dispatch failures. `UnsupportedResourceType` originates
/// from untrusted request input and is client-facing; the rest indicate
/// registration or invocation bugs.
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum DispatchError {
    #[error("service '{service}' is already registered for resource '{resource}'")]
    AlreadyRegistered {
        service: &'static str,
        resource: &'static str,
    },

    #[error("'{0}' operation requires a relationship name")]
    MissingRelationship(OperationKind),

    #[error(
        "operation targets a lazy-loading proxy instance of type '{type_name}'; dispatch requires the base resource instance"
    )]
    ProxiedTarget { type_name: &'static str },

    #[error("operation target is not an instance of the processor's resource type '{expected}'")]
    TargetMismatch { expected: &'static str },

    #[error("operation references resource type '{0}', which is not registered in the resource graph")]
    UnsupportedResourceType(String),
}

impl DispatchError {
    /// Whether the error should surface as a client-facing domain error
    /// rather than an internal fault.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::UnsupportedResourceType(_))
    }
}
