pub mod build;
pub mod container;
pub mod error;
pub mod graph;
pub mod locate;
pub mod naming;
pub mod node;
pub mod scan;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_fixtures;

/// Maximum nesting depth for eager-load chains.
///
/// Guards against unintentionally cyclic eager-load graphs; a chain that
/// reaches past this depth fails graph construction.
pub const MAX_EAGER_LOAD_DEPTH: usize = 500;

/// Suffix appended to a navigation member name to derive its
/// identifier-shadow member on a join type.
pub const ID_SHADOW_SUFFIX: &str = "_id";

use crate::{build::BuildError, graph::GraphError};
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        build::{GraphOptions, ResourceGraphBuilder},
        container::{
            AttrMarker, CapabilitySpec, EagerLoadMarker, RelationshipMarker, TypeContainer,
            TypeEntry,
        },
        err,
        error::ErrorTree,
        graph::ResourceGraph,
        node::*,
        scan::{DescriptorScanner, ResourceDescriptor},
        types::{AttrCapabilities, Identifiable, LinkConfig, LinkTypes, TypeKey},
    };
    pub use serde::Serialize;
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    BuildError(#[from] BuildError),

    #[error(transparent)]
    GraphError(#[from] GraphError),
}
