//! Graph-wide validation passes run at the end of `build()`.

pub mod naming;
pub mod relation;

use crate::{error::ErrorTree, node::ResourceType};

/// Run global validation in a staged, deterministic order.
pub(crate) fn validate_graph(resources: &[ResourceType], errs: &mut ErrorTree) {
    naming::validate_public_names(resources, errs);
    relation::validate_relationship_targets(resources, errs);
}
