use crate::{err, error::ErrorTree, node::ResourceType};
use std::collections::BTreeSet;

/// Every relationship must target a type that is itself a resource in the
/// graph; otherwise serialization could never represent the related side.
pub(crate) fn validate_relationship_targets(resources: &[ResourceType], errs: &mut ErrorTree) {
    let registered: BTreeSet<_> = resources.iter().map(|r| r.resource.id()).collect();

    for resource in resources {
        for relationship in &resource.relationships {
            if !registered.contains(&relationship.target.id()) {
                err!(
                    errs,
                    "relationship '{}' on resource '{}' targets type '{}', which is not registered in the resource graph",
                    relationship.public_name,
                    resource.public_name,
                    relationship.target
                );
            }
        }
    }
}
