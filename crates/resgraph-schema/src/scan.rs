//! Resource-candidate discovery over registered type containers.

use crate::{
    container::{IdentifiableCapability, TypeContainer, TypeEntry},
    types::TypeKey,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

///
/// ResourceDescriptor
///
/// Lightweight pre-graph record for one resource candidate: the (resource
/// type, identity type) pair extracted from the identifiable capability.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct ResourceDescriptor {
    pub resource: TypeKey,
    pub identity: TypeKey,
}

///
/// DescriptorScanner
///
/// Scans containers for resource candidates, once per container, and caches
/// the result by container name. Purely derived from static registration
/// data; intended for single-threaded startup use.
///

#[derive(Debug, Default)]
pub struct DescriptorScanner {
    containers: Vec<Arc<TypeContainer>>,
    cache: BTreeMap<&'static str, Vec<ResourceDescriptor>>,
}

impl DescriptorScanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container to scan. Re-registering a container with the
    /// same name is a no-op.
    pub fn register_container(&mut self, container: Arc<TypeContainer>) {
        if self.containers.iter().any(|c| c.name() == container.name()) {
            return;
        }

        self.containers.push(container);
    }

    /// Registered containers in registration order.
    pub fn containers(&self) -> impl Iterator<Item = &Arc<TypeContainer>> {
        self.containers.iter()
    }

    /// Descriptors for every registered container. Containers not yet
    /// scanned are scanned now; the rest come from the cache.
    pub fn resource_descriptors(&mut self) -> Vec<ResourceDescriptor> {
        for container in &self.containers {
            if self.cache.contains_key(container.name()) {
                continue;
            }

            let descriptors = scan_container(container);
            log::debug!(
                "scanned container '{}': {} resource descriptor(s)",
                container.name(),
                descriptors.len()
            );
            self.cache.insert(container.name(), descriptors);
        }

        self.containers
            .iter()
            .flat_map(|c| self.cache[c.name()].iter().copied())
            .collect()
    }
}

// Scan one container's entries for the identifiable capability.
fn scan_container(container: &TypeContainer) -> Vec<ResourceDescriptor> {
    container
        .entries()
        .filter_map(descriptor_for_entry)
        .collect()
}

// Extract a descriptor from an entry, if it carries the identifiable
// capability. Multiple records with different identity arguments are
// ambiguous: the first in declaration order wins.
fn descriptor_for_entry(entry: &TypeEntry) -> Option<ResourceDescriptor> {
    let interface = TypeKey::of::<IdentifiableCapability>();
    let mut matches = entry
        .capabilities
        .iter()
        .filter(|c| c.interface == interface)
        .filter_map(|c| c.args.first().copied());

    let identity = matches.next()?;
    if matches.any(|other| other != identity) {
        log::warn!(
            "type '{}' declares the identifiable capability with multiple identity types; using '{identity}'",
            entry.key()
        );
    }

    Some(ResourceDescriptor {
        resource: entry.key(),
        identity,
    })
}
