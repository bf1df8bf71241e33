//! Recursive eager-load resolution, bounded to catch cyclic chains.

use crate::{
    container::{EagerLoadMarker, TypeEntry},
    err,
    error::ErrorTree,
    node::EagerLoad,
};
use std::{any::TypeId, collections::HashMap};

/// Resolve a type's eager-load markers, recursing into each target's own
/// markers. Chains deeper than `limit` fail resolution.
pub(crate) fn resolve(
    entry: &TypeEntry,
    entries: &HashMap<TypeId, TypeEntry>,
    limit: usize,
    errs: &mut ErrorTree,
) -> Vec<EagerLoad> {
    entry
        .eager_loads
        .iter()
        .filter_map(|marker| resolve_one(marker, entry, entries, 1, limit, errs))
        .collect()
}

fn resolve_one(
    marker: &EagerLoadMarker,
    owner: &TypeEntry,
    entries: &HashMap<TypeId, TypeEntry>,
    depth: usize,
    limit: usize,
    errs: &mut ErrorTree,
) -> Option<EagerLoad> {
    if depth > limit {
        err!(
            errs,
            "eager-load chain at '{}.{}' exceeds the configured depth bound of {limit}",
            owner.key(),
            marker.member
        );
        return None;
    }

    let Some(member) = owner.shape.member(marker.member) else {
        err!(
            errs,
            "type '{}' marks member '{}' as an eager load, but the member is not registered on its shape",
            owner.key(),
            marker.member
        );
        return None;
    };

    let Some(target) = member.kind.target() else {
        err!(
            errs,
            "eager-load member '{}' on '{}' must be a navigation member",
            marker.member,
            owner.key()
        );
        return None;
    };

    // Nested chains resolve against the target's own markers; a target
    // without an entry simply ends the chain.
    let children = entries
        .get(&target.id())
        .map(|target_entry| {
            target_entry
                .eager_loads
                .iter()
                .filter_map(|m| resolve_one(m, target_entry, entries, depth + 1, limit, errs))
                .collect()
        })
        .unwrap_or_default();

    Some(EagerLoad {
        member: marker.member,
        target,
        children,
    })
}
