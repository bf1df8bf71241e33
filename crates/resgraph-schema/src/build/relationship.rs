//! Relationship resolution, including many-to-many "through" join wiring.

use crate::{
    ID_SHADOW_SUFFIX, err,
    build::NavigationResolver,
    container::{RelationshipMarker, RelationshipMarkerKind, TypeEntry},
    error::ErrorTree,
    naming::NamingPolicy,
    node::{MemberKind, Relationship, RelationshipKind, ThroughInfo, TypeShape},
    types::{LinkTypes, TypeKey},
};
use std::{any::TypeId, collections::HashMap};

/// Resolve one relationship marker against the owner's shape and, for a
/// through relationship, the join type's shape. Every failure is recorded
/// as a configuration error naming the offending type and member.
pub(crate) fn resolve(
    entry: &TypeEntry,
    marker: &RelationshipMarker,
    entries: &HashMap<TypeId, TypeEntry>,
    naming: &NamingPolicy,
    navigation: Option<&dyn NavigationResolver>,
    errs: &mut ErrorTree,
) -> Option<Relationship> {
    let owner = entry.key();

    let Some(member) = entry.shape.member(marker.member) else {
        err!(
            errs,
            "type '{owner}' marks member '{}' as a relationship, but the member is not registered on its shape",
            marker.member
        );
        return None;
    };

    let (kind, target, through) = match marker.kind {
        RelationshipMarkerKind::ToOne => match member.kind {
            MemberKind::Reference(target) => (RelationshipKind::ToOne, target, None),
            _ => {
                err!(
                    errs,
                    "to-one relationship '{}' on '{owner}' must be backed by a single-reference member",
                    marker.member
                );
                return None;
            }
        },
        RelationshipMarkerKind::ToMany => match member.kind {
            MemberKind::Collection(target) => (RelationshipKind::ToMany, target, None),
            _ => {
                err!(
                    errs,
                    "to-many relationship '{}' on '{owner}' must be backed by a collection member",
                    marker.member
                );
                return None;
            }
        },
        RelationshipMarkerKind::ToManyThrough { through_member } => {
            let MemberKind::Collection(target) = member.kind else {
                err!(
                    errs,
                    "through relationship '{}' on '{owner}' must be backed by a collection member",
                    marker.member
                );
                return None;
            };

            let through =
                resolve_through(entry, marker.member, through_member, target, entries, errs)?;
            (RelationshipKind::ToManyThrough, target, Some(through))
        }
    };

    Some(Relationship {
        kind,
        member: marker.member,
        public_name: marker
            .public_name
            .map_or_else(|| naming.public_member_name(marker.member), str::to_string),
        owner,
        target,
        links: LinkTypes::NOT_CONFIGURED,
        inverse_member: navigation.and_then(|n| n.inverse_of(owner, marker.member)),
        through,
    })
}

// Resolve the join-collection member, the join row type, and the join
// type's navigation and identifier-shadow members.
fn resolve_through(
    entry: &TypeEntry,
    member: &'static str,
    through_member: &'static str,
    target: TypeKey,
    entries: &HashMap<TypeId, TypeEntry>,
    errs: &mut ErrorTree,
) -> Option<ThroughInfo> {
    let owner = entry.key();

    let Some(join_member) = entry.shape.member(through_member) else {
        err!(
            errs,
            "type '{owner}' declares through relationship '{member}' via member '{through_member}', but no such member exists"
        );
        return None;
    };

    let MemberKind::Collection(through_type) = join_member.kind else {
        err!(
            errs,
            "join member '{through_member}' on '{owner}' must be a collection of join rows"
        );
        return None;
    };

    let Some(join_entry) = entries.get(&through_type.id()) else {
        err!(
            errs,
            "join type '{through_type}' backing relationship '{member}' on '{owner}' is not registered in any container"
        );
        return None;
    };

    let left = navigation_typed_as(&join_entry.shape, owner);
    let right = navigation_typed_as(&join_entry.shape, target);

    let left_member = match left {
        Some(name) => name,
        None => {
            err!(
                errs,
                "join type '{through_type}' has no navigation member typed as '{owner}'"
            );
            return None;
        }
    };
    let right_member = match right {
        Some(name) => name,
        None => {
            err!(
                errs,
                "join type '{through_type}' has no navigation member typed as '{target}'"
            );
            return None;
        }
    };

    let left_id_member = id_shadow_member(&join_entry.shape, left_member);
    let right_id_member = id_shadow_member(&join_entry.shape, right_member);

    if left_id_member.is_none() {
        err!(
            errs,
            "join type '{through_type}' is missing identifier member '{left_member}{ID_SHADOW_SUFFIX}' for navigation '{left_member}'"
        );
    }
    if right_id_member.is_none() {
        err!(
            errs,
            "join type '{through_type}' is missing identifier member '{right_member}{ID_SHADOW_SUFFIX}' for navigation '{right_member}'"
        );
    }

    Some(ThroughInfo {
        through_member,
        through_type,
        left_member,
        left_id_member: left_id_member?,
        right_member,
        right_id_member: right_id_member?,
    })
}

// First single-reference navigation member typed as `target`, in
// declaration order.
fn navigation_typed_as(shape: &TypeShape, target: TypeKey) -> Option<&'static str> {
    shape
        .navigations()
        .find(|m| matches!(m.kind, MemberKind::Reference(t) if t == target))
        .map(|m| m.name)
}

// Identifier-shadow member by the `<navigation>_id` naming convention.
fn id_shadow_member(shape: &TypeShape, navigation: &'static str) -> Option<&'static str> {
    let expected = format!("{navigation}{ID_SHADOW_SUFFIX}");
    shape.member(&expected).map(|m| m.name)
}
