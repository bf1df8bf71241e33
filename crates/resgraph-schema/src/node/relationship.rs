use crate::types::{LinkTypes, TypeKey};
use serde::Serialize;

///
/// RelationshipKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum RelationshipKind {
    ToOne,
    ToMany,
    ToManyThrough,
}

///
/// Relationship
///
/// One declared relationship on a resource. `target` is the related
/// resource's element type (the member type for to-one, the collection
/// element type for to-many).
///

#[derive(Clone, Debug, Serialize)]
pub struct Relationship {
    pub kind: RelationshipKind,
    pub member: &'static str,
    pub public_name: String,
    pub owner: TypeKey,
    pub target: TypeKey,

    /// Link-visibility override; `NOT_CONFIGURED` defers to the default.
    pub links: LinkTypes,

    /// Inverse navigation member on the target side, when a persistence
    /// collaborator was available to resolve it.
    pub inverse_member: Option<&'static str>,

    /// Join metadata; present only for `ToManyThrough`.
    pub through: Option<ThroughInfo>,
}

///
/// ThroughInfo
///
/// Resolved join metadata for a many-to-many relationship. The left side is
/// the owning resource, the right side the target; identifier-shadow members
/// follow the `<navigation>_id` convention.
///

#[derive(Clone, Debug, Serialize)]
pub struct ThroughInfo {
    /// Join-collection member on the owning type.
    pub through_member: &'static str,

    /// Join row type.
    pub through_type: TypeKey,

    pub left_member: &'static str,
    pub left_id_member: &'static str,
    pub right_member: &'static str,
    pub right_id_member: &'static str,
}
