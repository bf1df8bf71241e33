//! Explicit type registration: the statically-declared stand-in for
//! reflection over a host application's model assembly.

use crate::{
    node::{MemberKind, MemberShape, TypeShape},
    types::{AttrCapabilities, Identifiable, LinkConfig, TypeKey},
};
use serde::Serialize;

/// Default identity member name when registration does not override it.
pub const DEFAULT_IDENTITY_MEMBER: &str = "id";

///
/// IdentifiableCapability
///
/// Open-capability marker for "identifiable, parameterized by an identifier
/// type". Scanning matches capability records against this key and reads the
/// identity type from the leading argument.
///

pub enum IdentifiableCapability {}

///
/// CapabilitySpec
///
/// One capability record on a type entry: an open capability marker closed
/// over concrete type arguments.
///

#[derive(Clone, Debug, Serialize)]
pub struct CapabilitySpec {
    pub interface: TypeKey,
    pub args: Vec<TypeKey>,
}

impl CapabilitySpec {
    #[must_use]
    pub fn new<C: 'static>(args: Vec<TypeKey>) -> Self {
        Self {
            interface: TypeKey::of::<C>(),
            args,
        }
    }

    /// The identifiable capability with the given identifier type.
    #[must_use]
    pub fn identifiable(identity: TypeKey) -> Self {
        Self::new::<IdentifiableCapability>(vec![identity])
    }

    /// Whether this record is a closed form of `interface` whose argument
    /// list starts with `args`.
    #[must_use]
    pub fn matches(&self, interface: TypeKey, args: &[TypeKey]) -> bool {
        self.interface == interface && self.args.len() >= args.len() && self.args.starts_with(args)
    }
}

///
/// AttrMarker
///
/// Declarative attribute marker on one member.
///

#[derive(Clone, Debug, Serialize)]
pub struct AttrMarker {
    pub member: &'static str,
    pub public_name: Option<&'static str>,
    pub capabilities: Option<AttrCapabilities>,
}

impl AttrMarker {
    #[must_use]
    pub const fn new(member: &'static str) -> Self {
        Self {
            member,
            public_name: None,
            capabilities: None,
        }
    }

    #[must_use]
    pub const fn public_name(mut self, name: &'static str) -> Self {
        self.public_name = Some(name);
        self
    }

    #[must_use]
    pub const fn capabilities(mut self, capabilities: AttrCapabilities) -> Self {
        self.capabilities = Some(capabilities);
        self
    }
}

///
/// RelationshipMarker
///
/// Declarative relationship marker. The target type is read from the
/// member's shape; a through marker names the join-collection member the
/// association is materialized by.
///

#[derive(Clone, Debug, Serialize)]
pub struct RelationshipMarker {
    pub member: &'static str,
    pub public_name: Option<&'static str>,
    pub kind: RelationshipMarkerKind,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum RelationshipMarkerKind {
    ToOne,
    ToMany,
    ToManyThrough { through_member: &'static str },
}

impl RelationshipMarker {
    #[must_use]
    pub const fn to_one(member: &'static str) -> Self {
        Self {
            member,
            public_name: None,
            kind: RelationshipMarkerKind::ToOne,
        }
    }

    #[must_use]
    pub const fn to_many(member: &'static str) -> Self {
        Self {
            member,
            public_name: None,
            kind: RelationshipMarkerKind::ToMany,
        }
    }

    #[must_use]
    pub const fn to_many_through(member: &'static str, through_member: &'static str) -> Self {
        Self {
            member,
            public_name: None,
            kind: RelationshipMarkerKind::ToManyThrough { through_member },
        }
    }

    #[must_use]
    pub const fn public_name(mut self, name: &'static str) -> Self {
        self.public_name = Some(name);
        self
    }
}

///
/// EagerLoadMarker
///

#[derive(Clone, Copy, Debug, Serialize)]
pub struct EagerLoadMarker {
    pub member: &'static str,
}

///
/// TypeEntry
///
/// Everything registered about one exported type: its member shape,
/// capability records, base types, declarative markers, and optional proxy
/// or link declarations.
///

#[derive(Clone, Debug, Serialize)]
pub struct TypeEntry {
    pub shape: TypeShape,
    pub capabilities: Vec<CapabilitySpec>,
    pub bases: Vec<TypeKey>,
    pub attrs: Vec<AttrMarker>,
    pub relationships: Vec<RelationshipMarker>,
    pub eager_loads: Vec<EagerLoadMarker>,
    pub links: Option<LinkConfig>,
    pub identity_member: &'static str,

    /// Set when this type is a lazy-loading proxy for a resource type.
    pub proxy_of: Option<TypeKey>,
}

impl TypeEntry {
    /// Register a plain exported type (no capabilities).
    #[must_use]
    pub fn new<T: 'static>() -> Self {
        Self {
            shape: TypeShape::new(TypeKey::of::<T>()),
            capabilities: Vec::new(),
            bases: Vec::new(),
            attrs: Vec::new(),
            relationships: Vec::new(),
            eager_loads: Vec::new(),
            links: None,
            identity_member: DEFAULT_IDENTITY_MEMBER,
            proxy_of: None,
        }
    }

    /// Register a resource candidate: seeds the identifiable capability with
    /// `R::Id` and an `id` scalar member.
    #[must_use]
    pub fn resource<R: Identifiable>() -> Self {
        Self::new::<R>()
            .with_capability(CapabilitySpec::identifiable(TypeKey::of::<R::Id>()))
            .with_member(DEFAULT_IDENTITY_MEMBER, MemberKind::Scalar)
    }

    /// Register a lazy-loading proxy standing in for `base`.
    #[must_use]
    pub fn proxy<P: 'static>(base: TypeKey) -> Self {
        let mut entry = Self::new::<P>();
        entry.proxy_of = Some(base);
        entry.bases.push(base);
        entry
    }

    #[must_use]
    pub const fn key(&self) -> TypeKey {
        self.shape.key
    }

    #[must_use]
    pub fn with_member(mut self, name: &'static str, kind: MemberKind) -> Self {
        self.shape.members.push(MemberShape { name, kind });
        self
    }

    #[must_use]
    pub fn with_capability(mut self, capability: CapabilitySpec) -> Self {
        self.capabilities.push(capability);
        self
    }

    #[must_use]
    pub fn with_base(mut self, base: TypeKey) -> Self {
        self.bases.push(base);
        self
    }

    #[must_use]
    pub fn with_attr(mut self, marker: AttrMarker) -> Self {
        self.attrs.push(marker);
        self
    }

    #[must_use]
    pub fn with_relationship(mut self, marker: RelationshipMarker) -> Self {
        self.relationships.push(marker);
        self
    }

    #[must_use]
    pub fn with_eager_load(mut self, member: &'static str) -> Self {
        self.eager_loads.push(EagerLoadMarker { member });
        self
    }

    #[must_use]
    pub const fn with_links(mut self, links: LinkConfig) -> Self {
        self.links = Some(links);
        self
    }

    #[must_use]
    pub const fn with_identity_member(mut self, member: &'static str) -> Self {
        self.identity_member = member;
        self
    }

    /// Leading argument of the first identifiable capability record, in
    /// declaration order.
    #[must_use]
    pub fn declared_identity(&self) -> Option<TypeKey> {
        self.capabilities
            .iter()
            .find(|c| c.interface == TypeKey::of::<IdentifiableCapability>())
            .and_then(|c| c.args.first().copied())
    }
}

///
/// TypeContainer
///
/// Named, ordered set of type entries. The unit the scanner registers and
/// caches: one container per model assembly or module.
///

#[derive(Clone, Debug, Serialize)]
pub struct TypeContainer {
    name: &'static str,
    entries: Vec<TypeEntry>,
}

impl TypeContainer {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn register(mut self, entry: TypeEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &TypeEntry> + Clone {
        self.entries.iter()
    }

    #[must_use]
    pub fn entry(&self, key: TypeKey) -> Option<&TypeEntry> {
        self.entries.iter().find(|e| e.key() == key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
