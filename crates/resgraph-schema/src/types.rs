use serde::{Serialize, Serializer};
use std::{
    any::{TypeId, type_name},
    fmt::{self, Debug},
    ops::BitOr,
};

///
/// TypeKey
///
/// Runtime identity of a registered type: the `TypeId` for comparison and
/// map keys, plus the type path for naming and diagnostics.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TypeKey {
    id: TypeId,
    path: &'static str,
}

impl TypeKey {
    #[must_use]
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: type_name::<T>(),
        }
    }

    #[must_use]
    pub const fn id(self) -> TypeId {
        self.id
    }

    /// Fully-qualified type path.
    #[must_use]
    pub const fn path(self) -> &'static str {
        self.path
    }

    /// Short type name (last path segment).
    #[must_use]
    pub fn name(self) -> &'static str {
        self.path.rsplit("::").next().unwrap_or(self.path)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for TypeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path)
    }
}

///
/// Identifiable
///
/// The identifiable capability: a model type with a unique identifier.
/// `Id` is the resource's identity type; the (resource, identity) pair is
/// what request-time dispatch is keyed on.
///

pub trait Identifiable: 'static {
    type Id: Clone + Debug + PartialEq + Send + Sync + 'static;

    fn id(&self) -> Self::Id;
}

///
/// LinkTypes
///
/// Link-visibility flag set. The zero value is the "not configured"
/// sentinel: downstream consumers interpret it as "use the global default",
/// which is distinct from an explicit `NONE`.
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
pub struct LinkTypes(u8);

impl LinkTypes {
    pub const NOT_CONFIGURED: Self = Self(0);
    pub const NONE: Self = Self(1);
    pub const SELF_LINK: Self = Self(1 << 1);
    pub const RELATED: Self = Self(1 << 2);
    pub const PAGINATION: Self = Self(1 << 3);
    pub const ALL: Self = Self(Self::SELF_LINK.0 | Self::RELATED.0 | Self::PAGINATION.0);

    /// Whether an explicit value was set (anything but the sentinel).
    #[must_use]
    pub const fn is_configured(self) -> bool {
        self.0 != Self::NOT_CONFIGURED.0
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }
}

impl BitOr for LinkTypes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

///
/// LinkConfig
///
/// Per-type declarative link-visibility overrides. Unset slots keep the
/// `NOT_CONFIGURED` sentinel.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct LinkConfig {
    pub top_level: LinkTypes,
    pub resource: LinkTypes,
    pub relationship: LinkTypes,
}

///
/// AttrCapabilities
///
/// Declared capability flags for one attribute field.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct AttrCapabilities(u8);

impl AttrCapabilities {
    pub const NONE: Self = Self(0);
    pub const ALLOW_VIEW: Self = Self(1);
    pub const ALLOW_CREATE: Self = Self(1 << 1);
    pub const ALLOW_CHANGE: Self = Self(1 << 2);
    pub const ALLOW_FILTER: Self = Self(1 << 3);
    pub const ALLOW_SORT: Self = Self(1 << 4);
    pub const ALL: Self = Self(
        Self::ALLOW_VIEW.0
            | Self::ALLOW_CREATE.0
            | Self::ALLOW_CHANGE.0
            | Self::ALLOW_FILTER.0
            | Self::ALLOW_SORT.0,
    );

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for AttrCapabilities {
    fn default() -> Self {
        Self::ALL
    }
}

impl BitOr for AttrCapabilities {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
