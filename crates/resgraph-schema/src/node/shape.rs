use crate::types::TypeKey;
use serde::Serialize;

///
/// TypeShape
///
/// Explicit member table for one registered type. This is the statically
/// registered stand-in for reflection: relationship and eager-load
/// resolution walk these tables instead of inspecting live types.
///

#[derive(Clone, Debug, Serialize)]
pub struct TypeShape {
    pub key: TypeKey,
    pub members: Vec<MemberShape>,
}

impl TypeShape {
    #[must_use]
    pub fn new(key: TypeKey) -> Self {
        Self {
            key,
            members: Vec::new(),
        }
    }

    #[must_use]
    pub fn member(&self, name: &str) -> Option<&MemberShape> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Navigation members (references and collections) in declaration order.
    pub fn navigations(&self) -> impl Iterator<Item = &MemberShape> {
        self.members
            .iter()
            .filter(|m| !matches!(m.kind, MemberKind::Scalar))
    }
}

///
/// MemberShape
///

#[derive(Clone, Debug, Serialize)]
pub struct MemberShape {
    pub name: &'static str,
    pub kind: MemberKind,
}

///
/// MemberKind
///
/// Shape of one member: plain data, a to-one navigation, or a to-many
/// navigation with its element type.
///

#[derive(Clone, Copy, Debug, Serialize)]
pub enum MemberKind {
    Scalar,
    Reference(TypeKey),
    Collection(TypeKey),
}

impl MemberKind {
    /// Target type for navigations: the referenced type, or the collection
    /// element type.
    #[must_use]
    pub const fn target(self) -> Option<TypeKey> {
        match self {
            Self::Scalar => None,
            Self::Reference(key) | Self::Collection(key) => Some(key),
        }
    }

    #[must_use]
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::Collection(_))
    }
}
