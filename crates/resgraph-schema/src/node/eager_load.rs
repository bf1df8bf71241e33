use crate::types::TypeKey;
use serde::Serialize;

///
/// EagerLoad
///
/// A related member fetched alongside a resource without being exposed as a
/// relationship. Children are the nested chain resolved on the target type.
///

#[derive(Clone, Debug, Serialize)]
pub struct EagerLoad {
    pub member: &'static str,
    pub target: TypeKey,
    pub children: Vec<EagerLoad>,
}

impl EagerLoad {
    /// Depth of the deepest chain rooted at this descriptor.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(Self::depth)
            .max()
            .unwrap_or_default()
    }
}
