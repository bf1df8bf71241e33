//! Generic type location over containers: capability lookup and derived-type
//! enumeration, used by graph construction and handler registration wiring.

use crate::{container::TypeContainer, container::TypeEntry, types::TypeKey};

/// First entry implementing the closed form of `interface` whose argument
/// list starts with `args`.
///
/// Ties between multiple matching entries break on declaration order; that
/// order is part of the contract.
#[must_use]
pub fn find_implementation<'a>(
    container: &'a TypeContainer,
    interface: TypeKey,
    args: &[TypeKey],
) -> Option<&'a TypeEntry> {
    container
        .entries()
        .find(|entry| entry.capabilities.iter().any(|c| c.matches(interface, args)))
}

/// Lazy, restartable sequence of entries assignable to `base` (their base
/// list contains it, or they are the type itself).
pub fn find_derived_types(
    container: &TypeContainer,
    base: TypeKey,
) -> impl Iterator<Item = &TypeEntry> + Clone {
    container
        .entries()
        .filter(move |entry| entry.key() == base || entry.bases.contains(&base))
}
