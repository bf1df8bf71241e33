use crate::types::AttrCapabilities;
use serde::Serialize;

///
/// AttrField
///
/// One exposed attribute field on a resource. The identity member is always
/// present as an implicit attribute, so filtering and sparse-fieldset logic
/// treat identity uniformly with other fields.
///

#[derive(Clone, Debug, Serialize)]
pub struct AttrField {
    /// Member name on the underlying type.
    pub member: &'static str,

    /// Name exposed to clients.
    pub public_name: String,

    pub capabilities: AttrCapabilities,

    /// Whether the marker set capabilities explicitly, as opposed to
    /// inheriting the configured default.
    pub explicit_capabilities: bool,
}
