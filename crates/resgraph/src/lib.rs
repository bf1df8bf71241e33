//! ResGraph — resource metadata registry and typed operation dispatch.
//!
//! This is the public meta-crate. Downstream users depend on **resgraph**
//! only.
//!
//! It re-exports the stable public API from:
//!   - `resgraph-schema` (containers, scanning, graph building, the graph)
//!   - `resgraph-core`   (service registry, scopes, operation dispatch)

pub use resgraph_core as core;
pub use resgraph_schema as schema;

pub use resgraph_core::DispatchError;
pub use resgraph_schema::Error;

///
/// Prelude
///

pub mod prelude {
    pub use resgraph_core::prelude::*;
    pub use resgraph_schema::prelude::*;
}
