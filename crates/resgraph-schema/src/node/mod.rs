mod attribute;
mod eager_load;
mod relationship;
mod resource;
mod shape;

pub use attribute::*;
pub use eager_load::*;
pub use relationship::*;
pub use resource::*;
pub use shape::*;
