//! Shared types: object handles, Euler transforms, geometry and material
//! descriptors, and the seeded generator used for reproducible scene setup.

mod descriptors;
mod rng;
mod types;

pub use descriptors::{Color, GeometryDescriptor, MaterialDescriptor};
pub use rng::SeededRng;
pub use types::{LightId, ObjectId, Transform, ViewId};
