//! wgpu render backend for the room.
//!
//! Every scene mesh is built procedurally from its geometry descriptor and
//! packed into shared buffers once; each frame re-reads world matrices,
//! material glow and light intensities from the scene.
//!
//! # Invariants
//! - Renderer never mutates the scene.
//! - Blended (opacity < 1) meshes draw after all opaque ones.

mod gpu;
pub mod mesh;
mod shaders;

pub use gpu::{DEPTH_FORMAT, WgpuRenderer};
