//! Scene: the object and light store that animation writes into and
//! renderers read from, plus the furnished room it is populated with.
//!
//! # Invariants
//! - Objects and lights are created once during setup and never removed.
//! - Handles are allocated sequentially; iteration order is creation order.
//! - Rotations are Euler angles in radians, XYZ order.

pub mod layout;
mod scene;

pub use layout::{BladeRig, CubeRig, FigureRig, RoomRig, furnish};
pub use scene::{Light, LightKind, ObjectKind, Scene, SceneObject};

pub fn crate_info() -> &'static str {
    "roomview-scene v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("scene"));
    }
}
