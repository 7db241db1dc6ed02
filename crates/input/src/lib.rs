//! Input: held keys and the latest pointer position, fed by host events and
//! read by the per-frame camera update.
//!
//! # Invariants
//! - Key identifiers are compared lower-cased; unknown keys are not pressed.
//! - Screen pointer positions are normalized to [-1, 1], y pointing up.
//! - The state has one writer and one reader on the same thread.

pub mod bindings;
pub mod state;

pub use bindings::{Direction, KeyBindings};
pub use state::{InputEvent, InputState};

pub fn crate_info() -> &'static str {
    "roomview-input v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("input"));
    }
}
