//! Rendering Adapter: renderer-agnostic interface.
//!
//! # Invariants
//! - Renderers read a [`Frame`]; they never mutate the scene or the camera.
//! - One `render` call per tick.
//!
//! The GPU backend lives in `roomview-render-wgpu`. The debug text renderer
//! here serves headless runs and tests.

mod renderer;

pub use renderer::{DebugTextRenderer, Frame, Renderer};

pub fn crate_info() -> &'static str {
    "roomview-render v0.1.0"
}
