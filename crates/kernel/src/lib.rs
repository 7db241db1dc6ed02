//! Frame Kernel: the per-frame loop that animates the room and steers the
//! camera.
//!
//! # Invariants
//! - One tick samples the clock once, updates the camera, then every
//!   animated entity, then hands exactly one frame to the renderer.
//! - Accumulating rotations advance by a fixed increment per tick; every
//!   other animated value is a pure function of elapsed time.
//! - After the scheduler stops, no tick runs.

pub mod animation;
pub mod camera;
pub mod clock;
pub mod scheduler;
pub mod stats;

pub use animation::{Animated, AnimationRegistry};
pub use camera::{CameraConfig, CameraController, PerspectiveCamera};
pub use clock::{FrameClock, FrameTime, InstantSource, ManualTime, TimeSource};
pub use scheduler::{
    FrameScheduler, SchedulerError, SchedulerState, TickDriver, TickQueue, TickToken,
};
pub use stats::{FrameSummary, FrameTimer};

pub fn crate_info() -> &'static str {
    "roomview-kernel v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("kernel"));
    }
}
