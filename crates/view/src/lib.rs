//! Room View: the mountable unit a host embeds. Mounting builds the room,
//! attaches a renderer and starts the frame scheduler; unmounting undoes all
//! three.
//!
//! # Invariants
//! - Mount is all-or-nothing: on error nothing is attached or scheduled.
//! - After unmount no tick mutates the scene or renders.
//! - Input and ticks are delivered on the host's single event-loop thread.

mod config;
mod error;
mod host;
mod view;

pub use config::ViewConfig;
pub use error::ViewError;
pub use host::{HeadlessHost, ViewHost};
pub use view::RoomView;

pub fn crate_info() -> &'static str {
    "roomview-view v0.1.0"
}
