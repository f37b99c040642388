//! Input subsystem.
//!
//! Public types are platform-agnostic. `platform::winit` translates winit
//! events; an `InputHandler` decides which messages the GUI claims and feeds
//! the rest of the frame's input into the GUI context.

mod handler;
pub mod platform;
mod types;

pub use handler::{InputHandler, InputQueue};
pub use types::{InputEvent, Key, Modifiers, MouseButton, MouseWheelDelta};
