//! Window + runtime loop.
//!
//! `AppWindow` ties one window's surface, clock and GUI context together and
//! reacts to size and input messages. `Runtime` owns the `winit` event loop and
//! feeds it.

mod app_window;
mod descriptor;
mod message;
mod runtime;

pub use app_window::{AppWindow, FrameStatus};
pub use descriptor::WindowDescriptor;
pub use message::{hiword, loword, pack_size, SizeKind, WindowMessage};
pub use runtime::{Runtime, RuntimeConfig};
