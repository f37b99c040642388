//! Prism engine crate.
//!
//! Presentation-surface lifecycle and per-frame rendering for an
//! immediate-mode GUI drawn over a swap chain.

pub mod coords;
pub mod core;
pub mod device;
pub mod gui;
pub mod input;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;

#[cfg(test)]
mod testing;
