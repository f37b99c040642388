//! Color and display-geometry primitives shared by the GUI and render layers.

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
