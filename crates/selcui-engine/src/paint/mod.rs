//! Color model shared by styles and renderers.

pub mod color;

pub use color::Color;
