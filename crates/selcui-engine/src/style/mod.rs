//! Visual styles for selection components.
//!
//! A [`Style`] is what a region hands to each of its shapes. It expands into
//! two [`LineStyle`]s: a faint one drawn where the overlay is occluded and a
//! full-strength one drawn where it is visible.

mod render_type;

pub use render_type::{DepthFunc, RenderType};

use crate::paint::Color;

pub const DEFAULT_LINE_WIDTH: f32 = 2.0;

/// Offset applied to line geometry so it does not z-fight with block faces.
pub const LINE_OFFSET: f64 = 0.01;

const HIDDEN_RGB: f32 = 0.75;
const HIDDEN_ALPHA: f32 = 0.25;

/// One pass of a style: colour, width and depth classifier.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineStyle {
    pub render_type: RenderType,
    pub width: f32,
    pub color: Color,
}

impl LineStyle {
    pub const fn new(render_type: RenderType, width: f32, color: Color) -> Self {
        Self { render_type, width, color }
    }
}

/// Immutable style value; replaced wholesale when configuration changes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Style {
    color: Color,
    render_type: RenderType,
    lines: [LineStyle; 2],
}

impl Style {
    /// Hidden + visible pair at the default width.
    pub fn from_color(color: Color) -> Self {
        Self::with_width(color, DEFAULT_LINE_WIDTH)
    }

    pub fn with_width(color: Color, width: f32) -> Self {
        Self {
            color,
            render_type: RenderType::Any,
            lines: [
                LineStyle::new(RenderType::Hidden, width, color.scaled(HIDDEN_RGB, HIDDEN_ALPHA)),
                LineStyle::new(RenderType::Visible, width, color),
            ],
        }
    }

    /// Restricts which passes of this style are drawn.
    pub fn with_render_type(mut self, render_type: RenderType) -> Self {
        self.render_type = render_type;
        self
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn render_type(&self) -> RenderType {
        self.render_type
    }

    #[inline]
    pub fn lines(&self) -> &[LineStyle] {
        &self.lines
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::from_color(Color::white())
    }
}
