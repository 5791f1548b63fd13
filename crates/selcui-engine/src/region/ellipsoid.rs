use crate::config::{ColourKey, CuiConfig};
use crate::coords::Vector3;
use crate::paint::Color;
use crate::render::{RenderContext, RenderError};
use crate::shapes::{EllipsoidShape, PointCube, Shape};

use super::styles::Styles;

const GRID: usize = 0;
const CENTRE: usize = 1;

const KEYS: [ColourKey; 2] = [ColourKey::EllipsoidGrid, ColourKey::EllipsoidCentre];

#[derive(Debug, Clone, PartialEq)]
pub struct EllipsoidRegion {
    styles: Styles<2>,
    center: Option<Vector3>,
    radii: Option<Vector3>,
    shape: Option<(PointCube, EllipsoidShape)>,
}

impl EllipsoidRegion {
    pub fn new(config: &CuiConfig) -> Self {
        Self { styles: Styles::new(KEYS, &config.palette), center: None, radii: None, shape: None }
    }

    pub fn set_center(&mut self, center: Vector3) {
        self.center = Some(center);
        self.update();
    }

    pub fn set_radii(&mut self, radii: Vector3) {
        self.radii = Some(radii);
        self.update();
    }

    #[inline]
    pub fn center(&self) -> Option<Vector3> {
        self.center
    }

    #[inline]
    pub fn radii(&self) -> Option<Vector3> {
        self.radii
    }

    /// Draws nothing until both centre and radii are known.
    pub fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let Some((centre, shape)) = &self.shape else {
            return Ok(());
        };
        centre.render(ctx)?;
        shape.render(ctx)
    }

    pub fn styles_changed(&mut self, config: &CuiConfig) {
        self.styles.refresh(&config.palette);
        self.apply_styles();
    }

    pub fn set_custom_colours(&mut self, colours: &[Color]) {
        self.styles.set_custom(colours);
        self.apply_styles();
    }

    fn apply_styles(&mut self) {
        if let Some((centre, shape)) = &mut self.shape {
            centre.set_style(self.styles.get(CENTRE));
            shape.set_style(self.styles.get(GRID));
        }
    }

    fn update(&mut self) {
        self.shape = match (self.center, self.radii) {
            (Some(c), Some(r)) => Some((
                PointCube::new(c, self.styles.get(CENTRE)),
                EllipsoidShape::new(c, r, self.styles.get(GRID)),
            )),
            _ => None,
        };
    }
}
