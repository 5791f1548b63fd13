use crate::config::{ColourKey, CuiConfig};
use crate::coords::Vector3;
use crate::paint::Color;
use crate::render::{RenderContext, RenderError};
use crate::shapes::{CylinderBox, CylinderCircles, CylinderGrid, CylinderSpan, PointCube, Shape};

use super::styles::Styles;

const BOX: usize = 0;
const GRID: usize = 1;
const CENTRE: usize = 2;

const KEYS: [ColourKey; 3] = [ColourKey::CylinderBox, ColourKey::CylinderGrid, ColourKey::CylinderCentre];

#[derive(Debug, Clone, PartialEq)]
struct CylinderShapes {
    centre: PointCube,
    circles: CylinderCircles,
    grid: CylinderGrid,
    outline: CylinderBox,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CylinderRegion {
    styles: Styles<3>,
    center: Option<Vector3>,
    radius_x: f64,
    radius_z: f64,
    min_y: i32,
    max_y: i32,
    shapes: Option<CylinderShapes>,
}

impl CylinderRegion {
    pub fn new(config: &CuiConfig) -> Self {
        Self {
            styles: Styles::new(KEYS, &config.palette),
            center: None,
            radius_x: 0.0,
            radius_z: 0.0,
            min_y: 0,
            max_y: 0,
            shapes: None,
        }
    }

    pub fn set_center(&mut self, center: Vector3) {
        self.center = Some(center);
        self.update();
    }

    pub fn set_radii(&mut self, radius_x: f64, radius_z: f64) {
        self.radius_x = radius_x;
        self.radius_z = radius_z;
        self.update();
    }

    pub fn set_min_max(&mut self, min: i32, max: i32) {
        self.min_y = min;
        self.max_y = max;
        self.update();
    }

    /// Geometry actually drawn. A zero bound means the height is unknown and
    /// collapses the cylinder onto the centre layer.
    pub fn span(&self) -> Option<CylinderSpan> {
        let center = self.center?;
        let (min_y, max_y) = if self.min_y == 0 || self.max_y == 0 {
            let y = center.y as i32;
            (y, y)
        } else {
            (self.min_y, self.max_y)
        };
        Some(CylinderSpan { center, radius_x: self.radius_x, radius_z: self.radius_z, min_y, max_y })
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let Some(s) = &self.shapes else {
            return Ok(());
        };
        s.centre.render(ctx)?;
        s.circles.render(ctx)?;
        s.grid.render(ctx)?;
        s.outline.render(ctx)
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
        let Some(s) = &mut self.shapes else {
            return;
        };
        s.centre.set_style(self.styles.get(CENTRE));
        s.circles.set_style(self.styles.get(GRID));
        s.grid.set_style(self.styles.get(GRID));
        s.outline.set_style(self.styles.get(BOX));
    }

    fn update(&mut self) {
        self.shapes = self.span().map(|span| CylinderShapes {
            centre: PointCube::new(span.center, self.styles.get(CENTRE)),
            circles: CylinderCircles::new(span, self.styles.get(GRID)),
            grid: CylinderGrid::new(span, self.styles.get(GRID)),
            outline: CylinderBox::new(span, self.styles.get(BOX)),
        });
    }
}
