use crate::config::{ColourKey, CuiConfig};
use crate::coords::{Bounds, Vector3};
use crate::paint::Color;
use crate::render::{RenderContext, RenderError};
use crate::shapes::{CuboidBox, CuboidGrid, PointCube, Shape};

use super::styles::Styles;

const BOX: usize = 0;
const GRID: usize = 1;
const FIRST: usize = 2;
const SECOND: usize = 3;

const KEYS: [ColourKey; 4] = [
    ColourKey::CuboidBox,
    ColourKey::CuboidGrid,
    ColourKey::CuboidPoint1,
    ColourKey::CuboidPoint2,
];

pub const DEFAULT_GRID_SPACING: f64 = 1.0;
/// Used when the authority asks for culling and the config sets no distance.
pub const DEFAULT_CULL_DISTANCE: f64 = 32.0;

/// Box between two corner points.
#[derive(Debug, Clone, PartialEq)]
pub struct CuboidRegion {
    styles: Styles<4>,
    first: Option<PointCube>,
    second: Option<PointCube>,

    grid_spacing: f64,
    grid_cull: bool,
    cull_distance: Option<f64>,

    outline: Option<CuboidBox>,
    grid: Option<CuboidGrid>,
}

impl CuboidRegion {
    pub fn new(config: &CuiConfig) -> Self {
        Self {
            styles: Styles::new(KEYS, &config.palette),
            first: None,
            second: None,
            grid_spacing: DEFAULT_GRID_SPACING,
            grid_cull: false,
            cull_distance: config.grid_cull_distance,
            outline: None,
            grid: None,
        }
    }

    /// Sets corner `id` (0 or 1). Other ids are ignored.
    pub fn set_point(&mut self, id: i32, pos: Vector3) {
        match id {
            0 => self.first = Some(PointCube::new(pos, self.styles.get(FIRST)).with_id(0)),
            1 => self.second = Some(PointCube::new(pos, self.styles.get(SECOND)).with_id(1)),
            _ => {
                log::debug!("cuboid has no corner {}", id);
                return;
            }
        }
        self.update();
    }

    /// Non-positive spacing hides the grid.
    pub fn set_grid(&mut self, spacing: f64, cull: bool) {
        self.grid_spacing = spacing;
        self.grid_cull = cull;
        self.update();
    }

    pub fn corners(&self) -> Option<(Vector3, Vector3)> {
        Some((self.first.as_ref()?.point(), self.second.as_ref()?.point()))
    }

    #[inline]
    pub fn grid_spacing(&self) -> f64 {
        self.grid_spacing
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        let (Some(first), Some(second), Some(outline)) = (&self.first, &self.second, &self.outline)
        else {
            return Ok(());
        };
        outline.render(ctx)?;
        if let Some(grid) = &self.grid {
            grid.render(ctx)?;
        }
        first.render(ctx)?;
        second.render(ctx)
    }

    /// Restyles in place. The grid is only rebuilt when a culled grid gets a
    /// new cull distance.
    pub fn styles_changed(&mut self, config: &CuiConfig) {
        let cull_changed = self.cull_distance != config.grid_cull_distance;
        self.cull_distance = config.grid_cull_distance;
        self.styles.refresh(&config.palette);
        if cull_changed && self.grid_cull {
            self.update();
        } else {
            self.apply_styles();
        }
    }

    pub fn set_custom_colours(&mut self, colours: &[Color]) {
        self.styles.set_custom(colours);
        self.apply_styles();
    }

    fn apply_styles(&mut self) {
        if let Some(s) = &mut self.outline {
            s.set_style(self.styles.get(BOX));
        }
        if let Some(s) = &mut self.grid {
            s.set_style(self.styles.get(GRID));
        }
        if let Some(s) = &mut self.first {
            s.set_style(self.styles.get(FIRST));
        }
        if let Some(s) = &mut self.second {
            s.set_style(self.styles.get(SECOND));
        }
    }

    fn update(&mut self) {
        self.apply_styles();
        let Some((a, b)) = self.corners() else {
            self.outline = None;
            self.grid = None;
            return;
        };
        let bounds = Bounds::from_blocks(a, b);
        self.outline = Some(CuboidBox::new(bounds, self.styles.get(BOX)));
        self.grid = (self.grid_spacing > 0.0).then(|| {
            let cull = self
                .grid_cull
                .then(|| self.cull_distance.unwrap_or(DEFAULT_CULL_DISTANCE));
            CuboidGrid::new(bounds, self.grid_spacing, self.styles.get(GRID)).with_cull(cull)
        });
    }
}
