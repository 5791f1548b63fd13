use crate::config::{ColourKey, CuiConfig};
use crate::coords::Vector2;
use crate::paint::Color;
use crate::render::{RenderContext, RenderError};
use crate::shapes::{PointRectangle, Polygon2dBox, Polygon2dGrid, Shape};

use super::styles::Styles;
use super::set_sparse;

const GRID: usize = 0;
const BOX: usize = 1;
const POINT: usize = 2;

const KEYS: [ColourKey; 3] = [ColourKey::PolygonGrid, ColourKey::PolygonBox, ColourKey::PolygonPoint];

/// Vertical prism over a 2D outline.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRegion {
    styles: Styles<3>,
    points: Vec<Option<Vector2>>,
    min_max: Option<(i32, i32)>,

    markers: Vec<PointRectangle>,
    outline: Option<Polygon2dBox>,
    grid: Option<Polygon2dGrid>,
}

impl PolygonRegion {
    pub fn new(config: &CuiConfig) -> Self {
        Self {
            styles: Styles::new(KEYS, &config.palette),
            points: Vec::new(),
            min_max: None,
            markers: Vec::new(),
            outline: None,
            grid: None,
        }
    }

    /// Sets outline point `id`. Gaps left by skipped ids are not drawn.
    pub fn set_point(&mut self, id: i32, point: Vector2) {
        if !set_sparse(&mut self.points, id, point) {
            log::debug!("ignoring polygon point with out-of-range id {}", id);
            return;
        }
        self.update();
    }

    pub fn set_min_max(&mut self, min: i32, max: i32) {
        self.min_max = Some((min, max));
        self.update();
    }

    /// Known points in id order.
    pub fn points(&self) -> Vec<Vector2> {
        self.points.iter().flatten().copied().collect()
    }

    #[inline]
    pub fn min_max(&self) -> Option<(i32, i32)> {
        self.min_max
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        for marker in &self.markers {
            marker.render(ctx)?;
        }
        if let Some(grid) = &self.grid {
            grid.render(ctx)?;
        }
        if let Some(outline) = &self.outline {
            outline.render(ctx)?;
        }
        Ok(())
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
        let point_style = self.styles.get(POINT);
        for marker in &mut self.markers {
            marker.set_style(point_style);
        }
        if let Some(grid) = &mut self.grid {
            grid.set_style(self.styles.get(GRID));
        }
        if let Some(outline) = &mut self.outline {
            outline.set_style(self.styles.get(BOX));
        }
    }

    fn update(&mut self) {
        let points = self.points();
        let Some((min, max)) = self.min_max.filter(|_| !points.is_empty()) else {
            self.markers.clear();
            self.outline = None;
            self.grid = None;
            return;
        };

        let point_style = self.styles.get(POINT);
        self.markers = points
            .iter()
            .map(|p| PointRectangle::new(p.x, p.z, min, max, point_style))
            .collect();
        self.grid = Some(Polygon2dGrid::new(points.clone(), min, max, self.styles.get(GRID)));
        self.outline = Some(Polygon2dBox::new(points, min, max, self.styles.get(BOX)));
    }
}
