//! Persistent selection shapes and the styles they draw with.

mod cuboid;
mod cylinder;
mod ellipsoid;
mod polygon;
mod polyhedron;
mod styles;

pub use cuboid::{CuboidRegion, DEFAULT_CULL_DISTANCE, DEFAULT_GRID_SPACING};
pub use cylinder::CylinderRegion;
pub use ellipsoid::EllipsoidRegion;
pub use polygon::PolygonRegion;
pub use polyhedron::PolyhedronRegion;
pub use styles::Styles;

pub use selcui_protocol::event::RegionType;

use crate::config::CuiConfig;
use crate::paint::Color;
use crate::render::{RenderContext, RenderError};

/// One selection shape. Every variant tolerates partial state and draws
/// only what is already defined.
#[derive(Debug, Clone, PartialEq)]
pub enum Region {
    Cuboid(CuboidRegion),
    Polygon2d(PolygonRegion),
    Ellipsoid(EllipsoidRegion),
    Cylinder(CylinderRegion),
    Polyhedron(PolyhedronRegion),
}

impl Region {
    pub fn new(kind: RegionType, config: &CuiConfig) -> Self {
        match kind {
            RegionType::Cuboid => Region::Cuboid(CuboidRegion::new(config)),
            RegionType::Polygon2d => Region::Polygon2d(PolygonRegion::new(config)),
            RegionType::Ellipsoid => Region::Ellipsoid(EllipsoidRegion::new(config)),
            RegionType::Cylinder => Region::Cylinder(CylinderRegion::new(config)),
            RegionType::Polyhedron => Region::Polyhedron(PolyhedronRegion::new(config)),
        }
    }

    pub fn kind(&self) -> RegionType {
        match self {
            Region::Cuboid(_) => RegionType::Cuboid,
            Region::Polygon2d(_) => RegionType::Polygon2d,
            Region::Ellipsoid(_) => RegionType::Ellipsoid,
            Region::Cylinder(_) => RegionType::Cylinder,
            Region::Polyhedron(_) => RegionType::Polyhedron,
        }
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        match self {
            Region::Cuboid(r) => r.render(ctx),
            Region::Polygon2d(r) => r.render(ctx),
            Region::Ellipsoid(r) => r.render(ctx),
            Region::Cylinder(r) => r.render(ctx),
            Region::Polyhedron(r) => r.render(ctx),
        }
    }

    /// Re-reads palette colours and config-driven parameters.
    pub fn styles_changed(&mut self, config: &CuiConfig) {
        match self {
            Region::Cuboid(r) => r.styles_changed(config),
            Region::Polygon2d(r) => r.styles_changed(config),
            Region::Ellipsoid(r) => r.styles_changed(config),
            Region::Cylinder(r) => r.styles_changed(config),
            Region::Polyhedron(r) => r.styles_changed(config),
        }
    }

    /// Colours from the authority, in style-slot order. These stick until
    /// the region is replaced.
    pub fn set_custom_colours(&mut self, colours: &[Color]) {
        match self {
            Region::Cuboid(r) => r.set_custom_colours(colours),
            Region::Polygon2d(r) => r.set_custom_colours(colours),
            Region::Ellipsoid(r) => r.set_custom_colours(colours),
            Region::Cylinder(r) => r.set_custom_colours(colours),
            Region::Polyhedron(r) => r.set_custom_colours(colours),
        }
    }
}

/// Highest vertex or point id a sparse region accepts.
pub const MAX_SPARSE_ID: i32 = 65_535;

/// Writes `value` at `id`, padding any gap with `None`. Ids outside
/// `0..=MAX_SPARSE_ID` are rejected.
pub(crate) fn set_sparse<T>(slots: &mut Vec<Option<T>>, id: i32, value: T) -> bool {
    if id > MAX_SPARSE_ID {
        return false;
    }
    let Ok(index) = usize::try_from(id) else {
        return false;
    };
    if index >= slots.len() {
        slots.resize_with(index + 1, || None);
    }
    slots[index] = Some(value);
    true
}
