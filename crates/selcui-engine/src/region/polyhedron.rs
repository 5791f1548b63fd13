use crate::config::{ColourKey, CuiConfig};
use crate::coords::Vector3;
use crate::paint::Color;
use crate::render::{RenderContext, RenderError};
use crate::shapes::{PointCube, Polygon3d, Shape};
use crate::style::Style;

use super::styles::Styles;
use super::set_sparse;

const FACE: usize = 0;
const VERTEX: usize = 1;
const FIRST_VERTEX: usize = 2;

const KEYS: [ColourKey; 3] = [ColourKey::PolygonBox, ColourKey::PolygonPoint, ColourKey::CuboidPoint1];

/// Convex hull given as vertices plus faces referencing them by id.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyhedronRegion {
    styles: Styles<3>,
    vertices: Vec<Option<PointCube>>,
    /// Captured when the face is added; later vertex edits do not move it.
    faces: Vec<Polygon3d>,
}

impl PolyhedronRegion {
    pub fn new(config: &CuiConfig) -> Self {
        Self { styles: Styles::new(KEYS, &config.palette), vertices: Vec::new(), faces: Vec::new() }
    }

    pub fn set_vertex(&mut self, id: i32, pos: Vector3) {
        let vertex = PointCube::new(pos, self.vertex_style(id)).with_id(id);
        if !set_sparse(&mut self.vertices, id, vertex) {
            log::debug!("ignoring polyhedron vertex with out-of-range id {}", id);
        }
    }

    /// Adds a face over existing vertices. Returns `false` and changes
    /// nothing if any id does not name a known vertex.
    pub fn add_face(&mut self, vertex_ids: &[i32]) -> bool {
        let mut face = Vec::with_capacity(vertex_ids.len());
        for &id in vertex_ids {
            let vertex = usize::try_from(id).ok().and_then(|i| self.vertices.get(i)).and_then(Option::as_ref);
            let Some(vertex) = vertex else {
                log::debug!("polyhedron face references unknown vertex {}", id);
                return false;
            };
            face.push(vertex.point() + Vector3::HALF);
        }
        self.faces.push(Polygon3d::new(face, self.styles.get(FACE)));
        true
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn faces(&self) -> impl Iterator<Item = &[Vector3]> {
        self.faces.iter().map(Polygon3d::vertices)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.iter().flatten().count()
    }

    pub fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        for vertex in self.vertices.iter().flatten() {
            vertex.render(ctx)?;
        }
        for face in &self.faces {
            face.render(ctx)?;
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

    fn vertex_style(&self, id: i32) -> Style {
        self.styles.get(if id == 0 { FIRST_VERTEX } else { VERTEX })
    }

    fn apply_styles(&mut self) {
        for i in 0..self.vertices.len() {
            let Some(id) = self.vertices[i].as_ref().and_then(PointCube::id) else {
                continue;
            };
            let style = self.vertex_style(id);
            if let Some(v) = &mut self.vertices[i] {
                v.set_style(style);
            }
        }
        let face_style = self.styles.get(FACE);
        for face in &mut self.faces {
            face.set_style(face_style);
        }
    }
}
