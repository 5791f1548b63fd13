use super::Vector3;

/// Immutable world coordinate with an optional vertex identity.
///
/// Identities are only meaningful for polyhedron vertices, which faces refer
/// to by index.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Point {
    pos: Vector3,
    id: Option<i32>,
}

impl Point {
    #[inline]
    pub const fn new(pos: Vector3) -> Self {
        Self { pos, id: None }
    }

    #[inline]
    pub const fn with_id(pos: Vector3, id: i32) -> Self {
        Self { pos, id: Some(id) }
    }

    #[inline]
    pub const fn pos(&self) -> Vector3 {
        self.pos
    }

    #[inline]
    pub const fn id(&self) -> Option<i32> {
        self.id
    }
}

impl From<Vector3> for Point {
    fn from(pos: Vector3) -> Self {
        Self::new(pos)
    }
}
