use std::fmt;

/// GPU primitive assembly for a batch.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DrawMode {
    /// Independent 2-vertex segments.
    Lines,
    /// Independent 4-vertex quads.
    Quads,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum VertexFormat {
    PositionColor,
    /// Adds the segment direction, used to extrude screen-facing ribbons.
    PositionColorNormal,
}

impl VertexFormat {
    #[inline]
    pub fn has_normals(self) -> bool {
        matches!(self, VertexFormat::PositionColorNormal)
    }
}

/// Caller-facing primitive kinds (`begin_*` / `end_*`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Lines,
    LineLoop,
    Quads,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrimitiveKind::Lines => "lines",
            PrimitiveKind::LineLoop => "line loop",
            PrimitiveKind::Quads => "quads",
        })
    }
}

/// What a primitive kind is buffered as.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PrimitiveType {
    pub mode: DrawMode,
    pub format: VertexFormat,
}

impl PrimitiveType {
    pub const fn new(mode: DrawMode, format: VertexFormat) -> Self {
        Self { mode, format }
    }

    /// An open buffer of `previous` cannot take `self` without a flush.
    #[inline]
    pub fn must_flush_after(self, previous: PrimitiveType) -> bool {
        previous.mode != self.mode || previous.format != self.format
    }
}

/// Per-backend mapping from primitive kinds to buffered types.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TypeSet {
    pub lines: PrimitiveType,
    pub line_loop: PrimitiveType,
    pub quads: PrimitiveType,
}

impl TypeSet {
    /// Lines carry normals for ribbon extrusion.
    pub const RIBBON: TypeSet = TypeSet {
        lines: PrimitiveType::new(DrawMode::Lines, VertexFormat::PositionColorNormal),
        line_loop: PrimitiveType::new(DrawMode::Lines, VertexFormat::PositionColorNormal),
        quads: PrimitiveType::new(DrawMode::Quads, VertexFormat::PositionColor),
    };

    pub const PLAIN: TypeSet = TypeSet {
        lines: PrimitiveType::new(DrawMode::Lines, VertexFormat::PositionColor),
        line_loop: PrimitiveType::new(DrawMode::Lines, VertexFormat::PositionColor),
        quads: PrimitiveType::new(DrawMode::Quads, VertexFormat::PositionColor),
    };

    #[inline]
    pub fn get(&self, kind: PrimitiveKind) -> PrimitiveType {
        match kind {
            PrimitiveKind::Lines => self.lines,
            PrimitiveKind::LineLoop => self.line_loop,
            PrimitiveKind::Quads => self.quads,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_and_loops_share_a_buffer() {
        for set in [TypeSet::RIBBON, TypeSet::PLAIN] {
            assert!(!set.line_loop.must_flush_after(set.lines));
            assert!(set.quads.must_flush_after(set.lines));
        }
    }

    #[test]
    fn format_change_alone_forces_flush() {
        let a = PrimitiveType::new(DrawMode::Lines, VertexFormat::PositionColor);
        let b = PrimitiveType::new(DrawMode::Lines, VertexFormat::PositionColorNormal);
        assert!(b.must_flush_after(a));
    }
}
