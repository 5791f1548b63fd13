use crate::coords::Vector3;
use crate::paint::Color;
use crate::style::{DepthFunc, LineStyle, RenderType};

use super::error::RenderError;
use super::format::{PrimitiveKind, PrimitiveType, TypeSet};
use super::sink::{GpuState, RenderSink};
use super::vertex::{Batch, VertexData};

/// Receives finished batches from a [`BufferSink`].
pub trait DrawTarget {
    /// How this target wants each primitive kind buffered.
    fn types(&self) -> TypeSet;

    fn submit(&mut self, batch: Batch) -> Result<(), RenderError>;
}

struct OpenBatch {
    ty: PrimitiveType,
    data: VertexData,
}

/// Batching state machine in front of a [`DrawTarget`].
///
/// Consecutive primitives of the same buffered type share one batch. Line
/// and loop vertices are paired into 2-vertex segments here, so callers pass
/// a flat list of points; a loop also closes back to its first point.
pub struct BufferSink<T: DrawTarget> {
    target: T,
    types: TypeSet,
    state: GpuState,

    open: Option<OpenBatch>,
    active: Option<PrimitiveKind>,

    color: Option<Color>,
    /// Width and depth function of the last applied line.
    line: Option<(f32, DepthFunc)>,

    /// Start of the segment being built.
    pending: Option<Vector3>,
    loop_first: Option<Vector3>,
}

impl<T: DrawTarget> BufferSink<T> {
    pub fn new(target: T) -> Self {
        let types = target.types();
        Self {
            target,
            types,
            state: GpuState::default(),
            open: None,
            active: None,
            color: None,
            line: None,
            pending: None,
            loop_first: None,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    fn push_segment(&mut self, a: Vector3, b: Vector3, color: Color) -> Result<(), RenderError> {
        let open = self.open.as_mut().ok_or(RenderError::NotActive)?;
        // Only formats that carry a normal pay for computing one.
        let normal = open
            .ty
            .format
            .has_normals()
            .then(|| (b - a).normalized().unwrap_or(Vector3::ZERO).to_f32());
        let c = color.to_array();
        open.data.push(a.to_f32(), c, normal);
        open.data.push(b.to_f32(), c, normal);
        Ok(())
    }
}

impl<T: DrawTarget> RenderSink for BufferSink<T> {
    fn color(&mut self, color: Color) {
        self.color = Some(color);
    }

    fn apply(&mut self, line: &LineStyle, requested: RenderType) -> Result<bool, RenderError> {
        if !line.render_type.matches(requested) {
            return Ok(false);
        }
        let wanted = (line.width, line.render_type.depth_func());
        if self.line != Some(wanted) {
            self.flush()?;
            self.line = Some(wanted);
        }
        Ok(true)
    }

    fn begin(&mut self, kind: PrimitiveKind) -> Result<(), RenderError> {
        if let Some(active) = self.active {
            return Err(RenderError::AlreadyActive { requested: kind, active });
        }
        let ty = self.types.get(kind);
        if self.open.as_ref().is_some_and(|open| ty.must_flush_after(open.ty)) {
            self.flush()?;
        }
        if self.open.is_none() {
            self.open = Some(OpenBatch { ty, data: VertexData::new(ty.format) });
        }
        self.active = Some(kind);
        self.pending = None;
        self.loop_first = None;
        Ok(())
    }

    fn end(&mut self, kind: PrimitiveKind) -> Result<(), RenderError> {
        let active = self.active.ok_or(RenderError::NotActive)?;
        if active != kind {
            return Err(RenderError::MismatchedEnd { expected: kind, actual: active });
        }
        self.active = None;

        if kind == PrimitiveKind::LineLoop {
            if let (Some(last), Some(first), Some(color)) =
                (self.pending.take(), self.loop_first.take(), self.color)
            {
                self.push_segment(last, first, color)?;
            }
        }
        self.pending = None;
        Ok(())
    }

    fn vertex(&mut self, x: f64, y: f64, z: f64) -> Result<(), RenderError> {
        let color = self.color.ok_or(RenderError::MissingColorState)?;
        let kind = self.active.ok_or(RenderError::NotActive)?;
        let p = Vector3::new(x, y, z);

        match kind {
            PrimitiveKind::LineLoop => {
                match self.pending {
                    Some(prev) => self.push_segment(prev, p, color)?,
                    None => self.loop_first = Some(p),
                }
                self.pending = Some(p);
            }
            PrimitiveKind::Lines => match self.pending.take() {
                Some(prev) => self.push_segment(prev, p, color)?,
                None => self.pending = Some(p),
            },
            PrimitiveKind::Quads => {
                let open = self.open.as_mut().ok_or(RenderError::NotActive)?;
                open.data.push(p.to_f32(), color.to_array(), None);
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), RenderError> {
        if self.open.is_none() {
            return Ok(());
        }
        if self.active.is_some() {
            return Err(RenderError::FlushWhileActive);
        }
        let Some(open) = self.open.take() else { return Ok(()) };
        if open.data.is_empty() {
            return Ok(());
        }

        let (line_width, depth_func) = self.line.unwrap_or((self.state.line_width, self.state.depth_func));
        let batch = Batch {
            mode: open.ty.mode,
            format: open.ty.format,
            line_width,
            depth_func,
            state: self.state,
            data: open.data,
        };
        log::trace!(
            "flush {:?}/{:?}: {} vertices, width {}, depth {}",
            batch.mode,
            batch.format,
            batch.data.len(),
            batch.line_width,
            batch.depth_func
        );
        self.target.submit(batch)
    }

    fn set_state(&mut self, state: GpuState) -> GpuState {
        self.line = None;
        std::mem::replace(&mut self.state, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::format::{DrawMode, VertexFormat};
    use crate::render::recording::RecordingTarget;
    use crate::style::Style;

    fn sink(types: TypeSet) -> (BufferSink<RecordingTarget>, RecordingTarget) {
        let target = RecordingTarget::new(types);
        (BufferSink::new(target.clone()), target)
    }

    fn square(s: &mut dyn RenderSink) -> Result<(), RenderError> {
        s.vertex(0.0, 0.0, 0.0)?;
        s.vertex(1.0, 0.0, 0.0)?;
        s.vertex(1.0, 0.0, 1.0)?;
        s.vertex(0.0, 0.0, 1.0)
    }

    #[test]
    fn loop_closes_and_lines_do_not() {
        let (mut s, rec) = sink(TypeSet::PLAIN);
        s.color(Color::white());

        s.begin_line_loop().unwrap();
        square(&mut s).unwrap();
        s.end_line_loop().unwrap();
        s.flush().unwrap();

        s.begin_lines().unwrap();
        // Plain lines pair endpoints, so feed the open polyline explicitly.
        for (a, b) in [(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)] {
            s.vertex(a, 0.0, 0.0).unwrap();
            s.vertex(b, 0.0, 0.0).unwrap();
        }
        s.end_lines().unwrap();
        s.flush().unwrap();

        let batches = rec.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].primitive_count(), 4);
        assert_eq!(batches[0].data.positions()[6..], [[0.0, 0.0, 1.0], [0.0, 0.0, 0.0]]);
        assert_eq!(batches[1].primitive_count(), 3);
    }

    #[test]
    fn lines_pair_a_flat_point_list() {
        let (mut s, rec) = sink(TypeSet::PLAIN);
        s.color(Color::white());
        s.begin_lines().unwrap();
        square(&mut s).unwrap();
        s.end_lines().unwrap();
        s.flush().unwrap();
        assert_eq!(rec.batches()[0].primitive_count(), 2);
    }

    #[test]
    fn odd_trailing_line_vertex_is_dropped() {
        let (mut s, rec) = sink(TypeSet::PLAIN);
        s.color(Color::white());
        s.begin_lines().unwrap();
        s.vertex(0.0, 0.0, 0.0).unwrap();
        s.vertex(1.0, 0.0, 0.0).unwrap();
        s.vertex(2.0, 0.0, 0.0).unwrap();
        s.end_lines().unwrap();
        s.begin_lines().unwrap();
        s.vertex(5.0, 0.0, 0.0).unwrap();
        s.vertex(6.0, 0.0, 0.0).unwrap();
        s.end_lines().unwrap();
        s.flush().unwrap();
        assert_eq!(
            rec.batches()[0].data.positions(),
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [5.0, 0.0, 0.0], [6.0, 0.0, 0.0]]
        );
    }

    #[test]
    fn same_type_primitives_share_one_batch() {
        let (mut s, rec) = sink(TypeSet::RIBBON);
        s.color(Color::white());
        for _ in 0..3 {
            s.begin_line_loop().unwrap();
            square(&mut s).unwrap();
            s.end_line_loop().unwrap();
            s.begin_lines().unwrap();
            square(&mut s).unwrap();
            s.end_lines().unwrap();
        }
        assert_eq!(rec.submissions(), 0);
        s.flush().unwrap();
        assert_eq!(rec.submissions(), 1);
        assert_eq!(rec.batches()[0].primitive_count(), 3 * (4 + 2));
    }

    #[test]
    fn mode_change_flushes_exactly_once_before_new_vertices() {
        let (mut s, rec) = sink(TypeSet::PLAIN);
        s.color(Color::white());
        s.begin_lines().unwrap();
        square(&mut s).unwrap();
        s.end_lines().unwrap();
        assert_eq!(rec.submissions(), 0);

        s.begin_quads().unwrap();
        assert_eq!(rec.submissions(), 1);
        square(&mut s).unwrap();
        s.end_quads().unwrap();
        assert_eq!(rec.submissions(), 1);

        s.flush().unwrap();
        let batches = rec.batches();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].mode, DrawMode::Lines);
        assert_eq!(batches[1].mode, DrawMode::Quads);
        assert_eq!(batches[1].primitive_count(), 1);
    }

    #[test]
    fn vertex_without_colour_fails_and_submits_nothing() {
        let (mut s, rec) = sink(TypeSet::PLAIN);
        s.begin_lines().unwrap();
        assert_eq!(s.vertex(0.0, 0.0, 0.0), Err(RenderError::MissingColorState));
        s.end_lines().unwrap();
        s.flush().unwrap();
        assert_eq!(rec.submissions(), 0);
    }

    #[test]
    fn colour_is_checked_before_activity() {
        let (mut s, _) = sink(TypeSet::PLAIN);
        assert_eq!(s.vertex(0.0, 0.0, 0.0), Err(RenderError::MissingColorState));
        s.color(Color::white());
        assert_eq!(s.vertex(0.0, 0.0, 0.0), Err(RenderError::NotActive));
    }

    #[test]
    fn sequence_errors() {
        let (mut s, _) = sink(TypeSet::PLAIN);
        assert_eq!(s.end_lines(), Err(RenderError::NotActive));

        s.begin_lines().unwrap();
        assert!(s.is_active());
        assert_eq!(
            s.begin_quads(),
            Err(RenderError::AlreadyActive {
                requested: PrimitiveKind::Quads,
                active: PrimitiveKind::Lines
            })
        );
        assert_eq!(
            s.end_line_loop(),
            Err(RenderError::MismatchedEnd {
                expected: PrimitiveKind::LineLoop,
                actual: PrimitiveKind::Lines
            })
        );
        assert_eq!(s.flush(), Err(RenderError::FlushWhileActive));
        s.end_lines().unwrap();
        assert!(!s.is_active());
        s.flush().unwrap();
    }

    #[test]
    fn flush_without_geometry_is_a_no_op() {
        let (mut s, rec) = sink(TypeSet::PLAIN);
        s.flush().unwrap();
        s.begin_quads().unwrap();
        s.end_quads().unwrap();
        s.flush().unwrap();
        assert_eq!(rec.submissions(), 0);
    }

    #[test]
    fn apply_flushes_when_width_or_depth_changes() {
        let (mut s, rec) = sink(TypeSet::PLAIN);
        let style = Style::from_color(Color::white());
        let [hidden, visible] = [style.lines()[0], style.lines()[1]];

        assert!(s.apply(&hidden, RenderType::Any).unwrap());
        s.color(hidden.color);
        s.begin_lines().unwrap();
        square(&mut s).unwrap();
        s.end_lines().unwrap();

        // Same settings again: no flush.
        assert!(s.apply(&hidden, RenderType::Any).unwrap());
        assert_eq!(rec.submissions(), 0);

        assert!(s.apply(&visible, RenderType::Any).unwrap());
        assert_eq!(rec.submissions(), 1);
        assert_eq!(rec.batches()[0].depth_func, DepthFunc::Greater);

        s.begin_lines().unwrap();
        square(&mut s).unwrap();
        s.end_lines().unwrap();
        s.flush().unwrap();
        assert_eq!(rec.batches()[1].depth_func, DepthFunc::LessEqual);
    }

    #[test]
    fn apply_rejects_other_passes_without_flushing() {
        let (mut s, rec) = sink(TypeSet::PLAIN);
        let style = Style::from_color(Color::white());
        s.color(Color::white());
        s.begin_lines().unwrap();
        square(&mut s).unwrap();
        s.end_lines().unwrap();
        assert!(!s.apply(&style.lines()[0], RenderType::Visible).unwrap());
        assert_eq!(rec.submissions(), 0);
    }

    #[test]
    fn normals_follow_segment_direction() {
        let (mut s, rec) = sink(TypeSet::RIBBON);
        s.color(Color::white());
        s.begin_lines().unwrap();
        s.vertex(0.0, 0.0, 0.0).unwrap();
        s.vertex(0.0, 3.0, 0.0).unwrap();
        s.vertex(1.0, 1.0, 1.0).unwrap();
        s.vertex(1.0, 1.0, 1.0).unwrap();
        s.end_lines().unwrap();
        s.flush().unwrap();

        let batch = &rec.batches()[0];
        assert_eq!(batch.format, VertexFormat::PositionColorNormal);
        let VertexData::PositionColorNormal(v) = &batch.data else { panic!("normal format") };
        assert_eq!(v[0].normal, [0.0, 1.0, 0.0]);
        assert_eq!(v[1].normal, [0.0, 1.0, 0.0]);
        assert_eq!(v[2].normal, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn plain_format_carries_no_normals() {
        let (mut s, rec) = sink(TypeSet::PLAIN);
        s.color(Color::white());
        s.begin_lines().unwrap();
        s.vertex(0.0, 0.0, 0.0).unwrap();
        s.vertex(0.0, 3.0, 0.0).unwrap();
        s.end_lines().unwrap();
        s.flush().unwrap();
        assert!(matches!(rec.batches()[0].data, VertexData::PositionColor(_)));
    }

    #[test]
    fn set_state_returns_previous_and_tags_batches() {
        let (mut s, rec) = sink(TypeSet::PLAIN);
        let prev = s.set_state(GpuState::overlay());
        assert_eq!(prev, GpuState::default());
        s.color(Color::white());
        s.begin_lines().unwrap();
        square(&mut s).unwrap();
        s.end_lines().unwrap();
        s.flush().unwrap();
        assert_eq!(s.set_state(prev), GpuState::overlay());
        assert_eq!(rec.batches()[0].state, GpuState::overlay());
        assert_eq!(rec.batches()[0].line_width, GpuState::overlay().line_width);
    }
}
