//! The two selection slots plus the chunk-border overlay.

mod slot;

pub use slot::Slot;

use crate::config::{ColourKey, CuiConfig};
use crate::region::{Region, RegionType};
use crate::render::{RenderContext, RenderError};
use crate::shapes::ChunkBoundary;

/// Region model owned by the frame thread.
#[derive(Debug, Clone, Default)]
pub struct Selections {
    primary: Option<Region>,
    multi: Option<Region>,
    config: CuiConfig,
    chunk_borders: Option<ChunkBoundary>,
}

impl Selections {
    pub fn new(config: CuiConfig) -> Self {
        Self { config, ..Self::default() }
    }

    #[inline]
    pub fn config(&self) -> &CuiConfig {
        &self.config
    }

    pub fn get(&self, slot: Slot) -> Option<&Region> {
        match slot {
            Slot::Primary => self.primary.as_ref(),
            Slot::Multi => self.multi.as_ref(),
        }
    }

    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut Region> {
        self.slot_mut(slot).as_mut()
    }

    /// Replaces whatever `slot` held with a fresh region of `kind`.
    pub fn set(&mut self, slot: Slot, kind: RegionType) -> &mut Region {
        let region = Region::new(kind, &self.config);
        self.slot_mut(slot).insert(region)
    }

    pub fn clear(&mut self, slot: Slot) {
        *self.slot_mut(slot) = None;
    }

    pub fn clear_regions(&mut self) {
        for slot in Slot::ALL {
            self.clear(slot);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.multi.is_none()
    }

    /// Installs `config` and lets every live region re-read it.
    pub fn set_config(&mut self, config: CuiConfig) {
        self.config = config;
        for slot in Slot::ALL {
            let config = &self.config;
            let region = match slot {
                Slot::Primary => &mut self.primary,
                Slot::Multi => &mut self.multi,
            };
            if let Some(r) = region {
                r.styles_changed(config);
            }
        }
        if let Some(chunk) = &mut self.chunk_borders {
            let p = &self.config.palette;
            chunk.set_styles(p.style(ColourKey::ChunkBoundary), p.style(ColourKey::ChunkGrid));
            chunk.set_height(self.config.chunk_min_y, self.config.chunk_max_y);
        }
    }

    /// Returns whether the overlay is now shown.
    pub fn toggle_chunk_borders(&mut self) -> bool {
        if self.chunk_borders.take().is_none() {
            let p = &self.config.palette;
            self.chunk_borders = Some(ChunkBoundary::new(
                p.style(ColourKey::ChunkBoundary),
                p.style(ColourKey::ChunkGrid),
                self.config.chunk_min_y,
                self.config.chunk_max_y,
            ));
        }
        self.chunk_borders.is_some()
    }

    #[inline]
    pub fn chunk_borders_shown(&self) -> bool {
        self.chunk_borders.is_some()
    }

    /// Primary, then multi, then chunk borders.
    pub fn render(&self, ctx: &mut RenderContext<'_>) -> Result<(), RenderError> {
        for region in [&self.primary, &self.multi].into_iter().flatten() {
            region.render(ctx)?;
        }
        if let Some(chunk) = &self.chunk_borders {
            chunk.render(ctx)?;
        }
        Ok(())
    }

    fn slot_mut(&mut self, slot: Slot) -> &mut Option<Region> {
        match slot {
            Slot::Primary => &mut self.primary,
            Slot::Multi => &mut self.multi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vector3;
    use crate::paint::Color;
    use crate::region::CuboidRegion;
    use crate::render::{BufferSink, RecordingTarget, RenderSink, TypeSet};

    fn render(sel: &Selections) -> RecordingTarget {
        let rec = RecordingTarget::new(TypeSet::PLAIN);
        let mut sink = BufferSink::new(rec.clone());
        {
            let mut ctx = RenderContext::new(&mut sink, Vector3::ZERO, 0.0);
            sel.render(&mut ctx).unwrap();
        }
        sink.flush().unwrap();
        rec
    }

    fn cuboid(sel: &mut Selections, slot: Slot) {
        let Region::Cuboid(c) = sel.set(slot, RegionType::Cuboid) else {
            panic!("expected cuboid");
        };
        c.set_point(0, Vector3::ZERO);
        c.set_point(1, Vector3::ONE);
    }

    #[test]
    fn slots_are_independent() {
        let mut sel = Selections::default();
        sel.set(Slot::Multi, RegionType::Cylinder);
        assert!(sel.get(Slot::Primary).is_none());
        assert_eq!(sel.get(Slot::Multi).map(Region::kind), Some(RegionType::Cylinder));

        sel.set(Slot::Primary, RegionType::Cuboid);
        sel.clear(Slot::Multi);
        assert_eq!(sel.get(Slot::Primary).map(Region::kind), Some(RegionType::Cuboid));
        assert!(sel.get(Slot::Multi).is_none());

        sel.clear_regions();
        assert!(sel.is_empty());
    }

    #[test]
    fn set_replaces_existing_region() {
        let mut sel = Selections::default();
        cuboid(&mut sel, Slot::Primary);
        sel.set(Slot::Primary, RegionType::Cuboid);
        let Some(Region::Cuboid(c)) = sel.get(Slot::Primary) else {
            panic!("expected cuboid");
        };
        assert_eq!(c.corners(), None);
    }

    #[test]
    fn renders_both_slots() {
        let mut sel = Selections::default();
        cuboid(&mut sel, Slot::Primary);
        let one = render(&sel).primitive_count();
        cuboid(&mut sel, Slot::Multi);
        assert_eq!(render(&sel).primitive_count(), one * 2);
    }

    #[test]
    fn chunk_borders_toggle() {
        let mut sel = Selections::default();
        assert!(sel.toggle_chunk_borders());
        assert!(render(&sel).primitive_count() > 0);
        assert!(!sel.toggle_chunk_borders());
        assert_eq!(render(&sel).submissions(), 0);
    }

    #[test]
    fn config_change_restyles_live_regions() {
        let mut sel = Selections::default();
        cuboid(&mut sel, Slot::Primary);

        let mut config = CuiConfig::default();
        config.palette.set(ColourKey::CuboidBox, Color::white());
        sel.set_config(config);

        let mut expected = CuboidRegion::new(sel.config());
        expected.set_point(0, Vector3::ZERO);
        expected.set_point(1, Vector3::ONE);
        assert_eq!(sel.get(Slot::Primary), Some(&Region::Cuboid(expected)));
    }
}
