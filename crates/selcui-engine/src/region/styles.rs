use crate::config::{ColourKey, Palette};
use crate::paint::Color;
use crate::style::Style;

/// A region's style slots, resolved from the palette unless the authority
/// supplied its own colours.
#[derive(Debug, Clone, PartialEq)]
pub struct Styles<const N: usize> {
    keys: [ColourKey; N],
    styles: [Style; N],
    custom: bool,
}

impl<const N: usize> Styles<N> {
    pub fn new(keys: [ColourKey; N], palette: &Palette) -> Self {
        Self { keys, styles: keys.map(|k| palette.style(k)), custom: false }
    }

    #[inline]
    pub fn get(&self, slot: usize) -> Style {
        self.styles[slot]
    }

    /// Re-reads the palette. Custom colours are kept.
    pub fn refresh(&mut self, palette: &Palette) {
        if !self.custom {
            self.styles = self.keys.map(|k| palette.style(k));
        }
    }

    /// Replaces styles slot by slot; extra colours are ignored.
    pub fn set_custom(&mut self, colours: &[Color]) {
        for (slot, c) in self.styles.iter_mut().zip(colours) {
            *slot = Style::from_color(*c);
        }
        self.custom = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_colours_survive_palette_changes() {
        let mut palette = Palette::default();
        let mut styles = Styles::new([ColourKey::CuboidBox, ColourKey::CuboidGrid], &palette);

        styles.set_custom(&[Color::white()]);
        palette.set(ColourKey::CuboidBox, Color::new(0.0, 0.0, 0.0, 1.0));
        palette.set(ColourKey::CuboidGrid, Color::new(0.0, 0.0, 0.0, 1.0));
        styles.refresh(&palette);

        assert_eq!(styles.get(0).color(), Color::white());
        // Slot without a custom colour keeps its previous palette value.
        assert_eq!(styles.get(1).color(), Color::from_rgba_u32(ColourKey::CuboidGrid.default_rgba()));
    }

    #[test]
    fn palette_changes_apply_without_custom_colours() {
        let mut palette = Palette::default();
        let mut styles = Styles::new([ColourKey::CuboidBox], &palette);
        palette.set(ColourKey::CuboidBox, Color::white());
        styles.refresh(&palette);
        assert_eq!(styles.get(0).color(), Color::white());
    }
}
