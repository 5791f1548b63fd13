//! Controller configuration.
//!
//! Everything here is constructed in code; persisting it is left to the
//! embedding environment.

use std::fmt;

use crate::paint::Color;
use crate::style::Style;

// ── colour keys ─────────────────────────────────────────────────────────────

/// Named, user-configurable colour slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ColourKey {
    CuboidBox,
    CuboidGrid,
    CuboidPoint1,
    CuboidPoint2,
    PolygonGrid,
    PolygonBox,
    PolygonPoint,
    EllipsoidGrid,
    EllipsoidCentre,
    CylinderGrid,
    CylinderBox,
    CylinderCentre,
    ChunkBoundary,
    ChunkGrid,
}

impl ColourKey {
    pub const ALL: [ColourKey; 14] = [
        ColourKey::CuboidBox,
        ColourKey::CuboidGrid,
        ColourKey::CuboidPoint1,
        ColourKey::CuboidPoint2,
        ColourKey::PolygonGrid,
        ColourKey::PolygonBox,
        ColourKey::PolygonPoint,
        ColourKey::EllipsoidGrid,
        ColourKey::EllipsoidCentre,
        ColourKey::CylinderGrid,
        ColourKey::CylinderBox,
        ColourKey::CylinderCentre,
        ColourKey::ChunkBoundary,
        ColourKey::ChunkGrid,
    ];

    /// Settings name, as used by the host's config screen.
    pub fn config_name(self) -> &'static str {
        match self {
            ColourKey::CuboidBox => "colourCuboidBox",
            ColourKey::CuboidGrid => "colourCuboidGrid",
            ColourKey::CuboidPoint1 => "colourCuboidPoint1",
            ColourKey::CuboidPoint2 => "colourCuboidPoint2",
            ColourKey::PolygonGrid => "colourPolyGrid",
            ColourKey::PolygonBox => "colourPolyEdge",
            ColourKey::PolygonPoint => "colourPolyPoint",
            ColourKey::EllipsoidGrid => "colourEllipsoidGrid",
            ColourKey::EllipsoidCentre => "colourEllipsoidCenter",
            ColourKey::CylinderGrid => "colourCylinderGrid",
            ColourKey::CylinderBox => "colourCylinderEdge",
            ColourKey::CylinderCentre => "colourCylinderCenter",
            ColourKey::ChunkBoundary => "colourChunkBoundary",
            ColourKey::ChunkGrid => "colourChunkGrid",
        }
    }

    pub fn from_config_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.config_name() == name)
    }

    /// Factory default as `0xRRGGBBAA`.
    pub fn default_rgba(self) -> u32 {
        match self {
            ColourKey::CuboidBox => 0xCC3333CC,
            ColourKey::CuboidGrid => 0xCC4C4CCC,
            ColourKey::CuboidPoint1 => 0x33CC33CC,
            ColourKey::CuboidPoint2 => 0x3333CCCC,
            ColourKey::PolygonGrid => 0xCC3333CC,
            ColourKey::PolygonBox => 0xCC4C4CCC,
            ColourKey::PolygonPoint => 0x33CCCCCC,
            ColourKey::EllipsoidGrid => 0xCC4C4CCC,
            ColourKey::EllipsoidCentre => 0xCCCC33CC,
            ColourKey::CylinderGrid => 0xCC3333CC,
            ColourKey::CylinderBox => 0xCC4C4CCC,
            ColourKey::CylinderCentre => 0xCC33CCCC,
            ColourKey::ChunkBoundary => 0x33CC33CC,
            ColourKey::ChunkGrid => 0x4C4C4CCC,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

// ── errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    UnknownKey(String),
    BadColour { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::UnknownKey(k) => write!(f, "unknown colour setting `{}`", k),
            ConfigError::BadColour { key, value } => {
                write!(f, "`{}` is not a colour (for `{}`)", value, key)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ── palette ─────────────────────────────────────────────────────────────────

/// Resolved colour table.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colours: [Color; ColourKey::ALL.len()],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colours: ColourKey::ALL.map(|k| Color::from_rgba_u32(k.default_rgba())),
        }
    }
}

impl Palette {
    #[inline]
    pub fn get(&self, key: ColourKey) -> Color {
        self.colours[key.index()]
    }

    pub fn set(&mut self, key: ColourKey, color: Color) {
        self.colours[key.index()] = color;
    }

    /// Sets a colour by settings name from a `#rrggbbaa` string.
    pub fn set_named(&mut self, name: &str, hex: &str) -> Result<(), ConfigError> {
        let key = ColourKey::from_config_name(name)
            .ok_or_else(|| ConfigError::UnknownKey(name.to_string()))?;
        let color = Color::from_hex(hex).ok_or_else(|| ConfigError::BadColour {
            key: key.config_name(),
            value: hex.to_string(),
        })?;
        self.set(key, color);
        Ok(())
    }

    #[inline]
    pub fn style(&self, key: ColourKey) -> Style {
        Style::from_color(self.get(key))
    }
}

// ── controller config ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct CuiConfig {
    pub palette: Palette,
    /// Promotes received-event traces to `debug`.
    pub debug: bool,
    /// Ask the authority to resend the selection after a world change.
    pub promiscuous: bool,
    /// The clear key also clears the multi slot.
    pub clear_all_on_key: bool,
    /// Cuboid grid lines further than this from the camera are skipped.
    pub grid_cull_distance: Option<f64>,
    pub chunk_min_y: i32,
    pub chunk_max_y: i32,
}

impl Default for CuiConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            debug: false,
            promiscuous: false,
            clear_all_on_key: false,
            grid_cull_distance: None,
            chunk_min_y: -64,
            chunk_max_y: 320,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_names_round_trip() {
        for k in ColourKey::ALL {
            assert_eq!(ColourKey::from_config_name(k.config_name()), Some(k));
        }
    }

    #[test]
    fn set_named_overrides_one_slot() {
        let mut p = Palette::default();
        p.set_named("colourCuboidBox", "#ffffffff").unwrap();
        assert_eq!(p.get(ColourKey::CuboidBox), Color::white());
        assert_eq!(p.get(ColourKey::CuboidGrid), Color::from_rgba_u32(0xCC4C4CCC));
    }

    #[test]
    fn set_named_rejects_unknown_and_garbage() {
        let mut p = Palette::default();
        assert_eq!(
            p.set_named("colourNope", "#ffffffff"),
            Err(ConfigError::UnknownKey("colourNope".into()))
        );
        assert!(matches!(p.set_named("colourChunkGrid", "blue"), Err(ConfigError::BadColour { .. })));
        assert_eq!(p, Palette::default());
    }
}
