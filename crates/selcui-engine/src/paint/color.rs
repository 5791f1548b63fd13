use selcui_protocol::message::parse_hex_colour;

/// Straight-alpha RGBA color.
///
/// Overlay geometry is blended with the standard `SRC_ALPHA, ONE_MINUS_SRC_ALPHA`
/// function, so colors stay un-premultiplied all the way to the GPU.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    /// From straight RGBA bytes (`0`–`255`).
    #[inline]
    pub fn from_rgba8([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, a as f32 / 255.0)
    }

    /// From a packed `0xRRGGBBAA` literal.
    #[inline]
    pub fn from_rgba_u32(v: u32) -> Self {
        Self::from_rgba8(v.to_be_bytes())
    }

    /// Parses `#rrggbbaa` / `#rrggbb`.
    pub fn from_hex(s: &str) -> Option<Self> {
        parse_hex_colour(s).map(Self::from_rgba8)
    }

    /// Formats as `#rrggbbaa`.
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }

    #[inline]
    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// Scales RGB by `rgb` and alpha by `alpha`.
    #[inline]
    pub fn scaled(self, rgb: f32, alpha: f32) -> Self {
        Self::new(self.r * rgb, self.g * rgb, self.b * rgb, self.a * alpha)
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip_is_stable() {
        let c = Color::from_hex("#cc3333cc").unwrap();
        assert_eq!(c.to_hex(), "#cc3333cc");
    }

    #[test]
    fn packed_literal_matches_hex() {
        assert_eq!(Color::from_rgba_u32(0xCC3333CC), Color::from_hex("#cc3333cc").unwrap());
    }

    #[test]
    fn scaled_dims_rgb_and_alpha_independently() {
        let c = Color::new(1.0, 0.5, 0.0, 0.8).scaled(0.5, 0.25);
        assert_eq!(c, Color::new(0.5, 0.25, 0.0, 0.2));
    }
}
