/// Linear RGBA color, components in `0.0..=1.0`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Builds a color from 8-bit channels.
    #[inline]
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            f32::from(a) / 255.0,
        )
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    #[inline]
    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same color with its RGB channels multiplied by alpha.
    #[inline]
    pub fn premultiplied(self) -> Self {
        Self::new(self.r * self.a, self.g * self.a, self.b * self.a, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgba8_endpoints() {
        assert_eq!(ColorRgba::from_rgba8(0, 0, 0, 255), ColorRgba::black());
        assert_eq!(ColorRgba::from_rgba8(255, 255, 255, 255), ColorRgba::white());
    }

    #[test]
    fn premultiply_scales_rgb_only() {
        let c = ColorRgba::new(1.0, 0.5, 0.25, 0.5).premultiplied();
        assert_eq!(c.to_array(), [0.5, 0.25, 0.125, 0.5]);
    }
}
