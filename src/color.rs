/// RGBA color with channels in sRGB space, nominally 0.0 to 1.0.
///
/// Channels are not clamped on construction. Pointer-driven targets can land
/// outside the nominal range and are carried through unchanged; the GPU
/// saturates the final shaded output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const WHITE: Color = Color::rgba(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgba(0.0, 0.0, 0.0, 1.0);

    /// Build an opaque color from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        let [_, r, g, b] = hex.to_be_bytes();
        Self::from_channels([r as i32, g as i32, b as i32])
    }

    /// Build an opaque color from 0-255 channel values.
    ///
    /// Values outside 0-255 map outside 0.0-1.0.
    pub fn from_channels(channels: [i32; 3]) -> Self {
        Self::rgb(
            channels[0] as f32 / 255.0,
            channels[1] as f32 / 255.0,
            channels[2] as f32 / 255.0,
        )
    }

    /// Pack into `0xRRGGBB`, saturating each channel.
    pub fn to_hex(&self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    /// Same color with a different alpha.
    pub fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    /// Convert the RGB channels from sRGB to linear for shading. Alpha is kept.
    pub fn to_linear(&self) -> Self {
        Self::rgba(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
            self.a,
        )
    }

    pub fn to_array(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.077_399_38
    } else {
        (c * 0.947_867_3 + 0.052_132_7).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_unpacks_channels() {
        let c = Color::from_hex(0xff8000);
        assert_eq!(c.r, 1.0);
        assert!((c.g - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.b, 0.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn hex_survives_packing() {
        for hex in [0x000000, 0xffffff, 0x12ab7d, 0x7f7f7d] {
            assert_eq!(Color::from_hex(hex).to_hex(), hex);
        }
    }

    #[test]
    fn out_of_range_channels_are_kept() {
        let c = Color::from_channels([-32, 300, 125]);
        assert!(c.r < 0.0);
        assert!(c.g > 1.0);
        assert_eq!(c.to_hex(), 0x00ff7d);
    }

    #[test]
    fn linear_conversion_endpoints() {
        let black = Color::BLACK.to_linear();
        let white = Color::WHITE.to_linear();
        assert_eq!(black.r, 0.0);
        assert!((white.r - 1.0).abs() < 1e-4);
        assert!(Color::rgb(0.5, 0.5, 0.5).to_linear().r < 0.5);
    }
}
