//! Packed ARGB colors and their alpha + luma/chroma decomposition.

/// 8-bit-per-channel color packed as `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PackedColor(pub u32);

impl PackedColor {
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// `[r, g, b, a]`, the order used by interleaved RGBA8 buffers.
    pub const fn to_rgba(self) -> [u8; 4] {
        [self.red(), self.green(), self.blue(), self.alpha()]
    }
}

/// One pixel in the intermediate space: alpha plus luma and two
/// color-difference channels, all nominally in `[0, 255]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AYCbCr {
    pub alpha: f32,
    pub y: f32,
    pub cb: f32,
    pub cr: f32,
}

impl AYCbCr {
    pub const fn new(alpha: f32, y: f32, cb: f32, cr: f32) -> Self {
        Self { alpha, y, cb, cr }
    }
}

/// Per-pixel conversion between packed colors and [`AYCbCr`].
///
/// A round trip may drift by at most one step per 8-bit channel.
pub trait ColorModel: Sync {
    fn to_intermediate(&self, color: PackedColor) -> AYCbCr;
    fn to_packed(&self, sample: AYCbCr) -> PackedColor;
}

/// Full-range BT.601 conversion as used by JFIF.
#[derive(Debug, Clone, Copy, Default)]
pub struct JfifYCbCr;

fn to_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

impl ColorModel for JfifYCbCr {
    fn to_intermediate(&self, color: PackedColor) -> AYCbCr {
        let r = color.red() as f32;
        let g = color.green() as f32;
        let b = color.blue() as f32;

        let y = 0.299 * r + 0.587 * g + 0.114 * b;
        let cb = -0.168736 * r - 0.331264 * g + 0.5 * b + 128.0;
        let cr = 0.5 * r - 0.418688 * g - 0.081312 * b + 128.0;

        AYCbCr::new(color.alpha() as f32, y, cb, cr)
    }

    fn to_packed(&self, sample: AYCbCr) -> PackedColor {
        let cb = sample.cb - 128.0;
        let cr = sample.cr - 128.0;

        let r = sample.y + 1.402 * cr;
        let g = sample.y - 0.344136 * cb - 0.714136 * cr;
        let b = sample.y + 1.772 * cb;

        PackedColor::from_argb(to_channel(sample.alpha), to_channel(r), to_channel(g), to_channel(b))
    }
}
