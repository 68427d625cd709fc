//! The compressed representation and its channel accessors.

use crate::color::AYCbCr;
use crate::codec::ImageCodec;
use crate::constants::MAX_CHANNEL_VALUE;
use crate::error::CodecError;
use crate::plane::Plane;
use crate::raster::{PixelSource, RasterImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Alpha,
    Luma,
    ChromaBlue,
    ChromaRed,
}

/// An image held as one clamped alpha plane and three planes of quantized
/// DCT coefficients.
///
/// Alpha and Y cover the padded size (`padded_width × padded_height`, both
/// multiples of 8). Cb and Cr hold half-resolution chroma, extended to whole
/// 8x8 tiles, so their accessors take coordinates in that downsampled grid:
/// callers scale full-resolution coordinates by 1/2 themselves.
///
/// All accessors address `[y][x]` and panic when `(x, y)` falls outside the
/// stored plane.
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedImage {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) alpha: Plane<i32>,
    pub(crate) y: Plane<i32>,
    pub(crate) cb: Plane<i32>,
    pub(crate) cr: Plane<i32>,
}

impl CompressedImage {
    /// Compresses `source` with [`ImageCodec::new`].
    pub fn new<S: PixelSource + ?Sized>(source: &S) -> Result<Self, CodecError> {
        ImageCodec::new().compress(source)
    }

    /// Compresses rows of `(alpha, Y, Cb, Cr)` samples with [`ImageCodec::new`].
    pub fn from_samples(rows: &[Vec<AYCbCr>]) -> Result<Self, CodecError> {
        ImageCodec::new().compress_samples(rows)
    }

    /// Reconstructs the original-size raster with [`ImageCodec::new`].
    pub fn to_raster(&self) -> Result<RasterImage, CodecError> {
        ImageCodec::new().reconstruct(self)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn padded_width(&self) -> usize {
        self.y.width()
    }

    pub fn padded_height(&self) -> usize {
        self.y.height()
    }

    pub fn chroma_width(&self) -> usize {
        self.cb.width()
    }

    pub fn chroma_height(&self) -> usize {
        self.cb.height()
    }

    pub fn channel(&self, channel: Channel) -> &Plane<i32> {
        match channel {
            Channel::Alpha => &self.alpha,
            Channel::Luma => &self.y,
            Channel::ChromaBlue => &self.cb,
            Channel::ChromaRed => &self.cr,
        }
    }

    pub fn get_alpha(&self, x: usize, y: usize) -> i32 {
        self.alpha.get(x, y)
    }

    pub fn get_y(&self, x: usize, y: usize) -> i32 {
        self.y.get(x, y)
    }

    pub fn get_cb(&self, x: usize, y: usize) -> i32 {
        self.cb.get(x, y)
    }

    pub fn get_cr(&self, x: usize, y: usize) -> i32 {
        self.cr.get(x, y)
    }

    // Setters clamp into [0, 255] silently.

    pub fn set_alpha(&mut self, x: usize, y: usize, value: i32) {
        self.alpha.set(x, y, clamp_channel(value));
    }

    pub fn set_y(&mut self, x: usize, y: usize, value: i32) {
        self.y.set(x, y, clamp_channel(value));
    }

    pub fn set_cb(&mut self, x: usize, y: usize, value: i32) {
        self.cb.set(x, y, clamp_channel(value));
    }

    pub fn set_cr(&mut self, x: usize, y: usize, value: i32) {
        self.cr.set(x, y, clamp_channel(value));
    }
}

fn clamp_channel(value: i32) -> i32 {
    value.clamp(0, MAX_CHANNEL_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PackedColor;

    fn solid(width: usize, height: usize, color: PackedColor) -> RasterImage {
        RasterImage::from_pixels(width, height, vec![color; width * height]).unwrap()
    }

    #[test]
    fn test_plane_dimensions() {
        let img = CompressedImage::new(&solid(9, 20, PackedColor(0xFF10_2030))).unwrap();
        assert_eq!((img.width(), img.height()), (9, 20));
        assert_eq!((img.padded_width(), img.padded_height()), (16, 24));
        assert_eq!((img.chroma_width(), img.chroma_height()), (8, 16));
        assert_eq!(img.channel(Channel::Alpha).width(), 16);
        assert_eq!(img.channel(Channel::ChromaRed).height(), 16);
    }

    #[test]
    fn test_setters_clamp() {
        let mut img = CompressedImage::new(&solid(16, 16, PackedColor(0xFF80_8080))).unwrap();
        for value in [-1000, -1, 0, 17, 255, 256, 9000] {
            let expected = value.clamp(0, 255);
            img.set_alpha(3, 4, value);
            img.set_y(15, 15, value);
            img.set_cb(7, 7, value);
            img.set_cr(0, 0, value);
            assert_eq!(img.get_alpha(3, 4), expected);
            assert_eq!(img.get_y(15, 15), expected);
            assert_eq!(img.get_cb(7, 7), expected);
            assert_eq!(img.get_cr(0, 0), expected);
        }
    }

    #[test]
    fn test_alpha_is_stored_directly() {
        let img = CompressedImage::new(&solid(2, 2, PackedColor::from_argb(77, 1, 2, 3))).unwrap();
        assert_eq!(img.get_alpha(1, 1), 77);
        assert_eq!(img.get_alpha(2, 0), 255);
        assert_eq!(img.get_alpha(7, 7), 255);
    }

    #[test]
    #[should_panic]
    fn test_chroma_accessor_uses_downsampled_grid() {
        let img = CompressedImage::new(&solid(16, 16, PackedColor(0))).unwrap();
        img.get_cb(8, 0);
    }

    #[test]
    #[should_panic]
    fn test_luma_accessor_out_of_bounds() {
        let img = CompressedImage::new(&solid(8, 8, PackedColor(0))).unwrap();
        img.get_y(0, 8);
    }
}
