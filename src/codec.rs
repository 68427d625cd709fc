//! The full compress/reconstruct pipeline.
//!
//! Compression: color conversion, padding to whole 8x8 tiles, 2x2 chroma
//! subsampling, then DCT + quantization of Y, Cb and Cr. Reconstruction runs
//! the inverse and crops back to the original size.

use tracing::debug;

use crate::baseline::dct::{BlockTransform, SeparableDct};
use crate::baseline::quantization::QuantizationCodec;
use crate::color::{AYCbCr, ColorModel, JfifYCbCr};
use crate::constants::{
    align_to_block, ALPHA_PADDING, CHROMA_PADDING, LUMA_PADDING, MAX_CHANNEL_VALUE,
};
use crate::error::CodecError;
use crate::image::CompressedImage;
use crate::plane::Plane;
use crate::raster::{check_rows, PixelSink, PixelSource, RasterImage};
use crate::sampling::{downsample, upsample};

/// Transform, quantization table and color model used by one pipeline.
#[derive(Debug, Clone, Default)]
pub struct ImageCodec<T = SeparableDct, C = JfifYCbCr> {
    quantizer: QuantizationCodec<T>,
    color: C,
}

impl ImageCodec {
    /// Separable DCT, standard quality-50 table, JFIF color conversion.
    pub fn new() -> Self {
        Self::default()
    }
}

// Full-resolution planes after color conversion and padding.
pub(crate) struct PaddedPlanes {
    pub alpha: Plane<i32>,
    pub luma: Plane<f32>,
    pub cb: Plane<f32>,
    pub cr: Plane<f32>,
}

pub(crate) fn pad_planes(width: usize, height: usize, sample: impl Fn(usize, usize) -> AYCbCr) -> PaddedPlanes {
    let ext_width = align_to_block(width);
    let ext_height = align_to_block(height);

    let mut planes = PaddedPlanes {
        alpha: Plane::filled(ext_width, ext_height, ALPHA_PADDING),
        luma: Plane::filled(ext_width, ext_height, LUMA_PADDING),
        cb: Plane::filled(ext_width, ext_height, CHROMA_PADDING),
        cr: Plane::filled(ext_width, ext_height, CHROMA_PADDING),
    };
    for y in 0..height {
        for x in 0..width {
            let s = sample(x, y);
            // Truncate, don't round.
            planes.alpha.set(x, y, (s.alpha as i32).clamp(0, MAX_CHANNEL_VALUE));
            planes.luma.set(x, y, s.y);
            planes.cb.set(x, y, s.cb);
            planes.cr.set(x, y, s.cr);
        }
    }
    planes
}

impl<T: BlockTransform, C: ColorModel> ImageCodec<T, C> {
    pub fn with_parts(quantizer: QuantizationCodec<T>, color: C) -> Self {
        Self { quantizer, color }
    }

    pub fn quantizer(&self) -> &QuantizationCodec<T> {
        &self.quantizer
    }

    pub fn color_model(&self) -> &C {
        &self.color
    }

    pub fn compress<S: PixelSource + ?Sized>(&self, source: &S) -> Result<CompressedImage, CodecError> {
        self.compress_with(source.width(), source.height(), |x, y| {
            self.color.to_intermediate(source.pixel(x, y))
        })
    }

    /// Compresses pre-converted samples. All rows must have the same length.
    pub fn compress_samples(&self, rows: &[Vec<AYCbCr>]) -> Result<CompressedImage, CodecError> {
        let width = check_rows(rows)?;
        self.compress_with(width, rows.len(), |x, y| rows[y][x])
    }

    fn compress_with(
        &self,
        width: usize,
        height: usize,
        sample: impl Fn(usize, usize) -> AYCbCr,
    ) -> Result<CompressedImage, CodecError> {
        let planes = pad_planes(width, height, sample);
        debug!(
            width,
            height,
            ext_width = planes.luma.width(),
            ext_height = planes.luma.height(),
            "Compressing image"
        );

        let cb = subsample_chroma(&planes.cb)?;
        let cr = subsample_chroma(&planes.cr)?;

        Ok(CompressedImage {
            width,
            height,
            alpha: planes.alpha,
            y: self.quantizer.compress(&planes.luma)?,
            cb: self.quantizer.compress(&cb)?,
            cr: self.quantizer.compress(&cr)?,
        })
    }

    pub fn reconstruct(&self, image: &CompressedImage) -> Result<RasterImage, CodecError> {
        let mut out = RasterImage::new(image.width(), image.height());
        self.reconstruct_into(image, &mut out)?;
        Ok(out)
    }

    /// Writes the `width × height` reconstruction into `sink`. Nothing is
    /// written unless every plane decompresses.
    pub fn reconstruct_into<S: PixelSink + ?Sized>(&self, image: &CompressedImage, sink: &mut S) -> Result<(), CodecError> {
        let (ext_width, ext_height) = (image.padded_width(), image.padded_height());
        debug!(width = image.width(), height = image.height(), ext_width, ext_height, "Reconstructing image");

        let luma = self.quantizer.decompress(&image.y)?;
        let cb = self.expand_chroma(&image.cb, ext_width, ext_height)?;
        let cr = self.expand_chroma(&image.cr, ext_width, ext_height)?;

        for y in 0..image.height() {
            for x in 0..image.width() {
                let sample = AYCbCr::new(image.alpha.get(x, y) as f32, luma.get(x, y), cb.get(x, y), cr.get(x, y));
                sink.set_pixel(x, y, self.color.to_packed(sample));
            }
        }
        Ok(())
    }

    fn expand_chroma(&self, channel: &Plane<i32>, ext_width: usize, ext_height: usize) -> Result<Plane<f32>, CodecError> {
        let decoded = self.quantizer.decompress(channel)?;
        Ok(upsample(&decoded.resized(ext_width / 2, ext_height / 2, CHROMA_PADDING)))
    }
}

// Half-resolution chroma, extended to whole 8x8 tiles.
fn subsample_chroma(plane: &Plane<f32>) -> Result<Plane<f32>, CodecError> {
    let half = if plane.is_empty() {
        Plane::filled(plane.width() / 2, plane.height() / 2, CHROMA_PADDING)
    } else {
        downsample(plane)?
    };
    Ok(half.resized(align_to_block(half.width()), align_to_block(half.height()), CHROMA_PADDING))
}
