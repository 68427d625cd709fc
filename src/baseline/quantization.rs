//! Quantization of DCT coefficients over whole planes.
//!
//! A plane is cut into independent 8x8 tiles. Each tile is level-shifted,
//! transformed, divided by the quantization table and rounded; decompression
//! runs the same steps backwards. Rounding makes the round trip lossy.

use tracing::trace;

use crate::baseline::dct::{Block, BlockTransform, SeparableDct};
use crate::constants::{BLOCK_DIM, BLOCK_SIZE, LEVEL_OFFSET};
use crate::error::CodecError;
use crate::plane::Plane;

/// Standard JPEG luminance quantization table (Quality 50).
pub const STD_LUMINANCE_QUANT_TABLE: [u8; BLOCK_DIM] = [
    16, 11, 10, 16, 24, 40, 51, 61,
    12, 12, 14, 19, 26, 58, 60, 55,
    14, 13, 16, 24, 40, 57, 69, 56,
    14, 17, 22, 29, 51, 87, 80, 62,
    18, 22, 37, 56, 68, 109, 103, 77,
    24, 35, 55, 64, 81, 104, 113, 92,
    49, 64, 78, 87, 103, 121, 120, 101,
    72, 92, 95, 98, 112, 100, 103, 99,
];

/// Immutable 8x8 divisor table, row-major. Entries are never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantizationTable([u8; BLOCK_DIM]);

impl QuantizationTable {
    /// Returns `None` if any entry is zero.
    pub fn new(values: [u8; BLOCK_DIM]) -> Option<Self> {
        if values.contains(&0) {
            return None;
        }
        Some(Self(values))
    }

    pub fn values(&self) -> &[u8; BLOCK_DIM] {
        &self.0
    }
}

impl Default for QuantizationTable {
    fn default() -> Self {
        Self(STD_LUMINANCE_QUANT_TABLE)
    }
}

/// Quantizes DCT coefficients using a quantization table.
pub fn quantize_block(dct_block: &Block, quant_table: &QuantizationTable, output: &mut [i32; BLOCK_DIM]) {
    for i in 0..BLOCK_DIM {
        let q_val = quant_table.0[i] as f32;
        output[i] = (dct_block[i] / q_val).round() as i32;
    }
}

/// De-quantizes DCT coefficients.
pub fn dequantize_block(quant_block: &[i32; BLOCK_DIM], quant_table: &QuantizationTable, output: &mut Block) {
    for i in 0..BLOCK_DIM {
        let q_val = quant_table.0[i] as f32;
        output[i] = quant_block[i] as f32 * q_val;
    }
}

/// Plane-level DCT + quantization with an injected transform and table.
#[derive(Debug, Clone, Default)]
pub struct QuantizationCodec<T = SeparableDct> {
    table: QuantizationTable,
    transform: T,
}

impl<T: BlockTransform> QuantizationCodec<T> {
    pub fn new(table: QuantizationTable, transform: T) -> Self {
        Self { table, transform }
    }

    pub fn table(&self) -> &QuantizationTable {
        &self.table
    }

    pub fn transform(&self) -> &T {
        &self.transform
    }

    /// Level-shifts, transforms and quantizes every 8x8 tile of `plane`.
    ///
    /// Both dimensions must be multiples of 8.
    pub fn compress(&self, plane: &Plane<f32>) -> Result<Plane<i32>, CodecError> {
        let (width, height) = (plane.width(), plane.height());
        check_alignment(width, height)?;
        trace!(width, height, "quantization::compress");

        let mut out = Plane::filled(width, height, 0i32);
        if plane.is_empty() {
            return Ok(out);
        }

        let src = plane.as_slice();
        for_each_block_row(out.as_mut_slice(), BLOCK_SIZE * width, |block_row, dst| {
            let base = block_row * BLOCK_SIZE * width;
            let mut block = [0.0f32; BLOCK_DIM];
            let mut coeffs = [0.0f32; BLOCK_DIM];
            let mut quantized = [0i32; BLOCK_DIM];
            for bx in (0..width).step_by(BLOCK_SIZE) {
                for i in 0..BLOCK_SIZE {
                    let row = base + i * width + bx;
                    for j in 0..BLOCK_SIZE {
                        block[i * BLOCK_SIZE + j] = src[row + j] - LEVEL_OFFSET;
                    }
                }
                self.transform.forward(&block, &mut coeffs);
                quantize_block(&coeffs, &self.table, &mut quantized);
                for i in 0..BLOCK_SIZE {
                    let row = i * width + bx;
                    dst[row..row + BLOCK_SIZE].copy_from_slice(&quantized[i * BLOCK_SIZE..(i + 1) * BLOCK_SIZE]);
                }
            }
        });
        Ok(out)
    }

    /// Dequantizes, inverse-transforms and level-shifts every 8x8 tile.
    pub fn decompress(&self, channel: &Plane<i32>) -> Result<Plane<f32>, CodecError> {
        let (width, height) = (channel.width(), channel.height());
        check_alignment(width, height)?;
        trace!(width, height, "quantization::decompress");

        let mut out = Plane::filled(width, height, 0.0f32);
        if channel.is_empty() {
            return Ok(out);
        }

        let src = channel.as_slice();
        for_each_block_row(out.as_mut_slice(), BLOCK_SIZE * width, |block_row, dst| {
            let base = block_row * BLOCK_SIZE * width;
            let mut quantized = [0i32; BLOCK_DIM];
            let mut coeffs = [0.0f32; BLOCK_DIM];
            let mut block = [0.0f32; BLOCK_DIM];
            for bx in (0..width).step_by(BLOCK_SIZE) {
                for i in 0..BLOCK_SIZE {
                    let row = base + i * width + bx;
                    quantized[i * BLOCK_SIZE..(i + 1) * BLOCK_SIZE].copy_from_slice(&src[row..row + BLOCK_SIZE]);
                }
                dequantize_block(&quantized, &self.table, &mut coeffs);
                self.transform.inverse(&coeffs, &mut block);
                for i in 0..BLOCK_SIZE {
                    let row = i * width + bx;
                    for j in 0..BLOCK_SIZE {
                        dst[row + j] = block[i * BLOCK_SIZE + j] + LEVEL_OFFSET;
                    }
                }
            }
        });
        Ok(out)
    }
}

fn check_alignment(width: usize, height: usize) -> Result<(), CodecError> {
    if width % BLOCK_SIZE != 0 || height % BLOCK_SIZE != 0 {
        return Err(CodecError::UnalignedPlaneDimensions { width, height });
    }
    Ok(())
}

// Each chunk covers one row of 8x8 tiles; tiles never straddle chunks.
#[cfg(feature = "parallel")]
fn for_each_block_row<U, F>(data: &mut [U], chunk_len: usize, f: F)
where
    U: Send,
    F: Fn(usize, &mut [U]) + Sync + Send,
{
    use rayon::prelude::*;
    data.par_chunks_mut(chunk_len)
        .enumerate()
        .for_each(|(block_row, chunk)| f(block_row, chunk));
}

#[cfg(not(feature = "parallel"))]
fn for_each_block_row<U, F>(data: &mut [U], chunk_len: usize, f: F)
where
    F: Fn(usize, &mut [U]),
{
    data.chunks_mut(chunk_len)
        .enumerate()
        .for_each(|(block_row, chunk)| f(block_row, chunk));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::dct::ReferenceDct;

    fn tile_plane(f: impl Fn(usize, usize) -> f32) -> Plane<f32> {
        let mut plane = Plane::filled(8, 8, 0.0f32);
        for y in 0..8 {
            for x in 0..8 {
                plane.set(x, y, f(x, y));
            }
        }
        plane
    }

    fn max_error(codec: &QuantizationCodec<impl BlockTransform>, plane: &Plane<f32>) -> f32 {
        let restored = codec.decompress(&codec.compress(plane).unwrap()).unwrap();
        plane
            .as_slice()
            .iter()
            .zip(restored.as_slice())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }

    #[test]
    fn test_quantize_dequantize_block() {
        let table = QuantizationTable::default();
        let mut coeffs = [0.0f32; BLOCK_DIM];
        coeffs[0] = -410.0;
        coeffs[1] = 17.0;
        coeffs[63] = 40.0;
        let mut quantized = [0i32; BLOCK_DIM];
        quantize_block(&coeffs, &table, &mut quantized);
        assert_eq!(quantized[0], -26);
        assert_eq!(quantized[1], 2);
        assert_eq!(quantized[63], 0);

        let mut restored = [0.0f32; BLOCK_DIM];
        dequantize_block(&quantized, &table, &mut restored);
        assert_eq!(restored[0], -416.0);
        assert_eq!(restored[1], 22.0);
    }

    #[test]
    fn test_table_rejects_zero_entries() {
        let mut values = STD_LUMINANCE_QUANT_TABLE;
        values[10] = 0;
        assert!(QuantizationTable::new(values).is_none());
        assert!(QuantizationTable::new(STD_LUMINANCE_QUANT_TABLE).is_some());
    }

    #[test]
    fn test_mid_gray_tile_compresses_to_zero() {
        let codec = QuantizationCodec::<SeparableDct>::default();
        let plane = Plane::filled(16, 8, 128.0f32);
        let coeffs = codec.compress(&plane).unwrap();
        assert!(coeffs.as_slice().iter().all(|&c| c == 0));

        let restored = codec.decompress(&coeffs).unwrap();
        assert!(restored.as_slice().iter().all(|&v| v == 128.0));
    }

    #[test]
    fn test_round_trip_error_is_bounded() {
        let codec = QuantizationCodec::<SeparableDct>::default();
        let tiles = [
            tile_plane(|x, y| (16 * y + 8 * x) as f32),
            tile_plane(|x, y| 128.0 + 60.0 * (y as f32 / 3.0).sin() * (x as f32 / 4.0).cos()),
            tile_plane(|x, y| ((x * y * 4) % 256) as f32),
            tile_plane(|_, y| if y < 4 { 200.0 } else { 40.0 }),
            tile_plane(|_, _| 77.0),
        ];
        for tile in &tiles {
            let err = max_error(&codec, tile);
            assert!(err <= 20.0, "reconstruction error {} exceeds bound", err);
        }
    }

    #[test]
    fn test_tiles_are_independent() {
        let codec = QuantizationCodec::<SeparableDct>::default();
        let mut plane = Plane::filled(16, 16, 128.0f32);
        for y in 0..8 {
            for x in 0..8 {
                plane.set(x, y, (x * 30) as f32);
            }
        }
        let coeffs = codec.compress(&plane).unwrap();
        for y in 0..16 {
            for x in 0..16 {
                if x >= 8 || y >= 8 {
                    assert_eq!(coeffs.get(x, y), 0, "tile leak at ({}, {})", x, y);
                }
            }
        }
        assert_ne!(coeffs.get(0, 0), 0);
    }

    #[test]
    fn test_reference_and_separable_codecs_agree() {
        let reference = QuantizationCodec::new(QuantizationTable::default(), ReferenceDct);
        let separable = QuantizationCodec::<SeparableDct>::default();
        let plane = tile_plane(|x, y| (x * 20 + y * 9) as f32);
        let a = reference.decompress(&reference.compress(&plane).unwrap()).unwrap();
        let b = separable.decompress(&separable.compress(&plane).unwrap()).unwrap();
        for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
            assert!((x - y).abs() < 1e-2, "{} vs {}", x, y);
        }
    }

    #[test]
    fn test_unaligned_planes_are_rejected() {
        let codec = QuantizationCodec::<SeparableDct>::default();
        assert_eq!(
            codec.compress(&Plane::filled(12, 8, 0.0f32)),
            Err(CodecError::UnalignedPlaneDimensions { width: 12, height: 8 })
        );
        assert!(codec.decompress(&Plane::filled(8, 4, 0i32)).is_err());
    }

    #[test]
    fn test_empty_plane_passes_through() {
        let codec = QuantizationCodec::<SeparableDct>::default();
        let out = codec.compress(&Plane::filled(0, 8, 0.0f32)).unwrap();
        assert!(out.is_empty());
        assert_eq!(out.height(), 8);
    }
}
