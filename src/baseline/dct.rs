//! Discrete Cosine Transform (DCT) on 8x8 blocks.
//!
//! Two implementations of the same type-II/type-III pair are provided:
//! [`ReferenceDct`] evaluates the defining double sum directly, while
//! [`SeparableDct`] precomputes the cosine basis and runs row/column passes.

use std::f32::consts::PI;

use crate::constants::{BLOCK_DIM, BLOCK_SIZE};

/// An 8x8 block stored row-major: `block[row * 8 + col]`.
pub type Block = [f32; BLOCK_DIM];

/// Forward and inverse 2-D frequency transform on an 8x8 block.
///
/// Implementations must satisfy `inverse(forward(x)) ≈ x` within
/// floating-point tolerance.
pub trait BlockTransform: Sync {
    fn forward(&self, input: &Block, output: &mut Block);
    fn inverse(&self, input: &Block, output: &mut Block);
}

fn scale(k: usize) -> f32 {
    if k == 0 { 1.0 / 2.0f32.sqrt() } else { 1.0 }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceDct;

impl BlockTransform for ReferenceDct {
    fn forward(&self, input: &Block, output: &mut Block) {
        for u in 0..BLOCK_SIZE {
            for v in 0..BLOCK_SIZE {
                let mut sum = 0.0f32;
                for x in 0..BLOCK_SIZE {
                    for y in 0..BLOCK_SIZE {
                        let cos_x = (((2 * x + 1) * u) as f32 * PI) / 16.0;
                        let cos_y = (((2 * y + 1) * v) as f32 * PI) / 16.0;
                        sum += input[x * BLOCK_SIZE + y] * cos_x.cos() * cos_y.cos();
                    }
                }
                output[u * BLOCK_SIZE + v] = 0.25 * scale(u) * scale(v) * sum;
            }
        }
    }

    fn inverse(&self, input: &Block, output: &mut Block) {
        for x in 0..BLOCK_SIZE {
            for y in 0..BLOCK_SIZE {
                let mut sum = 0.0f32;
                for u in 0..BLOCK_SIZE {
                    for v in 0..BLOCK_SIZE {
                        let cos_x = (((2 * x + 1) * u) as f32 * PI) / 16.0;
                        let cos_y = (((2 * y + 1) * v) as f32 * PI) / 16.0;
                        sum += scale(u) * scale(v) * input[u * BLOCK_SIZE + v] * cos_x.cos() * cos_y.cos();
                    }
                }
                output[x * BLOCK_SIZE + y] = 0.25 * sum;
            }
        }
    }
}

/// Row/column DCT over a precomputed orthonormal basis.
#[derive(Debug, Clone)]
pub struct SeparableDct {
    // basis[u * 8 + x] = c(u) * cos((2x + 1) * u * pi / 16)
    basis: Block,
}

impl SeparableDct {
    pub fn new() -> Self {
        let mut basis = [0.0f32; BLOCK_DIM];
        for u in 0..BLOCK_SIZE {
            let c = if u == 0 { (1.0f32 / 8.0).sqrt() } else { 0.5 };
            for x in 0..BLOCK_SIZE {
                let angle = (((2 * x + 1) * u) as f64 * std::f64::consts::PI) / 16.0;
                basis[u * BLOCK_SIZE + x] = c * angle.cos() as f32;
            }
        }
        Self { basis }
    }
}

impl Default for SeparableDct {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockTransform for SeparableDct {
    fn forward(&self, input: &Block, output: &mut Block) {
        let b = &self.basis;
        // Columns first: tmp[u][y] = sum_x basis[u][x] * input[x][y]
        let mut tmp = [0.0f32; BLOCK_DIM];
        for u in 0..BLOCK_SIZE {
            for y in 0..BLOCK_SIZE {
                let mut sum = 0.0f32;
                for x in 0..BLOCK_SIZE {
                    sum += b[u * BLOCK_SIZE + x] * input[x * BLOCK_SIZE + y];
                }
                tmp[u * BLOCK_SIZE + y] = sum;
            }
        }
        for u in 0..BLOCK_SIZE {
            for v in 0..BLOCK_SIZE {
                let mut sum = 0.0f32;
                for y in 0..BLOCK_SIZE {
                    sum += tmp[u * BLOCK_SIZE + y] * b[v * BLOCK_SIZE + y];
                }
                output[u * BLOCK_SIZE + v] = sum;
            }
        }
    }

    fn inverse(&self, input: &Block, output: &mut Block) {
        let b = &self.basis;
        // tmp[x][v] = sum_u basis[u][x] * input[u][v]
        let mut tmp = [0.0f32; BLOCK_DIM];
        for x in 0..BLOCK_SIZE {
            for v in 0..BLOCK_SIZE {
                let mut sum = 0.0f32;
                for u in 0..BLOCK_SIZE {
                    sum += b[u * BLOCK_SIZE + x] * input[u * BLOCK_SIZE + v];
                }
                tmp[x * BLOCK_SIZE + v] = sum;
            }
        }
        for x in 0..BLOCK_SIZE {
            for y in 0..BLOCK_SIZE {
                let mut sum = 0.0f32;
                for v in 0..BLOCK_SIZE {
                    sum += tmp[x * BLOCK_SIZE + v] * b[v * BLOCK_SIZE + y];
                }
                output[x * BLOCK_SIZE + y] = sum;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample_block() -> Block {
        let mut block = [0.0f32; BLOCK_DIM];
        for i in 0..BLOCK_DIM {
            let (row, col) = (i / BLOCK_SIZE, i % BLOCK_SIZE);
            block[i] = (row * 17 + col * 29) as f32 % 255.0 - 128.0;
        }
        block
    }

    #[test]
    fn test_fdct_idct_dc_only() {
        let input = [-128.0f32; 64];
        let mut dct_coeffs = [0.0f32; 64];
        ReferenceDct.forward(&input, &mut dct_coeffs);

        let mut output = [0.0f32; 64];
        ReferenceDct.inverse(&dct_coeffs, &mut output);

        for i in 0..64 {
            assert!((input[i] - output[i]).abs() < 0.1, "Mismatch at {}: {} vs {}", i, input[i], output[i]);
        }
    }

    #[test]
    fn test_flat_block_has_single_dc_coefficient() {
        let input = [10.0f32; 64];
        let mut coeffs = [0.0f32; 64];
        SeparableDct::new().forward(&input, &mut coeffs);

        assert_abs_diff_eq!(coeffs[0], 80.0, epsilon = 1e-3);
        for &c in &coeffs[1..] {
            assert_abs_diff_eq!(c, 0.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_zero_block_stays_zero() {
        let input = [0.0f32; 64];
        let mut coeffs = [1.0f32; 64];
        SeparableDct::new().forward(&input, &mut coeffs);
        assert!(coeffs.iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_separable_round_trip() {
        let dct = SeparableDct::new();
        let input = sample_block();
        let mut coeffs = [0.0f32; 64];
        let mut output = [0.0f32; 64];
        dct.forward(&input, &mut coeffs);
        dct.inverse(&coeffs, &mut output);

        for i in 0..64 {
            assert_abs_diff_eq!(input[i], output[i], epsilon = 1e-2);
        }
    }

    #[test]
    fn test_separable_matches_reference() {
        let separable = SeparableDct::new();
        let input = sample_block();

        let mut expected = [0.0f32; 64];
        let mut actual = [0.0f32; 64];
        ReferenceDct.forward(&input, &mut expected);
        separable.forward(&input, &mut actual);
        for i in 0..64 {
            assert_abs_diff_eq!(expected[i], actual[i], epsilon = 1e-2);
        }

        ReferenceDct.inverse(&expected, &mut actual);
        let mut separable_inverse = [0.0f32; 64];
        separable.inverse(&expected, &mut separable_inverse);
        for i in 0..64 {
            assert_abs_diff_eq!(actual[i], separable_inverse[i], epsilon = 1e-2);
        }
    }
}
