//! Baseline 8x8 block machinery.
//!
//! - [`dct`]: forward/inverse DCT on a single block, behind [`BlockTransform`].
//! - [`quantization`]: plane-wide tiling, level shift and quantization.

pub mod dct;
pub mod quantization;

pub use dct::{BlockTransform, ReferenceDct, SeparableDct};
pub use quantization::{QuantizationCodec, QuantizationTable};
