//! In-memory JPEG-style lossy compression core.
//!
//! Pixels are split into alpha and YCbCr planes, padded to whole 8x8 tiles,
//! chroma is subsampled 2x2, and Y/Cb/Cr go through DCT + quantization. No
//! entropy coding or file format is involved.
//!
//! ```
//! use jpegcore_rs::{CompressedImage, PackedColor, RasterImage};
//!
//! let source = RasterImage::from_pixels(4, 3, vec![PackedColor(0xFF80_8080); 12]).unwrap();
//! let compressed = CompressedImage::new(&source).unwrap();
//! let restored = compressed.to_raster().unwrap();
//! assert_eq!(restored.pixels().len(), 12);
//! ```

pub mod baseline;
pub mod codec;
pub mod color;
pub mod constants;
pub mod error;
pub mod image;
pub mod plane;
pub mod raster;
pub mod sampling;

pub use baseline::{BlockTransform, QuantizationCodec, QuantizationTable, ReferenceDct, SeparableDct};
pub use codec::ImageCodec;
pub use color::{AYCbCr, ColorModel, JfifYCbCr, PackedColor};
pub use error::CodecError;
pub use image::{Channel, CompressedImage};
pub use plane::Plane;
pub use raster::{PixelSink, PixelSource, RasterImage};
