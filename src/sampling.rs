//! 2x2 chroma subsampling and its nearest-neighbor inverse.
//!
//! `upsample(downsample(p))` keeps the shape of `p` but not its values:
//! every 2x2 block comes back as a solid block holding the block's mean.

use crate::error::CodecError;
use crate::plane::Plane;

/// Halves both dimensions by averaging each 2x2 block.
///
/// Both dimensions must be even and non-zero.
pub fn downsample(plane: &Plane<f32>) -> Result<Plane<f32>, CodecError> {
    let (width, height) = (plane.width(), plane.height());
    if width == 0 || height == 0 || width % 2 != 0 || height % 2 != 0 {
        return Err(CodecError::InvalidSubsamplingDimensions { width, height });
    }

    let mut out = Plane::filled(width / 2, height / 2, 0.0f32);
    for y in (0..height).step_by(2) {
        let top = plane.row(y);
        let bottom = plane.row(y + 1);
        for x in (0..width).step_by(2) {
            let sum = top[x] + bottom[x] + top[x + 1] + bottom[x + 1];
            out.set(x / 2, y / 2, sum / 4.0);
        }
    }
    Ok(out)
}

/// Doubles both dimensions by replicating each cell into a 2x2 block.
pub fn upsample<T: Copy + Default>(plane: &Plane<T>) -> Plane<T> {
    let (width, height) = (plane.width() * 2, plane.height() * 2);
    let mut out = Plane::filled(width, height, T::default());
    for y in 0..height {
        let src = plane.row(y / 2);
        for x in 0..width {
            out.set(x, y, src[x / 2]);
        }
    }
    out
}
