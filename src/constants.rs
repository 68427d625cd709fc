pub const BLOCK_SIZE: usize = 8;
pub const BLOCK_DIM: usize = BLOCK_SIZE * BLOCK_SIZE;

// Samples are re-centered around zero before the forward DCT.
pub const LEVEL_OFFSET: f32 = 128.0;

pub const MAX_CHANNEL_VALUE: i32 = 255;

// Fill levels for cells outside the original image (opaque black).
pub const ALPHA_PADDING: i32 = 255;
pub const LUMA_PADDING: f32 = 16.0;
pub const CHROMA_PADDING: f32 = 128.0;

/// Smallest multiple of [`BLOCK_SIZE`] that is `>= len`.
///
/// A length that is already a multiple of 8 is returned unchanged.
pub const fn align_to_block(len: usize) -> usize {
    len + (BLOCK_SIZE - len % BLOCK_SIZE) % BLOCK_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_to_block() {
        assert_eq!(align_to_block(0), 0);
        assert_eq!(align_to_block(1), 8);
        assert_eq!(align_to_block(7), 8);
        assert_eq!(align_to_block(8), 8);
        assert_eq!(align_to_block(9), 16);
        assert_eq!(align_to_block(100), 104);
    }

    #[test]
    fn test_align_to_block_padding_range() {
        for len in 1..200 {
            let ext = align_to_block(len);
            assert_eq!(ext % BLOCK_SIZE, 0);
            assert!(ext - len <= 7, "len {} padded to {}", len, ext);
        }
    }
}
