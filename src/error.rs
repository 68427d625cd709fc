use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecError {
    #[error("Inconsistent row length: row {row} has {found} samples, expected {expected}")]
    InconsistentRowLength {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Invalid subsampling dimensions {width}x{height}: both must be even and non-zero")]
    InvalidSubsamplingDimensions { width: usize, height: usize },
    #[error("Unaligned plane dimensions {width}x{height}: both must be multiples of 8")]
    UnalignedPlaneDimensions { width: usize, height: usize },
    #[error("Invalid argument size: expected {expected} samples, got {actual}")]
    InvalidArgumentSize { expected: usize, actual: usize },
}
