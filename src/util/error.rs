//! Error types for whichimg.

use thiserror::Error;

/// Result alias for whichimg operations.
pub type WhichImgResult<T> = std::result::Result<T, WhichImgError>;

/// Errors that can occur while building or querying an image teller.
///
/// A query that matches no known image is not an error; `tell` reports it as
/// `None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WhichImgError {
    /// Width or height is zero or overflows the addressable size.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Only gray (1) and color (3) channel layouts are supported.
    #[error("unsupported channel count: {channels} (expected 1 or 3)")]
    InvalidChannels { channels: usize },
    /// Row stride is shorter than one row of pixels.
    #[error("invalid stride {stride} for row length {row_len}")]
    InvalidStride { row_len: usize, stride: usize },
    /// Backing buffer cannot hold the declared image.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// A teller needs at least two known images.
    #[error("need at least 2 images to build a teller, got {got}")]
    TooFewImages { got: usize },
    /// Two known images of the same shape have identical pixels.
    #[error("images {first} and {second} have the same shape and identical pixels")]
    Indistinguishable { first: usize, second: usize },
    /// An index was outside the valid range.
    #[error("index {index} out of bounds for {context} (len {len})")]
    IndexOutOfBounds {
        index: usize,
        len: usize,
        context: &'static str,
    },
    /// Image decoding or file access failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
