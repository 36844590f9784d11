/// Coarse classification of an [`ImageError`].
///
/// Wrappers that need to map failures onto a foreign error taxonomy can match
/// on this instead of every variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input is not a dense numeric array.
    Type,
    /// The input has an unsupported rank or an empty axis.
    Shape,
    /// A numeric parameter is out of its valid domain.
    Value,
}

/// An error type for the image and processing crates.
#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    /// Error when the data length does not match the declared shape.
    #[error("Data length ({0}) does not match the image shape ({1})")]
    InvalidDataLength(usize, usize),

    /// Error when the element count of the declared shape overflows `usize`.
    #[error("Element count of the shape {0:?} overflows usize")]
    ElementCountOverflow(Vec<usize>),

    /// Error when an ndarray shape cannot be built from the data.
    #[error("Invalid shape")]
    InvalidShape(#[from] ndarray::ShapeError),

    /// Error when the array is not rank 2 (H, W) or rank 3 (H, W, C).
    #[error("Image must have rank 2 (H, W) or 3 (H, W, C), got rank {0}")]
    InvalidRank(usize),

    /// Error when one of the axes has zero length.
    #[error("Axis {0} of the image has zero length")]
    EmptyAxis(usize),

    /// Error when a channel index is out of bounds.
    #[error("Channel index {0} is out of bounds for an image with {1} channels")]
    ChannelOutOfBounds(usize, usize),

    /// Error when the number of planes does not match the channel count.
    #[error("Expected {1} planes but got {0}")]
    InvalidPlaneCount(usize, usize),

    /// Error when the source and destination sizes differ.
    #[error("Invalid image size: source ({0}x{1}), destination ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when a filter kernel is empty.
    #[error("Invalid kernel length: kernel_x ({0}), kernel_y ({1})")]
    InvalidKernelLength(usize, usize),

    /// Error when the smoothing sigma is negative.
    #[error("Filter sigma must be non-negative, got {0}")]
    NegativeSigma(f32),

    /// Error when the smoothing sigma is NaN or infinite.
    #[error("Filter sigma must be finite, got {0}")]
    NonFiniteSigma(f32),
}

impl ImageError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImageError::InvalidDataLength(..)
            | ImageError::ElementCountOverflow(_)
            | ImageError::InvalidShape(_) => ErrorKind::Type,
            ImageError::InvalidRank(_)
            | ImageError::EmptyAxis(_)
            | ImageError::ChannelOutOfBounds(..)
            | ImageError::InvalidPlaneCount(..)
            | ImageError::InvalidImageSize(..) => ErrorKind::Shape,
            ImageError::InvalidKernelLength(..)
            | ImageError::NegativeSigma(_)
            | ImageError::NonFiniteSigma(_) => ErrorKind::Value,
        }
    }
}
