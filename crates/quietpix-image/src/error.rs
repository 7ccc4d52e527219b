/// An error type for the image module.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ImageError {
    /// Error when channel and shape are not valid.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when two images that must agree in size do not.
    #[error("Image size ({0}x{1}) does not match the expected size ({2}x{3})")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when the channel index is out of bounds.
    #[error("Channel index ({0}) is out of bounds ({1})")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when a pixel value cannot be represented in the target type.
    #[error("Failed to cast image data to {0}")]
    CastError(String),

    /// Error when the kernel size is zero, even or too large.
    #[error("Kernel size ({0}) must be odd, greater than zero and within the supported maximum")]
    InvalidKernelSize(usize),

    /// Error when a crop window does not fit inside the source image.
    #[error("Crop region ({0}, {1}) + {2}x{3} exceeds the source image {4}x{5}")]
    InvalidCropRegion(usize, usize, usize, usize, usize, usize),

    /// Error when an operation needs at least one pixel.
    #[error("Image is empty ({0}x{1})")]
    EmptyImage(usize, usize),
}
