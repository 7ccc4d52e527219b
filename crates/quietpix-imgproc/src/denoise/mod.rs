//! Denoising entry points
//!
//! Maps a method name and a strength onto one of the transforms in [`crate::filter`]
//! and [`crate::wavelet`].

mod error;
pub use error::DenoiseError;

mod method;
pub use method::DenoiseMethod;

mod strength;
pub use strength::{Strength, MIN_KERNEL_SIZE};

use quietpix_image::{Image, ImageError};

/// Denoise an image with the given method and strength.
///
/// Runs exactly one transform and returns a new image with the shape of `src`.
///
/// # Errors
///
/// Returns [`DenoiseError::Transform`] for images without pixels or when the
/// transform fails.
///
/// # Examples
///
/// ```
/// use quietpix_image::{Image, ImageSize};
/// use quietpix_imgproc::denoise::{denoise, DenoiseMethod, Strength};
///
/// let image = Image::<u8, 3>::from_size_val(ImageSize { width: 8, height: 8 }, 128).unwrap();
/// let denoised = denoise(&image, DenoiseMethod::Mean, Strength::DEFAULT).unwrap();
///
/// assert_eq!(denoised, image);
/// ```
pub fn denoise<const C: usize>(
    src: &Image<u8, C>,
    method: DenoiseMethod,
    strength: Strength,
) -> Result<Image<u8, C>, DenoiseError> {
    if src.size().is_empty() {
        return Err(ImageError::EmptyImage(src.cols(), src.rows()).into());
    }

    log::debug!(
        "denoising {}x{} image with {} (strength: {}, kernel: {}, threshold: {})",
        src.cols(),
        src.rows(),
        method,
        strength.value(),
        strength.kernel_size(),
        strength.wavelet_threshold(),
    );

    let mut dst = Image::from_size_val(src.size(), 0u8)?;
    method.apply(src, &mut dst, strength)?;

    Ok(dst)
}

/// Denoise an image given the raw method name and strength value.
///
/// # Errors
///
/// Unknown method names and non-finite strengths are reported as client errors
/// (see [`DenoiseError::is_client_error`]) before any pixel is touched.
pub fn denoise_named<const C: usize>(
    src: &Image<u8, C>,
    method: &str,
    strength: f32,
) -> Result<Image<u8, C>, DenoiseError> {
    let method = method.parse::<DenoiseMethod>()?;
    let strength = Strength::new(strength)?;
    denoise(src, method, strength)
}
