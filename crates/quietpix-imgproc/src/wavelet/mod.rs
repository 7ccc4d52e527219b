//! Wavelet shrinkage
//!
//! A plain orthonormal haar transform, its multi-level decomposition and the
//! soft-thresholding denoiser built on top of them.

mod haar;
pub use haar::*;

mod pyramid;
pub use pyramid::*;

use quietpix_image::{Image, ImageError};
use rayon::prelude::*;

/// Number of decomposition levels used by [`wavelet_denoise`] callers by default.
pub const DEFAULT_WAVELET_LEVELS: usize = 2;

/// Shrink `value` towards zero by `threshold`, clamping at zero.
///
/// `sign(value) * max(|value| - threshold, 0)`
///
/// # Examples
///
/// ```
/// use quietpix_imgproc::wavelet::soft_threshold;
///
/// assert_eq!(soft_threshold(10.0, 4.0), 6.0);
/// assert_eq!(soft_threshold(-10.0, 4.0), -6.0);
/// assert_eq!(soft_threshold(3.0, 4.0), 0.0);
/// ```
#[inline]
pub fn soft_threshold(value: f32, threshold: f32) -> f32 {
    let magnitude = (value.abs() - threshold).max(0.0);
    if magnitude == 0.0 {
        0.0
    } else {
        value.signum() * magnitude
    }
}

impl WaveletPyramid {
    /// Soft-threshold every detail coefficient of every level.
    ///
    /// The coarsest approximation is left untouched.
    pub fn shrink_details(&mut self, threshold: f32) {
        for level in self.levels.iter_mut() {
            for band in level.details_mut() {
                band.as_slice_mut()
                    .iter_mut()
                    .for_each(|v| *v = soft_threshold(*v, threshold));
            }
        }
    }
}

/// Denoise a single plane by shrinking its haar detail coefficients.
///
/// The output has the size of `src`.
pub fn wavelet_shrink_plane(
    src: &Image<f32, 1>,
    threshold: f32,
    levels: usize,
) -> Result<Image<f32, 1>, ImageError> {
    let mut pyramid = wavedec2(src, levels)?;
    pyramid.shrink_details(threshold);
    waverec2(pyramid)
}

/// Denoise an image with wavelet soft-thresholding.
///
/// Every channel is decomposed into `levels` haar levels, the detail bands are
/// soft-thresholded with `threshold`, and the channel is reconstructed and cropped
/// back to the source size. The channels are processed in parallel and everything
/// runs in `f32` until the final rounding and clamping to `[0, 255]`.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `threshold` - The shrinkage applied to the detail coefficients.
/// * `levels` - The number of decomposition levels.
///
/// # Examples
///
/// ```
/// use quietpix_image::{Image, ImageSize};
/// use quietpix_imgproc::wavelet::{wavelet_denoise, DEFAULT_WAVELET_LEVELS};
///
/// let size = ImageSize { width: 5, height: 3 };
/// let image = Image::<u8, 3>::from_size_val(size, 77).unwrap();
/// let mut denoised = Image::<u8, 3>::from_size_val(size, 0).unwrap();
///
/// wavelet_denoise(&image, &mut denoised, 14.0, DEFAULT_WAVELET_LEVELS).unwrap();
///
/// assert_eq!(denoised, image);
/// ```
pub fn wavelet_denoise<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    threshold: f32,
    levels: usize,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            dst.cols(),
            dst.rows(),
            src.cols(),
            src.rows(),
        ));
    }

    let planes = src.cast::<f32>()?.split_channels()?;

    let planes = planes
        .into_par_iter()
        .map(|plane| wavelet_shrink_plane(&plane, threshold, levels))
        .collect::<Result<Vec<_>, ImageError>>()?;

    let planes: [Image<f32, 1>; C] = planes
        .try_into()
        .map_err(|planes: Vec<_>| ImageError::ChannelIndexOutOfBounds(planes.len(), C))?;
    let merged = Image::<f32, C>::from_channels(&planes)?;

    dst.as_slice_mut()
        .iter_mut()
        .zip(merged.as_slice())
        .for_each(|(out, &val)| *out = val.round().clamp(0.0, 255.0) as u8);

    Ok(())
}
