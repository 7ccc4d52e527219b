use std::str::FromStr;

use quietpix_image::{Image, ImageError};

use super::{DenoiseError, Strength};
use crate::{filter, wavelet};

/// The closed set of denoising transforms.
///
/// Method names are matched case-insensitively; anything else is rejected with
/// [`DenoiseError::UnknownMethod`] instead of falling back to a default.
///
/// # Examples
///
/// ```
/// use quietpix_imgproc::denoise::DenoiseMethod;
///
/// assert_eq!("Wavelet".parse::<DenoiseMethod>().unwrap(), DenoiseMethod::Wavelet);
/// assert!("bogus".parse::<DenoiseMethod>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DenoiseMethod {
    /// Box filter, the unweighted mean of the neighborhood.
    Mean,
    /// Per channel median of the neighborhood.
    Median,
    /// Haar wavelet soft-thresholding.
    Wavelet,
    /// Slot for a learned denoiser. Runs the median filter for now.
    #[default]
    Cdae,
}

impl DenoiseMethod {
    /// Every supported method.
    pub const ALL: [DenoiseMethod; 4] = [
        DenoiseMethod::Mean,
        DenoiseMethod::Median,
        DenoiseMethod::Wavelet,
        DenoiseMethod::Cdae,
    ];

    /// The canonical lowercase name of the method.
    pub fn name(&self) -> &'static str {
        match self {
            DenoiseMethod::Mean => "mean",
            DenoiseMethod::Median => "median",
            DenoiseMethod::Wavelet => "wavelet",
            DenoiseMethod::Cdae => "cdae",
        }
    }

    /// Run the transform of this method from `src` into `dst`.
    ///
    /// PRECONDITION: `src` and `dst` must have the same shape.
    pub fn apply<const C: usize>(
        &self,
        src: &Image<u8, C>,
        dst: &mut Image<u8, C>,
        strength: Strength,
    ) -> Result<(), ImageError> {
        match self {
            DenoiseMethod::Mean => denoise_mean(src, dst, strength),
            DenoiseMethod::Median => denoise_median(src, dst, strength),
            DenoiseMethod::Wavelet => denoise_wavelet(src, dst, strength),
            DenoiseMethod::Cdae => denoise_cdae(src, dst, strength),
        }
    }
}

impl std::fmt::Display for DenoiseMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DenoiseMethod {
    type Err = DenoiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        DenoiseMethod::ALL
            .into_iter()
            .find(|method| method.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| DenoiseError::UnknownMethod(s.to_string()))
    }
}

fn denoise_mean<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    strength: Strength,
) -> Result<(), ImageError> {
    let k = strength.kernel_size();
    filter::box_blur(src, dst, (k, k))
}

fn denoise_median<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    strength: Strength,
) -> Result<(), ImageError> {
    filter::median_blur(src, dst, strength.kernel_size())
}

fn denoise_wavelet<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    strength: Strength,
) -> Result<(), ImageError> {
    wavelet::wavelet_denoise(
        src,
        dst,
        strength.wavelet_threshold(),
        wavelet::DEFAULT_WAVELET_LEVELS,
    )
}

// TODO: run the convolutional denoising autoencoder here once a model runtime is picked.
fn denoise_cdae<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    strength: Strength,
) -> Result<(), ImageError> {
    denoise_median(src, dst, strength)
}
