use quietpix_image::{Image, ImageError, ImageSize};

use super::haar::{dwt2_haar, idwt2_haar, HaarBands};
use crate::crop::crop_image;

/// Detail bands of one decomposition level.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveletLevel {
    /// Size of the plane analysed at this level, before any odd-size extension.
    pub size: ImageSize,
    /// Low-pass along rows, high-pass along columns.
    pub horizontal: Image<f32, 1>,
    /// High-pass along rows, low-pass along columns.
    pub vertical: Image<f32, 1>,
    /// High-pass in both directions.
    pub diagonal: Image<f32, 1>,
}

impl WaveletLevel {
    /// Mutable access to the three detail bands.
    pub fn details_mut(&mut self) -> [&mut Image<f32, 1>; 3] {
        [
            &mut self.horizontal,
            &mut self.vertical,
            &mut self.diagonal,
        ]
    }
}

/// A multiresolution haar decomposition of a single channel plane.
#[derive(Clone, Debug, PartialEq)]
pub struct WaveletPyramid {
    /// Approximation band at the coarsest level.
    pub approx: Image<f32, 1>,
    /// Detail bands, finest level first.
    pub levels: Vec<WaveletLevel>,
}

/// Decompose a plane into `levels` haar levels.
///
/// # Arguments
///
/// * `src` - The plane to decompose.
/// * `levels` - Number of analysis steps. Zero returns the plane itself as the approximation.
///
/// # Errors
///
/// The plane must contain at least one pixel.
pub fn wavedec2(src: &Image<f32, 1>, levels: usize) -> Result<WaveletPyramid, ImageError> {
    if src.size().is_empty() {
        return Err(ImageError::EmptyImage(src.cols(), src.rows()));
    }

    let mut approx = src.clone();
    let mut details = Vec::with_capacity(levels);

    for _ in 0..levels {
        let size = approx.size();
        let bands = dwt2_haar(&approx)?;
        details.push(WaveletLevel {
            size,
            horizontal: bands.horizontal,
            vertical: bands.vertical,
            diagonal: bands.diagonal,
        });
        approx = bands.approx;
    }

    Ok(WaveletPyramid {
        approx,
        levels: details,
    })
}

/// Reconstruct a plane from its decomposition, the inverse of [`wavedec2`].
///
/// After each synthesis step the result is cropped to the size recorded for that
/// level, so the output always has the exact size of the decomposed plane.
pub fn waverec2(pyramid: WaveletPyramid) -> Result<Image<f32, 1>, ImageError> {
    let WaveletPyramid { approx, levels } = pyramid;

    let mut current = approx;
    for level in levels.into_iter().rev() {
        let bands = HaarBands {
            approx: current,
            horizontal: level.horizontal,
            vertical: level.vertical,
            diagonal: level.diagonal,
        };
        let reconstructed = idwt2_haar(&bands)?;

        if reconstructed.size() == level.size {
            current = reconstructed;
        } else {
            let mut cropped = Image::from_size_val(level.size, 0.0)?;
            crop_image(&reconstructed, &mut cropped, 0, 0)?;
            current = cropped;
        }
    }

    Ok(current)
}
