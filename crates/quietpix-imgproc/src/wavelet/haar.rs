use quietpix_image::{Image, ImageError, ImageSize};

/// The four sub-bands produced by one analysis step of the 2d haar transform.
///
/// All bands share the same size, `ceil(H / 2) × ceil(W / 2)` of the analysed plane.
#[derive(Clone, Debug, PartialEq)]
pub struct HaarBands {
    /// Low-pass in both directions.
    pub approx: Image<f32, 1>,
    /// Low-pass along rows, high-pass along columns.
    pub horizontal: Image<f32, 1>,
    /// High-pass along rows, low-pass along columns.
    pub vertical: Image<f32, 1>,
    /// High-pass in both directions.
    pub diagonal: Image<f32, 1>,
}

impl HaarBands {
    /// Size shared by the four bands.
    pub fn size(&self) -> ImageSize {
        self.approx.size()
    }
}

/// One level of the orthonormal 2d haar analysis.
///
/// Each output coefficient is computed from a 2x2 block `[[a, b], [c, d]]` of the
/// input. A plane with an odd number of rows or columns is extended by repeating
/// its last row or column, which is the symmetric extension of a two tap filter.
///
/// # Errors
///
/// The plane must contain at least one pixel.
pub fn dwt2_haar(src: &Image<f32, 1>) -> Result<HaarBands, ImageError> {
    let (rows, cols) = (src.rows(), src.cols());
    if src.size().is_empty() {
        return Err(ImageError::EmptyImage(cols, rows));
    }

    let band_size = ImageSize {
        width: cols.div_ceil(2),
        height: rows.div_ceil(2),
    };

    let mut approx = Vec::with_capacity(band_size.area());
    let mut horizontal = Vec::with_capacity(band_size.area());
    let mut vertical = Vec::with_capacity(band_size.area());
    let mut diagonal = Vec::with_capacity(band_size.area());

    let data = src.as_slice();
    for i in 0..band_size.height {
        let r0 = 2 * i;
        let r1 = (r0 + 1).min(rows - 1);
        for j in 0..band_size.width {
            let c0 = 2 * j;
            let c1 = (c0 + 1).min(cols - 1);

            let a = data[r0 * cols + c0];
            let b = data[r0 * cols + c1];
            let c = data[r1 * cols + c0];
            let d = data[r1 * cols + c1];

            approx.push(0.5 * (a + b + c + d));
            horizontal.push(0.5 * (a + b - c - d));
            vertical.push(0.5 * (a - b + c - d));
            diagonal.push(0.5 * (a - b - c + d));
        }
    }

    Ok(HaarBands {
        approx: Image::new(band_size, approx)?,
        horizontal: Image::new(band_size, horizontal)?,
        vertical: Image::new(band_size, vertical)?,
        diagonal: Image::new(band_size, diagonal)?,
    })
}

/// One level of the orthonormal 2d haar synthesis, the inverse of [`dwt2_haar`].
///
/// The reconstructed plane is always `2·h × 2·w` for bands of size `h × w`; callers
/// crop it back when the analysed plane had odd dimensions.
///
/// # Errors
///
/// The four bands must share the same size.
pub fn idwt2_haar(bands: &HaarBands) -> Result<Image<f32, 1>, ImageError> {
    let band_size = bands.size();
    for band in [&bands.horizontal, &bands.vertical, &bands.diagonal] {
        if band.size() != band_size {
            return Err(ImageError::InvalidImageSize(
                band.cols(),
                band.rows(),
                band_size.width,
                band_size.height,
            ));
        }
    }

    let out_size = ImageSize {
        width: 2 * band_size.width,
        height: 2 * band_size.height,
    };
    let mut dst = Image::<f32, 1>::from_size_val(out_size, 0.0)?;
    let out_cols = out_size.width;

    let approx = bands.approx.as_slice();
    let horizontal = bands.horizontal.as_slice();
    let vertical = bands.vertical.as_slice();
    let diagonal = bands.diagonal.as_slice();

    let out = dst.as_slice_mut();
    for i in 0..band_size.height {
        for j in 0..band_size.width {
            let idx = i * band_size.width + j;
            let (ll, lh, hl, hh) = (approx[idx], horizontal[idx], vertical[idx], diagonal[idx]);

            let top = 2 * i * out_cols + 2 * j;
            let bottom = top + out_cols;
            out[top] = 0.5 * (ll + lh + hl + hh);
            out[top + 1] = 0.5 * (ll + lh - hl - hh);
            out[bottom] = 0.5 * (ll - lh + hl - hh);
            out[bottom + 1] = 0.5 * (ll - lh - hl + hh);
        }
    }

    Ok(dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dwt2_haar_block() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let plane = Image::<f32, 1>::new(
            ImageSize { width: 2, height: 2 },
            vec![
                1.0, 2.0,
                3.0, 4.0,
            ],
        )?;

        let bands = dwt2_haar(&plane)?;

        assert_eq!(bands.approx.as_slice(), &[5.0]);
        assert_eq!(bands.horizontal.as_slice(), &[-2.0]);
        assert_eq!(bands.vertical.as_slice(), &[-1.0]);
        assert_eq!(bands.diagonal.as_slice(), &[0.0]);

        let rec = idwt2_haar(&bands)?;
        assert_eq!(rec, plane);

        Ok(())
    }

    #[test]
    fn test_dwt2_haar_preserves_energy() -> Result<(), ImageError> {
        let plane = Image::<f32, 1>::new(
            ImageSize {
                width: 4,
                height: 4,
            },
            (0..16).map(|x| ((x * 7) % 5) as f32 - 2.0).collect(),
        )?;

        let bands = dwt2_haar(&plane)?;

        let energy = |img: &Image<f32, 1>| img.as_slice().iter().map(|v| v * v).sum::<f32>();
        let total = energy(&bands.approx)
            + energy(&bands.horizontal)
            + energy(&bands.vertical)
            + energy(&bands.diagonal);

        assert_relative_eq!(total, energy(&plane), epsilon = 1e-4);
        Ok(())
    }

    #[test]
    fn test_dwt2_haar_odd_size() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let plane = Image::<f32, 1>::new(
            ImageSize { width: 3, height: 1 },
            vec![1.0, 3.0, 5.0],
        )?;

        let bands = dwt2_haar(&plane)?;
        assert_eq!(bands.size(), ImageSize { width: 2, height: 1 });
        // the last column and the missing row are repeated
        assert_eq!(bands.approx.as_slice(), &[4.0, 10.0]);
        assert_eq!(bands.vertical.as_slice(), &[-2.0, 0.0]);
        assert_eq!(bands.horizontal.as_slice(), &[0.0, 0.0]);

        let rec = idwt2_haar(&bands)?;
        assert_eq!(rec.size(), ImageSize { width: 4, height: 2 });
        assert_eq!(rec.as_slice(), &[1.0, 3.0, 5.0, 5.0, 1.0, 3.0, 5.0, 5.0]);

        Ok(())
    }

    #[test]
    fn test_dwt2_haar_empty() {
        let plane = Image::<f32, 1>::new(
            ImageSize {
                width: 0,
                height: 3,
            },
            vec![],
        )
        .unwrap();
        assert_eq!(dwt2_haar(&plane), Err(ImageError::EmptyImage(0, 3)));
    }

    #[test]
    fn test_idwt2_haar_band_mismatch() -> Result<(), ImageError> {
        let plane = Image::<f32, 1>::from_size_val([4, 4].into(), 1.0)?;
        let mut bands = dwt2_haar(&plane)?;
        bands.diagonal = Image::from_size_val([1, 2].into(), 0.0)?;

        assert_eq!(
            idwt2_haar(&bands),
            Err(ImageError::InvalidImageSize(1, 2, 2, 2))
        );
        Ok(())
    }
}
