use quietpix_image::{Image, ImageError};
use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use super::kernels;
use crate::padding::PaddingMode;

fn check_same_size<const C: usize>(
    src: &Image<u8, C>,
    dst: &Image<u8, C>,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            dst.cols(),
            dst.rows(),
            src.cols(),
            src.rows(),
        ));
    }
    Ok(())
}

/// Largest kernel side accepted by [`box_blur`] and [`median_blur`].
pub const MAX_KERNEL_SIZE: usize = 31;

fn check_kernel_size(kernel_size: usize) -> Result<(), ImageError> {
    if kernel_size == 0 || kernel_size % 2 == 0 || kernel_size > MAX_KERNEL_SIZE {
        return Err(ImageError::InvalidKernelSize(kernel_size));
    }
    Ok(())
}

#[inline]
fn saturate_u8(val: f32) -> u8 {
    val.round().clamp(0.0, 255.0) as u8
}

/// Blur an image using a box blur filter
///
/// Each output sample is the unweighted mean of the `kernel_x × kernel_y`
/// neighborhood. Borders are handled with [`PaddingMode::Reflect101`]. The sums are
/// accumulated in `f32` and rounded to the nearest integer.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The size of the kernel (kernel_x, kernel_y), both odd and at most
///   [`MAX_KERNEL_SIZE`].
///
/// # Examples
///
/// ```
/// use quietpix_image::{Image, ImageSize};
/// use quietpix_imgproc::filter::box_blur;
///
/// let size = ImageSize { width: 4, height: 4 };
/// let image = Image::<u8, 3>::from_size_val(size, 128).unwrap();
/// let mut blurred = Image::<u8, 3>::from_size_val(size, 0).unwrap();
///
/// box_blur(&image, &mut blurred, (3, 3)).unwrap();
///
/// assert!(blurred.as_slice().iter().all(|&v| v == 128));
/// ```
pub fn box_blur<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel_size: (usize, usize),
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_kernel_size(kernel_size.0)?;
    check_kernel_size(kernel_size.1)?;

    let (rows, cols) = (src.rows(), src.cols());
    if rows == 0 || cols == 0 {
        return Ok(());
    }

    let kernel_x = kernels::box_blur_kernel_1d(kernel_size.0);
    let kernel_y = kernels::box_blur_kernel_1d(kernel_size.1);
    let half_x = (kernel_x.len() / 2) as isize;
    let half_y = (kernel_y.len() / 2) as isize;
    let border = PaddingMode::Reflect101;

    let src_data = src.as_slice();
    let mut temp = vec![0.0f32; src_data.len()];

    // Horizontal
    temp.par_chunks_exact_mut(cols * C)
        .enumerate()
        .for_each(|(r, row_temp)| {
            let row_src = &src_data[r * cols * C..(r + 1) * cols * C];
            for c in 0..cols {
                let mut acc = [0.0f32; C];
                for (i, &k) in kernel_x.iter().enumerate() {
                    let x = border.map_index(c as isize + i as isize - half_x, cols);
                    for (ch, acc_val) in acc.iter_mut().enumerate() {
                        *acc_val += row_src[x * C + ch] as f32 * k;
                    }
                }
                row_temp[c * C..(c + 1) * C].copy_from_slice(&acc);
            }
        });

    // Vertical
    dst.as_slice_mut()
        .par_chunks_exact_mut(cols * C)
        .enumerate()
        .for_each(|(r, row_dst)| {
            for c in 0..cols {
                let mut acc = [0.0f32; C];
                for (i, &k) in kernel_y.iter().enumerate() {
                    let y = border.map_index(r as isize + i as isize - half_y, rows);
                    let idx = (y * cols + c) * C;
                    for (ch, acc_val) in acc.iter_mut().enumerate() {
                        *acc_val += temp[idx + ch] * k;
                    }
                }
                for (ch, &acc_val) in acc.iter().enumerate() {
                    row_dst[c * C + ch] = saturate_u8(acc_val);
                }
            }
        });

    Ok(())
}

/// Blur an image using a median filter
///
/// Every output sample is the median, taken per channel, of the
/// `kernel_size × kernel_size` neighborhood. Borders are handled with
/// [`PaddingMode::Replicate`].
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel_size` - The side of the square window, odd and at most [`MAX_KERNEL_SIZE`].
///
/// # Examples
///
/// ```
/// use quietpix_image::{Image, ImageSize};
/// use quietpix_imgproc::filter::median_blur;
///
/// let size = ImageSize { width: 3, height: 3 };
/// let image = Image::<u8, 1>::new(size, vec![0, 0, 0, 0, 255, 0, 0, 0, 0]).unwrap();
/// let mut filtered = Image::<u8, 1>::from_size_val(size, 0).unwrap();
///
/// median_blur(&image, &mut filtered, 3).unwrap();
///
/// assert_eq!(filtered.as_slice(), &[0; 9]);
/// ```
pub fn median_blur<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel_size: usize,
) -> Result<(), ImageError> {
    check_same_size(src, dst)?;
    check_kernel_size(kernel_size)?;

    let (rows, cols) = (src.rows(), src.cols());
    if rows == 0 || cols == 0 {
        return Ok(());
    }

    let window_len = kernel_size
        .checked_mul(kernel_size)
        .ok_or(ImageError::InvalidKernelSize(kernel_size))?;
    let half = (kernel_size / 2) as isize;
    let border = PaddingMode::Replicate;
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols * C)
        .enumerate()
        .for_each(|(r, row_dst)| {
            // reused across the row to avoid an allocation per pixel
            let mut window = Vec::with_capacity(window_len);
            for c in 0..cols {
                for ch in 0..C {
                    window.clear();
                    for dy in -half..=half {
                        let y = border.map_index(r as isize + dy, rows);
                        for dx in -half..=half {
                            let x = border.map_index(c as isize + dx, cols);
                            window.push(src_data[(y * cols + x) * C + ch]);
                        }
                    }
                    let mid = window.len() / 2;
                    let (_, median, _) = window.select_nth_unstable(mid);
                    row_dst[c * C + ch] = *median;
                }
            }
        });

    Ok(())
}
