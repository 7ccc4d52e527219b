use std::io::Cursor;

use quietpix_image::{Image, ImageSize};

use crate::error::IoError;

/// Decodes an image of any supported container into 8-bit RGB.
///
/// The format is guessed from the leading bytes, so the file name or content type of
/// an upload does not matter. Grayscale and 16-bit images are converted to 8-bit RGB
/// and an alpha channel is dropped.
///
/// # Arguments
///
/// * `bytes` - Raw bytes of the encoded image.
///
/// # Returns
///
/// An RGB image with three channels (rgb8).
///
/// # Example
///
/// ```
/// use quietpix_image::Image;
/// use quietpix_io::{functional::decode_image_rgb8, png::encode_image_png_rgb8};
///
/// let image = Image::<u8, 3>::from_size_val([4, 2].into(), 9).unwrap();
/// let bytes = encode_image_png_rgb8(&image).unwrap();
///
/// let decoded = decode_image_rgb8(&bytes).unwrap();
/// assert_eq!(decoded, image);
/// ```
pub fn decode_image_rgb8(bytes: &[u8]) -> Result<Image<u8, 3>, IoError> {
    let img = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;

    log::debug!(
        "decoded {}x{} {:?} image from {} bytes",
        img.width(),
        img.height(),
        img.color(),
        bytes.len()
    );

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}
