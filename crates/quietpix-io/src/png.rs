use png::{BitDepth, ColorType, Encoder};
use quietpix_image::{Image, ImageSize};

use crate::error::IoError;

/// Encodes an RGB _(rgb8)_ image as PNG.
///
/// # Arguments
///
/// - `image` - The image to encode.
///
/// # Returns
///
/// The bytes of the PNG file.
pub fn encode_image_png_rgb8(image: &Image<u8, 3>) -> Result<Vec<u8>, IoError> {
    encode_png_impl(image.as_slice(), image.size(), BitDepth::Eight, ColorType::Rgb)
}

fn encode_png_impl(
    image_data: &[u8],
    image_size: ImageSize,
    // Make sure you set `depth` correctly
    depth: BitDepth,
    color_type: ColorType,
) -> Result<Vec<u8>, IoError> {
    let mut buf = Vec::new();

    let mut encoder = Encoder::new(&mut buf, image_size.width as u32, image_size.height as u32);
    encoder.set_color(color_type);
    encoder.set_depth(depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .write_image_data(image_data)
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IoError;

    #[test]
    fn encode_png_rgb8_signature() -> Result<(), IoError> {
        let image = Image::<u8, 3>::new([2, 1].into(), vec![255, 0, 0, 0, 0, 255])?;
        let bytes = encode_image_png_rgb8(&image)?;
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        Ok(())
    }

    #[test]
    fn encode_png_rgb8_is_lossless() -> Result<(), IoError> {
        let size = ImageSize {
            width: 13,
            height: 7,
        };
        let image = Image::<u8, 3>::new(size, (0..size.area() * 3).map(|x| x as u8).collect())?;

        let bytes = encode_image_png_rgb8(&image)?;
        let decoded = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png)?;

        assert_eq!(decoded.to_rgb8().into_raw(), image.as_slice());
        Ok(())
    }

    #[test]
    fn encode_png_empty_fails() -> Result<(), IoError> {
        let image = Image::<u8, 3>::new([0, 0].into(), vec![])?;
        assert!(matches!(
            encode_image_png_rgb8(&image),
            Err(IoError::PngEncodingError(_))
        ));
        Ok(())
    }
}
