use std::path::Path;

use viso_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path as rgb8.
///
/// The method tries to read from any image format supported by the image
/// crate and converts the pixel data to three 8-bit channels.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let img = decode_any(file_path)?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

/// Reads an image from the given file path as gray8.
///
/// The method tries to read from any image format supported by the image
/// crate and converts the pixel data to a single 8-bit luma channel.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
pub fn read_image_any_gray8(file_path: impl AsRef<Path>) -> Result<Image<u8, 1>, IoError> {
    let img = decode_any(file_path)?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_luma8().into_raw())?)
}

fn decode_any(file_path: impl AsRef<Path>) -> Result<image::DynamicImage, IoError> {
    let file_path = file_path.as_ref().to_owned();

    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    Ok(img)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jpeg::write_image_jpeg_rgb8;

    #[test]
    fn read_any_missing_file() {
        let res = read_image_any_rgb8("no/such/image.png");
        assert!(matches!(res, Err(IoError::FileDoesNotExist(_))));
    }

    #[test]
    fn read_any_rgb8_and_gray8() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let file_path = tmp_dir.path().join("flat.jpeg");

        let image = Image::from_size_val(
            ImageSize {
                width: 4,
                height: 2,
            },
            200u8,
        )?;
        write_image_jpeg_rgb8(&file_path, &image, 100)?;

        let rgb = read_image_any_rgb8(&file_path)?;
        assert_eq!(rgb.size(), image.size());
        assert_eq!(rgb.num_channels(), 3);

        let gray = read_image_any_gray8(&file_path)?;
        assert_eq!(gray.size(), image.size());
        assert_eq!(gray.num_channels(), 1);

        Ok(())
    }
}
