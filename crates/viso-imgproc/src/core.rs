use rayon::prelude::*;

use viso_image::{Image, ImageError};

/// Compute the mean and standard deviation of an image.
///
/// The mean and standard deviation are computed for each channel of the
/// image in one pass.
///
/// # Arguments
///
/// * `image` - The input image to compute the mean and standard deviation.
///
/// # Returns
///
/// A tuple with the per-channel standard deviation and mean of the image.
///
/// # Example
///
/// ```
/// use viso_image::{Image, ImageSize};
/// use viso_imgproc::core::std_mean;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 2,
///         height: 2,
///     },
///     vec![0, 1, 2, 253, 254, 255, 128, 129, 130, 64, 65, 66],
/// ).unwrap();
///
/// let (std, mean) = std_mean(&image);
/// assert_eq!(mean, [111.25, 112.25, 113.25]);
/// ```
pub fn std_mean(image: &Image<u8, 3>) -> (Vec<f64>, Vec<f64>) {
    let (sum, sq_sum) = image.as_slice().chunks_exact(3).fold(
        ([0f64; 3], [0f64; 3]),
        |(mut sum, mut sq_sum), pixel| {
            for (c, &val) in pixel.iter().enumerate() {
                sum[c] += val as f64;
                sq_sum[c] += (val as f64).powi(2);
            }
            (sum, sq_sum)
        },
    );

    let n = (image.width() * image.height()) as f64;
    let mean = sum.iter().map(|&s| s / n).collect::<Vec<_>>();

    let std = sq_sum
        .iter()
        .zip(mean.iter())
        .map(|(&sq_s, &m)| (sq_s / n - m.powi(2)).sqrt())
        .collect::<Vec<_>>();

    (std, mean)
}

/// Perform a bitwise AND operation between two images using a mask.
///
/// The mask is a binary image where the value 0 is considered as False
/// and any other value is considered as True.
///
/// # Arguments
///
/// * `src1` - The first input image.
/// * `src2` - The second input image.
/// * `dst` - The output image.
/// * `mask` - The binary mask to apply to the image.
///
/// # Example
///
/// ```
/// use viso_image::{Image, ImageSize};
/// use viso_imgproc::core::bitwise_and;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 2,
///         height: 2,
///     },
///     vec![0, 1, 2, 253, 254, 255, 128, 129, 130, 64, 65, 66],
/// ).unwrap();
///
/// let mask = Image::<u8, 1>::new(
///     ImageSize {
///         width: 2,
///         height: 2,
///     },
///     vec![255, 0, 255, 0],
/// ).unwrap();
///
/// let mut output = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
///
/// bitwise_and(&image, &image, &mut output, &mask).unwrap();
///
/// assert_eq!(output.as_slice(), &[0, 1, 2, 0, 0, 0, 128, 129, 130, 0, 0, 0]);
/// ```
pub fn bitwise_and<const C: usize>(
    src1: &Image<u8, C>,
    src2: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    mask: &Image<u8, 1>,
) -> Result<(), ImageError> {
    if src1.size() != src2.size() {
        return Err(ImageError::InvalidImageSize(
            src1.cols(),
            src1.rows(),
            src2.cols(),
            src2.rows(),
        ));
    }

    if src1.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src1.cols(),
            src1.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if src1.size() != mask.size() {
        return Err(ImageError::InvalidImageSize(
            src1.cols(),
            src1.rows(),
            mask.cols(),
            mask.rows(),
        ));
    }

    let cols = src1.cols();
    src1.as_slice()
        .par_chunks_exact(C * cols)
        .zip(src2.as_slice().par_chunks_exact(C * cols))
        .zip(mask.as_slice().par_chunks_exact(cols))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C * cols))
        .for_each(|(((src1_row, src2_row), mask_row), dst_row)| {
            src1_row
                .chunks_exact(C)
                .zip(src2_row.chunks_exact(C))
                .zip(mask_row.iter())
                .zip(dst_row.chunks_exact_mut(C))
                .for_each(|(((src1_pixel, src2_pixel), &mask_val), dst_pixel)| {
                    for c in 0..C {
                        dst_pixel[c] = if mask_val != 0 {
                            src1_pixel[c] & src2_pixel[c]
                        } else {
                            0
                        };
                    }
                });
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use viso_image::ImageSize;

    #[test]
    fn std_mean_one_pass() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0, 1, 2, 253, 254, 255, 128, 129, 130, 64, 65, 66],
        )?;

        let (std, mean) = std_mean(&image);

        assert_eq!(mean, [111.25, 112.25, 113.25]);
        assert!(std.iter().all(|&s| (s - 93.5183805462862).abs() < 1e-9));

        Ok(())
    }

    #[test]
    fn bitwise_and_masks_pixels() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![10, 20, 30, 40, 50, 60],
        )?;
        let mask = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![255, 0],
        )?;
        let mut output = Image::<u8, 3>::from_size_val(image.size(), 0)?;

        bitwise_and(&image, &image, &mut output, &mask)?;

        assert_eq!(output.as_slice(), &[10, 20, 30, 0, 0, 0]);

        Ok(())
    }

    #[test]
    fn bitwise_and_empty_mask() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            200,
        )?;
        let mask = Image::<u8, 1>::from_size_val(image.size(), 0)?;
        let mut output = Image::<u8, 3>::from_size_val(image.size(), 7)?;

        bitwise_and(&image, &image, &mut output, &mask)?;

        assert!(output.as_slice().iter().all(|&v| v == 0));

        Ok(())
    }

    #[test]
    fn bitwise_and_size_mismatch() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0,
        )?;
        let mask = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            0,
        )?;
        let mut output = Image::<u8, 3>::from_size_val(image.size(), 0)?;

        assert!(bitwise_and(&image, &image, &mut output, &mask).is_err());

        Ok(())
    }
}
