use num_traits::Zero;
use std::cmp::PartialOrd;

use viso_image::{Image, ImageError};

use crate::parallel;

/// Apply a binary threshold to an image.
///
/// # Arguments
///
/// * `src` - The input image of an arbitrary number of channels and type.
/// * `dst` - The output image of an arbitrary number of channels and type.
/// * `threshold` - The threshold value. Must be the same type as the image.
/// * `max_value` - The value to write when the input value is greater than the threshold.
///
/// # Examples
///
/// ```
/// use viso_image::{Image, ImageSize};
/// use viso_imgproc::threshold::threshold_binary;
///
/// let data = vec![100u8, 200, 50, 150, 200, 250];
/// let image = Image::<_, 1>::new(ImageSize { width: 2, height: 3 }, data).unwrap();
///
/// let mut thresholded = Image::<_, 1>::from_size_val(image.size(), 0).unwrap();
///
/// threshold_binary(&image, &mut thresholded, 100, 255).unwrap();
/// assert_eq!(thresholded.as_slice(), &[0, 255, 0, 255, 255, 255]);
/// ```
pub fn threshold_binary<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    threshold: T,
    max_value: T,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync + PartialOrd + Zero,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows_val(src, dst, |src_val, dst_val| {
        *dst_val = if *src_val > threshold {
            max_value
        } else {
            T::zero()
        };
    });

    Ok(())
}

/// Build a binary mask of the pixels whose channel values fall inside a range.
///
/// The range test is inclusive at both ends: a mask pixel is 255 when every
/// channel value lies in `[lower_bound[c], upper_bound[c]]`, and 0 otherwise.
/// A lower bound above its upper bound therefore produces an empty mask.
///
/// # Arguments
///
/// * `src` - The input image with an arbitrary number of channels.
/// * `dst` - The output single channel mask image.
/// * `lower_bound` - The lower bound of the range for each channel.
/// * `upper_bound` - The upper bound of the range for each channel.
///
/// # Examples
///
/// ```
/// use viso_image::{Image, ImageSize};
/// use viso_imgproc::threshold::in_range;
///
/// let data = vec![100u8, 200, 50, 150, 200, 250];
///
/// let image = Image::<u8, 3>::new(
///    ImageSize {
///       width: 2,
///       height: 1,
///    },
///    data,
/// )
/// .unwrap();
///
/// let mut mask = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
///
/// in_range(&image, &mut mask, &[100, 150, 0], &[200, 200, 200]).unwrap();
/// assert_eq!(mask.get_pixel(0, 0, 0).unwrap(), &255);
/// assert_eq!(mask.get_pixel(1, 0, 0).unwrap(), &0);
/// ```
pub fn in_range<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<u8, 1>,
    lower_bound: &[T; C],
    upper_bound: &[T; C],
) -> Result<(), ImageError>
where
    T: Clone + Send + Sync + PartialOrd,
{
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let mut is_in_range = true;
        src_pixel
            .iter()
            .zip(lower_bound.iter().zip(upper_bound.iter()))
            .for_each(|(src_val, (lower, upper))| {
                is_in_range &= src_val >= lower && src_val <= upper;
            });
        dst_pixel[0] = if is_in_range { 255 } else { 0 };
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use viso_image::ImageSize;

    #[test]
    fn in_range_inclusive_bounds() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 3,
                height: 1,
            },
            vec![10, 20, 30, 40, 50, 60, 11, 20, 30],
        )?;
        let mut mask = Image::<u8, 1>::from_size_val(image.size(), 0)?;

        // bounds hit the first pixel exactly on both ends
        in_range(&image, &mut mask, &[10, 20, 30], &[10, 20, 30])?;

        assert_eq!(mask.as_slice(), &[255, 0, 0]);

        Ok(())
    }

    #[test]
    fn in_range_empty_when_inverted() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 4,
                height: 3,
            },
            128,
        )?;
        let mut mask = Image::<u8, 1>::from_size_val(image.size(), 255)?;

        // low > high on the green channel, no pixel can match
        in_range(&image, &mut mask, &[0, 200, 0], &[255, 100, 255])?;

        assert!(mask.as_slice().iter().all(|&v| v == 0));

        Ok(())
    }

    #[test]
    fn threshold_binary_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 1,
            },
            vec![100, 200],
        )?;
        let mut thresholded = Image::<u8, 1>::from_size_val(image.size(), 0)?;

        threshold_binary(&image, &mut thresholded, 150, 255)?;

        assert_eq!(thresholded.as_slice(), &[0, 255]);

        Ok(())
    }
}
