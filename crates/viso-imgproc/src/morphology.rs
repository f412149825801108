use rayon::prelude::*;

use viso_image::{Image, ImageError};

/// Erode a grayscale image with a 3x3 square structuring element.
///
/// Each output pixel is the minimum over its in-bounds 3x3 neighborhood;
/// neighbors outside the image are ignored. The pass is repeated
/// `iterations` times. With `iterations == 0` the source is copied
/// unchanged.
///
/// # Arguments
///
/// * `src` - The input image.
/// * `dst` - The output image.
/// * `iterations` - How many erosion passes to apply.
///
/// # Example
///
/// ```
/// use viso_image::{Image, ImageSize};
/// use viso_imgproc::morphology::erode;
///
/// let image = Image::<u8, 1>::new(
///     ImageSize {
///         width: 3,
///         height: 3,
///     },
///     vec![255, 255, 255, 255, 0, 255, 255, 255, 255],
/// ).unwrap();
///
/// let mut eroded = Image::<u8, 1>::from_size_val(image.size(), 0).unwrap();
/// erode(&image, &mut eroded, 1).unwrap();
///
/// assert!(eroded.as_slice().iter().all(|&v| v == 0));
/// ```
pub fn erode(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    iterations: usize,
) -> Result<(), ImageError> {
    morphology_impl(src, dst, iterations, u8::min)
}

/// Dilate a grayscale image with a 3x3 square structuring element.
///
/// The dual of [`erode`]: each output pixel is the maximum over its
/// in-bounds 3x3 neighborhood, repeated `iterations` times. Eroding a
/// binary mask and then dilating it by the same amount removes speckles
/// smaller than the structuring element while keeping larger regions.
pub fn dilate(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    iterations: usize,
) -> Result<(), ImageError> {
    morphology_impl(src, dst, iterations, u8::max)
}

fn morphology_impl(
    src: &Image<u8, 1>,
    dst: &mut Image<u8, 1>,
    iterations: usize,
    pick: fn(u8, u8) -> u8,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if iterations == 0 {
        dst.as_slice_mut().copy_from_slice(src.as_slice());
        return Ok(());
    }

    let cols = src.cols();
    let rows = src.rows();

    pass_3x3(src.as_slice(), dst.as_slice_mut(), cols, rows, pick);

    if iterations > 1 {
        let mut scratch = vec![0u8; cols * rows];
        for _ in 1..iterations {
            scratch.copy_from_slice(dst.as_slice());
            pass_3x3(&scratch, dst.as_slice_mut(), cols, rows, pick);
        }
    }

    Ok(())
}

fn pass_3x3(src: &[u8], dst: &mut [u8], cols: usize, rows: usize, pick: fn(u8, u8) -> u8) {
    dst.par_chunks_exact_mut(cols)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let y_lo = y.saturating_sub(1);
            let y_hi = (y + 1).min(rows - 1);

            for (x, dst_val) in dst_row.iter_mut().enumerate() {
                let x_lo = x.saturating_sub(1);
                let x_hi = (x + 1).min(cols - 1);

                let mut acc = src[y * cols + x];
                for ny in y_lo..=y_hi {
                    for nx in x_lo..=x_hi {
                        acc = pick(acc, src[ny * cols + nx]);
                    }
                }
                *dst_val = acc;
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use viso_image::ImageSize;

    #[test]
    fn erode_spreads_dark_hole() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 3,
                height: 3,
            },
            vec![255, 255, 255, 255, 0, 255, 255, 255, 255],
        )?;
        let mut eroded = Image::<u8, 1>::from_size_val(image.size(), 0)?;

        erode(&image, &mut eroded, 1)?;

        assert!(eroded.as_slice().iter().all(|&v| v == 0));

        Ok(())
    }

    #[test]
    fn dilate_grows_single_pixel() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };
        let mut image = Image::<u8, 1>::from_size_val(size, 0)?;
        image.as_slice_mut()[2 * 5 + 2] = 255;

        let mut dilated = Image::<u8, 1>::from_size_val(size, 0)?;
        dilate(&image, &mut dilated, 1)?;

        for y in 0..5 {
            for x in 0..5 {
                let expected = if (1..=3).contains(&y) && (1..=3).contains(&x) {
                    255
                } else {
                    0
                };
                assert_eq!(dilated.as_slice()[y * 5 + x], expected);
            }
        }

        Ok(())
    }

    #[test]
    fn erode_then_dilate_removes_speckle() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 5,
        };
        let mut mask = Image::<u8, 1>::from_size_val(size, 0)?;
        // one isolated bright pixel at (1, 1)
        mask.as_slice_mut()[6] = 255;

        let mut opened = Image::<u8, 1>::from_size_val(size, 0)?;
        let mut cleaned = Image::<u8, 1>::from_size_val(size, 0)?;
        erode(&mask, &mut opened, 1)?;
        dilate(&opened, &mut cleaned, 1)?;

        assert!(cleaned.as_slice().iter().all(|&v| v == 0));

        Ok(())
    }

    #[test]
    fn more_iterations_erode_further() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 7,
            height: 7,
        };
        // a 5x5 bright block centered in a dark frame
        let mut image = Image::<u8, 1>::from_size_val(size, 0)?;
        for y in 1..=5 {
            for x in 1..=5 {
                image.as_slice_mut()[y * 7 + x] = 255;
            }
        }

        let mut once = Image::<u8, 1>::from_size_val(size, 0)?;
        let mut twice = Image::<u8, 1>::from_size_val(size, 0)?;
        erode(&image, &mut once, 1)?;
        erode(&image, &mut twice, 2)?;

        // one pass keeps the 3x3 core, two passes leave only the center
        assert_eq!(once.as_slice()[2 * 7 + 2], 255);
        assert_eq!(once.as_slice()[3 * 7 + 3], 255);
        assert_eq!(twice.as_slice()[2 * 7 + 2], 0);
        assert_eq!(twice.as_slice()[3 * 7 + 3], 255);

        Ok(())
    }

    #[test]
    fn zero_iterations_copies() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![10, 20, 30, 40],
        )?;
        let mut out = Image::<u8, 1>::from_size_val(image.size(), 0)?;

        erode(&image, &mut out, 0)?;

        assert_eq!(out.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn size_mismatch_is_error() -> Result<(), ImageError> {
        let image = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 3,
                height: 3,
            },
            0,
        )?;
        let mut out = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 2,
                height: 3,
            },
            0,
        )?;

        assert!(erode(&image, &mut out, 1).is_err());
        assert!(dilate(&image, &mut out, 1).is_err());

        Ok(())
    }
}
