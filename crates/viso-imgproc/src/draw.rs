use std::cmp::{max, min};

use viso_image::Image;

/// Helper function to set a pixel's color, handling bounds checking.
#[inline]
fn set_pixel<const C: usize>(img: &mut Image<u8, C>, x: i64, y: i64, color: [u8; C]) {
    if x >= 0 && x < img.cols() as i64 && y >= 0 && y < img.rows() as i64 {
        let start = (y as usize * img.cols() + x as usize) * C;
        img.as_slice_mut()[start..start + C].copy_from_slice(&color);
    }
}

/// Draws a line on an image inplace using Bresenham's line algorithm.
///
/// Pixels outside the image bounds are clipped.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `p0` - The start point of the line as a tuple of (x, y).
/// * `p1` - The end point of the line as a tuple of (x, y).
/// * `color` - The color of the line as an array of `C` elements.
/// * `thickness` - The thickness of the line. Thickness > 1 is approximate.
pub fn draw_line<const C: usize>(
    img: &mut Image<u8, C>,
    p0: (i64, i64),
    p1: (i64, i64),
    color: [u8; C],
    thickness: usize,
) {
    let (mut x0, mut y0) = p0;
    let (x1, y1) = p1;

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut err = dx - dy;

    let half_thickness = thickness as i64 / 2;

    loop {
        if thickness <= 1 {
            set_pixel(img, x0, y0, color);
        } else {
            // approximate thickness with a filled square around the point
            for i in -half_thickness..=half_thickness {
                for j in -half_thickness..=half_thickness {
                    set_pixel(img, x0 + i, y0 + j, color);
                }
            }
        }

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Draws a rectangle outline on an image inplace.
///
/// The two corner points may be given in any order.
///
/// # Arguments
///
/// * `img` - The image to draw on.
/// * `p0` - One corner of the rectangle as (x, y).
/// * `p1` - The opposite corner as (x, y).
/// * `color` - The color of the rectangle outline.
/// * `thickness` - The thickness of the lines.
pub fn draw_rect<const C: usize>(
    img: &mut Image<u8, C>,
    p0: (i64, i64),
    p1: (i64, i64),
    color: [u8; C],
    thickness: usize,
) {
    let (x0, y0) = p0;
    let (x1, y1) = p1;

    let (lx0, lx1) = (min(x0, x1), max(x0, x1));
    let (ly0, ly1) = (min(y0, y1), max(y0, y1));

    draw_line(img, (lx0, ly0), (lx1, ly0), color, thickness); // top
    draw_line(img, (lx0, ly1), (lx1, ly1), color, thickness); // bottom
    draw_line(img, (lx0, ly0), (lx0, ly1), color, thickness); // left
    draw_line(img, (lx1, ly0), (lx1, ly1), color, thickness); // right
}

#[cfg(test)]
mod tests {
    use super::*;
    use viso_image::{ImageError, ImageSize};

    #[test]
    fn draw_horizontal_line() -> Result<(), ImageError> {
        let mut img = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 5,
                height: 3,
            },
            0,
        )?;

        draw_line(&mut img, (0, 1), (4, 1), [255], 1);

        for x in 0..5 {
            assert_eq!(img.get_pixel(x, 1, 0)?, &255);
            assert_eq!(img.get_pixel(x, 0, 0)?, &0);
        }

        Ok(())
    }

    #[test]
    fn draw_rect_outline() -> Result<(), ImageError> {
        let mut img = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 8,
                height: 8,
            },
            0,
        )?;

        // corners in flipped order
        draw_rect(&mut img, (6, 5), (1, 2), [0, 255, 0], 1);

        // corners
        assert_eq!(img.get_pixel(1, 2, 1)?, &255);
        assert_eq!(img.get_pixel(6, 5, 1)?, &255);
        // edges
        assert_eq!(img.get_pixel(3, 2, 1)?, &255);
        assert_eq!(img.get_pixel(1, 4, 1)?, &255);
        // interior stays empty
        assert_eq!(img.get_pixel(3, 3, 1)?, &0);

        Ok(())
    }

    #[test]
    fn draw_clips_out_of_bounds() -> Result<(), ImageError> {
        let mut img = Image::<u8, 1>::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            0,
        )?;

        // must not panic even though the rect leaves the image
        draw_rect(&mut img, (-3, -3), (10, 10), [255], 3);

        assert_eq!(img.get_pixel(0, 0, 0)?, &0);

        Ok(())
    }
}
