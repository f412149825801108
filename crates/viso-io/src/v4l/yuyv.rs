use viso_image::Image;

use super::CameraError;

/// Convert a packed YUYV (YUV 4:2:2) buffer into an rgb8 image.
///
/// Uses fixed-point BT.601 coefficients scaled by 32. Each four-byte YUYV
/// chunk carries two pixels sharing one chroma pair.
pub fn rgb_from_yuyv(src: &[u8], dst: &mut Image<u8, 3>) -> Result<(), CameraError> {
    if dst.width() % 2 != 0 {
        return Err(CameraError::OddImageWidth(dst.width()));
    }

    let expected = dst.width() * dst.height() * 2;
    if src.len() != expected {
        return Err(CameraError::InvalidBufferSize(src.len(), expected));
    }

    src.chunks_exact(4)
        .zip(dst.as_slice_mut().chunks_exact_mut(6))
        .for_each(|(yuyv_chunk, rgb_chunk)| {
            let y0 = yuyv_chunk[0] as i32;
            let u = yuyv_chunk[1] as i32 - 128;
            let y1 = yuyv_chunk[2] as i32;
            let v = yuyv_chunk[3] as i32 - 128;

            // chroma contributions, shared by both pixels
            let u_g = -11 * u; // -0.344 * 32
            let u_b = 57 * u; // 1.772 * 32
            let v_r = 45 * v; // 1.402 * 32
            let v_g = -23 * v; // -0.714 * 32

            let r0 = ((y0 << 5) + v_r) >> 5;
            let g0 = ((y0 << 5) + u_g + v_g) >> 5;
            let b0 = ((y0 << 5) + u_b) >> 5;

            let r1 = ((y1 << 5) + v_r) >> 5;
            let g1 = ((y1 << 5) + u_g + v_g) >> 5;
            let b1 = ((y1 << 5) + u_b) >> 5;

            rgb_chunk[0] = r0.clamp(0, 255) as u8;
            rgb_chunk[1] = g0.clamp(0, 255) as u8;
            rgb_chunk[2] = b0.clamp(0, 255) as u8;
            rgb_chunk[3] = r1.clamp(0, 255) as u8;
            rgb_chunk[4] = g1.clamp(0, 255) as u8;
            rgb_chunk[5] = b1.clamp(0, 255) as u8;
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use viso_image::ImageSize;

    #[test]
    fn neutral_chroma_is_gray() -> Result<(), CameraError> {
        let mut dst = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 1,
            },
            0,
        )?;

        rgb_from_yuyv(&[128, 128, 128, 128], &mut dst)?;

        assert_eq!(dst.as_slice(), &[128, 128, 128, 128, 128, 128]);

        Ok(())
    }

    #[test]
    fn saturated_chroma_is_red() -> Result<(), CameraError> {
        let mut dst = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 1,
            },
            0,
        )?;

        // Y=76, U=84, V=255 is red in BT.601
        rgb_from_yuyv(&[76, 84, 76, 255], &mut dst)?;

        assert_eq!(dst.as_slice(), &[254, 0, 0, 254, 0, 0]);

        Ok(())
    }

    #[test]
    fn rejects_wrong_buffer_size() -> Result<(), CameraError> {
        let mut dst = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 2,
                height: 2,
            },
            0,
        )?;

        let res = rgb_from_yuyv(&[0u8; 6], &mut dst);
        assert!(matches!(res, Err(CameraError::InvalidBufferSize(6, 8))));

        Ok(())
    }

    #[test]
    fn rejects_odd_width() -> Result<(), CameraError> {
        let mut dst = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 3,
                height: 2,
            },
            0,
        )?;

        // 12 bytes would satisfy the size check, the width check comes first
        let res = rgb_from_yuyv(&[0u8; 12], &mut dst);
        assert!(matches!(res, Err(CameraError::OddImageWidth(3))));

        Ok(())
    }
}
