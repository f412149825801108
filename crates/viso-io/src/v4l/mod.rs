mod yuyv;

pub use yuyv::rgb_from_yuyv;

use v4l::buffer::Type;
use v4l::io::mmap::Stream;
use v4l::io::traits::CaptureStream;
use v4l::video::capture::Parameters;
use v4l::video::Capture;
use v4l::{Device, FourCC};

use viso_image::{Image, ImageSize};

/// Error types for the camera capture module.
#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    /// Failed to talk to the capture device.
    #[error(transparent)]
    DeviceError(#[from] std::io::Error),

    /// The device does not support the requested pixel format.
    #[error("Capture device does not support the {0} pixel format, offers {1}")]
    UnsupportedPixelFormat(String, String),

    /// The captured buffer does not match the negotiated frame size.
    #[error("Captured buffer of {0} bytes does not match the expected {1} bytes")]
    InvalidBufferSize(usize, usize),

    /// The packed 4:2:2 layout carries two pixels per chroma pair, so the
    /// frame width must be even.
    #[error("Image width {0} must be even for YUYV data")]
    OddImageWidth(usize),

    /// Failed to create the destination image.
    #[error(transparent)]
    ImageError(#[from] viso_image::ImageError),
}

/// Configuration for a V4L camera capture.
pub struct CameraConfig {
    /// The capture device index, mapping to `/dev/video<index>`.
    pub index: usize,
    /// The desired image size.
    pub size: ImageSize,
    /// The desired frames per second.
    pub fps: u32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            size: ImageSize {
                width: 640,
                height: 480,
            },
            fps: 30,
        }
    }
}

/// A camera capture source streaming YUYV frames over memory-mapped buffers.
pub struct CameraCapture {
    stream: Stream<'static>,
    size: ImageSize,
}

impl CameraCapture {
    /// Open the capture device described by the config.
    ///
    /// The device is switched to the YUYV pixel format at the requested size
    /// and frame rate; the driver may negotiate a different size, which
    /// [`CameraCapture::size`] reports.
    pub fn new(config: CameraConfig) -> Result<Self, CameraError> {
        let device = Device::new(config.index)?;

        let yuyv = FourCC::new(b"YUYV");

        let mut format = device.format()?;
        format.width = config.size.width as u32;
        format.height = config.size.height as u32;
        format.fourcc = yuyv;

        let actual_format = device.set_format(&format)?;
        if actual_format.fourcc != yuyv {
            return Err(CameraError::UnsupportedPixelFormat(
                yuyv.to_string(),
                actual_format.fourcc.to_string(),
            ));
        }

        device.set_params(&Parameters::with_fps(config.fps))?;

        let size = ImageSize {
            width: actual_format.width as usize,
            height: actual_format.height as usize,
        };

        if size != config.size {
            log::warn!(
                "capture device negotiated {} instead of the requested {}",
                size,
                config.size
            );
        }

        let stream = Stream::with_buffers(&device, Type::VideoCapture, 4)?;

        log::info!("opened /dev/video{} at {}", config.index, size);

        Ok(Self { stream, size })
    }

    /// The frame size negotiated with the device.
    #[inline]
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Allocate an rgb8 image matching the negotiated frame size.
    pub fn alloc_frame(&self) -> Result<Image<u8, 3>, CameraError> {
        Ok(Image::from_size_val(self.size, 0)?)
    }

    /// Grab the next frame, converting it into the caller-provided rgb8
    /// image. Returns the driver sequence number of the frame.
    ///
    /// Blocks until the driver hands over the next buffer.
    pub fn grab_into(&mut self, dst: &mut Image<u8, 3>) -> Result<u32, CameraError> {
        let (buffer, metadata) = self.stream.next()?;
        rgb_from_yuyv(buffer, dst)?;
        Ok(metadata.sequence)
    }
}
