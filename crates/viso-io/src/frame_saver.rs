use std::fs;
use std::path::{Path, PathBuf};

use viso_image::Image;

use crate::error::IoError;
use crate::jpeg::write_image_jpeg_rgb8;

/// Default JPEG quality used when saving frames.
const DEFAULT_QUALITY: u8 = 90;

/// Writes camera frames to disk as sequentially numbered JPEG files.
///
/// The files are named `<prefix>_<counter>.jpeg` where the counter is
/// zero-padded to five digits and starts at 0. The output directory is
/// created on construction if it does not exist.
///
/// # Examples
///
/// ```no_run
/// use viso_image::{Image, ImageSize};
/// use viso_io::frame_saver::FrameSaver;
///
/// let mut saver = FrameSaver::new("images/capture", "frame").unwrap();
///
/// let frame = Image::<u8, 3>::from_size_val(
///     ImageSize { width: 640, height: 480 },
///     0,
/// ).unwrap();
///
/// // writes images/capture/frame_00000.jpeg
/// saver.save(&frame).unwrap();
/// ```
pub struct FrameSaver {
    dir: PathBuf,
    prefix: String,
    counter: usize,
    quality: u8,
}

impl FrameSaver {
    /// Create a new frame saver writing into `dir` with the given file prefix.
    ///
    /// The directory tree is created if it does not exist.
    pub fn new(dir: impl AsRef<Path>, prefix: impl Into<String>) -> Result<Self, IoError> {
        let dir = dir.as_ref().to_owned();
        fs::create_dir_all(&dir)?;

        Ok(Self {
            dir,
            prefix: prefix.into(),
            counter: 0,
            quality: DEFAULT_QUALITY,
        })
    }

    /// Override the JPEG quality used for the saved frames.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    /// Save the next frame and return the path it was written to.
    pub fn save(&mut self, frame: &Image<u8, 3>) -> Result<PathBuf, IoError> {
        let file_path = self
            .dir
            .join(format!("{}_{:05}.jpeg", self.prefix, self.counter));

        write_image_jpeg_rgb8(&file_path, frame, self.quality)?;
        self.counter += 1;

        log::debug!("saved frame {:?}", file_path);

        Ok(file_path)
    }

    /// The number of frames saved so far.
    pub fn frames_saved(&self) -> usize {
        self.counter
    }

    /// The directory the frames are written into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use viso_image::ImageSize;

    fn test_frame() -> Image<u8, 3> {
        Image::from_size_val(
            ImageSize {
                width: 8,
                height: 8,
            },
            127,
        )
        .unwrap()
    }

    #[test]
    fn creates_missing_directory() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let nested = tmp_dir.path().join("images").join("a7");

        let saver = FrameSaver::new(&nested, "a7")?;
        assert!(nested.is_dir());
        assert_eq!(saver.frames_saved(), 0);

        Ok(())
    }

    #[test]
    fn numbers_frames_from_zero() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let mut saver = FrameSaver::new(tmp_dir.path(), "frame")?;

        let frame = test_frame();
        let first = saver.save(&frame)?;
        assert_eq!(
            first.file_name().unwrap().to_str().unwrap(),
            "frame_00000.jpeg"
        );

        let second = saver.save(&frame)?;
        assert_eq!(
            second.file_name().unwrap().to_str().unwrap(),
            "frame_00001.jpeg"
        );

        Ok(())
    }

    #[test]
    fn n_saves_create_n_files() -> Result<(), IoError> {
        let tmp_dir = tempfile::tempdir()?;
        let mut saver = FrameSaver::new(tmp_dir.path(), "cap")?;

        let frame = test_frame();
        for _ in 0..5 {
            saver.save(&frame)?;
        }

        let mut names = std::fs::read_dir(tmp_dir.path())?
            .map(|entry| Ok(entry?.file_name().to_string_lossy().into_owned()))
            .collect::<Result<Vec<_>, IoError>>()?;
        names.sort();

        assert_eq!(saver.frames_saved(), 5);
        assert_eq!(
            names,
            vec![
                "cap_00000.jpeg",
                "cap_00001.jpeg",
                "cap_00002.jpeg",
                "cap_00003.jpeg",
                "cap_00004.jpeg",
            ]
        );

        Ok(())
    }
}
