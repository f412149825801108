#![deny(missing_docs)]
//! Image IO and camera capture for the viso demos.

/// Error types for the io module.
pub mod error;

/// A simple frames-per-second counter.
pub mod fps_counter;

/// Sequentially numbered frame writer.
pub mod frame_saver;

/// High-level image reading functions.
pub mod functional;

/// JPEG encoding and decoding.
pub mod jpeg;

/// Camera capture through Video4Linux.
#[cfg(target_os = "linux")]
pub mod v4l;

pub use crate::error::IoError;
