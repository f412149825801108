#![deny(missing_docs)]
//! Image container types for the viso demos.

/// Image representation for computer vision purposes.
pub mod image;

/// Error types for the image module.
pub mod error;

/// Operations on image pixel data.
pub mod ops;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageSize};
