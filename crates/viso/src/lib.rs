#![deny(missing_docs)]
//! Top-level crate re-exporting the viso teaching stack.

#[doc(inline)]
pub use viso_image as image;

#[doc(inline)]
pub use viso_imgproc as imgproc;

#[doc(inline)]
pub use viso_io as io;

#[doc(inline)]
pub use viso_ui as ui;
