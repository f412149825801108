#![deny(missing_docs)]
//! Image processing operations for the viso demos.

/// Color space conversions.
pub mod color;

/// Whole-image reductions and masked compositing.
pub mod core;

/// Drawing primitives.
pub mod draw;

/// Morphological operations for mask cleanup.
pub mod morphology;

/// Parallel iteration helpers for pixel operations.
pub mod parallel;

/// Thresholding and range masking.
pub mod threshold;
