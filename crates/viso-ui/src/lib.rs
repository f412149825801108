#![deny(missing_docs)]
//! Interactive controls and annotation objects for the viso demos.
//!
//! The demos take their interactive input (trackbar updates, pointer
//! events) as plain data and feed it into the objects here, which own all
//! of the state the event handlers mutate.

/// Pointer-driven rectangle annotation.
pub mod annotator;

/// Bounded integer controls.
pub mod trackbar;

pub use crate::annotator::{BoxAnnotator, PointerEvent, Rect};
pub use crate::trackbar::{Channel, ColorRangeControls, ControlUpdate, RangeEnd, Trackbar};
