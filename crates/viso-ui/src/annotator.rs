use viso_image::Image;
use viso_imgproc::draw::draw_rect;

/// The outline color of committed and in-flight rectangles.
const OUTLINE_COLOR: [u8; 3] = [0, 255, 0];

/// The outline thickness in pixels.
const OUTLINE_THICKNESS: usize = 5;

/// A pointer event delivered to the annotator by the display loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    /// The primary button was pressed at (x, y).
    Down {
        /// The x-coordinate of the pointer.
        x: i64,
        /// The y-coordinate of the pointer.
        y: i64,
    },
    /// The pointer moved to (x, y).
    Move {
        /// The x-coordinate of the pointer.
        x: i64,
        /// The y-coordinate of the pointer.
        y: i64,
    },
    /// The primary button was released at (x, y).
    Up {
        /// The x-coordinate of the pointer.
        x: i64,
        /// The y-coordinate of the pointer.
        y: i64,
    },
}

impl PointerEvent {
    /// Parse an event line of the form `<down|move|up> <x> <y>`.
    ///
    /// Returns `None` for anything that does not match.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let kind = parts.next()?;
        let x = parts.next()?.parse().ok()?;
        let y = parts.next()?.parse().ok()?;

        if parts.next().is_some() {
            return None;
        }

        match kind {
            "down" => Some(Self::Down { x, y }),
            "move" => Some(Self::Move { x, y }),
            "up" => Some(Self::Up { x, y }),
            _ => None,
        }
    }
}

/// An axis-aligned rectangle recorded by the annotator.
///
/// The corners keep the order they were drawn in: (x1, y1) is where the drag
/// started and (x2, y2) where it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// The x-coordinate of the drag start.
    pub x1: i64,
    /// The y-coordinate of the drag start.
    pub y1: i64,
    /// The x-coordinate of the drag end.
    pub x2: i64,
    /// The y-coordinate of the drag end.
    pub y2: i64,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    x1: i64,
    y1: i64,
    x2: i64,
    y2: i64,
}

/// Accumulates pointer-drawn rectangles over a working image.
///
/// The annotator owns the working image, the list of committed rectangles
/// and the in-progress drag state; the display loop feeds it pointer events
/// and renders [`BoxAnnotator::preview`] after each one.
///
/// A Down begins a drag, Moves float the opposite corner, and an Up commits
/// exactly one rectangle spanning the Down and Up coordinates, drawing it
/// permanently into the working image. Moves outside a drag change nothing.
///
/// # Examples
///
/// ```
/// use viso_image::{Image, ImageSize};
/// use viso_ui::{BoxAnnotator, PointerEvent};
///
/// let image = Image::<u8, 3>::from_size_val(
///     ImageSize { width: 64, height: 64 },
///     0,
/// ).unwrap();
///
/// let mut annotator = BoxAnnotator::new(image);
/// annotator.handle_event(PointerEvent::Down { x: 8, y: 8 });
/// annotator.handle_event(PointerEvent::Move { x: 20, y: 16 });
/// annotator.handle_event(PointerEvent::Up { x: 32, y: 24 });
///
/// assert_eq!(annotator.rects().len(), 1);
/// ```
pub struct BoxAnnotator {
    canvas: Image<u8, 3>,
    rects: Vec<Rect>,
    drag: Option<Drag>,
}

impl BoxAnnotator {
    /// Create an annotator over the given working image.
    pub fn new(image: Image<u8, 3>) -> Self {
        Self {
            canvas: image,
            rects: Vec::new(),
            drag: None,
        }
    }

    /// Feed one pointer event into the annotator.
    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { x, y } => {
                self.drag = Some(Drag {
                    x1: x,
                    y1: y,
                    x2: x,
                    y2: y,
                });
            }
            PointerEvent::Move { x, y } => {
                if let Some(drag) = self.drag.as_mut() {
                    drag.x2 = x;
                    drag.y2 = y;
                }
            }
            PointerEvent::Up { x, y } => {
                if let Some(drag) = self.drag.take() {
                    let rect = Rect {
                        x1: drag.x1,
                        y1: drag.y1,
                        x2: x,
                        y2: y,
                    };
                    draw_rect(
                        &mut self.canvas,
                        (rect.x1, rect.y1),
                        (rect.x2, rect.y2),
                        OUTLINE_COLOR,
                        OUTLINE_THICKNESS,
                    );
                    self.rects.push(rect);
                }
            }
        }
    }

    /// Whether a drag is currently in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// The rectangles committed so far, in draw order.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Render the working image, overlaying the in-flight rubber band when a
    /// drag is in progress.
    pub fn preview(&self) -> Image<u8, 3> {
        let mut frame = self.canvas.clone();
        if let Some(drag) = self.drag {
            draw_rect(
                &mut frame,
                (drag.x1, drag.y1),
                (drag.x2, drag.y2),
                OUTLINE_COLOR,
                OUTLINE_THICKNESS,
            );
        }
        frame
    }

    /// Consume the annotator and return the working image with every
    /// committed rectangle drawn in.
    pub fn into_image(self) -> Image<u8, 3> {
        self.canvas
    }
}
