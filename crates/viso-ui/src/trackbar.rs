/// A named bounded integer control, the moral equivalent of a UI slider.
///
/// The position is always clamped into `[0, max]`.
///
/// # Examples
///
/// ```
/// use viso_ui::Trackbar;
///
/// let mut bar = Trackbar::new("Red High", 255, 255);
/// bar.set_pos(300);
/// assert_eq!(bar.pos(), 255);
/// ```
#[derive(Debug, Clone)]
pub struct Trackbar {
    name: String,
    pos: i32,
    max: i32,
}

impl Trackbar {
    /// Create a new trackbar with the given name, initial position and
    /// maximum value. The initial position is clamped; a negative maximum
    /// collapses the range to `[0, 0]`.
    pub fn new(name: impl Into<String>, pos: i32, max: i32) -> Self {
        let max = max.max(0);
        Self {
            name: name.into(),
            pos: pos.clamp(0, max),
            max,
        }
    }

    /// The display name of the control.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current position.
    #[inline]
    pub fn pos(&self) -> i32 {
        self.pos
    }

    /// The maximum position.
    #[inline]
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Move the control, clamping into `[0, max]`.
    pub fn set_pos(&mut self, pos: i32) {
        self.pos = pos.clamp(0, self.max);
    }
}

/// A color channel selector for the range controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    /// The red channel.
    R,
    /// The green channel.
    G,
    /// The blue channel.
    B,
}

/// Which end of a channel range a control bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEnd {
    /// The lower bound.
    Low,
    /// The upper bound.
    High,
}

/// A parsed update for one of the six range controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlUpdate {
    /// The channel whose bound changes.
    pub channel: Channel,
    /// Which end of the range changes.
    pub end: RangeEnd,
    /// The new control position.
    pub value: i32,
}

impl ControlUpdate {
    /// Parse a control line of the form `<r|g|b> <low|high> <value>`.
    ///
    /// Returns `None` for anything that does not match.
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();

        let channel = match parts.next()? {
            "r" | "red" => Channel::R,
            "g" | "green" => Channel::G,
            "b" | "blue" => Channel::B,
            _ => return None,
        };

        let end = match parts.next()? {
            "low" => RangeEnd::Low,
            "high" => RangeEnd::High,
            _ => return None,
        };

        let value = parts.next()?.parse().ok()?;

        if parts.next().is_some() {
            return None;
        }

        Some(Self {
            channel,
            end,
            value,
        })
    }
}

/// The six trackbars bounding an RGB color range.
///
/// Lows start at 0 and highs at 255, so the initial range passes every
/// pixel. `bounds` is read once per display loop iteration; updates arrive
/// asynchronously through `set` or `apply`.
#[derive(Debug, Clone)]
pub struct ColorRangeControls {
    lows: [Trackbar; 3],
    highs: [Trackbar; 3],
}

impl ColorRangeControls {
    /// The maximum position of every control.
    pub const MAX: i32 = 255;

    /// Create the six controls with the pass-everything default range.
    pub fn new() -> Self {
        Self {
            lows: [
                Trackbar::new("Red Low", 0, Self::MAX),
                Trackbar::new("Green Low", 0, Self::MAX),
                Trackbar::new("Blue Low", 0, Self::MAX),
            ],
            highs: [
                Trackbar::new("Red High", Self::MAX, Self::MAX),
                Trackbar::new("Green High", Self::MAX, Self::MAX),
                Trackbar::new("Blue High", Self::MAX, Self::MAX),
            ],
        }
    }

    /// Move one of the six controls, clamping into `[0, 255]`.
    pub fn set(&mut self, channel: Channel, end: RangeEnd, value: i32) {
        let idx = match channel {
            Channel::R => 0,
            Channel::G => 1,
            Channel::B => 2,
        };
        match end {
            RangeEnd::Low => self.lows[idx].set_pos(value),
            RangeEnd::High => self.highs[idx].set_pos(value),
        }
    }

    /// Apply a parsed control update.
    pub fn apply(&mut self, update: ControlUpdate) {
        self.set(update.channel, update.end, update.value);
    }

    /// The current (lower, upper) per-channel bounds in RGB order.
    pub fn bounds(&self) -> ([u8; 3], [u8; 3]) {
        let lower = [
            self.lows[0].pos() as u8,
            self.lows[1].pos() as u8,
            self.lows[2].pos() as u8,
        ];
        let upper = [
            self.highs[0].pos() as u8,
            self.highs[1].pos() as u8,
            self.highs[2].pos() as u8,
        ];
        (lower, upper)
    }
}

impl Default for ColorRangeControls {
    fn default() -> Self {
        Self::new()
    }
}
