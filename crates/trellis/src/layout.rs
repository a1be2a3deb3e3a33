/// Sizing rule for one axis of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Sizing {
    /// Size to the content (text metrics or children), plus padding.
    #[default]
    Fit,
    /// Fixed size in points.
    Fixed(f32),
    /// Claim a share of the parent's leftover space along the main axis,
    /// or fill the parent's content area along the cross axis.
    Grow,
}

/// One axis' sizing rule together with its resolved value and optional clamps.
///
/// `value` is authoritative right away for `Sizing::Fixed`; for `Fit` and `Grow`
/// it is only meaningful after a layout run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    sizing: Sizing,
    value: f32,
    min: Option<f32>,
    max: Option<f32>,
}

impl Size {
    /// Size to content.
    pub const fn fit() -> Self {
        Self {
            sizing: Sizing::Fit,
            value: 0.0,
            min: None,
            max: None,
        }
    }

    /// Fixed size in points.
    pub fn fixed(value: f32) -> Self {
        assert!(value >= 0.0, "Fixed size must not be negative: {value}");
        Self {
            sizing: Sizing::Fixed(value),
            value,
            min: None,
            max: None,
        }
    }

    /// Grow to fill available space.
    pub const fn grow() -> Self {
        Self {
            sizing: Sizing::Grow,
            value: 0.0,
            min: None,
            max: None,
        }
    }

    /// Set the lower clamp.
    ///
    /// Fit sizes are clamped to it; any size is raised back to it after shrinking.
    pub fn with_min(mut self, min: f32) -> Self {
        assert!(min >= 0.0, "Size min must not be negative: {min}");
        if let Some(max) = self.max {
            assert!(min <= max, "Size min ({min}) must not exceed max ({max})");
        }
        self.min = Some(min);
        self
    }

    /// Set the upper clamp (only enforced for Fit sizes).
    pub fn with_max(mut self, max: f32) -> Self {
        assert!(max >= 0.0, "Size max must not be negative: {max}");
        if let Some(min) = self.min {
            assert!(min <= max, "Size min ({min}) must not exceed max ({max})");
        }
        self.max = Some(max);
        self
    }

    pub const fn sizing(&self) -> Sizing {
        self.sizing
    }

    /// Resolved size in points
    pub const fn value(&self) -> f32 {
        self.value
    }

    pub const fn min(&self) -> Option<f32> {
        self.min
    }

    pub const fn max(&self) -> Option<f32> {
        self.max
    }

    pub const fn is_fit(&self) -> bool {
        matches!(self.sizing, Sizing::Fit)
    }

    pub const fn is_fixed(&self) -> bool {
        matches!(self.sizing, Sizing::Fixed(_))
    }

    pub const fn is_grow(&self) -> bool {
        matches!(self.sizing, Sizing::Grow)
    }

    pub(crate) fn set_value(&mut self, value: f32) {
        self.value = value;
    }

    /// Clamp `value` to `[min, max]`, whichever are set.
    ///
    /// ```
    /// # use trellis::Size;
    /// let size = Size::fit().with_min(100.0).with_max(200.0);
    /// assert_eq!(size.clamp(40.0), 100.0);
    /// assert_eq!(size.clamp(150.0), 150.0);
    /// assert_eq!(size.clamp(900.0), 200.0);
    /// ```
    pub fn clamp(&self, value: f32) -> f32 {
        let mut value = value;
        if let Some(min) = self.min {
            value = value.max(min);
        }
        if let Some(max) = self.max {
            value = value.min(max);
        }
        value
    }

    /// Reset the resolved value before a fit pass: Fixed sizes return to their
    /// authored value, Grow sizes to zero until a parent distributes space.
    pub(crate) fn reset(&mut self) {
        self.value = match self.sizing {
            Sizing::Fixed(value) => value,
            Sizing::Grow => 0.0,
            Sizing::Fit => self.value,
        };
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::fit()
    }
}

impl From<Sizing> for Size {
    fn from(sizing: Sizing) -> Self {
        match sizing {
            Sizing::Fit => Size::fit(),
            Sizing::Fixed(value) => Size::fixed(value),
            Sizing::Grow => Size::grow(),
        }
    }
}

/// Main axis along which a container lays out its children
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    /// Children are arranged horizontally (left to right)
    #[default]
    LeftToRight,
    /// Children are arranged vertically (top to bottom)
    TopToBottom,
}

/// Resolved position of a node's top-left corner
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Padding around a node's content area
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spacing {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Spacing {
    pub const ZERO: Self = Self::all(0.0);

    /// Create spacing with all sides equal
    pub const fn all(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create spacing with symmetric horizontal and vertical values (CSS-style)
    ///
    /// ```
    /// # use trellis::Spacing;
    /// let spacing = Spacing::symmetric(10.0, 20.0);
    /// assert_eq!(spacing.left, 10.0);
    /// assert_eq!(spacing.right, 10.0);
    /// assert_eq!(spacing.top, 20.0);
    /// assert_eq!(spacing.bottom, 20.0);
    /// ```
    pub const fn symmetric(horizontal: f32, vertical: f32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create spacing from individual top, right, bottom, left values (CSS-style)
    ///
    /// ```
    /// # use trellis::Spacing;
    /// let spacing = Spacing::trbl(10.0, 20.0, 30.0, 40.0);
    /// assert_eq!(spacing.top, 10.0);
    /// assert_eq!(spacing.right, 20.0);
    /// assert_eq!(spacing.bottom, 30.0);
    /// assert_eq!(spacing.left, 40.0);
    /// ```
    pub const fn trbl(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Left + right
    pub const fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Top + bottom
    pub const fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    pub(crate) fn is_non_negative(&self) -> bool {
        self.top >= 0.0 && self.right >= 0.0 && self.bottom >= 0.0 && self.left >= 0.0
    }
}

/// Common paper formats, in points (1/72 inch).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaperSize {
    A1,
    A2,
    A3,
    A4,
    A4Landscape,
    A5,
    B4,
    B5,
}

impl PaperSize {
    /// (width, height) in points
    pub const fn dimensions(self) -> (f32, f32) {
        match self {
            PaperSize::A1 => (1685.0, 2384.0),
            PaperSize::A2 => (1190.0, 1684.0),
            PaperSize::A3 => (842.0, 1190.0),
            PaperSize::A4 => (595.0, 842.0),
            PaperSize::A4Landscape => (842.0, 595.0),
            PaperSize::A5 => (420.0, 595.0),
            PaperSize::B4 => (729.0, 1032.0),
            PaperSize::B5 => (516.0, 729.0),
        }
    }
}
