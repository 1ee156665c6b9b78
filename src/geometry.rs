//! Geometry primitives shared by every planner.
//!
//! Sizes are unsigned (negative extents are rejected at the boundary via
//! `TryFrom`), positions are signed so content can sit partially off-canvas.
//! Clipping is the painter's job, not ours.

use core::fmt;

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self::new(0, 0);

    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Swap width and height.
    pub const fn transpose(self) -> Self {
        Self::new(self.height, self.width)
    }

    /// Whether `self` fits inside `other` on both axes.
    pub const fn fits_within(&self, other: Size) -> bool {
        self.width <= other.width && self.height <= other.height
    }
}

impl TryFrom<(i64, i64)> for Size {
    type Error = LayoutError;

    fn try_from((width, height): (i64, i64)) -> Result<Self, Self::Error> {
        if width < 0 || height < 0 {
            return Err(LayoutError::NegativeDimension);
        }
        let width = u32::try_from(width).map_err(|_| LayoutError::DimensionOverflow)?;
        let height = u32::try_from(height).map_err(|_| LayoutError::DimensionOverflow)?;
        Ok(Self { width, height })
    }
}

impl TryFrom<(i32, i32)> for Size {
    type Error = LayoutError;

    fn try_from((width, height): (i32, i32)) -> Result<Self, Self::Error> {
        Self::try_from((i64::from(width), i64::from(height)))
    }
}

/// A position in pixel coordinates. May be negative.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// `(0, 0)`.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a new point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle: signed origin, unsigned extent.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect at `origin` with the given size.
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Rect covering `(0, 0)` to `size`.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge.
    pub const fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge.
    pub const fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Overlap of two rects, `None` when they don't overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = i64::from(self.x).max(i64::from(other.x));
        let top = i64::from(self.y).max(i64::from(other.y));
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= left || bottom <= top {
            return None;
        }
        // Both corners lie inside one of the inputs, so they fit the field types.
        Some(Rect::new(
            left as i32,
            top as i32,
            (right - left) as u32,
            (bottom - top) as u32,
        ))
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        i64::from(other.x) >= i64::from(self.x)
            && i64::from(other.y) >= i64::from(self.y)
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// A named reference position of one rectangle inside another.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Anchor {
    #[default]
    Center,
    Top,
    Bottom,
    Left,
    Right,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Anchor {
    /// Every anchor, row by row from the top-left.
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::Top,
        Anchor::TopRight,
        Anchor::Left,
        Anchor::Center,
        Anchor::Right,
        Anchor::BottomLeft,
        Anchor::Bottom,
        Anchor::BottomRight,
    ];
}

/// Reduced integer aspect ratio, `horizontal:vertical`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct RatioPair {
    pub horizontal: u32,
    pub vertical: u32,
}

impl RatioPair {
    pub const fn new(horizontal: u32, vertical: u32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// `horizontal / vertical` as a real number.
    pub fn value(&self) -> f64 {
        f64::from(self.horizontal) / f64::from(self.vertical)
    }

    /// Size of this ratio at scale `k`, `None` on overflow.
    pub fn scale(&self, k: u32) -> Option<Size> {
        Some(Size::new(
            self.horizontal.checked_mul(k)?,
            self.vertical.checked_mul(k)?,
        ))
    }
}

impl fmt::Display for RatioPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.horizontal, self.vertical)
    }
}

/// Greatest common divisor. `gcd(a, 0) == a`.
pub const fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Reduce `width:height` by their GCD.
///
/// ```
/// use zencompose::{reduce_ratio, RatioPair};
///
/// assert_eq!(reduce_ratio(1920, 1080), Ok(RatioPair::new(16, 9)));
/// ```
pub fn reduce_ratio(width: u32, height: u32) -> Result<RatioPair, LayoutError> {
    if width == 0 || height == 0 {
        return Err(LayoutError::ZeroDimension);
    }
    let d = gcd(width, height);
    Ok(RatioPair::new(width / d, height / d))
}

/// Geometry computation error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LayoutError {
    /// A width or height was negative.
    NegativeDimension,
    /// A dimension that must be positive was zero.
    ZeroDimension,
    /// Both target dimensions of a resize were zero.
    UnconstrainedTarget,
    /// The strip extent leaves no room between the margins.
    StripTooSmall,
    /// A computed dimension does not fit the coordinate types.
    DimensionOverflow,
    /// Corner radius is zero or larger than the canvas.
    InvalidCornerRadius,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::NegativeDimension => "width or height is negative",
            Self::ZeroDimension => "width or height is zero",
            Self::UnconstrainedTarget => "target width and height are both zero",
            Self::StripTooSmall => "strip extent must exceed twice the edge margin",
            Self::DimensionOverflow => "dimension exceeds the coordinate range",
            Self::InvalidCornerRadius => "corner radius must be in 1..=min(width, height)",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for LayoutError {}

/// Clamp a wide intermediate into the `i32` coordinate range.
pub(crate) fn to_coord(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Narrow a wide intermediate to an `i32` coordinate, or fail.
pub(crate) fn checked_coord(v: i64) -> Result<i32, LayoutError> {
    i32::try_from(v).map_err(|_| LayoutError::DimensionOverflow)
}
