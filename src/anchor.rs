//! Anchor-based placement.
//!
//! Every anchor splits into one alignment per axis. Placement is then a 1-D
//! problem solved twice:
//!
//! ```text
//!   Start   →  offset
//!   Center  →  (container - item) / 2        (offset ignored)
//!   End     →  container - item - offset
//! ```
//!
//! The text variant solves the same table with a zero-size item, so the
//! returned point is the reference the text layout aligns around rather than
//! a top-left corner.
//!
//! ```
//! use zencompose::{Anchor, Point, Size, resolve_anchor_point};
//!
//! let p = resolve_anchor_point(Size::new(100, 100), Size::new(20, 20), Anchor::BottomRight, 5, 5);
//! assert_eq!(p, Point::new(75, 75));
//! ```

use crate::geometry::{Anchor, LayoutError, Point, Rect, Size, checked_coord, to_coord};

/// Horizontal text alignment around a reference point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical text alignment around a reference point.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalAlign {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Reference point and alignment flags for anchored text.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextAnchor {
    /// Point the text is aligned around.
    pub origin: Point,
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
}

impl Anchor {
    /// Horizontal component of this anchor.
    pub const fn horizontal(self) -> HorizontalAlign {
        match self {
            Anchor::TopLeft | Anchor::Left | Anchor::BottomLeft => HorizontalAlign::Left,
            Anchor::Top | Anchor::Center | Anchor::Bottom => HorizontalAlign::Center,
            Anchor::TopRight | Anchor::Right | Anchor::BottomRight => HorizontalAlign::Right,
        }
    }

    /// Vertical component of this anchor.
    pub const fn vertical(self) -> VerticalAlign {
        match self {
            Anchor::TopLeft | Anchor::Top | Anchor::TopRight => VerticalAlign::Top,
            Anchor::Left | Anchor::Center | Anchor::Right => VerticalAlign::Center,
            Anchor::BottomLeft | Anchor::Bottom | Anchor::BottomRight => VerticalAlign::Bottom,
        }
    }

    /// Recombine per-axis alignments into an anchor.
    pub const fn from_alignment(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        use HorizontalAlign as H;
        use VerticalAlign as V;
        match (horizontal, vertical) {
            (H::Left, V::Top) => Anchor::TopLeft,
            (H::Center, V::Top) => Anchor::Top,
            (H::Right, V::Top) => Anchor::TopRight,
            (H::Left, V::Center) => Anchor::Left,
            (H::Center, V::Center) => Anchor::Center,
            (H::Right, V::Center) => Anchor::Right,
            (H::Left, V::Bottom) => Anchor::BottomLeft,
            (H::Center, V::Bottom) => Anchor::Bottom,
            (H::Right, V::Bottom) => Anchor::BottomRight,
        }
    }
}

#[derive(Copy, Clone)]
enum Align {
    Start,
    Center,
    End,
}

impl From<HorizontalAlign> for Align {
    fn from(h: HorizontalAlign) -> Self {
        match h {
            HorizontalAlign::Left => Align::Start,
            HorizontalAlign::Center => Align::Center,
            HorizontalAlign::Right => Align::End,
        }
    }
}

impl From<VerticalAlign> for Align {
    fn from(v: VerticalAlign) -> Self {
        match v {
            VerticalAlign::Top => Align::Start,
            VerticalAlign::Center => Align::Center,
            VerticalAlign::Bottom => Align::End,
        }
    }
}

/// Start of an `item`-long span inside a `container`-long span.
/// Negative when the item overhangs the container.
fn align_1d(container: u32, item: u32, offset: i32, align: Align) -> i64 {
    let space = i64::from(container) - i64::from(item);
    match align {
        Align::Start => i64::from(offset),
        Align::Center => space / 2,
        Align::End => space - i64::from(offset),
    }
}

/// Top-left point at which `item` sits inside `container` for `anchor`.
///
/// `offset_x` / `offset_y` push the item inward from whichever edges the
/// anchor names; axes the anchor centers on ignore their offset.
///
/// Coordinates outside the `i32` range saturate. Use
/// [`try_resolve_anchor_point`] to get an error instead.
pub fn resolve_anchor_point(
    container: Size,
    item: Size,
    anchor: Anchor,
    offset_x: i32,
    offset_y: i32,
) -> Point {
    let (x, y) = align_2d(container, item, anchor, offset_x, offset_y);
    Point::new(to_coord(x), to_coord(y))
}

/// [`resolve_anchor_point`], failing with
/// [`LayoutError::DimensionOverflow`] when a coordinate leaves the `i32`
/// range.
pub fn try_resolve_anchor_point(
    container: Size,
    item: Size,
    anchor: Anchor,
    offset_x: i32,
    offset_y: i32,
) -> Result<Point, LayoutError> {
    let (x, y) = align_2d(container, item, anchor, offset_x, offset_y);
    Ok(Point::new(checked_coord(x)?, checked_coord(y)?))
}

fn align_2d(container: Size, item: Size, anchor: Anchor, offset_x: i32, offset_y: i32) -> (i64, i64) {
    (
        align_1d(container.width, item.width, offset_x, anchor.horizontal().into()),
        align_1d(container.height, item.height, offset_y, anchor.vertical().into()),
    )
}

/// Reference point and alignment for drawing text at `anchor`.
///
/// `BottomRight` yields the point `offset` in from the bottom-right corner
/// with right/bottom alignment; `Center` yields the container center.
/// The origin saturates like [`resolve_anchor_point`].
pub fn resolve_text_anchor(
    container: Size,
    anchor: Anchor,
    offset_x: i32,
    offset_y: i32,
) -> TextAnchor {
    TextAnchor {
        origin: resolve_anchor_point(container, Size::ZERO, anchor, offset_x, offset_y),
        horizontal: anchor.horizontal(),
        vertical: anchor.vertical(),
    }
}

/// Region of `container` covered by an `item`-sized box at `anchor`.
///
/// The box is clipped to the container; an empty rect at the anchor point
/// is returned when they don't overlap at all. The anchor point saturates
/// like [`resolve_anchor_point`].
pub fn anchored_crop(
    container: Size,
    item: Size,
    anchor: Anchor,
    offset_x: i32,
    offset_y: i32,
) -> Rect {
    let origin = resolve_anchor_point(container, item, anchor, offset_x, offset_y);
    let placed = Rect::from_origin_size(origin, item);
    placed
        .intersect(&Rect::from_size(container))
        .unwrap_or(Rect::from_origin_size(origin, Size::ZERO))
}
