//! Draw plans: an ordered list of drawing operations for a painter.
//!
//! Planners in this crate never touch pixels. They emit [`DrawOp`]s into a
//! [`DrawList`], and the caller replays the list against whatever raster
//! backend it uses by implementing [`Painter`].
//!
//! ```
//! use zencompose::{Anchor, CanvasColor, DrawList, DrawOp, Resize, ResizeMode, Size};
//!
//! let plan = Resize::new(ResizeMode::Pad, 200, 200)
//!     .plan(Size::new(400, 100))
//!     .unwrap();
//!
//! let mut list = DrawList::new();
//! list.resize(0, &plan, CanvasColor::white())
//!     .watermark(plan.canvas, 1, Size::new(32, 32), Anchor::BottomRight, 8, 8, 0.5);
//! list.round_corners(plan.canvas, 16).unwrap();
//!
//! assert_eq!(list.len(), 7);
//! assert!(matches!(list.ops()[0], DrawOp::NewCanvas { .. }));
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::anchor::{anchored_crop, resolve_anchor_point};
use crate::geometry::{Anchor, LayoutError, Point, Rect, Size};
use crate::mask::{Path, build_rounded_corner_mask};
use crate::orientation::Orientation;
use crate::resize::ResizePlan;

/// Canvas background or fill color.
///
/// `Srgb` is for user-facing colors in standard sRGB. `Linear` is for callers
/// already working in linear light. Both carry alpha.
#[derive(Copy, Clone, Debug, Default)]
pub enum CanvasColor {
    /// Transparent black `[0, 0, 0, 0]`.
    #[default]
    Transparent,
    /// sRGB color with alpha (8-bit per channel).
    Srgb { r: u8, g: u8, b: u8, a: u8 },
    /// Linear RGB color with alpha (unspecified color space).
    Linear { r: f32, g: f32, b: f32, a: f32 },
}

impl CanvasColor {
    /// White, fully opaque.
    pub const fn white() -> Self {
        Self::Srgb {
            r: 255,
            g: 255,
            b: 255,
            a: 255,
        }
    }

    /// Black, fully opaque.
    pub const fn black() -> Self {
        Self::Srgb {
            r: 0,
            g: 0,
            b: 0,
            a: 255,
        }
    }

    /// Whether the color has zero alpha.
    pub fn is_transparent(&self) -> bool {
        match *self {
            Self::Transparent => true,
            Self::Srgb { a, .. } => a == 0,
            Self::Linear { a, .. } => a <= 0.0,
        }
    }
}

// Linear components compare bitwise so that Eq and Hash stay consistent.
impl PartialEq for CanvasColor {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Self::Transparent, Self::Transparent) => true,
            (
                Self::Srgb { r, g, b, a },
                Self::Srgb {
                    r: r2,
                    g: g2,
                    b: b2,
                    a: a2,
                },
            ) => (r, g, b, a) == (r2, g2, b2, a2),
            (
                Self::Linear { r, g, b, a },
                Self::Linear {
                    r: r2,
                    g: g2,
                    b: b2,
                    a: a2,
                },
            ) => {
                [r, g, b, a].map(f32::to_bits) == [r2, g2, b2, a2].map(f32::to_bits)
            }
            _ => false,
        }
    }
}

impl Eq for CanvasColor {}

impl core::hash::Hash for CanvasColor {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match *self {
            Self::Transparent => {}
            Self::Srgb { r, g, b, a } => [r, g, b, a].hash(state),
            Self::Linear { r, g, b, a } => [r, g, b, a].map(f32::to_bits).hash(state),
        }
    }
}

/// How drawn content combines with what is already on the canvas.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Source over destination.
    #[default]
    Normal,
    /// Source replaces destination, alpha included.
    Replace,
    /// Destination is cleared wherever the source covers.
    Erase,
}

/// One drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Start a fresh canvas filled with `background`.
    NewCanvas { size: Size, background: CanvasColor },
    /// Resize the current canvas per `plan`: its content is redrawn at
    /// `plan.draw_rect()` on a `plan.canvas`-sized canvas, the rest is
    /// filled with `background`.
    ResizeCanvas {
        plan: ResizePlan,
        background: CanvasColor,
    },
    /// Draw source number `source` into `dest`, after applying
    /// `orientation` to it. `dest` may extend past the canvas.
    Blit {
        source: usize,
        orientation: Orientation,
        dest: Rect,
        blend: BlendMode,
        opacity: f32,
    },
    /// Fill a region.
    Fill {
        path: Path,
        color: CanvasColor,
        blend: BlendMode,
    },
}

/// Receives draw operations. Implemented by the caller's raster backend.
pub trait Painter {
    type Error;

    fn paint(&mut self, op: &DrawOp) -> Result<(), Self::Error>;
}

/// Ordered list of draw operations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawList {
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn push(&mut self, op: DrawOp) -> &mut Self {
        self.ops.push(op);
        self
    }

    pub fn new_canvas(&mut self, size: Size, background: CanvasColor) -> &mut Self {
        self.push(DrawOp::NewCanvas { size, background })
    }

    pub fn resize_canvas(&mut self, plan: ResizePlan, background: CanvasColor) -> &mut Self {
        self.push(DrawOp::ResizeCanvas { plan, background })
    }

    /// Opaque, unrotated blit.
    pub fn blit(&mut self, source: usize, dest: Rect) -> &mut Self {
        self.blit_with(source, Orientation::Identity, dest, BlendMode::Normal, 1.0)
    }

    pub fn blit_with(
        &mut self,
        source: usize,
        orientation: Orientation,
        dest: Rect,
        blend: BlendMode,
        opacity: f32,
    ) -> &mut Self {
        self.push(DrawOp::Blit {
            source,
            orientation,
            dest,
            blend,
            opacity: opacity.clamp(0.0, 1.0),
        })
    }

    /// Render `source` onto a new canvas according to a resize plan.
    pub fn resize(&mut self, source: usize, plan: &ResizePlan, background: CanvasColor) -> &mut Self {
        self.new_canvas(plan.canvas, background);
        if plan.is_empty() {
            return self;
        }
        self.blit(source, plan.draw_rect())
    }

    /// Cut a `size` region out of a `source_size` source at `anchor`.
    /// The new canvas is the clipped region.
    pub fn crop(
        &mut self,
        source: usize,
        source_size: Size,
        size: Size,
        anchor: Anchor,
        offset_x: i32,
        offset_y: i32,
    ) -> &mut Self {
        let region = anchored_crop(source_size, size, anchor, offset_x, offset_y);
        self.new_canvas(region.size(), CanvasColor::Transparent);
        if region.is_empty() {
            return self;
        }
        let dest = Rect::from_origin_size(
            Point::new(region.x.saturating_neg(), region.y.saturating_neg()),
            source_size,
        );
        self.blit(source, dest)
    }

    /// Overlay `mark` at `anchor` on a `canvas`-sized canvas.
    #[allow(clippy::too_many_arguments)]
    pub fn watermark(
        &mut self,
        canvas: Size,
        source: usize,
        mark: Size,
        anchor: Anchor,
        offset_x: i32,
        offset_y: i32,
        opacity: f32,
    ) -> &mut Self {
        let origin = resolve_anchor_point(canvas, mark, anchor, offset_x, offset_y);
        self.blit_with(
            source,
            Orientation::Identity,
            Rect::from_origin_size(origin, mark),
            BlendMode::Normal,
            opacity,
        )
    }

    /// Make the corners of a `canvas`-sized canvas transparent.
    pub fn round_corners(&mut self, canvas: Size, radius: u32) -> Result<&mut Self, LayoutError> {
        let mask = build_rounded_corner_mask(canvas.width, canvas.height, radius)?;
        for path in mask.into_corners() {
            self.push(DrawOp::Fill {
                path,
                color: CanvasColor::Transparent,
                blend: BlendMode::Replace,
            });
        }
        Ok(self)
    }

    /// Append all of `other`'s operations.
    pub fn extend(&mut self, other: DrawList) -> &mut Self {
        self.ops.extend(other.ops);
        self
    }

    /// Apply every operation in order, stopping at the first error.
    pub fn replay<P: Painter>(&self, painter: &mut P) -> Result<(), P::Error> {
        for op in &self.ops {
            painter.paint(op)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DrawList {
    type Item = &'a DrawOp;
    type IntoIter = core::slice::Iter<'a, DrawOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resize::{ResizeMode, plan_resize};

    #[derive(Default)]
    struct Recorder {
        seen: usize,
        fail_at: Option<usize>,
    }

    impl Painter for Recorder {
        type Error = usize;

        fn paint(&mut self, _op: &DrawOp) -> Result<(), usize> {
            if self.fail_at == Some(self.seen) {
                return Err(self.seen);
            }
            self.seen += 1;
            Ok(())
        }
    }

    #[test]
    fn resize_emits_canvas_then_blit() {
        let plan = plan_resize(Size::new(1000, 500), 400, 300, ResizeMode::Pad, Anchor::Top).unwrap();
        let mut list = DrawList::new();
        list.resize(3, &plan, CanvasColor::black());
        assert_eq!(
            list.ops(),
            &[
                DrawOp::NewCanvas {
                    size: Size::new(400, 300),
                    background: CanvasColor::black()
                },
                DrawOp::Blit {
                    source: 3,
                    orientation: Orientation::Identity,
                    dest: Rect::new(0, 0, 400, 200),
                    blend: BlendMode::Normal,
                    opacity: 1.0
                },
            ]
        );
    }

    #[test]
    fn crop_blits_with_negative_offset() {
        let mut list = DrawList::new();
        list.crop(0, Size::new(100, 80), Size::new(40, 20), Anchor::BottomRight, 5, 5);
        assert_eq!(
            list.ops()[0],
            DrawOp::NewCanvas {
                size: Size::new(40, 20),
                background: CanvasColor::Transparent
            }
        );
        let DrawOp::Blit { dest, .. } = list.ops()[1] else {
            panic!("expected blit");
        };
        assert_eq!(dest, Rect::new(-55, -55, 100, 80));
    }

    #[test]
    fn watermark_is_anchored_and_clamped() {
        let mut list = DrawList::new();
        list.watermark(Size::new(100, 100), 1, Size::new(20, 20), Anchor::BottomRight, 5, 5, 1.7);
        let DrawOp::Blit { dest, opacity, .. } = list.ops()[0] else {
            panic!("expected blit");
        };
        assert_eq!(dest, Rect::new(75, 75, 20, 20));
        assert_eq!(opacity, 1.0);
    }

    #[test]
    fn round_corners_adds_four_replace_fills() {
        let mut list = DrawList::new();
        list.round_corners(Size::new(50, 40), 8).unwrap();
        assert_eq!(list.len(), 4);
        for op in &list {
            assert!(matches!(
                op,
                DrawOp::Fill {
                    color: CanvasColor::Transparent,
                    blend: BlendMode::Replace,
                    ..
                }
            ));
        }
        assert_eq!(
            DrawList::new().round_corners(Size::new(50, 40), 0).err(),
            Some(LayoutError::InvalidCornerRadius)
        );
    }

    #[test]
    fn replay_stops_at_first_error() {
        let mut list = DrawList::new();
        list.new_canvas(Size::new(1, 1), CanvasColor::Transparent)
            .blit(0, Rect::new(0, 0, 1, 1))
            .blit(1, Rect::new(0, 0, 1, 1));
        let mut ok = Recorder::default();
        assert_eq!(list.replay(&mut ok), Ok(()));
        assert_eq!(ok.seen, 3);

        let mut failing = Recorder {
            fail_at: Some(1),
            ..Recorder::default()
        };
        assert_eq!(list.replay(&mut failing), Err(1));
        assert_eq!(failing.seen, 1);
    }

    #[test]
    fn color_equality_and_transparency() {
        assert_eq!(CanvasColor::white(), CanvasColor::white());
        assert_ne!(CanvasColor::white(), CanvasColor::black());
        assert!(CanvasColor::Transparent.is_transparent());
        assert!(
            CanvasColor::Srgb {
                r: 9,
                g: 9,
                b: 9,
                a: 0
            }
            .is_transparent()
        );
        let lin = CanvasColor::Linear {
            r: 0.5,
            g: 0.25,
            b: 0.0,
            a: 1.0,
        };
        assert_eq!(lin, lin);
        assert!(!lin.is_transparent());
    }
}
