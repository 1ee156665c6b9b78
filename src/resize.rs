//! Resize planning.
//!
//! Maps a source size into a target box under a [`ResizeMode`], producing
//! the output canvas size and the rectangle the scaled source is drawn into.
//! Pure geometry: no pixel operations, no allocations, `no_std` compatible.
//!
//! Cropping is expressed as a draw rect that overhangs the canvas (negative
//! offset and/or larger extent); the painter clips.
//!
//! # Example
//!
//! ```
//! use zencompose::{Anchor, Point, Resize, ResizeMode, Size};
//!
//! let plan = Resize::new(ResizeMode::Pad, 400, 300)
//!     .anchor(Anchor::Center)
//!     .plan(Size::new(1000, 500))
//!     .unwrap();
//!
//! assert_eq!(plan.canvas, Size::new(400, 300));
//! assert_eq!(plan.draw_size, Size::new(400, 200));
//! assert_eq!(plan.draw_offset, Point::new(0, 50));
//! ```

#[cfg(not(feature = "std"))]
use num_traits::Float as _;

use core::cmp::Ordering;

use crate::anchor::try_resolve_anchor_point;
use crate::geometry::{Anchor, LayoutError, Point, Rect, Size, checked_coord};

/// How to map a source into a target box.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResizeMode {
    /// Exact target size, aspect ratio ignored.
    Stretch,

    /// Scale to fit within the target, preserving aspect ratio.
    /// The canvas is the scaled size; no padding.
    Max,

    /// Scale uniformly, up or down, so the source's shorter side matches the
    /// corresponding target dimension. The canvas is the scaled size.
    Min,

    /// Scale to cover the target, crop the overflow. Canvas is exactly the
    /// target; the anchor (or focus point) picks which part survives.
    #[default]
    Crop,

    /// Scale to fit within the target (up or down), pad to exactly the
    /// target, positioned by the anchor.
    Pad,

    /// Like [`Pad`](Self::Pad), but a source that already fits is placed
    /// unscaled on the target-sized canvas.
    BoxPad,
}

/// Planned geometry for one resize.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResizePlan {
    /// Source dimensions the plan was computed for.
    pub source: Size,
    /// Output canvas dimensions.
    pub canvas: Size,
    /// Dimensions the whole source is scaled to.
    pub draw_size: Size,
    /// Top-left of the scaled source on the canvas. Negative when cropping.
    pub draw_offset: Point,
}

impl ResizePlan {
    /// Plan for a degenerate source: nothing to draw.
    pub const fn empty(source: Size) -> Self {
        Self {
            source,
            canvas: Size::ZERO,
            draw_size: Size::ZERO,
            draw_offset: Point::ORIGIN,
        }
    }

    /// Identity plan: canvas and draw size equal the source.
    pub const fn identity(source: Size) -> Self {
        Self {
            source,
            canvas: source,
            draw_size: source,
            draw_offset: Point::ORIGIN,
        }
    }

    /// Where the scaled source lands on the canvas.
    pub const fn draw_rect(&self) -> Rect {
        Rect::from_origin_size(self.draw_offset, self.draw_size)
    }

    /// Whether there is nothing to draw.
    pub const fn is_empty(&self) -> bool {
        self.canvas.is_empty()
    }

    /// Whether resampling is needed.
    pub fn needs_resize(&self) -> bool {
        self.draw_size != self.source
    }

    /// Whether part of the canvas is left as background.
    pub fn needs_padding(&self) -> bool {
        !self.is_empty() && !self.draw_rect().contains_rect(&Rect::from_size(self.canvas))
    }

    /// Whether part of the scaled source falls outside the canvas.
    pub fn needs_crop(&self) -> bool {
        !self.is_empty() && !Rect::from_size(self.canvas).contains_rect(&self.draw_rect())
    }
}

/// Resize request: mode, target box, anchor.
///
/// A target dimension of 0 is unconstrained and derived from the source
/// aspect ratio.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Resize {
    pub mode: ResizeMode,
    pub width: u32,
    pub height: u32,
    pub anchor: Anchor,
    /// Crop focus as fractions of the source, `(0.0, 0.0)` = top-left.
    pub focus: Option<(f32, f32)>,
}

impl Resize {
    /// Resize into a `width × height` box.
    pub const fn new(mode: ResizeMode, width: u32, height: u32) -> Self {
        Self {
            mode,
            width,
            height,
            anchor: Anchor::Center,
            focus: None,
        }
    }

    /// Constrain only width (height derived from source aspect ratio).
    pub const fn width_only(mode: ResizeMode, width: u32) -> Self {
        Self::new(mode, width, 0)
    }

    /// Constrain only height (width derived from source aspect ratio).
    pub const fn height_only(mode: ResizeMode, height: u32) -> Self {
        Self::new(mode, 0, height)
    }

    /// Set the anchor used for crop and pad positioning.
    pub const fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Keep the source point at `(x, y)` (fractions, clamped to `0..=1`)
    /// as close to the canvas center as the crop allows. Only affects
    /// [`ResizeMode::Crop`]; overrides the anchor on the cropped axis.
    pub const fn focus(mut self, x: f32, y: f32) -> Self {
        self.focus = Some((x, y));
        self
    }

    /// Compute the plan for a source of the given size.
    pub fn plan(&self, source: Size) -> Result<ResizePlan, LayoutError> {
        if self.width == 0 && self.height == 0 {
            return Err(LayoutError::UnconstrainedTarget);
        }
        if source.is_empty() {
            return Ok(ResizePlan::empty(source));
        }

        let target = self.resolve_target(source)?;
        let plan = if self.width == 0 || self.height == 0 {
            self.plan_single_axis(source, target)?
        } else {
            self.plan_box(source, target)?
        };
        log::trace!(
            "resize {:?} {}x{} -> canvas {}x{}, draw {}x{} at ({}, {})",
            self.mode,
            source.width,
            source.height,
            plan.canvas.width,
            plan.canvas.height,
            plan.draw_size.width,
            plan.draw_size.height,
            plan.draw_offset.x,
            plan.draw_offset.y
        );
        Ok(plan)
    }

    /// Fill in an unconstrained target axis from the source aspect ratio.
    fn resolve_target(&self, source: Size) -> Result<Size, LayoutError> {
        let (sw, sh) = (source.width, source.height);
        match (self.width, self.height) {
            (0, h) => Ok(Size::new(scale_round(sw, h, sh)?.max(1), h)),
            (w, 0) => Ok(Size::new(w, scale_round(sh, w, sw)?.max(1))),
            (w, h) => Ok(Size::new(w, h)),
        }
    }

    /// One target axis was derived, so source and target share an aspect
    /// ratio and no mode needs to pad or crop. Handled separately so that
    /// the rounded derived axis can't make the wrong axis constrain.
    fn plan_single_axis(&self, source: Size, target: Size) -> Result<ResizePlan, LayoutError> {
        use ResizeMode::*;
        match self.mode {
            Stretch | Max | Min | Crop | Pad => Ok(scaled(source, target)),
            BoxPad => {
                if source.fits_within(target) {
                    self.placed(source, target, source)
                } else {
                    Ok(scaled(source, target))
                }
            }
        }
    }

    fn plan_box(&self, source: Size, target: Size) -> Result<ResizePlan, LayoutError> {
        use ResizeMode::*;
        match self.mode {
            Stretch => Ok(scaled(source, target)),
            Max => Ok(scaled(source, fit_inside(source, target))),
            Min => Ok(scaled(source, shorter_side_match(source, target)?)),
            Crop => self.crop_cover(source, target),
            Pad => self.placed(source, target, fit_inside(source, target)),
            BoxPad => {
                if source.fits_within(target) {
                    self.placed(source, target, source)
                } else {
                    self.placed(source, target, fit_inside(source, target))
                }
            }
        }
    }

    /// `draw` placed on a `canvas`-sized canvas at the anchor.
    fn placed(&self, source: Size, canvas: Size, draw: Size) -> Result<ResizePlan, LayoutError> {
        Ok(ResizePlan {
            source,
            canvas,
            draw_size: draw,
            draw_offset: try_resolve_anchor_point(canvas, draw, self.anchor, 0, 0)?,
        })
    }

    fn crop_cover(&self, source: Size, target: Size) -> Result<ResizePlan, LayoutError> {
        let (sw, sh) = (u64::from(source.width), u64::from(source.height));
        let (tw, th) = (u64::from(target.width), u64::from(target.height));
        // th/sh < tw/sw: width drives the scale, height overflows.
        let width_drives = th * sw < tw * sh;
        let draw = if width_drives {
            Size::new(target.width, ceil_to_u32(sh * tw, sw)?)
        } else {
            Size::new(ceil_to_u32(sw * th, sh)?, target.height)
        };

        let mut plan = self.placed(source, target, draw)?;
        if let Some((fx, fy)) = self.focus {
            if width_drives {
                plan.draw_offset.y = focus_offset(target.height, draw.height, fy)?;
            } else {
                plan.draw_offset.x = focus_offset(target.width, draw.width, fx)?;
            }
        }
        Ok(plan)
    }
}

/// Plan resizing `source` to `target` with the canvas equal to the target.
pub fn plan_resize(
    source: Size,
    target_width: u32,
    target_height: u32,
    mode: ResizeMode,
    anchor: Anchor,
) -> Result<ResizePlan, LayoutError> {
    Resize::new(mode, target_width, target_height)
        .anchor(anchor)
        .plan(source)
}

// ============================================================================
// Internal geometry
// ============================================================================

fn scaled(source: Size, size: Size) -> ResizePlan {
    ResizePlan {
        source,
        canvas: size,
        draw_size: size,
        draw_offset: Point::ORIGIN,
    }
}

/// Uniform scale that puts the source's shorter side on its target
/// dimension, up or down. A square source takes the larger target side.
fn shorter_side_match(source: Size, target: Size) -> Result<Size, LayoutError> {
    let (sw, sh) = (source.width, source.height);
    let (tw, th) = (target.width, target.height);
    Ok(match sw.cmp(&sh) {
        Ordering::Less => Size::new(tw, scale_round(sh, tw, sw)?.max(1)),
        Ordering::Greater => Size::new(scale_round(sw, th, sh)?.max(1), th),
        Ordering::Equal => {
            let side = tw.max(th);
            Size::new(side, side)
        }
    })
}

/// Compute dimensions that fit inside the target box, preserving aspect ratio.
/// One dimension matches the target; the other is ≤ target.
fn fit_inside(source: Size, target: Size) -> Size {
    let (sw, sh) = (source.width, source.height);
    let (tw, th) = (target.width, target.height);
    let ratio_w = f64::from(tw) / f64::from(sw);
    let ratio_h = f64::from(th) / f64::from(sh);
    if ratio_w <= ratio_h {
        Size::new(tw, proportional(sw, sh, tw, true, tw, th).min(th))
    } else {
        Size::new(proportional(sw, sh, th, false, tw, th).min(tw), th)
    }
}

/// Compute the free dimension proportionally, with snap-aware rounding.
///
/// Given a ratio source (`ratio_w`×`ratio_h`), a fixed dimension (`basis`,
/// `basis_is_width`) and a snap target (`target_w`×`target_h`), snap to
/// whichever candidate (source or target dimension) lies within the
/// rounding loss of the exact value. Keeps 1200×400 → 100×33 at 100 wide
/// instead of 99.
fn proportional(
    ratio_w: u32,
    ratio_h: u32,
    basis: u32,
    basis_is_width: bool,
    target_w: u32,
    target_h: u32,
) -> u32 {
    let ratio = f64::from(ratio_w) / f64::from(ratio_h);

    let snap_amount = if basis_is_width {
        rounding_loss_height(ratio_w, ratio_h, target_h)
    } else {
        rounding_loss_width(ratio_w, ratio_h, target_w)
    };

    let snap_source = if basis_is_width { ratio_h } else { ratio_w };
    let snap_target = if basis_is_width { target_h } else { target_w };

    let exact = if basis_is_width {
        f64::from(basis) / ratio
    } else {
        ratio * f64::from(basis)
    };

    let delta_source = (exact - f64::from(snap_source)).abs();
    let delta_target = (exact - f64::from(snap_target)).abs();

    let v = if delta_source <= snap_amount && delta_source <= delta_target {
        snap_source
    } else if delta_target <= snap_amount {
        snap_target
    } else {
        exact.round() as u32
    };

    v.max(1)
}

/// Rounding loss when the target width is the basis.
fn rounding_loss_width(ratio_w: u32, ratio_h: u32, target_width: u32) -> f64 {
    let ratio = f64::from(ratio_w) / f64::from(ratio_h);
    let recreate_h = f64::from(ratio_h) * (f64::from(target_width) / f64::from(ratio_w));
    (f64::from(target_width) - recreate_h.round() * ratio).abs()
}

/// Rounding loss when the target height is the basis.
fn rounding_loss_height(ratio_w: u32, ratio_h: u32, target_height: u32) -> f64 {
    let ratio = f64::from(ratio_w) / f64::from(ratio_h);
    let recreate_w = f64::from(ratio_w) * (f64::from(target_height) / f64::from(ratio_h));
    (f64::from(target_height) - recreate_w.round() / ratio).abs()
}

/// Crop offset keeping the focus fraction centered, clamped so the scaled
/// source still covers the canvas. Result is in `[canvas - draw, 0]`.
fn focus_offset(canvas: u32, draw: u32, focus: f32) -> Result<i32, LayoutError> {
    let focus = f64::from(focus.clamp(0.0, 1.0));
    let ideal = (f64::from(canvas) / 2.0 - f64::from(draw) * focus).round();
    let min = i64::from(canvas) - i64::from(draw);
    checked_coord((ideal as i64).clamp(min, 0))
}

/// `round(value * num / den)`, erroring when the result exceeds `u32`.
fn scale_round(value: u32, num: u32, den: u32) -> Result<u32, LayoutError> {
    let v = round_div_u64(u64::from(value) * u64::from(num), u64::from(den));
    u32::try_from(v).map_err(|_| LayoutError::DimensionOverflow)
}

/// `round(n / d)`, halves up. `n` may use the full `u64` range.
fn round_div_u64(n: u64, d: u64) -> u64 {
    n / d + u64::from(n % d >= d - n % d)
}

/// `ceil(n / d)`, erroring when the result exceeds `u32`.
fn ceil_to_u32(n: u64, d: u64) -> Result<u32, LayoutError> {
    u32::try_from(n.div_ceil(d)).map_err(|_| LayoutError::DimensionOverflow)
}
