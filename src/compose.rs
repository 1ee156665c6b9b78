//! Strip composition: laying sources side by side on one growing canvas.
//!
//! Each source is normalized to the strip's inner extent (Pad, centered,
//! unconstrained along the strip), then the canvas is extended with a
//! BoxPad resize anchored at the leading edge so earlier content stays put.
//!
//! ```text
//!   ┌──────────────────────────────────────┐  ─┬─
//!   │ margin                               │   │
//!   │   ┌──────┐ gap ┌────┐ gap ┌───────┐  │   │ extent
//!   │   │  0   │     │ 1  │     │   2   │  │   │
//!   │   └──────┘     └────┘     └───────┘  │   │
//!   │                              margin  │   │
//!   └──────────────────────────────────────┘  ─┴─
//! ```
//!
//! Vertical strips are the transpose.
//!
//! ```
//! use zencompose::{Size, StripDirection, StripOptions, compose_strip};
//!
//! let options = StripOptions::new(StripDirection::Horizontal, 100).gap(5).margin(10);
//! let canvas = compose_strip(&[Size::new(160, 160), Size::new(120, 160)], &options)
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(canvas.size, Size::new(165, 100));
//! ```

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;

use crate::geometry::{Anchor, LayoutError, Point, Rect, Size, checked_coord};
use crate::orientation::Orientation;
use crate::plan::{BlendMode, CanvasColor, DrawList};
use crate::resize::{ResizeMode, ResizePlan, plan_resize};

/// Axis along which sources are laid out.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum StripDirection {
    /// Left to right; the strip extent is the canvas height.
    #[default]
    Horizontal,
    /// Top to bottom; the strip extent is the canvas width.
    Vertical,
}

impl StripDirection {
    /// Extent of `size` along the strip.
    fn along(self, size: Size) -> u32 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    /// Size from (along, across) components.
    fn size(self, along: u32, across: u32) -> Size {
        match self {
            Self::Horizontal => Size::new(along, across),
            Self::Vertical => Size::new(across, along),
        }
    }

    fn point(self, along: i64, across: i64) -> Result<Point, LayoutError> {
        let (along, across) = (checked_coord(along)?, checked_coord(across)?);
        Ok(match self {
            Self::Horizontal => Point::new(along, across),
            Self::Vertical => Point::new(across, along),
        })
    }

    /// Edge that stays fixed while the canvas grows.
    fn leading_anchor(self) -> Anchor {
        match self {
            Self::Horizontal => Anchor::Left,
            Self::Vertical => Anchor::Top,
        }
    }
}

/// Strip layout settings.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct StripOptions {
    pub direction: StripDirection,
    /// Canvas size across the strip (height for horizontal strips).
    pub extent: u32,
    /// Space between neighbouring sources.
    pub gap: u32,
    /// Space between the sources and every canvas edge.
    pub margin: u32,
    pub background: CanvasColor,
}

impl StripOptions {
    pub const fn new(direction: StripDirection, extent: u32) -> Self {
        Self {
            direction,
            extent,
            gap: 0,
            margin: 0,
            background: CanvasColor::Transparent,
        }
    }

    pub const fn gap(mut self, gap: u32) -> Self {
        self.gap = gap;
        self
    }

    pub const fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    pub const fn background(mut self, background: CanvasColor) -> Self {
        self.background = background;
        self
    }

    /// Extent left for content between the two margins.
    pub fn inner_extent(&self) -> Result<u32, LayoutError> {
        self.margin
            .checked_mul(2)
            .and_then(|m| self.extent.checked_sub(m))
            .filter(|&inner| inner > 0)
            .ok_or(LayoutError::StripTooSmall)
    }
}

/// Canvas accumulated by one composition run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeCanvas {
    pub size: Size,
    pub background: CanvasColor,
    /// Where each source was drawn, in push order.
    pub placements: Vec<Rect>,
}

/// What one [`StripComposer::push`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StripStep {
    /// Zero-based position of the source in the strip.
    pub index: usize,
    /// How the source was scaled to the strip extent.
    pub normalized: ResizePlan,
    /// How the existing canvas was extended. `None` for the first source.
    pub grow: Option<ResizePlan>,
    /// Canvas size after this step.
    pub canvas: Size,
    /// Where the normalized source is drawn.
    pub dest: Rect,
}

/// Where a composition run stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StripState {
    /// Nothing placed yet.
    Empty,
    /// First source placed; canvas created.
    Seeded,
    /// At least two sources placed.
    Growing,
}

/// Incremental strip composer. Consumed by [`finish`](Self::finish).
#[derive(Clone, Debug)]
pub struct StripComposer {
    options: StripOptions,
    inner: u32,
    canvas: Option<CompositeCanvas>,
}

impl StripComposer {
    pub fn new(options: StripOptions) -> Result<Self, LayoutError> {
        let inner = options.inner_extent()?;
        Ok(Self {
            options,
            inner,
            canvas: None,
        })
    }

    pub fn options(&self) -> &StripOptions {
        &self.options
    }

    pub fn state(&self) -> StripState {
        match &self.canvas {
            None => StripState::Empty,
            Some(c) if c.placements.len() == 1 => StripState::Seeded,
            Some(_) => StripState::Growing,
        }
    }

    /// Canvas so far, `None` before the first source.
    pub fn canvas(&self) -> Option<&CompositeCanvas> {
        self.canvas.as_ref()
    }

    /// Scale `source` to the strip's inner extent.
    pub fn normalize(&self, source: Size) -> Result<ResizePlan, LayoutError> {
        if source.is_empty() {
            return Err(LayoutError::ZeroDimension);
        }
        let target = self.options.direction.size(0, self.inner);
        plan_resize(source, target.width, target.height, ResizeMode::Pad, Anchor::Center)
    }

    /// Place the next source.
    pub fn push(&mut self, source: Size) -> Result<StripStep, LayoutError> {
        let dir = self.options.direction;
        let (margin, gap, extent) = (self.options.margin, self.options.gap, self.options.extent);
        let normalized = self.normalize(source)?;
        let item = normalized.canvas;
        let along = dir.along(item);

        let step = match self.canvas.as_mut() {
            None => {
                let length = along
                    .checked_add(2 * margin)
                    .ok_or(LayoutError::DimensionOverflow)?;
                let size = dir.size(length, extent);
                let dest = Rect::from_origin_size(
                    dir.point(i64::from(margin), i64::from(margin))?,
                    item,
                );
                self.canvas = Some(CompositeCanvas {
                    size,
                    background: self.options.background,
                    placements: Vec::from([dest]),
                });
                StripStep {
                    index: 0,
                    normalized,
                    grow: None,
                    canvas: size,
                    dest,
                }
            }
            Some(canvas) => {
                let current = dir.along(canvas.size);
                let length = current
                    .checked_add(gap)
                    .and_then(|l| l.checked_add(along))
                    .ok_or(LayoutError::DimensionOverflow)?;
                let target = dir.size(length, extent);
                let grow = plan_resize(
                    canvas.size,
                    target.width,
                    target.height,
                    ResizeMode::BoxPad,
                    dir.leading_anchor(),
                )?;
                let start = i64::from(current) - i64::from(margin) + i64::from(gap);
                let dest = Rect::from_origin_size(dir.point(start, i64::from(margin))?, item);
                canvas.size = grow.canvas;
                canvas.placements.push(dest);
                StripStep {
                    index: canvas.placements.len() - 1,
                    normalized,
                    grow: Some(grow),
                    canvas: grow.canvas,
                    dest,
                }
            }
        };
        log::debug!(
            "strip step {}: {}x{} -> {}x{} at ({}, {}), canvas {}x{}",
            step.index,
            source.width,
            source.height,
            item.width,
            item.height,
            step.dest.x,
            step.dest.y,
            step.canvas.width,
            step.canvas.height
        );
        Ok(step)
    }

    /// Finished canvas, `None` when no source was pushed.
    pub fn finish(self) -> Option<CompositeCanvas> {
        self.canvas
    }
}

/// Compose `sources` into one strip canvas. `Ok(None)` for an empty list.
pub fn compose_strip(
    sources: &[Size],
    options: &StripOptions,
) -> Result<Option<CompositeCanvas>, LayoutError> {
    let mut composer = StripComposer::new(*options)?;
    for &source in sources {
        composer.push(source)?;
    }
    Ok(composer.finish())
}

/// Decoded properties of a source.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SourceInfo {
    /// Stored pixel dimensions.
    pub size: Size,
    /// Transform to apply before composition.
    pub orientation: Orientation,
}

impl SourceInfo {
    pub const fn new(size: Size) -> Self {
        Self {
            size,
            orientation: Orientation::Identity,
        }
    }

    /// Size after orientation.
    pub fn display_size(&self) -> Size {
        self.orientation.apply_to(self.size)
    }
}

/// Reads source dimensions. Implemented by the caller's decoding layer.
pub trait SourceDecoder {
    type Source;
    type Error;

    fn read_info(&mut self, source: &Self::Source) -> Result<SourceInfo, Self::Error>;
}

/// Finished strip and the operations that render it.
#[derive(Clone, Debug, PartialEq)]
pub struct StripComposition {
    pub canvas: CompositeCanvas,
    /// `Blit` ops refer to sources by their index in the input slice.
    pub draw: DrawList,
}

/// Read, lay out and plan drawing of `sources`.
///
/// Stops at the first source that fails to decode; no partial result is
/// returned. `Ok(None)` for an empty list.
pub fn compose_strip_from<D: SourceDecoder>(
    decoder: &mut D,
    sources: &[D::Source],
    options: &StripOptions,
) -> Result<Option<StripComposition>, ComposeError<D::Error>> {
    let mut composer = StripComposer::new(*options)?;
    let mut draw = DrawList::new();
    for (index, source) in sources.iter().enumerate() {
        let info = decoder
            .read_info(source)
            .map_err(|error| ComposeError::Source { index, error })?;
        let step = composer.push(info.display_size())?;
        match step.grow {
            None => draw.new_canvas(step.canvas, options.background),
            Some(grow) => draw.resize_canvas(grow, options.background),
        };
        draw.blit_with(index, info.orientation, step.dest, BlendMode::Normal, 1.0);
    }
    Ok(composer
        .finish()
        .map(|canvas| StripComposition { canvas, draw }))
}

/// Failure of a composition run that reads sources.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComposeError<E> {
    /// Invalid geometry.
    Layout(LayoutError),
    /// The decoder failed on source `index`.
    Source { index: usize, error: E },
}

impl<E> From<LayoutError> for ComposeError<E> {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

impl<E: fmt::Display> fmt::Display for ComposeError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(e) => write!(f, "layout: {e}"),
            Self::Source { index, error } => write!(f, "source {index}: {error}"),
        }
    }
}

impl<E: core::error::Error + 'static> core::error::Error for ComposeError<E> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Layout(e) => Some(e),
            Self::Source { error, .. } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::DrawOp;

    fn horizontal() -> StripOptions {
        StripOptions::new(StripDirection::Horizontal, 100)
            .gap(5)
            .margin(10)
    }

    #[test]
    fn two_sources_grow_the_canvas() {
        let mut c = StripComposer::new(horizontal()).unwrap();
        assert_eq!(c.state(), StripState::Empty);

        let first = c.push(Size::new(160, 160)).unwrap();
        assert_eq!(first.normalized.canvas, Size::new(80, 80));
        assert_eq!(first.canvas, Size::new(100, 100));
        assert_eq!(first.dest, Rect::new(10, 10, 80, 80));
        assert!(first.grow.is_none());
        assert_eq!(c.state(), StripState::Seeded);

        let second = c.push(Size::new(120, 160)).unwrap();
        assert_eq!(second.normalized.canvas, Size::new(60, 80));
        assert_eq!(second.canvas, Size::new(165, 100));
        assert_eq!(second.dest, Rect::new(95, 10, 60, 80));
        let grow = second.grow.unwrap();
        assert_eq!(grow.draw_rect(), Rect::new(0, 0, 100, 100));
        assert_eq!(c.state(), StripState::Growing);

        let canvas = c.finish().unwrap();
        assert_eq!(canvas.size, Size::new(165, 100));
        assert_eq!(canvas.placements.len(), 2);
    }

    #[test]
    fn trailing_margin_is_preserved() {
        let sources = [Size::new(30, 10), Size::new(10, 40), Size::new(50, 50)];
        let canvas = compose_strip(&sources, &horizontal()).unwrap().unwrap();
        let last = canvas.placements.last().unwrap();
        assert_eq!(
            i64::from(canvas.size.width) - last.right(),
            i64::from(horizontal().margin)
        );
        for pair in canvas.placements.windows(2) {
            assert_eq!(pair[1].x as i64 - pair[0].right(), 5);
        }
    }

    #[test]
    fn vertical_is_the_transpose() {
        let h = horizontal();
        let v = StripOptions {
            direction: StripDirection::Vertical,
            ..h
        };
        let sources = [Size::new(160, 160), Size::new(120, 160), Size::new(40, 90)];
        let transposed: Vec<Size> = sources.iter().map(|s| s.transpose()).collect();
        let a = compose_strip(&sources, &h).unwrap().unwrap();
        let b = compose_strip(&transposed, &v).unwrap().unwrap();
        assert_eq!(a.size.transpose(), b.size);
        for (ra, rb) in a.placements.iter().zip(&b.placements) {
            assert_eq!((ra.x, ra.y, ra.width, ra.height), (rb.y, rb.x, rb.height, rb.width));
        }
    }

    #[test]
    fn empty_list_has_no_canvas() {
        assert_eq!(compose_strip(&[], &horizontal()), Ok(None));
    }

    #[test]
    fn invalid_options_and_sources() {
        let tight = StripOptions::new(StripDirection::Horizontal, 20).margin(10);
        assert_eq!(
            StripComposer::new(tight).err(),
            Some(LayoutError::StripTooSmall)
        );
        assert_eq!(
            StripComposer::new(StripOptions::new(StripDirection::Vertical, 0)).err(),
            Some(LayoutError::StripTooSmall)
        );
        let mut c = StripComposer::new(horizontal()).unwrap();
        assert_eq!(c.push(Size::new(0, 10)), Err(LayoutError::ZeroDimension));
        assert_eq!(c.state(), StripState::Empty);
    }

    #[test]
    fn extent_strictly_increases() {
        let mut c = StripComposer::new(horizontal().gap(0)).unwrap();
        let mut last = 0;
        for s in [Size::new(1, 1000), Size::new(3, 7), Size::new(1000, 1)] {
            let step = c.push(s).unwrap();
            assert!(step.canvas.width > last);
            assert_eq!(step.canvas.height, 100);
            last = step.canvas.width;
        }
    }

    #[test]
    fn placement_past_the_coordinate_range_is_an_error() {
        let options = StripOptions::new(StripDirection::Horizontal, 1);
        let mut c = StripComposer::new(options).unwrap();
        let first = c.push(Size::new(1 << 31, 1)).unwrap();
        assert_eq!(first.canvas, Size::new(1 << 31, 1));
        assert_eq!(c.push(Size::new(1, 1)), Err(LayoutError::DimensionOverflow));
    }

    struct Fixed;

    impl SourceDecoder for Fixed {
        type Source = Result<SourceInfo, &'static str>;
        type Error = &'static str;

        fn read_info(&mut self, source: &Self::Source) -> Result<SourceInfo, &'static str> {
            *source
        }
    }

    #[test]
    fn compose_from_decoder_emits_draw_list() {
        let rotated = SourceInfo {
            size: Size::new(160, 120),
            orientation: Orientation::Rotate90,
        };
        let sources = [Ok(SourceInfo::new(Size::new(160, 160))), Ok(rotated)];
        let out = compose_strip_from(&mut Fixed, &sources, &horizontal())
            .unwrap()
            .unwrap();
        // Rotated 160×120 displays as 120×160 → 60×80.
        assert_eq!(out.canvas.size, Size::new(165, 100));
        let ops = out.draw.ops();
        assert_eq!(ops.len(), 4);
        assert!(matches!(ops[0], DrawOp::NewCanvas { size, .. } if size == Size::new(100, 100)));
        assert!(matches!(ops[2], DrawOp::ResizeCanvas { .. }));
        assert!(matches!(
            ops[3],
            DrawOp::Blit {
                source: 1,
                orientation: Orientation::Rotate90,
                ..
            }
        ));
    }

    #[test]
    fn decoder_failure_aborts_the_run() {
        let sources = [
            Ok(SourceInfo::new(Size::new(10, 10))),
            Err("truncated"),
            Ok(SourceInfo::new(Size::new(10, 10))),
        ];
        let err = compose_strip_from(&mut Fixed, &sources, &horizontal()).unwrap_err();
        assert_eq!(
            err,
            ComposeError::Source {
                index: 1,
                error: "truncated"
            }
        );
        assert_eq!(format!("{err}"), "source 1: truncated");
    }
}
