//! Image composition geometry: fitting, anchoring, strip layout and corner masks.
//!
//! Pure geometry. Nothing here touches pixels: planners return sizes,
//! rectangles and [`DrawList`]s that a caller-supplied [`Painter`] replays
//! against a raster backend. `no_std` compatible; the planning layer needs
//! `alloc`.
//!
//! # Modules
//!
//! - [`geometry`]: Sizes, points, rectangles, anchors, ratio reduction
//! - [`ratio`]: Classifying and approximating aspect ratios
//! - [`resize`]: Resize modes (Stretch, Max, Min, Crop, Pad, BoxPad) and planning
//! - [`anchor`]: Placing an item inside a container at one of nine anchors
//! - [`orientation`]: EXIF orientation applied to sources before composition
//! - [`compose`]: Strip composition onto a growing canvas
//! - [`mask`]: Rounded-corner cut-out shapes
//! - [`plan`]: Draw operations and the painter interface

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod anchor;
pub mod geometry;
pub mod orientation;
pub mod ratio;
pub mod resize;

#[cfg(feature = "alloc")]
pub mod compose;
#[cfg(feature = "alloc")]
pub mod mask;
#[cfg(feature = "alloc")]
pub mod plan;

#[cfg(feature = "svg")]
pub mod svg;

pub use anchor::{
    HorizontalAlign, TextAnchor, VerticalAlign, anchored_crop, resolve_anchor_point,
    resolve_text_anchor, try_resolve_anchor_point,
};
pub use geometry::{Anchor, LayoutError, Point, RatioPair, Rect, Size, gcd, reduce_ratio};
pub use orientation::Orientation;
pub use ratio::{approximate_ratio_size, classify_ratio};
pub use resize::{Resize, ResizeMode, ResizePlan, plan_resize};

#[cfg(feature = "alloc")]
pub use compose::{
    ComposeError, CompositeCanvas, SourceDecoder, SourceInfo, StripComposer, StripComposition,
    StripDirection, StripOptions, StripState, StripStep, compose_strip, compose_strip_from,
};
#[cfg(feature = "alloc")]
pub use mask::{Path, PointF, RectF, RoundedCornerMask, build_rounded_corner_mask};
#[cfg(feature = "alloc")]
pub use plan::{BlendMode, CanvasColor, DrawList, DrawOp, Painter};
