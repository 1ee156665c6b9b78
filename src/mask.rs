//! Rounded-corner masks.
//!
//! One corner shape is built at the top-left and the other three are exact
//! quarter-turn rotations of it, translated into place. The shapes are the
//! regions to *remove*: the caller fills them with a replace/erase blend to
//! make the canvas corners transparent.
//!
//! ```text
//!   (-0.5,-0.5) ┌──────────┐ (r-0.5, -0.5)
//!               │█████▀▀   │
//!               │███▀      │   █ = cut-out, the square minus the disk of
//!               │█▀        │       radius r centred at (r-0.5, r-0.5)
//!               │▀         │
//!               └──────────┘
//! ```
//!
//! The half-pixel inset puts the shape on pixel centres; the `+ 1` in the
//! translation for the right and bottom corners mirrors it, so all four
//! corners sit flush against the canvas edges.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(not(feature = "std"))]
use num_traits::Float as _;

use crate::geometry::LayoutError;

/// A point in continuous canvas coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in continuous coordinates.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub fn center(&self) -> PointF {
        PointF::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A closed polygon.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    points: Vec<PointF>,
}

impl Path {
    pub fn new(points: Vec<PointF>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[PointF] {
        &self.points
    }

    /// Bounding box. Zero-sized at the origin for an empty path.
    pub fn bounds(&self) -> RectF {
        let Some(first) = self.points.first() else {
            return RectF::default();
        };
        let (mut min, mut max) = (*first, *first);
        for p in &self.points[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        RectF {
            x: min.x,
            y: min.y,
            width: max.x - min.x,
            height: max.y - min.y,
        }
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Path {
        Path::new(
            self.points
                .iter()
                .map(|p| PointF::new(p.x + dx, p.y + dy))
                .collect(),
        )
    }

    /// Rotate clockwise (y axis pointing down) by `turns` × 90° about the
    /// centre of the bounding box. Exact: no trigonometry involved.
    pub fn rotate_quarter_turns(&self, turns: u8) -> Path {
        let c = self.bounds().center();
        let turns = turns & 3;
        Path::new(
            self.points
                .iter()
                .map(|p| {
                    let (dx, dy) = (p.x - c.x, p.y - c.y);
                    let (rx, ry) = match turns {
                        0 => (dx, dy),
                        1 => (-dy, dx),
                        2 => (-dx, -dy),
                        _ => (dy, -dx),
                    };
                    PointF::new(c.x + rx, c.y + ry)
                })
                .collect(),
        )
    }

    /// Even-odd point-in-polygon test.
    pub fn contains(&self, p: PointF) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (self.points[i], self.points[j]);
            if (a.y > p.y) != (b.y > p.y) {
                let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// Enclosed area (shoelace formula).
    pub fn area(&self) -> f32 {
        let n = self.points.len();
        if n < 3 {
            return 0.0;
        }
        let mut twice = 0.0f32;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            twice += a.x * b.y - b.x * a.y;
        }
        (twice / 2.0).abs()
    }
}

/// The four cut-out regions for a rounded-corner canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundedCornerMask {
    pub top_left: Path,
    pub top_right: Path,
    pub bottom_left: Path,
    pub bottom_right: Path,
}

impl RoundedCornerMask {
    /// Corners in fill order: top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [&Path; 4] {
        [
            &self.top_left,
            &self.top_right,
            &self.bottom_left,
            &self.bottom_right,
        ]
    }

    /// Owned corners in the same order as [`corners`](Self::corners).
    pub fn into_corners(self) -> [Path; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    /// Whether `p` falls in any cut-out.
    pub fn contains(&self, p: PointF) -> bool {
        self.corners().iter().any(|c| c.contains(p))
    }
}

/// Build the corner cut-outs for a `width × height` canvas.
///
/// `radius` must be in `1..=min(width, height)`.
pub fn build_rounded_corner_mask(
    width: u32,
    height: u32,
    radius: u32,
) -> Result<RoundedCornerMask, LayoutError> {
    if radius == 0 || radius > width.min(height) {
        return Err(LayoutError::InvalidCornerRadius);
    }

    let top_left = corner_shape(radius);
    let bounds = top_left.bounds();
    let right = width as f32 - bounds.width + 1.0;
    let bottom = height as f32 - bounds.height + 1.0;

    let mask = RoundedCornerMask {
        top_right: top_left.rotate_quarter_turns(1).translate(right, 0.0),
        bottom_left: top_left.rotate_quarter_turns(3).translate(0.0, bottom),
        bottom_right: top_left.rotate_quarter_turns(2).translate(right, bottom),
        top_left,
    };
    log::debug!("rounded corner mask {width}x{height} r={radius}");
    Ok(mask)
}

/// Top-left cut-out: the square `[-0.5, r - 0.5]²` minus the disk of radius
/// `r` centred on its far corner. The arc is a polyline.
fn corner_shape(radius: u32) -> Path {
    let r = radius as f32;
    let c = r - 0.5;
    let segments = radius.clamp(4, 64);

    let mut points = Vec::with_capacity(segments as usize + 2);
    points.push(PointF::new(-0.5, -0.5));
    // Top tangent point, then around the arc to the left tangent point.
    points.push(PointF::new(c, -0.5));
    for i in 1..segments {
        let t = core::f32::consts::FRAC_PI_2 * i as f32 / segments as f32;
        // From -90° towards -180°.
        let angle = -core::f32::consts::FRAC_PI_2 - t;
        points.push(PointF::new(c + r * angle.cos(), c + r * angle.sin()));
    }
    points.push(PointF::new(-0.5, c));
    Path::new(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_radius() {
        assert_eq!(
            build_rounded_corner_mask(100, 60, 0),
            Err(LayoutError::InvalidCornerRadius)
        );
        assert_eq!(
            build_rounded_corner_mask(100, 60, 61),
            Err(LayoutError::InvalidCornerRadius)
        );
        assert!(build_rounded_corner_mask(100, 60, 60).is_ok());
    }

    #[test]
    fn base_shape_bounds() {
        let s = corner_shape(20);
        let b = s.bounds();
        assert_eq!((b.x, b.y), (-0.5, -0.5));
        assert!((b.width - 20.0).abs() < 1e-4);
        assert!((b.height - 20.0).abs() < 1e-4);
    }

    #[test]
    fn base_shape_area_is_square_minus_quarter_disk() {
        let r = 40.0f32;
        let expected = r * r - core::f32::consts::PI * r * r / 4.0;
        let area = corner_shape(40).area();
        // Chords cut slightly into the disk, so the polygon is a bit larger.
        assert!(area >= expected, "{area} < {expected}");
        assert!(area - expected < expected * 0.02, "{area} vs {expected}");
    }

    #[test]
    fn corners_sit_flush_with_canvas_edges() {
        let m = build_rounded_corner_mask(100, 60, 20).unwrap();
        let tr = m.top_right.bounds();
        assert!((tr.x - 80.5).abs() < 1e-4);
        assert!((tr.x + tr.width - 100.5).abs() < 1e-4);
        assert!((tr.y + 0.5).abs() < 1e-4);
        let bl = m.bottom_left.bounds();
        assert!((bl.x + 0.5).abs() < 1e-4);
        assert!((bl.y + bl.height - 60.5).abs() < 1e-4);
        let br = m.bottom_right.bounds();
        assert!((br.x - 80.5).abs() < 1e-4);
        assert!((br.y - 40.5).abs() < 1e-4);
    }

    #[test]
    fn canvas_corners_are_cut() {
        let m = build_rounded_corner_mask(100, 60, 20).unwrap();
        assert!(m.top_left.contains(PointF::new(0.5, 0.5)));
        assert!(m.top_right.contains(PointF::new(99.5, 0.5)));
        assert!(m.bottom_left.contains(PointF::new(0.5, 59.5)));
        assert!(m.bottom_right.contains(PointF::new(99.5, 59.5)));
    }

    #[test]
    fn interior_is_kept() {
        let m = build_rounded_corner_mask(100, 60, 20).unwrap();
        assert!(!m.contains(PointF::new(50.0, 30.0)));
        // Inside the arc of each corner.
        assert!(!m.contains(PointF::new(10.0, 10.0)));
        assert!(!m.contains(PointF::new(90.0, 10.0)));
        assert!(!m.contains(PointF::new(10.0, 50.0)));
        assert!(!m.contains(PointF::new(90.0, 50.0)));
        // Along the edges, past the corner region.
        assert!(!m.contains(PointF::new(50.0, 0.5)));
        assert!(!m.contains(PointF::new(0.5, 30.0)));
    }

    #[test]
    fn corners_are_mirror_images() {
        let m = build_rounded_corner_mask(100, 60, 12).unwrap();
        let a = m.top_left.area();
        for c in m.corners() {
            assert!((c.area() - a).abs() < 0.05);
        }
        // Top-right mirrors top-left across x = 50.
        for (x, y) in [(1.0, 1.0), (3.0, 0.7), (0.6, 4.0), (5.0, 5.0)] {
            assert_eq!(
                m.top_left.contains(PointF::new(x, y)),
                m.top_right.contains(PointF::new(100.0 - x, y)),
                "({x}, {y})"
            );
        }
    }

    #[test]
    fn rotation_is_exact() {
        let s = corner_shape(8);
        let back = s.rotate_quarter_turns(1).rotate_quarter_turns(3);
        for (a, b) in s.points().iter().zip(back.points()) {
            assert!((a.x - b.x).abs() < 1e-5 && (a.y - b.y).abs() < 1e-5);
        }
    }
}
