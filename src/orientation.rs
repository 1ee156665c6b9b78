//! Source orientation (D4 dihedral group) applied before composition.
//!
//! Decoders report the EXIF orientation of each source; the compositor lays
//! out the *display* size and tells the painter which transform to apply
//! while blitting. Nothing else about EXIF is interpreted here.
//!
//! ```text
//!     1: Identity    2: FlipH       3: Rotate180   4: FlipV
//!     ┌───┐          ┌───┐          ┌───┐          ┌───┐
//!     │ F │          │ Ꟊ │          │   │          │   │
//!     │   │          │   │          │ Ꟊ │          │ F │
//!     └───┘          └───┘          └───┘          └───┘
//!
//!     5: Transpose   6: Rotate90    7: Transverse  8: Rotate270
//!     ┌────┐         ┌────┐         ┌────┐         ┌────┐
//!     │ F  │         │  F │         │  Ꟊ │         │ Ꟊ  │
//!     └────┘         └────┘         └────┘         └────┘
//! ```

use crate::geometry::Size;

/// One of the 8 EXIF orientations: a clockwise rotation in 90° steps,
/// optionally followed by a horizontal flip.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// EXIF 1.
    #[default]
    Identity,
    /// EXIF 2.
    FlipH,
    /// EXIF 3.
    Rotate180,
    /// EXIF 4.
    FlipV,
    /// Reflect over the main diagonal. EXIF 5.
    Transpose,
    /// 90° clockwise. EXIF 6.
    Rotate90,
    /// Reflect over the anti-diagonal. EXIF 7.
    Transverse,
    /// 270° clockwise. EXIF 8.
    Rotate270,
}

impl Orientation {
    /// All orientations, indexed by EXIF value - 1.
    pub const ALL: [Self; 8] = [
        Self::Identity,
        Self::FlipH,
        Self::Rotate180,
        Self::FlipV,
        Self::Transpose,
        Self::Rotate90,
        Self::Transverse,
        Self::Rotate270,
    ];

    /// From an EXIF orientation tag (1-8). `None` for anything else.
    pub fn from_exif(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value).checked_sub(1)?).copied()
    }

    /// EXIF orientation tag (1-8).
    pub fn to_exif(self) -> u8 {
        self as u8 + 1
    }

    pub fn is_identity(self) -> bool {
        self == Self::Identity
    }

    /// Whether the display size has width and height swapped.
    pub fn swaps_axes(self) -> bool {
        self.quarter_turns() % 2 == 1
    }

    /// Display size of a source stored as `size`.
    pub fn apply_to(self, size: Size) -> Size {
        if self.swaps_axes() {
            size.transpose()
        } else {
            size
        }
    }

    /// Apply `self`, then `next`.
    pub fn then(self, next: Self) -> Self {
        let (r1, f1) = (self.quarter_turns(), self.flipped());
        let (r2, f2) = (next.quarter_turns(), next.flipped());
        // A flip reverses the direction of any rotation that follows it.
        let turns = if f1 { r1.wrapping_sub(r2) } else { r1 + r2 };
        Self::from_parts(turns & 3, f1 != f2)
    }

    /// `o.then(o.inverse()) == Identity`.
    pub fn inverse(self) -> Self {
        if self.flipped() {
            self
        } else {
            Self::from_parts((4 - self.quarter_turns()) & 3, false)
        }
    }

    fn quarter_turns(self) -> u8 {
        match self {
            Self::Identity | Self::FlipH => 0,
            Self::Rotate90 | Self::Transpose => 1,
            Self::Rotate180 | Self::FlipV => 2,
            Self::Rotate270 | Self::Transverse => 3,
        }
    }

    fn flipped(self) -> bool {
        matches!(
            self,
            Self::FlipH | Self::FlipV | Self::Transpose | Self::Transverse
        )
    }

    fn from_parts(turns: u8, flip: bool) -> Self {
        match (turns & 3, flip) {
            (0, false) => Self::Identity,
            (0, true) => Self::FlipH,
            (1, false) => Self::Rotate90,
            (1, true) => Self::Transpose,
            (2, false) => Self::Rotate180,
            (2, true) => Self::FlipV,
            (3, false) => Self::Rotate270,
            _ => Self::Transverse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Where pixel `(x, y)` of a `w × h` source lands after `o`.
    fn map_point(o: Orientation, w: u32, h: u32, x: u32, y: u32) -> (u32, u32) {
        // Rotate clockwise `turns` times, then flip horizontally.
        let (mut x, mut y, mut w, mut h) = (x, y, w, h);
        for _ in 0..o.quarter_turns() {
            (x, y) = (h - 1 - y, x);
            (w, h) = (h, w);
        }
        if o.flipped() {
            x = w - 1 - x;
        }
        (x, y)
    }

    #[test]
    fn exif_round_trip() {
        for v in 1..=8u8 {
            assert_eq!(Orientation::from_exif(v).unwrap().to_exif(), v);
        }
        assert!(Orientation::from_exif(0).is_none());
        assert!(Orientation::from_exif(9).is_none());
    }

    #[test]
    fn display_size() {
        let s = Size::new(100, 200);
        for o in Orientation::ALL {
            let expected = if o.swaps_axes() { Size::new(200, 100) } else { s };
            assert_eq!(o.apply_to(s), expected, "{o:?}");
        }
        assert!(Orientation::Rotate90.swaps_axes());
        assert!(!Orientation::FlipV.swaps_axes());
    }

    #[test]
    fn composition_matches_pixel_mapping() {
        let (w, h) = (3, 2);
        for a in Orientation::ALL {
            let mid = a.apply_to(Size::new(w, h));
            for b in Orientation::ALL {
                let ab = a.then(b);
                for y in 0..h {
                    for x in 0..w {
                        let (mx, my) = map_point(a, w, h, x, y);
                        let step = map_point(b, mid.width, mid.height, mx, my);
                        assert_eq!(map_point(ab, w, h, x, y), step, "{a:?} then {b:?}");
                    }
                }
            }
        }
    }

    #[test]
    fn inverse_undoes() {
        for o in Orientation::ALL {
            assert!(o.then(o.inverse()).is_identity(), "{o:?}");
            assert!(o.inverse().then(o).is_identity(), "{o:?}");
        }
    }

    #[test]
    fn transpose_is_rotate_then_flip() {
        assert_eq!(
            Orientation::Rotate90.then(Orientation::FlipH),
            Orientation::Transpose
        );
        assert_eq!(
            Orientation::Rotate270.then(Orientation::FlipH),
            Orientation::Transverse
        );
    }
}
