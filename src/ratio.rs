//! Small-ratio search.
//!
//! Both searches are bounded brute force over small integers. Keep the bounds
//! small (ratios under ~20): they are meant for "is this 4:3 or 16:9-like" and
//! "largest nice crop inside this photo", not general rational approximation.
//!
//! ```
//! use zencompose::{RatioPair, Size, approximate_ratio_size, classify_ratio};
//!
//! assert_eq!(classify_ratio(1920, 1080, 20), Some(RatioPair::new(16, 9)));
//! assert_eq!(approximate_ratio_size(300, 201, 10, 10, 100), Size::new(300, 200));
//! ```

use crate::geometry::{RatioPair, Size};

/// First `(i, j)` in `[1, max_ratio]²` with `width / i == height / j`.
///
/// Enumeration is row-major: `i` outer, `j` inner. The comparison is done by
/// cross-multiplication so it is exact. Returns `None` when no pair within
/// the bound matches, or when either dimension is zero.
pub fn classify_ratio(width: u32, height: u32, max_ratio: u32) -> Option<RatioPair> {
    if width == 0 || height == 0 {
        return None;
    }
    let (w, h) = (u64::from(width), u64::from(height));
    for i in 1..=max_ratio {
        for j in 1..=max_ratio {
            if w * u64::from(j) == h * u64::from(i) {
                log::debug!("classify_ratio({width}, {height}) = {i}:{j}");
                return Some(RatioPair::new(i, j));
            }
        }
    }
    None
}

/// Largest `w·i × h·i` box inside `width × height` for small ratios `w:h`.
///
/// Candidates satisfy `w <= max_horizontal`, `h <= max_vertical`,
/// `w * h <= max_product`. The winner minimises the unused margin
/// `(width - w·i) + (height - h·i)`; ties go to the lowest `w`, then the
/// lowest `h`. Returns [`Size::ZERO`] when nothing fits.
pub fn approximate_ratio_size(
    width: u32,
    height: u32,
    max_horizontal: u32,
    max_vertical: u32,
    max_product: u32,
) -> Size {
    let mut best: Option<(u64, Size)> = None;
    for w in 1..=max_horizontal {
        for h in 1..=max_vertical {
            if u64::from(w) * u64::from(h) > u64::from(max_product) {
                continue;
            }
            // The margin shrinks strictly as the scale grows, so for a given
            // (w, h) only the largest feasible scale can win.
            let scale = (width / w).min(height / h);
            if scale == 0 {
                continue;
            }
            let fitted = Size::new(w * scale, h * scale);
            let margin =
                u64::from(width - fitted.width) + u64::from(height - fitted.height);
            if best.is_none_or(|(m, _)| margin < m) {
                best = Some((margin, fitted));
            }
        }
    }
    match best {
        Some((margin, size)) => {
            log::debug!(
                "approximate_ratio_size({width}, {height}) = {}x{} (margin {margin})",
                size.width,
                size.height
            );
            size
        }
        None => Size::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The literal triple loop, for checking the closed-form scale.
    fn approximate_reference(width: u32, height: u32, mh: u32, mv: u32, mp: u32) -> Size {
        let mut best = Size::ZERO;
        let mut best_margin = u64::MAX;
        for w in 1..=mh {
            for h in 1..=mv {
                if w * h > mp {
                    continue;
                }
                for i in 1..=width.min(height) {
                    if w * i <= width && h * i <= height {
                        let margin = u64::from(width - w * i) + u64::from(height - h * i);
                        if margin < best_margin {
                            best_margin = margin;
                            best = Size::new(w * i, h * i);
                        }
                    }
                }
            }
        }
        best
    }

    #[test]
    fn classify_common_ratios() {
        assert_eq!(classify_ratio(1920, 1080, 20), Some(RatioPair::new(16, 9)));
        assert_eq!(classify_ratio(640, 480, 20), Some(RatioPair::new(4, 3)));
        assert_eq!(classify_ratio(500, 500, 20), Some(RatioPair::new(1, 1)));
        assert_eq!(classify_ratio(1080, 1920, 20), Some(RatioPair::new(9, 16)));
    }

    #[test]
    fn classify_respects_bound() {
        assert_eq!(classify_ratio(1920, 1080, 15), None);
        assert_eq!(classify_ratio(1000, 999, 20), None);
    }

    #[test]
    fn classify_returns_first_row_major_match() {
        // 2:1 also matches 4:2, 6:3...; the smallest i wins.
        assert_eq!(classify_ratio(200, 100, 20), Some(RatioPair::new(2, 1)));
    }

    #[test]
    fn classify_zero_dimension() {
        assert_eq!(classify_ratio(0, 100, 20), None);
        assert_eq!(classify_ratio(100, 0, 20), None);
        assert_eq!(classify_ratio(0, 0, 20), None);
    }

    #[test]
    fn approximate_concrete_case() {
        assert_eq!(approximate_ratio_size(300, 201, 10, 10, 100), Size::new(300, 200));
    }

    #[test]
    fn approximate_zero_input() {
        assert_eq!(approximate_ratio_size(0, 100, 10, 10, 100), Size::ZERO);
        assert_eq!(approximate_ratio_size(100, 0, 10, 10, 100), Size::ZERO);
        assert_eq!(approximate_ratio_size(100, 100, 0, 10, 100), Size::ZERO);
        assert_eq!(approximate_ratio_size(100, 100, 10, 10, 0), Size::ZERO);
    }

    #[test]
    fn approximate_exact_fit_has_no_margin() {
        assert_eq!(approximate_ratio_size(1600, 900, 16, 16, 200), Size::new(1600, 900));
    }

    #[test]
    fn approximate_matches_triple_loop() {
        let dims = [
            (1, 1),
            (2, 3),
            (7, 5),
            (300, 201),
            (301, 199),
            (97, 61),
            (640, 481),
            (13, 200),
            (200, 13),
        ];
        let bounds = [(10, 10, 100), (4, 3, 12), (20, 20, 50), (1, 1, 1), (16, 9, 144)];
        for &(w, h) in &dims {
            for &(mh, mv, mp) in &bounds {
                let got = approximate_ratio_size(w, h, mh, mv, mp);
                assert_eq!(
                    got,
                    approximate_reference(w, h, mh, mv, mp),
                    "({w}, {h}, {mh}, {mv}, {mp})"
                );
                assert!(got.width <= w && got.height <= h);
            }
        }
    }
}
