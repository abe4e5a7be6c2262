//! Ellipse inscribed in a bounding rectangle
//!
//! Works for any integer rectangle, including even extents whose centre falls
//! between pixels: the two half-ellipses are walked on rows `y0` (lower) and
//! `y1` (upper) which differ by the height parity `b & 1` at the start.

use super::Drawer;
use crate::pixel::Pixel;
use crate::policy::WritePolicy;

impl<P: Pixel> Drawer<'_, P> {
    /// Outline of the ellipse touching all four sides of the inclusive
    /// rectangle `(x0, y0)`-`(x1, y1)`; corners may be given in any order
    pub fn ellipse_rect<W: WritePolicy<P>>(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: P,
    ) {
        self.walk_ellipse_rect::<W>(x0, y0, x1, y1, color, false);
    }

    /// Filled [`Drawer::ellipse_rect`], one span per scanline
    pub fn fill_ellipse_rect<W: WritePolicy<P>>(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: P,
    ) {
        self.walk_ellipse_rect::<W>(x0, y0, x1, y1, color, true);
    }

    fn walk_ellipse_rect<W: WritePolicy<P>>(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        color: P,
        fill: bool,
    ) {
        let (mut x0, mut x1) = (i64::from(x0), i64::from(x1));
        let (y0, y1) = (i64::from(y0), i64::from(y1));

        // Error terms grow as `8 * a * b^2`, past `i64` for extents near `2^21`
        let height = (y1 - y0).abs();
        let a = i128::from((x1 - x0).abs());
        let b = i128::from(height);
        let parity = b & 1;
        let mut dx = 4 * (1 - a) * b * b;
        let mut dy = 4 * (parity + 1) * a * a;
        let mut err = dx + dy + parity * a * a;

        if x0 > x1 {
            (x0, x1) = (x1, x0);
        }
        let top = y0.min(y1) + (height + 1) / 2;
        let a8 = 8 * a * a;
        let b8 = 8 * b * b;

        // `lower` walks down from the centre row, `upper` walks up
        let mut lower = self.row(top as i32);
        let mut upper = self.row((top - (height & 1)) as i32);
        let (mut xl, mut xr) = (i64::MAX, i64::MIN);
        let mut stepped;

        loop {
            if fill {
                xl = xl.min(x0);
                xr = xr.max(x1);
            } else {
                self.put_mirrored::<W>(x0 as i32, x1 as i32, lower, upper, color);
            }

            let e2 = 2 * err;
            stepped = false;
            if e2 <= dy {
                if fill {
                    self.span_mirrored::<W>(xl as i32, xr as i32, lower, upper, color);
                    (xl, xr) = (i64::MAX, i64::MIN);
                }
                lower.advance(1);
                upper.advance(-1);
                dy += a8;
                err += dy;
                stepped = true;
            }
            if e2 >= dx || 2 * err > dy {
                x0 += 1;
                x1 -= 1;
                dx += b8;
                err += dx;
            }
            if x0 > x1 {
                break;
            }
        }
        if fill && xl <= xr {
            self.span_mirrored::<W>(xl as i32, xr as i32, lower, upper, color);
        }

        // Rows already covered by the last iteration are not revisited
        if !stepped {
            lower.advance(1);
            upper.advance(-1);
        }
        // Flat ellipses (a == 1) stop short of the full height
        let (left, right) = ((x0 - 1) as i32, (x1 + 1) as i32);
        while i128::from(lower.y()) - i128::from(upper.y()) <= b {
            if fill {
                self.span_mirrored::<W>(left.min(right), left.max(right), lower, upper, color);
            } else {
                self.put_mirrored::<W>(left, right, lower, upper, color);
            }
            lower.advance(1);
            upper.advance(-1);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::super::testing::*;
    use crate::buffer::PixelBuffer;
    use crate::draw::Drawer;
    use crate::policy::{ClippedAdd, ClippedSet};

    const O: i32 = 5;

    fn outline(x0: i32, y0: i32, x1: i32, y1: i32) -> BTreeSet<(i32, i32)> {
        let mut b = PixelBuffer::<u8>::new(40, 40).unwrap();
        Drawer::new(&mut b).ellipse_rect::<ClippedAdd>(x0, y0, x1, y1, 1);
        assert!(written_once(&b), "rect {x0},{y0} {x1},{y1}");
        lit(&b)
    }

    fn filled(x0: i32, y0: i32, x1: i32, y1: i32) -> BTreeSet<(i32, i32)> {
        let mut b = PixelBuffer::<u8>::new(40, 40).unwrap();
        Drawer::new(&mut b).fill_ellipse_rect::<ClippedAdd>(x0, y0, x1, y1, 1);
        assert!(written_once(&b), "fill {x0},{y0} {x1},{y1}");
        lit(&b)
    }

    #[test]
    fn test_bounding_box_matches_rect() {
        let mut b = PixelBuffer::<u8>::new(10, 6).unwrap();
        Drawer::new(&mut b).ellipse_rect::<ClippedSet>(0, 0, 9, 5, 1);
        assert_eq!(bbox(&lit(&b)), Some((0, 0, 9, 5)));

        for w in 0..26 {
            for h in 0..26 {
                let set = outline(O, O, O + w, O + h);
                assert_eq!(bbox(&set), Some((O, O, O + w, O + h)), "{w}x{h}");
                let rows: BTreeSet<i32> = set.iter().map(|&(_, y)| y).collect();
                assert_eq!(rows.len() as i32, h + 1, "{w}x{h} skipped a row");
            }
        }
    }

    #[test]
    fn test_swapped_corners_are_equivalent() {
        for (w, h) in [(9, 5), (4, 11), (1, 7), (12, 1), (6, 6), (0, 3)] {
            let base = outline(O, O, O + w, O + h);
            assert_eq!(outline(O + w, O, O, O + h), base, "{w}x{h}");
            assert_eq!(outline(O, O + h, O + w, O), base, "{w}x{h}");
            assert_eq!(outline(O + w, O + h, O, O), base, "{w}x{h}");
        }
    }

    #[test]
    fn test_outline_is_mirror_symmetric() {
        for (w, h) in [(9, 5), (10, 6), (3, 14), (21, 2), (15, 15)] {
            let set = outline(O, O, O + w, O + h);
            for &(x, y) in &set {
                assert!(set.contains(&(2 * O + w - x, y)), "{w}x{h}");
                assert!(set.contains(&(x, 2 * O + h - y)), "{w}x{h}");
            }
        }
    }

    #[test]
    fn test_degenerate_rects() {
        assert_eq!(outline(7, 7, 7, 7), BTreeSet::from([(7, 7)]));
        let v: BTreeSet<_> = (2..=5).map(|y| (3, y)).collect();
        assert_eq!(outline(3, 2, 3, 5), v);
        let h: BTreeSet<_> = (2..=5).map(|x| (x, 3)).collect();
        assert_eq!(outline(2, 3, 5, 3), h);
        assert_eq!(filled(2, 3, 5, 3), h);
    }

    #[test]
    fn test_fill_covers_outline() {
        for w in 0..22 {
            for h in 0..22 {
                let border = outline(O, O, O + w, O + h);
                let fill = filled(O + w, O + h, O, O);
                assert!(fill.is_superset(&border), "{w}x{h}");
                assert!(rows_contiguous(&fill), "{w}x{h}");
                assert_eq!(bbox(&fill), bbox(&border), "{w}x{h}");
            }
        }
    }

    #[test]
    fn test_huge_rect_walks_to_completion() {
        let mut b = PixelBuffer::<u8>::new(16, 16).unwrap();
        let (top, bottom) = (8 - 1_000_000, 8 + 1_000_000);
        Drawer::new(&mut b).ellipse_rect::<ClippedAdd>(0, top, 2_000_000, bottom, 1);
        assert!(written_once(&b));
        let left_column: BTreeSet<_> = (0..16).map(|y| (0, y)).collect();
        assert_eq!(lit(&b), left_column);

        let mut b = PixelBuffer::<u8>::new(16, 16).unwrap();
        Drawer::new(&mut b).ellipse_rect::<ClippedSet>(0, 0, 2_000_000, 2_000_000, 1);
        assert!(lit(&b).is_empty());
    }
}
