//! Bresenham circle and disc

use super::Drawer;
use crate::pixel::Pixel;
use crate::policy::WritePolicy;

impl<P: Pixel> Drawer<'_, P> {
    /// Circle outline around `(xm, ym)`.
    ///
    /// Steps one quadrant arc and reflects it into the other three; every
    /// outline pixel is written once. `r == 0` plots the centre, a negative
    /// radius draws nothing.
    pub fn circle<W: WritePolicy<P>>(&mut self, xm: i32, ym: i32, r: i32, color: P) {
        if r < 0 {
            return;
        }
        if r == 0 {
            self.point::<W>(xm, ym, color);
            return;
        }

        let mut x = -r;
        let mut y = 0;
        let mut err = 2 - 2 * i64::from(r);

        // Rows ym + y, ym - y, ym - x, ym + x
        let mut below = self.row(ym);
        let mut above = self.row(ym);
        let mut bottom = self.row(ym + r);
        let mut top = self.row(ym - r);

        loop {
            self.put::<W>(xm - x, below, color);
            self.put::<W>(xm - y, bottom, color);
            self.put::<W>(xm + x, above, color);
            self.put::<W>(xm + y, top, color);

            let e = err;
            if e <= i64::from(y) {
                y += 1;
                err += i64::from(y) * 2 + 1;
                below.advance(1);
                above.advance(-1);
            }
            if e > i64::from(x) || err > i64::from(y) {
                x += 1;
                err += i64::from(x) * 2 + 1;
                bottom.advance(-1);
                top.advance(1);
            }
            if x >= 0 {
                break;
            }
        }
    }

    /// Filled disc whose boundary is exactly [`Drawer::circle`]'s outline.
    ///
    /// One span per scanline.
    pub fn fill_circle<W: WritePolicy<P>>(&mut self, xm: i32, ym: i32, r: i32, color: P) {
        if r < 0 {
            return;
        }

        let mut x = -r;
        let mut y = 0;
        let mut err = 2 - 2 * i64::from(r);
        let mut lower = self.row(ym);
        let mut upper = lower;
        // Widest outline offset seen on the current row pair
        let mut pending = -1;
        while x < 0 {
            pending = pending.max(-x);

            let e = err;
            if e <= i64::from(y) {
                self.span_mirrored::<W>(xm - pending, xm + pending, lower, upper, color);
                pending = -1;
                y += 1;
                err += i64::from(y) * 2 + 1;
                lower.advance(1);
                upper.advance(-1);
            }
            if e > i64::from(x) || err > i64::from(y) {
                x += 1;
                err += i64::from(x) * 2 + 1;
            }
        }
        if pending >= 0 {
            self.span_mirrored::<W>(xm - pending, xm + pending, lower, upper, color);
            y += 1;
            lower.advance(1);
            upper.advance(-1);
        }
        // Tip rows
        while y <= r {
            self.span_mirrored::<W>(xm, xm, lower, upper, color);
            y += 1;
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
    use crate::policy::{ClippedAdd, ClippedSet, UncheckedSet};

    fn circle_set(r: i32) -> (BTreeSet<(i32, i32)>, bool) {
        let mut b = PixelBuffer::<u8>::new(80, 80).unwrap();
        Drawer::new(&mut b).circle::<ClippedAdd>(40, 40, r, 1);
        (lit(&b), written_once(&b))
    }

    #[test]
    fn test_circle_radius_five() {
        let mut b = PixelBuffer::<u8>::new(21, 21).unwrap();
        Drawer::new(&mut b).circle::<ClippedAdd>(10, 10, 5, 1);
        let set = lit(&b);

        assert_eq!(set.len(), 28);
        assert!(written_once(&b));
        assert_eq!(bbox(&set), Some((5, 5, 15, 15)));

        // 90 degree rotation about the centre: (x, y) -> (20 - y, x)
        let rotated: BTreeSet<_> = set.iter().map(|&(x, y)| (20 - y, x)).collect();
        assert_eq!(rotated, set);
    }

    #[test]
    fn test_circle_eightfold_symmetry() {
        for r in 1..30 {
            let (set, once) = circle_set(r);
            assert!(once, "radius {r}");
            for &(x, y) in &set {
                assert!(set.contains(&(80 - x, y)), "radius {r}");
                assert!(set.contains(&(x, 80 - y)), "radius {r}");
                assert!(set.contains(&(y, x)), "radius {r}");
            }
            assert_eq!(bbox(&set), Some((40 - r, 40 - r, 40 + r, 40 + r)));
        }
    }

    #[test]
    fn test_circle_degenerate_radii() {
        assert_eq!(circle_set(0).0.into_iter().collect::<Vec<_>>(), vec![(40, 40)]);
        assert!(circle_set(-3).0.is_empty());
    }

    #[test]
    fn test_fill_circle_covers_outline() {
        for r in 0..25 {
            let (outline, _) = circle_set(r);
            let mut b = PixelBuffer::<u8>::new(80, 80).unwrap();
            Drawer::new(&mut b).fill_circle::<ClippedAdd>(40, 40, r, 1);
            let fill = lit(&b);

            assert!(written_once(&b), "radius {r}");
            assert!(fill.is_superset(&outline), "radius {r}");
            assert!(rows_contiguous(&fill), "radius {r}");
            assert_eq!(bbox(&fill), bbox(&outline));
        }
    }

    #[test]
    fn test_circle_clipped_at_corner() {
        let mut a = PixelBuffer::<u8>::new(8, 8).unwrap();
        Drawer::new(&mut a).circle::<ClippedSet>(0, 0, 6, 1);
        let mut reference = PixelBuffer::<u8>::new(20, 20).unwrap();
        Drawer::new(&mut reference).circle::<UncheckedSet>(10, 10, 6, 1);

        let expected: BTreeSet<_> = lit(&reference)
            .into_iter()
            .map(|(x, y)| (x - 10, y - 10))
            .filter(|&(x, y)| (0..8).contains(&x) && (0..8).contains(&y))
            .collect();
        assert_eq!(lit(&a), expected);
    }

    #[test]
    fn test_fill_circle_rows_end_on_outline() {
        for r in [1, 7, 12, 31, 39] {
            let (outline, _) = circle_set(r);
            let mut b = PixelBuffer::<u8>::new(80, 80).unwrap();
            Drawer::new(&mut b).fill_circle::<ClippedSet>(40, 40, r, 1);
            let fill = lit(&b);
            for y in 40 - r..=40 + r {
                let ends = |set: &BTreeSet<(i32, i32)>| {
                    let xs: Vec<i32> = set.iter().filter(|p| p.1 == y).map(|p| p.0).collect();
                    (xs.iter().min().copied(), xs.iter().max().copied())
                };
                assert_eq!(ends(&fill), ends(&outline), "radius {r} row {y}");
            }
        }
    }

    #[test]
    fn test_fill_circle_huge_radius_on_small_canvas() {
        let mut b = PixelBuffer::<u8>::new(8, 8).unwrap();
        Drawer::new(&mut b).fill_circle::<ClippedAdd>(4, 4, 3_000_000, 1);
        assert!(b.as_slice().iter().all(|&p| p == 1));
    }
}
