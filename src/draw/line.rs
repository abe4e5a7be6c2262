//! Straight lines: single-pixel Bresenham and the anti-aliased wide line

use super::Drawer;
use crate::pixel::Pixel;
use crate::policy::WritePolicy;

impl<P: Pixel> Drawer<'_, P> {
    /// Bresenham line from `(x0, y0)` to `(x1, y1)`, both endpoints included.
    ///
    /// Plots exactly `max(|dx|, |dy|) + 1` distinct pixels.
    pub fn line<W: WritePolicy<P>>(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: P) {
        let dx = (i64::from(x1) - i64::from(x0)).abs();
        let dy = -(i64::from(y1) - i64::from(y0)).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let mut x = x0;
        let mut row = self.row(y0);
        loop {
            self.put::<W>(x, row, color);
            let e2 = 2 * err;
            if e2 >= dy {
                if x == x1 {
                    break;
                }
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                if row.y() == y1 {
                    break;
                }
                err += dx;
                row.advance(sy);
            }
        }
    }

    /// Anti-aliased line of width `wd`.
    ///
    /// Each pixel in the band around the ideal line receives
    /// `color.scale(1 - c)` where `c = |e| / ed - (wd + 1) / 2 + 1` clamped
    /// to `[0, 1]`, `e` being the pixel's error term and `ed` the line
    /// length. The centre pixels get full `color`. No pixel is written twice.
    pub fn line_width<W: WritePolicy<P>>(
        &mut self,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        wd: f32,
        color: P,
    ) {
        let dx = (i64::from(x1) - i64::from(x0)).abs();
        let dy = (i64::from(y1) - i64::from(y0)).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;
        let ed = if dx + dy == 0 {
            1.0
        } else {
            ((dx * dx + dy * dy) as f32).sqrt()
        };
        let half = (wd.max(0.0) + 1.0) / 2.0;
        let band = ed * half;

        let shade = |e: i64| -> P {
            let c = (e.abs() as f32 / ed - half + 1.0).clamp(0.0, 1.0);
            color.scale(1.0 - c)
        };

        let mut x = x0;
        let mut row = self.row(y0);
        loop {
            self.put::<W>(x, row, shade(err - dx + dy));
            let mut e2 = err;
            let x2 = x;

            // Vertical fringe of the current column
            if 2 * e2 >= -dx {
                let mut fringe = row;
                e2 += dy;
                while (e2 as f32) < band && (y1 != fringe.y() || dx > dy) {
                    fringe.advance(sy);
                    self.put::<W>(x, fringe, shade(e2));
                    e2 += dx;
                }
                if x == x1 {
                    break;
                }
                e2 = err;
                err -= dy;
                x += sx;
            }

            // Horizontal fringe of the current row
            if 2 * e2 <= dy {
                let mut fx = x2;
                e2 = dx - e2;
                while (e2 as f32) < band && (x1 != fx || dx < dy) {
                    fx += sx;
                    self.put::<W>(fx, row, shade(e2));
                    e2 += dy;
                }
                if row.y() == y1 {
                    break;
                }
                err += dx;
                row.advance(sy);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use crate::buffer::{PixelBuffer, Surface};
    use crate::draw::Drawer;
    use crate::policy::{ClippedAdd, ClippedSet, UncheckedSet};

    fn canvas(w: u32, h: u32) -> PixelBuffer<u8> {
        PixelBuffer::new(w, h).unwrap()
    }

    #[test]
    fn test_horizontal_line_fills_row() {
        let mut b = canvas(5, 1);
        Drawer::new(&mut b).line::<ClippedSet>(0, 0, 4, 0, 1);
        assert_eq!(b.row(0), &[1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_line_pixel_count_and_endpoints() {
        let (ox, oy) = (12, 12);
        for (dx, dy) in [(0, 0), (7, 0), (0, -9), (5, 3), (-11, 4), (3, -10), (-6, -6), (10, 1)] {
            let mut b = canvas(25, 25);
            let (x1, y1) = (ox + dx, oy + dy);
            Drawer::new(&mut b).line::<ClippedAdd>(ox, oy, x1, y1, 1);

            let set = lit(&b);
            let expected = dx.abs().max(dy.abs()) as usize + 1;
            assert_eq!(set.len(), expected, "line to ({dx}, {dy})");
            assert!(written_once(&b), "line to ({dx}, {dy})");
            assert!(set.contains(&(ox, oy)));
            assert!(set.contains(&(x1, y1)));
        }
    }

    #[test]
    fn test_line_is_reversible_on_axis_and_diagonal() {
        for (x0, y0, x1, y1) in [(1, 2, 9, 2), (3, 1, 3, 8), (0, 0, 9, 9), (9, 0, 0, 9)] {
            let mut fwd = canvas(10, 10);
            let mut rev = canvas(10, 10);
            Drawer::new(&mut fwd).line::<ClippedSet>(x0, y0, x1, y1, 1);
            Drawer::new(&mut rev).line::<ClippedSet>(x1, y1, x0, y0, 1);
            assert_eq!(fwd, rev);
        }
    }

    #[test]
    fn test_unclipped_line_matches_clipped() {
        let mut a = canvas(16, 16);
        let mut b = canvas(16, 16);
        Drawer::new(&mut a).line::<ClippedSet>(15, 0, 2, 13, 1);
        Drawer::new(&mut b).line::<UncheckedSet>(15, 0, 2, 13, 1);
        assert_eq!(a, b);
    }

    #[test]
    fn test_clipped_line_entering_from_outside() {
        let mut b = canvas(10, 10);
        Drawer::new(&mut b).line::<ClippedSet>(-5, 5, 14, 5, 1);
        assert_eq!(b.row(5), &[1; 10]);
        assert_eq!(lit(&b).len(), 10);
    }

    #[test]
    fn test_wide_line_endpoints_full_intensity() {
        for wd in [1.0, 2.0, 3.0, 5.0] {
            let mut b = canvas(40, 30);
            Drawer::new(&mut b).line_width::<ClippedAdd>(5, 5, 32, 20, wd, 255);
            assert_eq!(*b.pixel(5, 5), 255, "width {wd}");
            assert_eq!(*b.pixel(32, 20), 255, "width {wd}");
        }
    }

    #[test]
    fn test_wide_line_writes_each_pixel_once() {
        // Additive writes of 1.0 coverage would exceed 1.0 on a double write
        for (x1, y1, wd) in [(30, 4, 3.0), (6, 28, 2.0), (25, 25, 4.0), (20, 0, 1.0)] {
            let mut b = PixelBuffer::<f32>::new(40, 40).unwrap();
            Drawer::new(&mut b).line_width::<ClippedAdd>(5, 2, x1, y1, wd, 1.0);
            assert!(
                b.rows().flatten().all(|&p| p <= 1.0),
                "line to ({x1}, {y1}) width {wd}"
            );
        }
    }

    #[test]
    fn test_wide_line_stays_in_band() {
        let (x0, y0, x1, y1, wd) = (4.0f32, 6.0f32, 34.0f32, 18.0f32, 3.0f32);
        let mut b = canvas(40, 30);
        Drawer::new(&mut b).line_width::<ClippedSet>(4, 6, 34, 18, wd, 255);

        let len = ((x1 - x0).powi(2) + (y1 - y0).powi(2)).sqrt();
        for (x, y) in lit(&b) {
            let (px, py) = (x as f32, y as f32);
            let dist = ((px - x0) * (y1 - y0) - (py - y0) * (x1 - x0)).abs() / len;
            assert!(dist <= wd / 2.0 + 1.0, "({x}, {y}) at distance {dist}");
        }
    }

    #[test]
    fn test_wide_line_horizontal_covers_band() {
        let mut b = canvas(12, 7);
        Drawer::new(&mut b).line_width::<ClippedSet>(1, 3, 10, 3, 3.0, 200);
        assert!(b.row(3)[1..=10].iter().all(|&p| p == 200));
        let rows: Vec<u32> = (0..7).filter(|&y| b.row(y).iter().any(|&p| p != 0)).collect();
        assert!(rows.len() >= 2 && rows.len() <= 3, "rows {rows:?}");
        assert!(rows.contains(&3));
    }

    #[test]
    fn test_wide_line_single_point() {
        let mut b = canvas(5, 5);
        Drawer::new(&mut b).line_width::<ClippedSet>(2, 2, 2, 2, 1.0, 9);
        assert_eq!(*b.pixel(2, 2), 9);
    }
}
