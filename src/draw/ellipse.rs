//! Axis-aligned ellipses given by centre and radii
//!
//! Two error-term formulations drive the same quadrant walk: [`Direct`]
//! evaluates the `(2x + 1) * ry^2` / `(2y + 1) * rx^2` products every step,
//! [`Incremental`] carries them as running sums. Both produce the same pixel
//! set.

use super::Drawer;
use crate::pixel::Pixel;
use crate::policy::WritePolicy;

/// Midpoint error term of the quadrant walk from `(-rx, 0)` to `(0, ry)`.
///
/// Terms are kept in `i128`: the products reach `2 * r^3` and overflow `i64`
/// for radii around `2^21`.
trait ErrorTerms {
    fn new(rx: i64, ry: i64) -> Self;

    /// Advance from `(x, y)`. Returns true when `y` moved.
    fn step(&mut self, x: &mut i64, y: &mut i64) -> bool;
}

struct Direct {
    rx2: i128,
    ry2: i128,
    err: i128,
}

impl ErrorTerms for Direct {
    fn new(rx: i64, ry: i64) -> Self {
        let (rx, ry) = (i128::from(rx), i128::from(ry));
        let ry2 = ry * ry;
        let x = -rx;
        Self {
            rx2: rx * rx,
            ry2,
            err: x * (2 * ry2 + x) + ry2,
        }
    }

    #[inline]
    fn step(&mut self, x: &mut i64, y: &mut i64) -> bool {
        let e2 = 2 * self.err;
        if e2 >= (i128::from(*x) * 2 + 1) * self.ry2 {
            *x += 1;
            self.err += (i128::from(*x) * 2 + 1) * self.ry2;
        }
        if e2 <= (i128::from(*y) * 2 + 1) * self.rx2 {
            *y += 1;
            self.err += (i128::from(*y) * 2 + 1) * self.rx2;
            return true;
        }
        false
    }
}

struct Incremental {
    /// `2 * rx^2`, `2 * ry^2`
    rx2: i128,
    ry2: i128,
    dx: i128,
    dy: i128,
    err: i128,
}

impl ErrorTerms for Incremental {
    fn new(rx: i64, ry: i64) -> Self {
        let (rx, ry) = (i128::from(rx), i128::from(ry));
        let dx = (1 - 2 * rx) * ry * ry;
        let dy = rx * rx;
        Self {
            rx2: 2 * rx * rx,
            ry2: 2 * ry * ry,
            dx,
            dy,
            err: dx + dy,
        }
    }

    #[inline]
    fn step(&mut self, x: &mut i64, y: &mut i64) -> bool {
        let e2 = 2 * self.err;
        if e2 >= self.dx {
            *x += 1;
            self.dx += self.ry2;
            self.err += self.dx;
        }
        if e2 <= self.dy {
            *y += 1;
            self.dy += self.rx2;
            self.err += self.dy;
            return true;
        }
        false
    }
}

impl<P: Pixel> Drawer<'_, P> {
    /// Ellipse outline around `(xm, ym)` with half-axes `rx`, `ry`.
    ///
    /// A zero radius degenerates to a `2r + 1` segment along the other axis;
    /// negative radii draw nothing.
    pub fn ellipse<W: WritePolicy<P>>(&mut self, xm: i32, ym: i32, rx: i32, ry: i32, color: P) {
        self.walk_ellipse::<Direct, W>(xm, ym, rx, ry, color, false);
    }

    /// Filled [`Drawer::ellipse`], one span per scanline
    pub fn fill_ellipse<W: WritePolicy<P>>(
        &mut self,
        xm: i32,
        ym: i32,
        rx: i32,
        ry: i32,
        color: P,
    ) {
        self.walk_ellipse::<Direct, W>(xm, ym, rx, ry, color, true);
    }

    /// [`Drawer::ellipse`] with incrementally maintained error terms
    pub fn ellipse_optimized<W: WritePolicy<P>>(
        &mut self,
        xm: i32,
        ym: i32,
        rx: i32,
        ry: i32,
        color: P,
    ) {
        self.walk_ellipse::<Incremental, W>(xm, ym, rx, ry, color, false);
    }

    pub fn fill_ellipse_optimized<W: WritePolicy<P>>(
        &mut self,
        xm: i32,
        ym: i32,
        rx: i32,
        ry: i32,
        color: P,
    ) {
        self.walk_ellipse::<Incremental, W>(xm, ym, rx, ry, color, true);
    }

    fn walk_ellipse<T: ErrorTerms, W: WritePolicy<P>>(
        &mut self,
        xm: i32,
        ym: i32,
        rx: i32,
        ry: i32,
        color: P,
        fill: bool,
    ) {
        if rx < 0 || ry < 0 {
            return;
        }

        let mut terms = T::new(i64::from(rx), i64::from(ry));
        let mut x = -i64::from(rx);
        let mut y = 0i64;

        // Rows ym + y and ym - y
        let mut lower = self.row(ym);
        let mut upper = lower;
        // Pending span of the current scanline, empty while xl > xr
        let (mut xl, mut xr) = (xm + 1, xm);

        loop {
            let half = (-x) as i32;
            if fill {
                xl = xl.min(xm - half);
                xr = xr.max(xm + half);
            } else {
                self.put_mirrored::<W>(xm - half, xm + half, lower, upper, color);
            }

            if terms.step(&mut x, &mut y) {
                if fill {
                    self.span_mirrored::<W>(xl, xr, lower, upper, color);
                    (xl, xr) = (xm + 1, xm);
                }
                lower.advance(1);
                upper.advance(-1);
            }
            if x > 0 {
                break;
            }
        }
        if fill && xl <= xr {
            self.span_mirrored::<W>(xl, xr, lower, upper, color);
        }

        // Flat ellipses stop short of the vertical extent; finish the tips
        while y < i64::from(ry) {
            y += 1;
            lower.advance(1);
            upper.advance(-1);
            self.put_mirrored::<W>(xm, xm, lower, upper, color);
        }
    }
}
