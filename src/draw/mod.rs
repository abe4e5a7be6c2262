//! Rasterization engine
//!
//! [`Drawer`] borrows a surface and exposes the integer drawing primitives.
//! Every primitive takes its [`WritePolicy`] as a type parameter:
//!
//! ```
//! use rasterkit::{ClippedSet, Drawer, PixelBuffer, Rgb8, Surface};
//!
//! let mut canvas = PixelBuffer::<Rgb8>::new(16, 16).unwrap();
//! let mut d = Drawer::new(&mut canvas);
//! d.line::<ClippedSet>(0, 0, 15, 9, Rgb8::WHITE);
//! d.fill_ellipse::<ClippedSet>(8, 8, 5, 3, Rgb8::new(255, 0, 0));
//! assert_eq!(*canvas.pixel(0, 0), Rgb8::WHITE);
//! ```
//!
//! Primitives never fail. Out-of-range coordinates are absorbed by
//! [`crate::policy::Clipped`] policies and are a caller error under
//! [`crate::policy::Unclipped`] ones.

mod circle;
mod ellipse;
mod ellipse_rect;
mod line;

use crate::buffer::SurfaceMut;
use crate::pixel::Pixel;
use crate::policy::{RowCursor, Target, WritePolicy};

/// Integer coordinate pair
pub type Point = (i32, i32);

/// Stateless drawing front-end over a borrowed surface
pub struct Drawer<'a, P> {
    target: Target<'a, P>,
}

impl<'a, P: Pixel> Drawer<'a, P> {
    pub fn new<S>(surface: &'a mut S) -> Self
    where
        S: SurfaceMut<Pixel = P> + ?Sized,
    {
        Self {
            target: Target::new(surface),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.target.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.target.height()
    }

    // ========================================================================
    // Internal write helpers
    // ========================================================================

    #[inline]
    fn row(&self, y: i32) -> RowCursor {
        self.target.row(y)
    }

    #[inline]
    fn put<W: WritePolicy<P>>(&mut self, x: i32, row: RowCursor, color: P) {
        W::put(&mut self.target, x, row, color);
    }

    #[inline]
    fn span<W: WritePolicy<P>>(&mut self, x0: i32, x1: i32, row: RowCursor, color: P) {
        W::hline(&mut self.target, x0, x1, row, color);
    }

    /// Plot `(xr, lower)`, `(xl, lower)`, `(xl, upper)`, `(xr, upper)`,
    /// writing each distinct position once
    #[inline]
    fn put_mirrored<W: WritePolicy<P>>(
        &mut self,
        xl: i32,
        xr: i32,
        lower: RowCursor,
        upper: RowCursor,
        color: P,
    ) {
        self.put::<W>(xr, lower, color);
        if xl != xr {
            self.put::<W>(xl, lower, color);
        }
        if lower.y() != upper.y() {
            self.put::<W>(xl, upper, color);
            if xl != xr {
                self.put::<W>(xr, upper, color);
            }
        }
    }

    /// Span `xl..=xr` on `lower`, and on `upper` when it is a different row
    #[inline]
    fn span_mirrored<W: WritePolicy<P>>(
        &mut self,
        xl: i32,
        xr: i32,
        lower: RowCursor,
        upper: RowCursor,
        color: P,
    ) {
        self.span::<W>(xl, xr, lower, color);
        if lower.y() != upper.y() {
            self.span::<W>(xl, xr, upper, color);
        }
    }

    // ========================================================================
    // Thin primitives
    // ========================================================================

    pub fn point<W: WritePolicy<P>>(&mut self, x: i32, y: i32, color: P) {
        let row = self.row(y);
        self.put::<W>(x, row, color);
    }

    /// Plus-shaped marker: the centre and its four direct neighbours
    pub fn cross<W: WritePolicy<P>>(&mut self, x: i32, y: i32, color: P) {
        let row = self.row(y);
        self.span::<W>(x - 1, x + 1, row, color);
        self.put::<W>(x, row.offset(-1), color);
        self.put::<W>(x, row.offset(1), color);
    }

    /// Inclusive horizontal run, endpoints in either order
    pub fn hline<W: WritePolicy<P>>(&mut self, x0: i32, x1: i32, y: i32, color: P) {
        let row = self.row(y);
        self.span::<W>(x0.min(x1), x0.max(x1), row, color);
    }

    /// Inclusive vertical run, endpoints in either order
    pub fn vline<W: WritePolicy<P>>(&mut self, x: i32, y0: i32, y1: i32, color: P) {
        let (top, bottom) = (y0.min(y1), y0.max(y1));
        let mut row = self.row(top);
        for _ in top..=bottom {
            self.put::<W>(x, row, color);
            row.advance(1);
        }
    }

    /// Rectangle outline with inclusive corners; every border pixel written once
    pub fn rect<W: WritePolicy<P>>(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: P) {
        let (left, right) = (x0.min(x1), x0.max(x1));
        let (top, bottom) = (y0.min(y1), y0.max(y1));

        let mut row = self.row(top);
        self.span::<W>(left, right, row, color);
        if top == bottom {
            return;
        }
        for _ in top + 1..bottom {
            row.advance(1);
            self.put::<W>(left, row, color);
            if right != left {
                self.put::<W>(right, row, color);
            }
        }
        row.advance(1);
        self.span::<W>(left, right, row, color);
    }

    /// Filled rectangle with inclusive corners, one span per row
    pub fn fill_rect<W: WritePolicy<P>>(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: P) {
        let (left, right) = (x0.min(x1), x0.max(x1));
        let (top, bottom) = (y0.min(y1), y0.max(y1));

        let mut row = self.row(top);
        for _ in top..=bottom {
            self.span::<W>(left, right, row, color);
            row.advance(1);
        }
    }

    /// Triangle outline from three line segments
    pub fn triangle<W: WritePolicy<P>>(&mut self, a: Point, b: Point, c: Point, color: P) {
        self.polyline::<W>(&[a, b, c], color);
    }

    /// Quadrilateral outline from four line segments
    pub fn quad<W: WritePolicy<P>>(&mut self, a: Point, b: Point, c: Point, d: Point, color: P) {
        self.polyline::<W>(&[a, b, c, d], color);
    }

    /// Closed outline through `points`
    fn polyline<W: WritePolicy<P>>(&mut self, points: &[Point], color: P) {
        for (i, &(x0, y0)) in points.iter().enumerate() {
            let (x1, y1) = points[(i + 1) % points.len()];
            self.line::<W>(x0, y0, x1, y1, color);
        }
    }
}
