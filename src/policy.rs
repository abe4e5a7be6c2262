//! Write policy
//!
//! Every pixel a primitive produces goes through a [`WritePolicy`], a
//! zero-sized strategy chosen by type parameter.
//!
//! A policy is a placement rule ([`Clipped`] drops out-of-range writes,
//! [`Unclipped`] trusts the caller) combined with a [`Blend`] rule
//! ([`Overwrite`] or [`Additive`]).

use std::marker::PhantomData;

use crate::buffer::SurfaceMut;
use crate::pixel::Pixel;

// ============================================================================
// Blend
// ============================================================================

/// How a written value combines with the pixel already present
pub trait Blend {
    fn blend<P: Pixel>(dst: &mut P, src: P);

    /// Blend one value over a contiguous run
    #[inline]
    fn blend_span<P: Pixel>(span: &mut [P], src: P) {
        for dst in span {
            Self::blend(dst, src);
        }
    }
}

/// Replace the destination
#[derive(Debug, Clone, Copy, Default)]
pub struct Overwrite;

impl Blend for Overwrite {
    #[inline]
    fn blend<P: Pixel>(dst: &mut P, src: P) {
        *dst = src;
    }

    #[inline]
    fn blend_span<P: Pixel>(span: &mut [P], src: P) {
        span.fill(src);
    }
}

/// Saturating channel-wise add onto the destination
#[derive(Debug, Clone, Copy, Default)]
pub struct Additive;

impl Blend for Additive {
    #[inline]
    fn blend<P: Pixel>(dst: &mut P, src: P) {
        *dst = dst.saturating_add(src);
    }
}

// ============================================================================
// Target / RowCursor
// ============================================================================

/// Raw drawing target: a surface's storage plus its geometry in signed
/// coordinates.
pub struct Target<'a, P> {
    data: &'a mut [P],
    width: i32,
    height: i32,
    stride: isize,
}

impl<'a, P: Pixel> Target<'a, P> {
    pub fn new<S>(surface: &'a mut S) -> Self
    where
        S: SurfaceMut<Pixel = P> + ?Sized,
    {
        let width = i32::try_from(surface.width()).unwrap_or(i32::MAX);
        let height = i32::try_from(surface.height()).unwrap_or(i32::MAX);
        let stride = surface.row_stride() as isize;
        Self {
            data: surface.storage_mut(),
            width,
            height,
            stride,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Cursor positioned at row `y`
    #[inline]
    pub fn row(&self, y: i32) -> RowCursor {
        RowCursor {
            y,
            base: y as isize * self.stride,
            stride: self.stride,
        }
    }
}

/// Row `y` together with its cached storage offset `y * stride`.
///
/// Primitives step the cursor with [`RowCursor::advance`] in lockstep with
/// their y steps instead of recomputing the product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowCursor {
    y: i32,
    base: isize,
    stride: isize,
}

impl RowCursor {
    #[inline]
    pub fn y(self) -> i32 {
        self.y
    }

    /// Move by `dy` rows (negative moves up)
    #[inline]
    pub fn advance(&mut self, dy: i32) {
        self.y += dy;
        self.base += dy as isize * self.stride;
    }

    /// Cursor `dy` rows away
    #[inline]
    #[must_use]
    pub fn offset(mut self, dy: i32) -> Self {
        self.advance(dy);
        self
    }

    #[inline]
    fn index(self, x: i32) -> isize {
        self.base + x as isize
    }
}

// ============================================================================
// Placement
// ============================================================================

/// Pixel-write strategy used by every [`crate::draw::Drawer`] primitive
pub trait WritePolicy<P: Pixel> {
    /// Write one pixel at column `x` of `row`
    fn put(target: &mut Target<'_, P>, x: i32, row: RowCursor, color: P);

    /// Write the inclusive run `x0..=x1` of `row`; empty when `x0 > x1`
    fn hline(target: &mut Target<'_, P>, x0: i32, x1: i32, row: RowCursor, color: P);
}

/// Drops writes outside the target rectangle
#[derive(Debug, Clone, Copy, Default)]
pub struct Clipped<B = Overwrite>(PhantomData<B>);

/// No bounds check on the logical rectangle.
///
/// Out-of-range coordinates are a caller error: they trip a `debug_assert!`
/// in debug builds. In release builds an index past the storage panics, and
/// an index that still lands inside the storage overwrites whatever pixel
/// lives there (a stride padding slot, or the parent's pixel for a slice).
#[derive(Debug, Clone, Copy, Default)]
pub struct Unclipped<B = Overwrite>(PhantomData<B>);

pub type ClippedSet = Clipped<Overwrite>;
pub type ClippedAdd = Clipped<Additive>;
pub type UncheckedSet = Unclipped<Overwrite>;
pub type UncheckedAdd = Unclipped<Additive>;

impl<P: Pixel, B: Blend> WritePolicy<P> for Clipped<B> {
    #[inline]
    fn put(target: &mut Target<'_, P>, x: i32, row: RowCursor, color: P) {
        if target.contains(x, row.y) {
            B::blend(&mut target.data[row.index(x) as usize], color);
        }
    }

    #[inline]
    fn hline(target: &mut Target<'_, P>, x0: i32, x1: i32, row: RowCursor, color: P) {
        if row.y < 0 || row.y >= target.height {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(target.width - 1);
        if x0 > x1 {
            return;
        }
        let start = row.index(x0) as usize;
        let end = row.index(x1) as usize;
        B::blend_span(&mut target.data[start..=end], color);
    }
}

impl<P: Pixel, B: Blend> WritePolicy<P> for Unclipped<B> {
    #[inline]
    fn put(target: &mut Target<'_, P>, x: i32, row: RowCursor, color: P) {
        debug_assert!(
            target.contains(x, row.y),
            "unclipped write at ({x}, {}) outside {}x{}",
            row.y,
            target.width,
            target.height
        );
        let i = usize::try_from(row.index(x)).unwrap_or(usize::MAX);
        B::blend(&mut target.data[i], color);
    }

    #[inline]
    fn hline(target: &mut Target<'_, P>, x0: i32, x1: i32, row: RowCursor, color: P) {
        if x0 > x1 {
            return;
        }
        debug_assert!(
            target.contains(x0, row.y) && target.contains(x1, row.y),
            "unclipped span {x0}..={x1} on row {} outside {}x{}",
            row.y,
            target.width,
            target.height
        );
        let start = usize::try_from(row.index(x0)).unwrap_or(usize::MAX);
        let end = usize::try_from(row.index(x1)).unwrap_or(usize::MAX);
        B::blend_span(&mut target.data[start..=end], color);
    }
}

// ============================================================================
// Pen
// ============================================================================

/// Square pen of side `W` over an inner policy.
///
/// Each plotted pixel becomes a `W x W` stamp spanning offsets
/// `-(W - 1) / 2 ..= W / 2` on both axes (`W <= 1` is a single pixel). Spans
/// are widened instead of stamped, so a span writes each covered pixel once;
/// stamps of neighbouring points overlap and accumulate under [`Additive`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Pen<const W: u32, I = ClippedSet>(PhantomData<I>);

impl<const W: u32, I> Pen<W, I> {
    const LO: i32 = -((W.saturating_sub(1) / 2) as i32);
    const HI: i32 = (W / 2) as i32;
}

impl<P: Pixel, const W: u32, I: WritePolicy<P>> WritePolicy<P> for Pen<W, I> {
    #[inline]
    fn put(target: &mut Target<'_, P>, x: i32, row: RowCursor, color: P) {
        Self::hline(target, x, x, row, color);
    }

    #[inline]
    fn hline(target: &mut Target<'_, P>, x0: i32, x1: i32, row: RowCursor, color: P) {
        if x0 > x1 {
            return;
        }
        let (x0, x1) = (x0.saturating_add(Self::LO), x1.saturating_add(Self::HI));
        for dy in Self::LO..=Self::HI {
            I::hline(target, x0, x1, row.offset(dy), color);
        }
    }
}
