//! Zero-copy views into a parent surface

use super::{Surface, SurfaceMut};
use crate::pixel::Pixel;

/// Read-only rectangle of a parent surface. Inherits the parent's stride.
#[derive(Debug, Clone, Copy)]
pub struct BufferSlice<'a, P> {
    data: &'a [P],
    width: u32,
    height: u32,
    row_stride: u32,
}

impl<'a, P: Pixel> BufferSlice<'a, P> {
    pub(crate) fn from_parts(data: &'a [P], width: u32, height: u32, row_stride: u32) -> Self {
        Self {
            data,
            width,
            height,
            row_stride,
        }
    }

    /// Storage of the view, starting at its top-left pixel
    pub fn as_slice(&self) -> &'a [P] {
        self.data
    }
}

impl<P: Pixel> Surface for BufferSlice<'_, P> {
    type Pixel = P;

    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn row_stride(&self) -> u32 {
        self.row_stride
    }

    #[inline]
    fn storage(&self) -> &[P] {
        self.data
    }
}

/// Mutable rectangle of a parent surface.
///
/// Writes land in the parent's storage. `clear` only touches the visible
/// rectangle, never the parent pixels between the view's rows.
#[derive(Debug)]
pub struct BufferSliceMut<'a, P> {
    data: &'a mut [P],
    width: u32,
    height: u32,
    row_stride: u32,
}

impl<'a, P: Pixel> BufferSliceMut<'a, P> {
    pub(crate) fn from_parts(data: &'a mut [P], width: u32, height: u32, row_stride: u32) -> Self {
        Self {
            data,
            width,
            height,
            row_stride,
        }
    }

    /// Shorter-lived read-only view of the same rectangle
    pub fn as_view(&self) -> BufferSlice<'_, P> {
        BufferSlice::from_parts(&*self.data, self.width, self.height, self.row_stride)
    }

    /// Shorter-lived mutable view, leaving `self` usable afterwards
    pub fn reborrow(&mut self) -> BufferSliceMut<'_, P> {
        BufferSliceMut::from_parts(&mut *self.data, self.width, self.height, self.row_stride)
    }
}

impl<P: Pixel> Surface for BufferSliceMut<'_, P> {
    type Pixel = P;

    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn row_stride(&self) -> u32 {
        self.row_stride
    }

    #[inline]
    fn storage(&self) -> &[P] {
        &*self.data
    }
}

impl<P: Pixel> SurfaceMut for BufferSliceMut<'_, P> {
    #[inline]
    fn storage_mut(&mut self) -> &mut [P] {
        &mut *self.data
    }
}

#[cfg(test)]
mod tests {
    use crate::buffer::{PixelBuffer, Surface, SurfaceMut};
    use crate::error::BufferError;
    use pretty_assertions::assert_eq;

    fn numbered(w: u32, h: u32) -> PixelBuffer<u8> {
        let mut b = PixelBuffer::new(w, h).unwrap();
        for y in 0..h {
            for x in 0..w {
                b.set_pixel(x, y, (y * 10 + x) as u8);
            }
        }
        b
    }

    #[test]
    fn test_slice_addresses_parent_pixels() {
        let b = numbered(8, 6);
        let s = b.slice(2, 1, Some(3), Some(4)).unwrap();
        assert_eq!((s.width(), s.height(), s.row_stride()), (3, 4, 8));
        for y in 0..4 {
            for x in 0..3 {
                assert_eq!(s.pixel(x, y), b.pixel(x + 2, y + 1));
            }
        }
        assert_eq!(s.as_slice().len(), 3 * 8 + 3);
    }

    #[test]
    fn test_slice_defaults_to_remaining_extent() {
        let b = numbered(8, 6);
        let s = b.slice(5, 4, None, None).unwrap();
        assert_eq!((s.width(), s.height()), (3, 2));
        assert_eq!(*s.pixel(2, 1), 57);
    }

    #[test]
    fn test_slice_rejects_out_of_bounds() {
        let b = numbered(8, 6);
        assert!(matches!(
            b.slice(8, 0, None, None),
            Err(BufferError::SliceOutOfBounds { .. })
        ));
        assert!(b.slice(0, 6, None, None).is_err());
        assert!(b.slice(6, 0, Some(3), None).is_err());
        assert!(b.slice(0, 0, Some(0), Some(2)).is_err());
        assert!(b.slice(0, 4, None, Some(3)).is_err());
    }

    #[test]
    fn test_nested_slices_compose_offsets() {
        let b = numbered(8, 6);
        let outer = b.slice(1, 1, None, None).unwrap();
        let inner = outer.slice(2, 3, Some(2), Some(2)).unwrap();
        assert_eq!(inner.row_stride(), 8);
        assert_eq!(*inner.pixel(0, 0), 43);
        assert_eq!(*inner.pixel(1, 1), 54);
    }

    #[test]
    fn test_mutable_slice_writes_through() {
        let mut b = numbered(6, 4);
        {
            let mut s = b.slice_mut(1, 1, Some(2), Some(2)).unwrap();
            s.set_pixel(1, 1, 200);
            s.reborrow().set_pixel(0, 0, 100);
        }
        assert_eq!(*b.pixel(1, 1), 100);
        assert_eq!(*b.pixel(2, 2), 200);
    }

    #[test]
    fn test_slice_clear_touches_only_view() {
        let mut b = numbered(5, 4);
        let before = b.clone();
        b.slice_mut(1, 1, Some(2), Some(2)).unwrap().clear(0xFF);

        for y in 0..4 {
            for x in 0..5 {
                let inside = (1..3).contains(&x) && (1..3).contains(&y);
                let expected = if inside { 0xFF } else { *before.pixel(x, y) };
                assert_eq!(*b.pixel(x, y), expected, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_slice_flip_stays_inside_view() {
        let mut b = numbered(5, 4);
        b.slice_mut(1, 0, Some(3), Some(4)).unwrap().vertical_flip();
        assert_eq!(b.row(0), &[0, 31, 32, 33, 4]);
        assert_eq!(b.row(3), &[30, 1, 2, 3, 34]);

        b.slice_mut(0, 1, Some(3), Some(1)).unwrap().horizontal_flip();
        assert_eq!(b.row(1), &[22, 21, 10, 23, 14]);
    }

    #[test]
    fn test_copy_region_from_slice() {
        let src = numbered(6, 6);
        let view = src.slice(3, 3, None, None).unwrap();
        let mut dst = PixelBuffer::<u8>::new(3, 3).unwrap();
        dst.copy_region(&view, 0, 0).unwrap();
        assert_eq!(dst.row(0), &[33, 34, 35]);
        assert_eq!(dst.row(2), &[53, 54, 55]);
    }
}
