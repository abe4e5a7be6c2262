//! Pixel buffers
//!
//! [`PixelBuffer`] owns its storage. [`BufferSlice`] and [`BufferSliceMut`]
//! borrow a rectangle of another surface without copying; the borrow ties the
//! view's lifetime to its parent, so a parent cannot be resized while a view
//! is alive. All three are row-major with a row stride that may exceed the
//! logical width, and share their behaviour through [`Surface`] /
//! [`SurfaceMut`].

mod slice;

pub use slice::{BufferSlice, BufferSliceMut};

use crate::error::BufferError;
use crate::pixel::Pixel;

// ============================================================================
// Layout helpers
// ============================================================================

/// Storage slots spanned by a layout: `(height - 1) * stride + width`
#[inline]
pub(crate) fn storage_len(width: u32, height: u32, stride: u32) -> usize {
    if width == 0 || height == 0 {
        return 0;
    }
    (height as usize - 1) * stride as usize + width as usize
}

/// Validate a requested extent, returning the effective stride
fn check_dimensions(width: u32, height: u32, stride: u32) -> Result<u32, BufferError> {
    if width == 0 || height == 0 || (stride != 0 && stride < width) {
        return Err(BufferError::InvalidDimensions {
            width,
            height,
            stride,
        });
    }
    Ok(if stride == 0 { width } else { stride })
}

/// `x + w <= limit` without overflow
#[inline]
fn fits(x: u32, w: u32, limit: u32) -> bool {
    u64::from(x) + u64::from(w) <= u64::from(limit)
}

/// A validated sub-rectangle expressed as a storage range
pub(crate) struct SubRect {
    pub start: usize,
    pub len: usize,
    pub width: u32,
    pub height: u32,
}

/// Resolve a view request against a parent extent. `None` extends the view to
/// the parent's right/bottom edge.
pub(crate) fn sub_rect(
    parent_width: u32,
    parent_height: u32,
    stride: u32,
    x: u32,
    y: u32,
    width: Option<u32>,
    height: Option<u32>,
) -> Result<SubRect, BufferError> {
    let w = width.unwrap_or_else(|| parent_width.saturating_sub(x));
    let h = height.unwrap_or_else(|| parent_height.saturating_sub(y));

    if w == 0 || h == 0 || !fits(x, w, parent_width) || !fits(y, h, parent_height) {
        tracing::debug!(x, y, w, h, parent_width, parent_height, "rejected slice");
        return Err(BufferError::SliceOutOfBounds {
            x,
            y,
            width: w,
            height: h,
            parent_width,
            parent_height,
        });
    }

    Ok(SubRect {
        start: y as usize * stride as usize + x as usize,
        len: storage_len(w, h, stride),
        width: w,
        height: h,
    })
}

// ============================================================================
// Rows iterator
// ============================================================================

/// Logical rows of a surface, top to bottom, each exactly `width` long
pub struct Rows<'a, P> {
    storage: &'a [P],
    width: usize,
    stride: usize,
    remaining: usize,
}

impl<'a, P> Iterator for Rows<'a, P> {
    type Item = &'a [P];

    fn next(&mut self) -> Option<&'a [P]> {
        if self.remaining == 0 {
            return None;
        }
        let storage: &'a [P] = self.storage;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.storage = &storage[self.stride..];
        }
        Some(&storage[..self.width])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<P> ExactSizeIterator for Rows<'_, P> {}

// ============================================================================
// Surface traits
// ============================================================================

/// Read access shared by owned buffers and views.
///
/// `storage()` starts at logical pixel `(0, 0)` and spans
/// `(height - 1) * row_stride + width` slots.
pub trait Surface {
    type Pixel: Pixel;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Pixel slots advanced per row (>= width)
    fn row_stride(&self) -> u32;

    fn storage(&self) -> &[Self::Pixel];

    #[inline]
    fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    /// Storage index of `(x, y)`
    #[inline]
    fn index_of(&self, x: u32, y: u32) -> usize {
        y as usize * self.row_stride() as usize + x as usize
    }

    /// The `width` pixels of row `y`. Panics if `y >= height`.
    #[inline]
    fn row(&self, y: u32) -> &[Self::Pixel] {
        let start = y as usize * self.row_stride() as usize;
        &self.storage()[start..start + self.width() as usize]
    }

    /// Panics if out of bounds; see [`Surface::get`] for the checked form
    #[inline]
    fn pixel(&self, x: u32, y: u32) -> &Self::Pixel {
        &self.row(y)[x as usize]
    }

    #[inline]
    fn get(&self, x: i32, y: i32) -> Option<&Self::Pixel> {
        if self.contains(x, y) {
            Some(self.pixel(x as u32, y as u32))
        } else {
            None
        }
    }

    fn rows(&self) -> Rows<'_, Self::Pixel> {
        Rows {
            storage: self.storage(),
            width: self.width() as usize,
            stride: self.row_stride() as usize,
            remaining: if self.is_empty() { 0 } else { self.height() as usize },
        }
    }

    /// Zero-copy read-only view of a sub-rectangle
    fn slice(
        &self,
        x: u32,
        y: u32,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<BufferSlice<'_, Self::Pixel>, BufferError> {
        let stride = self.row_stride();
        let r = sub_rect(self.width(), self.height(), stride, x, y, width, height)?;
        Ok(BufferSlice::from_parts(
            &self.storage()[r.start..r.start + r.len],
            r.width,
            r.height,
            stride,
        ))
    }

    /// Copy of the visible rectangle into a tightly packed owned buffer
    fn to_buffer(&self) -> PixelBuffer<Self::Pixel> {
        let mut data = Vec::with_capacity(self.width() as usize * self.height() as usize);
        for row in self.rows() {
            data.extend_from_slice(row);
        }
        PixelBuffer {
            data,
            width: if self.is_empty() { 0 } else { self.width() },
            height: if self.is_empty() { 0 } else { self.height() },
            row_stride: if self.is_empty() { 0 } else { self.width() },
        }
    }

    /// Extract a sub-rectangle into a fresh owned buffer
    fn region_to(
        &self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<PixelBuffer<Self::Pixel>, BufferError> {
        Ok(self.slice(x, y, Some(width), Some(height))?.to_buffer())
    }
}

/// Write access shared by owned buffers and mutable views
pub trait SurfaceMut: Surface {
    fn storage_mut(&mut self) -> &mut [Self::Pixel];

    #[inline]
    fn row_mut(&mut self, y: u32) -> &mut [Self::Pixel] {
        let start = y as usize * self.row_stride() as usize;
        let end = start + self.width() as usize;
        &mut self.storage_mut()[start..end]
    }

    #[inline]
    fn pixel_mut(&mut self, x: u32, y: u32) -> &mut Self::Pixel {
        &mut self.row_mut(y)[x as usize]
    }

    #[inline]
    fn set_pixel(&mut self, x: u32, y: u32, value: Self::Pixel) {
        *self.pixel_mut(x, y) = value;
    }

    /// Zero-copy mutable view of a sub-rectangle. Writes through the view land
    /// in this surface's storage.
    fn slice_mut(
        &mut self,
        x: u32,
        y: u32,
        width: Option<u32>,
        height: Option<u32>,
    ) -> Result<BufferSliceMut<'_, Self::Pixel>, BufferError> {
        let stride = self.row_stride();
        let r = sub_rect(self.width(), self.height(), stride, x, y, width, height)?;
        Ok(BufferSliceMut::from_parts(
            &mut self.storage_mut()[r.start..r.start + r.len],
            r.width,
            r.height,
            stride,
        ))
    }

    /// Fill every visible pixel
    fn clear(&mut self, value: Self::Pixel) {
        for y in 0..self.height() {
            self.row_mut(y).fill(value);
        }
    }

    /// Apply `f` to every visible pixel
    fn apply<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut Self::Pixel),
    {
        for y in 0..self.height() {
            self.row_mut(y).iter_mut().for_each(&mut f);
        }
    }

    /// Copy all of `src` into this surface with its top-left at `(dst_x, dst_y)`
    fn copy_region<S>(&mut self, src: &S, dst_x: u32, dst_y: u32) -> Result<(), BufferError>
    where
        S: Surface<Pixel = Self::Pixel> + ?Sized,
    {
        let (w, h) = (src.width(), src.height());
        if !fits(dst_x, w, self.width()) || !fits(dst_y, h, self.height()) {
            return Err(BufferError::CopyRegionMismatch {
                x: dst_x,
                y: dst_y,
                src_width: w,
                src_height: h,
                dst_width: self.width(),
                dst_height: self.height(),
            });
        }
        if src.is_empty() {
            return Ok(());
        }

        let x0 = dst_x as usize;
        for (y, src_row) in (dst_y..).zip(src.rows()) {
            self.row_mut(y)[x0..x0 + w as usize].copy_from_slice(src_row);
        }
        Ok(())
    }

    /// Fill a sub-rectangle with `value`
    fn set_region(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        value: Self::Pixel,
    ) -> Result<(), BufferError> {
        self.slice_mut(x, y, Some(width), Some(height))?.clear(value);
        Ok(())
    }

    /// Mirror left-right in place
    fn horizontal_flip(&mut self) {
        for y in 0..self.height() {
            self.row_mut(y).reverse();
        }
    }

    /// Mirror top-bottom in place
    fn vertical_flip(&mut self) {
        let w = self.width() as usize;
        let h = self.height() as usize;
        let stride = self.row_stride() as usize;
        let storage = self.storage_mut();

        for y in 0..h / 2 {
            let top = y * stride;
            let bottom = (h - 1 - y) * stride;
            let (upper, lower) = storage.split_at_mut(bottom);
            upper[top..top + w].swap_with_slice(&mut lower[..w]);
        }
    }
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// Owned, row-major pixel storage with a configurable row stride.
///
/// Storage length is exactly `(height - 1) * row_stride + width`; the
/// default value is the empty (unusable) 0x0 buffer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PixelBuffer<P> {
    data: Vec<P>,
    width: u32,
    height: u32,
    row_stride: u32,
}

impl<P: Pixel> PixelBuffer<P> {
    /// Zero-initialized `width x height` buffer with `row_stride == width`
    pub fn new(width: u32, height: u32) -> Result<Self, BufferError> {
        Self::with_stride(width, height, 0)
    }

    /// Zero-initialized buffer with padded rows. `stride == 0` means `width`.
    pub fn with_stride(width: u32, height: u32, stride: u32) -> Result<Self, BufferError> {
        let mut buffer = Self::default();
        buffer.resize(width, height, stride, true)?;
        Ok(buffer)
    }

    /// Buffer with every slot set to `value`
    pub fn filled(width: u32, height: u32, value: P) -> Result<Self, BufferError> {
        let mut buffer = Self::new(width, height)?;
        buffer.data.fill(value);
        Ok(buffer)
    }

    /// Adopt storage produced elsewhere (e.g. by a decoder).
    ///
    /// `data` may hold either the exact span `(height - 1) * stride + width`
    /// or full padded rows `height * stride`; trailing padding is dropped.
    pub fn from_vec(
        width: u32,
        height: u32,
        stride: u32,
        mut data: Vec<P>,
    ) -> Result<Self, BufferError> {
        let row_stride = check_dimensions(width, height, stride)?;
        let expected = storage_len(width, height, row_stride);
        let padded = height as usize * row_stride as usize;
        if data.len() != expected && data.len() != padded {
            return Err(BufferError::StorageLength {
                expected,
                actual: data.len(),
            });
        }
        data.truncate(expected);
        Ok(Self {
            data,
            width,
            height,
            row_stride,
        })
    }

    /// (Re)allocate to `width x height`; `stride == 0` means `width`.
    ///
    /// Fails without touching the buffer on zero extent or a stride narrower
    /// than `width`. With `clear == false` existing storage is kept in place
    /// (it is not re-laid-out) and any new slots are zero.
    pub fn resize(
        &mut self,
        width: u32,
        height: u32,
        stride: u32,
        clear: bool,
    ) -> Result<(), BufferError> {
        let row_stride = match check_dimensions(width, height, stride) {
            Ok(s) => s,
            Err(e) => {
                tracing::debug!(width, height, stride, "rejected resize");
                return Err(e);
            },
        };

        if clear {
            self.data.clear();
        }
        self.data.resize(storage_len(width, height, row_stride), P::default());
        self.width = width;
        self.height = height;
        self.row_stride = row_stride;
        Ok(())
    }

    /// Raw storage, including stride padding between rows
    #[inline]
    pub fn as_slice(&self) -> &[P] {
        &self.data
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [P] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<P> {
        self.data
    }

    /// Logical pixel count (`width * height`)
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Pixel slots including padding (`row_stride * height`)
    #[inline]
    pub fn pixel_count_with_padding(&self) -> usize {
        self.row_stride as usize * self.height as usize
    }

    /// Whole-buffer copy; extents must match
    pub fn copy_from<S>(&mut self, src: &S) -> Result<(), BufferError>
    where
        S: Surface<Pixel = P> + ?Sized,
    {
        if src.width() != self.width || src.height() != self.height {
            return Err(BufferError::SizeMismatch {
                src_width: src.width(),
                src_height: src.height(),
                dst_width: self.width,
                dst_height: self.height,
            });
        }
        self.copy_region(src, 0, 0)
    }

    /// Convert pixel type, keeping the layout (stride included)
    pub fn map<Q, F>(&self, f: F) -> PixelBuffer<Q>
    where
        Q: Pixel,
        F: FnMut(&P) -> Q,
    {
        PixelBuffer {
            data: self.data.iter().map(f).collect(),
            width: self.width,
            height: self.height,
            row_stride: self.row_stride,
        }
    }

    /// 3x3 tiling of this image: the original in the centre, mirrored copies
    /// on each side, optionally doubly mirrored copies in the corners.
    pub fn reflective_image(&self, include_diagonals: bool) -> Result<Self, BufferError> {
        let (w, h) = (self.width, self.height);
        let invalid = BufferError::InvalidDimensions {
            width: w,
            height: h,
            stride: self.row_stride,
        };
        let (Some(w3), Some(h3)) = (w.checked_mul(3), h.checked_mul(3)) else {
            return Err(invalid);
        };
        let mut out = Self::new(w3, h3)?;

        let mut tile = self.to_buffer();
        out.copy_region(&tile, w, h)?;

        tile.vertical_flip();
        out.copy_region(&tile, w, 0)?;
        out.copy_region(&tile, w, 2 * h)?;

        tile.vertical_flip();
        tile.horizontal_flip();
        out.copy_region(&tile, 0, h)?;
        out.copy_region(&tile, 2 * w, h)?;

        if include_diagonals {
            tile.vertical_flip();
            out.copy_region(&tile, 0, 0)?;
            out.copy_region(&tile, 2 * w, 0)?;
            out.copy_region(&tile, 0, 2 * h)?;
            out.copy_region(&tile, 2 * w, 2 * h)?;
        }
        Ok(out)
    }
}

impl<P: Pixel + bytemuck::Pod> PixelBuffer<P> {
    /// Storage as bytes, for handing rows to an encoder or a texture upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }
}

impl<P: Pixel> Surface for PixelBuffer<P> {
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
        &self.data
    }
}

impl<P: Pixel> SurfaceMut for PixelBuffer<P> {
    #[inline]
    fn storage_mut(&mut self) -> &mut [P] {
        &mut self.data
    }

    /// Owned buffers also overwrite the stride padding
    fn clear(&mut self, value: P) {
        self.data.fill(value);
    }
}
