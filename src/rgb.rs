//! RGB image convenience layer
//!
//! [`RgbImage`] owns a `PixelBuffer<Rgb8>` and adds named-channel helpers on
//! top of it. Everything else is reached through the inner buffer.

use std::ops::Deref;

use crate::buffer::{PixelBuffer, Surface, SurfaceMut};
use crate::error::BufferError;
use crate::pixel::{ColorPlane, Component, Gray8, Pixel, Rgb8};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RgbImage {
    buffer: PixelBuffer<Rgb8>,
}

impl RgbImage {
    /// Black `width x height` image
    pub fn new(width: u32, height: u32) -> Result<Self, BufferError> {
        Ok(Self {
            buffer: PixelBuffer::new(width, height)?,
        })
    }

    pub fn from_buffer(buffer: PixelBuffer<Rgb8>) -> Self {
        Self { buffer }
    }

    #[inline]
    pub fn buffer(&self) -> &PixelBuffer<Rgb8> {
        &self.buffer
    }

    #[inline]
    pub fn buffer_mut(&mut self) -> &mut PixelBuffer<Rgb8> {
        &mut self.buffer
    }

    pub fn into_buffer(self) -> PixelBuffer<Rgb8> {
        self.buffer
    }

    // Per-pixel channel access (panics outside the image)

    #[inline]
    pub fn red_channel(&self, x: u32, y: u32) -> u8 {
        self.buffer.pixel(x, y).r()
    }

    #[inline]
    pub fn green_channel(&self, x: u32, y: u32) -> u8 {
        self.buffer.pixel(x, y).g()
    }

    #[inline]
    pub fn blue_channel(&self, x: u32, y: u32) -> u8 {
        self.buffer.pixel(x, y).b()
    }

    #[inline]
    pub fn set_red_channel(&mut self, x: u32, y: u32, value: u8) {
        self.buffer.pixel_mut(x, y).set_channel(ColorPlane::Red, value);
    }

    #[inline]
    pub fn set_green_channel(&mut self, x: u32, y: u32, value: u8) {
        self.buffer.pixel_mut(x, y).set_channel(ColorPlane::Green, value);
    }

    #[inline]
    pub fn set_blue_channel(&mut self, x: u32, y: u32, value: u8) {
        self.buffer.pixel_mut(x, y).set_channel(ColorPlane::Blue, value);
    }

    // Whole-image operations

    /// Set one channel of every pixel. Planes an RGB pixel lacks are ignored.
    pub fn set_channel(&mut self, plane: ColorPlane, value: u8) {
        self.buffer.apply(|p| p.set_channel(plane, value));
    }

    /// Gray level `value` everywhere
    pub fn set_all_channels(&mut self, value: u8) {
        self.buffer.clear(Rgb8::new(value, value, value));
    }

    pub fn set_all_channels_rgb(&mut self, r: u8, g: u8, b: u8) {
        self.buffer.clear(Rgb8::new(r, g, b));
    }

    /// Photographic negative
    pub fn invert_color_planes(&mut self) {
        self.buffer.apply(|p| {
            for c in p.channels_mut() {
                *c = Component::invert(*c);
            }
        });
    }

    /// Saturating add of `value` to one channel of every pixel
    pub fn add_to_color_plane(&mut self, plane: ColorPlane, value: u8) {
        self.buffer.apply(|p| {
            if let Some(c) = p.channel(plane) {
                p.set_channel(plane, c.saturating_add(value));
            }
        });
    }

    /// One channel as a grayscale image of the same extent. A plane the
    /// pixel type lacks exports as black.
    pub fn export_color_plane(&self, plane: ColorPlane) -> PixelBuffer<Gray8> {
        self.buffer.map(|p| p.channel(plane).unwrap_or_default())
    }

    /// Set one channel inside a sub-rectangle
    pub fn set_region_plane(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        plane: ColorPlane,
        value: u8,
    ) -> Result<(), BufferError> {
        self.buffer
            .slice_mut(x, y, Some(width), Some(height))?
            .apply(|p| p.set_channel(plane, value));
        Ok(())
    }
}

impl Deref for RgbImage {
    type Target = PixelBuffer<Rgb8>;

    fn deref(&self) -> &Self::Target {
        &self.buffer
    }
}

impl From<PixelBuffer<Rgb8>> for RgbImage {
    fn from(buffer: PixelBuffer<Rgb8>) -> Self {
        Self::from_buffer(buffer)
    }
}
