//! rasterkit: strided pixel buffers and exact integer rasterization.
//!
//! - [`buffer`]: owned [`PixelBuffer`] and zero-copy [`BufferSlice`] /
//!   [`BufferSliceMut`] views, all sharing [`Surface`] / [`SurfaceMut`]
//! - [`policy`]: the write policies every drawn pixel passes through
//! - [`draw`]: lines, wide lines, circles, three ellipse families and the
//!   thin primitives, driven by [`Drawer`]
//! - [`scene`]: JSON scene descriptions rendered with the above

pub mod buffer;
pub mod draw;
pub mod error;
pub mod pattern;
pub mod pixel;
pub mod policy;
pub mod rgb;
pub mod scene;

#[cfg(feature = "viewer")]
pub mod display;

pub use buffer::{BufferSlice, BufferSliceMut, PixelBuffer, Surface, SurfaceMut};
pub use draw::{Drawer, Point};
pub use error::{BufferError, RasterError, Result};
pub use pattern::{checkered_pattern, checkered_plane};
pub use pixel::{Abgr8, Bgr8, ColorPlane, Component, Gray8, GrayF32, Pixel, Rgb8, Rgba8};
pub use policy::{
    Additive, Blend, Clipped, ClippedAdd, ClippedSet, Overwrite, Pen, UncheckedAdd,
    UncheckedSet, Unclipped, WritePolicy,
};
pub use rgb::RgbImage;
pub use scene::{BlendMode, EllipseVariant, Scene, Shape};
