//! Pixel types
//!
//! A pixel is a fixed-size aggregate of components. The buffer only needs
//! ordered channel access; the rasterizer additionally needs value scaling
//! (wide-line coverage) and saturating addition (additive writes).

use std::fmt;

use bytemuck::{Pod, Zeroable};

// ============================================================================
// Components
// ============================================================================

/// Named colour channel, resolved per pixel type by [`Pixel::offset`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorPlane {
    Red,
    Green,
    Blue,
    Alpha,
    Gray,
}

/// A single channel value
pub trait Component: Copy + Default + PartialEq + PartialOrd + fmt::Debug {
    /// Full intensity (255 for bytes, 1.0 for floats)
    const MAX: Self;

    /// Multiply by a coverage factor in `[0, 1]`
    fn scale(self, factor: f32) -> Self;

    /// Add, saturating at [`Component::MAX`] where the type has a ceiling
    fn saturating_add(self, other: Self) -> Self;

    /// `MAX - self`
    fn invert(self) -> Self;
}

impl Component for u8 {
    const MAX: Self = u8::MAX;

    #[inline]
    fn scale(self, factor: f32) -> Self {
        (self as f32 * factor).round().clamp(0.0, 255.0) as u8
    }

    #[inline]
    fn saturating_add(self, other: Self) -> Self {
        u8::saturating_add(self, other)
    }

    #[inline]
    fn invert(self) -> Self {
        u8::MAX - self
    }
}

impl Component for f32 {
    const MAX: Self = 1.0;

    #[inline]
    fn scale(self, factor: f32) -> Self {
        self * factor
    }

    /// Float channels accumulate without a ceiling (response-image style)
    #[inline]
    fn saturating_add(self, other: Self) -> Self {
        self + other
    }

    #[inline]
    fn invert(self) -> Self {
        1.0 - self
    }
}

// ============================================================================
// Pixel contract
// ============================================================================

/// Fixed-size aggregate of `CHANNELS` components.
///
/// `Default` must be the zero-equivalent value; buffers are cleared with it.
pub trait Pixel: Copy + Default + PartialEq + fmt::Debug {
    type Component: Component;

    const CHANNELS: usize;

    /// Components in memory order
    fn channels(&self) -> &[Self::Component];

    fn channels_mut(&mut self) -> &mut [Self::Component];

    /// Index of a named channel within [`Pixel::channels`], if the type has it
    fn offset(plane: ColorPlane) -> Option<usize>;

    #[inline]
    fn channel(&self, plane: ColorPlane) -> Option<Self::Component> {
        Self::offset(plane).map(|i| self.channels()[i])
    }

    /// Write a named channel. No-op when the pixel type lacks that channel.
    #[inline]
    fn set_channel(&mut self, plane: ColorPlane, value: Self::Component) {
        if let Some(i) = Self::offset(plane) {
            self.channels_mut()[i] = value;
        }
    }

    /// Channel-wise `self * factor`
    #[inline]
    #[must_use]
    fn scale(self, factor: f32) -> Self {
        let mut out = self;
        for c in out.channels_mut() {
            *c = c.scale(factor);
        }
        out
    }

    /// Channel-wise saturating `self + other`
    #[inline]
    #[must_use]
    fn saturating_add(self, other: Self) -> Self {
        let mut out = self;
        for (c, o) in out.channels_mut().iter_mut().zip(other.channels()) {
            *c = c.saturating_add(*o);
        }
        out
    }
}

/// Single-channel pixels: `u8` and `f32` grayscale buffers
macro_rules! impl_scalar_pixel {
    ($($t:ty),+) => {
        $(
            impl Pixel for $t {
                type Component = $t;
                const CHANNELS: usize = 1;

                #[inline]
                fn channels(&self) -> &[$t] {
                    std::slice::from_ref(self)
                }

                #[inline]
                fn channels_mut(&mut self) -> &mut [$t] {
                    std::slice::from_mut(self)
                }

                #[inline]
                fn offset(plane: ColorPlane) -> Option<usize> {
                    match plane {
                        ColorPlane::Gray => Some(0),
                        _ => None,
                    }
                }
            }
        )+
    };
}

impl_scalar_pixel!(u8, f32);

/// 8-bit grayscale
pub type Gray8 = u8;

/// Floating-point grayscale (response images, accumulators)
pub type GrayF32 = f32;

macro_rules! impl_byte_pixel {
    ($name:ident, $n:literal, { $($plane:ident => $idx:literal),+ $(,)? }) => {
        impl Pixel for $name {
            type Component = u8;
            const CHANNELS: usize = $n;

            #[inline]
            fn channels(&self) -> &[u8] {
                &self.0
            }

            #[inline]
            fn channels_mut(&mut self) -> &mut [u8] {
                &mut self.0
            }

            #[inline]
            fn offset(plane: ColorPlane) -> Option<usize> {
                match plane {
                    $(ColorPlane::$plane => Some($idx),)+
                    _ => None,
                }
            }
        }
    };
}

// ============================================================================
// Byte pixel types
// ============================================================================

/// 24-bit colour, memory order red, green, blue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
#[repr(transparent)]
pub struct Rgb8(pub [u8; 3]);

impl Rgb8 {
    pub const BLACK: Self = Self([0, 0, 0]);
    pub const WHITE: Self = Self([255, 255, 255]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    #[inline]
    pub const fn r(self) -> u8 {
        self.0[0]
    }

    #[inline]
    pub const fn g(self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0[2]
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from(c: [u8; 3]) -> Self {
        Self(c)
    }
}

impl_byte_pixel!(Rgb8, 3, { Red => 0, Green => 1, Blue => 2 });

/// 24-bit colour, memory order blue, green, red (BMP row layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
#[repr(transparent)]
pub struct Bgr8(pub [u8; 3]);

impl Bgr8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([b, g, r])
    }

    #[inline]
    pub const fn r(self) -> u8 {
        self.0[2]
    }

    #[inline]
    pub const fn g(self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0[0]
    }
}

impl_byte_pixel!(Bgr8, 3, { Blue => 0, Green => 1, Red => 2 });

/// 32-bit colour with alpha, memory order red, green, blue, alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
#[repr(transparent)]
pub struct Rgba8(pub [u8; 4]);

impl Rgba8 {
    pub const TRANSPARENT: Self = Self([0, 0, 0, 0]);
    pub const BLACK: Self = Self([0, 0, 0, 255]);
    pub const WHITE: Self = Self([255, 255, 255, 255]);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    /// Opaque colour
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b, 255])
    }

    #[inline]
    pub const fn r(self) -> u8 {
        self.0[0]
    }

    #[inline]
    pub const fn g(self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0[2]
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0[3]
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(c: [u8; 4]) -> Self {
        Self(c)
    }
}

impl From<Rgb8> for Rgba8 {
    fn from(c: Rgb8) -> Self {
        Self::opaque(c.r(), c.g(), c.b())
    }
}

impl_byte_pixel!(Rgba8, 4, { Red => 0, Green => 1, Blue => 2, Alpha => 3 });

/// 32-bit colour, memory order alpha, blue, green, red.
///
/// Matches SDL's `RGBA8888` texture format on little-endian hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
#[repr(transparent)]
pub struct Abgr8(pub [u8; 4]);

impl Abgr8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([a, b, g, r])
    }

    #[inline]
    pub const fn r(self) -> u8 {
        self.0[3]
    }

    #[inline]
    pub const fn g(self) -> u8 {
        self.0[2]
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0[0]
    }
}

impl From<Rgba8> for Abgr8 {
    fn from(c: Rgba8) -> Self {
        Self::new(c.r(), c.g(), c.b(), c.a())
    }
}

impl_byte_pixel!(Abgr8, 4, { Alpha => 0, Blue => 1, Green => 2, Red => 3 });
