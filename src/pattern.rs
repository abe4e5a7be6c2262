//! Checkerboard fills

use crate::buffer::SurfaceMut;
use crate::pixel::{ColorPlane, Pixel};

/// Whether tiles of `x_width x y_width` make a pattern on `surface`
fn tiles_fit<S: SurfaceMut + ?Sized>(surface: &S, x_width: u32, y_width: u32) -> bool {
    x_width > 0 && y_width > 0 && x_width < surface.width() && y_width < surface.height()
}

/// Call `f` on every pixel of the tiles that share the top-left tile's parity
fn for_each_checker<S, F>(surface: &mut S, x_width: u32, y_width: u32, mut f: F)
where
    S: SurfaceMut + ?Sized,
    F: FnMut(&mut S::Pixel),
{
    if !tiles_fit(surface, x_width, y_width) {
        return;
    }
    for y in 0..surface.height() {
        let row_parity = (y / y_width) & 1;
        for (x, p) in (0u32..).zip(surface.row_mut(y).iter_mut()) {
            if (x / x_width) & 1 == row_parity {
                f(p);
            }
        }
    }
}

/// Paint alternating `x_width x y_width` tiles with `color`, starting with
/// the top-left tile. No-op when a tile size is zero or not smaller than the
/// surface.
pub fn checkered_pattern<S>(surface: &mut S, x_width: u32, y_width: u32, color: S::Pixel)
where
    S: SurfaceMut + ?Sized,
{
    for_each_checker(surface, x_width, y_width, |p| *p = color);
}

/// Like [`checkered_pattern`] but writes only one channel
pub fn checkered_plane<S>(
    surface: &mut S,
    x_width: u32,
    y_width: u32,
    plane: ColorPlane,
    value: <S::Pixel as Pixel>::Component,
) where
    S: SurfaceMut + ?Sized,
{
    for_each_checker(surface, x_width, y_width, |p| p.set_channel(plane, value));
}
