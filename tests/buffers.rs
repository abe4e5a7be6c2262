//! Buffer, slice and scene behaviour across module boundaries

use pretty_assertions::assert_eq;
use rasterkit::{
    BlendMode, BufferError, ColorPlane, PixelBuffer, RasterError, Rgb8, RgbImage, Rgba8, Scene,
    Shape, Surface, SurfaceMut,
};

fn gradient(width: u32, height: u32, stride: u32) -> PixelBuffer<u8> {
    let mut b = PixelBuffer::with_stride(width, height, stride).unwrap();
    for y in 0..height {
        for (x, p) in b.row_mut(y).iter_mut().enumerate() {
            *p = (y * width + x as u32) as u8;
        }
    }
    b
}

#[test]
fn test_flips_are_involutions() {
    let original = gradient(7, 5, 9);
    let mut b = original.clone();
    b.horizontal_flip();
    assert_ne!(b, original);
    b.horizontal_flip();
    assert_eq!(b, original);
    b.vertical_flip();
    assert_eq!(b.row(0), original.row(4));
    b.vertical_flip();
    assert_eq!(b, original);
}

#[test]
fn test_flip_inside_slice_keeps_surroundings() {
    let original = gradient(8, 8, 8);
    let mut b = original.clone();
    b.slice_mut(2, 2, Some(4), Some(3)).unwrap().vertical_flip();
    assert_eq!(b.row(0), original.row(0));
    assert_eq!(&b.row(2)[2..6], &original.row(4)[2..6]);
    assert_eq!(&b.row(2)[..2], &original.row(2)[..2]);
    assert_eq!(b.row(7), original.row(7));
}

#[test]
fn test_region_round_trip_through_slices() {
    let src = gradient(10, 10, 12);
    let region = src.region_to(3, 4, 5, 2).unwrap();
    assert_eq!((region.width(), region.height()), (5, 2));

    let mut dst = PixelBuffer::<u8>::new(10, 10).unwrap();
    dst.copy_region(&region, 3, 4).unwrap();
    let view = dst.slice(3, 4, Some(5), Some(2)).unwrap();
    let copied: Vec<Vec<u8>> = view.rows().map(<[u8]>::to_vec).collect();
    let expected: Vec<Vec<u8>> = src
        .slice(3, 4, Some(5), Some(2))
        .unwrap()
        .rows()
        .map(<[u8]>::to_vec)
        .collect();
    assert_eq!(copied, expected);
    assert_eq!(*dst.pixel(2, 4), 0);
}

#[test]
fn test_out_of_bounds_requests_are_errors() {
    let mut b = PixelBuffer::<u8>::new(4, 4).unwrap();
    assert!(matches!(
        b.slice(2, 2, Some(3), None),
        Err(BufferError::SliceOutOfBounds { .. })
    ));
    let big = PixelBuffer::<u8>::new(3, 3).unwrap();
    assert!(matches!(
        b.copy_region(&big, 2, 0),
        Err(BufferError::CopyRegionMismatch { .. })
    ));
    assert!(matches!(
        PixelBuffer::<u8>::with_stride(4, 4, 3),
        Err(BufferError::InvalidDimensions { .. })
    ));
}

#[test]
fn test_rgb_plane_export_matches_channel() {
    let mut img = RgbImage::new(4, 3).unwrap();
    img.set_all_channels_rgb(10, 20, 30);
    img.add_to_color_plane(ColorPlane::Green, 250);
    let green = img.export_color_plane(ColorPlane::Green);
    assert!(green.rows().flatten().all(|&v| v == 255));
    img.invert_color_planes();
    assert_eq!(*img.pixel(1, 1), Rgb8::new(245, 0, 225));
}

#[test]
fn test_scene_json_renders_into_slice() {
    let json = r#"{
        "name": "corner",
        "width": 16,
        "height": 16,
        "shapes": [
            { "type": "rect", "from": [0, 0], "to": [3, 3], "fill": true, "color": [9, 9, 9, 255] }
        ]
    }"#;
    let scene = Scene::from_json(json).unwrap();
    assert_eq!(scene.mode, BlendMode::Overwrite);

    let mut canvas = PixelBuffer::filled(16, 16, Rgba8::BLACK).unwrap();
    scene.draw_onto(&mut canvas.slice_mut(8, 8, None, None).unwrap());
    assert_eq!(*canvas.pixel(8, 8), Rgba8::new(9, 9, 9, 255));
    assert_eq!(*canvas.pixel(11, 11), Rgba8::new(9, 9, 9, 255));
    assert_eq!(*canvas.pixel(7, 8), Rgba8::BLACK);
    assert_eq!(*canvas.pixel(12, 11), Rgba8::BLACK);
}

#[test]
fn test_scene_rejects_negative_radius() {
    let scene = Scene::new("bad", 8, 8).with_shape(Shape::Circle {
        center: [4, 4],
        radius: -1,
        fill: false,
        color: [255; 4],
    });
    assert!(matches!(scene.render(), Err(RasterError::Scene(_))));
}
