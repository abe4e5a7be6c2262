use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rasterkit::{ClippedSet, Drawer, PixelBuffer, Rgba8, Scene, SurfaceMut, UncheckedSet};

const W: u32 = 1920;
const H: u32 = 1080;

fn bench_lines(c: &mut Criterion) {
    let mut g = c.benchmark_group("line");
    let colour = Rgba8::opaque(255, 0, 128);

    g.bench_function("clipped_diagonal", |b| {
        let mut canvas = PixelBuffer::<Rgba8>::new(W, H).unwrap();
        b.iter(|| {
            Drawer::new(&mut canvas).line::<ClippedSet>(
                black_box(-200),
                black_box(-100),
                black_box(2100),
                black_box(1200),
                colour,
            );
        });
    });

    g.bench_function("unchecked_diagonal", |b| {
        let mut canvas = PixelBuffer::<Rgba8>::new(W, H).unwrap();
        b.iter(|| {
            Drawer::new(&mut canvas).line::<UncheckedSet>(
                black_box(0),
                black_box(0),
                black_box(1919),
                black_box(1079),
                colour,
            );
        });
    });

    g.bench_function("width_5", |b| {
        let mut canvas = PixelBuffer::<Rgba8>::new(W, H).unwrap();
        b.iter(|| {
            Drawer::new(&mut canvas).line_width::<ClippedSet>(
                black_box(10),
                black_box(20),
                black_box(1900),
                black_box(700),
                black_box(5.0),
                colour,
            );
        });
    });

    g.finish();
}

fn bench_fills(c: &mut Criterion) {
    let mut g = c.benchmark_group("fill");
    let colour = Rgba8::opaque(40, 200, 90);

    g.bench_function("circle_r400", |b| {
        let mut canvas = PixelBuffer::<Rgba8>::new(W, H).unwrap();
        b.iter(|| {
            canvas.clear(Rgba8::BLACK);
            Drawer::new(&mut canvas).fill_circle::<ClippedSet>(
                black_box(960),
                black_box(540),
                400,
                colour,
            );
        });
    });

    g.bench_function("ellipse_direct", |b| {
        let mut canvas = PixelBuffer::<Rgba8>::new(W, H).unwrap();
        b.iter(|| {
            Drawer::new(&mut canvas).fill_ellipse::<ClippedSet>(
                black_box(960),
                black_box(540),
                900,
                500,
                colour,
            );
        });
    });

    g.bench_function("ellipse_optimized", |b| {
        let mut canvas = PixelBuffer::<Rgba8>::new(W, H).unwrap();
        b.iter(|| {
            Drawer::new(&mut canvas).fill_ellipse_optimized::<ClippedSet>(
                black_box(960),
                black_box(540),
                900,
                500,
                colour,
            );
        });
    });

    g.bench_function("demo_scene", |b| {
        let scene = Scene::demo(W, H);
        b.iter(|| black_box(scene.render().unwrap()));
    });

    g.finish();
}

criterion_group!(benches, bench_lines, bench_fills);
criterion_main!(benches);
