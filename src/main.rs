use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use rasterkit::{PixelBuffer, RasterError, Rgba8, Scene, Surface};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_WIDTH: u32 = 320;
const DEFAULT_HEIGHT: u32 = 200;

/// Columns used by the ASCII preview
const ASCII_COLUMNS: u32 = 80;

/// Render a JSON scene with the rasterkit primitives
#[derive(Parser, Debug)]
#[command(name = "rasterkit")]
#[command(about = "Render a JSON scene with the rasterkit primitives")]
#[command(version)]
struct Args {
    /// Scene file to render (JSON)
    scene: Option<PathBuf>,

    /// Render the built-in demo scene (default when no scene is given)
    #[arg(long)]
    demo: bool,

    /// Print an ASCII preview of the result
    #[arg(long)]
    ascii: bool,

    /// Write the scene, after overrides, to this JSON file
    #[arg(long, value_name = "PATH")]
    save_scene: Option<PathBuf>,

    /// Canvas width override
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height override
    #[arg(long)]
    height: Option<u32>,

    /// Open an SDL2 preview window (needs the `viewer` feature)
    #[arg(long)]
    window: bool,

    /// Integer zoom of the preview window
    #[arg(long, default_value = "2")]
    zoom: u32,
}

fn main() -> Result<(), RasterError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut scene = match &args.scene {
        Some(path) if !args.demo => {
            info!("Loading scene: {}", path.display());
            Scene::load(path)?
        },
        _ => Scene::demo(
            args.width.unwrap_or(DEFAULT_WIDTH),
            args.height.unwrap_or(DEFAULT_HEIGHT),
        ),
    };
    if let Some(width) = args.width {
        scene.width = width;
    }
    if let Some(height) = args.height {
        scene.height = height;
    }

    if let Some(path) = &args.save_scene {
        scene.save(path)?;
        info!("Saved scene to {}", path.display());
    }

    let started = Instant::now();
    let canvas = scene.render()?;
    let background = Rgba8(scene.background);
    let painted = canvas.rows().flatten().filter(|p| **p != background).count();
    info!(
        scene = %scene.name,
        width = canvas.width(),
        height = canvas.height(),
        shapes = scene.shapes.len(),
        painted,
        elapsed_us = started.elapsed().as_micros() as u64,
        "Rendered scene"
    );

    if args.ascii {
        print!("{}", ascii_preview(&canvas, ASCII_COLUMNS));
    }

    if args.window {
        open_window(&scene.name, &canvas, args.zoom)?;
    }

    Ok(())
}

/// Downsampled luminance preview, one character per cell. Terminal cells are
/// about twice as tall as wide, so rows are sampled at twice the column step.
fn ascii_preview(canvas: &PixelBuffer<Rgba8>, columns: u32) -> String {
    const RAMP: &[u8] = b" .:-=+*#%@";

    let step = canvas.width().div_ceil(columns.max(1)).max(1);
    let mut out = String::new();
    for y in (0..canvas.height()).step_by(step as usize * 2) {
        for x in (0..canvas.width()).step_by(step as usize) {
            let p = canvas.pixel(x, y);
            let luma =
                (u32::from(p.r()) * 299 + u32::from(p.g()) * 587 + u32::from(p.b()) * 114) / 1000;
            let idx = luma as usize * (RAMP.len() - 1) / 255;
            out.push(RAMP[idx] as char);
        }
        out.push('\n');
    }
    out
}

#[cfg(feature = "viewer")]
fn open_window(title: &str, canvas: &PixelBuffer<Rgba8>, zoom: u32) -> Result<(), RasterError> {
    rasterkit::display::show(title, canvas, zoom)
}

#[cfg(not(feature = "viewer"))]
fn open_window(_title: &str, _canvas: &PixelBuffer<Rgba8>, _zoom: u32) -> Result<(), RasterError> {
    tracing::warn!("Built without the `viewer` feature; ignoring --window");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_preview_shape() {
        let mut canvas = PixelBuffer::filled(8, 8, Rgba8::BLACK).unwrap();
        canvas.as_mut_slice()[0] = Rgba8::WHITE;
        let text = ascii_preview(&canvas, 4);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, vec!["@   ", "    "]);
    }

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from(["rasterkit", "scene.json", "--ascii", "--width", "64"]);
        assert_eq!(args.scene, Some(PathBuf::from("scene.json")));
        assert!(args.ascii);
        assert_eq!(args.width, Some(64));
        assert_eq!(args.zoom, 2);
    }
}
