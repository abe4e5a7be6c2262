//! Scene descriptions
//!
//! A scene is a canvas size, a background colour, a blend mode and an
//! ordered list of shapes, stored as JSON. Scene coordinates are untrusted
//! input, so rendering always goes through a clipped write policy.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::buffer::{PixelBuffer, SurfaceMut};
use crate::draw::Drawer;
use crate::error::{RasterError, Result};
use crate::pattern::checkered_pattern;
use crate::pixel::Rgba8;
use crate::policy::{ClippedAdd, ClippedSet, Pen, WritePolicy};

pub type Color = [u8; 4];

/// Largest magnitude accepted for scene coordinates and radii
pub const MAX_COORDINATE: u32 = 1 << 20;

/// Largest accepted canvas width or height
pub const MAX_CANVAS_SIDE: u32 = 1 << 14;

fn white() -> Color {
    Rgba8::WHITE.0
}

fn thin_pen() -> u32 {
    1
}

fn black() -> Color {
    Rgba8::BLACK.0
}

/// How shape pixels combine with the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    #[default]
    Overwrite,
    Additive,
}

/// Error-term formulation used for centre/radii ellipses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EllipseVariant {
    #[default]
    Direct,
    Optimized,
}

/// One drawing command
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Line {
        from: [i32; 2],
        to: [i32; 2],
        #[serde(default = "white")]
        color: Color,
    },
    WideLine {
        from: [i32; 2],
        to: [i32; 2],
        width: f32,
        #[serde(default = "white")]
        color: Color,
    },
    Circle {
        center: [i32; 2],
        radius: i32,
        #[serde(default)]
        fill: bool,
        #[serde(default = "white")]
        color: Color,
    },
    Ellipse {
        center: [i32; 2],
        radii: [i32; 2],
        #[serde(default)]
        variant: EllipseVariant,
        #[serde(default)]
        fill: bool,
        #[serde(default = "white")]
        color: Color,
    },
    EllipseRect {
        from: [i32; 2],
        to: [i32; 2],
        #[serde(default)]
        fill: bool,
        #[serde(default = "white")]
        color: Color,
    },
    Rect {
        from: [i32; 2],
        to: [i32; 2],
        #[serde(default)]
        fill: bool,
        #[serde(default = "white")]
        color: Color,
    },
    Triangle {
        points: [[i32; 2]; 3],
        #[serde(default = "white")]
        color: Color,
    },
    Quad {
        points: [[i32; 2]; 4],
        #[serde(default = "white")]
        color: Color,
    },
    Point {
        at: [i32; 2],
        #[serde(default = "white")]
        color: Color,
    },
    Cross {
        at: [i32; 2],
        #[serde(default = "white")]
        color: Color,
    },
    Checker {
        cell: [u32; 2],
        #[serde(default = "white")]
        color: Color,
    },
}

impl Shape {
    /// Name used in the JSON `type` tag
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Line { .. } => "line",
            Shape::WideLine { .. } => "wide_line",
            Shape::Circle { .. } => "circle",
            Shape::Ellipse { .. } => "ellipse",
            Shape::EllipseRect { .. } => "ellipse_rect",
            Shape::Rect { .. } => "rect",
            Shape::Triangle { .. } => "triangle",
            Shape::Quad { .. } => "quad",
            Shape::Point { .. } => "point",
            Shape::Cross { .. } => "cross",
            Shape::Checker { .. } => "checker",
        }
    }

    /// Every coordinate and radius the shape carries
    fn extents(&self) -> Vec<i32> {
        match *self {
            Shape::Line { from, to, .. }
            | Shape::WideLine { from, to, .. }
            | Shape::EllipseRect { from, to, .. }
            | Shape::Rect { from, to, .. } => vec![from[0], from[1], to[0], to[1]],
            Shape::Circle {
                center: [x, y],
                radius,
                ..
            } => vec![x, y, radius],
            Shape::Ellipse {
                center: [x, y],
                radii: [rx, ry],
                ..
            } => vec![x, y, rx, ry],
            Shape::Triangle { points, .. } => points.iter().flatten().copied().collect(),
            Shape::Quad { points, .. } => points.iter().flatten().copied().collect(),
            Shape::Point { at, .. } | Shape::Cross { at, .. } => at.to_vec(),
            Shape::Checker { .. } => Vec::new(),
        }
    }

    /// Check the shape against a `width x height` canvas
    fn validate(&self, width: u32, height: u32) -> Result<()> {
        if let Some(v) = self.extents().into_iter().find(|v| v.unsigned_abs() > MAX_COORDINATE) {
            return Err(RasterError::Scene(format!(
                "{} coordinate {v} is outside +/-{MAX_COORDINATE}",
                self.kind()
            )));
        }
        match *self {
            Shape::WideLine { width: wd, .. } => {
                let diagonal = (width as f32).hypot(height as f32);
                if !(wd.is_finite() && (0.0..=diagonal).contains(&wd)) {
                    return Err(RasterError::Scene(format!(
                        "wide_line width must lie in 0..={diagonal} (canvas diagonal), got {wd}"
                    )));
                }
                Ok(())
            },
            Shape::Circle { radius, .. } if radius < 0 => Err(RasterError::Scene(format!(
                "circle radius must be non-negative, got {radius}"
            ))),
            Shape::Ellipse { radii: [rx, ry], .. } if rx < 0 || ry < 0 => Err(RasterError::Scene(
                format!("ellipse radii must be non-negative, got [{rx}, {ry}]"),
            )),
            _ => Ok(()),
        }
    }

    /// Draw onto `surface` with policy `W`
    pub fn draw<W, S>(&self, surface: &mut S)
    where
        W: WritePolicy<Rgba8>,
        S: SurfaceMut<Pixel = Rgba8> + ?Sized,
    {
        match *self {
            Shape::Checker {
                cell: [w, h],
                color,
            } => checkered_pattern(surface, w, h, Rgba8(color)),
            _ => self.draw_primitive::<W>(&mut Drawer::new(surface)),
        }
    }

    fn draw_primitive<W: WritePolicy<Rgba8>>(&self, d: &mut Drawer<'_, Rgba8>) {
        match *self {
            Shape::Line { from, to, color } => {
                d.line::<W>(from[0], from[1], to[0], to[1], Rgba8(color));
            },
            Shape::WideLine {
                from,
                to,
                width,
                color,
            } => {
                d.line_width::<W>(from[0], from[1], to[0], to[1], width, Rgba8(color));
            },
            Shape::Circle {
                center: [x, y],
                radius,
                fill,
                color,
            } => {
                if fill {
                    d.fill_circle::<W>(x, y, radius, Rgba8(color));
                } else {
                    d.circle::<W>(x, y, radius, Rgba8(color));
                }
            },
            Shape::Ellipse {
                center: [x, y],
                radii: [rx, ry],
                variant,
                fill,
                color,
            } => {
                let color = Rgba8(color);
                match (variant, fill) {
                    (EllipseVariant::Direct, false) => d.ellipse::<W>(x, y, rx, ry, color),
                    (EllipseVariant::Direct, true) => d.fill_ellipse::<W>(x, y, rx, ry, color),
                    (EllipseVariant::Optimized, false) => {
                        d.ellipse_optimized::<W>(x, y, rx, ry, color)
                    },
                    (EllipseVariant::Optimized, true) => {
                        d.fill_ellipse_optimized::<W>(x, y, rx, ry, color)
                    },
                }
            },
            Shape::EllipseRect {
                from,
                to,
                fill,
                color,
            } => {
                if fill {
                    d.fill_ellipse_rect::<W>(from[0], from[1], to[0], to[1], Rgba8(color));
                } else {
                    d.ellipse_rect::<W>(from[0], from[1], to[0], to[1], Rgba8(color));
                }
            },
            Shape::Rect {
                from,
                to,
                fill,
                color,
            } => {
                if fill {
                    d.fill_rect::<W>(from[0], from[1], to[0], to[1], Rgba8(color));
                } else {
                    d.rect::<W>(from[0], from[1], to[0], to[1], Rgba8(color));
                }
            },
            Shape::Triangle {
                points: [a, b, c],
                color,
            } => {
                d.triangle::<W>((a[0], a[1]), (b[0], b[1]), (c[0], c[1]), Rgba8(color));
            },
            Shape::Quad {
                points: [a, b, c, e],
                color,
            } => {
                d.quad::<W>(
                    (a[0], a[1]),
                    (b[0], b[1]),
                    (c[0], c[1]),
                    (e[0], e[1]),
                    Rgba8(color),
                );
            },
            Shape::Point { at: [x, y], color } => d.point::<W>(x, y, Rgba8(color)),
            Shape::Cross { at: [x, y], color } => d.cross::<W>(x, y, Rgba8(color)),
            // Needs the surface itself, see `Shape::draw`
            Shape::Checker { .. } => {},
        }
    }
}

/// A complete drawing: canvas plus shapes in paint order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default = "black")]
    pub background: Color,
    #[serde(default)]
    pub mode: BlendMode,
    /// Square pen side, 1 to 3 pixels; checker fills ignore it
    #[serde(default = "thin_pen")]
    pub pen: u32,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            background: black(),
            mode: BlendMode::default(),
            pen: thin_pen(),
            shapes: Vec::new(),
        }
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shapes.push(shape);
        self
    }

    /// Reject canvases too large to allocate and shapes whose parameters
    /// have no drawing meaning or would take unbounded time to rasterize
    pub fn validate(&self) -> Result<()> {
        if self.width > MAX_CANVAS_SIDE || self.height > MAX_CANVAS_SIDE {
            return Err(RasterError::Scene(format!(
                "canvas {}x{} exceeds {MAX_CANVAS_SIDE} pixels per side",
                self.width, self.height
            )));
        }
        if !(1..=3).contains(&self.pen) {
            return Err(RasterError::Scene(format!("pen must be 1 to 3 pixels, got {}", self.pen)));
        }
        self.shapes
            .iter()
            .try_for_each(|shape| shape.validate(self.width, self.height))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let scene: Self = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save scene to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Load scene from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Render onto a fresh canvas filled with the background colour
    pub fn render(&self) -> Result<PixelBuffer<Rgba8>> {
        self.validate()?;
        let mut canvas = PixelBuffer::filled(self.width, self.height, Rgba8(self.background))?;
        self.draw_onto(&mut canvas);
        Ok(canvas)
    }

    /// Paint the shapes onto an existing surface, without clearing it
    pub fn draw_onto<S>(&self, surface: &mut S)
    where
        S: SurfaceMut<Pixel = Rgba8> + ?Sized,
    {
        tracing::debug!(
            scene = %self.name,
            shapes = self.shapes.len(),
            mode = ?self.mode,
            pen = self.pen,
            "drawing scene"
        );
        match (self.mode, self.pen) {
            (BlendMode::Overwrite, 2) => self.draw_shapes::<Pen<2, ClippedSet>, S>(surface),
            (BlendMode::Overwrite, 3) => self.draw_shapes::<Pen<3, ClippedSet>, S>(surface),
            (BlendMode::Overwrite, _) => self.draw_shapes::<ClippedSet, S>(surface),
            (BlendMode::Additive, 2) => self.draw_shapes::<Pen<2, ClippedAdd>, S>(surface),
            (BlendMode::Additive, 3) => self.draw_shapes::<Pen<3, ClippedAdd>, S>(surface),
            (BlendMode::Additive, _) => self.draw_shapes::<ClippedAdd, S>(surface),
        }
    }

    fn draw_shapes<W, S>(&self, surface: &mut S)
    where
        W: WritePolicy<Rgba8>,
        S: SurfaceMut<Pixel = Rgba8> + ?Sized,
    {
        for (index, shape) in self.shapes.iter().enumerate() {
            tracing::trace!(index, kind = shape.kind(), "dispatch shape");
            shape.draw::<W, S>(surface);
        }
    }

    /// Built-in scene exercising every primitive
    pub fn demo(width: u32, height: u32) -> Self {
        let w = width as i32;
        let h = height as i32;
        let (cx, cy) = (w / 2, h / 2);
        let r = w.min(h) / 4;

        Scene::new("demo", width, height)
            .with_shape(Shape::Checker {
                cell: [(width / 16).max(1), (height / 10).max(1)],
                color: [24, 24, 40, 255],
            })
            .with_shape(Shape::Rect {
                from: [2, 2],
                to: [w - 3, h - 3],
                fill: false,
                color: [90, 90, 110, 255],
            })
            .with_shape(Shape::EllipseRect {
                from: [w / 8, h / 8],
                to: [w - w / 8, h - h / 8],
                fill: true,
                color: [20, 60, 120, 255],
            })
            .with_shape(Shape::Ellipse {
                center: [cx, cy],
                radii: [r * 3 / 2, r / 2],
                variant: EllipseVariant::Optimized,
                fill: false,
                color: [255, 200, 0, 255],
            })
            .with_shape(Shape::Circle {
                center: [cx, cy],
                radius: r,
                fill: true,
                color: [200, 40, 60, 255],
            })
            .with_shape(Shape::Circle {
                center: [cx, cy],
                radius: r + 4,
                fill: false,
                color: white(),
            })
            .with_shape(Shape::WideLine {
                from: [w / 10, h - h / 10],
                to: [w - w / 10, h / 10],
                width: 3.0,
                color: [0, 255, 160, 255],
            })
            .with_shape(Shape::Line {
                from: [0, 0],
                to: [w - 1, h - 1],
                color: white(),
            })
            .with_shape(Shape::Triangle {
                points: [[cx, cy - r], [cx - r, cy + r / 2], [cx + r, cy + r / 2]],
                color: [255, 255, 0, 255],
            })
            .with_shape(Shape::Quad {
                points: [[8, cy], [cx / 3, cy - r], [cx / 2, cy], [cx / 3, cy + r]],
                color: [160, 120, 255, 255],
            })
            .with_shape(Shape::Cross {
                at: [cx, cy],
                color: black(),
            })
            .with_shape(Shape::Point {
                at: [w - 6, 6],
                color: white(),
            })
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::demo(320, 200)
    }
}
