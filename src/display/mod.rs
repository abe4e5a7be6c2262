//! SDL2 preview window
//!
//! Shows a rendered `PixelBuffer<Rgba8>` until the window is closed or
//! Escape / Q is pressed.

use std::time::Duration;

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

use crate::buffer::{PixelBuffer, Surface};
use crate::error::{RasterError, Result};
use crate::pixel::{Abgr8, Rgba8};

fn display_err(e: impl ToString) -> RasterError {
    RasterError::Display(e.to_string())
}

pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
}

pub struct RenderTarget<'a> {
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
}

impl Display {
    /// Window of `width x height` scaled by an integer `zoom`
    pub fn with_options(
        title: &str,
        width: u32,
        height: u32,
        zoom: u32,
    ) -> Result<(Self, TextureCreator<WindowContext>)> {
        let sdl_context = sdl2::init().map_err(display_err)?;
        let video_subsystem = sdl_context.video().map_err(display_err)?;

        let zoom = zoom.max(1);
        let window = video_subsystem
            .window(title, width * zoom, height * zoom)
            .position_centered()
            .build()
            .map_err(display_err)?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(display_err)?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump().map_err(display_err)?;

        Ok((Self { canvas, event_pump }, texture_creator))
    }

    /// Upload `buffer` and flip it to the screen
    pub fn present(
        &mut self,
        target: &mut RenderTarget,
        buffer: &PixelBuffer<Rgba8>,
    ) -> Result<()> {
        if (buffer.width(), buffer.height()) != (target.width, target.height) {
            return Err(RasterError::Display(format!(
                "buffer {}x{} does not match texture {}x{}",
                buffer.width(),
                buffer.height(),
                target.width,
                target.height
            )));
        }

        // RGBA8888 texture memory order is A, B, G, R
        let frame = buffer.map(|&p| Abgr8::from(p));
        let pitch = frame.row_stride() as usize * std::mem::size_of::<Abgr8>();
        target
            .texture
            .update(None, frame.as_bytes(), pitch)
            .map_err(display_err)?;

        self.canvas.copy(&target.texture, None, None).map_err(display_err)?;
        self.canvas.present();
        Ok(())
    }

    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();

        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => events.push(InputEvent::Quit),
                Event::KeyDown {
                    keycode: Some(k), ..
                } => events.push(InputEvent::KeyDown(k)),
                _ => {},
            }
        }

        events
    }
}

impl<'a> RenderTarget<'a> {
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA8888, width, height)
            .map_err(display_err)?;
        Ok(Self {
            texture,
            width,
            height,
        })
    }
}

/// Open a window showing `buffer` and block until it is dismissed
pub fn show(title: &str, buffer: &PixelBuffer<Rgba8>, zoom: u32) -> Result<()> {
    let (mut display, texture_creator) =
        Display::with_options(title, buffer.width(), buffer.height(), zoom)?;
    let mut target = RenderTarget::with_size(&texture_creator, buffer.width(), buffer.height())?;
    tracing::info!(width = buffer.width(), height = buffer.height(), zoom, "preview window open");

    'main: loop {
        for event in display.poll_events() {
            match event {
                InputEvent::Quit => break 'main,
                InputEvent::KeyDown(Keycode::Escape | Keycode::Q) => break 'main,
                InputEvent::KeyDown(_) => {},
            }
        }
        display.present(&mut target, buffer)?;
        std::thread::sleep(Duration::from_millis(16));
    }
    Ok(())
}
