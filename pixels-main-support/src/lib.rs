#![deny(clippy::all)]
#![forbid(unsafe_code)]

use error_iter::ErrorIter as _;
use log::{error, info};
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};
use world_grid::{GridCell, World};

const BACKGROUND_COLOR: Color = Color::WHITE;
const FALLBACK_DOT_SIZE: f64 = 2.0;

#[derive(Error, Debug)]
pub enum AnimateError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] EventLoopError),

    #[error("window creation failed: {0}")]
    Window(#[from] OsError),

    #[error("pixel buffer failed: {0}")]
    Pixels(#[from] pixels::Error),

    #[error("surface resize failed: {0}")]
    Texture(#[from] pixels::TextureError),
}

#[derive(Clone, Debug)]
pub struct AnimationSettings {
    pub title: String,
    pub time_step: Duration,
    pub dot_size: f64,
}

/// On-screen size of one cell when `total_locations` cells share a canvas of
/// `canvas_extent` with a `margin` on each side. Falls back to 2 when the
/// cells would be smaller than 1.
pub fn dot_size(canvas_extent: f64, margin: f64, total_locations: u32) -> f64 {
    let result = (canvas_extent - 2.0 * margin) / (total_locations as f64).sqrt();
    if result < 1.0 { FALLBACK_DOT_SIZE } else { result }
}

pub fn animate<W>(settings: AnimationSettings, world: W) -> Result<(), AnimateError>
where
    W: World,
{
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut handler = AppEventHandler::new(settings, world);
    event_loop.run_app(&mut handler)?;
    handler.result
}

struct App {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    next_update: Instant,
}

impl App {
    fn new<W: World>(
        event_loop: &ActiveEventLoop,
        settings: &AnimationSettings,
        world: &W,
    ) -> Result<Self, AnimateError> {
        let window = Arc::new(Self::build_window(event_loop, settings, world)?);
        let size = world.size();
        let pixels = Self::build_pixels(&window, size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            next_update: Instant::now() + settings.time_step,
        })
    }

    fn build_window<W: World>(
        event_loop: &ActiveEventLoop,
        settings: &AnimationSettings,
        world: &W,
    ) -> Result<Window, OsError> {
        let size = world.size();
        let inner_size = LogicalSize::new(
            (size.width as f64 * settings.dot_size).ceil(),
            (size.height as f64 * settings.dot_size).ceil(),
        );
        let window_attributes = Window::default_attributes()
            .with_title(settings.title.clone())
            .with_inner_size(inner_size)
            .with_min_inner_size(inner_size)
            .with_visible(false);
        event_loop.create_window(window_attributes)
    }

    fn build_pixels(
        window: &Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        PixelsBuilder::new(width, height, surface_texture)
            .clear_color(BACKGROUND_COLOR)
            .build()
    }

    fn on_create(&mut self) {
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_time_step<W: World>(&mut self, world: &mut W, time_step: Duration) {
        world.update();
        self.window.request_redraw();

        while self.next_update < Instant::now() {
            self.next_update += time_step;
        }
    }

    fn on_redraw<W: World>(&mut self, world: &W) -> Result<(), pixels::Error> {
        let screen = self.pixels.frame_mut();
        debug_assert_eq!(screen.len(), 4 * world.num_cells());

        for (cell, pixel) in world.cells_iter().zip(screen.chunks_exact_mut(4)) {
            pixel.copy_from_slice(&cell.color_rgba());
        }
        self.pixels.render()
    }

    fn on_resize(&mut self, width: u32, height: u32) -> Result<(), pixels::TextureError> {
        self.pixels.resize_surface(width, height)
    }
}

struct AppEventHandler<W: World> {
    settings: AnimationSettings,
    world: W,
    app: Option<App>,
    result: Result<(), AnimateError>,
}

impl<W: World> AppEventHandler<W> {
    fn new(settings: AnimationSettings, world: W) -> Self {
        Self {
            settings,
            world,
            app: None,
            result: Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, method_name: &str, err: AnimateError) {
        log_error(method_name, &err);
        self.result = Err(err);
        event_loop.exit();
    }
}

impl<W: World> ApplicationHandler for AppEventHandler<W> {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause
            && let Some(app) = self.app.as_mut()
        {
            app.on_time_step(&mut self.world, self.settings.time_step);
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        match App::new(event_loop, &self.settings, &self.world) {
            Ok(mut app) => {
                app.on_create();
                let size = self.world.size();
                info!("Animating {}x{} grid", size.width, size.height);
                self.app = Some(app);
            }
            Err(err) => self.fail(event_loop, "App::new", err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Released,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape | KeyCode::KeyQ | KeyCode::KeyX => {
                    event_loop.exit();
                }
                _ => (),
            },
            WindowEvent::Resized(size) => {
                if let Some(app) = self.app.as_mut()
                    && let Err(err) = app.on_resize(size.width, size.height)
                {
                    self.fail(event_loop, "pixels.resize_surface", err.into());
                }
            }
            WindowEvent::RedrawRequested => {
                if let Some(app) = self.app.as_mut()
                    && let Err(err) = app.on_redraw(&self.world)
                {
                    self.fail(event_loop, "pixels.render", err.into());
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(app) = self.app.as_ref() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(app.next_update));
        }
    }
}

fn log_error<E: std::error::Error + 'static>(method_name: &str, err: &E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}
