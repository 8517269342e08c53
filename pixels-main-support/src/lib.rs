#![deny(clippy::all)]
#![forbid(unsafe_code)]

use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use raster_grid::{GridSize, World};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, KeyEvent, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

const BACKGROUND_COLOR: Color = Color::BLACK;

#[derive(Error, Debug)]
pub enum AnimateError {
    #[error("event loop failed: {0}")]
    EventLoop(#[from] EventLoopError),
    #[error("could not create window: {0}")]
    Window(#[from] OsError),
    #[error("pixel surface failed: {0}")]
    Pixels(#[from] pixels::Error),
}

/// Runs the world at one update per `time_step` in a fixed-size window until the user
/// asks to close it, then drops the window and hands the world back.
pub fn animate<W: World>(title: &str, time_step: Duration, world: W) -> Result<W, AnimateError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    let mut handler = AppEventHandler::new(title, time_step, world);
    event_loop.run_app(&mut handler)?;
    handler.into_world()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunState {
    Running,
    Terminating,
}

struct App<W: World> {
    world: W,
    window: Arc<Window>,
    pixels: Pixels<'static>,
    time_step: Duration,
    next_update: Instant,
}

impl<W: World> App<W> {
    fn new(
        world: W,
        window: Arc<Window>,
        pixels: Pixels<'static>,
        time_step: Duration,
    ) -> Self {
        Self {
            world,
            window,
            pixels,
            time_step,
            next_update: Instant::now(),
        }
    }

    fn build_window(
        event_loop: &ActiveEventLoop,
        title: &str,
        size: GridSize,
    ) -> Result<Arc<Window>, OsError> {
        let window_attributes = Window::default_attributes()
            .with_title(title)
            .with_inner_size(PhysicalSize::new(size.width, size.height))
            .with_resizable(false)
            .with_visible(false);
        event_loop.create_window(window_attributes).map(Arc::new)
    }

    fn build_pixels(
        window: &Arc<Window>,
        size: GridSize,
    ) -> Result<Pixels<'static>, pixels::Error> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        PixelsBuilder::new(size.width, size.height, surface_texture)
            .clear_color(BACKGROUND_COLOR)
            .build()
    }

    fn on_create(&mut self) {
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_time_step(&mut self) {
        self.world.update();
        self.window.request_redraw();

        let now = Instant::now();
        if self.next_update + self.time_step < now {
            log::trace!("Frame overran its time step by {:?}", now - self.next_update);
        }
        while self.next_update < now {
            self.next_update += self.time_step;
        }
    }

    fn on_redraw(&mut self) -> Result<(), pixels::Error> {
        let raster = self.world.raster();
        let screen = self.pixels.frame_mut();
        debug_assert_eq!(screen.len(), 4 * raster.num_cells());

        for (color, pixel) in raster.colors_iter().zip(screen.chunks_exact_mut(4)) {
            pixel.copy_from_slice(&color.to_rgba_bytes());
        }
        self.pixels.render()
    }

    /// Releases the window and drawing surface, keeping only the world.
    fn close(self) -> W {
        let Self {
            world,
            window,
            pixels,
            ..
        } = self;
        drop(pixels);
        drop(window);
        world
    }
}

struct AppEventHandler<W: World> {
    title: String,
    time_step: Duration,
    state: RunState,
    close_requested: bool,
    world: Option<W>,
    app: Option<App<W>>,
    error: Option<AnimateError>,
}

impl<W: World> AppEventHandler<W> {
    fn new(title: &str, time_step: Duration, world: W) -> Self {
        Self {
            title: title.to_string(),
            time_step,
            state: RunState::Running,
            close_requested: false,
            world: Some(world),
            app: None,
            error: None,
        }
    }

    fn into_world(mut self) -> Result<W, AnimateError> {
        if let Some(err) = self.error.take() {
            return Err(err);
        }
        if let Some(app) = self.app.take() {
            self.world = Some(app.close());
        }
        Ok(self
            .world
            .take()
            .expect("world is held either by the handler or by its app"))
    }

    fn terminate(&mut self, event_loop: &ActiveEventLoop) {
        if self.state == RunState::Terminating {
            return;
        }
        log::info!("Close requested, shutting down");
        self.state = RunState::Terminating;
        if let Some(app) = self.app.take() {
            self.world = Some(app.close());
        }
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AnimateError) {
        log::error!("{err}");
        self.error.get_or_insert(err);
        self.terminate(event_loop);
    }
}

impl<W: World> ApplicationHandler for AppEventHandler<W> {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if self.state != RunState::Running || self.close_requested {
            return;
        }
        if let StartCause::ResumeTimeReached { .. } = cause
            && let Some(app) = self.app.as_mut()
        {
            app.on_time_step();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() || self.state != RunState::Running {
            return;
        }
        let Some(size) = self.world.as_ref().map(|world| world.raster().size()) else {
            return;
        };
        let surface = App::<W>::build_window(event_loop, &self.title, size)
            .map_err(AnimateError::from)
            .and_then(|window| {
                let pixels = App::<W>::build_pixels(&window, size)?;
                Ok((window, pixels))
            });
        match surface {
            Ok((window, pixels)) => {
                log::debug!("Created {}x{} window \"{}\"", size.width, size.height, self.title);
                if let Some(world) = self.world.take() {
                    let mut app = App::new(world, window, pixels, self.time_step);
                    app.on_create();
                    self.app = Some(app);
                }
            }
            Err(err) => self.fail(event_loop, err),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.close_requested = true;
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
                    self.close_requested = true;
                }
                _ => (),
            },
            WindowEvent::RedrawRequested => {
                if let Some(Err(err)) = self.app.as_mut().map(|app| app.on_redraw()) {
                    self.fail(event_loop, err.into());
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.close_requested {
            self.terminate(event_loop);
            return;
        }
        if let Some(app) = self.app.as_ref() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(app.next_update));
        }
    }
}
