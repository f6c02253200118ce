//! Window and event-loop host.
//!
//! [`run`] opens the window, brings up the GPU, builds the [`Session`] and then
//! drives it from winit events until the window is closed:
//!
//! - resize and scale-factor changes reach the viewport and the drawing buffer
//! - mouse and modifier events become [`PointerEvent`](crate::input::PointerEvent)s
//! - each redraw runs one [`RenderLoop`] tick, which requests the next redraw
//! - a close request cancels the render loop and exits

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::AppConfig;
use crate::error::SphereError;
use crate::input::Input;
use crate::render_loop::{FrameScheduler, RenderLoop};
use crate::renderer::Renderer;
use crate::session::Session;
use crate::viewport::Viewport;

/// Run the app with `config` until its window is closed.
///
/// Returns an error if the window or the rendering context cannot be created.
pub fn run(config: AppConfig) -> Result<(), SphereError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = HueSphereApp::Pending(config);
    event_loop.run_app(&mut app)?;

    match app {
        HueSphereApp::Failed(err) => Err(err),
        _ => Ok(()),
    }
}

/// Schedules the next frame through the window's redraw request.
struct RedrawScheduler<'a>(&'a Window);

impl FrameScheduler for RedrawScheduler<'_> {
    fn schedule_next(&mut self) {
        self.0.request_redraw();
    }
}

struct Running {
    window: Arc<Window>,
    renderer: Renderer,
    session: Session,
    input: Input,
    render_loop: RenderLoop,
    last_frame: Instant,
}

impl Running {
    fn start(event_loop: &ActiveEventLoop, config: &AppConfig) -> Result<Self, SphereError> {
        let window_attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(|e| SphereError::SurfaceUnavailable(e.to_string()))?,
        );

        let scale_factor = window.scale_factor();
        let logical = window.inner_size().to_logical::<u32>(scale_factor);
        let viewport = Viewport::new(logical.width, logical.height)
            .unwrap_or_else(|| Viewport::at_least_one(config.width, config.height));

        let session = Session::new(
            config,
            viewport,
            scale_factor as f32,
            &mut rand::thread_rng(),
        );
        let renderer = Renderer::new(window.clone(), &session, config.background)?;

        tracing::info!(
            "Window {}x{} at scale {:.2}",
            viewport.width(),
            viewport.height(),
            scale_factor
        );

        // First frame renders right away; later frames are scheduled by the loop.
        window.request_redraw();

        Ok(Self {
            window,
            renderer,
            session,
            input: Input::new(),
            render_loop: RenderLoop::new(),
            last_frame: Instant::now(),
        })
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        let mut scheduler = RedrawScheduler(&self.window);
        self.render_loop
            .tick(&mut self.session, dt, &mut self.renderer, &mut scheduler);
    }

    fn resize(&mut self, width: u32, height: u32, scale_factor: f64) {
        if self
            .session
            .on_physical_resize(width, height, scale_factor as f32)
        {
            let viewport = self.session.viewport.current_size();
            tracing::info!(
                "Resized to {}x{} ({}x{} physical)",
                viewport.width(),
                viewport.height(),
                width,
                height
            );
        }
        self.renderer.resize(width, height);
    }
}

enum HueSphereApp {
    Pending(AppConfig),
    Running(Running),
    Failed(SphereError),
}

impl ApplicationHandler for HueSphereApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let HueSphereApp::Pending(config) = self else {
            return;
        };

        *self = match Running::start(event_loop, config) {
            Ok(running) => HueSphereApp::Running(running),
            Err(err) => {
                tracing::error!("Startup failed: {err}");
                event_loop.exit();
                HueSphereApp::Failed(err)
            }
        };
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let HueSphereApp::Running(running) = self else {
            return;
        };

        if let Some(pointer) = running
            .input
            .handle_event(&event, running.window.scale_factor())
        {
            running.session.on_pointer(pointer);
        }

        match event {
            WindowEvent::CloseRequested => {
                running.render_loop.token().cancel();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                let scale_factor = running.window.scale_factor();
                running.resize(size.width, size.height, scale_factor);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                // The physical size may be unchanged, in which case no Resized follows.
                tracing::debug!("Scale factor changed to {scale_factor:.2}");
                let size = running.window.inner_size();
                running.resize(size.width, size.height, scale_factor);
            }
            WindowEvent::RedrawRequested => {
                running.redraw();
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let HueSphereApp::Running(running) = self {
            tracing::info!("Shutting down after {} frames", running.render_loop.frames());
        }
    }
}
