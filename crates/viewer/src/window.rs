use std::sync::Arc;
use std::time::{Duration, Instant};

use pongviz::{PixelFrame, Presented, Screen, Viewport};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowId};

use crate::config::ViewerConfig;
use crate::error::RenderError;
use crate::render::{Renderer, SceneUniform};

const STARTUP_TIMEOUT: Duration = Duration::from_secs(5);
const STARTUP_POLL: Duration = Duration::from_millis(10);

/// A winit window rendered with wgpu, driven by pumping the event loop
/// instead of handing control to it.
pub struct WindowScreen {
    // Dropped before the window it draws into.
    renderer: Renderer,
    app: WindowApp,
    event_loop: EventLoop<()>,
}

impl WindowScreen {
    /// Opens the window and waits until it can be drawn into.
    pub fn open(config: &ViewerConfig, viewport: Viewport) -> Result<Self, RenderError> {
        let mut event_loop = EventLoop::new()?;
        let mut app = WindowApp::new(config.title.clone(), viewport);

        let deadline = Instant::now() + STARTUP_TIMEOUT;
        let renderer = loop {
            let status = event_loop.pump_app_events(Some(STARTUP_POLL), &mut app);

            if let Some(err) = app.init_error.take() {
                return Err(err);
            }
            if let Some(renderer) = app.renderer.take() {
                break renderer;
            }
            if app.close_requested || matches!(status, PumpStatus::Exit(_)) {
                return Err(RenderError::ClosedDuringStartup);
            }
            if Instant::now() >= deadline {
                return Err(RenderError::WindowTimeout(STARTUP_TIMEOUT));
            }
        };

        log::info!(
            "Opened {}x{} window at up to {} fps",
            viewport.width(),
            viewport.height(),
            viewport.refresh_rate()
        );

        Ok(Self {
            renderer,
            app,
            event_loop,
        })
    }

    fn draw(&mut self, frame: &PixelFrame) -> Result<Presented, RenderError> {
        let renderer = &mut self.renderer;
        let scene = SceneUniform::from_frame(&self.app.viewport, renderer.size, frame);

        present_with_retry(|reconfigure| {
            if reconfigure {
                renderer.reconfigure();
            }
            renderer.render(&scene)
        })
    }
}

/// Presents one frame, reconfiguring and retrying once when the swap chain
/// went stale. `attempt` is told whether to reconfigure before rendering.
fn present_with_retry<F>(mut attempt: F) -> Result<Presented, RenderError>
where
    F: FnMut(bool) -> Result<(), wgpu::SurfaceError>,
{
    let err = match attempt(false) {
        Ok(()) => return Ok(Presented::Shown),
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
            log::warn!("Surface lost, reconfiguring");
            match attempt(true) {
                Ok(()) => return Ok(Presented::Shown),
                Err(e) => e,
            }
        }
        Err(e) => e,
    };

    match err {
        wgpu::SurfaceError::OutOfMemory => Err(RenderError::OutOfMemory),
        e => {
            log::warn!("Dropping frame: {:?}", e);
            Ok(Presented::Dropped)
        }
    }
}

impl Screen for WindowScreen {
    type Error = RenderError;

    fn shutdown_requested(&mut self) -> bool {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.app);
        if let Some(size) = self.app.resized.take() {
            self.renderer.resize(size);
        }
        self.app.close_requested || matches!(status, PumpStatus::Exit(_))
    }

    fn present(&mut self, frame: &PixelFrame) -> Result<Presented, RenderError> {
        self.draw(frame)
    }
}

struct WindowApp {
    title: String,
    viewport: Viewport,
    /// Handed over to `WindowScreen` once startup completes.
    renderer: Option<Renderer>,
    window: Option<Arc<Window>>,
    resized: Option<PhysicalSize<u32>>,
    close_requested: bool,
    init_error: Option<RenderError>,
}

impl WindowApp {
    fn new(title: String, viewport: Viewport) -> Self {
        Self {
            title,
            viewport,
            renderer: None,
            window: None,
            resized: None,
            close_requested: false,
            init_error: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), RenderError> {
        let attrs = Window::default_attributes()
            .with_title(self.title.as_str())
            .with_inner_size(PhysicalSize::new(
                self.viewport.width(),
                self.viewport.height(),
            ))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(attrs)?);

        let rt = tokio::runtime::Builder::new_current_thread().build()?;
        let mut renderer = rt.block_on(Renderer::new(window.clone()))?;

        // Some compositors only map a window once something was presented.
        let blank = SceneUniform::empty(&self.viewport, renderer.size);
        if let Err(e) = renderer.render(&blank) {
            log::warn!("Initial clear failed: {:?}", e);
        }

        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }
}

impl ApplicationHandler for WindowApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.init_error.is_some() {
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            log::error!("Failed to open window: {}", e);
            self.init_error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Window close requested");
                self.close_requested = true;
            }
            WindowEvent::Resized(size) => {
                self.resized = Some(size);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::SurfaceError;

    /// Replays `outcomes` in order and records the reconfigure flag of each
    /// attempt.
    fn replay(
        outcomes: Vec<Result<(), SurfaceError>>,
    ) -> (Result<Presented, RenderError>, Vec<bool>) {
        let mut outcomes = outcomes.into_iter();
        let mut calls = Vec::new();
        let result = present_with_retry(|reconfigure| {
            calls.push(reconfigure);
            outcomes.next().expect("no more scripted outcomes")
        });
        (result, calls)
    }

    #[test]
    fn successful_render_is_shown() {
        let (result, calls) = replay(vec![Ok(())]);
        assert!(matches!(result, Ok(Presented::Shown)));
        assert_eq!(calls, vec![false]);
    }

    #[test]
    fn lost_surface_is_reconfigured_and_retried() {
        for err in [SurfaceError::Lost, SurfaceError::Outdated] {
            let (result, calls) = replay(vec![Err(err), Ok(())]);
            assert!(matches!(result, Ok(Presented::Shown)));
            assert_eq!(calls, vec![false, true]);
        }
    }

    #[test]
    fn failed_retry_drops_the_frame() {
        let (result, calls) = replay(vec![Err(SurfaceError::Lost), Err(SurfaceError::Lost)]);
        assert!(matches!(result, Ok(Presented::Dropped)));
        assert_eq!(calls, vec![false, true]);
    }

    #[test]
    fn timeout_drops_without_retry() {
        let (result, calls) = replay(vec![Err(SurfaceError::Timeout)]);
        assert!(matches!(result, Ok(Presented::Dropped)));
        assert_eq!(calls, vec![false]);
    }

    #[test]
    fn out_of_memory_is_fatal() {
        let (result, _) = replay(vec![Err(SurfaceError::OutOfMemory)]);
        assert!(matches!(result, Err(RenderError::OutOfMemory)));

        let (result, calls) = replay(vec![
            Err(SurfaceError::Outdated),
            Err(SurfaceError::OutOfMemory),
        ]);
        assert!(matches!(result, Err(RenderError::OutOfMemory)));
        assert_eq!(calls, vec![false, true]);
    }
}
