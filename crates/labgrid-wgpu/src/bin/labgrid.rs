//! 3D clinic × lab area × process grid viewer.
//!
//! Usage: `labgrid [config.json]`
//!
//! Controls:
//! - Click a label: show only that clinic, lab area or process
//! - Double-click anywhere: show everything again
//! - Left-drag: Orbit
//! - Right-drag: Pan
//! - Scroll wheel: Zoom

use labgrid_model::{DoubleClickDetector, FrameInput, GridConfig, GridScene};
use labgrid_wgpu::{Error, Renderer};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

struct App {
    scene: GridScene,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    double_click: DoubleClickDetector,
    /// Presses waiting for the next frame's label layer
    pending: FrameInput,
    cursor: (f64, f64),
    /// First fatal error, reported by `main` after the loop exits
    error: Option<Error>,
}

impl App {
    fn new(scene: GridScene) -> Self {
        Self {
            scene,
            window: None,
            renderer: None,
            double_click: DoubleClickDetector::default(),
            pending: FrameInput::new(),
            cursor: (0.0, 0.0),
            error: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), Error> {
        let window_attrs = Window::default_attributes()
            .with_title(format!(
                "Labgrid - {} cells",
                self.scene.config().dims.cell_count()
            ))
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        self.window = Some(window.clone());

        let mut renderer = pollster::block_on(Renderer::new(window, self.scene.config()))?;
        renderer.generate_mesh(self.scene.controller());

        self.renderer = Some(renderer);
        Ok(())
    }

    /// Apply this frame's label presses, then any double-click, and push the
    /// result to the GPU.
    fn apply_frame(&mut self, pressed: Vec<String>) {
        for target in pressed {
            if let Err(e) = self.pending.label_target(&target) {
                tracing::warn!("Ignoring label press {:?}: {}", target, e);
            }
        }
        if !self.scene.apply_frame(&mut self.pending) {
            return;
        }
        tracing::info!("Selection: {}", self.scene.selection());
        if let Some(renderer) = &mut self.renderer {
            renderer.upload_cells(self.scene.controller());
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.init(event_loop) {
            tracing::error!("Failed to start viewer: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(renderer) = &mut self.renderer else {
            return;
        };

        // Labels get first look so a label press never starts a camera drag
        let consumed = renderer.overlay_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                renderer.resize(size);
            }

            WindowEvent::Focused(false) => {
                self.double_click.clear();
            }

            WindowEvent::MouseInput { button, state, .. } => {
                if button == MouseButton::Left
                    && state == ElementState::Pressed
                    && self.double_click.press(Instant::now(), self.cursor)
                {
                    // Reset lands after this press reaches the labels
                    self.pending.double_click();
                    return;
                }
                if !consumed || state == ElementState::Released {
                    renderer.camera.handle_mouse_button(button, state);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x, position.y);
                renderer.camera.handle_mouse_motion(position.x, position.y);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if consumed {
                    return;
                }
                let scroll = match delta {
                    winit::event::MouseScrollDelta::LineDelta(_, y) => y,
                    winit::event::MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                };
                renderer.camera.handle_scroll(scroll);
            }

            WindowEvent::RedrawRequested => {
                renderer.camera.update();

                let pressed = match renderer.render(self.scene.labels()) {
                    Ok(pressed) => pressed,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        renderer.resize(renderer.size());
                        Vec::new()
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        tracing::error!("Out of GPU memory");
                        event_loop.exit();
                        return;
                    }
                    Err(e) => {
                        tracing::warn!("Render error: {:?}", e);
                        Vec::new()
                    }
                };

                // Applied after the frame is submitted, so the next frame
                // sees the new selection
                self.apply_frame(pressed);

                // Request next frame
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<GridConfig, Error> {
    let Some(path) = path else {
        return Ok(GridConfig::default());
    };
    tracing::info!("Loading config from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config_path = std::env::args().nth(1);
    let config = load_config(config_path.as_deref().map(Path::new))?;
    let scene = GridScene::new(config).map_err(Error::from)?;

    tracing::info!("Labgrid viewer");
    tracing::info!("Grid: {}", scene.config().summary());
    tracing::info!("Controls:");
    tracing::info!("  Click label - Filter by that clinic/lab/process");
    tracing::info!("  Double-click - Reset filter");
    tracing::info!("  Left-drag - Orbit");
    tracing::info!("  Right-drag - Pan");
    tracing::info!("  Scroll wheel - Zoom");

    // Create event loop
    let event_loop = EventLoop::new().map_err(Error::from)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    // Run application
    let mut app = App::new(scene);
    event_loop.run_app(&mut app).map_err(Error::from)?;

    match app.error.take() {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
