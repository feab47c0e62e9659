//! surfplot - animated 3D plots of Z = f(X, Y, a, b, c)
//!
//! The coefficients a, b and c oscillate over time, so the surface breathes
//! while you rotate around it. Press H for the formula guidelines.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{error, info, warn};
use rand::seq::SliceRandom;
use winit::{
    application::ApplicationHandler,
    dpi::{LogicalPosition, LogicalSize, PhysicalPosition},
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, ModifiersState, PhysicalKey},
    window::{Window, WindowId},
};

use surfplot::animation::Coefficient;
use surfplot::camera::CameraSystem;
use surfplot::cli::Args;
use surfplot::colormap::Colormap;
use surfplot::params::{RenderConfig, TurntableCamera, EXAMPLE_FUNCTIONS, INFO_TEXT};
use surfplot::rendering::{RenderSystem, Uniforms};
use surfplot::surface::SurfaceController;
use surfplot::validate::check_formula;

/// Step applied by the limit keys
const LIMIT_STEP: u32 = 1;

/// Step applied by the resolution keys
const RESOLUTION_STEP: usize = 10;

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,

    // Plot state and view
    controller: SurfaceController,
    camera: CameraSystem,

    // Configuration
    render_config: RenderConfig,

    // Input tracking
    modifiers: ModifiersState,
    /// Formula being typed, while in edit mode
    edit_buffer: Option<String>,
    dragging: bool,
    cursor: Option<PhysicalPosition<f64>>,

    // Time tracking
    last_frame: Instant,
    title: String,

    /// Startup failure reported after the loop exits
    fatal: Option<anyhow::Error>,
}

impl App {
    fn new(controller: SurfaceController) -> Self {
        Self {
            window: None,
            render_system: None,
            controller,
            camera: CameraSystem::new(TurntableCamera::default()),
            render_config: RenderConfig::default(),
            modifiers: ModifiersState::empty(),
            edit_buffer: None,
            dragging: false,
            cursor: None,
            last_frame: Instant::now(),
            title: String::new(),
            fatal: None,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let (x, y) = self.render_config.window_pos;
        let window_attributes = Window::default_attributes()
            .with_title(self.render_config.title.as_str())
            .with_inner_size(LogicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ))
            .with_position(LogicalPosition::new(x, y));

        let window = Arc::new(
            event_loop
                .create_window(window_attributes)
                .context("failed to create window")?,
        );

        let render_system = pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            self.controller.mesh(),
            self.render_config.background,
        ))?;

        info!("Function Plotter is running, press H for help and ESC to quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.last_frame = Instant::now();
        Ok(())
    }

    fn handle_key(&mut self, event_loop: &ActiveEventLoop, event: &KeyEvent) {
        if self.edit_buffer.is_some() {
            self.handle_edit_key(event);
            return;
        }

        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let shift = self.modifiers.shift_key();
        let grid = self.controller.grid();

        match code {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::Enter | KeyCode::NumpadEnter => {
                self.edit_buffer = Some(self.controller.formula().source().to_string());
            }
            KeyCode::Space => self.show_example(),
            KeyCode::KeyC => {
                let current = self.controller.colormap();
                let next = if shift { current.prev() } else { current.next() };
                self.controller.select_colormap(next);
            }
            KeyCode::KeyX => {
                let limit = step_u32(grid.x_limit, LIMIT_STEP, shift);
                self.controller.set_x_limit(limit);
            }
            KeyCode::KeyY => {
                let limit = step_u32(grid.y_limit, LIMIT_STEP, shift);
                self.controller.set_y_limit(limit);
            }
            KeyCode::KeyR => {
                let resolution = if shift {
                    grid.resolution.saturating_sub(RESOLUTION_STEP)
                } else {
                    grid.resolution + RESOLUTION_STEP
                };
                self.controller.set_resolution(resolution);
            }
            KeyCode::Digit1 | KeyCode::Digit2 | KeyCode::Digit3 => {
                let coefficient = coefficient_for(code);
                let rule = self.controller.rule(coefficient).next();
                self.controller.set_rule(coefficient, rule);
                info!("{} = {}", coefficient, rule.label());
            }
            KeyCode::Digit4 | KeyCode::Digit5 | KeyCode::Digit6 => {
                let coefficient = coefficient_for(code);
                let speed = self.controller.speed(coefficient).next();
                self.controller.set_speed(coefficient, speed);
                info!("{}: {}", coefficient, speed.label());
            }
            KeyCode::KeyF => {
                let visible = !self.controller.fps().is_visible();
                self.controller.set_fps_overlay_visible(visible);
            }
            KeyCode::KeyH => info!("\n{}", INFO_TEXT),
            KeyCode::ArrowLeft => self.camera.step(-1.0, 0.0),
            KeyCode::ArrowRight => self.camera.step(1.0, 0.0),
            KeyCode::ArrowUp => self.camera.step(0.0, 1.0),
            KeyCode::ArrowDown => self.camera.step(0.0, -1.0),
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, event: &KeyEvent) {
        let Some(buffer) = self.edit_buffer.as_mut() else {
            return;
        };

        match event.physical_key {
            PhysicalKey::Code(KeyCode::Escape) => self.edit_buffer = None,
            PhysicalKey::Code(KeyCode::Enter | KeyCode::NumpadEnter) => {
                let text = buffer.clone();
                // Rejection keeps the buffer so the formula can be fixed
                if self.controller.set_formula(&text).is_ok() {
                    self.edit_buffer = None;
                }
            }
            PhysicalKey::Code(KeyCode::Backspace) => {
                buffer.pop();
            }
            _ => {
                if let Some(text) = &event.text {
                    buffer.extend(text.chars().filter(|ch| !ch.is_control()));
                }
            }
        }
    }

    /// Load a random example different from the current formula
    fn show_example(&mut self) {
        let current = self.controller.formula().source();
        let candidates: Vec<&str> = EXAMPLE_FUNCTIONS
            .iter()
            .copied()
            .filter(|f| *f != current)
            .collect();
        let Some(example) = candidates.choose(&mut rand::thread_rng()).copied() else {
            return;
        };
        if let Err(e) = self.controller.set_formula(example) {
            warn!("Example '{}' rejected: {}", example, e);
        }
    }

    fn handle_cursor(&mut self, position: PhysicalPosition<f64>) {
        if let (true, Some(last)) = (self.dragging, self.cursor) {
            self.camera
                .drag((position.x - last.x) as f32, (position.y - last.y) as f32);
        }
        self.cursor = Some(position);
    }

    /// Advance the plot and render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let delta_s = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;

        self.controller.on_frame_tick(delta_s);
        self.update_title();

        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        render_system.update_mesh(self.controller.mesh());
        let view_proj = self.camera.view_proj(render_system.aspect_ratio());
        render_system.update_uniforms(&Uniforms::new(view_proj));

        match render_system.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                render_system.reconfigure()
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("GPU out of memory, exiting");
                event_loop.exit();
            }
            Err(e) => warn!("Render error: {:?}", e),
        }
    }

    /// Title bar doubles as the overlay
    fn update_title(&mut self) {
        let title = match &self.edit_buffer {
            Some(buffer) => {
                let mut title = format!("{} | Z = {}_", self.render_config.title, buffer);
                if let Some(msg) = self.controller.message() {
                    title.push_str(" | ");
                    title.push_str(msg);
                }
                title
            }
            None => format!(
                "{} | {}",
                self.render_config.title,
                self.controller.status_line()
            ),
        };

        if title != self.title {
            if let Some(window) = &self.window {
                window.set_title(&title);
            }
            self.title = title;
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        if let Err(e) = self.init_graphics(event_loop) {
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::ModifiersChanged(modifiers) => self.modifiers = modifiers.state(),
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                self.handle_key(event_loop, &event);
            }
            WindowEvent::Resized(size) => {
                if let Some(render_system) = &mut self.render_system {
                    render_system.resize(size.width, size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => self.handle_cursor(position),
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.dragging = state == ElementState::Pressed,
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 50.0,
                };
                self.camera.zoom(lines);
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

fn step_u32(value: u32, step: u32, down: bool) -> u32 {
    if down {
        value.saturating_sub(step)
    } else {
        value.saturating_add(step)
    }
}

/// Map a digit key to the coefficient it controls (1/4 a, 2/5 b, 3/6 c)
fn coefficient_for(code: KeyCode) -> Coefficient {
    match code {
        KeyCode::Digit1 | KeyCode::Digit4 => Coefficient::A,
        KeyCode::Digit2 | KeyCode::Digit5 => Coefficient::B,
        _ => Coefficient::C,
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if args.list_colormaps {
        for colormap in Colormap::ALL {
            println!("{}", colormap);
        }
        return Ok(());
    }

    if args.list_examples {
        for example in EXAMPLE_FUNCTIONS {
            println!("{}", example);
        }
        return Ok(());
    }

    if let Some(formula) = &args.check {
        return match check_formula(formula) {
            Ok(_) => {
                println!("ok");
                Ok(())
            }
            Err(e) => Err(anyhow!(e)),
        };
    }

    let controller = SurfaceController::new(args.plot_settings())?;
    let mut app = App::new(controller);

    let event_loop = EventLoop::new()?;
    event_loop.run_app(&mut app)?;

    match app.fatal.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
