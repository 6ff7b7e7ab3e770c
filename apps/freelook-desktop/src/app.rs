use anyhow::{Context, Result};
use egui::Context as EguiContext;
use freelook_camera::{CameraConfig, MovementMode};
use freelook_render_wgpu::{GpuContext, ShaderLibrary, Stage, StageRenderer};
use std::sync::Arc;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::PhysicalKey;
use winit::window::{CursorGrabMode, Window, WindowId};

use crate::state::{AppState, Control};

const WINDOW_WIDTH: u32 = 1040;
const WINDOW_HEIGHT: u32 = 640;

/// Window and GPU resources, created once the event loop is running.
struct Graphics {
    window: Arc<Window>,
    gpu: GpuContext,
    renderer: StageRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

pub struct GpuApp {
    state: AppState,
    shaders: ShaderLibrary,
    graphics: Option<Graphics>,
    egui_ctx: EguiContext,
    last_frame: Instant,
    startup_error: Option<anyhow::Error>,
}

impl GpuApp {
    pub fn new(stage: Stage, config: &CameraConfig, shaders: ShaderLibrary) -> Self {
        Self {
            state: AppState::new(stage, config, WINDOW_WIDTH, WINDOW_HEIGHT),
            shaders,
            graphics: None,
            egui_ctx: EguiContext::default(),
            last_frame: Instant::now(),
            startup_error: None,
        }
    }

    /// The error that stopped startup, if any.
    pub fn take_startup_error(&mut self) -> Option<anyhow::Error> {
        self.startup_error.take()
    }

    fn init_graphics(&self, event_loop: &ActiveEventLoop) -> Result<Graphics> {
        let attrs = Window::default_attributes()
            .with_title(self.state.stage.title())
            .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to open window")?,
        );

        let size = window.inner_size();
        let gpu = GpuContext::new(window.clone(), size.width, size.height)?;
        let renderer = StageRenderer::new(
            &gpu.device,
            gpu.surface_format(),
            gpu.config.width,
            gpu.config.height,
            gpu.sample_count,
            self.state.stage,
            &self.shaders,
        )
        .with_context(|| format!("failed to build the {} stage", self.state.stage))?;

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.surface_format(), None, 1, false);

        Ok(Graphics {
            window,
            gpu,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;
        self.state.update(dt);

        let mvp = self.state.frame_mvp();

        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };

        let output = match graphics.gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                graphics.gpu.reconfigure();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        graphics
            .renderer
            .render(&graphics.gpu.device, &graphics.gpu.queue, &view, mvp);

        if self.state.show_overlay {
            let state = &self.state;
            let raw_input = graphics.egui_winit.take_egui_input(&graphics.window);
            let full_output = self.egui_ctx.run(raw_input, |ctx| draw_overlay(ctx, state));
            graphics
                .egui_winit
                .handle_platform_output(&graphics.window, full_output.platform_output);

            let paint_jobs = self
                .egui_ctx
                .tessellate(full_output.shapes, full_output.pixels_per_point);
            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [graphics.gpu.config.width, graphics.gpu.config.height],
                pixels_per_point: full_output.pixels_per_point,
            };

            let device = &graphics.gpu.device;
            let queue = &graphics.gpu.queue;
            let egui_renderer = &mut graphics.egui_renderer;
            for (id, image_delta) in &full_output.textures_delta.set {
                egui_renderer.update_texture(device, queue, *id, image_delta);
            }
            let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("overlay_encoder"),
            });
            let user_buffers = egui_renderer.update_buffers(
                device,
                queue,
                &mut encoder,
                &paint_jobs,
                &screen_descriptor,
            );
            {
                let mut pass = encoder
                    .begin_render_pass(&wgpu::RenderPassDescriptor {
                        label: Some("overlay_pass"),
                        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Load,
                                store: wgpu::StoreOp::Store,
                            },
                        })],
                        depth_stencil_attachment: None,
                        ..Default::default()
                    })
                    .forget_lifetime();
                egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
            }
            queue.submit(user_buffers.into_iter().chain(std::iter::once(encoder.finish())));
            for id in &full_output.textures_delta.free {
                egui_renderer.free_texture(id);
            }
        }

        output.present();
        graphics.window.request_redraw();
    }
}

/// Hide and lock the cursor while looking so it cannot leave the window.
/// Platforms without locking get a confined cursor instead.
fn set_cursor_captured(window: &Window, captured: bool) {
    let result = if captured {
        window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined))
    } else {
        window.set_cursor_grab(CursorGrabMode::None)
    };
    if let Err(e) = result {
        tracing::warn!("cursor grab unavailable: {e}");
    }
    window.set_cursor_visible(!captured);
}

fn draw_overlay(ctx: &EguiContext, state: &AppState) {
    egui::Window::new("freelook")
        .default_pos([12.0, 12.0])
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(format!("Stage: {}", state.stage.title()));
            if !state.stage.uses_camera() {
                ui.small("Fixed view. Run with --stage camera to fly.");
                ui.small("F1: Toggle overlay | Esc: Quit");
                return;
            }

            let p = state.camera.position();
            ui.label(format!("Position: ({:.2}, {:.2}, {:.2})", p.x, p.y, p.z));
            ui.label(format!(
                "Yaw: {:.1}°  Pitch: {:.1}°",
                state.camera.yaw(),
                state.camera.pitch()
            ));
            let movement = match state.movement() {
                MovementMode::PerEvent => format!("{:.2} per key press", state.camera.step()),
                MovementMode::TimeScaled { speed } => format!("{speed:.2} units/s"),
            };
            ui.label(format!("Movement: {movement}"));
            if state.is_looking() {
                ui.label("Looking");
            }
            ui.separator();
            ui.small("WASD/Arrows: Move | Space/Ctrl: Up/Down | RMB: Look");
            ui.small("F1: Toggle overlay | Esc: Quit");
        });
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        match self.init_graphics(event_loop) {
            Ok(graphics) => {
                let size = graphics.window.inner_size();
                self.state.resize(size.width, size.height);
                self.graphics = Some(graphics);
                self.last_frame = Instant::now();
                tracing::info!(stage = %self.state.stage, "window ready");
            }
            Err(e) => {
                tracing::error!("startup failed: {e:#}");
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(graphics) = self.graphics.as_mut() else {
            return;
        };

        if self.state.show_overlay {
            let response = graphics.egui_winit.on_window_event(&graphics.window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                graphics.gpu.resize(new_size.width, new_size.height);
                let (width, height) = (graphics.gpu.config.width, graphics.gpu.config.height);
                graphics.renderer.resize(&graphics.gpu.device, width, height);
                self.state.resize(width, height);
            }
            WindowEvent::Focused(false) => {
                self.state.release_input();
                if self.state.is_looking() {
                    self.state.set_looking(false);
                    set_cursor_captured(&graphics.window, false);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.state.release_input();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if self.state.handle_key(key, key_state == ElementState::Pressed) == Control::Exit
                {
                    event_loop.exit();
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state: btn_state,
                ..
            } => {
                let looking = btn_state == ElementState::Pressed;
                self.state.set_looking(looking);
                set_cursor_captured(&graphics.window, looking);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state
                    .handle_pointer(position.x as f32, position.y as f32);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state.handle_motion(delta.0 as f32, delta.1 as f32);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(graphics) = &self.graphics {
            graphics.window.request_redraw();
        }
    }
}
