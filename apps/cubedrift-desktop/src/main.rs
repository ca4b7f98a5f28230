use anyhow::Result;
use clap::Parser;
use cubedrift_camera::Camera;
use cubedrift_input::InputState;
use cubedrift_render_wgpu::{CubeInstance, CubeRenderer, Texture};
use egui::Context as EguiContext;
use glam::Vec3;
use settings::Settings;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

mod settings;

#[derive(Parser)]
#[command(name = "cubedrift-desktop", about = "Spinning-cube demo with a free-fly camera")]
struct Cli {
    /// Tracing filter, e.g. "debug" or "cubedrift_input=trace"; overrides RUST_LOG
    #[arg(long)]
    log_filter: Option<String>,

    /// Settings file (JSON); defaults apply when omitted
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Override the window width from the settings file
    #[arg(long)]
    width: Option<u32>,

    /// Override the window height from the settings file
    #[arg(long)]
    height: Option<u32>,
}

/// Ten cubes scattered through the scene, each spinning at its own rate.
///
/// Cube `i` spins at `10 * (i + 1)` degrees per second, so no two cubes
/// animate in lockstep.
#[rustfmt::skip]
fn cube_field() -> Vec<CubeInstance> {
    const POSITIONS: [Vec3; 10] = [
        Vec3::new( 0.0,  0.0,   0.0),
        Vec3::new( 2.0,  5.0, -15.0),
        Vec3::new(-1.5, -2.2,  -2.5),
        Vec3::new(-3.8, -2.0, -12.3),
        Vec3::new( 2.4, -0.4,  -3.5),
        Vec3::new(-1.7,  3.0,  -7.5),
        Vec3::new( 1.3, -2.0,  -2.5),
        Vec3::new( 1.5,  2.0,  -2.5),
        Vec3::new( 1.5,  0.2,  -1.5),
        Vec3::new(-1.3,  1.0,  -1.5),
    ];
    POSITIONS
        .iter()
        .enumerate()
        .map(|(i, &position)| CubeInstance::new(position, 10.0 * (i + 1) as f32))
        .collect()
}

/// Everything the demo simulates, independent of any GPU resources.
struct DemoState {
    settings: Settings,
    camera: Camera,
    input: InputState,
    cubes: Vec<CubeInstance>,
    mouse_captured: bool,
    show_overlay: bool,
    start: Instant,
    last_frame: Instant,
    last_dt: f32,
}

impl DemoState {
    fn new(settings: Settings) -> Self {
        let mut camera = Camera::new(settings.start_position, Vec3::Y);
        camera.movement_speed = settings.movement_speed;
        camera.mouse_sensitivity = settings.mouse_sensitivity;
        Self {
            settings,
            camera,
            input: InputState::default(),
            cubes: cube_field(),
            mouse_captured: false,
            show_overlay: true,
            start: Instant::now(),
            last_frame: Instant::now(),
            last_dt: 0.0,
        }
    }

    /// Advance one frame: drain the accumulated input into the camera.
    ///
    /// Look deltas gathered while the mouse is not captured are drained
    /// and dropped, so releasing the capture never leaves a stale turn
    /// queued for the next grab.
    fn update(&mut self, dt: f32) {
        self.last_dt = dt;

        let look = self.input.take_look_delta();
        if self.mouse_captured {
            self.camera.process_mouse_movement(
                look.x,
                look.y,
                self.settings.invert_pitch,
                self.settings.constrain_pitch,
            );
        }

        let scroll = self.input.take_scroll_delta();
        if scroll != 0.0 {
            self.camera
                .process_mouse_scroll(scroll, self.settings.constrain_zoom);
        }

        for direction in self.input.held_directions() {
            self.camera.process_movement(direction, dt);
        }
    }

    fn draw_ui(&self, ctx: &EguiContext) {
        if !self.show_overlay {
            return;
        }
        egui::Window::new("camera")
            .default_width(230.0)
            .show(ctx, |ui| {
                let fps = if self.last_dt > 0.0 { 1.0 / self.last_dt } else { 0.0 };
                ui.label(format!("frame {:.2} ms ({fps:.0} fps)", self.last_dt * 1000.0));
                ui.separator();
                let position = self.camera.position;
                ui.label(format!(
                    "position ({:.2}, {:.2}, {:.2})",
                    position.x, position.y, position.z
                ));
                ui.label(format!(
                    "yaw {:.1}  pitch {:.1}  zoom {:.1}",
                    self.camera.yaw(),
                    self.camera.pitch(),
                    self.camera.zoom()
                ));
                ui.separator();
                ui.small("hold RMB to look, WASD to move, scroll to zoom");
                ui.small("F1 overlay, Esc quit");
            });
    }
}

/// Winit application shell.
///
/// GPU resources do not exist until the event loop delivers `resumed`,
/// hence the `Option` fields.
struct DemoApp {
    state: DemoState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<CubeRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl DemoApp {
    fn new(settings: Settings) -> Self {
        Self {
            state: DemoState::new(settings),
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let settings = self.state.settings.clone();
        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title("cubedrift")
                        .with_inner_size(PhysicalSize::new(settings.width, settings.height)),
                )
                .expect("create window"),
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");
        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("cubedrift-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        ))
        .expect("create device");

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let size = window.inner_size();
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let base = Texture::from_file(&device, &queue, &settings.texture_a, "base_texture")
            .unwrap_or_else(|err| panic!("load texture {}: {err}", settings.texture_a.display()));
        let accent = Texture::from_file(&device, &queue, &settings.texture_b, "accent_texture")
            .unwrap_or_else(|err| panic!("load texture {}: {err}", settings.texture_b.display()));

        let renderer = CubeRenderer::new(
            &device,
            surface_format,
            config.width,
            config.height,
            &base,
            &accent,
            settings.znear,
            settings.zfar,
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer =
            egui_wgpu::Renderer::new(&device, renderer.surface_format(), None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(egui_winit) = self.egui_winit.as_mut() {
            let response = egui_winit.on_window_event(self.window.as_ref().unwrap(), &event);
            if response.consumed {
                return;
            }
        }
        self.state.input.handle_window_event(&event);
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let (Some(surface), Some(device), Some(config)) = (
                    self.surface.as_ref(),
                    self.device.as_ref(),
                    self.config.as_mut(),
                ) {
                    config.width = size.width.max(1);
                    config.height = size.height.max(1);
                    surface.configure(device, config);
                    if let Some(renderer) = self.renderer.as_mut() {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::Focused(false) => self.state.input.clear_held(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::F1 => self.state.show_overlay = !self.state.show_overlay,
                _ => {}
            },
            WindowEvent::MouseInput {
                button: MouseButton::Right,
                state,
                ..
            } => {
                self.state.mouse_captured = state == ElementState::Pressed;
                if let Some(window) = &self.window {
                    window.set_cursor_visible(!self.state.mouse_captured);
                }
            }
            WindowEvent::RedrawRequested => {
                let (Some(window), Some(surface), Some(device), Some(queue), Some(config)) = (
                    self.window.as_ref(),
                    self.surface.as_ref(),
                    self.device.as_ref(),
                    self.queue.as_ref(),
                    self.config.as_ref(),
                ) else {
                    return;
                };

                let now = Instant::now();
                let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
                self.state.last_frame = now;
                self.state.update(dt);

                let frame = match surface.get_current_texture() {
                    Ok(frame) => frame,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        surface.configure(device, config);
                        return;
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        tracing::error!("surface out of memory, exiting");
                        event_loop.exit();
                        return;
                    }
                    Err(err) => {
                        tracing::error!("surface error: {err}");
                        return;
                    }
                };
                let view = frame
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                if let Some(renderer) = self.renderer.as_ref() {
                    renderer.render(
                        device,
                        queue,
                        &view,
                        &self.state.camera,
                        &self.state.cubes,
                        self.state.start.elapsed().as_secs_f32(),
                    );
                }

                if let (Some(egui_winit), Some(egui_renderer)) =
                    (self.egui_winit.as_mut(), self.egui_renderer.as_mut())
                {
                    let raw_input = egui_winit.take_egui_input(window);
                    let egui_ctx = self.egui_ctx.clone();
                    let full_output = egui_ctx.run(raw_input, |ctx| {
                        self.state.draw_ui(ctx);
                    });
                    egui_winit.handle_platform_output(window, full_output.platform_output);
                    let clipped =
                        egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
                    let screen = egui_wgpu::ScreenDescriptor {
                        size_in_pixels: [config.width, config.height],
                        pixels_per_point: full_output.pixels_per_point,
                    };
                    for (id, delta) in &full_output.textures_delta.set {
                        egui_renderer.update_texture(device, queue, *id, delta);
                    }
                    let mut encoder =
                        device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("egui-encoder"),
                        });
                    egui_renderer.update_buffers(device, queue, &mut encoder, &clipped, &screen);
                    {
                        let pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                            label: Some("egui-pass"),
                            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                                view: &view,
                                resolve_target: None,
                                ops: wgpu::Operations {
                                    load: wgpu::LoadOp::Load,
                                    store: wgpu::StoreOp::Store,
                                },
                            })],
                            depth_stencil_attachment: None,
                            timestamp_writes: None,
                            occlusion_query_set: None,
                        });
                        let mut pass = pass.forget_lifetime();
                        egui_renderer.render(&mut pass, &clipped, &screen);
                    }
                    queue.submit(std::iter::once(encoder.finish()));
                    for id in &full_output.textures_delta.free {
                        egui_renderer.free_texture(id);
                    }
                }

                frame.present();
                window.request_redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if self.state.mouse_captured {
            self.state.input.handle_device_event(&event);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = match cli.log_filter.as_deref() {
        Some(spec) => EnvFilter::new(spec),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut settings = Settings::load(cli.settings.as_deref())?;
    if let Some(width) = cli.width {
        settings.width = width;
    }
    if let Some(height) = cli.height {
        settings.height = height;
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = DemoApp::new(settings);
    event_loop.run_app(&mut app)?;
    Ok(())
}
