use anyhow::Result;
use clap::Parser;
use roomview_input::InputEvent;
use roomview_kernel::{InstantSource, TickDriver, TickQueue, TimeSource};
use roomview_render::{Frame, Renderer};
use roomview_render_wgpu::WgpuRenderer;
use roomview_scene::Scene;
use roomview_view::{RoomView, ViewConfig, ViewError, ViewHost};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::Key;
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "roomview-desktop", about = "Animated room in a desktop window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Seed for cube colours and spin speeds
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Initial window width
    #[arg(long, default_value = "1280")]
    width: u32,

    /// Initial window height
    #[arg(long, default_value = "720")]
    height: u32,
}

/// DOM-style key identifier: characters as typed, named keys by name,
/// both lower-cased ("w", "arrowup").
fn key_id(key: &Key) -> Option<String> {
    match key {
        Key::Character(s) => Some(s.to_lowercase()),
        Key::Named(named) => Some(format!("{named:?}").to_lowercase()),
        _ => None,
    }
}

/// The window's wgpu surface plus the scene renderer drawing into it.
struct SurfaceRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
}

impl Renderer for SurfaceRenderer {
    type Output = ();

    fn render(&mut self, frame: &Frame<'_>) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
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
        self.renderer
            .render(&self.device, &self.queue, &view, frame);
        output.present();
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }
}

/// Hosts a view in a winit window. Ticks are delivered on redraw; each tick
/// request asks the window for the next redraw.
struct WindowHost {
    window: Arc<Window>,
    ticks: TickQueue,
}

impl WindowHost {
    fn new(window: Arc<Window>) -> Self {
        let redraw = window.clone();
        Self {
            window,
            ticks: TickQueue::with_wake(move || redraw.request_redraw()),
        }
    }
}

impl ViewHost for WindowHost {
    type Renderer = SurfaceRenderer;

    fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn attach(&mut self, scene: &Scene) -> Result<SurfaceRenderer, ViewError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(self.window.clone())
            .map_err(|e| ViewError::Surface(e.to_string()))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| ViewError::Surface("no compatible GPU adapter".into()))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("roomview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .map_err(|e| ViewError::Surface(e.to_string()))?;

        let (width, height) = self.size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| ViewError::Surface("surface reports no formats".into()))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let (width, height) = (config.width, config.height);
        let renderer = WgpuRenderer::new(&device, surface_format, width, height, scene);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(SurfaceRenderer {
            surface,
            device,
            queue,
            config,
            renderer,
        })
    }

    fn tick_driver(&mut self) -> Box<dyn TickDriver> {
        Box::new(self.ticks.clone())
    }

    fn time_source(&mut self) -> Box<dyn TimeSource> {
        Box::new(InstantSource::default())
    }
}

struct RoomApp {
    initial_size: PhysicalSize<u32>,
    host: Option<WindowHost>,
    view: RoomView<SurfaceRenderer>,
}

impl RoomApp {
    fn new(cli: &Cli) -> Self {
        Self {
            initial_size: PhysicalSize::new(cli.width, cli.height),
            host: None,
            view: RoomView::new(ViewConfig::with_seed(cli.seed)),
        }
    }

    fn input(&mut self, event: InputEvent) {
        self.view.handle_input(&event);
    }
}

impl ApplicationHandler for RoomApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Room View")
            .with_inner_size(self.initial_size);
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("could not create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let mut host = WindowHost::new(window);
        if let Err(e) = self.view.mount(&mut host) {
            tracing::error!("could not mount room view: {e}");
            event_loop.exit();
            return;
        }
        self.host = Some(host);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.view.unmount();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.view.on_resize(size.width, size.height);
            }
            WindowEvent::Focused(false) => self.input(InputEvent::FocusLost),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state,
                        ..
                    },
                ..
            } => {
                if let Some(id) = key_id(&logical_key) {
                    self.input(match state {
                        ElementState::Pressed => InputEvent::KeyDown(id),
                        ElementState::Released => InputEvent::KeyUp(id),
                    });
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let Some(host) = &self.host else {
                    return;
                };
                let (width, height) = host.size();
                self.input(InputEvent::PointerMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                    width: width as f32,
                    height: height as f32,
                });
            }
            WindowEvent::RedrawRequested => {
                let Some(token) = self.host.as_ref().and_then(|h| h.ticks.take_due()) else {
                    return;
                };
                if let Err(e) = self.view.on_tick(token) {
                    tracing::warn!("tick dropped: {e}");
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.view.unmount();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("roomview-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = RoomApp::new(&cli);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::{NamedKey, SmolStr};

    #[test]
    fn keys_map_to_dom_names() {
        let w = Key::Character(SmolStr::new("W"));
        assert_eq!(key_id(&w).as_deref(), Some("w"));
        let up = Key::Named(NamedKey::ArrowUp);
        assert_eq!(key_id(&up).as_deref(), Some("arrowup"));
        assert_eq!(
            key_id(&Key::Named(NamedKey::ArrowRight)).as_deref(),
            Some("arrowright")
        );
    }
}
