use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::PhysicalKey,
    window::Window,
};

// Import from the library crate
use marcher::{controller, logging, model, picker, preprocess, view};

use controller::{KeyAction, KeyBindings, ViewerController};
use model::FrameClock;
use view::render::{self, QuadBuffers, SceneResources, SceneUniform, ShaderError};
use view::GpuContext;

const SHADER_DIR: &str = "shaders";

struct App {
    // Core GPU resources
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    window: Arc<Window>,

    // Rendering state
    pipeline: wgpu::RenderPipeline,
    quad: QuadBuffers,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,

    // Loop state
    controller: ViewerController,
    bindings: KeyBindings,
    clock: FrameClock,
}

impl App {
    async fn new(
        window: Arc<Window>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let size = window.inner_size();

        let gpu = GpuContext::new(window.clone(), size.width, size.height).await;
        let device = gpu.device.clone();
        let queue = gpu.queue.clone();
        let config = gpu.config.clone();

        let quad = render::upload_quad(&device);
        let SceneResources {
            uniform_buffer,
            bind_group_layout,
            bind_group,
        } = render::create_scene_resources(&device);

        let pipeline = render::create_quad_pipeline(
            &device,
            config.format,
            &bind_group_layout,
            vertex_source,
            fragment_source,
        )?;

        Ok(Self {
            surface: gpu.surface,
            device,
            queue,
            config,
            size,
            window,
            pipeline,
            quad,
            uniform_buffer,
            bind_group,
            controller: ViewerController::new(),
            bindings: KeyBindings::default(),
            clock: FrameClock::start(),
        })
    }

    fn input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state,
                        physical_key,
                        repeat,
                        ..
                    },
                ..
            } => {
                // OS key repeat would re-fire Press; the state machine only
                // deals in edges.
                if *repeat {
                    return true;
                }
                if let PhysicalKey::Code(code) = physical_key {
                    if let Some(key) = self.bindings.resolve(*code) {
                        let action = match state {
                            ElementState::Pressed => KeyAction::Press,
                            ElementState::Released => KeyAction::Release,
                        };
                        self.controller.on_key(key, action);
                    }
                }
                true
            }
            _ => false,
        }
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// One frame: advance the camera, push the uniforms, draw the quad.
    fn tick(&mut self) -> Result<(), wgpu::SurfaceError> {
        let time_ms = self.clock.elapsed_millis() as f32;
        let position = self.controller.advance_camera();

        let uniform = SceneUniform {
            resolution: [self.config.width as f32, self.config.height as f32],
            time_ms,
            _pad0: 0.0,
            camera_pos: position.to_array(),
            _pad1: 0.0,
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniform));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.quad.vertex_buffer.slice(..));
            render_pass.set_index_buffer(self.quad.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            render_pass.draw_indexed(0..self.quad.index_count, 0, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

fn main() {
    logging::init();

    let (vert_path, frag_path) = match picker::pick_pair(Path::new(SHADER_DIR)) {
        Ok(pair) => pair,
        Err(e) => {
            error!("{e}");
            return;
        }
    };

    let vertex_source = match preprocess::resolve_includes(&vert_path) {
        Ok(src) => src,
        Err(e) => {
            error!("{e}");
            return;
        }
    };
    let fragment_source = match preprocess::resolve_includes(&frag_path) {
        Ok(src) => src,
        Err(e) => {
            error!("{e}");
            return;
        }
    };

    let event_loop = EventLoop::new().unwrap();
    let window_attributes = Window::default_attributes()
        .with_title("Ray Marching")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
    let window = event_loop.create_window(window_attributes).unwrap();
    let window = Arc::new(window);

    let mut app = match pollster::block_on(App::new(window.clone(), &vertex_source, &fragment_source)) {
        Ok(app) => app,
        Err(e) => {
            error!("{e}");
            return;
        }
    };

    info!("entering render loop");

    event_loop
        .run(move |event, elwt| {
            match event {
                Event::WindowEvent {
                    ref event,
                    window_id,
                } if window_id == app.window.id() => {
                    if !app.input(event) {
                        match event {
                            WindowEvent::CloseRequested => elwt.exit(),
                            WindowEvent::Resized(physical_size) => {
                                app.resize(*physical_size);
                            }
                            WindowEvent::RedrawRequested => {
                                // Continuation check happens before the tick,
                                // so a quit press never triggers another frame.
                                if !app.controller.running {
                                    elwt.exit();
                                    return;
                                }

                                match app.tick() {
                                    Ok(_) => {}
                                    Err(wgpu::SurfaceError::Lost) => app.resize(app.size),
                                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                                    Err(e) => warn!("surface error: {e:?}"),
                                }
                            }
                            _ => {}
                        }
                    }
                }
                Event::AboutToWait => {
                    app.window.request_redraw();
                }
                _ => {}
            }
        })
        .unwrap();
}
