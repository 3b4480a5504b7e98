//! Flat-color triangle pipeline
//!
//! The arena is a fixed 800x500 rectangle. It is letterboxed into whatever
//! surface it gets, so the viewport always keeps the arena's aspect ratio.

use glam::Vec2;

use super::vertex::Vertex;
use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Vertices reserved up front; a busy boss wave stays well under this
const INITIAL_VERTEX_CAPACITY: usize = 16 * 1024;

/// Map arena coordinates (origin top-left, y down) to normalized device
/// coordinates (origin center, y up)
pub fn arena_to_ndc(x: f32, y: f32) -> (f32, f32) {
    (x / ARENA_WIDTH * 2.0 - 1.0, 1.0 - y / ARENA_HEIGHT * 2.0)
}

/// Pixel rectangle the arena occupies inside a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Largest arena-shaped rectangle centered in `width` x `height`
    pub fn letterbox(width: f32, height: f32) -> Self {
        let aspect = ARENA_WIDTH / ARENA_HEIGHT;
        let (w, h) = if width > height * aspect {
            (height * aspect, height)
        } else {
            (width, width / aspect)
        };
        Self {
            x: (width - w) / 2.0,
            y: (height - h) / 2.0,
            width: w,
            height: h,
        }
    }

    /// Surface pixel to arena coordinates
    pub fn to_arena(&self, px: f32, py: f32) -> Vec2 {
        Vec2::new(
            (px - self.x) * ARENA_WIDTH / self.width.max(1.0),
            (py - self.y) * ARENA_HEIGHT / self.height.max(1.0),
        )
    }
}

/// Buffer size to hold `needed` vertices, doubling from `current`
fn grown_capacity(current: usize, needed: usize) -> usize {
    let mut capacity = current.max(1);
    while capacity < needed {
        capacity *= 2;
    }
    capacity
}

fn vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("arena_vertices"),
        size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

fn flat_pipeline(device: &wgpu::Device, format: wgpu::TextureFormat) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("arena_shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("arena_layout"),
        bind_group_layouts: &[],
        immediate_size: 0,
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("arena_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[Vertex::desc()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        // Shapes are wound either way, so nothing is culled
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// GPU side of the renderer
pub struct RenderState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertices: wgpu::Buffer,
    capacity: usize,
    /// Reused each frame for the NDC copy of the scene
    staging: Vec<Vertex>,
    pub viewport: Viewport,
    /// Surface size in pixels
    pub size: (u32, u32),
}

impl RenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Self {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("madness-arena-device"),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                ..Default::default()
            })
            .await
            .expect("Failed to create device");

        let caps = surface.get_capabilities(adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let pipeline = flat_pipeline(&device, format);
        let vertices = vertex_buffer(&device, INITIAL_VERTEX_CAPACITY);
        log::info!("Renderer ready: {:?} {}x{}", format, width, height);

        Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertices,
            capacity: INITIAL_VERTEX_CAPACITY,
            staging: Vec::with_capacity(INITIAL_VERTEX_CAPACITY),
            viewport: Viewport::letterbox(width as f32, height as f32),
            size: (width, height),
        }
    }

    /// Reconfigure the surface and recompute the letterbox
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.size = (width, height);
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.viewport = Viewport::letterbox(width as f32, height as f32);
    }

    /// Upload the scene (arena coordinates) and draw it
    pub fn render(&mut self, scene: &[Vertex]) -> Result<(), wgpu::SurfaceError> {
        self.staging.clear();
        self.staging.extend(scene.iter().map(|v| {
            let (x, y) = arena_to_ndc(v.position[0], v.position[1]);
            Vertex::new(x, y, v.color)
        }));

        if self.staging.len() > self.capacity {
            self.capacity = grown_capacity(self.capacity, self.staging.len());
            self.vertices = vertex_buffer(&self.device, self.capacity);
            log::debug!("Vertex buffer grown to {} vertices", self.capacity);
        }
        self.queue
            .write_buffer(&self.vertices, 0, bytemuck::cast_slice(&self.staging));

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("arena_encoder"),
            });

        {
            // Bars outside the arena stay black; the scene paints the arena floor
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("arena_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                ..Default::default()
            });

            let vp = self.viewport;
            pass.set_viewport(vp.x, vp.y, vp.width, vp.height, 0.0, 1.0);
            pass.set_pipeline(&self.pipeline);
            pass.set_vertex_buffer(0, self.vertices.slice(..));
            pass.draw(0..self.staging.len() as u32, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}
