//! Surface, pipelines and per-frame drawing.

use std::sync::Arc;

use glam::Vec3;
use labgrid_model::{AxisLabel, FilterController, GridConfig};
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::camera::OrbitCamera;
use crate::error::{Error, Result};
use crate::mesh_data::MeshData;
use crate::overlay::LabelOverlay;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Uniforms shared by both cube pipelines. Layout must match `Scene` in
/// `cube.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    light_dir: [f32; 4],
    /// ambient, directional, cube size, unused
    params: [f32; 4],
}

/// Lighting taken from the grid config.
#[derive(Debug, Clone, Copy)]
struct Lighting {
    ambient: f32,
    directional: f32,
    toward_light: Vec3,
}

/// Owns the GPU side of the viewer.
pub struct Renderer {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    opaque_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    depth_view: wgpu::TextureView,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    lighting: Lighting,
    cube_size: f32,
    overlay: LabelOverlay,
    /// Orbit camera
    pub camera: OrbitCamera,
    /// Cube buffers, present once [`Renderer::generate_mesh`] has run
    pub mesh_data: Option<MeshData>,
}

impl Renderer {
    /// Create a renderer for `window` using the scene's lighting and camera
    /// settings.
    pub async fn new(window: Arc<Window>, grid: &GridConfig) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(Error::NoAdapter)?;
        tracing::info!("Using adapter: {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("labgrid device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        // egui paints correctly only into a non-sRGB target; palette colors
        // are sRGB values already, so they pass through unchanged.
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .ok_or(Error::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, &config);

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Uniforms"),
            contents: bytemuck::bytes_of(&SceneUniforms {
                view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
                light_dir: [0.0; 4],
                params: [0.0; 4],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Scene Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::include_wgsl!("cube.wgsl"));
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Cube Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let opaque_pipeline = create_cube_pipeline(
            &device,
            &layout,
            &shader,
            format,
            "Opaque Cube Pipeline",
            wgpu::BlendState::REPLACE,
            true,
        );
        // Dimmed cubes blend over everything opaque and must not hide each
        // other, so they test depth but never write it.
        let translucent_pipeline = create_cube_pipeline(
            &device,
            &layout,
            &shader,
            format,
            "Translucent Cube Pipeline",
            wgpu::BlendState::ALPHA_BLENDING,
            false,
        );

        let overlay = LabelOverlay::new(&device, format, &window);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            opaque_pipeline,
            translucent_pipeline,
            depth_view,
            uniform_buffer,
            bind_group,
            lighting: Lighting {
                ambient: grid.ambient_intensity,
                directional: grid.directional_intensity,
                toward_light: Vec3::from(grid.directional_position).normalize_or_zero(),
            },
            cube_size: grid.lattice.cube_size,
            overlay,
            camera: OrbitCamera::new(Vec3::from(grid.camera_position)),
            mesh_data: None,
        })
    }

    /// Allocate cube buffers for the controller's cells.
    pub fn generate_mesh(&mut self, controller: &FilterController) {
        self.mesh_data = Some(MeshData::generate(&self.device, controller));
    }

    /// Push the controller's cell visibility to the GPU if it changed.
    pub fn upload_cells(&mut self, controller: &FilterController) {
        match &mut self.mesh_data {
            Some(mesh) => {
                mesh.sync(&self.queue, controller);
            }
            None => self.generate_mesh(controller),
        }
    }

    /// Current surface size.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Reconfigure the surface and depth buffer for a new window size.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, &self.config);
    }

    /// Let the label overlay see a window event first.
    ///
    /// Returns true if the overlay consumed it and the camera should not.
    pub fn overlay_event(&mut self, event: &winit::event::WindowEvent) -> bool {
        self.overlay.on_window_event(&self.window, event)
    }

    fn write_uniforms(&self) {
        let aspect = self.config.width as f32 / self.config.height as f32;
        let uniforms = SceneUniforms {
            view_proj: self.camera.view_projection_matrix(aspect).to_cols_array_2d(),
            light_dir: self.lighting.toward_light.extend(0.0).to_array(),
            params: [
                self.lighting.ambient,
                self.lighting.directional,
                self.cube_size,
                0.0,
            ],
        };
        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    /// Draw one frame. Returns the targets of labels pressed during it.
    pub fn render(&mut self, labels: &[AxisLabel]) -> std::result::Result<Vec<String>, wgpu::SurfaceError> {
        self.write_uniforms();

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Cube Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(mesh) = &self.mesh_data {
                let vertices = 0..MeshData::vertices_per_instance();
                pass.set_bind_group(0, &self.bind_group, &[]);
                pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                pass.set_vertex_buffer(1, mesh.instance_buffer.slice(..));

                if mesh.opaque_count > 0 {
                    pass.set_pipeline(&self.opaque_pipeline);
                    pass.draw(vertices.clone(), 0..mesh.opaque_count);
                }
                if mesh.dimmed_count() > 0 {
                    pass.set_pipeline(&self.translucent_pipeline);
                    pass.draw(vertices, mesh.opaque_count..mesh.instance_count);
                }
            }
        }

        let overlay = self.overlay.draw(
            &self.device,
            &self.queue,
            &mut encoder,
            &view,
            &self.window,
            &self.camera,
            labels,
        );

        self.queue.submit(
            overlay
                .command_buffers
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );
        frame.present();

        Ok(overlay.pressed)
    }
}

fn create_depth_view(device: &wgpu::Device, config: &wgpu::SurfaceConfiguration) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_cube_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    label: &str,
    blend: wgpu::BlendState,
    depth_write: bool,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[
                MeshData::vertex_buffer_layout(),
                MeshData::instance_buffer_layout(),
            ],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(blend),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
