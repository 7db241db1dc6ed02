use crate::mesh::{self, Vertex};
use crate::shaders;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use roomview_common::ObjectId;
use roomview_kernel::PerspectiveCamera;
use roomview_render::Frame;
use roomview_scene::{LightKind, ObjectKind, Scene};
use wgpu::util::DeviceExt;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct Uniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    sun_dir: [f32; 4],
    sun_color: [f32; 4],
    point_pos: [f32; 4],
    point_color: [f32; 4],
}

impl Uniforms {
    /// Ambient lights add up; the first directional and first point light
    /// are used, any others are ignored.
    fn new(scene: &Scene, camera: &PerspectiveCamera) -> Self {
        let mut u = Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            ambient: [0.0; 4],
            sun_dir: [0.0, 1.0, 0.0, 0.0],
            sun_color: [0.0; 4],
            point_pos: [0.0; 4],
            point_color: [0.0; 4],
        };
        let mut have_sun = false;
        let mut have_point = false;
        for light in scene.lights().values() {
            let radiance = light.color.scaled(light.intensity).to_array();
            match light.kind {
                LightKind::Ambient => {
                    for (acc, c) in u.ambient.iter_mut().zip(radiance) {
                        *acc += c;
                    }
                }
                LightKind::Directional { position } if !have_sun => {
                    have_sun = true;
                    let dir = position.try_normalize().unwrap_or(Vec3::Y);
                    u.sun_dir = dir.extend(0.0).to_array();
                    u.sun_color = Vec3::from(radiance).extend(0.0).to_array();
                }
                LightKind::Point { position, range } if !have_point => {
                    have_point = true;
                    u.point_pos = position.extend(range).to_array();
                    u.point_color = Vec3::from(radiance).extend(0.0).to_array();
                }
                _ => {}
            }
        }
        u
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct InstanceData {
    model_0: [f32; 4],
    model_1: [f32; 4],
    model_2: [f32; 4],
    model_3: [f32; 4],
    color: [f32; 4],
    emissive: [f32; 4],
    surface: [f32; 4],
}

impl InstanceData {
    fn new(scene: &Scene, id: ObjectId) -> Option<Self> {
        let obj = scene.object(id)?;
        let material = obj.material()?;
        let cols = scene.world_matrix(id)?.to_cols_array_2d();
        let c = material.color;
        Some(Self {
            model_0: cols[0],
            model_1: cols[1],
            model_2: cols[2],
            model_3: cols[3],
            color: [c.r, c.g, c.b, material.opacity],
            emissive: {
                let e = material.emissive.scaled(material.emissive_intensity);
                [e.r, e.g, e.b, 0.0]
            },
            surface: [material.roughness, material.metalness, 0.0, 0.0],
        })
    }
}

/// One object's slice of the shared vertex and index buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
struct DrawItem {
    object: ObjectId,
    first_index: u32,
    index_count: u32,
    base_vertex: i32,
}

/// CPU-side geometry for the whole scene: every mesh packed into one
/// vertex and one index array. Opaque objects come first, then blended ones.
#[derive(Debug, Default)]
struct SceneGeometry {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    items: Vec<DrawItem>,
    opaque_count: usize,
}

impl SceneGeometry {
    fn pack(scene: &Scene) -> Self {
        let mut opaque = Vec::new();
        let mut blended = Vec::new();
        for (id, obj) in scene.objects() {
            if let ObjectKind::Mesh { material, .. } = &obj.kind {
                if material.is_transparent() {
                    blended.push(*id);
                } else {
                    opaque.push(*id);
                }
            }
        }

        let mut geo = Self {
            opaque_count: opaque.len(),
            ..Self::default()
        };
        for id in opaque.into_iter().chain(blended) {
            let Some(ObjectKind::Mesh { geometry, .. }) = scene.object(id).map(|o| &o.kind) else {
                continue;
            };
            let mesh = mesh::build(geometry);
            geo.items.push(DrawItem {
                object: id,
                first_index: geo.indices.len() as u32,
                index_count: mesh.indices.len() as u32,
                base_vertex: geo.vertices.len() as i32,
            });
            geo.vertices.extend(mesh.vertices);
            geo.indices.extend(mesh.indices);
        }
        geo
    }

    fn instances(&self, scene: &Scene) -> Vec<InstanceData> {
        self.items
            .iter()
            .map(|item| {
                InstanceData::new(scene, item.object).unwrap_or_else(InstanceData::zeroed)
            })
            .collect()
    }
}

/// wgpu renderer for a [`Scene`]. Geometry is uploaded once at creation;
/// transforms, materials and lights are re-read every frame.
pub struct WgpuRenderer {
    opaque_pipeline: wgpu::RenderPipeline,
    blended_pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    geometry: SceneGeometry,
    depth_texture: wgpu::TextureView,
    surface_format: wgpu::TextureFormat,
}

impl WgpuRenderer {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        scene: &Scene,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::new(scene, &PerspectiveCamera::default())),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("uniform_bind_group_layout"),
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

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("uniform_bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::SCENE_SHADER.into()),
        });

        let pipeline = |label: &str, blend: wgpu::BlendState, depth_write: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    compilation_options: Default::default(),
                    buffers: &[
                        wgpu::VertexBufferLayout {
                            array_stride: std::mem::size_of::<Vertex>() as u64,
                            step_mode: wgpu::VertexStepMode::Vertex,
                            attributes: &wgpu::vertex_attr_array![
                                0 => Float32x3,
                                1 => Float32x3,
                            ],
                        },
                        wgpu::VertexBufferLayout {
                            array_stride: std::mem::size_of::<InstanceData>() as u64,
                            step_mode: wgpu::VertexStepMode::Instance,
                            attributes: &wgpu::vertex_attr_array![
                                2 => Float32x4,
                                3 => Float32x4,
                                4 => Float32x4,
                                5 => Float32x4,
                                6 => Float32x4,
                                7 => Float32x4,
                                8 => Float32x4,
                            ],
                        },
                    ],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    compilation_options: Default::default(),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: Some(blend),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                }),
                // planes are single-sided geometry seen from both sides
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: depth_write,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: Default::default(),
                    bias: Default::default(),
                }),
                multisample: Default::default(),
                multiview: None,
                cache: None,
            })
        };
        let opaque_pipeline = pipeline("opaque_pipeline", wgpu::BlendState::REPLACE, true);
        let blended_pipeline =
            pipeline("blended_pipeline", wgpu::BlendState::ALPHA_BLENDING, false);

        let geometry = SceneGeometry::pack(scene);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_vertex_buffer"),
            contents: bytemuck::cast_slice(&geometry.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("scene_index_buffer"),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instance_buffer"),
            size: (geometry.items.len().max(1) * std::mem::size_of::<InstanceData>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        tracing::info!(
            meshes = geometry.items.len(),
            blended = geometry.items.len() - geometry.opaque_count,
            vertices = geometry.vertices.len(),
            triangles = geometry.indices.len() / 3,
            "scene geometry uploaded"
        );

        let depth_texture = Self::create_depth_texture(device, width, height);

        Self {
            opaque_pipeline,
            blended_pipeline,
            uniform_buffer,
            uniform_bind_group,
            vertex_buffer,
            index_buffer,
            instance_buffer,
            geometry,
            depth_texture,
            surface_format,
        }
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth_texture = Self::create_depth_texture(device, width, height);
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_format
    }

    /// Render one frame into `view`: opaque meshes, then blended ones.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        frame: &Frame<'_>,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::new(frame.scene, frame.camera)),
        );
        let instances = self.geometry.instances(frame.scene);
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let bg = frame.scene.background();
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("main_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: bg.r as f64,
                            g: bg.g as f64,
                            b: bg.b as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });

            pass.set_bind_group(0, &self.uniform_bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);

            let split = self.geometry.opaque_count;
            for (range, pipeline) in [
                (0..split, &self.opaque_pipeline),
                (split..self.geometry.items.len(), &self.blended_pipeline),
            ] {
                if range.is_empty() {
                    continue;
                }
                pass.set_pipeline(pipeline);
                for i in range {
                    let item = &self.geometry.items[i];
                    let first = item.first_index;
                    pass.draw_indexed(
                        first..first + item.index_count,
                        item.base_vertex,
                        i as u32..i as u32 + 1,
                    );
                }
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
    }

    fn create_depth_texture(
        device: &wgpu::Device,
        width: u32,
        height: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("depth_texture"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&Default::default())
    }
}
