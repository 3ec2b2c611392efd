use std::mem::size_of;

use bytemuck::{bytes_of, cast_slice, Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};
use wgpu::util::DeviceExt;

use crate::{
    camera::OrbitCamera,
    scene::{Scene, Sphere},
};

#[derive(Debug, Copy, Clone, Default, Pod, Zeroable)]
#[repr(C)]
struct Uniforms {
    model: Mat4,
    view: Mat4,
    projection: Mat4,
    color: Vec4,
}

impl Uniforms {
    fn new(camera: &OrbitCamera, sphere: &Sphere) -> Self {
        Self {
            model: sphere.transform,
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            color: sphere.color,
        }
    }
}

struct SphereDraw {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Draws each scene sphere as one flat-colored, alpha-blended triangle strip.
pub struct SphereRenderer {
    render_pipeline: wgpu::RenderPipeline,
    draws: Vec<SphereDraw>,
}

impl SphereRenderer {
    pub fn new(device: &wgpu::Device, color_format: wgpu::TextureFormat, scene: &Scene) -> Self {
        let bind_group_layout = Self::make_bind_group_layout(device);
        let render_pipeline = Self::make_render_pipeline(device, &bind_group_layout, color_format);

        let draws = scene
            .spheres
            .iter()
            .enumerate()
            .map(|(i, sphere)| {
                let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("Sphere {} Vertex Buffer", i)),
                    contents: cast_slice(sphere.mesh.vertices()),
                    usage: wgpu::BufferUsages::VERTEX,
                });
                let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("Sphere {} Uniform Buffer", i)),
                    contents: bytes_of(&Uniforms::new(&scene.camera, sphere)),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: None,
                    layout: &bind_group_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: uniform_buffer.as_entire_binding(),
                    }],
                });
                SphereDraw {
                    vertex_buffer,
                    vertex_count: sphere.mesh.vertex_count(),
                    uniform_buffer,
                    bind_group,
                }
            })
            .collect();

        Self {
            render_pipeline,
            draws,
        }
    }

    fn make_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Sphere Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(size_of::<Uniforms>() as _),
                },
                count: None,
            }],
        })
    }

    fn make_render_pipeline(
        device: &wgpu::Device,
        bind_group_layout: &wgpu::BindGroupLayout,
        color_format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let shader_module = device.create_shader_module(&wgpu::include_wgsl!("sphere.wgsl"));

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: None,
            bind_group_layouts: &[bind_group_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sphere Render Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: size_of::<Vec3>() as _,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[wgpu::VertexAttribute {
                        format: wgpu::VertexFormat::Float32x3,
                        offset: 0,
                        shader_location: 0,
                    }],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fs_main",
                targets: &[wgpu::ColorTargetState {
                    format: color_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                }],
            }),
            // Strip winding flips every triangle, so nothing is culled.
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        })
    }

    pub fn update(&self, queue: &wgpu::Queue, scene: &Scene) {
        for (draw, sphere) in self.draws.iter().zip(&scene.spheres) {
            queue.write_buffer(
                &draw.uniform_buffer,
                0,
                bytes_of(&Uniforms::new(&scene.camera, sphere)),
            );
        }
    }

    pub fn draw<'rpass>(&'rpass self, rpass: &mut wgpu::RenderPass<'rpass>) {
        rpass.set_pipeline(&self.render_pipeline);
        for draw in &self.draws {
            rpass.set_bind_group(0, &draw.bind_group, &[]);
            rpass.set_vertex_buffer(0, draw.vertex_buffer.slice(..));
            rpass.draw(0..draw.vertex_count, 0..1);
        }
    }
}
