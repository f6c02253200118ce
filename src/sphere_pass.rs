//! Lit sphere rendering with depth testing.
//!
//! [`SpherePass`] draws the scene's sphere under its single point light. It uses
//! three bind groups:
//! - **Group 0**: Camera uniforms (view-projection matrix, camera position)
//! - **Group 1**: Model uniforms (model matrix, normal matrix, color, roughness)
//! - **Group 2**: Point light uniforms (position, color, intensity, range, decay)
//!
//! # Depth Buffer
//!
//! The pass owns a `Depth32Float` depth buffer that follows the surface size.
//! Call [`SpherePass::ensure_depth_size`] before rendering if the window may
//! have been resized.

use glam::Mat4;

use crate::camera::Camera;
use crate::gpu::GpuContext;
use crate::mesh::{Mesh, Vertex3d};
use crate::scene::{PointLight, Scene};

/// Camera uniforms for 3D rendering.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniforms {
    /// Combined view-projection matrix for transforming world positions to clip space.
    pub view_proj: [[f32; 4]; 4],
    /// Camera position in world space, used for the specular term.
    pub camera_pos: [f32; 3],
    pub _padding: f32,
}

impl CameraUniforms {
    pub fn new(camera: &Camera) -> Self {
        let view_proj = camera.projection_matrix() * camera.view_matrix();
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: camera.position.to_array(),
            _padding: 0.0,
        }
    }
}

/// Per-object model uniforms.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniforms {
    /// Model matrix (object to world space transformation).
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of the model matrix.
    pub normal_matrix: [[f32; 4]; 4],
    /// Linear RGBA base color.
    pub color: [f32; 4],
    pub roughness: f32,
    pub _padding: [f32; 3],
}

/// Point light uniforms (48 bytes, scalar padding to match the WGSL layout).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniforms {
    pub position: [f32; 3],
    pub intensity: f32,
    /// Linear RGB light color.
    pub color: [f32; 3],
    /// Distance at which the light reaches zero; 0 means no cutoff.
    pub range: f32,
    pub decay: f32,
    pub _padding: [f32; 3],
}

impl From<&PointLight> for LightUniforms {
    fn from(light: &PointLight) -> Self {
        let color = light.color.to_linear();
        Self {
            position: light.position.to_array(),
            intensity: light.intensity,
            color: [color.r, color.g, color.b],
            range: light.range,
            decay: light.decay,
            _padding: [0.0; 3],
        }
    }
}

/// Model uniforms for the sphere as the scene currently shows it.
pub fn model_uniforms(scene: &Scene) -> ModelUniforms {
    let sphere = &scene.sphere;
    let model = sphere.transform().matrix();
    ModelUniforms {
        model: model.to_cols_array_2d(),
        normal_matrix: normal_matrix(model).to_cols_array_2d(),
        color: sphere.color().to_linear().to_array(),
        roughness: sphere.material.roughness,
        _padding: [0.0; 3],
    }
}

/// Inverse transpose of `model`, or identity while the model is collapsed
/// (the sphere starts at scale zero).
pub fn normal_matrix(model: Mat4) -> Mat4 {
    if model.determinant().abs() <= f32::EPSILON {
        Mat4::IDENTITY
    } else {
        model.inverse().transpose()
    }
}

/// Draws the sphere with depth testing and a single point light.
///
/// # Pipeline Configuration
///
/// - Back-face culling enabled (counter-clockwise front faces)
/// - Opaque output
/// - Depth write and Less-than comparison
pub struct SpherePass {
    pipeline: wgpu::RenderPipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    model_buffer: wgpu::Buffer,
    model_bind_group: wgpu::BindGroup,
    light_buffer: wgpu::Buffer,
    light_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    depth_size: (u32, u32),
}

impl SpherePass {
    pub fn new(gpu: &GpuContext) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sphere Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sphere.wgsl").into()),
        });

        let (camera_buffer, camera_layout, camera_bind_group) =
            uniform_binding::<CameraUniforms>(device, "Camera");
        let (model_buffer, model_layout, model_bind_group) =
            uniform_binding::<ModelUniforms>(device, "Model");
        let (light_buffer, light_layout, light_bind_group) =
            uniform_binding::<LightUniforms>(device, "Light");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Sphere Pipeline Layout"),
            bind_group_layouts: &[&camera_layout, &model_layout, &light_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Sphere Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs"),
                buffers: &[Vertex3d::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                front_face: wgpu::FrontFace::Ccw,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            camera_buffer,
            camera_bind_group,
            model_buffer,
            model_bind_group,
            light_buffer,
            light_bind_group,
            depth_view: Self::create_depth_view(gpu),
            depth_size: (gpu.width(), gpu.height()),
        }
    }

    fn create_depth_view(gpu: &GpuContext) -> wgpu::TextureView {
        let texture = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: gpu.width(),
                height: gpu.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Depth32Float,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Recreates the depth buffer if the surface size changed.
    pub fn ensure_depth_size(&mut self, gpu: &GpuContext) {
        if self.depth_size != (gpu.width(), gpu.height()) {
            self.depth_view = Self::create_depth_view(gpu);
            self.depth_size = (gpu.width(), gpu.height());
        }
    }

    /// View to attach as the render pass depth target.
    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    /// Uploads this frame's uniforms and draws the sphere mesh.
    ///
    /// `render_pass` must carry this pass's depth attachment.
    pub fn render(
        &self,
        gpu: &GpuContext,
        render_pass: &mut wgpu::RenderPass,
        camera: &Camera,
        scene: &Scene,
        mesh: &Mesh,
    ) {
        gpu.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[CameraUniforms::new(camera)]),
        );
        gpu.queue.write_buffer(
            &self.model_buffer,
            0,
            bytemuck::cast_slice(&[model_uniforms(scene)]),
        );
        gpu.queue.write_buffer(
            &self.light_buffer,
            0,
            bytemuck::cast_slice(&[LightUniforms::from(&scene.light)]),
        );

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.model_bind_group, &[]);
        render_pass.set_bind_group(2, &self.light_bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..mesh.index_count, 0, 0..1);
    }
}

/// A uniform buffer of `T` with its single-entry layout and bind group.
fn uniform_binding<T>(
    device: &wgpu::Device,
    name: &str,
) -> (wgpu::Buffer, wgpu::BindGroupLayout, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(&format!("{name} Uniforms")),
        size: std::mem::size_of::<T>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(&format!("{name} Bind Group Layout")),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    });

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{name} Bind Group")),
        layout: &layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    });

    (buffer, layout, bind_group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::config::SceneParams;
    use crate::scene::SceneBuilder;
    use glam::Vec3;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn uniform_sizes_match_shader_layout() {
        assert_eq!(std::mem::size_of::<CameraUniforms>(), 80);
        assert_eq!(std::mem::size_of::<ModelUniforms>(), 160);
        assert_eq!(std::mem::size_of::<LightUniforms>(), 48);
        assert_eq!(std::mem::size_of::<ModelUniforms>() % 16, 0);
    }

    #[test]
    fn collapsed_model_uses_identity_normals() {
        let collapsed = Mat4::from_scale(Vec3::ZERO);
        assert_eq!(normal_matrix(collapsed), Mat4::IDENTITY);

        let scaled = Mat4::from_scale(Vec3::splat(2.0));
        let n = normal_matrix(scaled);
        assert!((n.x_axis.x - 0.5).abs() < 1e-6);
        assert!(n.is_finite());
    }

    #[test]
    fn light_color_is_linearized() {
        let light = PointLight {
            position: Vec3::new(20.0, 15.0, 15.0),
            color: Color::rgb(0.5, 0.5, 0.5),
            intensity: 1.5,
            range: 100.0,
            decay: 1.0,
        };
        let uniforms = LightUniforms::from(&light);
        assert!(uniforms.color[0] < 0.5);
        assert_eq!(uniforms.position, [20.0, 15.0, 15.0]);
        assert_eq!(uniforms.range, 100.0);
    }

    #[test]
    fn model_uniforms_follow_sphere_state() {
        let mut rng = StdRng::seed_from_u64(3);
        let (mut scene, camera) = SceneBuilder::new(SceneParams::default()).build(&mut rng, 1.5);
        scene.sphere.scale.set(Vec3::ONE);
        scene.sphere.material.color.set(Color::WHITE);

        let uniforms = model_uniforms(&scene);
        assert_eq!(uniforms.model, Mat4::IDENTITY.to_cols_array_2d());
        for channel in uniforms.color {
            assert!((channel - 1.0).abs() < 1e-5);
        }
        assert_eq!(uniforms.roughness, 0.7);

        let cam = CameraUniforms::new(&camera);
        assert_eq!(cam.camera_pos, camera.position.to_array());
    }
}
