//! Alpha-blended 2D quads drawn over the sphere: the navigation bar and the
//! heading plate.
//!
//! Quads are laid out in logical pixels with the origin at the top-left corner;
//! the vertex shader maps them to clip space using the viewport resolution.

use crate::color::Color;
use crate::gpu::GpuContext;
use crate::interaction::Overlay;
use crate::viewport::Viewport;

/// Navigation bar height in logical pixels.
pub const NAV_HEIGHT: f32 = 64.0;
/// Heading plate size in logical pixels, centered horizontally.
pub const HEADING_SIZE: (f32, f32) = (420.0, 56.0);
/// Heading plate top edge as a fraction of the viewport height.
pub const HEADING_TOP: f32 = 0.72;

const NAV_COLOR: Color = Color::rgba(1.0, 1.0, 1.0, 0.12);
const HEADING_COLOR: Color = Color::rgba(1.0, 1.0, 1.0, 0.85);

// Two quads, six vertices each.
const MAX_VERTICES: usize = 12;

/// Vertex for colored 2D quads.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex2d {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex2d {
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex2d>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x2,
            },
            // color
            wgpu::VertexAttribute {
                offset: 8,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x4,
            },
        ],
    };
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct OverlayUniforms {
    resolution: [f32; 2],
    _padding: [f32; 2],
}

/// Append a `w × h` rectangle at `(x, y)` as two triangles.
fn push_rect(vertices: &mut Vec<Vertex2d>, x: f32, y: f32, w: f32, h: f32, color: Color) {
    let color = color.to_linear().to_array();
    let corners = [
        [x, y],
        [x + w, y],
        [x, y + h],
        [x + w, y],
        [x + w, y + h],
        [x, y + h],
    ];
    vertices.extend(corners.map(|position| Vertex2d { position, color }));
}

/// Quads for the overlay's current offset and opacity.
///
/// Fully transparent or fully off-screen elements are skipped.
pub fn overlay_vertices(overlay: &Overlay, viewport: Viewport) -> Vec<Vertex2d> {
    let width = viewport.width() as f32;
    let height = viewport.height() as f32;
    let mut vertices = Vec::with_capacity(MAX_VERTICES);

    let nav_y = overlay.nav_offset.value() * NAV_HEIGHT;
    if nav_y > -NAV_HEIGHT {
        push_rect(&mut vertices, 0.0, nav_y, width, NAV_HEIGHT, NAV_COLOR);
    }

    let opacity = overlay.heading_opacity.value().clamp(0.0, 1.0);
    if opacity > 0.0 {
        let (w, h) = HEADING_SIZE;
        let w = w.min(width);
        let color = HEADING_COLOR.with_alpha(HEADING_COLOR.a * opacity);
        push_rect(
            &mut vertices,
            (width - w) * 0.5,
            height * HEADING_TOP,
            w,
            h,
            color,
        );
    }

    vertices
}

/// Renders the overlay quads with alpha blending, no depth.
pub struct OverlayPass {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
}

impl OverlayPass {
    pub fn new(gpu: &GpuContext) -> Self {
        let device = &gpu.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Overlay Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/overlay.wgsl").into()),
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Overlay Uniforms"),
            size: std::mem::size_of::<OverlayUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Overlay Uniform Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Overlay Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Overlay Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout],
            push_constant_ranges: &[],
        });

        let blend_state = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Overlay Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs"),
                buffers: &[Vertex2d::LAYOUT],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.config.format,
                    blend: Some(blend_state),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            // Shares the sphere's render pass, so it must declare the same depth format.
            depth_stencil: Some(wgpu::DepthStencilState {
                format: wgpu::TextureFormat::Depth32Float,
                depth_write_enabled: false,
                depth_compare: wgpu::CompareFunction::Always,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Overlay Vertex Buffer"),
            size: (MAX_VERTICES * std::mem::size_of::<Vertex2d>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            pipeline,
            vertex_buffer,
            uniform_buffer,
            uniform_bind_group,
        }
    }

    /// Draws the overlay for `viewport` (logical pixels) into `render_pass`.
    pub fn render(
        &self,
        gpu: &GpuContext,
        render_pass: &mut wgpu::RenderPass,
        overlay: &Overlay,
        viewport: Viewport,
    ) {
        let vertices = overlay_vertices(overlay, viewport);
        if vertices.is_empty() {
            return;
        }

        let uniforms = OverlayUniforms {
            resolution: [viewport.width() as f32, viewport.height() as f32],
            _padding: [0.0; 2],
        };
        gpu.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));
        gpu.queue
            .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&vertices));

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..vertices.len() as u32, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(800, 600).unwrap()
    }

    #[test]
    fn settled_overlay_draws_both_quads() {
        let vertices = overlay_vertices(&Overlay::default(), viewport());
        assert_eq!(vertices.len(), 12);
        // Nav bar spans the full width from the top edge
        assert_eq!(vertices[0].position, [0.0, 0.0]);
        assert_eq!(vertices[4].position, [800.0, NAV_HEIGHT]);
        // Heading plate is centered
        assert_eq!(vertices[6].position, [190.0, 600.0 * HEADING_TOP]);
    }

    #[test]
    fn hidden_elements_are_skipped() {
        let mut overlay = Overlay::default();
        overlay.nav_offset.set(-1.0);
        overlay.heading_opacity.set(0.0);
        assert!(overlay_vertices(&overlay, viewport()).is_empty());
    }

    #[test]
    fn nav_slides_with_offset() {
        let mut overlay = Overlay::default();
        overlay.nav_offset.set(-0.5);
        overlay.heading_opacity.set(0.0);
        let vertices = overlay_vertices(&overlay, viewport());
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[0].position[1], -0.5 * NAV_HEIGHT);
    }

    #[test]
    fn heading_alpha_follows_opacity() {
        let mut overlay = Overlay::default();
        overlay.heading_opacity.set(0.5);
        let vertices = overlay_vertices(&overlay, viewport());
        let alpha = vertices[6].color[3];
        assert!((alpha - HEADING_COLOR.a * 0.5).abs() < 1e-6);
    }

    #[test]
    fn heading_never_wider_than_viewport() {
        let narrow = Viewport::new(200, 400).unwrap();
        let vertices = overlay_vertices(&Overlay::default(), narrow);
        assert_eq!(vertices[6].position[0], 0.0);
        assert_eq!(vertices[7].position[0], 200.0);
    }
}
