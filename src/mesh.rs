//! Sphere geometry, its GPU upload, and the transform that places it.
//!
//! - [`Vertex3d`]: position and normal, laid out for the sphere pipeline
//! - [`SphereGeometry`]: CPU-side latitude/longitude sphere
//! - [`Mesh`]: vertex and index buffers on the GPU
//! - [`Transform`]: position, rotation and scale
//!
//! # Vertex Layout
//!
//! | Attribute | Format    | Offset | Shader Location |
//! |-----------|-----------|--------|-----------------|
//! | position  | Float32x3 | 0      | 0               |
//! | normal    | Float32x3 | 12     | 1               |

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Quat, Vec3};

use crate::gpu::GpuContext;

/// A vertex with position and normal (24 bytes).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3d {
    pub position: [f32; 3],
    /// Unit surface normal.
    pub normal: [f32; 3],
}

impl Vertex3d {
    /// Buffer layout for pipelines reading [`Vertex3d`].
    pub const LAYOUT: wgpu::VertexBufferLayout<'static> = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<Vertex3d>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &[
            // position
            wgpu::VertexAttribute {
                offset: 0,
                shader_location: 0,
                format: wgpu::VertexFormat::Float32x3,
            },
            // normal
            wgpu::VertexAttribute {
                offset: 12,
                shader_location: 1,
                format: wgpu::VertexFormat::Float32x3,
            },
        ],
    };

    pub fn new(position: [f32; 3], normal: [f32; 3]) -> Self {
        Self { position, normal }
    }
}

/// A latitude/longitude sphere centered at the origin, generated on the CPU.
///
/// Vertices form a `(width_segments + 1) × (height_segments + 1)` grid whose
/// last column repeats the first along the seam. Pole rows produce one triangle per
/// segment instead of two, so no degenerate triangles are emitted. Front faces
/// wind counter-clockwise seen from outside.
#[derive(Clone, Debug)]
pub struct SphereGeometry {
    pub radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub vertices: Vec<Vertex3d>,
    pub indices: Vec<u32>,
}

impl SphereGeometry {
    /// Build a sphere. Segment counts are raised to the minimum of 3 around
    /// and 2 from pole to pole.
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.max(3);
        let height_segments = height_segments.max(2);

        let mut vertices =
            Vec::with_capacity(((width_segments + 1) * (height_segments + 1)) as usize);
        let mut indices = Vec::new();

        for iy in 0..=height_segments {
            let phi = iy as f32 / height_segments as f32 * PI;

            for ix in 0..=width_segments {
                let theta = ix as f32 / width_segments as f32 * TAU;

                let normal = Vec3::new(
                    -theta.cos() * phi.sin(),
                    phi.cos(),
                    theta.sin() * phi.sin(),
                );
                let position = normal * radius;

                vertices.push(Vertex3d::new(position.to_array(), normal.to_array()));
            }
        }

        let row = width_segments + 1;
        for iy in 0..height_segments {
            for ix in 0..width_segments {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;

                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self {
            radius,
            width_segments,
            height_segments,
            vertices,
            indices,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// GPU-resident geometry with vertex and index buffers.
///
/// Immutable after creation.
#[derive(Debug)]
pub struct Mesh {
    pub(crate) vertex_buffer: wgpu::Buffer,
    pub(crate) index_buffer: wgpu::Buffer,
    pub(crate) index_count: u32,
}

impl Mesh {
    /// Upload raw vertex and index data. Indices are u32, three per triangle.
    pub fn new(gpu: &GpuContext, vertices: &[Vertex3d], indices: &[u32]) -> Self {
        use wgpu::util::DeviceExt;

        let vertex_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sphere Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Sphere Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }

    pub fn from_geometry(gpu: &GpuContext, geometry: &SphereGeometry) -> Self {
        Self::new(gpu, &geometry.vertices, &geometry.indices)
    }
}

/// Position, rotation, and scale of an object.
///
/// Combined in Scale → Rotate → Translate order by [`Transform::matrix`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_vertex_and_triangle_counts() {
        let sphere = SphereGeometry::new(3.0, 64, 64);
        assert_eq!(sphere.vertices.len(), 65 * 65);
        // Two triangles per quad, minus one per segment at each pole
        assert_eq!(sphere.triangle_count(), 64 * 64 * 2 - 2 * 64);
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let sphere = SphereGeometry::new(3.0, 16, 12);
        for vertex in &sphere.vertices {
            let p = Vec3::from_array(vertex.position);
            let n = Vec3::from_array(vertex.normal);
            assert!((p.length() - 3.0).abs() < 1e-4);
            assert!((n.length() - 1.0).abs() < 1e-4);
            assert!((p / 3.0 - n).length() < 1e-4);
        }
    }

    #[test]
    fn sphere_indices_are_in_bounds() {
        let sphere = SphereGeometry::new(1.0, 8, 6);
        let count = sphere.vertices.len() as u32;
        assert!(sphere.indices.iter().all(|&i| i < count));
        assert_eq!(sphere.indices.len() % 3, 0);
    }

    #[test]
    fn sphere_faces_point_outward() {
        let sphere = SphereGeometry::new(3.0, 12, 8);
        for tri in sphere.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| Vec3::from_array(sphere.vertices[i as usize].position));
            let face_normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(face_normal.dot(centroid) > 0.0);
        }
    }

    #[test]
    fn segment_minimums() {
        let sphere = SphereGeometry::new(1.0, 0, 0);
        assert_eq!(sphere.width_segments, 3);
        assert_eq!(sphere.height_segments, 2);
    }

    #[test]
    fn vertex_layout_is_position_and_normal() {
        assert_eq!(std::mem::size_of::<Vertex3d>(), 24);
        assert_eq!(Vertex3d::LAYOUT.array_stride, 24);
        assert_eq!(Vertex3d::LAYOUT.attributes.len(), 2);
    }

    #[test]
    fn transform_scale_only() {
        let t = Transform::new().scale(Vec3::splat(0.5));
        let p = t.matrix().transform_point3(Vec3::new(2.0, 0.0, 0.0));
        assert!((p - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-6);
    }
}
