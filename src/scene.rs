//! The fixed scene: one sphere, one point light, one camera.
//!
//! [`SceneBuilder`] constructs all three from [`SceneParams`]. After that the
//! scene never changes structurally; only the sphere's material color and
//! scale are animated.

use glam::Vec3;
use rand::Rng;

use crate::camera::Camera;
use crate::color::Color;
use crate::config::SceneParams;
use crate::mesh::{SphereGeometry, Transform};
use crate::tween::Animated;

/// Largest value of the 24-bit color space.
pub const MAX_RGB24: u32 = 0xFF_FFFF;

/// Surface appearance of the sphere.
#[derive(Clone, Debug)]
pub struct StandardMaterial {
    /// Base color in sRGB space, animated by the drag handler.
    pub color: Animated<Color>,
    pub roughness: f32,
}

/// A point light with a finite range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Color,
    pub intensity: f32,
    /// Distance at which the light's contribution reaches zero.
    pub range: f32,
    /// Falloff exponent applied to `1 - distance / range`.
    pub decay: f32,
}

/// The sphere mesh: immutable geometry plus animated material and scale.
#[derive(Clone, Debug)]
pub struct Sphere {
    geometry: SphereGeometry,
    pub material: StandardMaterial,
    pub scale: Animated<Vec3>,
}

impl Sphere {
    pub fn geometry(&self) -> &SphereGeometry {
        &self.geometry
    }

    /// Transform with the current scale, centered at the origin.
    pub fn transform(&self) -> Transform {
        Transform::new().scale(self.scale.value())
    }

    pub fn color(&self) -> Color {
        self.material.color.value()
    }

    /// Advance the material and scale tweens to `time`.
    pub fn update(&mut self, time: f32) {
        self.material.color.update(time);
        self.scale.update(time);
    }
}

/// The single sphere and single light drawn each frame.
#[derive(Clone, Debug)]
pub struct Scene {
    pub sphere: Sphere,
    pub light: PointLight,
}

/// Pick a color uniformly over the whole 24-bit RGB space.
pub fn random_base_color<R: Rng + ?Sized>(rng: &mut R) -> Color {
    Color::from_hex(rng.gen_range(0..=MAX_RGB24))
}

/// Builds the scene and camera from fixed parameters.
pub struct SceneBuilder {
    params: SceneParams,
}

impl SceneBuilder {
    pub fn new(params: SceneParams) -> Self {
        Self { params }
    }

    /// Construct the scene with a random base color, and a camera for `aspect`.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R, aspect: f32) -> (Scene, Camera) {
        let p = &self.params;

        let base_color = random_base_color(rng);
        tracing::debug!("Sphere base color #{:06x}", base_color.to_hex());

        let sphere = Sphere {
            geometry: SphereGeometry::new(p.sphere_radius, p.width_segments, p.height_segments),
            material: StandardMaterial {
                color: Animated::new(base_color),
                roughness: p.roughness,
            },
            scale: Animated::new(Vec3::ONE),
        };

        let light = PointLight {
            position: p.light_position,
            color: p.light_color,
            intensity: p.light_intensity,
            range: p.light_range,
            decay: 1.0,
        };

        let camera = Camera::perspective(p.fov_degrees, aspect, p.near, p.far)
            .at(0.0, 0.0, p.camera_distance)
            .looking_at(Vec3::ZERO);

        (Scene { sphere, light }, camera)
    }
}
