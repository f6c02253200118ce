use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::camera::Camera;
use crate::config::OrbitSettings;

const POLAR_EPSILON: f32 = 1e-6;

/// A damped orbit controller that keeps the camera at a fixed distance from
/// its target.
///
/// Panning and zooming are not supported: the target and distance never change
/// after construction. Rotation input (pointer drags and auto-rotation) is
/// accumulated as a pending delta; each [`update`](Self::update) applies a
/// fraction of it and decays the rest, giving inertial deceleration.
///
/// # Example
/// ```ignore
/// let mut controls = OrbitControls::new(28.0, OrbitSettings::default());
///
/// // In the frame loop:
/// controls.update(dt);
/// controls.apply(&mut camera);
/// ```
#[derive(Clone, Debug)]
pub struct OrbitControls {
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Distance from target.
    pub distance: f32,
    /// Horizontal angle in radians, measured from +Z toward +X.
    pub azimuth: f32,
    /// Angle from the +Y axis in radians, kept inside (0, π).
    pub polar: f32,
    settings: OrbitSettings,
    /// Rotation still to be applied: x is azimuth, y is polar.
    pending: Vec2,
    dragging: bool,
}

impl OrbitControls {
    /// Controls orbiting the origin, starting on the +Z axis.
    pub fn new(distance: f32, settings: OrbitSettings) -> Self {
        Self {
            target: Vec3::ZERO,
            distance,
            azimuth: 0.0,
            polar: PI / 2.0,
            settings,
            pending: Vec2::ZERO,
            dragging: false,
        }
    }

    /// Controls matching the camera's current position around its target.
    pub fn from_camera(camera: &Camera, settings: OrbitSettings) -> Self {
        let offset = camera.position - camera.target;
        let distance = offset.length();
        let (azimuth, polar) = if distance > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / distance).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };

        Self {
            target: camera.target,
            distance,
            azimuth,
            polar: polar.clamp(POLAR_EPSILON, PI - POLAR_EPSILON),
            settings,
            pending: Vec2::ZERO,
            dragging: false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Start a user rotation; auto-rotation pauses until [`end_drag`](Self::end_drag).
    pub fn begin_drag(&mut self) {
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        self.dragging = false;
    }

    /// Queue a rotation for a pointer movement of `delta` logical pixels.
    ///
    /// A drag across the full viewport height turns a full revolution.
    pub fn rotate_by_pixels(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let scale = TAU / viewport_height * self.settings.rotate_speed;
        self.pending.x -= delta.x * scale;
        self.pending.y -= delta.y * scale;
    }

    /// Radians of auto-rotation for a frame lasting `dt` seconds.
    pub fn auto_rotate_angle(&self, dt: f32) -> f32 {
        TAU / 60.0 * self.settings.auto_rotate_speed * dt
    }

    /// Advance one step: add auto-rotation, apply and decay the pending rotation.
    pub fn update(&mut self, dt: f32) {
        if self.settings.auto_rotate && !self.dragging {
            self.pending.x -= self.auto_rotate_angle(dt);
        }

        if self.settings.damping {
            let factor = self.settings.damping_factor;
            self.azimuth += self.pending.x * factor;
            self.polar += self.pending.y * factor;
            self.pending *= 1.0 - factor;
        } else {
            self.azimuth += self.pending.x;
            self.polar += self.pending.y;
            self.pending = Vec2::ZERO;
        }

        self.azimuth = self.azimuth.rem_euclid(TAU);
        self.polar = self.polar.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
    }

    /// Camera position for the current angles.
    pub fn position(&self) -> Vec3 {
        let offset = Vec3::new(
            self.distance * self.polar.sin() * self.azimuth.sin(),
            self.distance * self.polar.cos(),
            self.distance * self.polar.sin() * self.azimuth.cos(),
        );
        self.target + offset
    }

    /// Move the camera to the current orbit position, looking at the target.
    pub fn apply(&self, camera: &mut Camera) {
        camera.position = self.position();
        camera.target = self.target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still() -> OrbitSettings {
        OrbitSettings {
            auto_rotate: false,
            ..Default::default()
        }
    }

    #[test]
    fn starts_on_positive_z() {
        let controls = OrbitControls::new(28.0, OrbitSettings::default());
        let pos = controls.position();
        assert!(pos.x.abs() < 1e-4);
        assert!(pos.y.abs() < 1e-4);
        assert!((pos.z - 28.0).abs() < 1e-4);
    }

    #[test]
    fn from_camera_recovers_angles() {
        let camera = Camera::default().at(0.0, 0.0, 28.0).looking_at(Vec3::ZERO);
        let controls = OrbitControls::from_camera(&camera, still());
        assert!((controls.distance - 28.0).abs() < 1e-5);
        assert!(controls.azimuth.abs() < 1e-6);
        assert!((controls.polar - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn auto_rotation_advances_every_update() {
        let mut controls = OrbitControls::new(28.0, OrbitSettings::default());
        let mut last = controls.position();
        for _ in 0..10 {
            controls.update(1.0 / 60.0);
            let pos = controls.position();
            assert_ne!(pos, last);
            assert!((pos.length() - 28.0).abs() < 1e-3);
            last = pos;
        }
    }

    #[test]
    fn auto_rotation_pauses_while_dragging() {
        let mut controls = OrbitControls::new(28.0, OrbitSettings::default());
        controls.begin_drag();
        controls.update(1.0 / 60.0);
        assert_eq!(controls.azimuth, 0.0);
    }

    #[test]
    fn damping_decays_drag_input() {
        let mut controls = OrbitControls::new(28.0, still());
        controls.rotate_by_pixels(Vec2::new(-100.0, 0.0), 600.0);

        controls.update(1.0 / 60.0);
        let first_step = controls.azimuth;
        controls.update(1.0 / 60.0);
        let second_step = controls.azimuth - first_step;

        assert!(first_step > 0.0);
        assert!(second_step > 0.0);
        assert!(second_step < first_step);
    }

    #[test]
    fn without_damping_rotation_applies_at_once() {
        let settings = OrbitSettings {
            damping: false,
            ..still()
        };
        let mut controls = OrbitControls::new(28.0, settings);
        controls.rotate_by_pixels(Vec2::new(-150.0, 0.0), 600.0);
        controls.update(1.0 / 60.0);
        assert!((controls.azimuth - TAU / 4.0).abs() < 1e-5);
        controls.update(1.0 / 60.0);
        assert!((controls.azimuth - TAU / 4.0).abs() < 1e-5);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let settings = OrbitSettings {
            damping: false,
            ..still()
        };
        let mut controls = OrbitControls::new(28.0, settings);
        controls.rotate_by_pixels(Vec2::new(0.0, 10_000.0), 600.0);
        controls.update(1.0 / 60.0);
        assert!(controls.polar > 0.0);
        assert!(controls.polar < PI);
    }

    #[test]
    fn distance_and_target_never_change() {
        let mut controls = OrbitControls::new(28.0, OrbitSettings::default());
        controls.rotate_by_pixels(Vec2::new(40.0, -25.0), 600.0);
        for _ in 0..120 {
            controls.update(1.0 / 60.0);
        }
        assert_eq!(controls.distance, 28.0);
        assert_eq!(controls.target, Vec3::ZERO);

        let mut camera = Camera::default();
        controls.apply(&mut camera);
        assert!((camera.distance() - 28.0).abs() < 1e-3);
    }
}
