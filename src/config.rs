//! Application and scene configuration.
//!
//! [`AppConfig`] covers everything a user may tune; its defaults reproduce the
//! fixed scene exactly. [`SceneParams`] holds the geometry, light and camera
//! constants that never change at runtime.

use glam::Vec3;

use crate::color::Color;
use crate::tween::TweenDefaults;

/// How a press decides between orbiting the camera and recoloring the sphere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragArbitration {
    /// A press with Shift held recolors and does not orbit; a plain press orbits.
    #[default]
    ShiftRecolors,
    /// Every press both orbits and recolors.
    Shared,
}

/// Orbit controller tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSettings {
    /// Auto-rotation speed; 2.0 is one revolution every 30 seconds.
    pub auto_rotate_speed: f32,
    pub auto_rotate: bool,
    /// Fraction of the pending rotation applied (and removed) per update.
    pub damping_factor: f32,
    pub damping: bool,
    /// Multiplier on pointer-drag rotation.
    pub rotate_speed: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            auto_rotate_speed: 8.0,
            auto_rotate: true,
            damping_factor: 0.05,
            damping: true,
            rotate_speed: 1.0,
        }
    }
}

/// Fixed parameters of the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneParams {
    pub sphere_radius: f32,
    pub width_segments: u32,
    pub height_segments: u32,
    pub roughness: f32,
    pub light_position: Vec3,
    pub light_color: Color,
    pub light_intensity: f32,
    pub light_range: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub camera_distance: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            sphere_radius: 3.0,
            width_segments: 64,
            height_segments: 64,
            roughness: 0.7,
            light_position: Vec3::new(20.0, 15.0, 15.0),
            light_color: Color::WHITE,
            light_intensity: 1.5,
            light_range: 100.0,
            fov_degrees: 45.0,
            near: 0.5,
            far: 100.0,
            camera_distance: 28.0,
        }
    }
}

/// Configuration for the app window and its behavior.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub title: String,
    /// Initial logical window width.
    pub width: u32,
    /// Initial logical window height.
    pub height: u32,
    pub background: Color,
    pub drag: DragArbitration,
    pub orbit: OrbitSettings,
    pub tween: TweenDefaults,
    pub scene: SceneParams,
    /// `tracing` filter directive, e.g. `huesphere=debug`.
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Huesphere".to_string(),
            width: 1280,
            height: 720,
            background: Color::BLACK,
            drag: DragArbitration::default(),
            orbit: OrbitSettings::default(),
            tween: TweenDefaults::default(),
            scene: SceneParams::default(),
            log_filter: "huesphere=info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    pub fn drag(mut self, drag: DragArbitration) -> Self {
        self.drag = drag;
        self
    }

    pub fn orbit(mut self, orbit: OrbitSettings) -> Self {
        self.orbit = orbit;
        self
    }

    pub fn tween(mut self, tween: TweenDefaults) -> Self {
        self.tween = tween;
        self
    }

    pub fn log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_scene() {
        let params = SceneParams::default();
        assert_eq!(params.sphere_radius, 3.0);
        assert_eq!((params.width_segments, params.height_segments), (64, 64));
        assert_eq!(params.light_position, Vec3::new(20.0, 15.0, 15.0));
        assert_eq!(params.camera_distance, 28.0);

        let config = AppConfig::default();
        assert_eq!(config.orbit.auto_rotate_speed, 8.0);
        assert_eq!(config.tween.duration, 0.8);
    }

    #[test]
    fn builder_overrides() {
        let config = AppConfig::new()
            .title("Orb")
            .size(800, 600)
            .drag(DragArbitration::Shared)
            .log_filter("huesphere=debug");
        assert_eq!(config.title, "Orb");
        assert_eq!((config.width, config.height), (800, 600));
        assert_eq!(config.drag, DragArbitration::Shared);
        assert_eq!(config.log_filter, "huesphere=debug");
    }
}
