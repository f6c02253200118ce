//! Per-window state shared by the viewport, render loop and interaction layer.
//!
//! A [`Session`] owns the scene, camera, controls, viewport, overlay and
//! pointer state. Components receive it explicitly, so several sessions can
//! coexist and each can be driven in tests without a window.

use rand::Rng;

use crate::camera::Camera;
use crate::config::AppConfig;
use crate::input::PointerEvent;
use crate::interaction::{Interaction, Overlay};
use crate::orbit_controls::OrbitControls;
use crate::scene::{Scene, SceneBuilder};
use crate::tween::TweenDefaults;
use crate::viewport::{Viewport, ViewportManager};

pub struct Session {
    pub scene: Scene,
    pub camera: Camera,
    pub controls: OrbitControls,
    pub viewport: ViewportManager,
    pub overlay: Overlay,
    pub interaction: Interaction,
    tween: TweenDefaults,
    /// Seconds since the session started, advanced by the render loop.
    time: f32,
}

impl Session {
    /// Build the scene for `viewport` and start the entrance animation.
    pub fn new<R: Rng + ?Sized>(
        config: &AppConfig,
        viewport: Viewport,
        pixel_ratio: f32,
        rng: &mut R,
    ) -> Self {
        let (mut scene, mut camera) =
            SceneBuilder::new(config.scene).build(rng, viewport.aspect());

        let controls = OrbitControls::from_camera(&camera, config.orbit);
        controls.apply(&mut camera);

        let mut overlay = Overlay::default();
        let mut interaction = Interaction::new(config.drag);
        interaction
            .entrance
            .play(&mut scene.sphere, &mut overlay, 0.0, config.tween);

        Self {
            scene,
            camera,
            controls,
            viewport: ViewportManager::new(viewport, pixel_ratio),
            overlay,
            interaction,
            tween: config.tween,
            time: 0.0,
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    /// Resize to `width × height` logical pixels.
    pub fn on_resize(&mut self, width: u32, height: u32) -> bool {
        self.viewport.on_resize(width, height, &mut self.camera)
    }

    /// Resize from a host notification in physical pixels.
    pub fn on_physical_resize(&mut self, width: u32, height: u32, scale_factor: f32) -> bool {
        self.viewport
            .on_physical_resize(width, height, scale_factor, &mut self.camera)
    }

    pub fn on_pointer(&mut self, event: PointerEvent) {
        let viewport = self.viewport.current_size();
        self.interaction.handle_pointer(
            event,
            viewport,
            &mut self.scene.sphere,
            &mut self.controls,
            self.time,
            self.tween,
        );
    }

    /// Advance one frame of `dt` seconds: controls step, then tweens.
    pub fn advance(&mut self, dt: f32) {
        self.time += dt.max(0.0);
        self.controls.update(dt);
        self.controls.apply(&mut self.camera);
        self.scene.sphere.update(self.time);
        self.overlay.update(self.time);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::DragState;
    use glam::{Vec2, Vec3};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use winit::event::MouseButton;

    fn session() -> Session {
        let mut rng = StdRng::seed_from_u64(42);
        let viewport = Viewport::new(800, 600).unwrap();
        Session::new(&AppConfig::default(), viewport, 2.0, &mut rng)
    }

    #[test]
    fn starts_with_entrance_pending() {
        let session = session();
        assert_eq!(session.time(), 0.0);
        assert_eq!(session.scene.sphere.scale.value(), Vec3::ZERO);
        assert!(session.interaction.entrance.has_played());
        assert_eq!(session.camera.aspect, 800.0 / 600.0);
        assert!((session.camera.position.length() - 28.0).abs() < 1e-3);
    }

    #[test]
    fn advancing_finishes_entrance_and_rotates() {
        let mut session = session();
        let start = session.camera.position;
        for _ in 0..60 {
            session.advance(1.0 / 60.0);
        }
        assert_eq!(session.scene.sphere.scale.value(), Vec3::ONE);
        assert_eq!(session.overlay.heading_opacity.value(), 1.0);
        assert_ne!(session.camera.position, start);
        assert!((session.camera.distance() - 28.0).abs() < 1e-3);
    }

    #[test]
    fn shift_drag_recolors_sphere() {
        let mut session = session();
        session.on_pointer(PointerEvent::Pressed {
            button: MouseButton::Left,
            shift: true,
        });
        assert_eq!(session.interaction.color_drag.state(), DragState::Pressed);

        session.on_pointer(PointerEvent::Moved {
            position: Vec2::new(400.0, 300.0),
            delta: Vec2::ZERO,
        });
        assert_eq!(
            session.interaction.color_drag.last_target(),
            Some([128, 128, 125])
        );

        for _ in 0..60 {
            session.advance(1.0 / 60.0);
        }
        assert_eq!(session.scene.sphere.color().to_hex(), 0x80807d);
    }

    #[test]
    fn resize_reaches_camera() {
        let mut session = session();
        assert!(session.on_resize(1000, 500));
        assert_eq!(session.camera.aspect, 2.0);
        assert!(!session.on_resize(1000, 500));
    }
}
