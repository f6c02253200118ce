//! Drawing surface dimensions and the camera's aspect ratio.
//!
//! The viewport is measured in logical pixels, the space pointer positions are
//! reported in. The drawing buffer is measured in physical pixels: the logical
//! size times the pixel ratio.

use crate::camera::Camera;

/// Logical size of the drawing surface. Both dimensions are positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    /// Returns `None` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    /// Like [`Viewport::new`], but raises zero dimensions to one pixel.
    pub fn at_least_one(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Owns the viewport and keeps the camera projection and drawing buffer in step
/// with it.
#[derive(Clone, Debug)]
pub struct ViewportManager {
    viewport: Viewport,
    pixel_ratio: f32,
    buffer: (u32, u32),
}

impl ViewportManager {
    pub fn new(viewport: Viewport, pixel_ratio: f32) -> Self {
        Self {
            viewport,
            pixel_ratio,
            buffer: scaled(viewport, pixel_ratio),
        }
    }

    pub fn current_size(&self) -> Viewport {
        self.viewport
    }

    pub fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    /// Physical size of the drawing buffer.
    pub fn drawing_buffer_size(&self) -> (u32, u32) {
        self.buffer
    }

    /// Handle a resize to `width × height` logical pixels.
    ///
    /// Updates the viewport, sets the camera aspect to width/height and
    /// reapplies its projection, and resizes the drawing buffer. Returns
    /// `false` without touching anything when the size is unchanged or either
    /// dimension is zero (a minimized window).
    pub fn on_resize(&mut self, width: u32, height: u32, camera: &mut Camera) -> bool {
        let Some(viewport) = Viewport::new(width, height) else {
            tracing::debug!("Ignoring zero-sized resize {}x{}", width, height);
            return false;
        };
        if viewport == self.viewport {
            return false;
        }

        self.apply(viewport, scaled(viewport, self.pixel_ratio), camera);
        true
    }

    /// Handle a host resize reported in physical pixels at `scale_factor`.
    ///
    /// The drawing buffer takes the physical size as-is; the viewport is the
    /// physical size divided by the scale factor.
    pub fn on_physical_resize(
        &mut self,
        physical_width: u32,
        physical_height: u32,
        scale_factor: f32,
        camera: &mut Camera,
    ) -> bool {
        let scale_factor = if scale_factor > 0.0 { scale_factor } else { 1.0 };
        let width = (physical_width as f32 / scale_factor).round() as u32;
        let height = (physical_height as f32 / scale_factor).round() as u32;
        let Some(viewport) = Viewport::new(width, height) else {
            tracing::debug!(
                "Ignoring zero-sized resize {}x{}",
                physical_width,
                physical_height
            );
            return false;
        };

        let buffer = (physical_width, physical_height);
        if viewport == self.viewport && buffer == self.buffer && scale_factor == self.pixel_ratio {
            return false;
        }

        self.pixel_ratio = scale_factor;
        self.apply(viewport, buffer, camera);
        true
    }

    fn apply(&mut self, viewport: Viewport, buffer: (u32, u32), camera: &mut Camera) {
        self.viewport = viewport;
        self.buffer = buffer;
        camera.set_aspect(viewport.aspect());
        tracing::debug!(
            "Viewport {}x{} (buffer {}x{}, aspect {:.3})",
            viewport.width,
            viewport.height,
            buffer.0,
            buffer.1,
            camera.aspect
        );
    }
}

fn scaled(viewport: Viewport, pixel_ratio: f32) -> (u32, u32) {
    let scale = |v: u32| ((v as f32 * pixel_ratio).round() as u32).max(1);
    (scale(viewport.width), scale(viewport.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> (ViewportManager, Camera) {
        let viewport = Viewport::new(800, 600).unwrap();
        let camera = Camera::perspective(45.0, viewport.aspect(), 0.5, 100.0);
        (ViewportManager::new(viewport, 2.0), camera)
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(Viewport::new(0, 10).is_none());
        assert!(Viewport::new(10, 0).is_none());
        assert!(Viewport::new(1, 1).is_some());
        assert_eq!(Viewport::at_least_one(0, 5), Viewport::new(1, 5).unwrap());
    }

    #[test]
    fn resize_sets_aspect_to_width_over_height() {
        let (mut vm, mut camera) = manager();
        for (w, h) in [(1920, 1080), (1, 1), (333, 777), (4096, 17)] {
            assert!(vm.on_resize(w, h, &mut camera));
            assert_eq!(camera.aspect, w as f32 / h as f32);
            assert_eq!(vm.current_size(), Viewport::new(w, h).unwrap());
            assert_eq!(vm.drawing_buffer_size(), (w * 2, h * 2));
        }
    }

    #[test]
    fn resize_is_idempotent() {
        let (mut vm, mut camera) = manager();
        assert!(vm.on_resize(1024, 768, &mut camera));
        let aspect = camera.aspect;
        let projection = camera.projection_matrix();

        assert!(!vm.on_resize(1024, 768, &mut camera));
        assert_eq!(camera.aspect, aspect);
        assert_eq!(camera.projection_matrix(), projection);
        assert_eq!(vm.current_size(), Viewport::new(1024, 768).unwrap());
    }

    #[test]
    fn zero_sized_resize_keeps_last_size() {
        let (mut vm, mut camera) = manager();
        assert!(!vm.on_resize(0, 0, &mut camera));
        assert_eq!(vm.current_size(), Viewport::new(800, 600).unwrap());
        assert_eq!(camera.aspect, 800.0 / 600.0);
    }

    #[test]
    fn physical_resize_uses_host_buffer_size() {
        let (mut vm, mut camera) = manager();
        assert!(vm.on_physical_resize(3000, 2000, 1.5, &mut camera));
        assert_eq!(vm.current_size(), Viewport::new(2000, 1333).unwrap());
        assert_eq!(vm.drawing_buffer_size(), (3000, 2000));
        assert_eq!(vm.pixel_ratio(), 1.5);
        assert!(!vm.on_physical_resize(3000, 2000, 1.5, &mut camera));
    }

    #[test]
    fn scale_change_without_physical_resize_updates_viewport() {
        let (mut vm, mut camera) = manager();
        assert!(!vm.on_physical_resize(1600, 1200, 2.0, &mut camera));
        assert_eq!(vm.current_size(), Viewport::new(800, 600).unwrap());

        // Same physical size, new scale factor
        assert!(vm.on_physical_resize(1600, 1200, 1.0, &mut camera));
        assert_eq!(vm.current_size(), Viewport::new(1600, 1200).unwrap());
        assert_eq!(vm.pixel_ratio(), 1.0);
        assert_eq!(vm.drawing_buffer_size(), (1600, 1200));
    }
}
