use glam::{Mat4, Vec3};

/// A perspective camera looking at a target point.
///
/// The projection matrix is cached: after changing `fov`, `aspect`, `near`
/// or `far`, call [`update_projection`](Self::update_projection) to reapply it.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Width over height of the viewport.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(45.0, 1.0, 0.5, 100.0)
    }
}

impl Camera {
    /// A camera at the origin looking down -Z with the given projection.
    pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            fov: fov_degrees.to_radians(),
            aspect,
            near,
            far,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    pub fn looking_at(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Set the aspect ratio and reapply the projection.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection();
    }

    /// Recompute the cached projection matrix from the current parameters.
    pub fn update_projection(&mut self) {
        self.projection = Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Unit vector from the camera toward its target.
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Z)
    }

    /// Distance between the camera and its target.
    pub fn distance(&self) -> f32 {
        self.position.distance(self.target)
    }
}
