//! # Huesphere
//!
//! **An interactive, decorative 3D sphere.**
//!
//! A single lit sphere sits in an orbiting camera's view. On startup it grows in
//! from nothing while a navigation bar slides down and a heading fades in.
//! Dragging with Shift held recolors it from the pointer position; a plain drag
//! orbits the camera, which otherwise rotates slowly on its own.
//!
//! ```no_run
//! use huesphere::{AppConfig, run};
//!
//! fn main() -> Result<(), huesphere::SphereError> {
//!     run(AppConfig::new().title("Huesphere").size(1280, 720))
//! }
//! ```
//!
//! Everything the window needs lives in a [`Session`]: the scene, camera,
//! orbit controls, viewport and overlay. The window host feeds it resize and
//! pointer events and advances it once per frame through a [`RenderLoop`].
//! The session itself never touches the GPU, so it can be driven headless.

mod app;
pub mod camera;
pub mod color;
pub mod config;
pub mod error;
pub mod gpu;
pub mod input;
pub mod interaction;
pub mod mesh;
pub mod orbit_controls;
mod overlay_pass;
pub mod render_loop;
mod renderer;
pub mod scene;
pub mod session;
mod sphere_pass;
pub mod tween;
pub mod viewport;

pub use app::run;
pub use camera::Camera;
pub use color::Color;
pub use config::{AppConfig, DragArbitration, OrbitSettings, SceneParams};
pub use error::SphereError;
pub use gpu::GpuContext;
pub use input::{Input, PointerEvent};
pub use interaction::{ColorDrag, DragState, EntranceAnimation, Interaction, Overlay};
pub use mesh::{Mesh, SphereGeometry, Transform, Vertex3d};
pub use orbit_controls::OrbitControls;
pub use render_loop::{CancelToken, FrameScheduler, FrameSink, LoopStatus, RenderLoop};
pub use scene::{PointLight, Scene, SceneBuilder, Sphere, StandardMaterial};
pub use session::Session;
pub use tween::{Animated, Easing, Position, Timeline, Tween, TweenDefaults};
pub use viewport::{Viewport, ViewportManager};

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3};
