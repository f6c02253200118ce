//! Per-frame drawing of a [`Session`] to the window surface.

use std::sync::Arc;

use winit::window::Window;

use crate::color::Color;
use crate::error::SphereError;
use crate::gpu::GpuContext;
use crate::mesh::Mesh;
use crate::overlay_pass::OverlayPass;
use crate::render_loop::FrameSink;
use crate::session::Session;
use crate::sphere_pass::SpherePass;

/// Owns the GPU context and the passes that draw the sphere and its overlay.
pub struct Renderer {
    gpu: GpuContext,
    mesh: Mesh,
    sphere_pass: SpherePass,
    overlay_pass: OverlayPass,
    clear_color: wgpu::Color,
}

impl Renderer {
    /// Set up the GPU for `window` and upload the session's sphere geometry.
    pub fn new(
        window: Arc<Window>,
        session: &Session,
        background: Color,
    ) -> Result<Self, SphereError> {
        let gpu = GpuContext::new(window)?;
        let mesh = Mesh::from_geometry(&gpu, session.scene.sphere.geometry());
        let sphere_pass = SpherePass::new(&gpu);
        let overlay_pass = OverlayPass::new(&gpu);

        tracing::debug!(
            "Renderer ready: {}x{} {:?}",
            gpu.width(),
            gpu.height(),
            gpu.config.format
        );

        Ok(Self {
            gpu,
            mesh,
            sphere_pass,
            overlay_pass,
            clear_color: clear_color(background),
        })
    }

    /// Resize the drawing buffer to `width × height` physical pixels.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    fn render(&mut self, session: &Session) {
        let output = match self.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::warn!("Surface lost or outdated, reconfiguring");
                self.gpu.reconfigure();
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                tracing::debug!("Surface acquire timed out, skipping frame");
                return;
            }
            Err(e) => {
                tracing::error!("Failed to acquire frame: {e}");
                return;
            }
        };

        self.sphere_pass.ensure_depth_size(&self.gpu);

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sphere Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: self.sphere_pass.depth_view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.sphere_pass.render(
                &self.gpu,
                &mut render_pass,
                &session.camera,
                &session.scene,
                &self.mesh,
            );
            self.overlay_pass.render(
                &self.gpu,
                &mut render_pass,
                &session.overlay,
                session.viewport.current_size(),
            );
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

impl FrameSink for Renderer {
    fn draw(&mut self, session: &Session) {
        self.render(session);
    }
}

/// Clear value for an sRGB background on an sRGB surface.
fn clear_color(background: Color) -> wgpu::Color {
    let c = background.to_linear();
    wgpu::Color {
        r: c.r as f64,
        g: c.g as f64,
        b: c.b as f64,
        a: c.a as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_background_clears_to_black() {
        let c = clear_color(Color::BLACK);
        assert_eq!((c.r, c.g, c.b, c.a), (0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn clear_color_is_linear() {
        let c = clear_color(Color::rgb(0.5, 0.5, 0.5));
        assert!(c.r > 0.2 && c.r < 0.25);
    }
}
