//! Startup failures.
//!
//! Only initialization can fail. Once the window, surface and device exist,
//! resize and pointer input are accepted unconditionally.

/// Fatal conditions raised while bringing up the window and GPU.
#[derive(Debug, thiserror::Error)]
pub enum SphereError {
    /// The window that hosts the drawing surface could not be created.
    #[error("rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),

    /// No adapter, device, or surface could be obtained for accelerated drawing.
    #[error("rendering context unavailable: {0}")]
    RenderingContextUnavailable(String),

    /// The host event loop could not be started or failed while running.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_unavailable_display() {
        let err = SphereError::SurfaceUnavailable("no display".into());
        assert_eq!(err.to_string(), "rendering surface unavailable: no display");
    }

    #[test]
    fn rendering_context_unavailable_display() {
        let err = SphereError::RenderingContextUnavailable("no adapter".into());
        assert_eq!(err.to_string(), "rendering context unavailable: no adapter");
    }
}
