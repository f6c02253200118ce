//! The per-frame unit of work and its cancellation.
//!
//! Each [`RenderLoop::tick`] advances the session, issues exactly one draw and
//! reschedules itself exactly once. It never stops on its own: teardown cancels
//! the loop's [`CancelToken`], after which ticks neither draw nor reschedule.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::session::Session;

/// Shared flag that tells the render loop to stop.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Something that can draw the session once.
pub trait FrameSink {
    fn draw(&mut self, session: &Session);
}

/// The host facility that invokes the loop again on the next display refresh.
pub trait FrameScheduler {
    fn schedule_next(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopStatus {
    /// A frame was drawn and the next one scheduled.
    Continue,
    /// The token was cancelled; nothing was drawn or scheduled.
    Stopped,
}

/// Self-rescheduling frame driver.
#[derive(Debug, Default)]
pub struct RenderLoop {
    token: CancelToken,
    frames: u64,
    stopped: bool,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle for whoever owns teardown.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one frame of `dt` seconds.
    pub fn tick(
        &mut self,
        session: &mut Session,
        dt: f32,
        sink: &mut impl FrameSink,
        scheduler: &mut impl FrameScheduler,
    ) -> LoopStatus {
        if self.token.is_cancelled() {
            if !self.stopped {
                tracing::info!("Render loop stopped after {} frames", self.frames);
                self.stopped = true;
            }
            return LoopStatus::Stopped;
        }

        session.advance(dt);
        sink.draw(session);
        scheduler.schedule_next();
        self.frames += 1;
        LoopStatus::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::viewport::Viewport;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[derive(Default)]
    struct CountingSink {
        draws: usize,
    }

    impl FrameSink for CountingSink {
        fn draw(&mut self, _session: &Session) {
            self.draws += 1;
        }
    }

    #[derive(Default)]
    struct CountingScheduler {
        requests: usize,
    }

    impl FrameScheduler for CountingScheduler {
        fn schedule_next(&mut self) {
            self.requests += 1;
        }
    }

    fn session() -> Session {
        let mut rng = StdRng::seed_from_u64(9);
        Session::new(
            &AppConfig::default(),
            Viewport::new(640, 480).unwrap(),
            1.0,
            &mut rng,
        )
    }

    #[test]
    fn each_tick_draws_and_reschedules_once() {
        let mut session = session();
        let mut render_loop = RenderLoop::new();
        let mut sink = CountingSink::default();
        let mut scheduler = CountingScheduler::default();

        for i in 1..=500 {
            let status = render_loop.tick(&mut session, 1.0 / 60.0, &mut sink, &mut scheduler);
            assert_eq!(status, LoopStatus::Continue);
            assert_eq!(sink.draws, i);
            assert_eq!(scheduler.requests, i);
        }
        assert_eq!(render_loop.frames(), 500);
    }

    #[test]
    fn cancelled_loop_does_nothing() {
        let mut session = session();
        let mut render_loop = RenderLoop::new();
        let mut sink = CountingSink::default();
        let mut scheduler = CountingScheduler::default();

        render_loop.tick(&mut session, 1.0 / 60.0, &mut sink, &mut scheduler);
        let time = session.time();

        render_loop.token().cancel();
        for _ in 0..3 {
            let status = render_loop.tick(&mut session, 1.0 / 60.0, &mut sink, &mut scheduler);
            assert_eq!(status, LoopStatus::Stopped);
        }
        assert_eq!(sink.draws, 1);
        assert_eq!(scheduler.requests, 1);
        assert_eq!(session.time(), time);
    }

    #[test]
    fn token_clones_share_state() {
        let token = CancelToken::new();
        let handle = token.clone();
        assert!(!token.is_cancelled());
        handle.cancel();
        assert!(token.is_cancelled());
    }
}
