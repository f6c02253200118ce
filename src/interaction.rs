//! Entrance animation and pointer-drag recoloring.
//!
//! Both behaviors write to the same objects the render loop reads each frame;
//! everything runs on the event-loop thread, so no synchronization is needed.

use glam::{Vec2, Vec3};
use winit::event::MouseButton;

use crate::color::Color;
use crate::config::DragArbitration;
use crate::input::PointerEvent;
use crate::orbit_controls::OrbitControls;
use crate::scene::Sphere;
use crate::tween::{Animated, Position, Timeline, TweenDefaults};
use crate::viewport::Viewport;

/// Blue channel of every drag target.
pub const DRAG_BLUE: i32 = 125;

/// 2D elements drawn over the scene, driven only through offset and opacity.
#[derive(Clone, Debug)]
pub struct Overlay {
    /// Navigation bar vertical offset as a fraction of its own height
    /// (-1.0 is fully hidden above the window, 0.0 is in place).
    pub nav_offset: Animated<f32>,
    /// Heading opacity, 0.0 to 1.0.
    pub heading_opacity: Animated<f32>,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            nav_offset: Animated::new(0.0),
            heading_opacity: Animated::new(1.0),
        }
    }
}

impl Overlay {
    pub fn update(&mut self, time: f32) {
        self.nav_offset.update(time);
        self.heading_opacity.update(time);
    }
}

/// The one-shot intro: sphere grows in, nav bar slides down, heading fades in.
#[derive(Clone, Debug, Default)]
pub struct EntranceAnimation {
    played: bool,
}

impl EntranceAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_played(&self) -> bool {
        self.played
    }

    /// Start the intro at session time `now`.
    ///
    /// All three tweens share the same start. Returns the timeline, or `None`
    /// if the intro has already been played.
    pub fn play(
        &mut self,
        sphere: &mut Sphere,
        overlay: &mut Overlay,
        now: f32,
        defaults: TweenDefaults,
    ) -> Option<Timeline> {
        if self.played {
            return None;
        }
        self.played = true;

        let mut timeline = Timeline::new(now, defaults);
        timeline
            .from_to(&mut sphere.scale, Vec3::ZERO, Vec3::ONE, Position::Append)
            .from_to(&mut overlay.nav_offset, -1.0, 0.0, Position::WithPrevious)
            .from_to(
                &mut overlay.heading_opacity,
                0.0,
                1.0,
                Position::WithPrevious,
            );

        tracing::debug!("Entrance animation started, {:.2}s", timeline.duration());
        Some(timeline)
    }
}

/// Recolor drag state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Released,
    Pressed,
}

/// Channel values for a pointer at `position` in `viewport`.
///
/// Red follows x, green follows y, blue is fixed. Positions outside the
/// viewport give channels outside 0-255; they are not clamped.
pub fn drag_target(position: Vec2, viewport: Viewport) -> [i32; 3] {
    let r = (position.x / viewport.width() as f32 * 255.0).round() as i32;
    let g = (position.y / viewport.height() as f32 * 255.0).round() as i32;
    [r, g, DRAG_BLUE]
}

/// Released/Pressed state machine that recolors the sphere while pressed.
#[derive(Clone, Debug, Default)]
pub struct ColorDrag {
    state: DragState,
    last_target: Option<[i32; 3]>,
}

impl ColorDrag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Channels of the most recent target, if any move happened while pressed.
    pub fn last_target(&self) -> Option<[i32; 3]> {
        self.last_target
    }

    pub fn press(&mut self) {
        if self.state == DragState::Released {
            tracing::debug!("Color drag pressed");
        }
        self.state = DragState::Pressed;
    }

    pub fn release(&mut self) {
        if self.state == DragState::Pressed {
            tracing::debug!("Color drag released");
        }
        self.state = DragState::Released;
    }

    /// Handle a pointer move. While pressed, starts a tween of the sphere color
    /// toward the target for `position`, cancelling any color tween in flight.
    pub fn on_move(
        &mut self,
        position: Vec2,
        viewport: Viewport,
        sphere: &mut Sphere,
        now: f32,
        defaults: TweenDefaults,
    ) -> Option<[i32; 3]> {
        if self.state != DragState::Pressed {
            return None;
        }

        let target = drag_target(position, viewport);
        sphere
            .material
            .color
            .animate_to(Color::from_channels(target), now, defaults);
        self.last_target = Some(target);
        tracing::trace!("Color target rgb({}, {}, {})", target[0], target[1], target[2]);
        Some(target)
    }
}

/// Routes pointer events between the orbit controls and the color drag.
#[derive(Clone, Debug)]
pub struct Interaction {
    arbitration: DragArbitration,
    pub color_drag: ColorDrag,
    pub entrance: EntranceAnimation,
}

impl Interaction {
    pub fn new(arbitration: DragArbitration) -> Self {
        Self {
            arbitration,
            color_drag: ColorDrag::new(),
            entrance: EntranceAnimation::new(),
        }
    }

    /// Apply one pointer event.
    ///
    /// Under [`DragArbitration::ShiftRecolors`] a press with Shift enters the
    /// recolor state and leaves the camera alone; a plain left press orbits.
    /// Under [`DragArbitration::Shared`] every press recolors and a left press
    /// also orbits. Any release ends both.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        viewport: Viewport,
        sphere: &mut Sphere,
        controls: &mut OrbitControls,
        now: f32,
        defaults: TweenDefaults,
    ) {
        match event {
            PointerEvent::Pressed { button, shift } => {
                let (recolor, orbit) = match self.arbitration {
                    DragArbitration::ShiftRecolors => {
                        (shift, !shift && button == MouseButton::Left)
                    }
                    DragArbitration::Shared => (true, button == MouseButton::Left),
                };
                if recolor {
                    self.color_drag.press();
                }
                if orbit {
                    controls.begin_drag();
                }
            }
            PointerEvent::Released { button } => {
                self.color_drag.release();
                if button == MouseButton::Left {
                    controls.end_drag();
                }
            }
            PointerEvent::Moved { position, delta } => {
                if controls.is_dragging() {
                    controls.rotate_by_pixels(delta, viewport.height() as f32);
                }
                self.color_drag
                    .on_move(position, viewport, sphere, now, defaults);
            }
        }
    }
}
