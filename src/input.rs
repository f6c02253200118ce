use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};

/// A pointer event, in logical pixels, distilled from a window event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Pressed { button: MouseButton, shift: bool },
    Released { button: MouseButton },
    Moved { position: Vec2, delta: Vec2 },
}

/// Turns window events into [`PointerEvent`]s.
///
/// Positions are logical pixels so they compare directly with the viewport.
#[derive(Debug, Default)]
pub struct Input {
    /// Last known cursor position; `None` until the first move after the
    /// cursor enters the window.
    position: Option<Vec2>,
    shift: bool,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a window event, returning the pointer event it carried, if any.
    pub fn handle_event(
        &mut self,
        event: &WindowEvent,
        scale_factor: f64,
    ) -> Option<PointerEvent> {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.shift = modifiers.state().shift_key();
                None
            }
            WindowEvent::MouseInput { state, button, .. } => {
                Some(self.apply_button(*button, *state == ElementState::Pressed))
            }
            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f32>(scale_factor);
                Some(self.apply_move(Vec2::new(logical.x, logical.y)))
            }
            WindowEvent::CursorEntered { .. } | WindowEvent::CursorLeft { .. } => {
                self.forget_position();
                None
            }
            _ => None,
        }
    }

    fn apply_button(&self, button: MouseButton, pressed: bool) -> PointerEvent {
        if pressed {
            PointerEvent::Pressed {
                button,
                shift: self.shift,
            }
        } else {
            PointerEvent::Released { button }
        }
    }

    fn forget_position(&mut self) {
        self.position = None;
    }

    /// The first move after the cursor (re)enters only seeds the position.
    fn apply_move(&mut self, position: Vec2) -> PointerEvent {
        let delta = self.position.map_or(Vec2::ZERO, |last| position - last);
        self.position = Some(position);
        PointerEvent::Moved { position, delta }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_reports_delta_from_last_position() {
        let mut input = Input::new();
        input.apply_move(Vec2::new(10.0, 10.0));
        let event = input.apply_move(Vec2::new(15.0, 7.0));
        assert_eq!(
            event,
            PointerEvent::Moved {
                position: Vec2::new(15.0, 7.0),
                delta: Vec2::new(5.0, -3.0),
            }
        );
    }

    #[test]
    fn first_move_has_no_delta() {
        let mut input = Input::new();
        input.apply_button(MouseButton::Left, true);
        assert_eq!(
            input.apply_move(Vec2::new(400.0, 300.0)),
            PointerEvent::Moved {
                position: Vec2::new(400.0, 300.0),
                delta: Vec2::ZERO,
            }
        );
    }

    #[test]
    fn reentering_cursor_does_not_jump() {
        let mut input = Input::new();
        input.apply_move(Vec2::new(10.0, 10.0));
        input.forget_position();
        let event = input.apply_move(Vec2::new(700.0, 500.0));
        assert_eq!(
            event,
            PointerEvent::Moved {
                position: Vec2::new(700.0, 500.0),
                delta: Vec2::ZERO,
            }
        );
        let event = input.apply_move(Vec2::new(702.0, 500.0));
        assert_eq!(
            event,
            PointerEvent::Moved {
                position: Vec2::new(702.0, 500.0),
                delta: Vec2::new(2.0, 0.0),
            }
        );
    }

    #[test]
    fn buttons_track_press_and_release() {
        let mut input = Input::new();
        input.shift = true;
        assert_eq!(
            input.apply_button(MouseButton::Left, true),
            PointerEvent::Pressed {
                button: MouseButton::Left,
                shift: true
            }
        );
        input.shift = false;
        assert_eq!(
            input.apply_button(MouseButton::Right, true),
            PointerEvent::Pressed {
                button: MouseButton::Right,
                shift: false
            }
        );
        assert_eq!(
            input.apply_button(MouseButton::Left, false),
            PointerEvent::Released {
                button: MouseButton::Left
            }
        );
    }
}
