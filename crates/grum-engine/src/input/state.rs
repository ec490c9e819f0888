use std::collections::HashSet;

use super::types::{
    InputEvent, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
};

/// Current input state for a single window.
///
/// Holds "is down" information and current pointer position.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in physical pixels; `None` while the pointer is
    /// outside the window.
    pub pointer_pos: Option<(f32, f32)>,

    /// Set of currently held mouse buttons.
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // Conservative behavior: on focus loss, clear the "down"
                    // set. Avoids stuck buttons when focus changes mid-press.
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((x, y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::PointerButton(PointerButtonEvent {
                button,
                state,
                x,
                y,
            }) => {
                self.pointer_pos = Some((x, y));

                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(button);
                    }
                    MouseButtonState::Released => {
                        self.buttons_down.remove(&button);
                    }
                }
            }
        }
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state: MouseButtonState::Pressed,
            x,
            y,
        })
    }

    fn release(button: MouseButton, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button,
            state: MouseButtonState::Released,
            x,
            y,
        })
    }

    #[test]
    fn pointer_position_tracks_moves_and_leaves() {
        let mut s = InputState::default();

        s.apply_event(InputEvent::PointerMoved(PointerMoveEvent { x: 10.0, y: 20.0 }));
        assert_eq!(s.pointer_pos, Some((10.0, 20.0)));

        s.apply_event(InputEvent::PointerLeft);
        assert_eq!(s.pointer_pos, None);
    }

    #[test]
    fn button_press_and_release_round_trip() {
        let mut s = InputState::default();

        s.apply_event(press(MouseButton::Left, 5.0, 5.0));
        assert!(s.button_down(MouseButton::Left));
        assert!(!s.button_down(MouseButton::Right));

        s.apply_event(release(MouseButton::Left, 5.0, 5.0));
        assert!(!s.button_down(MouseButton::Left));
    }

    #[test]
    fn button_event_updates_pointer_position() {
        let mut s = InputState::default();
        s.apply_event(press(MouseButton::Left, 33.0, 44.0));
        assert_eq!(s.pointer_pos, Some((33.0, 44.0)));
    }

    #[test]
    fn focus_loss_clears_held_buttons() {
        let mut s = InputState::default();
        s.apply_event(InputEvent::Focused(true));
        s.apply_event(press(MouseButton::Left, 0.0, 0.0));
        assert!(s.button_down(MouseButton::Left));

        s.apply_event(InputEvent::Focused(false));
        assert!(!s.focused);
        assert!(!s.button_down(MouseButton::Left));
    }
}
