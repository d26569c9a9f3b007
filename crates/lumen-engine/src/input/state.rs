use std::collections::HashSet;

use crate::coords::Vec2;

use super::frame::InputFrame;
use super::types::{InputEvent, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent};

/// Input that persists between frames: pointer, held buttons, modifiers.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    /// Window has keyboard focus.
    pub focused: bool,
    /// Logical pixels. `None` while outside the window.
    pub pointer_pos: Option<Vec2>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Folds `ev` into the held state and appends it to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,
            InputEvent::Key { modifiers, .. } => self.modifiers = *modifiers,
            InputEvent::PointerMoved(p) => self.pointer_pos = Some(*p),
            InputEvent::PointerLeft => self.pointer_pos = None,
            InputEvent::Text(_) => {}

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // A release that happens while unfocused is never seen.
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, pos, modifiers }) => {
                self.pointer_pos = Some(*pos);
                self.modifiers = *modifiers;
                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(*button);
                    }
                    MouseButtonState::Released => {
                        if self.buttons_down.remove(button) {
                            frame.releases.push((*button, *pos));
                        }
                    }
                }
            }
        }

        frame.push_event(ev);
    }

    #[inline]
    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}
