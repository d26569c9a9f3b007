//! winit → [`InputEvent`] translation.

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, Ime, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{Key as WinitKey, ModifiersState, NamedKey};
use winit::window::Window;

use crate::coords::Vec2;
use crate::input::{
    InputEvent, InputState, Key, KeyState, Modifiers, MouseButton, MouseButtonState,
    PointerButtonEvent, TextEvent,
};

/// Appends the input events carried by `event` to `out`.
///
/// A key that types yields a `Key` event and then a `Text` event.
pub(crate) fn translate_window_event(
    window: &Window,
    state: &InputState,
    event: &WindowEvent,
    out: &mut Vec<InputEvent>,
) {
    match event {
        WindowEvent::ModifiersChanged(m) => {
            out.push(InputEvent::ModifiersChanged(map_modifiers(m.state())));
        }
        WindowEvent::Focused(f) => out.push(InputEvent::Focused(*f)),
        WindowEvent::CursorLeft { .. } => out.push(InputEvent::PointerLeft),
        WindowEvent::CursorMoved { position, .. } => {
            out.push(InputEvent::PointerMoved(to_logical(window, *position)));
        }

        WindowEvent::MouseInput { state: st, button, .. } => {
            // MouseInput has no position; use the last CursorMoved.
            let Some(pos) = state.pointer_pos else {
                return;
            };
            out.push(InputEvent::PointerButton(PointerButtonEvent {
                button: map_mouse_button(*button),
                state: match st {
                    ElementState::Pressed => MouseButtonState::Pressed,
                    ElementState::Released => MouseButtonState::Released,
                },
                pos,
                modifiers: state.modifiers,
            }));
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let pressed = event.state == ElementState::Pressed;
            out.push(InputEvent::Key {
                key: map_key(&event.logical_key),
                state: if pressed { KeyState::Pressed } else { KeyState::Released },
                modifiers: state.modifiers,
                repeat: event.repeat,
            });
            if let Some(text) = event.text.as_deref().filter(|_| pressed).and_then(printable) {
                out.push(InputEvent::Text(TextEvent { text }));
            }
        }

        WindowEvent::Ime(Ime::Commit(text)) => {
            if let Some(text) = printable(text) {
                out.push(InputEvent::Text(TextEvent { text }));
            }
        }

        _ => {}
    }
}

/// Strips control characters; Backspace types "\u{8}" and Enter "\r".
fn printable(text: &str) -> Option<String> {
    let s: String = text.chars().filter(|c| !c.is_control()).collect();
    (!s.is_empty()).then_some(s)
}

fn to_logical(window: &Window, pos: PhysicalPosition<f64>) -> Vec2 {
    let logical = pos.to_logical::<f64>(window.scale_factor());
    Vec2::new(logical.x as f32, logical.y as f32)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        _ => MouseButton::Other,
    }
}

fn map_key(key: &WinitKey) -> Key {
    let named = match key {
        WinitKey::Character(_) => return Key::Character,
        WinitKey::Named(named) => named,
        _ => return Key::Other,
    };
    match named {
        NamedKey::Escape => Key::Escape,
        NamedKey::Enter => Key::Enter,
        NamedKey::Tab => Key::Tab,
        NamedKey::Backspace => Key::Backspace,
        NamedKey::Delete => Key::Delete,
        NamedKey::Home => Key::Home,
        NamedKey::End => Key::End,
        NamedKey::ArrowUp => Key::ArrowUp,
        NamedKey::ArrowDown => Key::ArrowDown,
        NamedKey::ArrowLeft => Key::ArrowLeft,
        NamedKey::ArrowRight => Key::ArrowRight,
        NamedKey::Space => Key::Character,
        NamedKey::Shift | NamedKey::Control | NamedKey::Alt | NamedKey::Super | NamedKey::Meta => {
            Key::Modifier
        }
        _ => Key::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_strips_control_chars() {
        assert_eq!(printable("\u{8}"), None);
        assert_eq!(printable("\r"), None);
        assert_eq!(printable("a"), Some("a".to_string()));
        assert_eq!(printable("é"), Some("é".to_string()));
    }

    #[test]
    fn logical_keys() {
        assert_eq!(map_key(&WinitKey::Character("7".into())), Key::Character);
        assert_eq!(map_key(&WinitKey::Named(NamedKey::Space)), Key::Character);
        assert_eq!(map_key(&WinitKey::Named(NamedKey::Backspace)), Key::Backspace);
        assert_eq!(map_key(&WinitKey::Named(NamedKey::Shift)), Key::Modifier);
        assert_eq!(map_key(&WinitKey::Named(NamedKey::F5)), Key::Other);
    }
}
