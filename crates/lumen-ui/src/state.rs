use std::collections::VecDeque;

use lumen_engine::coords::{Rect, Vec2};
use lumen_engine::input::{InputEvent, InputFrame, InputState, KeyState, MouseButton};

use crate::geometry::point_in_rect;

/// One key reported to widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySymbol {
    /// A single typed character.
    Char(char),
    Backspace,
    /// Any other named key (`"Enter"`, `"ArrowLeft"`). Text inputs ignore these.
    Named(String),
}

impl KeySymbol {
    /// Classifies a DOM-style key string. Empty strings map to `None`.
    pub fn from_symbol(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (None, _) => None,
            (Some(c), None) => Some(KeySymbol::Char(c)),
            _ if s == "Backspace" => Some(KeySymbol::Backspace),
            _ => Some(KeySymbol::Named(s.to_string())),
        }
    }
}

/// Interaction facts for one frame, plus the focus slot that outlives it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// Logical pixels. `None` while the pointer is outside the surface.
    pub pointer: Option<Vec2>,
    pub mouse_down: bool,
    /// Primary button was released this frame. True for exactly one frame.
    pub clicked: bool,
    /// At most one key per frame.
    pub key: Option<KeySymbol>,
    pub ctrl: bool,
    pub shift: bool,
    /// Id of the text input holding keyboard focus.
    pub focused_id: Option<String>,
}

impl UiState {
    /// Drops the per-frame facts. `focused_id` and the pointer are kept.
    pub fn begin_frame(&mut self) {
        self.clicked = false;
        self.key = None;
    }

    /// Refreshes the per-frame facts from engine input.
    ///
    /// On a click the pointer is taken from the release event, so hit tests
    /// see where the button came up.
    pub fn sample(&mut self, input: &InputState, frame: &InputFrame, key: Option<KeySymbol>) {
        self.begin_frame();

        self.pointer = input.pointer_pos;
        self.mouse_down = input.button_down(MouseButton::Left);
        self.ctrl = input.modifiers.ctrl;
        self.shift = input.modifiers.shift;
        self.key = key;

        if let Some(pos) = frame.last_release(MouseButton::Left) {
            self.clicked = true;
            self.pointer = Some(pos);
        }
    }

    #[inline]
    pub fn hovers(&self, rect: Rect) -> bool {
        self.pointer.is_some_and(|p| point_in_rect(p, rect))
    }

    #[inline]
    pub fn is_focused(&self, id: &str) -> bool {
        self.focused_id.as_deref() == Some(id)
    }
}

/// Keys waiting to be delivered, one per frame.
///
/// Several keys can land between two frames; widgets see one `key` per frame,
/// so the rest wait here and the host asks for another frame.
#[derive(Debug, Default)]
pub struct KeyQueue {
    pending: VecDeque<KeySymbol>,
}

impl KeyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues key presses and typed text from `frame`, in arrival order.
    ///
    /// Character keys are taken from text events; their key events only
    /// count when the key has a name (`Backspace`, arrows, `Enter`).
    pub fn extend_from_frame(&mut self, frame: &InputFrame) {
        for ev in &frame.events {
            match ev {
                InputEvent::Key { key, state: KeyState::Pressed, .. } => {
                    if let Some(sym) = key.name().and_then(KeySymbol::from_symbol) {
                        self.pending.push_back(sym);
                    }
                }
                InputEvent::Text(t) => {
                    self.pending.extend(t.text.chars().map(KeySymbol::Char));
                }
                _ => {}
            }
        }
    }

    pub fn push(&mut self, sym: KeySymbol) {
        self.pending.push_back(sym);
    }

    pub fn pop(&mut self) -> Option<KeySymbol> {
        self.pending.pop_front()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_engine::input::{Key, Modifiers, MouseButtonState, PointerButtonEvent, TextEvent};

    fn key_press(key: Key) -> InputEvent {
        InputEvent::Key { key, state: KeyState::Pressed, modifiers: Modifiers::default(), repeat: false }
    }

    fn text(s: &str) -> InputEvent {
        InputEvent::Text(TextEvent { text: s.to_string() })
    }

    fn feed(events: Vec<InputEvent>) -> (InputState, InputFrame) {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        for ev in events {
            state.apply_event(&mut frame, ev);
        }
        (state, frame)
    }

    fn left(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            pos: Vec2::new(x, y),
            modifiers: Modifiers::default(),
        })
    }

    // ── KeySymbol ─────────────────────────────────────────────────────────

    #[test]
    fn symbol_classification() {
        assert_eq!(KeySymbol::from_symbol("a"), Some(KeySymbol::Char('a')));
        assert_eq!(KeySymbol::from_symbol("é"), Some(KeySymbol::Char('é')));
        assert_eq!(KeySymbol::from_symbol("Backspace"), Some(KeySymbol::Backspace));
        assert_eq!(KeySymbol::from_symbol("ArrowLeft"), Some(KeySymbol::Named("ArrowLeft".into())));
        assert_eq!(KeySymbol::from_symbol(""), None);
    }

    // ── UiState ───────────────────────────────────────────────────────────

    #[test]
    fn begin_frame_keeps_focus() {
        let mut s = UiState {
            clicked: true,
            key: Some(KeySymbol::Char('x')),
            focused_id: Some("bmi".into()),
            ..Default::default()
        };
        s.begin_frame();
        assert!(!s.clicked);
        assert_eq!(s.key, None);
        assert_eq!(s.focused_id.as_deref(), Some("bmi"));
    }

    #[test]
    fn release_sets_clicked_at_release_position() {
        let (input, frame) = feed(vec![
            InputEvent::PointerMoved(Vec2::new(5.0, 5.0)),
            left(MouseButtonState::Pressed, 5.0, 5.0),
            left(MouseButtonState::Released, 40.0, 12.0),
        ]);
        let mut s = UiState::default();
        s.sample(&input, &frame, None);
        assert!(s.clicked);
        assert_eq!(s.pointer, Some(Vec2::new(40.0, 12.0)));
    }

    #[test]
    fn press_alone_is_not_a_click() {
        let (input, frame) = feed(vec![left(MouseButtonState::Pressed, 5.0, 5.0)]);
        let mut s = UiState::default();
        s.sample(&input, &frame, None);
        assert!(!s.clicked);
        assert!(s.mouse_down);
    }

    #[test]
    fn next_sample_clears_click() {
        let (input, frame) = feed(vec![
            left(MouseButtonState::Pressed, 5.0, 5.0),
            left(MouseButtonState::Released, 5.0, 5.0),
        ]);
        let mut s = UiState::default();
        s.sample(&input, &frame, None);
        assert!(s.clicked);
        s.sample(&input, &InputFrame::default(), None);
        assert!(!s.clicked);
    }

    #[test]
    fn hovers_requires_pointer() {
        let s = UiState::default();
        assert!(!s.hovers(Rect::new(-10.0, -10.0, 100.0, 100.0)));
    }

    // ── KeyQueue ──────────────────────────────────────────────────────────

    #[test]
    fn queue_orders_text_and_named_keys() {
        let (_, frame) = feed(vec![
            key_press(Key::Character),
            text("1"),
            key_press(Key::Backspace),
            key_press(Key::ArrowLeft),
            text("ab"),
        ]);
        let mut q = KeyQueue::new();
        q.extend_from_frame(&frame);
        assert_eq!(q.len(), 5);
        assert_eq!(q.pop(), Some(KeySymbol::Char('1')));
        assert_eq!(q.pop(), Some(KeySymbol::Backspace));
        assert_eq!(q.pop(), Some(KeySymbol::Named("ArrowLeft".into())));
        assert_eq!(q.pop(), Some(KeySymbol::Char('a')));
        assert_eq!(q.pop(), Some(KeySymbol::Char('b')));
        assert!(q.is_empty());
    }

    #[test]
    fn queue_ignores_releases_and_modifiers() {
        let (_, frame) = feed(vec![
            key_press(Key::Modifier),
            InputEvent::Key {
                key: Key::Backspace,
                state: KeyState::Released,
                modifiers: Modifiers::default(),
                repeat: false,
            },
        ]);
        let mut q = KeyQueue::new();
        q.extend_from_frame(&frame);
        assert!(q.is_empty());
    }
}
