use crate::coords::Vec2;

use super::types::{InputEvent, MouseButton};

/// What happened since the last drawn frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Every event, in arrival order.
    pub events: Vec<InputEvent>,
    /// Releases of held buttons, with the pointer position at release.
    pub releases: Vec<(MouseButton, Vec2)>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.releases.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn push_event(&mut self, ev: InputEvent) {
        self.events.push(ev);
    }

    /// Where `button` was last released this frame.
    pub fn last_release(&self, button: MouseButton) -> Option<Vec2> {
        self.releases.iter().rev().find(|(b, _)| *b == button).map(|(_, pos)| *pos)
    }
}
