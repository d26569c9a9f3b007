//! Platform-free input.
//!
//! [`InputState`] is what is held right now; [`InputFrame`] is what happened
//! since the last frame. winit events are translated in `platform::winit`.

mod frame;
mod state;
mod types;

pub(crate) mod platform;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent,
    TextEvent,
};
