use winit::event::WindowEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract.
///
/// Frames are drawn on demand: after input, after a [`Waker`](crate::window::Waker)
/// fires, or when the previous frame called [`FrameCtx::request_redraw`].
pub trait App {
    /// Raw window events, before the runtime handles them.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Draws one frame.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// A `Waker` fired. Return `true` to draw a frame.
    fn on_wake(&mut self) -> bool {
        true
    }
}
