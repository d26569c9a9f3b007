//! Platform runtime: owns the event loop, the window and its GPU surface.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig, RuntimeCtx, WakeEvent, Waker};
