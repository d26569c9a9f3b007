//! Lumen engine crate.
//!
//! Owns the platform + GPU runtime and the CPU-side draw stream that the
//! immediate-mode UI layer paints into every frame.

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
pub mod scene;
pub mod text;
