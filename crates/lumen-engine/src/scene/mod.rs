//! Scene (draw stream) types.
//!
//! The `DrawList` is the drawing surface widgets paint onto. Commands are
//! recorded in call order and painted back-to-front in that same order.
//! Shape-specific payloads and push helpers live under `scene::shapes`.

mod clip;
mod cmd;
mod list;

pub mod shapes;

pub use clip::ClipRegion;
pub use cmd::DrawCmd;
pub use list::{DrawItem, DrawList};
pub use shapes::Stroke;
pub use shapes::rect::RectCmd;
pub use shapes::rounded_rect::RoundedRectCmd;
pub use shapes::text::TextCmd;
