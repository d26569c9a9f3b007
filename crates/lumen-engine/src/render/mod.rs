//! GPU rendering.
//!
//! [`Renderer`] replays a `DrawList` in recorded order inside a single render
//! pass, switching between the shape and text pipelines as the command kind
//! changes. Clip regions are evaluated per fragment, so rounded clips cost
//! nothing extra on the CPU.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Vertex shaders convert to NDC using a viewport uniform.

mod batch;
mod common;
mod ctx;
mod renderer;
mod shape;
mod text;

pub use batch::{plan_batches, Batch, BatchKind};
pub use ctx::{RenderCtx, RenderTarget};
pub use renderer::Renderer;
pub use shape::ShapeRenderer;
pub use text::TextRenderer;
