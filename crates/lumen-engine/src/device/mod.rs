//! GPU device + surface management.
//!
//! Creates the wgpu Adapter/Device/Queue, configures the window surface, and
//! hands out one encoder + view per drawn frame.

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
