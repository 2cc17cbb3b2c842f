//! GPU device + surface management.
//!
//! The scene is rasterized on the CPU; the GPU side only needs a surface,
//! a device and a queue to upload and present finished frames.

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
