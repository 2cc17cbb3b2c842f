//! Rendering subsystem.
//!
//! The scene is rasterized on the CPU into [`PixmapCanvas`]es; a
//! [`PixmapPresenter`] uploads the finished frame and draws it as one
//! textured quad.
//!
//! Convention:
//! - canvas coordinates are device pixels after the canvas transform
//!   (top-left origin, +Y down)
//! - the presenter centres the pixmap on the surface, pixel for pixel

mod ctx;
mod present;
mod raster;

pub use ctx::{RenderCtx, RenderTarget};
pub use present::PixmapPresenter;
pub use raster::PixmapCanvas;
