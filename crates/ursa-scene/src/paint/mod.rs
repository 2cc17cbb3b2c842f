//! Paint model shared between shapes and canvas backends.
//!
//! Only solid colors exist; shapes fill and stroke with a single color.

pub mod color;

pub use color::{Color, ColorParseError};
