//! Frame timing.
//!
//! The scene advances a fixed step per frame; the clock here only measures
//! real frame times for diagnostics.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
