//! Gaitrig Motion Core — the coordinate engine
//!
//! Turns raw segment trajectories into skeleton-relative 2D projections:
//! - **Actor:** projects every limb chain onto two axes relative to a reference segment
//! - **Traces:** pulls single-segment trajectories out of a projection
//! - **Playback:** walks a projection frame by frame for an external renderer
//!
//! This crate is pure computation — no I/O, no rendering.
//! All inputs are data; all outputs are data.

pub mod actor;
pub mod error;
pub mod export;
pub mod playback;
pub mod trace;

pub use actor::{Actor, CoordinateTable, LimbCoordinates, ProjectionConfig};
pub use error::CoreError;
pub use trace::{Trace, TraceExtractor, TraceSet};
