//! Gaitrig Skeleton Model
//!
//! Defines the data contracts the coordinate engine works on:
//! - **Axis:** the three spatial axes and the pair chosen for a 2D projection
//! - **Blueprint:** named limb groups, each an ordered chain of segment names
//! - **Frame store:** one numeric series per `"<Segment> <axis>"` column
//!
//! Everything here is immutable once constructed and safe to share across
//! threads behind an `Arc`.

pub mod axis;
pub mod blueprint;
pub mod error;
pub mod frame_store;

pub use axis::*;
pub use blueprint::*;
pub use error::*;
pub use frame_store::*;
