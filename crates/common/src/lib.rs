//! Gaitrig Common Utilities
//!
//! Shared infrastructure for all gaitrig crates:
//! - Error types and result aliases
//! - Frame-rate utilities for fixed-rate motion recordings
//! - Tracing/logging initialization
//! - Configuration loading

pub mod config;
pub mod error;
pub mod frames;
pub mod logging;

pub use config::*;
pub use error::*;
pub use frames::*;
