//! Frame timing for fixed-rate motion recordings.
//!
//! Every series in a recording is sampled at one constant rate, so a frame
//! index is the only clock the engine needs. This module converts between
//! frame indices and seconds for reporting and for time-window selection.

use serde::{Deserialize, Serialize};

/// Constant sampling rate of a recording, in frames per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameRate {
    hz: f64,
}

impl FrameRate {
    /// Create a frame rate. Non-finite or non-positive rates fall back to 1 Hz.
    pub fn new(hz: f64) -> Self {
        let hz = if hz.is_finite() && hz > 0.0 { hz } else { 1.0 };
        Self { hz }
    }

    /// Sampling rate in Hz.
    pub fn hz(&self) -> f64 {
        self.hz
    }

    /// Time of a frame in seconds since the first frame.
    pub fn frame_to_secs(&self, frame: usize) -> f64 {
        frame as f64 / self.hz
    }

    /// Index of the frame sampled at or just before `secs`.
    pub fn secs_to_frame(&self, secs: f64) -> usize {
        if !secs.is_finite() || secs <= 0.0 {
            return 0;
        }
        (secs * self.hz).floor() as usize
    }

    /// Duration covered by `frame_count` frames.
    pub fn duration_secs(&self, frame_count: usize) -> f64 {
        frame_count as f64 / self.hz
    }

    /// Frame range `[start, start + length)` beginning at `from_secs`.
    ///
    /// The end is not clamped; playback clamps it to the recording.
    pub fn span(&self, from_secs: f64, length: usize) -> (usize, usize) {
        let start = self.secs_to_frame(from_secs);
        (start, start.saturating_add(length))
    }

    /// Frame range `[start, end)` covering a time window, clamped to `frame_count`.
    pub fn window(&self, from_secs: f64, to_secs: f64, frame_count: usize) -> (usize, usize) {
        let start = self.secs_to_frame(from_secs).min(frame_count);
        let end = if to_secs.is_finite() {
            self.secs_to_frame(to_secs).min(frame_count)
        } else {
            frame_count
        };
        (start, end.max(start))
    }
}

impl Default for FrameRate {
    fn default() -> Self {
        Self::new(60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_secs_conversion() {
        let rate = FrameRate::new(60.0);
        assert!((rate.frame_to_secs(30) - 0.5).abs() < 1e-12);
        assert_eq!(rate.secs_to_frame(0.5), 30);
        assert_eq!(rate.secs_to_frame(-1.0), 0);
        assert!((rate.duration_secs(120) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_rate_falls_back() {
        assert_eq!(FrameRate::new(0.0).hz(), 1.0);
        assert_eq!(FrameRate::new(f64::NAN).hz(), 1.0);
    }

    #[test]
    fn test_span_counts_from_start() {
        let rate = FrameRate::new(60.0);
        assert_eq!(rate.span(0.1, 3), (6, 9));
        assert_eq!(rate.span(0.05, 4), (3, 7));
        assert_eq!(rate.span(0.0, 2000), (0, 2000));
        assert_eq!(rate.span(1.0, usize::MAX), (60, usize::MAX));
    }

    #[test]
    fn test_window_clamps_to_frame_count() {
        let rate = FrameRate::new(10.0);
        assert_eq!(rate.window(0.5, 2.0, 100), (5, 20));
        assert_eq!(rate.window(5.0, 20.0, 30), (30, 30));
        assert_eq!(rate.window(1.0, f64::INFINITY, 30), (10, 30));
        assert_eq!(rate.window(2.0, 1.0, 30), (20, 20));
    }
}
