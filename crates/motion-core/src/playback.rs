//! Frame-by-frame walk over a coordinate table.
//!
//! A renderer pulls one frame at a time: the pose of every chain plus the
//! trail of each traced segment up to that frame. The table is already fully
//! computed; playback only slices it.

use gaitrig_common::FrameRate;
use serde::{Deserialize, Serialize};

use crate::actor::CoordinateTable;
use crate::trace::{Trace, TraceSet};

/// Points of one chain at one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimbPose {
    pub group: String,
    pub points: Vec<[f64; 2]>,
}

/// Trail of one traced segment at one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trail {
    pub segment: String,
    pub points: Vec<[f64; 2]>,
}

/// Everything a renderer needs to draw frame `frame`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub frame: usize,
    pub time_secs: f64,
    pub pose: Vec<LimbPose>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trails: Vec<Trail>,
}

/// Iterator over frames `0..min(length, F)`.
///
/// Requesting more frames than the recording holds is clamped at the table
/// boundary and logged; frames past `F` are never produced.
pub struct Playback<'a> {
    table: &'a CoordinateTable,
    trails: Vec<&'a Trace>,
    trace_len: usize,
    rate: FrameRate,
    next: usize,
    end: usize,
}

impl<'a> Playback<'a> {
    pub fn new(table: &'a CoordinateTable, length: usize) -> Self {
        let frames = table.frame_count();
        if length > frames {
            tracing::warn!(
                requested = length,
                available = frames,
                "Playback length exceeds recording; clamping"
            );
        }
        Self {
            table,
            trails: Vec::new(),
            trace_len: 0,
            rate: FrameRate::default(),
            next: 0,
            end: length.min(frames),
        }
    }

    /// Attach motion trails of at most `trace_len` points per frame.
    pub fn with_trails(mut self, traces: &'a TraceSet, trace_len: usize) -> Self {
        self.trails = traces.iter().collect();
        self.trace_len = trace_len;
        self
    }

    pub fn with_frame_rate(mut self, rate: FrameRate) -> Self {
        self.rate = rate;
        self
    }

    /// Start at `frame` instead of 0.
    pub fn starting_at(mut self, frame: usize) -> Self {
        self.next = frame.min(self.end);
        self
    }

    /// Frame at which playback stops (exclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    fn record(&self, frame: usize) -> Option<FrameRecord> {
        let pose = self
            .table
            .pose(frame)?
            .into_iter()
            .map(|(group, points)| LimbPose {
                group: group.to_string(),
                points: points.into_iter().map(|(x, y)| [x, y]).collect(),
            })
            .collect();

        let trails = self
            .trails
            .iter()
            .map(|trace| Trail {
                segment: trace.segment.clone(),
                points: trace
                    .trail(frame, self.trace_len)
                    .into_iter()
                    .map(|(x, y)| [x, y])
                    .collect(),
            })
            .collect();

        Some(FrameRecord {
            frame,
            time_secs: self.rate.frame_to_secs(frame),
            pose,
            trails,
        })
    }
}

impl Iterator for Playback<'_> {
    type Item = FrameRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let frame = self.next;
        self.next += 1;
        self.record(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Playback<'_> {}
