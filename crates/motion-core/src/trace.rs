//! Single-segment trajectories drawn from a coordinate table.
//!
//! A trace is a view of one chain position, not independent state: it carries
//! whatever reference and axes the table was projected with.

use gaitrig_skeleton_model::SkeletonBlueprint;

use crate::actor::CoordinateTable;
use crate::error::CoreError;

/// Trajectory of one segment across every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub segment: String,
    /// Limb group the segment was resolved in.
    pub group: String,
    /// Position within that group's chain.
    pub position: usize,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Trace {
    pub fn frame_count(&self) -> usize {
        self.x.len()
    }

    /// Point at a frame, or `None` past the end.
    pub fn point(&self, frame: usize) -> Option<(f64, f64)> {
        Some((*self.x.get(frame)?, *self.y.get(frame)?))
    }

    /// Motion trail ending at `frame` (inclusive), at most `max_len` points.
    ///
    /// Frames past the end are clamped to the last recorded frame.
    pub fn trail(&self, frame: usize, max_len: usize) -> Vec<(f64, f64)> {
        let end = frame.saturating_add(1).min(self.frame_count());
        let start = end.saturating_sub(max_len);
        self.x[start..end]
            .iter()
            .zip(&self.y[start..end])
            .map(|(&x, &y)| (x, y))
            .collect()
    }
}

/// Result of a trace query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TraceSet {
    /// Resolved traces, in request order.
    pub traces: Vec<Trace>,
    /// Requested names absent from the blueprint.
    pub unresolved: Vec<String>,
}

impl TraceSet {
    pub fn get(&self, segment: &str) -> Option<&Trace> {
        self.traces.iter().find(|t| t.segment == segment)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trace> {
        self.traces.iter()
    }

    pub fn len(&self) -> usize {
        self.traces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.traces.is_empty()
    }

    /// Whether some requested names could not be resolved.
    pub fn is_partial(&self) -> bool {
        !self.unresolved.is_empty()
    }
}

/// Resolves segment names against a blueprint and slices their trajectories
/// out of a coordinate table built from that blueprint.
pub struct TraceExtractor<'a> {
    table: &'a CoordinateTable,
    blueprint: &'a SkeletonBlueprint,
}

impl<'a> TraceExtractor<'a> {
    pub fn new(table: &'a CoordinateTable, blueprint: &'a SkeletonBlueprint) -> Self {
        Self { table, blueprint }
    }

    /// Extract the trajectory of each named segment.
    ///
    /// A segment listed in several chains resolves to the first group in
    /// blueprint order. Names that do not resolve are reported in
    /// [`TraceSet::unresolved`] and logged as a warning; if none resolve the
    /// query fails with [`CoreError::SegmentNotFound`]. Repeated names are
    /// traced once.
    pub fn get_trace<S: AsRef<str>>(&self, segments: &[S]) -> Result<TraceSet, CoreError> {
        let mut requested: Vec<&str> = Vec::with_capacity(segments.len());
        for name in segments.iter().map(AsRef::as_ref) {
            if !requested.contains(&name) {
                requested.push(name);
            }
        }

        let mut set = TraceSet::default();
        for name in &requested {
            match self.resolve(name) {
                Some(trace) => set.traces.push(trace),
                None => set.unresolved.push(name.to_string()),
            }
        }

        if set.traces.is_empty() && !requested.is_empty() {
            return Err(CoreError::SegmentNotFound {
                segments: set.unresolved,
            });
        }

        if set.is_partial() {
            tracing::warn!(
                unresolved = ?set.unresolved,
                "Some trace segments are not in the blueprint"
            );
        }

        Ok(set)
    }

    fn resolve(&self, segment: &str) -> Option<Trace> {
        let location = self.blueprint.locate(segment)?;
        let group = &self.blueprint.groups()[location.group];
        let limb = self.table.get(&group.name)?;
        let (x, y) = limb.column(location.position)?;
        Some(Trace {
            segment: segment.to_string(),
            group: group.name.clone(),
            position: location.position,
            x: x.to_vec(),
            y: y.to_vec(),
        })
    }
}
