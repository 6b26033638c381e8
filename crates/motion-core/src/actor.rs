//! Reference-relative projection of a skeleton.
//!
//! For every limb group and every frame, each chain segment's position along
//! the two projected axes is expressed relative to a reference segment:
//!
//! ```text
//! coord[axis][frame][position] = raw[segment, axis][frame] - raw[reference, axis][frame]
//! ```
//!
//! The whole table is computed once, up front. Construction either produces a
//! complete table or fails; a partially filled table is never exposed.

use std::sync::Arc;

use gaitrig_skeleton_model::{Axis, AxisPair, MotionFrameStore, SkeletonBlueprint};
use ndarray::{Array2, ArrayView1, Zip};

use crate::error::CoreError;
use crate::trace::{TraceExtractor, TraceSet};

/// Projection parameters for an actor.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Axes to project onto, in output order.
    pub axes: AxisPair,

    /// Segment used as the coordinate origin.
    pub reference: String,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            axes: AxisPair::default(),
            reference: "Pelvis".to_string(),
        }
    }
}

impl ProjectionConfig {
    pub fn new(axes: AxisPair, reference: impl Into<String>) -> Self {
        Self {
            axes,
            reference: reference.into(),
        }
    }
}

/// Projected positions of one limb chain.
///
/// `x` and `y` are frame-major: row `f` holds every chain segment at frame `f`,
/// so both arrays have shape `(frames, chain length)`. `x` carries the first
/// projected axis and `y` the second.
#[derive(Debug, Clone, PartialEq)]
pub struct LimbCoordinates {
    pub group: String,
    pub chain: Vec<String>,
    pub x: Array2<f64>,
    pub y: Array2<f64>,
}

impl LimbCoordinates {
    pub fn frame_count(&self) -> usize {
        self.x.nrows()
    }

    /// Chain length.
    pub fn len(&self) -> usize {
        self.x.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Chain as ordered `(x, y)` points at a frame, or `None` past the end.
    pub fn pose(&self, frame: usize) -> Option<Vec<(f64, f64)>> {
        if frame >= self.frame_count() {
            return None;
        }
        Some(
            self.x
                .row(frame)
                .iter()
                .zip(self.y.row(frame).iter())
                .map(|(&x, &y)| (x, y))
                .collect(),
        )
    }

    /// Full trajectory of the chain segment at `position`.
    pub fn column(&self, position: usize) -> Option<(ArrayView1<'_, f64>, ArrayView1<'_, f64>)> {
        if position >= self.len() {
            return None;
        }
        Some((self.x.column(position), self.y.column(position)))
    }
}

/// Projected coordinates for every limb group, in blueprint order.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateTable {
    axes: AxisPair,
    reference: String,
    frame_count: usize,
    limbs: Vec<LimbCoordinates>,
}

impl CoordinateTable {
    /// Project every chain of `blueprint` relative to `reference`.
    ///
    /// Fails with [`CoreError::UnknownSegmentAxis`] on the first missing
    /// `(segment, axis)` series, reference included.
    pub fn build(
        store: &MotionFrameStore,
        blueprint: &SkeletonBlueprint,
        axes: AxisPair,
        reference: &str,
    ) -> Result<Self, CoreError> {
        let frames = store.frame_count();
        let origin = [
            store.series(reference, axes.first)?,
            store.series(reference, axes.second)?,
        ];

        let mut limbs = Vec::with_capacity(blueprint.len());
        for group in blueprint.groups() {
            let x = project_chain(store, &group.chain, axes.first, origin[0], frames)?;
            let y = project_chain(store, &group.chain, axes.second, origin[1], frames)?;
            limbs.push(LimbCoordinates {
                group: group.name.clone(),
                chain: group.chain.clone(),
                x,
                y,
            });
        }

        tracing::debug!(
            groups = limbs.len(),
            frames,
            axes = %axes,
            reference,
            "Built coordinate table"
        );

        Ok(Self {
            axes,
            reference: reference.to_string(),
            frame_count: frames,
            limbs,
        })
    }

    pub fn axes(&self) -> AxisPair {
        self.axes
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Frame count `F` shared by every limb.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Coordinates of one limb group.
    pub fn get(&self, group: &str) -> Option<&LimbCoordinates> {
        self.limbs.iter().find(|limb| limb.group == group)
    }

    pub fn limbs(&self) -> &[LimbCoordinates] {
        &self.limbs
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LimbCoordinates> {
        self.limbs.iter()
    }

    /// Every chain's points at `frame`, or `None` when `frame >= F`.
    pub fn pose(&self, frame: usize) -> Option<Vec<(&str, Vec<(f64, f64)>)>> {
        if frame >= self.frame_count {
            return None;
        }
        self.limbs
            .iter()
            .map(|limb| limb.pose(frame).map(|points| (limb.group.as_str(), points)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a CoordinateTable {
    type Item = &'a LimbCoordinates;
    type IntoIter = std::slice::Iter<'a, LimbCoordinates>;

    fn into_iter(self) -> Self::IntoIter {
        self.limbs.iter()
    }
}

fn project_chain(
    store: &MotionFrameStore,
    chain: &[String],
    axis: Axis,
    origin: &[f64],
    frames: usize,
) -> Result<Array2<f64>, CoreError> {
    let origin = ArrayView1::from(origin);
    let mut plane = Array2::zeros((frames, chain.len()));
    for (position, segment) in chain.iter().enumerate() {
        let samples = ArrayView1::from(store.series(segment, axis)?);
        Zip::from(plane.column_mut(position))
            .and(&samples)
            .and(&origin)
            .for_each(|out, &value, &base| *out = value - base);
    }
    Ok(plane)
}

/// A recording bound to a skeleton, projected once at construction.
///
/// The store and blueprint are shared read-only, so several actors with
/// different references or axes can be built from the same recording.
#[derive(Debug, Clone)]
pub struct Actor {
    store: Arc<MotionFrameStore>,
    blueprint: Arc<SkeletonBlueprint>,
    config: ProjectionConfig,
    coordinates: CoordinateTable,
}

impl Actor {
    /// Bind a recording to a blueprint and compute its coordinate table.
    pub fn new(
        store: Arc<MotionFrameStore>,
        blueprint: Arc<SkeletonBlueprint>,
        config: ProjectionConfig,
    ) -> Result<Self, CoreError> {
        let coordinates =
            CoordinateTable::build(&store, &blueprint, config.axes, &config.reference)?;
        Ok(Self {
            store,
            blueprint,
            config,
            coordinates,
        })
    }

    /// Actor projected onto `(y, z)` relative to the pelvis.
    pub fn with_defaults(
        store: Arc<MotionFrameStore>,
        blueprint: Arc<SkeletonBlueprint>,
    ) -> Result<Self, CoreError> {
        Self::new(store, blueprint, ProjectionConfig::default())
    }

    /// Project this actor's recording with other parameters.
    ///
    /// Returns a fresh table; the actor's own table is left untouched.
    pub fn fill_blueprint(
        &self,
        axes: AxisPair,
        reference: &str,
    ) -> Result<CoordinateTable, CoreError> {
        CoordinateTable::build(&self.store, &self.blueprint, axes, reference)
    }

    /// Resolve segment trajectories from this actor's table.
    pub fn get_trace<S: AsRef<str>>(&self, segments: &[S]) -> Result<TraceSet, CoreError> {
        TraceExtractor::new(&self.coordinates, &self.blueprint).get_trace(segments)
    }

    pub fn coordinates(&self) -> &CoordinateTable {
        &self.coordinates
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<MotionFrameStore> {
        &self.store
    }

    pub fn blueprint(&self) -> &Arc<SkeletonBlueprint> {
        &self.blueprint
    }

    pub fn frame_count(&self) -> usize {
        self.coordinates.frame_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaitrig_skeleton_model::LimbGroup;
    use ndarray::array;

    fn spine_store() -> Arc<MotionFrameStore> {
        Arc::new(
            MotionFrameStore::from_series([
                ("Pelvis x", vec![0.0, 1.0, 2.0]),
                ("Pelvis z", vec![0.0, 0.0, 0.0]),
                ("Neck x", vec![0.0, 1.0, 2.0]),
                ("Neck z", vec![1.0, 1.0, 1.0]),
                ("Head x", vec![0.0, 1.0, 2.0]),
                ("Head z", vec![2.0, 2.0, 2.0]),
            ])
            .unwrap(),
        )
    }

    fn spine_blueprint() -> Arc<SkeletonBlueprint> {
        Arc::new(
            SkeletonBlueprint::new(vec![LimbGroup::new("Spine", ["Pelvis", "Neck", "Head"])])
                .unwrap(),
        )
    }

    fn xz() -> AxisPair {
        AxisPair::new(Axis::X, Axis::Z)
    }

    #[test]
    fn test_spine_scenario() {
        let actor = Actor::new(
            spine_store(),
            spine_blueprint(),
            ProjectionConfig::new(xz(), "Pelvis"),
        )
        .unwrap();

        let spine = actor.coordinates().get("Spine").unwrap();
        assert_eq!(
            spine.x,
            array![[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]]
        );
        assert_eq!(
            spine.y,
            array![[0.0, 1.0, 2.0], [0.0, 1.0, 2.0], [0.0, 1.0, 2.0]]
        );
    }

    #[test]
    fn test_reference_far_from_origin() {
        let store = Arc::new(
            MotionFrameStore::from_series([
                ("Pelvis x", vec![10.0, 11.0]),
                ("Pelvis z", vec![1.0, 1.5]),
                ("Head x", vec![10.5, 11.25]),
                ("Head z", vec![2.75, 3.0]),
            ])
            .unwrap(),
        );
        let blueprint = Arc::new(
            SkeletonBlueprint::new(vec![LimbGroup::new("Spine", ["Pelvis", "Head"])]).unwrap(),
        );
        let actor = Actor::new(store, blueprint, ProjectionConfig::new(xz(), "Pelvis")).unwrap();
        let spine = actor.coordinates().get("Spine").unwrap();

        assert_eq!(spine.x, array![[0.0, 0.5], [0.0, 0.25]]);
        assert_eq!(spine.y, array![[0.0, 1.75], [0.0, 1.5]]);
    }

    #[test]
    fn test_missing_chain_segment_fails_construction() {
        let blueprint = Arc::new(
            SkeletonBlueprint::new(vec![
                LimbGroup::new("Spine", ["Pelvis", "Neck", "Head"]),
                LimbGroup::new("Tail", ["Pelvis", "Tail"]),
            ])
            .unwrap(),
        );
        let err = Actor::new(spine_store(), blueprint, ProjectionConfig::new(xz(), "Pelvis"))
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::UnknownSegmentAxis {
                segment: "Tail".to_string(),
                axis: 'x'
            }
        );
    }

    #[test]
    fn test_missing_axis_fails_construction() {
        let err = Actor::new(
            spine_store(),
            spine_blueprint(),
            ProjectionConfig::new(AxisPair::new(Axis::X, Axis::Y), "Pelvis"),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CoreError::UnknownSegmentAxis {
                segment: "Pelvis".to_string(),
                axis: 'y'
            }
        );
    }

    #[test]
    fn test_missing_reference_fails_construction() {
        let err = Actor::new(
            spine_store(),
            spine_blueprint(),
            ProjectionConfig::new(xz(), "Sternum"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CoreError::UnknownSegmentAxis { ref segment, .. } if segment == "Sternum"
        ));
    }

    #[test]
    fn test_fill_blueprint_with_other_reference() {
        let actor = Actor::new(
            spine_store(),
            spine_blueprint(),
            ProjectionConfig::new(xz(), "Pelvis"),
        )
        .unwrap();

        let from_head = actor.fill_blueprint(xz(), "Head").unwrap();
        let spine = from_head.get("Spine").unwrap();
        assert_eq!(spine.y.row(0).to_vec(), vec![-2.0, -1.0, 0.0]);
        assert_eq!(from_head.reference(), "Head");

        // The actor's own table is unchanged.
        assert_eq!(actor.coordinates().reference(), "Pelvis");
    }

    #[test]
    fn test_pose_and_column_access() {
        let actor = Actor::new(
            spine_store(),
            spine_blueprint(),
            ProjectionConfig::new(xz(), "Pelvis"),
        )
        .unwrap();
        let table = actor.coordinates();

        let pose = table.pose(1).unwrap();
        assert_eq!(pose.len(), 1);
        assert_eq!(pose[0].0, "Spine");
        assert_eq!(pose[0].1, vec![(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)]);
        assert!(table.pose(3).is_none());

        let spine = table.get("Spine").unwrap();
        let (x, y) = spine.column(2).unwrap();
        assert_eq!(x.to_vec(), vec![0.0, 0.0, 0.0]);
        assert_eq!(y.to_vec(), vec![2.0, 2.0, 2.0]);
        assert!(spine.column(3).is_none());
    }

    #[test]
    fn test_axis_order_swaps_dimensions() {
        let blueprint = spine_blueprint();
        let xz_table = CoordinateTable::build(&spine_store(), &blueprint, xz(), "Pelvis").unwrap();
        let zx_table = CoordinateTable::build(
            &spine_store(),
            &blueprint,
            AxisPair::new(Axis::Z, Axis::X),
            "Pelvis",
        )
        .unwrap();

        let a = xz_table.get("Spine").unwrap();
        let b = zx_table.get("Spine").unwrap();
        assert_eq!(a.x, b.y);
        assert_eq!(a.y, b.x);
    }

    #[test]
    fn test_empty_recording_has_zero_rows() {
        let store = MotionFrameStore::from_series([
            ("Pelvis x", Vec::new()),
            ("Pelvis z", Vec::new()),
        ])
        .unwrap();
        let blueprint =
            SkeletonBlueprint::new(vec![LimbGroup::new("Root", ["Pelvis"])]).unwrap();
        let table = CoordinateTable::build(&store, &blueprint, xz(), "Pelvis").unwrap();
        assert_eq!(table.frame_count(), 0);
        assert_eq!(table.get("Root").unwrap().x.dim(), (0, 1));
        assert!(table.pose(0).is_none());
    }
}
