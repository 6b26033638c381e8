use gaitrig_motion_core::{CoordinateTable, TraceExtractor};
use gaitrig_skeleton_model::{Axis, AxisPair, LimbGroup, MotionFrameStore, SkeletonBlueprint};
use proptest::prelude::*;

/// A recording of `chain_len` segments named `S0..Sn` with x/z samples,
/// plus the index of the segment used as reference.
fn recording() -> impl Strategy<Value = (MotionFrameStore, SkeletonBlueprint, usize)> {
    (1usize..6, 0usize..24).prop_flat_map(|(chain_len, frames)| {
        let samples = prop::collection::vec(
            prop::collection::vec(-100.0f64..100.0, frames),
            chain_len * 2,
        );
        (samples, 0..chain_len).prop_map(move |(samples, reference)| {
            let mut series = Vec::with_capacity(chain_len * 2);
            let mut it = samples.into_iter();
            for s in 0..chain_len {
                series.push((format!("S{s} x"), it.next().unwrap()));
                series.push((format!("S{s} z"), it.next().unwrap()));
            }
            let store = MotionFrameStore::from_series(series).unwrap();

            // Two groups sharing S0 so the first-match rule is exercised.
            let chain: Vec<String> = (0..chain_len).map(|s| format!("S{s}")).collect();
            let mut tail = vec!["S0".to_string()];
            tail.extend(chain.iter().rev().cloned());
            let blueprint = SkeletonBlueprint::new(vec![
                LimbGroup::new("Main", chain),
                LimbGroup::new("Mirror", tail),
            ])
            .unwrap();

            (store, blueprint, reference)
        })
    })
}

fn xz() -> AxisPair {
    AxisPair::new(Axis::X, Axis::Z)
}

proptest! {
    #[test]
    fn reference_is_always_origin((store, blueprint, reference) in recording()) {
        let name = format!("S{reference}");
        let table = CoordinateTable::build(&store, &blueprint, xz(), &name).unwrap();
        for limb in &table {
            for (position, segment) in limb.chain.iter().enumerate() {
                if *segment == name {
                    let (x, y) = limb.column(position).unwrap();
                    prop_assert!(x.iter().all(|&v| v == 0.0));
                    prop_assert!(y.iter().all(|&v| v == 0.0));
                }
            }
        }
    }

    #[test]
    fn shape_is_frames_by_chain((store, blueprint, reference) in recording()) {
        let table =
            CoordinateTable::build(&store, &blueprint, xz(), &format!("S{reference}")).unwrap();
        for group in blueprint.groups() {
            let limb = table.get(&group.name).unwrap();
            let expected = (store.frame_count(), group.chain.len());
            prop_assert_eq!(limb.x.dim(), expected);
            prop_assert_eq!(limb.y.dim(), expected);
        }
    }

    #[test]
    fn build_is_deterministic((store, blueprint, reference) in recording()) {
        let name = format!("S{reference}");
        let a = CoordinateTable::build(&store, &blueprint, xz(), &name).unwrap();
        let b = CoordinateTable::build(&store, &blueprint, xz(), &name).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn traces_equal_first_group_columns((store, blueprint, reference) in recording()) {
        let table =
            CoordinateTable::build(&store, &blueprint, xz(), &format!("S{reference}")).unwrap();
        let main = table.get("Main").unwrap();
        let segments = blueprint.segments();
        let traces = TraceExtractor::new(&table, &blueprint)
            .get_trace(segments.as_slice())
            .unwrap();

        // Every segment lives in "Main", which precedes "Mirror".
        for (position, segment) in main.chain.iter().enumerate() {
            let trace = traces.get(segment).unwrap();
            prop_assert_eq!(&trace.group, "Main");
            prop_assert_eq!(&trace.x, &main.x.column(position).to_vec());
            prop_assert_eq!(&trace.y, &main.y.column(position).to_vec());
        }
    }
}
