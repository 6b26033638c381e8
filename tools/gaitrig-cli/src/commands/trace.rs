//! Export segment trajectories.

use std::path::PathBuf;

use gaitrig_common::AppConfig;
use gaitrig_motion_core::export::TraceExport;

use super::{build_actor, write_json, ProjectionArgs, SourceArgs};

pub fn run(
    config: &AppConfig,
    source: SourceArgs,
    segments: Vec<String>,
    projection: ProjectionArgs,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let actor = build_actor(config, &source, &projection)?;
    let traces = actor
        .get_trace(segments.as_slice())
        .map_err(|e| anyhow::anyhow!("Trace failed: {e}"))?;

    if traces.is_partial() {
        eprintln!(
            "warning: not in blueprint, skipped: {}",
            traces.unresolved.join(", ")
        );
    }

    write_json(&TraceExport::new(actor.coordinates(), &traces), output.as_deref())
}
