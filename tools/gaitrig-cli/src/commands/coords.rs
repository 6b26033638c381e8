//! Export the coordinate table.

use std::path::PathBuf;

use gaitrig_common::AppConfig;
use gaitrig_motion_core::export::CoordinateTableExport;

use super::{build_actor, write_json, ProjectionArgs, SourceArgs};

pub fn run(
    config: &AppConfig,
    source: SourceArgs,
    projection: ProjectionArgs,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let actor = build_actor(config, &source, &projection)?;
    let export = CoordinateTableExport::from(actor.coordinates());
    write_json(&export, output.as_deref())
}
