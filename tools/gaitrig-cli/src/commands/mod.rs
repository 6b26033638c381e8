//! Subcommand implementations and the loading glue they share.

pub mod check;
pub mod config;
pub mod coords;
pub mod frames;
pub mod info;
pub mod locate;
pub mod trace;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use gaitrig_common::AppConfig;
use gaitrig_motion_core::{Actor, ProjectionConfig};
use gaitrig_skeleton_model::{AxisPair, MotionFrameStore, RawTable, SkeletonBlueprint};
use serde::Serialize;

/// Where a recording comes from and how to read it.
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Segment position export (tab- or comma-delimited text)
    pub path: PathBuf,

    /// Column delimiter (defaults to config, tab unless the file ends in .csv)
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Leading rows after the header to drop before samples
    #[arg(long)]
    pub skip_rows: Option<usize>,

    /// Blueprint JSON file (defaults to the human skeleton)
    #[arg(long)]
    pub blueprint: Option<PathBuf>,
}

/// How to project the recording.
#[derive(Args, Debug)]
pub struct ProjectionArgs {
    /// Projection axes, e.g. "xz" (first is horizontal)
    #[arg(long)]
    pub axes: Option<String>,

    /// Reference segment used as the origin
    #[arg(long)]
    pub reference: Option<String>,
}

impl SourceArgs {
    fn delimiter(&self, config: &AppConfig) -> char {
        if let Some(d) = self.delimiter {
            return d;
        }
        match self.path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => ',',
            _ => config.loader.delimiter,
        }
    }

    /// Read and normalize the recording.
    pub fn load_store(&self, config: &AppConfig) -> anyhow::Result<Arc<MotionFrameStore>> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", self.path.display()))?;

        let table = RawTable::parse_delimited(&content, self.delimiter(config))
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {e}", self.path.display()))?;

        let skip_rows = self.skip_rows.unwrap_or(config.loader.skip_rows);
        let store = MotionFrameStore::from_table(&table, skip_rows)
            .map_err(|e| anyhow::anyhow!("Invalid recording {}: {e}", self.path.display()))?;

        tracing::info!(
            path = %self.path.display(),
            frames = store.frame_count(),
            columns = store.columns().len(),
            "Loaded recording"
        );
        Ok(Arc::new(store))
    }

    pub fn load_blueprint(&self) -> anyhow::Result<Arc<SkeletonBlueprint>> {
        load_blueprint(self.blueprint.as_deref()).map(Arc::new)
    }
}

impl ProjectionArgs {
    pub fn resolve(&self, config: &AppConfig) -> anyhow::Result<ProjectionConfig> {
        let axes_str = self.axes.as_deref().unwrap_or(&config.projection.axes);
        let axes: AxisPair = axes_str
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid --axes: {e}"))?;
        let reference = self
            .reference
            .clone()
            .unwrap_or_else(|| config.projection.reference.clone());
        Ok(ProjectionConfig::new(axes, reference))
    }
}

fn load_blueprint(path: Option<&Path>) -> anyhow::Result<SkeletonBlueprint> {
    let Some(path) = path else {
        return Ok(SkeletonBlueprint::human());
    };
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read blueprint {}: {e}", path.display()))?;
    SkeletonBlueprint::from_json(&content)
        .map_err(|e| anyhow::anyhow!("Invalid blueprint {}: {e}", path.display()))
}

/// Load a recording and project it in one step.
pub fn build_actor(
    config: &AppConfig,
    source: &SourceArgs,
    projection: &ProjectionArgs,
) -> anyhow::Result<Actor> {
    let store = source.load_store(config)?;
    let blueprint = source.load_blueprint()?;
    let projection = projection.resolve(config)?;

    let actor = Actor::new(store, blueprint, projection)
        .map_err(|e| anyhow::anyhow!("Failed to project recording: {e}"))?;
    tracing::info!(
        axes = %actor.config().axes,
        reference = %actor.config().reference,
        groups = actor.coordinates().limbs().len(),
        "Projected recording"
    );
    Ok(actor)
}

/// Write pretty JSON to a file, or to stdout when no path is given.
pub fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", path.display()))?;
            tracing::info!(path = %path.display(), "Wrote export");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}
