//! Check blueprint coverage of a recording.

use gaitrig_common::AppConfig;

use super::{ProjectionArgs, SourceArgs};

pub fn run(
    config: &AppConfig,
    source: SourceArgs,
    projection: ProjectionArgs,
) -> anyhow::Result<()> {
    let store = source.load_store(config)?;
    let blueprint = source.load_blueprint()?;
    let projection = projection.resolve(config)?;
    let axes = projection.axes.axes();

    println!("Blueprint coverage for {}", source.path.display());
    println!("{}", "=".repeat(50));
    println!("Projection: {} relative to {}", projection.axes, projection.reference);
    println!();

    let mut missing = 0usize;
    let mut required: Vec<&str> = vec![projection.reference.as_str()];
    for segment in blueprint.segments() {
        if !required.contains(&segment) {
            required.push(segment);
        }
    }

    for segment in required {
        let absent: Vec<String> = axes
            .iter()
            .filter(|axis| !store.has_segment_axis(segment, **axis))
            .map(|axis| axis.to_string())
            .collect();
        if absent.is_empty() {
            println!("[OK]   {segment}");
        } else {
            missing += 1;
            println!("[MISS] {segment} (axes: {})", absent.join(", "));
        }
    }

    println!();
    if missing == 0 {
        println!("All blueprint segments are available. Recording is ready.");
        Ok(())
    } else {
        anyhow::bail!("{missing} segment(s) missing; the recording cannot be projected")
    }
}
