//! Show recording information.

use gaitrig_common::AppConfig;

use super::SourceArgs;

pub fn run(config: &AppConfig, source: SourceArgs) -> anyhow::Result<()> {
    let store = source.load_store(config)?;
    let blueprint = source.load_blueprint()?;
    let rate = config.playback.frame_rate();

    println!("Recording: {}", source.path.display());
    println!(
        "  Frames: {} ({:.2}s @ {}Hz)",
        store.frame_count(),
        rate.duration_secs(store.frame_count()),
        rate.hz()
    );
    println!("  Columns: {}", store.columns().len());
    println!();

    let segments = store.segments();
    println!("Segments ({}, * = in blueprint):", segments.len());
    for segment in &segments {
        let marker = if blueprint.contains_segment(segment) {
            "*"
        } else {
            " "
        };
        println!("  {marker} {segment}");
    }
    println!();

    println!("Blueprint ({} groups):", blueprint.len());
    for group in blueprint.groups() {
        println!("  {}: {}", group.name, group.chain.join(" -> "));
    }

    Ok(())
}
