//! Resolve the path of a dataset recording.

use gaitrig_common::AppConfig;

pub fn run(
    config: &AppConfig,
    set: Option<u32>,
    gait: Option<String>,
    terrain: Option<String>,
) -> anyhow::Result<()> {
    let dataset = &config.dataset;
    let path = dataset.path_for(
        set.unwrap_or(dataset.set),
        gait.as_deref().unwrap_or(&dataset.gait),
        terrain.as_deref().unwrap_or(&dataset.terrain),
    );

    println!("{}", path.display());
    if !path.exists() {
        tracing::warn!(path = %path.display(), "Recording does not exist");
    }
    Ok(())
}
