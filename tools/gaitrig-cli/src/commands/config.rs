//! Show or save the effective configuration.

use gaitrig_common::AppConfig;

use super::write_json;

pub fn run(config: &AppConfig, write: bool) -> anyhow::Result<()> {
    write_json(config, None)?;
    if write {
        config
            .save()
            .map_err(|e| anyhow::anyhow!("Failed to save config: {e}"))?;
        println!("Configuration saved.");
    }
    Ok(())
}
