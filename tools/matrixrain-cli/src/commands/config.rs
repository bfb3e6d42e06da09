//! Show or write the configuration file.

use matrixrain_common::config::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, write: bool) -> anyhow::Result<()> {
    let path = config_file_path();

    if write {
        let written = config
            .save()
            .map_err(|e| anyhow::anyhow!("Failed to write {}: {e}", path.display()))?;
        println!("Wrote {}", written.display());
        return Ok(());
    }

    let source = match AppConfig::read_from(&path) {
        Ok(Some(_)) => "file",
        Ok(None) => "defaults, no file",
        Err(_) => "defaults, file ignored",
    };
    println!("Config: {} ({source})", path.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
