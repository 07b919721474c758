use anyhow::Context;
use arkify_core::{config::Config, io, paths};
use std::path::Path;

pub fn run(root: &Path) -> anyhow::Result<()> {
    let path = paths::config_path(root);
    let data = serde_yaml::to_string(&Config::default()).context("failed to serialize config")?;
    let written = io::write_if_missing(&path, data.as_bytes())
        .with_context(|| format!("failed to write {}", path.display()))?;

    if written {
        println!("Created {}", paths::CONFIG_FILE);
    } else {
        println!("{} already exists, left unchanged", paths::CONFIG_FILE);
    }
    Ok(())
}
