use crate::output::print_json;
use anyhow::Context;
use applet_core::{catalog::Catalog, config::Config, io, paths};
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    io::ensure_dir(&paths::applets_dir(root)).context("failed to create .applets/")?;

    let wrote_config = !paths::config_path(root).exists();
    if wrote_config {
        Config::default()
            .save(root)
            .context("failed to write config")?;
    }

    let wrote_catalog = !paths::catalog_path(root).exists();
    if wrote_catalog {
        Catalog::seeded()
            .save(root)
            .context("failed to write catalog")?;
    }

    if json {
        return print_json(&serde_json::json!({
            "root": root,
            "config_written": wrote_config,
            "catalog_written": wrote_catalog,
        }));
    }

    for (file, wrote) in [
        (paths::CONFIG_FILE, wrote_config),
        (paths::CATALOG_FILE, wrote_catalog),
    ] {
        if wrote {
            println!("created {file}");
        } else {
            println!("kept existing {file}");
        }
    }
    Ok(())
}
