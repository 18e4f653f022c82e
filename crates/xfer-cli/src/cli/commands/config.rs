//! `xfer config` – show config path and effective values.

use anyhow::Result;
use xfer_core::config::{self, ReporterConfig};

pub fn run_config(cfg: &ReporterConfig) -> Result<()> {
    let path = config::config_path()?;
    println!("# {}", path.display());
    print!("{}", cfg.to_toml_string()?);
    Ok(())
}
