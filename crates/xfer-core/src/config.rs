use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Appended to failure lines when verbose output is off.
pub const DEFAULT_VERBOSE_HINT: &str = " (for details, run with --verbose)";

/// Reporter configuration loaded from `~/.config/xfer/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReporterConfig {
    /// Log transfer starts and successes, and print full cause chains for failures.
    pub verbose: bool,
    /// Hint appended to failure/corruption lines in non-verbose mode.
    pub verbose_hint: String,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            verbose_hint: DEFAULT_VERBOSE_HINT.to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("xfer")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ReporterConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ReporterConfig::default();
        default_cfg.save_to_path(&path)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    ReporterConfig::load_from_path(&path)
}

impl ReporterConfig {
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)?;
        let cfg: ReporterConfig = toml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let toml = self.to_toml_string()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        Ok(())
    }
}
