use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Directory name under the platform config/data roots
const APP_DIR: &str = "sunslider";

/// Environment override for the config directory
pub const CONFIG_DIR_ENV: &str = "SUNSLIDER_CONFIG_DIR";

/// Files that pin the config location to the working directory
const LOCAL_FILES: [&str; 2] = ["sunslider.json", "sunslider.log"];

/// Configuration for overriding default application paths
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Create PathConfig from CLI arguments and environment variables
    ///
    /// Priority: CLI args → ENV var (SUNSLIDER_CONFIG_DIR) → None (use defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir =
            cli_dir.or_else(|| std::env::var(CONFIG_DIR_ENV).ok().map(PathBuf::from));

        Self { config_dir }
    }
}

/// Get path to a configuration file
///
/// Priority:
/// 1. CLI --config-dir argument
/// 2. SUNSLIDER_CONFIG_DIR environment variable
/// 3. Local folder IF sunslider.json or sunslider.log exist there
/// 4. Platform config directory from dirs-next (default)
///
/// Platform paths:
/// - Linux: ~/.config/sunslider/{name}
/// - macOS: ~/Library/Application Support/sunslider/{name}
/// - Windows: %APPDATA%\sunslider\{name}
pub fn config_file(name: &str, config: &PathConfig) -> PathBuf {
    resolve_dir(config, dirs_next::config_dir()).join(name)
}

/// Get path to a data file (logs)
///
/// Same priority as [`config_file`], with the platform data directory
/// (`~/.local/share/sunslider` on Linux) as the default.
pub fn data_file(name: &str, config: &PathConfig) -> PathBuf {
    resolve_dir(config, dirs_next::data_dir()).join(name)
}

/// Ensure that configuration and data directories exist
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    let config_dir = resolve_dir(config, dirs_next::config_dir());
    let data_dir = resolve_dir(config, dirs_next::data_dir());

    for dir in [&config_dir, &data_dir] {
        if !dir.exists() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
    }

    Ok(())
}

fn has_local_files(dir: &Path) -> bool {
    LOCAL_FILES.iter().any(|f| dir.join(f).exists())
}

fn resolve_dir(config: &PathConfig, platform_root: Option<PathBuf>) -> PathBuf {
    // Priority 1: Custom directory from CLI or ENV
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }

    // Priority 2: Local folder IF config files exist there
    if let Ok(current_dir) = std::env::current_dir()
        && has_local_files(&current_dir)
    {
        return current_dir;
    }

    // Priority 3: Platform-specific directory, "." if unavailable
    platform_root
        .map(|root| root.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}
