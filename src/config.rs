use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_DATABASE: &str = "database.db";
pub const DEFAULT_STATIC_DIR: &str = ".";

/// Contents of `keepsake.toml`. Every field is optional.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct KeepsakeConfig {
    pub port: Option<u16>,
    pub database: Option<String>,
    pub static_dir: Option<String>,
}

/// Fully resolved server settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub database: PathBuf,
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database: PathBuf::from(DEFAULT_DATABASE),
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServerConfig {
    /// Layer a config file over the defaults
    pub fn from_file_config(file: Option<KeepsakeConfig>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();
        Self {
            port: file.port.unwrap_or(defaults.port),
            database: file.database.map(PathBuf::from).unwrap_or(defaults.database),
            static_dir: file.static_dir.map(PathBuf::from).unwrap_or(defaults.static_dir),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("keepsake.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<KeepsakeConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: KeepsakeConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &KeepsakeConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}
