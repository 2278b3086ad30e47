use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub struct Config {
    pub db_path: PathBuf,
    pub data_dir: PathBuf,
}

impl Config {
    /// Resolve the data directory: explicit override, then `$FITLIFE_DATA_DIR`,
    /// then the platform data directory.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir.or_else(data_dir_from_env) {
            Some(dir) => dir,
            None => ProjectDirs::from("", "", "fitlife")
                .context("Could not determine home directory")?
                .data_dir()
                .to_path_buf(),
        };

        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

        let db_path = data_dir.join("fitlife.db");

        Ok(Config { db_path, data_dir })
    }
}

fn data_dir_from_env() -> Option<PathBuf> {
    std::env::var_os("FITLIFE_DATA_DIR")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
