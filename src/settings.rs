//! Runtime settings. Defaults are overridden by an optional `budy.toml` in the
//! platform config directory, then by `BUDY_*` environment variables.

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "budy.toml";
const DB_FILE: &str = "budy.db";
const ENV_PREFIX: &str = "BUDY";

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Settings {
    pub(crate) database: Option<PathBuf>,
    pub(crate) log_level: String,
}

impl Settings {
    pub(crate) fn load() -> Result<Self> {
        let dirs = project_dirs()?;
        let file = dirs.config_dir().join(CONFIG_FILE);
        Self::from_sources(Some(&file), Environment::with_prefix(ENV_PREFIX))
    }

    fn from_sources(file: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder().set_default("log_level", "warn")?;
        if let Some(path) = file {
            builder = builder.add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }
        builder
            .add_source(env)
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Invalid settings")
    }

    /// Database file to open, creating its directory if needed.
    pub(crate) fn database_path(&self) -> Result<PathBuf> {
        let path = match &self.database {
            Some(path) => path.clone(),
            None => project_dirs()?.data_dir().join(DB_FILE),
        };
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        }
        Ok(path)
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "budy", "budy")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_sources(None, env(&[])).unwrap();
        assert_eq!(settings.log_level, "warn");
        assert!(settings.database.is_none());
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(CONFIG_FILE);
        let settings = Settings::from_sources(Some(&file), env(&[])).unwrap();
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(CONFIG_FILE);
        std::fs::write(&file, "log_level = \"debug\"\ndatabase = \"/tmp/ledger.db\"\n").unwrap();

        let settings = Settings::from_sources(Some(&file), env(&[])).unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.database, Some(PathBuf::from("/tmp/ledger.db")));
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join(CONFIG_FILE);
        std::fs::write(&file, "log_level = \"debug\"\n").unwrap();

        let settings = Settings::from_sources(
            Some(&file),
            env(&[("BUDY_LOG_LEVEL", "trace"), ("BUDY_DATABASE", "/data/budy.db")]),
        )
        .unwrap();
        assert_eq!(settings.log_level, "trace");
        assert_eq!(settings.database, Some(PathBuf::from("/data/budy.db")));
    }

    #[test]
    fn test_database_path_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("budy.db");
        let settings = Settings {
            database: Some(db.clone()),
            log_level: "warn".into(),
        };
        assert_eq!(settings.database_path().unwrap(), db);
        assert!(dir.path().join("nested").is_dir());
    }
}
