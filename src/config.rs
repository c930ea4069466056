use anyhow::{Context, Result};
use std::path::PathBuf;

pub const DB_ENV: &str = "SPLITBUDGET_DB";
pub const USER_ENV: &str = "SPLITBUDGET_USER";
pub const LOG_ENV: &str = "SPLITBUDGET_LOG";

const DEFAULT_USER: &str = "local";
const DEFAULT_LOG_FILTER: &str = "warn";

/// Runtime settings, read from the environment with platform defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    /// Profile the CLI acts as.
    pub user_id: String,
    /// `tracing_subscriber::EnvFilter` directive.
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let db_path = match non_empty(DB_ENV) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory: {}", parent.display()))?;
        }

        Ok(Self {
            db_path,
            user_id: non_empty(USER_ENV).unwrap_or_else(|| DEFAULT_USER.to_string()),
            log_filter: non_empty(LOG_ENV).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "splitbudget", "SplitBudget")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().join("splitbudget.db"))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_explicit_settings() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("b.db");
        let db_str = db.to_string_lossy();
        let config = Config::from_lookup(lookup(&[
            (DB_ENV, &*db_str),
            (USER_ENV, "alex"),
            (LOG_ENV, "debug"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, db);
        assert_eq!(config.user_id, "alex");
        assert_eq!(config.log_filter, "debug");
        // parent directory is created up front
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("b.db");
        let db_str = db.to_string_lossy();
        let config = Config::from_lookup(lookup(&[(DB_ENV, &*db_str), (USER_ENV, "  ")]))
        .unwrap();
        assert_eq!(config.user_id, "local");
        assert_eq!(config.log_filter, "warn");
    }
}
