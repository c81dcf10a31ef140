use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StowageError};

const KNOWN_UNITS: [&str; 4] = ["gb", "mb", "kb", "b"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StowageConfig {
    #[serde(default)]
    pub units: UnitDefaults,
}

/// Units applied to size fields entered as bare numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitDefaults {
    /// Upload and download speed limits (default: kb).
    #[serde(default = "default_bandwidth_unit")]
    pub bandwidth: String,
    /// Backup set and volume sizes (default: mb).
    #[serde(default = "default_size_unit")]
    pub size: String,
}

impl Default for UnitDefaults {
    fn default() -> Self {
        Self {
            bandwidth: default_bandwidth_unit(),
            size: default_size_unit(),
        }
    }
}

fn default_bandwidth_unit() -> String {
    "kb".to_string()
}

fn default_size_unit() -> String {
    "mb".to_string()
}

impl StowageConfig {
    pub fn validate(&self) -> Result<()> {
        for (field, unit) in [
            ("units.bandwidth", &self.units.bandwidth),
            ("units.size", &self.units.size),
        ] {
            if !KNOWN_UNITS.contains(&unit.to_lowercase().as_str()) {
                return Err(StowageError::Config(format!(
                    "{field} must be one of gb, mb, kb, b (got '{unit}')"
                )));
            }
        }
        Ok(())
    }
}

/// Where the configuration file was found.
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Passed with `--config`.
    CliArg(PathBuf),
    /// Set via the `STOWAGE_CONFIG` env var.
    EnvVar(PathBuf),
    /// Found by searching standard locations.
    SearchOrder { path: PathBuf, level: &'static str },
}

impl ConfigSource {
    pub fn path(&self) -> &Path {
        match self {
            ConfigSource::CliArg(p) => p,
            ConfigSource::EnvVar(p) => p,
            ConfigSource::SearchOrder { path, .. } => path,
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::CliArg(p) => write!(f, "{} (--config)", p.display()),
            ConfigSource::EnvVar(p) => write!(f, "{} (STOWAGE_CONFIG)", p.display()),
            ConfigSource::SearchOrder { path, level } => {
                write!(f, "{} ({})", path.display(), level)
            }
        }
    }
}

/// Returns search locations in priority order: project, then user.
pub fn default_config_search_paths() -> Vec<(PathBuf, &'static str)> {
    let mut paths = vec![(PathBuf::from("stowage.yaml"), "project")];
    if let Some(base) = dirs::config_dir() {
        paths.push((base.join("stowage").join("config.yaml"), "user"));
    }
    paths
}

/// Priority: CLI arg > `STOWAGE_CONFIG` env var > first existing search path.
pub fn resolve_config_path(cli_config: Option<&str>) -> Option<ConfigSource> {
    if let Some(path) = cli_config {
        return Some(ConfigSource::CliArg(PathBuf::from(path)));
    }

    if let Ok(val) = std::env::var("STOWAGE_CONFIG") {
        if !val.is_empty() {
            return Some(ConfigSource::EnvVar(PathBuf::from(val)));
        }
    }

    default_config_search_paths()
        .into_iter()
        .find(|(path, _)| path.exists())
        .map(|(path, level)| ConfigSource::SearchOrder { path, level })
}

pub fn load_config(path: &Path) -> Result<StowageConfig> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        StowageError::Config(format!("cannot read config '{}': {e}", path.display()))
    })?;
    let config: StowageConfig = serde_yaml::from_str(&raw).map_err(|e| {
        StowageError::Config(format!("invalid config '{}': {e}", path.display()))
    })?;
    config.validate()?;
    Ok(config)
}

/// Load the resolved config file, or built-in defaults when none exists.
pub fn load_or_default(cli_config: Option<&str>) -> Result<StowageConfig> {
    match resolve_config_path(cli_config) {
        Some(source) => {
            tracing::debug!(source = %source, "loading configuration");
            load_config(source.path())
        }
        None => Ok(StowageConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    // Env vars and the working directory are process-wide.
    static GLOBAL_STATE: Mutex<()> = Mutex::new(());

    #[test]
    fn test_defaults_without_units_section() {
        let config: StowageConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.units.bandwidth, "kb");
        assert_eq!(config.units.size, "mb");
    }

    #[test]
    fn test_load_config_reads_units() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stowage.yaml");
        std::fs::write(&path, "units:\n  bandwidth: mb\n").unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.units.bandwidth, "mb");
        assert_eq!(config.units.size, "mb");
    }

    #[test]
    fn test_load_config_rejects_unknown_unit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stowage.yaml");
        std::fs::write(&path, "units:\n  size: tb\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("units.size"), "{err}");
    }

    #[test]
    fn test_cli_arg_wins() {
        let source = resolve_config_path(Some("/tmp/explicit.yaml")).unwrap();
        assert!(matches!(source, ConfigSource::CliArg(_)));
        assert_eq!(source.path(), Path::new("/tmp/explicit.yaml"));
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        assert!(load_or_default(path.to_str()).is_err());
    }

    #[test]
    fn test_env_var_beats_search_paths() {
        let _lock = GLOBAL_STATE.lock().unwrap();
        let _guard = EnvGuard::set("STOWAGE_CONFIG", "/tmp/stowage-env.yaml");

        let source = resolve_config_path(None).unwrap();
        assert!(matches!(source, ConfigSource::EnvVar(_)));
        assert_eq!(source.path(), Path::new("/tmp/stowage-env.yaml"));
    }

    #[test]
    fn test_project_file_found_in_working_dir() {
        let _lock = GLOBAL_STATE.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("stowage.yaml"), "units:\n  size: gb\n").unwrap();

        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let _env_guard = EnvGuard::set("STOWAGE_CONFIG", "");

        let source = resolve_config_path(None);
        let loaded = load_or_default(None);
        std::env::set_current_dir(original).unwrap();

        assert!(matches!(
            source,
            Some(ConfigSource::SearchOrder {
                level: "project",
                ..
            })
        ));
        assert_eq!(loaded.unwrap().units.size, "gb");
    }

    #[test]
    fn test_nothing_found_falls_back_to_defaults() {
        let _lock = GLOBAL_STATE.lock().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(dir.path()).unwrap();
        let _env_guard = EnvGuard::set("STOWAGE_CONFIG", "");
        let _xdg_guard = EnvGuard::set("XDG_CONFIG_HOME", dir.path().to_str().unwrap());
        let _home_guard = EnvGuard::set("HOME", dir.path().to_str().unwrap());

        let source = resolve_config_path(None);
        let loaded = load_or_default(None);
        std::env::set_current_dir(original).unwrap();

        assert!(source.is_none());
        assert_eq!(loaded.unwrap().units.bandwidth, "kb");
    }

    /// Sets an env var and restores its previous value on drop.
    struct EnvGuard {
        key: &'static str,
        prev: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &'static str, val: &str) -> Self {
            let prev = std::env::var(key).ok();
            std::env::set_var(key, val);
            Self { key, prev }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.prev {
                Some(v) => std::env::set_var(self.key, v),
                None => std::env::remove_var(self.key),
            }
        }
    }
}
