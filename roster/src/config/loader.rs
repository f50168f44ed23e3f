//! Configuration file discovery and loading.
//!
//! This module handles discovering and loading roster configuration files
//! from various locations with proper precedence.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const PROJECT_CONFIG_FILE: &str = "roster.yaml";

/// Name of the private, uncommitted project configuration file.
pub const LOCAL_CONFIG_FILE: &str = "roster.local.yaml";

/// Precedence of the user configuration file.
pub const USER_PRECEDENCE: u8 = 1;

/// Precedence of `roster.yaml`.
pub const PROJECT_PRECEDENCE: u8 = 2;

/// Precedence of `roster.local.yaml`.
pub const LOCAL_PRECEDENCE: u8 = 3;

/// Precedence of a file named explicitly with `--config`.
pub const EXPLICIT_PRECEDENCE: u8 = 4;

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
///
/// # Examples
///
/// ```
/// use roster::config::ConfigSource;
/// use std::path::PathBuf;
///
/// // User config has lowest precedence
/// let user_config = ConfigSource {
///     path: PathBuf::from("~/.roster/config.yaml"),
///     precedence: 1,
///     config: Default::default(),
/// };
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from various sources.
///
/// # Examples
///
/// ```no_run
/// use roster::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Path::new("."), None).unwrap();
/// println!("Found {} configuration sources", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Discover and load all configuration files.
    ///
    /// Searches for:
    /// 1. User config at `<data dir>/config.yaml` (precedence 1)
    /// 2. Project `roster.yaml` walking up from `working_dir` (precedence 2)
    /// 3. Project `roster.local.yaml` beside it (precedence 3)
    ///
    /// The `data_dir` parameter overrides where the user config is loaded
    /// from; otherwise `$ROSTER_DATA_DIR` or `~/.roster` is used.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration file exists but cannot be read
    /// or parsed.
    pub fn load_all(working_dir: &Path, data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let mut sources = Vec::new();

        if let Some(user_config) = Self::load_user_config(data_dir)? {
            sources.push(user_config);
        }

        sources.extend(Self::discover_project_configs(working_dir)?);

        // Higher precedence last for easier processing
        sources.sort_by_key(|s| s.precedence);

        Ok(sources)
    }

    /// Load user configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load_user_config(data_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let config_path = match data_dir {
            Some(dir) => dir.join("config.yaml"),
            None => crate::database::resolve_data_dir()?.join("config.yaml"),
        };

        if !config_path.exists() {
            return Ok(None);
        }

        let config = Self::load_file(&config_path)?;
        Ok(Some(ConfigSource {
            path: config_path,
            precedence: USER_PRECEDENCE,
            config,
        }))
    }

    /// Discover project configurations by walking up directories.
    ///
    /// Stops at the first directory containing either `roster.yaml` or
    /// `roster.local.yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if any discovered file cannot be read or parsed.
    pub fn discover_project_configs(start_dir: &Path) -> Result<Vec<ConfigSource>> {
        let mut configs = Vec::new();
        let mut current = start_dir.to_path_buf();

        loop {
            for (name, precedence) in [
                (PROJECT_CONFIG_FILE, PROJECT_PRECEDENCE),
                (LOCAL_CONFIG_FILE, LOCAL_PRECEDENCE),
            ] {
                let candidate = current.join(name);
                if candidate.exists() {
                    let config = Self::load_file(&candidate)?;
                    configs.push(ConfigSource {
                        path: candidate,
                        precedence,
                        config,
                    });
                }
            }

            if !configs.is_empty() || !current.pop() {
                break;
            }
        }

        Ok(configs)
    }

    /// Load a file named explicitly by the caller.
    ///
    /// Unlike discovered files, the file must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_explicit(path: &Path) -> Result<ConfigSource> {
        Ok(ConfigSource {
            path: path.to_path_buf(),
            precedence: EXPLICIT_PRECEDENCE,
            config: Self::load_file(path)?,
        })
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read configuration file: {e}"),
        })?;

        serde_yaml::from_str(&contents).map_err(|e| {
            log::error!("Invalid YAML in {}", path.display());
            Error::Configuration(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load_file(Path::new("/nonexistent/path/config.yaml"));
        assert!(matches!(result, Err(Error::InvalidPath { .. })));
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad.yaml");
        fs::write(&config_path, "invalid: yaml: syntax:").unwrap();

        let result = ConfigLoader::load_file(&config_path);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_load_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "database: /tmp/students.db\n").unwrap();

        let config = ConfigLoader::load_file(&config_path).unwrap();
        assert_eq!(config.database, Some(PathBuf::from("/tmp/students.db")));
    }

    #[test]
    fn test_discover_no_configs() {
        let temp_dir = TempDir::new().unwrap();
        let configs = ConfigLoader::discover_project_configs(temp_dir.path()).unwrap();
        assert!(configs.is_empty());
    }

    #[test]
    fn test_discover_both_project_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("roster.yaml"), "output_format: csv\n").unwrap();
        fs::write(temp_dir.path().join("roster.local.yaml"), "output_format: json\n").unwrap();

        let configs = ConfigLoader::discover_project_configs(temp_dir.path()).unwrap();
        assert_eq!(configs.len(), 2);

        let project = configs.iter().find(|c| c.precedence == PROJECT_PRECEDENCE).unwrap();
        let local = configs.iter().find(|c| c.precedence == LOCAL_PRECEDENCE).unwrap();
        assert_eq!(project.path.file_name().unwrap(), PROJECT_CONFIG_FILE);
        assert_eq!(local.path.file_name().unwrap(), LOCAL_CONFIG_FILE);
    }

    #[test]
    fn test_discover_stops_at_first_config() {
        let temp_dir = TempDir::new().unwrap();
        let child = temp_dir.path().join("child");
        fs::create_dir(&child).unwrap();

        fs::write(temp_dir.path().join("roster.yaml"), "database: parent.db\n").unwrap();

        // Discover from child - should find parent's config and stop
        let configs = ConfigLoader::discover_project_configs(&child).unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].config.database, Some(PathBuf::from("parent.db")));
    }

    #[test]
    fn test_load_all_reads_user_config_from_data_dir() {
        let data_dir = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(data_dir.path().join("config.yaml"), "output_format: tsv\n").unwrap();
        fs::write(project.path().join("roster.yaml"), "output_format: csv\n").unwrap();

        let sources = ConfigLoader::load_all(project.path(), Some(data_dir.path())).unwrap();
        let precedences: Vec<_> = sources.iter().map(|s| s.precedence).collect();
        assert_eq!(precedences, vec![USER_PRECEDENCE, PROJECT_PRECEDENCE]);
    }

    #[test]
    fn test_load_explicit_requires_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(ConfigLoader::load_explicit(&temp_dir.path().join("missing.yaml")).is_err());

        let path = temp_dir.path().join("custom.yaml");
        fs::write(&path, "backup:\n  file: nightly.sql\n").unwrap();
        let source = ConfigLoader::load_explicit(&path).unwrap();
        assert_eq!(source.precedence, EXPLICIT_PRECEDENCE);
    }
}
