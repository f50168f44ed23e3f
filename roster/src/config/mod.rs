//! Configuration system for roster.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project `roster.yaml`)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of the merged result
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`ROSTER_*`)
//! 3. Explicit config file (via `ConfigBuilder::with_config_file`)
//! 4. Private project config (`roster.local.yaml`)
//! 5. Project config (`roster.yaml`)
//! 6. User config (`~/.roster/config.yaml`)
//! 7. Built-in defaults
//!
//! # Examples
//!
//! Loading from a specific directory:
//!
//! ```no_run
//! use roster::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap();
//!
//! let pool = config.database_config().unwrap();
//! println!("Database at {}", pool.path.display());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

#[cfg(test)]
mod proptests;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{BackupSettings, Config, OutputFormat, PoolConfig};
pub use validator::ConfigValidator;
