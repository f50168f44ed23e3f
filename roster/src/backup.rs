//! Backup and restore through an external dump tool.
//!
//! A backup runs `<tool> <database> .dump` with standard output redirected
//! into the backup file. A restore first loads the backup file into a
//! scratch database next to the live one with `<tool> -bail <scratch>`.
//! Only when that load exits with code zero are the scratch pages copied
//! over the live database through the online backup API, so a dump that
//! fails to load leaves the live data untouched.
//!
//! Processes are started from an argument vector; no shell is involved.
//! There is no timeout: a tool that hangs blocks the caller.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::time::Duration;

use rusqlite::backup::Progress;
use rusqlite::{Connection, DatabaseName};

use crate::database::Database;
use crate::error::{Error, Result};

/// Default dump/load tool.
pub const DEFAULT_BACKUP_TOOL: &str = "sqlite3";

/// Default backup file, relative to the working directory.
pub const DEFAULT_BACKUP_FILE: &str = "backup.sql";

/// How long the page copy waits for other connections to release the
/// live database.
const SWAP_BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where backups are written and which tool writes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupConfig {
    /// Program used for both dump and load.
    pub tool: String,
    /// The single backup file; every backup overwrites it.
    pub file: PathBuf,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            tool: DEFAULT_BACKUP_TOOL.to_string(),
            file: PathBuf::from(DEFAULT_BACKUP_FILE),
        }
    }
}

impl BackupConfig {
    /// Creates a configuration with the default tool and the given file.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    /// Sets the dump/load tool.
    #[must_use]
    pub fn with_tool(mut self, tool: impl Into<String>) -> Self {
        self.tool = tool.into();
        self
    }
}

/// Runs backups and restores of one database file.
#[derive(Debug, Clone)]
pub struct BackupRunner {
    database: PathBuf,
    config: BackupConfig,
}

impl BackupRunner {
    /// Creates a runner for the database file at `database`.
    #[must_use]
    pub fn new(database: impl Into<PathBuf>, config: BackupConfig) -> Self {
        Self {
            database: database.into(),
            config,
        }
    }

    /// Creates a runner for the file behind a pooled database.
    #[must_use]
    pub fn for_database(db: &Database, config: BackupConfig) -> Self {
        Self::new(db.path(), config)
    }

    /// Returns the database file this runner dumps and loads.
    #[must_use]
    pub fn database(&self) -> &Path {
        &self.database
    }

    /// Returns the backup configuration.
    #[must_use]
    pub const fn config(&self) -> &BackupConfig {
        &self.config
    }

    /// Dumps the whole database into the backup file.
    ///
    /// The backup file is truncated first. It is left in place, possibly
    /// partial, if the tool fails.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be created or the tool
    /// cannot be started, and [`Error::ToolFailed`] on a nonzero exit.
    pub fn backup(&self) -> Result<()> {
        let result = self.run_backup();
        match &result {
            Ok(()) => log::info!(
                "Backup of {} written to {}",
                self.database.display(),
                self.config.file.display()
            ),
            Err(e) => log::error!("Backup of {} failed: {e}", self.database.display()),
        }
        result
    }

    fn run_backup(&self) -> Result<()> {
        let file = File::create(&self.config.file)?;

        let output = Command::new(&self.config.tool)
            .arg(&self.database)
            .arg(".dump")
            .stdin(Stdio::null())
            .stdout(Stdio::from(file))
            .stderr(Stdio::piped())
            .output()?;

        self.check(&output)
    }

    /// Replaces the database contents with the backup file.
    ///
    /// The dump is replayed into an empty scratch database first. The live
    /// database is overwritten only after the replay succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the backup file is missing or the tool
    /// cannot be started, [`Error::ToolFailed`] on a nonzero exit, and
    /// [`Error::Database`] if the loaded pages cannot be copied over the
    /// live database.
    pub fn restore(&self) -> Result<()> {
        let result = self.run_restore();
        match &result {
            Ok(()) => log::info!(
                "Restored {} from {}",
                self.database.display(),
                self.config.file.display()
            ),
            Err(e) => log::error!("Restore of {} failed: {e}", self.database.display()),
        }
        result
    }

    fn run_restore(&self) -> Result<()> {
        let dump = File::open(&self.config.file)?;

        let scratch = tempfile::Builder::new()
            .prefix(".roster-restore-")
            .suffix(".db")
            .tempfile_in(self.scratch_dir())?;

        let output = Command::new(&self.config.tool)
            .arg("-bail")
            .arg(scratch.path())
            .stdin(Stdio::from(dump))
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()?;
        self.check(&output)?;

        log::debug!(
            "Backup loaded into {}, copying over {}",
            scratch.path().display(),
            self.database.display()
        );
        let mut live = Connection::open(&self.database)?;
        live.busy_timeout(SWAP_BUSY_TIMEOUT)?;
        live.restore(DatabaseName::Main, scratch.path(), None::<fn(Progress)>)?;
        Ok(())
    }

    /// The scratch database lives beside the live one, on the same volume.
    fn scratch_dir(&self) -> &Path {
        match self.database.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        }
    }

    fn check(&self, output: &Output) -> Result<()> {
        if output.status.success() {
            Ok(())
        } else {
            Err(Error::ToolFailed {
                tool: self.config.tool.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// Returns true if `tool` can be started.
#[must_use]
pub fn tool_available(tool: &str) -> bool {
    Command::new(tool)
        .arg("-version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}
