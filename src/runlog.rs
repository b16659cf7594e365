//! Per-run durable log
//!
//! Each run opens its own timestamp-named, append-only log file and mirrors
//! every record to the colored console. The log is an explicit value owned
//! by the running command, not ambient global state: open at run start,
//! append through the run, dropped at run end.

use anyhow::{Context, Result};
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::ui;

/// Severity of a run-log record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
    Ok,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Ok => "OK",
        }
    }
}

/// Append-only log for one run, mirrored to the console
pub struct RunLog {
    file: File,
    path: PathBuf,
    quiet: bool,
}

impl RunLog {
    /// Open a timestamp-named log for the given entry point in the default log dir
    pub fn open(entrypoint: &str, quiet: bool) -> Result<Self> {
        Self::open_in(&crate::paths::log_dir()?, entrypoint, quiet)
    }

    /// Open a log under a specific directory, creating it if needed
    pub fn open_in(dir: &Path, entrypoint: &str, quiet: bool) -> Result<Self> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Could not create log directory {}", dir.display()))?;
        let stamp = Local::now().format("%Y%m%d-%H%M%S%.3f").to_string();

        // Runs landing in the same millisecond get a numeric suffix
        let mut attempt = 0u32;
        loop {
            let name = if attempt == 0 {
                format!("zonectl-{entrypoint}-{stamp}.log")
            } else {
                format!("zonectl-{entrypoint}-{stamp}-{attempt}.log")
            };
            let path = dir.join(name);
            match OpenOptions::new().create_new(true).append(true).open(&path) {
                Ok(file) => return Ok(Self { file, path, quiet }),
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists && attempt < 1000 => {
                    attempt += 1;
                }
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Could not open log file {}", path.display()));
                }
            }
        }
    }

    /// Where this run is being recorded
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record where this run is being logged (called at run start and end)
    pub fn announce(&mut self) {
        let line = format!("run log: {}", self.path.display());
        self.record(Level::Info, &line);
    }

    pub fn info(&mut self, msg: &str) {
        self.record(Level::Info, msg);
    }

    pub fn warn(&mut self, msg: &str) {
        self.record(Level::Warn, msg);
    }

    pub fn error(&mut self, msg: &str) {
        self.record(Level::Error, msg);
    }

    pub fn ok(&mut self, msg: &str) {
        self.record(Level::Ok, msg);
    }

    fn record(&mut self, level: Level, msg: &str) {
        let stamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        if writeln!(self.file, "[{stamp}] [{}] {msg}", level.tag()).is_err() {
            log::warn!("run log write failed: {}", self.path.display());
        }

        if self.quiet && level != Level::Error {
            return;
        }
        match level {
            Level::Info => ui::info(msg),
            Level::Warn => ui::warn(msg),
            Level::Error => ui::error(msg),
            Level::Ok => ui::success(msg),
        }
    }
}
