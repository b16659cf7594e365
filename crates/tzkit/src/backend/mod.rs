//! Zone backends.
//!
//! This module provides the [`ZoneBackend`] trait and implementations for
//! the supported OS families. `timedatectl` backs systemd Linux hosts and
//! `systemsetup` backs macOS.
//!
//! # Testing
//!
//! Use [`MockBackend`] for testing without touching the host:
//!
//! ```
//! use tzkit::backend::{MockBackend, ZoneBackend};
//! use tzkit::ZoneId;
//!
//! let mock = MockBackend::new("UTC", &["UTC", "America/Chicago"]);
//! mock.set_zone(&ZoneId::new("America/Chicago")).unwrap();
//! assert_eq!(mock.current_zone().unwrap().as_str(), "America/Chicago");
//! assert_eq!(mock.set_calls(), 1);
//! ```

pub mod systemsetup;
pub mod timedatectl;

pub use systemsetup::Systemsetup;
pub use timedatectl::Timedatectl;

use std::process::Command;
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::types::ZoneId;

/// Access to the host zone database and clock settings.
///
/// This abstraction keeps the OS collaborator at the edge of the crate
/// and enables testing against [`MockBackend`].
pub trait ZoneBackend: Send + Sync {
    /// Read the identifier the system currently uses.
    fn current_zone(&self) -> Result<ZoneId>;

    /// Enumerate every identifier the host recognizes.
    fn available_zones(&self) -> Result<Vec<ZoneId>>;

    /// Change the system time zone.
    ///
    /// Either the zone is changed or an error is returned. A clean return
    /// does not prove the change stuck; callers re-read the zone afterwards.
    fn set_zone(&self, zone: &ZoneId) -> Result<()>;
}

/// Run a zone tool and capture stdout, bubbling stderr up on failure.
pub(crate) fn run_tool(tool: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(tool)
        .args(args)
        .output()
        .map_err(|source| Error::Spawn {
            tool: tool.to_string(),
            source,
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let detail = if stderr.is_empty() {
            format!("exit status {}", output.status)
        } else {
            stderr
        };
        return Err(Error::command(
            tool,
            args.first().copied().unwrap_or_default(),
            detail,
        ));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// In-memory backend for tests.
///
/// Records every `set_zone` call and can be configured to silently ignore
/// writes (a tool that reports success without effect) or to fail them.
#[derive(Debug, Clone)]
pub struct MockBackend {
    state: Arc<Mutex<MockState>>,
}

#[derive(Debug)]
struct MockState {
    current: ZoneId,
    available: Vec<ZoneId>,
    set_calls: Vec<ZoneId>,
    ignore_writes: bool,
    fail_writes: bool,
}

impl MockBackend {
    /// Create a mock reporting `current` and accepting `available` zones.
    #[must_use]
    pub fn new(current: &str, available: &[&str]) -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                current: ZoneId::new(current),
                available: available.iter().map(|z| ZoneId::new(*z)).collect(),
                set_calls: Vec::new(),
                ignore_writes: false,
                fail_writes: false,
            })),
        }
    }

    /// Report success from `set_zone` without changing anything.
    #[must_use]
    pub fn ignore_writes(self) -> Self {
        self.state.lock().unwrap().ignore_writes = true;
        self
    }

    /// Fail every `set_zone` call.
    #[must_use]
    pub fn fail_writes(self) -> Self {
        self.state.lock().unwrap().fail_writes = true;
        self
    }

    /// How many times `set_zone` has been called.
    #[must_use]
    pub fn set_calls(&self) -> usize {
        self.state.lock().unwrap().set_calls.len()
    }

    /// The zone the mock currently reports.
    #[must_use]
    pub fn reported_zone(&self) -> ZoneId {
        self.state.lock().unwrap().current.clone()
    }
}

impl ZoneBackend for MockBackend {
    fn current_zone(&self) -> Result<ZoneId> {
        Ok(self.state.lock().unwrap().current.clone())
    }

    fn available_zones(&self) -> Result<Vec<ZoneId>> {
        Ok(self.state.lock().unwrap().available.clone())
    }

    fn set_zone(&self, zone: &ZoneId) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.set_calls.push(zone.clone());

        if state.fail_writes {
            return Err(Error::command("mock", "set-timezone", "configured to fail"));
        }
        if !state.ignore_writes {
            state.current = zone.clone();
        }
        Ok(())
    }
}
