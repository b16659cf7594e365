//! Platform detection and backend selection.
//!
//! # Supported Platforms
//!
//! | OS      | Tool          |
//! |---------|---------------|
//! | Linux   | `timedatectl` |
//! | macOS   | `systemsetup` |
//!
//! # Example
//!
//! ```no_run
//! use tzkit::platform;
//!
//! let backend = platform::default_backend().expect("unsupported platform");
//! let zones = backend.available_zones().unwrap();
//! println!("host recognizes {} zones", zones.len());
//! ```

use which::which;

use crate::backend::{Systemsetup, Timedatectl, ZoneBackend};
use crate::error::{Error, Result};

/// Pick the zone backend for the current host.
///
/// # Errors
///
/// Returns `Error::UnsupportedPlatform` when the OS family has no backend,
/// or `Error::ToolMissing` when the backend's tool is not on PATH.
pub fn default_backend() -> Result<Box<dyn ZoneBackend>> {
    backend_for(std::env::consts::OS)
}

fn backend_for(os: &str) -> Result<Box<dyn ZoneBackend>> {
    match os {
        "linux" => {
            require_tool(crate::backend::timedatectl::TOOL)?;
            Ok(Box::new(Timedatectl::new()))
        }
        "macos" => {
            require_tool(crate::backend::systemsetup::TOOL)?;
            Ok(Box::new(Systemsetup::new()))
        }
        _ => Err(Error::UnsupportedPlatform { os: os.to_string() }),
    }
}

fn require_tool(tool: &str) -> Result<()> {
    which(tool).map(|_| ()).map_err(|_| Error::ToolMissing {
        tool: tool.to_string(),
    })
}
