//! Elevation gate
//!
//! Both mutating entry points check privilege up front, before any network
//! or temp-file activity, so a non-elevated run fails before partial work.

use anyhow::{Context, Result, bail};
use std::process::Command;

/// Check whether the process runs with root privileges
pub fn is_elevated() -> Result<bool> {
    let output = Command::new("id")
        .arg("-u")
        .output()
        .context("Failed to execute id")?;
    if !output.status.success() {
        bail!("id -u exited with failure");
    }
    let uid: u32 = String::from_utf8_lossy(&output.stdout)
        .trim()
        .parse()
        .context("Unexpected id -u output")?;
    Ok(uid == 0)
}

/// Fail unless the process is elevated
pub fn require_elevated(action: &str) -> Result<()> {
    if is_elevated()? {
        return Ok(());
    }
    bail!("{action} requires elevated privileges; re-run with sudo");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_elevated_answers() {
        // Whichever user runs the tests, the probe itself must work
        assert!(is_elevated().is_ok());
    }

    #[test]
    fn test_require_elevated_matches_probe() {
        let elevated = is_elevated().unwrap();
        let gate = require_elevated("testing");
        assert_eq!(gate.is_ok(), elevated);
        if let Err(e) = gate {
            assert!(e.to_string().contains("testing"));
        }
    }
}
