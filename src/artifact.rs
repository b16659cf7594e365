//! Downloaded script artifact with guaranteed cleanup
//!
//! The fetched script lives on disk only for the duration of one bootstrap
//! run. The file is acquired at persist and released in `Drop`, so every
//! exit path (normal return, early abort, error unwind) removes it. Removal
//! failure is logged and never escalated.

use anyhow::{Context, Result, bail};
use chrono::Local;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

/// A fetched script persisted to disk for one run
#[derive(Debug)]
pub struct ScriptArtifact {
    path: PathBuf,
}

impl ScriptArtifact {
    /// Write the script body to a uniquely named file under the system temp dir
    pub fn persist(body: &str) -> Result<Self> {
        let (mut file, path) = create_unique()?;
        file.write_all(body.as_bytes())
            .with_context(|| format!("Could not write {}", path.display()))?;
        drop(file);

        if !path.exists() {
            bail!("script artifact missing after write: {}", path.display());
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o700))
                .with_context(|| format!("Could not mark {} executable", path.display()))?;
        }

        Ok(Self { path })
    }

    /// Where the script was persisted
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run the script synchronously in the current privilege context
    pub fn execute(&self) -> Result<ExitStatus> {
        Command::new("/bin/sh")
            .arg(&self.path)
            .status()
            .with_context(|| format!("Could not execute {}", self.path.display()))
    }
}

/// Timestamp-named file; runs landing in the same millisecond get a suffix.
fn create_unique() -> Result<(File, PathBuf)> {
    let stamp = Local::now().format("%Y%m%d-%H%M%S%.3f").to_string();
    let mut attempt = 0u32;
    loop {
        let name = if attempt == 0 {
            format!("zonectl-bootstrap-{stamp}.sh")
        } else {
            format!("zonectl-bootstrap-{stamp}-{attempt}.sh")
        };
        let path = std::env::temp_dir().join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((file, path)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && attempt < 1000 => {
                attempt += 1;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Could not create {}", path.display()));
            }
        }
    }
}

impl Drop for ScriptArtifact {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            log::warn!("could not remove {}: {e}", self.path.display());
        }
    }
}
