//! Centralized path resolution for zonectl
//!
//! # Environment Variables
//!
//! - `ZONECTL_LOG_DIR` - Override the run-log directory
//! - `ZONECTL_CONFIG_DIR` - Override the config directory
//!
//! # Path Resolution Priority
//!
//! For log_dir():
//! 1. `ZONECTL_LOG_DIR` environment variable
//! 2. `XDG_STATE_HOME/zonectl/logs` (if set)
//! 3. Default: `~/.local/state/zonectl/logs`
//!
//! For config_dir():
//! 1. `ZONECTL_CONFIG_DIR` environment variable
//! 2. `XDG_CONFIG_HOME/zonectl` (if set)
//! 3. Default: `~/.config/zonectl`

use anyhow::{Context, Result};
use std::path::PathBuf;

/// Environment variable for log directory override
pub const ENV_LOG_DIR: &str = "ZONECTL_LOG_DIR";

/// Environment variable for config directory override
pub const ENV_CONFIG_DIR: &str = "ZONECTL_CONFIG_DIR";

/// Get the run-log directory path
pub fn log_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_LOG_DIR) {
        let path = expand(&dir);
        log::debug!("Using log dir from {}: {}", ENV_LOG_DIR, path.display());
        return Ok(path);
    }

    if let Ok(xdg_state) = std::env::var("XDG_STATE_HOME") {
        let path = PathBuf::from(xdg_state).join("zonectl").join("logs");
        log::debug!("Using XDG_STATE_HOME: {}", path.display());
        return Ok(path);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home
        .join(".local")
        .join("state")
        .join("zonectl")
        .join("logs");
    log::debug!("Using default log dir: {}", path.display());
    Ok(path)
}

/// Get the config directory path
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var(ENV_CONFIG_DIR) {
        let path = expand(&dir);
        log::debug!("Using config dir from {}: {}", ENV_CONFIG_DIR, path.display());
        return Ok(path);
    }

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME") {
        let path = PathBuf::from(xdg_config).join("zonectl");
        log::debug!("Using XDG_CONFIG_HOME: {}", path.display());
        return Ok(path);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    let path = home.join(".config").join("zonectl");
    log::debug!("Using default config dir: {}", path.display());
    Ok(path)
}

/// Expand ~ and environment variables in a path string.
pub fn expand(path: &str) -> PathBuf {
    let expanded = shellexpand::full(path).unwrap_or(std::borrow::Cow::Borrowed(path));
    PathBuf::from(expanded.as_ref())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    /// Helper to run a test with temporary env var
    ///
    /// # Safety
    /// Uses unsafe env::set_var/remove_var; only for single-threaded test
    /// contexts where no other thread reads the environment concurrently.
    fn with_env_var<F, R>(key: &str, value: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::var(key).ok();
        // SAFETY: Tests run in isolation and don't read env vars concurrently
        unsafe { env::set_var(key, value) };
        let result = f();
        match original {
            // SAFETY: Tests run in isolation
            Some(v) => unsafe { env::set_var(key, v) },
            None => unsafe { env::remove_var(key) },
        }
        result
    }

    /// Helper to run a test with env var removed
    fn without_env_var<F, R>(key: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let original = env::var(key).ok();
        // SAFETY: Tests run in isolation and don't read env vars concurrently
        unsafe { env::remove_var(key) };
        let result = f();
        if let Some(v) = original {
            // SAFETY: Tests run in isolation
            unsafe { env::set_var(key, v) };
        }
        result
    }

    #[test]
    fn test_log_dir_env_override() {
        with_env_var(ENV_LOG_DIR, "/custom/log/path", || {
            let result = log_dir().unwrap();
            assert_eq!(result, PathBuf::from("/custom/log/path"));
        });
    }

    #[test]
    fn test_config_dir_env_override() {
        with_env_var(ENV_CONFIG_DIR, "/custom/config/path", || {
            let result = config_dir().unwrap();
            assert_eq!(result, PathBuf::from("/custom/config/path"));
        });
    }

    #[test]
    fn test_log_dir_xdg_state_home() {
        without_env_var(ENV_LOG_DIR, || {
            with_env_var("XDG_STATE_HOME", "/tmp/xdg-state-test", || {
                let result = log_dir().unwrap();
                assert_eq!(result, PathBuf::from("/tmp/xdg-state-test/zonectl/logs"));
            });
        });
    }

    #[test]
    fn test_log_dir_default() {
        without_env_var(ENV_LOG_DIR, || {
            without_env_var("XDG_STATE_HOME", || {
                let result = log_dir().unwrap();
                let home = dirs::home_dir().unwrap();
                assert_eq!(
                    result,
                    home.join(".local").join("state").join("zonectl").join("logs")
                );
            });
        });
    }

    #[test]
    fn test_expand_with_tilde() {
        let result = expand("~/test/path");
        let home = dirs::home_dir().unwrap();
        assert_eq!(result, home.join("test").join("path"));
    }

    #[test]
    fn test_expand_absolute() {
        let result = expand("/absolute/path");
        assert_eq!(result, PathBuf::from("/absolute/path"));
    }

    #[test]
    fn test_env_var_constants() {
        assert_eq!(ENV_LOG_DIR, "ZONECTL_LOG_DIR");
        assert_eq!(ENV_CONFIG_DIR, "ZONECTL_CONFIG_DIR");
    }
}
