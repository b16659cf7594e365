//! Error types for zone operations.
//!
//! Errors are categorized so callers can give appropriate user feedback:
//! each category carries a short description and static remediation advice.

use std::fmt;
use std::io;

/// Result type alias for zone operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of zone errors for user feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Platform family has no zone backend.
    Platform,
    /// The platform zone tool is missing or could not be started.
    Tool,
    /// The zone tool ran and reported failure.
    Command,
    /// The requested zone is not in the host database.
    Zone,
    /// Output from the zone tool could not be understood.
    Format,
}

impl ErrorCategory {
    /// Get a user-friendly description of this error category.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::Platform => "Unsupported platform",
            Self::Tool => "Zone tool unavailable",
            Self::Command => "Zone tool reported failure",
            Self::Zone => "Unknown time zone",
            Self::Format => "Unexpected zone tool output",
        }
    }

    /// Get actionable advice for resolving this error category.
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::Platform => "Only Linux (timedatectl) and macOS (systemsetup) hosts are supported",
            Self::Tool => "Install the platform zone tool or fix PATH so it can be found",
            Self::Command => "Re-run with elevated privileges and check the system logs",
            Self::Zone => "Pick an identifier the host lists as supported",
            Self::Format => "The zone tool may have changed its output format; check its version",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Errors that can occur while reading or changing the system time zone.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No backend exists for this OS family.
    #[error("unsupported platform: {os}")]
    UnsupportedPlatform {
        /// Operating system.
        os: String,
    },

    /// The platform zone tool is not on PATH.
    #[error("zone tool not found on PATH: {tool}")]
    ToolMissing {
        /// Tool name.
        tool: String,
    },

    /// The zone tool could not be started.
    #[error("failed to run {tool}: {source}")]
    Spawn {
        /// Tool name.
        tool: String,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The zone tool exited with a failure status.
    #[error("{tool} {action} failed: {detail}")]
    CommandFailed {
        /// Tool name.
        tool: String,
        /// Subcommand or flag that was invoked.
        action: String,
        /// Trimmed stderr, or the exit status when stderr was empty.
        detail: String,
    },

    /// The zone tool produced output this crate cannot parse.
    #[error("could not parse {tool} output: {output:?}")]
    UnexpectedOutput {
        /// Tool name.
        tool: String,
        /// The offending output.
        output: String,
    },

    /// The requested identifier is not in the host zone database.
    #[error("unknown time zone: {zone}")]
    UnknownZone {
        /// The rejected identifier.
        zone: String,
    },
}

impl Error {
    /// Create a `CommandFailed` error.
    pub fn command(
        tool: impl Into<String>,
        action: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            tool: tool.into(),
            action: action.into(),
            detail: detail.into(),
        }
    }

    /// Get the error category for user feedback.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::UnsupportedPlatform { .. } => ErrorCategory::Platform,
            Error::ToolMissing { .. } | Error::Spawn { .. } => ErrorCategory::Tool,
            Error::CommandFailed { .. } => ErrorCategory::Command,
            Error::UnexpectedOutput { .. } => ErrorCategory::Format,
            Error::UnknownZone { .. } => ErrorCategory::Zone,
        }
    }
}
