//! Resource contract for declarative system settings
//!
//! A resource is something with a readable current value and a desired
//! value, plus an apply function that converges one to the other. The
//! reconciliation engine drives the contract: validate the desired value,
//! read, compare, converge, confirm.

use anyhow::Result;
use std::fmt;

/// Context passed to apply operations
pub struct ApplyContext {
    pub dry_run: bool,
    pub verbose: bool,
}

/// Outcome of one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Current state already matched the target
    Compliant,
    /// State was changed and re-read as the target
    Applied { from: String, to: String },
    /// Dry run: a change is needed but was not made
    WouldApply { from: String, to: String },
}

impl Reconciliation {
    /// Whether the run mutated the system
    pub fn changed(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Core trait for declarative settings
pub trait Resource: fmt::Debug {
    /// Unique identifier for this resource (e.g. "timezone:America/Chicago")
    fn id(&self) -> String;

    /// Human-readable description
    fn description(&self) -> String;

    /// Check the desired value against what the host can accept.
    ///
    /// Runs before anything is read or written; an invalid desired value
    /// is a configuration error, not an apply failure.
    fn validate(&self) -> Result<()>;

    /// Read the current value from the system
    fn current(&self) -> Result<String>;

    /// The desired value
    fn desired(&self) -> String;

    /// Pure comparison of current against desired
    fn test(&self) -> Result<bool> {
        Ok(self.current()? == self.desired())
    }

    /// Converge the system to the desired value.
    ///
    /// Only called when `test` reported drift. Must either make the change
    /// or return an error naming what was attempted; callers re-read the
    /// value afterwards rather than trusting a clean return.
    fn apply(&self, ctx: &mut ApplyContext) -> Result<()>;
}

pub mod timezone;

pub use timezone::TimeZoneResource;
