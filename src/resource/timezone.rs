//! System time zone resource

use anyhow::{Context, Result};
use std::fmt;

use tzkit::{ZoneBackend, ZoneId};

use super::{ApplyContext, Resource};

/// The system time zone, managed against an OS zone-database identifier
pub struct TimeZoneResource {
    target: ZoneId,
    backend: Box<dyn ZoneBackend>,
}

impl TimeZoneResource {
    /// Manage the time zone through an explicit backend
    pub fn new(target: ZoneId, backend: Box<dyn ZoneBackend>) -> Self {
        Self { target, backend }
    }

    /// Manage the time zone through the backend for the current host
    pub fn with_host_backend(target: ZoneId) -> Result<Self> {
        Ok(Self::new(target, tzkit::platform::default_backend()?))
    }

    /// The desired identifier
    pub fn target(&self) -> &ZoneId {
        &self.target
    }
}

impl fmt::Debug for TimeZoneResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimeZoneResource")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl Resource for TimeZoneResource {
    fn id(&self) -> String {
        format!("timezone:{}", self.target)
    }

    fn description(&self) -> String {
        format!("Set system time zone to {}", self.target)
    }

    fn validate(&self) -> Result<()> {
        let zones = self
            .backend
            .available_zones()
            .context("Could not enumerate the host zone database")?;
        if zones.iter().any(|zone| zone == &self.target) {
            return Ok(());
        }

        let err = tzkit::Error::UnknownZone {
            zone: self.target.to_string(),
        };
        match suggest(&zones, self.target.as_str()) {
            Some(candidate) => {
                Err(anyhow::Error::new(err)).with_context(|| format!("did you mean {candidate}?"))
            }
            None => Err(err.into()),
        }
    }

    fn current(&self) -> Result<String> {
        let zone = self
            .backend
            .current_zone()
            .context("Could not read the current system time zone")?;
        Ok(zone.to_string())
    }

    fn desired(&self) -> String {
        self.target.to_string()
    }

    fn apply(&self, ctx: &mut ApplyContext) -> Result<()> {
        if ctx.dry_run {
            return Ok(());
        }
        if ctx.verbose {
            log::info!("setting system time zone to {}", self.target);
        }
        self.backend
            .set_zone(&self.target)
            .with_context(|| format!("Could not set the system time zone to {}", self.target))
    }
}

/// Nearest candidate for an unknown identifier: case-insensitive match
/// first, then a zone ending in the same city segment.
fn suggest<'a>(zones: &'a [ZoneId], target: &str) -> Option<&'a ZoneId> {
    let lower = target.to_lowercase();
    if let Some(exact) = zones.iter().find(|zone| zone.as_str().to_lowercase() == lower) {
        return Some(exact);
    }
    let city = lower.rsplit('/').next()?;
    if city.is_empty() {
        return None;
    }
    zones
        .iter()
        .find(|zone| zone.as_str().to_lowercase().ends_with(city))
}
