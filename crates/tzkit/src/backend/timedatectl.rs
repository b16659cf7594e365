//! Linux backend over `timedatectl`.

use crate::backend::{ZoneBackend, run_tool};
use crate::error::{Error, Result};
use crate::types::ZoneId;

pub(crate) const TOOL: &str = "timedatectl";

/// systemd's `timedatectl`, present on any systemd-based Linux.
///
/// Reads work for any user; `set-timezone` needs root (or a polkit grant).
#[derive(Debug, Clone, Copy, Default)]
pub struct Timedatectl;

impl Timedatectl {
    /// Create the backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ZoneBackend for Timedatectl {
    fn current_zone(&self) -> Result<ZoneId> {
        let out = run_tool(TOOL, &["show", "--property=Timezone", "--value"])?;
        let zone = ZoneId::new(out.as_str());
        if zone.is_empty() {
            return Err(Error::UnexpectedOutput {
                tool: TOOL.to_string(),
                output: out,
            });
        }
        Ok(zone)
    }

    fn available_zones(&self) -> Result<Vec<ZoneId>> {
        let out = run_tool(TOOL, &["list-timezones"])?;
        Ok(parse_zone_list(&out))
    }

    fn set_zone(&self, zone: &ZoneId) -> Result<()> {
        run_tool(TOOL, &["set-timezone", zone.as_str()])?;
        Ok(())
    }
}

/// One identifier per line.
pub(crate) fn parse_zone_list(out: &str) -> Vec<ZoneId> {
    out.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ZoneId::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zone_list() {
        let out = "Africa/Abidjan\nAmerica/Chicago\n\nUTC\n";
        let zones = parse_zone_list(out);
        assert_eq!(zones.len(), 3);
        assert_eq!(zones[1], ZoneId::new("America/Chicago"));
        assert_eq!(zones[2], ZoneId::new("UTC"));
    }

    #[test]
    fn test_parse_zone_list_empty() {
        assert!(parse_zone_list("").is_empty());
        assert!(parse_zone_list("\n\n").is_empty());
    }
}
