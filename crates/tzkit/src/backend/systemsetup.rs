//! macOS backend over `systemsetup`.

use crate::backend::{ZoneBackend, run_tool};
use crate::error::{Error, Result};
use crate::types::ZoneId;

pub(crate) const TOOL: &str = "systemsetup";

/// macOS `systemsetup`; requires root for reads as well as writes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Systemsetup;

impl Systemsetup {
    /// Create the backend.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ZoneBackend for Systemsetup {
    fn current_zone(&self) -> Result<ZoneId> {
        let out = run_tool(TOOL, &["-gettimezone"])?;
        parse_get_output(&out).ok_or_else(|| Error::UnexpectedOutput {
            tool: TOOL.to_string(),
            output: out.trim().to_string(),
        })
    }

    fn available_zones(&self) -> Result<Vec<ZoneId>> {
        let out = run_tool(TOOL, &["-listtimezones"])?;
        Ok(parse_zone_list(&out))
    }

    fn set_zone(&self, zone: &ZoneId) -> Result<()> {
        run_tool(TOOL, &["-settimezone", zone.as_str()])?;
        Ok(())
    }
}

/// `systemsetup -gettimezone` prints `Time Zone: <identifier>`.
fn parse_get_output(out: &str) -> Option<ZoneId> {
    out.lines()
        .find_map(|line| line.trim().strip_prefix("Time Zone:"))
        .map(ZoneId::new)
        .filter(|zone| !zone.is_empty())
}

/// One identifier per line, below a `Time Zones:` banner on some releases.
fn parse_zone_list(out: &str) -> Vec<ZoneId> {
    out.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.ends_with(':'))
        .map(ZoneId::new)
        .collect()
}
