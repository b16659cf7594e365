//! `zonectl zones` - list identifiers the host recognizes

use anyhow::Result;

use crate::Context;
use crate::cli::ZonesArgs;

pub fn run(_ctx: &Context, args: &ZonesArgs) -> Result<()> {
    let backend = tzkit::platform::default_backend()?;
    let zones = backend.available_zones()?;

    let filter = args.filter.as_ref().map(|f| f.to_lowercase());
    let mut shown = 0usize;
    for zone in &zones {
        if let Some(f) = &filter {
            if !zone.as_str().to_lowercase().contains(f) {
                continue;
            }
        }
        println!("{zone}");
        shown += 1;
    }
    log::debug!("{shown} of {} zones shown", zones.len());

    Ok(())
}
