//! `zonectl status` - report drift without touching anything

use anyhow::Result;

use crate::Context;
use crate::cli::StatusArgs;
use crate::config::Config;
use crate::resource::{Resource, TimeZoneResource};
use crate::ui;
use tzkit::ZoneId;

/// Returns whether the host is in the desired state
pub fn run(ctx: &Context, args: &StatusArgs) -> Result<bool> {
    let config = Config::load()?;
    let target = ZoneId::new(config.desired_zone(args.zone.as_deref()));

    let resource = TimeZoneResource::with_host_backend(target)?;
    let current = resource.current()?;
    let desired = resource.desired();
    let compliant = current == desired;

    if ctx.quiet {
        return Ok(compliant);
    }

    ui::header("Time zone");
    ui::kv("current", &current);
    ui::kv("desired", &desired);
    if compliant {
        ui::success("in desired state");
    } else {
        ui::warn("out of desired state; run `zonectl apply`");
    }

    Ok(compliant)
}
