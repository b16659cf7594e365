//! `zonectl apply` - converge the system time zone

use anyhow::Result;

use crate::Context;
use crate::cli::ApplyArgs;
use crate::config::Config;
use crate::engine::{self, ReconcileOptions};
use crate::privilege;
use crate::resource::{Reconciliation, TimeZoneResource};
use crate::runlog::RunLog;
use crate::ui;
use tzkit::ZoneId;

pub fn run(ctx: &Context, args: ApplyArgs) -> Result<()> {
    let config = Config::load()?;
    let target = ZoneId::new(config.desired_zone(args.zone.as_deref()));

    let mut log = RunLog::open("apply", ctx.quiet)?;
    log.announce();

    if !args.dry_run {
        if let Err(e) = privilege::require_elevated("changing the system time zone") {
            log.error(&format!("{e:#}"));
            log.announce();
            return Err(e);
        }
    }

    let resource = match TimeZoneResource::with_host_backend(target) {
        Ok(resource) => resource,
        Err(e) => {
            log.error(&format!("{e:#}"));
            log.announce();
            return Err(e);
        }
    };
    let opts = ReconcileOptions {
        dry_run: args.dry_run,
        verbose: ctx.verbose > 0,
    };

    let result = engine::reconcile(&resource, opts, &mut log);
    match &result {
        Ok(Reconciliation::Compliant) => log.ok("nothing to do"),
        Ok(Reconciliation::Applied { from, to }) => {
            log.ok(&format!("time zone changed: {from} -> {to}"));
        }
        Ok(Reconciliation::WouldApply { from, to }) => {
            log.info(&format!("would change time zone: {from} -> {to}"));
        }
        Err(e) => {
            log.error(&format!("{e:#}"));
            if let Some(zone_err) = e.chain().find_map(|c| c.downcast_ref::<tzkit::Error>()) {
                ui::dim(zone_err.category().advice());
            }
        }
    }
    log.announce();

    result.map(|_| ())
}
