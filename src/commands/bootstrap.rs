//! `zonectl bootstrap` - fetch the configuration script and run it
//!
//! Phase order is fixed: privilege gate, reachability probe, fetch,
//! optional pin verification, persist, execute, cleanup. The temp file is
//! scoped to `run_script`, so its `Drop` removes it on every path out of
//! that function, including error unwinds.

use std::time::Duration;

use anyhow::Result;

use crate::Context;
use crate::artifact::ScriptArtifact;
use crate::cli::BootstrapArgs;
use crate::config::Config;
use crate::fetch::{self, FetchError, Fetcher};
use crate::privilege;
use crate::runlog::RunLog;
use crate::ui;

/// Returns the configuration script's exit code on a completed run
pub fn run(ctx: &Context, args: BootstrapArgs) -> Result<i32> {
    let config = Config::load()?;
    let url = config.bootstrap_url(args.url.as_deref());

    let mut log = RunLog::open("bootstrap", ctx.quiet)?;
    log.announce();

    // Privilege gate comes before any network or temp-file work
    if let Err(e) = privilege::require_elevated("bootstrapping") {
        log.error(&format!("{e:#}"));
        ui::dim("Re-run under sudo or as root");
        log.announce();
        return Err(e);
    }

    let fetcher = Fetcher::new(Duration::from_secs(args.timeout), args.insecure_http);

    let body = match fetch_script(&fetcher, &url, args.pin.as_deref(), &mut log) {
        Ok(body) => body,
        Err(e) => {
            log.error(&format!("{e:#}"));
            if let Some(fetch_err) = e.downcast_ref::<FetchError>() {
                ui::dim(fetch_err.advice());
            }
            log.announce();
            return Err(e);
        }
    };

    let outcome = run_script(&body, &mut log);
    if let Err(e) = &outcome {
        log.error(&format!("{e:#}"));
        ui::dim("Check the run log and the system logs for what the script did");
    }
    log.announce();
    outcome
}

fn fetch_script(
    fetcher: &Fetcher,
    url: &str,
    pin: Option<&str>,
    log: &mut RunLog,
) -> Result<String> {
    log.info(&format!("probing {url}"));
    fetcher.probe(url)?;

    log.info("host reachable; fetching script");
    let body = fetcher.fetch_text(url)?;
    log.info(&format!("fetched {} bytes", body.len()));

    match pin {
        Some(expected) => {
            fetch::verify_pin(&body, expected)?;
            log.ok("script digest matches the pin");
        }
        None => log.warn("no digest pin given; the fetched script is unverified"),
    }

    Ok(body)
}

fn run_script(body: &str, log: &mut RunLog) -> Result<i32> {
    let artifact = ScriptArtifact::persist(body)?;
    log.info(&format!("script persisted to {}", artifact.path().display()));

    let status = artifact.execute()?;
    let code = status.code().unwrap_or(1);
    if status.success() {
        log.ok("configuration script finished successfully");
    } else {
        log.error(&format!("configuration script exited with status {code}"));
    }

    Ok(code)
    // artifact dropped here: the temp file is removed on every path out of this scope
}
