//! Reconciliation engine
//!
//! Drives one resource through a single synchronous pass: validate the
//! desired value, read the current one, compare, converge if they differ,
//! then re-read to confirm the change stuck. A final advisory re-check
//! records a second confirmation without affecting the outcome. There is no
//! retry loop; any failure aborts the run and propagates.

use anyhow::Result;
use thiserror::Error;

use crate::resource::{ApplyContext, Reconciliation, Resource};
use crate::runlog::RunLog;

/// Options for a reconciliation run
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcileOptions {
    /// Report what would change without changing it
    pub dry_run: bool,
    /// Verbose diagnostics
    pub verbose: bool,
}

/// The mutation reported success but the system still disagrees.
///
/// Deliberately a distinct type from an apply failure: it signals that the
/// change was issued and accepted, yet did not take effect.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{resource}: applied {target} but the system reports {actual}")]
pub struct VerifyMismatch {
    pub resource: String,
    pub target: String,
    pub actual: String,
}

/// Converge one resource to its desired value
pub fn reconcile(
    resource: &dyn Resource,
    opts: ReconcileOptions,
    log: &mut RunLog,
) -> Result<Reconciliation> {
    log.info(&resource.description());

    resource.validate()?;
    log.info("target validated against the host zone database");

    let current = resource.current()?;
    let desired = resource.desired();

    if current == desired {
        log.ok(&format!("already in desired state ({current})"));
        recheck(resource, log);
        return Ok(Reconciliation::Compliant);
    }

    log.info(&format!("drift detected: {current} -> {desired}"));

    if opts.dry_run {
        log.info("dry run: leaving the system unchanged");
        return Ok(Reconciliation::WouldApply {
            from: current,
            to: desired,
        });
    }

    let mut ctx = ApplyContext {
        dry_run: false,
        verbose: opts.verbose,
    };
    resource.apply(&mut ctx)?;

    // A clean apply does not prove the change stuck; re-read and compare.
    let observed = resource.current()?;
    if observed != desired {
        log.error(&format!(
            "verification failed: the system still reports {observed}"
        ));
        return Err(VerifyMismatch {
            resource: resource.id(),
            target: desired,
            actual: observed,
        }
        .into());
    }
    log.ok(&format!("verified: the system now reports {observed}"));

    recheck(resource, log);

    Ok(Reconciliation::Applied {
        from: current,
        to: desired,
    })
}

/// Advisory second confirmation. Logged, never fatal.
fn recheck(resource: &dyn Resource, log: &mut RunLog) {
    match resource.test() {
        Ok(true) => log.ok("compliance re-check passed"),
        Ok(false) => log.warn("compliance re-check found drift immediately after the run"),
        Err(e) => log.warn(&format!("compliance re-check could not read the system: {e:#}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::TimeZoneResource;
    use tzkit::{MockBackend, ZoneId};

    fn test_log() -> (tempfile::TempDir, RunLog) {
        let dir = tempfile::tempdir().unwrap();
        let log = RunLog::open_in(dir.path(), "test", true).unwrap();
        (dir, log)
    }

    fn resource_over(mock: &MockBackend, target: &str) -> TimeZoneResource {
        TimeZoneResource::new(ZoneId::new(target), Box::new(mock.clone()))
    }

    #[test]
    fn test_compliant_never_calls_set() {
        let mock = MockBackend::new("America/Chicago", &["UTC", "America/Chicago"]);
        let resource = resource_over(&mock, "America/Chicago");
        let (_dir, mut log) = test_log();

        let outcome = reconcile(&resource, ReconcileOptions::default(), &mut log).unwrap();
        assert_eq!(outcome, Reconciliation::Compliant);
        assert_eq!(mock.set_calls(), 0);
    }

    #[test]
    fn test_drift_converges_to_target() {
        let mock = MockBackend::new("Europe/Lisbon", &["Europe/Lisbon", "America/Chicago"]);
        let resource = resource_over(&mock, "America/Chicago");
        let (_dir, mut log) = test_log();

        let outcome = reconcile(&resource, ReconcileOptions::default(), &mut log).unwrap();
        assert_eq!(
            outcome,
            Reconciliation::Applied {
                from: "Europe/Lisbon".to_string(),
                to: "America/Chicago".to_string(),
            }
        );
        assert_eq!(mock.reported_zone(), ZoneId::new("America/Chicago"));
        assert_eq!(mock.set_calls(), 1);
    }

    #[test]
    fn test_unknown_target_aborts_before_any_mutation() {
        let mock = MockBackend::new("UTC", &["UTC", "America/Chicago"]);
        let resource = resource_over(&mock, "Nonexistent/Zone");
        let (_dir, mut log) = test_log();

        let result = reconcile(&resource, ReconcileOptions::default(), &mut log);
        assert!(result.is_err());
        assert_eq!(mock.set_calls(), 0);
        assert_eq!(mock.reported_zone(), ZoneId::new("UTC"));
    }

    #[test]
    fn test_silent_apply_failure_is_a_verify_mismatch() {
        let mock =
            MockBackend::new("UTC", &["UTC", "America/Chicago"]).ignore_writes();
        let resource = resource_over(&mock, "America/Chicago");
        let (_dir, mut log) = test_log();

        let err = reconcile(&resource, ReconcileOptions::default(), &mut log).unwrap_err();
        let mismatch = err
            .downcast_ref::<VerifyMismatch>()
            .expect("expected a verification mismatch, not an apply error");
        assert_eq!(mismatch.target, "America/Chicago");
        assert_eq!(mismatch.actual, "UTC");
        assert_eq!(mock.set_calls(), 1);
    }

    #[test]
    fn test_failed_apply_is_not_a_verify_mismatch() {
        let mock = MockBackend::new("UTC", &["UTC", "America/Chicago"]).fail_writes();
        let resource = resource_over(&mock, "America/Chicago");
        let (_dir, mut log) = test_log();

        let err = reconcile(&resource, ReconcileOptions::default(), &mut log).unwrap_err();
        assert!(err.downcast_ref::<VerifyMismatch>().is_none());
    }

    #[test]
    fn test_dry_run_reports_without_mutating() {
        let mock = MockBackend::new("UTC", &["UTC", "America/Chicago"]);
        let resource = resource_over(&mock, "America/Chicago");
        let (_dir, mut log) = test_log();

        let opts = ReconcileOptions {
            dry_run: true,
            verbose: false,
        };
        let outcome = reconcile(&resource, opts, &mut log).unwrap();
        assert_eq!(
            outcome,
            Reconciliation::WouldApply {
                from: "UTC".to_string(),
                to: "America/Chicago".to_string(),
            }
        );
        assert_eq!(mock.set_calls(), 0);
    }

    #[test]
    fn test_run_is_idempotent() {
        let mock = MockBackend::new("UTC", &["UTC", "America/Chicago"]);
        let resource = resource_over(&mock, "America/Chicago");
        let (_dir, mut log) = test_log();

        let first = reconcile(&resource, ReconcileOptions::default(), &mut log).unwrap();
        assert!(first.changed());

        let second = reconcile(&resource, ReconcileOptions::default(), &mut log).unwrap();
        assert_eq!(second, Reconciliation::Compliant);
        // The second pass read, compared and stopped
        assert_eq!(mock.set_calls(), 1);
    }
}
