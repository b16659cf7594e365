//! # tzkit
//!
//! Query, validate and set the host system time zone.
//!
//! The OS zone database is an external collaborator reached through the
//! [`ZoneBackend`] trait: `timedatectl` backs systemd Linux hosts and
//! `systemsetup` backs macOS. [`MockBackend`] keeps everything in memory so
//! callers can test reconciliation logic without touching the host.
//!
//! ## Example
//!
//! ```no_run
//! use tzkit::platform;
//!
//! let backend = platform::default_backend().unwrap();
//! let current = backend.current_zone().unwrap();
//! println!("system time zone: {current}");
//! ```

pub mod backend;
pub mod error;
pub mod platform;
pub mod types;

pub use backend::{MockBackend, Systemsetup, Timedatectl, ZoneBackend};
pub use error::{Error, ErrorCategory, Result};
pub use types::ZoneId;
