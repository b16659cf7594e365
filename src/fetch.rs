//! Remote script retrieval
//!
//! Single-attempt fetch of the bootstrap script: a TCP reachability probe
//! against the URL's host first (so "no network" is distinguishable from
//! "bad URL or content"), then one whole-body GET with a size cap. No
//! retries anywhere in this module.

use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use thiserror::Error;
use ureq::Agent;
use ureq::http::Uri;

/// Scripts are small; anything bigger than this is not ours.
const MAX_BODY_SIZE: u64 = 1024 * 1024;

/// How long the reachability probe waits for a TCP handshake.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Result type alias for fetch operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Errors that can occur while retrieving the script.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be parsed.
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Plain-http transport was refused.
    #[error("plain-http URL refused: {url}")]
    InsecureUrl { url: String },

    /// The probe could not reach the host at all.
    #[error("host unreachable: {host}:{port}")]
    Unreachable { host: String, port: u16 },

    /// The GET itself failed.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: ureq::Error,
    },

    /// The URL answered with nothing usable.
    #[error("{url} returned an empty or whitespace-only body")]
    EmptyPayload { url: String },

    /// The body does not match the pinned digest.
    #[error("script digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },
}

impl FetchError {
    /// Static remediation guidance for this failure class
    #[must_use]
    pub fn advice(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } | Self::InsecureUrl { .. } => {
                "Check the script URL (https:// and well-formed)"
            }
            Self::Unreachable { .. } => {
                "Check network connectivity and any proxy or firewall in the way"
            }
            Self::Transport { .. } => {
                "Check that the URL is correct and the remote host is serving it"
            }
            Self::EmptyPayload { .. } => {
                "The URL answered but served no script; check the published location"
            }
            Self::DigestMismatch { .. } => {
                "The published script changed or the pin is stale; re-verify the source"
            }
        }
    }
}

/// Blocking HTTP client for the bootstrap flow
pub struct Fetcher {
    agent: Agent,
    allow_http: bool,
}

impl Fetcher {
    /// Create a fetcher with a global request timeout.
    ///
    /// TLS comes from rustls, which only negotiates 1.2 or newer.
    #[must_use]
    pub fn new(timeout: Duration, allow_http: bool) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build();
        Self {
            agent: config.into(),
            allow_http,
        }
    }

    /// Single TCP reachability probe against the URL's host. No retry.
    pub fn probe(&self, url: &str) -> Result<()> {
        let (host, port) = host_port(url, self.allow_http)?;
        let addrs = (host.as_str(), port)
            .to_socket_addrs()
            .map_err(|_| FetchError::Unreachable {
                host: host.clone(),
                port,
            })?;
        for addr in addrs {
            if TcpStream::connect_timeout(&addr, PROBE_TIMEOUT).is_ok() {
                return Ok(());
            }
        }
        Err(FetchError::Unreachable { host, port })
    }

    /// Fetch the script body as text. One attempt, whole body, size-capped.
    pub fn fetch_text(&self, url: &str) -> Result<String> {
        host_port(url, self.allow_http)?;

        let mut response = self
            .agent
            .get(url)
            .header("User-Agent", "zonectl")
            .call()
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_SIZE)
            .read_to_string()
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        non_empty(body, url)
    }
}

/// An empty or whitespace-only body is an invalid payload, not a script.
fn non_empty(body: String, url: &str) -> Result<String> {
    if body.trim().is_empty() {
        return Err(FetchError::EmptyPayload {
            url: url.to_string(),
        });
    }
    Ok(body)
}

/// Verify the fetched body against a pinned BLAKE3 digest.
pub fn verify_pin(body: &str, expected_hex: &str) -> Result<()> {
    let expected = expected_hex.trim();
    let actual = blake3::hash(body.as_bytes()).to_hex().to_string();
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(FetchError::DigestMismatch {
            expected: expected.to_lowercase(),
            actual,
        })
    }
}

/// Parse host and port out of the URL, enforcing the transport policy.
fn host_port(url: &str, allow_http: bool) -> Result<(String, u16)> {
    let uri: Uri = url.parse().map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: format!("{e}"),
    })?;

    let scheme = uri.scheme_str().unwrap_or_default();
    let default_port = match scheme {
        "https" => 443,
        "http" if allow_http => 80,
        "http" => {
            return Err(FetchError::InsecureUrl {
                url: url.to_string(),
            });
        }
        other => {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme {other:?}"),
            });
        }
    };

    let host = uri.host().ok_or_else(|| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: "missing host".to_string(),
    })?;

    Ok((host.to_string(), uri.port_u16().unwrap_or(default_port)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_port_https_default() {
        let (host, port) = host_port("https://example.com/tz.sh", false).unwrap();
        assert_eq!(host, "example.com");
        assert_eq!(port, 443);
    }

    #[test]
    fn test_host_port_explicit_port() {
        let (host, port) = host_port("https://example.com:8443/tz.sh", false).unwrap();
        assert_eq!(host, "example.com");
        assert_eq!(port, 8443);
    }

    #[test]
    fn test_host_port_refuses_plain_http() {
        let result = host_port("http://example.com/tz.sh", false);
        assert!(matches!(result, Err(FetchError::InsecureUrl { .. })));
    }

    #[test]
    fn test_host_port_allows_http_when_asked() {
        let (host, port) = host_port("http://example.com/tz.sh", true).unwrap();
        assert_eq!(host, "example.com");
        assert_eq!(port, 80);
    }

    #[test]
    fn test_host_port_rejects_other_schemes() {
        let result = host_port("ftp://example.com/tz.sh", false);
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }

    #[test]
    fn test_host_port_rejects_garbage() {
        let result = host_port("not a url at all", false);
        assert!(matches!(result, Err(FetchError::InvalidUrl { .. })));
    }

    #[test]
    fn test_non_empty_rejects_whitespace_body() {
        let url = "https://example.com/tz.sh";
        assert!(matches!(
            non_empty(String::new(), url),
            Err(FetchError::EmptyPayload { .. })
        ));
        assert!(matches!(
            non_empty("  \n\t \n".to_string(), url),
            Err(FetchError::EmptyPayload { .. })
        ));
    }

    #[test]
    fn test_non_empty_passes_real_body() {
        let body = non_empty("#!/bin/sh\nexit 0\n".to_string(), "https://x/y").unwrap();
        assert!(body.starts_with("#!/bin/sh"));
    }

    #[test]
    fn test_verify_pin_accepts_matching_digest() {
        let body = "#!/bin/sh\nexit 0\n";
        let pin = blake3::hash(body.as_bytes()).to_hex().to_string();
        assert!(verify_pin(body, &pin).is_ok());
        assert!(verify_pin(body, &pin.to_uppercase()).is_ok());
    }

    #[test]
    fn test_verify_pin_rejects_mismatch() {
        let body = "#!/bin/sh\nexit 0\n";
        let pin = blake3::hash(b"something else").to_hex().to_string();
        assert!(matches!(
            verify_pin(body, &pin),
            Err(FetchError::DigestMismatch { .. })
        ));
    }

    #[test]
    fn test_advice_is_always_present() {
        let errors = [
            FetchError::InvalidUrl {
                url: "x".to_string(),
                reason: "y".to_string(),
            },
            FetchError::InsecureUrl {
                url: "http://x".to_string(),
            },
            FetchError::Unreachable {
                host: "x".to_string(),
                port: 443,
            },
            FetchError::EmptyPayload {
                url: "https://x".to_string(),
            },
            FetchError::DigestMismatch {
                expected: "a".to_string(),
                actual: "b".to_string(),
            },
        ];
        for err in errors {
            assert!(!err.advice().is_empty());
        }
    }
}
