//! Gateway configuration for the XO client.
//!
//! This module provides configuration options for reaching a ledger node's
//! REST gateway and for pacing the commit-status poll loop.

use crate::error::{XoError, XoResult};
use std::time::Duration;
use url::Url;

/// Default interval between two batch-status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Default per-request HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for HTTP connection pooling.
///
/// Controls how connections are reused across requests.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of idle connections per host.
    /// Default: unlimited (no limit)
    pub max_idle_per_host: Option<usize>,
    /// How long to keep idle connections alive.
    /// Default: 90 seconds
    pub idle_timeout: Duration,
    /// TCP keepalive interval, if enabled.
    /// Default: 60 seconds
    pub tcp_keepalive: Option<Duration>,
    /// Whether to enable TCP nodelay (disable Nagle's algorithm).
    /// Default: true
    pub tcp_nodelay: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: None, // unlimited
            idle_timeout: Duration::from_secs(90),
            tcp_keepalive: Some(Duration::from_secs(60)),
            tcp_nodelay: true,
        }
    }
}

impl PoolConfig {
    /// Creates a minimal configuration for short-lived interactive use.
    ///
    /// - Minimal idle connections
    /// - Short idle timeout
    pub fn minimal() -> Self {
        Self {
            max_idle_per_host: Some(2),
            idle_timeout: Duration::from_secs(10),
            tcp_keepalive: None,
            tcp_nodelay: true,
        }
    }
}

/// Configuration for the XO client.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use xo_client::XoConfig;
///
/// // A bare host:port is treated as plain HTTP
/// let config = XoConfig::new("localhost:8008").unwrap();
/// assert_eq!(config.base_url().as_str(), "http://localhost:8008/");
///
/// let config = XoConfig::local()
///     .with_timeout(Duration::from_secs(10))
///     .with_poll_interval(Duration::from_millis(500));
/// ```
#[derive(Debug, Clone)]
pub struct XoConfig {
    /// REST gateway URL
    pub(crate) base_url: Url,
    /// Per-request HTTP timeout
    pub(crate) timeout: Duration,
    /// Sleep between two batch-status polls
    pub(crate) poll_interval: Duration,
    /// Connection pool configuration
    pub(crate) pool_config: PoolConfig,
}

impl Default for XoConfig {
    fn default() -> Self {
        Self::local()
    }
}

impl XoConfig {
    /// Creates a configuration for the given gateway.
    ///
    /// The URL may omit its scheme, in which case `http://` is assumed.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed or is not an HTTP(S) URL.
    pub fn new(base_url: &str) -> XoResult<Self> {
        let base_url = parse_base_url(base_url)?;
        Ok(Self {
            base_url,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            pool_config: PoolConfig::default(),
        })
    }

    /// Creates a configuration for a gateway on the local machine
    /// (`http://127.0.0.1:8008`).
    pub fn local() -> Self {
        Self {
            base_url: Url::parse("http://127.0.0.1:8008").expect("valid local URL"),
            timeout: Duration::from_secs(10),
            poll_interval: DEFAULT_POLL_INTERVAL,
            pool_config: PoolConfig::minimal(),
        }
    }

    /// Sets the per-request HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the interval between batch-status polls.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Sets the connection pool configuration.
    pub fn with_pool(mut self, pool_config: PoolConfig) -> Self {
        self.pool_config = pool_config;
        self
    }

    /// Returns the gateway base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the per-request HTTP timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the interval between batch-status polls.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Returns the connection pool configuration.
    pub fn pool_config(&self) -> &PoolConfig {
        &self.pool_config
    }
}

fn parse_base_url(raw: &str) -> XoResult<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(XoError::Config("gateway URL is empty".into()));
    }
    let url = if raw.starts_with("http://") || raw.starts_with("https://") {
        Url::parse(raw)?
    } else {
        Url::parse(&format!("http://{raw}"))?
    };
    if url.cannot_be_a_base() {
        return Err(XoError::Config(format!("{raw} cannot be used as a base URL")));
    }
    Ok(url)
}
