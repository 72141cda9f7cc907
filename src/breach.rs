//! Breach corpus lookup
//!
//! Checks a password against the Have I Been Pwned password corpus using a
//! k-anonymity range query: only the first 5 hex characters of the SHA-1
//! hash leave the process, the suffix is matched locally.

use reqwest::StatusCode;
use reqwest::blocking::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use sha1::{Digest, Sha1};
use std::sync::OnceLock;
use thiserror::Error;

use crate::config::BreachConfig;

/// Length of the hash prefix sent to the corpus.
pub const PREFIX_LEN: usize = 5;

#[derive(Error, Debug)]
pub enum BreachError {
    #[error("Breach lookup request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Breach corpus responded with status code {0}")]
    Status(u16),
    #[error("Malformed range line: {0:?}")]
    MalformedLine(String),
    #[error("Invalid breach count: {0:?}")]
    InvalidCount(String),
    #[error("Breach lookup thread panicked")]
    LookupPanicked,
    #[error("Breach lookup disabled")]
    Disabled,
}

/// Outcome of a lookup, keeping "could not tell" apart from "not found".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreachStatus {
    Breached(u64),
    Clean,
    Unknown,
}

/// Fail-open breach result: `count` is 0 unless `breached`.
///
/// A failed lookup reads exactly like a clean one through `breached` and
/// `count`; `status()` still tells them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreachResult {
    pub breached: bool,
    #[serde(rename = "breach_count")]
    pub count: u64,
    #[serde(rename = "breach_status")]
    status: BreachStatus,
}

impl BreachResult {
    pub fn status(&self) -> BreachStatus {
        self.status
    }
}

impl From<BreachStatus> for BreachResult {
    fn from(status: BreachStatus) -> Self {
        match status {
            BreachStatus::Breached(count) => Self {
                breached: true,
                count,
                status,
            },
            BreachStatus::Clean | BreachStatus::Unknown => Self {
                breached: false,
                count: 0,
                status,
            },
        }
    }
}

/// Uppercase hex SHA-1 of the password, split into range prefix and suffix.
pub fn range_key(password: &SecretString) -> (String, String) {
    let hash = hex::encode_upper(Sha1::digest(password.expose_secret().as_bytes()));
    let (prefix, suffix) = hash.split_at(PREFIX_LEN);
    (prefix.to_string(), suffix.to_string())
}

/// Scans a range body of `SUFFIX:COUNT` lines for `suffix`.
///
/// Returns the count when found. Any line without a `:` aborts the scan, as
/// does a matching line whose count does not parse.
pub fn find_suffix(body: &str, suffix: &str) -> Result<Option<u64>, BreachError> {
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let (line_suffix, count) = line
            .split_once(':')
            .ok_or_else(|| BreachError::MalformedLine(line.to_string()))?;
        if line_suffix.trim().eq_ignore_ascii_case(suffix) {
            let count = count
                .trim()
                .parse::<u64>()
                .map_err(|_| BreachError::InvalidCount(count.to_string()))?;
            return Ok(Some(count));
        }
    }
    Ok(None)
}

/// Provides the range body for a hash prefix.
pub trait RangeSource: Send + Sync {
    fn fetch_range(&self, prefix: &str) -> Result<String, BreachError>;
}

impl<F> RangeSource for F
where
    F: Fn(&str) -> Result<String, BreachError> + Send + Sync,
{
    fn fetch_range(&self, prefix: &str) -> Result<String, BreachError> {
        self(prefix)
    }
}

/// Range source backed by the HTTP range endpoint.
///
/// Uses the blocking reqwest client, built on first use and reused for
/// every later lookup. Inside a tokio runtime the request is moved to a
/// scoped OS thread, since the blocking client must not run on an async
/// worker; that thread still blocks the caller until the timeout at most.
/// Async callers should prefer `analyze_tx`, which keeps the lookup on the
/// blocking pool.
#[derive(Debug, Clone)]
pub struct HttpRangeSource {
    config: BreachConfig,
    client: OnceLock<Client>,
}

impl HttpRangeSource {
    pub fn new(config: BreachConfig) -> Self {
        Self {
            config,
            client: OnceLock::new(),
        }
    }

    fn client(&self) -> Result<&Client, BreachError> {
        if let Some(client) = self.client.get() {
            return Ok(client);
        }
        let client = Client::builder().timeout(self.config.timeout).build()?;
        Ok(self.client.get_or_init(|| client))
    }

    fn fetch_blocking(&self, prefix: &str) -> Result<String, BreachError> {
        let mut request = self.client()?.get(self.config.range_url(prefix));
        if self.config.add_padding {
            request = request.header("Add-Padding", "true");
        }

        let resp = request.send()?;
        match resp.status() {
            StatusCode::OK => Ok(resp.text()?),
            status => Err(BreachError::Status(status.as_u16())),
        }
    }
}

impl RangeSource for HttpRangeSource {
    fn fetch_range(&self, prefix: &str) -> Result<String, BreachError> {
        if !in_async_context() {
            return self.fetch_blocking(prefix);
        }

        std::thread::scope(|scope| {
            scope
                .spawn(|| self.fetch_blocking(prefix))
                .join()
                .unwrap_or(Err(BreachError::LookupPanicked))
        })
    }
}

#[cfg(feature = "async")]
fn in_async_context() -> bool {
    tokio::runtime::Handle::try_current().is_ok()
}

#[cfg(not(feature = "async"))]
fn in_async_context() -> bool {
    false
}

/// Source used when breach lookups are turned off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSource;

impl RangeSource for DisabledSource {
    fn fetch_range(&self, _prefix: &str) -> Result<String, BreachError> {
        Err(BreachError::Disabled)
    }
}

/// Checks passwords against a breach corpus.
pub struct BreachChecker {
    source: Box<dyn RangeSource>,
}

impl BreachChecker {
    /// Checker querying the HTTP endpoint described by `config`.
    pub fn new(config: BreachConfig) -> Self {
        Self::with_source(HttpRangeSource::new(config))
    }

    /// Checker configured from `PWD_BREACH_API_URL` / `PWD_BREACH_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self::new(BreachConfig::from_env())
    }

    pub fn with_source(source: impl RangeSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Checker that never performs a lookup; every result is unknown.
    pub fn disabled() -> Self {
        Self::with_source(DisabledSource)
    }

    /// Strict lookup: reports failures instead of folding them.
    pub fn lookup(&self, password: &SecretString) -> Result<BreachStatus, BreachError> {
        let (prefix, suffix) = range_key(password);

        #[cfg(feature = "tracing")]
        tracing::debug!("Querying breach corpus for prefix {}", prefix);

        let body = self.source.fetch_range(&prefix)?;
        match find_suffix(&body, &suffix)? {
            // padded entries carry a zero count
            Some(0) | None => Ok(BreachStatus::Clean),
            Some(count) => Ok(BreachStatus::Breached(count)),
        }
    }

    /// Fail-open check: any lookup failure yields "not breached, count 0".
    pub fn check(&self, password: &SecretString) -> BreachResult {
        match self.lookup(password) {
            Ok(status) => status.into(),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                match _e {
                    BreachError::Disabled => tracing::debug!("Breach lookup skipped: disabled"),
                    ref e => tracing::warn!("Breach lookup failed, treating as not breached: {}", e),
                }
                BreachStatus::Unknown.into()
            }
        }
    }
}

impl Default for BreachChecker {
    fn default() -> Self {
        Self::new(BreachConfig::default())
    }
}

impl std::fmt::Debug for BreachChecker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BreachChecker").finish_non_exhaustive()
    }
}

/// Fail-open check against the corpus configured from the environment.
pub fn check_breach(password: &SecretString) -> BreachResult {
    BreachChecker::from_env().check(password)
}
