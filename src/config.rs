//! Scoring and breach lookup configuration.

use std::time::Duration;
use thiserror::Error;

/// Default HIBP range endpoint; the 5-character prefix is appended.
pub const DEFAULT_BREACH_API_URL: &str = "https://api.pwnedpasswords.com/range/";

/// Default timeout for a single range request.
pub const DEFAULT_BREACH_TIMEOUT: Duration = Duration::from_secs(5);

/// Length at which the length criterion saturates.
pub const DEFAULT_LENGTH_TARGET: usize = 12;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Criterion weights must sum to 100, got {0}")]
    WeightsSum(u32),
    #[error("Length target must be positive")]
    ZeroLengthTarget,
}

/// Per-criterion weights, in criterion declaration order.
///
/// Only obtainable through [`Weights::new`], [`Weights::uniform`] or
/// `Default`, so every instance sums to 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    length: u32,
    uppercase: u32,
    lowercase: u32,
    digits: u32,
    special: u32,
}

impl Weights {
    /// Builds a weight set, rejecting any combination that does not sum to 100.
    pub fn new(
        length: u32,
        uppercase: u32,
        lowercase: u32,
        digits: u32,
        special: u32,
    ) -> Result<Self, ConfigError> {
        let weights = Self {
            length,
            uppercase,
            lowercase,
            digits,
            special,
        };
        match weights.total() {
            100 => Ok(weights),
            other => Err(ConfigError::WeightsSum(other)),
        }
    }

    /// Every criterion weighted 20.
    pub const fn uniform() -> Self {
        Self {
            length: 20,
            uppercase: 20,
            lowercase: 20,
            digits: 20,
            special: 20,
        }
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn uppercase(&self) -> u32 {
        self.uppercase
    }

    pub fn lowercase(&self) -> u32 {
        self.lowercase
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    pub fn special(&self) -> u32 {
        self.special
    }

    pub fn total(&self) -> u32 {
        // saturating so that absurd inputs still report a sum != 100
        [self.length, self.uppercase, self.lowercase, self.digits, self.special]
            .iter()
            .fold(0u32, |acc, w| acc.saturating_add(*w))
    }
}

impl Default for Weights {
    /// The canonical 25/20/20/15/20 weighting.
    fn default() -> Self {
        Self {
            length: 25,
            uppercase: 20,
            lowercase: 20,
            digits: 15,
            special: 20,
        }
    }
}

/// How the length criterion converts a length into credit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthCredit {
    /// `min(len / target, 1)`, truncated when weighted.
    #[default]
    Linear,
    /// Full credit iff `len >= target`, nothing otherwise.
    Threshold,
}

/// Configuration of the Evaluator.
///
/// Weights always sum to 100 and the length target is always positive, so
/// any score computed with it stays within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringConfig {
    weights: Weights,
    length_target: usize,
    length_credit: LengthCredit,
}

impl ScoringConfig {
    pub fn new(
        weights: Weights,
        length_target: usize,
        length_credit: LengthCredit,
    ) -> Result<Self, ConfigError> {
        if length_target == 0 {
            return Err(ConfigError::ZeroLengthTarget);
        }
        Ok(Self {
            weights,
            length_target,
            length_credit,
        })
    }

    pub fn with_weights(self, weights: Weights) -> Self {
        Self { weights, ..self }
    }

    pub fn with_length_credit(self, length_credit: LengthCredit) -> Self {
        Self {
            length_credit,
            ..self
        }
    }

    pub fn with_length_target(self, length_target: usize) -> Result<Self, ConfigError> {
        Self::new(self.weights, length_target, self.length_credit)
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    pub fn length_target(&self) -> usize {
        self.length_target
    }

    pub fn length_credit(&self) -> LengthCredit {
        self.length_credit
    }
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            length_target: DEFAULT_LENGTH_TARGET,
            length_credit: LengthCredit::Linear,
        }
    }
}

/// Configuration of the breach corpus lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreachConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub add_padding: bool,
}

impl Default for BreachConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BREACH_API_URL.to_string(),
            timeout: DEFAULT_BREACH_TIMEOUT,
            add_padding: false,
        }
    }
}

impl BreachConfig {
    /// Builds the lookup configuration from the environment.
    ///
    /// Priority for each field:
    /// 1. Environment variable (`PWD_BREACH_API_URL`, `PWD_BREACH_TIMEOUT_SECS`)
    /// 2. Built-in default
    ///
    /// An unparsable or zero timeout falls back to the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("PWD_BREACH_API_URL") {
            if !url.trim().is_empty() {
                config.api_url = url.trim().to_string();
            }
        }

        if let Ok(raw) = std::env::var("PWD_BREACH_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        "Ignoring invalid PWD_BREACH_TIMEOUT_SECS={:?}, using {:?}",
                        raw,
                        DEFAULT_BREACH_TIMEOUT
                    );
                }
            }
        }

        config
    }

    /// Full range URL for a hash prefix.
    pub fn range_url(&self, prefix: &str) -> String {
        if self.api_url.ends_with('/') {
            format!("{}{}", self.api_url, prefix)
        } else {
            format!("{}/{}", self.api_url, prefix)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn set_env(key: &str, value: &str) {
        // SAFETY: only touched from #[serial] tests
        unsafe { std::env::set_var(key, value); }
    }

    fn remove_env(key: &str) {
        // SAFETY: only touched from #[serial] tests
        unsafe { std::env::remove_var(key); }
    }

    #[test]
    fn test_default_weights_are_canonical() {
        let w = Weights::default();
        assert_eq!(
            (w.length(), w.uppercase(), w.lowercase(), w.digits(), w.special()),
            (25, 20, 20, 15, 20)
        );
        assert_eq!(w.total(), 100);
        assert_eq!(Weights::uniform().total(), 100);
    }

    #[test]
    fn test_weights_must_sum_to_100() {
        assert_eq!(Weights::new(30, 20, 20, 15, 20), Err(ConfigError::WeightsSum(105)));
        assert!(Weights::new(40, 15, 15, 15, 15).is_ok());
    }

    #[test]
    fn test_weights_reject_oversized_values() {
        assert_eq!(
            Weights::new(100, 100, 100, 100, 100),
            Err(ConfigError::WeightsSum(500))
        );
        assert!(matches!(
            Weights::new(u32::MAX, u32::MAX, 0, 0, 0),
            Err(ConfigError::WeightsSum(_))
        ));
    }

    #[test]
    fn test_scoring_config_rejects_zero_target() {
        let result = ScoringConfig::new(Weights::default(), 0, LengthCredit::Linear);
        assert_eq!(result, Err(ConfigError::ZeroLengthTarget));

        let result = ScoringConfig::default().with_length_target(0);
        assert_eq!(result, Err(ConfigError::ZeroLengthTarget));
    }

    #[test]
    fn test_scoring_config_builders() {
        let config = ScoringConfig::default()
            .with_weights(Weights::uniform())
            .with_length_credit(LengthCredit::Threshold)
            .with_length_target(16)
            .unwrap();

        assert_eq!(*config.weights(), Weights::uniform());
        assert_eq!(config.length_credit(), LengthCredit::Threshold);
        assert_eq!(config.length_target(), 16);
        assert_eq!(config.weights().total(), 100);
    }

    #[test]
    fn test_range_url_joins_prefix() {
        let mut config = BreachConfig::default();
        assert_eq!(config.range_url("21BD1"), "https://api.pwnedpasswords.com/range/21BD1");

        config.api_url = "http://localhost:8080/range".to_string();
        assert_eq!(config.range_url("21BD1"), "http://localhost:8080/range/21BD1");
    }

    #[test]
    #[serial]
    fn test_breach_config_from_env_defaults() {
        remove_env("PWD_BREACH_API_URL");
        remove_env("PWD_BREACH_TIMEOUT_SECS");

        assert_eq!(BreachConfig::from_env(), BreachConfig::default());
    }

    #[test]
    #[serial]
    fn test_breach_config_from_env_overrides() {
        set_env("PWD_BREACH_API_URL", "http://127.0.0.1:9999/range/");
        set_env("PWD_BREACH_TIMEOUT_SECS", "2");

        let config = BreachConfig::from_env();
        assert_eq!(config.api_url, "http://127.0.0.1:9999/range/");
        assert_eq!(config.timeout, Duration::from_secs(2));

        remove_env("PWD_BREACH_API_URL");
        remove_env("PWD_BREACH_TIMEOUT_SECS");
    }

    #[test]
    #[serial]
    fn test_breach_config_invalid_timeout_falls_back() {
        set_env("PWD_BREACH_TIMEOUT_SECS", "0");
        assert_eq!(BreachConfig::from_env().timeout, DEFAULT_BREACH_TIMEOUT);

        set_env("PWD_BREACH_TIMEOUT_SECS", "soon");
        assert_eq!(BreachConfig::from_env().timeout, DEFAULT_BREACH_TIMEOUT);

        remove_env("PWD_BREACH_TIMEOUT_SECS");
    }
}
