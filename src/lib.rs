//! Password auditing library
//!
//! Scores a password against five weighted criteria, checks it against the
//! Have I Been Pwned corpus with a k-anonymity range query, computes a
//! SHA-256 display digest, and generates random passwords.
//!
//! # Features
//!
//! - `async` (default): Enables channel-based analysis with cancellation support
//! - `tracing`: Enables logging via tracing crate
//! - `cli`: Builds the interactive `pwd-audit` binary
//!
//! # Environment Variables
//!
//! - `PWD_BREACH_API_URL`: Range endpoint
//!   (default: `https://api.pwnedpasswords.com/range/`)
//! - `PWD_BREACH_TIMEOUT_SECS`: Lookup timeout in seconds (default: `5`)
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_audit::{Analyzer, GeneratorConfig, generate};
//! use secrecy::{ExposeSecret, SecretString};
//!
//! let analyzer = Analyzer::from_env();
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//! let result = analyzer.analyze(&password);
//!
//! println!("Score: {}", result.score);
//! println!("Breached: {} ({} times)", result.breach.breached, result.breach.count);
//! for line in &result.feedback {
//!     println!("- {}", line);
//! }
//!
//! let generated = generate(&GeneratorConfig::default()).expect("valid config");
//! println!("{}", generated.expose_secret());
//! ```

mod breach;
mod config;
mod criteria;
mod digest;
mod evaluator;
mod generator;
mod report;

pub use breach::{
    BreachChecker, BreachError, BreachResult, BreachStatus, DisabledSource, HttpRangeSource,
    RangeSource, check_breach, find_suffix, range_key,
};
pub use config::{
    BreachConfig, ConfigError, DEFAULT_BREACH_API_URL, DEFAULT_BREACH_TIMEOUT,
    DEFAULT_LENGTH_TARGET, LengthCredit, ScoringConfig, Weights,
};
pub use criteria::{Credit, Criterion, SPECIAL_CHARS, criteria};
pub use digest::digest;
pub use evaluator::{Evaluation, ScoreBreakdown, Strength, evaluate, evaluate_with};
pub use generator::{
    DEFAULT_LENGTH, GeneratorConfig, GeneratorError, SpecialSet, generate, generate_default,
};
pub use report::{Analyzer, EvaluationResult, analyze};

#[cfg(feature = "async")]
pub use report::analyze_tx;
