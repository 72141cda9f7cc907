//! Full password analysis: score, breach exposure and digest in one result.

use secrecy::SecretString;
use serde::Serialize;

#[cfg(feature = "async")]
use std::sync::Arc;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

#[cfg(feature = "async")]
use tokio_util::sync::CancellationToken;

use crate::breach::{BreachChecker, BreachResult};
use crate::config::{BreachConfig, ScoringConfig};
use crate::digest::digest;
use crate::evaluator::{Evaluation, ScoreBreakdown, Strength, evaluate_with};

/// Merged result of one analysis.
///
/// Serializes as `{score, breakdown, feedback, breached, breach_count,
/// breach_status, sha256}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationResult {
    pub score: u32,
    pub breakdown: ScoreBreakdown,
    pub feedback: Vec<String>,
    #[serde(flatten)]
    pub breach: BreachResult,
    #[serde(rename = "sha256")]
    pub digest: String,
}

impl EvaluationResult {
    pub fn strength(&self) -> Strength {
        Strength::from_score(self.score)
    }
}

/// Scoring configuration plus breach checker, shared across analyses.
#[derive(Debug, Default)]
pub struct Analyzer {
    pub scoring: ScoringConfig,
    pub breach: BreachChecker,
}

impl Analyzer {
    pub fn new(scoring: ScoringConfig, breach: BreachChecker) -> Self {
        Self { scoring, breach }
    }

    /// Default scoring, breach lookup configured from the environment.
    pub fn from_env() -> Self {
        Self::new(ScoringConfig::default(), BreachChecker::new(BreachConfig::from_env()))
    }

    /// Default scoring, no network access.
    pub fn offline() -> Self {
        Self::new(ScoringConfig::default(), BreachChecker::disabled())
    }

    pub fn analyze(&self, password: &SecretString) -> EvaluationResult {
        analyze(password, self)
    }
}

/// Runs the evaluator, the breach check and the digest over one password.
///
/// Blocks for up to the breach lookup timeout. Safe to call from a tokio
/// worker, but async code should use `analyze_tx` so the worker is not held.
pub fn analyze(password: &SecretString, analyzer: &Analyzer) -> EvaluationResult {
    let Evaluation {
        score,
        breakdown,
        feedback,
    } = evaluate_with(password, &analyzer.scoring);

    EvaluationResult {
        score,
        breakdown,
        feedback,
        breach: analyzer.breach.check(password),
        digest: digest(password),
    }
}

/// Async version that sends the analysis result via channel.
///
/// The blocking lookup runs on the blocking pool. Nothing is sent when the
/// token is cancelled first.
#[cfg(feature = "async")]
pub async fn analyze_tx(
    password: SecretString,
    analyzer: Arc<Analyzer>,
    token: CancellationToken,
    tx: mpsc::Sender<EvaluationResult>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("analysis is about to start...");

    let task = tokio::task::spawn_blocking(move || analyze(&password, &analyzer));

    let result = tokio::select! {
        biased;
        _ = token.cancelled() => {
            #[cfg(feature = "tracing")]
            tracing::info!("analysis cancelled");
            return;
        }
        joined = task => joined,
    };

    match result {
        Ok(result) => {
            if let Err(_e) = tx.send(result).await {
                #[cfg(feature = "tracing")]
                tracing::error!("Failed to send analysis result: {}", _e);
            }
        }
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::error!("Analysis task failed: {}", _e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breach::{BreachError, BreachStatus};

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    fn breached_analyzer(count: u64) -> Analyzer {
        Analyzer::new(
            ScoringConfig::default(),
            BreachChecker::with_source(move |_: &str| -> Result<String, BreachError> {
                Ok(format!("1E4C9B93F3F0682250B6CF8331B7EE68FD8:{}", count))
            }),
        )
    }

    #[test]
    fn test_analyze_merges_components() {
        let result = analyze(&secret("password"), &breached_analyzer(99));

        assert_eq!(result.score, 16 + 20);
        assert_eq!(result.feedback.len(), 3);
        assert!(result.breach.breached);
        assert_eq!(result.breach.count, 99);
        assert_eq!(
            result.digest,
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
        assert_eq!(result.strength(), Strength::Weak);
    }

    #[test]
    fn test_analyze_offline_is_unknown() {
        let result = Analyzer::offline().analyze(&secret("Correct-Horse9"));

        assert_eq!(result.score, 100);
        assert!(result.feedback.is_empty());
        assert!(!result.breach.breached);
        assert_eq!(result.breach.count, 0);
        assert_eq!(result.breach.status(), BreachStatus::Unknown);
    }

    #[test]
    fn test_evaluation_result_json_shape() {
        let result = analyze(&secret("password"), &breached_analyzer(5));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["score"], 36);
        assert_eq!(json["breached"], true);
        assert_eq!(json["breach_count"], 5);
        assert_eq!(json["breach_status"]["breached"], 5);
        assert_eq!(json["breakdown"]["length"], 16);
        assert_eq!(json["feedback"][0], "Add uppercase letters.");
        assert_eq!(
            json["sha256"],
            "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8"
        );
    }

    #[test]
    fn test_evaluation_result_json_unknown() {
        let result = Analyzer::offline().analyze(&secret(""));
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["breached"], false);
        assert_eq!(json["breach_count"], 0);
        assert_eq!(json["breach_status"], "unknown");
    }
}

#[cfg(all(test, feature = "async"))]
mod async_tests {
    use super::*;
    use crate::breach::BreachStatus;
    use crate::breach::test_server::{http_response, serve_once};

    fn secret(s: &str) -> SecretString {
        SecretString::new(s.to_string().into())
    }

    #[tokio::test]
    async fn test_analyze_tx_sends_result() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();

        analyze_tx(secret("TestPass123!"), Arc::new(Analyzer::offline()), token, tx).await;

        let result = rx.recv().await.expect("Should receive analysis");
        assert_eq!(result.score, 100);
    }

    #[tokio::test]
    async fn test_analyze_tx_cancelled() {
        let (tx, mut rx) = mpsc::channel(1);
        let token = CancellationToken::new();
        token.cancel();

        analyze_tx(secret("TestPass123!"), Arc::new(Analyzer::offline()), token, tx).await;

        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_analyze_tx_through_http_source() {
        let url = serve_once(http_response(
            "200 OK",
            "1E4C9B93F3F0682250B6CF8331B7EE68FD8:3861493",
        ));
        let analyzer = Analyzer::new(
            ScoringConfig::default(),
            BreachChecker::new(BreachConfig {
                api_url: url,
                ..BreachConfig::default()
            }),
        );
        let (tx, mut rx) = mpsc::channel(1);

        analyze_tx(secret("password"), Arc::new(analyzer), CancellationToken::new(), tx).await;

        let result = rx.recv().await.expect("Should receive analysis");
        assert_eq!(result.breach.status(), BreachStatus::Breached(3_861_493));
        assert_eq!(result.score, 36);
    }

    #[tokio::test]
    async fn test_sync_analyze_inside_runtime_fails_open() {
        let analyzer = Analyzer::new(
            ScoringConfig::default(),
            BreachChecker::new(BreachConfig {
                api_url: "http://127.0.0.1:1/range/".to_string(),
                ..BreachConfig::default()
            }),
        );

        let result = analyzer.analyze(&secret("Correct-Horse9"));
        assert_eq!(result.score, 100);
        assert_eq!(result.breach.status(), BreachStatus::Unknown);
    }
}
