//! Password strength evaluator - weighted criteria scoring.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::config::ScoringConfig;
use crate::criteria::criteria;

/// Earned contribution per criterion, in criterion declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBreakdown {
    entries: Vec<(&'static str, u32)>,
}

impl ScoreBreakdown {
    fn push(&mut self, name: &'static str, earned: u32) {
        self.entries.push((name, earned));
    }

    /// Contribution of the named criterion, if it exists.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, earned)| *earned)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for ScoreBreakdown {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, earned) in &self.entries {
            map.serialize_entry(name, earned)?;
        }
        map.end()
    }
}

/// Coarse strength label derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Strength {
    Weak,
    Medium,
    Strong,
}

impl Strength {
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=49 => Strength::Weak,
            50..=79 => Strength::Medium,
            _ => Strength::Strong,
        }
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strength::Weak => write!(f, "Weak"),
            Strength::Medium => write!(f, "Medium"),
            Strength::Strong => write!(f, "Strong"),
        }
    }
}

/// Score, per-criterion breakdown and remediation feedback for one password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evaluation {
    pub score: u32,
    pub breakdown: ScoreBreakdown,
    pub feedback: Vec<String>,
}

impl Evaluation {
    pub fn strength(&self) -> Strength {
        Strength::from_score(self.score)
    }
}

/// Evaluates a password with the canonical 25/20/20/15/20 weighting.
pub fn evaluate(password: &SecretString) -> Evaluation {
    evaluate_with(password, &ScoringConfig::default())
}

/// Evaluates a password against the five criteria weighted per `config`.
///
/// Each criterion contributes `floor(credit * weight)`; the score is the sum
/// of the contributions. Every criterion earning nothing adds its remedy to
/// the feedback, in criterion order. Never fails.
pub fn evaluate_with(password: &SecretString, config: &ScoringConfig) -> Evaluation {
    let pwd = password.expose_secret();

    let mut score = 0u32;
    let mut breakdown = ScoreBreakdown::default();
    let mut feedback = Vec::new();

    for criterion in criteria(config) {
        let credit = criterion.measure(pwd, config);
        let earned = credit.weighted(criterion.weight);
        breakdown.push(criterion.name, earned);
        score += earned;
        if credit.is_zero() {
            feedback.push(criterion.remedy(config));
        }
    }

    Evaluation {
        score,
        breakdown,
        feedback,
    }
}
