//! Password scoring criteria
//!
//! Each criterion measures one aspect of a password as a fraction of its weight.
//! The table order is the order of the breakdown and of the feedback.

mod length;
mod variety;

pub use length::length_criterion;
pub use variety::{
    SPECIAL_CHARS, digits_criterion, lowercase_criterion, special_criterion, uppercase_criterion,
};

use crate::config::ScoringConfig;

/// Fraction `earned / out_of` of a criterion's weight, always within `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credit {
    earned: usize,
    out_of: usize,
}

impl Credit {
    pub const FULL: Credit = Credit { earned: 1, out_of: 1 };
    pub const NONE: Credit = Credit { earned: 0, out_of: 1 };

    /// Builds `earned / out_of`, clamped to 1. A zero denominator yields no credit.
    pub fn ratio(earned: usize, out_of: usize) -> Self {
        if out_of == 0 {
            return Self::NONE;
        }
        Self {
            earned: earned.min(out_of),
            out_of,
        }
    }

    pub fn from_bool(present: bool) -> Self {
        if present { Self::FULL } else { Self::NONE }
    }

    pub fn is_zero(&self) -> bool {
        self.earned == 0
    }

    /// `floor(weight * earned / out_of)`.
    pub fn weighted(&self, weight: u32) -> u32 {
        let product = u64::from(weight) * self.earned as u64;
        (product / self.out_of as u64) as u32
    }
}

/// Measures a password against one criterion.
pub type Measure = fn(&str, &ScoringConfig) -> Credit;

/// Remediation line emitted when a criterion earns nothing.
pub type Remedy = fn(&ScoringConfig) -> String;

/// One row of the criterion table.
#[derive(Clone, Copy)]
pub struct Criterion {
    pub name: &'static str,
    pub weight: u32,
    measure: Measure,
    remedy: Remedy,
}

impl Criterion {
    pub fn new(name: &'static str, weight: u32, measure: Measure, remedy: Remedy) -> Self {
        Self {
            name,
            weight,
            measure,
            remedy,
        }
    }

    pub fn measure(&self, password: &str, config: &ScoringConfig) -> Credit {
        (self.measure)(password, config)
    }

    pub fn remedy(&self, config: &ScoringConfig) -> String {
        (self.remedy)(config)
    }
}

impl std::fmt::Debug for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Criterion")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish()
    }
}

/// The five fixed criteria, in declaration order, weighted per `config`.
pub fn criteria(config: &ScoringConfig) -> [Criterion; 5] {
    let w = config.weights();
    [
        length_criterion(w.length()),
        uppercase_criterion(w.uppercase()),
        lowercase_criterion(w.lowercase()),
        digits_criterion(w.digits()),
        special_criterion(w.special()),
    ]
}
