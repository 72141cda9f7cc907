//! Length criterion - rewards passwords up to the configured target length.

use super::{Credit, Criterion};
use crate::config::{LengthCredit, ScoringConfig};

/// Length criterion with the given weight.
pub fn length_criterion(weight: u32) -> Criterion {
    Criterion::new("length", weight, length_credit, length_remedy)
}

/// Credit for the password length, counted in chars rather than bytes.
///
/// Linear credit ramps to full at `length_target`; longer passwords earn
/// nothing extra. Threshold credit is all or nothing.
fn length_credit(password: &str, config: &ScoringConfig) -> Credit {
    let len = password.chars().count();
    match config.length_credit() {
        LengthCredit::Linear => Credit::ratio(len, config.length_target()),
        LengthCredit::Threshold => Credit::from_bool(len >= config.length_target()),
    }
}

fn length_remedy(config: &ScoringConfig) -> String {
    format!("Use at least {} characters.", config.length_target())
}
