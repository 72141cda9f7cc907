//! Character variety criteria - uppercase, lowercase, digits, special chars.

use super::{Credit, Criterion};
use crate::config::ScoringConfig;

/// Characters accepted by the special-character criterion.
pub const SPECIAL_CHARS: &str = "!@#$%^&*()_+{}[]:;<>,.?/~\\-";

pub fn has_uppercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
}

pub fn has_lowercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
}

/// ASCII `0-9` only; other Unicode decimal digits do not count.
pub fn has_digit(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

pub fn has_special(password: &str) -> bool {
    password.chars().any(|c| SPECIAL_CHARS.contains(c))
}

pub fn uppercase_criterion(weight: u32) -> Criterion {
    Criterion::new(
        "uppercase",
        weight,
        |pwd, _| Credit::from_bool(has_uppercase(pwd)),
        |_| "Add uppercase letters.".to_string(),
    )
}

pub fn lowercase_criterion(weight: u32) -> Criterion {
    Criterion::new(
        "lowercase",
        weight,
        |pwd, _| Credit::from_bool(has_lowercase(pwd)),
        |_| "Add lowercase letters.".to_string(),
    )
}

pub fn digits_criterion(weight: u32) -> Criterion {
    Criterion::new(
        "digits",
        weight,
        |pwd, _| Credit::from_bool(has_digit(pwd)),
        |_| "Include digits.".to_string(),
    )
}

pub fn special_criterion(weight: u32) -> Criterion {
    Criterion::new(
        "special",
        weight,
        |pwd, _| Credit::from_bool(has_special(pwd)),
        |_| "Include special characters.".to_string(),
    )
}
