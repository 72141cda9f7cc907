//! Random password generation.

use rand::Rng;
use rand::rngs::OsRng;
use secrecy::SecretString;
use thiserror::Error;

use crate::criteria::SPECIAL_CHARS;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const BASIC_SPECIAL: &[u8] = b"!@#_";

/// Length of passwords produced by [`generate_default`].
pub const DEFAULT_LENGTH: usize = 12;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Invalid generator config: {0}")]
    InvalidConfig(&'static str),
}

/// Punctuation drawn from when special characters are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecialSet {
    /// `!@#_`
    Basic,
    /// The full set recognised by the special-character criterion.
    #[default]
    Full,
}

impl SpecialSet {
    fn chars(&self) -> &'static [u8] {
        match self {
            SpecialSet::Basic => BASIC_SPECIAL,
            SpecialSet::Full => SPECIAL_CHARS.as_bytes(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub length: usize,
    pub use_upper: bool,
    pub use_lower: bool,
    pub use_digits: bool,
    pub use_special: bool,
    pub special_set: SpecialSet,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            length: 16,
            use_upper: true,
            use_lower: true,
            use_digits: true,
            use_special: true,
            special_set: SpecialSet::Full,
        }
    }
}

impl GeneratorConfig {
    /// Union of the enabled character classes, in class order.
    pub fn alphabet(&self) -> Result<Vec<u8>, GeneratorError> {
        let mut chars = Vec::new();
        if self.use_upper {
            chars.extend_from_slice(UPPERCASE);
        }
        if self.use_lower {
            chars.extend_from_slice(LOWERCASE);
        }
        if self.use_digits {
            chars.extend_from_slice(DIGITS);
        }
        if self.use_special {
            chars.extend_from_slice(self.special_set.chars());
        }

        if chars.is_empty() {
            return Err(GeneratorError::InvalidConfig("no character class enabled"));
        }
        Ok(chars)
    }
}

/// Draws `config.length` characters uniformly from the enabled classes.
///
/// Uses the operating system CSPRNG. No class coverage is guaranteed: an
/// all-lowercase result is a legal draw.
pub fn generate(config: &GeneratorConfig) -> Result<SecretString, GeneratorError> {
    if config.length == 0 {
        return Err(GeneratorError::InvalidConfig("length must be positive"));
    }
    let alphabet = config.alphabet()?;

    #[cfg(feature = "tracing")]
    tracing::debug!("Generating password of length {}", config.length);

    Ok(SecretString::new(draw(&alphabet, config.length).into()))
}

/// Twelve characters from letters, digits and `!@#_`.
pub fn generate_default() -> SecretString {
    let mut alphabet = Vec::with_capacity(66);
    alphabet.extend_from_slice(LOWERCASE);
    alphabet.extend_from_slice(UPPERCASE);
    alphabet.extend_from_slice(DIGITS);
    alphabet.extend_from_slice(BASIC_SPECIAL);
    SecretString::new(draw(&alphabet, DEFAULT_LENGTH).into())
}

// alphabet is ASCII and non-empty
fn draw(alphabet: &[u8], length: usize) -> String {
    let mut rng = OsRng;
    (0..length)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect()
}
