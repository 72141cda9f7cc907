//! Display digest of a password.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of the password's UTF-8 bytes.
///
/// Independent of the SHA-1 used for the breach range lookup.
pub fn digest(password: &SecretString) -> String {
    hex::encode(Sha256::digest(password.expose_secret().as_bytes()))
}
