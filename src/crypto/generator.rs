//! Random password generation.
//!
//! Generated passwords become stored secrets, so characters are drawn
//! from the OS CSPRNG.  Rejection sampling keeps every character of the
//! alphabet equally likely.

use rand::rngs::OsRng;
use rand::TryRngCore;
use zeroize::{Zeroize, Zeroizing};

use crate::errors::{PassVaultError, Result};

/// Letters and digits, always part of the alphabet.
pub const ALPHANUMERIC: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Extra characters added when symbols are requested.
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[]{}|;:,.<>?";

/// Upper bound on a generated password, to catch fat-fingered lengths.
pub const MAX_LENGTH: usize = 1024;

/// Generate a random password of `length` characters.
pub fn generate_secret(length: usize, include_symbols: bool) -> Result<Zeroizing<String>> {
    if length == 0 || length > MAX_LENGTH {
        return Err(PassVaultError::InvalidLength(length));
    }

    let mut alphabet = String::from(ALPHANUMERIC);
    if include_symbols {
        alphabet.push_str(SYMBOLS);
    }
    let alphabet = alphabet.as_bytes();

    // Largest multiple of the alphabet size that fits in a byte. Bytes at
    // or above it are discarded so `byte % n` stays uniform.
    let n = alphabet.len();
    let limit = 256 - (256 % n);

    let mut out = Zeroizing::new(String::with_capacity(length));
    let mut buf = [0u8; 64];
    while out.len() < length {
        OsRng
            .try_fill_bytes(&mut buf)
            .map_err(|e| PassVaultError::RandomSourceFailed(e.to_string()))?;
        for &b in buf.iter() {
            if out.len() == length {
                break;
            }
            if usize::from(b) < limit {
                out.push(char::from(alphabet[usize::from(b) % n]));
            }
        }
    }
    buf.zeroize();

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_requested_length() {
        for len in [1, 8, 16, 64, 200] {
            assert_eq!(generate_secret(len, true).unwrap().len(), len);
        }
    }

    #[test]
    fn alphanumeric_only_without_symbols() {
        let pw = generate_secret(500, false).unwrap();
        assert!(pw.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn symbols_only_from_fixed_set() {
        let pw = generate_secret(500, true).unwrap();
        assert!(pw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || SYMBOLS.contains(c)));
    }

    #[test]
    fn symbols_show_up_in_long_passwords() {
        // 26 of 88 characters are symbols; 1024 draws without one is
        // practically impossible.
        let pw = generate_secret(MAX_LENGTH, true).unwrap();
        assert!(pw.chars().any(|c| SYMBOLS.contains(c)));
    }

    #[test]
    fn rejects_zero_and_huge_lengths() {
        assert!(matches!(
            generate_secret(0, false),
            Err(PassVaultError::InvalidLength(0))
        ));
        assert!(matches!(
            generate_secret(MAX_LENGTH + 1, false),
            Err(PassVaultError::InvalidLength(_))
        ));
        assert!(generate_secret(MAX_LENGTH, false).is_ok());
    }

    #[test]
    fn consecutive_passwords_differ() {
        let a = generate_secret(32, true).unwrap();
        let b = generate_secret(32, true).unwrap();
        assert_ne!(*a, *b);
    }
}
