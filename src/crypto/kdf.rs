//! Password-based key derivation using Argon2id.
//!
//! Argon2id is a memory-hard KDF that protects a stolen vault file
//! against brute-force and GPU-based attacks.  The parameters are fixed
//! constants: the envelope does not record them, so every vault must be
//! opened with exactly the settings it was created with.

use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;
use rand::TryRngCore;
use zeroize::Zeroize;

use super::keys::{VaultKey, KEY_LEN};
use crate::errors::{PassVaultError, Result};

/// Length of the salt in bytes (128 bits).
pub const SALT_LEN: usize = 16;

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Derive the 32-byte vault key from a password and salt.
///
/// Uses the fixed vault parameters (64 MB, 3 iterations, 4 lanes).
pub fn derive_key(password: &[u8], salt: &[u8; SALT_LEN]) -> Result<VaultKey> {
    derive_key_with_params(password, salt, &Argon2Params::default())
}

/// Derive a key with explicit Argon2id parameters.
///
/// The same password + salt + params will always produce the same key.
/// Rejects parameters below the safety floor.
pub fn derive_key_with_params(
    password: &[u8],
    salt: &[u8; SALT_LEN],
    argon2_params: &Argon2Params,
) -> Result<VaultKey> {
    if argon2_params.memory_kib < MIN_MEMORY_KIB {
        return Err(PassVaultError::KeyDerivationFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            argon2_params.memory_kib
        )));
    }
    if argon2_params.iterations < 1 {
        return Err(PassVaultError::KeyDerivationFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if argon2_params.parallelism < 1 {
        return Err(PassVaultError::KeyDerivationFailed(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        Some(KEY_LEN),
    )
    .map_err(|e| PassVaultError::KeyDerivationFailed(format!("invalid Argon2 params: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut out = [0u8; KEY_LEN];
    let hashed = argon2.hash_password_into(password, salt, &mut out);
    let key = VaultKey::new(out);
    out.zeroize();
    hashed.map_err(|e| {
        PassVaultError::KeyDerivationFailed(format!("Argon2id hashing failed: {e}"))
    })?;

    Ok(key)
}

/// Generate a cryptographically random 16-byte salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| PassVaultError::RandomSourceFailed(e.to_string()))?;
    Ok(salt)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cheap parameters so unit tests stay fast.
    const FAST: Argon2Params = Argon2Params {
        memory_kib: MIN_MEMORY_KIB,
        iterations: 1,
        parallelism: 1,
    };

    #[test]
    fn same_inputs_give_same_key() {
        let salt = [7u8; SALT_LEN];
        let a = derive_key_with_params(b"pw", &salt, &FAST).unwrap();
        let b = derive_key_with_params(b"pw", &salt, &FAST).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn different_salt_gives_different_key() {
        let a = derive_key_with_params(b"pw", &[1u8; SALT_LEN], &FAST).unwrap();
        let b = derive_key_with_params(b"pw", &[2u8; SALT_LEN], &FAST).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn different_password_gives_different_key() {
        let salt = [3u8; SALT_LEN];
        let a = derive_key_with_params(b"pw-one", &salt, &FAST).unwrap();
        let b = derive_key_with_params(b"pw-two", &salt, &FAST).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn rejects_weak_memory_cost() {
        let params = Argon2Params {
            memory_kib: 1024,
            ..FAST
        };
        let result = derive_key_with_params(b"pw", &[0u8; SALT_LEN], &params);
        assert!(matches!(
            result,
            Err(PassVaultError::KeyDerivationFailed(_))
        ));
    }

    #[test]
    fn rejects_zero_iterations_and_lanes() {
        let no_iter = Argon2Params {
            iterations: 0,
            ..FAST
        };
        let no_lanes = Argon2Params {
            parallelism: 0,
            ..FAST
        };
        assert!(derive_key_with_params(b"pw", &[0u8; SALT_LEN], &no_iter).is_err());
        assert!(derive_key_with_params(b"pw", &[0u8; SALT_LEN], &no_lanes).is_err());
    }

    #[test]
    fn salts_are_random() {
        let a = generate_salt().unwrap();
        let b = generate_salt().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn default_params_match_vault_constants() {
        let p = Argon2Params::default();
        assert_eq!(p.memory_kib, 65_536);
        assert_eq!(p.iterations, 3);
        assert_eq!(p.parallelism, 4);
    }
}
