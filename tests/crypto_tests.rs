//! Integration tests for the PassVault crypto module.

use std::collections::HashSet;

use passvault::crypto::{
    decrypt, derive_key_with_params, encrypt, generate_salt, Argon2Params, VaultKey, KEY_LEN,
    NONCE_LEN,
};
use passvault::errors::PassVaultError;

/// Cheap KDF settings so the tests don't spend seconds in Argon2.
const FAST: Argon2Params = Argon2Params {
    memory_kib: 8192,
    iterations: 1,
    parallelism: 1,
};

fn test_key(byte: u8) -> VaultKey {
    VaultKey::new([byte; KEY_LEN])
}

// ---------------------------------------------------------------------------
// Encryption
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = test_key(0xAB);
    let plaintext = br#"[{"service":"github","login":"alice","password":"hunter2"}]"#;

    let (nonce, ciphertext) = encrypt(&key, plaintext).expect("encrypt should succeed");

    // Ciphertext carries the 16-byte tag on top of the payload.
    assert_eq!(ciphertext.len(), plaintext.len() + 16);

    let recovered = decrypt(&key, &nonce, &ciphertext).expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn nonces_do_not_repeat() {
    let key = test_key(0xCD);
    let mut seen: HashSet<[u8; NONCE_LEN]> = HashSet::new();

    for _ in 0..10_000 {
        let (nonce, _) = encrypt(&key, b"x").unwrap();
        assert!(seen.insert(nonce), "nonce reused");
    }
}

#[test]
fn every_single_bit_flip_is_detected() {
    let key = test_key(0x42);
    let (nonce, ciphertext) = encrypt(&key, b"correct horse battery staple").unwrap();

    for i in 0..NONCE_LEN * 8 {
        let mut bad = nonce;
        bad[i / 8] ^= 1 << (i % 8);
        assert!(matches!(
            decrypt(&key, &bad, &ciphertext),
            Err(PassVaultError::AuthenticationFailed)
        ));
    }

    // Covers the payload and the trailing tag.
    for i in 0..ciphertext.len() * 8 {
        let mut bad = ciphertext.clone();
        bad[i / 8] ^= 1 << (i % 8);
        assert!(matches!(
            decrypt(&key, &nonce, &bad),
            Err(PassVaultError::AuthenticationFailed)
        ));
    }
}

#[test]
fn wrong_key_fails_authentication() {
    let (nonce, ciphertext) = encrypt(&test_key(0x11), b"secret").unwrap();
    let result = decrypt(&test_key(0x22), &nonce, &ciphertext);
    assert!(matches!(result, Err(PassVaultError::AuthenticationFailed)));
}

#[test]
fn truncated_ciphertext_fails_authentication() {
    let key = test_key(0x33);
    let (nonce, ciphertext) = encrypt(&key, b"secret").unwrap();

    let result = decrypt(&key, &nonce, &ciphertext[..ciphertext.len() - 1]);
    assert!(matches!(result, Err(PassVaultError::AuthenticationFailed)));

    let result = decrypt(&key, &nonce, &ciphertext[..4]);
    assert!(matches!(result, Err(PassVaultError::AuthenticationFailed)));
}

// ---------------------------------------------------------------------------
// Key derivation
// ---------------------------------------------------------------------------

#[test]
fn derived_key_decrypts_what_it_encrypted() {
    let salt = generate_salt().unwrap();
    let key = derive_key_with_params(b"correct horse", &salt, &FAST).unwrap();
    let (nonce, ciphertext) = encrypt(&key, b"payload").unwrap();

    let again = derive_key_with_params(b"correct horse", &salt, &FAST).unwrap();
    assert_eq!(decrypt(&again, &nonce, &ciphertext).unwrap(), b"payload");

    let other = derive_key_with_params(b"battery staple", &salt, &FAST).unwrap();
    assert!(decrypt(&other, &nonce, &ciphertext).is_err());
}
