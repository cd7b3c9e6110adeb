use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Raised by the AEAD layer for any tag, key or length mismatch.
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("Random source unavailable: {0}")]
    RandomSourceFailed(String),

    #[error(
        "Password length {0} is out of range (1 to {max})",
        max = crate::crypto::generator::MAX_LENGTH
    )]
    InvalidLength(usize),

    // --- Vault errors ---
    #[error("Vault not found at {0}")]
    NotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Wrong master password or corrupted vault")]
    WrongPasswordOrCorrupt,

    #[error("Malformed vault data: {0}")]
    MalformedData(String),

    // --- Record errors ---
    #[error("Record '{0}' not found")]
    RecordNotFound(String),

    #[error("Record id '{0}' is ambiguous, use more characters")]
    AmbiguousRecordId(String),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Audit error: {0}")]
    AuditError(String),
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
