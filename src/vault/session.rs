//! Locked and unlocked vault handles.
//!
//! A vault is either a `LockedVault` (just a path, no key material) or a
//! `VaultSession` (key, salt and decrypted records in memory).  Locking
//! consumes the session, so a locked handle can never touch the key.
//!
//! The salt is read once, at create or open, and reused for every save in
//! the session.  The held key was derived from that salt; writing any other
//! salt next to it would produce a file the password can no longer open.

use std::fmt;
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use crate::crypto::{decrypt, derive_key, encrypt, generate_salt, VaultKey, SALT_LEN};
use crate::errors::{PassVaultError, Result};

use super::format::{self, Envelope};
use super::record::{NewRecord, Record, RecordId, RecordUpdate};
use super::store::RecordStore;

// ---------------------------------------------------------------------------
// LockedVault
// ---------------------------------------------------------------------------

/// A vault file that has not been unlocked.
#[derive(Debug, Clone)]
pub struct LockedVault {
    path: PathBuf,
}

impl LockedVault {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` if a vault file exists at this path.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Create a new vault at this path and unlock it.
    pub fn create(&self, password: &[u8]) -> Result<VaultSession> {
        VaultSession::create(&self.path, password)
    }

    /// Unlock the existing vault at this path.
    pub fn unlock(&self, password: &[u8]) -> Result<VaultSession> {
        VaultSession::open(&self.path, password)
    }
}

// ---------------------------------------------------------------------------
// VaultSession
// ---------------------------------------------------------------------------

/// An unlocked vault.
pub struct VaultSession {
    /// Path to the vault file on disk.
    path: PathBuf,

    /// Salt the key was derived from; written unchanged on every save.
    salt: [u8; SALT_LEN],

    /// The derived key (zeroized on drop).
    key: VaultKey,

    records: RecordStore,
}

impl VaultSession {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Create a brand-new vault file at `path`.
    ///
    /// Generates the vault's one and only salt, derives the key, and
    /// writes an empty vault so the file exists before any record does.
    pub fn create(path: &Path, password: &[u8]) -> Result<Self> {
        if path.exists() {
            return Err(PassVaultError::VaultAlreadyExists(path.to_path_buf()));
        }

        let salt = generate_salt()?;
        let key = derive_key(password, &salt)?;

        let session = Self {
            path: path.to_path_buf(),
            salt,
            key,
            records: RecordStore::new(),
        };
        session.save()?;

        Ok(session)
    }

    /// Open an existing vault file.
    pub fn open(path: &Path, password: &[u8]) -> Result<Self> {
        let data = format::read_vault(path)?;
        Self::from_envelope(path, password, &data)
    }

    /// Unlock envelope bytes already in memory.  Saves go to `path`.
    ///
    /// A wrong password, a damaged file and a truncated file all fail
    /// with `WrongPasswordOrCorrupt`.  Records stored without an id get
    /// one here, and the vault is saved once so the ids stick.
    pub fn from_envelope(path: &Path, password: &[u8], data: &[u8]) -> Result<Self> {
        let envelope = Envelope::parse(data)?;
        let key = derive_key(password, &envelope.salt)?;

        let plaintext = Zeroizing::new(
            decrypt(&key, &envelope.nonce, &envelope.ciphertext).map_err(|e| match e {
                PassVaultError::AuthenticationFailed => PassVaultError::WrongPasswordOrCorrupt,
                other => other,
            })?,
        );

        // The tag checked out, so a parse failure here is a bug, not tampering.
        let (records, assigned) = RecordStore::decode(&plaintext)?;

        let session = Self {
            path: path.to_path_buf(),
            salt: envelope.salt,
            key,
            records,
        };

        // Ids handed out just now must be on disk before anyone sees them.
        if assigned > 0 {
            session.save()?;
        }

        Ok(session)
    }

    /// Discard the key and return a locked handle to the same file.
    pub fn lock(self) -> LockedVault {
        LockedVault::new(self.path)
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Encrypt the current records and write them to disk atomically.
    pub fn save(&self) -> Result<()> {
        self.persist(&self.records)
    }

    /// Seal `records` into an envelope with the session salt.
    fn seal(&self, records: &RecordStore) -> Result<Vec<u8>> {
        let plaintext = records.serialize()?;
        let (nonce, ciphertext) = encrypt(&self.key, &plaintext)?;
        Ok(Envelope {
            salt: self.salt,
            nonce,
            ciphertext,
        }
        .to_bytes())
    }

    fn persist(&self, records: &RecordStore) -> Result<()> {
        let bytes = self.seal(records)?;
        format::write_vault(&self.path, &bytes)
    }

    /// Apply `change` to a copy of the records, save the copy, and only then
    /// make it current.  A failed change or save leaves everything as it was.
    fn commit<T>(&mut self, change: impl FnOnce(&mut RecordStore) -> Result<T>) -> Result<T> {
        let mut next = self.records.clone();
        let out = change(&mut next)?;
        next.sort();
        self.persist(&next)?;
        self.records = next;
        Ok(out)
    }

    // ------------------------------------------------------------------
    // Record operations (each one saves)
    // ------------------------------------------------------------------

    pub fn add_record(&mut self, record: NewRecord) -> Result<RecordId> {
        self.commit(|store| store.add(record))
    }

    pub fn update_record(&mut self, id: RecordId, update: RecordUpdate) -> Result<()> {
        self.commit(|store| store.update(id, update))
    }

    pub fn soft_delete_record(&mut self, id: RecordId) -> Result<()> {
        self.commit(|store| store.soft_delete(id))
    }

    pub fn restore_record(&mut self, id: RecordId) -> Result<()> {
        self.commit(|store| store.restore(id))
    }

    /// Permanently remove everything in the trash.  Returns the count removed.
    ///
    /// There is no undo: callers must confirm with the user first.
    pub fn purge_trash(&mut self) -> Result<usize> {
        self.commit(|store| Ok(store.purge()))
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn list_active(&self) -> Vec<&Record> {
        self.records.active()
    }

    pub fn list_trash(&self) -> Vec<&Record> {
        self.records.trash()
    }

    pub fn record(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id)
    }

    /// Resolve a (possibly shortened) id typed by the user.
    pub fn resolve(&self, prefix: &str) -> Result<RecordId> {
        self.records.resolve(prefix)
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }
}

impl fmt::Debug for VaultSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultSession")
            .field("path", &self.path)
            .field("records", &self.records.len())
            .finish_non_exhaustive()
    }
}
