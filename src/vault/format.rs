//! Binary vault envelope and atomic file I/O.
//!
//! A vault file has this layout:
//!
//! ```text
//! [salt: 16 bytes][nonce: 12 bytes][ciphertext + GCM tag]
//! ```
//!
//! - **Salt**: Argon2id salt, fixed for the lifetime of the vault.
//! - **Nonce**: fresh for every save.
//! - **Ciphertext**: the serialized record list, sealed with AES-256-GCM.
//!   The last 16 bytes are the authentication tag.
//!
//! The whole envelope is rewritten on every save.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::crypto::{NONCE_LEN, SALT_LEN, TAG_LEN};
use crate::errors::{PassVaultError, Result};

/// Smallest possible envelope: salt + nonce + tag of an empty payload.
pub const MIN_ENVELOPE_LEN: usize = SALT_LEN + NONCE_LEN + TAG_LEN;

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

/// The parsed parts of a vault file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub salt: [u8; SALT_LEN],
    pub nonce: [u8; NONCE_LEN],
    /// Ciphertext with the auth tag appended.
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    /// Concatenate `salt || nonce || ciphertext`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(SALT_LEN + NONCE_LEN + self.ciphertext.len());
        buf.extend_from_slice(&self.salt);
        buf.extend_from_slice(&self.nonce);
        buf.extend_from_slice(&self.ciphertext);
        buf
    }

    /// Split raw file bytes into salt, nonce and ciphertext.
    ///
    /// Anything too short to hold a tag is reported exactly like a failed
    /// tag check, so truncation does not stand out from a wrong password.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < MIN_ENVELOPE_LEN {
            return Err(PassVaultError::WrongPasswordOrCorrupt);
        }

        let (salt, rest) = data.split_at(SALT_LEN);
        let (nonce, ciphertext) = rest.split_at(NONCE_LEN);

        Ok(Self {
            salt: salt
                .try_into()
                .map_err(|_| PassVaultError::WrongPasswordOrCorrupt)?,
            nonce: nonce
                .try_into()
                .map_err(|_| PassVaultError::WrongPasswordOrCorrupt)?,
            ciphertext: ciphertext.to_vec(),
        })
    }
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Read the raw envelope bytes from `path`.
pub fn read_vault(path: &Path) -> Result<Vec<u8>> {
    match fs::read(path) {
        Ok(data) => Ok(data),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(PassVaultError::NotFound(path.to_path_buf()))
        }
        Err(e) => Err(PassVaultError::Io(e)),
    }
}

/// Write envelope bytes to disk **atomically**.
///
/// 1. Write to a temp file (mode `0o600`) in the same directory.
/// 2. Flush it to stable storage.
/// 3. Rename the temp file over the target path.
/// 4. Sync the directory so the rename itself is durable.
///
/// If any step fails the previous vault file is left as it was.
pub fn write_vault(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp_path = temp_path_for(path);

    if let Err(e) = write_synced(&tmp_path, bytes) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e.into());
    }

    rename_into_place(&tmp_path, path)?;

    #[cfg(unix)]
    {
        // Persist the directory entry. Failure here does not undo the
        // rename, so it is not worth reporting.
        if let Ok(dir) = fs::File::open(parent) {
            let _ = dir.sync_all();
        }
    }
    #[cfg(not(unix))]
    let _ = parent;

    Ok(())
}

/// The sibling temp path used while writing `path`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or(Path::new("."));
    parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ))
}

fn write_synced(tmp_path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    // Owner-only from the moment the file exists.
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(tmp_path)?;

    // A stale temp file keeps its old mode, so set it again explicitly.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(bytes)?;
    file.sync_all()
}

/// Rename `temp_path` over `destination`, removing the temp file if
/// the rename fails.
///
/// `fs::rename` replaces the destination on every supported platform, so
/// the target is never deleted up front: it always holds either the old or
/// the new envelope.
fn rename_into_place(temp_path: &Path, destination: &Path) -> Result<()> {
    fs::rename(temp_path, destination).map_err(|e| {
        let _ = fs::remove_file(temp_path);
        PassVaultError::Io(e)
    })
}
