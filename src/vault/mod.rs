//! Vault module — encrypted credential storage.
//!
//! This module provides:
//! - `Record` and its input/edit types (`record`)
//! - The ordered record set and its serialization (`store`)
//! - The binary envelope and atomic file I/O (`format`)
//! - Locked/unlocked vault handles (`session`)

pub mod format;
pub mod record;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use format::Envelope;
pub use record::{NewRecord, Record, RecordId, RecordUpdate};
pub use session::{LockedVault, VaultSession};
pub use store::RecordStore;
