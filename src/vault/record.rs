//! Credential records stored inside a vault.
//!
//! Records are identified by a random `RecordId` assigned at creation.
//! Ids survive sorting and are stored in the payload, so the CLI can
//! refer to a record across invocations.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{PassVaultError, Result};

/// Stable opaque identifier of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// A fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The first eight hex digits, used for display.
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }

    /// The full id as lowercase hex without dashes.
    pub fn to_simple(&self) -> String {
        self.0.simple().to_string()
    }

    /// Placeholder for a record loaded without an id.
    fn missing() -> Self {
        Self(Uuid::nil())
    }

    pub(crate) fn is_missing(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single stored credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Assigned on first load when missing from the payload.
    #[serde(default = "RecordId::missing")]
    pub id: RecordId,

    /// Service or site name (e.g. "github").
    pub service: String,

    pub login: String,

    pub password: String,

    /// Optional grouping; empty means "no group".
    #[serde(default)]
    pub group: String,

    /// Soft-delete flag. Deleted records live in the trash until purged.
    #[serde(rename = "is_deleted", default)]
    pub deleted: bool,

    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    /// Changes only when a field is edited.
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

/// Input for a new record.  The id and timestamps are filled in by the store.
#[derive(Clone, Default)]
pub struct NewRecord {
    pub service: String,
    pub login: String,
    pub password: String,
    pub group: String,
}

impl NewRecord {
    pub fn new(
        service: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            login: login.into(),
            password: password.into(),
            group: String::new(),
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Turn the input into a stored record with a fresh id.
    pub fn into_record(self) -> Result<Record> {
        validate_service(&self.service)?;
        let now = Utc::now();
        Ok(Record {
            id: RecordId::new(),
            service: self.service,
            login: self.login,
            password: self.password,
            group: self.group,
            deleted: false,
            created_at: now,
            updated_at: now,
        })
    }
}

/// A partial edit.  `None` leaves the field as it is.
#[derive(Clone, Default)]
pub struct RecordUpdate {
    pub service: Option<String>,
    pub login: Option<String>,
    pub password: Option<String>,
    pub group: Option<String>,
}

impl RecordUpdate {
    pub fn is_empty(&self) -> bool {
        self.service.is_none()
            && self.login.is_none()
            && self.password.is_none()
            && self.group.is_none()
    }
}

impl Record {
    /// Apply an edit and bump `updated_at`.
    pub fn apply(&mut self, update: RecordUpdate) -> Result<()> {
        if let Some(ref service) = update.service {
            validate_service(service)?;
        }
        if update.is_empty() {
            return Ok(());
        }

        if let Some(service) = update.service {
            self.service = service;
        }
        if let Some(login) = update.login {
            self.login = login;
        }
        if let Some(password) = update.password {
            self.password = password;
        }
        if let Some(group) = update.group {
            self.group = group;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

// Passwords never reach `{:?}` output.

const REDACTED: &str = "<redacted>";

impl fmt::Debug for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Record")
            .field("id", &self.id)
            .field("service", &self.service)
            .field("login", &self.login)
            .field("password", &REDACTED)
            .field("group", &self.group)
            .field("deleted", &self.deleted)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl fmt::Debug for NewRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewRecord")
            .field("service", &self.service)
            .field("login", &self.login)
            .field("password", &REDACTED)
            .field("group", &self.group)
            .finish()
    }
}

impl fmt::Debug for RecordUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordUpdate")
            .field("service", &self.service)
            .field("login", &self.login)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("group", &self.group)
            .finish()
    }
}

/// A service name is the only field a record cannot do without.
fn validate_service(service: &str) -> Result<()> {
    if service.trim().is_empty() {
        return Err(PassVaultError::InvalidRecord(
            "service name cannot be empty".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_gets_id_and_timestamps() {
        let rec = NewRecord::new("github", "alice", "pw")
            .with_group("work")
            .into_record()
            .unwrap();
        assert_eq!(rec.group, "work");
        assert!(!rec.deleted);
        assert_eq!(rec.created_at, rec.updated_at);
    }

    #[test]
    fn empty_service_is_rejected() {
        assert!(NewRecord::new("  ", "a", "b").into_record().is_err());
    }

    #[test]
    fn apply_changes_only_given_fields() {
        let mut rec = NewRecord::new("github", "alice", "old").into_record().unwrap();
        rec.apply(RecordUpdate {
            password: Some("new".into()),
            ..RecordUpdate::default()
        })
        .unwrap();
        assert_eq!(rec.password, "new");
        assert_eq!(rec.login, "alice");
        assert!(rec.updated_at >= rec.created_at);
    }

    #[test]
    fn empty_update_leaves_timestamp() {
        let mut rec = NewRecord::new("github", "alice", "pw").into_record().unwrap();
        let before = rec.clone();
        rec.apply(RecordUpdate::default()).unwrap();
        assert_eq!(rec, before);
    }

    #[test]
    fn serialized_flag_uses_is_deleted() {
        let rec = NewRecord::new("s", "l", "p").into_record().unwrap();
        let json = serde_json::to_string(&rec).unwrap();
        assert!(json.contains("\"is_deleted\":false"));
    }

    #[test]
    fn optional_fields_default_when_missing() {
        let json = r#"{"service":"mail","login":"bob","password":"pw"}"#;
        let rec: Record = serde_json::from_str(json).unwrap();
        assert_eq!(rec.group, "");
        assert!(!rec.deleted);
        assert!(rec.id.is_missing());
    }

    #[test]
    fn debug_output_hides_passwords() {
        let new = NewRecord::new("github", "alice", "hunter2");
        assert!(!format!("{new:?}").contains("hunter2"));

        let rec = new.into_record().unwrap();
        let shown = format!("{rec:?}");
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("alice"));

        let update = RecordUpdate {
            password: Some("swordfish".into()),
            ..RecordUpdate::default()
        };
        assert!(!format!("{update:?}").contains("swordfish"));
    }

    #[test]
    fn short_id_is_eight_hex_chars() {
        let id = RecordId::new();
        let short = id.short();
        assert_eq!(short.len(), 8);
        assert!(id.to_simple().starts_with(&short));
    }
}
