//! The in-memory record set and its canonical byte form.
//!
//! `RecordStore` keeps records sorted by `(group, service)`.  Soft-deleted
//! records stay in the sequence until `purge`; the active and trash views
//! are filters over the same ordered list.

use std::cmp::Ordering;

use zeroize::Zeroizing;

use super::record::{NewRecord, Record, RecordId, RecordUpdate};
use crate::errors::{PassVaultError, Result};

/// An ordered sequence of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from records, sorting them into display order.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut store = Self { records };
        store.sort();
        store
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Encode the full sorted sequence (deleted records included) as JSON.
    ///
    /// The buffer holds every stored password, so it is wiped on drop.
    pub fn serialize(&self) -> Result<Zeroizing<Vec<u8>>> {
        let mut sorted = self.records.clone();
        sort_records(&mut sorted);
        serde_json::to_vec(&sorted)
            .map(Zeroizing::new)
            .map_err(|e| PassVaultError::MalformedData(format!("records: {e}")))
    }

    /// Decode a record list into a new store.
    ///
    /// Fails with `MalformedData` on missing fields or wrong types; no
    /// existing store is touched either way.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        Self::decode(bytes).map(|(store, _)| store)
    }

    /// Like `deserialize`, and also reports how many records had no id
    /// in the payload and were given a fresh one.
    pub fn decode(bytes: &[u8]) -> Result<(Self, usize)> {
        let mut records: Vec<Record> = serde_json::from_slice(bytes)
            .map_err(|e| PassVaultError::MalformedData(format!("records JSON: {e}")))?;

        let mut assigned = 0;
        for record in records.iter_mut().filter(|r| r.id.is_missing()) {
            record.id = RecordId::new();
            assigned += 1;
        }

        Ok((Self::from_records(records), assigned))
    }

    /// Stable sort by `(group, service)`.
    pub fn sort(&mut self) {
        sort_records(&mut self.records);
    }

    // ------------------------------------------------------------------
    // Views
    // ------------------------------------------------------------------

    /// Every record, deleted or not, in display order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Records not in the trash.
    pub fn active(&self) -> Vec<&Record> {
        self.records.iter().filter(|r| !r.deleted).collect()
    }

    /// Records in the trash.
    pub fn trash(&self) -> Vec<&Record> {
        self.records.iter().filter(|r| r.deleted).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Find the one record whose id starts with `prefix`.
    ///
    /// Accepts the dashed or plain hex form, case-insensitively.
    pub fn resolve(&self, prefix: &str) -> Result<RecordId> {
        let needle: String = prefix
            .chars()
            .filter(|c| *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        if needle.is_empty() {
            return Err(PassVaultError::RecordNotFound(prefix.to_string()));
        }

        let mut matches = self
            .records
            .iter()
            .filter(|r| r.id.to_simple().starts_with(&needle));

        match (matches.next(), matches.next()) {
            (Some(r), None) => Ok(r.id),
            (Some(_), Some(_)) => Err(PassVaultError::AmbiguousRecordId(prefix.to_string())),
            (None, _) => Err(PassVaultError::RecordNotFound(prefix.to_string())),
        }
    }

    // ------------------------------------------------------------------
    // Mutation
    // ------------------------------------------------------------------

    /// Insert a new record and return its id.
    pub fn add(&mut self, new: NewRecord) -> Result<RecordId> {
        let record = new.into_record()?;
        let id = record.id;
        self.records.push(record);
        self.sort();
        Ok(id)
    }

    /// Edit fields of an existing record.
    pub fn update(&mut self, id: RecordId, update: RecordUpdate) -> Result<()> {
        self.get_mut(id)?.apply(update)?;
        self.sort();
        Ok(())
    }

    /// Move a record to the trash.
    pub fn soft_delete(&mut self, id: RecordId) -> Result<()> {
        self.get_mut(id)?.deleted = true;
        Ok(())
    }

    /// Bring a record back from the trash.
    pub fn restore(&mut self, id: RecordId) -> Result<()> {
        self.get_mut(id)?.deleted = false;
        Ok(())
    }

    /// Drop every deleted record for good.  Returns how many were removed.
    pub fn purge(&mut self) -> usize {
        let before = self.records.len();
        self.records.retain(|r| !r.deleted);
        before - self.records.len()
    }

    fn get_mut(&mut self, id: RecordId) -> Result<&mut Record> {
        self.records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| PassVaultError::RecordNotFound(id.to_string()))
    }
}

fn sort_records(records: &mut [Record]) {
    records.sort_by(display_order);
}

fn display_order(a: &Record, b: &Record) -> Ordering {
    a.group
        .cmp(&b.group)
        .then_with(|| a.service.cmp(&b.service))
}
