//! The entry store.
//!
//! [`EntryStore`] is the single source of truth for the diary's entries. The
//! whole collection lives under one storage key as a versioned JSON envelope,
//! oldest entry first. Every mutation re-reads that blob, applies the change
//! and writes the whole collection back; there is no partial write and no
//! locking, so the last writer wins.
//!
//! Photos never reach storage. The store keeps them in a session map keyed by
//! entry id and re-attaches them after every read, so they survive edits to
//! other entries but not the end of the process.

use crate::constants::{SCHEMA_VERSION, STORAGE_KEY};
use crate::diary_core::{Entry, EntryId, Photo, PhotoSlot, Photos};
use crate::errors::{LoadError, StoreError};
use crate::storage::KeyValueStorage;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use tracing::{debug, error, info, warn};

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    entries: &'a [Entry],
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    entries: Value,
}

/// Decodes a stored blob.
///
/// Accepts the current envelope (`{"version": 1, "entries": [...]}`) and the
/// older bare array of entries.
pub fn decode_collection(raw: &str) -> Result<Vec<Entry>, LoadError> {
    let value: Value = serde_json::from_str(raw).map_err(LoadError::Malformed)?;

    let entries: Vec<Entry> = if value.is_array() {
        serde_json::from_value(value).map_err(LoadError::Malformed)?
    } else {
        let envelope: Envelope = serde_json::from_value(value).map_err(LoadError::Malformed)?;
        if envelope.version != SCHEMA_VERSION {
            return Err(LoadError::UnsupportedVersion(envelope.version));
        }
        serde_json::from_value(envelope.entries).map_err(LoadError::Malformed)?
    };

    let mut seen = HashSet::new();
    for entry in &entries {
        if !seen.insert(entry.id()) {
            return Err(LoadError::DuplicateId(entry.id().to_string()));
        }
    }
    Ok(entries)
}

/// Encodes the collection as the current envelope.
pub fn encode_collection(entries: &[Entry]) -> Result<String, StoreError> {
    serde_json::to_string(&EnvelopeRef {
        version: SCHEMA_VERSION,
        entries,
    })
    .map_err(StoreError::Serialize)
}

pub struct EntryStore {
    storage: Box<dyn KeyValueStorage>,
    key: String,
    entries: Vec<Entry>,
    attachments: HashMap<EntryId, Photos>,
}

impl EntryStore {
    /// Creates a store over `storage` using the standard diary key.
    ///
    /// Nothing is read until [`EntryStore::reload`] or the first mutation.
    pub fn new(storage: Box<dyn KeyValueStorage>) -> Self {
        EntryStore {
            storage,
            key: STORAGE_KEY.to_string(),
            entries: Vec::new(),
            attachments: HashMap::new(),
        }
    }

    /// Entries as of the last reload or mutation, oldest first.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id() == id)
    }

    /// Reads the persisted collection.
    ///
    /// A key that was never written is an empty diary, not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the storage cannot be read or the blob is
    /// corrupt. Callers that want the fail-soft behaviour use
    /// [`EntryStore::load_or_empty`].
    pub fn load(&self) -> Result<Vec<Entry>, LoadError> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(Vec::new());
        };
        let mut entries = decode_collection(&raw)?;
        for entry in &mut entries {
            if let Some(photos) = self.attachments.get(entry.id()) {
                entry.photos = photos.clone();
            }
        }
        Ok(entries)
    }

    /// Reads the persisted collection, treating any failure as an empty diary.
    ///
    /// The failure is logged; the next mutation will overwrite the damaged blob.
    pub fn load_or_empty(&self) -> Vec<Entry> {
        match self.load() {
            Ok(entries) => entries,
            Err(e) => {
                error!(key = %self.key, error = %e, "Stored diary unreadable; continuing with an empty diary");
                Vec::new()
            }
        }
    }

    /// Replaces the in-memory copy with the persisted collection.
    pub fn reload(&mut self) -> &[Entry] {
        self.entries = self.load_or_empty();
        debug!(count = self.entries.len(), "Reloaded entries");
        &self.entries
    }

    /// Adds `entry` to the end of the collection.
    ///
    /// Returns `false` and leaves the collection untouched if an entry with
    /// the same id already exists.
    pub fn append(&mut self, entry: Entry) -> Result<bool, StoreError> {
        let mut entries = self.load_or_empty();
        if entries.iter().any(|e| e.id() == entry.id()) {
            warn!(id = %entry.id(), "Refusing to append entry with duplicate id");
            self.entries = entries;
            return Ok(false);
        }
        self.remember_photos(entry.id(), &entry.photos);
        info!(id = %entry.id(), "Appending entry");
        entries.push(entry);
        self.persist(entries)?;
        Ok(true)
    }

    /// Replaces the entry whose id is `id` with `replacement`.
    ///
    /// The stored entry keeps `id` whatever id `replacement` carries. An
    /// unknown id leaves the list unchanged; the collection is written back
    /// either way. Returns whether an entry was replaced.
    pub fn update(&mut self, id: &EntryId, replacement: Entry) -> Result<bool, StoreError> {
        let mut entries = self.load_or_empty();
        let replacement = replacement.with_id(id.clone());

        let found = match entries.iter_mut().find(|e| e.id() == id) {
            Some(slot) => {
                self.remember_photos(id, &replacement.photos);
                *slot = replacement;
                info!(%id, "Updated entry");
                true
            }
            None => {
                debug!(%id, "Update for unknown entry ignored");
                false
            }
        };
        self.persist(entries)?;
        Ok(found)
    }

    /// Deletes the entry whose id is `id`. Returns whether one was removed.
    pub fn remove(&mut self, id: &EntryId) -> Result<bool, StoreError> {
        let mut entries = self.load_or_empty();
        let before = entries.len();
        entries.retain(|e| e.id() != id);
        let removed = entries.len() != before;

        if removed {
            self.attachments.remove(id);
            info!(%id, "Removed entry");
        } else {
            debug!(%id, "Remove for unknown entry ignored");
        }
        self.persist(entries)?;
        Ok(removed)
    }

    /// Sets one photo slot of the entry whose id is `id`.
    ///
    /// Returns whether the entry exists.
    pub fn patch_photo(
        &mut self,
        id: &EntryId,
        slot: PhotoSlot,
        photo: Photo,
    ) -> Result<bool, StoreError> {
        let mut entries = self.load_or_empty();

        let found = match entries.iter_mut().find(|e| e.id() == id) {
            Some(entry) => {
                info!(%id, %slot, file = %photo.file_name, "Attached photo");
                entry.photos.set(slot, Some(photo));
                self.remember_photos(id, &entry.photos);
                true
            }
            None => {
                debug!(%id, %slot, "Photo for unknown entry ignored");
                false
            }
        };
        self.persist(entries)?;
        Ok(found)
    }

    fn remember_photos(&mut self, id: &EntryId, photos: &Photos) {
        if photos.is_empty() {
            self.attachments.remove(id);
        } else {
            self.attachments.insert(id.clone(), photos.clone());
        }
    }

    fn persist(&mut self, entries: Vec<Entry>) -> Result<(), StoreError> {
        let blob = encode_collection(&entries)?;
        self.storage
            .set_item(&self.key, &blob)
            .map_err(|source| StoreError::Write {
                key: self.key.clone(),
                source,
            })?;
        self.entries = entries;
        Ok(())
    }
}
