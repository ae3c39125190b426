//! Diary entry types.
//!
//! An [`Entry`] is one recorded dye session. Everything except the photos is
//! serialized into the stored collection; photos are opaque blobs that only
//! live for the current session.

use crate::errors::EntryError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// Opaque, immutable identifier of an entry.
///
/// New ids are UUID v4 strings. Ids written by older versions of the diary
/// (millisecond timestamps) are accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Mints a fresh, unique id.
    pub fn generate() -> Self {
        EntryId(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        EntryId(value.to_string())
    }
}

impl From<String> for EntryId {
    fn from(value: String) -> Self {
        EntryId(value)
    }
}

/// One color-mixing line of an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formula {
    /// Shade name as printed on the tube, e.g. `6N`.
    pub shade: String,
    /// Mixing ratio.
    pub parts: u32,
    /// Color weight in grams.
    pub color: f64,
}

impl Formula {
    pub fn new(shade: impl Into<String>, parts: u32, color: f64) -> Self {
        Formula {
            shade: shade.into(),
            parts,
            color,
        }
    }
}

/// Ordered formula rows of an entry. Never empty.
///
/// Both construction and deserialization go through [`TryFrom<Vec<Formula>>`],
/// so an empty list cannot reach the store.
///
/// # Examples
///
/// ```
/// use dye_diary::diary_core::{Formula, Formulas};
///
/// assert!(Formulas::try_from(Vec::new()).is_err());
///
/// let mut formulas = Formulas::new(Formula::new("6N", 1, 30.0));
/// assert!(!formulas.remove(0), "the last row cannot be removed");
/// assert_eq!(formulas.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Formula>", into = "Vec<Formula>")]
pub struct Formulas(Vec<Formula>);

impl Formulas {
    /// Creates a formula list holding a single row.
    pub fn new(first: Formula) -> Self {
        Formulas(vec![first])
    }

    pub fn push(&mut self, formula: Formula) {
        self.0.push(formula);
    }

    /// Removes the row at `index`.
    ///
    /// Returns `false` without changing anything when `index` is out of range
    /// or when it would remove the only remaining row.
    pub fn remove(&mut self, index: usize) -> bool {
        if self.0.len() <= 1 || index >= self.0.len() {
            return false;
        }
        self.0.remove(index);
        true
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Formula> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Formula] {
        &self.0
    }
}

impl TryFrom<Vec<Formula>> for Formulas {
    type Error = EntryError;

    fn try_from(rows: Vec<Formula>) -> Result<Self, Self::Error> {
        if rows.is_empty() {
            return Err(EntryError::NoFormulas);
        }
        Ok(Formulas(rows))
    }
}

impl From<Formulas> for Vec<Formula> {
    fn from(formulas: Formulas) -> Self {
        formulas.0
    }
}

impl<'a> IntoIterator for &'a Formulas {
    type Item = &'a Formula;
    type IntoIter = std::slice::Iter<'a, Formula>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// An image attached to an entry for the current session.
///
/// The diary never inspects the bytes; cloning shares the buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Photo {
    pub file_name: String,
    pub bytes: Arc<[u8]>,
}

impl Photo {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Photo {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

impl fmt::Debug for Photo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Photo")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Which photo of an entry is being set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhotoSlot {
    Before,
    After,
    /// Single photo attached by older versions of the entry form.
    Legacy,
}

impl FromStr for PhotoSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "before" => Ok(PhotoSlot::Before),
            "after" => Ok(PhotoSlot::After),
            "photo" | "legacy" => Ok(PhotoSlot::Legacy),
            other => Err(format!(
                "unknown photo slot '{}', expected before, after or photo",
                other
            )),
        }
    }
}

impl fmt::Display for PhotoSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PhotoSlot::Before => "before",
            PhotoSlot::After => "after",
            PhotoSlot::Legacy => "photo",
        };
        f.write_str(name)
    }
}

/// Session photos of one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Photos {
    pub before: Option<Photo>,
    pub after: Option<Photo>,
    pub legacy: Option<Photo>,
}

impl Photos {
    pub fn get(&self, slot: PhotoSlot) -> Option<&Photo> {
        match slot {
            PhotoSlot::Before => self.before.as_ref(),
            PhotoSlot::After => self.after.as_ref(),
            PhotoSlot::Legacy => self.legacy.as_ref(),
        }
    }

    pub fn set(&mut self, slot: PhotoSlot, photo: Option<Photo>) {
        match slot {
            PhotoSlot::Before => self.before = photo,
            PhotoSlot::After => self.after = photo,
            PhotoSlot::Legacy => self.legacy = photo,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.before.is_none() && self.after.is_none() && self.legacy.is_none()
    }
}

/// One recorded hair-dye session.
///
/// The serialized field names follow the stored layout (`processingTime`,
/// camelCase). Photos are skipped entirely; keys such as `beforePhoto` found
/// in old blobs are ignored on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    id: EntryId,
    pub date: NaiveDate,
    pub name: String,
    pub formulas: Formulas,
    /// Developer weight in grams, if any was used.
    pub developer: Option<f64>,
    /// Processing time in minutes.
    pub processing_time: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(skip)]
    pub photos: Photos,
}

impl Entry {
    /// Creates an entry with no developer, no notes and no photos.
    pub fn new(id: EntryId, date: NaiveDate, name: impl Into<String>, formulas: Formulas) -> Self {
        Entry {
            id,
            date,
            name: name.into(),
            formulas,
            developer: None,
            processing_time: 0,
            notes: String::new(),
            photos: Photos::default(),
        }
    }

    pub fn id(&self) -> &EntryId {
        &self.id
    }

    /// Returns the same entry carrying `id` instead of its own.
    pub(crate) fn with_id(mut self, id: EntryId) -> Self {
        self.id = id;
        self
    }

    pub fn photo(&self, slot: PhotoSlot) -> Option<&Photo> {
        self.photos.get(slot)
    }
}
