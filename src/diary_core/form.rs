//! Raw form input and its coercion into entries.
//!
//! The entry form hands over text fields exactly as typed. Numbers are
//! coerced leniently: the longest numeric prefix is used and anything
//! unparsable becomes `0` (or "no developer"), matching how the form has
//! always behaved.

use super::entry::{Entry, EntryId, Formula, Formulas, Photos};
use crate::constants::{DATE_FORMAT_COMPACT, DATE_FORMAT_ISO};
use crate::errors::EntryError;
use chrono::NaiveDate;

/// One formula row as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormulaDraft {
    pub shade: String,
    pub parts: String,
    pub color: String,
}

impl FormulaDraft {
    /// Parses a `SHADE:PARTS:GRAMS` row.
    ///
    /// The shade may itself contain colons; the last two fields are always
    /// parts and grams.
    ///
    /// # Examples
    ///
    /// ```
    /// use dye_diary::diary_core::FormulaDraft;
    ///
    /// let row = FormulaDraft::parse_spec("6N:1:30").unwrap();
    /// assert_eq!(row.shade, "6N");
    /// assert_eq!(row.parts, "1");
    /// assert_eq!(row.color, "30");
    /// assert!(FormulaDraft::parse_spec("6N").is_err());
    /// ```
    pub fn parse_spec(spec: &str) -> Result<Self, EntryError> {
        let mut fields = spec.rsplitn(3, ':');
        let color = fields.next();
        let parts = fields.next();
        let shade = fields.next();
        match (shade, parts, color) {
            (Some(shade), Some(parts), Some(color)) => Ok(FormulaDraft {
                shade: shade.trim().to_string(),
                parts: parts.trim().to_string(),
                color: color.trim().to_string(),
            }),
            _ => Err(EntryError::InvalidFormula(spec.to_string())),
        }
    }

    fn coerce(&self) -> Formula {
        Formula {
            shade: self.shade.trim().to_string(),
            parts: coerce_count(&self.parts),
            color: coerce_grams(&self.color).unwrap_or(0.0),
        }
    }
}

/// The entry form's state before submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryDraft {
    /// Blank means "today".
    pub date: String,
    pub name: String,
    pub formulas: Vec<FormulaDraft>,
    pub developer: String,
    pub processing_time: String,
    pub notes: String,
    pub photos: Photos,
}

impl EntryDraft {
    /// A blank form with a single empty formula row.
    pub fn blank() -> Self {
        EntryDraft {
            formulas: vec![FormulaDraft::default()],
            ..EntryDraft::default()
        }
    }

    /// Pre-fills the form from an existing entry for editing.
    pub fn from_entry(entry: &Entry) -> Self {
        EntryDraft {
            date: entry.date.format(DATE_FORMAT_ISO).to_string(),
            name: entry.name.clone(),
            formulas: entry
                .formulas
                .iter()
                .map(|f| FormulaDraft {
                    shade: f.shade.clone(),
                    parts: f.parts.to_string(),
                    color: f.color.to_string(),
                })
                .collect(),
            developer: entry.developer.map(|d| d.to_string()).unwrap_or_default(),
            processing_time: entry.processing_time.to_string(),
            notes: entry.notes.clone(),
            photos: entry.photos.clone(),
        }
    }

    /// Coerces the draft into an entry carrying `id`.
    ///
    /// # Errors
    ///
    /// - `EntryError::InvalidDate` if the date is neither blank nor a valid date
    /// - `EntryError::MissingName` if the name is blank
    /// - `EntryError::MissingShade` if any formula row has a blank shade
    /// - `EntryError::NoFormulas` if the draft has no formula rows
    pub fn into_entry(self, id: EntryId, today: NaiveDate) -> Result<Entry, EntryError> {
        let date = parse_form_date(&self.date, today)?;
        let name = self.name.trim();
        if name.is_empty() {
            return Err(EntryError::MissingName);
        }
        if self.formulas.iter().any(|row| row.shade.trim().is_empty()) {
            return Err(EntryError::MissingShade);
        }
        let rows: Vec<Formula> = self.formulas.iter().map(FormulaDraft::coerce).collect();
        let formulas = Formulas::try_from(rows)?;

        let mut entry = Entry::new(id, date, name.to_string(), formulas);
        entry.developer = coerce_grams(&self.developer);
        entry.processing_time = coerce_count(&self.processing_time);
        entry.notes = self.notes;
        entry.photos = self.photos;
        Ok(entry)
    }
}

/// Parse a date string in YYYY-MM-DD or YYYYMMDD format, blank meaning `today`.
fn parse_form_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, EntryError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(today);
    }
    NaiveDate::parse_from_str(raw, DATE_FORMAT_ISO)
        .or_else(|_| NaiveDate::parse_from_str(raw, DATE_FORMAT_COMPACT))
        .map_err(|_| EntryError::InvalidDate(raw.to_string()))
}

/// Leading-integer coercion: `"12abc"` is 12; `"abc"`, negatives and values
/// past `u32::MAX` are 0.
pub fn coerce_count(raw: &str) -> u32 {
    let raw = raw.trim();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if negative || end == 0 {
        return 0;
    }
    digits[..end].parse().unwrap_or(0)
}

/// Leading-decimal coercion: `"30.5g"` is 30.5; blank or unparsable is `None`;
/// negative weights clamp to 0.
pub fn coerce_grams(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in raw.char_indices() {
        match c {
            '+' | '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    raw[..end]
        .trim_end_matches('.')
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| value.max(0.0))
}
