//! Plain-text rendering of the notebook.
//!
//! A [`Spread`] is what one notebook opening shows: a left and a right page,
//! each holding at most one entry, plus the page indicator. The renderer only
//! formats; it never decides which entries are visible.

use crate::constants::ENTRY_HEADING_DATE_FORMAT;
use crate::diary_core::{Entry, Formulas, PhotoSlot};
use chrono::NaiveDate;

const PAGE_WIDTH: usize = 44;

/// The entries on screen for one page index.
#[derive(Debug, Clone, Copy)]
pub struct Spread<'a> {
    pub left: Option<&'a Entry>,
    pub right: Option<&'a Entry>,
    /// Zero-based page index.
    pub page: usize,
    pub total_pages: usize,
    /// The diary has no entries at all.
    pub is_empty_state: bool,
}

/// Formats an entry date for headings, e.g. `March 1, 2024`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(ENTRY_HEADING_DATE_FORMAT).to_string()
}

/// One-line summary of a formula list, e.g. `6N 1 pt 30g + 7G 2 pt 15.5g`.
pub fn format_formulas(formulas: &Formulas) -> String {
    formulas
        .iter()
        .map(|f| format!("{} {} pt {}g", f.shade, f.parts, f.color))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// One line per entry for `list`.
pub fn render_entry_line(entry: &Entry) -> String {
    format!(
        "{}  {}  {}  [{}]",
        entry.date,
        entry.name,
        format_formulas(&entry.formulas),
        entry.id()
    )
}

pub fn render_spread(spread: &Spread<'_>) -> String {
    let mut out = String::new();

    rule(&mut out, "left page");
    if let Some(entry) = spread.left {
        render_entry(&mut out, entry);
    }

    rule(&mut out, "right page");
    match spread.right {
        Some(entry) => render_entry(&mut out, entry),
        None if spread.is_empty_state => {
            out.push_str("Your hair journey starts here\n");
            out.push_str("No entries yet. Add your first hair dye experience!\n");
            out.push_str("  dye-diary add --name <NAME> --formula <SHADE:PARTS:GRAMS>\n");
        }
        None => {}
    }

    out.push_str(&"─".repeat(PAGE_WIDTH));
    out.push('\n');
    if spread.total_pages > 1 {
        let indicator = format!("{} / {}", spread.page + 1, spread.total_pages);
        out.push_str(&format!("{:>width$}\n", indicator, width = PAGE_WIDTH));
    }
    out
}

fn rule(out: &mut String, label: &str) {
    let head = format!("── {} ", label);
    let fill = PAGE_WIDTH.saturating_sub(head.chars().count());
    out.push_str(&format!("{}{}\n", head, "─".repeat(fill)));
}

fn render_entry(out: &mut String, entry: &Entry) {
    out.push_str(&format!("{}\n", entry.name));
    out.push_str(&format!("{}  [{}]\n", format_date(entry.date), entry.id()));
    out.push('\n');

    out.push_str("Formula\n");
    out.push_str(&format!("  {:<14}{:>6}{:>12}\n", "Shade", "Parts", "Color (g)"));
    for formula in &entry.formulas {
        out.push_str(&format!(
            "  {:<14}{:>6}{:>12}\n",
            formula.shade,
            formula.parts,
            format!("{}g", formula.color)
        ));
    }
    if let Some(developer) = entry.developer.filter(|d| *d > 0.0) {
        out.push_str(&format!("  + {}g developer\n", developer));
    }
    if entry.processing_time > 0 {
        out.push_str(&format!("  Processing time: {} min\n", entry.processing_time));
    }

    if !entry.notes.is_empty() {
        out.push_str("\nNotes\n");
        for line in entry.notes.lines() {
            out.push_str(&format!("  {}\n", line));
        }
    }

    out.push_str("\nPhotos\n");
    for (label, slot) in [
        ("Before", PhotoSlot::Before),
        ("After", PhotoSlot::After),
        ("Photo", PhotoSlot::Legacy),
    ] {
        match entry.photo(slot) {
            Some(photo) => {
                out.push_str(&format!("  {}: {}\n", label, photo.file_name));
            }
            None if slot != PhotoSlot::Legacy => {
                out.push_str(&format!("  {}: (none)\n", label));
            }
            None => {}
        }
    }
}
