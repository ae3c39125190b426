//! Core diary functionality without I/O operations.
//!
//! This module contains the pure parts of the diary: the entry model, the
//! coercion of raw form input into entries, and the pagination state machine
//! that decides which two entries are on screen.

pub mod entry;
pub mod form;
pub mod pagination;

pub use entry::{Entry, EntryId, Formula, Formulas, Photo, PhotoSlot, Photos};
pub use form::{EntryDraft, FormulaDraft};
pub use pagination::{
    clamp_page, step, total_pages, visible_window, Clock, Direction, LandingPolicy, ManualClock,
    PageTiming, Pager, PagerConfig, PagerEffect, PagerEvent, PagerState, Phase, ReloadReason,
    SystemClock,
};
