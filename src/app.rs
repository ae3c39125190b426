//! The diary application controller.
//!
//! [`DiaryApp`] owns the entry store and the pager. Every form submission
//! goes to the store first; once the store has persisted the change the pager
//! is told how many entries there are now, and clamps or jumps accordingly.

use crate::config::Config;
use crate::diary_core::{
    visible_window, Entry, EntryDraft, EntryId, Pager, PagerConfig, PagerEffect, Photo, PhotoSlot,
    ReloadReason, SystemClock,
};
use crate::errors::AppResult;
use crate::render::Spread;
use crate::storage::FileStorage;
use crate::store::EntryStore;
use chrono::NaiveDate;
use tracing::debug;

pub struct DiaryApp {
    store: EntryStore,
    pager: Pager,
}

impl DiaryApp {
    /// Wires a store and a pager together and performs the initial load.
    pub fn new(mut store: EntryStore, mut pager: Pager) -> Self {
        let count = store.reload().len();
        pager.reload(count, ReloadReason::Initial);
        debug!(
            count,
            page = pager.current_page(),
            total_pages = pager.total_pages(),
            "Opened diary"
        );
        DiaryApp { store, pager }
    }

    /// Opens the diary stored in `config.data_dir` with real-time page turns.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open(config: &Config) -> AppResult<Self> {
        let storage = FileStorage::open(&config.data_dir)?;
        let store = EntryStore::new(Box::new(storage));
        let pager = Pager::new(
            PagerConfig {
                landing: config.landing,
                ..PagerConfig::default()
            },
            Box::new(SystemClock),
        );
        Ok(Self::new(store, pager))
    }

    pub fn entries(&self) -> &[Entry] {
        self.store.entries()
    }

    pub fn entry(&self, id: &EntryId) -> Option<&Entry> {
        self.store.get(id)
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    /// Records a new entry from the form and returns its freshly minted id.
    pub fn submit_new(&mut self, draft: EntryDraft, today: NaiveDate) -> AppResult<EntryId> {
        let id = EntryId::generate();
        let entry = draft.into_entry(id.clone(), today)?;
        self.store.append(entry)?;
        self.sync_pager(ReloadReason::Appended);
        Ok(id)
    }

    /// Replaces entry `id` with the edited form. Returns whether it existed.
    pub fn submit_edit(
        &mut self,
        id: &EntryId,
        draft: EntryDraft,
        today: NaiveDate,
    ) -> AppResult<bool> {
        let entry = draft.into_entry(id.clone(), today)?;
        let found = self.store.update(id, entry)?;
        self.sync_pager(ReloadReason::Changed);
        Ok(found)
    }

    /// Deletes entry `id`. Returns whether it existed.
    pub fn delete(&mut self, id: &EntryId) -> AppResult<bool> {
        let found = self.store.remove(id)?;
        self.sync_pager(ReloadReason::Changed);
        Ok(found)
    }

    /// Attaches a session photo to entry `id`. Returns whether it existed.
    pub fn upload_photo(&mut self, id: &EntryId, slot: PhotoSlot, photo: Photo) -> AppResult<bool> {
        let found = self.store.patch_photo(id, slot, photo)?;
        self.sync_pager(ReloadReason::Changed);
        Ok(found)
    }

    /// Re-reads the store, e.g. after another process changed it.
    pub fn refresh(&mut self) {
        self.store.reload();
        self.sync_pager(ReloadReason::Changed);
    }

    pub fn next_page(&mut self) -> Vec<PagerEffect> {
        self.pager.next()
    }

    pub fn previous_page(&mut self) -> Vec<PagerEffect> {
        self.pager.previous()
    }

    pub fn tick(&mut self) -> Vec<PagerEffect> {
        self.pager.tick()
    }

    pub fn jump_to_page(&mut self, page: usize) -> Vec<PagerEffect> {
        self.pager.jump_to(page)
    }

    pub fn is_transitioning(&self) -> bool {
        self.pager.is_transitioning()
    }

    /// The spread at the current page.
    pub fn spread(&self) -> Spread<'_> {
        let entries = self.store.entries();
        let (left, right) = visible_window(entries, self.pager.current_page());
        Spread {
            left,
            right,
            page: self.pager.current_page(),
            total_pages: self.pager.total_pages(),
            is_empty_state: entries.is_empty(),
        }
    }

    fn sync_pager(&mut self, reason: ReloadReason) {
        let count = self.store.entries().len();
        self.pager.reload(count, reason);
    }
}
