//! Session-scoped schedule editing state.
//!
//! A [`ScheduleSession`] owns everything one editing session needs to turn a
//! plan into schedule text: the item list, the hymn entries matched for the
//! plan's songs, and the per-item selection store. Sessions are confined to
//! one UI session and never shared across requests.
//!
//! Custom-text edits are debounced: each keystroke buffers the value and
//! starts a cancelable delayed commit, so the store sees one write per burst
//! of typing rather than one per keystroke. Session teardown aborts every
//! pending commit, so no timer outlives its session.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::constants::schedule::CUSTOM_TEXT_DEBOUNCE_MS;
use crate::hymnal::HymnEntry;
use crate::planning_center::PlanItem;
use crate::schedule::{self, Selection, SelectionStore};
use crate::types::ItemId;

/// Editing state for one plan in one UI session.
#[derive(Debug)]
pub struct ScheduleSession {
    items: Vec<PlanItem>,
    hymns: Vec<HymnEntry>,
    selections: Arc<Mutex<SelectionStore>>,
    pending_commits: HashMap<ItemId, JoinHandle<()>>,
    debounce: Duration,
}

impl ScheduleSession {
    /// Start a session for one plan.
    ///
    /// The first version of every matched hymn is selected up front so the
    /// schedule renders without any user input, regardless of how the
    /// versions arrived from the hymn lookup.
    pub fn new(items: Vec<PlanItem>, mut hymns: Vec<HymnEntry>) -> Self {
        for hymn in &mut hymns {
            for (index, version) in hymn.versions.iter_mut().enumerate() {
                version.selected = index == 0;
            }
        }
        Self {
            items,
            hymns,
            selections: Arc::new(Mutex::new(SelectionStore::new())),
            pending_commits: HashMap::new(),
            debounce: Duration::from_millis(CUSTOM_TEXT_DEBOUNCE_MS),
        }
    }

    /// Hymn entries matched for this session's songs.
    pub fn hymns(&self) -> &[HymnEntry] {
        &self.hymns
    }

    /// Current selection for an item.
    pub fn selection(&self, id: &ItemId) -> Selection {
        self.lock_selections().get(id)
    }

    /// Put an item back on its default (hymn version) rendering.
    pub fn choose_default(&mut self, id: &ItemId) {
        self.cancel_pending(id);
        self.lock_selections().set(id, Selection::Default);
    }

    /// Leave an item's schedule line blank of references.
    pub fn choose_leave_blank(&mut self, id: &ItemId) {
        self.cancel_pending(id);
        self.lock_selections().set(id, Selection::LeaveBlank);
    }

    /// Switch an item to custom text, keeping any text it already carries.
    pub fn choose_custom(&mut self, id: &ItemId) {
        self.cancel_pending(id);
        self.lock_selections().enter_custom(id);
    }

    /// Switch which version of a matched hymn is selected.
    ///
    /// Out-of-range indices are ignored; unknown titles are a no-op.
    pub fn select_version(&mut self, song_title: &str, index: usize) {
        let Some(hymn) = self.hymns.iter_mut().find(|h| h.song_title == song_title) else {
            return;
        };
        if index >= hymn.versions.len() {
            return;
        }
        for (position, version) in hymn.versions.iter_mut().enumerate() {
            version.selected = position == index;
        }
    }

    /// Record one keystroke of custom text.
    ///
    /// The value commits to the selection store after the debounce delay
    /// unless another keystroke (or a selection change) arrives first. The
    /// commit is dropped if the item has left the custom state by the time
    /// it fires.
    pub fn edit_custom_text(&mut self, id: &ItemId, text: impl Into<String>) {
        let text = text.into();
        self.cancel_pending(id);

        let selections = Arc::clone(&self.selections);
        let delay = self.debounce;
        let item = id.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            selections
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .commit_custom_text(&item, text);
        });
        self.pending_commits.insert(id.clone(), handle);
    }

    /// Generated schedule text with the session's current selections.
    pub fn schedule_text(&self, service_type_name: &str, plan_sort_date: &str) -> String {
        let date = schedule::plan_date(plan_sort_date);
        if date.is_none() {
            tracing::debug!("Unparseable plan date {plan_sort_date:?}; omitting schedule header");
        }
        let store = self.lock_selections();
        schedule::render_schedule(&self.items, &store, &self.hymns, service_type_name, date)
    }

    fn cancel_pending(&mut self, id: &ItemId) {
        if let Some(handle) = self.pending_commits.remove(id) {
            handle.abort();
        }
    }

    fn lock_selections(&self) -> std::sync::MutexGuard<'_, SelectionStore> {
        self.selections.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for ScheduleSession {
    fn drop(&mut self) {
        for (_, handle) in self.pending_commits.drain() {
            handle.abort();
        }
    }
}
