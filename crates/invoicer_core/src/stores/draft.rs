//! crates/invoicer_core/src/stores/draft.rs
//!
//! The scratch invoice: the single, unkeyed "current draft" distinct from
//! the persisted history entries. One blob, load and save, no ids.

use std::sync::Arc;

use crate::calculation;
use crate::domain::InvoiceData;
use crate::ports::StorageAdapter;
use crate::stores::{keys, load_or_default, persist};

#[derive(Clone)]
pub struct DraftStore {
    adapter: Arc<dyn StorageAdapter>,
}

impl DraftStore {
    pub fn new(adapter: Arc<dyn StorageAdapter>) -> Self {
        Self { adapter }
    }

    /// The current draft, or a fresh default one when nothing is stored or
    /// the stored blob cannot be read.
    pub fn load(&self) -> InvoiceData {
        load_or_default(&self.adapter, keys::DRAFT)
    }

    /// Persists the draft, recomputing derived totals first so line-item
    /// or rate edits can never leave stale amounts in storage.
    pub fn save(&self, mut data: InvoiceData) -> bool {
        calculation::recompute(&mut data);
        persist(&self.adapter, keys::DRAFT, &data)
    }

    /// Drops the stored draft; the next load starts from the default.
    pub fn clear(&self) -> bool {
        if !self.adapter.is_available() {
            return false;
        }
        self.adapter.remove(keys::DRAFT).is_ok()
    }
}
