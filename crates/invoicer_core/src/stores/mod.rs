//! crates/invoicer_core/src/stores/mod.rs
//!
//! The entity stores: one module per persisted collection, all written
//! against the injected `StorageAdapter` port. Every mutation is a
//! whole-blob read-modify-write; persistence failures never propagate as
//! errors — they are logged and degraded to the operation's safe default.

pub mod clients;
pub mod draft;
pub mod invoices;
pub mod settings;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::ports::StorageAdapter;

pub use clients::{ClientPatch, ClientStats, ClientStore, NewClient};
pub use draft::DraftStore;
pub use invoices::InvoiceStore;
pub use settings::SettingsStore;

/// Fixed storage keys. These names are the de-facto wire format other
/// tooling must honor for compatibility.
pub mod keys {
    pub const CLIENTS: &str = "invoice_clients";
    pub const HISTORY: &str = "invoice_history";
    pub const COUNTERS: &str = "invoice_counters";
    pub const DRAFT: &str = "invoice_draft";
    pub const THEME: &str = "invoice_theme";
    pub const TEMPLATE: &str = "invoice_template";
    pub const ONBOARDING: &str = "invoice_onboarding";
}

/// Loads and deserializes the value stored under `key`, degrading to
/// `T::default()` on an unavailable backend, a read failure, or a corrupt
/// blob.
pub(crate) fn load_or_default<T>(adapter: &Arc<dyn StorageAdapter>, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    if !adapter.is_available() {
        warn!(key, "storage unavailable, returning default");
        return T::default();
    }
    let raw = match adapter.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            warn!(key, error = %e, "failed to read from storage, returning default");
            return T::default();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(key, error = %e, "failed to parse stored blob, returning default");
            T::default()
        }
    }
}

/// Serializes `value` and writes it under `key`. Returns false (after
/// logging) instead of erroring when the backend is unavailable or the
/// write fails.
pub(crate) fn persist<T>(adapter: &Arc<dyn StorageAdapter>, key: &str, value: &T) -> bool
where
    T: Serialize,
{
    if !adapter.is_available() {
        warn!(key, "storage unavailable, skipping write");
        return false;
    }
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!(key, error = %e, "failed to serialize value, skipping write");
            return false;
        }
    };
    match adapter.write(key, &raw) {
        Ok(()) => true,
        Err(e) => {
            warn!(key, error = %e, "failed to write to storage");
            false
        }
    }
}

/// All stores over one shared adapter, plus the cross-store policies that
/// no single collection can enforce alone.
#[derive(Clone)]
pub struct StoreSet {
    pub clients: ClientStore,
    pub invoices: InvoiceStore,
    pub draft: DraftStore,
    pub settings: SettingsStore,
}

impl StoreSet {
    pub fn new(adapter: Arc<dyn StorageAdapter>) -> Self {
        Self {
            clients: ClientStore::new(adapter.clone()),
            invoices: InvoiceStore::new(adapter.clone()),
            draft: DraftStore::new(adapter.clone()),
            settings: SettingsStore::new(adapter),
        }
    }

    /// Persists a new invoice and keeps the client's denormalized invoice
    /// count in step.
    pub fn create_invoice(
        &self,
        data: crate::domain::InvoiceData,
        client_id: &str,
    ) -> Option<crate::domain::InvoiceHistoryItem> {
        let created = self.invoices.add(data, client_id)?;
        self.clients.increment_invoice_count(client_id);
        Some(created)
    }

    /// Removes an invoice and best-effort decrements its client's count.
    pub fn delete_invoice(&self, id: &str) -> bool {
        let client_id = self.invoices.get(id).map(|inv| inv.client_id);
        if !self.invoices.remove(id) {
            return false;
        }
        if let Some(client_id) = client_id {
            self.clients.decrement_invoice_count(&client_id);
        }
        true
    }

    /// Deletes a client and cascades to every invoice referencing it, so
    /// no orphaned history entries are left behind.
    pub fn delete_client(&self, id: &str) -> bool {
        for invoice in self.invoices.by_client(id) {
            self.invoices.remove(&invoice.id);
        }
        self.clients.remove(id)
    }
}
