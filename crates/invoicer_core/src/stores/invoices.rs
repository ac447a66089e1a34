//! crates/invoicer_core/src/stores/invoices.rs
//!
//! The invoice history store: CRUD over persisted invoices, payment
//! marking, duplication, and the invoice-number sequence. Derived totals
//! are recomputed on every write path so a persisted invoice can never
//! carry stale amounts.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::warn;

use crate::calculation;
use crate::domain::{InvoiceData, InvoiceHistoryItem, InvoiceStatus};
use crate::ids;
use crate::ports::StorageAdapter;
use crate::query::{self, InvoiceFilter, InvoiceSort, InvoiceSummary};
use crate::stores::{keys, load_or_default, persist};

/// Counter key for numbers not scoped to any client.
const GLOBAL_COUNTER: &str = "global";

#[derive(Clone)]
pub struct InvoiceStore {
    adapter: Arc<dyn StorageAdapter>,
}

impl InvoiceStore {
    pub fn new(adapter: Arc<dyn StorageAdapter>) -> Self {
        Self { adapter }
    }

    fn load(&self) -> Vec<InvoiceHistoryItem> {
        load_or_default(&self.adapter, keys::HISTORY)
    }

    fn save(&self, invoices: &[InvoiceHistoryItem]) -> bool {
        persist(&self.adapter, keys::HISTORY, &invoices)
    }

    fn load_counters(&self) -> BTreeMap<String, u64> {
        load_or_default(&self.adapter, keys::COUNTERS)
    }

    /// Advances both the per-client and the global sequence in one
    /// read-modify-write, so an add can never bump one without the other.
    fn bump_counters(&self, client_id: &str) -> bool {
        let mut counters = self.load_counters();
        *counters.entry(client_id.to_string()).or_insert(0) += 1;
        *counters.entry(GLOBAL_COUNTER.to_string()).or_insert(0) += 1;
        persist(&self.adapter, keys::COUNTERS, &counters)
    }

    /// Previews the number the next add would assign, formatted
    /// `INV-{n:04}`. Pure read: calling this never advances the sequence.
    pub fn next_invoice_number(&self, client_id: Option<&str>) -> String {
        let counters = self.load_counters();
        let key = client_id.unwrap_or(GLOBAL_COUNTER);
        let next = counters.get(key).copied().unwrap_or(0) + 1;
        format!("INV-{:04}", next)
    }

    pub fn list(&self) -> Vec<InvoiceHistoryItem> {
        self.load()
    }

    pub fn get(&self, id: &str) -> Option<InvoiceHistoryItem> {
        self.load().into_iter().find(|inv| inv.id == id)
    }

    pub fn by_client(&self, client_id: &str) -> Vec<InvoiceHistoryItem> {
        self.load()
            .into_iter()
            .filter(|inv| inv.client_id == client_id)
            .collect()
    }

    /// Persists a new invoice against `client_id`. Totals are recomputed,
    /// a blank invoice number is auto-assigned from the sequence, and the
    /// counters advance exactly once per successful add.
    pub fn add(&self, mut data: InvoiceData, client_id: &str) -> Option<InvoiceHistoryItem> {
        if client_id.trim().is_empty() {
            warn!("refusing to add invoice without a client id");
            return None;
        }
        calculation::recompute(&mut data);
        if data.invoice_number.trim().is_empty() {
            data.invoice_number = self.next_invoice_number(Some(client_id));
        }
        let now = ids::timestamp();
        let total = data.total;
        let invoice = InvoiceHistoryItem {
            data,
            id: ids::new_id(ids::INVOICE_PREFIX),
            client_id: client_id.to_string(),
            status: InvoiceStatus::Draft,
            created_at: now.clone(),
            updated_at: now,
            due_amount: total,
            paid_amount: 0.0,
            paid_at: None,
        };
        let mut invoices = self.load();
        invoices.push(invoice.clone());
        if !self.save(&invoices) {
            return None;
        }
        if !self.bump_counters(client_id) {
            // The invoice is already persisted; a failed counter write only
            // delays the sequence, it does not lose the record.
            warn!(id = %invoice.id, "invoice persisted but counter update failed");
        }
        Some(invoice)
    }

    /// Applies a partial mutation to the stored invoice, then recomputes
    /// derived totals and refreshes `updated_at`.
    pub fn update<F>(&self, id: &str, apply: F) -> Option<InvoiceHistoryItem>
    where
        F: FnOnce(&mut InvoiceHistoryItem),
    {
        let mut invoices = self.load();
        let invoice = match invoices.iter_mut().find(|inv| inv.id == id) {
            Some(invoice) => invoice,
            None => {
                warn!(id, "invoice not found for update");
                return None;
            }
        };
        apply(invoice);
        calculation::recompute(&mut invoice.data);
        invoice.updated_at = ids::timestamp();
        let updated = invoice.clone();
        if self.save(&invoices) {
            Some(updated)
        } else {
            None
        }
    }

    pub fn remove(&self, id: &str) -> bool {
        let mut invoices = self.load();
        let before = invoices.len();
        invoices.retain(|inv| inv.id != id);
        if invoices.len() == before {
            warn!(id, "invoice not found for delete");
            return false;
        }
        self.save(&invoices)
    }

    /// Marks an invoice paid. Without an explicit amount the full total is
    /// considered paid; `due_amount` becomes total minus the paid amount
    /// and `paid_at` is stamped (this is the only path that sets it).
    pub fn mark_paid(&self, id: &str, paid_amount: Option<f64>) -> Option<InvoiceHistoryItem> {
        self.update(id, |invoice| {
            let paid = paid_amount.unwrap_or(invoice.data.total);
            invoice.status = InvoiceStatus::Paid;
            invoice.paid_amount = paid;
            invoice.due_amount = invoice.data.total - paid;
            invoice.paid_at = Some(ids::timestamp());
        })
    }

    /// Deep-copies an invoice into a fresh draft: new id, fresh line-item
    /// ids, invoice date reset to today, invoice number cleared so the
    /// next add re-numbers it, and payment bookkeeping reset.
    pub fn duplicate(&self, id: &str, client_id: Option<&str>) -> Option<InvoiceHistoryItem> {
        let source = match self.get(id) {
            Some(source) => source,
            None => {
                warn!(id, "invoice not found for duplicate");
                return None;
            }
        };
        let mut data = source.data.clone();
        data.invoice_number = String::new();
        data.invoice_date = ids::today();
        for item in &mut data.line_items {
            item.id = ids::new_id(ids::LINE_ITEM_PREFIX);
        }
        let client_id = client_id.unwrap_or(&source.client_id);
        self.add(data, client_id)
    }

    /// Conjunction filter plus single-field sort over the whole history.
    pub fn filtered(&self, filter: &InvoiceFilter, sort: &InvoiceSort) -> Vec<InvoiceHistoryItem> {
        query::filter_and_sort(self.load(), filter, sort)
    }

    /// Case-insensitive full-text search, optionally pre-filtered by client.
    pub fn search(&self, text: &str, client_id: Option<&str>) -> Vec<InvoiceHistoryItem> {
        query::search(self.load(), text, client_id)
    }

    /// Aggregate totals and status breakdown, optionally per client.
    pub fn stats(&self, client_id: Option<&str>) -> InvoiceSummary {
        query::summarize(&self.load(), client_id)
    }
}
