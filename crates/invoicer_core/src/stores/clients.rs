//! crates/invoicer_core/src/stores/clients.rs
//!
//! CRUD, search and statistics over the persisted client collection.

use std::sync::Arc;

use tracing::warn;

use crate::domain::Client;
use crate::ids;
use crate::ports::StorageAdapter;
use crate::stores::{keys, load_or_default, persist};

/// Input for creating a client. Everything but the name is optional.
#[derive(Debug, Clone, Default)]
pub struct NewClient {
    pub name: String,
    pub company: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub notes: String,
}

/// A partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// Aggregate numbers over the whole client collection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClientStats {
    pub total_clients: usize,
    pub total_invoices: u64,
    /// Rounded to two decimal places.
    pub average_invoices_per_client: f64,
}

#[derive(Clone)]
pub struct ClientStore {
    adapter: Arc<dyn StorageAdapter>,
}

impl ClientStore {
    pub fn new(adapter: Arc<dyn StorageAdapter>) -> Self {
        Self { adapter }
    }

    fn load(&self) -> Vec<Client> {
        load_or_default(&self.adapter, keys::CLIENTS)
    }

    fn save(&self, clients: &[Client]) -> bool {
        persist(&self.adapter, keys::CLIENTS, &clients)
    }

    pub fn list(&self) -> Vec<Client> {
        self.load()
    }

    pub fn get(&self, id: &str) -> Option<Client> {
        self.load().into_iter().find(|c| c.id == id)
    }

    /// Creates and persists a client. Blank or whitespace-only names are
    /// rejected up front — the name invariant holds in the store too, not
    /// just in the form validator.
    pub fn add(&self, new_client: NewClient) -> Option<Client> {
        let name = new_client.name.trim().to_string();
        if name.is_empty() {
            warn!("refusing to add client with empty name");
            return None;
        }
        let now = ids::timestamp();
        let client = Client {
            id: ids::new_id(ids::CLIENT_PREFIX),
            name,
            company: new_client.company,
            email: new_client.email,
            phone: new_client.phone,
            address: new_client.address,
            notes: new_client.notes,
            created_at: now.clone(),
            updated_at: now,
            invoice_count: 0,
        };
        let mut clients = self.load();
        clients.push(client.clone());
        if self.save(&clients) {
            Some(client)
        } else {
            None
        }
    }

    /// Merges the patch into the stored client and refreshes `updated_at`.
    /// A patched name that trims to empty is ignored to keep the invariant.
    pub fn update(&self, id: &str, patch: ClientPatch) -> Option<Client> {
        let mut clients = self.load();
        let client = match clients.iter_mut().find(|c| c.id == id) {
            Some(client) => client,
            None => {
                warn!(id, "client not found for update");
                return None;
            }
        };
        if let Some(name) = patch.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                warn!(id, "ignoring empty name in client update");
            } else {
                client.name = name;
            }
        }
        if let Some(company) = patch.company {
            client.company = company;
        }
        if let Some(email) = patch.email {
            client.email = email;
        }
        if let Some(phone) = patch.phone {
            client.phone = phone;
        }
        if let Some(address) = patch.address {
            client.address = address;
        }
        if let Some(notes) = patch.notes {
            client.notes = notes;
        }
        client.updated_at = ids::timestamp();
        let updated = client.clone();
        if self.save(&clients) {
            Some(updated)
        } else {
            None
        }
    }

    /// Removes the client record. This store does not cascade; the
    /// cross-collection policy lives on `StoreSet::delete_client`.
    pub fn remove(&self, id: &str) -> bool {
        let mut clients = self.load();
        let before = clients.len();
        clients.retain(|c| c.id != id);
        if clients.len() == before {
            warn!(id, "client not found for delete");
            return false;
        }
        self.save(&clients)
    }

    /// Case-insensitive substring match on name OR email.
    pub fn search(&self, query: &str) -> Vec<Client> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.load();
        }
        self.load()
            .into_iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle)
                    || c.email.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn stats(&self) -> ClientStats {
        let clients = self.load();
        let total_clients = clients.len();
        let total_invoices: u64 = clients.iter().map(|c| u64::from(c.invoice_count)).sum();
        let average = if total_clients == 0 {
            0.0
        } else {
            let raw = total_invoices as f64 / total_clients as f64;
            (raw * 100.0).round() / 100.0
        };
        ClientStats {
            total_clients,
            total_invoices,
            average_invoices_per_client: average,
        }
    }

    pub fn increment_invoice_count(&self, id: &str) -> bool {
        self.adjust_invoice_count(id, 1)
    }

    /// Floors at zero; the count is best-effort bookkeeping.
    pub fn decrement_invoice_count(&self, id: &str) -> bool {
        self.adjust_invoice_count(id, -1)
    }

    fn adjust_invoice_count(&self, id: &str, delta: i64) -> bool {
        let mut clients = self.load();
        let client = match clients.iter_mut().find(|c| c.id == id) {
            Some(client) => client,
            None => {
                warn!(id, "client not found for invoice-count adjustment");
                return false;
            }
        };
        client.invoice_count = (i64::from(client.invoice_count) + delta).max(0) as u32;
        client.updated_at = ids::timestamp();
        self.save(&clients)
    }
}
