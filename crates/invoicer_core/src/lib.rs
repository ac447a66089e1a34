pub mod calculation;
pub mod domain;
pub mod ids;
pub mod memory;
pub mod ports;
pub mod query;
pub mod stores;
pub mod validation;

pub use domain::{
    Client, InvoiceData, InvoiceHistoryItem, InvoiceStatus, LineItem, TemplateType, ThemeConfig,
    ThemeMode,
};
pub use memory::MemoryAdapter;
pub use ports::{StorageAdapter, StorageError, StorageResult};
pub use query::{InvoiceFilter, InvoiceSort, InvoiceSummary, SortDirection, SortField};
pub use stores::{
    ClientPatch, ClientStats, ClientStore, DraftStore, InvoiceStore, NewClient, SettingsStore,
    StoreSet,
};
