//! crates/invoicer_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! The serialized shapes of these structs (camelCase JSON) are the de-facto
//! wire format of the persisted collections, so every field that may be
//! missing in older blobs carries `#[serde(default)]` and loads degrade to
//! defaults instead of failing the whole collection.

use serde::{Deserialize, Serialize};

use crate::ids;

/// A billable client. `invoice_count` is denormalized bookkeeping maintained
/// by the invoice side; it is best-effort, not authoritative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    /// Never empty or whitespace-only after trim.
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub notes: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub invoice_count: u32,
}

/// A single product/service row on an invoice.
///
/// `unit_cost` and `quantity` are kept as the raw decimal strings the user
/// typed; `amount` is derived from them and is recomputed on every
/// calculation pass, never set by callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub unit_cost: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub amount: f64,
}

impl LineItem {
    /// A blank row with a fresh id, as seeded into a new draft.
    pub fn blank() -> Self {
        Self {
            id: ids::new_id(ids::LINE_ITEM_PREFIX),
            description: String::new(),
            unit_cost: String::new(),
            quantity: String::new(),
            amount: 0.0,
        }
    }
}

/// The draft/template shape shared by the scratch invoice and each history
/// entry's snapshot. Dates are ISO-8601 date strings; `tax_rate`,
/// `discount` and `shipping_fee` are raw decimal-string inputs; `subtotal`
/// and `total` are derived and rewritten by the calculation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceData {
    #[serde(default)]
    pub invoice_number: String,
    #[serde(default)]
    pub purchase_order: String,
    /// Logo image as a data-URL string.
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub company_details: String,
    #[serde(default)]
    pub bill_to: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub invoice_date: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub bank_details: String,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub tax_rate: String,
    #[serde(default)]
    pub discount: String,
    #[serde(default)]
    pub shipping_fee: String,
    #[serde(default)]
    pub total: f64,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for InvoiceData {
    /// The shape of a freshly opened draft: today's date, one blank row.
    fn default() -> Self {
        Self {
            invoice_number: String::new(),
            purchase_order: String::new(),
            logo: String::new(),
            company_details: String::new(),
            bill_to: String::new(),
            currency: default_currency(),
            invoice_date: ids::today(),
            due_date: String::new(),
            line_items: vec![LineItem::blank()],
            notes: String::new(),
            bank_details: String::new(),
            subtotal: 0.0,
            tax_rate: String::new(),
            discount: String::new(),
            shipping_fee: String::new(),
            total: 0.0,
        }
    }
}

/// Lifecycle state of a persisted invoice. Transitions are free-form; no
/// state machine is enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Draft,
    Sent,
    Paid,
    Overdue,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Paid => "paid",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Cancelled => "cancelled",
        }
    }
}

/// A persisted invoice: the snapshot plus identity and payment bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceHistoryItem {
    #[serde(flatten)]
    pub data: InvoiceData,
    pub id: String,
    pub client_id: String,
    pub status: InvoiceStatus,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub due_amount: f64,
    #[serde(default)]
    pub paid_amount: f64,
    /// Set only by the mark-as-paid operation.
    #[serde(default)]
    pub paid_at: Option<String>,
}

/// Colour-scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    #[serde(default)]
    pub mode: ThemeMode,
}

/// Invoice rendering template preference. Persisted as a JSON-quoted string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    #[default]
    Classic,
    Modern,
    Minimal,
}
