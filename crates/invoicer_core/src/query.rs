//! crates/invoicer_core/src/query.rs
//!
//! Filtering, sorting, full-text search and statistics over invoice
//! slices. Pure functions: the invoice store surfaces them as methods but
//! they never touch storage themselves.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::domain::{InvoiceHistoryItem, InvoiceStatus};
use crate::ids;

/// A conjunction of optional clauses; unset clauses impose no constraint.
/// Date bounds compare against the invoice date, amount bounds against the
/// derived total.
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub client_id: Option<String>,
    pub status: Option<InvoiceStatus>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub amount_min: Option<f64>,
    pub amount_max: Option<f64>,
}

/// The single field a result set is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    InvoiceNumber,
    BillTo,
    InvoiceDate,
    DueDate,
    Total,
    Status,
    #[default]
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceSort {
    pub field: SortField,
    pub direction: SortDirection,
}

/// Aggregate numbers over a set of invoices.
///
/// `total_paid` sums the persisted `paid_amount` field as-is; it is not
/// re-derived from status. Overdue means a not-paid, not-cancelled invoice
/// whose due date (ISO string compare) lies before today.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InvoiceSummary {
    pub invoice_count: usize,
    pub total_invoiced: f64,
    pub total_paid: f64,
    pub total_unpaid: f64,
    pub overdue_count: usize,
    pub by_status: BTreeMap<InvoiceStatus, usize>,
}

fn matches(invoice: &InvoiceHistoryItem, filter: &InvoiceFilter) -> bool {
    if let Some(client_id) = &filter.client_id {
        if &invoice.client_id != client_id {
            return false;
        }
    }
    if let Some(status) = filter.status {
        if invoice.status != status {
            return false;
        }
    }
    if let Some(date_from) = &filter.date_from {
        if invoice.data.invoice_date.as_str() < date_from.as_str() {
            return false;
        }
    }
    if let Some(date_to) = &filter.date_to {
        if invoice.data.invoice_date.as_str() > date_to.as_str() {
            return false;
        }
    }
    if let Some(amount_min) = filter.amount_min {
        if invoice.data.total < amount_min {
            return false;
        }
    }
    if let Some(amount_max) = filter.amount_max {
        if invoice.data.total > amount_max {
            return false;
        }
    }
    true
}

fn compare(a: &InvoiceHistoryItem, b: &InvoiceHistoryItem, field: SortField) -> Ordering {
    // String fields compare case-insensitively; floats fall back to Equal
    // on the non-total NaN edge, which a floored total never produces.
    match field {
        SortField::InvoiceNumber => str_cmp(&a.data.invoice_number, &b.data.invoice_number),
        SortField::BillTo => str_cmp(&a.data.bill_to, &b.data.bill_to),
        SortField::InvoiceDate => a.data.invoice_date.cmp(&b.data.invoice_date),
        SortField::DueDate => a.data.due_date.cmp(&b.data.due_date),
        SortField::Total => a
            .data
            .total
            .partial_cmp(&b.data.total)
            .unwrap_or(Ordering::Equal),
        SortField::Status => a.status.cmp(&b.status),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

fn str_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Applies the filter conjunction, then orders by the requested field. The sort
/// is stable: ties keep the underlying collection order.
pub fn filter_and_sort(
    invoices: Vec<InvoiceHistoryItem>,
    filter: &InvoiceFilter,
    sort: &InvoiceSort,
) -> Vec<InvoiceHistoryItem> {
    let mut hits: Vec<_> = invoices
        .into_iter()
        .filter(|inv| matches(inv, filter))
        .collect();
    hits.sort_by(|a, b| {
        let ordering = compare(a, b, sort.field);
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    hits
}

/// Case-insensitive substring match across invoice number, bill-to,
/// purchase order and notes (OR across fields), with an optional exact
/// client pre-filter.
pub fn search(
    invoices: Vec<InvoiceHistoryItem>,
    text: &str,
    client_id: Option<&str>,
) -> Vec<InvoiceHistoryItem> {
    let needle = text.trim().to_lowercase();
    invoices
        .into_iter()
        .filter(|inv| client_id.map_or(true, |id| inv.client_id == id))
        .filter(|inv| {
            if needle.is_empty() {
                return true;
            }
            [
                &inv.data.invoice_number,
                &inv.data.bill_to,
                &inv.data.purchase_order,
                &inv.data.notes,
            ]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Totals, paid/unpaid split, overdue count and per-status counts.
pub fn summarize(invoices: &[InvoiceHistoryItem], client_id: Option<&str>) -> InvoiceSummary {
    let today = ids::today();
    let mut summary = InvoiceSummary::default();
    for invoice in invoices
        .iter()
        .filter(|inv| client_id.map_or(true, |id| inv.client_id == id))
    {
        summary.invoice_count += 1;
        summary.total_invoiced += invoice.data.total;
        summary.total_paid += invoice.paid_amount;
        *summary.by_status.entry(invoice.status).or_insert(0) += 1;
        let open = !matches!(
            invoice.status,
            InvoiceStatus::Paid | InvoiceStatus::Cancelled
        );
        if open && !invoice.data.due_date.is_empty() && invoice.data.due_date < today {
            summary.overdue_count += 1;
        }
    }
    summary.total_unpaid = (summary.total_invoiced - summary.total_paid).max(0.0);
    summary
}
