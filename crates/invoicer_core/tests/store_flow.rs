//! End-to-end flows over a shared in-memory adapter: the composed
//! `StoreSet` policies, cross-store bookkeeping, and the persisted wire
//! shapes.

use std::sync::Arc;

use invoicer_core::{
    InvoiceData, InvoiceFilter, InvoiceSort, InvoiceStatus, LineItem, MemoryAdapter, NewClient,
    SortDirection, SortField, StorageAdapter, StoreSet,
};

fn store_set() -> (StoreSet, Arc<MemoryAdapter>) {
    let adapter = Arc::new(MemoryAdapter::new());
    (StoreSet::new(adapter.clone()), adapter)
}

fn client(name: &str) -> NewClient {
    NewClient {
        name: name.to_string(),
        ..NewClient::default()
    }
}

fn invoice_for(bill_to: &str, unit_cost: &str, quantity: &str) -> InvoiceData {
    InvoiceData {
        bill_to: bill_to.to_string(),
        company_details: "Me Inc".to_string(),
        line_items: vec![LineItem {
            id: "item_fixture".to_string(),
            description: "Work".to_string(),
            unit_cost: unit_cost.to_string(),
            quantity: quantity.to_string(),
            amount: 0.0,
        }],
        ..InvoiceData::default()
    }
}

#[test]
fn client_stats_follow_invoice_creation() {
    let (stores, _) = store_set();
    let a = stores.clients.add(client("Acme")).unwrap();
    stores.clients.add(client("Globex")).unwrap();
    stores.clients.add(client("Initech")).unwrap();

    let stats = stores.clients.stats();
    assert_eq!(stats.total_clients, 3);
    assert_eq!(stats.total_invoices, 0);
    assert_eq!(stats.average_invoices_per_client, 0.0);

    stores
        .create_invoice(invoice_for("Acme", "100", "1"), &a.id)
        .unwrap();

    let stats = stores.clients.stats();
    assert_eq!(stats.total_invoices, 1);
    assert_eq!(stats.average_invoices_per_client, 0.33);
}

#[test]
fn deleting_a_client_cascades_to_its_invoices() {
    let (stores, _) = store_set();
    let a = stores.clients.add(client("Acme")).unwrap();
    let b = stores.clients.add(client("Globex")).unwrap();
    stores
        .create_invoice(invoice_for("Acme", "10", "1"), &a.id)
        .unwrap();
    stores
        .create_invoice(invoice_for("Acme", "20", "1"), &a.id)
        .unwrap();
    let kept = stores
        .create_invoice(invoice_for("Globex", "30", "1"), &b.id)
        .unwrap();

    assert!(stores.delete_client(&a.id));
    assert!(stores.clients.get(&a.id).is_none());
    assert!(stores.invoices.by_client(&a.id).is_empty());
    assert_eq!(stores.invoices.list(), vec![kept]);
}

#[test]
fn delete_invoice_keeps_the_client_count_in_step() {
    let (stores, _) = store_set();
    let a = stores.clients.add(client("Acme")).unwrap();
    let created = stores
        .create_invoice(invoice_for("Acme", "10", "1"), &a.id)
        .unwrap();
    assert_eq!(stores.clients.get(&a.id).unwrap().invoice_count, 1);

    assert!(stores.delete_invoice(&created.id));
    assert_eq!(stores.clients.get(&a.id).unwrap().invoice_count, 0);
    assert!(!stores.delete_invoice(&created.id));
}

#[test]
fn filtered_paid_invoices_sort_descending_by_total() {
    let (stores, _) = store_set();
    let a = stores.clients.add(client("Acme")).unwrap();
    let fixture = [
        ("50", InvoiceStatus::Paid),
        ("300", InvoiceStatus::Sent),
        ("120", InvoiceStatus::Paid),
        ("500", InvoiceStatus::Draft),
    ];
    for (unit_cost, status) in fixture {
        let created = stores
            .create_invoice(invoice_for("Acme", unit_cost, "1"), &a.id)
            .unwrap();
        if status == InvoiceStatus::Paid {
            stores.invoices.mark_paid(&created.id, None).unwrap();
        } else {
            stores.invoices.update(&created.id, |inv| inv.status = status);
        }
    }

    let hits = stores.invoices.filtered(
        &InvoiceFilter {
            status: Some(InvoiceStatus::Paid),
            ..InvoiceFilter::default()
        },
        &InvoiceSort {
            field: SortField::Total,
            direction: SortDirection::Desc,
        },
    );
    let totals: Vec<f64> = hits.iter().map(|inv| inv.data.total).collect();
    assert_eq!(totals, vec![120.0, 50.0]);
}

#[test]
fn stores_share_one_persisted_medium() {
    let (stores, adapter) = store_set();
    let a = stores.clients.add(client("Acme")).unwrap();
    stores
        .create_invoice(invoice_for("Acme", "100", "2"), &a.id)
        .unwrap();

    // A second StoreSet over the same adapter sees the same collections,
    // the way a re-rendered UI re-reads the persisted blobs.
    let reread = StoreSet::new(adapter);
    assert_eq!(reread.clients.list().len(), 1);
    let invoices = reread.invoices.list();
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0].data.total, 200.0);
}

#[test]
fn persisted_blobs_use_the_camel_case_wire_format() {
    let (stores, adapter) = store_set();
    let a = stores.clients.add(client("Acme")).unwrap();
    stores
        .create_invoice(invoice_for("Acme", "10", "3"), &a.id)
        .unwrap();

    let clients_blob = adapter.read("invoice_clients").unwrap().unwrap();
    assert!(clients_blob.contains("\"invoiceCount\""));
    assert!(clients_blob.contains("\"createdAt\""));

    let history_blob = adapter.read("invoice_history").unwrap().unwrap();
    assert!(history_blob.contains("\"invoiceNumber\""));
    assert!(history_blob.contains("\"lineItems\""));
    assert!(history_blob.contains("\"unitCost\""));
    assert!(history_blob.contains("\"clientId\""));
    assert!(history_blob.contains("\"status\":\"draft\""));

    let counters_blob = adapter.read("invoice_counters").unwrap().unwrap();
    assert!(counters_blob.contains("\"global\":1"));
}

#[test]
fn foreign_fields_in_stored_blobs_do_not_break_loads() {
    let adapter = Arc::new(MemoryAdapter::new());
    // A blob written by a newer shape: extra fields, some known ones absent.
    adapter
        .write(
            "invoice_clients",
            r#"[{"id":"client_1","name":"Acme","createdAt":"2024-01-01T00:00:00.000Z",
                "updatedAt":"2024-01-01T00:00:00.000Z","starRating":5}]"#,
        )
        .unwrap();
    let stores = StoreSet::new(adapter);
    let clients = stores.clients.list();
    assert_eq!(clients.len(), 1);
    assert_eq!(clients[0].name, "Acme");
    assert_eq!(clients[0].invoice_count, 0);
    assert_eq!(clients[0].email, "");
}
