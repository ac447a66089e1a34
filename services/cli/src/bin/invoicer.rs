//! services/cli/src/bin/invoicer.rs
//!
//! A small read-only console surface over the core stores: it lists the
//! persisted clients and invoices, prints the aggregate statistics, and
//! previews the next invoice number. All mutation flows belong to the UI
//! layer; this binary only exercises the core's public API.

use std::sync::Arc;

use cli_lib::{CliError, Config, JsonFileAdapter};
use invoicer_core::StoreSet;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), CliError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!(data_dir = %config.data_dir.display(), "Configuration loaded");

    // --- 2. Build the Stores Over the Filesystem Adapter ---
    let adapter = Arc::new(JsonFileAdapter::new(&config.data_dir));
    let stores = StoreSet::new(adapter);

    // --- 3. Dispatch the Command ---
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = args.first().map(String::as_str).unwrap_or("help");
    match command {
        "clients" => list_clients(&stores),
        "invoices" => list_invoices(&stores, args.get(1).map(String::as_str)),
        "stats" => show_stats(&stores, args.get(1).map(String::as_str)),
        "next-number" => {
            let preview = stores.invoices.next_invoice_number(args.get(1).map(String::as_str));
            println!("{}", preview);
        }
        "search" => {
            let text = args
                .get(1)
                .ok_or_else(|| CliError::Usage("search needs a query".to_string()))?;
            for invoice in stores.invoices.search(text, None) {
                print_invoice_line(&invoice);
            }
        }
        "help" => print_usage(),
        other => {
            print_usage();
            return Err(CliError::Usage(format!("unknown command '{}'", other)));
        }
    }

    Ok(())
}

fn list_clients(stores: &StoreSet) {
    for client in stores.clients.list() {
        println!(
            "{}  {}  invoices: {}  {}",
            client.id, client.name, client.invoice_count, client.email
        );
    }
}

fn list_invoices(stores: &StoreSet, client_id: Option<&str>) {
    let invoices = match client_id {
        Some(client_id) => stores.invoices.by_client(client_id),
        None => stores.invoices.list(),
    };
    for invoice in invoices {
        print_invoice_line(&invoice);
    }
}

fn print_invoice_line(invoice: &invoicer_core::InvoiceHistoryItem) {
    println!(
        "{}  {}  {}  {}  {:.2} {}  due {:.2}",
        invoice.id,
        invoice.data.invoice_number,
        invoice.data.invoice_date,
        invoice.status.as_str(),
        invoice.data.total,
        invoice.data.currency,
        invoice.due_amount,
    );
}

fn show_stats(stores: &StoreSet, client_id: Option<&str>) {
    let clients = stores.clients.stats();
    println!(
        "clients: {}  invoices: {}  avg/client: {:.2}",
        clients.total_clients, clients.total_invoices, clients.average_invoices_per_client
    );
    let summary = stores.invoices.stats(client_id);
    println!(
        "invoiced: {:.2}  paid: {:.2}  unpaid: {:.2}  overdue: {}",
        summary.total_invoiced, summary.total_paid, summary.total_unpaid, summary.overdue_count
    );
    for (status, count) in &summary.by_status {
        println!("  {}: {}", status.as_str(), count);
    }
}

fn print_usage() {
    println!("usage: invoicer <command>");
    println!("  clients                 list all clients");
    println!("  invoices [client_id]    list invoices, optionally for one client");
    println!("  stats [client_id]       show client and invoice statistics");
    println!("  next-number [client_id] preview the next invoice number");
    println!("  search <text>           full-text search across invoices");
}
