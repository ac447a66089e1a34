//! crates/invoicer_core/src/calculation.rs
//!
//! Derives line-item amounts and invoice totals from the raw decimal-string
//! inputs. Everything here is pure arithmetic over f64: no allocation
//! beyond the results, no errors, and recomputation is idempotent.

use crate::domain::{InvoiceData, LineItem};

/// The derived totals of one invoice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceTotals {
    pub subtotal: f64,
    pub tax_amount: f64,
    pub total: f64,
}

/// Parses a decimal-string input. Unparseable or non-finite values are
/// treated as 0 so the calculation never fails mid-edit.
pub fn parse_amount(value: &str) -> f64 {
    let parsed: f64 = value.trim().parse().unwrap_or(0.0);
    if parsed.is_finite() {
        parsed
    } else {
        0.0
    }
}

/// Amount of a single line: parsed unit cost times parsed quantity.
pub fn line_item_amount(unit_cost: &str, quantity: &str) -> f64 {
    parse_amount(unit_cost) * parse_amount(quantity)
}

/// Computes the invoice totals from scratch.
///
/// The subtotal sums each item's *recomputed* amount, never the stored
/// one. Tax is a flat percentage of the subtotal; discount is a flat
/// currency amount; the total is floored at zero.
pub fn invoice_totals(
    line_items: &[LineItem],
    tax_rate: &str,
    discount: &str,
    shipping_fee: &str,
) -> InvoiceTotals {
    let subtotal: f64 = line_items
        .iter()
        .map(|item| line_item_amount(&item.unit_cost, &item.quantity))
        .sum();
    let tax_amount = subtotal * (parse_amount(tax_rate) / 100.0);
    let total =
        (subtotal + tax_amount + parse_amount(shipping_fee) - parse_amount(discount)).max(0.0);
    InvoiceTotals {
        subtotal,
        tax_amount,
        total,
    }
}

/// Rewrites every derived field of `data` in place: each line amount, then
/// the subtotal and total. Called before every persist so stale derived
/// values can never be written out.
pub fn recompute(data: &mut InvoiceData) {
    for item in &mut data.line_items {
        item.amount = line_item_amount(&item.unit_cost, &item.quantity);
    }
    let totals = invoice_totals(
        &data.line_items,
        &data.tax_rate,
        &data.discount,
        &data.shipping_fee,
    );
    data.subtotal = totals.subtotal;
    data.total = totals.total;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(unit_cost: &str, quantity: &str) -> LineItem {
        LineItem {
            id: "item_test".to_string(),
            description: String::new(),
            unit_cost: unit_cost.to_string(),
            quantity: quantity.to_string(),
            amount: 0.0,
        }
    }

    #[test]
    fn line_amount_is_product_of_parsed_inputs() {
        assert_eq!(line_item_amount("12.5", "4"), 50.0);
        assert_eq!(line_item_amount(" 3 ", "2"), 6.0);
    }

    #[test]
    fn unparseable_inputs_count_as_zero() {
        assert_eq!(line_item_amount("abc", "3"), 0.0);
        assert_eq!(line_item_amount("", ""), 0.0);
        assert_eq!(line_item_amount("NaN", "2"), 0.0);
        assert_eq!(line_item_amount("inf", "2"), 0.0);
    }

    #[test]
    fn totals_combine_tax_shipping_and_discount() {
        let items = vec![item("100", "1"), item("50", "2")];
        let totals = invoice_totals(&items, "10", "20", "5");
        assert_eq!(totals.subtotal, 200.0);
        assert_eq!(totals.tax_amount, 20.0);
        assert_eq!(totals.total, 205.0);
    }

    #[test]
    fn total_is_floored_at_zero() {
        let items = vec![item("100", "1")];
        let totals = invoice_totals(&items, "", "500", "");
        assert_eq!(totals.total, 0.0);
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut data = InvoiceData {
            line_items: vec![item("19.99", "3"), item("5", "0.5")],
            tax_rate: "8.875".to_string(),
            discount: "10".to_string(),
            shipping_fee: "12.50".to_string(),
            ..InvoiceData::default()
        };
        recompute(&mut data);
        let first = data.clone();
        recompute(&mut data);
        assert_eq!(data, first);
    }

    #[test]
    fn recompute_overwrites_hand_set_amounts() {
        let mut data = InvoiceData::default();
        data.line_items = vec![LineItem {
            amount: 999.0,
            ..item("10", "2")
        }];
        recompute(&mut data);
        assert_eq!(data.line_items[0].amount, 20.0);
        assert_eq!(data.subtotal, 20.0);
    }
}
