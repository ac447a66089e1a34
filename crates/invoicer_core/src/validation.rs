//! crates/invoicer_core/src/validation.rs
//!
//! Pure, stateless form-validation rules. Field checks return a
//! `FieldValidation`; whole-form checks aggregate into a `FormValidation`
//! keyed by the camelCase field names the persisted shapes use. Failures
//! are values, never errors: nothing in this module panics or returns
//! `Result`.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{Local, NaiveDate};
use regex::Regex;

use crate::calculation::parse_amount;
use crate::domain::{InvoiceData, LineItem};

/// Largest accepted upload, in bytes (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;
/// Longest accepted line-item description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 200;

const ALLOWED_UPLOAD_TYPES: [&str; 3] = ["image/jpeg", "image/jpg", "image/png"];

fn email_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

fn invoice_number_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap())
}

/// Outcome of a single field check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValidation {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl FieldValidation {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }
}

/// Outcome of a whole-form check. `is_valid` is true iff `errors` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormValidation {
    pub errors: BTreeMap<String, String>,
}

impl FormValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn record(&mut self, field: &str, check: FieldValidation) {
        if let Some(error) = check.error {
            // Last write wins when the same field is checked twice.
            self.errors.insert(field.to_string(), error);
        }
    }
}

/// Fails when the trimmed value is empty.
pub fn validate_required(value: &str, field_name: &str) -> FieldValidation {
    if value.trim().is_empty() {
        FieldValidation::fail(format!("{} is required", field_name))
    } else {
        FieldValidation::ok()
    }
}

/// Empty is valid (optional field); otherwise the value must have a simple
/// `local@domain.tld` shape.
pub fn validate_email(value: &str) -> FieldValidation {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return FieldValidation::ok();
    }
    if email_pattern().is_match(trimmed) {
        FieldValidation::ok()
    } else {
        FieldValidation::fail("Please enter a valid email address")
    }
}

/// Empty is valid; non-empty must parse as a number within `[min, max]`.
pub fn validate_numeric(
    value: &str,
    field_name: &str,
    min: f64,
    max: Option<f64>,
) -> FieldValidation {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return FieldValidation::ok();
    }
    let parsed: f64 = match trimmed.parse() {
        Ok(n) => n,
        Err(_) => return FieldValidation::fail(format!("{} must be a valid number", field_name)),
    };
    if parsed < min {
        return FieldValidation::fail(format!("{} must be at least {}", field_name, min));
    }
    if let Some(max) = max {
        if parsed > max {
            return FieldValidation::fail(format!("{} must be at most {}", field_name, max));
        }
    }
    FieldValidation::ok()
}

/// Numeric validation with bounds `[0, 100]`.
pub fn validate_percentage(value: &str, field_name: &str) -> FieldValidation {
    validate_numeric(value, field_name, 0.0, Some(100.0))
}

/// Required; restricted to letters, digits, hyphens and underscores.
pub fn validate_invoice_number(value: &str) -> FieldValidation {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return FieldValidation::fail("Invoice number is required");
    }
    if invoice_number_pattern().is_match(trimmed) {
        FieldValidation::ok()
    } else {
        FieldValidation::fail(
            "Invoice number can only contain letters, numbers, hyphens, and underscores",
        )
    }
}

/// Empty is valid; non-empty must parse as an ISO date. With `allow_past`
/// false, dates strictly before today are rejected.
pub fn validate_date(value: &str, field_name: &str, allow_past: bool) -> FieldValidation {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return FieldValidation::ok();
    }
    let parsed = match trimmed.parse::<NaiveDate>() {
        Ok(d) => d,
        Err(_) => return FieldValidation::fail(format!("{} is not a valid date", field_name)),
    };
    if !allow_past && parsed < Local::now().date_naive() {
        return FieldValidation::fail(format!("{} cannot be in the past", field_name));
    }
    FieldValidation::ok()
}

/// Valid when either date is empty or unparseable-free ordering holds:
/// the due date must not precede the invoice date.
pub fn validate_due_date_after_invoice_date(
    invoice_date: &str,
    due_date: &str,
) -> FieldValidation {
    let (invoice_date, due_date) = (invoice_date.trim(), due_date.trim());
    if invoice_date.is_empty() || due_date.is_empty() {
        return FieldValidation::ok();
    }
    match (
        invoice_date.parse::<NaiveDate>(),
        due_date.parse::<NaiveDate>(),
    ) {
        (Ok(invoiced), Ok(due)) if due < invoiced => {
            FieldValidation::fail("Due date cannot be before the invoice date")
        }
        _ => FieldValidation::ok(),
    }
}

/// Metadata of a file selected for upload (e.g. the invoice logo).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub size_bytes: u64,
    pub mime_type: String,
}

/// Size is checked before type: at most 5 MiB, and JPEG/PNG only.
pub fn validate_file_upload(file: &FileUpload) -> FieldValidation {
    if file.size_bytes > MAX_UPLOAD_BYTES {
        return FieldValidation::fail("File size must be 5MB or less");
    }
    if !ALLOWED_UPLOAD_TYPES.contains(&file.mime_type.to_lowercase().as_str()) {
        return FieldValidation::fail("Only JPEG and PNG images are allowed");
    }
    FieldValidation::ok()
}

/// Required, and at most 200 characters.
pub fn validate_description(value: &str) -> FieldValidation {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return FieldValidation::fail("Description is required");
    }
    if trimmed.chars().count() > MAX_DESCRIPTION_CHARS {
        return FieldValidation::fail(format!(
            "Description must be {} characters or less",
            MAX_DESCRIPTION_CHARS
        ));
    }
    FieldValidation::ok()
}

/// At least one item must exist, and at least one item must carry some
/// usable data: a non-empty description, or a positive parsed unit cost or
/// quantity. One partially valid item is enough to pass.
pub fn validate_line_items(items: &[LineItem]) -> FieldValidation {
    if items.is_empty() {
        return FieldValidation::fail("At least one line item is required");
    }
    let any_usable = items.iter().any(|item| {
        !item.description.trim().is_empty()
            || parse_amount(&item.unit_cost) > 0.0
            || parse_amount(&item.quantity) > 0.0
    });
    if any_usable {
        FieldValidation::ok()
    } else {
        FieldValidation::fail("At least one line item must have valid data")
    }
}

/// Aggregates every invoice-form rule into one error map.
///
/// The cross-field due-date ordering check runs after the per-field
/// due-date check and overwrites its error on conflict (last write wins).
pub fn validate_invoice_form(data: &InvoiceData) -> FormValidation {
    let mut form = FormValidation::default();
    form.record("invoiceNumber", validate_invoice_number(&data.invoice_number));
    form.record(
        "companyDetails",
        validate_required(&data.company_details, "Company details"),
    );
    form.record("billTo", validate_required(&data.bill_to, "Bill to"));
    form.record(
        "invoiceDate",
        validate_date(&data.invoice_date, "Invoice date", true),
    );
    form.record("dueDate", validate_date(&data.due_date, "Due date", true));
    form.record(
        "dueDate",
        validate_due_date_after_invoice_date(&data.invoice_date, &data.due_date),
    );
    form.record("lineItems", validate_line_items(&data.line_items));
    form.record("taxRate", validate_percentage(&data.tax_rate, "Tax rate"));
    form.record(
        "discount",
        validate_numeric(&data.discount, "Discount", 0.0, None),
    );
    form.record(
        "shippingFee",
        validate_numeric(&data.shipping_fee, "Shipping fee", 0.0, None),
    );
    form
}

/// The client form: name is mandatory, email is checked only when present.
pub fn validate_client_form(name: &str, email: &str) -> FormValidation {
    let mut form = FormValidation::default();
    form.record("name", validate_required(name, "Client name"));
    form.record("email", validate_email(email));
    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InvoiceData;

    fn item(description: &str, unit_cost: &str, quantity: &str) -> LineItem {
        LineItem {
            id: "item_test".to_string(),
            description: description.to_string(),
            unit_cost: unit_cost.to_string(),
            quantity: quantity.to_string(),
            amount: 0.0,
        }
    }

    #[test]
    fn required_rejects_whitespace_only() {
        assert!(validate_required("Acme", "Client name").is_valid);
        let check = validate_required("   ", "Client name");
        assert_eq!(check.error.as_deref(), Some("Client name is required"));
    }

    #[test]
    fn email_is_optional_but_shaped() {
        assert!(validate_email("").is_valid);
        assert!(validate_email("a@b.co").is_valid);
        assert!(!validate_email("not-an-email").is_valid);
        assert!(!validate_email("a@b").is_valid);
        assert!(!validate_email("a b@c.de").is_valid);
    }

    #[test]
    fn numeric_bounds_produce_specific_errors() {
        assert!(validate_numeric("", "Discount", 0.0, None).is_valid);
        assert_eq!(
            validate_numeric("abc", "Discount", 0.0, None).error.as_deref(),
            Some("Discount must be a valid number")
        );
        assert_eq!(
            validate_numeric("-1", "Discount", 0.0, None).error.as_deref(),
            Some("Discount must be at least 0")
        );
        assert_eq!(
            validate_percentage("101", "Tax rate").error.as_deref(),
            Some("Tax rate must be at most 100")
        );
        assert!(validate_percentage("100", "Tax rate").is_valid);
    }

    #[test]
    fn invoice_number_charset() {
        assert!(validate_invoice_number("INV-001").is_valid);
        assert!(validate_invoice_number("inv_2024_01").is_valid);
        let check = validate_invoice_number("INV@001");
        assert!(!check.is_valid);
        assert!(check.error.unwrap().contains("letters, numbers"));
        assert!(!validate_invoice_number("  ").is_valid);
    }

    #[test]
    fn date_parsing_and_past_rule() {
        assert!(validate_date("", "Due date", true).is_valid);
        assert!(validate_date("2024-02-29", "Due date", true).is_valid);
        assert!(!validate_date("2024-13-01", "Due date", true).is_valid);
        assert!(!validate_date("1999-01-01", "Due date", false).is_valid);
        let tomorrow = (Local::now().date_naive() + chrono::Days::new(1)).to_string();
        assert!(validate_date(&tomorrow, "Due date", false).is_valid);
    }

    #[test]
    fn due_date_ordering() {
        assert!(validate_due_date_after_invoice_date("", "2024-01-01").is_valid);
        assert!(validate_due_date_after_invoice_date("2024-01-01", "").is_valid);
        assert!(validate_due_date_after_invoice_date("2024-01-01", "2024-01-01").is_valid);
        assert!(validate_due_date_after_invoice_date("2024-01-10", "2024-02-01").is_valid);
        assert!(!validate_due_date_after_invoice_date("2024-02-01", "2024-01-10").is_valid);
    }

    #[test]
    fn file_upload_checks_size_before_type() {
        let too_big = FileUpload {
            size_bytes: MAX_UPLOAD_BYTES + 1,
            mime_type: "application/pdf".to_string(),
        };
        assert_eq!(
            validate_file_upload(&too_big).error.as_deref(),
            Some("File size must be 5MB or less")
        );
        let wrong_type = FileUpload {
            size_bytes: 1024,
            mime_type: "image/gif".to_string(),
        };
        assert_eq!(
            validate_file_upload(&wrong_type).error.as_deref(),
            Some("Only JPEG and PNG images are allowed")
        );
        let fine = FileUpload {
            size_bytes: MAX_UPLOAD_BYTES,
            mime_type: "image/png".to_string(),
        };
        assert!(validate_file_upload(&fine).is_valid);
    }

    #[test]
    fn description_length_limit() {
        assert!(validate_description("Consulting").is_valid);
        assert!(!validate_description("").is_valid);
        let long = "x".repeat(MAX_DESCRIPTION_CHARS + 1);
        assert!(!validate_description(&long).is_valid);
    }

    #[test]
    fn line_items_pass_on_any_partially_valid_item() {
        assert_eq!(
            validate_line_items(&[]).error.as_deref(),
            Some("At least one line item is required")
        );
        let all_blank = vec![item("", "", ""), item("  ", "0", "abc")];
        assert_eq!(
            validate_line_items(&all_blank).error.as_deref(),
            Some("At least one line item must have valid data")
        );
        let one_described = vec![item("", "", ""), item("Design work", "", "")];
        assert!(validate_line_items(&one_described).is_valid);
        let one_priced = vec![item("", "50", "")];
        assert!(validate_line_items(&one_priced).is_valid);
    }

    #[test]
    fn invoice_form_aggregates_and_ordering_error_wins() {
        let mut data = InvoiceData::default();
        data.invoice_number = "INV-001".to_string();
        data.company_details = "Me Inc".to_string();
        data.bill_to = "Acme".to_string();
        data.invoice_date = "2024-02-01".to_string();
        data.due_date = "2024-01-01".to_string();
        data.line_items = vec![item("Work", "100", "1")];
        let form = validate_invoice_form(&data);
        assert!(!form.is_valid());
        assert_eq!(
            form.errors.get("dueDate").map(String::as_str),
            Some("Due date cannot be before the invoice date")
        );

        data.due_date = "2024-03-01".to_string();
        let form = validate_invoice_form(&data);
        assert!(form.is_valid(), "unexpected errors: {:?}", form.errors);
    }

    #[test]
    fn invoice_form_flags_every_missing_field() {
        let data = InvoiceData {
            line_items: Vec::new(),
            invoice_date: String::new(),
            ..InvoiceData::default()
        };
        let form = validate_invoice_form(&data);
        assert!(form.errors.contains_key("invoiceNumber"));
        assert!(form.errors.contains_key("companyDetails"));
        assert!(form.errors.contains_key("billTo"));
        assert!(form.errors.contains_key("lineItems"));
    }

    #[test]
    fn client_form_requires_name() {
        let form = validate_client_form("", "");
        assert_eq!(
            form.errors.get("name").map(String::as_str),
            Some("Client name is required")
        );
        let form = validate_client_form("   ", "");
        assert_eq!(
            form.errors.get("name").map(String::as_str),
            Some("Client name is required")
        );
        assert!(validate_client_form("Acme", "billing@acme.io").is_valid());
    }
}
