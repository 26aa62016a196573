//! Invoice document model
//!
//! Pure data: the typed record an invoice session edits and the renderer
//! consumes. Behavior lives in `edit` (snapshot updates) and `totals`
//! (derived sums); nothing here mutates in place.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// One party on the invoice (sender or recipient).
///
/// All fields are free text; no validation is enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub vat_id: String,
}

/// One billable row: description, quantity, unit price.
///
/// `id` is unique within a document and exists only so list edits can
/// address a row; it is never persisted externally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: u64,
    pub description: String,
    pub quantity: u32,
    pub price: f64,
}

/// Bank details shown in the document footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub bank: String,
    pub account_number: String,
    pub iban: String,
}

/// Visual theme of the preview and the exported page background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Dark
    }
}

/// The invoice document: parties, line items, tax, payment details.
///
/// Created once per session with placeholder values and replaced wholesale
/// on every edit (see [`crate::edit::apply`]); it is never persisted.
///
/// Invariant: `items` always contains at least one entry. The reducer
/// refuses to remove the last remaining item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    /// Invoice number, also used verbatim as the export filename stem
    pub invoice_number: String,
    pub issue_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    pub from: CompanyInfo,
    pub to: CompanyInfo,
    /// Ordered line items; insertion order is significant
    pub items: Vec<LineItem>,
    /// Tax percentage, conceptually in [0, 100]
    pub tax_rate: f64,
    /// ISO 4217 code; `None` falls back to "USD"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    pub payment_details: PaymentDetails,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub theme: Theme,
}

impl InvoiceDocument {
    /// Effective currency code, defaulting to "USD".
    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or("USD")
    }

    /// Look up a line item by id.
    pub fn item(&self, id: u64) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Next free item id (max existing id + 1).
    pub fn next_item_id(&self) -> u64 {
        self.items.iter().map(|i| i.id).max().map_or(1, |m| m + 1)
    }
}

impl Default for InvoiceDocument {
    /// The placeholder document a fresh session starts from.
    fn default() -> Self {
        Self {
            invoice_number: "INV-01".to_string(),
            issue_date: Local::now().date_naive(),
            due_date: None,
            from: CompanyInfo {
                name: "Your Company".to_string(),
                email: "email@company.com".to_string(),
                phone: "123-456-7890".to_string(),
                address: "Street Address".to_string(),
                city: "City, Country".to_string(),
                vat_id: "VAT ID".to_string(),
            },
            to: CompanyInfo {
                name: "Client Company".to_string(),
                email: "client@company.com".to_string(),
                phone: "123-456-7890".to_string(),
                address: "Client Address".to_string(),
                city: "City, Country".to_string(),
                vat_id: "VAT ID".to_string(),
            },
            items: vec![LineItem {
                id: 1,
                description: "Product or Service".to_string(),
                quantity: 1,
                price: 100.0,
            }],
            tax_rate: 10.0,
            currency: None,
            payment_details: PaymentDetails {
                bank: "Bank Name".to_string(),
                account_number: "000000000".to_string(),
                iban: "IBAN".to_string(),
            },
            note: String::new(),
            theme: Theme::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_document_has_one_item() {
        let doc = InvoiceDocument::default();
        assert_eq!(doc.items.len(), 1);
        assert_eq!(doc.invoice_number, "INV-01");
        assert_eq!(doc.currency(), "USD");
        assert_eq!(doc.theme, Theme::Dark);
    }

    #[test]
    fn next_item_id_skips_existing() {
        let mut doc = InvoiceDocument::default();
        assert_eq!(doc.next_item_id(), 2);
        doc.items.push(LineItem {
            id: 7,
            description: String::new(),
            quantity: 1,
            price: 0.0,
        });
        assert_eq!(doc.next_item_id(), 8);
    }

    #[test]
    fn document_round_trips_through_json() {
        let doc = InvoiceDocument::default();
        let json = serde_json::to_string(&doc).unwrap();
        let back: InvoiceDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
        // camelCase on the wire, matching the form payloads
        assert!(json.contains("invoiceNumber"));
        assert!(json.contains("paymentDetails"));
    }
}
