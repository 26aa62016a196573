//! Reducer-style document edits
//!
//! Every form interaction becomes an [`Edit`] applied through [`apply`],
//! which returns a new document snapshot and never mutates the input.
//! Readers holding the previous snapshot (the preview, a capture in
//! flight) are therefore never exposed to a half-applied change.

use chrono::NaiveDate;

use crate::model::{InvoiceDocument, LineItem, Theme};

/// Fields of a [`crate::model::CompanyInfo`] block addressable by an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyField {
    Name,
    Email,
    Phone,
    Address,
    City,
    VatId,
}

/// Fields of the payment details block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentField {
    Bank,
    AccountNumber,
    Iban,
}

/// A single form edit.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    InvoiceNumber(String),
    IssueDate(NaiveDate),
    DueDate(Option<NaiveDate>),
    From(PartyField, String),
    To(PartyField, String),
    Payment(PaymentField, String),
    /// Append a blank item (qty 1, price 0) with a fresh id
    AddItem,
    /// Remove by id; a no-op when it would leave the document empty
    RemoveItem(u64),
    ItemDescription(u64, String),
    /// Quantities below 1 are rejected (the edit is dropped)
    ItemQuantity(u64, u32),
    /// Negative prices are clamped to 0
    ItemPrice(u64, f64),
    /// Clamped to [0, 100]
    TaxRate(f64),
    Currency(Option<String>),
    Note(String),
    Theme(Theme),
}

/// Apply one edit, producing the next document snapshot.
pub fn apply(doc: &InvoiceDocument, edit: Edit) -> InvoiceDocument {
    let mut next = doc.clone();
    match edit {
        Edit::InvoiceNumber(v) => next.invoice_number = v,
        Edit::IssueDate(d) => next.issue_date = d,
        Edit::DueDate(d) => next.due_date = d,
        Edit::From(field, v) => set_party(&mut next.from, field, v),
        Edit::To(field, v) => set_party(&mut next.to, field, v),
        Edit::Payment(field, v) => match field {
            PaymentField::Bank => next.payment_details.bank = v,
            PaymentField::AccountNumber => next.payment_details.account_number = v,
            PaymentField::Iban => next.payment_details.iban = v,
        },
        Edit::AddItem => {
            let id = next.next_item_id();
            next.items.push(LineItem {
                id,
                description: String::new(),
                quantity: 1,
                price: 0.0,
            });
        }
        Edit::RemoveItem(id) => {
            // Floor of one item: the last row cannot be removed
            if next.items.len() > 1 {
                next.items.retain(|i| i.id != id);
            }
        }
        Edit::ItemDescription(id, v) => {
            if let Some(item) = next.items.iter_mut().find(|i| i.id == id) {
                item.description = v;
            }
        }
        Edit::ItemQuantity(id, qty) => {
            if qty >= 1 {
                if let Some(item) = next.items.iter_mut().find(|i| i.id == id) {
                    item.quantity = qty;
                }
            }
        }
        Edit::ItemPrice(id, price) => {
            if let Some(item) = next.items.iter_mut().find(|i| i.id == id) {
                item.price = price.max(0.0);
            }
        }
        Edit::TaxRate(rate) => next.tax_rate = rate.clamp(0.0, 100.0),
        Edit::Currency(c) => next.currency = c,
        Edit::Note(v) => next.note = v,
        Edit::Theme(t) => next.theme = t,
    }
    next
}

fn set_party(party: &mut crate::model::CompanyInfo, field: PartyField, value: String) {
    match field {
        PartyField::Name => party.name = value,
        PartyField::Email => party.email = value,
        PartyField::Phone => party.phone = value,
        PartyField::Address => party.address = value,
        PartyField::City => party.city = value,
        PartyField::VatId => party.vat_id = value,
    }
}

/// Parse a raw quantity field. Invalid input parses to 0, which the
/// reducer then rejects, so the previous value survives.
pub fn parse_quantity(raw: &str) -> u32 {
    raw.trim().parse().unwrap_or(0)
}

/// Parse a raw price field. Invalid input falls back to 0, negative
/// values are clamped to 0.
pub fn parse_price(raw: &str) -> f64 {
    raw.trim().parse::<f64>().unwrap_or(0.0).max(0.0)
}
