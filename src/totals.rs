//! Derived totals and currency formatting
//!
//! Accumulation is plain f64 in document order; rounding happens only at
//! formatting time, never on the stored sums.

use crate::model::LineItem;

/// Derived sums for an item list under a tax rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Totals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

/// Compute subtotal, tax and grand total.
///
/// `subtotal = Σ quantity × price` over `items` in order,
/// `tax = subtotal × tax_rate / 100`, `total = subtotal + tax`.
pub fn compute(items: &[LineItem], tax_rate: f64) -> Totals {
    let subtotal: f64 = items
        .iter()
        .map(|i| i.quantity as f64 * i.price)
        .sum();
    let tax = subtotal * (tax_rate / 100.0);
    Totals {
        subtotal,
        tax,
        total: subtotal + tax,
    }
}

/// Currencies carrying no minor unit; everything else formats with two
/// fraction digits.
const ZERO_MINOR_UNIT: &[&str] = &["IDR", "JPY", "KRW", "VND"];

fn fraction_digits(currency: &str) -> u32 {
    if ZERO_MINOR_UNIT.contains(&currency) {
        0
    } else {
        2
    }
}

fn symbol(currency: &str) -> Option<&'static str> {
    match currency {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "IDR" => Some("Rp "),
        "JPY" => Some("¥"),
        _ => None,
    }
}

/// Format an amount under a currency code with locale-style grouping.
///
/// Pure presentation: the stored totals are untouched. Grouping follows the
/// currency's locale convention (id-ID separators for IDR, en-US otherwise);
/// unknown codes fall back to `CODE amount`.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let digits = fraction_digits(currency);
    let (group_sep, decimal_sep) = if currency == "IDR" { ('.', ',') } else { (',', '.') };

    let negative = amount < 0.0;
    let factor = 10u64.pow(digits) as f64;
    let scaled = (amount.abs() * factor).round() as u128;
    let int_part = scaled / factor as u128;
    let frac_part = scaled % factor as u128;

    let mut grouped = String::new();
    let int_str = int_part.to_string();
    for (i, ch) in int_str.chars().enumerate() {
        if i > 0 && (int_str.len() - i) % 3 == 0 {
            grouped.push(group_sep);
        }
        grouped.push(ch);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    match symbol(currency) {
        Some(sym) => out.push_str(sym),
        None => {
            out.push_str(currency);
            out.push(' ');
        }
    }
    out.push_str(&grouped);
    if digits > 0 {
        out.push(decimal_sep);
        out.push_str(&format!("{:0width$}", frac_part, width = digits as usize));
    }
    out
}
