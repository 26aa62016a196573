//! Invoicepress
//!
//! A form-to-PDF invoice tool: a structured document model is edited
//! through snapshot-producing reducers, laid out into a fixed-width
//! render target, captured as a raster image and exported as a
//! single-page PDF named after the invoice number.
//!
//! # Example
//!
//! ```no_run
//! use invoicepress::export::{request, ExportPipeline};
//! use invoicepress::model::InvoiceDocument;
//! use invoicepress::render::PreviewHost;
//! use invoicepress::PREVIEW_ELEMENT_ID;
//!
//! # fn main() -> invoicepress::Result<()> {
//! let doc = InvoiceDocument::default();
//!
//! let mut host = PreviewHost::new();
//! host.mount(PREVIEW_ELEMENT_ID, &doc, doc.theme);
//!
//! let mut pipeline = ExportPipeline::with_defaults();
//! let req = request(&doc.invoice_number, doc.theme, std::path::Path::new("."));
//! let path = pipeline.export(&host, &req)?;
//! println!("wrote {}", path.display());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod model;

pub mod edit;

pub mod totals;

// Rendering: layout, display list, software rasterizer
pub mod render;

// Capture seam (rasterizer backends)
pub mod capture;

// Page geometry + PDF assembly backend
pub mod pdf;

// The export pipeline itself
pub mod export;

// Async-friendly studio API (worker-backed abstraction)
pub mod async_api;

// Re-export the Studio type at the crate root for ergonomic use
pub use async_api::Studio;

/// Id the preview target is conventionally mounted under.
pub const PREVIEW_ELEMENT_ID: &str = "invoice-preview";

#[cfg(test)]
mod tests {
    use super::*;
    use model::{InvoiceDocument, Theme};

    #[test]
    fn preview_id_is_stable() {
        assert_eq!(PREVIEW_ELEMENT_ID, "invoice-preview");
    }

    #[test]
    fn default_session_renders_under_preview_id() {
        let doc = InvoiceDocument::default();
        let mut host = render::PreviewHost::new();
        host.mount(PREVIEW_ELEMENT_ID, &doc, Theme::Dark);
        let target = host.target(PREVIEW_ELEMENT_ID).unwrap();
        assert_eq!(target.id, PREVIEW_ELEMENT_ID);
        assert_eq!(target.width, render::PAGE_WIDTH);
    }
}
