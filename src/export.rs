//! Export pipeline: capture, encode, assemble, emit
//!
//! Drives one export end to end: locate the render target, rasterize it,
//! encode the capture, assemble the PDF page and write the file. The
//! pipeline always returns to `Idle` and the in-progress flag is cleared
//! on every exit path; a failed step aborts before anything is written,
//! so no partial file is ever emitted.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::capture::{CaptureOptions, Rasterizer, SoftwareRasterizer, DEFAULT_CAPTURE_SCALE};
use crate::error::{Error, Result};
use crate::model::Theme;
use crate::pdf::{page_geometry, DocumentAssembler, PdfAssembler};
use crate::render::{palette, PreviewHost};

/// Pipeline state. `Failed` absorbs any step error; both terminal states
/// fall back to `Idle` before `export` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Idle,
    Capturing,
    Encoding,
    Assembling,
    Saved,
    Failed,
}

/// Output filename for an invoice number.
///
/// The number is used verbatim, path-unsafe characters included; callers
/// wanting sanitized names must do it themselves.
pub fn export_filename(invoice_number: &str) -> String {
    format!("{}.pdf", invoice_number)
}

/// One export worth of parameters.
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Id the render target was mounted under
    pub element_id: String,
    /// Filename stem, used verbatim
    pub invoice_number: String,
    pub theme: Theme,
    pub out_dir: PathBuf,
}

pub struct ExportPipeline<R, A> {
    rasterizer: R,
    assembler: A,
    scale: u32,
    state: ExportState,
    in_progress: bool,
}

impl ExportPipeline<SoftwareRasterizer, PdfAssembler> {
    /// Pipeline over the built-in backends.
    pub fn with_defaults() -> Self {
        Self::new(SoftwareRasterizer, PdfAssembler)
    }
}

impl<R: Rasterizer, A: DocumentAssembler> ExportPipeline<R, A> {
    pub fn new(rasterizer: R, assembler: A) -> Self {
        Self {
            rasterizer,
            assembler,
            scale: DEFAULT_CAPTURE_SCALE,
            state: ExportState::Idle,
            in_progress: false,
        }
    }

    /// Override the capture oversampling factor.
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale.max(1);
        self
    }

    pub fn state(&self) -> ExportState {
        self.state
    }

    /// Whether an export is currently running. This is the flag a UI uses
    /// to disable its trigger; it is not a lock.
    pub fn in_progress(&self) -> bool {
        self.in_progress
    }

    /// Run one export. Returns the path of the written file.
    ///
    /// Any failure aborts before the save step; the error is returned and
    /// the caller stays fully usable. State and the in-progress flag are
    /// reset unconditionally.
    pub fn export(&mut self, host: &PreviewHost, request: &ExportRequest) -> Result<PathBuf> {
        self.in_progress = true;
        let result = self.run(host, request);
        if let Err(ref e) = result {
            self.state = ExportState::Failed;
            warn!("export of '{}' failed: {}", request.invoice_number, e);
        }
        self.in_progress = false;
        self.state = ExportState::Idle;
        result
    }

    fn run(&mut self, host: &PreviewHost, request: &ExportRequest) -> Result<PathBuf> {
        self.state = ExportState::Capturing;
        let target = host
            .target(&request.element_id)
            .ok_or_else(|| Error::TargetNotFound(request.element_id.clone()))?;
        let options = CaptureOptions {
            scale: self.scale,
            background: palette(request.theme).bg,
        };
        let image = self.rasterizer.capture(target, &options)?;

        self.state = ExportState::Encoding;
        let png = image.encode_png()?;

        self.state = ExportState::Assembling;
        let geometry = page_geometry(image.width, image.height);
        let bytes = self
            .assembler
            .assemble(&png, &geometry, options.background)?;

        self.state = ExportState::Saved;
        let path = request.out_dir.join(export_filename(&request.invoice_number));
        std::fs::write(&path, &bytes)?;
        info!(
            "exported {} ({} bytes, {:?})",
            path.display(),
            bytes.len(),
            geometry.orientation
        );
        Ok(path)
    }

    /// Save a PNG of the capture next to the PDF flow (CLI sidecar).
    pub fn capture_png(&self, host: &PreviewHost, element_id: &str, theme: Theme) -> Result<Vec<u8>> {
        let target = host
            .target(element_id)
            .ok_or_else(|| Error::TargetNotFound(element_id.to_string()))?;
        let options = CaptureOptions {
            scale: self.scale,
            background: palette(theme).bg,
        };
        self.rasterizer.capture(target, &options)?.encode_png()
    }
}

impl Default for ExportPipeline<SoftwareRasterizer, PdfAssembler> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Convenience request for the common case.
pub fn request(invoice_number: &str, theme: Theme, out_dir: &Path) -> ExportRequest {
    ExportRequest {
        element_id: crate::PREVIEW_ELEMENT_ID.to_string(),
        invoice_number: invoice_number.to_string(),
        theme,
        out_dir: out_dir.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_uses_invoice_number_verbatim() {
        assert_eq!(export_filename("INV-01"), "INV-01.pdf");
        // No sanitization: path-unsafe characters pass straight through.
        assert_eq!(export_filename("2024/03 draft"), "2024/03 draft.pdf");
    }

    #[test]
    fn pipeline_starts_idle() {
        let p = ExportPipeline::with_defaults();
        assert_eq!(p.state(), ExportState::Idle);
        assert!(!p.in_progress());
    }

    #[test]
    fn scale_floor_is_one() {
        let p = ExportPipeline::with_defaults().with_scale(0);
        assert_eq!(p.scale, 1);
    }
}
