//! Render target: the fixed-width visual page captured during export
//!
//! Rendering an [`InvoiceDocument`] produces a [`RenderTarget`]: a display
//! list with deterministic dimensions, addressable by id through a
//! [`PreviewHost`]. Theme indirection stops here; every command in the
//! target carries concrete colors, because capture rasterizes exactly what
//! it is handed.

pub mod layout;
pub mod paint;
pub mod raster;

use std::collections::HashMap;

use crate::model::{InvoiceDocument, Theme};
use paint::{PaintCommand, Rgb};

/// Fixed page width: ISO A4 width at 72dpi, in device-independent pixels.
pub const PAGE_WIDTH: u32 = 595;
/// Minimum page height, so capture aspect ratio is stable run to run.
pub const MIN_PAGE_HEIGHT: u32 = 800;

/// Fully resolved theme colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub border: Rgb,
    pub company_detail: Rgb,
}

/// Resolve a theme to concrete colors.
pub fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Dark => Palette {
            bg: Rgb::new(0x1a, 0x1a, 0x1a),
            text: Rgb::new(0xff, 0xff, 0xff),
            muted: Rgb::new(0x9c, 0xa3, 0xaf),
            border: Rgb::new(0x37, 0x41, 0x51),
            company_detail: Rgb::new(0xd1, 0xd5, 0xdb),
        },
        Theme::Light => Palette {
            bg: Rgb::new(0xff, 0xff, 0xff),
            text: Rgb::new(0x11, 0x18, 0x27),
            muted: Rgb::new(0x6b, 0x72, 0x80),
            border: Rgb::new(0xe5, 0xe7, 0xeb),
            company_detail: Rgb::new(0x4b, 0x55, 0x63),
        },
    }
}

/// A laid-out page ready for capture.
#[derive(Debug, Clone)]
pub struct RenderTarget {
    /// Identifier the pipeline locates the target by
    pub id: String,
    pub width: u32,
    pub height: u32,
    /// Resolved page background, also used behind the embedded raster
    pub background: Rgb,
    pub commands: Vec<PaintCommand>,
}

/// Lay out an invoice into a capturable target under the given id.
pub fn render_invoice(id: &str, doc: &InvoiceDocument, theme: Theme) -> RenderTarget {
    let pal = palette(theme);
    let (body, height) = layout::layout_invoice(doc, &pal);
    let mut commands = Vec::with_capacity(body.len() + 1);
    commands.push(PaintCommand::Clear { color: pal.bg });
    commands.extend(body);
    RenderTarget {
        id: id.to_string(),
        width: PAGE_WIDTH,
        height,
        background: pal.bg,
        commands,
    }
}

/// Holds mounted render targets, addressable by id.
///
/// The host stands in for the live view tree: export looks its target up
/// here, and an unmounted id is the `TargetNotFound` failure.
#[derive(Debug, Default)]
pub struct PreviewHost {
    targets: HashMap<String, RenderTarget>,
}

impl PreviewHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render and mount a document under `id`, replacing any previous
    /// target with that id.
    pub fn mount(&mut self, id: &str, doc: &InvoiceDocument, theme: Theme) {
        let target = render_invoice(id, doc, theme);
        self.targets.insert(id.to_string(), target);
    }

    pub fn unmount(&mut self, id: &str) {
        self.targets.remove(id);
    }

    pub fn target(&self, id: &str) -> Option<&RenderTarget> {
        self.targets.get(id)
    }
}
