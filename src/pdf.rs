//! Document assembly: page geometry and the PDF backend
//!
//! Geometry derives the output page from the captured image's aspect
//! ratio; assembly paints a full-page background and embeds the raster at
//! the page origin. Assembly sits behind [`DocumentAssembler`] so the
//! pipeline can be driven against a recording fake in tests.

use std::io::{BufWriter, Cursor};

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    Color, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, Mm, PdfDocument, Point,
    Polygon, Px,
};

use crate::error::{Error, Result};
use crate::render::paint::Rgb;

/// Fixed output page width: ISO A4, in millimeters.
pub const PAGE_WIDTH_MM: f64 = 210.0;
/// A4 long edge.
pub const PAGE_LENGTH_MM: f64 = 297.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// A4 page dimensions for this orientation, (width, height) in mm.
    pub fn page_size(self) -> (f64, f64) {
        match self {
            Orientation::Portrait => (PAGE_WIDTH_MM, PAGE_LENGTH_MM),
            Orientation::Landscape => (PAGE_LENGTH_MM, PAGE_WIDTH_MM),
        }
    }
}

/// Placement of the captured image on the output page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Embedded image width, always the full A4 width
    pub width_mm: f64,
    /// Embedded image height, preserving the captured aspect ratio
    pub height_mm: f64,
    pub orientation: Orientation,
}

/// Derive page geometry from captured pixel dimensions.
///
/// Width is fixed at 210mm; height follows the image aspect ratio. The
/// page is portrait when the derived height exceeds the width.
pub fn page_geometry(image_width: u32, image_height: u32) -> PageGeometry {
    let height_mm = image_height as f64 * (PAGE_WIDTH_MM / image_width as f64);
    let orientation = if height_mm > PAGE_WIDTH_MM {
        Orientation::Portrait
    } else {
        Orientation::Landscape
    };
    PageGeometry {
        width_mm: PAGE_WIDTH_MM,
        height_mm,
        orientation,
    }
}

/// Core trait for document assembly backends.
pub trait DocumentAssembler {
    /// Build a single-page document: full-page `background`, then the PNG
    /// embedded at the page origin scaled to `geometry`.
    fn assemble(&self, png: &[u8], geometry: &PageGeometry, background: Rgb) -> Result<Vec<u8>>;
}

/// PDF backend.
#[derive(Debug, Default)]
pub struct PdfAssembler;

impl DocumentAssembler for PdfAssembler {
    fn assemble(&self, png: &[u8], geometry: &PageGeometry, background: Rgb) -> Result<Vec<u8>> {
        let decoded = image::load_from_memory(png)
            .map_err(|e| Error::AssemblyFailed(format!("raster decode: {}", e)))?;
        let rgb = decoded.to_rgb8();
        let (px_w, px_h) = rgb.dimensions();

        let (page_w, page_h) = geometry.orientation.page_size();
        let (doc, page1, layer1) =
            PdfDocument::new("Invoice", Mm(page_w as f32), Mm(page_h as f32), "Layer 1");
        let layer = doc.get_page(page1).get_layer(layer1);

        // Full-page background; guards against transparent margins around
        // the embedded raster.
        let (r, g, b) = background.to_f32();
        layer.set_fill_color(Color::Rgb(printpdf::Rgb::new(r, g, b, None)));
        let ring = vec![
            (Point::new(Mm(0.0), Mm(0.0)), false),
            (Point::new(Mm(page_w as f32), Mm(0.0)), false),
            (Point::new(Mm(page_w as f32), Mm(page_h as f32)), false),
            (Point::new(Mm(0.0), Mm(page_h as f32)), false),
        ];
        layer.add_polygon(Polygon {
            rings: vec![ring],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });

        let image = Image::from(ImageXObject {
            width: Px(px_w as usize),
            height: Px(px_h as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: false,
            image_data: rgb.into_raw(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // DPI that maps the pixel width onto the target width in mm; the
        // aspect ratio is preserved so the same value holds vertically.
        let dpi = px_w as f32 / (geometry.width_mm as f32 / 25.4);
        // PDF origin is bottom-left; pin the image to the top-left corner.
        let translate_y = (page_h - geometry.height_mm) as f32;
        image.add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(0.0)),
                translate_y: Some(Mm(translate_y)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );

        let mut buf = Vec::new();
        {
            let cursor = Cursor::new(&mut buf);
            let mut writer = BufWriter::new(cursor);
            doc.save(&mut writer)
                .map_err(|e| Error::AssemblyFailed(e.to_string()))?;
        }
        Ok(buf)
    }
}
