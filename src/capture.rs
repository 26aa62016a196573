//! Capture seam: rasterizing a render target
//!
//! The export pipeline talks to a [`Rasterizer`] rather than any concrete
//! surface, so the pipeline is testable with a fake backend and the
//! built-in software backend stays swappable.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::error::{Error, Result};
use crate::render::paint::Rgb;
use crate::render::{palette, raster, RenderTarget};

/// Oversampling factor applied by default, for output sharpness.
pub const DEFAULT_CAPTURE_SCALE: u32 = 2;

/// Capture parameters.
#[derive(Debug, Clone, Copy)]
pub struct CaptureOptions {
    /// Device pixels per logical pixel
    pub scale: u32,
    /// Pre-fill color; must match the active theme or margins show through
    pub background: Rgb,
}

impl CaptureOptions {
    /// Default options for a theme: 2x oversampling, theme background.
    pub fn for_theme(theme: crate::model::Theme) -> Self {
        Self {
            scale: DEFAULT_CAPTURE_SCALE,
            background: palette(theme).bg,
        }
    }
}

/// A captured raster image (tightly packed RGB8) plus pixel dimensions.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl RasterImage {
    /// Encode as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let img = image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or_else(|| {
                Error::EncodeFailed("pixel buffer does not match dimensions".to_string())
            })?;
        let mut buf = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png)
            .map_err(|e| Error::EncodeFailed(e.to_string()))?;
        Ok(buf.into_inner())
    }

    /// Encode as a `data:image/png;base64,...` URL.
    pub fn to_data_url(&self) -> Result<String> {
        let png = self.encode_png()?;
        Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
    }
}

/// Core trait for capture backends.
pub trait Rasterizer {
    /// Rasterize the target region, honoring scale and background color.
    fn capture(&self, target: &RenderTarget, options: &CaptureOptions) -> Result<RasterImage>;
}

/// Built-in pure-Rust backend over the software rasterizer.
#[derive(Debug, Default)]
pub struct SoftwareRasterizer;

impl Rasterizer for SoftwareRasterizer {
    fn capture(&self, target: &RenderTarget, options: &CaptureOptions) -> Result<RasterImage> {
        if target.width == 0 || target.height == 0 {
            return Err(Error::CaptureFailed(format!(
                "target '{}' has zero area",
                target.id
            )));
        }
        let fb = raster::rasterize(
            &target.commands,
            target.width,
            target.height,
            options.scale,
            options.background,
        );
        Ok(RasterImage {
            pixels: fb.pixels,
            width: fb.width,
            height: fb.height,
        })
    }
}

/// Create the default capture backend.
pub fn new_rasterizer() -> impl Rasterizer {
    SoftwareRasterizer
}
