//! Display-list command set consumed by the rasterizer

/// A concrete sRGB color. Theme indirection is resolved to these before
/// any command is emitted; the rasterizer never sees a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as 0..1 floats, for backends that want normalized color.
    pub fn to_f32(self) -> (f32, f32, f32) {
        (
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    /// Fill the whole surface
    Clear { color: Rgb },
    /// Axis-aligned filled rectangle (rules, separators)
    Rect {
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Rgb,
    },
    /// A run of text, top-left anchored, in multiples of the base glyph size
    Text {
        x: i32,
        y: i32,
        text: String,
        scale: u32,
        color: Rgb,
    },
}
