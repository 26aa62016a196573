//! Software rasterizer
//!
//! Executes a display list into an RGB8 framebuffer at an integer
//! oversampling factor. Text uses an embedded 5x7 bitmap font (column
//! bytes, bit 0 = top row) in an 8px advance cell, so output is fully
//! deterministic: same commands, same bytes, on every platform.

use super::layout::GLYPH_ADVANCE;
use super::paint::{PaintCommand, Rgb};

/// Glyph for codepoints outside the table (hollow box).
const FALLBACK_GLYPH: [u8; 5] = [0x7F, 0x41, 0x41, 0x41, 0x7F];

/// Classic 5x7 font, ASCII 0x20..=0x7E.
#[rustfmt::skip]
const FONT_5X7: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // '!'
    [0x00, 0x07, 0x00, 0x07, 0x00], // '"'
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // '#'
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // '$'
    [0x23, 0x13, 0x08, 0x64, 0x62], // '%'
    [0x36, 0x49, 0x55, 0x22, 0x50], // '&'
    [0x00, 0x05, 0x03, 0x00, 0x00], // '\''
    [0x00, 0x1C, 0x22, 0x41, 0x00], // '('
    [0x00, 0x41, 0x22, 0x1C, 0x00], // ')'
    [0x14, 0x08, 0x3E, 0x08, 0x14], // '*'
    [0x08, 0x08, 0x3E, 0x08, 0x08], // '+'
    [0x00, 0x50, 0x30, 0x00, 0x00], // ','
    [0x08, 0x08, 0x08, 0x08, 0x08], // '-'
    [0x00, 0x60, 0x60, 0x00, 0x00], // '.'
    [0x20, 0x10, 0x08, 0x04, 0x02], // '/'
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // '0'
    [0x00, 0x42, 0x7F, 0x40, 0x00], // '1'
    [0x42, 0x61, 0x51, 0x49, 0x46], // '2'
    [0x21, 0x41, 0x45, 0x4B, 0x31], // '3'
    [0x18, 0x14, 0x12, 0x7F, 0x10], // '4'
    [0x27, 0x45, 0x45, 0x45, 0x39], // '5'
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // '6'
    [0x01, 0x71, 0x09, 0x05, 0x03], // '7'
    [0x36, 0x49, 0x49, 0x49, 0x36], // '8'
    [0x06, 0x49, 0x49, 0x29, 0x1E], // '9'
    [0x00, 0x36, 0x36, 0x00, 0x00], // ':'
    [0x00, 0x56, 0x36, 0x00, 0x00], // ';'
    [0x08, 0x14, 0x22, 0x41, 0x00], // '<'
    [0x14, 0x14, 0x14, 0x14, 0x14], // '='
    [0x00, 0x41, 0x22, 0x14, 0x08], // '>'
    [0x02, 0x01, 0x51, 0x09, 0x06], // '?'
    [0x32, 0x49, 0x79, 0x41, 0x3E], // '@'
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // 'A'
    [0x7F, 0x49, 0x49, 0x49, 0x36], // 'B'
    [0x3E, 0x41, 0x41, 0x41, 0x22], // 'C'
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // 'D'
    [0x7F, 0x49, 0x49, 0x49, 0x41], // 'E'
    [0x7F, 0x09, 0x09, 0x09, 0x01], // 'F'
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // 'G'
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // 'H'
    [0x00, 0x41, 0x7F, 0x41, 0x00], // 'I'
    [0x20, 0x40, 0x41, 0x3F, 0x01], // 'J'
    [0x7F, 0x08, 0x14, 0x22, 0x41], // 'K'
    [0x7F, 0x40, 0x40, 0x40, 0x40], // 'L'
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // 'M'
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // 'N'
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // 'O'
    [0x7F, 0x09, 0x09, 0x09, 0x06], // 'P'
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // 'Q'
    [0x7F, 0x09, 0x19, 0x29, 0x46], // 'R'
    [0x46, 0x49, 0x49, 0x49, 0x31], // 'S'
    [0x01, 0x01, 0x7F, 0x01, 0x01], // 'T'
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // 'U'
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // 'V'
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // 'W'
    [0x63, 0x14, 0x08, 0x14, 0x63], // 'X'
    [0x07, 0x08, 0x70, 0x08, 0x07], // 'Y'
    [0x61, 0x51, 0x49, 0x45, 0x43], // 'Z'
    [0x00, 0x7F, 0x41, 0x41, 0x00], // '['
    [0x02, 0x04, 0x08, 0x10, 0x20], // '\\'
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ']'
    [0x04, 0x02, 0x01, 0x02, 0x04], // '^'
    [0x40, 0x40, 0x40, 0x40, 0x40], // '_'
    [0x00, 0x01, 0x02, 0x04, 0x00], // '`'
    [0x20, 0x54, 0x54, 0x54, 0x78], // 'a'
    [0x7F, 0x48, 0x44, 0x44, 0x38], // 'b'
    [0x38, 0x44, 0x44, 0x44, 0x20], // 'c'
    [0x38, 0x44, 0x44, 0x48, 0x7F], // 'd'
    [0x38, 0x54, 0x54, 0x54, 0x18], // 'e'
    [0x08, 0x7E, 0x09, 0x01, 0x02], // 'f'
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // 'g'
    [0x7F, 0x08, 0x04, 0x04, 0x78], // 'h'
    [0x00, 0x44, 0x7D, 0x40, 0x00], // 'i'
    [0x20, 0x40, 0x44, 0x3D, 0x00], // 'j'
    [0x7F, 0x10, 0x28, 0x44, 0x00], // 'k'
    [0x00, 0x41, 0x7F, 0x40, 0x00], // 'l'
    [0x7C, 0x04, 0x18, 0x04, 0x78], // 'm'
    [0x7C, 0x08, 0x04, 0x04, 0x78], // 'n'
    [0x38, 0x44, 0x44, 0x44, 0x38], // 'o'
    [0x7C, 0x14, 0x14, 0x14, 0x08], // 'p'
    [0x08, 0x14, 0x14, 0x18, 0x7C], // 'q'
    [0x7C, 0x08, 0x04, 0x04, 0x08], // 'r'
    [0x48, 0x54, 0x54, 0x54, 0x20], // 's'
    [0x04, 0x3F, 0x44, 0x40, 0x20], // 't'
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // 'u'
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // 'v'
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // 'w'
    [0x44, 0x28, 0x10, 0x28, 0x44], // 'x'
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // 'y'
    [0x44, 0x64, 0x54, 0x4C, 0x44], // 'z'
    [0x00, 0x08, 0x36, 0x41, 0x00], // '{'
    [0x00, 0x00, 0x7F, 0x00, 0x00], // '|'
    [0x00, 0x41, 0x36, 0x08, 0x00], // '}'
    [0x08, 0x04, 0x08, 0x10, 0x08], // '~'
];

fn glyph(ch: char) -> &'static [u8; 5] {
    let code = ch as u32;
    if (0x20..=0x7E).contains(&code) {
        &FONT_5X7[(code - 0x20) as usize]
    } else {
        &FALLBACK_GLYPH
    }
}

/// A rasterized framebuffer (tightly packed RGB8).
#[derive(Debug, Clone)]
pub struct Framebuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Framebuffer {
    fn new(width: u32, height: u32, fill: Rgb) -> Self {
        let mut pixels = vec![0u8; (width * height * 3) as usize];
        for px in pixels.chunks_exact_mut(3) {
            px[0] = fill.r;
            px[1] = fill.g;
            px[2] = fill.b;
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    fn fill_rect(&mut self, x: i64, y: i64, w: u32, h: u32, color: Rgb) {
        let x0 = x.max(0) as u32;
        let y0 = y.max(0) as u32;
        let x1 = ((x + w as i64).max(0) as u32).min(self.width);
        let y1 = ((y + h as i64).max(0) as u32).min(self.height);
        for py in y0..y1 {
            let row = (py * self.width) as usize * 3;
            for px in x0..x1 {
                let off = row + px as usize * 3;
                self.pixels[off] = color.r;
                self.pixels[off + 1] = color.g;
                self.pixels[off + 2] = color.b;
            }
        }
    }

    /// Sample one pixel (tests).
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        let off = ((y * self.width + x) * 3) as usize;
        Rgb::new(self.pixels[off], self.pixels[off + 1], self.pixels[off + 2])
    }
}

/// Execute a display list at `oversample` device pixels per logical pixel.
///
/// `width`/`height` are logical; the framebuffer comes out
/// `width * oversample` by `height * oversample`, pre-filled with
/// `background` so transparent regions never leak through.
pub fn rasterize(
    commands: &[PaintCommand],
    width: u32,
    height: u32,
    oversample: u32,
    background: Rgb,
) -> Framebuffer {
    let s = oversample.max(1) as i64;
    let mut fb = Framebuffer::new(width * s as u32, height * s as u32, background);

    for cmd in commands {
        match cmd {
            PaintCommand::Clear { color } => {
                fb.fill_rect(0, 0, fb.width, fb.height, *color);
            }
            PaintCommand::Rect {
                x,
                y,
                width,
                height,
                color,
            } => {
                fb.fill_rect(
                    *x as i64 * s,
                    *y as i64 * s,
                    width * s as u32,
                    height * s as u32,
                    *color,
                );
            }
            PaintCommand::Text {
                x,
                y,
                text,
                scale,
                color,
            } => {
                draw_text(&mut fb, *x as i64, *y as i64, text, *scale, s, *color);
            }
        }
    }
    fb
}

fn draw_text(fb: &mut Framebuffer, x: i64, y: i64, text: &str, scale: u32, s: i64, color: Rgb) {
    let ts = scale.max(1) as i64;
    let mut pen = x;
    for ch in text.chars() {
        if ch != ' ' {
            let g = glyph(ch);
            for (col, bits) in g.iter().enumerate() {
                for row in 0..7 {
                    if bits & (1 << row) != 0 {
                        fb.fill_rect(
                            (pen + col as i64 * ts) * s,
                            (y + row as i64 * ts) * s,
                            (ts * s) as u32,
                            (ts * s) as u32,
                            color,
                        );
                    }
                }
            }
        }
        // glyphs occupy 5x7 of the 8x8 cell; the remainder is tracking
        pen += GLYPH_ADVANCE as i64 * ts;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_fills_whole_buffer() {
        let bg = Rgb::new(26, 26, 26);
        let fb = rasterize(&[], 4, 3, 2, bg);
        assert_eq!(fb.width, 8);
        assert_eq!(fb.height, 6);
        assert_eq!(fb.pixel(0, 0), bg);
        assert_eq!(fb.pixel(7, 5), bg);
    }

    #[test]
    fn rect_is_scaled_by_oversampling() {
        let bg = Rgb::new(0, 0, 0);
        let red = Rgb::new(255, 0, 0);
        let cmds = [PaintCommand::Rect {
            x: 1,
            y: 1,
            width: 2,
            height: 1,
            color: red,
        }];
        let fb = rasterize(&cmds, 4, 4, 2, bg);
        assert_eq!(fb.pixel(2, 2), red);
        assert_eq!(fb.pixel(5, 3), red);
        assert_eq!(fb.pixel(0, 0), bg);
        assert_eq!(fb.pixel(6, 2), bg);
    }

    #[test]
    fn text_marks_pixels() {
        let bg = Rgb::new(255, 255, 255);
        let ink = Rgb::new(0, 0, 0);
        let cmds = [PaintCommand::Text {
            x: 0,
            y: 0,
            text: "I".to_string(),
            scale: 1,
            color: ink,
        }];
        let fb = rasterize(&cmds, 8, 8, 1, bg);
        assert!(fb.pixels.chunks_exact(3).any(|p| p == [0, 0, 0]));
    }

    #[test]
    fn rasterization_is_deterministic() {
        let cmds = [PaintCommand::Text {
            x: 2,
            y: 2,
            text: "Invoice".to_string(),
            scale: 1,
            color: Rgb::new(10, 20, 30),
        }];
        let a = rasterize(&cmds, 64, 16, 2, Rgb::new(255, 255, 255));
        let b = rasterize(&cmds, 64, 16, 2, Rgb::new(255, 255, 255));
        assert_eq!(a.pixels, b.pixels);
    }

    #[test]
    fn out_of_bounds_drawing_is_clipped() {
        let bg = Rgb::new(9, 9, 9);
        let cmds = [PaintCommand::Rect {
            x: -5,
            y: -5,
            width: 100,
            height: 100,
            color: Rgb::new(1, 2, 3),
        }];
        let fb = rasterize(&cmds, 4, 4, 1, bg);
        assert_eq!(fb.pixels.len(), 4 * 4 * 3);
        assert_eq!(fb.pixel(3, 3), Rgb::new(1, 2, 3));
    }
}
