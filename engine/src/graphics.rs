use crate::{
    surface::SurfaceSize,
    ui::{Rect, Size},
};

pub type Color = [u8; 4];

// Built-in 5x7 block font. Each row is 5 bits, most significant bit on the left.
pub const DEFAULT_TEXT_SCALE: u32 = 2;
const GLYPH_W: u32 = 5;
const GLYPH_H: u32 = 7;

fn glyph_advance_x(scale: u32) -> u32 {
    (GLYPH_W + 1) * scale.max(1)
}

fn line_advance_y(scale: u32) -> u32 {
    (GLYPH_H + 2) * scale.max(1)
}

/// Pixel size of `text` when drawn with `draw_text_scaled` at `scale`.
///
/// Multi-line text is as wide as its longest line. Trailing glyph spacing is not counted, so the
/// result can be used directly to centre text.
pub fn text_size(text: &str, scale: u32) -> Size {
    let scale = scale.max(1);
    let mut lines = 0u32;
    let mut widest = 0u32;
    for line in text.split('\n') {
        lines += 1;
        let chars = line.chars().count() as u32;
        let w = chars
            .saturating_mul(glyph_advance_x(scale))
            .saturating_sub(scale);
        widest = widest.max(w);
    }
    let h = lines
        .saturating_mul(line_advance_y(scale))
        .saturating_sub(2 * scale);
    Size::new(widest, h)
}

/// Drawing interface the game renders through.
///
/// Text is built from filled blocks, so a backend only has to provide rect primitives.
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;

    /// Opaque fill, clipped to the surface.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Blends `color` over existing content with the given alpha.
    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8);

    fn rect_outline(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        self.fill_rect(Rect::new(rect.x, rect.y, rect.w, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.bottom() - 1, rect.w, 1), color);
        self.fill_rect(Rect::new(rect.x, rect.y, 1, rect.h), color);
        self.fill_rect(Rect::new(rect.right() - 1, rect.y, 1, rect.h), color);
    }

    fn draw_text_scaled(&mut self, x: u32, y: u32, text: &str, color: Color, scale: u32) {
        let scale = scale.max(1);
        let mut cursor_x = x;
        let mut cursor_y = y;

        for ch in text.chars() {
            if ch == '\n' {
                cursor_x = x;
                cursor_y = cursor_y.saturating_add(line_advance_y(scale));
                continue;
            }
            if ch != ' ' {
                for (row, bits) in glyph_rows(ch).into_iter().enumerate() {
                    for col in 0..GLYPH_W {
                        if bits & (1 << (GLYPH_W - 1 - col)) == 0 {
                            continue;
                        }
                        self.fill_rect(
                            Rect::new(
                                cursor_x.saturating_add(col * scale),
                                cursor_y.saturating_add(row as u32 * scale),
                                scale,
                                scale,
                            ),
                            color,
                        );
                    }
                }
            }
            cursor_x = cursor_x.saturating_add(glyph_advance_x(scale));
        }
    }

    fn draw_text(&mut self, x: u32, y: u32, text: &str, color: Color) {
        self.draw_text_scaled(x, y, text, color, DEFAULT_TEXT_SCALE);
    }

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// Renders into a borrowed RGBA buffer (the `pixels` frame, or a headless surface).
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    /// Clips `rect` to the surface and returns `(x0, y0, x1, y1, stride)` in pixels, or `None`
    /// when nothing is visible or the buffer is too small for the declared size.
    fn clip(&self, rect: Rect) -> Option<(usize, usize, usize, usize, usize)> {
        if self.frame.len() < self.size.rgba_len() || self.size.is_empty() {
            return None;
        }
        let x1 = rect.right().min(self.size.width);
        let y1 = rect.bottom().min(self.size.height);
        if rect.x >= x1 || rect.y >= y1 {
            return None;
        }
        Some((
            rect.x as usize,
            rect.y as usize,
            x1 as usize,
            y1 as usize,
            self.size.width as usize * 4,
        ))
    }
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let Some((x0, y0, x1, y1, stride)) = self.clip(rect) else {
            return;
        };
        for y in y0..y1 {
            let row = &mut self.frame[y * stride + x0 * 4..y * stride + x1 * 4];
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
        }
    }

    fn blend_rect(&mut self, rect: Rect, color: Color, alpha: u8) {
        match alpha {
            0 => return,
            255 => return self.fill_rect(rect, color),
            _ => {}
        }
        let Some((x0, y0, x1, y1, stride)) = self.clip(rect) else {
            return;
        };

        let a = alpha as u32;
        let inv = 255 - a;
        for y in y0..y1 {
            let row = &mut self.frame[y * stride + x0 * 4..y * stride + x1 * 4];
            for px in row.chunks_exact_mut(4) {
                for c in 0..3 {
                    px[c] = ((px[c] as u32 * inv + color[c] as u32 * a + 127) / 255) as u8;
                }
                px[3] = 255;
            }
        }
    }
}

fn glyph_rows(ch: char) -> [u8; GLYPH_H as usize] {
    match ch.to_ascii_uppercase() {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
        '3' => [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],

        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],

        '!' => [0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00000, 0b00100],
        ':' => [0b00000, 0b01100, 0b01100, 0b00000, 0b01100, 0b01100, 0b00000],
        '-' => [0b00000, 0b00000, 0b00000, 0b11111, 0b00000, 0b00000, 0b00000],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        '/' => [0b00001, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b10000],

        _ => [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b00000, 0b00100],
    }
}
