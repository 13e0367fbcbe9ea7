use image::{Rgba, RgbaImage};

use crate::glyphs::{self, LINE_HEIGHT};

/// Inclusive bounding box in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Rect { x0, y0, x1, y1 }
    }

    fn is_empty(&self) -> bool {
        self.x1 < self.x0 || self.y1 < self.y0
    }
}

pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// A fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Canvas {
            image: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Fills the ellipse inscribed in `bounds`. A pixel is painted when its
    /// centre falls inside the ellipse.
    pub fn fill_ellipse(&mut self, bounds: Rect, color: Rgba<u8>) {
        if bounds.is_empty() {
            return;
        }

        let (x0, y0) = (i64::from(bounds.x0), i64::from(bounds.y0));
        let (x1, y1) = (i64::from(bounds.x1), i64::from(bounds.y1));
        let cx = (x0 + x1 + 1) as f64 / 2.0;
        let cy = (y0 + y1 + 1) as f64 / 2.0;
        let rx = (x1 - x0 + 1) as f64 / 2.0;
        let ry = (y1 - y0 + 1) as f64 / 2.0;

        // only visit the part of the box that lands on the canvas
        let (width, height) = (i64::from(self.width()), i64::from(self.height()));
        for y in y0.max(0)..=y1.min(height - 1) {
            let dy = (y as f64 + 0.5 - cy) / ry;
            for x in x0.max(0)..=x1.min(width - 1) {
                let dx = (x as f64 + 0.5 - cx) / rx;
                if dx * dx + dy * dy <= 1.0 {
                    self.image.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }

    /// Renders `text` with the bitmap font; `origin` is the top-left of the
    /// first glyph.
    pub fn draw_text(&mut self, origin: (i32, i32), text: &str, color: Rgba<u8>) {
        let (mut pen_x, mut pen_y) = origin;

        for c in text.chars() {
            if c == '\n' {
                pen_x = origin.0;
                pen_y += LINE_HEIGHT as i32;
                continue;
            }

            let glyph = glyphs::glyph(c);
            for row in 0..glyph.height() {
                for col in 0..glyph.width() {
                    if glyph.is_set(col, row) {
                        self.put(pen_x + col as i32, pen_y + row as i32, color);
                    }
                }
            }
            pen_x += glyph.width() as i32 + 1;
        }
    }

    fn put(&mut self, x: i32, y: i32, color: Rgba<u8>) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, color);
        }
    }
}
