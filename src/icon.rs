use std::path::PathBuf;

use anyhow::Error;
use image::Rgba;
use tracing::{debug, instrument};

use crate::{
    canvas::{Canvas, Rect},
    configuration::Config,
    output::{ensure_directory, write_png},
};

pub const CRAB_RED: Rgba<u8> = Rgba([233, 69, 96, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Ellipse {
        bounds: Rect,
        fill: Rgba<u8>,
    },
    Text {
        origin: (i32, i32),
        text: &'static str,
        fill: Rgba<u8>,
    },
}

/// Drawing plan for the placeholder icon, applied in order.
pub const CRAB: [Shape; 4] = [
    // body
    Shape::Ellipse {
        bounds: Rect::new(50, 80, 206, 176),
        fill: CRAB_RED,
    },
    // claws
    Shape::Ellipse {
        bounds: Rect::new(30, 60, 80, 110),
        fill: CRAB_RED,
    },
    Shape::Ellipse {
        bounds: Rect::new(176, 60, 226, 110),
        fill: CRAB_RED,
    },
    Shape::Text {
        origin: (100, 105),
        text: "🦀",
        fill: WHITE,
    },
];

pub fn render(config: &Config) -> Canvas {
    let mut canvas = Canvas::new(config.size, config.size);

    for shape in CRAB.iter() {
        match *shape {
            Shape::Ellipse { bounds, fill } => canvas.fill_ellipse(bounds, fill),
            Shape::Text { origin, text, fill } => canvas.draw_text(origin, text, fill),
        }
    }
    debug!(
        shapes = CRAB.len(),
        width = canvas.width(),
        height = canvas.height(),
        opaque = canvas.image().pixels().filter(|p| p[3] == u8::MAX).count(),
        "rendered icon"
    );

    canvas
}

#[instrument(skip(config), fields(path = %config.output_path().display()))]
pub fn generate(config: &Config) -> Result<PathBuf, Error> {
    let image = render(config).into_image();

    ensure_directory(&config.output_dir)?;

    let path = config.output_path();
    write_png(&image, &path)?;

    Ok(path)
}
