//! Label text rasterised from the embedded DejaVu Sans Mono font.

use {
    crate::{
        error::{Error, Result},
        utils::pad_exponent,
    },
    image::{Rgb, RgbImage},
    imageproc::drawing::draw_text_mut,
    rusttype::{point, Font, Scale},
};

const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

pub fn load_font() -> Result<Font<'static>> {
    Font::try_from_bytes(FONT_DATA).ok_or(Error::Font)
}

/// Point of the text box placed at the given coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopCentre,
    LeftMiddle,
    RightMiddle,
}

/// Width and line height in pixels of `text` at `size` pixels
pub fn text_size(font: &Font, size: f32, text: &str) -> (i32, i32) {
    let scale = Scale::uniform(size);
    let width = font
        .layout(text, scale, point(0.0, 0.0))
        .filter_map(|glyph| glyph.pixel_bounding_box())
        .map(|bb| bb.max.x)
        .max()
        .unwrap_or(0);
    let v_metrics = font.v_metrics(scale);

    (width, (v_metrics.ascent - v_metrics.descent).ceil() as i32)
}

/// Draws `text` with its `anchor` point at `(x, y)`
pub fn draw_label(
    image: &mut RgbImage,
    font: &Font,
    size: f32,
    text: &str,
    (x, y): (i32, i32),
    anchor: Anchor,
    colour: Rgb<u8>,
) {
    let (width, height) = text_size(font, size, text);
    let (x, y) = match anchor {
        Anchor::TopCentre => (x - width / 2, y),
        Anchor::LeftMiddle => (x, y - height / 2),
        Anchor::RightMiddle => (x - width, y - height / 2),
    };

    draw_text_mut(image, colour, x, y, Scale::uniform(size), font, text);
}

/// `%.1e` style label, e.g. `8.8e+03`
pub fn format_sci(value: f64) -> String {
    pad_exponent(&format!("{:.1e}", value))
}

/// Graticule label for a longitude in [-180, 180]
pub fn lon_label(lon: f64) -> String {
    match lon.round() as i64 {
        0 => "0°".to_owned(),
        180 | -180 => "180°".to_owned(),
        l if l < 0 => format!("{}°W", -l),
        l => format!("{}°E", l),
    }
}

/// Graticule label for a latitude in [-90, 90]
pub fn lat_label(lat: f64) -> String {
    match lat.round() as i64 {
        0 => "0°".to_owned(),
        l if l < 0 => format!("{}°S", -l),
        l => format!("{}°N", l),
    }
}
