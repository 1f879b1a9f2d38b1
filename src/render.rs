//! Filled contour maps of one field at one timestamp.

use {
    crate::{
        colormap::ContourBands,
        error::{Error, Result},
        grid::Topology,
        png,
        projection::sample,
        text::{draw_label, format_sci, lat_label, load_font, lon_label, Anchor},
    },
    image::{Rgb, RgbImage},
    imageproc::{
        drawing::{
            draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut, draw_polygon_mut,
        },
        point::Point,
        rect::Rect,
    },
    log::info,
    ndarray::ArrayView3,
    rusttype::Font,
    std::{fs, path::Path, path::PathBuf, str::FromStr},
};

pub use crate::{colormap::Colormap, projection::Projection};

/// Spacing of the latitude/longitude graticule in degrees
pub const GRATICULE_SPACING: f64 = 30.0;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const GRATICULE: Rgb<u8> = Rgb([80, 80, 80]);

/// Font sizes in pixels at the 100 dpi figure scale
const TITLE_SIZE: f32 = 17.0;
const GRATICULE_LABEL_SIZE: f32 = 12.0;
const TICK_LABEL_SIZE: f32 = 11.0;

const MARGIN_TOP: i32 = 60;
const MARGIN_BOTTOM: i32 = 40;
const MARGIN_LEFT: i32 = 50;
const MARGIN_RIGHT: i32 = 20;
const COLORBAR_GAP: i32 = 40;
const COLORBAR_WIDTH: i32 = 24;
const COLORBAR_LABELS: i32 = 90;
const COLORBAR_TICKS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            _ => Err(Error::UnsupportedFormat(s.to_owned())),
        }
    }
}

/// Everything about a plot except the data
#[derive(Debug, Clone)]
pub struct Plot {
    pub topology: Topology,
    pub projection: Projection,
    pub title: String,
    pub bands: ContourBands,
    pub dpi: u32,
    pub format: ImageFormat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Layout {
    map: Rect,
    colorbar: Rect,
}

impl Layout {
    fn new(projection: Projection) -> Self {
        let (width, height) = projection.figure_size();
        let (width, height) = (width as i32, height as i32);

        let avail_w = width
            - MARGIN_LEFT
            - MARGIN_RIGHT
            - COLORBAR_GAP
            - COLORBAR_WIDTH
            - COLORBAR_LABELS;
        let avail_h = height - MARGIN_TOP - MARGIN_BOTTOM;

        let map_w = avail_w.min((avail_h as f64 * projection.aspect()) as i32);
        let map_h = (map_w as f64 / projection.aspect()) as i32;
        let map = Rect::at(MARGIN_LEFT, MARGIN_TOP + (avail_h - map_h) / 2)
            .of_size(map_w as u32, map_h as u32);

        let bar_h = map_h * 4 / 5;
        let colorbar = Rect::at(
            map.right() + 1 + COLORBAR_GAP,
            map.top() + (map_h - bar_h) / 2,
        )
        .of_size(COLORBAR_WIDTH as u32, bar_h as u32);

        Layout { map, colorbar }
    }
}

/// Draws the figure for a `(row, col, tile)` snapshot
pub fn draw_figure(snapshot: &ArrayView3<f64>, plot: &Plot) -> Result<RgbImage> {
    let font = load_font()?;
    let (width, height) = plot.projection.figure_size();
    let layout = Layout::new(plot.projection);

    let mut image = RgbImage::from_pixel(width as u32, height as u32, WHITE);
    draw_map(&mut image, snapshot, plot, layout.map);
    if plot.projection == Projection::Mercator {
        draw_graticule_labels(&mut image, &font, layout.map);
    }
    draw_colorbar(&mut image, &font, &plot.bands, layout.colorbar);

    let map = layout.map;
    draw_label(
        &mut image,
        &font,
        TITLE_SIZE,
        &plot.title,
        (
            map.left() + map.width() as i32 / 2,
            map.top() - TITLE_SIZE as i32 - 12,
        ),
        Anchor::TopCentre,
        BLACK,
    );

    Ok(image)
}

fn put(image: &mut RgbImage, x: i32, y: i32, rgb: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
        image.put_pixel(x as u32, y as u32, rgb);
    }
}

fn draw_map(image: &mut RgbImage, snapshot: &ArrayView3<f64>, plot: &Plot, map: Rect) {
    let projection = plot.projection;
    let (w, h) = (map.width() as f64, map.height() as f64);
    let locate =
        |px: i32, py: i32| projection.inverse((px as f64 + 0.5) / w, (py as f64 + 0.5) / h);

    for py in 0..map.height() as i32 {
        for px in 0..map.width() as i32 {
            let (x, y) = (map.left() + px, map.top() + py);
            let (lon, lat) = match locate(px, py) {
                Some(p) => p,
                None => {
                    // limb of the globe
                    if locate(px + 1, py).is_some()
                        || locate(px - 1, py).is_some()
                        || locate(px, py + 1).is_some()
                        || locate(px, py - 1).is_some()
                    {
                        put(image, x, y, BLACK);
                    }
                    continue;
                }
            };

            let value = sample(snapshot, plot.topology, lon, lat);
            if let Some(rgb) = plot.bands.color(value) {
                put(image, x, y, Rgb(rgb));
            }

            let crosses = |next: Option<(f64, f64)>| match next {
                Some((lon2, lat2)) => {
                    (crosses_line(lon, lon2) && (lon - lon2).abs() < 180.0)
                        || crosses_line(lat, lat2)
                }
                None => false,
            };
            if crosses(locate(px + 1, py)) || crosses(locate(px, py + 1)) {
                put(image, x, y, GRATICULE);
            }
        }
    }

    if projection == Projection::Mercator {
        draw_hollow_rect_mut(
            image,
            Rect::at(map.left() - 1, map.top() - 1).of_size(map.width() + 2, map.height() + 2),
            BLACK,
        );
    }
}

/// Whether a graticule line lies between two coordinates
fn crosses_line(a: f64, b: f64) -> bool {
    (a / GRATICULE_SPACING).floor() != (b / GRATICULE_SPACING).floor()
}

/// Longitude labels under the equirectangular map, latitude labels to its left
fn draw_graticule_labels(image: &mut RgbImage, font: &Font, map: Rect) {
    let (w, h) = ((map.width() - 1) as f64, (map.height() - 1) as f64);
    let steps = (360.0 / GRATICULE_SPACING) as i32;

    for k in 0..=steps {
        let lon = -180.0 + GRATICULE_SPACING * k as f64;
        let x = map.left() + ((lon + 180.0) / 360.0 * w).round() as i32;
        draw_label(
            image,
            font,
            GRATICULE_LABEL_SIZE,
            &lon_label(lon),
            (x, map.bottom() + 6),
            Anchor::TopCentre,
            BLACK,
        );
    }

    for k in 0..=steps / 2 {
        let lat = -90.0 + GRATICULE_SPACING * k as f64;
        let y = map.top() + ((90.0 - lat) / 180.0 * h).round() as i32;
        draw_label(
            image,
            font,
            GRATICULE_LABEL_SIZE,
            &lat_label(lat),
            (map.left() - 6, y),
            Anchor::RightMiddle,
            BLACK,
        );
    }
}

fn draw_colorbar(image: &mut RgbImage, font: &Font, bands: &ContourBands, bar: Rect) {
    let count = ContourBands::COUNT as i32;
    let bar_h = bar.height() as i32;

    for y in 0..bar_h {
        // top of the bar is the maximum
        let band = ((bar_h - 1 - y) * count / bar_h) as usize;
        draw_filled_rect_mut(
            image,
            Rect::at(bar.left(), bar.top() + y).of_size(bar.width(), 1),
            Rgb(bands.band_color(band)),
        );
    }
    draw_hollow_rect_mut(
        image,
        Rect::at(bar.left() - 1, bar.top() - 1).of_size(bar.width() + 2, bar.height() + 2),
        BLACK,
    );

    // triangular caps: out-of-range values take the end colours
    let cap = bar.width() as i32;
    let centre = bar.left() + cap / 2;
    draw_polygon_mut(
        image,
        &[
            Point::new(bar.left(), bar.top() - 2),
            Point::new(bar.right(), bar.top() - 2),
            Point::new(centre, bar.top() - 1 - cap),
        ],
        Rgb(bands.band_color(ContourBands::COUNT - 1)),
    );
    draw_polygon_mut(
        image,
        &[
            Point::new(bar.left(), bar.bottom() + 2),
            Point::new(bar.right(), bar.bottom() + 2),
            Point::new(centre, bar.bottom() + 1 + cap),
        ],
        Rgb(bands.band_color(0)),
    );

    for k in 0..COLORBAR_TICKS {
        let fraction = k as f64 / (COLORBAR_TICKS - 1) as f64;
        let value = bands.scale.min + (bands.scale.max - bands.scale.min) * fraction;
        let y = bar.bottom() - ((bar_h - 1) as f64 * fraction).round() as i32;

        draw_line_segment_mut(
            image,
            ((bar.right() + 1) as f32, y as f32),
            ((bar.right() + 5) as f32, y as f32),
            BLACK,
        );
        draw_label(
            image,
            font,
            TICK_LABEL_SIZE,
            &format_sci(value),
            (bar.right() + 9, y),
            Anchor::LeftMiddle,
            BLACK,
        );
    }
}

/// `<stem>.<extension>`, keeping any dots already in the stem
pub fn output_path<P: AsRef<Path>>(stem: P, format: ImageFormat) -> PathBuf {
    let mut name = stem.as_ref().as_os_str().to_owned();
    name.push(".");
    name.push(format.extension());
    PathBuf::from(name)
}

/// Renders one snapshot and writes it to `<output_stem>.<format>`
pub fn render_field<P: AsRef<Path>>(
    snapshot: &ArrayView3<f64>,
    plot: &Plot,
    output_stem: P,
) -> Result<PathBuf> {
    let path = output_path(output_stem, plot.format);

    let bytes = {
        let image = draw_figure(snapshot, plot)?;
        match plot.format {
            ImageFormat::Png => png::encode_rgb(
                image.as_raw(),
                image.width() as usize,
                image.height() as usize,
                plot.dpi,
                &[("Title", plot.title.as_str()), ("Software", "swe-plot")],
            )
            .map_err(|e| Error::io(&path, e))?,
        }
    };

    fs::write(&path, bytes).map_err(|e| Error::io(&path, e))?;
    info!("Plotted {}", path.display());

    Ok(path)
}
