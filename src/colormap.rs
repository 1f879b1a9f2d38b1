//! Value to colour mapping for filled contour plots.

use {crate::colorscale::ColorScale, serde::Deserialize};

/// Number of contour levels spanning a colour scale
pub const LEVELS: usize = 100;

/// Piecewise-linear channel: `(x, y)` breakpoints with x ascending over [0, 1]
type Channel = &'static [(f64, f64)];

const JET: [Channel; 3] = [
    &[(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)],
    &[
        (0.0, 0.0),
        (0.125, 0.0),
        (0.375, 1.0),
        (0.64, 1.0),
        (0.91, 0.0),
        (1.0, 0.0),
    ],
    &[(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)],
];

const GRAY: [Channel; 3] = [&[(0.0, 0.0), (1.0, 1.0)]; 3];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Colormap {
    Jet,
    Gray,
}

impl Colormap {
    /// Colour at `x`, clamped to [0, 1]
    pub fn rgb(self, x: f64) -> [u8; 3] {
        let channels = match self {
            Colormap::Jet => &JET,
            Colormap::Gray => &GRAY,
        };
        let x = if x.is_nan() { 0.0 } else { x.max(0.0).min(1.0) };

        let mut rgb = [0u8; 3];
        for (out, channel) in rgb.iter_mut().zip(channels.iter()) {
            *out = (interpolate(channel, x) * 255.0).round() as u8;
        }
        rgb
    }
}

fn interpolate(channel: &[(f64, f64)], x: f64) -> f64 {
    for pair in channel.windows(2) {
        let (x0, y0) = pair[0];
        let (x1, y1) = pair[1];

        if x <= x1 {
            return y0 + (y1 - y0) * (x - x0) / (x1 - x0);
        }
    }

    channel[channel.len() - 1].1
}

/// Quantises values into the bands between `LEVELS` evenly spaced levels.
///
/// Values outside the scale take the colour of the outermost band; the range
/// is never stretched to fit the data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourBands {
    pub scale: ColorScale,
    pub colormap: Colormap,
}

impl ContourBands {
    pub const COUNT: usize = LEVELS - 1;

    pub fn new(scale: ColorScale, colormap: Colormap) -> Self {
        ContourBands { scale, colormap }
    }

    /// Band containing `value`, `None` for NaN
    pub fn band(&self, value: f64) -> Option<usize> {
        if value.is_nan() {
            return None;
        }

        let x = self.scale.normalise(value);
        Some(((x * Self::COUNT as f64) as usize).min(Self::COUNT - 1))
    }

    pub fn band_color(&self, band: usize) -> [u8; 3] {
        self.colormap
            .rgb((band as f64 + 0.5) / Self::COUNT as f64)
    }

    pub fn color(&self, value: f64) -> Option<[u8; 3]> {
        self.band(value).map(|band| self.band_color(band))
    }

    /// Value at the `i`th of `LEVELS` levels
    pub fn level(&self, i: usize) -> f64 {
        self.scale.min + (self.scale.max - self.scale.min) * i as f64 / (LEVELS - 1) as f64
    }
}

#[cfg(test)]
mod test {
    use {super::*, approx::assert_abs_diff_eq};

    #[test]
    fn jet_endpoints() {
        assert_eq!(Colormap::Jet.rgb(0.0), [0, 0, 128]);
        assert_eq!(Colormap::Jet.rgb(1.0), [128, 0, 0]);
        assert_eq!(Colormap::Jet.rgb(0.5), [123, 255, 123]);
    }

    #[test]
    fn gray_is_linear() {
        assert_eq!(Colormap::Gray.rgb(0.0), [0, 0, 0]);
        assert_eq!(Colormap::Gray.rgb(0.5), [128, 128, 128]);
        assert_eq!(Colormap::Gray.rgb(2.0), [255, 255, 255]);
    }

    #[test]
    fn levels_span_scale() {
        let bands = ContourBands::new(ColorScale::new(8800.0, 10500.0), Colormap::Jet);
        assert_abs_diff_eq!(bands.level(0), 8800.0);
        assert_abs_diff_eq!(bands.level(LEVELS - 1), 10500.0);
    }

    #[test]
    fn bands_cover_range() {
        let bands = ContourBands::new(ColorScale::new(-50.0, 50.0), Colormap::Jet);

        assert_eq!(bands.band(-50.0), Some(0));
        assert_eq!(bands.band(50.0), Some(ContourBands::COUNT - 1));
        assert_eq!(bands.band(0.0), Some(49));
        assert_eq!(bands.band(f64::NAN), None);
    }

    #[test]
    fn out_of_range_values_clip_to_boundary() {
        let bands = ContourBands::new(ColorScale::new(-50.0, 50.0), Colormap::Jet);

        assert_eq!(bands.color(1.0e9), bands.color(50.0));
        assert_eq!(bands.color(-1.0e9), bands.color(-50.0));
        assert_ne!(bands.color(1.0e9), bands.color(-1.0e9));
    }
}
