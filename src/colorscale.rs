//! Fixed per-test-case colour ranges.
//!
//! The ranges are hand-tuned so images of the same field stay comparable
//! across timestamps; they are never derived from the data.

use {
    crate::{
        error::{Error, Result},
        grid::{Field, Topology},
    },
    serde::Deserialize,
    std::collections::BTreeMap,
};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
}

impl ColorScale {
    pub const fn new(min: f64, max: f64) -> Self {
        ColorScale { min, max }
    }

    /// Position of `value` in the range, clamped to [0, 1]
    pub fn normalise(&self, value: f64) -> f64 {
        ((value - self.min) / (self.max - self.min)).max(0.0).min(1.0)
    }

    fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min < self.max
    }
}

/// `{test_case: {field: (min, max)}}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ColorScaleTable(pub BTreeMap<u32, BTreeMap<Field, ColorScale>>);

impl ColorScaleTable {
    /// Ranges tuned for the simulator's reference test cases
    pub fn builtin(topology: Topology) -> Self {
        use Field::*;

        let cases: &[(u32, &[(Field, f64, f64)])] = match topology {
            Topology::CubedSphere => &[
                // steady flow
                (2, &[(H, 1000.0, 3000.0), (U, -60.0, -30.0)]),
                // flow over a mountain
                (5, &[(H, 5000.0, 6000.0), (U, -10.0, 40.0), (V, -25.0, 25.0)]),
                // barotropic instability
                (7, &[(H, 8800.0, 10500.0), (U, -50.0, 50.0), (V, -50.0, 50.0)]),
            ],
            Topology::LatLon => &[
                (
                    5,
                    &[
                        (H, 5000.0, 6000.0),
                        (U, -10.0, 40.0),
                        (V, -25.0, 25.0),
                        (Pv, -3.1e-08, 3.1e-08),
                        (Vort, -3.6e-05, 4.7e-05),
                    ],
                ),
                (
                    7,
                    &[
                        (H, 8400.0, 10500.0),
                        (U, -20.0, 85.0),
                        (V, -45.0, 45.0),
                        (Pv, -1.5e-08, 2.4e-08),
                        (Vort, -8.9e-05, 9.8e-05),
                    ],
                ),
            ],
        };

        ColorScaleTable(
            cases
                .iter()
                .map(|(test_case, scales)| {
                    (
                        *test_case,
                        scales
                            .iter()
                            .map(|&(field, min, max)| (field, ColorScale::new(min, max)))
                            .collect(),
                    )
                })
                .collect(),
        )
    }

    /// Looks up the range for `field`, rejecting missing or degenerate entries
    pub fn get(&self, test_case: u32, field: Field) -> Result<ColorScale> {
        let scale = self
            .0
            .get(&test_case)
            .and_then(|fields| fields.get(&field))
            .copied()
            .ok_or(Error::UnknownColorScale { test_case, field })?;

        if !scale.is_valid() {
            return Err(Error::InvalidColorScale {
                test_case,
                field,
                min: scale.min,
                max: scale.max,
            });
        }

        Ok(scale)
    }
}
