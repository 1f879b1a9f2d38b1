use {
    crate::{
        colorscale::{ColorScale, ColorScaleTable},
        error::{Error, Result},
        grid::{Field, GridDescriptor, Staggering, Topology},
        naming::Naming,
        render::{Colormap, ImageFormat, Projection},
    },
    serde::Deserialize,
    std::path::PathBuf,
};

/// Plotting parameters
#[derive(Debug, PartialEq, Default, Deserialize)]
pub struct Parameters {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub grid: Grid,
    #[serde(default)]
    pub case: Case,
    #[serde(default)]
    pub rendering: Rendering,
    /// Overrides the built-in colour ranges when present
    #[serde(default)]
    pub color_scales: Option<ColorScaleTable>,
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Environment {
    /// Directory containing the snapshot files and the timestamps index
    pub data_directory: PathBuf,
    /// Directory the images are written to
    pub output_directory: PathBuf,
}

impl Default for Environment {
    fn default() -> Self {
        Environment {
            data_directory: PathBuf::from("../dump"),
            output_directory: PathBuf::from("../graphs"),
        }
    }
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Grid {
    pub topology: Topology,
    /// N, cells along a tile edge or longitude points
    pub resolution: usize,
    /// M, latitude points of a lat-lon grid (defaults to N/2)
    pub secondary_resolution: Option<usize>,
    /// Grid type code used in snapshot filenames
    pub grid_type: u32,
    pub staggering: Staggering,
}

impl Default for Grid {
    fn default() -> Self {
        Grid {
            topology: Topology::CubedSphere,
            resolution: 192,
            secondary_resolution: None,
            grid_type: 0,
            staggering: Staggering::A,
        }
    }
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Case {
    pub test_case: u32,
    /// Leading segment of every filename (derived from the test case if absent)
    pub case_prefix: Option<String>,
    pub fields: Vec<Field>,
    pub missing_files: MissingFilePolicy,
}

impl Default for Case {
    fn default() -> Self {
        Case {
            test_case: 7,
            case_prefix: None,
            fields: vec![Field::H, Field::U, Field::V],
            missing_files: MissingFilePolicy::Skip,
        }
    }
}

/// What to do when a snapshot file for some (timestamp, tile) does not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingFilePolicy {
    /// Fail the whole run
    Abort,
    /// Warn and leave that field/timestamp unrendered
    Skip,
}

#[derive(Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Rendering {
    pub projection: Projection,
    pub dpi: u32,
    pub format: String,
    pub colormap: Colormap,
}

impl Default for Rendering {
    fn default() -> Self {
        Rendering {
            projection: Projection::Mercator,
            dpi: 100,
            format: "png".to_owned(),
            colormap: Colormap::Jet,
        }
    }
}

impl Parameters {
    pub fn grid_descriptor(&self) -> Result<GridDescriptor> {
        GridDescriptor::new(
            self.grid.topology,
            self.grid.resolution,
            self.grid.secondary_resolution,
            self.grid.grid_type,
            self.grid.staggering,
        )
    }

    pub fn naming(&self) -> Result<Naming> {
        Ok(Naming::new(
            self.case.test_case,
            self.case.case_prefix.as_deref(),
            self.grid_descriptor()?,
        ))
    }

    pub fn image_format(&self) -> Result<ImageFormat> {
        self.rendering.format.parse()
    }

    pub fn color_scale_table(&self) -> ColorScaleTable {
        self.color_scales
            .clone()
            .unwrap_or_else(|| ColorScaleTable::builtin(self.grid.topology))
    }

    /// Colour range of every configured field, in field order
    pub fn color_scales(&self) -> Result<Vec<(Field, ColorScale)>> {
        let table = self.color_scale_table();

        self.case
            .fields
            .iter()
            .map(|&field| Ok((field, table.get(self.case.test_case, field)?)))
            .collect()
    }

    /// Checks everything that can be checked without touching the filesystem
    pub fn validate(&self) -> Result<()> {
        self.grid_descriptor()?;
        self.image_format()?;

        if self.rendering.dpi == 0 {
            return Err(Error::InvalidParameter("dpi must be positive".into()));
        }
        if self.case.fields.is_empty() {
            return Err(Error::InvalidParameter("no fields selected".into()));
        }

        self.color_scales()?;

        Ok(())
    }
}
