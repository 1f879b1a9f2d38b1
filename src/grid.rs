//! Grid topology and per-field tile shapes.

use {
    crate::error::{Error, Result},
    serde::Deserialize,
    std::fmt,
};

/// Number of faces on a cubed-sphere grid
pub const CUBED_SPHERE_TILES: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    CubedSphere,
    LatLon,
}

impl Topology {
    pub fn tile_count(self) -> usize {
        match self {
            Topology::CubedSphere => CUBED_SPHERE_TILES,
            Topology::LatLon => 1,
        }
    }
}

/// Placement of vector components relative to cell centres
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Staggering {
    /// All quantities at cell centres
    A,
    /// Velocity components on cell edges
    D,
}

/// Physical quantity written by the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    H,
    U,
    V,
    Vort,
    Pv,
}

impl Field {
    pub const ALL: [Field; 5] = [Field::H, Field::U, Field::V, Field::Vort, Field::Pv];

    /// Name used in snapshot and image filenames
    pub fn name(self) -> &'static str {
        match self {
            Field::H => "h",
            Field::U => "u",
            Field::V => "v",
            Field::Vort => "vort",
            Field::Pv => "pv",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fixed description of the grid the snapshot files were written on.
///
/// Nothing here is read from the data files, so it must agree with them or
/// reshaping fails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridDescriptor {
    pub topology: Topology,
    /// N, cells along each tile edge (longitude points for lat-lon)
    pub resolution: usize,
    /// M, latitude points; only meaningful for lat-lon grids
    pub secondary_resolution: usize,
    /// Code written in the `_g<code>` filename segment
    pub grid_type: u32,
    pub staggering: Staggering,
}

impl GridDescriptor {
    pub fn new(
        topology: Topology,
        resolution: usize,
        secondary_resolution: Option<usize>,
        grid_type: u32,
        staggering: Staggering,
    ) -> Result<Self> {
        if resolution == 0 {
            return Err(Error::InvalidGrid("resolution must be positive".into()));
        }

        let secondary_resolution = match topology {
            Topology::CubedSphere => resolution,
            Topology::LatLon => secondary_resolution.unwrap_or(resolution / 2),
        };
        if secondary_resolution == 0 {
            return Err(Error::InvalidGrid(format!(
                "secondary resolution must be positive for a {}-point lat-lon grid",
                resolution
            )));
        }

        Ok(GridDescriptor {
            topology,
            resolution,
            secondary_resolution,
            grid_type,
            staggering,
        })
    }

    pub fn tile_count(&self) -> usize {
        self.topology.tile_count()
    }

    /// Rows and columns of one tile of `field`
    pub fn tile_shape(&self, field: Field) -> (usize, usize) {
        let n = self.resolution;

        match (self.topology, self.staggering, field) {
            (Topology::LatLon, _, _) => (n, self.secondary_resolution),
            (Topology::CubedSphere, Staggering::D, Field::U) => (n + 1, n),
            (Topology::CubedSphere, Staggering::D, Field::V) => (n, n + 1),
            (Topology::CubedSphere, _, _) => (n, n),
        }
    }
}
