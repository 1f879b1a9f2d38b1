//! Filenames of simulator snapshots and rendered images.
//!
//! The snapshot names must match what the simulator writes:
//!
//! ```text
//! <prefix>_g<gridtype>_N<resolution>_<field>_t<timestamp>_face<tile>.dat   (cubed-sphere)
//! <prefix>_<field>_t<timestamp>_<N>x<M>.dat                                (lat-lon)
//! ```

use crate::{
    grid::{Field, GridDescriptor, Topology},
    utils::pad_exponent,
};

pub const SECONDS_PER_DAY: f64 = 86400.0;

/// Name of the timestamps index for a test case
pub fn index_file(test_case: u32) -> String {
    format!("TC{}_reftimes.dat", test_case)
}

/// Prefix the simulator uses when none is configured
pub fn default_case_prefix(topology: Topology, test_case: u32) -> String {
    match topology {
        Topology::CubedSphere => format!("tc{}", test_case),
        Topology::LatLon => format!("eg_swe_run_ic{}_cor1", test_case),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Naming {
    pub test_case: u32,
    pub case_prefix: String,
    pub grid: GridDescriptor,
}

impl Naming {
    pub fn new(test_case: u32, case_prefix: Option<&str>, grid: GridDescriptor) -> Self {
        let case_prefix = case_prefix
            .map(str::to_owned)
            .unwrap_or_else(|| default_case_prefix(grid.topology, test_case));

        Naming {
            test_case,
            case_prefix,
            grid,
        }
    }

    /// Snapshot file for one tile of `field` at `timestamp`; `tile` is 0-based
    pub fn snapshot_file(&self, field: Field, timestamp: i64, tile: usize) -> String {
        match self.grid.topology {
            Topology::CubedSphere => format!(
                "{}_t{}_face{}.dat",
                self.cubed_sphere_stem(field),
                timestamp,
                tile + 1
            ),
            Topology::LatLon => format!("{}.dat", self.lat_lon_stem(field, timestamp)),
        }
    }

    /// Image filename without the format extension
    pub fn output_stem(&self, field: Field, timestamp: i64) -> String {
        match self.grid.topology {
            Topology::CubedSphere => {
                format!("{}_t{}", self.cubed_sphere_stem(field), timestamp)
            }
            Topology::LatLon => self.lat_lon_stem(field, timestamp),
        }
    }

    pub fn title(&self, field: Field, timestamp: i64) -> String {
        // shortest round-trip float, exponent as in `1.1574074074074073e-05`
        let days = pad_exponent(&format!("{:?}", timestamp as f64 / SECONDS_PER_DAY));
        let title = format!("TC{} - {} - time (days) = {}", self.test_case, field, days);

        match self.grid.topology {
            Topology::CubedSphere => title,
            Topology::LatLon => format!(
                "{} - {}x{}",
                title, self.grid.resolution, self.grid.secondary_resolution
            ),
        }
    }

    fn cubed_sphere_stem(&self, field: Field) -> String {
        format!(
            "{}_g{}_N{}_{}",
            self.case_prefix, self.grid.grid_type, self.grid.resolution, field
        )
    }

    fn lat_lon_stem(&self, field: Field, timestamp: i64) -> String {
        format!(
            "{}_{}_t{}_{}x{}",
            self.case_prefix,
            field,
            timestamp,
            self.grid.resolution,
            self.grid.secondary_resolution
        )
    }
}

#[cfg(test)]
mod test {
    use {
        super::*,
        crate::grid::{Field, Staggering},
        insta::assert_debug_snapshot,
        std::collections::HashSet,
    };

    fn cubed(n: usize, grid_type: u32) -> Naming {
        let grid =
            GridDescriptor::new(Topology::CubedSphere, n, None, grid_type, Staggering::A).unwrap();
        Naming::new(7, None, grid)
    }

    fn lat_lon(n: usize) -> Naming {
        let grid = GridDescriptor::new(Topology::LatLon, n, None, 0, Staggering::A).unwrap();
        Naming::new(5, None, grid)
    }

    #[test]
    fn cubed_sphere_snapshot_names() {
        let naming = cubed(4, 0);
        let names = (0..naming.grid.tile_count())
            .map(|tile| naming.snapshot_file(Field::H, 86400, tile))
            .collect::<Vec<_>>();

        assert_debug_snapshot!("cubed_sphere_snapshot_names", names);
    }

    #[test]
    fn lat_lon_snapshot_name() {
        let naming = lat_lon(128);
        assert_eq!(
            naming.snapshot_file(Field::Vort, 43200, 0),
            "eg_swe_run_ic5_cor1_vort_t43200_128x64.dat"
        );
        assert_eq!(
            naming.output_stem(Field::Pv, 0),
            "eg_swe_run_ic5_cor1_pv_t0_128x64"
        );
    }

    #[test]
    fn output_stem_and_title() {
        let naming = cubed(192, 0);
        assert_eq!(naming.output_stem(Field::U, 86400), "tc7_g0_N192_u_t86400");
        assert_eq!(
            naming.title(Field::U, 86400),
            "TC7 - u - time (days) = 1.0"
        );
        assert_eq!(
            lat_lon(128).title(Field::H, 43200),
            "TC5 - h - time (days) = 0.5 - 128x64"
        );
        assert_eq!(
            naming.title(Field::H, 1),
            "TC7 - h - time (days) = 1.1574074074074073e-05"
        );
        assert_eq!(
            naming.title(Field::V, 8640000),
            "TC7 - v - time (days) = 100.0"
        );
    }

    #[test]
    fn custom_prefix() {
        let grid = GridDescriptor::new(Topology::CubedSphere, 4, None, 1, Staggering::A).unwrap();
        let naming = Naming::new(2, Some("run"), grid);
        assert_eq!(
            naming.snapshot_file(Field::Pv, 0, 5),
            "run_g1_N4_pv_t0_face6.dat"
        );
    }

    #[test]
    fn index_name() {
        assert_eq!(index_file(7), "TC7_reftimes.dat");
    }

    #[test]
    fn snapshot_names_are_injective() {
        let mut seen = HashSet::new();
        let mut count = 0;

        let mut insert = |naming: &Naming| {
            for &field in &Field::ALL {
                for &timestamp in &[0i64, 1, 10, 100] {
                    for tile in 0..naming.grid.tile_count() {
                        seen.insert(naming.snapshot_file(field, timestamp, tile));
                        count += 1;
                    }
                }
            }
        };

        for &test_case in &[1u32, 2, 12] {
            for &grid_type in &[0u32, 1, 12] {
                for &n in &[1usize, 2, 21] {
                    let grid = GridDescriptor::new(
                        Topology::CubedSphere,
                        n,
                        None,
                        grid_type,
                        Staggering::A,
                    )
                    .unwrap();
                    insert(&Naming::new(test_case, None, grid));
                }
            }

            for &(n, m) in &[(1usize, 1usize), (1, 12), (11, 2), (12, 1), (4, 2)] {
                let grid =
                    GridDescriptor::new(Topology::LatLon, n, Some(m), 0, Staggering::A).unwrap();
                insert(&Naming::new(test_case, None, grid));
                // a lat-lon run sharing the cubed-sphere prefix
                insert(&Naming::new(test_case, Some(format!("tc{}", test_case).as_str()), grid));
            }
        }

        assert_eq!(seen.len(), count);
    }
}
