//! Map projections and lookup of grid values at geographic points.
//!
//! Rendering walks the image pixels, inverse-projects each one to
//! longitude/latitude and samples the nearest grid cell, so only inverse
//! projections are needed.

use {
    crate::grid::Topology,
    ndarray::ArrayView3,
    serde::Deserialize,
    std::f64::consts::{FRAC_PI_2, FRAC_PI_4},
};

/// Centre of the orthographic view
pub const SPHERE_CENTRE: (f64, f64) = (45.0, 30.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Projection {
    /// Global equirectangular map
    Mercator,
    /// Orthographic view of one hemisphere
    Sphere,
}

impl Projection {
    /// Width and height of the whole figure in pixels
    pub fn figure_size(self) -> (usize, usize) {
        match self {
            Projection::Mercator => (1832, 977),
            Projection::Sphere => (800, 800),
        }
    }

    /// Width over height of the map area
    pub fn aspect(self) -> f64 {
        match self {
            Projection::Mercator => 2.0,
            Projection::Sphere => 1.0,
        }
    }

    /// Longitude and latitude in degrees at map position `(u, v)`, both in
    /// [0, 1] with `u` to the right and `v` downwards. `None` off the globe.
    pub fn inverse(self, u: f64, v: f64) -> Option<(f64, f64)> {
        match self {
            Projection::Mercator => {
                if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
                    return None;
                }
                Some((-180.0 + 360.0 * u, 90.0 - 180.0 * v))
            }
            Projection::Sphere => {
                let (lon0, lat0) = SPHERE_CENTRE;
                let x = 2.0 * u - 1.0;
                let y = 1.0 - 2.0 * v;
                let rho = x.hypot(y);

                if rho > 1.0 {
                    return None;
                }
                if rho == 0.0 {
                    return Some((lon0, lat0));
                }

                let c = rho.asin();
                let (sin_c, cos_c) = c.sin_cos();
                let (sin_lat0, cos_lat0) = lat0.to_radians().sin_cos();

                let lat = (cos_c * sin_lat0 + y * sin_c * cos_lat0 / rho)
                    .max(-1.0)
                    .min(1.0)
                    .asin();
                let lon = lon0.to_radians()
                    + (x * sin_c).atan2(rho * cos_c * cos_lat0 - y * sin_c * sin_lat0);

                Some((wrap_longitude(lon.to_degrees()), lat.to_degrees()))
            }
        }
    }
}

/// Longitude in [-180, 180)
pub fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Centre, east and north unit vectors of each cubed-sphere face.
///
/// Faces 0-3 straddle the equator centred on longitudes 0, 90, 180 and 270,
/// face 4 is centred on the north pole and face 5 on the south pole.
const FACES: [[[f64; 3]; 3]; 6] = [
    [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    [[0.0, 1.0, 0.0], [-1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
    [[-1.0, 0.0, 0.0], [0.0, -1.0, 0.0], [0.0, 0.0, 1.0]],
    [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]],
    [[0.0, 0.0, 1.0], [0.0, 1.0, 0.0], [-1.0, 0.0, 0.0]],
    [[0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]],
];

fn dot(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Face containing a point and its equiangular coordinates (alpha, beta) on
/// that face, both in [-pi/4, pi/4]
pub fn cube_face(lon: f64, lat: f64) -> (usize, f64, f64) {
    let (sin_lon, cos_lon) = lon.to_radians().sin_cos();
    let (sin_lat, cos_lat) = lat.to_radians().sin_cos();
    let p = [cos_lat * cos_lon, cos_lat * sin_lon, sin_lat];

    let mut face = 0;
    let mut best = f64::NEG_INFINITY;
    for (i, [centre, _, _]) in FACES.iter().enumerate() {
        let d = dot(&p, centre);
        if d > best {
            best = d;
            face = i;
        }
    }

    let [centre, east, north] = &FACES[face];
    let d = dot(&p, centre);
    let alpha = (dot(&p, east) / d).atan();
    let beta = (dot(&p, north) / d).atan();

    (face, alpha, beta)
}

/// Index of the cell containing `angle` among `cells` equal divisions of
/// [-pi/4, pi/4]
fn equiangular_index(angle: f64, cells: usize) -> usize {
    let x = (angle + FRAC_PI_4) / FRAC_PI_2;
    ((x * cells as f64).floor().max(0.0) as usize).min(cells - 1)
}

/// Index of the node nearest to `x` in [0, 1] among `nodes` evenly spaced
/// nodes including both ends
fn nearest_node(x: f64, nodes: usize) -> usize {
    ((x * (nodes - 1) as f64).round().max(0.0) as usize).min(nodes - 1)
}

/// Value of the grid cell nearest to (`lon`, `lat`) in a `(row, col, tile)`
/// snapshot.
///
/// Lat-lon rows run over longitudes 0..=360 and columns over latitudes
/// -90..=90. Cubed-sphere rows follow alpha and columns beta on each face.
pub fn sample(snapshot: &ArrayView3<f64>, topology: Topology, lon: f64, lat: f64) -> f64 {
    let (rows, cols, _) = snapshot.dim();

    match topology {
        Topology::LatLon => {
            let i = nearest_node(lon.rem_euclid(360.0) / 360.0, rows);
            let j = nearest_node((lat + 90.0) / 180.0, cols);
            snapshot[[i, j, 0]]
        }
        Topology::CubedSphere => {
            let (face, alpha, beta) = cube_face(lon, lat);
            let i = equiangular_index(alpha, rows);
            let j = equiangular_index(beta, cols);
            snapshot[[i, j, face]]
        }
    }
}
