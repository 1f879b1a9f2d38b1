use {
    crate::grid::{Field, GridDescriptor, Topology},
    ndarray::{s, Array2, Array3, Array4, ArrayView2, ArrayView3},
};

/// One physical quantity over every tile and timestamp.
///
/// Cubed-sphere fields are indexed `(row, col, tile, time)`, lat-lon fields
/// `(row, col, time)`. Slices not yet loaded are zero.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldArray {
    Tiled(Array4<f64>),
    Single(Array3<f64>),
}

impl FieldArray {
    pub fn zeros(grid: &GridDescriptor, field: Field, timestamps: usize) -> Self {
        let (rows, cols) = grid.tile_shape(field);

        match grid.topology {
            Topology::CubedSphere => FieldArray::Tiled(Array4::zeros((
                rows,
                cols,
                grid.tile_count(),
                timestamps,
            ))),
            Topology::LatLon => FieldArray::Single(Array3::zeros((rows, cols, timestamps))),
        }
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            FieldArray::Tiled(a) => a.shape(),
            FieldArray::Single(a) => a.shape(),
        }
    }

    pub fn tile_count(&self) -> usize {
        match self {
            FieldArray::Tiled(a) => a.shape()[2],
            FieldArray::Single(_) => 1,
        }
    }

    pub fn timestamp_count(&self) -> usize {
        let shape = self.shape();
        shape[shape.len() - 1]
    }

    /// All tiles at timestamp index `t`, stacked as `(row, col, tile)`
    pub fn snapshot(&self, t: usize) -> ArrayView3<f64> {
        match self {
            FieldArray::Tiled(a) => a.slice(s![.., .., .., t]),
            FieldArray::Single(a) => a.slice(s![.., .., t..t + 1]),
        }
    }

    pub fn tile(&self, tile: usize, t: usize) -> ArrayView2<f64> {
        match self {
            FieldArray::Tiled(a) => a.slice(s![.., .., tile, t]),
            FieldArray::Single(a) => {
                debug_assert_eq!(tile, 0);
                a.slice(s![.., .., t])
            }
        }
    }

    pub(crate) fn insert(&mut self, tile: usize, t: usize, data: &Array2<f64>) {
        match self {
            FieldArray::Tiled(a) => a.slice_mut(s![.., .., tile, t]).assign(data),
            FieldArray::Single(a) => a.slice_mut(s![.., .., t]).assign(data),
        }
    }
}
