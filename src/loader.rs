//! Reads the simulator's timestamps index and raw binary snapshots.
//!
//! Snapshot files are headerless sequences of little-endian IEEE-754
//! binary64 values in row-major order.

use {
    crate::{
        error::{Error, Result},
        field::FieldArray,
        grid::Field,
        naming::Naming,
        parameters::MissingFilePolicy,
    },
    byteorder::{ByteOrder, LittleEndian},
    log::{debug, info, warn},
    ndarray::Array2,
    std::{
        fs,
        io::{self, ErrorKind},
        path::{Path, PathBuf},
    },
};

/// Reads the whitespace separated timestamps (seconds) from an index file
pub fn load_timestamps<P: AsRef<Path>>(path: P) -> Result<Vec<i64>> {
    let path = path.as_ref();

    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::MissingIndexFile(path.to_owned()),
        _ => Error::io(path, e),
    })?;

    contents
        .split_whitespace()
        .enumerate()
        .map(|(i, token)| {
            parse_timestamp(token).ok_or_else(|| Error::MalformedIndex {
                path: path.to_owned(),
                position: i + 1,
                token: token.to_owned(),
            })
        })
        .collect()
}

/// Integers are taken as-is, decimals are truncated toward zero
fn parse_timestamp(token: &str) -> Option<i64> {
    token.parse::<i64>().ok().or_else(|| {
        token
            .parse::<f64>()
            .ok()
            .filter(|x| x.is_finite())
            .map(|x| x.trunc() as i64)
    })
}

/// Reads one tile of a field into a `rows` x `cols` array
pub fn load_tile_field<P: AsRef<Path>>(path: P, rows: usize, cols: usize) -> Result<Array2<f64>> {
    let path = path.as_ref();

    let bytes = fs::read(path).map_err(|e| not_found_or_io(path, e))?;
    check_length(path, rows, cols, bytes.len() as u64)?;

    let values = bytes
        .chunks_exact(8)
        .map(LittleEndian::read_f64)
        .collect::<Vec<f64>>();

    Array2::from_shape_vec((rows, cols), values).map_err(|e| Error::InvalidGrid(e.to_string()))
}

/// Checks that a tile file exists and has the right size without reading it
pub fn probe_tile_field<P: AsRef<Path>>(path: P, rows: usize, cols: usize) -> Result<()> {
    let path = path.as_ref();

    let metadata = fs::metadata(path).map_err(|e| not_found_or_io(path, e))?;
    check_length(path, rows, cols, metadata.len())
}

fn not_found_or_io(path: &Path, e: io::Error) -> Error {
    match e.kind() {
        ErrorKind::NotFound => Error::FileNotFound(path.to_owned()),
        _ => Error::io(path, e),
    }
}

fn check_length(path: &Path, rows: usize, cols: usize, actual: u64) -> Result<()> {
    let expected = (rows as u64) * (cols as u64) * 8;

    if actual != expected {
        return Err(Error::ShapeMismatch {
            path: path.to_owned(),
            rows,
            cols,
            expected,
            actual,
        });
    }

    Ok(())
}

/// Why a (timestamp, tile) slice was left unloaded
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    Missing,
    ShapeMismatch { expected: u64, actual: u64 },
}

/// A (timestamp, tile) slice left at zero because its snapshot file was
/// absent or had the wrong size
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSlice {
    pub timestamp_index: usize,
    pub timestamp: i64,
    pub tile: usize,
    pub path: PathBuf,
    pub reason: SkipReason,
}

#[derive(Debug)]
pub struct Assembled {
    pub field: Field,
    pub array: FieldArray,
    /// Number of snapshot files successfully read
    pub reads: usize,
    pub skipped: Vec<SkippedSlice>,
}

impl Assembled {
    /// Whether every tile at timestamp index `t` was loaded
    pub fn is_complete(&self, t: usize) -> bool {
        !self.skipped.iter().any(|s| s.timestamp_index == t)
    }
}

/// Loads every tile of `field` at every timestamp from `data_dir`.
///
/// Under `MissingFilePolicy::Skip` absent and wrong-sized files are recorded
/// in `skipped` and their slices stay zero; under `Abort` the first one is
/// returned as the error.
pub fn assemble<P: AsRef<Path>>(
    data_dir: P,
    naming: &Naming,
    field: Field,
    timestamps: &[i64],
    policy: MissingFilePolicy,
) -> Result<Assembled> {
    let data_dir = data_dir.as_ref();
    let grid = &naming.grid;
    let (rows, cols) = grid.tile_shape(field);

    let mut array = FieldArray::zeros(grid, field, timestamps.len());
    let mut reads = 0;
    let mut skipped = vec![];

    for (t, &timestamp) in timestamps.iter().enumerate() {
        for tile in 0..grid.tile_count() {
            let path = data_dir.join(naming.snapshot_file(field, timestamp, tile));

            let reason = match load_tile_field(&path, rows, cols) {
                Ok(data) => {
                    debug!("Read {}", path.display());
                    array.insert(tile, t, &data);
                    reads += 1;
                    continue;
                }
                Err(Error::FileNotFound(_)) if policy == MissingFilePolicy::Skip => {
                    warn!(
                        "Skipping {} at t = {}: {} not found",
                        field,
                        timestamp,
                        path.display()
                    );
                    SkipReason::Missing
                }
                Err(Error::ShapeMismatch {
                    expected, actual, ..
                }) if policy == MissingFilePolicy::Skip => {
                    warn!(
                        "Skipping {} at t = {}: {} holds {} bytes, expected {}",
                        field,
                        timestamp,
                        path.display(),
                        actual,
                        expected
                    );
                    SkipReason::ShapeMismatch { expected, actual }
                }
                Err(e) => return Err(e),
            };

            skipped.push(SkippedSlice {
                timestamp_index: t,
                timestamp,
                tile,
                path,
                reason,
            });
        }
    }

    info!(
        "Assembled {} from {} files ({} skipped), shape {:?}",
        field,
        reads,
        skipped.len(),
        array.shape()
    );

    Ok(Assembled {
        field,
        array,
        reads,
        skipped,
    })
}
