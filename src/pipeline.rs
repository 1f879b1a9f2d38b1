//! Load every configured field for a test case and render each timestamp.

use {
    crate::{
        colormap::ContourBands,
        error::{Error, Result},
        grid::Field,
        loader::{assemble, load_timestamps, probe_tile_field},
        naming::index_file,
        parameters::Parameters,
        render::{render_field, Plot},
    },
    log::{info, warn},
    std::{fs, path::PathBuf},
};

/// Outcome of a render run
#[derive(Debug, Default, PartialEq)]
pub struct Summary {
    pub timestamps: Vec<i64>,
    pub rendered: Vec<PathBuf>,
    /// Field and timestamp pairs left unrendered because a file was missing
    /// or had the wrong size
    pub skipped: Vec<(Field, i64)>,
}

/// Loads and renders every (field, timestamp) pair described by `params`.
///
/// The configuration is validated before any file is touched. Timestamps
/// are loaded and rendered one at a time, so images already written stay
/// written whatever happens later. Under the `skip` policy a missing or
/// wrong-sized snapshot file only costs the affected (field, timestamp)
/// image.
pub fn run(params: &Parameters) -> Result<Summary> {
    params.validate()?;

    let naming = params.naming()?;
    let format = params.image_format()?;
    let scales = params.color_scales()?;
    let env = &params.environment;

    let timestamps = load_timestamps(env.data_directory.join(index_file(params.case.test_case)))?;
    info!(
        "Loaded {} timestamps for test case {}",
        timestamps.len(),
        params.case.test_case
    );

    fs::create_dir_all(&env.output_directory)
        .map_err(|e| Error::io(&env.output_directory, e))?;

    let mut summary = Summary {
        timestamps: timestamps.clone(),
        ..Summary::default()
    };

    for &timestamp in &timestamps {
        for &(field, scale) in &scales {
            let assembled = assemble(
                &env.data_directory,
                &naming,
                field,
                &[timestamp],
                params.case.missing_files,
            )?;

            if !assembled.is_complete(0) {
                warn!("Not plotting {} at t = {}: incomplete data", field, timestamp);
                summary.skipped.push((field, timestamp));
                continue;
            }

            let plot = Plot {
                topology: naming.grid.topology,
                projection: params.rendering.projection,
                title: naming.title(field, timestamp),
                bands: ContourBands::new(scale, params.rendering.colormap),
                dpi: params.rendering.dpi,
                format,
            };

            let stem = env
                .output_directory
                .join(naming.output_stem(field, timestamp));
            let path = render_field(&assembled.array.snapshot(0), &plot, stem)?;
            summary.rendered.push(path);
        }
    }

    info!(
        "Rendered {} images, skipped {}",
        summary.rendered.len(),
        summary.skipped.len()
    );

    Ok(summary)
}

/// Result of checking the data directory without rendering
#[derive(Debug, Default, PartialEq)]
pub struct Report {
    pub timestamps: usize,
    pub present: usize,
    pub missing: Vec<PathBuf>,
    /// Files whose size does not match the grid
    pub mismatched: Vec<PathBuf>,
}

impl Report {
    pub fn is_ok(&self) -> bool {
        self.missing.is_empty() && self.mismatched.is_empty()
    }
}

/// Validates `params` and checks that every expected snapshot file exists
/// with the right size
pub fn check(params: &Parameters) -> Result<Report> {
    params.validate()?;

    let naming = params.naming()?;
    let grid = naming.grid;
    let data_dir = &params.environment.data_directory;

    let timestamps = load_timestamps(data_dir.join(index_file(params.case.test_case)))?;
    let mut report = Report {
        timestamps: timestamps.len(),
        ..Report::default()
    };

    for &field in &params.case.fields {
        let (rows, cols) = grid.tile_shape(field);

        for &timestamp in &timestamps {
            for tile in 0..grid.tile_count() {
                let path = data_dir.join(naming.snapshot_file(field, timestamp, tile));

                match probe_tile_field(&path, rows, cols) {
                    Ok(()) => report.present += 1,
                    Err(Error::FileNotFound(path)) => {
                        warn!("Missing {}", path.display());
                        report.missing.push(path);
                    }
                    Err(e @ Error::ShapeMismatch { .. }) => {
                        warn!("{}", e);
                        report.mismatched.push(path);
                    }
                    Err(e) => return Err(e),
                }
            }
        }
    }

    info!(
        "{} snapshot files present, {} missing, {} with the wrong size",
        report.present,
        report.missing.len(),
        report.mismatched.len()
    );

    Ok(report)
}
