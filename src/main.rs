#[macro_use]
extern crate clap;

use {
    anyhow::{bail, Result},
    log::{error, info, warn},
    simplelog::{Config as LogConfig, LevelFilter, TermLogger, TerminalMode},
    std::fs::File,
    swe_plot::{
        parameters::Parameters,
        pipeline::{check, run},
    },
};

#[quit::main]
fn main() {
    let matches = clap_app!(swe_plot =>
        (version: crate_version!())
        (about: "Plots shallow-water snapshots on cubed-sphere and latitude-longitude grids.")
        (@arg PARAMETERS: -p --parameters +takes_value "Path to file containing plotting parameters, built-in defaults are used if omitted.")
        (@subcommand render =>
            (about: "Renders a filled contour image for every field at every timestamp.")
        )
        (@subcommand check =>
            (about: "Checks that every snapshot file listed by the timestamp index exists with the right size.")
        )
    )
    .get_matches();

    TermLogger::init(
        LevelFilter::Debug,
        LogConfig::default(),
        TerminalMode::Mixed,
    )
    .unwrap_or_else(|e| {
        eprintln!("Failed to initialize logger: {}", e);
        quit::with_code(1);
    });

    let params = match matches.value_of("PARAMETERS") {
        Some(path) => {
            let file = File::open(path).unwrap_or_else(|e| {
                error!("Failed to open {}: \"{}\"", path, e);
                quit::with_code(1);
            });

            let params = serde_yaml::from_reader::<_, Parameters>(file).unwrap_or_else(|e| {
                error!("Failed to parse parameters from {}: \"{}\"", path, e);
                quit::with_code(1);
            });

            info!(
                "Successfully loaded plotting parameters from \"{}\": \n{:#?}",
                path, params
            );

            params
        }
        None => {
            info!("No parameters file supplied, using defaults");
            Parameters::default()
        }
    };

    run_subcommand(matches.subcommand_name(), &params).unwrap_or_else(|e| {
        error!("Error: \"{}\"", e);
        quit::with_code(1);
    });
}

fn run_subcommand(subcmd: Option<&str>, params: &Parameters) -> Result<()> {
    let subcmd = match subcmd {
        Some(s) => s,
        None => bail!("No subcommand selected"),
    };

    info!("Starting {}", subcmd);

    match subcmd {
        "render" => {
            let summary = run(params)?;

            for (field, timestamp) in &summary.skipped {
                warn!("Skipped {} at t = {}", field, timestamp);
            }
        }
        "check" => {
            let report = check(params)?;

            if !report.is_ok() {
                bail!(
                    "{} snapshot files missing, {} with the wrong size",
                    report.missing.len(),
                    report.mismatched.len()
                );
            }
        }
        _ => {
            // Should be unreachable due to clap catching this error
            bail!("Unrecognized subcommand");
        }
    }

    info!("Finished {}", subcmd);

    Ok(())
}
