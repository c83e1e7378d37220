/* ************************************************************************ **
** This file is part of symtoep, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::FailResult;
use crate::bench::run_bench;
use crate::config::{BenchSettings, YamlRead};
use crate::logging::GlobalLogger;
use crate::matrix_io::{read_matrix, write_json, ProjectionOutput};

use clap::{App, Arg, ArgMatches};
use path_abs::FileRead;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use symtoep_assert_close::{check_close, Tolerances};
use symtoep_project::{toeplitz, Variant};

/// Tolerance used by `--check`.
pub const CHECK_TOL: f64 = 1e-8;

fn wrap_result_main<F>(main: F)
where F: FnOnce() -> FailResult<()>,
{
    main().unwrap_or_else(|e| {
        // the logger may not have been set up yet
        if log::max_level() == log::LevelFilter::Off {
            for cause in e.iter_chain() {
                eprintln!("ERROR: {}", cause);
            }
            std::process::exit(1);
        }

        for cause in e.iter_chain() {
            error!("{}", cause);
        }
        if std::env::var_os("RUST_BACKTRACE") == Some(OsStr::new("1").to_owned()) {
            error!("{}", e.backtrace());
        }
        std::process::exit(1);
    });
}

fn logging_args<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    vec![
        Arg::with_name("verbose")
            .short("v").long("verbose").multiple(true)
            .help("show trace output from symtoep"),
        Arg::with_name("log")
            .long("log").takes_value(true).value_name("LOGFILE")
            .help("also write the log to this file"),
    ]
}

fn init_logger(m: &ArgMatches<'_>) -> FailResult<()> {
    let mut logger = GlobalLogger::default();
    logger.verbosity(m.occurrences_of("verbose") as i32);
    if let Some(path) = m.value_of_os("log") {
        logger.path(path);
    }
    logger.apply()
}

/// Arguments of `symtoep-project`, after parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectArgs {
    pub input: PathBuf,
    pub variant: Variant,
    /// Run both variants and fail unless they agree.
    pub check: bool,
    /// Include the full Toeplitz matrix in the output.
    pub full: bool,
}

pub fn run_project(args: &ProjectArgs) -> FailResult<ProjectionOutput> {
    let x = read_matrix(&args.input)?;
    let y = args.variant.project(&x)?;

    if args.check {
        for &other in Variant::ALL.iter().filter(|&&v| v != args.variant) {
            let z = other.project(&x)?;
            if let Err(e) = check_close(&y, &z, Tolerances::both(CHECK_TOL)) {
                bail!("{} and {} forms disagree: {}", args.variant, other, e);
            }
            debug!("{} form agrees with {} form", other, args.variant);
        }
    }

    let output = ProjectionOutput::new(args.variant, &y);
    Ok(match args.full {
        true => output.with_matrix(&toeplitz(&y)),
        false => output,
    })
}

// %% binary: symtoep-project %%
pub fn project() {
    wrap_result_main(|| {
        let app = App::new("symtoep-project")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Projects a square matrix onto the symmetric Toeplitz matrices, \
                    printing the first column of the result.")
            .args(&[
                Arg::with_name("input")
                    .required(true).value_name("MATRIX")
                    .help("JSON or YAML file holding a list of rows"),
                Arg::with_name("variant")
                    .long("variant").takes_value(true).value_name("VARIANT")
                    .possible_values(&["reference", "vectorized"])
                    .default_value("reference")
                    .help("which form of the projection to run"),
                Arg::with_name("check")
                    .long("check")
                    .help("also run the other form and fail if the results disagree"),
                Arg::with_name("full")
                    .long("full")
                    .help("include the full symmetric Toeplitz matrix in the output"),
                Arg::with_name("output")
                    .short("o").long("output").takes_value(true).value_name("OUTFILE")
                    .help("write JSON here instead of stdout"),
            ])
            .args(&logging_args());
        let matches = app.get_matches();
        init_logger(&matches)?;

        let args = ProjectArgs {
            input: PathBuf::from(expect_value_of_os(&matches, "input")?),
            variant: matches.value_of("variant").unwrap_or("reference").parse()?,
            check: matches.is_present("check"),
            full: matches.is_present("full"),
        };
        let output = run_project(&args)?;
        write_json(matches.value_of_os("output").map(Path::new), &output)
    });
}

// %% binary: symtoep-bench %%
pub fn bench() {
    wrap_result_main(|| {
        let app = App::new("symtoep-bench")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Times the two forms of the projection on random matrices.")
            .args(&[
                Arg::with_name("config")
                    .short("c").long("config").takes_value(true).value_name("CONFIG")
                    .help("YAML settings; every key is optional"),
                Arg::with_name("output")
                    .short("o").long("output").takes_value(true).value_name("OUTFILE")
                    .help("write a JSON report here"),
            ])
            .args(&logging_args());
        let matches = app.get_matches();
        init_logger(&matches)?;

        let settings = match matches.value_of_os("config") {
            Some(path) => BenchSettings::from_reader(FileRead::read(path)?)?,
            None => BenchSettings::default(),
        };
        let report = run_bench(&settings)?;
        info!("timed {} cases", report.records.len());

        if let Some(path) = matches.value_of_os("output") {
            write_json(Some(Path::new(path)), &report)?;
        }
        Ok(())
    });
}

fn expect_value_of_os<'a>(m: &'a ArgMatches<'_>, name: &str) -> FailResult<&'a OsStr> {
    match m.value_of_os(name) {
        Some(value) => Ok(value),
        None => bail!("missing required argument '{}'", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    fn write_matrix(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn project_with_check() {
        let dir = TempDir::new("symtoep").unwrap();
        let input = write_matrix(&dir, "x.json", "[[1.0, 2.1, 2.0], [1.8, 1.2, 1.9], [2.0, 2.2, 0.8]]");

        for &variant in &Variant::ALL {
            let args = ProjectArgs { input: input.clone(), variant, check: true, full: true };
            let output = run_project(&args).unwrap();
            assert_eq!(output.variant, variant);
            assert_close!(abs=1e-6, rel=1e-6, output.column.clone(), vec![1.0, 2.0, 2.0]);

            let matrix = output.matrix.unwrap();
            assert_eq!(matrix.len(), 3);
            assert_eq!(matrix[2][0], output.column[2]);
            assert_eq!(matrix[0][2], output.column[2]);
        }
    }

    #[test]
    fn project_without_full() {
        let dir = TempDir::new("symtoep").unwrap();
        let input = write_matrix(&dir, "x.yaml", "- [4.0]\n");
        let args = ProjectArgs { input, variant: Variant::Reference, check: false, full: false };
        let output = run_project(&args).unwrap();
        assert_eq!(output.column, vec![4.0]);
        assert_eq!(output.matrix, None);
    }

    #[test]
    fn project_non_square() {
        let dir = TempDir::new("symtoep").unwrap();
        let input = write_matrix(&dir, "x.json", "[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]");
        let args = ProjectArgs { input, variant: Variant::Vectorized, check: true, full: false };
        assert!(run_project(&args).is_err());
    }

    #[test]
    fn project_missing_file() {
        let args = ProjectArgs {
            input: PathBuf::from("/nonexistent/symtoep/matrix.json"),
            variant: Variant::Reference,
            check: false,
            full: false,
        };
        assert!(run_project(&args).is_err());
    }
}
