//! Matrix and result files.
//!
//! A matrix file is a JSON or YAML list of rows.

use crate::FailResult;

use failure::ResultExt;
use ndarray::{Array1, Array2};
use path_abs::{FileRead, FileWrite};
use std::io::Write;
use std::path::Path;
use symtoep_project::{square_from_rows, Variant};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MatrixFileType { Json, Yaml }

impl MatrixFileType {
    /// Anything without a YAML extension is assumed to be JSON.
    pub fn guess(path: &Path) -> MatrixFileType {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => MatrixFileType::Yaml,
            _ => MatrixFileType::Json,
        }
    }
}

pub fn read_matrix(path: &Path) -> FailResult<Array2<f64>> {
    let file = FileRead::read(path)?;
    let rows: Vec<Vec<f64>> = match MatrixFileType::guess(path) {
        MatrixFileType::Json => {
            serde_json::from_reader(file)
                .with_context(|_| format!("while parsing JSON matrix from '{}'", path.display()))?
        },
        MatrixFileType::Yaml => {
            serde_yaml::from_reader(file)
                .with_context(|_| format!("while parsing YAML matrix from '{}'", path.display()))?
        },
    };
    let matrix = square_from_rows(rows)
        .with_context(|_| format!("bad matrix in '{}'", path.display()))?;
    debug!("read {}x{} matrix from '{}'", matrix.nrows(), matrix.ncols(), path.display());
    Ok(matrix)
}

/// What `symtoep-project` writes.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct ProjectionOutput {
    pub variant: Variant,
    /// First column of the symmetric Toeplitz matrix.
    pub column: Vec<f64>,
    /// The full symmetric Toeplitz matrix, if requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Vec<Vec<f64>>>,
}

impl ProjectionOutput {
    pub fn new(variant: Variant, column: &Array1<f64>) -> Self
    { ProjectionOutput { variant, column: column.to_vec(), matrix: None } }

    pub fn with_matrix(mut self, matrix: &Array2<f64>) -> Self {
        self.matrix = Some(matrix.outer_iter().map(|row| row.to_vec()).collect());
        self
    }
}

/// Write pretty JSON to a file, or to stdout if there is no path.
pub fn write_json<T: serde::Serialize>(path: Option<&Path>, value: &T) -> FailResult<()> {
    match path {
        Some(path) => {
            let mut file = FileWrite::create(path)?;
            serde_json::to_writer_pretty(&mut file, value)?;
            writeln!(file)?;
            file.flush()?;
        },
        None => {
            let stdout = std::io::stdout();
            let mut stdout = stdout.lock();
            serde_json::to_writer_pretty(&mut stdout, value)?;
            writeln!(stdout)?;
        },
    }
    Ok(())
}
