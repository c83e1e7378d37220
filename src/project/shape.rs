/* ************************************************************************ **
** This file is part of symtoep, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use ndarray::{Array2, ArrayBase, Data, Ix2};

/// Raised when an input does not have the shape an operation requires.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ShapeError {
    #[error("expected a square matrix, got shape {rows}x{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("expected a 2-dimensional matrix, got an array with {ndim} dimension(s)")]
    NotAMatrix { ndim: usize },

    #[error("row {row} has length {found}, but the first row has length {expected}")]
    Ragged { row: usize, expected: usize, found: usize },

    #[error("shape mismatch: {left:?} versus {right:?}")]
    Mismatched { left: (usize, usize), right: (usize, usize) },
}

/// Get `n` for an `n x n` matrix.
pub(crate) fn square_dim<S>(x: &ArrayBase<S, Ix2>) -> Result<usize, ShapeError>
where S: Data<Elem=f64>,
{
    let (rows, cols) = x.dim();
    if rows != cols {
        return Err(ShapeError::NotSquare { rows, cols });
    }
    Ok(rows)
}

/// Build a square matrix from a list of rows, as it would be read
/// from a JSON or YAML document.
///
/// An empty list produces a `0x0` matrix.
pub fn square_from_rows(rows: Vec<Vec<f64>>) -> Result<Array2<f64>, ShapeError> {
    let height = rows.len();
    let width = rows.first().map_or(0, |row| row.len());

    if let Some((row, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
        return Err(ShapeError::Ragged { row, expected: width, found: bad.len() });
    }
    if height != width {
        return Err(ShapeError::NotSquare { rows: height, cols: width });
    }

    Ok(Array2::from_shape_fn((height, width), |(i, j)| rows[i][j]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_become_row_major() {
        let m = square_from_rows(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(m[[0, 1]], 2.0);
        assert_eq!(m[[1, 0]], 3.0);
    }

    #[test]
    fn empty_rows() {
        let m = square_from_rows(vec![]).unwrap();
        assert_eq!(m.dim(), (0, 0));
    }

    #[test]
    fn ragged_rows() {
        let err = square_from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert_eq!(err, ShapeError::Ragged { row: 1, expected: 2, found: 1 });
    }

    #[test]
    fn wide_rows() {
        let err = square_from_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap_err();
        assert_eq!(err, ShapeError::NotSquare { rows: 2, cols: 3 });
    }

    #[test]
    fn square_dim_checks() {
        assert_eq!(square_dim(&Array2::<f64>::zeros((4, 4))), Ok(4));
        assert_eq!(
            square_dim(&Array2::<f64>::zeros((2, 3))),
            Err(ShapeError::NotSquare { rows: 2, cols: 3 }),
        );
    }
}
