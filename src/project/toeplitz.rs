/* ************************************************************************ **
** This file is part of symtoep, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::shape::ShapeError;

use ndarray::{Array2, ArrayBase, Data, Ix1, Ix2, Zip};

/// Build the symmetric Toeplitz matrix whose first column is `y`.
///
/// `T[i,j] = y[|i-j|]`
pub fn toeplitz<S>(y: &ArrayBase<S, Ix1>) -> Array2<f64>
where S: Data<Elem=f64>,
{
    let n = y.len();
    Array2::from_shape_fn((n, n), |(i, j)| {
        let k = if i > j { i - j } else { j - i };
        y[k]
    })
}

/// Test whether every entry of `x` is within `tol` of the value in the
/// first column on the same diagonal.
///
/// Non-square matrices are never symmetric Toeplitz.
pub fn is_symmetric_toeplitz<S>(x: &ArrayBase<S, Ix2>, tol: f64) -> bool
where S: Data<Elem=f64>,
{
    let (rows, cols) = x.dim();
    if rows != cols {
        return false;
    }
    x.indexed_iter().all(|((i, j), &value)| {
        let k = if i > j { i - j } else { j - i };
        (value - x[[k, 0]]).abs() <= tol
    })
}

/// Frobenius norm of `a - b`.
pub fn frobenius_distance<S, T>(a: &ArrayBase<S, Ix2>, b: &ArrayBase<T, Ix2>) -> Result<f64, ShapeError>
where
    S: Data<Elem=f64>,
    T: Data<Elem=f64>,
{
    if a.dim() != b.dim() {
        return Err(ShapeError::Mismatched { left: a.dim(), right: b.dim() });
    }

    let mut acc = 0.0;
    Zip::from(a).and(b).for_each(|&a, &b| acc += (a - b) * (a - b));
    Ok(acc.sqrt())
}
