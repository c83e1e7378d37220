/* ************************************************************************ **
** This file is part of symtoep, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::shape::{square_dim, ShapeError};

use ndarray::{s, Array1, ArrayBase, ArrayView1, ArrayViewD, Data, Ix2};
use std::fmt;
use std::str::FromStr;

/// Project a square matrix onto the symmetric Toeplitz matrices.
///
/// Returns the first column `y` of the nearest symmetric Toeplitz matrix
/// in the Frobenius norm; the full matrix is `T[i,j] = y[|i-j|]`
/// (see [`toeplitz`](fn@crate::toeplitz)).
///
/// This uses the reference form.  See [`Variant`] to pick the other one.
pub fn project<S>(x: &ArrayBase<S, Ix2>) -> Result<Array1<f64>, ShapeError>
where S: Data<Elem=f64>,
{ project_reference(x) }

/// Diagonal averaging written directly in terms of matrix indices.
///
/// ```text
/// y[0] = (1/n) * sum_i X[i,i]
/// y[k] = (1/(2(n-k))) * sum_j (X[k+j, j] + X[j, k+j])      for k = 1..n
/// ```
///
/// The two diagonals at offset `k` are pooled into a single average.
pub fn project_reference<S>(x: &ArrayBase<S, Ix2>) -> Result<Array1<f64>, ShapeError>
where S: Data<Elem=f64>,
{
    let n = square_dim(x)?;
    trace!("reference projection of {}x{} matrix", n, n);

    let mut y = Array1::zeros(n);
    if n == 0 {
        return Ok(y);
    }

    let mut r = 0.0;
    for i in 0..n {
        r += x[[i, i]];
    }
    y[0] = r / n as f64;

    for k in 1..n {
        let mut r = 0.0;
        for j in 0..n - k {
            r += x[[k + j, j]] + x[[j, k + j]];
        }
        y[k] = r / (2 * (n - k)) as f64;
    }
    Ok(y)
}

/// Diagonal averaging using views of each diagonal.
///
/// `y[k] = 0.5 * (mean(upper_k) + mean(lower_k))`, which agrees with
/// [`project_reference`] because both diagonals at offset `k` have length `n - k`.
pub fn project_vectorized<S>(x: &ArrayBase<S, Ix2>) -> Result<Array1<f64>, ShapeError>
where S: Data<Elem=f64>,
{
    let n = square_dim(x)?;
    trace!("vectorized projection of {}x{} matrix", n, n);

    let mut y = Array1::zeros(n);
    if n == 0 {
        return Ok(y);
    }

    y[0] = mean(x.diag());
    for k in 1..n {
        let upper = x.slice(s![.., k..]);
        let lower = x.slice(s![k.., ..]);
        let (upper, lower) = (upper.diag(), lower.diag());

        // this is what makes the average of the means a pooled average
        assert_eq!(upper.len(), n - k);
        assert_eq!(lower.len(), n - k);

        y[k] = 0.5 * (mean(upper) + mean(lower));
    }
    Ok(y)
}

/// Project an array of unknown dimensionality.
///
/// Anything other than a 2-dimensional array is rejected.
pub fn project_dyn(x: ArrayViewD<'_, f64>) -> Result<Array1<f64>, ShapeError> {
    let ndim = x.ndim();
    let x = x.into_dimensionality::<Ix2>()
        .map_err(|_| ShapeError::NotAMatrix { ndim })?;
    project(&x)
}

// never called on an empty diagonal
fn mean(d: ArrayView1<'_, f64>) -> f64
{ d.sum() / d.len() as f64 }

/// Which of the two equivalent forms of the projection to run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Reference,
    Vectorized,
}

impl Variant {
    pub const ALL: [Variant; 2] = [Variant::Reference, Variant::Vectorized];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Reference => "reference",
            Variant::Vectorized => "vectorized",
        }
    }

    pub fn project<S>(self, x: &ArrayBase<S, Ix2>) -> Result<Array1<f64>, ShapeError>
    where S: Data<Elem=f64>,
    {
        match self {
            Variant::Reference => project_reference(x),
            Variant::Vectorized => project_vectorized(x),
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    { f.write_str(self.name()) }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown projection variant '{0}' (expected 'reference' or 'vectorized')")]
pub struct ParseVariantError(pub String);

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Variant, ParseVariantError> {
        Variant::ALL.iter().cloned()
            .find(|v| v.name() == s)
            .ok_or_else(|| ParseVariantError(s.to_string()))
    }
}
