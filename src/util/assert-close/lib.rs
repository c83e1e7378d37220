/* ************************************************************************ **
** This file is part of symtoep, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Approximate comparison of floating point data.
//!
//! `assert_close!` is meant for tests; [`check_close`] returns an error
//! instead of panicking, for code that wants to verify a result at runtime.

use ndarray::{ArrayBase, Data, Dimension};
use std::fmt;

pub const DEFAULT_NONZERO_TOL: f64 = 1e-9;

/// `assert_close!([rel=TOL,] [abs=TOL,] left, right [, fmt_args...])`
///
/// Defaults to `rel = DEFAULT_NONZERO_TOL` and `abs = 0`.
#[macro_export]
macro_rules! assert_close {
    ($($t:tt)*) => {assert_close_impl!{@parsing [$($t)*] [[@rel $crate::DEFAULT_NONZERO_TOL] [@abs 0.0]]}};
}

#[macro_export]
macro_rules! debug_assert_close {
    ($($t:tt)*) => {{
        #[cfg(debug_assertions)] {
            assert_close!{$($t)*}
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! assert_close_impl {
    (@parsing [rel=$tol:expr, $($rest:tt)*] [$($assignment:tt)*]) => {
        assert_close_impl!(@parsing [$($rest)*] [$($assignment)* [@rel $tol]]);
    };
    (@parsing [abs=$tol:expr, $($rest:tt)*] [$($assignment:tt)*]) => {
        assert_close_impl!(@parsing [$($rest)*] [$($assignment)* [@abs $tol]]);
    };
    (@parsing [$a:expr, $b:expr $(,)*] $assignments:tt) => {
        assert_close_impl!(@expand $assignments [@comp $a, $b] [@fmt "not nearly equal!"])
    };
    (@parsing [$a:expr, $b:expr, $($fmt:tt)+] $assignments:tt) => {
        assert_close_impl!(@expand $assignments [@comp $a, $b] [@fmt $($fmt)+])
    };
    (@expand [$($assignment:tt)*] [@comp $a:expr, $b:expr] [@fmt $($fmt:tt)+] ) => {
        #[allow(unused_mut)]
        #[allow(unused_assignments)]
        {
            let a = $a;
            let b = $b;

            let mut abs;
            let mut rel;
            $(
                assert_close_impl!{@stmt::assign [abs, rel] $assignment}
            )*

            if let Err(e) = $crate::CheckClose::check_close(&a, &b, $crate::Tolerances { abs, rel }) {
                panic!(
                "{} (tolerances: rel={}, abs={})\n left: {:?}\nright: {:?}\n{}",
                 format!($($fmt)*), rel, abs, a, b, e);
            }
        }
    };
    (@stmt::assign [$abs:ident, $rel:ident] [@abs $tol:expr]) => { $abs = $tol; };
    (@stmt::assign [$abs:ident, $rel:ident] [@rel $tol:expr]) => { $rel = $tol; };
}

/// Same test as Python's `math.isclose`.
#[doc(hidden)]
#[inline]
pub fn __is_close(a: f64, b: f64, Tolerances { abs, rel }: Tolerances) -> bool {
    assert!(rel >= 0.0);
    assert!(abs >= 0.0);

    // infinities of same sign
    if a == b { return true; }

    // infinities of opposite sign, avoiding infinite relative tolerance
    if a.is_infinite() || b.is_infinite() { return false; }

    // NaN falls through to here and fails
    (a - b).abs() <= abs.max(rel * a.abs()).max(rel * b.abs())
}

#[derive(Debug, Copy, Clone, PartialEq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Tolerances {
    pub abs: f64,
    pub rel: f64,
}

impl Tolerances {
    /// Use the same value for both tolerances.
    pub fn both(tol: f64) -> Self
    { Tolerances { abs: tol, rel: tol } }
}

impl Default for Tolerances {
    fn default() -> Self
    { Tolerances { abs: 0.0, rel: DEFAULT_NONZERO_TOL } }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckCloseError {
    #[error("failed at index {}:
  left: {:?}
 right: {:?}
   tol: {:?}", DisplayIndex(.index), .values.0, .values.1, .tol)]
    NotClose {
        /// Location of the first bad pair; empty for scalars.
        index: Vec<usize>,
        values: (f64, f64),
        tol: Tolerances,
    },

    #[error("shapes differ: {left:?} versus {right:?}")]
    ShapeMismatch {
        left: Vec<usize>,
        right: Vec<usize>,
    },
}

impl CheckCloseError {
    fn at_outer_index(mut self, i: usize) -> Self {
        match self {
            CheckCloseError::NotClose { ref mut index, .. } => index.insert(0, i),
            CheckCloseError::ShapeMismatch { .. } => {},
        }
        self
    }
}

struct DisplayIndex<'a>(&'a [usize]);
impl<'a> fmt::Display for DisplayIndex<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (n, i) in self.0.iter().enumerate() {
            if n > 0 { write!(f, ", ")?; }
            write!(f, "{}", i)?;
        }
        write!(f, "]")
    }
}

pub trait CheckClose<Rhs: ?Sized = Self> {
    /// Test that all values of self and other are close.
    fn check_close(&self, other: &Rhs, tol: Tolerances) -> Result<(), CheckCloseError>;
}

/// Function form of [`CheckClose::check_close`].
///
/// # Panics
///
/// Panics if either tolerance is negative or NaN.
pub fn check_close<A, B>(a: &A, b: &B, tol: Tolerances) -> Result<(), CheckCloseError>
where
    A: ?Sized + CheckClose<B>,
    B: ?Sized,
{ a.check_close(b, tol) }

impl CheckClose for f64 {
    #[inline]
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError> {
        match __is_close(*self, *other, tol) {
            true => Ok(()),
            false => Err(CheckCloseError::NotClose {
                index: vec![],
                values: (*self, *other),
                tol,
            }),
        }
    }
}

impl<'a, T: ?Sized + CheckClose> CheckClose for &'a T {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { CheckClose::check_close(*self, *other, tol) }
}

impl<T: CheckClose> CheckClose for [T] {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError> {
        if self.len() != other.len() {
            return Err(CheckCloseError::ShapeMismatch {
                left: vec![self.len()],
                right: vec![other.len()],
            });
        }
        for (i, (a, b)) in self.iter().zip(other).enumerate() {
            a.check_close(b, tol).map_err(|e| e.at_outer_index(i))?;
        }
        Ok(())
    }
}

impl<T: CheckClose> CheckClose for Vec<T> {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(&other[..], tol) }
}

impl<T: CheckClose, const N: usize> CheckClose for [T; N] {
    fn check_close(&self, other: &Self, tol: Tolerances) -> Result<(), CheckCloseError>
    { self[..].check_close(&other[..], tol) }
}

// Arrays are compared in logical (row-major) order, whatever their memory layout.
impl<S, T, D> CheckClose<ArrayBase<T, D>> for ArrayBase<S, D>
where
    S: Data<Elem=f64>,
    T: Data<Elem=f64>,
    D: Dimension,
{
    fn check_close(&self, other: &ArrayBase<T, D>, tol: Tolerances) -> Result<(), CheckCloseError> {
        if self.shape() != other.shape() {
            return Err(CheckCloseError::ShapeMismatch {
                left: self.shape().to_vec(),
                right: other.shape().to_vec(),
            });
        }
        for (flat, (&a, &b)) in self.iter().zip(other.iter()).enumerate() {
            if !__is_close(a, b, tol) {
                return Err(CheckCloseError::NotClose {
                    index: unravel_index(flat, self.shape()),
                    values: (a, b),
                    tol,
                });
            }
        }
        Ok(())
    }
}

fn unravel_index(mut flat: usize, shape: &[usize]) -> Vec<usize> {
    let mut index = vec![0; shape.len()];
    for (axis, &len) in shape.iter().enumerate().rev() {
        index[axis] = flat % len;
        flat /= len;
    }
    index
}
