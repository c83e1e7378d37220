/* ************************************************************************ **
** This file is part of symtoep, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Orthogonal projection of square matrices onto the subspace of
//! symmetric Toeplitz matrices, under the Frobenius inner product.
//!
//! The nearest symmetric Toeplitz matrix has a closed form: each diagonal
//! offset `k` takes the average of every entry on the two diagonals at that
//! offset.  Two implementations are provided, [`project_reference`] and
//! [`project_vectorized`], which must agree to within rounding.
//!
//! Everything here is a pure function of its input.

#[macro_use] extern crate log;
#[cfg(test)]
#[macro_use] extern crate symtoep_assert_close;

pub use crate::shape::{ShapeError, square_from_rows};
mod shape;

pub use crate::project::{project, project_reference, project_vectorized, project_dyn};
pub use crate::project::{Variant, ParseVariantError};
mod project;

pub use crate::toeplitz::{toeplitz, is_symmetric_toeplitz, frobenius_distance};
mod toeplitz;
