/* ************************************************************************ **
** This file is part of symtoep, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! High-level code behind the symtoep binaries.
//!
//! Nothing in here is needed to compute a projection; see `symtoep-project` for that.

#[macro_use] extern crate log;
#[macro_use] extern crate serde_derive;
#[macro_use] extern crate failure;
#[cfg(test)]
#[macro_use] extern crate symtoep_assert_close;

pub type FailResult<T> = Result<T, failure::Error>;

mod color;
pub mod logging;
pub mod config;
pub mod matrix_io;
pub mod timing;
pub mod bench;
pub mod entry_points;

pub use crate::config::{BenchSettings, YamlRead};
pub use crate::bench::{run_bench, BenchReport, BenchRecord};
