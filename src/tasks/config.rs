/* ************************************************************************ **
** This file is part of symtoep, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

// NOTE: Please make sure to use the YamlRead trait when deserializing these types,
//       so that typos in config files get reported.

use crate::FailResult;

use std::io::Read;
use symtoep_assert_close::Tolerances;
use symtoep_project::Variant;

/// Alternative to `serde_yaml::from_reader` that warns about unused keys.
pub trait YamlRead: for<'de> serde::Deserialize<'de> {
    fn from_reader(mut r: impl Read) -> Result<Self, serde_yaml::Error>
    { YamlRead::from_dyn_reader(&mut r) }

    fn from_dyn_reader(r: &mut dyn Read) -> Result<Self, serde_yaml::Error> {
        // serde_ignored needs a Deserializer, and serde_yaml only gives us
        // one that owns a Value.
        let value: serde_yaml::Value = serde_yaml::from_reader(r)?;
        Self::from_value(value)
    }

    fn from_value(value: serde_yaml::Value) -> Result<Self, serde_yaml::Error> {
        Self::from_value_with(
            value,
            |path| warn!("Unused config item (possible typo?): {}", path),
        )
    }

    /// Deserialize, handing the dotted path of each unused key to `on_unused`.
    fn from_value_with(
        value: serde_yaml::Value,
        mut on_unused: impl FnMut(String),
    ) -> Result<Self, serde_yaml::Error> {
        serde_ignored::deserialize(value, |path| on_unused(path.to_string()))
    }
}

impl YamlRead for BenchSettings {}

/// Settings for `symtoep-bench`.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct BenchSettings {
    /// Matrix dimensions to time.
    #[serde(default = "defaults::sizes")]
    pub sizes: Vec<usize>,

    /// Number of timed calls per size and variant, after one untimed warm-up.
    /// The fastest is reported.
    #[serde(default = "defaults::repeats")]
    pub repeats: u32,

    /// Seed for the random input matrices.  Must not be all zeros.
    #[serde(default = "defaults::seed")]
    pub seed: [u32; 4],

    #[serde(default = "defaults::variants")]
    pub variants: Vec<Variant>,

    /// Tolerance for agreement between the variants.
    #[serde(default = "defaults::tolerance")]
    pub tolerance: Tolerances,
}

mod defaults {
    use super::*;

    pub(super) fn sizes() -> Vec<usize> { vec![1, 2, 3, 10, 100, 500] }
    pub(super) fn repeats() -> u32 { 3 }
    pub(super) fn seed() -> [u32; 4] { [0x193a_6754, 0xa8a7_d469, 0x9783_0e05, 0x113b_a7bb] }
    pub(super) fn variants() -> Vec<Variant> { Variant::ALL.to_vec() }
    pub(super) fn tolerance() -> Tolerances { Tolerances::both(1e-8) }
}

impl Default for BenchSettings {
    fn default() -> Self {
        BenchSettings {
            sizes: defaults::sizes(),
            repeats: defaults::repeats(),
            seed: defaults::seed(),
            variants: defaults::variants(),
            tolerance: defaults::tolerance(),
        }
    }
}

impl BenchSettings {
    /// Catch things that deserialize fine but make no sense.
    pub fn validate(&self) -> FailResult<()> {
        if self.sizes.is_empty() {
            bail!("'sizes' must list at least one matrix size");
        }
        if self.variants.is_empty() {
            bail!("'variants' must list at least one variant");
        }
        if self.repeats == 0 {
            bail!("'repeats' must be at least 1");
        }
        if self.seed.iter().all(|&x| x == 0) {
            bail!("'seed' must not be all zeros");
        }
        let Tolerances { abs, rel } = self.tolerance;
        if !(abs >= 0.0 && rel >= 0.0) {
            bail!("tolerances must be non-negative (got abs={}, rel={})", abs, rel);
        }
        Ok(())
    }
}
