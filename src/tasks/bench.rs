/* ************************************************************************ **
** This file is part of symtoep, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

//! Times the projection variants against each other on random input,
//! checking along the way that they agree.

use crate::FailResult;
use crate::color::ColorByRange;
use crate::config::BenchSettings;
use crate::timing::{self, TimingLine};

use ansi_term::Colour;
use failure::ResultExt;
use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng, XorShiftRng};
use symtoep_assert_close::check_close;
use symtoep_project::{project_reference, Variant};

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct BenchRecord {
    pub size: usize,
    pub variant: Variant,
    /// Fastest of the timed calls.
    pub seconds: f64,
    /// Largest deviation from the reference form.
    pub max_abs_diff: f64,
}

#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct BenchReport {
    pub settings: BenchSettings,
    pub records: Vec<BenchRecord>,
}

/// Entries uniform in `[-1, 1)`.
pub fn random_matrix(rng: &mut impl Rng, n: usize) -> Array2<f64>
{ Array2::from_shape_fn((n, n), |_| rng.gen_range(-1.0, 1.0)) }

pub fn run_bench(settings: &BenchSettings) -> FailResult<BenchReport> {
    settings.validate()?;
    let mut rng = XorShiftRng::from_seed(settings.seed);

    let colors = ColorByRange::new(vec![
        (1e-1, Colour::Red.bold()),
        (1e-3, Colour::Yellow.normal()),
    ], Colour::Green.normal());

    let mut records = vec![];
    for &n in &settings.sizes {
        let x = random_matrix(&mut rng, n);
        let expected = project_reference(&x)?;
        trace!("generated {}x{} input", n, n);

        for &variant in &settings.variants {
            let (y, dt) = timing::best_of(settings.repeats, || variant.project(&x));
            let y = y?;

            check_close(&y, &expected, settings.tolerance)
                .with_context(|_| format!("{} form disagrees with reference form at n = {}", variant, n))?;

            let line = TimingLine {
                name: format!("{} (n = {})", variant, n),
                seconds: timing::seconds(dt),
            };
            info!("{}", colors.paint_as(&line.seconds, &line));

            records.push(BenchRecord {
                size: n,
                variant,
                seconds: line.seconds,
                max_abs_diff: max_abs_diff(&y, &expected),
            });
        }
    }
    Ok(BenchReport { settings: settings.clone(), records })
}

fn max_abs_diff(a: &Array1<f64>, b: &Array1<f64>) -> f64 {
    itertools::zip_eq(a, b)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_settings() -> BenchSettings {
        BenchSettings {
            sizes: vec![1, 2, 3, 10],
            repeats: 1,
            ..BenchSettings::default()
        }
    }

    #[test]
    fn one_record_per_size_and_variant() {
        let report = run_bench(&small_settings()).unwrap();
        assert_eq!(report.records.len(), 4 * 2);
        for record in &report.records {
            assert!(record.max_abs_diff <= 1e-8, "{:?}", record);
            assert!(record.seconds >= 0.0);
            if record.variant == Variant::Reference {
                assert_eq!(record.max_abs_diff, 0.0);
            }
        }
    }

    #[test]
    fn same_seed_same_input() {
        let seed = BenchSettings::default().seed;
        let a = random_matrix(&mut XorShiftRng::from_seed(seed), 5);
        let b = random_matrix(&mut XorShiftRng::from_seed(seed), 5);
        assert_eq!(a, b);
        assert!(a.iter().all(|&x| -1.0 <= x && x < 1.0));
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let settings = BenchSettings { repeats: 0, ..small_settings() };
        assert!(run_bench(&settings).is_err());
    }

    #[test]
    fn report_serializes() {
        let report = run_bench(&BenchSettings { sizes: vec![3], ..small_settings() }).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["records"][1]["variant"], "vectorized");
        assert!(json["records"][0].get("max-abs-diff").is_some());
    }
}
