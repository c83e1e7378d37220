use ndarray::{Array1, Array2};
use rand::{Rng, SeedableRng, XorShiftRng};

/// A 3x3 example whose projection was worked out by hand.
pub(crate) fn scenario_matrix() -> Array2<f64> {
    ndarray::arr2(&[
        [1.0, 2.1, 2.0],
        [1.8, 1.2, 1.9],
        [2.0, 2.2, 0.8],
    ])
}

pub(crate) fn seeded_rng(salt: u32) -> XorShiftRng
{ XorShiftRng::from_seed([0x5eed_0001, 0x5eed_0002, 0x5eed_0003, salt | 1]) }

pub(crate) fn random_matrix(rng: &mut XorShiftRng, n: usize) -> Array2<f64>
{ Array2::from_shape_fn((n, n), |_| rng.gen_range(-100.0, 100.0)) }

pub(crate) fn random_vector(rng: &mut XorShiftRng, n: usize) -> Array1<f64>
{ Array1::from_shape_fn(n, |_| rng.gen_range(-100.0, 100.0)) }

pub(crate) fn to_rows(m: &Array2<f64>) -> Vec<Vec<f64>>
{ m.outer_iter().map(|row| row.to_vec()).collect() }

pub(crate) fn partial_max<T: PartialOrd>(it: impl IntoIterator<Item=T>) -> Option<T> {
    let mut it = it.into_iter();
    let first = it.next()?;
    Some(it.fold(first, |acc, b| {
        if acc < b {
            b
        } else {
            acc
        }
    }))
}
