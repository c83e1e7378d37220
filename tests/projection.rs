#[macro_use] extern crate symtoep_assert_close;
#[macro_use] extern crate pretty_assertions;

use ndarray::{Array1, Array2};
use symtoep_project::{
    project, project_reference, project_vectorized, toeplitz,
    is_symmetric_toeplitz, frobenius_distance, ShapeError, Variant,
};

mod shared;
use self::shared::util::{self, partial_max};

#[test]
fn variants_agree_on_random_input() {
    let _ = env_logger::try_init();
    let mut rng = util::seeded_rng(1);
    for &n in &[1, 2, 3, 10, 100] {
        for _ in 0..5 {
            let x = util::random_matrix(&mut rng, n);
            let a = project_reference(&x).unwrap();
            let b = project_vectorized(&x).unwrap();
            assert_close!(abs=1e-8, rel=1e-8, a.to_vec(), b.to_vec(), "n = {}", n);
        }
    }
}

#[test]
fn toeplitz_input_is_a_fixed_point() {
    let mut rng = util::seeded_rng(2);
    for &n in &[1, 2, 5, 17] {
        let column = util::random_vector(&mut rng, n);
        let t = toeplitz(&column);
        for &variant in &Variant::ALL {
            let y = variant.project(&t).unwrap();
            assert_close!(abs=1e-10, rel=1e-10, y.to_vec(), column.to_vec());
        }
    }
}

#[test]
fn scale_linearity() {
    let mut rng = util::seeded_rng(3);
    let x = util::random_matrix(&mut rng, 12);
    for &c in &[0.0, -1.0, 0.25, 3.5e3] {
        let scaled = project(&(&x * c)).unwrap();
        let expected = project(&x).unwrap() * c;
        assert_close!(abs=1e-6, rel=1e-10, scaled.to_vec(), expected.to_vec(), "c = {}", c);
    }
}

#[test]
fn additivity() {
    let mut rng = util::seeded_rng(4);
    for &n in &[1, 4, 30] {
        let x = util::random_matrix(&mut rng, n);
        let y = util::random_matrix(&mut rng, n);
        let sum_of_projections = project(&x).unwrap() + project(&y).unwrap();
        let projection_of_sum = project(&(&x + &y)).unwrap();
        assert_close!(abs=1e-10, rel=1e-12, sum_of_projections.to_vec(), projection_of_sum.to_vec());
    }
}

#[test]
fn projection_is_idempotent() {
    let mut rng = util::seeded_rng(5);
    let x = util::random_matrix(&mut rng, 9);
    let once = toeplitz(&project(&x).unwrap());
    assert!(is_symmetric_toeplitz(&once, 0.0));
    let twice = toeplitz(&project(&once).unwrap());
    assert_close!(abs=1e-10, once.view(), twice.view());
}

#[test]
fn residual_is_orthogonal_to_toeplitz_matrices() {
    // <X - P(X), T> = 0 for every symmetric Toeplitz T
    let mut rng = util::seeded_rng(6);
    let n = 8;
    let x = util::random_matrix(&mut rng, n);
    let residual = &x - &toeplitz(&project(&x).unwrap());
    for k in 0..n {
        let mut e = Array1::<f64>::zeros(n);
        e[k] = 1.0;
        let inner = (&residual * &toeplitz(&e)).sum();
        assert_close!(abs=1e-9, inner, 0.0, "k = {}", k);
    }
}

#[test]
fn nearest_among_random_toeplitz_matrices() {
    let mut rng = util::seeded_rng(7);
    let x = util::random_matrix(&mut rng, 6);
    let best = frobenius_distance(&x, &toeplitz(&project(&x).unwrap())).unwrap();

    let others = (0..50).map(|_| {
        let t = toeplitz(&util::random_vector(&mut rng, 6));
        frobenius_distance(&x, &t).unwrap()
    }).collect::<Vec<_>>();

    let worst_margin = partial_max(others.iter().map(|&d| best - d)).unwrap();
    assert!(worst_margin < 0.0);
}

#[test]
fn scenario() {
    let x = util::scenario_matrix();
    let expected = Array1::from(vec![1.0, 2.0, 2.0]);
    for &variant in &Variant::ALL {
        let y = variant.project(&x).unwrap();
        assert_close!(abs=1e-6, rel=1e-6, y.to_vec(), expected.to_vec());

        // rounding to the tolerance makes the reconstructions identical
        let rounded = y.mapv(|v| (v * 1e6).round() / 1e6);
        assert_eq!(util::to_rows(&toeplitz(&rounded)), util::to_rows(&toeplitz(&expected)));
    }
}

#[test]
fn non_square_is_rejected() {
    let x = Array2::<f64>::zeros((2, 3));
    for &variant in &Variant::ALL {
        assert_eq!(variant.project(&x), Err(ShapeError::NotSquare { rows: 2, cols: 3 }));
    }
    let err = project(&x).unwrap_err();
    assert!(err.to_string().contains("2x3"), "{}", err);
}

#[test]
fn concurrent_calls() {
    let mut rng = util::seeded_rng(8);
    let inputs = (0..8).map(|i| util::random_matrix(&mut rng, 10 + i)).collect::<Vec<_>>();
    let serial = inputs.iter().map(|x| project(x).unwrap()).collect::<Vec<_>>();

    let handles = inputs.into_iter().map(|x| {
        std::thread::spawn(move || project_vectorized(&x).unwrap())
    }).collect::<Vec<_>>();

    for (handle, expected) in handles.into_iter().zip(serial) {
        let y = handle.join().unwrap();
        assert_close!(abs=1e-8, rel=1e-8, y.to_vec(), expected.to_vec());
    }
}
