use approx::assert_abs_diff_eq;
use mcmckit::{rhat, DiagnosticError, LogitTransform, Rhat, Transform};
use ndarray::{array, Array, Array1, Array2, Array3, Array4, Axis};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

fn normal_chains(shape: (usize, usize, usize), seed: u64) -> Array3<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    Array::from_shape_simple_fn(shape, || normal.sample(&mut rng))
}

#[test]
fn iid_chains_converge_to_one() {
    for seed in 0..5 {
        let chains = normal_chains((4, 4000, 1), seed).index_axis_move(Axis(2), 0);
        let r = rhat(&chains, 0).unwrap().as_scalar().unwrap();
        assert!((r - 1.0).abs() < 0.05, "seed {seed}: R hat {r}");
    }
}

#[test]
fn shifted_chains_do_not_converge() {
    let mut chains = normal_chains((2, 1000, 1), 42).index_axis_move(Axis(2), 0);
    chains.row_mut(1).mapv_inplace(|x| x + 3.0);
    let r = rhat(&chains, 0).unwrap().as_scalar().unwrap();
    assert!(r > 1.1, "R hat {r}");
}

#[test]
fn per_parameter_matches_slices() {
    let chains = normal_chains((4, 1000, 3), 5);
    let r = rhat(&chains, 0).unwrap();
    let r = r.as_array().unwrap();
    assert_eq!(r.len(), 3);
    for (p, value) in r.iter().enumerate() {
        let slice = chains.index_axis(Axis(2), p);
        let expected = rhat(&slice, 0).unwrap().as_scalar().unwrap();
        assert_abs_diff_eq!(*value, expected, epsilon = 1e-12);
    }
}

#[test]
fn input_is_not_modified() {
    let chains = normal_chains((3, 101, 2), 9);
    let before = chains.clone();
    rhat(&chains, 11).unwrap();
    assert_eq!(chains, before);
    // the caller keeps using its ensemble afterwards
    assert!(rhat(&chains, 0).is_ok());
}

#[test]
fn warmup_of_whole_chain_fails() {
    let chains = Array2::<f64>::zeros((4, 100));
    let err = rhat(&chains, 100).unwrap_err();
    assert!(err.is_value_error());
    assert_eq!(err, DiagnosticError::InsufficientSamples { n_samples: 0 });
    assert!(rhat(&chains, 101).unwrap_err().is_value_error());
}

#[test]
fn wrong_dimensions_fail() {
    let one = Array1::<f64>::zeros(100);
    assert_eq!(rhat(&one, 0).unwrap_err(), DiagnosticError::Shape { ndim: 1 });
    let four = Array4::<f64>::zeros((4, 100, 2, 2));
    assert_eq!(rhat(&four, 0).unwrap_err(), DiagnosticError::Shape { ndim: 4 });
    assert!(rhat(&four.into_dyn(), 0).unwrap_err().is_shape_error());
}

#[test]
fn too_few_samples_after_split_fails() {
    let chains = Array2::<f64>::zeros((2, 3));
    let err = rhat(&chains, 0).unwrap_err();
    assert!(err.is_value_error());
}

#[test]
fn constant_chains_give_nan() {
    let chains = Array2::<f64>::ones((4, 100));
    match rhat(&chains, 0).unwrap() {
        Rhat::Scalar(r) => assert!(r.is_nan()),
        other => panic!("expected a scalar, got {other:?}"),
    }
}

#[test]
fn constant_chains_at_different_levels_give_infinity() {
    let chains = array![[1.0, 1.0, 1.0, 1.0], [2.0, 2.0, 2.0, 2.0]];
    assert_eq!(rhat(&chains, 0).unwrap(), Rhat::Scalar(f64::INFINITY));
}

#[test]
fn chains_can_be_shared_between_threads() {
    let chains = normal_chains((4, 500, 2), 13);
    let expected = rhat(&chains, 50).unwrap();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| rhat(&chains, 50).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn logit_round_trip_and_jacobian() {
    let t = LogitTransform::new(1);
    assert_eq!(t.n_parameters(), 1);
    for i in 1..100 {
        let p = i as f64 / 100.0;
        assert_abs_diff_eq!(t.to_model(&t.to_search(&[p]))[0], p, epsilon = 1e-9);
    }
    for p in [0.1f64, 0.5, 0.9] {
        let closed_form = -(p * (1.0 - p)).ln();
        assert_abs_diff_eq!(t.log_jacobian(&[p]).unwrap(), closed_form, epsilon = 1e-12);
    }
}
