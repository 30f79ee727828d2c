// unit tests

use super::*;
use approx::{assert_abs_diff_eq, assert_relative_eq};
use std::cell::Cell;
use std::f64::consts::PI;

fn exp_decay(p: Complex64) -> Complex64 {
  (p + 1.0).inv()
}

fn options(degree: QuadratureDegree) -> InversionOptions {
  InversionOptions::default().with_degree(degree)
}

// coefficient tables

#[test]
fn tables_hold_half_the_degree() {
  for degree in QuadratureDegree::ALL {
    assert_eq!(degree.pairs().len(), degree.nodes() / 2);
  }
}

#[test]
fn tables_start_at_the_origin_with_unit_weight() {
  for degree in QuadratureDegree::ALL {
    let pairs = degree.pairs();
    assert_eq!(pairs[0].alpha, 1.0);
    assert_abs_diff_eq!(pairs[0].lambda, 0.0, epsilon = 1e-15);

    // nodes are close to multiples of 2 pi near the origin, then spread out
    assert_relative_eq!(pairs[1].lambda, 2.0 * PI, max_relative = 1e-12);
    for window in pairs.windows(2) {
      assert!(window[0].lambda < window[1].lambda);
      assert!(window[0].alpha <= window[1].alpha);
    }
  }
}

#[test]
fn tables_hold_published_literals() {
  let sixteen = QuadratureDegree::Sixteen.pairs();
  let alphas = [
    1.00000000000000,
    1.00000000000004,
    1.00000015116847,
    1.00081841700481,
    1.09580332705189,
    2.00687652338724,
    5.94277512934943,
    54.9537264520382,
  ];
  let lambdas = [
    4.44089209850063e-16,
    6.28318530717958,
    12.5663706962589,
    18.8502914166954,
    25.2872172156717,
    34.2969716635260,
    56.1725527716607,
    170.533131190126,
  ];
  for (pair, (&alpha, &lambda)) in sixteen.iter().zip(alphas.iter().zip(&lambdas)) {
    assert_eq!(*pair, QuadraturePair::new(alpha, lambda));
  }

  let thirty_two = QuadratureDegree::ThirtyTwo.pairs();
  assert_eq!(thirty_two[0], QuadraturePair::new(1.00000000000000, 4.44089209850063e-16));
  assert_eq!(thirty_two[5], QuadraturePair::new(1.00000000000895, 31.4159265359036));
  assert_eq!(thirty_two[15], QuadraturePair::new(213.824023377989, 669.650134867714));

  let forty_eight = QuadratureDegree::FortyEight.pairs();
  assert_eq!(forty_eight[0], QuadraturePair::new(1.00000000000000, 4.44089209850063e-16));
  assert_eq!(forty_eight[9], QuadraturePair::new(1.00000000000234, 56.5486677646181));
  assert_eq!(forty_eight[23], QuadraturePair::new(476.448331869639, 1494.71066227686));
}

#[test]
fn degree_from_node_count() {
  assert_eq!(QuadratureDegree::try_from(16), Ok(QuadratureDegree::Sixteen));
  assert_eq!(QuadratureDegree::try_from(32), Ok(QuadratureDegree::ThirtyTwo));
  assert_eq!(QuadratureDegree::try_from(48), Ok(QuadratureDegree::FortyEight));
  assert_eq!(
    QuadratureDegree::try_from(24),
    Err(InversionError::UnsupportedDegree(24))
  );
  assert_eq!(QuadratureDegree::default(), QuadratureDegree::Sixteen);
  assert_eq!(QuadratureDegree::FortyEight.to_string(), "48");
}

#[test]
fn options_default_and_builders() {
  let defaults = InversionOptions::default();
  assert_eq!(defaults.critical_abscissa, 0.0);
  assert_eq!(defaults.degree, QuadratureDegree::Sixteen);

  let custom = InversionOptions::default()
    .with_critical_abscissa(1.5)
    .with_degree_number(32)
    .unwrap();
  assert_eq!(custom.critical_abscissa, 1.5);
  assert_eq!(custom.degree, QuadratureDegree::ThirtyTwo);

  assert_eq!(
    InversionOptions::default().with_degree_number(24),
    Err(InversionError::UnsupportedDegree(24))
  );
}

// output shape

#[test]
fn output_length_is_next_power_of_two() {
  for degree in QuadratureDegree::ALL {
    for &dt in &[0.01, 1.0] {
      for &count in &[2usize, 3, 5, 16, 17, 20, 33] {
        let result = values(&exp_decay, dt, count, &options(degree)).unwrap();
        assert_eq!(result.len(), count.next_power_of_two());
      }
    }
  }
}

#[test]
fn power_of_two_count_is_kept() {
  let result = values(&exp_decay, 0.1, 16, &InversionOptions::default()).unwrap();
  assert_eq!(result.len(), 16);
}

#[test]
fn image_is_evaluated_once_per_node_and_slot() {
  for degree in QuadratureDegree::ALL {
    let calls = Cell::new(0usize);
    let counting = |p: Complex64| {
      calls.set(calls.get() + 1);
      exp_decay(p)
    };

    // M = 4, M2 = 32, so 33 slots
    values(&counting, 0.1, 4, &options(degree)).unwrap();
    assert_eq!(calls.get(), degree.nodes() / 2 * 33);
  }
}

// analytic pairs

#[test]
fn exp_decay_is_recovered() {
  for degree in QuadratureDegree::ALL {
    let result = values(&exp_decay, 0.1, 20, &options(degree)).unwrap();

    for (k, value) in result.iter().take(20).enumerate() {
      let exact = (-0.1 * k as f64).exp();
      assert_relative_eq!(*value, exact, max_relative = 1e-6);
    }
  }
}

// The result keeps the padded length: a request for 20 values yields 32, and
// the 12 extra values are valid samples rather than filler.
#[test]
fn padded_tail_is_still_accurate() {
  let result = values(&exp_decay, 0.1, 20, &InversionOptions::default()).unwrap();
  assert_eq!(result.len(), 32);

  for (k, value) in result.iter().enumerate().skip(20) {
    let exact = (-0.1 * k as f64).exp();
    assert_relative_eq!(*value, exact, max_relative = 1e-6);
  }
}

#[test]
fn higher_degree_reduces_error_near_singularity() {
  // 1/sqrt(p) -> 1/sqrt(pi t), singular at t = 0
  let image = |p: Complex64| p.sqrt().inv();

  let max_error = |degree: QuadratureDegree| {
    let result = values(&image, 0.1, 16, &options(degree)).unwrap();
    (1..16)
      .map(|k| (result[k] - 1.0 / (PI * 0.1 * k as f64).sqrt()).abs())
      .fold(0.0, f64::max)
  };

  let e16 = max_error(QuadratureDegree::Sixteen);
  let e32 = max_error(QuadratureDegree::ThirtyTwo);
  let e48 = max_error(QuadratureDegree::FortyEight);

  assert!(e16 > e32, "degree 16 error {e16} should exceed degree 32 error {e32}");
  assert!(e32 > e48, "degree 32 error {e32} should exceed degree 48 error {e48}");
  assert!(e48 < 1e-5);
}

#[test]
fn sine_and_ramp_are_recovered() {
  let sine = |p: Complex64| (p * p + 1.0).inv();
  let ramp = |p: Complex64| (p * p).inv();

  let result = values(&sine, 0.5, 64, &InversionOptions::default()).unwrap();
  for (k, value) in result.iter().enumerate() {
    assert_abs_diff_eq!(*value, (0.5 * k as f64).sin(), epsilon = 1e-9);
  }

  let result = values(&ramp, 0.1, 16, &InversionOptions::default()).unwrap();
  for (k, value) in result.iter().enumerate() {
    assert_abs_diff_eq!(*value, 0.1 * k as f64, epsilon = 1e-9);
  }
}

#[test]
fn positive_abscissa_recovers_growth() {
  let growth = |p: Complex64| (p - 1.0).inv();

  for degree in QuadratureDegree::ALL {
    let opts = options(degree).with_critical_abscissa(2.0);
    let result = values(&growth, 0.1, 16, &opts).unwrap();

    for (k, value) in result.iter().enumerate() {
      assert_relative_eq!(*value, (0.1 * k as f64).exp(), max_relative = 1e-9);
    }
  }
}

// Only a positive abscissa is undone in the rescaling; a negative one shifts
// the contour alone, so the output is f(t) e^(-c t).
#[test]
fn negative_abscissa_is_not_rescaled() {
  let opts = InversionOptions::default().with_critical_abscissa(-0.5);
  let result = values(&exp_decay, 0.1, 16, &opts).unwrap();

  for (k, value) in result.iter().enumerate() {
    assert_abs_diff_eq!(*value, (-0.05 * k as f64).exp(), epsilon = 1e-9);
  }
}

// invalid input

#[test]
fn invalid_arguments_fail_before_evaluation() {
  let calls = Cell::new(0usize);
  let counting = |p: Complex64| {
    calls.set(calls.get() + 1);
    exp_decay(p)
  };
  let defaults = InversionOptions::default();

  for &dt in &[0.0, -0.1, f64::NAN, f64::INFINITY] {
    let err = values(&counting, dt, 20, &defaults).unwrap_err();
    assert!(matches!(err, InversionError::InvalidArgument { arg: "dt", .. }));
  }

  for &count in &[0usize, 1] {
    let err = values(&counting, 0.1, count, &defaults).unwrap_err();
    assert!(matches!(err, InversionError::InvalidArgument { arg: "count", .. }));
  }

  // rounding up to a power of two, or the 8x oversampling, overflows usize
  let top = 1usize << (usize::BITS - 1);
  for &count in &[top + 1, usize::MAX, usize::MAX / 8 + 1, top] {
    let err = values(&counting, 0.1, count, &defaults).unwrap_err();
    assert!(matches!(err, InversionError::InvalidArgument { arg: "count", .. }));
  }

  for &t in &[-1.0, f64::NAN] {
    let err = value_at(&counting, t, &defaults).unwrap_err();
    assert!(matches!(err, InversionError::InvalidArgument { arg: "t", .. }));
  }

  assert_eq!(calls.get(), 0);
}

#[test]
fn error_messages_name_the_argument() {
  let err = values(&exp_decay, 0.0, 20, &InversionOptions::default()).unwrap_err();
  assert_eq!(
    err.to_string(),
    "invalid argument `dt`: time step must be positive and finite, got 0"
  );
}

// parallel and single point

#[test]
fn parallel_matches_sequential() {
  let thread_pool = rayon::ThreadPoolBuilder::new()
    .num_threads(4)
    .build()
    .unwrap();

  for degree in QuadratureDegree::ALL {
    let sequential = values(&exp_decay, 0.05, 40, &options(degree)).unwrap();
    let parallel = values_para(&exp_decay, 0.05, 40, &options(degree), &thread_pool).unwrap();
    assert_eq!(sequential, parallel);
  }

  let err = values_para(&exp_decay, 0.1, 1, &InversionOptions::default(), &thread_pool);
  assert!(matches!(err, Err(InversionError::InvalidArgument { arg: "count", .. })));
}

#[test]
fn single_point_matches_exp_decay() {
  for degree in QuadratureDegree::ALL {
    for &t in &[0.0, 0.05, 0.5, 1.0, 3.0, 10.0] {
      let value = value_at(&exp_decay, t, &options(degree)).unwrap();
      assert_relative_eq!(value, (-t).exp(), max_relative = 1e-8);
    }
  }
}

#[test]
fn single_point_agrees_with_grid() {
  let grid = values(&exp_decay, 0.1, 16, &InversionOptions::default()).unwrap();
  let point = value_at(&exp_decay, 0.5, &InversionOptions::default()).unwrap();

  assert_abs_diff_eq!(point, grid[5], epsilon = 1e-12);
}

#[test]
fn single_point_evaluation_count() {
  let calls = Cell::new(0usize);
  let counting = |p: Complex64| {
    calls.set(calls.get() + 1);
    exp_decay(p)
  };

  // M = 2, M2 = 16, so 17 slots of 8 nodes
  value_at(&counting, 1.0, &InversionOptions::default()).unwrap();
  assert_eq!(calls.get(), 8 * 17);
}

#[test]
fn single_point_with_abscissa() {
  let growth = |p: Complex64| (p - 1.0).inv();
  let opts = InversionOptions::default().with_critical_abscissa(2.0);

  let value = value_at(&growth, 1.0, &opts).unwrap();
  assert_relative_eq!(value, 1f64.exp(), max_relative = 1e-10);
}
