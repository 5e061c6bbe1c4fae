//! Unit tests for the shared math helpers

use dextrix::strategies::math::{mean, sma, standard_deviation};

#[test]
fn mean_of_empty_slice_is_none() {
    assert_eq!(mean(&[]), None);
}

#[test]
fn mean_of_values() {
    assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
}

#[test]
fn sma_requires_enough_values() {
    assert_eq!(sma(&[1.0, 2.0], 3), None);
    assert_eq!(sma(&[1.0, 2.0, 3.0], 0), None);
}

#[test]
fn sma_uses_trailing_window() {
    let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(sma(&values, 2), Some(4.5));
    assert_eq!(sma(&values, 5), Some(3.0));
}

#[test]
fn standard_deviation_of_constant_series_is_zero() {
    let values = [4.0; 10];
    assert_eq!(standard_deviation(&values, 10), Some(0.0));
}

#[test]
fn standard_deviation_known_value() {
    // Population std of [2, 4, 4, 4, 5, 5, 7, 9] is exactly 2.
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let std = standard_deviation(&values, 8).unwrap();
    assert!((std - 2.0).abs() < 1e-12);
}
