use super::*;

#[test]
fn can_compute_incremental_mean() {
    let mut mean = RunningMean::default();

    [2., 4., 6., 8.].iter().for_each(|&sample| mean.update(sample));

    assert!((mean.mean() - 5.).abs() < 1e-9);
}

#[test]
fn can_reset_state() {
    let mut mean = RunningMean::default();

    mean.update(10.);
    mean.reset();

    assert_eq!(mean.mean(), 0.);

    mean.update(3.);
    assert!((mean.mean() - 3.).abs() < 1e-9);
}
