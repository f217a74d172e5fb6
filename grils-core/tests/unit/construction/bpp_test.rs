use super::*;
use crate::helpers::models::create_instance;

#[test]
fn can_pack_demands_first_fit_decreasing() {
    let instance = create_instance(
        5,
        &[(0., 0.), (0., 1.), (0., 2.), (0., 3.), (0., 4.)],
        &[0, 3, 3, 2, 2],
    );

    assert_eq!(first_fit_decreasing(&instance), 2);
}

#[test]
fn can_use_one_bin_per_customer_when_demands_fill_vehicles() {
    let instance = create_instance(4, &[(0., 0.), (0., 1.), (0., 2.), (0., 3.)], &[0, 4, 4, 4]);

    assert_eq!(first_fit_decreasing(&instance), 3);
}

#[test]
fn can_pack_everything_into_one_bin() {
    let instance = create_instance(100, &[(0., 0.), (0., 1.), (0., 2.)], &[0, 10, 20]);

    assert_eq!(first_fit_decreasing(&instance), 1);
}
