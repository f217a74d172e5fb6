use super::*;
use crate::helpers::models::create_line_instance;
use crate::helpers::solver::create_solution;
use crate::utils::DefaultRandom;

#[test]
fn can_accept_only_improvements_at_zero_temperature() {
    let instance = create_line_instance(1, 10);
    // A single route of one customer: cost 2.
    let solution = create_solution(&instance, &[&[1]]);
    let random = DefaultRandom::new(0);

    let annealing = SimulatedAnnealing::new(0., 0., 100);

    for _ in 0..64 {
        assert!(annealing.accept(3., &solution, &random));
        assert!(!annealing.accept(1., &solution, &random));
        assert!(!annealing.accept(2., &solution, &random));
    }
}

#[test]
fn can_accept_worsening_moves_at_high_temperature() {
    let instance = create_line_instance(1, 10);
    let solution = create_solution(&instance, &[&[1]]);
    let random = DefaultRandom::new(0);

    let annealing = SimulatedAnnealing::new(1e9, 1., 100);

    let accepted = (0..64).filter(|_| annealing.accept(1., &solution, &random)).count();
    assert!(accepted > 0);
}

#[test]
fn can_cool_geometrically() {
    let mut annealing = SimulatedAnnealing::new(10., 1., 10);

    for _ in 0..10 {
        annealing.decrease_temperature();
    }

    assert!((annealing.temperature() - 1.).abs() < 1e-9);

    annealing.decrease_temperature();
    assert!(annealing.temperature() < 1.);
}
