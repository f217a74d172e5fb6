use super::*;
use crate::helpers::models::create_line_instance;
use crate::helpers::solver::*;
use crate::algorithms::structures::SparseIntSet;
use crate::solver::search::{CommonOperator, LocalSearchOperator};

#[test]
fn can_match_executed_delta() {
    let instance = create_line_instance(4, 10);
    let mut solution = create_solution(&instance, &[&[1, 3, 2, 4]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = TwoOpt::new(instance.clone());
    // Replacing (1, 3) and (2, 4) with (1, 2) and (3, 4) untangles the tour.
    let index = find_move(&moves, 1, 2);

    assert!(operator.is_feasible(&mut solution, &mut moves, index));

    let expected_delta = operator.compute_cost(&solution, &moves, index);
    let cost_before = solution.cost();

    let mut affected = SparseIntSet::new(5);
    operator.execute(&mut solution, &mut moves, index, &mut affected);

    assert!((solution.cost() - cost_before - expected_delta).abs() < 0.01);
    assert_eq!(route_customers(&solution, solution.route_index(1)), vec![1, 2, 3, 4]);
    assert_feasible(&solution);
}

#[test]
fn can_reject_inter_route_moves() {
    let instance = create_line_instance(4, 10);
    let mut solution = create_solution(&instance, &[&[1, 2], &[3, 4]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = TwoOpt::new(instance.clone());
    let index = find_move(&moves, 2, 3);

    assert!(!operator.is_feasible(&mut solution, &mut moves, index));
}

#[test]
fn can_untangle_crossing_through_engine() {
    let instance = create_line_instance(4, 10);
    let mut solution = create_solution(&instance, &[&[1, 3, 2, 4]]);
    let mut moves = create_full_move_gens(&instance);

    let mut engine = CommonOperator::new(TwoOpt::new(instance.clone()), 0.01, false, 5);
    let improved = engine.apply_rough_best_improvement(&mut solution, &mut moves);

    assert!(improved);
    // The sorted line tour: 1 + 1 + 1 + 1 + 4.
    assert_eq!(solution.cost(), 8.);
    assert_feasible(&solution);
}
