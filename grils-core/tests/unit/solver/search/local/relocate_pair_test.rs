use super::*;
use crate::algorithms::structures::SparseIntSet;
use crate::helpers::models::create_line_instance;
use crate::helpers::solver::*;

#[test]
fn can_match_executed_delta() {
    let instance = create_line_instance(5, 10);
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = RelocatePair::new(instance.clone());
    // Move the pair (1, 2) right before 5.
    let index = find_move(&moves, 2, 5);

    assert!(operator.is_feasible(&mut solution, &mut moves, index));

    let expected_delta = operator.compute_cost(&solution, &moves, index);
    let cost_before = solution.cost();

    let mut affected = SparseIntSet::new(6);
    operator.execute(&mut solution, &mut moves, index, &mut affected);

    assert!((solution.cost() - cost_before - expected_delta).abs() < 0.01);
    assert_eq!(route_customers(&solution, solution.route_index(4)), vec![4, 1, 2, 5]);
    assert_eq!(route_customers(&solution, solution.route_index(3)), vec![3]);
    assert_feasible(&solution);
}

#[test]
fn can_reject_pair_starting_at_the_depot() {
    let instance = create_line_instance(4, 10);
    let mut solution = create_solution(&instance, &[&[1, 2], &[3, 4]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = RelocatePair::new(instance.clone());
    // The predecessor of 1 is the depot, so there is no pair to move.
    let index = find_move(&moves, 1, 3);

    assert!(!operator.is_feasible(&mut solution, &mut moves, index));
}

#[test]
fn can_reject_overloaded_target_route() {
    let instance = create_line_instance(5, 3);
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = RelocatePair::new(instance.clone());
    // The pair (1, 2) does not fit next to (4, 5): 2 + 2 > 3.
    let index = find_move(&moves, 2, 5);

    assert!(!operator.is_feasible(&mut solution, &mut moves, index));
}
