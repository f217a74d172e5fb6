use super::*;
use crate::algorithms::structures::SparseIntSet;
use crate::helpers::models::create_line_instance;
use crate::helpers::solver::*;

#[test]
fn can_match_executed_delta_and_reverse_the_pair() {
    let instance = create_line_instance(6, 10);
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5, 6]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = SwapPairSingleReversed::new(instance.clone());
    // Exchange the pair (1, 2), reinserted reversed after 4, with the single
    // customer 5 which lands before 3.
    let index = find_move(&moves, 2, 4);

    assert!(operator.is_feasible(&mut solution, &mut moves, index));

    let expected_delta = operator.compute_cost(&solution, &moves, index);
    let cost_before = solution.cost();

    let mut affected = SparseIntSet::new(7);
    operator.execute(&mut solution, &mut moves, index, &mut affected);

    assert!((solution.cost() - cost_before - expected_delta).abs() < 0.01);
    assert_eq!(route_customers(&solution, solution.route_index(5)), vec![5, 3]);
    assert_eq!(route_customers(&solution, solution.route_index(4)), vec![4, 2, 1, 6]);
    assert_feasible(&solution);
}

#[test]
fn can_reject_swap_with_last_customer() {
    let instance = create_line_instance(6, 10);
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5, 6]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = SwapPairSingleReversed::new(instance.clone());
    // The successor of 6 is the depot which cannot be exchanged.
    let index = find_move(&moves, 2, 6);

    assert!(!operator.is_feasible(&mut solution, &mut moves, index));
}
