use super::*;
use crate::algorithms::structures::SparseIntSet;
use crate::helpers::models::create_line_instance;
use crate::helpers::solver::*;

#[test]
fn can_match_executed_delta_reversing_both_pairs() {
    let instance = create_line_instance(7, 10);
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5, 6, 7]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = SwapPairReversed::<true>::new(instance.clone());
    // Exchange the pair (1, 2), reinserted reversed after 4, with the pair
    // (5, 6) which lands reversed before 3.
    let index = find_move(&moves, 2, 4);

    assert!(operator.is_feasible(&mut solution, &mut moves, index));

    let expected_delta = operator.compute_cost(&solution, &moves, index);
    let cost_before = solution.cost();

    let mut affected = SparseIntSet::new(8);
    operator.execute(&mut solution, &mut moves, index, &mut affected);

    assert!((solution.cost() - cost_before - expected_delta).abs() < 0.01);
    assert_eq!(route_customers(&solution, solution.route_index(3)), vec![6, 5, 3]);
    assert_eq!(route_customers(&solution, solution.route_index(4)), vec![4, 2, 1, 7]);
    assert_feasible(&solution);
}

#[test]
fn can_match_executed_delta_reversing_one_pair() {
    let instance = create_line_instance(7, 10);
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5, 6, 7]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = SwapPairReversed::<false>::new(instance.clone());
    let index = find_move(&moves, 2, 4);

    assert!(operator.is_feasible(&mut solution, &mut moves, index));

    let expected_delta = operator.compute_cost(&solution, &moves, index);
    let cost_before = solution.cost();

    let mut affected = SparseIntSet::new(8);
    operator.execute(&mut solution, &mut moves, index, &mut affected);

    assert!((solution.cost() - cost_before - expected_delta).abs() < 0.01);
    // Only the first pair is reversed; (5, 6) keeps its orientation.
    assert_eq!(route_customers(&solution, solution.route_index(3)), vec![5, 6, 3]);
    assert_eq!(route_customers(&solution, solution.route_index(4)), vec![4, 2, 1, 7]);
    assert_feasible(&solution);
}

#[test]
fn can_reject_pair_reaching_the_depot() {
    let instance = create_line_instance(7, 10);
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5], &[6, 7]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = SwapPairReversed::<true>::new(instance.clone());
    // The pair starting after 4 would reach past the end of its route.
    let index = find_move(&moves, 3, 4);

    assert!(!operator.is_feasible(&mut solution, &mut moves, index));
}
