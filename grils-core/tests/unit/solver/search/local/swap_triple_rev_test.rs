use super::*;
use crate::algorithms::structures::SparseIntSet;
use crate::helpers::models::create_line_instance;
use crate::helpers::solver::*;

#[test]
fn can_match_executed_delta_reversing_both_strings() {
    let instance = create_line_instance(8, 10);
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5, 6, 7, 8]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = SwapTripleReversed::<true>::new(instance.clone());
    // Exchange the string (1, 2, 3), reinserted reversed after 4, with the
    // string (5, 6, 7) which lands reversed in the first route.
    let index = find_move(&moves, 3, 4);

    assert!(operator.is_feasible(&mut solution, &mut moves, index));

    let expected_delta = operator.compute_cost(&solution, &moves, index);
    let cost_before = solution.cost();

    let mut affected = SparseIntSet::new(9);
    operator.execute(&mut solution, &mut moves, index, &mut affected);

    assert!((solution.cost() - cost_before - expected_delta).abs() < 0.01);
    assert_eq!(route_customers(&solution, solution.route_index(7)), vec![7, 6, 5]);
    assert_eq!(route_customers(&solution, solution.route_index(4)), vec![4, 3, 2, 1, 8]);
    assert_feasible(&solution);
}

#[test]
fn can_match_executed_delta_reversing_one_string() {
    let instance = create_line_instance(8, 10);
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5, 6, 7, 8]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = SwapTripleReversed::<false>::new(instance.clone());
    let index = find_move(&moves, 3, 4);

    assert!(operator.is_feasible(&mut solution, &mut moves, index));

    let expected_delta = operator.compute_cost(&solution, &moves, index);
    let cost_before = solution.cost();

    let mut affected = SparseIntSet::new(9);
    operator.execute(&mut solution, &mut moves, index, &mut affected);

    assert!((solution.cost() - cost_before - expected_delta).abs() < 0.01);
    // Only the first string is reversed; (5, 6, 7) keeps its orientation.
    assert_eq!(route_customers(&solution, solution.route_index(7)), vec![5, 6, 7]);
    assert_eq!(route_customers(&solution, solution.route_index(4)), vec![4, 3, 2, 1, 8]);
    assert_feasible(&solution);
}

#[test]
fn can_reject_string_reaching_the_depot() {
    let instance = create_line_instance(8, 10);
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5, 6, 7, 8]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = SwapTripleReversed::<true>::new(instance.clone());
    // The string starting after 6 would reach past the end of its route.
    let index = find_move(&moves, 3, 6);

    assert!(!operator.is_feasible(&mut solution, &mut moves, index));
}
