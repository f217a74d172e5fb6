use super::*;
use crate::algorithms::structures::SparseIntSet;
use crate::helpers::models::create_line_instance;
use crate::helpers::solver::*;

#[test]
fn can_match_executed_delta() {
    let instance = create_line_instance(7, 10);
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5, 6, 7]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = SwapTriplePair::new(instance.clone());
    // Exchange the string (1, 2, 3), landing before 7, with the pair (5, 6).
    // The first route is emptied and refilled in between.
    let index = find_move(&moves, 3, 7);

    assert!(operator.is_feasible(&mut solution, &mut moves, index));

    let expected_delta = operator.compute_cost(&solution, &moves, index);
    let cost_before = solution.cost();

    let mut affected = SparseIntSet::new(8);
    operator.execute(&mut solution, &mut moves, index, &mut affected);

    assert!((solution.cost() - cost_before - expected_delta).abs() < 0.01);
    assert_eq!(route_customers(&solution, solution.route_index(5)), vec![5, 6]);
    assert_eq!(route_customers(&solution, solution.route_index(1)), vec![4, 1, 2, 3, 7]);
    assert_feasible(&solution);
}

#[test]
fn can_reject_pair_reaching_the_depot() {
    let instance = create_line_instance(7, 10);
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5], &[6, 7]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = SwapTriplePair::new(instance.clone());
    // The pair ending at the predecessor of 5 would start at the depot.
    let index = find_move(&moves, 3, 5);

    assert!(!operator.is_feasible(&mut solution, &mut moves, index));
}
