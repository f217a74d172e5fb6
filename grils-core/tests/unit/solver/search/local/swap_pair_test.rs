use super::*;
use crate::algorithms::structures::SparseIntSet;
use crate::helpers::models::{create_instance, create_line_instance};
use crate::helpers::solver::*;

#[test]
fn can_match_executed_delta() {
    let instance = create_line_instance(6, 10);
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5, 6]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = SwapPair::new(instance.clone());
    // Exchange the pair (1, 2) with the pair (4, 5), the first one landing
    // right before 6.
    let index = find_move(&moves, 2, 6);

    assert!(operator.is_feasible(&mut solution, &mut moves, index));

    let expected_delta = operator.compute_cost(&solution, &moves, index);
    let cost_before = solution.cost();

    let mut affected = SparseIntSet::new(7);
    operator.execute(&mut solution, &mut moves, index, &mut affected);

    assert!((solution.cost() - cost_before - expected_delta).abs() < 0.01);
    assert_eq!(route_customers(&solution, solution.route_index(1)), vec![1, 2, 6]);
    assert_eq!(route_customers(&solution, solution.route_index(3)), vec![4, 5, 3]);
    assert_feasible(&solution);
}

#[test]
fn can_reject_pair_reaching_the_depot() {
    let instance = create_line_instance(5, 10);
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = SwapPair::new(instance.clone());
    // The pair ending at the predecessor of 5 would start at the depot.
    let index = find_move(&moves, 3, 5);

    assert!(!operator.is_feasible(&mut solution, &mut moves, index));
}

#[test]
fn can_reject_overloaded_exchange() {
    let instance = create_instance(
        9,
        &[(0., 0.), (0., 1.), (0., 2.), (0., 3.), (0., 4.), (0., 5.), (0., 6.)],
        &[0, 4, 4, 1, 1, 1, 2],
    );
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5, 6]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = SwapPair::new(instance.clone());
    // Trading (4, 5) for the heavy pair (1, 2) overloads the second route:
    // 4 - 2 + 8 > 9.
    let index = find_move(&moves, 2, 6);

    assert!(!operator.is_feasible(&mut solution, &mut moves, index));
}
