use super::*;
use crate::helpers::models::create_line_instance;
use crate::helpers::solver::*;
use crate::algorithms::structures::SparseIntSet;

#[test]
fn can_match_executed_delta() {
    let instance = create_line_instance(4, 2);
    // Crossed suffixes: joining 1 with 2 and 3 with 4 saves two cost units.
    let mut solution = create_solution(&instance, &[&[1, 4], &[3, 2]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = Tails::new(instance.clone());
    let index = find_move(&moves, 1, 2);

    assert!(operator.is_feasible(&mut solution, &mut moves, index));

    let expected_delta = operator.compute_cost(&solution, &moves, index);
    let cost_before = solution.cost();
    assert_eq!(cost_before, 14.);

    let mut affected = SparseIntSet::new(5);
    operator.execute(&mut solution, &mut moves, index, &mut affected);

    assert!((solution.cost() - cost_before - expected_delta).abs() < 0.01);
    assert_eq!(solution.cost(), 12.);
    assert_eq!(route_customers(&solution, solution.route_index(1)), vec![1, 2]);
    assert_eq!(route_customers(&solution, solution.route_index(3)), vec![3, 4]);
    assert_feasible(&solution);
}

#[test]
fn can_reject_intra_route_moves() {
    let instance = create_line_instance(4, 10);
    let mut solution = create_solution(&instance, &[&[1, 2, 3, 4]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = Tails::new(instance.clone());
    let index = find_move(&moves, 1, 3);

    assert!(!operator.is_feasible(&mut solution, &mut moves, index));
}

#[test]
fn can_reject_capacity_violating_suffix_exchange() {
    let instance = create_line_instance(2, 2);
    let mut solution = create_solution(&instance, &[&[1, 2]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = Tails::new(instance.clone());
    // Both customers sit in the same route, which the operator never touches.
    let index = find_move(&moves, 1, 2);

    assert!(!operator.is_feasible(&mut solution, &mut moves, index));
}
