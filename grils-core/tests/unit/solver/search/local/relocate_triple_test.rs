use super::*;
use crate::algorithms::structures::SparseIntSet;
use crate::helpers::models::create_line_instance;
use crate::helpers::solver::*;

#[test]
fn can_match_executed_delta() {
    let instance = create_line_instance(6, 10);
    let mut solution = create_solution(&instance, &[&[1, 2, 3, 4], &[5, 6]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = RelocateTriple::new(instance.clone());
    // Move the string (2, 3, 4) right before 6.
    let index = find_move(&moves, 4, 6);

    assert!(operator.is_feasible(&mut solution, &mut moves, index));

    let expected_delta = operator.compute_cost(&solution, &moves, index);
    let cost_before = solution.cost();

    let mut affected = SparseIntSet::new(7);
    operator.execute(&mut solution, &mut moves, index, &mut affected);

    assert!((solution.cost() - cost_before - expected_delta).abs() < 0.01);
    assert_eq!(route_customers(&solution, solution.route_index(5)), vec![5, 2, 3, 4, 6]);
    assert_eq!(route_customers(&solution, solution.route_index(1)), vec![1]);
    assert_feasible(&solution);
}

#[test]
fn can_reject_string_reaching_the_depot() {
    let instance = create_line_instance(5, 10);
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = RelocateTriple::new(instance.clone());
    // A string ending at 2 would have to start at the depot.
    let index = find_move(&moves, 2, 4);

    assert!(!operator.is_feasible(&mut solution, &mut moves, index));
}
