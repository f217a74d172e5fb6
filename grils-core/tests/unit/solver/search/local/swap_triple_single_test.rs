use super::*;
use crate::algorithms::structures::SparseIntSet;
use crate::helpers::models::create_line_instance;
use crate::helpers::solver::*;

#[test]
fn can_match_executed_delta() {
    let instance = create_line_instance(7, 10);
    let mut solution = create_solution(&instance, &[&[1, 2, 3, 4], &[5, 6, 7]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = SwapTripleSingle::new(instance.clone());
    // Exchange the string (1, 2, 3), landing before 7, with the single
    // customer 6.
    let index = find_move(&moves, 3, 7);

    assert!(operator.is_feasible(&mut solution, &mut moves, index));

    let expected_delta = operator.compute_cost(&solution, &moves, index);
    let cost_before = solution.cost();

    let mut affected = SparseIntSet::new(8);
    operator.execute(&mut solution, &mut moves, index, &mut affected);

    assert!((solution.cost() - cost_before - expected_delta).abs() < 0.01);
    assert_eq!(route_customers(&solution, solution.route_index(6)), vec![6, 4]);
    assert_eq!(route_customers(&solution, solution.route_index(1)), vec![5, 1, 2, 3, 7]);
    assert_feasible(&solution);
}

#[test]
fn can_reject_string_reaching_the_depot() {
    let instance = create_line_instance(7, 10);
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5, 6, 7]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = SwapTripleSingle::new(instance.clone());
    // A string ending at 2 would have to start at the depot.
    let index = find_move(&moves, 2, 7);

    assert!(!operator.is_feasible(&mut solution, &mut moves, index));
}
