use super::*;
use crate::helpers::models::create_instance;
use crate::helpers::solver::*;
use crate::algorithms::structures::SparseIntSet;

fn create_square() -> std::sync::Arc<Instance> {
    // Depot plus six customers scattered so that no two arcs tie.
    create_instance(
        10,
        &[(0., 0.), (1., 0.), (2., 1.), (4., 0.), (0., 5.), (1., 7.), (3., 6.)],
        &[0, 1, 1, 1, 1, 1, 1],
    )
}

#[test]
fn can_match_executed_delta() {
    let instance = create_square();
    let mut solution = create_solution(&instance, &[&[1, 5, 3], &[4, 2, 6]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = SwapSingle::new(instance.clone());
    // Swap 5 with the predecessor of 6, landing 5 right before 6.
    let index = find_move(&moves, 5, 6);

    assert!(operator.is_feasible(&mut solution, &mut moves, index));

    let expected_delta = operator.compute_cost(&solution, &moves, index);
    let cost_before = solution.cost();

    let mut affected = SparseIntSet::new(7);
    operator.execute(&mut solution, &mut moves, index, &mut affected);

    assert!((solution.cost() - cost_before - expected_delta).abs() < 0.01);
    assert_eq!(route_customers(&solution, solution.route_index(2)), vec![1, 2, 3]);
    assert_eq!(route_customers(&solution, solution.route_index(5)), vec![4, 5, 6]);
    assert_feasible(&solution);
}

#[test]
fn can_reject_swap_with_first_customer_predecessor() {
    let instance = create_square();
    let mut solution = create_solution(&instance, &[&[1, 5, 3], &[4, 2, 6]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = SwapSingle::new(instance.clone());
    // The predecessor of the first customer is the depot which cannot move.
    let index = find_move(&moves, 1, 4);

    assert!(!operator.is_feasible(&mut solution, &mut moves, index));
}

#[test]
fn can_respect_capacity_on_both_routes() {
    let instance = create_instance(4, &[(0., 0.), (0., 1.), (0., 2.), (0., 3.), (0., 4.)], &[0, 1, 3, 1, 2]);
    let mut solution = create_solution(&instance, &[&[1, 2], &[3, 4]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = SwapSingle::new(instance.clone());
    // Swapping 2 with 3 would overload the second route: 2 - 1 + 3 > 4.
    let index = find_move(&moves, 2, 4);

    assert!(!operator.is_feasible(&mut solution, &mut moves, index));
}
