use super::*;
use crate::helpers::models::create_instance;
use crate::helpers::solver::*;
use crate::algorithms::structures::SparseIntSet;

#[test]
fn can_accept_directly_feasible_relocation() {
    let instance = create_instance(10, &[(0., 0.), (0., 1.), (0., 2.), (0., 3.)], &[0, 1, 1, 1]);
    let mut solution = create_solution(&instance, &[&[1, 3], &[2]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = EjectionChain::new(instance.clone(), 0.01);
    let index = find_move(&moves, 2, 3);

    assert!(operator.is_feasible(&mut solution, &mut moves, index));

    let mut affected = SparseIntSet::new(4);
    operator.execute(&mut solution, &mut moves, index, &mut affected);

    assert_eq!(route_customers(&solution, solution.route_index(2)), vec![1, 2, 3]);
    assert_feasible(&solution);
}

#[test]
fn can_leave_solution_unchanged_when_no_chain_exists() {
    // Both routes are at capacity and no relocation frees space: the chain
    // search must fail without touching the solution.
    let instance = create_instance(1, &[(0., 0.), (0., 1.), (0., 2.)], &[0, 1, 1]);
    let mut solution = create_solution(&instance, &[&[1], &[2]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = EjectionChain::new(instance.clone(), 0.01);
    let index = find_move(&moves, 1, 2);

    let reference = solution.clone();

    assert!(!operator.is_feasible(&mut solution, &mut moves, index));
    assert!(solution == reference);
    assert_feasible(&solution);
}

#[test]
fn can_restore_feasibility_through_a_chain() {
    // Relocating 4 before 3 overloads the first route; the chain must also
    // eject 1 out of it, towards the far singleton route which has space.
    let instance = create_instance(
        6,
        &[(0., 0.), (0., 1.), (0., 2.), (0., 3.), (0., 4.), (0., 10.)],
        &[0, 2, 2, 2, 2, 1],
    );
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4], &[5]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = EjectionChain::new(instance.clone(), 0.01);
    let index = find_move(&moves, 4, 3);

    // Seed the generating move with its actual improvement so the chain
    // search prunes on real cumulative deltas.
    let delta = operator.compute_cost(&solution, &moves, index);
    moves.get_mut(index).set_delta(delta);

    assert!(operator.is_feasible(&mut solution, &mut moves, index));

    let mut affected = SparseIntSet::new(6);
    operator.execute(&mut solution, &mut moves, index, &mut affected);

    assert_eq!(solution.routes_num(), 2);
    assert_eq!(route_customers(&solution, solution.route_index(2)), vec![2, 4, 3]);
    assert_eq!(route_customers(&solution, solution.route_index(1)), vec![1, 5]);
    assert!(solution.is_solution_load_feasible());
    assert_feasible(&solution);
}
