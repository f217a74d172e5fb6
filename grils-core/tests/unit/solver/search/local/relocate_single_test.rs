use super::*;
use crate::helpers::models::create_instance;
use crate::helpers::solver::*;
use crate::solver::search::{CommonOperator, LocalSearchOperator};

fn create_line() -> std::sync::Arc<Instance> {
    create_instance(10, &[(0., 0.), (0., 1.), (0., 2.), (0., 3.)], &[0, 1, 1, 1])
}

#[test]
fn can_match_executed_delta() {
    let instance = create_line();
    let mut solution = create_solution(&instance, &[&[1, 3], &[2]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = RelocateSingle::new(instance.clone());
    let index = find_move(&moves, 2, 3);

    assert!(operator.is_feasible(&mut solution, &mut moves, index));

    let expected_delta = operator.compute_cost(&solution, &moves, index);
    let cost_before = solution.cost();

    let mut affected = crate::algorithms::structures::SparseIntSet::new(4);
    operator.execute(&mut solution, &mut moves, index, &mut affected);

    assert!((solution.cost() - cost_before - expected_delta).abs() < 0.01);
    assert_eq!(route_customers(&solution, solution.route_index(2)), vec![1, 2, 3]);
    assert_feasible(&solution);
}

#[test]
fn can_remove_emptied_route() {
    let instance = create_line();
    let mut solution = create_solution(&instance, &[&[1, 3], &[2]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = RelocateSingle::new(instance.clone());
    let index = find_move(&moves, 2, 3);

    let mut affected = crate::algorithms::structures::SparseIntSet::new(4);
    operator.execute(&mut solution, &mut moves, index, &mut affected);

    assert_eq!(solution.routes_num(), 1);
}

#[test]
fn can_find_improvement_through_engine() {
    let instance = create_line();
    // One stretched route plus a singleton: relocating 2 between 1 and 3
    // saves four cost units.
    let mut solution = create_solution(&instance, &[&[1, 3], &[2]]);
    let mut moves = create_full_move_gens(&instance);

    let mut engine = CommonOperator::new(RelocateSingle::new(instance.clone()), 0.01, false, 4);
    let improved = engine.apply_rough_best_improvement(&mut solution, &mut moves);

    assert!(improved);
    assert_eq!(solution.cost(), 6.);
    assert_eq!(solution.routes_num(), 1);
    assert_feasible(&solution);
}

#[test]
fn can_reject_overloaded_target_route() {
    let instance = create_instance(1, &[(0., 0.), (0., 1.), (0., 2.)], &[0, 1, 1]);
    let mut solution = create_solution(&instance, &[&[1], &[2]]);
    let mut moves = create_full_move_gens(&instance);

    let mut operator = RelocateSingle::new(instance.clone());
    let index = find_move(&moves, 1, 2);

    assert!(!operator.is_feasible(&mut solution, &mut moves, index));
}
