use super::*;
use crate::helpers::models::create_line_instance;
use crate::helpers::solver::*;
use crate::utils::DefaultRandom;

#[test]
fn can_improve_a_poor_solution() {
    let instance = create_line_instance(6, 3);
    // Deliberately tangled routes.
    let mut solution = create_solution(&instance, &[&[1, 5], &[3, 2, 6], &[4]]);
    let mut moves = create_full_move_gens(&instance);
    let random = DefaultRandom::new(0);

    let initial_cost = solution.cost();

    let mut vnd = RandomizedVnd::new(&instance, &OperatorTag::full_catalog(), 0.01, false);
    vnd.apply(&mut solution, &mut moves, &random);

    assert!(solution.cost() < initial_cost);
    assert_feasible(&solution);
}

#[test]
fn can_compose_tiers_and_stay_feasible() {
    let instance = create_line_instance(6, 2);
    let mut solution = create_solution(&instance, &[&[1, 4], &[3, 2], &[5], &[6]]);
    let mut moves = create_full_move_gens(&instance);
    let random = DefaultRandom::new(1);

    let initial_cost = solution.cost();

    let mut composer = NeighborhoodComposer::new(0.01);
    composer.append(RandomizedVnd::new(&instance, &OperatorTag::full_catalog(), 0.01, false));
    composer.append(RandomizedVnd::new(&instance, &[OperatorTag::EjectionChain], 0.01, false));

    composer.sequential_apply(&mut solution, &mut moves, &random);

    assert!(solution.cost() <= initial_cost);
    assert_feasible(&solution);
}

#[test]
fn can_apply_deterministically_per_seed() {
    let instance = create_line_instance(6, 3);

    let run = |seed: u64| {
        let mut solution = create_solution(&instance, &[&[1, 5], &[3, 2, 6], &[4]]);
        let mut moves = create_full_move_gens(&instance);
        let random = DefaultRandom::new(seed);
        let mut vnd = RandomizedVnd::new(&instance, &OperatorTag::full_catalog(), 0.01, false);
        vnd.apply(&mut solution, &mut moves, &random);
        solution.cost()
    };

    assert_eq!(run(7), run(7));
}

#[test]
#[should_panic]
fn cannot_build_partial_tier_with_ejection_chain() {
    let instance = create_line_instance(3, 10);
    let _ = RandomizedVnd::new(&instance, &[OperatorTag::EjectionChain], 0.01, true);
}
