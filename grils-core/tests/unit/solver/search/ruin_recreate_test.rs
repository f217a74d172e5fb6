use super::*;
use crate::helpers::models::create_line_instance;
use crate::helpers::solver::*;

fn served_customers(solution: &Solution, instance: &Instance) -> usize {
    instance.customers().filter(|&c| solution.is_customer_in_solution(c)).count()
}

#[test]
fn can_reinsert_every_removed_customer() {
    let instance = create_line_instance(8, 3);
    let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5, 6], &[7, 8]]);
    let random = DefaultRandom::new(3);

    let omega = vec![3; instance.vertices_num() as usize];
    let mut shaking = RuinAndRecreate::new(instance.clone());

    for _ in 0..32 {
        let seed = shaking.apply(&mut solution, &omega, &random);

        assert!(instance.customers().contains(&seed));
        assert_eq!(served_customers(&solution, &instance), 8);
        assert!(solution.is_solution_load_feasible());
        assert_feasible(&solution);
    }
}

#[test]
fn can_shake_deterministically_per_seed() {
    let instance = create_line_instance(8, 3);
    let omega = vec![2; instance.vertices_num() as usize];

    let run = |seed: u64| {
        let mut solution = create_solution(&instance, &[&[1, 2, 3], &[4, 5, 6], &[7, 8]]);
        let random = DefaultRandom::new(seed);
        let mut shaking = RuinAndRecreate::new(instance.clone());
        shaking.apply(&mut solution, &omega, &random);
        solution.cost()
    };

    assert_eq!(run(11), run(11));
}

#[test]
fn can_open_new_route_when_no_host_fits() {
    // Full routes everywhere: a removed customer can only come back as a
    // fresh singleton route.
    let instance = create_line_instance(3, 1);
    let mut solution = create_solution(&instance, &[&[1], &[2], &[3]]);
    let random = DefaultRandom::new(0);

    let omega = vec![1; instance.vertices_num() as usize];
    let mut shaking = RuinAndRecreate::new(instance.clone());

    shaking.apply(&mut solution, &omega, &random);

    assert_eq!(solution.routes_num(), 3);
    assert_eq!(served_customers(&solution, &instance), 3);
    assert_feasible(&solution);
}
