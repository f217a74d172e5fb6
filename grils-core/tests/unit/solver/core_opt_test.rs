use super::*;
use crate::helpers::models::create_line_instance;

fn create_params(seed: u64) -> Parameters {
    Parameters {
        routemin_iterations: 50,
        coreopt_iterations: 300,
        seed,
        ..Parameters::default()
    }
}

#[test]
fn can_solve_tiny_instance_feasibly() {
    let instance = create_line_instance(4, 2);
    let environment = Environment::new_with_seed(0);

    let best = CoreOptimization::new(instance.clone(), create_params(0)).solve(&environment);

    let report = best.check_feasible(true);
    assert!(report.is_feasible(), "{:?}", report.errors);
    assert!(instance.customers().all(|c| best.is_customer_in_solution(c)));

    // Two capacity bounded routes pairing consecutive customers are optimal.
    assert_eq!(best.routes_num(), 2);
    assert_eq!(best.cost(), 12.);
}

#[test]
fn can_handle_single_customer_instance() {
    let instance = create_line_instance(1, 10);
    let environment = Environment::new_with_seed(0);

    let params = Parameters { routemin_iterations: 10, coreopt_iterations: 50, ..Parameters::default() };
    let best = CoreOptimization::new(instance.clone(), params).solve(&environment);

    assert_eq!(best.routes_num(), 1);
    assert_eq!(best.cost(), 2.);
}

#[test]
fn can_never_worsen_the_initial_solution() {
    let instance = create_line_instance(10, 3);
    let environment = Environment::new_with_seed(0);

    let mut initial = crate::models::Solution::new(instance.clone(), 50);
    crate::construction::clarke_and_wright(&instance, &mut initial, 1.0, 100);

    let best = CoreOptimization::new(instance.clone(), create_params(0)).solve(&environment);

    assert!(best.cost() <= initial.cost());
    let report = best.check_feasible(true);
    assert!(report.is_feasible(), "{:?}", report.errors);
}

#[test]
fn can_reproduce_runs_per_seed() {
    let instance = create_line_instance(10, 3);

    let run = |seed: u64| {
        let environment = Environment::new_with_seed(seed);
        CoreOptimization::new(instance.clone(), create_params(seed)).solve(&environment)
    };

    let first = run(42);
    let second = run(42);

    assert!(first == second);
}
