use super::*;
use crate::helpers::models::{create_instance, create_line_instance};
use crate::utils::DefaultRandom;
use proptest::prelude::*;

fn build_route(solution: &mut Solution, customers: &[i32]) -> i32 {
    let route = solution.build_one_customer_route(customers[0]);
    for &customer in &customers[1..] {
        solution.insert_vertex_before(route, DEPOT, customer);
    }
    route
}

fn route_customers(solution: &Solution, route: i32) -> Vec<i32> {
    let mut customers = Vec::new();
    let mut curr = solution.first_customer(route);
    while curr != DEPOT {
        customers.push(curr);
        curr = solution.next_vertex(curr);
    }
    customers
}

fn assert_feasible(solution: &Solution) {
    let report = solution.check_feasible(true);
    assert!(report.is_feasible(), "{:?}", report.errors);
}

#[test]
fn can_build_one_customer_route() {
    let instance = create_line_instance(3, 10);
    let mut solution = Solution::new(instance, 10);

    let route = solution.build_one_customer_route(2);

    assert_eq!(solution.routes_num(), 1);
    assert_eq!(solution.route_size(route), 1);
    assert_eq!(solution.route_load(route), 1);
    assert_eq!(solution.first_customer(route), 2);
    assert_eq!(solution.last_customer(route), 2);
    assert_eq!(solution.cost(), 4.);
    assert_feasible(&solution);
}

#[test]
fn can_append_routes_into_single_tour() {
    let instance = create_line_instance(3, 10);
    let mut solution = Solution::new(instance, 10);

    let r1 = solution.build_one_customer_route(1);
    let r2 = solution.build_one_customer_route(2);
    let r3 = solution.build_one_customer_route(3);
    assert_eq!(solution.routes_num(), 3);

    solution.append_route(r1, r2);
    assert_eq!(solution.routes_num(), 2);

    solution.append_route(r1, r3);
    assert_eq!(solution.routes_num(), 1);

    assert_eq!(route_customers(&solution, r1), vec![1, 2, 3]);
    // Tour depot-1-2-3-depot: 1 + 1 + 1 + 3.
    assert_eq!(solution.cost(), 6.);
    assert_feasible(&solution);
}

#[test]
fn can_reverse_route_path_twice_as_identity() {
    let instance = create_line_instance(4, 10);
    let mut solution = Solution::new(instance, 10);

    let route = build_route(&mut solution, &[1, 2, 3, 4]);
    let cost = solution.cost();

    solution.reverse_route_path(route, 1, 4);
    assert_eq!(route_customers(&solution, route), vec![4, 3, 2, 1]);
    assert_feasible(&solution);

    solution.reverse_route_path(route, 4, 1);
    assert_eq!(route_customers(&solution, route), vec![1, 2, 3, 4]);
    assert_eq!(solution.cost(), cost);
    assert_feasible(&solution);
}

#[test]
fn can_reverse_inner_route_path() {
    let instance = create_line_instance(4, 10);
    let mut solution = Solution::new(instance, 10);

    let route = build_route(&mut solution, &[1, 2, 3, 4]);

    solution.reverse_route_path(route, 2, 3);

    assert_eq!(route_customers(&solution, route), vec![1, 3, 2, 4]);
    assert_feasible(&solution);
}

#[test]
fn can_insert_then_remove_as_identity() {
    let instance = create_line_instance(4, 10);
    let mut solution = Solution::new(instance.clone(), 10);

    let route = build_route(&mut solution, &[1, 2, 4]);
    let reference = solution.clone();

    solution.insert_vertex_before(route, 4, 3);
    assert_eq!(route_customers(&solution, route), vec![1, 2, 3, 4]);
    assert_feasible(&solution);

    solution.remove_vertex(route, 3);
    assert!(solution == reference);
    assert_feasible(&solution);
}

#[test]
fn can_round_trip_route_id_through_pool() {
    let instance = create_line_instance(2, 10);
    let mut solution = Solution::new(instance, 10);

    let route = solution.build_one_customer_route(1);

    solution.remove_vertex(route, 1);
    assert!(solution.is_route_empty(route));
    solution.remove_route(route);
    assert!(!solution.is_route_in_solution(route));

    let recreated = solution.build_one_customer_route(2);
    assert_eq!(recreated, route);
}

#[test]
fn can_swap_tails_between_routes() {
    let instance = create_line_instance(6, 10);
    let mut solution = Solution::new(instance, 10);

    let r1 = build_route(&mut solution, &[1, 2, 3]);
    let r2 = build_route(&mut solution, &[4, 5, 6]);

    // Replace (2, 3) and (4, 5) with (2, 5) and (4, 3).
    solution.swap_tails(2, r1, 5, r2);

    assert_eq!(route_customers(&solution, r1), vec![1, 2, 5, 6]);
    assert_eq!(route_customers(&solution, r2), vec![4, 3]);
    assert_feasible(&solution);
}

#[test]
fn can_split_routes() {
    let instance = create_line_instance(6, 10);
    let mut solution = Solution::new(instance, 10);

    let r1 = build_route(&mut solution, &[1, 2, 3]);
    let r2 = build_route(&mut solution, &[4, 5, 6]);

    // Join 2 with 5 reversing the head of the second route, and the tail of
    // the first route with the tail of the second one.
    solution.split(2, r1, 5, r2);

    assert_eq!(route_customers(&solution, r1), vec![1, 2, 5, 4]);
    assert_eq!(route_customers(&solution, r2), vec![3, 6]);
    assert_feasible(&solution);
}

#[test]
fn can_maintain_cumulative_loads() {
    let instance = create_instance(
        100,
        &[(0., 0.), (0., 1.), (0., 2.), (0., 3.)],
        &[0, 2, 3, 5],
    );
    let mut solution = Solution::new(instance, 10);

    let _ = build_route(&mut solution, &[1, 2, 3]);

    assert_eq!(solution.load_before_included(1), 2);
    assert_eq!(solution.load_before_included(2), 5);
    assert_eq!(solution.load_before_included(3), 10);

    assert_eq!(solution.load_after_included(1), 10);
    assert_eq!(solution.load_after_included(2), 8);
    assert_eq!(solution.load_after_included(3), 5);

    assert_feasible(&solution);
}

#[test]
fn can_undo_mutation_sequence() {
    let instance = create_line_instance(6, 4);
    let mut solution = Solution::new(instance, 10);

    let r1 = build_route(&mut solution, &[1, 2, 3]);
    let _ = build_route(&mut solution, &[4, 5, 6]);

    solution.clear_do_list1();
    solution.clear_undo_list1();
    let reference = solution.clone();

    // A mix of edits: relocate, reversal, route removal and recreation.
    solution.remove_vertex(r1, 2);
    let r2 = solution.route_index(5);
    solution.insert_vertex_before(r2, 5, 2);
    solution.reverse_route_path(r1, 1, 3);
    solution.remove_vertex(r1, 1);
    solution.remove_vertex(r1, 3);
    assert!(solution.is_route_empty(r1));
    solution.remove_route(r1);
    let _ = solution.build_one_customer_route(1);

    assert_feasible(&solution);
    assert!(solution != reference);

    solution.apply_undo_list1();
    assert!(solution == reference);
    assert_feasible(&solution);
}

#[test]
fn can_replay_do_list_onto_other_solution() {
    let instance = create_line_instance(5, 10);
    let mut solution = Solution::new(instance.clone(), 10);

    let r1 = build_route(&mut solution, &[1, 2, 3]);
    let _ = build_route(&mut solution, &[4, 5]);

    let mut other = solution.clone();
    solution.clear_do_list1();
    solution.clear_undo_list1();

    solution.remove_vertex(r1, 2);
    let r2 = solution.route_index(4);
    solution.insert_vertex_before(r2, 4, 2);

    solution.apply_do_list1_to(&mut other);

    assert!(solution == other);
    assert_feasible(&other);
}

#[test]
fn can_compare_solutions_ignoring_route_ids() {
    let instance = create_line_instance(2, 10);

    let mut first = Solution::new(instance.clone(), 10);
    build_route(&mut first, &[1, 2]);

    // Same tour served under a different route id.
    let mut second = Solution::new(instance, 10);
    let tail = second.build_one_customer_route(2);
    let head = second.build_one_customer_route(1);
    second.append_route(head, tail);

    assert_ne!(second.route_index(1), first.route_index(1));
    assert!(first == second);
}

// Applies a random yet valid edit sequence: relocations of single customers
// plus occasional whole route reversals.
fn shake(solution: &mut Solution, customers_num: i32, random: &DefaultRandom, edits: usize) {
    for _ in 0..edits {
        let customer = random.uniform_int(1, customers_num);
        let route = solution.route_index(customer);

        if random.is_hit(0.2) && solution.route_size(route) > 1 {
            solution.reverse_route_path(route, solution.first_customer(route), solution.last_customer(route));
            continue;
        }

        solution.remove_vertex(route, customer);
        if solution.is_route_empty(route) {
            solution.remove_route(route);
        }

        if random.is_hit(0.3) {
            solution.build_one_customer_route(customer);
        } else {
            let mut target = random.uniform_int(1, customers_num);
            while target == customer || !solution.is_customer_in_solution(target) {
                target = random.uniform_int(1, customers_num);
            }
            let target_route = solution.route_index(target);
            let where_to = if random.is_head_not_tails() { target } else { DEPOT };
            solution.insert_vertex_before(target_route, where_to, customer);
        }
    }
}

proptest! {
    #[test]
    fn can_roll_back_any_edit_sequence(seed in 0u64..512, edits in 1usize..40) {
        let instance = create_line_instance(8, 100);
        let mut solution = Solution::new(instance, 8);
        for customer in 1..=8 {
            solution.build_one_customer_route(customer);
        }

        let random = DefaultRandom::new(seed);
        shake(&mut solution, 8, &random, 8);
        solution.clear_do_list1();
        solution.clear_undo_list1();
        let reference = solution.clone();

        shake(&mut solution, 8, &random, edits);
        let report = solution.check_feasible(true);
        prop_assert!(report.is_feasible(), "{:?}", report.errors);

        solution.apply_undo_list1();
        prop_assert!(solution == reference);

        let report = solution.check_feasible(true);
        prop_assert!(report.is_feasible(), "{:?}", report.errors);
    }
}
