use crate::models::{Instance, Solution};
use crate::models::problem::DEPOT;
use crate::solver::search::MoveGenerators;
use std::sync::Arc;

/// Builds a solution with the given routes, each a customer sequence.
pub fn create_solution(instance: &Arc<Instance>, routes: &[&[i32]]) -> Solution {
    let mut solution = Solution::new(instance.clone(), instance.vertices_num() as usize);
    for customers in routes {
        let route = solution.build_one_customer_route(customers[0]);
        for &customer in &customers[1..] {
            solution.insert_vertex_before(route, DEPOT, customer);
        }
    }
    solution
}

/// Builds a move generator store with the full candidate catalog active.
pub fn create_full_move_gens(instance: &Arc<Instance>) -> MoveGenerators {
    let vertices_num = instance.vertices_num() as usize;
    let mut moves = MoveGenerators::new(instance, vertices_num);

    let gamma = vec![1.0; vertices_num];
    let vertices: Vec<i32> = instance.vertices().collect();
    moves.set_active_percentage(&gamma, &vertices);

    moves
}

/// Returns the index of the directed move generator `(i, j)`.
pub fn find_move(moves: &MoveGenerators, i: i32, j: i32) -> u32 {
    (0..moves.size() as u32)
        .find(|&index| moves.get(index).first_vertex() == i && moves.get(index).second_vertex() == j)
        .unwrap_or_else(|| panic!("no move generator ({i}, {j})"))
}

/// Collects the customers of a route in visit order.
pub fn route_customers(solution: &Solution, route: i32) -> Vec<i32> {
    let mut customers = Vec::new();
    let mut curr = solution.first_customer(route);
    while curr != DEPOT {
        customers.push(curr);
        curr = solution.next_vertex(curr);
    }
    customers
}

/// Panics when the solution fails the expensive consistency check.
pub fn assert_feasible(solution: &Solution) {
    let report = solution.check_feasible(true);
    assert!(report.is_feasible(), "{:?}", report.errors);
}
