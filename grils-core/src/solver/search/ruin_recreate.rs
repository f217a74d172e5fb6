#[cfg(test)]
#[path = "../../../tests/unit/solver/search/ruin_recreate_test.rs"]
mod ruin_recreate_test;

use crate::algorithms::structures::SparseIntSet;
use crate::models::problem::DEPOT;
use crate::models::{solution, Instance, Solution};
use crate::utils::DefaultRandom;
use std::sync::Arc;

/// The shaking step: a random walk removing a bounded chain of customers,
/// followed by a greedy reinsertion restricted to routes serving nearby
/// customers.
pub struct RuinAndRecreate {
    instance: Arc<Instance>,
    removed: Vec<i32>,
    routes: SparseIntSet,
}

impl RuinAndRecreate {
    /// Creates the shaking operator.
    pub fn new(instance: Arc<Instance>) -> Self {
        let vertices_num = instance.vertices_num() as usize;
        Self { instance, removed: Vec::new(), routes: SparseIntSet::new(vertices_num) }
    }

    /// Ruins and recreates the solution. The walk starts at a uniformly
    /// random seed customer and removes up to `omega[seed]` customers;
    /// returns the seed, which drives the shaking intensity adaptation.
    pub fn apply(&mut self, solution: &mut Solution, omega: &[i32], random: &DefaultRandom) -> i32 {
        self.removed.clear();
        self.routes.clear();

        let seed = random.uniform_int(1, self.instance.customers_num());
        let walk_length = omega[seed as usize];

        let mut curr = seed;

        for _ in 0..walk_length {
            debug_assert_ne!(curr, DEPOT);

            let route = solution.route_index(curr);

            self.removed.push(curr);
            self.routes.insert(route);

            let mut next = solution::DUMMY_VERTEX;

            if solution.route_size(route) > 1 && random.is_head_not_tails() {
                // Step to a route neighbor, wrapping past the depot.
                if random.is_head_not_tails() {
                    next = solution.next_vertex(curr);
                    if next == DEPOT {
                        next = solution.next_vertex_of(route, next);
                    }
                } else {
                    next = solution.prev_vertex(curr);
                    if next == DEPOT {
                        next = solution.prev_vertex_of(route, next);
                    }
                }
            } else if random.is_head_not_tails() {
                // Jump to the nearest neighbor served by a route the walk
                // has not touched yet.
                for &neighbor in &self.instance.neighbors_of(curr)[1..] {
                    if neighbor == DEPOT
                        || !solution.is_customer_in_solution(neighbor)
                        || self.routes.contains(solution.route_index(neighbor))
                    {
                        continue;
                    }
                    next = neighbor;
                    break;
                }
            } else {
                // Jump to the nearest neighbor still in solution, touched
                // routes included.
                for &neighbor in &self.instance.neighbors_of(curr)[1..] {
                    if neighbor == DEPOT || !solution.is_customer_in_solution(neighbor) {
                        continue;
                    }
                    next = neighbor;
                    break;
                }
            }

            debug_assert_ne!(next, DEPOT);

            solution.remove_vertex(route, curr);
            if solution.is_route_empty(route) {
                solution.remove_route(route);
            }

            if next == solution::DUMMY_VERTEX {
                // The walk dead-ended; stop with what was removed so far.
                break;
            }

            curr = next;
        }

        // Shuffle the removed customers around a little.
        match random.uniform_int(0, 3) {
            0 => random.shuffle(&mut self.removed),
            1 => self.removed.sort_by(|&a, &b| self.instance.demand(b).cmp(&self.instance.demand(a))),
            2 => self.removed.sort_by(|&a, &b| {
                self.instance.cost(b, DEPOT).total_cmp(&self.instance.cost(a, DEPOT))
            }),
            _ => self.removed.sort_by(|&a, &b| {
                self.instance.cost(a, DEPOT).total_cmp(&self.instance.cost(b, DEPOT))
            }),
        }

        for n in 0..self.removed.len() {
            let customer = self.removed[n];
            debug_assert_ne!(customer, DEPOT);

            let mut best_route = solution::DUMMY_ROUTE;
            let mut best_where = solution::DUMMY_VERTEX;
            let mut best_cost = f64::MAX;

            // Insertion is only attempted into routes serving neighbors of
            // the removed customer. Not necessarily the smartest choice for
            // very long routes, but it works well enough.
            self.routes.clear();
            for &neighbor in &self.instance.neighbors_of(customer)[1..] {
                if neighbor == DEPOT || !solution.is_customer_in_solution(neighbor) {
                    continue;
                }
                self.routes.insert(solution.route_index(neighbor));
            }

            let c_customer_depot = self.instance.cost(customer, DEPOT);

            for m in 0..self.routes.len() {
                let route = self.routes.elements()[m];

                if solution.route_load(route) + self.instance.demand(customer) > self.instance.vehicle_capacity() {
                    continue;
                }

                let mut where_to = solution.first_customer(route);
                while where_to != DEPOT {
                    let prev = solution.prev_vertex(where_to);

                    let cost = -solution.cost_prev_customer(where_to)
                        + self.instance.cost(prev, customer)
                        + self.instance.cost(customer, where_to);

                    if cost < best_cost {
                        best_cost = cost;
                        best_route = route;
                        best_where = where_to;
                    }

                    where_to = solution.next_vertex(where_to);
                }

                let cost = -solution.cost_prev_depot(route)
                    + self.instance.cost(solution.last_customer(route), customer)
                    + c_customer_depot;

                if cost < best_cost {
                    best_cost = cost;
                    best_route = route;
                    best_where = DEPOT;
                }
            }

            if best_route == solution::DUMMY_ROUTE || 2. * c_customer_depot < best_cost {
                solution.build_one_customer_route(customer);
            } else {
                solution.insert_vertex_before(best_route, best_where, customer);
            }
        }

        seed
    }
}
