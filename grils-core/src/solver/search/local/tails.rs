#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/local/tails_test.rs"]
mod tails_test;

use crate::algorithms::structures::SparseIntSet;
use crate::models::problem::DEPOT;
use crate::models::{Instance, Solution};
use crate::solver::search::{MoveGenerators, Neighborhood};
use std::sync::Arc;

/// Exchanges route suffixes: joins `i` with `j` so that the tail after `i`
/// moves to `j`'s route and the tail from `j` on moves after `i`.
pub(crate) struct Tails {
    instance: Arc<Instance>,
}

impl Tails {
    pub(crate) fn new(instance: Arc<Instance>) -> Self {
        Self { instance }
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct Cache {
    v: i32,
    next: i32,
    prev: i32,
    seq1rem: f64,
    seq2rem: f64,
}

impl Neighborhood for Tails {
    const SYMMETRIC: bool = false;
    type Cache = Cache;

    fn compute_cost(&self, solution: &Solution, moves: &MoveGenerators, index: u32) -> f64 {
        let i = moves.get(index).first_vertex();
        let j = moves.get(index).second_vertex();

        let i_route = solution.route_index_of(i, j);
        let j_route = solution.route_index_of(j, i);

        let i_next = solution.next_vertex_of(i_route, i);
        let j_prev = solution.prev_vertex_of(j_route, j);

        -solution.cost_prev_vertex(i_route, i_next) + self.instance.cost(i, j)
            - solution.cost_prev_vertex(j_route, j)
            + self.instance.cost(j_prev, i_next)
    }

    fn is_feasible(&mut self, solution: &mut Solution, moves: &mut MoveGenerators, index: u32) -> bool {
        let i = moves.get(index).first_vertex();
        let j = moves.get(index).second_vertex();

        let i_route = solution.route_index_of(i, j);
        let j_route = solution.route_index_of(j, i);

        i_route != j_route
            && solution.load_before_included(i) + solution.load_after_included(j) <= self.instance.vehicle_capacity()
            && solution.load_before_included(j) - self.instance.demand(j) + solution.load_after_included(i)
                - self.instance.demand(i)
                <= self.instance.vehicle_capacity()
    }

    fn execute(
        &mut self,
        solution: &mut Solution,
        moves: &mut MoveGenerators,
        index: u32,
        affected: &mut SparseIntSet,
    ) {
        let i = moves.get(index).first_vertex();
        let j = moves.get(index).second_vertex();

        let i_next = solution.next_vertex(i);
        let j_prev = solution.prev_vertex(j);

        let i_route = solution.route_index(i);
        let j_route = solution.route_index(j);

        affected.insert(i);
        affected.insert(i_next);
        affected.insert(j_prev);
        affected.insert(j);

        let bits = moves.update_bits_mut();
        bits.set_first(i);
        bits.set_second(i_next);
        bits.set_second(j);
        bits.set_first(j_prev);

        solution.swap_tails(i, i_route, j, j_route);

        if solution.is_route_empty(i_route) {
            solution.remove_route(i_route);
        }
        if solution.is_route_empty(j_route) {
            solution.remove_route(j_route);
        }
    }

    fn prepare_cache(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        let route = solution.route_index(vertex);
        c.next = solution.next_vertex(vertex);
        c.prev = solution.prev_vertex(vertex);
        c.seq1rem = -solution.cost_prev_vertex(route, c.next);
        c.seq2rem = -solution.cost_prev_customer(c.v);

        c
    }

    fn prepare_cache_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        c.next = solution.first_customer(route);
        c.prev = solution.last_customer(route);
        c.seq1rem = -solution.cost_prev_customer(c.next);
        c.seq2rem = -solution.cost_prev_depot(route);

        c
    }

    fn prepare_cache_first(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        c.next = solution.next_vertex(vertex);
        let route = solution.route_index(vertex);
        c.seq1rem = -solution.cost_prev_vertex(route, c.next);

        c
    }

    fn prepare_cache_first_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        c.next = solution.first_customer(route);
        c.seq1rem = -solution.cost_prev_customer(c.next);

        c
    }

    fn prepare_cache_second(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        c.prev = solution.prev_vertex(vertex);
        c.seq2rem = -solution.cost_prev_customer(c.v);

        c
    }

    fn prepare_cache_second_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        c.prev = solution.last_customer(route);
        c.seq2rem = -solution.cost_prev_depot(route);

        c
    }

    fn delta(&self, moves: &MoveGenerators, index: u32, i: &Cache, j: &Cache) -> f64 {
        i.seq1rem + moves.edge_cost(index) + j.seq2rem + self.instance.cost(j.prev, i.next)
    }

    fn delta_pair(&self, moves: &MoveGenerators, index: u32, i: &Cache, j: &Cache) -> (f64, f64) {
        let c_iv_jv = moves.edge_cost(index);

        let delta1 = i.seq1rem + c_iv_jv + j.seq2rem + self.instance.cost(j.prev, i.next);
        let delta2 = j.seq1rem + c_iv_jv + i.seq2rem + self.instance.cost(i.prev, j.next);

        (delta1, delta2)
    }
}
