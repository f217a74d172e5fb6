#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/local/relocate_single_test.rs"]
mod relocate_single_test;

use crate::algorithms::structures::SparseIntSet;
use crate::models::problem::DEPOT;
use crate::models::{Instance, Solution};
use crate::solver::search::{MoveGenerators, Neighborhood};
use std::sync::Arc;

/// Relocates customer `i` right before `j`.
pub(crate) struct RelocateSingle {
    instance: Arc<Instance>,
}

impl RelocateSingle {
    pub(crate) fn new(instance: Arc<Instance>) -> Self {
        Self { instance }
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct Cache {
    v: i32,
    prev: i32,
    next: i32,
    /// Removal gain when `v` leaves its route.
    vrem: f64,
    /// Removal gain of the arc entering `v` when something lands before it.
    prevrem: f64,
}

impl Neighborhood for RelocateSingle {
    const SYMMETRIC: bool = false;
    type Cache = Cache;

    fn compute_cost(&self, solution: &Solution, moves: &MoveGenerators, index: u32) -> f64 {
        let i = moves.get(index).first_vertex();
        let j = moves.get(index).second_vertex();

        let i_route = solution.route_index_of(i, j);
        let j_route = solution.route_index_of(j, i);

        let i_prev = solution.prev_vertex_of(i_route, i);
        let i_next = solution.next_vertex_of(i_route, i);
        let j_prev = solution.prev_vertex_of(j_route, j);

        -solution.cost_prev_vertex(i_route, i) - solution.cost_prev_vertex(i_route, i_next)
            + self.instance.cost(i_prev, i_next)
            - solution.cost_prev_vertex(j_route, j)
            + self.instance.cost(j_prev, i)
            + self.instance.cost(i, j)
    }

    fn is_feasible(&mut self, solution: &mut Solution, moves: &mut MoveGenerators, index: u32) -> bool {
        let i = moves.get(index).first_vertex();
        let j = moves.get(index).second_vertex();

        let i_route = solution.route_index_of(i, j);
        let j_route = solution.route_index_of(j, i);

        (i_route != j_route
            && solution.route_load(j_route) + self.instance.demand(i) <= self.instance.vehicle_capacity())
            || (i_route == j_route && j != solution.next_vertex_of(i_route, i))
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

        let i_route = solution.route_index_of(i, j);
        let j_route = solution.route_index_of(j, i);

        let i_prev = solution.prev_vertex_of(i_route, i);
        let i_next = solution.next_vertex_of(i_route, i);
        let j_prev = solution.prev_vertex_of(j_route, j);

        affected.insert(i_prev);
        affected.insert(i);
        affected.insert(i_next);
        affected.insert(j_prev);
        affected.insert(j);

        let bits = moves.update_bits_mut();
        bits.set_first(i_prev);
        bits.set_first(i);
        bits.set_second(i);
        bits.set_first(i_next);
        bits.set_second(i_next);
        bits.set_first(j);
        bits.set_second(j);
        bits.set_first(j_prev);

        solution.remove_vertex(i_route, i);
        solution.insert_vertex_before(j_route, j, i);

        if solution.is_route_empty(i_route) {
            solution.remove_route(i_route);
        }
    }

    fn prepare_cache(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        let route = solution.route_index(vertex);
        c.prev = solution.prev_vertex(vertex);
        c.next = solution.next_vertex(vertex);

        c.vrem = -solution.cost_prev_customer(c.v) - solution.cost_prev_vertex(route, c.next)
            + self.instance.cost(c.prev, c.next);
        c.prevrem = -solution.cost_prev_customer(c.v);

        c
    }

    fn prepare_cache_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        c.prev = solution.last_customer(route);
        c.next = solution.first_customer(route);

        c.vrem = -solution.cost_prev_depot(route) - solution.cost_prev_customer(c.next)
            + self.instance.cost(c.prev, c.next);
        c.prevrem = -solution.cost_prev_depot(route);

        c
    }

    fn prepare_cache_first(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        let route = solution.route_index(vertex);
        c.prev = solution.prev_vertex(vertex);
        c.next = solution.next_vertex(vertex);
        c.vrem = -solution.cost_prev_customer(c.v) - solution.cost_prev_vertex(route, c.next)
            + self.instance.cost(c.prev, c.next);
        c
    }

    fn prepare_cache_first_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        c.prev = solution.last_customer(route);
        c.next = solution.first_customer(route);
        c.vrem = -solution.cost_prev_depot(route) - solution.cost_prev_customer(c.next)
            + self.instance.cost(c.prev, c.next);
        c
    }

    fn prepare_cache_second(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        c.prev = solution.prev_vertex(vertex);
        c.prevrem = -solution.cost_prev_customer(c.v);
        c
    }

    fn prepare_cache_second_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        c.prev = solution.last_customer(route);
        c.prevrem = -solution.cost_prev_depot(route);
        c
    }

    fn delta(&self, moves: &MoveGenerators, index: u32, i: &Cache, j: &Cache) -> f64 {
        i.vrem + j.prevrem + self.instance.cost(j.prev, i.v) + moves.edge_cost(index)
    }

    fn delta_pair(&self, moves: &MoveGenerators, index: u32, i: &Cache, j: &Cache) -> (f64, f64) {
        let c_iv_jv = moves.edge_cost(index);

        let delta1 = i.vrem + j.prevrem + self.instance.cost(j.prev, i.v) + c_iv_jv;
        let delta2 = j.vrem + i.prevrem + self.instance.cost(i.prev, j.v) + c_iv_jv;

        (delta1, delta2)
    }
}
