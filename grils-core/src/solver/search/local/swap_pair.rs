#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/local/swap_pair_test.rs"]
mod swap_pair_test;

use crate::algorithms::structures::SparseIntSet;
use crate::models::problem::DEPOT;
use crate::models::{Instance, Solution};
use crate::solver::search::{MoveGenerators, Neighborhood};
use std::sync::Arc;

/// Exchanges the customer pair `(prev(i), i)` with the pair ending at
/// `prev(j)`, the i-pair landing right before `j`.
pub(crate) struct SwapPair {
    instance: Arc<Instance>,
}

impl SwapPair {
    pub(crate) fn new(instance: Arc<Instance>) -> Self {
        Self { instance }
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct Cache {
    v: i32,
    prev: i32,
    prevprev: i32,
    prevprevprev: i32,
    next: i32,
    seqrem: f64,
    prevrem: f64,
}

impl Neighborhood for SwapPair {
    const SYMMETRIC: bool = false;
    type Cache = Cache;

    fn compute_cost(&self, solution: &Solution, moves: &MoveGenerators, index: u32) -> f64 {
        let i = moves.get(index).first_vertex();
        let j = moves.get(index).second_vertex();

        let i_route = solution.route_index_of(i, j);
        let j_route = solution.route_index_of(j, i);

        let i_next = solution.next_vertex_of(i_route, i);
        let i_prev = solution.prev_vertex_of(i_route, i);
        let i_prev_prev = solution.prev_vertex_of(i_route, i_prev);

        let j_prev = solution.prev_vertex_of(j_route, j);
        let j_prev_prev = solution.prev_vertex_of(j_route, j_prev);
        let j_prev_prev_prev = solution.prev_vertex_of(j_route, j_prev_prev);

        let i_sequence_rem = -solution.cost_prev_vertex(i_route, i_prev) - solution.cost_prev_vertex(i_route, i_next);
        let j_sequence_rem = -solution.cost_prev_vertex(j_route, j_prev_prev) - solution.cost_prev_vertex(j_route, j);

        let i_sequence_add = self.instance.cost(j_prev_prev_prev, i_prev) + self.instance.cost(i, j);
        let j_sequence_add = self.instance.cost(i_prev_prev, j_prev_prev) + self.instance.cost(j_prev, i_next);

        i_sequence_add + j_sequence_add + i_sequence_rem + j_sequence_rem
    }

    fn is_feasible(&mut self, solution: &mut Solution, moves: &mut MoveGenerators, index: u32) -> bool {
        let i = moves.get(index).first_vertex();
        let j = moves.get(index).second_vertex();

        let i_route = solution.route_index_of(i, j);
        let j_route = solution.route_index_of(j, i);

        let i_prev = solution.prev_vertex_of(i_route, i);
        let j_prev = solution.prev_vertex_of(j_route, j);
        let j_prev_prev = solution.prev_vertex_of(j_route, j_prev);

        (i_route != j_route
            && i_prev != DEPOT
            && j_prev != DEPOT
            && j_prev_prev != DEPOT
            && solution.route_load(j_route) - self.instance.demand(j_prev) - self.instance.demand(j_prev_prev)
                + self.instance.demand(i)
                + self.instance.demand(i_prev)
                <= self.instance.vehicle_capacity()
            && solution.route_load(i_route) + self.instance.demand(j_prev) + self.instance.demand(j_prev_prev)
                - self.instance.demand(i)
                - self.instance.demand(i_prev)
                <= self.instance.vehicle_capacity())
            || (i_route == j_route
                && i != j_prev
                && i != j_prev_prev
                && solution.next_vertex_of(i_route, i) != j_prev_prev
                && j != i_prev)
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
        let i_prev_prev = solution.prev_vertex_of(i_route, i_prev);
        let i_next = solution.next_vertex_of(i_route, i);
        let i_next_next = solution.next_vertex_of(i_route, i_next);

        let j_prev = solution.prev_vertex_of(j_route, j);
        let j_prev_prev = solution.prev_vertex_of(j_route, j_prev);
        let j_prev_prev_prev = solution.prev_vertex_of(j_route, j_prev_prev);
        let j_next = solution.next_vertex_of(j_route, j);

        affected.insert(i_prev_prev);
        affected.insert(i_prev);
        affected.insert(i);
        affected.insert(i_next);
        affected.insert(i_next_next);
        affected.insert(j_prev_prev_prev);
        affected.insert(j_prev_prev);
        affected.insert(j_prev);
        affected.insert(j);
        affected.insert(j_next);

        let bits = moves.update_bits_mut();
        bits.set_first(i_prev_prev);
        bits.set_first(i_prev);
        bits.set_second(i_prev);
        bits.set_first(i);
        bits.set_second(i);
        bits.set_first(i_next);
        bits.set_second(i_next);
        bits.set_first(i_next_next);
        bits.set_second(i_next_next);
        bits.set_first(j_prev_prev_prev);
        bits.set_first(j_prev_prev);
        bits.set_second(j_prev_prev);
        bits.set_first(j_prev);
        bits.set_second(j_prev);
        bits.set_first(j);
        bits.set_second(j);
        bits.set_first(j_next);
        bits.set_second(j_next);

        solution.remove_vertex(i_route, i);
        solution.remove_vertex(i_route, i_prev);

        solution.insert_vertex_before(j_route, j, i_prev);
        solution.insert_vertex_before(j_route, j, i);

        solution.remove_vertex(j_route, j_prev);
        solution.remove_vertex(j_route, j_prev_prev);

        solution.insert_vertex_before(i_route, i_next, j_prev_prev);
        solution.insert_vertex_before(i_route, i_next, j_prev);
    }

    fn prepare_cache(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        let route = solution.route_index(vertex);
        c.prev = solution.prev_vertex(vertex);
        c.prevprev = solution.prev_vertex_of(route, c.prev);
        c.prevprevprev = solution.prev_vertex_of(route, c.prevprev);
        c.next = solution.next_vertex(vertex);

        c.seqrem = -solution.cost_prev_vertex(route, c.prev) - solution.cost_prev_vertex(route, c.next);
        c.prevrem = -solution.cost_prev_vertex(route, c.prevprev) - solution.cost_prev_customer(c.v);

        c
    }

    fn prepare_cache_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        c.prev = solution.last_customer(route);
        c.prevprev = solution.prev_vertex(c.prev);
        c.prevprevprev = solution.prev_vertex_of(route, c.prevprev);
        c.next = solution.first_customer(route);

        c.seqrem = -solution.cost_prev_customer(c.prev) - solution.cost_prev_customer(c.next);
        c.prevrem = -solution.cost_prev_vertex(route, c.prevprev) - solution.cost_prev_depot(route);

        c
    }

    fn prepare_cache_first(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        let route = solution.route_index(vertex);
        c.prev = solution.prev_vertex(vertex);
        c.prevprev = solution.prev_vertex_of(route, c.prev);
        c.next = solution.next_vertex(vertex);

        c.seqrem = -solution.cost_prev_vertex(route, c.prev) - solution.cost_prev_vertex(route, c.next);

        c
    }

    fn prepare_cache_first_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        c.prev = solution.last_customer(route);
        c.prevprev = solution.prev_vertex(c.prev);
        c.next = solution.first_customer(route);

        c.seqrem = -solution.cost_prev_customer(c.prev) - solution.cost_prev_customer(c.next);

        c
    }

    fn prepare_cache_second(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        let route = solution.route_index(vertex);
        c.prev = solution.prev_vertex(vertex);
        c.prevprev = solution.prev_vertex_of(route, c.prev);
        c.prevprevprev = solution.prev_vertex_of(route, c.prevprev);

        c.prevrem = -solution.cost_prev_vertex(route, c.prevprev) - solution.cost_prev_customer(c.v);

        c
    }

    fn prepare_cache_second_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        c.prev = solution.last_customer(route);
        c.prevprev = solution.prev_vertex(c.prev);
        c.prevprevprev = solution.prev_vertex_of(route, c.prevprev);

        c.prevrem = -solution.cost_prev_vertex(route, c.prevprev) - solution.cost_prev_depot(route);

        c
    }

    fn delta(&self, moves: &MoveGenerators, index: u32, i: &Cache, j: &Cache) -> f64 {
        let i_sequence_add = self.instance.cost(j.prevprevprev, i.prev) + moves.edge_cost(index);
        let j_sequence_add = self.instance.cost(i.prevprev, j.prevprev) + self.instance.cost(j.prev, i.next);

        i_sequence_add + j_sequence_add + i.seqrem + j.prevrem
    }

    fn delta_pair(&self, moves: &MoveGenerators, index: u32, i: &Cache, j: &Cache) -> (f64, f64) {
        let c_iv_jv = moves.edge_cost(index);

        let delta1 = self.instance.cost(j.prevprevprev, i.prev)
            + c_iv_jv
            + self.instance.cost(i.prevprev, j.prevprev)
            + self.instance.cost(j.prev, i.next)
            + i.seqrem
            + j.prevrem;
        let delta2 = self.instance.cost(i.prevprevprev, j.prev)
            + c_iv_jv
            + self.instance.cost(j.prevprev, i.prevprev)
            + self.instance.cost(i.prev, j.next)
            + j.seqrem
            + i.prevrem;

        (delta1, delta2)
    }
}
