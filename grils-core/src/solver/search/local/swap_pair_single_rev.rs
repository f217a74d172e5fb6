#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/local/swap_pair_single_rev_test.rs"]
mod swap_pair_single_rev_test;

use crate::algorithms::structures::SparseIntSet;
use crate::models::problem::DEPOT;
use crate::models::{Instance, Solution};
use crate::solver::search::{MoveGenerators, Neighborhood};
use std::sync::Arc;

/// Exchanges the customer pair `(prev(i), i)`, reinserted reversed right
/// after `j`, with the single customer `next(j)` which lands before
/// `next(i)`.
pub(crate) struct SwapPairSingleReversed {
    instance: Arc<Instance>,
}

impl SwapPairSingleReversed {
    pub(crate) fn new(instance: Arc<Instance>) -> Self {
        Self { instance }
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct Cache {
    v: i32,
    prev: i32,
    prevprev: i32,
    next: i32,
    nextnext: i32,
    seqrem: f64,
    prevrem: f64,
}

impl Neighborhood for SwapPairSingleReversed {
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

        let j_next = solution.next_vertex_of(j_route, j);
        let j_next_next = solution.next_vertex_of(j_route, j_next);

        let i_sequence_rem = -solution.cost_prev_vertex(i_route, i_prev) - solution.cost_prev_vertex(i_route, i_next);
        let j_next_rem =
            -solution.cost_prev_vertex(j_route, j_next) - solution.cost_prev_vertex(j_route, j_next_next);

        let i_sequence_add = self.instance.cost(j_next_next, i_prev) + self.instance.cost(i, j);
        let j_next_add = self.instance.cost(i_prev_prev, j_next) + self.instance.cost(j_next, i_next);

        i_sequence_add + j_next_add + i_sequence_rem + j_next_rem
    }

    fn is_feasible(&mut self, solution: &mut Solution, moves: &mut MoveGenerators, index: u32) -> bool {
        let i = moves.get(index).first_vertex();
        let j = moves.get(index).second_vertex();

        let i_route = solution.route_index_of(i, j);
        let j_route = solution.route_index_of(j, i);

        let i_prev = solution.prev_vertex_of(i_route, i);
        let i_prev_prev = solution.prev_vertex_of(i_route, i_prev);
        let j_next = solution.next_vertex_of(j_route, j);

        (i_route != j_route
            && i_prev != DEPOT
            && j_next != DEPOT
            && solution.route_load(j_route) - self.instance.demand(j_next)
                + self.instance.demand(i_prev)
                + self.instance.demand(i)
                <= self.instance.vehicle_capacity()
            && solution.route_load(i_route) + self.instance.demand(j_next)
                - self.instance.demand(i_prev)
                - self.instance.demand(i)
                <= self.instance.vehicle_capacity())
            || (i_route == j_route && j != i_prev && j != i_prev_prev && j_next != i_prev_prev)
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

        let i_next = solution.next_vertex_of(i_route, i);
        let i_prev = solution.prev_vertex_of(i_route, i);
        let i_prev_prev = solution.prev_vertex_of(i_route, i_prev);
        let i_prev_prev_prev = solution.prev_vertex_of(i_route, i_prev_prev);
        let i_next_next = solution.next_vertex_of(i_route, i_next);

        let j_prev = solution.prev_vertex_of(j_route, j);
        let j_next = solution.next_vertex_of(j_route, j);
        let j_next_next = solution.next_vertex_of(j_route, j_next);
        let j_next_next_next = solution.next_vertex_of(j_route, j_next_next);

        affected.insert(i_prev_prev_prev);
        affected.insert(i_prev_prev);
        affected.insert(i_prev);
        affected.insert(i);
        affected.insert(i_next);
        affected.insert(i_next_next);
        affected.insert(j_prev);
        affected.insert(j);
        affected.insert(j_next);
        affected.insert(j_next_next);
        affected.insert(j_next_next_next);

        let bits = moves.update_bits_mut();
        bits.set_second(i_prev_prev_prev);
        bits.set_first(i_prev_prev);
        bits.set_second(i_prev_prev);
        bits.set_first(i_prev);
        bits.set_second(i_prev);
        bits.set_first(i);
        bits.set_second(i);
        bits.set_first(i_next);
        bits.set_first(i_next_next);
        bits.set_first(j_next_next_next);
        bits.set_first(j_next_next);
        bits.set_first(j_next);
        bits.set_second(j_next);
        bits.set_first(j);
        bits.set_second(j);
        bits.set_second(j_prev);

        solution.remove_vertex(j_route, j_next);
        solution.insert_vertex_before(i_route, i_next, j_next);

        solution.remove_vertex(i_route, i);
        solution.remove_vertex(i_route, i_prev);

        solution.insert_vertex_before(j_route, j_next_next, i);
        solution.insert_vertex_before(j_route, j_next_next, i_prev);
    }

    fn prepare_cache(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        let route = solution.route_index(vertex);
        c.prev = solution.prev_vertex(vertex);
        c.prevprev = solution.prev_vertex_of(route, c.prev);
        c.next = solution.next_vertex(vertex);
        c.nextnext = solution.next_vertex_of(route, c.next);

        let c_v_next = solution.cost_prev_vertex(route, c.next);
        c.seqrem = -solution.cost_prev_vertex(route, c.prev) - c_v_next;
        c.prevrem = -c_v_next - solution.cost_prev_vertex(route, c.nextnext);

        c
    }

    fn prepare_cache_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        c.prev = solution.last_customer(route);
        c.prevprev = solution.prev_vertex(c.prev);
        c.next = solution.first_customer(route);
        c.nextnext = solution.next_vertex(c.next);

        let c_v_next = solution.cost_prev_customer(c.next);
        c.seqrem = -solution.cost_prev_customer(c.prev) - c_v_next;
        c.prevrem = -c_v_next - solution.cost_prev_vertex(route, c.nextnext);

        c
    }

    fn prepare_cache_first(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        let route = solution.route_index(vertex);
        c.prev = solution.prev_vertex(vertex);
        c.prevprev = solution.prev_vertex_of(route, c.prev);
        c.next = solution.next_vertex(vertex);

        let c_v_next = solution.cost_prev_vertex(route, c.next);
        c.seqrem = -solution.cost_prev_vertex(route, c.prev) - c_v_next;

        c
    }

    fn prepare_cache_first_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        c.prev = solution.last_customer(route);
        c.prevprev = solution.prev_vertex(c.prev);
        c.next = solution.first_customer(route);

        let c_v_next = solution.cost_prev_customer(c.next);
        c.seqrem = -solution.cost_prev_customer(c.prev) - c_v_next;

        c
    }

    fn prepare_cache_second(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        let route = solution.route_index(vertex);
        c.next = solution.next_vertex(vertex);
        c.nextnext = solution.next_vertex_of(route, c.next);

        let c_v_next = solution.cost_prev_vertex(route, c.next);
        c.prevrem = -c_v_next - solution.cost_prev_vertex(route, c.nextnext);

        c
    }

    fn prepare_cache_second_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        c.next = solution.first_customer(route);
        c.nextnext = solution.next_vertex(c.next);

        let c_v_next = solution.cost_prev_customer(c.next);
        c.prevrem = -c_v_next - solution.cost_prev_vertex(route, c.nextnext);

        c
    }

    fn delta(&self, moves: &MoveGenerators, index: u32, i: &Cache, j: &Cache) -> f64 {
        let i_sequence_add = self.instance.cost(j.nextnext, i.prev) + moves.edge_cost(index);
        let j_next_add = self.instance.cost(i.prevprev, j.next) + self.instance.cost(j.next, i.next);

        i_sequence_add + j_next_add + i.seqrem + j.prevrem
    }

    fn delta_pair(&self, moves: &MoveGenerators, index: u32, i: &Cache, j: &Cache) -> (f64, f64) {
        let c_iv_jv = moves.edge_cost(index);
        let c_inext_jnext = self.instance.cost(i.next, j.next);

        let i_sequence_add = self.instance.cost(j.nextnext, i.prev) + c_iv_jv;
        let j_sequence_add = self.instance.cost(i.nextnext, j.prev) + c_iv_jv;

        let j_next_add = self.instance.cost(i.prevprev, j.next) + c_inext_jnext;
        let i_next_add = self.instance.cost(j.prevprev, i.next) + c_inext_jnext;

        let delta1 = i_sequence_add + j_next_add + i.seqrem + j.prevrem;
        let delta2 = j_sequence_add + i_next_add + j.seqrem + i.prevrem;

        (delta1, delta2)
    }
}
