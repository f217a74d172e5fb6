#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/local/swap_triple_test.rs"]
mod swap_triple_test;

use crate::algorithms::structures::SparseIntSet;
use crate::models::problem::DEPOT;
use crate::models::{Instance, Solution};
use crate::solver::search::{MoveGenerators, Neighborhood};
use std::sync::Arc;

/// Exchanges the three customer string ending at `i` with the three customer
/// string ending at `prev(j)`, the i-string landing right before `j`.
pub(crate) struct SwapTriple {
    instance: Arc<Instance>,
}

impl SwapTriple {
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
    prevprevprevprev: i32,
    next: i32,
    seqrem1: f64,
    seqrem2: f64,
}

impl Neighborhood for SwapTriple {
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
        let i_prev_prev_prev = solution.prev_vertex_of(i_route, i_prev_prev);

        let j_prev = solution.prev_vertex_of(j_route, j);
        let j_prev_prev = solution.prev_vertex_of(j_route, j_prev);
        let j_prev_prev_prev = solution.prev_vertex_of(j_route, j_prev_prev);
        let j_prev_prev_prev_prev = solution.prev_vertex_of(j_route, j_prev_prev_prev);

        let i_sequence_rem =
            -solution.cost_prev_vertex(i_route, i_prev_prev) - solution.cost_prev_vertex(i_route, i_next);
        let j_sequence_rem =
            -solution.cost_prev_vertex(j_route, j_prev_prev_prev) - solution.cost_prev_vertex(j_route, j);

        let i_sequence_add = self.instance.cost(j_prev_prev_prev_prev, i_prev_prev) + self.instance.cost(i, j);
        let j_sequence_add =
            self.instance.cost(i_prev_prev_prev, j_prev_prev_prev) + self.instance.cost(j_prev, i_next);

        i_sequence_add + j_sequence_add + i_sequence_rem + j_sequence_rem
    }

    fn is_feasible(&mut self, solution: &mut Solution, moves: &mut MoveGenerators, index: u32) -> bool {
        let i = moves.get(index).first_vertex();
        let j = moves.get(index).second_vertex();

        let i_route = solution.route_index_of(i, j);
        let j_route = solution.route_index_of(j, i);

        let i_prev = solution.prev_vertex_of(i_route, i);
        let i_prev_prev = solution.prev_vertex_of(i_route, i_prev);

        let j_prev = solution.prev_vertex_of(j_route, j);
        let j_prev_prev = solution.prev_vertex_of(j_route, j_prev);
        let j_prev_prev_prev = solution.prev_vertex_of(j_route, j_prev_prev);

        (i_route != j_route
            && i_prev != DEPOT
            && i_prev_prev != DEPOT
            && j_prev != DEPOT
            && j_prev_prev != DEPOT
            && j_prev_prev_prev != DEPOT
            && solution.route_load(j_route)
                - self.instance.demand(j_prev)
                - self.instance.demand(j_prev_prev)
                - self.instance.demand(j_prev_prev_prev)
                + self.instance.demand(i)
                + self.instance.demand(i_prev)
                + self.instance.demand(i_prev_prev)
                <= self.instance.vehicle_capacity()
            && solution.route_load(i_route)
                + self.instance.demand(j_prev)
                + self.instance.demand(j_prev_prev)
                + self.instance.demand(j_prev_prev_prev)
                - self.instance.demand(i)
                - self.instance.demand(i_prev)
                - self.instance.demand(i_prev_prev)
                <= self.instance.vehicle_capacity())
            || (i_route == j_route
                && i != j_prev
                && i != j_prev_prev
                && i != j_prev_prev_prev
                && solution.next_vertex_of(i_route, i) != j_prev_prev_prev
                && j != i_prev
                && j != i_prev_prev)
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
        let i_prev_prev_prev = solution.prev_vertex_of(i_route, i_prev_prev);

        let i_next = solution.next_vertex_of(i_route, i);
        let i_next_next = solution.next_vertex_of(i_route, i_next);
        let i_next_next_next = solution.next_vertex_of(i_route, i_next_next);
        let i_next_next_next_next = solution.next_vertex_of(i_route, i_next_next_next);

        let j_prev = solution.prev_vertex_of(j_route, j);
        let j_prev_prev = solution.prev_vertex_of(j_route, j_prev);
        let j_prev_prev_prev = solution.prev_vertex_of(j_route, j_prev_prev);
        let j_prev_prev_prev_prev = solution.prev_vertex_of(j_route, j_prev_prev_prev);

        let j_next = solution.next_vertex_of(j_route, j);
        let j_next_next = solution.next_vertex_of(j_route, j_next);
        let j_next_next_next = solution.next_vertex_of(j_route, j_next_next);

        affected.insert(i_prev_prev_prev);
        affected.insert(i_prev_prev);
        affected.insert(i_prev);
        affected.insert(i);
        affected.insert(i_next);
        affected.insert(i_next_next);
        affected.insert(i_next_next_next);
        affected.insert(i_next_next_next_next);
        affected.insert(j_prev_prev_prev_prev);
        affected.insert(j_prev_prev_prev);
        affected.insert(j_prev_prev);
        affected.insert(j_prev);
        affected.insert(j);
        affected.insert(j_next);
        affected.insert(j_next_next);
        affected.insert(j_next_next_next);

        let bits = moves.update_bits_mut();
        bits.set_first(i_prev_prev_prev);
        bits.set_first(i_prev_prev);
        bits.set_second(i_prev_prev);
        bits.set_first(i_prev);
        bits.set_second(i_prev);
        bits.set_first(i);
        bits.set_second(i);
        bits.set_first(i_next);
        bits.set_second(i_next);
        bits.set_first(i_next_next);
        bits.set_second(i_next_next);
        bits.set_first(i_next_next_next);
        bits.set_second(i_next_next_next);
        bits.set_second(i_next_next_next_next);
        bits.set_first(j_prev_prev_prev_prev);
        bits.set_first(j_prev_prev_prev);
        bits.set_second(j_prev_prev_prev);
        bits.set_first(j_prev_prev);
        bits.set_second(j_prev_prev);
        bits.set_first(j_prev);
        bits.set_second(j_prev);
        bits.set_first(j);
        bits.set_second(j);
        bits.set_first(j_next);
        bits.set_second(j_next);
        bits.set_first(j_next_next);
        bits.set_second(j_next_next);
        bits.set_second(j_next_next_next);

        solution.remove_vertex(i_route, i);
        solution.remove_vertex(i_route, i_prev);
        solution.remove_vertex(i_route, i_prev_prev);

        solution.insert_vertex_before(j_route, j, i_prev_prev);
        solution.insert_vertex_before(j_route, j, i_prev);
        solution.insert_vertex_before(j_route, j, i);

        solution.remove_vertex(j_route, j_prev);
        solution.remove_vertex(j_route, j_prev_prev);
        solution.remove_vertex(j_route, j_prev_prev_prev);

        solution.insert_vertex_before(i_route, i_next, j_prev_prev_prev);
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
        c.prevprevprevprev = solution.prev_vertex_of(route, c.prevprevprev);
        c.next = solution.next_vertex(vertex);

        c.seqrem1 = -solution.cost_prev_vertex(route, c.prevprev) - solution.cost_prev_vertex(route, c.next);
        c.seqrem2 = -solution.cost_prev_vertex(route, c.prevprevprev) - solution.cost_prev_customer(c.v);

        c
    }

    fn prepare_cache_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        c.prev = solution.last_customer(route);
        c.prevprev = solution.prev_vertex(c.prev);
        c.prevprevprev = solution.prev_vertex_of(route, c.prevprev);
        c.prevprevprevprev = solution.prev_vertex_of(route, c.prevprevprev);
        c.next = solution.first_customer(route);

        c.seqrem1 = -solution.cost_prev_vertex(route, c.prevprev) - solution.cost_prev_customer(c.next);
        c.seqrem2 = -solution.cost_prev_vertex(route, c.prevprevprev) - solution.cost_prev_depot(route);

        c
    }

    fn prepare_cache_first(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        let route = solution.route_index(vertex);
        let prev = solution.prev_vertex(vertex);
        c.prev = prev;
        c.prevprev = solution.prev_vertex_of(route, prev);
        c.prevprevprev = solution.prev_vertex_of(route, c.prevprev);
        c.next = solution.next_vertex(vertex);

        c.seqrem1 = -solution.cost_prev_vertex(route, c.prevprev) - solution.cost_prev_vertex(route, c.next);

        c
    }

    fn prepare_cache_first_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        let prev = solution.last_customer(route);
        c.prev = prev;
        c.prevprev = solution.prev_vertex(prev);
        c.prevprevprev = solution.prev_vertex_of(route, c.prevprev);
        c.next = solution.first_customer(route);

        c.seqrem1 = -solution.cost_prev_vertex(route, c.prevprev) - solution.cost_prev_customer(c.next);

        c
    }

    fn prepare_cache_second(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        let route = solution.route_index(vertex);
        c.prev = solution.prev_vertex(vertex);
        let prevprev = solution.prev_vertex_of(route, c.prev);
        c.prevprev = prevprev;
        c.prevprevprev = solution.prev_vertex_of(route, prevprev);
        c.prevprevprevprev = solution.prev_vertex_of(route, c.prevprevprev);

        c.seqrem2 = -solution.cost_prev_vertex(route, c.prevprevprev) - solution.cost_prev_customer(c.v);

        c
    }

    fn prepare_cache_second_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        c.prev = solution.last_customer(route);
        let prevprev = solution.prev_vertex(c.prev);
        c.prevprev = prevprev;
        c.prevprevprev = solution.prev_vertex_of(route, prevprev);
        c.prevprevprevprev = solution.prev_vertex_of(route, c.prevprevprev);

        c.seqrem2 = -solution.cost_prev_vertex(route, c.prevprevprev) - solution.cost_prev_depot(route);

        c
    }

    fn delta(&self, moves: &MoveGenerators, index: u32, i: &Cache, j: &Cache) -> f64 {
        let c_iv_jv = moves.edge_cost(index);
        let c_seq_join = self.instance.cost(i.prevprevprev, j.prevprevprev);

        self.instance.cost(j.prevprevprevprev, i.prevprev)
            + c_iv_jv
            + c_seq_join
            + self.instance.cost(j.prev, i.next)
            + i.seqrem1
            + j.seqrem2
    }

    fn delta_pair(&self, moves: &MoveGenerators, index: u32, i: &Cache, j: &Cache) -> (f64, f64) {
        let c_iv_jv = moves.edge_cost(index);
        let c_seq_join = self.instance.cost(i.prevprevprev, j.prevprevprev);

        let delta1 = self.instance.cost(j.prevprevprevprev, i.prevprev)
            + c_iv_jv
            + c_seq_join
            + self.instance.cost(j.prev, i.next)
            + i.seqrem1
            + j.seqrem2;
        let delta2 = self.instance.cost(i.prevprevprevprev, j.prevprev)
            + c_iv_jv
            + c_seq_join
            + self.instance.cost(i.prev, j.next)
            + j.seqrem1
            + i.seqrem2;

        (delta1, delta2)
    }
}
