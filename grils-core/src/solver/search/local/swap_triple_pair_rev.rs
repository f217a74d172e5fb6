#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/local/swap_triple_pair_rev_test.rs"]
mod swap_triple_pair_rev_test;

use crate::algorithms::structures::SparseIntSet;
use crate::models::problem::DEPOT;
use crate::models::{Instance, Solution};
use crate::solver::search::{MoveGenerators, Neighborhood};
use std::sync::Arc;

/// Exchanges the three customer string ending at `i`, reinserted reversed
/// right after `j`, with the pair starting at `next(j)` which lands before
/// `next(i)`. With `REVERSE_BOTH` the pair is reversed as well.
pub(crate) struct SwapTriplePairReversed<const REVERSE_BOTH: bool> {
    instance: Arc<Instance>,
}

impl<const REVERSE_BOTH: bool> SwapTriplePairReversed<REVERSE_BOTH> {
    pub(crate) fn new(instance: Arc<Instance>) -> Self {
        Self { instance }
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct Cache {
    v: i32,
    next: i32,
    prevprev: i32,
    prevprevprev: i32,
    nextnext: i32,
    nextnextnext: i32,
    seq1rem: f64,
    seq2rem: f64,
}

impl<const REVERSE_BOTH: bool> Neighborhood for SwapTriplePairReversed<REVERSE_BOTH> {
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

        let j_next = solution.next_vertex_of(j_route, j);
        let j_next_next = solution.next_vertex_of(j_route, j_next);
        let j_next_next_next = solution.next_vertex_of(j_route, j_next_next);

        let i_sequence_rem =
            -solution.cost_prev_vertex(i_route, i_prev_prev) - solution.cost_prev_vertex(i_route, i_next);
        let j_sequence_rem =
            -solution.cost_prev_vertex(j_route, j_next) - solution.cost_prev_vertex(j_route, j_next_next_next);

        let i_sequence_add = self.instance.cost(j_next_next_next, i_prev_prev) + self.instance.cost(i, j);

        let j_sequence_add = if REVERSE_BOTH {
            self.instance.cost(i_prev_prev_prev, j_next_next) + self.instance.cost(j_next, i_next)
        } else {
            self.instance.cost(i_prev_prev_prev, j_next) + self.instance.cost(j_next_next, i_next)
        };

        i_sequence_add + j_sequence_add + i_sequence_rem + j_sequence_rem
    }

    fn is_feasible(&mut self, solution: &mut Solution, moves: &mut MoveGenerators, index: u32) -> bool {
        let i = moves.get(index).first_vertex();
        let j = moves.get(index).second_vertex();

        let i_route = solution.route_index_of(i, j);
        let j_route = solution.route_index_of(j, i);

        let i_prev = solution.prev_vertex_of(i_route, i);
        let i_prev_prev = solution.prev_vertex_of(i_route, i_prev);

        let j_next = solution.next_vertex_of(j_route, j);
        let j_next_next = solution.next_vertex_of(j_route, j_next);

        (i_route != j_route
            && i_prev != DEPOT
            && i_prev_prev != DEPOT
            && j_next != DEPOT
            && j_next_next != DEPOT
            && solution.route_load(j_route) - self.instance.demand(j_next) - self.instance.demand(j_next_next)
                + self.instance.demand(i)
                + self.instance.demand(i_prev)
                + self.instance.demand(i_prev_prev)
                <= self.instance.vehicle_capacity()
            && solution.route_load(i_route) + self.instance.demand(j_next) + self.instance.demand(j_next_next)
                - self.instance.demand(i)
                - self.instance.demand(i_prev)
                - self.instance.demand(i_prev_prev)
                <= self.instance.vehicle_capacity())
            || (i_route == j_route
                && j != i_prev
                && j != i_prev_prev
                && j_next != i_prev_prev
                && j_next_next != i_prev_prev
                && j_next_next != solution.prev_vertex_of(i_route, i_prev_prev))
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
        let i_prev_prev_prev_prev = solution.prev_vertex_of(i_route, i_prev_prev_prev);
        let i_prev5 = solution.prev_vertex_of(i_route, i_prev_prev_prev_prev);

        let i_next = solution.next_vertex_of(i_route, i);
        let i_next_next = solution.next_vertex_of(i_route, i_next);
        let i_next_next_next = solution.next_vertex_of(i_route, i_next_next);

        let j_prev = solution.prev_vertex_of(j_route, j);
        let j_prev_prev = solution.prev_vertex_of(j_route, j_prev);

        let j_next = solution.next_vertex_of(j_route, j);
        let j_next_next = solution.next_vertex_of(j_route, j_next);
        let j_next_next_next = solution.next_vertex_of(j_route, j_next_next);
        let j_next_next_next_next = solution.next_vertex_of(j_route, j_next_next_next);
        let j_next5 = solution.next_vertex_of(j_route, j_next_next_next_next);

        affected.insert(i_prev5);
        affected.insert(i_prev_prev_prev_prev);
        affected.insert(i_prev_prev_prev);
        affected.insert(i_prev_prev);
        affected.insert(i_prev);
        affected.insert(i);
        affected.insert(i_next);
        affected.insert(i_next_next);
        affected.insert(i_next_next_next);
        affected.insert(j_prev_prev);
        affected.insert(j_prev);
        affected.insert(j);
        affected.insert(j_next);
        affected.insert(j_next_next);
        affected.insert(j_next_next_next);
        affected.insert(j_next_next_next_next);
        affected.insert(j_next5);

        let bits = moves.update_bits_mut();
        bits.set_second(i_prev5);
        bits.set_second(i_prev_prev_prev_prev);
        bits.set_first(i_prev_prev_prev);
        bits.set_second(i_prev_prev_prev);
        bits.set_first(i_prev_prev);
        bits.set_second(i_prev_prev);
        bits.set_first(i_prev);
        bits.set_second(i_prev);
        bits.set_first(i);
        bits.set_second(i);
        bits.set_first(i_next);
        bits.set_first(i_next_next);
        bits.set_first(i_next_next_next);
        bits.set_first(j_next5);
        bits.set_first(j_next_next_next_next);
        bits.set_first(j_next_next_next);
        bits.set_first(j_next_next);
        bits.set_second(j_next_next);
        bits.set_first(j_next);
        bits.set_second(j_next);
        bits.set_first(j);
        bits.set_second(j);
        bits.set_second(j_prev);
        bits.set_second(j_prev_prev);

        solution.remove_vertex(i_route, i);
        solution.remove_vertex(i_route, i_prev);
        solution.remove_vertex(i_route, i_prev_prev);

        solution.insert_vertex_before(j_route, j_next_next_next, i);
        solution.insert_vertex_before(j_route, j_next_next_next, i_prev);
        solution.insert_vertex_before(j_route, j_next_next_next, i_prev_prev);

        solution.remove_vertex(j_route, j_next);
        solution.remove_vertex(j_route, j_next_next);

        if REVERSE_BOTH {
            solution.insert_vertex_before(i_route, i_next, j_next_next);
            solution.insert_vertex_before(i_route, i_next, j_next);
        } else {
            solution.insert_vertex_before(i_route, i_next, j_next);
            solution.insert_vertex_before(i_route, i_next, j_next_next);
        }
    }

    fn prepare_cache(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        let route = solution.route_index(vertex);
        let prev = solution.prev_vertex(vertex);
        c.next = solution.next_vertex(vertex);
        c.prevprev = solution.prev_vertex_of(route, prev);
        c.prevprevprev = solution.prev_vertex_of(route, c.prevprev);
        c.nextnext = solution.next_vertex_of(route, c.next);
        c.nextnextnext = solution.next_vertex_of(route, c.nextnext);

        let c_v_next = solution.cost_prev_vertex(route, c.next);
        c.seq1rem = -solution.cost_prev_vertex(route, c.prevprev) - c_v_next;
        c.seq2rem = -c_v_next - solution.cost_prev_vertex(route, c.nextnextnext);

        c
    }

    fn prepare_cache_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        let prev = solution.last_customer(route);
        c.next = solution.first_customer(route);
        c.prevprev = solution.prev_vertex(prev);
        c.prevprevprev = solution.prev_vertex_of(route, c.prevprev);
        c.nextnext = solution.next_vertex(c.next);
        c.nextnextnext = solution.next_vertex_of(route, c.nextnext);

        let c_v_next = solution.cost_prev_customer(c.next);
        c.seq1rem = -solution.cost_prev_vertex(route, c.prevprev) - c_v_next;
        c.seq2rem = -c_v_next - solution.cost_prev_vertex(route, c.nextnextnext);

        c
    }

    fn prepare_cache_first(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        let route = solution.route_index(vertex);
        let prev = solution.prev_vertex(vertex);
        c.next = solution.next_vertex(vertex);
        c.prevprev = solution.prev_vertex_of(route, prev);
        c.prevprevprev = solution.prev_vertex_of(route, c.prevprev);

        c.seq1rem = -solution.cost_prev_vertex(route, c.prevprev) - solution.cost_prev_vertex(route, c.next);

        c
    }

    fn prepare_cache_first_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        let prev = solution.last_customer(route);
        c.next = solution.first_customer(route);
        c.prevprev = solution.prev_vertex(prev);
        c.prevprevprev = solution.prev_vertex_of(route, c.prevprev);

        c.seq1rem = -solution.cost_prev_vertex(route, c.prevprev) - solution.cost_prev_customer(c.next);

        c
    }

    fn prepare_cache_second(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        let route = solution.route_index(vertex);
        c.next = solution.next_vertex(vertex);
        c.nextnext = solution.next_vertex_of(route, c.next);
        c.nextnextnext = solution.next_vertex_of(route, c.nextnext);

        c.seq2rem = -solution.cost_prev_vertex(route, c.next) - solution.cost_prev_vertex(route, c.nextnextnext);

        c
    }

    fn prepare_cache_second_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        c.next = solution.first_customer(route);
        c.nextnext = solution.next_vertex(c.next);
        c.nextnextnext = solution.next_vertex_of(route, c.nextnext);

        c.seq2rem = -solution.cost_prev_customer(c.next) - solution.cost_prev_vertex(route, c.nextnextnext);

        c
    }

    fn delta(&self, moves: &MoveGenerators, index: u32, i: &Cache, j: &Cache) -> f64 {
        let seq2add = if REVERSE_BOTH {
            self.instance.cost(i.prevprevprev, j.nextnext) + self.instance.cost(i.next, j.next)
        } else {
            self.instance.cost(i.prevprevprev, j.next) + self.instance.cost(j.nextnext, i.next)
        };

        self.instance.cost(j.nextnextnext, i.prevprev) + moves.edge_cost(index) + seq2add + i.seq1rem + j.seq2rem
    }

    fn delta_pair(&self, moves: &MoveGenerators, index: u32, i: &Cache, j: &Cache) -> (f64, f64) {
        let c_iv_jv = moves.edge_cost(index);

        let (seq2add, seq1add) = if REVERSE_BOTH {
            let c_inext_jnext = self.instance.cost(i.next, j.next);
            (
                self.instance.cost(i.prevprevprev, j.nextnext) + c_inext_jnext,
                self.instance.cost(j.prevprevprev, i.nextnext) + c_inext_jnext,
            )
        } else {
            (
                self.instance.cost(i.prevprevprev, j.next) + self.instance.cost(j.nextnext, i.next),
                self.instance.cost(j.prevprevprev, i.next) + self.instance.cost(i.nextnext, j.next),
            )
        };

        let delta1 = self.instance.cost(j.nextnextnext, i.prevprev) + c_iv_jv + seq2add + i.seq1rem + j.seq2rem;
        let delta2 = self.instance.cost(i.nextnextnext, j.prevprev) + c_iv_jv + seq1add + j.seq1rem + i.seq2rem;

        (delta1, delta2)
    }
}
