#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/local/relocate_triple_rev_test.rs"]
mod relocate_triple_rev_test;

use crate::algorithms::structures::SparseIntSet;
use crate::models::problem::DEPOT;
use crate::models::{Instance, Solution};
use crate::solver::search::{MoveGenerators, Neighborhood};
use std::sync::Arc;

/// Relocates the three customer string ending at `i` right after `j`,
/// reversed: the route continues `j, i, prev(i), prevprev(i), next(j)`.
pub(crate) struct RelocateTripleReversed {
    instance: Arc<Instance>,
}

impl RelocateTripleReversed {
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
    seqrem: f64,
    nextrem: f64,
}

impl Neighborhood for RelocateTripleReversed {
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

        let i_sequence_rem =
            -solution.cost_prev_vertex(i_route, i_prev_prev) - solution.cost_prev_vertex(i_route, i_next);
        let j_sequence_rem = -solution.cost_prev_vertex(j_route, j_next);
        let i_sequence_add = self.instance.cost(j_next, i_prev_prev) + self.instance.cost(i, j);
        let i_filling = self.instance.cost(i_prev_prev_prev, i_next);

        i_sequence_add + i_filling + i_sequence_rem + j_sequence_rem
    }

    fn is_feasible(&mut self, solution: &mut Solution, moves: &mut MoveGenerators, index: u32) -> bool {
        let i = moves.get(index).first_vertex();
        let j = moves.get(index).second_vertex();

        let i_route = solution.route_index_of(i, j);
        let j_route = solution.route_index_of(j, i);

        let i_prev = solution.prev_vertex_of(i_route, i);
        let i_prev_prev = solution.prev_vertex_of(i_route, i_prev);

        (i_route != j_route
            && i_prev != DEPOT
            && i_prev_prev != DEPOT
            && solution.route_load(j_route)
                + self.instance.demand(i)
                + self.instance.demand(i_prev)
                + self.instance.demand(i_prev_prev)
                <= self.instance.vehicle_capacity())
            || (i_route == j_route
                && j != i_prev
                && j != i_prev_prev
                && j != solution.prev_vertex_of(i_route, i_prev_prev))
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
        affected.insert(j);
        affected.insert(j_next);
        affected.insert(j_next_next);
        affected.insert(j_next_next_next);

        let bits = moves.update_bits_mut();
        bits.set_first(i_prev_prev_prev);
        bits.set_second(i_prev_prev_prev);
        bits.set_first(i_prev_prev);
        // Predecessors along the relocated string change due to the reversal.
        bits.set_second(i_prev_prev);
        bits.set_first(i_prev);
        bits.set_second(i_prev);
        bits.set_first(i);
        bits.set_second(i);
        bits.set_first(i_next);
        bits.set_first(i_next_next);
        bits.set_first(i_next_next_next);
        bits.set_first(j_next_next_next);
        bits.set_first(j_next_next);
        bits.set_first(j_next);
        bits.set_first(j);
        bits.set_second(j);

        solution.remove_vertex(i_route, i);
        solution.remove_vertex(i_route, i_prev);
        solution.remove_vertex(i_route, i_prev_prev);

        solution.insert_vertex_before(j_route, j_next, i);
        solution.insert_vertex_before(j_route, j_next, i_prev);
        solution.insert_vertex_before(j_route, j_next, i_prev_prev);

        if solution.is_route_empty(i_route) {
            solution.remove_route(i_route);
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

        let c_v_next = solution.cost_prev_vertex(route, c.next);
        c.seqrem = -solution.cost_prev_vertex(route, c.prevprev) - c_v_next
            + self.instance.cost(c.prevprevprev, c.next);
        c.nextrem = -c_v_next;

        c
    }

    fn prepare_cache_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        let prev = solution.last_customer(route);
        c.next = solution.first_customer(route);
        c.prevprev = solution.prev_vertex(prev);
        c.prevprevprev = solution.prev_vertex_of(route, c.prevprev);

        let c_v_next = solution.cost_prev_customer(c.next);
        c.seqrem = -solution.cost_prev_vertex(route, c.prevprev) - c_v_next
            + self.instance.cost(c.prevprevprev, c.next);
        c.nextrem = -c_v_next;

        c
    }

    fn prepare_cache_first(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        let route = solution.route_index(vertex);
        let prev = solution.prev_vertex(vertex);
        let next = solution.next_vertex(vertex);
        c.next = next;
        c.prevprev = solution.prev_vertex_of(route, prev);
        let prevprevprev = solution.prev_vertex_of(route, c.prevprev);
        c.prevprevprev = prevprevprev;

        c.seqrem = -solution.cost_prev_vertex(route, c.prevprev) - solution.cost_prev_vertex(route, next)
            + self.instance.cost(prevprevprev, next);

        c
    }

    fn prepare_cache_first_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        let prev = solution.last_customer(route);
        let next = solution.first_customer(route);
        c.next = next;
        c.prevprev = solution.prev_vertex(prev);
        let prevprevprev = solution.prev_vertex_of(route, c.prevprev);
        c.prevprevprev = prevprevprev;

        c.seqrem = -solution.cost_prev_vertex(route, c.prevprev) - solution.cost_prev_customer(next)
            + self.instance.cost(prevprevprev, next);

        c
    }

    fn prepare_cache_second(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        let route = solution.route_index(vertex);
        c.next = solution.next_vertex(vertex);
        c.nextrem = -solution.cost_prev_vertex(route, c.next);

        c
    }

    fn prepare_cache_second_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        c.next = solution.first_customer(route);
        c.nextrem = -solution.cost_prev_customer(c.next);

        c
    }

    fn delta(&self, moves: &MoveGenerators, index: u32, i: &Cache, j: &Cache) -> f64 {
        self.instance.cost(j.next, i.prevprev) + moves.edge_cost(index) + i.seqrem + j.nextrem
    }

    fn delta_pair(&self, moves: &MoveGenerators, index: u32, i: &Cache, j: &Cache) -> (f64, f64) {
        let c_iv_jv = moves.edge_cost(index);

        let delta1 = self.instance.cost(j.next, i.prevprev) + c_iv_jv + i.seqrem + j.nextrem;
        let delta2 = self.instance.cost(i.next, j.prevprev) + c_iv_jv + j.seqrem + i.nextrem;

        (delta1, delta2)
    }
}
