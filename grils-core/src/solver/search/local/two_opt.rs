#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/local/two_opt_test.rs"]
mod two_opt_test;

use crate::algorithms::structures::SparseIntSet;
use crate::models::problem::DEPOT;
use crate::models::{Instance, Solution};
use crate::solver::search::{MoveGenerators, Neighborhood};
use std::sync::Arc;

/// Intra-route two-opt: replaces the arcs `(i, next(i))` and `(j, next(j))`
/// with `(i, j)` and `(next(j), next(i))`, reversing the path in between.
pub(crate) struct TwoOpt {
    instance: Arc<Instance>,
}

impl TwoOpt {
    pub(crate) fn new(instance: Arc<Instance>) -> Self {
        Self { instance }
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct Cache {
    v: i32,
    next: i32,
    seqrem: f64,
}

impl Neighborhood for TwoOpt {
    const SYMMETRIC: bool = true;
    type Cache = Cache;

    fn compute_cost(&self, solution: &Solution, moves: &MoveGenerators, index: u32) -> f64 {
        let i = moves.get(index).first_vertex();
        let j = moves.get(index).second_vertex();

        let i_route = solution.route_index_of(i, j);
        let j_route = solution.route_index_of(j, i);

        let i_next = solution.next_vertex_of(i_route, i);
        let j_next = solution.next_vertex_of(j_route, j);

        -solution.cost_prev_vertex(i_route, i_next) + self.instance.cost(i, j)
            - solution.cost_prev_vertex(j_route, j_next)
            + self.instance.cost(j_next, i_next)
    }

    fn is_feasible(&mut self, solution: &mut Solution, moves: &mut MoveGenerators, index: u32) -> bool {
        let i = moves.get(index).first_vertex();
        let j = moves.get(index).second_vertex();

        solution.route_index_of(i, j) == solution.route_index_of(j, i)
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

        let route = solution.route_index_of(i, j);

        debug_assert_ne!(solution.first_customer(route), DEPOT);

        // The reversed stretch plus its neighbors need fresh deltas. The
        // do-while form matters for four vertex tours where the walk wraps.
        let j_next_next = solution.next_vertex_of(route, solution.next_vertex_of(route, j));
        let mut curr = i;
        loop {
            affected.insert(curr);
            curr = solution.next_vertex_of(route, curr);
            if curr == j_next_next {
                break;
            }
        }

        let i_next = solution.next_vertex_of(route, i);

        solution.reverse_route_path(route, i_next, j);
    }

    fn prepare_cache(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        c.next = solution.next_vertex(vertex);
        let route = solution.route_index(vertex);
        c.seqrem = -solution.cost_prev_vertex(route, c.next);

        c
    }

    fn prepare_cache_depot(&self, solution: &Solution, backup: i32) -> Cache {
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        c.next = solution.first_customer(route);
        c.seqrem = -solution.cost_prev_customer(c.next);

        c
    }

    fn delta(&self, moves: &MoveGenerators, index: u32, i: &Cache, j: &Cache) -> f64 {
        let i_sequence_add = moves.edge_cost(index) + self.instance.cost(j.next, i.next);
        i_sequence_add + i.seqrem + j.seqrem
    }
}
