use crate::algorithms::structures::SparseIntSet;
use crate::models::problem::DEPOT;
use crate::models::{Instance, Solution};
use crate::solver::search::{MoveGenerators, Neighborhood};
use std::sync::Arc;

/// Inter-route two-opt variant joining `i` with `j` and `next(i)` with
/// `next(j)`, which reverses one side of each resulting route. Capacity is
/// checked through the cumulative route loads.
pub(crate) struct Split {
    instance: Arc<Instance>,
}

impl Split {
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

impl Neighborhood for Split {
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

        let i_route = solution.route_index_of(i, j);
        let j_route = solution.route_index_of(j, i);

        i_route != j_route
            && solution.load_before_included(i) + solution.load_before_included(j) <= self.instance.vehicle_capacity()
            && solution.load_after_included(j) - self.instance.demand(j) + solution.load_after_included(i)
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

        let i_route = solution.route_index_of(i, j);
        let j_route = solution.route_index_of(j, i);

        debug_assert_ne!(solution.first_customer(i_route), DEPOT);
        debug_assert_ne!(solution.first_customer(j_route), DEPOT);

        affected.insert(DEPOT);
        let mut curr = i;
        while curr != DEPOT {
            affected.insert(curr);
            curr = solution.next_vertex(curr);
        }

        let j_next_next = solution.next_vertex_of(j_route, solution.next_vertex(j));
        // The walk below must stop at the depot when the route wraps early.
        let j_stop = if j_next_next == solution.first_customer(j_route) { DEPOT } else { j_next_next };
        let mut curr = solution.first_customer(j_route);
        while curr != j_stop {
            affected.insert(curr);
            curr = solution.next_vertex(curr);
        }

        solution.split(i, i_route, j, j_route);

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
