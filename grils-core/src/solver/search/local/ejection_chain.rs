#[cfg(test)]
#[path = "../../../../tests/unit/solver/search/local/ejection_chain_test.rs"]
mod ejection_chain_test;

use crate::algorithms::structures::{FlatMap, FlatSetMatrix, HeapSlot, IndexedBinaryHeap, SparseIntSet, UNHEAPED};
use crate::models::problem::DEPOT;
use crate::models::{Instance, Solution};
use crate::solver::search::{MoveGenerators, Neighborhood};
use std::sync::Arc;

/// Maximum number of relocation tree nodes explored per generating move.
const MAX_RELOCATION_NODES: usize = 25;

/// A node of the relocation tree: one tentative relocate move plus the
/// cumulative delta and the route loads as modified by the chain so far.
struct Relocation {
    heap_index: i32,
    predecessor: i32,
    delta_sum: f64,
    move_index: u32,
    modified_loads: FlatMap<i32>,
}

impl Relocation {
    fn new() -> Self {
        Self {
            heap_index: UNHEAPED,
            predecessor: -1,
            delta_sum: 0.,
            move_index: 0,
            modified_loads: FlatMap::new(MAX_RELOCATION_NODES),
        }
    }
}

impl HeapSlot for Relocation {
    fn heap_index(&self) -> i32 {
        self.heap_index
    }

    fn set_heap_index(&mut self, index: i32) {
        self.heap_index = index;
    }

    fn heap_key(&self) -> f64 {
        self.delta_sum
    }

    fn set_heap_key(&mut self, key: f64) {
        self.delta_sum = key;
    }
}

/// An ejection chain stitched from relocations: starting from a capacity
/// infeasible relocate of `i` before `j`, it keeps relocating a customer out
/// of the just overloaded route until some chain restores feasibility, the
/// cumulative delta stops improving, or the node budget runs out.
pub(crate) struct EjectionChain {
    instance: Arc<Instance>,
    tolerance: f64,
    /// Vertices whose outgoing arcs a chain node already rewired; rows
    /// follow the relocation tree, a child row is cloned from its parent.
    forbidden_i: FlatSetMatrix,
    /// Vertices which a chain node may no longer use as relocation targets.
    forbidden_j: FlatSetMatrix,
    relocation_nodes: Vec<Relocation>,
    feasible_rni: i32,
    computed_for_chain: Vec<u32>,
    relo_heap: IndexedBinaryHeap,
    scratch_loads: FlatMap<i32>,
}

impl EjectionChain {
    pub(crate) fn new(instance: Arc<Instance>, tolerance: f64) -> Self {
        Self {
            instance,
            tolerance,
            forbidden_i: FlatSetMatrix::new(MAX_RELOCATION_NODES, 2 * MAX_RELOCATION_NODES + 3),
            forbidden_j: FlatSetMatrix::new(MAX_RELOCATION_NODES, 3 * MAX_RELOCATION_NODES),
            relocation_nodes: (0..MAX_RELOCATION_NODES).map(|_| Relocation::new()).collect(),
            feasible_rni: -1,
            computed_for_chain: Vec::new(),
            relo_heap: IndexedBinaryHeap::new(),
            scratch_loads: FlatMap::new(MAX_RELOCATION_NODES),
        }
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct Cache {
    v: i32,
    prev: i32,
    next: i32,
    vrem: f64,
    prevrem: f64,
}

impl Neighborhood for EjectionChain {
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

        if j == i_next {
            return 0.;
        }

        -solution.cost_prev_vertex(i_route, i) - solution.cost_prev_vertex(i_route, i_next)
            + self.instance.cost(i_prev, i_next)
            - solution.cost_prev_vertex(j_route, j)
            + self.instance.cost(j_prev, i)
            + moves.edge_cost(index)
    }

    /// The feasibility step searches the relocation tree rooted at the
    /// generating move. It returns true when the generating move is feasible
    /// on its own, or when some chain of follow-up relocations restores
    /// feasibility within the node budget.
    fn is_feasible(&mut self, solution: &mut Solution, moves: &mut MoveGenerators, index: u32) -> bool {
        let mut rni: usize = 0;
        self.feasible_rni = -1;

        {
            let i = moves.get(index).first_vertex();
            let j = moves.get(index).second_vertex();

            let i_route = solution.route_index_of(i, j);
            let j_route = solution.route_index_of(j, i);

            let i_prev = solution.prev_vertex_of(i_route, i);
            let i_next = solution.next_vertex_of(i_route, i);
            let j_prev = solution.prev_vertex_of(j_route, j);

            debug_assert_ne!(j, i_next);

            self.relocation_nodes[rni].move_index = index;

            if i_route == j_route
                || solution.route_load(j_route) + self.instance.demand(i) <= self.instance.vehicle_capacity()
            {
                // The generating move is already a feasible relocation.
                self.feasible_rni = 0;
                self.relocation_nodes[0].predecessor = -1;
                self.forbidden_i.reset(0);
                self.forbidden_j.reset(0);
                self.forbidden_i.set(0, i_prev);
                self.forbidden_i.set(0, i);
                self.forbidden_i.set(0, i_next);
                self.forbidden_i.set(0, j_prev);
                self.forbidden_i.set(0, j);
                return true;
            }

            self.relocation_nodes[rni].delta_sum = moves.get(index).delta();

            self.forbidden_i.reset(rni);
            self.forbidden_i.set(rni, i_prev);
            self.forbidden_i.set(rni, j_prev);

            self.forbidden_j.reset(rni);
            self.forbidden_j.set(rni, i);
            self.forbidden_j.set(rni, i_next);
            self.forbidden_j.set(rni, j);

            self.relocation_nodes[rni].modified_loads.clear();
            self.relocation_nodes[rni]
                .modified_loads
                .set(i_route, solution.route_load(i_route) - self.instance.demand(i));
            self.relocation_nodes[rni]
                .modified_loads
                .set(j_route, solution.route_load(j_route) + self.instance.demand(i));
            self.relocation_nodes[rni].predecessor = -1;

            self.relo_heap.reset(&mut self.relocation_nodes);
            self.relo_heap.insert(&mut self.relocation_nodes, rni as u32);
            rni += 1;
        }

        'search: while let Some(curr) = self.relo_heap.pop(&mut self.relocation_nodes) {
            let curr_index = curr as usize;
            let curr_move = self.relocation_nodes[curr_index].move_index;
            let curr_delta_sum = self.relocation_nodes[curr_index].delta_sum;
            self.scratch_loads.copy_from(&self.relocation_nodes[curr_index].modified_loads);

            // The route we are trying to make feasible again.
            let i_route = solution.route_index(moves.get(curr_move).second_vertex());
            let i_route_load =
                self.scratch_loads.get(i_route).expect("the overloaded route is tracked by its chain node");

            // Scan the route for customers whose removal restores feasibility.
            let mut i = solution.first_customer(i_route);
            while i != DEPOT {
                let i_demand = self.instance.demand(i);
                if i_route_load - i_demand > self.instance.vehicle_capacity() {
                    i = solution.next_vertex(i);
                    continue;
                }

                // Route segments already rewired by the chain must stay put.
                if self.forbidden_i.is_set(curr_index, i) || self.forbidden_j.is_set(curr_index, i) {
                    i = solution.next_vertex(i);
                    continue;
                }

                let i_prev = solution.prev_vertex_of(i_route, i);
                let i_next = solution.next_vertex_of(i_route, i);

                // Arc costs are expensive to recompute; fill lazily.
                let mut i_cost = 0.;
                let mut i_cost_computed = false;

                for n in 0..moves.indices_involving_1st(i).len() {
                    let move_idx = moves.indices_involving_1st(i)[n];
                    let j = moves.get(move_idx).second_vertex();

                    if j == DEPOT || self.forbidden_j.is_set(curr_index, j) {
                        continue;
                    }

                    // Relocate into a different route to make space here.
                    let j_route = solution.route_index(j);
                    if j_route == i_route {
                        continue;
                    }

                    let j_route_load = self.scratch_loads.get(j_route).unwrap_or(solution.route_load(j_route));
                    let j_prev = solution.prev_vertex_of(j_route, j);

                    // Active move generators may carry stale deltas: only
                    // heaped moves and moves already computed on demand are
                    // current.
                    if moves.get(move_idx).heap_index() == UNHEAPED && !moves.get(move_idx).is_computed_for_chain() {
                        if !i_cost_computed {
                            i_cost = -solution.cost_prev_customer(i) - solution.cost_prev_vertex(i_route, i_next)
                                + self.instance.cost(i_prev, i_next);
                            i_cost_computed = true;
                        }

                        let delta = i_cost - solution.cost_prev_customer(j)
                            + self.instance.cost(j_prev, i)
                            + moves.edge_cost(move_idx);
                        moves.get_mut(move_idx).set_delta(delta);
                        moves.get_mut(move_idx).set_computed_for_chain(true);
                        self.computed_for_chain.push(move_idx);
                    }

                    // Only extend chains which keep improving.
                    if moves.get(move_idx).delta() + curr_delta_sum > -self.tolerance {
                        continue;
                    }

                    // This relocation restores the current route, possibly
                    // overloading the target: fork a new chain node.
                    self.relocation_nodes[rni].move_index = move_idx;
                    self.relocation_nodes[rni].delta_sum = curr_delta_sum + moves.get(move_idx).delta();

                    self.forbidden_i.overwrite(curr_index, rni);
                    self.forbidden_i.set(rni, i_prev);
                    self.forbidden_i.set(rni, j_prev);

                    self.forbidden_j.overwrite(curr_index, rni);
                    self.forbidden_j.set(rni, i);
                    self.forbidden_j.set(rni, i_next);
                    self.forbidden_j.set(rni, j);

                    self.relocation_nodes[rni].modified_loads.copy_from(&self.scratch_loads);
                    self.relocation_nodes[rni].modified_loads.set(i_route, i_route_load - i_demand);
                    self.relocation_nodes[rni].modified_loads.set(j_route, j_route_load + i_demand);

                    self.relocation_nodes[rni].predecessor = curr_index as i32;
                    self.relo_heap.insert(&mut self.relocation_nodes, rni as u32);

                    if j_route_load + i_demand <= self.instance.vehicle_capacity() {
                        // The whole chain is feasible.
                        self.feasible_rni = rni as i32;
                        break 'search;
                    }

                    rni += 1;
                    if rni == MAX_RELOCATION_NODES {
                        break 'search;
                    }
                }

                i = solution.next_vertex(i);
            }
        }

        self.feasible_rni != -1
    }

    fn execute(
        &mut self,
        solution: &mut Solution,
        moves: &mut MoveGenerators,
        _index: u32,
        affected: &mut SparseIntSet,
    ) {
        let feasible_rni = self.feasible_rni as usize;

        for vertex in self.forbidden_i.row(feasible_rni) {
            affected.insert(vertex);
        }
        for vertex in self.forbidden_j.row(feasible_rni) {
            affected.insert(vertex);
        }

        // Invalidate the on-demand deltas of affected vertices.
        for n in 0..affected.len() {
            let vertex = affected.elements()[n];
            for m in 0..moves.indices_involving_1st(vertex).len() {
                let base_idx = MoveGenerators::base_index(moves.indices_involving_1st(vertex)[m]);
                moves.get_mut(base_idx).set_computed_for_chain(false);
                moves.get_mut(MoveGenerators::twin_index(base_idx)).set_computed_for_chain(false);
            }
        }

        // Apply the chain from its feasible leaf back to the root.
        let mut ptr = self.feasible_rni;
        while ptr != -1 {
            let move_idx = self.relocation_nodes[ptr as usize].move_index;

            let i = moves.get(move_idx).first_vertex();
            let j = moves.get(move_idx).second_vertex();

            let i_route = solution.route_index_of(i, j);
            let j_route = solution.route_index_of(j, i);

            let i_prev = solution.prev_vertex_of(i_route, i);
            let i_next = solution.next_vertex_of(i_route, i);
            let j_prev = solution.prev_vertex_of(j_route, j);

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

            ptr = self.relocation_nodes[ptr as usize].predecessor;
        }
    }

    fn post_processing(&mut self, _solution: &mut Solution, moves: &mut MoveGenerators) {
        // Reset the remaining on-demand deltas.
        for &move_idx in &self.computed_for_chain {
            let base_idx = MoveGenerators::base_index(move_idx);
            moves.get_mut(base_idx).set_computed_for_chain(false);
            moves.get_mut(MoveGenerators::twin_index(base_idx)).set_computed_for_chain(false);
        }
        self.computed_for_chain.clear();
    }

    fn prepare_cache(&self, solution: &Solution, vertex: i32) -> Cache {
        debug_assert_ne!(vertex, DEPOT);
        let mut c = Cache { v: vertex, ..Cache::default() };
        c.prev = solution.prev_vertex(vertex);
        c.next = solution.next_vertex(vertex);
        let route = solution.route_index(vertex);

        c.vrem = -solution.cost_prev_customer(c.v) - solution.cost_prev_vertex(route, c.next)
            + self.instance.cost(c.prev, c.next);
        c.prevrem = -solution.cost_prev_customer(c.v);

        c
    }

    fn prepare_cache_depot(&self, solution: &Solution, backup: i32) -> Cache {
        debug_assert_ne!(backup, DEPOT);
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
        c.prev = solution.prev_vertex(vertex);
        c.next = solution.next_vertex(vertex);
        let route = solution.route_index(vertex);
        c.vrem = -solution.cost_prev_customer(c.v) - solution.cost_prev_vertex(route, c.next)
            + self.instance.cost(c.prev, c.next);
        c
    }

    fn prepare_cache_first_depot(&self, solution: &Solution, backup: i32) -> Cache {
        debug_assert_ne!(backup, DEPOT);
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
        debug_assert_ne!(backup, DEPOT);
        let mut c = Cache { v: DEPOT, ..Cache::default() };
        let route = solution.route_index(backup);
        c.prev = solution.last_customer(route);
        c.prevrem = -solution.cost_prev_depot(route);
        c
    }

    fn delta(&self, moves: &MoveGenerators, index: u32, i: &Cache, j: &Cache) -> f64 {
        if j.v != i.next {
            i.vrem + j.prevrem + self.instance.cost(j.prev, i.v) + moves.edge_cost(index)
        } else {
            0.
        }
    }

    fn delta_pair(&self, moves: &MoveGenerators, index: u32, i: &Cache, j: &Cache) -> (f64, f64) {
        let c_iv_jv = moves.edge_cost(index);

        let delta1 = if j.v != i.next {
            i.vrem + j.prevrem + self.instance.cost(j.prev, i.v) + c_iv_jv
        } else {
            0.
        };
        let delta2 = if i.v != j.next {
            j.vrem + i.prevrem + self.instance.cost(i.prev, j.v) + c_iv_jv
        } else {
            0.
        };

        (delta1, delta2)
    }
}
