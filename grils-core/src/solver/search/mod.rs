//! The local search machinery: the move generator store, the shared
//! rough-best-improvement engine and the concrete neighborhoods driven by it.

mod move_gens;
pub use self::move_gens::{MoveGenerator, MoveGenerators, UpdateBits};

pub(crate) mod local;

mod rvnd;
pub use self::rvnd::{NeighborhoodComposer, OperatorTag, RandomizedVnd};

mod ruin_recreate;
pub use self::ruin_recreate::RuinAndRecreate;

use crate::algorithms::structures::{HeapSlot, SparseIntSet, UNHEAPED};
use crate::models::problem::DEPOT;
use crate::models::Solution;

/// A concrete neighborhood: the operator specific part of a local search
/// operator. The surrounding [`CommonOperator`] engine owns initialization,
/// update and descent over the move generator store; the neighborhood
/// supplies move semantics: feasibility, execution and the decomposed delta
/// evaluation through a per-vertex cache.
pub(crate) trait Neighborhood {
    /// Whether the move delta is invariant under swapping the arc endpoints.
    /// Symmetric neighborhoods evaluate one generator per pair.
    const SYMMETRIC: bool;

    /// Precomputed per-vertex state, filled once and combined pairwise to
    /// obtain move deltas without touching the solution again.
    type Cache: Copy + Default;

    /// Performs some setup at the beginning of a local search cycle.
    fn pre_processing(&mut self, _solution: &mut Solution) {}

    /// Performs some cleanup at the end of a local search cycle.
    fn post_processing(&mut self, _solution: &mut Solution, _moves: &mut MoveGenerators) {}

    /// Recomputes the exact move delta from the solution state. Only used by
    /// debug assertions; the engine works with cached deltas.
    fn compute_cost(&self, solution: &Solution, moves: &MoveGenerators, index: u32) -> f64;

    /// Returns whether applying the move keeps the solution feasible.
    fn is_feasible(&mut self, solution: &mut Solution, moves: &mut MoveGenerators, index: u32) -> bool;

    /// Applies the move and records every vertex whose move generators may
    /// now carry a stale delta, together with the role update bits.
    fn execute(
        &mut self,
        solution: &mut Solution,
        moves: &mut MoveGenerators,
        index: u32,
        affected: &mut SparseIntSet,
    );

    /// Fills the cache of a customer for both endpoint roles.
    fn prepare_cache(&self, solution: &Solution, vertex: i32) -> Self::Cache;

    /// Fills the cache of the depot for both endpoint roles; `backup`
    /// identifies the route.
    fn prepare_cache_depot(&self, solution: &Solution, backup: i32) -> Self::Cache;

    /// Fills the cache of a customer for the first endpoint role only.
    fn prepare_cache_first(&self, solution: &Solution, vertex: i32) -> Self::Cache {
        self.prepare_cache(solution, vertex)
    }

    /// Fills the cache of the depot for the first endpoint role only.
    fn prepare_cache_first_depot(&self, solution: &Solution, backup: i32) -> Self::Cache {
        self.prepare_cache_depot(solution, backup)
    }

    /// Fills the cache of a customer for the second endpoint role only.
    fn prepare_cache_second(&self, solution: &Solution, vertex: i32) -> Self::Cache {
        self.prepare_cache(solution, vertex)
    }

    /// Fills the cache of the depot for the second endpoint role only.
    fn prepare_cache_second_depot(&self, solution: &Solution, backup: i32) -> Self::Cache {
        self.prepare_cache_depot(solution, backup)
    }

    /// Combines two caches into the delta of the directed move at `index`,
    /// with `i` in the first role and `j` in the second one.
    fn delta(&self, moves: &MoveGenerators, index: u32, i: &Self::Cache, j: &Self::Cache) -> f64;

    /// Combines two caches into the deltas of the directed move at `index`
    /// and of its twin. Only called for asymmetric neighborhoods.
    fn delta_pair(&self, moves: &MoveGenerators, index: u32, i: &Self::Cache, j: &Self::Cache) -> (f64, f64) {
        let _ = (moves, index, i, j);
        unreachable!("pairwise delta is only defined for asymmetric neighborhoods")
    }
}

/// Type erased local search operator, the unit the composers work with.
pub(crate) trait LocalSearchOperator {
    /// Applies one rough best improvement cycle and returns whether the
    /// solution improved.
    fn apply_rough_best_improvement(&mut self, solution: &mut Solution, moves: &mut MoveGenerators) -> bool;
}

/// The operator independent engine: move generator initialization restricted
/// to recently modified vertices, heap driven descent, and selective delta
/// updates after each applied move.
pub(crate) struct CommonOperator<N: Neighborhood> {
    inner: N,
    tolerance: f64,
    /// When set, moves whose endpoints are not in the solution are skipped,
    /// which makes the engine usable on partial solutions.
    partial: bool,
    affected: SparseIntSet,
}

impl<N: Neighborhood> CommonOperator<N> {
    pub(crate) fn new(inner: N, tolerance: f64, partial: bool, vertices_num: usize) -> Self {
        Self { inner, tolerance, partial, affected: SparseIntSet::new(vertices_num) }
    }

    fn initialize_descriptors(&mut self, solution: &Solution, moves: &mut MoveGenerators) {
        let current = moves.timestamp() + 1;
        let mut depot = false;

        for i in solution.recent_vertices() {
            if self.partial && !solution.is_vertex_in_solution(i) {
                continue;
            }

            // Postpone the depot: processing it last maximizes reuse of the
            // customer caches computed here.
            if i == DEPOT {
                depot = true;
                continue;
            }

            let icache = self.inner.prepare_cache(solution, i);
            self.init_vertex(solution, moves, i, &icache, current);

            moves.set_vertex_timestamp(i, current);
        }

        if depot {
            self.init_depot(solution, moves, current);
            moves.set_vertex_timestamp(DEPOT, current);
        }

        moves.increment_timestamp();
    }

    fn init_vertex(
        &mut self,
        solution: &Solution,
        moves: &mut MoveGenerators,
        i: i32,
        icache: &N::Cache,
        current: u64,
    ) {
        for n in 0..moves.indices_involving_1st(i).len() {
            let move_idx = moves.indices_involving_1st(i)[n];
            let j = moves.get(move_idx).second_vertex();

            if self.partial && !solution.is_vertex_in_solution(j) {
                continue;
            }

            // Skip when `(j, i)` was already initialized through `j`, which
            // happens when both endpoints are in the localization window.
            if moves.vertex_timestamp(j) == current {
                continue;
            }

            let jcache = if j == DEPOT {
                self.inner.prepare_cache_depot(solution, i)
            } else {
                self.inner.prepare_cache(solution, j)
            };

            if N::SYMMETRIC {
                // One generator per pair, identified by the base index.
                let base_idx = MoveGenerators::base_index(move_idx);
                let delta = self.inner.delta(moves, base_idx, icache, &jcache);

                let pair = moves.get_mut(base_idx);
                pair.set_delta(delta);
                pair.set_heap_index(UNHEAPED);
                if delta < -self.tolerance {
                    moves.heap_insert(base_idx);
                }
            } else {
                let (delta1, delta2) = self.inner.delta_pair(moves, move_idx, icache, &jcache);

                let forward = moves.get_mut(move_idx);
                forward.set_delta(delta1);
                forward.set_heap_index(UNHEAPED);
                if delta1 < -self.tolerance {
                    moves.heap_insert(move_idx);
                }

                let twin_idx = MoveGenerators::twin_index(move_idx);
                let twin = moves.get_mut(twin_idx);
                twin.set_delta(delta2);
                twin.set_heap_index(UNHEAPED);
                if delta2 < -self.tolerance {
                    moves.heap_insert(twin_idx);
                }
            }
        }
    }

    fn init_depot(&mut self, solution: &Solution, moves: &mut MoveGenerators, current: u64) {
        for n in 0..moves.indices_involving_1st(DEPOT).len() {
            let move_idx = moves.indices_involving_1st(DEPOT)[n];
            let j = moves.get(move_idx).second_vertex();

            if self.partial && !solution.is_vertex_in_solution(j) {
                continue;
            }
            if moves.vertex_timestamp(j) == current {
                continue;
            }

            // Since the first endpoint is the depot, `j` cannot be.
            let icache = self.inner.prepare_cache_depot(solution, j);
            let jcache = self.inner.prepare_cache(solution, j);

            if N::SYMMETRIC {
                let base_idx = MoveGenerators::base_index(move_idx);
                let delta = self.inner.delta(moves, base_idx, &icache, &jcache);

                let pair = moves.get_mut(base_idx);
                pair.set_delta(delta);
                pair.set_heap_index(UNHEAPED);
                if delta < -self.tolerance {
                    moves.heap_insert(base_idx);
                }
            } else {
                let (delta1, delta2) = self.inner.delta_pair(moves, move_idx, &icache, &jcache);

                let forward = moves.get_mut(move_idx);
                forward.set_delta(delta1);
                forward.set_heap_index(UNHEAPED);
                if delta1 < -self.tolerance {
                    moves.heap_insert(move_idx);
                }

                let twin_idx = MoveGenerators::twin_index(move_idx);
                let twin = moves.get_mut(twin_idx);
                twin.set_delta(delta2);
                twin.set_heap_index(UNHEAPED);
                if delta2 < -self.tolerance {
                    moves.heap_insert(twin_idx);
                }
            }
        }
    }

    fn heap_insert_or_update(moves: &mut MoveGenerators, index: u32, delta: f64, tolerance: f64) {
        let hindex = moves.get(index).heap_index();
        if delta > -tolerance {
            if hindex != UNHEAPED {
                moves.heap_remove(hindex);
            }
            moves.get_mut(index).set_delta(delta);
        } else if hindex == UNHEAPED {
            moves.get_mut(index).set_delta(delta);
            moves.heap_insert(index);
        } else {
            moves.heap_change_key(hindex, delta);
        }
    }

    fn update_descriptors(&mut self, solution: &Solution, moves: &mut MoveGenerators) {
        if N::SYMMETRIC {
            self.symmetric_update(solution, moves);
        } else {
            self.asymmetric_update(solution, moves);
        }
    }

    fn symmetric_update(&mut self, solution: &Solution, moves: &mut MoveGenerators) {
        let current = moves.timestamp() + 1;
        let mut depot = false;

        for n in 0..self.affected.len() {
            let i = self.affected.elements()[n];

            if self.partial && !solution.is_vertex_in_solution(i) {
                continue;
            }
            if i == DEPOT {
                depot = true;
                continue;
            }

            let icache = self.inner.prepare_cache(solution, i);

            for m in 0..moves.indices_involving_1st(i).len() {
                let move_idx = moves.indices_involving_1st(i)[m];
                let j = moves.get(move_idx).second_vertex();

                if self.partial && !solution.is_vertex_in_solution(j) {
                    continue;
                }
                if moves.vertex_timestamp(j) == current {
                    continue;
                }

                let jcache = if j == DEPOT {
                    self.inner.prepare_cache_depot(solution, i)
                } else {
                    self.inner.prepare_cache(solution, j)
                };

                let base_idx = MoveGenerators::base_index(move_idx);
                let delta = self.inner.delta(moves, base_idx, &icache, &jcache);
                Self::heap_insert_or_update(moves, base_idx, delta, self.tolerance);
            }
        }

        if depot {
            for m in 0..moves.indices_involving_1st(DEPOT).len() {
                let move_idx = moves.indices_involving_1st(DEPOT)[m];
                let j = moves.get(move_idx).second_vertex();

                if self.partial && !solution.is_vertex_in_solution(j) {
                    continue;
                }
                if moves.vertex_timestamp(j) == current {
                    continue;
                }

                let icache = self.inner.prepare_cache_depot(solution, j);
                let jcache = self.inner.prepare_cache(solution, j);

                let base_idx = MoveGenerators::base_index(move_idx);
                let delta = self.inner.delta(moves, base_idx, &icache, &jcache);
                Self::heap_insert_or_update(moves, base_idx, delta, self.tolerance);
            }

            moves.set_vertex_timestamp(DEPOT, current);
        }

        moves.increment_timestamp();
    }

    fn asymmetric_update(&mut self, solution: &Solution, moves: &mut MoveGenerators) {
        let current = moves.timestamp() + 1;
        let mut depot = false;

        for n in 0..self.affected.len() {
            let i = self.affected.elements()[n];

            if self.partial && !solution.is_vertex_in_solution(i) {
                continue;
            }
            if i == DEPOT {
                depot = true;
                continue;
            }

            let update_first = moves.update_bits().first(i);
            let update_second = moves.update_bits().second(i);

            if update_first && update_second {
                let icache = self.inner.prepare_cache(solution, i);

                for m in 0..moves.indices_involving_1st(i).len() {
                    let move_idx = moves.indices_involving_1st(i)[m];
                    let j = moves.get(move_idx).second_vertex();

                    if self.partial && !solution.is_vertex_in_solution(j) {
                        continue;
                    }

                    // Generators `(i, j)` and `(j, i)` may have been updated
                    // through `j` already; the bits are not symmetric, so
                    // check which directions are still missing.
                    if moves.vertex_timestamp(j) == current {
                        let j_first = moves.update_bits().first(j);
                        let j_second = moves.update_bits().second(j);

                        if j_first && j_second {
                            // Both directions were already refreshed.
                        } else if j_first {
                            // `(j, i)` was refreshed, update `(i, j)` only.
                            let jcache = if j == DEPOT {
                                self.inner.prepare_cache_second_depot(solution, i)
                            } else {
                                self.inner.prepare_cache_second(solution, j)
                            };
                            let delta = self.inner.delta(moves, move_idx, &icache, &jcache);
                            Self::heap_insert_or_update(moves, move_idx, delta, self.tolerance);
                        } else if j_second {
                            // `(i, j)` was refreshed, update `(j, i)` only.
                            let jcache = if j == DEPOT {
                                self.inner.prepare_cache_first_depot(solution, i)
                            } else {
                                self.inner.prepare_cache_first(solution, j)
                            };
                            let twin_idx = MoveGenerators::twin_index(move_idx);
                            let twin_delta = self.inner.delta(moves, twin_idx, &jcache, &icache);
                            Self::heap_insert_or_update(moves, twin_idx, twin_delta, self.tolerance);
                        }
                    } else {
                        let jcache = if j == DEPOT {
                            self.inner.prepare_cache_depot(solution, i)
                        } else {
                            self.inner.prepare_cache(solution, j)
                        };

                        let (delta1, delta2) = self.inner.delta_pair(moves, move_idx, &icache, &jcache);
                        Self::heap_insert_or_update(moves, move_idx, delta1, self.tolerance);
                        Self::heap_insert_or_update(
                            moves,
                            MoveGenerators::twin_index(move_idx),
                            delta2,
                            self.tolerance,
                        );
                    }
                }
            } else if update_first {
                let icache = self.inner.prepare_cache_first(solution, i);

                for m in 0..moves.indices_involving_1st(i).len() {
                    let move_idx = moves.indices_involving_1st(i)[m];
                    let j = moves.get(move_idx).second_vertex();

                    if self.partial && !solution.is_vertex_in_solution(j) {
                        continue;
                    }

                    let refreshed_through_j = moves.vertex_timestamp(j) == current && moves.update_bits().second(j);
                    if !refreshed_through_j {
                        let jcache = if j == DEPOT {
                            self.inner.prepare_cache_second_depot(solution, i)
                        } else {
                            self.inner.prepare_cache_second(solution, j)
                        };
                        let delta = self.inner.delta(moves, move_idx, &icache, &jcache);
                        Self::heap_insert_or_update(moves, move_idx, delta, self.tolerance);
                    }
                }
            } else if update_second {
                let icache = self.inner.prepare_cache_second(solution, i);

                for m in 0..moves.indices_involving_1st(i).len() {
                    let twin_idx = MoveGenerators::twin_index(moves.indices_involving_1st(i)[m]);
                    let j = moves.get(twin_idx).first_vertex();

                    if self.partial && !solution.is_vertex_in_solution(j) {
                        continue;
                    }

                    let refreshed_through_j = moves.vertex_timestamp(j) == current && moves.update_bits().first(j);
                    if !refreshed_through_j {
                        let jcache = if j == DEPOT {
                            self.inner.prepare_cache_first_depot(solution, i)
                        } else {
                            self.inner.prepare_cache_first(solution, j)
                        };
                        let delta = self.inner.delta(moves, twin_idx, &jcache, &icache);
                        Self::heap_insert_or_update(moves, twin_idx, delta, self.tolerance);
                    }
                }
            }

            moves.set_vertex_timestamp(i, current);
        }

        if depot {
            self.asymmetric_update_depot(solution, moves, current);
        }

        // Reset the update bits of the affected vertices.
        for n in 0..self.affected.len() {
            let i = self.affected.elements()[n];
            moves.update_bits_mut().clear(i);
        }

        moves.increment_timestamp();
    }

    fn asymmetric_update_depot(&mut self, solution: &Solution, moves: &mut MoveGenerators, current: u64) {
        let update_first = moves.update_bits().first(DEPOT);
        let update_second = moves.update_bits().second(DEPOT);

        if update_first && update_second {
            for m in 0..moves.indices_involving_1st(DEPOT).len() {
                let move_idx = moves.indices_involving_1st(DEPOT)[m];
                let j = moves.get(move_idx).second_vertex();

                if self.partial && !solution.is_vertex_in_solution(j) {
                    continue;
                }

                if moves.vertex_timestamp(j) == current {
                    let j_first = moves.update_bits().first(j);
                    let j_second = moves.update_bits().second(j);

                    if j_first && j_second {
                    } else if j_first {
                        let icache = self.inner.prepare_cache_first_depot(solution, j);
                        let jcache = self.inner.prepare_cache_second(solution, j);
                        let delta = self.inner.delta(moves, move_idx, &icache, &jcache);
                        Self::heap_insert_or_update(moves, move_idx, delta, self.tolerance);
                    } else if j_second {
                        let icache = self.inner.prepare_cache_second_depot(solution, j);
                        let jcache = self.inner.prepare_cache_first(solution, j);
                        let twin_idx = MoveGenerators::twin_index(move_idx);
                        let twin_delta = self.inner.delta(moves, twin_idx, &jcache, &icache);
                        Self::heap_insert_or_update(moves, twin_idx, twin_delta, self.tolerance);
                    }
                } else {
                    let icache = self.inner.prepare_cache_depot(solution, j);
                    let jcache = self.inner.prepare_cache(solution, j);

                    let (delta1, delta2) = self.inner.delta_pair(moves, move_idx, &icache, &jcache);
                    Self::heap_insert_or_update(moves, move_idx, delta1, self.tolerance);
                    Self::heap_insert_or_update(moves, MoveGenerators::twin_index(move_idx), delta2, self.tolerance);
                }
            }
        } else if update_first {
            for m in 0..moves.indices_involving_1st(DEPOT).len() {
                let move_idx = moves.indices_involving_1st(DEPOT)[m];
                let j = moves.get(move_idx).second_vertex();

                if self.partial && !solution.is_vertex_in_solution(j) {
                    continue;
                }

                let refreshed_through_j = moves.vertex_timestamp(j) == current && moves.update_bits().second(j);
                if !refreshed_through_j {
                    let icache = self.inner.prepare_cache_first_depot(solution, j);
                    let jcache = self.inner.prepare_cache_second(solution, j);
                    let delta = self.inner.delta(moves, move_idx, &icache, &jcache);
                    Self::heap_insert_or_update(moves, move_idx, delta, self.tolerance);
                }
            }
        } else if update_second {
            for m in 0..moves.indices_involving_1st(DEPOT).len() {
                let twin_idx = MoveGenerators::twin_index(moves.indices_involving_1st(DEPOT)[m]);
                let j = moves.get(twin_idx).first_vertex();

                if self.partial && !solution.is_vertex_in_solution(j) {
                    continue;
                }

                let refreshed_through_j = moves.vertex_timestamp(j) == current && moves.update_bits().first(j);
                if !refreshed_through_j {
                    let icache = self.inner.prepare_cache_second_depot(solution, j);
                    let jcache = self.inner.prepare_cache_first(solution, j);
                    let delta = self.inner.delta(moves, twin_idx, &jcache, &icache);
                    Self::heap_insert_or_update(moves, twin_idx, delta, self.tolerance);
                }
            }
        }

        moves.set_vertex_timestamp(DEPOT, current);
    }
}

impl<N: Neighborhood> LocalSearchOperator for CommonOperator<N> {
    fn apply_rough_best_improvement(&mut self, solution: &mut Solution, moves: &mut MoveGenerators) -> bool {
        moves.heap_reset();

        self.inner.pre_processing(solution);

        self.initialize_descriptors(solution, moves);

        let mut improved = false;
        let mut index = 0;

        while index < moves.heap_len() {
            let move_idx = moves.heap_spy(index);
            index += 1;

            if self.partial {
                let first = moves.get(move_idx).first_vertex();
                let second = moves.get(move_idx).second_vertex();
                if !solution.is_vertex_in_solution(first) || !solution.is_vertex_in_solution(second) {
                    continue;
                }
            }

            if !self.inner.is_feasible(solution, moves, move_idx) {
                continue;
            }

            self.inner.execute(solution, moves, move_idx, &mut self.affected);

            improved = true;
            index = 0;

            self.update_descriptors(solution, moves);
            self.affected.clear();
        }

        self.inner.post_processing(solution, moves);

        improved
    }
}
