#[cfg(test)]
#[path = "../../../tests/unit/solver/search/move_gens_test.rs"]
mod move_gens_test;

use crate::algorithms::structures::{HeapSlot, IndexedBinaryHeap, SparseIntSet, UNHEAPED};
use crate::models::Instance;

/// A move generator, or static move descriptor: a directed candidate arc
/// `(i, j)` together with the cached improvement delta of applying the
/// current neighborhood to it.
pub struct MoveGenerator {
    first: i32,
    second: i32,
    delta: f64,
    heap_index: i32,
    computed_for_chain: bool,
}

impl MoveGenerator {
    fn new(first: i32, second: i32) -> Self {
        Self { first, second, delta: 0., heap_index: UNHEAPED, computed_for_chain: false }
    }

    /// Returns the first vertex of the candidate arc.
    pub fn first_vertex(&self) -> i32 {
        self.first
    }

    /// Returns the second vertex of the candidate arc.
    pub fn second_vertex(&self) -> i32 {
        self.second
    }

    /// Returns the cached delta.
    pub fn delta(&self) -> f64 {
        self.delta
    }

    /// Stores a delta.
    pub fn set_delta(&mut self, delta: f64) {
        self.delta = delta;
    }

    /// Returns whether the delta was computed on demand by the ejection chain.
    pub fn is_computed_for_chain(&self) -> bool {
        self.computed_for_chain
    }

    /// Marks whether the delta was computed on demand by the ejection chain.
    pub fn set_computed_for_chain(&mut self, value: bool) {
        self.computed_for_chain = value;
    }
}

impl HeapSlot for MoveGenerator {
    fn heap_index(&self) -> i32 {
        self.heap_index
    }

    fn set_heap_index(&mut self, index: i32) {
        self.heap_index = index;
    }

    fn heap_key(&self) -> f64 {
        self.delta
    }

    fn set_heap_key(&mut self, key: f64) {
        self.delta = key;
    }
}

/// The two directed roles a vertex can play in a move generator. After a
/// move execution the operator marks, per touched vertex, whether the
/// generators `(v, ..)`, `(.., v)` or both need their delta refreshed.
pub struct UpdateBits {
    first: Vec<bool>,
    second: Vec<bool>,
}

impl UpdateBits {
    fn new(vertices_num: usize) -> Self {
        Self { first: vec![false; vertices_num], second: vec![false; vertices_num] }
    }

    /// Returns whether generators with the vertex in first position need a refresh.
    pub fn first(&self, vertex: i32) -> bool {
        self.first[vertex as usize]
    }

    /// Returns whether generators with the vertex in second position need a refresh.
    pub fn second(&self, vertex: i32) -> bool {
        self.second[vertex as usize]
    }

    /// Marks the first-position role of the vertex for refresh.
    pub fn set_first(&mut self, vertex: i32) {
        self.first[vertex as usize] = true;
    }

    /// Marks the second-position role of the vertex for refresh.
    pub fn set_second(&mut self, vertex: i32) {
        self.second[vertex as usize] = true;
    }

    /// Clears both roles of the vertex.
    pub fn clear(&mut self, vertex: i32) {
        self.first[vertex as usize] = false;
        self.second[vertex as usize] = false;
    }
}

/// The k-nearest-neighbors move generator store.
///
/// Generators come in twin pairs: for every undirected candidate edge
/// `{i, j}` the directed entries `(i, j)` and `(j, i)` sit at adjacent
/// indices `2k` and `2k + 1`, so the twin of an index is `index ^ 1` and the
/// pair representative (base) is `index & !1`. The symmetric edge cost is
/// stored once per pair.
///
/// Every vertex owns the list of base indices of pairs involving it, sorted
/// by ascending edge cost, plus a dynamically resized *active* prefix driven
/// by the per-vertex sparsification factor. The store also carries the
/// shared machinery used by the local search: the result heap ordered by
/// delta, the update bits, and per-vertex timestamps.
pub struct MoveGenerators {
    max_neighbors_num: usize,
    moves: Vec<MoveGenerator>,
    edge_costs: Vec<f64>,
    base_indices_involving: Vec<Vec<u32>>,
    active_indices_involving: Vec<Vec<u32>>,
    current_neighbors_num: Vec<usize>,
    active_in_first: Vec<bool>,
    active_in_second: Vec<bool>,
    heap: IndexedBinaryHeap,
    update_bits: UpdateBits,
    vertex_timestamp: Vec<u64>,
    timestamp: u64,
    // Scratch storage kept here to avoid re-allocations.
    vertices_in_updated_moves: SparseIntSet,
    unique_endpoints: SparseIntSet,
    unique_move_generators: Vec<u32>,
}

impl MoveGenerators {
    /// Builds the candidate catalog for the instance considering `k`
    /// neighbors per vertex.
    pub fn new(instance: &Instance, k: usize) -> Self {
        let vertices_num = instance.vertices_num() as usize;
        // Minus one as the first neighbor of a vertex is the vertex itself.
        let max_neighbors_num = k.min(vertices_num - 1);

        let mut moves: Vec<MoveGenerator> = Vec::new();
        let mut edge_costs: Vec<f64> = Vec::new();
        let mut base_indices_involving: Vec<Vec<u32>> = vec![Vec::new(); vertices_num];

        fn insert_pair(
            moves: &mut Vec<MoveGenerator>,
            edge_costs: &mut Vec<f64>,
            base_indices_involving: &mut [Vec<u32>],
            a: i32,
            b: i32,
            cost: f64,
        ) {
            let base_idx = moves.len() as u32;
            debug_assert_eq!(base_idx & 1, 0);
            moves.push(MoveGenerator::new(a, b));
            moves.push(MoveGenerator::new(b, a));
            edge_costs.push(cost);
            base_indices_involving[a as usize].push(base_idx);
            base_indices_involving[b as usize].push(base_idx);
        }

        for i in instance.vertices() {
            let neighbors = instance.neighbors_of(i);
            let considered = max_neighbors_num.min(neighbors.len() - 1);

            for &j in &neighbors[1..=considered] {
                debug_assert_ne!(i, j);
                let cost = instance.cost(i, j);

                if i < j {
                    insert_pair(&mut moves, &mut edge_costs, &mut base_indices_involving, i, j, cost);
                    continue;
                }

                // For i > j the pair has already been added when `i` showed
                // up in the considered neighborhood of `j`, unless `(j, i)`
                // is at least as expensive as the arc from `j` to its
                // farthest considered neighbor.
                let j_neighbors = instance.neighbors_of(j);
                let farthest = j_neighbors[considered.min(j_neighbors.len() - 1)];
                let c_jn = instance.cost(j, farthest);

                if cost > c_jn {
                    insert_pair(&mut moves, &mut edge_costs, &mut base_indices_involving, j, i, cost);
                    continue;
                }

                if (cost - c_jn).abs() < 1e-5 {
                    // Cost ties depend on the insertion order of earlier
                    // vertices, so check for an existing pair explicitly.
                    let present =
                        base_indices_involving[j as usize].iter().any(|&idx| moves[idx as usize].second == i);
                    if !present {
                        insert_pair(&mut moves, &mut edge_costs, &mut base_indices_involving, j, i, cost);
                    }
                }
            }
        }

        for indices in base_indices_involving.iter_mut() {
            indices.sort_by(|&a, &b| {
                edge_costs[a as usize / 2].total_cmp(&edge_costs[b as usize / 2])
            });
        }

        let pairs_num = moves.len() / 2;

        Self {
            max_neighbors_num,
            moves,
            edge_costs,
            base_indices_involving,
            active_indices_involving: vec![Vec::new(); vertices_num],
            current_neighbors_num: vec![0; vertices_num],
            active_in_first: vec![false; pairs_num],
            active_in_second: vec![false; pairs_num],
            heap: IndexedBinaryHeap::new(),
            update_bits: UpdateBits::new(vertices_num),
            vertex_timestamp: vec![0; vertices_num],
            timestamp: 0,
            vertices_in_updated_moves: SparseIntSet::new(vertices_num),
            unique_endpoints: SparseIntSet::new(vertices_num),
            unique_move_generators: Vec::new(),
        }
    }

    /// Returns the twin of a directed move generator index.
    pub fn twin_index(index: u32) -> u32 {
        index ^ 1
    }

    /// Returns the pair representative of a directed move generator index.
    pub fn base_index(index: u32) -> u32 {
        index & !1
    }

    /// Returns the move generator at the given index.
    pub fn get(&self, index: u32) -> &MoveGenerator {
        &self.moves[index as usize]
    }

    /// Returns the mutable move generator at the given index.
    pub fn get_mut(&mut self, index: u32) -> &mut MoveGenerator {
        &mut self.moves[index as usize]
    }

    /// Returns the total number of directed move generators.
    pub fn size(&self) -> usize {
        self.moves.len()
    }

    /// Returns the shared edge cost of the pair the index belongs to.
    pub fn edge_cost(&self, index: u32) -> f64 {
        self.edge_costs[index as usize / 2]
    }

    /// Returns the indices of active move generators `(vertex, ..)`.
    pub fn indices_involving_1st(&self, vertex: i32) -> &[u32] {
        &self.active_indices_involving[vertex as usize]
    }

    /// Returns the indices of active move generators `(.., vertex)`.
    pub fn indices_involving_2nd(&self, vertex: i32) -> impl Iterator<Item = u32> + '_ {
        self.active_indices_involving[vertex as usize].iter().map(|&idx| Self::twin_index(idx))
    }

    /// Returns the pair representatives of active move generators involving the vertex.
    pub fn indices_involving(&self, vertex: i32) -> impl Iterator<Item = u32> + '_ {
        self.active_indices_involving[vertex as usize].iter().map(|&idx| Self::base_index(idx))
    }

    /// Resizes the active neighbor prefix of the given vertices according to
    /// the percentage vector, then rebuilds the active index list of every
    /// vertex whose neighborhood was affected. Idempotent for unchanged
    /// percentages.
    pub fn set_active_percentage(&mut self, percentage: &[f64], vertices: &[i32]) {
        self.vertices_in_updated_moves.clear();

        for &vertex in vertices {
            let requested = (percentage[vertex as usize] * self.max_neighbors_num as f64).round() as usize;
            debug_assert!(requested <= self.base_indices_involving[vertex as usize].len());

            let current = self.current_neighbors_num[vertex as usize];
            if requested == current {
                continue;
            }

            let range = if requested < current { requested..current } else { current..requested };
            let activate = requested > current;

            for n in range {
                let base_idx = self.base_indices_involving[vertex as usize][n];
                let pair = base_idx as usize / 2;
                let is_first = self.moves[base_idx as usize].first == vertex;

                if is_first {
                    debug_assert_ne!(self.active_in_first[pair], activate);
                    self.active_in_first[pair] = activate;
                } else {
                    debug_assert_ne!(self.active_in_second[pair], activate);
                    self.active_in_second[pair] = activate;
                }

                self.vertices_in_updated_moves.insert(self.moves[base_idx as usize].first);
                self.vertices_in_updated_moves.insert(self.moves[base_idx as usize].second);
            }

            self.current_neighbors_num[vertex as usize] = requested;
        }

        for n in 0..self.vertices_in_updated_moves.len() {
            let vertex = self.vertices_in_updated_moves.elements()[n];

            self.unique_move_generators.clear();
            self.unique_endpoints.clear();

            // Scan all base indices: a pair may be active due to either endpoint.
            for &base_idx in &self.base_indices_involving[vertex as usize] {
                let pair = base_idx as usize / 2;
                if !self.active_in_first[pair] && !self.active_in_second[pair] {
                    continue;
                }

                let index = if self.moves[base_idx as usize].first == vertex {
                    base_idx
                } else {
                    Self::twin_index(base_idx)
                };

                let other = self.moves[index as usize].second;
                if !self.unique_endpoints.contains(other) {
                    self.unique_endpoints.insert_unchecked(other);
                    self.unique_move_generators.push(index);
                }
            }

            self.active_indices_involving[vertex as usize].clear();
            self.active_indices_involving[vertex as usize].extend_from_slice(&self.unique_move_generators);
        }
    }

    /// Returns the current timestamp.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Advances the timestamp.
    pub fn increment_timestamp(&mut self) {
        self.timestamp += 1;
    }

    /// Returns the timestamp stored for a vertex.
    pub fn vertex_timestamp(&self, vertex: i32) -> u64 {
        self.vertex_timestamp[vertex as usize]
    }

    /// Stores a timestamp for a vertex.
    pub fn set_vertex_timestamp(&mut self, vertex: i32, timestamp: u64) {
        self.vertex_timestamp[vertex as usize] = timestamp;
    }

    /// Returns the update bits.
    pub fn update_bits(&self) -> &UpdateBits {
        &self.update_bits
    }

    /// Returns the mutable update bits.
    pub fn update_bits_mut(&mut self) -> &mut UpdateBits {
        &mut self.update_bits
    }

    /// Unlinks all heaped move generators and clears the result heap.
    pub fn heap_reset(&mut self) {
        self.heap.reset(&mut self.moves);
    }

    /// Returns the number of heaped move generators.
    pub fn heap_len(&self) -> usize {
        self.heap.len()
    }

    /// Returns the move generator index at the given heap position.
    pub fn heap_spy(&self, hindex: usize) -> u32 {
        self.heap.spy(hindex)
    }

    /// Inserts the move generator with the given index into the result heap.
    pub fn heap_insert(&mut self, index: u32) {
        self.heap.insert(&mut self.moves, index);
    }

    /// Removes the move generator stored at the given heap position.
    pub fn heap_remove(&mut self, hindex: i32) {
        self.heap.remove(&mut self.moves, hindex);
    }

    /// Changes the delta of the move generator at the given heap position.
    pub fn heap_change_key(&mut self, hindex: i32, delta: f64) {
        self.heap.change_key(&mut self.moves, hindex, delta);
    }
}
