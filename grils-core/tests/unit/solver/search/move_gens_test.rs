use super::*;
use crate::helpers::models::create_instance;
use std::sync::Arc;

// Five vertices on a line with strictly distinct pairwise gaps, so neighbor
// orders are unambiguous.
fn create_gapped_instance() -> Arc<crate::models::Instance> {
    create_instance(10, &[(0., 0.), (0., 1.), (0., 3.), (0., 7.), (0., 12.)], &[0, 1, 1, 1, 1])
}

fn pairs(moves: &MoveGenerators) -> Vec<(i32, i32)> {
    let mut pairs: Vec<_> = (0..moves.size() as u32)
        .step_by(2)
        .map(|base| (moves.get(base).first_vertex(), moves.get(base).second_vertex()))
        .collect();
    pairs.sort_unstable();
    pairs
}

fn activate_all(moves: &mut MoveGenerators, vertices_num: i32) {
    let gamma = vec![1.0; vertices_num as usize];
    let vertices: Vec<_> = (0..vertices_num).collect();
    moves.set_active_percentage(&gamma, &vertices);
}

#[test]
fn can_index_twin_pairs() {
    assert_eq!(MoveGenerators::twin_index(6), 7);
    assert_eq!(MoveGenerators::twin_index(7), 6);
    assert_eq!(MoveGenerators::base_index(6), 6);
    assert_eq!(MoveGenerators::base_index(7), 6);

    for index in 0..32u32 {
        assert_eq!(MoveGenerators::twin_index(MoveGenerators::twin_index(index)), index);
        assert_eq!(MoveGenerators::base_index(index), MoveGenerators::base_index(MoveGenerators::twin_index(index)));
        assert_eq!(MoveGenerators::base_index(index) & 1, 0);
    }
}

#[test]
fn can_construct_expected_candidate_catalog() {
    let instance = create_gapped_instance();
    let moves = MoveGenerators::new(&instance, 2);

    // Union over every vertex of its two nearest neighbors, deduplicated.
    assert_eq!(pairs(&moves), vec![(0, 1), (0, 2), (1, 2), (2, 3), (2, 4), (3, 4)]);
    assert_eq!(moves.size(), 12);

    // Twins share the edge cost stored once per pair.
    for base in (0..moves.size() as u32).step_by(2) {
        let twin = MoveGenerators::twin_index(base);
        assert_eq!(moves.get(base).first_vertex(), moves.get(twin).second_vertex());
        assert_eq!(moves.get(base).second_vertex(), moves.get(twin).first_vertex());
        assert_eq!(moves.edge_cost(base), moves.edge_cost(twin));

        let (i, j) = (moves.get(base).first_vertex(), moves.get(base).second_vertex());
        assert_eq!(moves.edge_cost(base), instance.cost(i, j));
    }
}

#[test]
fn can_expose_active_lists_sorted_by_cost() {
    let instance = create_gapped_instance();
    let mut moves = MoveGenerators::new(&instance, 2);

    activate_all(&mut moves, instance.vertices_num());

    for vertex in instance.vertices() {
        let costs: Vec<_> = moves.indices_involving_1st(vertex).iter().map(|&idx| moves.edge_cost(idx)).collect();
        assert!(costs.windows(2).all(|w| w[0] <= w[1]), "vertex {vertex}: {costs:?}");

        for &idx in moves.indices_involving_1st(vertex) {
            assert_eq!(moves.get(idx).first_vertex(), vertex);
        }
        for idx in moves.indices_involving_2nd(vertex) {
            assert_eq!(moves.get(idx).second_vertex(), vertex);
        }
        for idx in moves.indices_involving(vertex) {
            assert_eq!(idx & 1, 0);
            let pair = moves.get(idx);
            assert!(pair.first_vertex() == vertex || pair.second_vertex() == vertex);
        }
    }
}

#[test]
fn can_keep_pairs_active_through_either_endpoint() {
    let instance = create_gapped_instance();
    let mut moves = MoveGenerators::new(&instance, 2);

    // Half the neighborhood: with k = 2 each vertex activates one pair.
    let gamma = vec![0.5; 5];
    let vertices: Vec<_> = (0..5).collect();
    moves.set_active_percentage(&gamma, &vertices);

    // Vertex 3 activates {2, 3}; vertex 4 activates {3, 4}. Vertex 3 must
    // expose both: one through its own prefix, one through vertex 4's.
    let endpoints: Vec<_> = moves.indices_involving_1st(3).iter().map(|&idx| moves.get(idx).second_vertex()).collect();
    assert!(endpoints.contains(&2));
    assert!(endpoints.contains(&4));
}

#[test]
fn can_set_active_percentage_idempotently() {
    let instance = create_gapped_instance();
    let mut moves = MoveGenerators::new(&instance, 2);

    let gamma = vec![0.5; 5];
    let vertices: Vec<_> = (0..5).collect();

    moves.set_active_percentage(&gamma, &vertices);
    let before: Vec<Vec<u32>> = (0..5).map(|v| moves.indices_involving_1st(v).to_vec()).collect();

    moves.set_active_percentage(&gamma, &vertices);
    let after: Vec<Vec<u32>> = (0..5).map(|v| moves.indices_involving_1st(v).to_vec()).collect();

    assert_eq!(before, after);
}

#[test]
fn can_shrink_active_lists() {
    let instance = create_gapped_instance();
    let mut moves = MoveGenerators::new(&instance, 2);

    activate_all(&mut moves, instance.vertices_num());
    let full: usize = (0..5).map(|v| moves.indices_involving_1st(v).len()).sum();

    let gamma = vec![0.0; 5];
    let vertices: Vec<_> = (0..5).collect();
    moves.set_active_percentage(&gamma, &vertices);
    let empty: usize = (0..5).map(|v| moves.indices_involving_1st(v).len()).sum();

    assert!(full > 0);
    assert_eq!(empty, 0);
}
