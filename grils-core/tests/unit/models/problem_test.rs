use super::*;
use crate::helpers::models::{create_instance, create_line_instance};

#[test]
fn can_compute_rounded_symmetric_costs() {
    let instance = create_instance(10, &[(0., 0.), (3., 4.), (1., 1.)], &[0, 1, 1]);

    assert_eq!(instance.cost(0, 1), 5.);
    assert_eq!(instance.cost(1, 0), 5.);
    // sqrt(2) rounds to 1.
    assert_eq!(instance.cost(0, 2), 1.);
    assert_eq!(instance.cost(1, 1), 0.);
}

#[test]
fn can_expose_depot_and_customers() {
    let instance = create_line_instance(4, 10);

    assert_eq!(instance.depot(), 0);
    assert_eq!(instance.vertices_num(), 5);
    assert_eq!(instance.customers_num(), 4);
    assert_eq!(instance.customers().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    assert_eq!(instance.demand(0), 0);
    assert_eq!(instance.demand(3), 1);
}

#[test]
fn can_sort_neighbors_by_cost_with_self_first() {
    let instance = create_line_instance(4, 10);

    for i in instance.vertices() {
        let neighbors = instance.neighbors_of(i);
        assert_eq!(neighbors[0], i);

        let costs: Vec<_> = neighbors.iter().map(|&n| instance.cost(i, n)).collect();
        assert!(costs.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(neighbors.len(), instance.vertices_num() as usize);
    }
}

#[test]
fn can_limit_neighbor_list_size() {
    let instance = Instance::new(10, vec![0., 0., 0.], vec![0., 1., 2.], vec![0, 1, 1], 2);

    for i in instance.vertices() {
        assert_eq!(instance.neighbors_of(i).len(), 2);
        assert_eq!(instance.neighbors_of(i)[0], i);
    }
}
