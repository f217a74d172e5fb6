use super::*;
use grils_core::models::{Instance, Solution};
use std::sync::Arc;

fn create_two_route_solution() -> Solution {
    let instance = Arc::new(Instance::new(
        10,
        vec![0., 0., 0., 0., 0.],
        vec![0., 1., 2., 3., 4.],
        vec![0, 1, 1, 1, 1],
        5,
    ));

    let mut solution = Solution::new(instance, 10);

    let first = solution.build_one_customer_route(1);
    solution.insert_vertex_before(first, 0, 2);
    let second = solution.build_one_customer_route(3);
    solution.insert_vertex_before(second, 0, 4);

    solution
}

#[test]
fn can_write_solution_file() {
    let solution = create_two_route_solution();

    let mut buffer = Vec::new();
    write_solution(&mut buffer, &solution).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    // Routes are listed in the route list order, most recently built first.
    assert_eq!(text, "Route #1: 3 4\nRoute #2: 1 2\nCost 12.000000");
}

#[test]
fn can_write_score_file() {
    let mut buffer = Vec::new();
    write_score(&mut buffer, 27591., 3600).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    assert_eq!(text, "27591\t3600\n");
}
