use super::*;
use std::io::BufReader;

const SMALL_INSTANCE: &str = "NAME : X-n4-k2
COMMENT : tiny fixture
TYPE : CVRP
DIMENSION : 4
EDGE_WEIGHT_TYPE : EUC_2D
CAPACITY : 10
NODE_COORD_SECTION
1 0 0
2 0 3
3 4 0
4 3 4
DEMAND_SECTION
1 0
2 5
3 4
4 2
DEPOT_SECTION
1
-1
EOF
";

#[test]
fn can_read_instance() {
    let instance = read_instance(BufReader::new(SMALL_INSTANCE.as_bytes()), 4).unwrap();

    assert_eq!(instance.vertices_num(), 4);
    assert_eq!(instance.vehicle_capacity(), 10);
    assert_eq!(instance.demand(0), 0);
    assert_eq!(instance.demand(1), 5);
    assert_eq!(instance.demand(3), 2);
    assert_eq!(instance.x_coordinate(3), 3.);
    assert_eq!(instance.y_coordinate(3), 4.);

    // Rounded Euclidean costs.
    assert_eq!(instance.cost(0, 1), 3.);
    assert_eq!(instance.cost(0, 3), 5.);

    // Neighbor lists start with the vertex itself.
    for i in instance.vertices() {
        assert_eq!(instance.neighbors_of(i)[0], i);
    }
}

#[test]
fn can_reject_truncated_file() {
    let truncated = "NAME : x\nCOMMENT : c\nTYPE : CVRP\nDIMENSION : 3\n";

    assert!(read_instance(BufReader::new(truncated.as_bytes()), 3).is_err());
}

#[test]
fn can_reject_wrong_header_order() {
    let wrong = SMALL_INSTANCE.replace("COMMENT", "REMARK");

    assert!(read_instance(BufReader::new(wrong.as_bytes()), 4).is_err());
}

#[test]
fn can_reject_malformed_coordinates() {
    let wrong = SMALL_INSTANCE.replace("2 0 3", "2 zero 3");

    assert!(read_instance(BufReader::new(wrong.as_bytes()), 4).is_err());
}
