use super::*;

fn brute_force(xcoords: &[f64], ycoords: &[f64], x: f64, y: f64, k: usize) -> Vec<i32> {
    let mut order: Vec<_> = (0..xcoords.len()).collect();
    order.sort_by(|&a, &b| {
        let da = (xcoords[a] - x).powi(2) + (ycoords[a] - y).powi(2);
        let db = (xcoords[b] - x).powi(2) + (ycoords[b] - y).powi(2);
        da.total_cmp(&db)
    });
    order.into_iter().take(k).map(|i| i as i32).collect()
}

#[test]
fn can_find_neighbors_on_a_line() {
    let xcoords = [0., 0., 0., 0., 0.];
    let ycoords = [0., 1., 2., 3., 4.];

    let tree = KdTree::new(&xcoords, &ycoords);

    assert_eq!(tree.nearest_neighbors(0., 0., 3), vec![0, 1, 2]);
    assert_eq!(tree.nearest_neighbors(0., 4., 2), vec![4, 3]);
}

#[test]
fn can_match_brute_force_on_a_grid() {
    let mut xcoords = Vec::new();
    let mut ycoords = Vec::new();
    for x in 0..7 {
        for y in 0..7 {
            xcoords.push(x as f64 * 3.);
            ycoords.push(y as f64 * 2.);
        }
    }

    let tree = KdTree::new(&xcoords, &ycoords);

    for &(qx, qy) in &[(0., 0.), (9., 4.), (18., 12.), (5., 5.)] {
        let expected = brute_force(&xcoords, &ycoords, qx, qy, 5);
        let actual = tree.nearest_neighbors(qx, qy, 5);

        // Distance ties may be ordered differently, compare distances.
        let dist = |i: i32| (xcoords[i as usize] - qx).powi(2) + (ycoords[i as usize] - qy).powi(2);
        let expected: Vec<_> = expected.iter().map(|&i| dist(i)).collect();
        let actual: Vec<_> = actual.iter().map(|&i| dist(i)).collect();
        assert_eq!(expected, actual);
    }
}

#[test]
fn can_return_all_points_when_k_covers_them() {
    let xcoords = [1., 5., 9.];
    let ycoords = [1., 5., 9.];

    let tree = KdTree::new(&xcoords, &ycoords);

    assert_eq!(tree.nearest_neighbors(1., 1., 3), vec![0, 1, 2]);
}
