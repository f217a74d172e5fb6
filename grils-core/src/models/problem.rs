#[cfg(test)]
#[path = "../../tests/unit/models/problem_test.rs"]
mod problem_test;

use crate::algorithms::geometry::KdTree;

/// Index of the depot vertex.
pub const DEPOT: i32 = 0;

/// An immutable CVRP instance.
///
/// Vertex `0` is the depot, customers are `1..vertices_num`. Arc costs are
/// Euclidean distances rounded to the nearest integer value, computed on the
/// fly. Every vertex carries a list of its nearest neighbors sorted by
/// non-decreasing cost, with the vertex itself in the first position.
pub struct Instance {
    capacity: i32,
    xcoords: Vec<f64>,
    ycoords: Vec<f64>,
    demands: Vec<i32>,
    neighbors: Vec<Vec<i32>>,
}

impl Instance {
    /// Creates an instance from raw data, precomputing `neighbors_num`
    /// nearest neighbors per vertex with a k-d tree.
    pub fn new(capacity: i32, xcoords: Vec<f64>, ycoords: Vec<f64>, demands: Vec<i32>, neighbors_num: usize) -> Self {
        assert_eq!(xcoords.len(), ycoords.len());
        assert_eq!(xcoords.len(), demands.len());
        assert!(!demands.is_empty());

        let neighbors_num = neighbors_num.min(demands.len());

        let kd_tree = KdTree::new(&xcoords, &ycoords);

        let neighbors = (0..xcoords.len())
            .map(|i| {
                let mut neighbors = kd_tree.nearest_neighbors(xcoords[i], ycoords[i], neighbors_num);

                // Overlapping vertices may push `i` out of the first slot.
                if neighbors[0] != i as i32 {
                    let position = neighbors
                        .iter()
                        .position(|&n| n == i as i32)
                        .expect("vertex is within its own neighborhood");
                    neighbors.swap(0, position);
                }

                neighbors
            })
            .collect();

        Self { capacity, xcoords, ycoords, demands, neighbors }
    }

    /// Returns the instance size.
    pub fn vertices_num(&self) -> i32 {
        self.demands.len() as i32
    }

    /// Returns the depot's index.
    pub fn depot(&self) -> i32 {
        DEPOT
    }

    /// Returns the vehicle capacity.
    pub fn vehicle_capacity(&self) -> i32 {
        self.capacity
    }

    /// Returns the number of customers.
    pub fn customers_num(&self) -> i32 {
        self.vertices_num() - 1
    }

    /// Iterates over customer indices.
    pub fn customers(&self) -> std::ops::Range<i32> {
        1..self.vertices_num()
    }

    /// Iterates over vertex indices, depot included.
    pub fn vertices(&self) -> std::ops::Range<i32> {
        0..self.vertices_num()
    }

    /// Returns the cost of arc `(i, j)`.
    pub fn cost(&self, i: i32, j: i32) -> f64 {
        let (i, j) = (i as usize, j as usize);
        let dx = self.xcoords[i] - self.xcoords[j];
        let dy = self.ycoords[i] - self.ycoords[j];
        (dx * dx + dy * dy).sqrt().round()
    }

    /// Returns the demand of vertex `i`. The demand is 0 for the depot.
    pub fn demand(&self, i: i32) -> i32 {
        self.demands[i as usize]
    }

    /// Returns the x coordinate of vertex `i`.
    pub fn x_coordinate(&self, i: i32) -> f64 {
        self.xcoords[i as usize]
    }

    /// Returns the y coordinate of vertex `i`.
    pub fn y_coordinate(&self, i: i32) -> f64 {
        self.ycoords[i as usize]
    }

    /// Returns the vertices sorted by non-decreasing cost from `i`, including
    /// `i` itself in the first position.
    pub fn neighbors_of(&self, i: i32) -> &[i32] {
        &self.neighbors[i as usize]
    }
}
