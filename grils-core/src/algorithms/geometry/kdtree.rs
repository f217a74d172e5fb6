#[cfg(test)]
#[path = "../../../tests/unit/algorithms/geometry/kdtree_test.rs"]
mod kdtree_test;

use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Clone, Copy)]
struct Point {
    index: i32,
    coords: [f64; 2],
}

struct Node {
    point: usize,
    cut_dim: usize,
    lo_bound: [f64; 2],
    hi_bound: [f64; 2],
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

struct Candidate {
    point: usize,
    distance: f64,
}

// Max-heap on squared distance so the worst of the best k is on top.
impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.distance == other.distance
    }
}
impl Eq for Candidate {}
impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance.total_cmp(&other.distance)
    }
}

/// A two dimensional k-d tree supporting k-nearest-neighbor queries.
pub struct KdTree {
    nodes: Vec<Point>,
    root: Node,
}

impl KdTree {
    /// Builds a tree over the given coordinates.
    pub fn new(xcoords: &[f64], ycoords: &[f64]) -> Self {
        assert_eq!(xcoords.len(), ycoords.len());
        assert!(!xcoords.is_empty());

        let mut lo_bound = [f64::MAX; 2];
        let mut hi_bound = [f64::MIN; 2];
        let mut nodes = Vec::with_capacity(xcoords.len());

        for (index, (&x, &y)) in xcoords.iter().zip(ycoords.iter()).enumerate() {
            lo_bound[0] = lo_bound[0].min(x);
            lo_bound[1] = lo_bound[1].min(y);
            hi_bound[0] = hi_bound[0].max(x);
            hi_bound[1] = hi_bound[1].max(y);
            nodes.push(Point { index: index as i32, coords: [x, y] });
        }

        let size = nodes.len();
        let root = build_tree(&mut nodes, 0, 0, size, lo_bound, hi_bound);

        Self { nodes, root }
    }

    /// Returns the indices of the k points closest to `(x, y)`, sorted by
    /// non-decreasing distance.
    pub fn nearest_neighbors(&self, x: f64, y: f64, k: usize) -> Vec<i32> {
        let mut heap = BinaryHeap::with_capacity(k + 1);

        self.search(&self.root, &mut heap, [x, y], k);

        let mut neighbors = vec![0; heap.len()];
        let mut slot = heap.len();
        while let Some(candidate) = heap.pop() {
            slot -= 1;
            neighbors[slot] = self.nodes[candidate.point].index;
        }

        neighbors
    }

    fn search(&self, node: &Node, heap: &mut BinaryHeap<Candidate>, point: [f64; 2], k: usize) -> bool {
        let current = squared_distance(point, self.nodes[node.point].coords);

        if heap.len() < k {
            heap.push(Candidate { point: node.point, distance: current });
        } else if current < heap.peek().expect("heap is full").distance {
            heap.pop();
            heap.push(Candidate { point: node.point, distance: current });
        }

        let cut = self.nodes[node.point].coords[node.cut_dim];
        let (near, far) =
            if point[node.cut_dim] < cut { (&node.left, &node.right) } else { (&node.right, &node.left) };

        if let Some(child) = near {
            if self.search(child, heap, point, k) {
                return true;
            }
        }

        let mut radius = if heap.len() < k { f64::MAX } else { heap.peek().expect("heap is full").distance };

        if let Some(child) = far {
            if bounds_overlap_ball(point, radius, child) && self.search(child, heap, point, k) {
                return true;
            }
        }

        if heap.len() == k {
            radius = heap.peek().expect("heap is full").distance;
        }

        ball_within_bounds(point, radius, node)
    }
}

fn build_tree(
    nodes: &mut [Point],
    depth: usize,
    begin: usize,
    end: usize,
    lo_bound: [f64; 2],
    hi_bound: [f64; 2],
) -> Node {
    let dimension = depth % 2;

    let mut node =
        Node { point: begin, cut_dim: dimension, lo_bound, hi_bound, left: None, right: None };

    if end - begin > 1 {
        let median = (begin + end) / 2;
        nodes[begin..end]
            .select_nth_unstable_by(median - begin, |a, b| a.coords[dimension].total_cmp(&b.coords[dimension]));
        node.point = median;

        let cut = nodes[median].coords[dimension];

        if median > begin {
            let mut next_hi = hi_bound;
            next_hi[dimension] = cut;
            node.left = Some(Box::new(build_tree(nodes, depth + 1, begin, median, lo_bound, next_hi)));
        }

        if end - median > 1 {
            let mut next_lo = lo_bound;
            next_lo[dimension] = cut;
            node.right = Some(Box::new(build_tree(nodes, depth + 1, median + 1, end, next_lo, hi_bound)));
        }
    }

    node
}

fn squared_distance(a: [f64; 2], b: [f64; 2]) -> f64 {
    (a[0] - b[0]) * (a[0] - b[0]) + (a[1] - b[1]) * (a[1] - b[1])
}

fn coordinate_distance(a: f64, b: f64) -> f64 {
    (a - b) * (a - b)
}

fn bounds_overlap_ball(point: [f64; 2], radius: f64, node: &Node) -> bool {
    let mut sum = 0.0;
    for dim in 0..2 {
        if point[dim] < node.lo_bound[dim] {
            sum += coordinate_distance(point[dim], node.lo_bound[dim]);
        } else if point[dim] > node.hi_bound[dim] {
            sum += coordinate_distance(point[dim], node.hi_bound[dim]);
        }
        if sum > radius {
            return false;
        }
    }
    true
}

fn ball_within_bounds(point: [f64; 2], radius: f64, node: &Node) -> bool {
    (0..2).all(|dim| {
        coordinate_distance(point[dim], node.lo_bound[dim]) > radius
            && coordinate_distance(point[dim], node.hi_bound[dim]) > radius
    })
}
