use crate::models::Instance;
use std::sync::Arc;

/// Creates an instance with all vertices on a vertical line spaced one unit
/// apart, the depot at the origin, unit demands and the given capacity.
pub fn create_line_instance(customers_num: usize, capacity: i32) -> Arc<Instance> {
    let vertices_num = customers_num + 1;
    let xcoords = vec![0.; vertices_num];
    let ycoords = (0..vertices_num).map(|i| i as f64).collect();
    let mut demands = vec![1; vertices_num];
    demands[0] = 0;

    Arc::new(Instance::new(capacity, xcoords, ycoords, demands, vertices_num))
}

/// Creates an instance from explicit coordinates and demands; the first
/// vertex is the depot. All neighbor lists cover the whole instance.
pub fn create_instance(capacity: i32, coords: &[(f64, f64)], demands: &[i32]) -> Arc<Instance> {
    let xcoords = coords.iter().map(|&(x, _)| x).collect();
    let ycoords = coords.iter().map(|&(_, y)| y).collect();

    Arc::new(Instance::new(capacity, xcoords, ycoords, demands.to_vec(), coords.len()))
}
