use crate::algorithms::structures::SparseIntSet;
use crate::models::problem::DEPOT;
use crate::models::{Instance, Solution};
use crate::solver::search::{MoveGenerators, NeighborhoodComposer, OperatorTag, RandomizedVnd};
use crate::utils::{compare_floats, Environment};
use std::cmp::Ordering;
use std::sync::Arc;

/// Route minimization heuristic, run before the main optimization when the
/// initial solution uses more routes than the bin packing bound suggests.
///
/// It repeatedly empties a couple of neighboring routes and reinserts their
/// customers into the remaining ones, leaving customers unserved with a
/// probability decaying geometrically over the iteration budget. The local
/// search runs in partial-solution mode over these states. Returns the best
/// complete solution found; stops early when `kmin` routes are reached.
pub fn routemin(
    instance: &Arc<Instance>,
    source: &Solution,
    environment: &Environment,
    moves: &mut MoveGenerators,
    kmin: i32,
    max_iter: usize,
    tolerance: f64,
) -> Solution {
    let random = &environment.random;

    let mut local_search = NeighborhoodComposer::new(tolerance);
    local_search.append(RandomizedVnd::new(instance, &OperatorTag::full_catalog(), tolerance, true));

    // This phase works with every move generator enabled.
    let gamma = vec![1.0; instance.vertices_num() as usize];
    let gamma_vertices: Vec<i32> = instance.vertices().collect();
    moves.set_active_percentage(&gamma, &gamma_vertices);

    let mut best_solution = source.clone();
    let mut solution = best_solution.clone();

    // Probability for a customer with no insertion slot to stay unserved.
    let t_base: f64 = 1.0;
    let t_end: f64 = 0.01;
    let mut t = t_base;
    let cooling = (t_end / t_base).powf(1. / max_iter as f64);

    let mut removed: Vec<i32> = Vec::with_capacity(instance.customers_num() as usize);
    let mut still_removed: Vec<i32> = Vec::with_capacity(instance.customers_num() as usize);
    let mut selected_routes: Vec<i32> = Vec::new();
    let mut neighbor_routes = SparseIntSet::new(instance.vertices_num() as usize);

    (environment.logger)(&format!("route minimization: {} routes, target {kmin}", source.routes_num()));

    for _ in 0..max_iter {
        solution.clear_recent_vertices();

        // A random seed customer identifies the first ruined route.
        let mut seed;
        loop {
            seed = random.uniform_int(1, instance.customers_num());
            if solution.is_customer_in_solution(seed) {
                break;
            }
        }
        selected_routes.clear();
        selected_routes.push(solution.route_index(seed));

        // The closest neighbor served by a different route donates the second one.
        for &vertex in &instance.neighbors_of(seed)[1..] {
            if vertex == DEPOT || !solution.is_customer_in_solution(vertex) {
                continue;
            }
            let route = solution.route_index(vertex);
            if route != selected_routes[0] {
                selected_routes.push(route);
                break;
            }
        }

        removed.clear();
        removed.extend_from_slice(&still_removed);
        still_removed.clear();

        for &route in &selected_routes {
            let mut curr = solution.first_customer(route);
            loop {
                let next = solution.next_vertex(curr);
                solution.remove_vertex(route, curr);
                removed.push(curr);
                curr = next;
                if curr == DEPOT {
                    break;
                }
            }
            solution.remove_route(route);
        }

        if random.is_head_not_tails() {
            removed.sort_by(|&i, &j| instance.demand(j).cmp(&instance.demand(i)));
        } else {
            random.shuffle(&mut removed);
        }

        for n in 0..removed.len() {
            let customer = removed[n];

            let mut best_route = -1;
            let mut best_where = -1;
            let mut best_delta = f64::MAX;

            // Only routes serving neighbors of the removed customer are
            // considered as insertion hosts.
            neighbor_routes.clear();
            for &vertex in &instance.neighbors_of(customer)[1..] {
                if vertex == DEPOT || !solution.is_customer_in_solution(vertex) {
                    continue;
                }
                neighbor_routes.insert(solution.route_index(vertex));
            }

            let c_customer_depot = instance.cost(customer, DEPOT);

            for m in 0..neighbor_routes.len() {
                let route = neighbor_routes.elements()[m];

                if solution.route_load(route) + instance.demand(customer) > instance.vehicle_capacity() {
                    continue;
                }

                let mut j = solution.first_customer(route);
                while j != DEPOT {
                    let prev = solution.prev_vertex_of(route, j);
                    let delta = -solution.cost_prev_customer(j)
                        + instance.cost(prev, customer)
                        + instance.cost(customer, j);
                    if delta < best_delta {
                        best_route = route;
                        best_where = j;
                        best_delta = delta;
                    }
                    j = solution.next_vertex(j);
                }

                let delta = -solution.cost_prev_depot(route)
                    + instance.cost(solution.last_customer(route), customer)
                    + c_customer_depot;
                if delta < best_delta {
                    best_route = route;
                    best_where = DEPOT;
                    best_delta = delta;
                }
            }

            if best_route == -1 {
                // No host found: probabilistically leave the customer unserved.
                if random.uniform_real(0., 1.) > t || solution.routes_num() < kmin {
                    solution.build_one_customer_route(customer);
                } else {
                    still_removed.push(customer);
                }
            } else {
                solution.insert_vertex_before(best_route, best_where, customer);
            }
        }

        local_search.sequential_apply(&mut solution, moves, random);

        if still_removed.is_empty() {
            // A complete solution again: check whether it is a keeper.
            if solution.cost() < best_solution.cost()
                || (compare_floats(solution.cost(), best_solution.cost(), tolerance) == Ordering::Equal
                    && solution.routes_num() < best_solution.routes_num())
            {
                solution.apply_do_list1_to(&mut best_solution);
                solution.clear_do_list1();
                solution.clear_undo_list1();
                debug_assert!(best_solution == solution);

                if best_solution.routes_num() <= kmin {
                    break;
                }
            }
        }

        if solution.cost() > best_solution.cost() {
            // Worsening exploration is not worth continuing from; roll back.
            solution.apply_undo_list1();
            solution.clear_do_list1();
            solution.clear_undo_list1();

            still_removed.clear();
        }

        t *= cooling;
    }

    (environment.logger)(&format!(
        "route minimization done: {} routes, cost {:.2}",
        best_solution.routes_num(),
        best_solution.cost()
    ));

    best_solution
}
