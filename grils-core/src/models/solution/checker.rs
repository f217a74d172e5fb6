use super::{Solution, DUMMY_ROUTE, DUMMY_VERTEX};
use crate::models::problem::DEPOT;
use hashbrown::{HashMap, HashSet};

/// Outcome of the expensive solution validation.
pub struct CheckReport {
    /// Hard inconsistencies between stored and recomputed state.
    pub errors: Vec<String>,
    /// Suspicious but transiently legal states, e.g. a route with its depot removed.
    pub warnings: Vec<String>,
}

impl CheckReport {
    /// Returns whether the solution passed the check.
    pub fn is_feasible(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Solution {
    /// Validates the whole solution by walking every route and recomputing
    /// loads, costs, sizes and link pointers from scratch, comparing them
    /// with the stored state. Very expensive; meant for tests and debugging.
    ///
    /// When `error_on_load_infeasible` is false, capacity violations are
    /// reported as warnings, which partial states of the route minimization
    /// heuristic legally produce.
    pub fn check_feasible(&self, error_on_load_infeasible: bool) -> CheckReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let mut visited_in_solution: HashSet<i32> = HashSet::new();
        let mut predecessor_of: HashMap<i32, Vec<i32>> = HashMap::new();
        let mut successor_of: HashMap<i32, Vec<i32>> = HashMap::new();

        let mut total_cost = 0.;
        let mut routes_num = 0;

        let mut route = self.first_route();
        while route != DUMMY_ROUTE {
            routes_num += 1;

            if self.is_route_empty(route) {
                errors.push(format!("route {route} is in solution but empty"));
            }

            // A route whose depot was removed can only be entered through one
            // of its customers.
            let mut anchor = DEPOT;
            if self.is_missing_depot(route) {
                warnings.push(format!("route {route} misses the depot and cannot be accessed safely"));
                anchor = self
                    .instance
                    .customers()
                    .find(|&c| self.customers[c as usize].route == route)
                    .unwrap_or(DUMMY_VERTEX);
                if anchor == DUMMY_VERTEX {
                    errors.push(format!("route {route} misses the depot and serves no customer"));
                    route = self.next_route(route);
                    continue;
                }
            }

            let mut visited_in_route: HashSet<i32> = HashSet::new();
            let mut route_load = 0;
            let mut route_cost = 0.;
            let mut route_size = 0;

            let mut curr = anchor;
            loop {
                if !visited_in_route.insert(curr) {
                    errors.push(format!("vertex {curr} is visited more than once within route {route}"));
                    break;
                }
                if curr != DEPOT && !visited_in_solution.insert(curr) {
                    errors.push(format!("vertex {curr} is visited more than once in the solution"));
                }

                let next = self.next_vertex_of(route, curr);
                let prev = self.prev_vertex_of(route, curr);

                let stored = self.cost_prev_vertex(route, curr);
                if (stored - self.instance.cost(prev, curr)).abs() > 0.01 {
                    errors.push(format!("vertex {curr} in route {route} has wrong predecessor cost"));
                }

                if prev == DEPOT && !self.is_missing_depot(route) && self.first_customer(route) != curr {
                    errors.push(format!(
                        "vertex {curr} in route {route} has predecessor depot but the first customer is {}",
                        self.first_customer(route)
                    ));
                }
                if next == DEPOT && !self.is_missing_depot(route) && self.last_customer(route) != curr {
                    errors.push(format!(
                        "vertex {curr} in route {route} has successor depot but the last customer is {}",
                        self.last_customer(route)
                    ));
                }

                if self.prev_vertex_of(route, next) != curr {
                    errors.push(format!(
                        "vertex {curr} in route {route} has successor {next} whose predecessor is {}",
                        self.prev_vertex_of(route, next)
                    ));
                }
                if self.next_vertex_of(route, prev) != curr {
                    errors.push(format!(
                        "vertex {curr} in route {route} has predecessor {prev} whose successor is {}",
                        self.next_vertex_of(route, prev)
                    ));
                }

                if curr != DEPOT && self.customers[curr as usize].route != route {
                    errors.push(format!(
                        "vertex {curr} in route {route} has route pointer {}",
                        self.customers[curr as usize].route
                    ));
                }

                predecessor_of.entry(prev).or_default().push(curr);
                successor_of.entry(next).or_default().push(curr);

                route_load += self.instance.demand(curr);
                route_cost += self.instance.cost(curr, next);
                if curr != DEPOT {
                    route_size += 1;
                }

                curr = next;
                if curr == anchor {
                    break;
                }
            }

            if route_load != self.route_load(route) {
                errors.push(format!(
                    "route {route} has computed load {route_load} but stores {}",
                    self.route_load(route)
                ));
            }
            if route_load > self.instance.vehicle_capacity() {
                let message = format!(
                    "route {route} has load {route_load} over the capacity {}",
                    self.instance.vehicle_capacity()
                );
                if error_on_load_infeasible {
                    errors.push(message);
                } else {
                    warnings.push(message);
                }
            }
            if route_size != self.route_size(route) {
                errors.push(format!(
                    "route {route} has computed size {route_size} but stores {}",
                    self.route_size(route)
                ));
            }

            // Clean routes must have consistent cumulative loads.
            if !self.routes[route as usize].cumload_dirty && !self.is_missing_depot(route) {
                let mut load_before = 0;
                let mut curr = self.first_customer(route);
                while curr != DEPOT {
                    load_before += self.instance.demand(curr);
                    if self.customers[curr as usize].load_before != load_before {
                        errors.push(format!("cumulative load before customer {curr} of route {route} is stale"));
                    }
                    if self.customers[curr as usize].load_after != route_load - load_before + self.instance.demand(curr)
                    {
                        errors.push(format!("cumulative load after customer {curr} of route {route} is stale"));
                    }
                    curr = self.customers[curr as usize].next;
                }
            }

            total_cost += route_cost;
            route = self.next_route(route);
        }

        if routes_num != self.routes_num() {
            errors.push(format!("solution has {routes_num} routes but stores {}", self.routes_num()));
        }

        if (total_cost - self.cost()).abs() > 0.01 {
            errors.push(format!("solution has computed cost {total_cost} but stores {}", self.cost()));
        }

        // Every served customer enters and leaves exactly once.
        for c in self.instance.customers() {
            if !self.is_customer_in_solution(c) {
                continue;
            }
            let preds = predecessor_of.get(&c).map_or(0, Vec::len);
            let succs = successor_of.get(&c).map_or(0, Vec::len);
            if preds != 1 {
                errors.push(format!("customer {c} is a predecessor {preds} times"));
            }
            if succs != 1 {
                errors.push(format!("customer {c} is a successor {succs} times"));
            }
        }

        CheckReport { errors, warnings }
    }
}
