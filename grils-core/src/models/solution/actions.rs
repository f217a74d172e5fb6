use super::Solution;
use crate::models::problem::DEPOT;

/// A journaled solution edit. Every public mutation records the action it
/// performed plus its inverse, so a sequence of edits can be replayed onto
/// another solution or rolled back without copying the whole solution.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Action {
    /// Insert `vertex` before `where_to` in `route`.
    InsertVertex { route: i32, where_to: i32, vertex: i32 },
    /// Remove `vertex` from `route`.
    RemoveVertex { route: i32, vertex: i32 },
    /// Recreate a previously removed route id. Effect-free on replay: the id
    /// pool round-trips released ids, so the next route creation reuses it.
    CreateRoute { route: i32 },
    /// Remove an empty route.
    RemoveRoute { route: i32 },
    /// Reverse the sub-path between two vertices.
    ReversePath { route: i32, begin: i32, end: i32 },
    /// Create a route serving a single customer.
    CreateOneCustomerRoute { route: i32, customer: i32 },
    /// Remove a route serving a single customer.
    RemoveOneCustomerRoute { route: i32, customer: i32 },
}

impl Solution {
    /// Replays an action without journaling it.
    pub(crate) fn apply_action(&mut self, action: Action) {
        match action {
            Action::InsertVertex { route, where_to, vertex } => {
                if self.is_route_in_solution(route) {
                    self.insert_vertex_before_unlogged(route, where_to, vertex);
                } else {
                    // The undo of removing the last customer of a route: the
                    // paired CreateRoute has already round-tripped the id.
                    debug_assert_eq!(where_to, DEPOT);
                    let recreated = self.build_one_customer_route_unlogged(vertex);
                    debug_assert_eq!(recreated, route);
                }
            }
            Action::RemoveVertex { route, vertex } => {
                self.remove_vertex_unlogged(route, vertex);
            }
            Action::CreateRoute { route } => {
                debug_assert!(!self.is_route_in_solution(route));
            }
            Action::RemoveRoute { route } => {
                debug_assert!(self.is_route_empty(route));
                self.release_route_unlogged(route);
            }
            Action::ReversePath { route, begin, end } => {
                self.reverse_route_path_unlogged(route, begin, end);
            }
            Action::CreateOneCustomerRoute { route, customer } => {
                let created = self.build_one_customer_route_unlogged(customer);
                debug_assert_eq!(created, route);
            }
            Action::RemoveOneCustomerRoute { route, customer } => {
                debug_assert_ne!(customer, DEPOT);
                debug_assert!(self.is_customer_in_solution(customer));
                debug_assert!(self.is_route_in_solution(route));
                debug_assert_eq!(self.route_index(customer), route);
                self.remove_vertex_unlogged(route, customer);
                debug_assert!(self.is_route_empty(route));
                self.release_route_unlogged(route);
            }
        }
    }
}
