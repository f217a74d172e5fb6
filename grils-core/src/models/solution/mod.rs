#[cfg(test)]
#[path = "../../../tests/unit/models/solution_test.rs"]
mod solution_test;

mod actions;
pub(crate) use self::actions::Action;

mod checker;
pub use self::checker::CheckReport;

use crate::algorithms::structures::{FixedSizeStack, LruCache};
use crate::models::problem::DEPOT;
use crate::models::Instance;
use std::sync::Arc;

/// Marker for an invalid vertex.
pub const DUMMY_VERTEX: i32 = -1;

/// Marker for an invalid route, also the terminator of the route list.
pub const DUMMY_ROUTE: i32 = 0;

#[derive(Clone, Copy)]
struct CustomerNode {
    /// Index of the next vertex in the route.
    next: i32,
    /// Index of the previous vertex in the route.
    prev: i32,
    /// Index of the route serving this customer, [`DUMMY_ROUTE`] when unserved.
    route: i32,
    /// Cumulative load from this customer up to the end of the route, included.
    load_after: i32,
    /// Cumulative load from the beginning of the route up to this customer, included.
    load_before: i32,
    /// Cost of the arc entering this customer from its predecessor.
    c_prev: f64,
}

impl Default for CustomerNode {
    fn default() -> Self {
        Self { next: DUMMY_VERTEX, prev: DUMMY_VERTEX, route: DUMMY_ROUTE, load_after: 0, load_before: 0, c_prev: 0. }
    }
}

#[derive(Clone, Copy)]
struct RouteNode {
    /// Index of the first customer in the route.
    first_customer: i32,
    /// Index of the last customer in the route.
    last_customer: i32,
    /// Overall load of the route.
    load: i32,
    /// Index of the next route in the route list.
    next: i32,
    /// Index of the previous route in the route list.
    prev: i32,
    /// Number of customers in the route.
    size: i32,
    /// Whether `load_before`/`load_after` of the customers are stale.
    cumload_dirty: bool,
    /// Whether this route is part of the solution.
    in_solution: bool,
    /// Cost of the arc from the last customer back to the depot.
    c_prev_depot: f64,
}

impl Default for RouteNode {
    fn default() -> Self {
        Self {
            first_customer: DUMMY_VERTEX,
            last_customer: DUMMY_VERTEX,
            load: 0,
            next: DUMMY_ROUTE,
            prev: DUMMY_ROUTE,
            size: 0,
            cumload_dirty: true,
            in_solution: false,
            c_prev_depot: 0.,
        }
    }
}

#[derive(Clone, Copy)]
struct DepotNode {
    first_route: i32,
    num_routes: i32,
}

/// A CVRP solution.
///
/// Routes are not first class objects: they are doubly linked lists woven
/// through preallocated per-customer and per-route node arrays, identified by
/// stable integer ids handed out by a pool. The single depot belongs to every
/// route, so route-aware accessors take a fallback vertex to resolve the
/// route when the vertex at hand is the depot.
///
/// Every mutation appends its action to a journal together with the inverse
/// action, which lets callers roll back to the last commit point or replay
/// accepted changes onto another solution without a full copy. Mutations also
/// record the touched vertices in a bounded recency cache which the local
/// search uses as its localization window.
pub struct Solution {
    instance: Arc<Instance>,
    cost: f64,
    max_routes: i32,
    routes_pool: FixedSizeStack<i32>,
    depot: DepotNode,
    routes: Vec<RouteNode>,
    customers: Vec<CustomerNode>,
    cache: LruCache,
    do_list1: Vec<Action>,
    do_list2: Vec<Action>,
    undo_list1: Vec<Action>,
}

impl Solution {
    /// Creates an empty solution with the given recency cache capacity.
    pub fn new(instance: Arc<Instance>, cache_capacity: usize) -> Self {
        let vertices_num = instance.vertices_num() as usize;
        let max_routes = vertices_num as i32 + 1;

        let mut solution = Self {
            instance,
            cost: 0.,
            max_routes,
            routes_pool: FixedSizeStack::new(max_routes as usize - 1, |index| index as i32 + 1),
            depot: DepotNode { first_route: DUMMY_ROUTE, num_routes: 0 },
            routes: vec![RouteNode::default(); max_routes as usize],
            customers: vec![CustomerNode::default(); vertices_num],
            cache: LruCache::new(cache_capacity.min(vertices_num), vertices_num),
            do_list1: Vec::new(),
            do_list2: Vec::new(),
            undo_list1: Vec::new(),
        };
        solution.reset();

        solution
    }

    /// Resets the solution to an empty state.
    pub fn reset(&mut self) {
        self.cost = 0.;

        self.routes_pool.reset(|index| index as i32 + 1);

        self.depot = DepotNode { first_route: DUMMY_ROUTE, num_routes: 0 };
        self.routes.fill(RouteNode::default());
        self.customers.fill(CustomerNode::default());

        self.cache.clear();

        self.do_list1.clear();
        self.do_list2.clear();
        self.undo_list1.clear();
    }

    /// Returns the instance this solution belongs to.
    pub fn instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    /// Returns the solution cost.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Returns the number of routes in the solution.
    pub fn routes_num(&self) -> i32 {
        self.depot.num_routes
    }

    /// Builds a route serving only the given customer and returns the route id.
    pub fn build_one_customer_route(&mut self, customer: i32) -> i32 {
        let route = self.build_one_customer_route_unlogged(customer);

        self.do_list1.push(Action::CreateOneCustomerRoute { route, customer });
        self.undo_list1.push(Action::RemoveOneCustomerRoute { route, customer });

        route
    }

    fn build_one_customer_route_unlogged(&mut self, customer: i32) -> i32 {
        debug_assert!(!self.is_customer_in_solution(customer));
        debug_assert_ne!(customer, DEPOT);

        let route = self.request_route();

        let c_depot = self.instance.cost(DEPOT, customer);

        let node = &mut self.customers[customer as usize];
        node.prev = DEPOT;
        node.next = DEPOT;
        node.route = route;
        node.c_prev = c_depot;

        // Head insert into the route list.
        let next_route = self.depot.first_route;
        self.routes[route as usize].next = next_route;
        self.depot.first_route = route;
        self.routes[route as usize].prev = DUMMY_ROUTE;
        self.routes[next_route as usize].prev = route;

        let node = &mut self.routes[route as usize];
        node.first_customer = customer;
        node.last_customer = customer;
        node.load = self.instance.demand(customer);
        node.size = 1;
        node.c_prev_depot = c_depot;
        node.cumload_dirty = true;

        self.cost += 2. * c_depot;

        self.cache.insert(customer);

        route
    }

    /// Returns the id of the route serving the given customer, [`DUMMY_ROUTE`] when unserved.
    pub fn route_index(&self, customer: i32) -> i32 {
        debug_assert_ne!(customer, DEPOT);
        self.customers[customer as usize].route
    }

    /// Returns the id of the route serving the given vertex. When the vertex
    /// is the depot, the fallback identifies the route.
    pub fn route_index_of(&self, vertex: i32, fallback: i32) -> i32 {
        if vertex == DEPOT {
            self.customers[fallback as usize].route
        } else {
            self.customers[vertex as usize].route
        }
    }

    /// Returns the load of the given route.
    pub fn route_load(&self, route: i32) -> i32 {
        self.routes[route as usize].load
    }

    /// Returns the id of the first route in the route list.
    pub fn first_route(&self) -> i32 {
        self.depot.first_route
    }

    /// Returns the id of the next route in the route list.
    pub fn next_route(&self, route: i32) -> i32 {
        self.routes[route as usize].next
    }

    /// Returns the route list terminator, useful when looping over routes.
    pub fn end_route(&self) -> i32 {
        DUMMY_ROUTE
    }

    /// Returns whether the route serves no customer. Empty routes must always
    /// be removed from the solution right away.
    pub fn is_route_empty(&self, route: i32) -> bool {
        self.routes[route as usize].load == 0
    }

    /// Removes the vertex from the given route and returns the cost delta.
    /// Removing the depot leaves the route in a transient open state.
    pub fn remove_vertex(&mut self, route: i32, vertex: i32) -> f64 {
        let next = self.next_vertex_of(route, vertex);
        self.do_list1.push(Action::RemoveVertex { route, vertex });
        self.undo_list1.push(Action::InsertVertex { route, where_to: next, vertex });

        self.remove_vertex_unlogged(route, vertex)
    }

    fn remove_vertex_unlogged(&mut self, route: i32, vertex: i32) -> f64 {
        debug_assert!(self.contains_vertex(route, vertex));

        let r = route as usize;

        if vertex == DEPOT {
            debug_assert!(!self.is_route_empty(route));

            let next = self.routes[r].first_customer;
            let prev = self.routes[r].last_customer;

            self.cache.insert(vertex);
            self.cache.insert(prev);
            self.cache.insert(next);

            self.set_prev_vertex_ptr(route, next, prev);
            self.set_next_vertex_ptr(route, prev, next);

            self.routes[r].first_customer = DUMMY_VERTEX;
            self.routes[r].last_customer = DUMMY_VERTEX;

            debug_assert_ne!(next, DEPOT);
            let c_prev_next = self.instance.cost(prev, next);
            self.customers[next as usize].c_prev = c_prev_next;

            let delta = c_prev_next - self.instance.cost(prev, vertex) - self.instance.cost(vertex, next);
            self.cost += delta;

            self.routes[r].cumload_dirty = true;

            delta
        } else {
            let next = self.customers[vertex as usize].next;
            let prev = self.customers[vertex as usize].prev;

            self.cache.insert(vertex);
            self.cache.insert(prev);
            self.cache.insert(next);

            if vertex == self.routes[r].first_customer {
                self.routes[r].first_customer = next;
                // Next might be the depot.
                self.set_prev_vertex_ptr(route, next, DEPOT);
            } else if vertex == self.routes[r].last_customer {
                self.routes[r].last_customer = prev;
                // Prev might be the depot.
                self.set_next_vertex_ptr(route, prev, DEPOT);
            } else {
                self.customers[prev as usize].next = next;
                self.customers[next as usize].prev = prev;
            }

            self.routes[r].load -= self.instance.demand(vertex);
            self.routes[r].size -= 1;

            let c_prev_next = self.instance.cost(prev, next);
            if next == DEPOT {
                self.routes[r].c_prev_depot = c_prev_next;
            } else {
                self.customers[next as usize].c_prev = c_prev_next;
            }

            let delta = c_prev_next - self.instance.cost(prev, vertex) - self.instance.cost(vertex, next);
            self.cost += delta;

            self.customers[vertex as usize] = CustomerNode::default();

            self.routes[r].cumload_dirty = true;

            delta
        }
    }

    /// Removes an empty route from the solution, returning its id to the pool.
    pub fn remove_route(&mut self, route: i32) {
        debug_assert!(self.is_route_empty(route));

        self.do_list1.push(Action::RemoveRoute { route });
        self.undo_list1.push(Action::CreateRoute { route });

        self.release_route_unlogged(route);
    }

    /// Returns the first customer of the route.
    pub fn first_customer(&self, route: i32) -> i32 {
        self.routes[route as usize].first_customer
    }

    /// Returns the last customer of the route.
    pub fn last_customer(&self, route: i32) -> i32 {
        self.routes[route as usize].last_customer
    }

    /// Returns the vertex after the given customer in its route.
    pub fn next_vertex(&self, customer: i32) -> i32 {
        debug_assert_ne!(customer, DEPOT);
        self.customers[customer as usize].next
    }

    /// Returns the vertex after the given one in the route. This is the right
    /// accessor when the vertex might be the depot.
    pub fn next_vertex_of(&self, route: i32, vertex: i32) -> i32 {
        debug_assert!(self.contains_vertex(route, vertex));
        if vertex == DEPOT {
            self.routes[route as usize].first_customer
        } else {
            self.customers[vertex as usize].next
        }
    }

    /// Returns the vertex before the given customer in its route.
    pub fn prev_vertex(&self, customer: i32) -> i32 {
        debug_assert_ne!(customer, DEPOT);
        self.customers[customer as usize].prev
    }

    /// Returns the vertex before the given one in the route. This is the
    /// right accessor when the vertex might be the depot.
    pub fn prev_vertex_of(&self, route: i32, vertex: i32) -> i32 {
        debug_assert!(self.contains_vertex(route, vertex));
        if vertex == DEPOT {
            self.routes[route as usize].last_customer
        } else {
            self.customers[vertex as usize].prev
        }
    }

    /// Inserts `vertex` immediately before `where_to` in the route. Inserting
    /// the depot closes a route previously opened by removing it.
    pub fn insert_vertex_before(&mut self, route: i32, where_to: i32, vertex: i32) {
        self.do_list1.push(Action::InsertVertex { route, where_to, vertex });
        self.undo_list1.push(Action::RemoveVertex { route, vertex });

        self.insert_vertex_before_unlogged(route, where_to, vertex);
    }

    fn insert_vertex_before_unlogged(&mut self, route: i32, where_to: i32, vertex: i32) {
        debug_assert_ne!(where_to, vertex);

        let r = route as usize;

        if vertex == DEPOT {
            debug_assert_eq!(self.routes[r].first_customer, DUMMY_VERTEX);
            debug_assert_eq!(self.routes[r].last_customer, DUMMY_VERTEX);
            debug_assert_ne!(where_to, DEPOT);
            debug_assert!(!self.is_route_empty(route));

            let prev = self.customers[where_to as usize].prev;
            debug_assert_ne!(prev, DEPOT);

            self.cache.insert(prev);
            self.cache.insert(where_to);

            self.routes[r].first_customer = where_to;
            self.routes[r].last_customer = prev;

            self.customers[prev as usize].next = DEPOT;
            self.customers[where_to as usize].prev = DEPOT;

            self.routes[r].c_prev_depot = self.instance.cost(prev, DEPOT);

            let old_cost_prev_where = self.customers[where_to as usize].c_prev;
            self.customers[where_to as usize].c_prev = self.instance.cost(DEPOT, where_to);

            let delta = self.routes[r].c_prev_depot + self.customers[where_to as usize].c_prev - old_cost_prev_where;
            self.cost += delta;
        } else {
            debug_assert!(!self.is_customer_in_solution(vertex));

            let prev = self.prev_vertex_of(route, where_to);

            self.cache.insert(prev);
            self.cache.insert(where_to);

            self.customers[vertex as usize].next = where_to;
            self.customers[vertex as usize].prev = prev;
            self.customers[vertex as usize].route = route;

            self.set_next_vertex_ptr(route, prev, vertex);
            self.set_prev_vertex_ptr(route, where_to, vertex);

            let c_vertex_where = self.instance.cost(vertex, where_to);
            let old_cost_prev_where = if where_to == DEPOT {
                let old = self.routes[r].c_prev_depot;
                self.routes[r].c_prev_depot = c_vertex_where;
                old
            } else {
                let old = self.customers[where_to as usize].c_prev;
                self.customers[where_to as usize].c_prev = c_vertex_where;
                old
            };
            self.customers[vertex as usize].c_prev = self.instance.cost(prev, vertex);

            let delta = self.customers[vertex as usize].c_prev + c_vertex_where - old_cost_prev_where;
            self.cost += delta;

            self.routes[r].load += self.instance.demand(vertex);
            self.routes[r].size += 1;
        }

        self.routes[r].cumload_dirty = true;
    }

    /// Reverses the sub-path from `vertex_begin` to `vertex_end` inclusive,
    /// wrapping through the depot when either end is the depot.
    pub fn reverse_route_path(&mut self, route: i32, vertex_begin: i32, vertex_end: i32) {
        self.do_list1.push(Action::ReversePath { route, begin: vertex_begin, end: vertex_end });
        self.undo_list1.push(Action::ReversePath { route, begin: vertex_end, end: vertex_begin });

        self.reverse_route_path_unlogged(route, vertex_begin, vertex_end);
    }

    fn reverse_route_path_unlogged(&mut self, route: i32, vertex_begin: i32, vertex_end: i32) {
        debug_assert_ne!(vertex_begin, vertex_end);

        let r = route as usize;

        let pre = self.prev_vertex_of(route, vertex_begin);
        let stop = self.next_vertex_of(route, vertex_end);

        let c_pre_begin = self.cost_prev_vertex(route, vertex_begin);

        let c_pre_vertex_end = self.instance.cost(pre, vertex_end);
        let c_vertex_begin_stop = self.instance.cost(stop, vertex_begin);

        self.cache.insert(pre);
        self.cache.insert(stop);

        let mut curr = vertex_begin;
        loop {
            self.cache.insert(curr);

            let prev = self.prev_vertex_of(route, curr);
            let next = self.next_vertex_of(route, curr);

            if curr == DEPOT {
                self.routes[r].last_customer = next;
                self.routes[r].first_customer = prev;
                debug_assert_ne!(next, DEPOT);
                self.routes[r].c_prev_depot = self.customers[next as usize].c_prev;
            } else {
                self.customers[curr as usize].prev = next;
                self.customers[curr as usize].next = prev;
                self.customers[curr as usize].c_prev = self.cost_prev_vertex(route, next);
            }

            curr = next;
            if curr == stop {
                break;
            }
        }

        if vertex_end == pre && vertex_begin == stop {
            // The reversed path spans the whole route.
            if vertex_end == DEPOT {
                self.routes[r].c_prev_depot = c_pre_begin;
            } else {
                self.customers[vertex_end as usize].c_prev = c_pre_begin;
            }
        } else {
            self.set_next_vertex_ptr(route, vertex_begin, stop);
            self.set_next_vertex_ptr(route, pre, vertex_end);

            if vertex_end == DEPOT {
                self.routes[r].last_customer = pre;
                self.routes[r].c_prev_depot = c_pre_vertex_end;
            } else {
                self.customers[vertex_end as usize].prev = pre;
                self.customers[vertex_end as usize].c_prev = c_pre_vertex_end;
            }

            if stop == DEPOT {
                self.routes[r].last_customer = vertex_begin;
                self.routes[r].c_prev_depot = c_vertex_begin_stop;
            } else {
                self.customers[stop as usize].prev = vertex_begin;
                self.customers[stop as usize].c_prev = c_vertex_begin_stop;
            }
        }

        let delta = -self.instance.cost(pre, vertex_begin) - self.instance.cost(vertex_end, stop)
            + c_pre_vertex_end
            + c_vertex_begin_stop;
        self.cost += delta;

        self.routes[r].cumload_dirty = true;
    }

    /// Appends the customers of `route_to_append` to `route` and releases
    /// `route_to_append`. Both join endpoints must be customers. The action
    /// is not journaled; this operation is meant for solution construction.
    pub fn append_route(&mut self, route: i32, route_to_append: i32) -> i32 {
        let route_end = self.routes[route as usize].last_customer;
        let append_start = self.routes[route_to_append as usize].first_customer;

        debug_assert_ne!(route_end, DEPOT);
        debug_assert_ne!(append_start, DEPOT);

        self.customers[route_end as usize].next = append_start;
        self.customers[append_start as usize].prev = route_end;
        self.customers[append_start as usize].c_prev = self.instance.cost(route_end, append_start);

        let appended = self.routes[route_to_append as usize];
        let node = &mut self.routes[route as usize];
        node.last_customer = appended.last_customer;
        node.load += appended.load;
        node.size += appended.size;
        node.c_prev_depot = appended.c_prev_depot;

        let delta = self.customers[append_start as usize].c_prev
            - self.instance.cost(route_end, DEPOT)
            - self.instance.cost(DEPOT, append_start);
        self.cost += delta;

        self.cache.insert(route_end);

        let mut curr = append_start;
        while curr != DEPOT {
            self.customers[curr as usize].route = route;
            self.cache.insert(curr);
            curr = self.customers[curr as usize].next;
        }

        self.release_route_unlogged(route_to_append);

        self.routes[route as usize].cumload_dirty = true;

        route
    }

    /// Swaps the suffix after `i` in `route_i` with the suffix starting at `j` in `route_j`:
    /// the arcs `(i, next(i))` and `(prev(j), j)` are replaced by `(i, j)` and `(prev(j), next(i))`.
    pub fn swap_tails(&mut self, i: i32, route_i: i32, j: i32, route_j: i32) {
        debug_assert_ne!(i, DEPOT);
        debug_assert_ne!(j, DEPOT);
        debug_assert_ne!(route_i, route_j);
        debug_assert!(self.contains_vertex(route_i, i));
        debug_assert!(self.contains_vertex(route_j, j));

        let i_next = self.customers[i as usize].next;

        let mut curr = j;
        while curr != DEPOT {
            let next = self.customers[curr as usize].next;
            self.remove_vertex(route_j, curr);
            self.insert_vertex_before(route_i, i_next, curr);
            curr = next;
        }

        let mut curr = i_next;
        while curr != DEPOT {
            let next = self.customers[curr as usize].next;
            self.remove_vertex(route_i, curr);
            self.insert_vertex_before(route_j, DEPOT, curr);
            curr = next;
        }

        self.routes[route_i as usize].cumload_dirty = true;
        self.routes[route_j as usize].cumload_dirty = true;
    }

    /// Variant of [`Solution::swap_tails`] which reverses one side of the two
    /// resulting routes: replaces `(i, next(i))` with `(i, j)` reverting the
    /// path from `j` back to the depot, and `(j, next(j))` with
    /// `(next(i), next(j))` reverting the path from `next(i)` on.
    pub fn split(&mut self, i: i32, route_i: i32, j: i32, route_j: i32) {
        debug_assert_ne!(i, DEPOT);
        debug_assert_ne!(j, DEPOT);

        let i_next = self.customers[i as usize].next;
        let j_next = self.customers[j as usize].next;

        let mut curr = j;
        while curr != DEPOT {
            let prev = self.customers[curr as usize].prev;
            self.remove_vertex(route_j, curr);
            self.insert_vertex_before(route_i, i_next, curr);
            curr = prev;
        }

        let mut before = j_next;
        let mut curr = i_next;
        while curr != DEPOT {
            let next = self.customers[curr as usize].next;
            self.remove_vertex(route_i, curr);
            self.insert_vertex_before(route_j, before, curr);
            before = curr;
            curr = next;
        }

        self.routes[route_i as usize].cumload_dirty = true;
        self.routes[route_j as usize].cumload_dirty = true;
    }

    /// Returns the route's cumulative load up to the given customer included.
    pub fn load_before_included(&mut self, customer: i32) -> i32 {
        debug_assert_ne!(customer, DEPOT);
        let route = self.customers[customer as usize].route;
        if self.routes[route as usize].cumload_dirty {
            self.update_cumulative_loads(route);
            self.routes[route as usize].cumload_dirty = false;
        }
        self.customers[customer as usize].load_before
    }

    /// Returns the route's cumulative load from the given customer included to the route end.
    pub fn load_after_included(&mut self, customer: i32) -> i32 {
        debug_assert_ne!(customer, DEPOT);
        let route = self.customers[customer as usize].route;
        if self.routes[route as usize].cumload_dirty {
            self.update_cumulative_loads(route);
            self.routes[route as usize].cumload_dirty = false;
        }
        self.customers[customer as usize].load_after
    }

    /// Returns whether the given route id is currently part of the solution.
    pub fn is_route_in_solution(&self, route: i32) -> bool {
        self.routes[route as usize].in_solution
    }

    /// Returns whether the given customer is currently served.
    pub fn is_customer_in_solution(&self, customer: i32) -> bool {
        debug_assert_ne!(customer, DEPOT);
        self.customers[customer as usize].route != DUMMY_ROUTE
    }

    /// Returns whether the given vertex is currently served. Use this
    /// accessor when the vertex could be the depot.
    pub fn is_vertex_in_solution(&self, vertex: i32) -> bool {
        vertex == DEPOT || self.is_customer_in_solution(vertex)
    }

    /// Returns whether the vertex is served by the route. Always true for the depot.
    pub fn contains_vertex(&self, route: i32, vertex: i32) -> bool {
        debug_assert!(vertex >= 0 && vertex < self.instance.vertices_num());
        debug_assert!(route >= 0 && route < self.max_routes);
        self.customers[vertex as usize].route == route || vertex == DEPOT
    }

    /// Returns the number of customers served by the route.
    pub fn route_size(&self, route: i32) -> i32 {
        self.routes[route as usize].size
    }

    /// Returns the cost of the arc entering the vertex from its predecessor
    /// in the route. Use this accessor when the vertex could be the depot.
    pub fn cost_prev_vertex(&self, route: i32, vertex: i32) -> f64 {
        if vertex == DEPOT {
            self.routes[route as usize].c_prev_depot
        } else {
            self.customers[vertex as usize].c_prev
        }
    }

    /// Returns the cost of the arc entering the customer from its predecessor.
    pub fn cost_prev_customer(&self, customer: i32) -> f64 {
        debug_assert_ne!(customer, DEPOT);
        self.customers[customer as usize].c_prev
    }

    /// Returns the cost of the arc from the route's last customer to the depot.
    pub fn cost_prev_depot(&self, route: i32) -> f64 {
        self.routes[route as usize].c_prev_depot
    }

    /// Recomputes the route cost by walking it. Linear, use with caution.
    pub fn route_cost(&self, route: i32) -> f64 {
        let mut curr = self.routes[route as usize].first_customer;
        let mut sum = self.instance.cost(DEPOT, curr);
        while curr != DEPOT {
            let next = self.customers[curr as usize].next;
            sum += self.instance.cost(curr, next);
            curr = next;
        }
        sum
    }

    /// Generates a compact textual representation of the given route.
    pub fn route_to_string(&self, route: i32) -> String {
        let mut str = format!("[{route}] {DEPOT}");
        let mut curr = self.routes[route as usize].first_customer;
        while curr != DEPOT {
            str.push_str(&format!(" {curr}"));
            curr = self.customers[curr as usize].next;
        }
        str.push_str(&format!(" {DEPOT}"));
        str
    }

    /// Clears the recently modified vertices cache.
    pub fn clear_recent_vertices(&mut self) {
        self.cache.clear();
    }

    /// Iterates over the recently modified vertices, most recent first. It is
    /// not safe to mutate the solution while holding the iterator; collect
    /// the vertices first when that is needed.
    pub fn recent_vertices(&self) -> impl Iterator<Item = i32> + '_ {
        self.cache.iter()
    }

    /// Returns the number of recently modified vertices.
    pub fn recent_vertices_num(&self) -> usize {
        self.cache.len()
    }

    /// Returns whether the route respects the vehicle capacity.
    pub fn is_load_feasible(&self, route: i32) -> bool {
        self.routes[route as usize].load <= self.instance.vehicle_capacity()
    }

    /// Returns whether every route respects the vehicle capacity.
    pub fn is_solution_load_feasible(&self) -> bool {
        let mut route = self.first_route();
        while route != DUMMY_ROUTE {
            if !self.is_load_feasible(route) {
                return false;
            }
            route = self.next_route(route);
        }
        true
    }

    /// Replays this solution's first do-list onto another solution.
    pub fn apply_do_list1_to(&self, other: &mut Solution) {
        for action in &self.do_list1 {
            other.apply_action(*action);
        }
    }

    /// Replays this solution's second do-list onto another solution.
    pub fn apply_do_list2_to(&self, other: &mut Solution) {
        for action in &self.do_list2 {
            other.apply_action(*action);
        }
    }

    /// Rolls this solution back by replaying the undo-list in reverse.
    pub fn apply_undo_list1(&mut self) {
        let undo_list = std::mem::take(&mut self.undo_list1);
        for action in undo_list.iter().rev() {
            self.apply_action(*action);
        }
        self.undo_list1 = undo_list;
    }

    /// Appends the first do-list to the second one.
    pub fn append_do_list1_to_do_list2(&mut self) {
        let do_list = std::mem::take(&mut self.do_list1);
        self.do_list2.extend_from_slice(&do_list);
        self.do_list1 = do_list;
    }

    /// Clears the first do-list.
    pub fn clear_do_list1(&mut self) {
        self.do_list1.clear();
    }

    /// Clears the second do-list.
    pub fn clear_do_list2(&mut self) {
        self.do_list2.clear();
    }

    /// Clears the undo-list.
    pub fn clear_undo_list1(&mut self) {
        self.undo_list1.clear();
    }

    fn request_route(&mut self) -> i32 {
        debug_assert!(!self.routes_pool.is_empty());

        let route = self.routes_pool.get();
        self.routes[route as usize].in_solution = true;

        self.depot.num_routes += 1;

        route
    }

    fn release_route_unlogged(&mut self, route: i32) {
        let prev_route = self.routes[route as usize].prev;
        let next_route = self.routes[route as usize].next;

        self.routes[prev_route as usize].next = next_route;
        self.routes[next_route as usize].prev = prev_route;
        self.depot.num_routes -= 1;

        if self.depot.first_route == route {
            self.depot.first_route = next_route;
        }

        self.routes[route as usize] = RouteNode::default();

        self.routes_pool.push(route);
    }

    fn is_missing_depot(&self, route: i32) -> bool {
        self.routes[route as usize].first_customer == DUMMY_VERTEX
    }

    fn set_next_vertex_ptr(&mut self, route: i32, vertex: i32, next: i32) {
        if vertex == DEPOT {
            self.routes[route as usize].first_customer = next;
        } else {
            self.customers[vertex as usize].next = next;
        }
    }

    fn set_prev_vertex_ptr(&mut self, route: i32, vertex: i32, prev: i32) {
        if vertex == DEPOT {
            self.routes[route as usize].last_customer = prev;
        } else {
            self.customers[vertex as usize].prev = prev;
        }
    }

    fn update_cumulative_loads(&mut self, route: i32) {
        debug_assert!(!self.is_route_empty(route));

        let mut prev = self.routes[route as usize].first_customer;

        self.customers[prev as usize].load_before = self.instance.demand(prev);
        self.customers[prev as usize].load_after = self.routes[route as usize].load;

        let mut curr = self.customers[prev as usize].next;
        while curr != DEPOT {
            self.customers[curr as usize].load_before =
                self.customers[prev as usize].load_before + self.instance.demand(curr);
            self.customers[curr as usize].load_after =
                self.customers[prev as usize].load_after - self.instance.demand(prev);

            prev = curr;
            curr = self.customers[curr as usize].next;
        }
    }
}

impl PartialEq for Solution {
    /// Two solutions are equal when their costs agree within 0.01 and every
    /// customer keeps the same predecessor and successor; route ids do not
    /// matter.
    fn eq(&self, other: &Self) -> bool {
        if (self.cost - other.cost).abs() >= 0.01 {
            return false;
        }
        self.instance.customers().all(|c| {
            self.customers[c as usize].prev == other.customers[c as usize].prev
                && self.customers[c as usize].next == other.customers[c as usize].next
        })
    }
}

impl Clone for Solution {
    /// Performs a deep copy. This is expensive for large instances; prefer
    /// journal replay for accept/reject bookkeeping.
    fn clone(&self) -> Self {
        Self {
            instance: self.instance.clone(),
            cost: self.cost,
            max_routes: self.max_routes,
            routes_pool: self.routes_pool.clone(),
            depot: self.depot,
            routes: self.routes.clone(),
            customers: self.customers.clone(),
            cache: self.cache.clone(),
            do_list1: self.do_list1.clone(),
            do_list2: self.do_list2.clone(),
            undo_list1: self.undo_list1.clone(),
        }
    }
}
