#[cfg(test)]
#[path = "../../tests/unit/construction/savings_test.rs"]
mod savings_test;

use crate::models::{Instance, Solution};

struct Saving {
    i: i32,
    j: i32,
    value: f64,
}

/// Limited Clarke & Wright savings construction.
///
/// Starts from one route per customer and greedily fuses routes by
/// decreasing saving value. Only savings between a customer and its
/// `neighbors_num` nearest neighbors are generated, which keeps the list
/// linear in the instance size.
pub fn clarke_and_wright(instance: &Instance, solution: &mut Solution, lambda: f64, neighbors_num: usize) {
    solution.reset();

    for customer in instance.customers() {
        solution.build_one_customer_route(customer);
    }

    let neighbors_num = neighbors_num.min(instance.customers_num() as usize - 1);

    let mut savings = Vec::with_capacity(instance.customers_num() as usize * neighbors_num);

    for i in instance.customers() {
        let mut added = 0;
        for &j in &instance.neighbors_of(i)[1..] {
            if added == neighbors_num {
                break;
            }

            if i < j {
                let value =
                    instance.cost(i, instance.depot()) + instance.cost(instance.depot(), j) - lambda * instance.cost(i, j);
                savings.push(Saving { i, j, value });
                added += 1;
            }
        }
    }

    savings.sort_by(|a, b| b.value.total_cmp(&a.value));

    for saving in &savings {
        let i_route = solution.route_index(saving.i);
        let j_route = solution.route_index(saving.j);

        if i_route == j_route {
            continue;
        }

        if solution.last_customer(i_route) == saving.i
            && solution.first_customer(j_route) == saving.j
            && solution.route_load(i_route) + solution.route_load(j_route) <= instance.vehicle_capacity()
        {
            solution.append_route(i_route, j_route);
        } else if solution.last_customer(j_route) == saving.j
            && solution.first_customer(i_route) == saving.i
            && solution.route_load(i_route) + solution.route_load(j_route) <= instance.vehicle_capacity()
        {
            solution.append_route(j_route, i_route);
        }
    }

    // Construction is not a candidate for rollback.
    solution.clear_do_list1();
    solution.clear_undo_list1();
}
