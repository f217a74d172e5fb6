#[cfg(test)]
#[path = "../../tests/unit/construction/bpp_test.rs"]
mod bpp_test;

use crate::models::Instance;

/// Greedy first-fit-decreasing solution of the bin packing problem induced
/// by demands and vehicle capacity. The number of bins bounds the number of
/// routes any capacity feasible solution needs.
pub fn first_fit_decreasing(instance: &Instance) -> i32 {
    let mut customers: Vec<i32> = instance.customers().collect();
    customers.sort_by(|&i, &j| instance.demand(j).cmp(&instance.demand(i)));

    let mut bins = vec![0; customers.len()];
    let mut used_bins = 0;

    for customer in customers {
        let demand = instance.demand(customer);
        for (bin, load) in bins.iter_mut().enumerate() {
            if *load + demand <= instance.vehicle_capacity() {
                *load += demand;
                used_bins = used_bins.max(bin as i32 + 1);
                break;
            }
        }
    }

    used_bins
}
