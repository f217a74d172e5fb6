#[cfg(test)]
#[path = "../tests/unit/writer_test.rs"]
mod writer_test;

use grils_core::models::Solution;
use grils_core::utils::GenericResult;
use std::io::Write;

/// Writes the solution in the common CVRP format: one `Route #k: c1 .. cm`
/// line per route followed by the total cost.
pub fn write_solution<W: Write>(writer: &mut W, solution: &Solution) -> GenericResult<()> {
    let instance = solution.instance().clone();

    let mut route = solution.first_route();
    let mut index = 1;
    while route != solution.end_route() {
        write!(writer, "Route #{index}:")?;

        let mut customer = solution.first_customer(route);
        while customer != instance.depot() {
            write!(writer, " {customer}")?;
            customer = solution.next_vertex(customer);
        }
        writeln!(writer)?;

        route = solution.next_route(route);
        index += 1;
    }
    write!(writer, "Cost {:.6}", solution.cost())?;

    Ok(())
}

/// Writes the one line score file: the solution cost and the elapsed seconds
/// separated by a tab.
pub fn write_score<W: Write>(writer: &mut W, cost: f64, elapsed_secs: u64) -> GenericResult<()> {
    writeln!(writer, "{cost}\t{elapsed_secs}")?;
    Ok(())
}
