//! The solver: parameters, the route minimization pre-phase and the core
//! optimization loop combining shaking, randomized variable neighborhood
//! descent and simulated annealing acceptance with per-vertex adaptation of
//! the sparsification and shaking intensities.

#[cfg(test)]
#[path = "../../tests/unit/solver/core_opt_test.rs"]
mod core_opt_test;

pub mod search;

mod acceptance;
pub use self::acceptance::SimulatedAnnealing;

mod routemin;
pub use self::routemin::routemin;

use crate::algorithms::math::RunningMean;
use crate::construction::{clarke_and_wright, first_fit_decreasing};
use crate::models::{Instance, Solution};
use crate::solver::search::{MoveGenerators, NeighborhoodComposer, OperatorTag, RandomizedVnd, RuinAndRecreate};
use crate::utils::{Environment, Timer};
use std::sync::Arc;

/// Solver parameters with their default values.
pub struct Parameters {
    /// Additive tolerance for cost comparisons.
    pub tolerance: f64,
    /// Number of precomputed nearest neighbors per vertex.
    pub neighbors_num: usize,
    /// Number of neighbors considered by the move generator catalog.
    pub granular_neighbors: usize,
    /// Capacity of the recently modified vertices cache.
    pub cache_size: usize,
    /// Iteration budget of the route minimization pre-phase.
    pub routemin_iterations: usize,
    /// Iteration budget of the core optimization loop.
    pub coreopt_iterations: usize,
    /// Base fraction of active move generators per vertex.
    pub gamma_base: f64,
    /// Scales the non-improving iterations after which a vertex doubles its
    /// active fraction.
    pub delta: f64,
    /// Intensification band lower bound factor.
    pub shaking_lb_factor: f64,
    /// Intensification band upper bound factor.
    pub shaking_ub_factor: f64,
    /// Seed of the random stream.
    pub seed: u64,
    /// Initial temperature factor of the annealing schedule.
    pub sa_initial_factor: f64,
    /// Final over initial temperature ratio of the annealing schedule.
    pub sa_final_factor: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            neighbors_num: 1500,
            granular_neighbors: 25,
            cache_size: 50,
            routemin_iterations: 1000,
            coreopt_iterations: 100_000,
            gamma_base: 0.25,
            delta: 0.50,
            shaking_lb_factor: 0.375,
            shaking_ub_factor: 0.85,
            seed: 0,
            sa_initial_factor: 0.1,
            sa_final_factor: 0.01,
        }
    }
}

// Fixed constants of the limited savings construction.
const CW_LAMBDA: f64 = 1.0;
const CW_NEIGHBORS: usize = 100;

/// The whole optimization pipeline: savings construction, move generator
/// setup, route minimization and the core loop.
pub struct CoreOptimization {
    instance: Arc<Instance>,
    params: Parameters,
}

impl CoreOptimization {
    /// Creates the solver for the given instance.
    pub fn new(instance: Arc<Instance>, params: Parameters) -> Self {
        Self { instance, params }
    }

    /// Runs the pipeline and returns the best solution found.
    pub fn solve(&self, environment: &Environment) -> Solution {
        let instance = &self.instance;
        let params = &self.params;
        let logger = &environment.logger;

        let mut best_solution = Solution::new(instance.clone(), params.cache_size);
        clarke_and_wright(instance, &mut best_solution, CW_LAMBDA, CW_NEIGHBORS);
        logger(&format!(
            "initial solution: cost {:.2}, {} routes",
            best_solution.cost(),
            best_solution.routes_num()
        ));

        let mut moves = MoveGenerators::new(instance, params.granular_neighbors);
        logger(&format!("using {} move generators", moves.size()));

        let kmin = first_fit_decreasing(instance);

        if kmin < best_solution.routes_num() {
            best_solution = routemin(
                instance,
                &best_solution,
                environment,
                &mut moves,
                kmin,
                params.routemin_iterations,
                params.tolerance,
            );
        }

        self.core_optimization(best_solution, &mut moves, environment)
    }

    /// The main loop. Every iteration rolls the working solution back to the
    /// annealing incumbent, shakes it, reoptimizes it with the composed
    /// descent, adapts the per-vertex parameters and lets the annealing
    /// schedule decide whether the result becomes the new incumbent.
    fn core_optimization(
        &self,
        mut best_solution: Solution,
        moves: &mut MoveGenerators,
        environment: &Environment,
    ) -> Solution {
        let instance = &self.instance;
        let params = &self.params;
        let random = &environment.random;
        let vertices_num = instance.vertices_num() as usize;

        let mut local_search = NeighborhoodComposer::new(params.tolerance);
        local_search.append(RandomizedVnd::new(instance, &OperatorTag::full_catalog(), params.tolerance, false));
        local_search.append(RandomizedVnd::new(instance, &[OperatorTag::EjectionChain], params.tolerance, false));

        let mut neighbor = best_solution.clone();

        let mut gamma = vec![params.gamma_base; vertices_num];
        let mut gamma_counter = vec![0usize; vertices_num];
        let mut gamma_vertices: Vec<i32> = instance.vertices().collect();
        moves.set_active_percentage(&gamma, &gamma_vertices);

        let mut mean_accessed_vertices = RunningMean::default();

        let mut ruin_and_recreate = RuinAndRecreate::new(instance.clone());
        let mut ruined_customers: Vec<i32> = Vec::new();

        let mean_arc_cost =
            neighbor.cost() / (instance.customers_num() as f64 + 2. * neighbor.routes_num() as f64);
        let mut shaking_lb = mean_arc_cost * params.shaking_lb_factor;
        let mut shaking_ub = mean_arc_cost * params.shaking_ub_factor;

        let omega_base = ((vertices_num as f64).ln().ceil() as i32).max(1);
        let mut omega = vec![omega_base; vertices_num];

        // The initial temperature derives from the mean cost of random arcs.
        let mut sampled_arc_cost = RunningMean::default();
        for _ in 0..instance.vertices_num() {
            let a = random.uniform_int(0, instance.vertices_num() - 1);
            let b = random.uniform_int(0, instance.vertices_num() - 1);
            sampled_arc_cost.update(instance.cost(a, b));
        }
        let sa_initial_temperature = sampled_arc_cost.mean() * params.sa_initial_factor;
        let sa_final_temperature = sa_initial_temperature * params.sa_final_factor;
        let mut annealing =
            SimulatedAnnealing::new(sa_initial_temperature, sa_final_temperature, params.coreopt_iterations);

        (environment.logger)(&format!(
            "core optimization: {} iterations, temperature {:.3} to {:.3}",
            params.coreopt_iterations, sa_initial_temperature, sa_final_temperature
        ));

        let mut reference_cost = neighbor.cost();

        let loop_timer = Timer::start();
        let mut log_timer = Timer::start();

        for iter in 0..params.coreopt_iterations {
            neighbor.apply_undo_list1();
            neighbor.clear_do_list1();
            neighbor.clear_undo_list1();
            neighbor.clear_recent_vertices();

            let walk_seed = ruin_and_recreate.apply(&mut neighbor, &omega, random);

            ruined_customers.clear();
            ruined_customers.extend(neighbor.recent_vertices());

            local_search.sequential_apply(&mut neighbor, moves, random);

            mean_accessed_vertices.update(neighbor.recent_vertices_num() as f64);

            let max_non_improving = (params.delta
                * params.coreopt_iterations as f64
                * mean_accessed_vertices.mean()
                / vertices_num as f64)
                .ceil() as usize;

            let improved_best = neighbor.cost() < best_solution.cost();

            if improved_best {
                neighbor.apply_do_list2_to(&mut best_solution);
                neighbor.apply_do_list1_to(&mut best_solution);
                neighbor.clear_do_list2();
                debug_assert!(best_solution == neighbor);

                gamma_vertices.clear();
                for i in neighbor.recent_vertices() {
                    gamma[i as usize] = params.gamma_base;
                    gamma_counter[i as usize] = 0;
                    gamma_vertices.push(i);
                }
                moves.set_active_percentage(&gamma, &gamma_vertices);
            } else {
                gamma_vertices.clear();
                gamma_vertices.extend(neighbor.recent_vertices());
                for n in 0..gamma_vertices.len() {
                    let i = gamma_vertices[n] as usize;
                    gamma_counter[i] += 1;
                    if gamma_counter[i] >= max_non_improving {
                        gamma[i] = (gamma[i] * 2.).min(1.);
                        gamma_counter[i] = 0;
                        moves.set_active_percentage(&gamma, &gamma_vertices[n..n + 1]);
                    }
                }
            }

            // Nudge the ruin intensity of the shaken customers towards more
            // diversification inside the intensification band, less outside.
            let seed_shake_value = omega[walk_seed as usize];

            if neighbor.cost() > reference_cost + shaking_ub {
                for &i in &ruined_customers {
                    if omega[i as usize] > seed_shake_value - 1 {
                        omega[i as usize] -= 1;
                    }
                }
            } else if neighbor.cost() >= reference_cost && neighbor.cost() < reference_cost + shaking_lb {
                for &i in &ruined_customers {
                    if omega[i as usize] < seed_shake_value + 1 {
                        omega[i as usize] += 1;
                    }
                }
            } else {
                for &i in &ruined_customers {
                    if random.is_head_not_tails() {
                        if omega[i as usize] > seed_shake_value - 1 {
                            omega[i as usize] -= 1;
                        }
                    } else if omega[i as usize] < seed_shake_value + 1 {
                        omega[i as usize] += 1;
                    }
                }
            }

            if annealing.accept(reference_cost, &neighbor, random) {
                if !improved_best {
                    neighbor.append_do_list1_to_do_list2();
                }

                neighbor.clear_do_list1();
                neighbor.clear_undo_list1();

                reference_cost = neighbor.cost();

                let mean_arc_cost =
                    neighbor.cost() / (instance.customers_num() as f64 + 2. * neighbor.routes_num() as f64);
                shaking_lb = mean_arc_cost * params.shaking_lb_factor;
                shaking_ub = mean_arc_cost * params.shaking_ub_factor;
            }

            annealing.decrease_temperature();

            if log_timer.elapsed_secs() >= 1 {
                log_timer.restart();
                self.log_progress(
                    environment,
                    iter,
                    &best_solution,
                    &gamma,
                    &omega,
                    &annealing,
                    loop_timer.elapsed_secs_as_f64(),
                );
            }
        }

        best_solution
    }

    fn log_progress(
        &self,
        environment: &Environment,
        iter: usize,
        best_solution: &Solution,
        gamma: &[f64],
        omega: &[i32],
        annealing: &SimulatedAnnealing,
        elapsed_secs: f64,
    ) {
        let instance = &self.instance;
        let iterations = self.params.coreopt_iterations;

        let progress = 100. * (iter + 1) as f64 / iterations as f64;
        let iter_per_second = (iter + 1) as f64 / (elapsed_secs + 0.01);
        let eta = (iterations - iter) as f64 / iter_per_second;

        let gamma_mean = gamma.iter().sum::<f64>() / instance.vertices_num() as f64;
        let omega_mean = omega[1..].iter().sum::<i32>() as f64 / instance.customers_num() as f64;

        (environment.logger)(&format!(
            "[{progress:5.1}%] cost {:.0}, routes {}, {iter_per_second:.0} iter/s, eta {eta:.0}s, gamma {gamma_mean:.3}, omega {omega_mean:.2}, temp {:.3}",
            best_solution.cost(),
            best_solution.routes_num(),
            annealing.temperature()
        ));
    }
}
