//! A command line interface for the granular iterated local search CVRP
//! solver. It reads a TSPLIB instance, runs the optimization pipeline, and
//! stores the best solution plus a one line score file in the output
//! directory.

mod args;

use grils_core::prelude::*;
use grils_core::utils::DefaultRandom;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    let matches = args::create_app().get_matches();

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(matches: &clap::ArgMatches) -> GenericResult<()> {
    let instance_path = args::get_instance_path(matches);
    let outpath = args::get_outpath(matches);
    let params = args::get_parameters(matches)?;

    let global_timer = Timer::start();

    let instance = grils_tsplib::read_instance_from_path(Path::new(&instance_path), params.neighbors_num)?;
    let instance = Arc::new(instance);

    let environment = Environment::new(DefaultRandom::new(params.seed), Arc::new(|msg| println!("{msg}")));

    let seed = params.seed;
    let best_solution = CoreOptimization::new(instance, params).solve(&environment);

    let elapsed_secs = global_timer.elapsed_secs();

    println!("best solution: cost {:.2}, {} routes, found in {elapsed_secs}s", best_solution.cost(), best_solution.routes_num());

    std::fs::create_dir_all(&outpath)?;

    let basename = Path::new(&instance_path)
        .file_name()
        .ok_or_else(|| GenericError::from(format!("cannot derive a file name from '{instance_path}'")))?
        .to_string_lossy();

    let score_path = format!("{outpath}{basename}_seed-{seed}.out");
    let mut score_file = BufWriter::new(File::create(&score_path)?);
    grils_tsplib::write_score(&mut score_file, best_solution.cost(), elapsed_secs)?;

    let solution_path = format!("{outpath}{basename}_seed-{seed}.vrp.sol");
    let mut solution_file = BufWriter::new(File::create(&solution_path)?);
    grils_tsplib::write_solution(&mut solution_file, &best_solution)?;

    println!("results stored in\n - {score_path}\n - {solution_path}");

    Ok(())
}
