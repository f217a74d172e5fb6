use clap::{Arg, ArgMatches, Command};
use grils_core::prelude::{GenericResult, Parameters};
use std::str::FromStr;

/// Builds the argument definition of the solver binary.
pub fn create_app() -> Command {
    Command::new("grils")
        .about("A granular iterated local search solver for the CVRP")
        .arg(Arg::new("instance").help("Path to a TSPLIB CVRP instance").required(true).index(1))
        .arg(Arg::new("outpath").long("outpath").help("Output directory").default_value("./"))
        .arg(
            Arg::new("tolerance")
                .long("tolerance")
                .help("Additive tolerance used by the local search")
                .default_value("0.01"),
        )
        .arg(
            Arg::new("neighbors-num")
                .long("neighbors-num")
                .help("Number of precomputed nearest neighbors per vertex")
                .default_value("1500"),
        )
        .arg(
            Arg::new("granular-neighbors")
                .long("granular-neighbors")
                .help("Number of neighbors considered by the move generators")
                .default_value("25"),
        )
        .arg(
            Arg::new("cache")
                .long("cache")
                .help("Capacity of the recently modified vertices cache")
                .default_value("50"),
        )
        .arg(
            Arg::new("routemin-iterations")
                .long("routemin-iterations")
                .help("Iteration budget of the route minimization phase")
                .default_value("1000"),
        )
        .arg(
            Arg::new("coreopt-iterations")
                .long("coreopt-iterations")
                .help("Iteration budget of the core optimization loop")
                .default_value("100000"),
        )
        .arg(
            Arg::new("granular-gamma-base")
                .long("granular-gamma-base")
                .help("Base fraction of active move generators per vertex")
                .default_value("0.25"),
        )
        .arg(
            Arg::new("granular-delta")
                .long("granular-delta")
                .help("Scaler of the sparsification doubling threshold")
                .default_value("0.50"),
        )
        .arg(
            Arg::new("shaking-lower-bound")
                .long("shaking-lower-bound")
                .help("Intensification band lower bound factor")
                .default_value("0.375"),
        )
        .arg(
            Arg::new("shaking-upper-bound")
                .long("shaking-upper-bound")
                .help("Intensification band upper bound factor")
                .default_value("0.85"),
        )
        .arg(Arg::new("seed").long("seed").help("Seed of the random stream").default_value("0"))
        .arg(
            Arg::new("sa-initial-factor")
                .long("sa-initial-factor")
                .help("Initial temperature factor of the annealing schedule")
                .default_value("0.1"),
        )
        .arg(
            Arg::new("sa-final-factor")
                .long("sa-final-factor")
                .help("Final over initial temperature ratio")
                .default_value("0.01"),
        )
}

fn parse_value<T: FromStr>(matches: &ArgMatches, name: &str) -> GenericResult<T>
where
    T::Err: std::fmt::Display,
{
    let value = matches.get_one::<String>(name).expect("the argument has a default");
    value.parse::<T>().map_err(|err| format!("cannot parse --{name} value '{value}': {err}").into())
}

/// Extracts the instance path from parsed arguments.
pub fn get_instance_path(matches: &ArgMatches) -> String {
    matches.get_one::<String>("instance").expect("the instance path is required").clone()
}

/// Extracts the output directory, appending a trailing separator if missing.
pub fn get_outpath(matches: &ArgMatches) -> String {
    let mut outpath = matches.get_one::<String>("outpath").expect("the argument has a default").clone();
    if !outpath.ends_with(std::path::MAIN_SEPARATOR) {
        outpath.push(std::path::MAIN_SEPARATOR);
    }
    outpath
}

/// Builds solver parameters from parsed arguments.
pub fn get_parameters(matches: &ArgMatches) -> GenericResult<Parameters> {
    Ok(Parameters {
        tolerance: parse_value(matches, "tolerance")?,
        neighbors_num: parse_value(matches, "neighbors-num")?,
        granular_neighbors: parse_value(matches, "granular-neighbors")?,
        cache_size: parse_value(matches, "cache")?,
        routemin_iterations: parse_value(matches, "routemin-iterations")?,
        coreopt_iterations: parse_value(matches, "coreopt-iterations")?,
        gamma_base: parse_value(matches, "granular-gamma-base")?,
        delta: parse_value(matches, "granular-delta")?,
        shaking_lb_factor: parse_value(matches, "shaking-lower-bound")?,
        shaking_ub_factor: parse_value(matches, "shaking-upper-bound")?,
        seed: parse_value(matches, "seed")?,
        sa_initial_factor: parse_value(matches, "sa-initial-factor")?,
        sa_final_factor: parse_value(matches, "sa-final-factor")?,
    })
}
