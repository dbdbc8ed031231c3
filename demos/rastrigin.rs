//! Rastrigin in ten dimensions.
//!
//! Run with: `cargo run --example rastrigin`
//! Set `RUST_LOG=forest_evolution=debug` for per-generation logs.

use forest_evolution::prelude::*;
use forest_evolution::report::{self, ReportFormat};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ForestError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ForestConfig::uniform_bounds(10, -5.12, 5.12, 1.0, 0.3)
        .with_initial_trees(5)
        .with_max_trees(50)
        .with_seeds(5, 50)
        .with_max_iterations(60);

    let mut forest = Forest::new(config, benchmarks::rastrigin)?;
    let history = forest.run()?;

    print!("{}", report::render(&history, ReportFormat::Table)?);
    println!();
    println!("Best fitness: {:.6}", forest.best().fitness);
    println!("Evaluations:  {}", forest.evaluations());
    println!("Seed:         {} (pass to with_seed to repeat this run)", forest.seed());
    Ok(())
}
