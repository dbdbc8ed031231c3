//! Two-peak landscape in the unit square.
//!
//! A wide basin at (0.5, 0.5) hides a narrow, deeper one near (0.58, 0.17).
//! A constant spread and a large seed budget let the forest find the deep one.
//!
//! Run with: `cargo run --example basic_function`

use forest_evolution::prelude::*;

fn main() -> Result<(), ForestError> {
    let config = ForestConfig::uniform_bounds(2, 0.0, 1.0, 0.2, 0.2)
        .with_initial_trees(20)
        .with_max_trees(50)
        .with_seeds(2, 10)
        .with_max_iterations(100)
        .with_seed(2006);

    let mut forest = Forest::new(config, benchmarks::two_peaks)?;
    let history = forest.run_observed(100, |stats| {
        println!("Iteration: {:>3}  Fitness: {:.6}", stats.iteration, stats.best);
    })?;

    let best = forest.best();
    println!();
    println!("Best solution:  {:?}", best.vector());
    println!("Best fitness:   {:.6}", best.fitness);
    println!("Wide basin:     {:.6}", benchmarks::two_peaks(&[0.5, 0.5]));
    println!("Generations:    {}", history.len());
    Ok(())
}
