//! forest CLI: minimize benchmark functions with the Forest Evolution Algorithm.

use clap::{Args, Parser, Subcommand};
use forest_evolution::{
    benchmarks::Benchmark,
    report::{self, ReportFormat},
    Dispersal, Forest, ForestConfig,
};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "forest")]
#[command(about = "Derivative-free minimization with the Forest Evolution Algorithm")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Minimize a benchmark function
    Run(RunArgs),

    /// List the available benchmark functions
    List,
}

#[derive(Args)]
struct RunArgs {
    /// Benchmark function (see `forest list`)
    function: String,

    /// Base configuration file (JSON); flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Problem dimension
    #[arg(short, long)]
    dim: Option<usize>,

    /// Lower bound of every dimension
    #[arg(long, allow_hyphen_values = true)]
    lower: Option<f64>,

    /// Upper bound of every dimension
    #[arg(long, allow_hyphen_values = true)]
    upper: Option<f64>,

    /// Spread at the first iteration
    #[arg(long)]
    max_std: Option<f64>,

    /// Spread at the last iteration
    #[arg(long)]
    min_std: Option<f64>,

    /// Trees in the initial forest
    #[arg(long)]
    initial_trees: Option<usize>,

    /// Population cap after selection
    #[arg(long)]
    max_trees: Option<usize>,

    /// Seeds of the best tree
    #[arg(long)]
    max_seeds: Option<usize>,

    /// Seeds of the worst tree
    #[arg(long)]
    min_seeds: Option<usize>,

    /// Probability of global seeding
    #[arg(long)]
    epsilon: Option<f64>,

    /// Subtracted from epsilon after every generation
    #[arg(long)]
    epsilon_decay: Option<f64>,

    /// Number of generations
    #[arg(short, long)]
    iterations: Option<usize>,

    /// Per-dimension mutation probability of local seeding
    #[arg(long)]
    mutation_probability: Option<f64>,

    /// Exponent of the spread schedule
    #[arg(long)]
    spread_exponent: Option<i32>,

    /// Local noise: normal or uniform
    #[arg(long)]
    dispersal: Option<String>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Trace format: table, csv or json
    #[arg(short, long, default_value = "table")]
    format: ReportFormat,

    /// Write the convergence trace to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print every generation
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => cmd_run(&args),
        Commands::List => {
            cmd_list();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_run(args: &RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let bench: Benchmark = args.function.parse()?;

    let config = build_config(bench, args)?;
    if let Some(dim) = bench.dimension() {
        if config.dimension() != dim {
            return Err(format!(
                "{bench} is defined in {dim} dimensions, got {}",
                config.dimension()
            )
            .into());
        }
    }

    println!("Forest Evolution");
    println!("================");
    println!("Function:     {bench}");
    println!("Dimension:    {}", config.dimension());
    println!("Iterations:   {}", config.max_iterations);
    println!("Trees:        {} initial, {} max", config.initial_trees, config.max_trees);
    println!("Seeds:        {}..={}", config.min_seeds, config.max_seeds);
    println!("Spread:       {} -> {} ({})", config.max_std, config.min_std, config.dispersal);
    println!();

    let iterations = config.max_iterations;
    let mut forest = Forest::new(config, bench.function())?;

    let start = Instant::now();
    let verbose = args.verbose;
    let history = forest.run_observed(iterations, |stats| {
        if verbose {
            println!(
                "Iteration: {:>5}  Fitness: {:.6e}  Mean: {:.6e}  Trees: {}",
                stats.iteration, stats.best, stats.mean, stats.population
            );
        }
    })?;
    let elapsed = start.elapsed();

    if verbose {
        println!();
    }

    let best = forest.best();
    println!("Best fitness: {:.6e}", best.fitness);
    println!("Optimum:      {}", bench.optimum());
    println!("Solution:     {:?}", best.vector());
    println!("Evaluations:  {}", forest.evaluations());
    println!("Seed:         {}", forest.seed());
    println!("Time:         {:.2}ms", elapsed.as_secs_f64() * 1000.0);

    if let Some(path) = &args.output {
        report::write_to(&history, args.format, path)?;
        println!();
        println!("Trace written to: {}", path.display());
    }

    Ok(())
}

/// Start from the config file (or the benchmark's defaults), then apply flags.
fn build_config(
    bench: Benchmark,
    args: &RunArgs,
) -> Result<ForestConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ForestConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => {
            let dim = args.dim.or(bench.dimension()).unwrap_or(2);
            let (lo, hi) = bench.bounds();
            let width = hi - lo;
            ForestConfig::uniform_bounds(dim, lo, hi, width / 10.0, width / 1000.0)
        }
    };

    if args.dim.is_some() || args.lower.is_some() || args.upper.is_some() {
        let dim = args.dim.unwrap_or_else(|| config.dimension());
        let (default_lo, default_hi) = bench.bounds();
        let lo = args.lower.unwrap_or(default_lo);
        let hi = args.upper.unwrap_or(default_hi);
        config.lower = vec![lo; dim];
        config.upper = vec![hi; dim];
    }

    if let Some(v) = args.max_std {
        config.max_std = v;
    }
    if let Some(v) = args.min_std {
        config.min_std = v;
    }
    if let Some(v) = args.initial_trees {
        config.initial_trees = v;
    }
    if let Some(v) = args.max_trees {
        config.max_trees = v;
    }
    if let Some(v) = args.max_seeds {
        config.max_seeds = v;
    }
    if let Some(v) = args.min_seeds {
        config.min_seeds = v;
    }
    if let Some(v) = args.epsilon {
        config.epsilon = v;
    }
    if let Some(v) = args.epsilon_decay {
        config.epsilon_decay = v;
    }
    if let Some(v) = args.iterations {
        config.max_iterations = v;
    }
    if let Some(v) = args.mutation_probability {
        config.mutation_probability = v;
    }
    if let Some(v) = args.spread_exponent {
        config.spread_exponent = v;
    }
    if let Some(v) = &args.dispersal {
        config.dispersal = v.parse::<Dispersal>()?;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    config.validate()?;
    Ok(config)
}

fn cmd_list() {
    println!(
        "{:<12} {:<10} {:<20} {:>10}",
        "Function", "Landscape", "Bounds", "Optimum"
    );
    println!("{}", "-".repeat(55));
    for b in Benchmark::ALL {
        let landscape = if b.multimodal() { "multimodal" } else { "unimodal" };
        let (lo, hi) = b.bounds();
        let bounds = match b.dimension() {
            Some(d) => format!("[{lo}, {hi}]^{d}"),
            None => format!("[{lo}, {hi}]^D"),
        };
        println!(
            "{:<12} {:<10} {:<20} {:>10}",
            b.name(),
            landscape,
            bounds,
            b.optimum()
        );
    }
}
