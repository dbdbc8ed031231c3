//! The forest engine.
//!
//! ```text
//! initialise N trees uniformly, evaluate
//! repeat T times:
//!   1. reproduce  seeds linearly in fitness, within [min_seeds, max_seeds]
//!   2. disperse   each seed: local mutation (p = 1 - ε) or global sample (p = ε),
//!                 clamp, evaluate
//!   3. select     merge new seedlings, stable sort by fitness, keep max_trees
//!   4. decay      ε -= decay while ε > 0
//!   5. record     best / mean fitness
//! ```

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::{debug, info, trace};

use super::{
    ConvergenceHistory, Dispersal, ForestConfig, GenerationStats, Objective, Scored,
    SpreadSchedule, Tree,
};
use crate::error::{ForestError, Result};

/// Forest Evolution Algorithm optimizer.
///
/// # Example
///
/// ```
/// use forest_evolution::forest::{Forest, ForestConfig};
///
/// let objective = |x: &[f64]| (x[0] - 0.5).powi(2) + (x[1] - 0.5).powi(2);
/// let config = ForestConfig::uniform_bounds(2, 0.0, 1.0, 0.1, 0.001)
///     .with_max_iterations(50)
///     .with_seed(42);
///
/// let mut forest = Forest::new(config, objective).unwrap();
/// let history = forest.run().unwrap();
///
/// assert_eq!(history.len(), 50);
/// assert!(forest.best().fitness < 1e-2);
/// ```
pub struct Forest<O> {
    config: ForestConfig,
    schedule: SpreadSchedule,
    objective: O,
    trees: Vec<Scored>,
    seedlings: Vec<Scored>,
    epsilon: f64,
    iteration: usize,
    evaluations: usize,
    seed: u64,
    rng: StdRng,
}

impl<O: Objective> Forest<O> {
    /// Validate the configuration and grow the initial forest.
    ///
    /// # Errors
    ///
    /// Any error of [`ForestConfig::validate`], or the objective's own error
    /// while evaluating the initial trees.
    pub fn new(config: ForestConfig, objective: O) -> Result<Self> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = StdRng::seed_from_u64(seed);

        let mut trees = Vec::with_capacity(config.initial_trees.max(config.max_trees));
        for _ in 0..config.initial_trees {
            let tree = Tree::random(&config.lower, &config.upper, &mut rng);
            let fitness = objective
                .evaluate(&tree.vector)
                .map_err(ForestError::Objective)?;
            trees.push(Scored::new(fitness, tree));
        }

        debug!(
            seed,
            dimension = config.dimension(),
            trees = trees.len(),
            "forest initialised"
        );

        Ok(Self {
            schedule: SpreadSchedule::from_config(&config),
            epsilon: config.epsilon,
            evaluations: trees.len(),
            config,
            objective,
            trees,
            seedlings: Vec::new(),
            iteration: 1,
            seed,
            rng,
        })
    }

    /// Run `max_iterations` generations.
    ///
    /// # Errors
    ///
    /// The first objective failure aborts the run.
    pub fn run(&mut self) -> Result<ConvergenceHistory> {
        self.run_for(self.config.max_iterations)
    }

    /// Run exactly `generations` generations.
    ///
    /// # Errors
    ///
    /// The first objective failure aborts the run; the forest keeps the
    /// state of the last completed selection.
    pub fn run_for(&mut self, generations: usize) -> Result<ConvergenceHistory> {
        self.run_observed(generations, |_| {})
    }

    /// Run `generations` generations, calling `observe` after each one.
    ///
    /// # Errors
    ///
    /// The first objective failure aborts the run.
    pub fn run_observed<F>(
        &mut self,
        generations: usize,
        mut observe: F,
    ) -> Result<ConvergenceHistory>
    where
        F: FnMut(&GenerationStats),
    {
        info!(
            seed = self.seed,
            generations,
            from_iteration = self.iteration,
            "forest run started"
        );

        let mut history = ConvergenceHistory::with_capacity(generations);
        for _ in 0..generations {
            let stats = self.step()?;
            observe(&stats);
            history.push(stats.best, stats.mean);
        }

        info!(
            best = self.best().fitness,
            iteration = self.iteration,
            evaluations = self.evaluations,
            "forest run finished"
        );
        Ok(history)
    }

    /// Execute one generation: reproduce, disperse, select, decay, record.
    ///
    /// # Errors
    ///
    /// The objective's error, if any seedling evaluation fails.
    pub fn step(&mut self) -> Result<GenerationStats> {
        let spread = self.current_spread();

        self.reproduce();
        self.disperse()?;
        self.select();
        self.decay();

        let stats = GenerationStats {
            iteration: self.iteration,
            best: self.trees[0].fitness,
            mean: self.mean_fitness(),
            epsilon: self.epsilon,
            spread,
            population: self.trees.len(),
            seedlings: self.seedlings.len(),
        };
        debug!(
            iteration = stats.iteration,
            best = stats.best,
            mean = stats.mean,
            epsilon = stats.epsilon,
            spread = stats.spread,
            population = stats.population,
            seedlings = stats.seedlings,
            "generation complete"
        );

        self.iteration += 1;
        Ok(stats)
    }

    /// Assign every tree its seed count.
    ///
    /// Consumes no randomness.
    pub(crate) fn reproduce(&mut self) {
        let (min_fitness, max_fitness) = fitness_range(&self.trees);
        let (min_seeds, max_seeds) = (self.config.min_seeds, self.config.max_seeds);

        for scored in &mut self.trees {
            scored.tree.seeds =
                seed_count(scored.fitness, min_fitness, max_fitness, min_seeds, max_seeds);
        }
        trace!(min_fitness, max_fitness, "seed counts assigned");
    }

    /// Grow and evaluate the seedlings of every tree.
    ///
    /// Draw order per seedling: one exploration coin, then for local seeding
    /// one mutation coin per dimension (followed by a noise draw when the
    /// dimension mutates), or for global seeding one uniform draw per dimension.
    pub(crate) fn disperse(&mut self) -> Result<()> {
        self.seedlings.clear();
        let noise = Noise::new(self.config.dispersal, self.current_spread())?;

        for parent in &mut self.trees {
            for _ in 0..parent.tree.seeds {
                let mut seedling = grow_seedling(
                    &parent.tree,
                    &self.config,
                    self.epsilon,
                    &noise,
                    &mut self.rng,
                );
                seedling.clamp(&self.config.lower, &self.config.upper);

                let fitness = self
                    .objective
                    .evaluate(&seedling.vector)
                    .map_err(ForestError::Objective)?;
                self.evaluations += 1;
                self.seedlings.push(Scored::new(fitness, seedling));
            }
            parent.tree.age += 1;
        }
        trace!(seedlings = self.seedlings.len(), "seeds dispersed");
        Ok(())
    }

    /// Merge new seedlings into the forest and keep the fittest `max_trees`.
    pub(crate) fn select(&mut self) {
        let mut occupied: HashSet<Vec<u64>> =
            self.trees.iter().map(|s| s.tree.key()).collect();
        let before = self.trees.len();

        for seedling in &self.seedlings {
            if occupied.insert(seedling.tree.key()) {
                self.trees.push(seedling.clone());
            }
        }
        let merged = self.trees.len();

        self.trees.sort_by(|a, b| by_fitness(a.fitness, b.fitness));
        self.trees.truncate(self.config.max_trees);
        trace!(
            accepted = merged - before,
            discarded = merged - self.trees.len(),
            "selection done"
        );
    }

    /// Lower the exploration probability.
    pub(crate) fn decay(&mut self) {
        if self.epsilon > 0.0 {
            self.epsilon -= self.config.epsilon_decay;
        }
    }
}

impl<O> Forest<O> {
    /// The best tree so far.
    ///
    /// Equal to `trees()[0]` after any selection.
    #[must_use]
    pub fn best(&self) -> &Scored {
        let idx = self
            .trees
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| by_fitness(a.fitness, b.fitness))
            .map_or(0, |(i, _)| i);
        &self.trees[idx]
    }

    /// Current forest, sorted by fitness after every selection.
    #[must_use]
    pub fn trees(&self) -> &[Scored] {
        &self.trees
    }

    /// Seedlings of the most recent dispersal.
    #[must_use]
    pub fn seedlings(&self) -> &[Scored] {
        &self.seedlings
    }

    /// Current exploration probability.
    #[must_use]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// Next iteration to run (starts at 1).
    #[must_use]
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Successful objective evaluations so far.
    #[must_use]
    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Seed of the random generator.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Configuration of this run.
    #[must_use]
    pub fn config(&self) -> &ForestConfig {
        &self.config
    }

    /// Problem dimension.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.config.dimension()
    }

    /// Spread used by the next dispersal.
    #[must_use]
    pub fn current_spread(&self) -> f64 {
        self.schedule.spread(self.iteration)
    }

    /// Mean fitness of the current forest.
    #[must_use]
    pub fn mean_fitness(&self) -> f64 {
        self.trees.iter().map(|s| s.fitness).sum::<f64>() / self.trees.len() as f64
    }
}

impl<O> fmt::Debug for Forest<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Forest")
            .field("config", &self.config)
            .field("trees", &self.trees.len())
            .field("seedlings", &self.seedlings.len())
            .field("epsilon", &self.epsilon)
            .field("iteration", &self.iteration)
            .field("evaluations", &self.evaluations)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}

/// Noise source for local seeding.
#[derive(Debug, Clone, Copy)]
enum Noise {
    Normal(Normal<f64>),
    Uniform,
}

impl Noise {
    fn new(dispersal: Dispersal, spread: f64) -> Result<Self> {
        match dispersal {
            Dispersal::Normal => Normal::new(0.0, spread).map(Self::Normal).map_err(|_| {
                ForestError::invalid_argument("spread", spread, "finite and >= 0")
            }),
            Dispersal::Uniform => Ok(Self::Uniform),
        }
    }

    fn sample(&self, rng: &mut StdRng) -> f64 {
        match self {
            Self::Normal(normal) => normal.sample(rng),
            Self::Uniform => rng.gen_range(-1.0..1.0),
        }
    }
}

/// One seedling of `parent`: a mutated copy, or a fresh random tree.
fn grow_seedling(
    parent: &Tree,
    config: &ForestConfig,
    epsilon: f64,
    noise: &Noise,
    rng: &mut StdRng,
) -> Tree {
    if rng.gen::<f64>() > epsilon {
        let mut seedling = Tree::new(parent.vector.clone());
        for v in &mut seedling.vector {
            if rng.gen::<f64>() < config.mutation_probability {
                *v += noise.sample(rng);
            }
        }
        seedling
    } else {
        Tree::random(&config.lower, &config.upper, rng)
    }
}

/// Seed count of a tree with `fitness`, mapped linearly and inverted so the
/// best tree gets `max_seeds` and the worst gets `min_seeds`.
///
/// A degenerate fitness range (all equal, or non-finite) gives `min_seeds`.
/// Rounds half to even.
#[must_use]
pub fn seed_count(
    fitness: f64,
    min_fitness: f64,
    max_fitness: f64,
    min_seeds: usize,
    max_seeds: usize,
) -> usize {
    let range = max_fitness - min_fitness;
    if !(range.is_finite() && range > 0.0) {
        return min_seeds;
    }
    let share = (max_fitness - fitness) / range;
    let seeds = share * (max_seeds - min_seeds) as f64 + min_seeds as f64;
    if seeds.is_nan() {
        return min_seeds;
    }
    (seeds.round_ties_even() as usize).clamp(min_seeds, max_seeds)
}

fn fitness_range(trees: &[Scored]) -> (f64, f64) {
    trees
        .iter()
        .map(|s| s.fitness)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), f| {
            (lo.min(f), hi.max(f))
        })
}

/// Ascending fitness order with NaN after every number.
fn by_fitness(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}
