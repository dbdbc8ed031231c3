//! Integration and property tests for the forest.

use super::*;
use crate::error::ForestError;

/// Squared distance to the centre of the unit square.
fn centre(x: &[f64]) -> f64 {
    x.iter().map(|xi| (xi - 0.5).powi(2)).sum()
}

fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|xi| xi * xi).sum()
}

fn rastrigin(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    10.0 * n
        + x.iter()
            .map(|xi| xi * xi - 10.0 * (2.0 * std::f64::consts::PI * xi).cos())
            .sum::<f64>()
}

fn unit_square() -> ForestConfig {
    ForestConfig::uniform_bounds(2, 0.0, 1.0, 0.1, 0.001)
        .with_max_iterations(50)
        .with_seed(42)
}

fn is_sorted(trees: &[Scored]) -> bool {
    trees.windows(2).all(|w| w[0].fitness <= w[1].fitness)
}

#[test]
fn test_forest_finds_centre_of_unit_square() {
    let mut forest = Forest::new(unit_square(), centre).expect("valid config");
    let history = forest.run().expect("infallible objective");

    assert_eq!(history.len(), 50);
    let best = forest.best();
    assert!(best.fitness < 1e-3, "best = {}", best.fitness);
    assert!((best.vector()[0] - 0.5).abs() < 0.05);
    assert!((best.vector()[1] - 0.5).abs() < 0.05);
}

#[test]
fn test_forest_minimizes_sphere() {
    let config = ForestConfig::uniform_bounds(5, -5.0, 5.0, 1.0, 0.01)
        .with_max_trees(30)
        .with_max_iterations(100)
        .with_seed(7);
    let mut forest = Forest::new(config, sphere).expect("valid config");
    forest.run().expect("infallible objective");
    assert!(forest.best().fitness < 1e-2, "best = {}", forest.best().fitness);
}

#[test]
fn test_forest_escapes_rastrigin_local_minima() {
    let config = ForestConfig::uniform_bounds(5, -5.12, 5.12, 1.0, 0.05)
        .with_initial_trees(10)
        .with_max_trees(30)
        .with_seeds(2, 20)
        .with_max_iterations(100)
        .with_seed(7);
    let mut forest = Forest::new(config, rastrigin).expect("valid config");
    forest.run().expect("infallible objective");
    assert!(forest.best().fitness < 0.1, "best = {}", forest.best().fitness);
}

#[test]
fn test_same_seed_same_run() {
    let run = || {
        let mut forest = Forest::new(unit_square().with_max_iterations(15), centre)
            .expect("valid config");
        let history = forest.run().expect("infallible objective");
        (history, forest.trees().to_vec())
    };
    let (h1, t1) = run();
    let (h2, t2) = run();
    assert_eq!(h1, h2);
    assert_eq!(t1.len(), t2.len());
    for (a, b) in t1.iter().zip(&t2) {
        assert_eq!(a.tree.vector, b.tree.vector);
        assert_eq!(a.fitness.to_bits(), b.fitness.to_bits());
    }
}

#[test]
fn test_different_seeds_differ() {
    let mut a = Forest::new(unit_square().with_seed(1), centre).expect("valid");
    let mut b = Forest::new(unit_square().with_seed(2), centre).expect("valid");
    let ha = a.run_for(3).expect("infallible");
    let hb = b.run_for(3).expect("infallible");
    assert_ne!(ha, hb);
}

#[test]
fn test_run_for_continues_where_it_stopped() {
    let mut whole = Forest::new(unit_square(), centre).expect("valid");
    let full = whole.run_for(20).expect("infallible");

    let mut split = Forest::new(unit_square(), centre).expect("valid");
    let mut joined = split.run_for(8).expect("infallible");
    joined.append(&split.run_for(12).expect("infallible"));

    assert_eq!(split.iteration(), 21);
    assert_eq!(full, joined);
}

#[test]
fn test_run_observed_reports_every_generation() {
    let mut forest = Forest::new(unit_square(), centre).expect("valid");
    let mut seen = Vec::new();
    let history = forest
        .run_observed(6, |stats| seen.push((stats.iteration, stats.best)))
        .expect("infallible");

    let iterations: Vec<usize> = seen.iter().map(|&(i, _)| i).collect();
    assert_eq!(iterations, vec![1, 2, 3, 4, 5, 6]);
    let bests: Vec<f64> = seen.iter().map(|&(_, b)| b).collect();
    assert_eq!(bests, history.best);
}

#[test]
fn test_step_reports_schedule_spread() {
    let config = unit_square().with_max_iterations(4);
    let schedule = SpreadSchedule::from_config(&config);
    let mut forest = Forest::new(config, centre).expect("valid");
    for i in 1..=4 {
        let stats = forest.step().expect("infallible");
        assert_eq!(stats.iteration, i);
        assert!((stats.spread - schedule.spread(i)).abs() < 1e-15);
    }
}

#[test]
fn test_best_never_worsens() {
    let mut forest = Forest::new(unit_square(), centre).expect("valid");
    let history = forest.run().expect("infallible");
    assert!(history.best.windows(2).all(|w| w[1] <= w[0]));
    for (best, mean) in history.iter() {
        assert!(best <= mean);
    }
}

#[test]
fn test_population_capped_below_initial() {
    let config = unit_square().with_initial_trees(12).with_max_trees(4);
    let mut forest = Forest::new(config, centre).expect("valid");
    assert_eq!(forest.trees().len(), 12);
    let stats = forest.step().expect("infallible");
    assert_eq!(stats.population, 4);
    assert_eq!(forest.trees().len(), 4);
}

#[test]
fn test_epsilon_decays_to_zero_and_stops() {
    let config = unit_square().with_epsilon(0.3, 0.1).with_max_iterations(10);
    let mut forest = Forest::new(config, centre).expect("valid");
    forest.run().expect("infallible");
    // stops at the first value <= 0, never a full step below it
    assert!(forest.epsilon() <= 1e-9);
    assert!(forest.epsilon() > -0.1 - 1e-9);
}

#[test]
fn test_uniform_dispersal_stays_in_bounds() {
    let config = unit_square()
        .with_dispersal(Dispersal::Uniform)
        .with_max_iterations(10);
    let mut forest = Forest::new(config, centre).expect("valid");
    forest.run().expect("infallible");
    for s in forest.trees().iter().chain(forest.seedlings()) {
        assert!(s.tree.within(&[0.0, 0.0], &[1.0, 1.0]));
    }
}

#[test]
fn test_json_config_reproduces_run() {
    let config = unit_square().with_max_iterations(10);
    let restored = ForestConfig::from_json(&config.to_json().expect("serializes"))
        .expect("deserializes");

    let mut a = Forest::new(config, centre).expect("valid");
    let mut b = Forest::new(restored, centre).expect("valid");
    assert_eq!(a.run().expect("infallible"), b.run().expect("infallible"));
}

#[test]
fn test_mismatched_bounds_rejected() {
    let config = ForestConfig::new(vec![0.0; 3], vec![1.0; 2], 0.1, 0.001);
    let err = Forest::new(config, centre).expect_err("dimension mismatch");
    assert!(matches!(err, ForestError::DimensionMismatch { .. }));
}

#[test]
fn test_non_positive_spread_exponent_rejected_up_front() {
    for exponent in [0, -2] {
        let calls = std::cell::Cell::new(0usize);
        let objective = |x: &[f64]| -> f64 {
            calls.set(calls.get() + 1);
            centre(x)
        };
        let config = unit_square()
            .with_max_iterations(5)
            .with_spread_exponent(exponent);
        let err = Forest::new(config, objective).expect_err("exponent below 1");
        assert!(
            matches!(err, ForestError::InvalidArgument { ref param, .. } if param == "spread_exponent")
        );
        assert_eq!(calls.get(), 0);
    }
}

#[test]
fn test_last_generation_uses_min_std() {
    let mut forest = Forest::new(unit_square().with_max_iterations(5), centre).expect("valid");
    let history = forest.run_observed(5, |stats| {
        if stats.iteration == 5 {
            assert!((stats.spread - 0.001).abs() < 1e-15);
        }
    });
    assert_eq!(history.expect("infallible").len(), 5);
}

#[test]
fn test_unknown_dispersal_rejected() {
    let err = "cauchy".parse::<Dispersal>().expect_err("unknown mode");
    assert!(matches!(err, ForestError::InvalidArgument { .. }));

    let json = r#"{"lower":[0.0],"upper":[1.0],"max_std":0.1,"min_std":0.01,"dispersal":"cauchy"}"#;
    assert!(ForestConfig::from_json(json).is_err());
}

#[test]
fn test_objective_failure_surfaces() {
    let calls = std::cell::Cell::new(0usize);
    let objective = fallible(|x: &[f64]| {
        calls.set(calls.get() + 1);
        if calls.get() > 40 {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "solver diverged"))
        } else {
            Ok(centre(x))
        }
    });
    let mut forest = Forest::new(unit_square(), objective).expect("initial trees evaluate");
    let err = forest.run().expect_err("objective fails mid-run");
    assert!(err.is_objective_failure());
    assert!(err.to_string().contains("solver diverged"));
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(30))]

        /// Property: every generation keeps the forest bounded, sorted and non-empty
        #[test]
        fn prop_generation_invariants(
            dim in 1..=4usize,
            seed in 0..500u64,
            initial in 1..15usize,
            max_trees in 1..20usize,
            epsilon in 0.0..1.0f64,
            decay in 0.0..0.05f64,
        ) {
            let config = ForestConfig::uniform_bounds(dim, -2.0, 3.0, 0.5, 0.01)
                .with_initial_trees(initial)
                .with_max_trees(max_trees)
                .with_seeds(1, 6)
                .with_epsilon(epsilon, decay)
                .with_max_iterations(8)
                .with_seed(seed);
            let lower = config.lower.clone();
            let upper = config.upper.clone();
            let mut forest = Forest::new(config, sphere).expect("valid config");

            let mut last_best = forest.best().fitness;
            let mut last_epsilon = forest.epsilon();
            for _ in 0..8 {
                let stats = forest.step().expect("infallible objective");
                prop_assert!(!forest.trees().is_empty());
                prop_assert!(forest.trees().len() <= max_trees);
                prop_assert!(is_sorted(forest.trees()));
                prop_assert!(forest.trees().iter().all(|s| s.tree.within(&lower, &upper)));
                prop_assert!(forest.seedlings().iter().all(|s| s.tree.within(&lower, &upper)));
                prop_assert!(stats.best <= last_best);
                prop_assert!(forest.epsilon() <= last_epsilon);
                prop_assert_eq!(forest.best().fitness.to_bits(), forest.trees()[0].fitness.to_bits());
                last_best = stats.best;
                last_epsilon = forest.epsilon();
            }
        }

        /// Property: no two trees share a position
        #[test]
        fn prop_no_duplicate_trees(seed in 0..500u64, mutation in 0.0..0.3f64) {
            let config = unit_square()
                .with_mutation_probability(mutation)
                .with_seed(seed);
            let mut forest = Forest::new(config, centre).expect("valid config");
            forest.run_for(5).expect("infallible objective");

            let keys: std::collections::HashSet<Vec<u64>> =
                forest.trees().iter().map(|s| s.tree.key()).collect();
            prop_assert_eq!(keys.len(), forest.trees().len());
        }
    }
}
