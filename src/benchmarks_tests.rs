use super::*;

#[test]
fn test_sphere_sums_squares() {
    assert!((sphere(&[1.0, -2.0, 3.0]) - 14.0).abs() < 1e-12);
    assert_eq!(sphere(&[]), 0.0);
}

#[test]
fn test_rosenbrock_valley_floor() {
    assert!(rosenbrock(&[1.0; 6]).abs() < 1e-12);
    // one pair: 100·(1 - 1)² + (1 + 1)² = 4
    assert!((rosenbrock(&[-1.0, 1.0]) - 4.0).abs() < 1e-12);
    assert_eq!(rosenbrock(&[3.0]), 0.0);
}

#[test]
fn test_rastrigin_lattice_values() {
    // cos(2π·k) = 1 at integers, leaving Σ k²
    assert!((rastrigin(&[1.0, -2.0]) - 5.0).abs() < 1e-9);
    assert!(rastrigin(&[0.5]) > rastrigin(&[1.0]));
}

#[test]
fn test_ackley_minimum_and_slope() {
    assert!(ackley(&[0.0; 4]).abs() < 1e-12);
    assert!(ackley(&[0.0; 0]).abs() < 1e-12);
    assert!(ackley(&[1.0, 1.0]) > 1.0);
}

#[test]
fn test_griewank_minimum() {
    assert!(griewank(&[0.0; 5]).abs() < 1e-12);
    assert!(griewank(&[10.0, -10.0]) > 0.0);
}

#[test]
fn test_schwefel_deep_corner() {
    let at_optimum = schwefel(&[420.9687; 3]);
    assert!(at_optimum.abs() < 1e-3, "f = {at_optimum}");
    assert!(schwefel(&[-302.5; 3]) > at_optimum);
}

#[test]
fn test_two_peaks_deep_basin_beats_wide_one() {
    let deep = two_peaks(&[0.5835, 0.1665]);
    assert!((deep - 0.4563).abs() < 1e-3);
    assert!((two_peaks(&[0.5, 0.5]) - 1.2).abs() < 1e-6);
    assert!(two_peaks(&[0.0, 1.0]) > 1.5);
}

#[test]
#[should_panic(expected = "index out of bounds")]
fn test_two_peaks_needs_two_components() {
    let _ = two_peaks(&[0.5]);
}

#[test]
fn test_registry_optimum_matches_function() {
    for b in Benchmark::ALL {
        let x = match b {
            Benchmark::Rosenbrock => vec![1.0; 3],
            Benchmark::Schwefel => vec![420.9687; 3],
            Benchmark::TwoPeaks => vec![0.5835, 0.1665],
            _ => vec![0.0; 3],
        };
        assert!(
            (b.evaluate(&x) - b.optimum()).abs() < 1e-3,
            "{b} optimum mismatch"
        );
    }
}

#[test]
fn test_registry_metadata() {
    for b in Benchmark::ALL {
        let (lo, hi) = b.bounds();
        assert!(lo < hi, "{b} bounds");
    }
    assert!(!Benchmark::Sphere.multimodal());
    assert!(Benchmark::Rastrigin.multimodal());
    assert_eq!(Benchmark::TwoPeaks.dimension(), Some(2));
    assert_eq!(Benchmark::Ackley.dimension(), None);
}

#[test]
fn test_parse_normalises_name() {
    assert_eq!("Rastrigin".parse::<Benchmark>().ok(), Some(Benchmark::Rastrigin));
    assert_eq!("two_peaks".parse::<Benchmark>().ok(), Some(Benchmark::TwoPeaks));
    assert_eq!(" sphere ".parse::<Benchmark>().ok(), Some(Benchmark::Sphere));
    for b in Benchmark::ALL {
        assert_eq!(b.to_string().parse::<Benchmark>().ok(), Some(b));
    }
}

#[test]
fn test_parse_unknown_name() {
    let err = "himmelblau".parse::<Benchmark>().expect_err("not registered");
    assert!(matches!(err, ForestError::InvalidArgument { ref param, .. } if param == "function"));
}
