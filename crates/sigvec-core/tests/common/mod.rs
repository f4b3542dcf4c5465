//! Shared utilities for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sigvec_core::Cf32;

/// Relative tolerance for reordered f32 accumulation
pub const TOLERANCE: f32 = 1e-4;

/// Generate array lengths that test edge cases for SIMD operations
pub fn edge_case_lengths() -> Vec<usize> {
    vec![
        0,   // Empty
        1,   // Single element
        2,   // Half a complex register
        3,   // Complex width - 1
        4,   // Complex width
        5,   // Complex width + 1
        7,   // Real width - 1
        8,   // Real width
        9,   // Real width + 1
        15,  // Multiple of no SIMD width
        16,  // Power of 2
        17,  // Power of 2 + 1
        31,  // Prime
        64,  // Cache line
        100, // Round number
        127, // Mersenne prime
        1024,
    ]
}

/// Seeded uniform samples in `[-scale, scale)`
pub fn real_data(len: usize, seed: u64, scale: f32) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(-scale..scale)).collect()
}

/// Seeded complex samples with both components in `[-scale, scale)`
pub fn complex_data(len: usize, seed: u64, scale: f32) -> Vec<Cf32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| Cf32::new(rng.gen_range(-scale..scale), rng.gen_range(-scale..scale)))
        .collect()
}

/// Seeded complex samples with magnitude at least `min_norm`
pub fn nonzero_complex_data(len: usize, seed: u64, min_norm: f32) -> Vec<Cf32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            let radius = rng.gen_range(min_norm..min_norm + 4.0);
            let angle = rng.gen_range(-std::f32::consts::PI..std::f32::consts::PI);
            Cf32::from_polar(radius, angle)
        })
        .collect()
}

/// Assert two real vectors are equal within tolerance
pub fn assert_vectors_close(actual: &[f32], expected: &[f32], op: &str, len: usize) {
    assert_eq!(actual.len(), expected.len(), "{op} length mismatch for len {len}");
    for (i, (&a, &e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            (a - e).abs() <= TOLERANCE * e.abs().max(1.0),
            "{op} differs at {i} for len {len}: {a} vs {e}"
        );
    }
}

/// Assert two complex vectors are equal within tolerance
pub fn assert_complex_close(actual: &[Cf32], expected: &[Cf32], op: &str, len: usize) {
    assert_eq!(actual.len(), expected.len(), "{op} length mismatch for len {len}");
    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            (a - e).norm() <= TOLERANCE * e.norm().max(1.0),
            "{op} differs at {i} for len {len}: {a} vs {e}"
        );
    }
}
