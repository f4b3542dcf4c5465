//! AVX2 reductions: sums, dot products and arg-max searches
//!
//! Sums accumulate one partial per lane and combine them at the end, so the
//! result differs from the left-to-right scalar sum by rounding only. The
//! arg-max searches find the maximum with vector compares and then locate its
//! first occurrence, which reproduces the scalar index exactly.

use super::super::utils::{
    complex_mul_conj_ps, complex_mul_ps, duplicate_pairs_ps, horizontal_max_ps,
    horizontal_sum_complex, horizontal_sum_ps, norm_sqr_packed_ps, COMPLEX_LANES, LANES,
};
use crate::numeric::{as_components, Cf32};
use std::arch::x86_64::*;

/// AVX2 implementation of sum for f32
#[target_feature(enable = "avx2")]
pub unsafe fn sum_f32(data: &[f32]) -> f32 {
    let n = data.len();
    let chunks = n / LANES;

    let mut sum_vec = _mm256_setzero_ps();

    // Main loop - process 8 elements at a time
    for i in 0..chunks {
        let data_vec = _mm256_loadu_ps(data.as_ptr().add(i * LANES));
        sum_vec = _mm256_add_ps(sum_vec, data_vec);
    }

    let mut sum = horizontal_sum_ps(sum_vec);

    // Handle remainder
    for &v in &data[chunks * LANES..] {
        sum += v;
    }

    sum
}

/// AVX2 implementation of dot product for f32
#[target_feature(enable = "avx2", enable = "fma")]
pub unsafe fn dot_f32(a: &[f32], b: &[f32]) -> f32 {
    let n = a.len().min(b.len());
    let chunks = n / LANES;

    let mut sum_vec = _mm256_setzero_ps();

    for i in 0..chunks {
        let offset = i * LANES;
        let a_vec = _mm256_loadu_ps(a.as_ptr().add(offset));
        let b_vec = _mm256_loadu_ps(b.as_ptr().add(offset));
        sum_vec = _mm256_fmadd_ps(a_vec, b_vec, sum_vec);
    }

    let mut sum = horizontal_sum_ps(sum_vec);

    for i in chunks * LANES..n {
        sum += a[i] * b[i];
    }

    sum
}

/// Σ|x|² over a complex sequence, via the dot product of its components
#[target_feature(enable = "avx2", enable = "fma")]
pub unsafe fn power_c32(x: &[Cf32]) -> f32 {
    let components = as_components(x);
    dot_f32(components, components)
}

/// AVX2 sum of a complex sequence
#[target_feature(enable = "avx2")]
pub unsafe fn sum_c32(data: &[Cf32]) -> Cf32 {
    // Complex addition is component-wise, so sum pairs of lanes
    let components = as_components(data);
    let chunks = components.len() / LANES;

    let mut sum_vec = _mm256_setzero_ps();
    for i in 0..chunks {
        sum_vec = _mm256_add_ps(sum_vec, _mm256_loadu_ps(components.as_ptr().add(i * LANES)));
    }

    let mut sum = horizontal_sum_complex(sum_vec);
    for &v in &data[chunks * COMPLEX_LANES..] {
        sum += v;
    }
    sum
}

macro_rules! complex_dot_kernel {
    ($(#[$doc:meta])* $name:ident, $simd:ident, |$a:ident, $b:ident| $tail:expr) => {
        $(#[$doc])*
        #[target_feature(enable = "avx2")]
        pub unsafe fn $name(x: &[Cf32], y: &[Cf32]) -> Cf32 {
            let n = x.len().min(y.len());
            let chunks = n / COMPLEX_LANES;
            let x_ptr = x.as_ptr() as *const f32;
            let y_ptr = y.as_ptr() as *const f32;

            let mut acc = _mm256_setzero_ps();
            for i in 0..chunks {
                let offset = i * LANES;
                let a_vec = _mm256_loadu_ps(x_ptr.add(offset));
                let b_vec = _mm256_loadu_ps(y_ptr.add(offset));
                acc = _mm256_add_ps(acc, $simd(a_vec, b_vec));
            }

            let mut sum = horizontal_sum_complex(acc);
            for i in chunks * COMPLEX_LANES..n {
                let $a = x[i];
                let $b = y[i];
                sum += $tail;
            }
            sum
        }
    };
}

complex_dot_kernel!(
    /// AVX2 Σ x·y over complex operands
    dot_c32, complex_mul_ps, |a, b| a * b
);
complex_dot_kernel!(
    /// AVX2 Σ x·conj(y) over complex operands
    dot_conj_c32, complex_mul_conj_ps, |a, b| a * b.conj()
);

/// AVX2 Σ x·y with a real second operand
#[target_feature(enable = "avx2")]
pub unsafe fn dot_c32_f32(x: &[Cf32], y: &[f32]) -> Cf32 {
    let n = x.len().min(y.len());
    let chunks = n / COMPLEX_LANES;
    let x_ptr = x.as_ptr() as *const f32;

    let mut acc = _mm256_setzero_ps();
    for i in 0..chunks {
        let a_vec = _mm256_loadu_ps(x_ptr.add(i * LANES));
        let b_vec = duplicate_pairs_ps(_mm_loadu_ps(y.as_ptr().add(i * COMPLEX_LANES)));
        acc = _mm256_add_ps(acc, _mm256_mul_ps(a_vec, b_vec));
    }

    let mut sum = horizontal_sum_complex(acc);
    for i in chunks * COMPLEX_LANES..n {
        sum += x[i] * y[i];
    }
    sum
}

/// Resolve the first index holding `best`, mirroring the scalar strict
/// comparison against `f32::MIN`
#[inline]
fn first_index_of(best: f32, mut values: impl Iterator<Item = f32>) -> usize {
    if !(best > f32::MIN) {
        return 0;
    }
    values.position(|v| v == best).unwrap_or(0)
}

/// AVX2 index of the first largest element; `data` must not be empty
#[target_feature(enable = "avx2")]
pub unsafe fn max_index_f32(data: &[f32]) -> usize {
    let chunks = data.len() / LANES;

    // Data goes first so that a NaN lane keeps the running maximum
    let mut max_vec = _mm256_set1_ps(f32::MIN);
    for i in 0..chunks {
        let v = _mm256_loadu_ps(data.as_ptr().add(i * LANES));
        max_vec = _mm256_max_ps(v, max_vec);
    }

    let mut best = horizontal_max_ps(max_vec);
    for &v in &data[chunks * LANES..] {
        if v > best {
            best = v;
        }
    }

    first_index_of(best, data.iter().copied())
}

/// AVX2 index of the first sample with the largest |x|²; `data` must not be
/// empty
#[target_feature(enable = "avx2")]
pub unsafe fn max_abs_index_c32(data: &[Cf32]) -> usize {
    let chunks = data.len() / LANES;
    let ptr = data.as_ptr() as *const f32;

    let mut max_vec = _mm256_set1_ps(f32::MIN);
    for i in 0..chunks {
        let offset = i * 2 * LANES;
        let norms = norm_sqr_packed_ps(
            _mm256_loadu_ps(ptr.add(offset)),
            _mm256_loadu_ps(ptr.add(offset + LANES)),
        );
        max_vec = _mm256_max_ps(norms, max_vec);
    }

    let mut best = horizontal_max_ps(max_vec);
    for v in &data[chunks * LANES..] {
        let power = v.re * v.re + v.im * v.im;
        if power > best {
            best = power;
        }
    }

    first_index_of(best, data.iter().map(|v| v.re * v.re + v.im * v.im))
}
