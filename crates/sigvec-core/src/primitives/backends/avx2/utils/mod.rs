//! Shared utilities for AVX2 implementations
//!
//! This module contains lane shuffles and reductions used across the AVX2
//! kernels. A `__m256` holding complex data carries four samples laid out as
//! `[re0, im0, re1, im1 | re2, im2, re3, im3]`.

use crate::numeric::Cf32;
use std::arch::x86_64::*;

/// Number of `f32` lanes in a `__m256`
pub const LANES: usize = 8;

/// Number of complex samples in a `__m256`
pub const COMPLEX_LANES: usize = 4;

/// Swap the real and imaginary halves of every complex lane
const SWAP_PAIRS: i32 = 0b10_11_00_01;

/// Reorders 64-bit blocks `[0, 2, 1, 3]`, undoing the in-lane split of
/// `hadd`/`shuffle` across two 128-bit halves
const INTERLEAVE_HALVES: i32 = 0b11_01_10_00;

/// Select the even (real) lanes of two complex registers, per 128-bit half
const EVEN_LANES: i32 = 0b10_00_10_00;

/// Select the odd (imaginary) lanes of two complex registers, per 128-bit half
const ODD_LANES: i32 = 0b11_01_11_01;

/// Horizontal sum of a __m256 (8 f32s)
#[inline]
#[target_feature(enable = "avx2")]
pub unsafe fn horizontal_sum_ps(v: __m256) -> f32 {
    // Extract high and low 128-bit lanes
    let high = _mm256_extractf128_ps(v, 1);
    let low = _mm256_castps256_ps128(v);

    let sum128 = _mm_add_ps(high, low);

    // Horizontal add within 128-bit lane (two steps)
    let shuf = _mm_shuffle_ps(sum128, sum128, 0b00_11_00_01);
    let sums = _mm_add_ps(sum128, shuf);
    let shuf = _mm_shuffle_ps(sums, sums, 0b00_00_00_10);
    let result = _mm_add_ps(sums, shuf);

    _mm_cvtss_f32(result)
}

/// Sum the four complex lanes of a __m256 into one sample
#[inline]
#[target_feature(enable = "avx2")]
pub unsafe fn horizontal_sum_complex(v: __m256) -> Cf32 {
    let high = _mm256_extractf128_ps(v, 1);
    let low = _mm256_castps256_ps128(v);

    // [re0+re2, im0+im2, re1+re3, im1+im3]
    let sum128 = _mm_add_ps(low, high);
    let upper = _mm_movehl_ps(sum128, sum128);
    let result = _mm_add_ps(sum128, upper);

    let mut out = [0.0f32; 4];
    _mm_storeu_ps(out.as_mut_ptr(), result);
    Cf32::new(out[0], out[1])
}

/// Horizontal maximum of a __m256 holding no NaN lanes
#[inline]
#[target_feature(enable = "avx2")]
pub unsafe fn horizontal_max_ps(v: __m256) -> f32 {
    let high = _mm256_extractf128_ps(v, 1);
    let low = _mm256_castps256_ps128(v);

    let max128 = _mm_max_ps(low, high);
    let max64 = _mm_max_ps(max128, _mm_movehl_ps(max128, max128));
    let max32 = _mm_max_ss(max64, _mm_shuffle_ps(max64, max64, 0b00_00_00_01));

    _mm_cvtss_f32(max32)
}

/// Flip the sign of every lane
#[inline]
#[target_feature(enable = "avx2")]
pub unsafe fn negate_ps(v: __m256) -> __m256 {
    _mm256_xor_ps(v, _mm256_set1_ps(-0.0))
}

/// Negate the imaginary lane of every complex sample
#[inline]
#[target_feature(enable = "avx2")]
pub unsafe fn conj_ps(v: __m256) -> __m256 {
    let mask = _mm256_setr_ps(0.0, -0.0, 0.0, -0.0, 0.0, -0.0, 0.0, -0.0);
    _mm256_xor_ps(v, mask)
}

/// Complex product of four sample pairs
///
/// Evaluates `re = ar*br - ai*bi`, `im = ai*br + ar*bi` lane by lane, the same
/// operations the scalar path performs.
#[inline]
#[target_feature(enable = "avx2")]
pub unsafe fn complex_mul_ps(a: __m256, b: __m256) -> __m256 {
    let b_re = _mm256_moveldup_ps(b);
    let b_im = _mm256_movehdup_ps(b);
    let a_swapped = _mm256_permute_ps(a, SWAP_PAIRS);
    _mm256_addsub_ps(_mm256_mul_ps(a, b_re), _mm256_mul_ps(a_swapped, b_im))
}

/// Complex product `a * conj(b)` of four sample pairs
#[inline]
#[target_feature(enable = "avx2")]
pub unsafe fn complex_mul_conj_ps(a: __m256, b: __m256) -> __m256 {
    let b_re = _mm256_moveldup_ps(b);
    let b_im = _mm256_movehdup_ps(b);
    let a_swapped = _mm256_permute_ps(a, SWAP_PAIRS);
    _mm256_addsub_ps(
        _mm256_mul_ps(a, b_re),
        negate_ps(_mm256_mul_ps(a_swapped, b_im)),
    )
}

/// |v|² of four complex samples, duplicated into both lanes of each pair
#[inline]
#[target_feature(enable = "avx2")]
pub unsafe fn norm_sqr_pairs_ps(v: __m256) -> __m256 {
    let squares = _mm256_mul_ps(v, v);
    _mm256_add_ps(squares, _mm256_permute_ps(squares, SWAP_PAIRS))
}

/// |v|² of eight complex samples held in two registers, packed in order
#[inline]
#[target_feature(enable = "avx2")]
pub unsafe fn norm_sqr_packed_ps(lo: __m256, hi: __m256) -> __m256 {
    let sums = _mm256_hadd_ps(_mm256_mul_ps(lo, lo), _mm256_mul_ps(hi, hi));
    restore_order_ps(sums)
}

/// Put the blocks produced by a two-register in-lane shuffle back in order
#[inline]
#[target_feature(enable = "avx2")]
pub unsafe fn restore_order_ps(v: __m256) -> __m256 {
    _mm256_castpd_ps(_mm256_permute4x64_pd(
        _mm256_castps_pd(v),
        INTERLEAVE_HALVES,
    ))
}

/// Split eight complex samples held in two registers into packed real and
/// imaginary parts
#[inline]
#[target_feature(enable = "avx2")]
pub unsafe fn split_complex_ps(lo: __m256, hi: __m256) -> (__m256, __m256) {
    (
        restore_order_ps(_mm256_shuffle_ps(lo, hi, EVEN_LANES)),
        restore_order_ps(_mm256_shuffle_ps(lo, hi, ODD_LANES)),
    )
}

/// |v| of eight complex samples held in two registers, packed in order
///
/// Scales by the larger component before squaring, so finite inputs neither
/// overflow nor flush to zero where `hypot` would not.
#[inline]
#[target_feature(enable = "avx2")]
pub unsafe fn hypot_packed_ps(lo: __m256, hi: __m256) -> __m256 {
    let (re, im) = split_complex_ps(lo, hi);
    let sign = _mm256_set1_ps(-0.0);
    let re = _mm256_andnot_ps(sign, re);
    let im = _mm256_andnot_ps(sign, im);

    let large = _mm256_max_ps(re, im);
    let small = _mm256_min_ps(re, im);
    let ratio = _mm256_div_ps(small, large);
    let scaled = _mm256_mul_ps(
        large,
        _mm256_sqrt_ps(_mm256_add_ps(_mm256_mul_ps(ratio, ratio), _mm256_set1_ps(1.0))),
    );

    // 0/0 and inf/inf lanes produce NaN; both reduce to `large`
    let zero = _mm256_cmp_ps(large, _mm256_setzero_ps(), _CMP_EQ_OQ);
    let infinite = _mm256_cmp_ps(large, _mm256_set1_ps(f32::INFINITY), _CMP_EQ_OQ);
    _mm256_blendv_ps(scaled, large, _mm256_or_ps(zero, infinite))
}

/// Duplicate four reals into `[y0, y0, y1, y1, y2, y2, y3, y3]`
#[inline]
#[target_feature(enable = "avx2")]
pub unsafe fn duplicate_pairs_ps(y: __m128) -> __m256 {
    _mm256_set_m128(_mm_unpackhi_ps(y, y), _mm_unpacklo_ps(y, y))
}

/// Broadcast one complex sample into all four complex lanes
#[inline]
#[target_feature(enable = "avx2")]
pub unsafe fn splat_complex_ps(h: Cf32) -> __m256 {
    _mm256_setr_ps(h.re, h.im, h.re, h.im, h.re, h.im, h.re, h.im)
}
