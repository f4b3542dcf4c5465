//! AVX2 format conversion and deinterleaving

use super::super::utils::{split_complex_ps, LANES};
use crate::numeric::Cf32;
use std::arch::x86_64::*;

/// out = trunc(x · scale) as i16
///
/// Truncates to i32 and narrows with signed saturation, which agrees with the
/// scalar saturating cast whenever |x · scale| < 2^31.
#[target_feature(enable = "avx2")]
pub unsafe fn convert_f32_i16(x: &[f32], scale: f32, out: &mut [i16]) {
    let n = x.len().min(out.len());
    let chunks = n / LANES;
    let scale_vec = _mm256_set1_ps(scale);

    for i in 0..chunks {
        let offset = i * LANES;
        let scaled = _mm256_mul_ps(_mm256_loadu_ps(x.as_ptr().add(offset)), scale_vec);
        let truncated = _mm256_cvttps_epi32(scaled);
        let packed = _mm_packs_epi32(
            _mm256_castsi256_si128(truncated),
            _mm256_extracti128_si256(truncated, 1),
        );
        _mm_storeu_si128(out.as_mut_ptr().add(offset) as *mut __m128i, packed);
    }

    for i in chunks * LANES..n {
        out[i] = (x[i] * scale) as i16;
    }
}

/// Split eight complex samples per iteration into real and imaginary runs
#[target_feature(enable = "avx2")]
pub unsafe fn deinterleave_c32(x: &[Cf32], re: &mut [f32], im: &mut [f32]) {
    let n = x.len().min(re.len()).min(im.len());
    let chunks = n / LANES;
    let ptr = x.as_ptr() as *const f32;

    for i in 0..chunks {
        let offset = i * LANES;
        let lo = _mm256_loadu_ps(ptr.add(2 * offset));
        let hi = _mm256_loadu_ps(ptr.add(2 * offset + LANES));
        let (reals, imags) = split_complex_ps(lo, hi);
        _mm256_storeu_ps(re.as_mut_ptr().add(offset), reals);
        _mm256_storeu_ps(im.as_mut_ptr().add(offset), imags);
    }

    for i in chunks * LANES..n {
        re[i] = x[i].re;
        im[i] = x[i].im;
    }
}

/// Copy out the real parts, eight samples per iteration
#[target_feature(enable = "avx2")]
pub unsafe fn deinterleave_real_c32(x: &[Cf32], re: &mut [f32]) {
    let n = x.len().min(re.len());
    let chunks = n / LANES;
    let ptr = x.as_ptr() as *const f32;

    for i in 0..chunks {
        let offset = i * LANES;
        let lo = _mm256_loadu_ps(ptr.add(2 * offset));
        let hi = _mm256_loadu_ps(ptr.add(2 * offset + LANES));
        let (reals, _) = split_complex_ps(lo, hi);
        _mm256_storeu_ps(re.as_mut_ptr().add(offset), reals);
    }

    for i in chunks * LANES..n {
        re[i] = x[i].re;
    }
}
