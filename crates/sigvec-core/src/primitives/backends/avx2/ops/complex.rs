//! AVX2 element-wise kernels on complex `f32` sequences
//!
//! Four complex samples are processed per iteration; the tail falls back to
//! `num_complex` arithmetic with the same operation order.

use super::super::utils::{
    complex_mul_conj_ps, complex_mul_ps, conj_ps, duplicate_pairs_ps, hypot_packed_ps,
    norm_sqr_packed_ps, norm_sqr_pairs_ps, splat_complex_ps, COMPLEX_LANES, LANES,
};
use crate::numeric::Cf32;
use std::arch::x86_64::*;

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn load(p: *const Cf32, offset: usize) -> __m256 {
    _mm256_loadu_ps(p.add(offset) as *const f32)
}

#[inline]
#[target_feature(enable = "avx2")]
unsafe fn store(p: *mut Cf32, offset: usize, v: __m256) {
    _mm256_storeu_ps(p.add(offset) as *mut f32, v)
}

macro_rules! complex_binary_kernel {
    ($(#[$doc:meta])* $name:ident, $simd:ident, |$a:ident, $b:ident| $tail:expr) => {
        $(#[$doc])*
        ///
        /// # Safety
        /// All pointers must be valid for `len` samples; `z` may equal `x` but
        /// must not otherwise overlap the inputs. AVX2 must be available.
        #[target_feature(enable = "avx2")]
        pub unsafe fn $name(x: *const Cf32, y: *const Cf32, z: *mut Cf32, len: usize) {
            let chunks = len / COMPLEX_LANES;

            for i in 0..chunks {
                let offset = i * COMPLEX_LANES;
                store(z, offset, $simd(load(x, offset), load(y, offset)));
            }

            for i in chunks * COMPLEX_LANES..len {
                let $a = *x.add(i);
                let $b = *y.add(i);
                *z.add(i) = $tail;
            }
        }
    };
}

complex_binary_kernel!(
    /// z = x · y
    mul_c32, complex_mul_ps, |a, b| a * b
);
complex_binary_kernel!(
    /// z = x · conj(y)
    mul_conj_c32, complex_mul_conj_ps, |a, b| a * b.conj()
);

/// z = x · conj(y) / |y|²
///
/// # Safety
/// See [`mul_c32`].
#[target_feature(enable = "avx2")]
pub unsafe fn div_c32(x: *const Cf32, y: *const Cf32, z: *mut Cf32, len: usize) {
    let chunks = len / COMPLEX_LANES;

    for i in 0..chunks {
        let offset = i * COMPLEX_LANES;
        let b = load(y, offset);
        let numerator = complex_mul_conj_ps(load(x, offset), b);
        store(z, offset, _mm256_div_ps(numerator, norm_sqr_pairs_ps(b)));
    }

    for i in chunks * COMPLEX_LANES..len {
        let b = *y.add(i);
        *z.add(i) = (*x.add(i) * b.conj()) / b.norm_sqr();
    }
}

/// z = x · y with a real second operand
///
/// # Safety
/// `x`, `z` valid for `len` samples (may be equal), `y` valid for `len` reals.
/// AVX2 must be available.
#[target_feature(enable = "avx2")]
pub unsafe fn mul_c32_f32(x: *const Cf32, y: *const f32, z: *mut Cf32, len: usize) {
    let chunks = len / COMPLEX_LANES;

    for i in 0..chunks {
        let offset = i * COMPLEX_LANES;
        let scale = duplicate_pairs_ps(_mm_loadu_ps(y.add(offset)));
        store(z, offset, _mm256_mul_ps(load(x, offset), scale));
    }

    for i in chunks * COMPLEX_LANES..len {
        *z.add(i) = *x.add(i) * *y.add(i);
    }
}

/// z = x · h for a complex scalar
///
/// # Safety
/// `x` and `z` valid for `len` samples and may be equal. AVX2 must be available.
#[target_feature(enable = "avx2")]
pub unsafe fn scale_c32(x: *const Cf32, h: Cf32, z: *mut Cf32, len: usize) {
    let chunks = len / COMPLEX_LANES;
    let h_vec = splat_complex_ps(h);

    for i in 0..chunks {
        let offset = i * COMPLEX_LANES;
        store(z, offset, complex_mul_ps(load(x, offset), h_vec));
    }

    for i in chunks * COMPLEX_LANES..len {
        *z.add(i) = *x.add(i) * h;
    }
}

/// z = conj(x)
///
/// # Safety
/// `x` and `z` valid for `len` samples and may be equal. AVX2 must be available.
#[target_feature(enable = "avx2")]
pub unsafe fn conj_c32(x: *const Cf32, z: *mut Cf32, len: usize) {
    let chunks = len / COMPLEX_LANES;

    for i in 0..chunks {
        let offset = i * COMPLEX_LANES;
        store(z, offset, conj_ps(load(x, offset)));
    }

    for i in chunks * COMPLEX_LANES..len {
        *z.add(i) = (*x.add(i)).conj();
    }
}

/// out = |x|² (or |x| when `sqrt` is set)
///
/// The magnitude is computed without forming |x|², matching `hypot` on the
/// scalar path over the whole finite range.
///
/// # Safety
/// `x` valid for `len` samples, `out` valid for `len` reals. AVX2 must be
/// available.
#[target_feature(enable = "avx2")]
pub unsafe fn magnitude_c32(x: *const Cf32, out: *mut f32, len: usize, sqrt: bool) {
    // Eight samples per iteration so the packed norms fill one register
    let chunks = len / LANES;

    for i in 0..chunks {
        let offset = i * LANES;
        let lo = load(x, offset);
        let hi = load(x, offset + COMPLEX_LANES);
        let result = if sqrt {
            hypot_packed_ps(lo, hi)
        } else {
            norm_sqr_packed_ps(lo, hi)
        };
        _mm256_storeu_ps(out.add(offset), result);
    }

    for i in chunks * LANES..len {
        let v = *x.add(i);
        *out.add(i) = if sqrt {
            v.norm()
        } else {
            v.re * v.re + v.im * v.im
        };
    }
}

/// out = |symbol - points|²
///
/// # Safety
/// `points` valid for `len` samples, `out` valid for `len` reals. AVX2 must be
/// available.
#[target_feature(enable = "avx2")]
pub unsafe fn square_dist_c32(symbol: Cf32, points: *const Cf32, out: *mut f32, len: usize) {
    let chunks = len / LANES;
    let s = splat_complex_ps(symbol);

    for i in 0..chunks {
        let offset = i * LANES;
        let lo = _mm256_sub_ps(s, load(points, offset));
        let hi = _mm256_sub_ps(s, load(points, offset + COMPLEX_LANES));
        _mm256_storeu_ps(out.add(offset), norm_sqr_packed_ps(lo, hi));
    }

    for i in chunks * LANES..len {
        let diff = symbol - *points.add(i);
        *out.add(i) = diff.re * diff.re + diff.im * diff.im;
    }
}
