//! AVX2 element-wise arithmetic on `f32` sequences
//!
//! Kernels take raw pointers so the same body serves both the out-of-place
//! form and the in-place form where `z` aliases `x`. Every index is read
//! before it is written.

use super::super::utils::LANES;
use std::arch::x86_64::*;

macro_rules! binary_kernel {
    ($(#[$doc:meta])* $name:ident, $simd:ident, $op:tt) => {
        $(#[$doc])*
        ///
        /// # Safety
        /// `x`, `y` and `z` must be valid for `len` elements; `z` may equal `x`
        /// or `y` but must not otherwise overlap them. AVX2 must be available.
        #[target_feature(enable = "avx2")]
        pub unsafe fn $name(x: *const f32, y: *const f32, z: *mut f32, len: usize) {
            let chunks = len / LANES;

            // Main loop - process 8 elements at a time
            for i in 0..chunks {
                let offset = i * LANES;
                let a = _mm256_loadu_ps(x.add(offset));
                let b = _mm256_loadu_ps(y.add(offset));
                _mm256_storeu_ps(z.add(offset), $simd(a, b));
            }

            // Handle remainder
            for i in chunks * LANES..len {
                *z.add(i) = *x.add(i) $op *y.add(i);
            }
        }
    };
}

binary_kernel!(
    /// z = x + y
    add_f32, _mm256_add_ps, +
);
binary_kernel!(
    /// z = x - y
    sub_f32, _mm256_sub_ps, -
);
binary_kernel!(
    /// z = x / y
    div_f32, _mm256_div_ps, /
);

/// z = x · h
///
/// # Safety
/// `x` and `z` must be valid for `len` elements and may be equal. AVX2 must
/// be available.
#[target_feature(enable = "avx2")]
pub unsafe fn scale_f32(x: *const f32, h: f32, z: *mut f32, len: usize) {
    let chunks = len / LANES;
    let h_vec = _mm256_set1_ps(h);

    for i in 0..chunks {
        let offset = i * LANES;
        let a = _mm256_loadu_ps(x.add(offset));
        _mm256_storeu_ps(z.add(offset), _mm256_mul_ps(a, h_vec));
    }

    for i in chunks * LANES..len {
        *z.add(i) = *x.add(i) * h;
    }
}
