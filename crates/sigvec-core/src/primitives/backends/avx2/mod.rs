//! AVX2 backend implementation with operation-centric organization
//!
//! Kernels are grouped by the lane shuffles they share (see `ops`). The
//! trait methods here only clamp lengths and forward to those functions; any
//! kernel not listed in [`Avx2Backend::accelerated_kernels`] stays on the
//! scalar default.
//!
//! The dot products use FMA, so availability requires both `avx2` and `fma`.

#[cfg(all(target_arch = "x86_64", feature = "avx2"))]
mod ops;
#[cfg(all(target_arch = "x86_64", feature = "avx2"))]
mod utils;

use crate::error::{Error, Result};
use crate::primitives::KernelPrimitives;

#[cfg(all(target_arch = "x86_64", feature = "avx2"))]
use crate::{numeric::Cf32, primitives::KernelCaps};

/// Alignment that lets every `__m256` load hit a single cache line
pub const AVX2_ALIGNMENT: usize = 32;

/// AVX2 backend for x86_64 processors
///
/// The private field keeps construction behind [`Avx2Backend::new`] and
/// [`Avx2Backend::try_new`], so holding a value proves the CPU check passed.
#[derive(Clone, Copy, Debug)]
pub struct Avx2Backend(());

impl Avx2Backend {
    /// Create a new AVX2 backend
    ///
    /// # Panics
    /// Panics if the CPU doesn't support AVX2 and FMA instructions
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        #[cfg(all(target_arch = "x86_64", feature = "avx2"))]
        {
            if !Self::is_available() {
                panic!("AVX2 backend requested but CPU doesn't support AVX2/FMA instructions");
            }
            Self(())
        }
        #[cfg(not(all(target_arch = "x86_64", feature = "avx2")))]
        {
            panic!("AVX2 backend not available: not compiled with AVX2 support");
        }
    }

    /// Create a new AVX2 backend, reporting instead of panicking when the
    /// CPU or the build lacks support
    pub fn try_new() -> Result<Self> {
        if Self::is_available() {
            Ok(Self(()))
        } else {
            Err(Error::FeatureNotAvailable(
                "AVX2 and FMA are not available on this CPU or build".to_string(),
            ))
        }
    }

    /// Check if AVX2 is available on this CPU
    pub fn is_available() -> bool {
        #[cfg(all(target_arch = "x86_64", feature = "avx2"))]
        {
            is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma")
        }
        #[cfg(not(all(target_arch = "x86_64", feature = "avx2")))]
        {
            false
        }
    }
}

#[cfg(all(target_arch = "x86_64", feature = "avx2"))]
impl KernelPrimitives for Avx2Backend {
    fn backend_name(&self) -> &'static str {
        "avx2"
    }

    fn simd_width(&self) -> usize {
        utils::LANES
    }

    fn accelerated_kernels(&self) -> KernelCaps {
        KernelCaps::SUM
            | KernelCaps::ADD
            | KernelCaps::SUB
            | KernelCaps::DIV
            | KernelCaps::SCALE
            | KernelCaps::DOT
            | KernelCaps::MAX_INDEX
            | KernelCaps::CONVERT_I16
            | KernelCaps::COMPLEX_SUM
            | KernelCaps::COMPLEX_SCALE
            | KernelCaps::COMPLEX_MUL
            | KernelCaps::COMPLEX_MUL_CONJ
            | KernelCaps::COMPLEX_MUL_REAL
            | KernelCaps::COMPLEX_DIV
            | KernelCaps::CONJ
            | KernelCaps::COMPLEX_DOT
            | KernelCaps::COMPLEX_DOT_CONJ
            | KernelCaps::COMPLEX_DOT_REAL
            | KernelCaps::AVG_POWER
            | KernelCaps::MAGNITUDE
            | KernelCaps::MAGNITUDE_SQR
            | KernelCaps::MAX_ABS_INDEX
            | KernelCaps::DEINTERLEAVE
            | KernelCaps::DEINTERLEAVE_REAL
            | KernelCaps::SQUARE_DIST
    }

    fn alignment(&self) -> usize {
        AVX2_ALIGNMENT
    }

    fn sum_f32(&self, x: &[f32]) -> f32 {
        // Safety: We checked CPU support in new()
        unsafe { ops::reduce::sum_f32(x) }
    }

    fn sum_c32(&self, x: &[Cf32]) -> Cf32 {
        // Safety: We checked CPU support in new()
        unsafe { ops::reduce::sum_c32(x) }
    }

    fn dot_f32(&self, x: &[f32], y: &[f32]) -> f32 {
        // Safety: We checked CPU support in new()
        unsafe { ops::reduce::dot_f32(x, y) }
    }

    fn dot_c32(&self, x: &[Cf32], y: &[Cf32]) -> Cf32 {
        // Safety: We checked CPU support in new()
        unsafe { ops::reduce::dot_c32(x, y) }
    }

    fn dot_conj_c32(&self, x: &[Cf32], y: &[Cf32]) -> Cf32 {
        // Safety: We checked CPU support in new()
        unsafe { ops::reduce::dot_conj_c32(x, y) }
    }

    fn dot_c32_f32(&self, x: &[Cf32], y: &[f32]) -> Cf32 {
        // Safety: We checked CPU support in new()
        unsafe { ops::reduce::dot_c32_f32(x, y) }
    }

    fn avg_power_c32(&self, x: &[Cf32]) -> f32 {
        // Safety: We checked CPU support in new()
        let power = unsafe { ops::reduce::power_c32(x) };
        power / x.len() as f32
    }

    fn max_index_f32(&self, x: &[f32]) -> Option<usize> {
        if x.is_empty() {
            return None;
        }
        // Safety: We checked CPU support in new()
        Some(unsafe { ops::reduce::max_index_f32(x) })
    }

    fn max_abs_index_c32(&self, x: &[Cf32]) -> Option<usize> {
        if x.is_empty() {
            return None;
        }
        // Safety: We checked CPU support in new()
        Some(unsafe { ops::reduce::max_abs_index_c32(x) })
    }

    fn add_f32(&self, x: &[f32], y: &[f32], z: &mut [f32]) {
        let n = z.len().min(x.len()).min(y.len());
        // Safety: We checked CPU support in new(); all three hold n elements
        unsafe { ops::arith::add_f32(x.as_ptr(), y.as_ptr(), z.as_mut_ptr(), n) }
    }

    fn sub_f32(&self, x: &[f32], y: &[f32], z: &mut [f32]) {
        let n = z.len().min(x.len()).min(y.len());
        // Safety: We checked CPU support in new(); all three hold n elements
        unsafe { ops::arith::sub_f32(x.as_ptr(), y.as_ptr(), z.as_mut_ptr(), n) }
    }

    fn div_f32(&self, x: &[f32], y: &[f32], z: &mut [f32]) {
        let n = z.len().min(x.len()).min(y.len());
        // Safety: We checked CPU support in new(); all three hold n elements
        unsafe { ops::arith::div_f32(x.as_ptr(), y.as_ptr(), z.as_mut_ptr(), n) }
    }

    fn scale_f32(&self, x: &[f32], h: f32, z: &mut [f32]) {
        let n = z.len().min(x.len());
        // Safety: We checked CPU support in new(); both hold n elements
        unsafe { ops::arith::scale_f32(x.as_ptr(), h, z.as_mut_ptr(), n) }
    }

    fn add_assign_f32(&self, acc: &mut [f32], y: &[f32]) {
        let n = acc.len().min(y.len());
        let p = acc.as_mut_ptr();
        // Safety: We checked CPU support in new(); output aliases x only
        unsafe { ops::arith::add_f32(p, y.as_ptr(), p, n) }
    }

    fn sub_assign_f32(&self, acc: &mut [f32], y: &[f32]) {
        let n = acc.len().min(y.len());
        let p = acc.as_mut_ptr();
        // Safety: We checked CPU support in new(); output aliases x only
        unsafe { ops::arith::sub_f32(p, y.as_ptr(), p, n) }
    }

    fn scale_assign_f32(&self, x: &mut [f32], h: f32) {
        let p = x.as_mut_ptr();
        // Safety: We checked CPU support in new(); output aliases x only
        unsafe { ops::arith::scale_f32(p, h, p, x.len()) }
    }

    fn scale_c32(&self, x: &[Cf32], h: Cf32, z: &mut [Cf32]) {
        let n = z.len().min(x.len());
        // Safety: We checked CPU support in new(); both hold n samples
        unsafe { ops::complex::scale_c32(x.as_ptr(), h, z.as_mut_ptr(), n) }
    }

    fn scale_assign_c32(&self, x: &mut [Cf32], h: Cf32) {
        let p = x.as_mut_ptr();
        // Safety: We checked CPU support in new(); output aliases x only
        unsafe { ops::complex::scale_c32(p, h, p, x.len()) }
    }

    fn mul_c32(&self, x: &[Cf32], y: &[Cf32], z: &mut [Cf32]) {
        let n = z.len().min(x.len()).min(y.len());
        // Safety: We checked CPU support in new(); all three hold n samples
        unsafe { ops::complex::mul_c32(x.as_ptr(), y.as_ptr(), z.as_mut_ptr(), n) }
    }

    fn mul_assign_c32(&self, acc: &mut [Cf32], y: &[Cf32]) {
        let n = acc.len().min(y.len());
        let p = acc.as_mut_ptr();
        // Safety: We checked CPU support in new(); output aliases x only
        unsafe { ops::complex::mul_c32(p, y.as_ptr(), p, n) }
    }

    fn mul_conj_c32(&self, x: &[Cf32], y: &[Cf32], z: &mut [Cf32]) {
        let n = z.len().min(x.len()).min(y.len());
        // Safety: We checked CPU support in new(); all three hold n samples
        unsafe { ops::complex::mul_conj_c32(x.as_ptr(), y.as_ptr(), z.as_mut_ptr(), n) }
    }

    fn mul_c32_f32(&self, x: &[Cf32], y: &[f32], z: &mut [Cf32]) {
        let n = z.len().min(x.len()).min(y.len());
        // Safety: We checked CPU support in new(); all three hold n elements
        unsafe { ops::complex::mul_c32_f32(x.as_ptr(), y.as_ptr(), z.as_mut_ptr(), n) }
    }

    fn div_c32(&self, x: &[Cf32], y: &[Cf32], z: &mut [Cf32]) {
        let n = z.len().min(x.len()).min(y.len());
        // Safety: We checked CPU support in new(); all three hold n samples
        unsafe { ops::complex::div_c32(x.as_ptr(), y.as_ptr(), z.as_mut_ptr(), n) }
    }

    fn conj_c32(&self, x: &[Cf32], z: &mut [Cf32]) {
        let n = z.len().min(x.len());
        // Safety: We checked CPU support in new(); both hold n samples
        unsafe { ops::complex::conj_c32(x.as_ptr(), z.as_mut_ptr(), n) }
    }

    fn conj_assign_c32(&self, x: &mut [Cf32]) {
        let p = x.as_mut_ptr();
        // Safety: We checked CPU support in new(); output aliases x only
        unsafe { ops::complex::conj_c32(p, p, x.len()) }
    }

    fn magnitude_c32(&self, x: &[Cf32], out: &mut [f32]) {
        let n = out.len().min(x.len());
        // Safety: We checked CPU support in new(); both hold n elements
        unsafe { ops::complex::magnitude_c32(x.as_ptr(), out.as_mut_ptr(), n, true) }
    }

    fn magnitude_sqr_c32(&self, x: &[Cf32], out: &mut [f32]) {
        let n = out.len().min(x.len());
        // Safety: We checked CPU support in new(); both hold n elements
        unsafe { ops::complex::magnitude_c32(x.as_ptr(), out.as_mut_ptr(), n, false) }
    }

    fn square_dist_c32(&self, symbol: Cf32, points: &[Cf32], out: &mut [f32]) {
        let n = out.len().min(points.len());
        // Safety: We checked CPU support in new(); both hold n elements
        unsafe { ops::complex::square_dist_c32(symbol, points.as_ptr(), out.as_mut_ptr(), n) }
    }

    fn deinterleave_c32(&self, x: &[Cf32], re: &mut [f32], im: &mut [f32]) {
        // Safety: We checked CPU support in new()
        unsafe { ops::convert::deinterleave_c32(x, re, im) }
    }

    fn deinterleave_real_c32(&self, x: &[Cf32], re: &mut [f32]) {
        // Safety: We checked CPU support in new()
        unsafe { ops::convert::deinterleave_real_c32(x, re) }
    }

    fn convert_f32_i16(&self, x: &[f32], scale: f32, out: &mut [i16]) {
        // Safety: We checked CPU support in new()
        unsafe { ops::convert::convert_f32_i16(x, scale, out) }
    }
}

// Fallback for non-AVX2 builds
#[cfg(not(all(target_arch = "x86_64", feature = "avx2")))]
impl KernelPrimitives for Avx2Backend {
    fn backend_name(&self) -> &'static str {
        "avx2 (unavailable)"
    }
}
