//! Unified kernel primitives trait
//!
//! Every kernel has a portable per-element implementation here, as a default
//! method. Accelerated backends override the kernels they vectorize and leave
//! the rest on these defaults, so a backend that overrides nothing is the
//! scalar path.
//!
//! Methods on this trait assume the caller already checked slice lengths; the
//! checked entry points live on [`crate::Kernels`].

use crate::numeric::Cf32;
use bitflags::bitflags;
use num_traits::Zero;

bitflags! {
    /// One flag per kernel that a backend runs on its accelerated path
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct KernelCaps: u32 {
        const SUM            = 1 << 0;
        const ADD            = 1 << 1;
        const SUB            = 1 << 2;
        const DIV            = 1 << 3;
        const SCALE          = 1 << 4;
        const DOT            = 1 << 5;
        const MAX_INDEX      = 1 << 6;
        const CONVERT_I16    = 1 << 7;
        const COMPLEX_SUM    = 1 << 8;
        const COMPLEX_SCALE  = 1 << 9;
        const COMPLEX_MUL    = 1 << 10;
        const COMPLEX_MUL_CONJ = 1 << 11;
        const COMPLEX_MUL_REAL = 1 << 12;
        const COMPLEX_DIV    = 1 << 13;
        const CONJ           = 1 << 14;
        const COMPLEX_DOT    = 1 << 15;
        const COMPLEX_DOT_CONJ = 1 << 16;
        const COMPLEX_DOT_REAL = 1 << 17;
        const AVG_POWER      = 1 << 18;
        const MAGNITUDE      = 1 << 19;
        const MAGNITUDE_SQR  = 1 << 20;
        const MAX_ABS_INDEX  = 1 << 21;
        const DEINTERLEAVE   = 1 << 22;
        const DEINTERLEAVE_REAL = 1 << 23;
        const SQUARE_DIST    = 1 << 24;
    }
}

/// Unified trait for vector kernels over `f32`, complex `f32` and integers
///
/// Implementors are small `Copy` values; all state lives in the buffers.
pub trait KernelPrimitives: Clone + Send + Sync {
    /// Get the name of this backend
    fn backend_name(&self) -> &'static str;

    /// Number of `f32` lanes processed per instruction
    fn simd_width(&self) -> usize {
        1
    }

    /// Kernels that run on the accelerated path of this backend
    fn accelerated_kernels(&self) -> KernelCaps {
        KernelCaps::empty()
    }

    /// Preferred buffer alignment in bytes
    fn alignment(&self) -> usize {
        crate::memory::SYSTEM_ALIGNMENT
    }

    // ------------------------------------------------------------------
    // Reductions
    // ------------------------------------------------------------------

    /// Sum all elements
    fn sum_f32(&self, x: &[f32]) -> f32 {
        x.iter().fold(0.0, |acc, &v| acc + v)
    }

    /// Sum all elements with wrapping on overflow
    fn sum_i32(&self, x: &[i32]) -> i32 {
        x.iter().fold(0i32, |acc, &v| acc.wrapping_add(v))
    }

    /// Sum all complex elements
    fn sum_c32(&self, x: &[Cf32]) -> Cf32 {
        x.iter().fold(Cf32::zero(), |acc, &v| acc + v)
    }

    /// Σ x[i]·y[i]
    fn dot_f32(&self, x: &[f32], y: &[f32]) -> f32 {
        debug_assert_eq!(x.len(), y.len());
        x.iter()
            .zip(y.iter())
            .fold(0.0, |acc, (&a, &b)| acc + a * b)
    }

    /// Σ x[i]·y[i] over complex operands
    fn dot_c32(&self, x: &[Cf32], y: &[Cf32]) -> Cf32 {
        debug_assert_eq!(x.len(), y.len());
        x.iter()
            .zip(y.iter())
            .fold(Cf32::zero(), |acc, (&a, &b)| acc + a * b)
    }

    /// Σ x[i]·conj(y[i])
    fn dot_conj_c32(&self, x: &[Cf32], y: &[Cf32]) -> Cf32 {
        debug_assert_eq!(x.len(), y.len());
        x.iter()
            .zip(y.iter())
            .fold(Cf32::zero(), |acc, (&a, &b)| acc + a * b.conj())
    }

    /// Σ x[i]·y[i] with a real second operand
    fn dot_c32_f32(&self, x: &[Cf32], y: &[f32]) -> Cf32 {
        debug_assert_eq!(x.len(), y.len());
        x.iter()
            .zip(y.iter())
            .fold(Cf32::zero(), |acc, (&a, &b)| acc + a * b)
    }

    /// Mean of |x[i]|²; the caller guarantees `x` is not empty
    fn avg_power_c32(&self, x: &[Cf32]) -> f32 {
        let power = x.iter().fold(0.0f32, |acc, v| acc + v.norm_sqr());
        power / x.len() as f32
    }

    /// Index of the first largest element
    ///
    /// Elements must exceed `-f32::MAX` to be selected; NaN never wins.
    /// Returns `None` for an empty slice.
    fn max_index_f32(&self, x: &[f32]) -> Option<usize> {
        if x.is_empty() {
            return None;
        }
        let mut best = f32::MIN;
        let mut index = 0;
        for (i, &v) in x.iter().enumerate() {
            if v > best {
                best = v;
                index = i;
            }
        }
        Some(index)
    }

    /// Index of the first element with the largest squared magnitude
    fn max_abs_index_c32(&self, x: &[Cf32]) -> Option<usize> {
        if x.is_empty() {
            return None;
        }
        let mut best = f32::MIN;
        let mut index = 0;
        for (i, v) in x.iter().enumerate() {
            let power = v.re * v.re + v.im * v.im;
            if power > best {
                best = power;
                index = i;
            }
        }
        Some(index)
    }

    // ------------------------------------------------------------------
    // Real element-wise
    // ------------------------------------------------------------------

    /// z = x + y
    fn add_f32(&self, x: &[f32], y: &[f32], z: &mut [f32]) {
        for ((o, &a), &b) in z.iter_mut().zip(x).zip(y) {
            *o = a + b;
        }
    }

    /// z = x - y
    fn sub_f32(&self, x: &[f32], y: &[f32], z: &mut [f32]) {
        for ((o, &a), &b) in z.iter_mut().zip(x).zip(y) {
            *o = a - b;
        }
    }

    /// z = x / y
    fn div_f32(&self, x: &[f32], y: &[f32], z: &mut [f32]) {
        for ((o, &a), &b) in z.iter_mut().zip(x).zip(y) {
            *o = a / b;
        }
    }

    /// z = x · h
    fn scale_f32(&self, x: &[f32], h: f32, z: &mut [f32]) {
        for (o, &a) in z.iter_mut().zip(x) {
            *o = a * h;
        }
    }

    /// acc += y
    fn add_assign_f32(&self, acc: &mut [f32], y: &[f32]) {
        for (o, &b) in acc.iter_mut().zip(y) {
            *o += b;
        }
    }

    /// acc -= y
    fn sub_assign_f32(&self, acc: &mut [f32], y: &[f32]) {
        for (o, &b) in acc.iter_mut().zip(y) {
            *o -= b;
        }
    }

    /// x *= h
    fn scale_assign_f32(&self, x: &mut [f32], h: f32) {
        for o in x.iter_mut() {
            *o *= h;
        }
    }

    // ------------------------------------------------------------------
    // Complex element-wise
    // ------------------------------------------------------------------

    /// z = x · h for a complex scalar
    fn scale_c32(&self, x: &[Cf32], h: Cf32, z: &mut [Cf32]) {
        for (o, &a) in z.iter_mut().zip(x) {
            *o = a * h;
        }
    }

    /// x *= h for a complex scalar
    fn scale_assign_c32(&self, x: &mut [Cf32], h: Cf32) {
        for o in x.iter_mut() {
            *o = *o * h;
        }
    }

    /// z = x · y
    fn mul_c32(&self, x: &[Cf32], y: &[Cf32], z: &mut [Cf32]) {
        for ((o, &a), &b) in z.iter_mut().zip(x).zip(y) {
            *o = a * b;
        }
    }

    /// acc *= y
    fn mul_assign_c32(&self, acc: &mut [Cf32], y: &[Cf32]) {
        for (o, &b) in acc.iter_mut().zip(y) {
            *o = *o * b;
        }
    }

    /// z = x · conj(y)
    fn mul_conj_c32(&self, x: &[Cf32], y: &[Cf32], z: &mut [Cf32]) {
        for ((o, &a), &b) in z.iter_mut().zip(x).zip(y) {
            *o = a * b.conj();
        }
    }

    /// z = x · y with a real second operand
    fn mul_c32_f32(&self, x: &[Cf32], y: &[f32], z: &mut [Cf32]) {
        for ((o, &a), &b) in z.iter_mut().zip(x).zip(y) {
            *o = a * b;
        }
    }

    /// z = x · conj(y) / |y|²
    ///
    /// Loses precision as |y| approaches zero; a zero divisor yields NaN/inf.
    fn div_c32(&self, x: &[Cf32], y: &[Cf32], z: &mut [Cf32]) {
        for ((o, &a), &b) in z.iter_mut().zip(x).zip(y) {
            *o = (a * b.conj()) / b.norm_sqr();
        }
    }

    /// z = conj(x)
    fn conj_c32(&self, x: &[Cf32], z: &mut [Cf32]) {
        for (o, &a) in z.iter_mut().zip(x) {
            *o = a.conj();
        }
    }

    /// x = conj(x)
    fn conj_assign_c32(&self, x: &mut [Cf32]) {
        for o in x.iter_mut() {
            o.im = -o.im;
        }
    }

    // ------------------------------------------------------------------
    // Transforms
    // ------------------------------------------------------------------

    /// out = |x|
    fn magnitude_c32(&self, x: &[Cf32], out: &mut [f32]) {
        for (o, v) in out.iter_mut().zip(x) {
            *o = v.norm();
        }
    }

    /// out = |x|²
    fn magnitude_sqr_c32(&self, x: &[Cf32], out: &mut [f32]) {
        for (o, v) in out.iter_mut().zip(x) {
            *o = v.re * v.re + v.im * v.im;
        }
    }

    /// out = atan2(im, re)
    fn arg_c32(&self, x: &[Cf32], out: &mut [f32]) {
        for (o, v) in out.iter_mut().zip(x) {
            *o = v.arg();
        }
    }

    /// out = |symbol - points|²
    fn square_dist_c32(&self, symbol: Cf32, points: &[Cf32], out: &mut [f32]) {
        for (o, &p) in out.iter_mut().zip(points) {
            let diff = symbol - p;
            *o = diff.re * diff.re + diff.im * diff.im;
        }
    }

    /// Split a complex sequence into its real and imaginary parts
    fn deinterleave_c32(&self, x: &[Cf32], re: &mut [f32], im: &mut [f32]) {
        for ((r, i), v) in re.iter_mut().zip(im.iter_mut()).zip(x) {
            *r = v.re;
            *i = v.im;
        }
    }

    /// Copy out the real parts of a complex sequence
    fn deinterleave_real_c32(&self, x: &[Cf32], re: &mut [f32]) {
        for (r, v) in re.iter_mut().zip(x) {
            *r = v.re;
        }
    }

    /// out = trunc(x · scale) as i16
    ///
    /// Rust float-to-int casts saturate, so out-of-range products clamp to
    /// `i16::MIN`/`i16::MAX` and NaN becomes 0.
    fn convert_f32_i16(&self, x: &[f32], scale: f32, out: &mut [i16]) {
        for (o, &v) in out.iter_mut().zip(x) {
            *o = (v * scale) as i16;
        }
    }

    // ------------------------------------------------------------------
    // Integer / byte
    // ------------------------------------------------------------------

    /// z = x + y, wrapping
    fn add_u8(&self, x: &[u8], y: &[u8], z: &mut [u8]) {
        for ((o, &a), &b) in z.iter_mut().zip(x).zip(y) {
            *o = a.wrapping_add(b);
        }
    }

    /// out = clamp(trunc(offset + gain·x), 0, clip) as u8
    ///
    /// The floor is fixed at zero and only the ceiling is a parameter. The
    /// ceiling is compared in floating point and the result is narrowed to a
    /// byte without further saturation, so a `clip` above 255 wraps.
    fn quantize_u8(&self, x: &[f32], gain: f32, offset: f32, clip: f32, out: &mut [u8]) {
        for (o, &v) in out.iter_mut().zip(x) {
            let mut level = (offset + gain * v) as i32;
            if level < 0 {
                level = 0;
            }
            if level as f32 > clip {
                level = clip as i32;
            }
            *o = level as u8;
        }
    }
}
