//! Sample types shared by every kernel
//!
//! Complex samples are `num_complex::Complex<f32>`, which is `#[repr(C)]` and
//! `Pod`, so a complex sequence of `n` samples is also a real sequence of
//! `2 * n` interleaved components `[re0, im0, re1, im1, ...]`.

use num_complex::Complex;

/// Single-precision complex sample
pub type Cf32 = Complex<f32>;

/// View a complex sequence as its interleaved real components.
///
/// Only component-wise operations (add, subtract, real scaling) give the same
/// answer on this view as on the complex sequence.
#[inline]
pub fn as_components(x: &[Cf32]) -> &[f32] {
    bytemuck::cast_slice(x)
}

/// Mutable counterpart of [`as_components`].
#[inline]
pub fn as_components_mut(x: &mut [Cf32]) -> &mut [f32] {
    bytemuck::cast_slice_mut(x)
}
