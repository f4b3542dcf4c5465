//! Kernels on complex `f32` sequences
//!
//! Addition, subtraction and scaling by a real factor act on each component
//! independently, so they run on the real kernels over the interleaved
//! component view.

use super::Kernels;
use crate::error::{check_len, Error, Result};
use crate::numeric::{as_components, as_components_mut, Cf32};
use crate::primitives::KernelPrimitives;

impl<P: KernelPrimitives> Kernels<P> {
    /// Σ x
    pub fn sum_c32(&self, x: &[Cf32]) -> Cf32 {
        self.primitives.sum_c32(x)
    }

    /// Σ x·y
    pub fn dot_c32(&self, x: &[Cf32], y: &[Cf32]) -> Result<Cf32> {
        check_len(x.len(), y.len(), "dot_c32 second operand")?;
        Ok(self.primitives.dot_c32(x, y))
    }

    /// Σ x·conj(y)
    pub fn dot_conj_c32(&self, x: &[Cf32], y: &[Cf32]) -> Result<Cf32> {
        check_len(x.len(), y.len(), "dot_conj_c32 second operand")?;
        Ok(self.primitives.dot_conj_c32(x, y))
    }

    /// Σ x·y with a real second operand
    pub fn dot_c32_f32(&self, x: &[Cf32], y: &[f32]) -> Result<Cf32> {
        check_len(x.len(), y.len(), "dot_c32_f32 second operand")?;
        Ok(self.primitives.dot_c32_f32(x, y))
    }

    /// Mean power Σ|x|² / N
    pub fn avg_power_c32(&self, x: &[Cf32]) -> Result<f32> {
        if x.is_empty() {
            return Err(Error::empty_input("avg_power_c32"));
        }
        Ok(self.primitives.avg_power_c32(x))
    }

    /// Index of the first sample with the largest |x|²
    pub fn max_abs_index_c32(&self, x: &[Cf32]) -> Result<usize> {
        self.primitives
            .max_abs_index_c32(x)
            .ok_or_else(|| Error::empty_input("max_abs_index_c32"))
    }

    /// z = x + y
    pub fn add_c32(&self, x: &[Cf32], y: &[Cf32], z: &mut [Cf32]) -> Result<()> {
        check_len(x.len(), y.len(), "add_c32 second operand")?;
        check_len(x.len(), z.len(), "add_c32 output")?;
        self.primitives
            .add_f32(as_components(x), as_components(y), as_components_mut(z));
        Ok(())
    }

    /// z = x - y
    pub fn sub_c32(&self, x: &[Cf32], y: &[Cf32], z: &mut [Cf32]) -> Result<()> {
        check_len(x.len(), y.len(), "sub_c32 second operand")?;
        check_len(x.len(), z.len(), "sub_c32 output")?;
        self.primitives
            .sub_f32(as_components(x), as_components(y), as_components_mut(z));
        Ok(())
    }

    /// acc += y
    pub fn add_assign_c32(&self, acc: &mut [Cf32], y: &[Cf32]) -> Result<()> {
        check_len(acc.len(), y.len(), "add_assign_c32 operand")?;
        self.primitives
            .add_assign_f32(as_components_mut(acc), as_components(y));
        Ok(())
    }

    /// acc -= y
    pub fn sub_assign_c32(&self, acc: &mut [Cf32], y: &[Cf32]) -> Result<()> {
        check_len(acc.len(), y.len(), "sub_assign_c32 operand")?;
        self.primitives
            .sub_assign_f32(as_components_mut(acc), as_components(y));
        Ok(())
    }

    /// z = x · h for a real factor
    pub fn scale_c32_by_f32(&self, x: &[Cf32], h: f32, z: &mut [Cf32]) -> Result<()> {
        check_len(x.len(), z.len(), "scale_c32_by_f32 output")?;
        self.primitives
            .scale_f32(as_components(x), h, as_components_mut(z));
        Ok(())
    }

    /// z = x · h for a complex factor
    pub fn scale_c32(&self, x: &[Cf32], h: Cf32, z: &mut [Cf32]) -> Result<()> {
        check_len(x.len(), z.len(), "scale_c32 output")?;
        self.primitives.scale_c32(x, h, z);
        Ok(())
    }

    /// x *= h for a complex factor
    pub fn scale_assign_c32(&self, x: &mut [Cf32], h: Cf32) {
        self.primitives.scale_assign_c32(x, h);
    }

    /// z = x · y
    pub fn mul_c32(&self, x: &[Cf32], y: &[Cf32], z: &mut [Cf32]) -> Result<()> {
        check_len(x.len(), y.len(), "mul_c32 second operand")?;
        check_len(x.len(), z.len(), "mul_c32 output")?;
        self.primitives.mul_c32(x, y, z);
        Ok(())
    }

    /// acc *= y
    pub fn mul_assign_c32(&self, acc: &mut [Cf32], y: &[Cf32]) -> Result<()> {
        check_len(acc.len(), y.len(), "mul_assign_c32 operand")?;
        self.primitives.mul_assign_c32(acc, y);
        Ok(())
    }

    /// z = x · conj(y)
    pub fn mul_conj_c32(&self, x: &[Cf32], y: &[Cf32], z: &mut [Cf32]) -> Result<()> {
        check_len(x.len(), y.len(), "mul_conj_c32 second operand")?;
        check_len(x.len(), z.len(), "mul_conj_c32 output")?;
        self.primitives.mul_conj_c32(x, y, z);
        Ok(())
    }

    /// z = x · y with a real second operand
    pub fn mul_c32_f32(&self, x: &[Cf32], y: &[f32], z: &mut [Cf32]) -> Result<()> {
        check_len(x.len(), y.len(), "mul_c32_f32 second operand")?;
        check_len(x.len(), z.len(), "mul_c32_f32 output")?;
        self.primitives.mul_c32_f32(x, y, z);
        Ok(())
    }

    /// z = x / y, computed as x · conj(y) / |y|²
    ///
    /// Not guarded against small divisors: precision degrades as |y| → 0 and
    /// a zero divisor produces non-finite output.
    pub fn div_c32(&self, x: &[Cf32], y: &[Cf32], z: &mut [Cf32]) -> Result<()> {
        check_len(x.len(), y.len(), "div_c32 second operand")?;
        check_len(x.len(), z.len(), "div_c32 output")?;
        self.primitives.div_c32(x, y, z);
        Ok(())
    }

    /// z = conj(x)
    pub fn conj_c32(&self, x: &[Cf32], z: &mut [Cf32]) -> Result<()> {
        check_len(x.len(), z.len(), "conj_c32 output")?;
        self.primitives.conj_c32(x, z);
        Ok(())
    }

    /// x = conj(x)
    pub fn conj_assign_c32(&self, x: &mut [Cf32]) {
        self.primitives.conj_assign_c32(x);
    }

    /// out = |x|
    pub fn magnitude_c32(&self, x: &[Cf32], out: &mut [f32]) -> Result<()> {
        check_len(x.len(), out.len(), "magnitude_c32 output")?;
        self.primitives.magnitude_c32(x, out);
        Ok(())
    }

    /// out = |x|²
    pub fn magnitude_sqr_c32(&self, x: &[Cf32], out: &mut [f32]) -> Result<()> {
        check_len(x.len(), out.len(), "magnitude_sqr_c32 output")?;
        self.primitives.magnitude_sqr_c32(x, out);
        Ok(())
    }

    /// out = atan2(im, re), in (-π, π]
    pub fn arg_c32(&self, x: &[Cf32], out: &mut [f32]) -> Result<()> {
        check_len(x.len(), out.len(), "arg_c32 output")?;
        self.primitives.arg_c32(x, out);
        Ok(())
    }

    /// out = |symbol - points|², one distance per constellation point
    pub fn square_dist_c32(&self, symbol: Cf32, points: &[Cf32], out: &mut [f32]) -> Result<()> {
        check_len(points.len(), out.len(), "square_dist_c32 output")?;
        self.primitives.square_dist_c32(symbol, points, out);
        Ok(())
    }

    /// Split x into its real and imaginary parts
    pub fn deinterleave_c32(&self, x: &[Cf32], re: &mut [f32], im: &mut [f32]) -> Result<()> {
        check_len(x.len(), re.len(), "deinterleave_c32 real output")?;
        check_len(x.len(), im.len(), "deinterleave_c32 imaginary output")?;
        self.primitives.deinterleave_c32(x, re, im);
        Ok(())
    }

    /// Copy out the real parts of x
    pub fn deinterleave_real_c32(&self, x: &[Cf32], re: &mut [f32]) -> Result<()> {
        check_len(x.len(), re.len(), "deinterleave_real_c32 output")?;
        self.primitives.deinterleave_real_c32(x, re);
        Ok(())
    }
}
