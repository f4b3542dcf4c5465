//! Kernels on byte and integer sequences, and conversions into them

use super::Kernels;
use crate::error::{check_len, Result};
use crate::primitives::KernelPrimitives;

impl<P: KernelPrimitives> Kernels<P> {
    /// Σ x, wrapping on overflow
    pub fn sum_i32(&self, x: &[i32]) -> i32 {
        self.primitives.sum_i32(x)
    }

    /// z = x + y, wrapping
    pub fn add_u8(&self, x: &[u8], y: &[u8], z: &mut [u8]) -> Result<()> {
        check_len(x.len(), y.len(), "add_u8 second operand")?;
        check_len(x.len(), z.len(), "add_u8 output")?;
        self.primitives.add_u8(x, y, z);
        Ok(())
    }

    /// Quantize soft values to bytes: `clamp(trunc(offset + gain·x), 0, clip)`
    ///
    /// The floor is always zero. A `clip` above 255 is not saturated and wraps
    /// when narrowed to a byte.
    pub fn quantize_u8(
        &self,
        x: &[f32],
        gain: f32,
        offset: f32,
        clip: f32,
        out: &mut [u8],
    ) -> Result<()> {
        check_len(x.len(), out.len(), "quantize_u8 output")?;
        self.primitives.quantize_u8(x, gain, offset, clip, out);
        Ok(())
    }

    /// out = trunc(x · scale) as i16, without rounding
    pub fn convert_f32_i16(&self, x: &[f32], scale: f32, out: &mut [i16]) -> Result<()> {
        check_len(x.len(), out.len(), "convert_f32_i16 output")?;
        self.primitives.convert_f32_i16(x, scale, out);
        Ok(())
    }
}
