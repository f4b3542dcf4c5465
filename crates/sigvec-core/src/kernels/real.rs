//! Kernels on real `f32` sequences

use super::Kernels;
use crate::error::{check_len, Error, Result};
use crate::primitives::KernelPrimitives;

impl<P: KernelPrimitives> Kernels<P> {
    /// Σ x
    pub fn sum_f32(&self, x: &[f32]) -> f32 {
        self.primitives.sum_f32(x)
    }

    /// Σ x·y
    pub fn dot_f32(&self, x: &[f32], y: &[f32]) -> Result<f32> {
        check_len(x.len(), y.len(), "dot_f32 second operand")?;
        Ok(self.primitives.dot_f32(x, y))
    }

    /// Index of the first largest element
    ///
    /// Only values above `-f32::MAX` can be selected and NaN never is, so a
    /// slice with no such value yields index 0.
    pub fn max_index_f32(&self, x: &[f32]) -> Result<usize> {
        self.primitives
            .max_index_f32(x)
            .ok_or_else(|| Error::empty_input("max_index_f32"))
    }

    /// z = x + y
    pub fn add_f32(&self, x: &[f32], y: &[f32], z: &mut [f32]) -> Result<()> {
        check_len(x.len(), y.len(), "add_f32 second operand")?;
        check_len(x.len(), z.len(), "add_f32 output")?;
        self.primitives.add_f32(x, y, z);
        Ok(())
    }

    /// z = x - y
    pub fn sub_f32(&self, x: &[f32], y: &[f32], z: &mut [f32]) -> Result<()> {
        check_len(x.len(), y.len(), "sub_f32 second operand")?;
        check_len(x.len(), z.len(), "sub_f32 output")?;
        self.primitives.sub_f32(x, y, z);
        Ok(())
    }

    /// z = x / y
    pub fn div_f32(&self, x: &[f32], y: &[f32], z: &mut [f32]) -> Result<()> {
        check_len(x.len(), y.len(), "div_f32 second operand")?;
        check_len(x.len(), z.len(), "div_f32 output")?;
        self.primitives.div_f32(x, y, z);
        Ok(())
    }

    /// z = x · h
    pub fn scale_f32(&self, x: &[f32], h: f32, z: &mut [f32]) -> Result<()> {
        check_len(x.len(), z.len(), "scale_f32 output")?;
        self.primitives.scale_f32(x, h, z);
        Ok(())
    }

    /// acc += y
    pub fn add_assign_f32(&self, acc: &mut [f32], y: &[f32]) -> Result<()> {
        check_len(acc.len(), y.len(), "add_assign_f32 operand")?;
        self.primitives.add_assign_f32(acc, y);
        Ok(())
    }

    /// acc -= y
    pub fn sub_assign_f32(&self, acc: &mut [f32], y: &[f32]) -> Result<()> {
        check_len(acc.len(), y.len(), "sub_assign_f32 operand")?;
        self.primitives.sub_assign_f32(acc, y);
        Ok(())
    }

    /// x *= h
    pub fn scale_assign_f32(&self, x: &mut [f32], h: f32) {
        self.primitives.scale_assign_f32(x, h);
    }
}
