//! Length-checked kernel entry points
//!
//! `Kernels<P>` wraps a backend and is the public way to run kernels on
//! slices. Every method checks that its operands have matching lengths
//! before handing them to the backend, and reports a mismatch as
//! [`Error::InvalidInput`](crate::Error::InvalidInput) instead of reading
//! past a buffer. Reductions that need at least one sample report empty
//! input as [`Error::InsufficientData`](crate::Error::InsufficientData).
//!
//! Kernels are split by sample type:
//! - `real`: `f32` sequences
//! - `complex`: `Cf32` sequences
//! - `integer`: byte, `i16` and `i32` sequences and conversions into them

mod complex;
mod integer;
mod real;

use crate::config::{BackendPreference, KernelConfig};
use crate::error::Result;
use crate::memory::AlignedBuffer;
use crate::primitives::{
    detect_backend, AutoBackend, Avx2Backend, KernelCaps, KernelPrimitives, ScalarBackend,
};
use bytemuck::Zeroable;

/// Kernel facade over a backend, with a buffer alignment policy
#[derive(Clone, Copy, Debug)]
pub struct Kernels<P> {
    primitives: P,
    alignment: usize,
}

impl<P: KernelPrimitives> Kernels<P> {
    /// Wrap a backend, using its preferred alignment for buffers
    pub fn new(primitives: P) -> Self {
        let alignment = primitives.alignment();
        Self {
            primitives,
            alignment,
        }
    }

    /// Wrap a backend with an explicit buffer alignment
    pub fn with_alignment(primitives: P, alignment: usize) -> Result<Self> {
        KernelConfig::new().with_alignment(alignment).validate()?;
        Ok(Self {
            primitives,
            alignment,
        })
    }

    /// Get the underlying backend
    #[inline]
    pub fn primitives(&self) -> &P {
        &self.primitives
    }

    #[inline]
    pub fn backend_name(&self) -> &'static str {
        self.primitives.backend_name()
    }

    /// Kernels that run on the accelerated path
    #[inline]
    pub fn accelerated_kernels(&self) -> KernelCaps {
        self.primitives.accelerated_kernels()
    }

    /// Alignment of buffers from [`Self::allocate`], in bytes
    #[inline]
    pub fn alignment(&self) -> usize {
        self.alignment
    }

    /// Allocate `len` zeroed elements at this facade's alignment
    pub fn allocate<T: Zeroable + Copy>(&self, len: usize) -> Result<AlignedBuffer<T>> {
        AlignedBuffer::try_new(len, self.alignment)
    }

    /// Resize a buffer, preserving its prefix and zeroing any new tail
    pub fn reallocate<T: Zeroable + Copy>(
        &self,
        buffer: AlignedBuffer<T>,
        new_len: usize,
    ) -> Result<AlignedBuffer<T>> {
        buffer.reallocate(new_len)
    }
}

impl Kernels<AutoBackend> {
    /// Kernels on the best backend for this CPU
    pub fn auto() -> Self {
        Self::new(detect_backend())
    }

    /// Resolve a configuration into a kernel facade
    ///
    /// Fails when the alignment override is invalid or when AVX2 is requested
    /// but unavailable.
    pub fn from_config(config: &KernelConfig) -> Result<Self> {
        config.validate()?;
        let backend = match config.backend {
            BackendPreference::Auto => detect_backend(),
            BackendPreference::Scalar => AutoBackend::Scalar(ScalarBackend::new()),
            BackendPreference::Avx2 => AutoBackend::Avx2(Avx2Backend::try_new()?),
        };
        let alignment = config.alignment.unwrap_or_else(|| backend.alignment());
        tracing::debug!(
            backend = backend.backend_name(),
            alignment,
            "resolved kernel configuration"
        );
        Ok(Self {
            primitives: backend,
            alignment,
        })
    }
}

impl Default for Kernels<AutoBackend> {
    fn default() -> Self {
        Self::auto()
    }
}

/// Kernels on the best backend for this CPU
pub fn kernels() -> Kernels<AutoBackend> {
    Kernels::auto()
}

/// Kernels on the portable scalar path
pub fn scalar_kernels() -> Kernels<ScalarBackend> {
    Kernels::new(ScalarBackend::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_scalar_defaults() {
        let k = scalar_kernels();
        assert_eq!(k.backend_name(), "scalar");
        assert_eq!(k.alignment(), crate::memory::SYSTEM_ALIGNMENT);
        assert!(k.accelerated_kernels().is_empty());
    }

    #[test]
    fn test_allocate_uses_alignment() {
        let k = Kernels::with_alignment(ScalarBackend, 64).unwrap();
        let buffer = k.allocate::<f32>(10).unwrap();
        assert_eq!(buffer.as_ptr() as usize % 64, 0);
        let buffer = k.reallocate(buffer, 100).unwrap();
        assert_eq!(buffer.len(), 100);
        assert_eq!(buffer.as_ptr() as usize % 64, 0);
    }

    #[test]
    fn test_with_alignment_rejects_invalid() {
        assert!(matches!(
            Kernels::with_alignment(ScalarBackend, 12),
            Err(Error::InvalidAlignment(12))
        ));
    }

    #[test]
    fn test_from_config() {
        let config = KernelConfig::new().with_backend(BackendPreference::Scalar);
        let k = Kernels::from_config(&config).unwrap();
        assert_eq!(k.backend_name(), "scalar");
        assert_eq!(k.alignment(), crate::memory::SYSTEM_ALIGNMENT);

        let config = KernelConfig::new().with_alignment(128);
        let k = Kernels::from_config(&config).unwrap();
        assert_eq!(k.alignment(), 128);

        let config = KernelConfig::new().with_backend(BackendPreference::Avx2);
        match Kernels::from_config(&config) {
            Ok(k) => {
                assert!(Avx2Backend::is_available());
                assert_eq!(k.backend_name(), "avx2");
                assert_eq!(k.alignment(), 32);
            }
            Err(err) => {
                assert!(!Avx2Backend::is_available());
                assert!(matches!(err, Error::FeatureNotAvailable(_)));
            }
        }
    }
}
