//! Scalar backend implementation
//!
//! This backend runs every kernel through the per-element default methods of
//! [`KernelPrimitives`] without using any SIMD instructions.

use crate::primitives::KernelPrimitives;

/// Scalar backend - available on every target
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarBackend;

impl ScalarBackend {
    pub fn new() -> Self {
        Self
    }
}

impl KernelPrimitives for ScalarBackend {
    fn backend_name(&self) -> &'static str {
        "scalar"
    }

    // All kernels use the default implementations from the trait
}
