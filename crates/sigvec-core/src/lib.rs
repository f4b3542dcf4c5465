//! Vector kernels for physical-layer signal processing
//!
//! This crate provides element-wise arithmetic, reductions, transforms and
//! conversions over real `f32`, complex `f32` and byte/integer sequences,
//! with a portable scalar path and an AVX2 path selected at runtime.
//!
//! # Architecture Overview
//!
//! The library is organized into two layers:
//!
//! 1. **Primitives** - the [`KernelPrimitives`] trait. Its default methods
//!    are the scalar kernels; [`Avx2Backend`] overrides the ones it
//!    vectorizes and [`AutoBackend`] picks a backend once per process.
//! 2. **Kernels** - the [`Kernels`] facade, which validates slice lengths
//!    and empty inputs, routes complex add/sub through the real kernels, and
//!    hands out aligned buffers.
//!
//! # Example
//!
//! ```rust
//! use sigvec_core::{kernels, Cf32};
//!
//! let k = kernels();
//! let x = vec![Cf32::new(1.0, 2.0); 16];
//! let y = vec![Cf32::new(0.5, -1.0); 16];
//! let mut z = k.allocate::<Cf32>(16).unwrap();
//!
//! k.mul_conj_c32(&x, &y, &mut z).unwrap();
//! let power = k.avg_power_c32(&z).unwrap();
//! println!("{} backend, mean power {power}", k.backend_name());
//! ```

pub mod config;
pub mod error;
pub mod kernels;
pub mod memory;
pub mod numeric;
pub mod primitives;

// Re-export core types
pub use config::{BackendPreference, KernelConfig};
pub use error::{Error, Result};
pub use kernels::{kernels, scalar_kernels, Kernels};
pub use memory::{AlignedBuffer, SYSTEM_ALIGNMENT};
pub use numeric::{as_components, as_components_mut, Cf32};

pub use primitives::{
    auto_backend, best_backend_name, detect_backend, scalar_backend, AutoBackend, Avx2Backend,
    KernelCaps, KernelPrimitives, ScalarBackend,
};

#[cfg(all(target_arch = "x86_64", feature = "avx2"))]
pub use primitives::avx2_backend;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        kernels, scalar_kernels, AlignedBuffer, AutoBackend, BackendPreference, Cf32, Error,
        KernelCaps, KernelConfig, KernelPrimitives, Kernels, Result, ScalarBackend,
    };
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
