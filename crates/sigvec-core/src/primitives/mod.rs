//! Vector kernel primitives with compile-time and runtime dispatch
//!
//! # Architecture
//!
//! - Single `KernelPrimitives` trait; its default methods are the scalar path
//! - Concrete backend types: `ScalarBackend`, `Avx2Backend`
//! - `AutoBackend` picks one of them once per process from CPU detection
//! - No heap allocation or dynamic dispatch
//!
//! # Usage
//!
//! ```rust,ignore
//! // Explicit backend selection - panics if not supported
//! let backend = Avx2Backend::new();
//! let total = backend.sum_f32(&data);
//!
//! // Best available backend for this CPU
//! let backend = auto_backend();
//! backend.mul_c32(&x, &y, &mut z);
//! ```

pub mod backends;
pub mod traits;

pub use backends::{detect_backend, AutoBackend, Avx2Backend, ScalarBackend};
pub use traits::{KernelCaps, KernelPrimitives};

/// Create a scalar backend (always available)
pub fn scalar_backend() -> ScalarBackend {
    ScalarBackend::new()
}

/// Create an AVX2 backend (panics if not supported)
#[cfg(all(target_arch = "x86_64", feature = "avx2"))]
pub fn avx2_backend() -> Avx2Backend {
    Avx2Backend::new()
}

/// Get the best backend for this CPU
pub fn auto_backend() -> AutoBackend {
    detect_backend()
}

/// Get the best available backend name
pub fn best_backend_name() -> &'static str {
    #[cfg(all(target_arch = "x86_64", feature = "avx2"))]
    {
        if Avx2Backend::is_available() {
            return "avx2";
        }
    }
    "scalar"
}
