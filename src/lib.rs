//! Vector kernels for physical-layer signal processing
//!
//! This crate re-exports the workspace members:
//!
//! - [`sigvec_core`]: kernels, backends, aligned buffers, configuration
//! - [`debug`]: text dumps, packed bit dumps and raw file dumps
//!
//! # Example
//!
//! ```rust
//! use sigvec::prelude::*;
//!
//! let k = kernels();
//! let x = vec![Cf32::new(3.0, 4.0); 8];
//! let mut mag = vec![0.0f32; 8];
//! k.magnitude_c32(&x, &mut mag).unwrap();
//! assert!(mag.iter().all(|&m| (m - 5.0).abs() < 1e-6));
//! ```

pub use sigvec_core::*;

/// Debug output for buffers
pub mod debug {
    pub use sigvec_debug::*;
}

/// Prelude for convenient imports
pub mod prelude {
    pub use sigvec_core::prelude::*;
    pub use sigvec_debug::{save_slice, write_c32, write_f32, write_packed_bits};
}
