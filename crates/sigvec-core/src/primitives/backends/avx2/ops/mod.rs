//! Operation-centric modules for AVX2 kernels
//!
//! Each module groups the kernels that share lane shuffles; the backend in
//! the parent module forwards trait calls to these functions.

pub mod arith;
pub mod complex;
pub mod convert;
pub mod reduce;
