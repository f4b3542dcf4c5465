//! Concrete backend implementations without heap dispatch
//!
//! `ScalarBackend` is a plain unit type and `Avx2Backend` can only be built
//! through its CPU check. [`AutoBackend`]
//! is a two-variant enum chosen once per process from CPU detection, so the
//! common "use the best thing available" case needs no `Box<dyn _>`.

pub mod avx2;
pub mod scalar;

pub use avx2::Avx2Backend;
pub use scalar::ScalarBackend;

use super::{KernelCaps, KernelPrimitives};
use crate::numeric::Cf32;
use std::sync::OnceLock;

/// Backend picked at runtime from the capabilities of the host CPU
#[derive(Clone, Copy, Debug)]
pub enum AutoBackend {
    Scalar(ScalarBackend),
    Avx2(Avx2Backend),
}

static DETECTED: OnceLock<AutoBackend> = OnceLock::new();

/// Get the best backend for this CPU, detecting it on first use
pub fn detect_backend() -> AutoBackend {
    *DETECTED.get_or_init(|| {
        let backend = match Avx2Backend::try_new() {
            Ok(avx2) => AutoBackend::Avx2(avx2),
            Err(_) => AutoBackend::Scalar(ScalarBackend),
        };
        tracing::debug!(backend = backend.backend_name(), "selected kernel backend");
        backend
    })
}

impl Default for AutoBackend {
    fn default() -> Self {
        detect_backend()
    }
}

impl From<ScalarBackend> for AutoBackend {
    fn from(backend: ScalarBackend) -> Self {
        Self::Scalar(backend)
    }
}

impl From<Avx2Backend> for AutoBackend {
    fn from(backend: Avx2Backend) -> Self {
        Self::Avx2(backend)
    }
}

macro_rules! delegate {
    ($( fn $name:ident(&self $(, $arg:ident: $ty:ty)* ) $(-> $ret:ty)?; )*) => {
        $(
            #[inline]
            fn $name(&self $(, $arg: $ty)*) $(-> $ret)? {
                match self {
                    AutoBackend::Scalar(b) => b.$name($($arg),*),
                    AutoBackend::Avx2(b) => b.$name($($arg),*),
                }
            }
        )*
    };
}

impl KernelPrimitives for AutoBackend {
    delegate! {
        fn backend_name(&self) -> &'static str;
        fn simd_width(&self) -> usize;
        fn accelerated_kernels(&self) -> KernelCaps;
        fn alignment(&self) -> usize;

        fn sum_f32(&self, x: &[f32]) -> f32;
        fn sum_i32(&self, x: &[i32]) -> i32;
        fn sum_c32(&self, x: &[Cf32]) -> Cf32;
        fn dot_f32(&self, x: &[f32], y: &[f32]) -> f32;
        fn dot_c32(&self, x: &[Cf32], y: &[Cf32]) -> Cf32;
        fn dot_conj_c32(&self, x: &[Cf32], y: &[Cf32]) -> Cf32;
        fn dot_c32_f32(&self, x: &[Cf32], y: &[f32]) -> Cf32;
        fn avg_power_c32(&self, x: &[Cf32]) -> f32;
        fn max_index_f32(&self, x: &[f32]) -> Option<usize>;
        fn max_abs_index_c32(&self, x: &[Cf32]) -> Option<usize>;

        fn add_f32(&self, x: &[f32], y: &[f32], z: &mut [f32]);
        fn sub_f32(&self, x: &[f32], y: &[f32], z: &mut [f32]);
        fn div_f32(&self, x: &[f32], y: &[f32], z: &mut [f32]);
        fn scale_f32(&self, x: &[f32], h: f32, z: &mut [f32]);
        fn add_assign_f32(&self, acc: &mut [f32], y: &[f32]);
        fn sub_assign_f32(&self, acc: &mut [f32], y: &[f32]);
        fn scale_assign_f32(&self, x: &mut [f32], h: f32);

        fn scale_c32(&self, x: &[Cf32], h: Cf32, z: &mut [Cf32]);
        fn scale_assign_c32(&self, x: &mut [Cf32], h: Cf32);
        fn mul_c32(&self, x: &[Cf32], y: &[Cf32], z: &mut [Cf32]);
        fn mul_assign_c32(&self, acc: &mut [Cf32], y: &[Cf32]);
        fn mul_conj_c32(&self, x: &[Cf32], y: &[Cf32], z: &mut [Cf32]);
        fn mul_c32_f32(&self, x: &[Cf32], y: &[f32], z: &mut [Cf32]);
        fn div_c32(&self, x: &[Cf32], y: &[Cf32], z: &mut [Cf32]);
        fn conj_c32(&self, x: &[Cf32], z: &mut [Cf32]);
        fn conj_assign_c32(&self, x: &mut [Cf32]);

        fn magnitude_c32(&self, x: &[Cf32], out: &mut [f32]);
        fn magnitude_sqr_c32(&self, x: &[Cf32], out: &mut [f32]);
        fn arg_c32(&self, x: &[Cf32], out: &mut [f32]);
        fn square_dist_c32(&self, symbol: Cf32, points: &[Cf32], out: &mut [f32]);
        fn deinterleave_c32(&self, x: &[Cf32], re: &mut [f32], im: &mut [f32]);
        fn deinterleave_real_c32(&self, x: &[Cf32], re: &mut [f32]);
        fn convert_f32_i16(&self, x: &[f32], scale: f32, out: &mut [i16]);

        fn add_u8(&self, x: &[u8], y: &[u8], z: &mut [u8]);
        fn quantize_u8(&self, x: &[f32], gain: f32, offset: f32, clip: f32, out: &mut [u8]);
    }
}
