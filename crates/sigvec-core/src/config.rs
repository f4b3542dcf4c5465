//! Kernel configuration
//!
//! A `KernelConfig` is plain data that can be embedded in an application's
//! own config file. It is resolved into a [`crate::Kernels`] instance by
//! [`crate::Kernels::from_config`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Smallest alignment accepted from configuration, in bytes
pub const MIN_ALIGNMENT: usize = 4;

/// Which backend to run kernels on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendPreference {
    /// Best backend detected on this CPU
    #[default]
    Auto,
    /// Always the portable scalar path
    Scalar,
    /// AVX2; fails to resolve when the CPU or build lacks it
    Avx2,
}

/// Backend choice and buffer alignment for a kernel facade
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KernelConfig {
    pub backend: BackendPreference,
    /// Buffer alignment override in bytes; the backend's preference when unset
    pub alignment: Option<usize>,
}

impl KernelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backend preference
    pub fn with_backend(mut self, backend: BackendPreference) -> Self {
        self.backend = backend;
        self
    }

    /// Override the buffer alignment
    pub fn with_alignment(mut self, alignment: usize) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Check the alignment override, if any
    pub fn validate(&self) -> Result<()> {
        if let Some(alignment) = self.alignment {
            if !alignment.is_power_of_two() {
                return Err(Error::InvalidAlignment(alignment));
            }
            if alignment < MIN_ALIGNMENT {
                return Err(Error::InvalidParameter(format!(
                    "alignment must be at least {MIN_ALIGNMENT} bytes, got {alignment}"
                )));
            }
        }
        Ok(())
    }
}
