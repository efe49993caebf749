//! Kernel sets: one implementation of [`KernelSet`] per instruction tier.
//!
//! Accelerated sets carry a private field, so outside this module they can
//! only be obtained through [`kernels_for`], which refuses tiers the running
//! CPU does not support. Holding one is therefore proof that its
//! `#[target_feature]` entry points are safe to execute.

use std::fmt;

use super::tier::InstructionTier;
use super::{scalar, CosineSums};

/// The complete family of metric kernels for one instruction tier.
///
/// Every set implements all three kernels for both element widths; the
/// Euclidean distance shares the squared kernel and differs only in the
/// façade's `sqrt`. Inputs of unequal length are truncated to the shorter
/// one (the façade rejects them before a kernel is ever reached).
pub trait KernelSet: Send + Sync + fmt::Debug {
    /// Tier these kernels are compiled for.
    fn tier(&self) -> InstructionTier;

    /// Σ aᵢ·bᵢ over `f32`.
    fn dot_f32(&self, a: &[f32], b: &[f32]) -> f32;
    /// Σ aᵢ·bᵢ, Σ aᵢ², Σ bᵢ² over `f32` in one pass.
    fn cosine_f32(&self, a: &[f32], b: &[f32]) -> CosineSums<f32>;
    /// Σ (aᵢ − bᵢ)² over `f32`.
    fn squared_euclidean_f32(&self, a: &[f32], b: &[f32]) -> f32;

    /// Σ aᵢ·bᵢ over `f64`.
    fn dot_f64(&self, a: &[f64], b: &[f64]) -> f64;
    /// Σ aᵢ·bᵢ, Σ aᵢ², Σ bᵢ² over `f64` in one pass.
    fn cosine_f64(&self, a: &[f64], b: &[f64]) -> CosineSums<f64>;
    /// Σ (aᵢ − bᵢ)² over `f64`.
    fn squared_euclidean_f64(&self, a: &[f64], b: &[f64]) -> f64;
}

/// Portable kernels, unrolled by 4. Always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineKernels;

impl KernelSet for BaselineKernels {
    fn tier(&self) -> InstructionTier {
        InstructionTier::Baseline
    }

    fn dot_f32(&self, a: &[f32], b: &[f32]) -> f32 {
        scalar::dot(a, b)
    }

    fn cosine_f32(&self, a: &[f32], b: &[f32]) -> CosineSums<f32> {
        scalar::cosine(a, b)
    }

    fn squared_euclidean_f32(&self, a: &[f32], b: &[f32]) -> f32 {
        scalar::squared_euclidean(a, b)
    }

    fn dot_f64(&self, a: &[f64], b: &[f64]) -> f64 {
        scalar::dot(a, b)
    }

    fn cosine_f64(&self, a: &[f64], b: &[f64]) -> CosineSums<f64> {
        scalar::cosine(a, b)
    }

    fn squared_euclidean_f64(&self, a: &[f64], b: &[f64]) -> f64 {
        scalar::squared_euclidean(a, b)
    }
}

/// Trims both inputs to their common length.
#[inline]
fn common_prefix<'a, T>(a: &'a [T], b: &'a [T]) -> (&'a [T], &'a [T]) {
    debug_assert_eq!(a.len(), b.len(), "Vector dimensions must match");
    let len = a.len().min(b.len());
    (&a[..len], &b[..len])
}

macro_rules! impl_accelerated_kernel_set {
    ($name:ident, $tier:expr, $module:ident) => {
        impl KernelSet for $name {
            fn tier(&self) -> InstructionTier {
                $tier
            }

            fn dot_f32(&self, a: &[f32], b: &[f32]) -> f32 {
                let (a, b) = common_prefix(a, b);
                // SAFETY: `self` exists only after `kernels_for` confirmed the
                // tier on this CPU; inputs have equal length.
                unsafe { super::$module::dot_f32(a, b) }
            }

            fn cosine_f32(&self, a: &[f32], b: &[f32]) -> CosineSums<f32> {
                let (a, b) = common_prefix(a, b);
                // SAFETY: See dot_f32.
                unsafe { super::$module::cosine_f32(a, b) }
            }

            fn squared_euclidean_f32(&self, a: &[f32], b: &[f32]) -> f32 {
                let (a, b) = common_prefix(a, b);
                // SAFETY: See dot_f32.
                unsafe { super::$module::squared_euclidean_f32(a, b) }
            }

            fn dot_f64(&self, a: &[f64], b: &[f64]) -> f64 {
                let (a, b) = common_prefix(a, b);
                // SAFETY: See dot_f32.
                unsafe { super::$module::dot_f64(a, b) }
            }

            fn cosine_f64(&self, a: &[f64], b: &[f64]) -> CosineSums<f64> {
                let (a, b) = common_prefix(a, b);
                // SAFETY: See dot_f32.
                unsafe { super::$module::cosine_f64(a, b) }
            }

            fn squared_euclidean_f64(&self, a: &[f64], b: &[f64]) -> f64 {
                let (a, b) = common_prefix(a, b);
                // SAFETY: See dot_f32.
                unsafe { super::$module::squared_euclidean_f64(a, b) }
            }
        }
    };
}

/// SSE4.1 kernels (128-bit, no FMA).
#[cfg(target_arch = "x86_64")]
#[derive(Debug)]
pub struct Sse41Kernels {
    _detected: (),
}

/// AVX kernels (256-bit, no FMA).
#[cfg(target_arch = "x86_64")]
#[derive(Debug)]
pub struct AvxKernels {
    _detected: (),
}

/// AVX2+FMA kernels (256-bit, fused multiply-add).
#[cfg(target_arch = "x86_64")]
#[derive(Debug)]
pub struct Avx2Kernels {
    _detected: (),
}

/// AVX-512F kernels (512-bit, fused multiply-add).
#[cfg(target_arch = "x86_64")]
#[derive(Debug)]
pub struct Avx512Kernels {
    _detected: (),
}

/// NEON kernels (128-bit, fused multiply-add).
#[cfg(target_arch = "aarch64")]
#[derive(Debug)]
pub struct NeonKernels {
    _detected: (),
}

#[cfg(target_arch = "x86_64")]
impl_accelerated_kernel_set!(Sse41Kernels, InstructionTier::Sse41, x86_sse41);
#[cfg(target_arch = "x86_64")]
impl_accelerated_kernel_set!(AvxKernels, InstructionTier::Avx, x86_avx);
#[cfg(target_arch = "x86_64")]
impl_accelerated_kernel_set!(Avx2Kernels, InstructionTier::Avx2, x86_avx2);
#[cfg(target_arch = "x86_64")]
impl_accelerated_kernel_set!(Avx512Kernels, InstructionTier::Avx512, x86_avx512);
#[cfg(target_arch = "aarch64")]
impl_accelerated_kernel_set!(NeonKernels, InstructionTier::Neon, neon);

static BASELINE: BaselineKernels = BaselineKernels;

#[cfg(target_arch = "x86_64")]
static SSE41: Sse41Kernels = Sse41Kernels { _detected: () };
#[cfg(target_arch = "x86_64")]
static AVX: AvxKernels = AvxKernels { _detected: () };
#[cfg(target_arch = "x86_64")]
static AVX2: Avx2Kernels = Avx2Kernels { _detected: () };
#[cfg(target_arch = "x86_64")]
static AVX512: Avx512Kernels = Avx512Kernels { _detected: () };
#[cfg(target_arch = "aarch64")]
static NEON: NeonKernels = NeonKernels { _detected: () };

/// Kernel set of `tier`, or `None` when the running CPU cannot execute it
/// (or it belongs to another architecture).
#[must_use]
pub fn kernels_for(tier: InstructionTier) -> Option<&'static dyn KernelSet> {
    if !tier.is_supported() {
        return None;
    }
    match tier {
        InstructionTier::Baseline => Some(&BASELINE),
        #[cfg(target_arch = "x86_64")]
        InstructionTier::Sse41 => Some(&SSE41),
        #[cfg(target_arch = "x86_64")]
        InstructionTier::Avx => Some(&AVX),
        #[cfg(target_arch = "x86_64")]
        InstructionTier::Avx2 => Some(&AVX2),
        #[cfg(target_arch = "x86_64")]
        InstructionTier::Avx512 => Some(&AVX512),
        #[cfg(target_arch = "aarch64")]
        InstructionTier::Neon => Some(&NEON),
        _ => None,
    }
}
