//! Native SIMD kernels with one-time runtime dispatch.
//!
//! # Module Structure
//!
//! - `tier`: Instruction-set tiers, per-architecture ladders, cached detection
//! - `scalar`: Baseline kernels and the shared tail loops
//! - `backend`: `SimdBackend`, the register operations each tier provides
//! - `kernels`: Dot, cosine and squared-L2 written once over `SimdBackend`
//! - `reduce`: Horizontal sums for x86 registers (x86_64 only)
//! - `x86_sse41`, `x86_avx`, `x86_avx2`, `x86_avx512`: x86 backends (x86_64 only)
//! - `neon`: ARM NEON backend (aarch64 only)
//! - `kernel_set`: `KernelSet` trait and the per-tier implementations
//! - `dispatch`: `Dispatcher`, the process-wide kernel registry
#![allow(clippy::doc_markdown)] // Contains ISA/architecture nomenclature in docs.
#![allow(clippy::missing_panics_doc)] // Global dispatcher panics on a fatal registry error.

// =============================================================================
// Shared submodules
// =============================================================================

pub mod scalar;
mod backend;
mod kernels;
mod tier;

pub use tier::{available_tiers, detected_tier, ladder, InstructionTier};

// =============================================================================
// Unsafe Invariants Reference
// =============================================================================
// SAFETY: Shared invariants for SIMD unsafe code in this module tree.
// - Condition 1: Pointer arithmetic in `kernels` is derived from slice pointers
//   and bounded by `len / LANES * LANES`, so every load stays in range.
// - Condition 2: Target-featured entry points are reachable only through a
//   `KernelSet` handed out by `kernels_for`, which checks detection first.
// - Condition 3: Loads use `*_loadu_*` / `vld1q_*`, which permit unaligned access.
// - Condition 4: Safe `KernelSet` methods truncate both inputs to their common
//   length before entering a kernel.

// =============================================================================
// ISA kernel submodules
// =============================================================================

#[cfg(target_arch = "x86_64")]
mod reduce;

#[cfg(target_arch = "x86_64")]
mod x86_sse41;

#[cfg(target_arch = "x86_64")]
mod x86_avx;

#[cfg(target_arch = "x86_64")]
mod x86_avx2;

#[cfg(target_arch = "x86_64")]
mod x86_avx512;

#[cfg(target_arch = "aarch64")]
mod neon;

// =============================================================================
// Registry (public API)
// =============================================================================

mod dispatch;
mod kernel_set;

#[doc(hidden)]
pub use dispatch::KernelTable;
pub use dispatch::{
    dispatcher, init_global, Dispatcher, ErasedKernel, KernelEntry, RawOutput,
};
pub use kernel_set::{kernels_for, BaselineKernels, KernelSet};

#[cfg(target_arch = "x86_64")]
pub use kernel_set::{Avx2Kernels, Avx512Kernels, AvxKernels, Sse41Kernels};

#[cfg(target_arch = "aarch64")]
pub use kernel_set::NeonKernels;

/// The three running sums of the single-pass cosine kernel.
///
/// The façade turns these into a similarity with
/// `dot / sqrt(norm_a_sq * norm_b_sq)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CosineSums<T> {
    /// Σ aᵢ·bᵢ
    pub dot: T,
    /// Σ aᵢ²
    pub norm_a_sq: T,
    /// Σ bᵢ²
    pub norm_b_sq: T,
}

// =============================================================================
// Tests (separate files per project rules)
// =============================================================================


#[cfg(test)]
mod scalar_tests;

#[cfg(all(test, target_arch = "x86_64"))]
mod reduce_tests;


#[cfg(test)]
mod dispatch_tests;
