//! Register-level operations a tier provides to the generic kernels.
//!
//! A backend is a zero-sized type naming one register shape (e.g. eight
//! `f32` lanes in a `__m256`). The metric algorithms in `kernels` are
//! written once against this trait and instantiated per backend inside each
//! tier's `#[target_feature]` entry points.

use crate::element::Element;

/// One SIMD register shape and the handful of operations the kernels need.
///
/// # Safety
///
/// Every method is `unsafe` because it executes tier-specific instructions:
/// callers must only invoke them from code compiled for, and running on, a
/// CPU that supports the backend's tier. `load` additionally requires `ptr`
/// to be valid for reading `LANES` consecutive elements (unaligned is fine).
pub(crate) trait SimdBackend {
    /// Scalar lane type.
    type Elem: Element;
    /// Register type.
    type Reg: Copy;
    /// Lanes per register.
    const LANES: usize;

    /// All-zero register.
    unsafe fn zero() -> Self::Reg;
    /// Unaligned load of `LANES` elements.
    unsafe fn load(ptr: *const Self::Elem) -> Self::Reg;
    /// Lane-wise `a + b`.
    unsafe fn add(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    /// Lane-wise `a - b`.
    unsafe fn sub(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    /// Lane-wise `acc + a * b`, fused where the tier has FMA.
    unsafe fn mul_add(a: Self::Reg, b: Self::Reg, acc: Self::Reg) -> Self::Reg;
    /// Horizontal reduction of all lanes into one scalar.
    unsafe fn reduce_add(v: Self::Reg) -> Self::Elem;
}
