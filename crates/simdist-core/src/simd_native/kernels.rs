//! Metric kernels written once over [`SimdBackend`].
//!
//! Each kernel covers `len / LANES * LANES` elements with registers (two
//! independent accumulators for the paired main loop, then at most one single
//! chunk), reduces the registers to a scalar, and hands that partial sum to
//! the scalar tail loop in `scalar`, which finishes the remaining
//! `len % LANES` elements with the same formula.
//!
//! These functions are `#[inline(always)]` so they are compiled inside the
//! caller's `#[target_feature]` context; they must never be called from
//! anywhere else.

use super::backend::SimdBackend;
use super::{scalar, CosineSums};

/// Σ aᵢ·bᵢ.
///
/// # Safety
///
/// CPU must support `B`'s tier and `a.len() == b.len()`.
#[allow(clippy::inline_always)]
#[inline(always)]
pub(crate) unsafe fn dot<B: SimdBackend>(a: &[B::Elem], b: &[B::Elem]) -> B::Elem {
    debug_assert_eq!(a.len(), b.len());
    let len = a.len();
    let chunks = len / B::LANES;
    let pairs = chunks / 2;

    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    let mut acc0 = B::zero();
    let mut acc1 = B::zero();

    for i in 0..pairs {
        let offset = i * 2 * B::LANES;
        acc0 = B::mul_add(B::load(a_ptr.add(offset)), B::load(b_ptr.add(offset)), acc0);
        acc1 = B::mul_add(
            B::load(a_ptr.add(offset + B::LANES)),
            B::load(b_ptr.add(offset + B::LANES)),
            acc1,
        );
    }

    if chunks % 2 == 1 {
        let offset = pairs * 2 * B::LANES;
        acc0 = B::mul_add(B::load(a_ptr.add(offset)), B::load(b_ptr.add(offset)), acc0);
    }

    let partial = B::reduce_add(B::add(acc0, acc1));
    scalar::dot_from(a, b, chunks * B::LANES, partial)
}

/// Σ aᵢ·bᵢ, Σ aᵢ², Σ bᵢ² in one pass.
///
/// # Safety
///
/// CPU must support `B`'s tier and `a.len() == b.len()`.
#[allow(clippy::inline_always)]
#[inline(always)]
pub(crate) unsafe fn cosine<B: SimdBackend>(
    a: &[B::Elem],
    b: &[B::Elem],
) -> CosineSums<B::Elem> {
    debug_assert_eq!(a.len(), b.len());
    let len = a.len();
    let chunks = len / B::LANES;

    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    let mut dot = B::zero();
    let mut norm_a = B::zero();
    let mut norm_b = B::zero();

    for i in 0..chunks {
        let offset = i * B::LANES;
        let va = B::load(a_ptr.add(offset));
        let vb = B::load(b_ptr.add(offset));
        dot = B::mul_add(va, vb, dot);
        norm_a = B::mul_add(va, va, norm_a);
        norm_b = B::mul_add(vb, vb, norm_b);
    }

    let partial = CosineSums {
        dot: B::reduce_add(dot),
        norm_a_sq: B::reduce_add(norm_a),
        norm_b_sq: B::reduce_add(norm_b),
    };
    scalar::cosine_from(a, b, chunks * B::LANES, partial)
}

/// Σ (aᵢ − bᵢ)².
///
/// # Safety
///
/// CPU must support `B`'s tier and `a.len() == b.len()`.
#[allow(clippy::inline_always)]
#[inline(always)]
pub(crate) unsafe fn squared_euclidean<B: SimdBackend>(
    a: &[B::Elem],
    b: &[B::Elem],
) -> B::Elem {
    debug_assert_eq!(a.len(), b.len());
    let len = a.len();
    let chunks = len / B::LANES;
    let pairs = chunks / 2;

    let a_ptr = a.as_ptr();
    let b_ptr = b.as_ptr();

    let mut acc0 = B::zero();
    let mut acc1 = B::zero();

    for i in 0..pairs {
        let offset = i * 2 * B::LANES;
        let diff0 = B::sub(B::load(a_ptr.add(offset)), B::load(b_ptr.add(offset)));
        acc0 = B::mul_add(diff0, diff0, acc0);

        let diff1 = B::sub(
            B::load(a_ptr.add(offset + B::LANES)),
            B::load(b_ptr.add(offset + B::LANES)),
        );
        acc1 = B::mul_add(diff1, diff1, acc1);
    }

    if chunks % 2 == 1 {
        let offset = pairs * 2 * B::LANES;
        let diff = B::sub(B::load(a_ptr.add(offset)), B::load(b_ptr.add(offset)));
        acc0 = B::mul_add(diff, diff, acc0);
    }

    let partial = B::reduce_add(B::add(acc0, acc1));
    scalar::squared_euclidean_from(a, b, chunks * B::LANES, partial)
}

/// Generates the six `#[target_feature]` entry points of one tier module
/// (three metrics × two widths) from its two backends.
macro_rules! tier_entry_points {
    (features = [$($feature:literal),+], f32 = $b32:ty, f64 = $b64:ty) => {
        #[target_feature($(enable = $feature),+)]
        pub(crate) unsafe fn dot_f32(a: &[f32], b: &[f32]) -> f32 {
            super::kernels::dot::<$b32>(a, b)
        }

        #[target_feature($(enable = $feature),+)]
        pub(crate) unsafe fn cosine_f32(a: &[f32], b: &[f32]) -> super::CosineSums<f32> {
            super::kernels::cosine::<$b32>(a, b)
        }

        #[target_feature($(enable = $feature),+)]
        pub(crate) unsafe fn squared_euclidean_f32(a: &[f32], b: &[f32]) -> f32 {
            super::kernels::squared_euclidean::<$b32>(a, b)
        }

        #[target_feature($(enable = $feature),+)]
        pub(crate) unsafe fn dot_f64(a: &[f64], b: &[f64]) -> f64 {
            super::kernels::dot::<$b64>(a, b)
        }

        #[target_feature($(enable = $feature),+)]
        pub(crate) unsafe fn cosine_f64(a: &[f64], b: &[f64]) -> super::CosineSums<f64> {
            super::kernels::cosine::<$b64>(a, b)
        }

        #[target_feature($(enable = $feature),+)]
        pub(crate) unsafe fn squared_euclidean_f64(a: &[f64], b: &[f64]) -> f64 {
            super::kernels::squared_euclidean::<$b64>(a, b)
        }
    };
}

pub(crate) use tier_entry_points;
