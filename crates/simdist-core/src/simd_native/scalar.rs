//! Scalar kernels for the baseline tier.
//!
//! These functions serve as:
//! - The baseline kernel set on CPUs without a usable SIMD tier
//! - Reference implementations for testing SIMD correctness
//! - Tail-loop handlers for SIMD remainder processing
//!
//! The `*_from` variants start at `start` and continue an existing partial
//! sum, which is how every SIMD kernel finishes the elements left over after
//! its last full register.

use super::CosineSums;
use crate::element::Element;

/// Dot product, unrolled by 4.
#[inline]
#[must_use]
pub fn dot<T: Element>(a: &[T], b: &[T]) -> T {
    dot_from(a, b, 0, T::ZERO)
}

/// Single-pass dot product and squared norms.
#[inline]
#[must_use]
pub fn cosine<T: Element>(a: &[T], b: &[T]) -> CosineSums<T> {
    cosine_from(a, b, 0, CosineSums::default())
}

/// Sum of squared differences, unrolled by 4.
#[inline]
#[must_use]
pub fn squared_euclidean<T: Element>(a: &[T], b: &[T]) -> T {
    squared_euclidean_from(a, b, 0, T::ZERO)
}

#[inline]
pub(crate) fn dot_from<T: Element>(a: &[T], b: &[T], start: usize, mut acc: T) -> T {
    let len = a.len().min(b.len());
    let (a, b) = (&a[start..len], &b[start..len]);

    let mut a_blocks = a.chunks_exact(4);
    let mut b_blocks = b.chunks_exact(4);
    for (x, y) in a_blocks.by_ref().zip(b_blocks.by_ref()) {
        acc += x[0] * y[0] + x[1] * y[1] + x[2] * y[2] + x[3] * y[3];
    }
    for (&x, &y) in a_blocks.remainder().iter().zip(b_blocks.remainder()) {
        acc += x * y;
    }
    acc
}

#[inline]
pub(crate) fn cosine_from<T: Element>(
    a: &[T],
    b: &[T],
    start: usize,
    sums: CosineSums<T>,
) -> CosineSums<T> {
    let len = a.len().min(b.len());
    let CosineSums {
        mut dot,
        mut norm_a_sq,
        mut norm_b_sq,
    } = sums;

    let mut a_blocks = a[start..len].chunks_exact(4);
    let mut b_blocks = b[start..len].chunks_exact(4);
    for (x, y) in a_blocks.by_ref().zip(b_blocks.by_ref()) {
        dot += x[0] * y[0] + x[1] * y[1] + x[2] * y[2] + x[3] * y[3];
        norm_a_sq += x[0] * x[0] + x[1] * x[1] + x[2] * x[2] + x[3] * x[3];
        norm_b_sq += y[0] * y[0] + y[1] * y[1] + y[2] * y[2] + y[3] * y[3];
    }
    for (&x, &y) in a_blocks.remainder().iter().zip(b_blocks.remainder()) {
        dot += x * y;
        norm_a_sq += x * x;
        norm_b_sq += y * y;
    }

    CosineSums {
        dot,
        norm_a_sq,
        norm_b_sq,
    }
}

#[inline]
pub(crate) fn squared_euclidean_from<T: Element>(
    a: &[T],
    b: &[T],
    start: usize,
    mut acc: T,
) -> T {
    let len = a.len().min(b.len());
    let (a, b) = (&a[start..len], &b[start..len]);

    let mut a_blocks = a.chunks_exact(4);
    let mut b_blocks = b.chunks_exact(4);
    for (x, y) in a_blocks.by_ref().zip(b_blocks.by_ref()) {
        let d0 = x[0] - y[0];
        let d1 = x[1] - y[1];
        let d2 = x[2] - y[2];
        let d3 = x[3] - y[3];
        acc += d0 * d0 + d1 * d1 + d2 * d2 + d3 * d3;
    }
    for (&x, &y) in a_blocks.remainder().iter().zip(b_blocks.remainder()) {
        let d = x - y;
        acc += d * d;
    }
    acc
}
