//! Metric façade: validation, kernel call, final arithmetic.
//!
//! Every public operation validates its inputs first (equal lengths, at least
//! one element), then calls through the process-wide [`dispatcher`] and
//! finishes the raw kernel output:
//!
//! - dot product and squared Euclidean distance are returned as-is
//! - Euclidean distance takes the square root
//! - cosine similarity divides by `sqrt(Σa²)·sqrt(Σb²)`, or returns `0.0` when
//!   either vector has zero norm (a zero vector has no direction)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::buffer::vector_from_bytes;
use crate::element::{Element, ElementWidth};
use crate::error::{Error, Result};
use crate::simd_native::{dispatcher, CosineSums, ErasedKernel, KernelEntry, KernelSet, RawOutput};

/// The four similarity metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Σ aᵢ·bᵢ.
    DotProduct,
    /// Σ aᵢ·bᵢ / (‖a‖·‖b‖), `0.0` when either norm is zero.
    CosineSimilarity,
    /// √Σ (aᵢ − bᵢ)².
    EuclideanDistance,
    /// Σ (aᵢ − bᵢ)², a cheaper ranking-only variant.
    EuclideanDistanceSquared,
}

impl MetricKind {
    /// All metrics, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::DotProduct,
        Self::CosineSimilarity,
        Self::EuclideanDistance,
        Self::EuclideanDistanceSquared,
    ];

    /// Canonical short name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DotProduct => "dot",
            Self::CosineSimilarity => "cosine",
            Self::EuclideanDistance => "euclidean",
            Self::EuclideanDistanceSquared => "euclidean_squared",
        }
    }

    /// Position of this metric in [`MetricKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::DotProduct => 0,
            Self::CosineSimilarity => 1,
            Self::EuclideanDistance => 2,
            Self::EuclideanDistanceSquared => 3,
        }
    }

    /// Whether a larger value means "more similar".
    ///
    /// For similarity metrics (dot, cosine) higher is better; for distances
    /// lower is better.
    #[must_use]
    pub const fn higher_is_better(self) -> bool {
        matches!(self, Self::DotProduct | Self::CosineSimilarity)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MetricKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dot" | "dotproduct" | "dot_product" | "inner" => Ok(Self::DotProduct),
            "cosine" | "cosine_similarity" => Ok(Self::CosineSimilarity),
            "euclidean" | "euclidean_distance" | "l2" => Ok(Self::EuclideanDistance),
            "euclidean_squared" | "euclidean_distance_squared" | "l2sq" => {
                Ok(Self::EuclideanDistanceSquared)
            }
            _ => Err(Error::UnknownMetric(s.to_string())),
        }
    }
}

// =============================================================================
// Typed slice API
// =============================================================================

/// Dot product Σ aᵢ·bᵢ.
pub fn dot_product<T: Element>(a: &[T], b: &[T]) -> Result<T> {
    evaluate(MetricKind::DotProduct, a, b)
}

/// Cosine similarity, `0.0` if either vector has zero norm.
pub fn cosine_similarity<T: Element>(a: &[T], b: &[T]) -> Result<T> {
    evaluate(MetricKind::CosineSimilarity, a, b)
}

/// Euclidean (L2) distance.
pub fn euclidean_distance<T: Element>(a: &[T], b: &[T]) -> Result<T> {
    evaluate(MetricKind::EuclideanDistance, a, b)
}

/// Squared Euclidean distance (no square root).
pub fn euclidean_distance_squared<T: Element>(a: &[T], b: &[T]) -> Result<T> {
    evaluate(MetricKind::EuclideanDistanceSquared, a, b)
}

/// Cosine similarity of vectors already normalized to unit length.
///
/// Computed as a plain dot product; the result is only a cosine if both
/// inputs really are unit vectors.
pub fn cosine_similarity_normalized<T: Element>(a: &[T], b: &[T]) -> Result<T> {
    evaluate(MetricKind::DotProduct, a, b)
}

/// Evaluates `kind` through the process-wide dispatcher.
pub fn evaluate<T: Element>(kind: MetricKind, a: &[T], b: &[T]) -> Result<T> {
    run_entry(dispatcher().lookup::<T>(kind), a, b)
}

/// Evaluates `kind` with an explicit kernel set, bypassing the dispatcher.
///
/// Useful for comparing tiers; see [`crate::kernels_for`].
pub fn evaluate_with<T: Element>(
    kernels: &'static dyn KernelSet,
    kind: MetricKind,
    a: &[T],
    b: &[T],
) -> Result<T> {
    run_entry(KernelEntry::bind(kind, kernels), a, b)
}

fn validate<T>(a: &[T], b: &[T]) -> Result<()> {
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    if a.is_empty() {
        return Err(Error::InvalidDimension(
            "vectors must hold at least one element".to_string(),
        ));
    }
    Ok(())
}

fn run_entry<T: Element>(entry: KernelEntry<T>, a: &[T], b: &[T]) -> Result<T> {
    validate(a, b)?;
    Ok(finish(entry.kind(), entry.call(a, b)))
}

/// Applies the façade's post-processing to raw kernel output.
fn finish<T: Element>(kind: MetricKind, raw: RawOutput<T>) -> T {
    match raw {
        RawOutput::Cosine(sums) => cosine_from_sums(sums),
        RawOutput::Scalar(sum) if kind == MetricKind::EuclideanDistance => sum.sqrt(),
        RawOutput::Scalar(sum) => sum,
    }
}

fn cosine_from_sums<T: Element>(sums: CosineSums<T>) -> T {
    if sums.norm_a_sq == T::ZERO || sums.norm_b_sq == T::ZERO {
        return T::ZERO;
    }
    // sqrt(Σa²)·sqrt(Σb²): the product of the squared norms overflows long
    // before either norm does.
    let denominator = sums.norm_a_sq.sqrt() * sums.norm_b_sq.sqrt();
    // Underflow of the product for subnormal norms.
    if denominator == T::ZERO {
        return T::ZERO;
    }
    sums.dot / denominator
}

// =============================================================================
// Byte-level API
// =============================================================================

/// Evaluates `kind` over two raw native-endian buffers of `width` elements.
///
/// - `dimension == None` uses every element in the buffers.
/// - `Some(n)` uses the leading `n` elements; `n` must be positive and no
///   larger than the buffers hold.
///
/// Buffers must have equal byte length and hold whole elements. The result
/// is widened to `f64`.
pub fn compute_bytes(
    kind: MetricKind,
    width: ElementWidth,
    a: &[u8],
    b: &[u8],
    dimension: Option<usize>,
) -> Result<f64> {
    match dispatcher().lookup_erased(kind, width) {
        ErasedKernel::F32(entry) => compute_bytes_with(entry, a, b, dimension),
        ErasedKernel::F64(entry) => compute_bytes_with(entry, a, b, dimension),
    }
}

fn compute_bytes_with<T: Element>(
    entry: KernelEntry<T>,
    a: &[u8],
    b: &[u8],
    dimension: Option<usize>,
) -> Result<f64> {
    let a = vector_from_bytes::<T>(a)?;
    let b = vector_from_bytes::<T>(b)?;
    if a.len() != b.len() {
        return Err(Error::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    let count = match dimension {
        None => a.len(),
        Some(0) => {
            return Err(Error::InvalidDimension(
                "dimension must be positive".to_string(),
            ))
        }
        Some(n) if n > a.len() => {
            return Err(Error::InvalidDimension(format!(
                "dimension {n} exceeds the {} elements in the buffers",
                a.len()
            )))
        }
        Some(n) => n,
    };

    run_entry(entry, &a[..count], &b[..count]).map(Element::to_f64)
}
