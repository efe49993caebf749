//! Element types accepted by the kernels.
//!
//! Vectors are flat buffers of either `f32` or `f64`. [`ElementWidth`] names
//! the width at runtime (byte-level host boundary), [`Element`] names it at
//! compile time (typed slice API) and routes a typed call to the matching
//! half of a [`KernelSet`].

use std::fmt;
use std::num::ParseFloatError;
use std::ops::{Add, AddAssign, Div, Mul, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::simd_native::{CosineSums, KernelSet};

/// Floating-point width of a vector buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementWidth {
    /// IEEE-754 `float32` elements.
    #[serde(rename = "f32")]
    Width32,
    /// IEEE-754 `float64` elements.
    #[serde(rename = "f64")]
    Width64,
}

impl ElementWidth {
    /// Size of one element in bytes.
    #[must_use]
    pub const fn size_bytes(self) -> usize {
        match self {
            Self::Width32 => 4,
            Self::Width64 => 8,
        }
    }

    /// Short label (`f32` / `f64`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Width32 => "f32",
            Self::Width64 => "f64",
        }
    }
}

impl fmt::Display for ElementWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ElementWidth {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "f32" | "float32" | "float" | "32" => Ok(Self::Width32),
            "f64" | "float64" | "double" | "64" => Ok(Self::Width64),
            _ => Err(Error::UnknownWidth(s.to_string())),
        }
    }
}

mod sealed {
    use crate::metric::MetricKind;
    use crate::simd_native::{KernelEntry, KernelTable};

    pub trait Sealed: Sized {
        /// This width's half of a bound kernel table.
        fn table_entry(table: &KernelTable, kind: MetricKind) -> KernelEntry<Self>;
    }

    impl Sealed for f32 {
        #[inline]
        fn table_entry(table: &KernelTable, kind: MetricKind) -> KernelEntry<Self> {
            table.f32_entry(kind)
        }
    }

    impl Sealed for f64 {
        #[inline]
        fn table_entry(table: &KernelTable, kind: MetricKind) -> KernelEntry<Self> {
            table.f64_entry(kind)
        }
    }
}

/// A floating-point element type the kernel sets are instantiated for.
///
/// Sealed: only `f32` and `f64` implement it.
pub trait Element:
    sealed::Sealed
    + bytemuck::Pod
    + Default
    + PartialOrd
    + fmt::Debug
    + fmt::Display
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + FromStr<Err = ParseFloatError>
    + 'static
{
    /// Runtime name of this width.
    const WIDTH: ElementWidth;
    /// Additive identity.
    const ZERO: Self;

    /// Square root in this width.
    fn sqrt(self) -> Self;

    /// Lossless widening for the host boundary.
    fn to_f64(self) -> f64;

    /// Dot-product kernel of `kernels` for this width.
    fn dot(kernels: &dyn KernelSet, a: &[Self], b: &[Self]) -> Self;

    /// Single-pass cosine kernel of `kernels` for this width.
    fn cosine(kernels: &dyn KernelSet, a: &[Self], b: &[Self]) -> CosineSums<Self>;

    /// Squared-Euclidean kernel of `kernels` for this width.
    fn squared_euclidean(kernels: &dyn KernelSet, a: &[Self], b: &[Self]) -> Self;
}

impl Element for f32 {
    const WIDTH: ElementWidth = ElementWidth::Width32;
    const ZERO: Self = 0.0;

    #[inline]
    fn sqrt(self) -> Self {
        f32::sqrt(self)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        f64::from(self)
    }

    #[inline]
    fn dot(kernels: &dyn KernelSet, a: &[Self], b: &[Self]) -> Self {
        kernels.dot_f32(a, b)
    }

    #[inline]
    fn cosine(kernels: &dyn KernelSet, a: &[Self], b: &[Self]) -> CosineSums<Self> {
        kernels.cosine_f32(a, b)
    }

    #[inline]
    fn squared_euclidean(kernels: &dyn KernelSet, a: &[Self], b: &[Self]) -> Self {
        kernels.squared_euclidean_f32(a, b)
    }
}

impl Element for f64 {
    const WIDTH: ElementWidth = ElementWidth::Width64;
    const ZERO: Self = 0.0;

    #[inline]
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn dot(kernels: &dyn KernelSet, a: &[Self], b: &[Self]) -> Self {
        kernels.dot_f64(a, b)
    }

    #[inline]
    fn cosine(kernels: &dyn KernelSet, a: &[Self], b: &[Self]) -> CosineSums<Self> {
        kernels.cosine_f64(a, b)
    }

    #[inline]
    fn squared_euclidean(kernels: &dyn KernelSet, a: &[Self], b: &[Self]) -> Self {
        kernels.squared_euclidean_f64(a, b)
    }
}
