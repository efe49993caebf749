//! Error types for simdist.

use thiserror::Error;

use crate::element::ElementWidth;

/// Errors raised by the metric façade, buffer decoding, text conversion and
/// kernel registry.
///
/// Validation errors are raised before any kernel runs, so a failed call
/// never reads past the caller's buffers and never yields a NaN/Inf stand-in.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The two vectors hold a different number of elements.
    #[error("Vector length mismatch: {left} vs {right} elements")]
    LengthMismatch {
        /// Element count of the first vector.
        left: usize,
        /// Element count of the second vector.
        right: usize,
    },

    /// Empty vectors, a zero dimension argument, or a dimension larger than
    /// the buffers hold.
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// A byte buffer whose length is not a whole number of elements.
    #[error("Buffer of {bytes} bytes is not a whole number of {width} elements")]
    PartialElement {
        /// Buffer length in bytes.
        bytes: usize,
        /// Declared element width.
        width: ElementWidth,
    },

    /// Textual vector could not be converted.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// No kernel set could be bound for the selected tier.
    #[error("Instruction tier '{0}' has no kernel set on this CPU")]
    TierUnavailable(String),

    /// A kernel disagreed with the baseline kernels during registry verification.
    #[error("Kernel self-test failed: {metric} on tier '{tier}' returned {actual}, baseline returned {expected}")]
    KernelSelfTest {
        /// Tier label of the faulty kernel set.
        tier: String,
        /// Metric and width that failed, e.g. `cosine/f32`.
        metric: String,
        /// Value produced by the kernel under test.
        actual: f64,
        /// Value produced by the baseline kernel.
        expected: f64,
    },

    /// Unrecognised instruction tier label.
    #[error("Unknown instruction tier '{0}'. Use: baseline, sse4.1, avx, avx2, avx512f, neon")]
    UnknownTier(String),

    /// Unrecognised metric name.
    #[error("Unknown metric '{0}'. Use: dot, cosine, euclidean, euclidean_squared")]
    UnknownMetric(String),

    /// Unrecognised element width.
    #[error("Unknown element width '{0}'. Use: f32, f64")]
    UnknownWidth(String),
}

impl Error {
    /// Stable machine-readable code for host collaborators.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::LengthMismatch { .. } => "SD-001",
            Self::InvalidDimension(_) => "SD-002",
            Self::PartialElement { .. } => "SD-003",
            Self::Parse(_) => "SD-004",
            Self::Config(_) => "SD-005",
            Self::TierUnavailable(_) => "SD-006",
            Self::KernelSelfTest { .. } => "SD-007",
            Self::UnknownTier(_) => "SD-008",
            Self::UnknownMetric(_) => "SD-009",
            Self::UnknownWidth(_) => "SD-010",
        }
    }

    /// Returns `false` for registry failures, which indicate a defect in
    /// startup rather than bad input data.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            Self::TierUnavailable(_) | Self::KernelSelfTest { .. }
        )
    }
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type alias for simdist operations.
pub type Result<T> = std::result::Result<T, Error>;
