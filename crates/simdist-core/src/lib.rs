//! # simdist core
//!
//! Exact vector-similarity kernels with one-time runtime SIMD dispatch.
//!
//! ## Features
//!
//! - **4 metrics**: dot product, cosine similarity, Euclidean distance,
//!   squared Euclidean distance
//! - **2 widths**: `f32` and `f64`, typed slices or raw native-endian bytes
//! - **Runtime dispatch**: SSE4.1 / AVX / AVX2+FMA / AVX-512F on x86_64,
//!   NEON on aarch64, a portable baseline everywhere; chosen once per process
//! - **Defined edge cases**: zero-norm cosine is `0.0`, bad lengths are errors
//!
//! ## Quick Start
//!
//! ```rust
//! use simdist_core::{cosine_similarity, euclidean_distance, tier_label};
//!
//! fn main() -> simdist_core::Result<()> {
//!     let a = [1.0_f64, 0.0, 0.0, 0.0];
//!     let b = [0.0_f64, 1.0, 0.0, 0.0];
//!
//!     assert_eq!(cosine_similarity(&a, &b)?, 0.0);
//!     assert!((euclidean_distance(&a, &b)? - 2.0_f64.sqrt()).abs() < 1e-12);
//!     println!("kernels: {}", tier_label());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
// Clippy lints configured in crate Cargo.toml [lints.clippy]
#![cfg_attr(
    test,
    allow(
        clippy::float_cmp,
        clippy::unwrap_used,
        clippy::uninlined_format_args,
        clippy::cast_lossless
    )
)]

pub mod buffer;
pub mod config;
#[cfg(test)]
mod config_tests;
pub mod element;
pub mod error;
pub mod metric;
pub mod parsing;
pub mod query;
#[cfg(test)]
mod query_tests;
pub mod simd_native;

pub use buffer::{vector_from_bytes, vector_to_bytes};
pub use config::SimdConfig;
pub use element::{Element, ElementWidth};
pub use error::{Error, Result};
pub use metric::{
    compute_bytes, cosine_similarity, cosine_similarity_normalized, dot_product,
    euclidean_distance, euclidean_distance_squared, evaluate, evaluate_with, MetricKind,
};
pub use parsing::{convert_text_to_bytes, parse_vector, parse_vector_auto};
pub use query::TextQuery;
pub use simd_native::{
    available_tiers, detected_tier, dispatcher, init_global, kernels_for, CosineSums,
    Dispatcher, InstructionTier, KernelSet,
};

/// Crate version, e.g. `"0.3.0"`.
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Label of the active instruction tier, e.g. `"avx2"`.
///
/// Initializes the process-wide dispatcher if needed.
#[must_use]
pub fn tier_label() -> &'static str {
    dispatcher().tier_label()
}
