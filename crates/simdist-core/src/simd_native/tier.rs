//! Instruction-set tiers and cached runtime detection.
//!
//! Each architecture family has a ladder of tiers, weakest first. Detection
//! walks the ladder upward and stops at the first missing feature, so a tier
//! is only ever reported when every tier below it is usable as well.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// SIMD capability level a kernel set is written for.
///
/// Ordering is weakest to strongest and is meaningful only between tiers of
/// the same architecture ladder (see [`ladder`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum InstructionTier {
    /// Portable, unrolled scalar kernels. Always available.
    Baseline,
    /// SSE4.1, 128-bit registers (x86_64 only).
    Sse41,
    /// AVX, 256-bit registers without FMA (x86_64 only).
    Avx,
    /// AVX2 + FMA, 256-bit registers with fused multiply-add (x86_64 only).
    Avx2,
    /// AVX-512F, 512-bit registers (x86_64 only).
    Avx512,
    /// NEON, 128-bit registers (aarch64, always present).
    Neon,
}

impl InstructionTier {
    /// Every tier known to the crate, across all architectures.
    pub const ALL: [Self; 6] = [
        Self::Baseline,
        Self::Sse41,
        Self::Avx,
        Self::Avx2,
        Self::Avx512,
        Self::Neon,
    ];

    /// Human-readable label used in diagnostics and configuration.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Sse41 => "sse4.1",
            Self::Avx => "avx",
            Self::Avx2 => "avx2",
            Self::Avx512 => "avx512f",
            Self::Neon => "neon",
        }
    }

    /// f32 lanes per register for this tier (1 for the baseline).
    #[must_use]
    pub const fn lanes_f32(self) -> usize {
        match self {
            Self::Baseline => 1,
            Self::Sse41 | Self::Neon => 4,
            Self::Avx | Self::Avx2 => 8,
            Self::Avx512 => 16,
        }
    }

    /// Whether the running CPU can execute this tier's kernels.
    #[must_use]
    pub fn is_supported(self) -> bool {
        ladder().contains(&self) && self <= detected_tier()
    }
}

impl fmt::Display for InstructionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for InstructionTier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "baseline" | "scalar" | "basic" => Ok(Self::Baseline),
            "sse4.1" | "sse41" | "sse4_1" => Ok(Self::Sse41),
            "avx" => Ok(Self::Avx),
            "avx2" => Ok(Self::Avx2),
            "avx512f" | "avx512" | "avx-512" => Ok(Self::Avx512),
            "neon" => Ok(Self::Neon),
            _ => Err(Error::UnknownTier(s.to_string())),
        }
    }
}

impl TryFrom<String> for InstructionTier {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<InstructionTier> for String {
    fn from(tier: InstructionTier) -> Self {
        tier.label().to_string()
    }
}

/// Tier ladder of the architecture this crate was compiled for, weakest first.
#[must_use]
pub fn ladder() -> &'static [InstructionTier] {
    #[cfg(target_arch = "x86_64")]
    {
        &[
            InstructionTier::Baseline,
            InstructionTier::Sse41,
            InstructionTier::Avx,
            InstructionTier::Avx2,
            InstructionTier::Avx512,
        ]
    }

    #[cfg(target_arch = "aarch64")]
    {
        &[InstructionTier::Baseline, InstructionTier::Neon]
    }

    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        &[InstructionTier::Baseline]
    }
}

/// Cached tier - probed once at first use.
static DETECTED_TIER: OnceLock<InstructionTier> = OnceLock::new();

/// Returns the strongest tier the running CPU supports (cached).
#[inline]
#[must_use]
pub fn detected_tier() -> InstructionTier {
    *DETECTED_TIER.get_or_init(probe_tier)
}

/// Every tier the running CPU supports, weakest first.
#[must_use]
pub fn available_tiers() -> Vec<InstructionTier> {
    let detected = detected_tier();
    ladder()
        .iter()
        .copied()
        .take_while(|tier| *tier <= detected)
        .collect()
}

#[cfg(target_arch = "x86_64")]
fn probe_tier() -> InstructionTier {
    let rungs: [(InstructionTier, fn() -> bool); 4] = [
        (InstructionTier::Sse41, || is_x86_feature_detected!("sse4.1")),
        (InstructionTier::Avx, || is_x86_feature_detected!("avx")),
        (InstructionTier::Avx2, || {
            is_x86_feature_detected!("avx2") && is_x86_feature_detected!("fma")
        }),
        (InstructionTier::Avx512, || is_x86_feature_detected!("avx512f")),
    ];

    let mut tier = InstructionTier::Baseline;
    for (candidate, supported) in rungs {
        let supported = supported();
        tracing::debug!(tier = candidate.label(), supported, "probed CPU feature");
        if !supported {
            break;
        }
        tier = candidate;
    }
    tier
}

// NEON is part of the aarch64 base ISA: nothing to probe.
#[cfg(target_arch = "aarch64")]
fn probe_tier() -> InstructionTier {
    InstructionTier::Neon
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
fn probe_tier() -> InstructionTier {
    InstructionTier::Baseline
}
