//! Kernel registry: the tier chosen once per process and the typed lookups
//! the façade calls through.
//!
//! This module provides:
//! - `Dispatcher` for binding, verifying and logging one kernel set
//! - `dispatcher()` / `init_global()` for the process-wide instance
//! - `KernelEntry` / `ErasedKernel`, the (metric × width) → kernel table

use std::fmt;
use std::hint::black_box;
use std::sync::OnceLock;

use tracing::{info, warn};

use super::kernel_set::{kernels_for, BaselineKernels, KernelSet};
use super::tier::{detected_tier, ladder, InstructionTier};
use super::CosineSums;
use crate::config::SimdConfig;
use crate::element::{Element, ElementWidth};
use crate::error::{Error, Result};
use crate::metric::MetricKind;

// =============================================================================
// Kernel entries
// =============================================================================

/// What a kernel hands back before the façade's post-processing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawOutput<T> {
    /// A finished sum (dot product or squared distance).
    Scalar(T),
    /// The three cosine sums.
    Cosine(CosineSums<T>),
}

type RawKernel<T> = fn(&dyn KernelSet, &[T], &[T]) -> RawOutput<T>;

fn raw_dot<T: Element>(kernels: &dyn KernelSet, a: &[T], b: &[T]) -> RawOutput<T> {
    RawOutput::Scalar(T::dot(kernels, a, b))
}

fn raw_cosine<T: Element>(kernels: &dyn KernelSet, a: &[T], b: &[T]) -> RawOutput<T> {
    RawOutput::Cosine(T::cosine(kernels, a, b))
}

fn raw_squared_euclidean<T: Element>(kernels: &dyn KernelSet, a: &[T], b: &[T]) -> RawOutput<T> {
    RawOutput::Scalar(T::squared_euclidean(kernels, a, b))
}

/// One resolved (metric × width) slot of the registry.
///
/// Resolving happens once in [`KernelEntry::bind`]; [`KernelEntry::call`]
/// jumps straight to the bound kernel.
#[derive(Clone, Copy)]
pub struct KernelEntry<T> {
    kind: MetricKind,
    kernels: &'static dyn KernelSet,
    run: RawKernel<T>,
}

impl<T: Element> fmt::Debug for KernelEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KernelEntry")
            .field("kind", &self.kind)
            .field("width", &T::WIDTH)
            .field("tier", &self.kernels.tier())
            .finish()
    }
}

impl<T: Element> KernelEntry<T> {
    /// Binds `kind` at width `T` to a kernel of `kernels`.
    #[must_use]
    pub fn bind(kind: MetricKind, kernels: &'static dyn KernelSet) -> Self {
        let run: RawKernel<T> = match kind {
            MetricKind::DotProduct => raw_dot::<T>,
            MetricKind::CosineSimilarity => raw_cosine::<T>,
            MetricKind::EuclideanDistance | MetricKind::EuclideanDistanceSquared => {
                raw_squared_euclidean::<T>
            }
        };
        Self { kind, kernels, run }
    }

    /// Metric this entry computes.
    #[must_use]
    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    /// Tier of the bound kernel.
    #[must_use]
    pub fn tier(&self) -> InstructionTier {
        self.kernels.tier()
    }

    /// Runs the raw kernel. Inputs are expected to be validated already.
    #[inline]
    #[must_use]
    pub fn call(&self, a: &[T], b: &[T]) -> RawOutput<T> {
        (self.run)(self.kernels, a, b)
    }
}

/// Every (metric × width) entry of one kernel set, bound once.
///
/// Indexed by [`MetricKind::index`].
#[derive(Debug, Clone, Copy)]
pub struct KernelTable {
    f32_entries: [KernelEntry<f32>; 4],
    f64_entries: [KernelEntry<f64>; 4],
}

impl KernelTable {
    fn bind(kernels: &'static dyn KernelSet) -> Self {
        Self {
            f32_entries: MetricKind::ALL.map(|kind| KernelEntry::bind(kind, kernels)),
            f64_entries: MetricKind::ALL.map(|kind| KernelEntry::bind(kind, kernels)),
        }
    }

    #[inline]
    pub(crate) fn f32_entry(&self, kind: MetricKind) -> KernelEntry<f32> {
        self.f32_entries[kind.index()]
    }

    #[inline]
    pub(crate) fn f64_entry(&self, kind: MetricKind) -> KernelEntry<f64> {
        self.f64_entries[kind.index()]
    }
}

/// A registry slot resolved from a runtime [`ElementWidth`].
#[derive(Debug, Clone, Copy)]
pub enum ErasedKernel {
    /// `f32` kernel.
    F32(KernelEntry<f32>),
    /// `f64` kernel.
    F64(KernelEntry<f64>),
}

// =============================================================================
// Dispatcher
// =============================================================================

/// The kernel set selected for this process plus how it was chosen.
#[derive(Debug)]
pub struct Dispatcher {
    kernels: &'static dyn KernelSet,
    table: KernelTable,
    detected: InstructionTier,
    capped: bool,
}

impl Dispatcher {
    /// Detects the CPU tier, applies the configured cap, binds the kernel
    /// set and (unless disabled) verifies it against the baseline kernels.
    pub fn initialize(config: &SimdConfig) -> Result<Self> {
        let detected = detected_tier();
        let (tier, capped) = select_tier(detected, config.max_tier);

        let kernels = kernels_for(tier)
            .ok_or_else(|| Error::TierUnavailable(tier.label().to_string()))?;

        if config.self_test {
            verify_kernels(kernels)?;
        }

        info!(
            tier = tier.label(),
            detected = detected.label(),
            capped,
            self_test = config.self_test,
            "SIMD kernel set selected"
        );

        let dispatcher = Self {
            kernels,
            table: KernelTable::bind(kernels),
            detected,
            capped,
        };
        if config.warmup {
            dispatcher.warmup();
        }
        Ok(dispatcher)
    }

    /// Process-wide dispatcher (see [`dispatcher`]).
    #[must_use]
    pub fn global() -> &'static Self {
        dispatcher()
    }

    /// Active tier.
    #[must_use]
    pub fn tier(&self) -> InstructionTier {
        self.kernels.tier()
    }

    /// Human-readable label of the active tier, e.g. `"avx2"`.
    #[must_use]
    pub fn tier_label(&self) -> &'static str {
        self.tier().label()
    }

    /// Strongest tier the CPU supports, before any configured cap.
    #[must_use]
    pub fn detected_tier(&self) -> InstructionTier {
        self.detected
    }

    /// Whether a configured cap lowered the tier below the detected one.
    #[must_use]
    pub fn is_capped(&self) -> bool {
        self.capped
    }

    /// The bound kernel set.
    #[must_use]
    pub fn kernels(&self) -> &'static dyn KernelSet {
        self.kernels
    }

    /// Kernel for `kind` at width `T`.
    #[inline]
    #[must_use]
    pub fn lookup<T: Element>(&self, kind: MetricKind) -> KernelEntry<T> {
        T::table_entry(&self.table, kind)
    }

    /// Kernel for `kind` at a width only known at runtime.
    #[inline]
    #[must_use]
    pub fn lookup_erased(&self, kind: MetricKind, width: ElementWidth) -> ErasedKernel {
        match width {
            ElementWidth::Width32 => ErasedKernel::F32(self.table.f32_entry(kind)),
            ElementWidth::Width64 => ErasedKernel::F64(self.table.f64_entry(kind)),
        }
    }

    /// Runs every kernel a few times so the first real call is not cold.
    pub fn warmup(&self) {
        let warmup_size = 768;
        let a32: Vec<f32> = vec![0.01; warmup_size];
        let b32: Vec<f32> = vec![0.01; warmup_size];
        let a64: Vec<f64> = vec![0.01; warmup_size];
        let b64: Vec<f64> = vec![0.01; warmup_size];
        for _ in 0..3 {
            black_box(self.kernels.dot_f32(black_box(&a32), black_box(&b32)));
            black_box(self.kernels.cosine_f32(black_box(&a32), black_box(&b32)));
            black_box(self.kernels.squared_euclidean_f32(black_box(&a32), black_box(&b32)));
            black_box(self.kernels.dot_f64(black_box(&a64), black_box(&b64)));
            black_box(self.kernels.cosine_f64(black_box(&a64), black_box(&b64)));
            black_box(self.kernels.squared_euclidean_f64(black_box(&a64), black_box(&b64)));
        }
    }
}

/// Applies an optional cap to the detected tier. Returns the tier to bind
/// and whether the cap lowered it.
fn select_tier(
    detected: InstructionTier,
    cap: Option<InstructionTier>,
) -> (InstructionTier, bool) {
    match cap {
        None => (detected, false),
        Some(cap) if !ladder().contains(&cap) => {
            warn!(
                cap = cap.label(),
                detected = detected.label(),
                "Configured SIMD tier cap does not exist on this architecture; ignoring it"
            );
            (detected, false)
        }
        Some(cap) if cap > detected => {
            warn!(
                cap = cap.label(),
                detected = detected.label(),
                "Configured SIMD tier cap exceeds what this CPU supports; using detected tier"
            );
            (detected, false)
        }
        Some(cap) => (cap, cap < detected),
    }
}

// =============================================================================
// Self-test
// =============================================================================

const PROBE_LEN: usize = 37;

/// Probe inputs on a 0.25 grid: every product and partial sum is exactly
/// representable, so all tiers must agree bit for bit.
fn probe_vectors<T: Element + From<i16>>() -> (Vec<T>, Vec<T>) {
    let quarter = T::from(1_i16) / T::from(4_i16);
    let a = (0..PROBE_LEN)
        .map(|i| {
            let step = i16::try_from((i * 7) % 11).unwrap_or(0);
            (T::from(step) - T::from(5_i16)) * quarter
        })
        .collect();
    let b = (0..PROBE_LEN)
        .map(|i| {
            let step = i16::try_from((i * 5) % 13).unwrap_or(0);
            (T::from(step) - T::from(6_i16)) * quarter
        })
        .collect();
    (a, b)
}

fn check(tier: InstructionTier, metric: &str, actual: f64, expected: f64) -> Result<()> {
    if actual.to_bits() == expected.to_bits() {
        return Ok(());
    }
    Err(Error::KernelSelfTest {
        tier: tier.label().to_string(),
        metric: metric.to_string(),
        actual,
        expected,
    })
}

fn verify_width<T: Element + From<i16>>(kernels: &dyn KernelSet) -> Result<()> {
    let (a, b) = probe_vectors::<T>();
    let tier = kernels.tier();
    let width = T::WIDTH.label();
    let baseline = BaselineKernels;

    check(
        tier,
        &format!("dot/{width}"),
        T::dot(kernels, &a, &b).to_f64(),
        T::dot(&baseline, &a, &b).to_f64(),
    )?;

    let sums = T::cosine(kernels, &a, &b);
    let expected = T::cosine(&baseline, &a, &b);
    check(tier, &format!("cosine.dot/{width}"), sums.dot.to_f64(), expected.dot.to_f64())?;
    check(
        tier,
        &format!("cosine.norm_a/{width}"),
        sums.norm_a_sq.to_f64(),
        expected.norm_a_sq.to_f64(),
    )?;
    check(
        tier,
        &format!("cosine.norm_b/{width}"),
        sums.norm_b_sq.to_f64(),
        expected.norm_b_sq.to_f64(),
    )?;

    check(
        tier,
        &format!("squared_euclidean/{width}"),
        T::squared_euclidean(kernels, &a, &b).to_f64(),
        T::squared_euclidean(&baseline, &a, &b).to_f64(),
    )
}

/// Checks every kernel of `kernels` against the baseline on a fixed probe.
pub(crate) fn verify_kernels(kernels: &dyn KernelSet) -> Result<()> {
    verify_width::<f32>(kernels)?;
    verify_width::<f64>(kernels)
}

// =============================================================================
// Process-wide instance
// =============================================================================

static GLOBAL: OnceLock<Dispatcher> = OnceLock::new();

/// Initializes the process-wide dispatcher from `config`.
///
/// Idempotent: once a dispatcher exists, later calls return it unchanged and
/// ignore their `config`.
pub fn init_global(config: &SimdConfig) -> Result<&'static Dispatcher> {
    if let Some(existing) = GLOBAL.get() {
        return Ok(existing);
    }
    let dispatcher = Dispatcher::initialize(config)?;
    Ok(GLOBAL.get_or_init(|| dispatcher))
}

/// Returns the process-wide dispatcher, initializing it from
/// [`SimdConfig::load`] on first use.
///
/// # Panics
///
/// Panics if the registry cannot be built. That is a startup defect; no
/// metric is ever served from a half-built registry.
#[must_use]
pub fn dispatcher() -> &'static Dispatcher {
    GLOBAL.get_or_init(|| {
        let config = SimdConfig::load().unwrap_or_else(|err| {
            warn!(error = %err, "Failed to load SIMD configuration; using defaults");
            SimdConfig::default()
        });
        match Dispatcher::initialize(&config) {
            Ok(dispatcher) => dispatcher,
            Err(err) => panic!("SIMD kernel registry initialization failed: {err}"),
        }
    })
}
