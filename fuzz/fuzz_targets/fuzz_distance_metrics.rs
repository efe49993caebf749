//! Fuzz target for the typed metric entry points.
//!
//! Arbitrary vectors (NaN, Inf, subnormals, odd lengths) must never panic,
//! and every available tier must stay in step with the baseline.
//!
//! # Running
//!
//! ```bash
//! cd fuzz
//! cargo +nightly fuzz run fuzz_distance_metrics
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use simdist_core::{
    available_tiers, evaluate, evaluate_with, kernels_for, InstructionTier, MetricKind,
};

#[derive(Arbitrary, Debug)]
struct DistanceInput {
    vec_a: Vec<f32>,
    /// Truncated or zero-padded to the length of `vec_a`.
    vec_b: Vec<f32>,
}

fuzz_target!(|input: DistanceInput| {
    let dim = input.vec_a.len().min(2048);
    let a: Vec<f32> = input.vec_a.into_iter().take(dim).collect();
    let mut b: Vec<f32> = input.vec_b.into_iter().take(dim).collect();
    b.resize(dim, 0.0);

    let Some(baseline) = kernels_for(InstructionTier::Baseline) else {
        return;
    };

    for kind in MetricKind::ALL {
        let result = evaluate(kind, &a, &b);
        if dim == 0 {
            assert!(result.is_err());
            continue;
        }

        let expected = evaluate_with(baseline, kind, &a, &b).map(f64::from);
        for tier in available_tiers() {
            let Some(kernels) = kernels_for(tier) else {
                continue;
            };
            let actual = evaluate_with(kernels, kind, &a, &b).map(f64::from);
            if let (Ok(x), Ok(y)) = (actual, expected.clone()) {
                // Agreement is only bounded away from overflow and underflow.
                if a.iter().chain(&b).all(|v| *v == 0.0 || (1e-3..1e6).contains(&v.abs())) {
                    let scale: f64 = a
                        .iter()
                        .zip(&b)
                        .map(|(p, q)| f64::from(*p).abs() * f64::from(*q).abs()
                            + (f64::from(*p) - f64::from(*q)).powi(2))
                        .sum::<f64>()
                        .max(1.0);
                    assert!((x - y).abs() <= 1e-3 * scale, "{kind} on {tier}: {x} vs {y}");
                }
            }
        }
    }
});
