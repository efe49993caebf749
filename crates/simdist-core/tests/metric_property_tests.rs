//! Property-based tests for the metric façade.
//!
//! Covers the algebraic properties every tier must keep (commutativity, the
//! sqrt relation, identity, cosine range, zero-norm policy) and cross-tier
//! agreement over dimension boundaries around each register width.

#![allow(clippy::cast_precision_loss)]

use proptest::{
    collection::vec,
    prelude::{prop_assert, prop_assert_eq, prop_assume, prop_oneof, Just, Strategy},
    proptest,
    test_runner::{Config as ProptestConfig, FileFailurePersistence},
};
use simdist_core::{
    available_tiers, cosine_similarity, dot_product, euclidean_distance,
    euclidean_distance_squared, evaluate, evaluate_with, kernels_for, Error, MetricKind,
};

const PROP_CASES: u32 = 128;
const PROP_MAX_SHRINK_ITERS: u32 = 2048;

/// Cross-tier band for `f32`, relative to the sum of absolute terms.
const F32_BAND: f64 = 1e-5;
/// Cross-tier band for `f64`, relative to the sum of absolute terms.
const F64_BAND: f64 = 1e-9;

fn dimension_strategy() -> impl Strategy<Value = usize> {
    prop_oneof![
        Just(1_usize),
        Just(3_usize),
        Just(5_usize),
        Just(7_usize),
        Just(8_usize),
        Just(9_usize),
        Just(15_usize),
        Just(16_usize),
        Just(17_usize),
        Just(31_usize),
        Just(32_usize),
        Just(33_usize),
        Just(63_usize),
        Just(64_usize),
        Just(65_usize),
        Just(1536_usize),
        1_usize..=600,
    ]
}

fn f32_pair_strategy() -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
    dimension_strategy().prop_flat_map(|len| {
        let a = vec(-100.0_f32..100.0_f32, len);
        let b = vec(-100.0_f32..100.0_f32, len);
        (a, b)
    })
}

fn f64_pair_strategy() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    dimension_strategy().prop_flat_map(|len| {
        let a = vec(-100.0_f64..100.0_f64, len);
        let b = vec(-100.0_f64..100.0_f64, len);
        (a, b)
    })
}

fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: PROP_CASES,
        max_shrink_iters: PROP_MAX_SHRINK_ITERS,
        // Integration tests do not have a nearby lib.rs/main.rs, so set an
        // explicit persistence root for reproducible counterexamples.
        failure_persistence: Some(Box::new(FileFailurePersistence::WithSource(
            "metric-property-regressions",
        ))),
        ..ProptestConfig::default()
    }
}

fn abs_dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x * y).abs()).sum()
}

fn abs_squared_l2(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn widen(values: &[f32]) -> Vec<f64> {
    values.iter().copied().map(f64::from).collect()
}

/// Error scale for `kind`: the sum of absolute terms bounds the rounding
/// error of any accumulation order.
fn scale(kind: MetricKind, a: &[f64], b: &[f64]) -> f64 {
    match kind {
        MetricKind::DotProduct => abs_dot(a, b).max(1.0),
        MetricKind::EuclideanDistanceSquared => abs_squared_l2(a, b).max(1.0),
        MetricKind::EuclideanDistance => abs_squared_l2(a, b).sqrt().max(1.0),
        MetricKind::CosineSimilarity => 1.0,
    }
}

proptest! {
    #![proptest_config(proptest_config())]

    #[test]
    fn test_dot_product_is_commutative((a, b) in f32_pair_strategy()) {
        prop_assert_eq!(dot_product(&a, &b).unwrap(), dot_product(&b, &a).unwrap());
    }

    #[test]
    fn test_dot_product_is_commutative_f64((a, b) in f64_pair_strategy()) {
        prop_assert_eq!(dot_product(&a, &b).unwrap(), dot_product(&b, &a).unwrap());
    }

    #[test]
    fn test_squared_distance_is_square_of_distance((a, b) in f32_pair_strategy()) {
        let distance = f64::from(euclidean_distance(&a, &b).unwrap());
        let squared = f64::from(euclidean_distance_squared(&a, &b).unwrap());
        prop_assert!(
            (distance * distance - squared).abs() <= 1e-5 * squared.max(1.0),
            "len={} distance={} squared={}",
            a.len(),
            distance,
            squared
        );
    }

    #[test]
    fn test_identity_properties((a, _b) in f32_pair_strategy()) {
        prop_assert_eq!(euclidean_distance(&a, &a).unwrap(), 0.0);
        prop_assert_eq!(euclidean_distance_squared(&a, &a).unwrap(), 0.0);
        prop_assert!(dot_product(&a, &a).unwrap() >= 0.0);
    }

    #[test]
    fn test_cosine_stays_in_range((a, b) in f32_pair_strategy()) {
        prop_assume!(a.iter().any(|x| *x != 0.0) && b.iter().any(|x| *x != 0.0));
        let cosine = cosine_similarity(&a, &b).unwrap();
        prop_assert!((-1.0 - 1e-5..=1.0 + 1e-5).contains(&cosine), "cosine={}", cosine);
    }

    #[test]
    fn test_cosine_with_zero_vector_is_zero((_a, b) in f64_pair_strategy()) {
        let zero = vec![0.0_f64; b.len()];
        prop_assert_eq!(cosine_similarity(&zero, &b).unwrap(), 0.0);
        prop_assert_eq!(cosine_similarity(&b, &zero).unwrap(), 0.0);
    }

    #[test]
    fn test_mismatched_lengths_are_rejected((a, b) in f32_pair_strategy()) {
        let shorter = &b[..b.len() - 1];
        prop_assert_eq!(
            evaluate(MetricKind::DotProduct, &a, shorter).unwrap_err(),
            Error::LengthMismatch { left: a.len(), right: a.len() - 1 }
        );
    }

    #[test]
    fn test_f32_matches_wide_reference((a, b) in f32_pair_strategy()) {
        let (wa, wb) = (widen(&a), widen(&b));
        for kind in MetricKind::ALL {
            let actual = f64::from(evaluate(kind, &a, &b).unwrap());
            let reference = evaluate(kind, &wa, &wb).unwrap();
            prop_assert!(
                (actual - reference).abs() <= F32_BAND * scale(kind, &wa, &wb),
                "{} len={} f32={} f64={}",
                kind,
                a.len(),
                actual,
                reference
            );
        }
    }

    #[test]
    fn test_every_tier_agrees_with_baseline_f32((a, b) in f32_pair_strategy()) {
        let baseline = kernels_for(simdist_core::InstructionTier::Baseline).unwrap();
        let (wa, wb) = (widen(&a), widen(&b));
        for tier in available_tiers() {
            let kernels = kernels_for(tier).unwrap();
            for kind in MetricKind::ALL {
                let actual = f64::from(evaluate_with(kernels, kind, &a, &b).unwrap());
                let expected = f64::from(evaluate_with(baseline, kind, &a, &b).unwrap());
                prop_assert!(
                    (actual - expected).abs() <= F32_BAND * scale(kind, &wa, &wb),
                    "{} on {} len={} got={} baseline={}",
                    kind,
                    tier,
                    a.len(),
                    actual,
                    expected
                );
            }
        }
    }

    #[test]
    fn test_every_tier_agrees_with_baseline_f64((a, b) in f64_pair_strategy()) {
        let baseline = kernels_for(simdist_core::InstructionTier::Baseline).unwrap();
        for tier in available_tiers() {
            let kernels = kernels_for(tier).unwrap();
            for kind in MetricKind::ALL {
                let actual = evaluate_with(kernels, kind, &a, &b).unwrap();
                let expected = evaluate_with(baseline, kind, &a, &b).unwrap();
                prop_assert!(
                    (actual - expected).abs() <= F64_BAND * scale(kind, &a, &b),
                    "{} on {} len={} got={} baseline={}",
                    kind,
                    tier,
                    a.len(),
                    actual,
                    expected
                );
            }
        }
    }
}

#[test]
fn test_empty_vectors_are_invalid_dimension() {
    let empty: Vec<f64> = Vec::new();
    assert!(matches!(
        dot_product(&empty, &empty),
        Err(Error::InvalidDimension(_))
    ));
}
