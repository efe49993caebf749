#![allow(clippy::float_cmp)]
//! Tests for the dispatcher: tier selection, self-test and lookups.

use super::dispatch::verify_kernels;
use super::{
    available_tiers, detected_tier, dispatcher, init_global, kernels_for, Dispatcher,
    ErasedKernel, InstructionTier, RawOutput,
};
use crate::config::SimdConfig;
use crate::element::ElementWidth;
use crate::metric::MetricKind;

fn config(max_tier: Option<InstructionTier>) -> SimdConfig {
    SimdConfig {
        max_tier,
        ..SimdConfig::default()
    }
}

#[test]
fn test_initialize_uncapped_selects_detected_tier() {
    let dispatcher = Dispatcher::initialize(&config(None)).unwrap();
    assert_eq!(dispatcher.tier(), detected_tier());
    assert_eq!(dispatcher.detected_tier(), detected_tier());
    assert!(!dispatcher.is_capped());
    assert_eq!(dispatcher.tier_label(), detected_tier().label());
}

#[test]
fn test_cap_selects_each_available_tier() {
    for tier in available_tiers() {
        let dispatcher = Dispatcher::initialize(&config(Some(tier))).unwrap();
        assert_eq!(dispatcher.tier(), tier);
        assert_eq!(dispatcher.is_capped(), tier < detected_tier());
    }
}

#[test]
fn test_cap_above_cpu_support_keeps_detected_tier() {
    let unsupported = InstructionTier::ALL
        .into_iter()
        .find(|tier| !tier.is_supported());
    if let Some(tier) = unsupported {
        let dispatcher = Dispatcher::initialize(&config(Some(tier))).unwrap();
        assert_eq!(dispatcher.tier(), detected_tier());
        assert!(!dispatcher.is_capped());
    }
}

#[test]
fn test_initialize_with_self_test_disabled() {
    let config = SimdConfig {
        self_test: false,
        warmup: true,
        ..SimdConfig::default()
    };
    let dispatcher = Dispatcher::initialize(&config).unwrap();
    assert_eq!(dispatcher.tier(), detected_tier());
}

#[test]
fn test_self_test_passes_for_every_available_tier() {
    for tier in available_tiers() {
        let kernels = kernels_for(tier).unwrap();
        verify_kernels(kernels).unwrap();
    }
}

#[test]
fn test_lookup_binds_metric_to_raw_kernel() {
    let dispatcher = Dispatcher::initialize(&config(None)).unwrap();
    let a = [1.0_f64, 2.0, 3.0];
    let b = [4.0_f64, 5.0, 6.0];

    let dot = dispatcher.lookup::<f64>(MetricKind::DotProduct);
    assert_eq!(dot.kind(), MetricKind::DotProduct);
    assert_eq!(dot.tier(), dispatcher.tier());
    assert_eq!(dot.call(&a, &b), RawOutput::Scalar(32.0));

    let l2 = dispatcher.lookup::<f64>(MetricKind::EuclideanDistance);
    assert_eq!(l2.call(&a, &b), RawOutput::Scalar(27.0));
    let l2sq = dispatcher.lookup::<f64>(MetricKind::EuclideanDistanceSquared);
    assert_eq!(l2sq.call(&a, &b), RawOutput::Scalar(27.0));

    match dispatcher.lookup::<f64>(MetricKind::CosineSimilarity).call(&a, &b) {
        RawOutput::Cosine(sums) => {
            assert_eq!(sums.dot, 32.0);
            assert_eq!(sums.norm_a_sq, 14.0);
            assert_eq!(sums.norm_b_sq, 77.0);
        }
        other => panic!("expected cosine sums, got {other:?}"),
    }
}

#[test]
fn test_lookup_erased_covers_every_kind_and_width() {
    let dispatcher = Dispatcher::initialize(&config(None)).unwrap();
    for kind in MetricKind::ALL {
        match dispatcher.lookup_erased(kind, ElementWidth::Width32) {
            ErasedKernel::F32(entry) => assert_eq!(entry.kind(), kind),
            ErasedKernel::F64(_) => panic!("f32 lookup returned an f64 kernel"),
        }
        match dispatcher.lookup_erased(kind, ElementWidth::Width64) {
            ErasedKernel::F64(entry) => assert_eq!(entry.kind(), kind),
            ErasedKernel::F32(_) => panic!("f64 lookup returned an f32 kernel"),
        }
    }
}

#[test]
fn test_lookup_table_is_bound_to_selected_tier() {
    for tier in available_tiers() {
        let dispatcher = Dispatcher::initialize(&config(Some(tier))).unwrap();
        for kind in MetricKind::ALL {
            let narrow = dispatcher.lookup::<f32>(kind);
            let wide = dispatcher.lookup::<f64>(kind);
            assert_eq!(narrow.kind(), kind);
            assert_eq!(wide.kind(), kind);
            assert_eq!(narrow.tier(), tier);
            assert_eq!(wide.tier(), tier);
        }
    }
}

#[test]
fn test_global_dispatcher_is_initialized_once() {
    let first = dispatcher();
    let again = init_global(&config(Some(InstructionTier::Baseline))).unwrap();
    assert!(std::ptr::eq(first, again));
    assert!(std::ptr::eq(first, Dispatcher::global()));
}
