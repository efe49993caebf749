//! ARM NEON kernels for aarch64.
//!
//! NEON is always available on aarch64, so no runtime detection is needed.

#![allow(clippy::inline_always)]

use std::arch::aarch64::*;

use super::backend::SimdBackend;
use super::kernels::tier_entry_points;

pub(crate) enum NeonF32 {}
pub(crate) enum NeonF64 {}

impl SimdBackend for NeonF32 {
    type Elem = f32;
    type Reg = float32x4_t;
    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn zero() -> float32x4_t {
        vdupq_n_f32(0.0)
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> float32x4_t {
        vld1q_f32(ptr)
    }

    #[inline(always)]
    unsafe fn add(a: float32x4_t, b: float32x4_t) -> float32x4_t {
        vaddq_f32(a, b)
    }

    #[inline(always)]
    unsafe fn sub(a: float32x4_t, b: float32x4_t) -> float32x4_t {
        vsubq_f32(a, b)
    }

    #[inline(always)]
    unsafe fn mul_add(a: float32x4_t, b: float32x4_t, acc: float32x4_t) -> float32x4_t {
        vfmaq_f32(acc, a, b)
    }

    #[inline(always)]
    unsafe fn reduce_add(v: float32x4_t) -> f32 {
        vaddvq_f32(v)
    }
}

impl SimdBackend for NeonF64 {
    type Elem = f64;
    type Reg = float64x2_t;
    const LANES: usize = 2;

    #[inline(always)]
    unsafe fn zero() -> float64x2_t {
        vdupq_n_f64(0.0)
    }

    #[inline(always)]
    unsafe fn load(ptr: *const f64) -> float64x2_t {
        vld1q_f64(ptr)
    }

    #[inline(always)]
    unsafe fn add(a: float64x2_t, b: float64x2_t) -> float64x2_t {
        vaddq_f64(a, b)
    }

    #[inline(always)]
    unsafe fn sub(a: float64x2_t, b: float64x2_t) -> float64x2_t {
        vsubq_f64(a, b)
    }

    #[inline(always)]
    unsafe fn mul_add(a: float64x2_t, b: float64x2_t, acc: float64x2_t) -> float64x2_t {
        vfmaq_f64(acc, a, b)
    }

    #[inline(always)]
    unsafe fn reduce_add(v: float64x2_t) -> f64 {
        vaddvq_f64(v)
    }
}

tier_entry_points!(features = ["neon"], f32 = NeonF32, f64 = NeonF64);
