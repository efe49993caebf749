//! Fuzz target for the byte-level entry point.
//!
//! Arbitrary buffers, widths and dimension hints must produce a value or an
//! error, never a panic or an out-of-bounds read.
//!
//! # Running
//!
//! ```bash
//! cd fuzz
//! cargo +nightly fuzz run fuzz_byte_metrics
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use simdist_core::{compute_bytes, ElementWidth, MetricKind};

#[derive(Arbitrary, Debug)]
struct ByteInput {
    metric: u8,
    wide: bool,
    dimension: Option<u16>,
    a: Vec<u8>,
    b: Vec<u8>,
}

fuzz_target!(|input: ByteInput| {
    let kind = MetricKind::ALL[usize::from(input.metric) % MetricKind::ALL.len()];
    let width = if input.wide {
        ElementWidth::Width64
    } else {
        ElementWidth::Width32
    };

    let _ = compute_bytes(
        kind,
        width,
        &input.a,
        &input.b,
        input.dimension.map(usize::from),
    );
});
