//! Fuzz target for text-to-vector conversion.
//!
//! # Running
//!
//! ```bash
//! cd fuzz
//! cargo +nightly fuzz run fuzz_vector_text
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use simdist_core::{convert_text_to_bytes, ElementWidth};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for width in [ElementWidth::Width32, ElementWidth::Width64] {
        if let Ok(bytes) = convert_text_to_bytes(text, None, width) {
            assert_eq!(bytes.len() % width.size_bytes(), 0);
            assert!(!bytes.is_empty());
        }
        if let Ok(bytes) = convert_text_to_bytes(text, Some(3), width) {
            assert_eq!(bytes.len(), 3 * width.size_bytes());
        }
    }
});
